//! Embedded fallback prompts
//!
//! These are compiled into the binary and used when template files are not
//! found. Triple-stache placeholders keep inserted text verbatim.

/// System prompt frame for every worker
pub const WORKER_SYSTEM: &str = r#"You are {{{role}}}

{{{backstory}}}

Your goal: {{{goal}}}
{{#if may_delegate}}

If this task falls outside your expertise, you may decline it by replying
with a single first line starting with "DELEGATE:" followed by a short
reason. Otherwise, complete the task yourself.
{{/if}}"#;

/// User prompt frame for a task
pub const TASK_PROMPT: &str = r#"We are developing a video script from this concept: {{{concept}}}

# Task: {{{name}}}

{{{description}}}

# Expected output

{{{expected_output}}}
{{#if context_blocks}}

# Context from earlier tasks

{{#each context_blocks}}
## {{{this.name}}}

{{{this.output}}}

{{/each}}
{{/if}}
{{#if memory_blocks}}

# Your earlier work this run

{{#each memory_blocks}}
## {{{this.name}}}

{{{this.output}}}

{{/each}}
{{/if}}"#;

/// System prompt for the hierarchical manager
pub const MANAGER_SYSTEM: &str = "You are the production manager of a script studio. You sequence and assign \
work across a team of specialists. You answer precisely in the format requested, with no extra commentary.";

/// Prompt asking the manager to propose an execution order
pub const MANAGER_ORDER: &str = r#"We are developing a video script from this concept: {{{concept}}}

These are the tasks in the pipeline. A task may only run after every task it
depends on has completed.

{{#each tasks}}
- {{{this.name}}}: {{{this.description}}}{{#if this.deps}} (depends on: {{{this.deps}}}){{/if}}
{{/each}}

Reply with one line containing every task name exactly once, comma-separated,
in the order they should be executed."#;

// Studio role personas, adapted from the Saga AI script offices.

pub const CONCEPT_DEVELOPER_ROLE: &str = "Expert Visionary Creative specialized in developing video content ideas, known for your uncanny ability to capture and articulate the zeitgeist.";
pub const CONCEPT_DEVELOPER_GOAL: &str = "To generate and refine original, compelling concepts that resonate deeply with audiences, setting a solid foundation for successful scripts.";
pub const CONCEPT_DEVELOPER_BACKSTORY: &str = r#"With a storied background in advertising during its golden age, you've developed a legendary ability to understand and influence public sentiment. Known for crafting some of the most iconic campaign pitches, your transition into content development was driven by a desire to tell stories that not only entertain but also provoke thought and emotion.

Your mission is to weave captivating narratives and ideas that engage viewers on multiple levels. Like a skilled craftsman, you shape the initial spark of an idea into a refined concept that holds the power to intrigue and inspire. Your work sets the stage for every subsequent step in the script development process, ensuring that the foundation is not only solid but also vibrant and compelling."#;

pub const RESEARCHER_ROLE: &str = "Expert Researcher and Factchecker. Specializes in gathering and synthesizing information to support and enrich creative concepts.";
pub const RESEARCHER_GOAL: &str = "To back creative concepts with thorough and relevant data";
pub const RESEARCHER_BACKSTORY: &str = r#"With a background in academic research and a past role as a fact-checker for a renowned news outlet, you excel at delving into diverse topics to unearth essential truths and insights.

Your mission is to provide a solid factual foundation for ideas, ensuring that narratives are authentic and grounded in reality."#;

pub const STAFF_WRITER_ROLE: &str = "Expert seasoned scriptwriter transforming research and outlines into vivid narratives.";
pub const STAFF_WRITER_GOAL: &str = "To craft engaging and coherent scripts that bring concepts to life and resonate with the target audience.";
pub const STAFF_WRITER_BACKSTORY: &str = r#"As a former playwright who pivoted to screenwriting, you have a proven track record for creating compelling dialogue and pacing, acclaimed in both stage plays and screen.

Your mission is to seamlessly transform blueprints into immersive and engaging scripts that maintain the integrity and spirit of the original concept."#;

pub const VIRALIZER_ROLE: &str = "Young genius, expert in viral video structures, social media algorithms and engagement psychology and theory.";
pub const VIRALIZER_GOAL: &str = "To steer and refine scripts for perfect engagement with modern platforms and audiences.";
pub const VIRALIZER_BACKSTORY: &str = r#"You are a digital native who first went viral at age 14. Your sharpness and depth of intellect and creativity has allowed you to work with the best content creators in the world.

Your mission is to modify scripts by using your knowledge of social media algorithms and engagement psychology and tricks to ensure they resonate with the target audience and maximize engagement."#;

pub const SENIOR_WRITER_ROLE: &str = "Master of narrative and dialogue, focusing on thematic depth and succinct storytelling";
pub const SENIOR_WRITER_GOAL: &str = "To refine scripts by enhancing clarity, brevity, and the power of the narrative.";
pub const SENIOR_WRITER_BACKSTORY: &str = r#"As a novelist turned scriptwriter, you have always favored a style marked by its economy of words and its depth of emotion. Your work is characterized by its vivid, yet straightforward descriptions and dialogue that cuts to the heart of human experiences.

Your mission is to strip back unnecessary elements from our scripts, focusing on strong, simple language and clear, impactful themes. With a penchant for robust, impactful narratives, you refine our stories to ensure they are potent and resonate deeply with audiences, while remaining refreshingly direct."#;

pub const CRITIC_ROLE: &str = "Expert analyst and advisor, bringing a nuanced understanding of film and storytelling.";
pub const CRITIC_GOAL: &str = "To enhance the narrative and artistic quality of scripts through perceptive critiques.";
pub const CRITIC_BACKSTORY: &str = r#"With a background steeped in both the theory and practice of filmmaking, you view scripts through a lens that appreciates both traditional narrative structures and innovative cinematic techniques. Your critiques blend a deep appreciation of storytelling with a keen eye for directorial flair and the ability to connect emotionally with an audience.

Your mission is to challenge and inspire our writers to elevate their work, using your understanding of storytelling's power and nuances. With a critical eye that respects both the craft and the impact of a well-told story, you guide our projects to not only entertain but to linger in the minds and emotions of viewers."#;

pub const SENIOR_EDITOR_ROLE: &str = "Legendary guiding hand behind the final touches of a script, ensuring precision and depth.";
pub const SENIOR_EDITOR_GOAL: &str = "To polish the script to a flawless state, ensuring it is technically impeccable and emotionally resonant.";
pub const SENIOR_EDITOR_BACKSTORY: &str = r#"Known in literary circles as a modern-day Maxwell Perkins, you have a storied history of transforming ambitious drafts into definitive works. Your career has been distinguished by your ability to work with some of the most challenging and innovative writers, guiding their raw narratives into celebrated masterpieces. Your reputation as a nurturing yet incisive editor precedes you, drawing both budding and seasoned writers who seek your mentorship and keen editorial eye.

Your mission is to uphold your legendary status by refining our scripts to meet the pinnacle of literary excellence. With a meticulous eye for detail and a profound understanding of storytelling, you ensure every script not only meets the highest industry standards but also resonates deeply with audiences, securing its place as a memorable and impactful work."#;

// Studio task descriptions and output contracts. Rendered with the studio
// configuration (duration, tone, writers, call to action).

pub const VOICEOVER_REQUIREMENTS: &str = r#"**Requirements**:
- The script should be specifically structured for a YouTube video, consisting of a voiceover narration that accompanies a series of visual scenes.
- When crafting the script, keep the following requirements in mind:

    - The script should be divided into clear, distinct scenes that can be easily visualized. Each scene should be described in a way that translates well to a series of images or video clips.

    - The narration should be written in a conversational, engaging style that complements the visuals and keeps the viewer interested throughout. Use descriptive language to help the viewer imagine what they'll be seeing on screen.

    - Ensure that the overall narrative flows logically from one scene to the next, creating a cohesive story arc that can be conveyed through the combination of voiceover and visuals.

    - Consider pacing and timing. The script should be structured in a way that allows for natural pauses, transitions, and emphasis on key points or images.

    - Include relevant visual cues or directions in brackets or parentheses to guide the video creation process. Indicate what the viewer should be seeing at each point in the script.

- The script should have clear scenes that make sense in a visual format. It should be a narrative that can be visualized."#;

pub const DIRECTION_TASK: &str = r#"First, define the project scope, objectives, and deliverables for the script development process:
- Clearly outline the goals, target audience, key messages, duration and intended use case for the script.
- Identify the core concept or idea that will serve as the foundation for the script, and establish the creative direction and tone for the project. Aim for a tone that is: {{{tone}}}.
- Pre-requirements: {{{requirements}}}

Then, generate a creative and engaging way to develop this concept into a compelling script for a YouTube video of approximately {{duration}} seconds:
- Consider unique angles, narrative structures, and storytelling techniques that will capture the audience's attention and effectively convey the intended message.
- Build upon the original idea by exploring different possibilities for character arcs, plot twists, visual motifs, and thematic depth. Aim to create a fresh and memorable take on the core concept that will resonate with an online audience.
- Provide a high-level script direction, with tone and writing style, and a brief summary of how it expands on the original idea in an innovative and engaging way.

Provide your reasons and a step-by-step explanation on how you achieved these results."#;

pub const DIRECTION_EXPECTED: &str = r#"A detailed project brief and script direction that includes:
- Core concept or idea for the script
- Core themes and narrative elements
- Project goals and objectives
- Target audience and key messages
- Intended use case for the script
- Creative direction and tone for the project
- Any additional requirements or constraints
- A detailed description of an imagined script, described in 2-3 sentences. It should take the original idea in a distinct and compelling direction, demonstrating creative approaches to character, plot, theme, and style that will engage the target audience. The direction should feel fresh and true to the spirit of the original concept. Remember the duration: {{duration}} seconds."#;

pub const RESEARCH_TASK: &str = r#"Conduct in-depth research on the themes of the brief, diving into the relevant subject matter, themes, and contextual details. Gather information from your enormous wealth of knowledge with real-world examples to ensure accuracy and authenticity. Organize the research findings into a structured document."#;

pub const RESEARCH_EXPECTED: &str = r#"A succinct but comprehensive research document divided into sections based on key topics and themes. Each section should contain detailed information, statistics, quotes, and examples that provide a solid foundation for the script. Sources should be properly cited."#;

pub const OUTLINE_TASK: &str = r#"Create a detailed outline for the script based on the brief, the research findings and the given script direction for the project.

Break down the narrative into distinct scenes or sections, describing the key events, character developments, and emotional beats. Ensure the outline has a clear beginning, middle, and end, with a logical flow and progression of ideas.

The outline should be optimized for a video of {{duration}} seconds."#;

pub const OUTLINE_EXPECTED: &str = r#"A comprehensive script outline with a hierarchical structure.
The top level should list the major scenes or sections, with nested bullet points providing more granular details about the content and purpose of each part. The outline should read like a condensed version of the full script."#;

pub const FIRST_DRAFT_TASK: &str = r#"Write the first draft of the script based on the brief, the outline, the research findings, and the given script direction. Take inspiration from the following writers: {{{writers}}}.

Craft a compelling monologue to be read by a single voice actor, with rich descriptions, and emotive language to bring the story, characters and narrative to life. Focus on getting the complete narrative down without worrying too much about perfection at this stage.

The script should have clear scenes that make sense in a visual format. It should be a narrative that can be visualized.

The script should be optimized for a video of {{duration}} seconds."#;

pub const FIRST_DRAFT_EXPECTED: &str = r#"A completed first draft of the script in standard screenplay or narrative format, depending on the project type. The draft should cover the full story arc from beginning to end, divided into scenes or chapters as appropriate. Words, scenes, and descriptions should be included throughout."#;

pub const FACT_CHECK_TASK: &str = r#"Carefully review the first draft of the script and the research findings to ensure all factual information is accurate and properly sourced. Double check names, dates, locations, scientific or historical details, and any other factual claims against the research and additional authoritative sources as needed. Make note of any inaccuracies and suggest corrections."#;

pub const FACT_CHECK_EXPECTED: &str = r#"A fact-check report listing any inaccuracies found in the draft script, along with the correct information and sources. The report should clearly reference the relevant page/line numbers in the script. If no inaccuracies are found, the report should indicate that the script passed the fact-check."#;

pub const VIRALIZE_TASK: &str = r#"Enhance the first draft of the script to make it more relatable and engaging for modern audiences:

1. Identify the most compelling, emotionally resonant elements of the script that will capture viewer attention and interest. Highlight these key moments and themes.

2. Restructure the script to have a circular narrative that connects the end back to the beginning in a clever and satisfying way. This could involve setting up a question or mystery at the start that gets answered or resolved at the end, creating a sense of closure and completeness. Or, you could use bookending scenes, recurring motifs, or callbacks to earlier moments to tie the whole story together.

3. Craft a compelling, attention-grabbing hook that will draw viewers in and make them want to watch more. This could be a surprising fact, a thought-provoking question, a bold statement, or an intriguing teaser of what's to come. The hook should be short, punchy, and memorable.

4. Adjust the language to be more conversational and natural, as if speaking directly to the viewer. Use contractions, simplify complex phrasing, and aim for a warm, relatable tone. The script should sound like it's coming from a friendly, knowledgeable narrator.

5. Where appropriate, try to evoke strong visuals and tap into the viewer's imagination. Use descriptive language and metaphors to paint a picture in the audience's mind and help them feel more immersed in the story.

6. Add a call to action where appropriate, according to the tone of the script. Suggested call to action: {{{cta}}}"#;

pub const VIRALIZE_EXPECTED: &str = r#"A viral-optimized version of the script with the following:

1. A short, punchy, irresistible hook at the beginning that immediately grabs the viewer's attention and entices them to continue watching by promising something intriguing.

2. A new narrative structure that circles back on itself, with the ending connecting to the beginning in a meaningful way that creates a sense of completeness and closure. Clearly show how the script has been restructured to achieve this circular effect.

3. Key moments and themes likely to resonate with modern viewers clearly identified and woven throughout the script. These should be elements that will evoke emotion, pique curiosity, or get people talking.

4. Strategically placed references to relevant cultural trends or experiences that will help today's audiences connect with the content. These should not detract from the core story.

5. Language that is accessible, engaging, and sounds natural, like a friendly expert having a direct conversation with the viewer. The tone should be warm and down-to-earth.

6. Vivid visuals evoked through expressive, imaginative language that transports the viewer and makes the story come alive in their mind. Show descriptive details and metaphors used to enhance the story's impact.

The revised script should open with a strong hook, take the viewer on a cohesive journey that circles back to the start, resonate with the target audience, paint an immersive picture, and maintain the integrity of the original idea."#;

pub const FINAL_DRAFT_TASK: &str = r#"Revise the given viral draft into a better script, by incorporating the fact-check corrections as appropriate and circling back to the brief. Tighten up the pacing, clarify any confusing points, and look for opportunities to heighten the emotional impact. Ensure the script feels polished and ready for final review."#;

pub const FINAL_DRAFT_EXPECTED: &str = r#"A completed second draft of the script, fully revised and refined based on the previous rounds of review and ideation. The draft should be properly formatted, free of errors and typos, and ready for executive review and feedback."#;

pub const CRITIQUE_TASK: &str = r#"Provide a thorough and constructive critique of the final draft for the script from the perspective of a professional critic. Focus on identifying areas for improvement and offering specific, actionable suggestions to help the writer refine their work.

1. Analyze the structure and pacing of the script. Does it have a clear beginning, middle, and end? Is the narrative arc compelling and well-developed? Does the pacing keep the viewer engaged or are there points where it lags?

2. Evaluate the characterization and dialogue. Are the characters believable and fully realized? Do they have distinct voices and motivations? Does the dialogue sound natural and authentic or is it stilted and expository?

3. Assess the themes and messaging. Is there a clear central theme or message? Is it effectively explored and conveyed throughout the script? Does it resonate on an emotional or intellectual level?

4. Consider the originality and creativity of the concept. Is the idea fresh and innovative or does it feel derivative? Does the script bring a unique perspective or voice to the subject matter?

5. Examine the visual storytelling and atmosphere. Does the script create a strong sense of tone, mood, and ambiance? Are the visuals richly described and evocative? Is there a cohesive aesthetic vision?

6. Identify any logical inconsistencies, plot holes, or unanswered questions. Does the story hold together under scrutiny? Are there any dangling threads or unresolved issues that need to be addressed?

For each point of critique, provide specific examples from the script to illustrate your observations. Offer concrete suggestions for how the writer could address these issues and elevate the overall quality of the draft. Maintain a constructive tone focused on improvement rather than simply pointing out flaws."#;

pub const CRITIQUE_EXPECTED: &str = r#"A detailed critique of the draft script that covers the following key areas:

1. Structure and Pacing:
- Analysis of the narrative arc and plot development
- Evaluation of pacing and viewer engagement
- Specific suggestions for improving story structure

2. Characterization and Dialogue:
- Assessment of character development and believability
- Review of dialogue authenticity and distinctive voices
- Recommendations for refining characters and conversations

3. Themes and Messaging:
- Identification of central themes and messages
- Evaluation of how effectively themes are conveyed
- Suggestions for clarifying or deepening thematic resonance

4. Originality and Creativity:
- Assessment of the uniqueness and freshness of the concept
- Identification of any derivative or cliched elements
- Suggestions for pushing the boundaries of the idea further

5. Visual Storytelling and Atmosphere:
- Evaluation of the script's descriptive language and imagery
- Analysis of tone, mood, and overall aesthetic cohesion
- Recommendations for enhancing the visual richness and impact

6. Logical Consistency and Completeness:
- Identification of any plot holes, inconsistencies, or gaps
- Scrutiny of the story's internal logic and coherence
- Suggestions for resolving unanswered questions or loose ends

The critique should cite specific examples from the script to support each point, and offer actionable suggestions for improvement. The overall tone should be constructive and geared towards helping the writer elevate the quality of their work."#;

pub const FINAL_SCRIPT_TASK: &str = r#"Review the final draft of the script to ensure it is ready for the intended use case (production, publishing, etc.), while keeping in mind the critique and feedback.

1. First and foremost, assess the overall narrative cohesion and creative tone of the script. Does the story flow logically and engagingly from beginning to end? Is the unique voice and style of the piece consistently maintained throughout? These are the most critical elements to get right.

2. Consider the key points from the critic's review, especially those related to structure, characterization, theme, and visual storytelling. Evaluate whether the script has sufficiently addressed any major concerns in these areas, while still preserving the core creative vision.

3. Remain open to the critic's suggestions for improvement, but don't feel obligated to incorporate every piece of feedback. Some notes may be subjective or not fully aligned with the script's intentions. Trust your instincts and make changes only where you feel they genuinely enhance the work.

4. Once you're satisfied with the content, do a final technical review. Double check formatting, page length, spelling, and grammar. Make any necessary adjustments to ensure the script is polished and professional.

5. Package the script with any relevant supplementary materials such as author notes, character breakdowns, or research references. Ensure these materials are clearly organized and enhance the reader's understanding of the script.

The goal is to arrive at a final draft that is narratively cohesive, creatively powerful, and technically impeccable. The critic's feedback should inform but not dictate the ultimate shape of the work. Prioritize changes that elevate the script's core strengths and unique voice."#;

pub const FINAL_SCRIPT_EXPECTED: &str = r#"The packaged, 100% finalized script, including:

1. The completed script file in the appropriate format for the use case, reflecting any final content or technical edits based on a careful consideration of the critic's feedback.

2. A short memo that includes:
- Confirmation that the script is locked and ready for the next stage of the process.
- A brief summary of any significant changes made in response to the critic's feedback, and the rationale behind those changes.
- Acknowledgement of any feedback that was considered but ultimately not incorporated, and the reasons for those decisions.
- A final assessment of how the script achieves its goals in terms of narrative cohesion, creative tone, and overall impact.

3. Any relevant supplementary materials, such as:
- Author notes or a creator statement
- Character breakdowns or profiles
- Research references or source materials
- A brief synopsis or logline

These materials should be clearly organized and labeled in a way that enhances the reader's engagement with and understanding of the script. The entire package should represent a polished, professional, and compelling final product."#;

/// Get the embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "worker-system" => Some(WORKER_SYSTEM),
        "task-prompt" => Some(TASK_PROMPT),
        "manager-order" => Some(MANAGER_ORDER),
        "studio-direction" => Some(DIRECTION_TASK),
        "studio-direction-expected" => Some(DIRECTION_EXPECTED),
        "studio-research" => Some(RESEARCH_TASK),
        "studio-research-expected" => Some(RESEARCH_EXPECTED),
        "studio-outline" => Some(OUTLINE_TASK),
        "studio-outline-expected" => Some(OUTLINE_EXPECTED),
        "studio-first-draft" => Some(FIRST_DRAFT_TASK),
        "studio-first-draft-expected" => Some(FIRST_DRAFT_EXPECTED),
        "studio-fact-check" => Some(FACT_CHECK_TASK),
        "studio-fact-check-expected" => Some(FACT_CHECK_EXPECTED),
        "studio-viralize" => Some(VIRALIZE_TASK),
        "studio-viralize-expected" => Some(VIRALIZE_EXPECTED),
        "studio-final-draft" => Some(FINAL_DRAFT_TASK),
        "studio-final-draft-expected" => Some(FINAL_DRAFT_EXPECTED),
        "studio-critique" => Some(CRITIQUE_TASK),
        "studio-critique-expected" => Some(CRITIQUE_EXPECTED),
        "studio-final-script" => Some(FINAL_SCRIPT_TASK),
        "studio-final-script-expected" => Some(FINAL_SCRIPT_EXPECTED),
        _ => None,
    }
}
