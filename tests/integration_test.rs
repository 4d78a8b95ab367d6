//! Integration tests for the Saga studio pipeline
//!
//! These tests run the full nine-task pipeline over a scripted backend.

use std::sync::Arc;

use saga::config::Config;
use saga::error::Error;
use saga::llm::GenerationError;
use saga::llm::client::mock::MockBackend;
use saga::pipeline::{Coordinator, Policy};
use saga::prompts::PromptLoader;
use saga::studio;
use tempfile::TempDir;

const TASK_NAMES: [&str; 9] = [
    "script-direction",
    "research-findings",
    "outline",
    "first-draft",
    "fact-check",
    "viral-draft",
    "final-draft",
    "script-critique",
    "final-script",
];

fn studio_config(output_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.studio.output_dir = output_dir.path().join("scripts");
    config
}

fn scripted_outputs() -> Vec<&'static str> {
    vec![
        "direction draft", "research notes", "outline draft",
        "first draft text", "fact check notes", "viral rewrite",
        "final draft text", "critique notes", "the finished script",
    ]
}

#[tokio::test]
async fn test_sequential_full_pipeline() {
    let tmp = TempDir::new().unwrap();
    let config = studio_config(&tmp);
    let loader = PromptLoader::embedded_only();

    let graph = studio::pipeline(&config, &loader).unwrap();
    let backend = Arc::new(MockBackend::new(scripted_outputs()));

    let coordinator = Coordinator::new(
        studio::roster(&config),
        Policy::Sequential,
        backend.clone(),
        config.llm.clone(),
    );

    let result = coordinator.run(&graph, "the Voynich manuscript").await.unwrap();

    // One output per task, in declared order
    let names: Vec<&str> = result.outputs().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, TASK_NAMES);
    assert_eq!(result.final_output(), "the finished script");
    assert_eq!(backend.call_count(), 9);

    // Upstream outputs flow verbatim into downstream prompts
    let requests = backend.requests();
    let critique_prompt = &requests[7].prompt;
    assert!(critique_prompt.contains("final draft text"));
    assert!(critique_prompt.contains("the Voynich manuscript"));
}

#[tokio::test]
async fn test_sequential_writes_script_artifact() {
    let tmp = TempDir::new().unwrap();
    let config = studio_config(&tmp);
    let loader = PromptLoader::embedded_only();

    let graph = studio::pipeline(&config, &loader).unwrap();
    let backend = Arc::new(MockBackend::new(scripted_outputs()));

    let coordinator = Coordinator::new(
        studio::roster(&config),
        Policy::Sequential,
        backend,
        config.llm.clone(),
    );

    coordinator.run(&graph, "lost Roman concrete").await.unwrap();

    let scripts_dir = tmp.path().join("scripts");
    let entries: Vec<_> = std::fs::read_dir(&scripts_dir).unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(entries.len(), 1);

    let content = std::fs::read_to_string(entries[0].path()).unwrap();
    assert_eq!(content, "the finished script");
}

#[tokio::test]
async fn test_hierarchical_manager_orders_then_runs() {
    let tmp = TempDir::new().unwrap();
    let config = studio_config(&tmp);
    let loader = PromptLoader::embedded_only();

    let graph = studio::pipeline(&config, &loader).unwrap();

    // First call is the manager's ordering proposal
    let mut outputs = vec![TASK_NAMES.join(", ")];
    outputs.extend(scripted_outputs().iter().map(|s| s.to_string()));
    let backend = Arc::new(MockBackend::with_outcomes(outputs.into_iter().map(Ok).collect()));

    let coordinator = Coordinator::new(
        studio::roster(&config),
        Policy::Hierarchical,
        backend.clone(),
        config.llm.clone(),
    );

    let result = coordinator.run(&graph, "deep sea gigantism").await.unwrap();

    assert_eq!(result.final_output(), "the finished script");
    assert_eq!(backend.call_count(), 10);

    // The ordering call uses the manager model
    let requests = backend.requests();
    assert_eq!(requests[0].model, config.llm.manager_model);
    assert!(requests[0].prompt.contains("script-direction"));
}

#[tokio::test]
async fn test_hierarchical_decline_reassigns_once() {
    let tmp = TempDir::new().unwrap();
    let config = studio_config(&tmp);
    let loader = PromptLoader::embedded_only();

    let graph = studio::pipeline(&config, &loader).unwrap();

    // The staff writer declines the first draft; the senior writer picks it up.
    let outputs: Vec<Result<String, GenerationError>> = vec![
        Ok(TASK_NAMES.join(", ")),
        Ok("direction draft".into()),
        Ok("research notes".into()),
        Ok("outline draft".into()),
        Ok("DELEGATE: this needs a more experienced hand".into()),
        Ok("reassigned first draft".into()),
        Ok("fact check notes".into()),
        Ok("viral rewrite".into()),
        Ok("final draft text".into()),
        Ok("critique notes".into()),
        Ok("the finished script".into()),
    ];
    let backend = Arc::new(MockBackend::with_outcomes(outputs));

    let coordinator = Coordinator::new(
        studio::roster(&config),
        Policy::Hierarchical,
        backend.clone(),
        config.llm.clone(),
    );

    let result = coordinator.run(&graph, "the Antikythera mechanism").await.unwrap();

    assert_eq!(result.get("first-draft"), Some("reassigned first draft"));
    assert_eq!(result.final_output(), "the finished script");
    assert_eq!(backend.call_count(), 11);

    // The retake goes to the senior writer and the reassigned output feeds downstream
    let requests = backend.requests();
    assert!(requests[5].system_prompt.contains("Senior Writer"));
    assert!(requests[6].prompt.contains("reassigned first draft"));
}

#[tokio::test]
async fn test_permanent_failure_aborts_run() {
    let tmp = TempDir::new().unwrap();
    let config = studio_config(&tmp);
    let loader = PromptLoader::embedded_only();

    let graph = studio::pipeline(&config, &loader).unwrap();

    let outputs: Vec<Result<String, GenerationError>> = vec![
        Ok("direction draft".into()),
        Ok("research notes".into()),
        Err(GenerationError::ApiError {
            status: 400,
            message: "invalid request".into(),
        }),
    ];
    let backend = Arc::new(MockBackend::with_outcomes(outputs));

    let coordinator = Coordinator::new(
        studio::roster(&config),
        Policy::Sequential,
        backend.clone(),
        config.llm.clone(),
    );

    let err = coordinator.run(&graph, "a doomed concept").await.unwrap_err();
    assert!(matches!(&err, Error::TaskExecution { task, .. } if task == "outline"));

    // Downstream tasks never execute
    assert_eq!(backend.call_count(), 3);

    // No artifact was written
    assert!(!tmp.path().join("scripts").exists());
}

#[tokio::test]
async fn test_transient_failures_retry_within_limit() {
    let tmp = TempDir::new().unwrap();
    let config = studio_config(&tmp);
    let loader = PromptLoader::embedded_only();

    let graph = studio::pipeline(&config, &loader).unwrap();

    let mut outputs: Vec<Result<String, GenerationError>> = vec![
        Err(GenerationError::ApiError {
            status: 529,
            message: "overloaded".into(),
        }),
        Err(GenerationError::ApiError {
            status: 503,
            message: "unavailable".into(),
        }),
    ];
    outputs.extend(scripted_outputs().into_iter().map(|s| Ok(s.to_string())));
    let backend = Arc::new(MockBackend::with_outcomes(outputs));

    let coordinator = Coordinator::new(
        studio::roster(&config),
        Policy::Sequential,
        backend.clone(),
        config.llm.clone(),
    );

    // Two transient failures stay within the default limit of three attempts
    let result = coordinator.run(&graph, "the Tunguska event").await.unwrap();
    assert_eq!(result.final_output(), "the finished script");
    assert_eq!(backend.call_count(), 11);
}

#[tokio::test]
async fn test_memory_carries_earlier_work_forward() {
    let tmp = TempDir::new().unwrap();
    let config = studio_config(&tmp);
    let loader = PromptLoader::embedded_only();

    let graph = studio::pipeline(&config, &loader).unwrap();
    let backend = Arc::new(MockBackend::new(scripted_outputs()));

    let coordinator = Coordinator::new(
        studio::roster(&config),
        Policy::Sequential,
        backend.clone(),
        config.llm.clone(),
    );

    coordinator.run(&graph, "the library of Alexandria").await.unwrap();

    // The researcher's fact-check prompt carries its own earlier research
    let requests = backend.requests();
    let fact_check_prompt = &requests[4].prompt;
    assert!(fact_check_prompt.contains("Your earlier work this run"));
    assert!(fact_check_prompt.contains("research notes"));
}
