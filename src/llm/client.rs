//! Generation backend trait

use async_trait::async_trait;

use super::{GenerationError, GenerationRequest, GenerationResponse};

/// A blocking text-generation backend
///
/// Implementations own their transport concerns (retries, rate limiting).
/// The orchestration core only sees a request going in and text or a typed
/// error coming out.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError>;
}

/// Scripted backend for tests
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{GenerationBackend, GenerationError, GenerationRequest, GenerationResponse};

    /// A backend that replays scripted outcomes and records every request
    pub struct MockBackend {
        outcomes: Mutex<VecDeque<Result<String, GenerationError>>>,
        requests: Mutex<Vec<GenerationRequest>>,
        calls: Mutex<u32>,
    }

    impl MockBackend {
        /// A backend that returns the given texts in order
        pub fn new(outputs: Vec<&str>) -> Self {
            Self::with_outcomes(outputs.into_iter().map(|s| Ok(s.to_string())).collect())
        }

        /// A backend that replays arbitrary outcomes (including errors) in order
        pub fn with_outcomes(outcomes: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
                calls: Mutex::new(0),
            }
        }

        /// All requests received so far, in order
        pub fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }

        /// Number of generate calls received so far
        pub fn call_count(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
            self.requests.lock().unwrap().push(request);
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            let n = *calls;
            drop(calls);

            match self.outcomes.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(GenerationResponse::from_text(text)),
                Some(Err(e)) => Err(e),
                // Scripted outcomes exhausted: keep producing deterministic text
                None => Ok(GenerationResponse::from_text(format!("mock output {n}"))),
            }
        }
    }

}
