#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_shop_backend::services::completion::{
    CompletionError, CompletionMessage, CompletionService,
};
use ai_shop_backend::state::{AppState, SharedState};
use async_trait::async_trait;

struct Scripted {
    delay: Option<Duration>,
    result: Result<String, u16>,
}

/// Replays canned completions in order and records every request.
/// Once the script runs out, every call fails.
#[derive(Default)]
pub struct StubCompletion {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<Vec<CompletionMessage>>>,
}

impl StubCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(None, Ok(text.to_string()))
    }

    pub fn delayed_reply(self, delay: Duration, text: &str) -> Self {
        self.push(Some(delay), Ok(text.to_string()))
    }

    pub fn failure(self) -> Self {
        self.push(None, Err(503))
    }

    fn push(self, delay: Option<Duration>, result: Result<String, u16>) -> Self {
        self.script.lock().unwrap().push_back(Scripted { delay, result });
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<CompletionMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, messages: &[CompletionMessage]) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let next = self.script.lock().unwrap().pop_front();

        let Some(step) = next else {
            return Err(CompletionError::MissingContent);
        };
        if let Some(delay) = step.delay {
            tokio::time::sleep(delay).await;
        }
        step.result.map_err(|status| CompletionError::Status {
            status,
            body: "unavailable".to_string(),
        })
    }
}

pub fn state_with(stub: &Arc<StubCompletion>) -> SharedState {
    Arc::new(AppState::new(Duration::from_secs(60), stub.clone()))
}

pub const RECS_JSON: &str = r#"[{"productId": 4, "reason": "Fresh coffee after a run"}, {"productId": 3, "reason": "Matches your workout plans"}]"#;
