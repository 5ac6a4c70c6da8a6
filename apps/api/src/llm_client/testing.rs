//! Scripted `ChatModel` for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{ChatMessage, ChatModel, LlmError};

enum Script {
    Reply(String),
    Fail,
    Hang,
}

pub(crate) struct ScriptedModel {
    script: Script,
    calls: Mutex<Vec<(Vec<ChatMessage>, f32)>>,
}

impl ScriptedModel {
    pub(crate) fn replying(text: &str) -> Self {
        Self::with(Script::Reply(text.to_string()))
    }

    pub(crate) fn failing() -> Self {
        Self::with(Script::Fail)
    }

    /// Never answers within any sane timeout.
    pub(crate) fn hanging() -> Self {
        Self::with(Script::Hang)
    }

    fn with(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn last_call(&self) -> (Vec<ChatMessage>, f32) {
        self.calls.lock().unwrap().last().cloned().expect("model was never called")
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), temperature));

        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail => Err(LlmError::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            }),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(LlmError::EmptyContent)
            }
        }
    }
}
