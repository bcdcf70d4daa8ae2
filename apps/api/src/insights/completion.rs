//! Schema-constrained completion: one request, result checked before it reaches a panel.
//!
//! Success returns the service result unmodified. Transport failure, an empty
//! response, and a response that does not match the requested shape all come
//! back as `Degraded`. Callers treat every `Degraded` the same way; the reason
//! is kept for logs only.

use thiserror::Error;

use crate::llm_client::schema::SchemaViolation;
use crate::llm_client::{CompletionService, InsightRequest, InsightResult, LlmError};

#[derive(Debug, Error)]
pub enum Degraded {
    #[error("completion service failed: {0}")]
    Service(#[from] LlmError),

    #[error("response does not match the requested shape: {0}")]
    NonConforming(#[from] SchemaViolation),

    #[error("completion service returned an empty response")]
    Empty,
}

pub async fn request_insight(
    service: &dyn CompletionService,
    request: &InsightRequest,
) -> Result<InsightResult, Degraded> {
    let result = service.complete(request).await?;

    if result.is_empty() {
        return Err(Degraded::Empty);
    }

    match (&request.response_json_schema, &result) {
        (Some(schema), InsightResult::Structured(value)) => schema.validate(value)?,
        (Some(_), InsightResult::Text(_)) => {
            return Err(SchemaViolation::NotAnObject {
                path: "$".to_string(),
            }
            .into())
        }
        (None, InsightResult::Structured(_)) => {
            return Err(SchemaViolation::UnexpectedStructure.into())
        }
        (None, InsightResult::Text(_)) => {}
    }

    Ok(result)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Stub completion services shared by tests across modules.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::Semaphore;

    use crate::llm_client::{CompletionService, InsightRequest, InsightResult, LlmError};

    /// Always answers with the same result and counts calls.
    pub struct FixedCompletion {
        result: InsightResult,
        pub calls: AtomicUsize,
    }

    impl FixedCompletion {
        pub fn text(text: &str) -> Self {
            Self::result(InsightResult::Text(text.to_string()))
        }

        pub fn result(result: InsightResult) -> Self {
            Self {
                result,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionService for FixedCompletion {
        async fn complete(&self, _request: &InsightRequest) -> Result<InsightResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.result.clone())
        }
    }

    /// Always fails as if the transport had broken.
    pub struct FailingCompletion;

    #[async_trait]
    impl CompletionService for FailingCompletion {
        async fn complete(&self, _request: &InsightRequest) -> Result<InsightResult, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }
    }

    /// Holds each request until its gate is opened. Requests are matched to a
    /// gate by looking for the gate's key in the prompt; the answer is
    /// `"<key> analysis"`.
    #[derive(Default)]
    pub struct GatedCompletion {
        gates: Mutex<HashMap<String, Arc<Semaphore>>>,
        pub calls: AtomicUsize,
    }

    impl GatedCompletion {
        pub fn with_gates(keys: &[&str]) -> Self {
            let gates = keys
                .iter()
                .map(|key| (key.to_string(), Arc::new(Semaphore::new(0))))
                .collect();
            Self {
                gates: Mutex::new(gates),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn open(&self, key: &str) {
            if let Some(gate) = self.gates.lock().unwrap().get(key) {
                gate.add_permits(1024);
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionService for GatedCompletion {
        async fn complete(&self, request: &InsightRequest) -> Result<InsightResult, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = {
                let gates = self.gates.lock().unwrap();
                gates
                    .iter()
                    .find(|(key, _)| request.prompt.contains(key.as_str()))
                    .map(|(key, gate)| (key.clone(), gate.clone()))
            };

            let Some((key, gate)) = gate else {
                return Err(LlmError::EmptyContent);
            };

            let permit = gate.acquire().await.map_err(|_| LlmError::EmptyContent)?;
            permit.forget();
            Ok(InsightResult::Text(format!("{key} analysis")))
        }
    }
}
