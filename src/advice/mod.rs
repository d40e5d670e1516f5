pub mod gemini;
pub mod ollama;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::provider::Provider;

pub use gemini::GeminiBackend;
pub use ollama::OllamaBackend;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("no API key configured for {0}")]
    MissingApiKey(&'static str),

    #[error("backend returned an empty reply")]
    EmptyResponse,
}

/// A text-generation service that turns a prompt into free text.
///
/// Implementors own transport and wire format. They report every failure as
/// an [`AdviceError`]; turning failures into something displayable is the
/// job of [`AdviceClient`].
#[async_trait]
pub trait AdviceBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, AdviceError>;
}

/// Build the backend selected by `provider`, using credentials from `config`
pub fn backend_for(provider: Provider, model: &str, config: &Config) -> Arc<dyn AdviceBackend> {
    match provider {
        Provider::Gemini => {
            let backend = GeminiBackend::new(config.gemini_api_key(), model);
            match config.gemini_base_url.as_deref() {
                Some(url) => Arc::new(backend.with_base_url(url)),
                None => Arc::new(backend),
            }
        }
        Provider::Ollama => Arc::new(OllamaBackend::new(config.ollama_url(), model)),
    }
}

/// One-shot advice requests that never fail from the caller's point of view.
#[derive(Clone)]
pub struct AdviceClient {
    backend: Arc<dyn AdviceBackend>,
    system_instruction: Arc<str>,
    fallback: Arc<str>,
}

impl AdviceClient {
    pub fn new(
        backend: Arc<dyn AdviceBackend>,
        system_instruction: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            system_instruction: Arc::from(system_instruction.into()),
            fallback: Arc::from(fallback.into()),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Ask the backend for advice on `query`.
    ///
    /// Any failure, including an empty reply, yields the fallback text.
    pub async fn request_advice(&self, query: &str) -> String {
        info!(backend = self.backend.name(), "requesting advice");

        match self.backend.generate(&self.system_instruction, query).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    backend = self.backend.name(),
                    chars = text.chars().count(),
                    "advice received"
                );
                text
            }
            Ok(_) => {
                warn!(
                    backend = self.backend.name(),
                    error = %AdviceError::EmptyResponse,
                    "advice request failed"
                );
                self.fallback.to_string()
            }
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "advice request failed");
                self.fallback.to_string()
            }
        }
    }

    /// Run [`request_advice`](Self::request_advice) on a background task
    pub fn spawn_request(&self, query: String) -> JoinHandle<String> {
        let client = self.clone();
        tokio::spawn(async move { client.request_advice(&query).await })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedBackend;
    use super::*;

    const FALLBACK: &str = "عذراً، حدث خطأ. يرجى المحاولة مرة أخرى.";

    fn client(backend: Arc<ScriptedBackend>) -> AdviceClient {
        AdviceClient::new(backend, "be helpful", FALLBACK)
    }

    #[tokio::test]
    async fn returns_backend_text_on_success() {
        let backend = Arc::new(ScriptedBackend::replying("دورة الآيلتس تمتد لمدة ٨ أسابيع."));
        let reply = client(backend.clone())
            .request_advice("ما هي مدة دورة الآيلتس؟")
            .await;

        assert_eq!(reply, "دورة الآيلتس تمتد لمدة ٨ أسابيع.");
        let prompts = backend.prompts.lock().unwrap();
        assert_eq!(
            prompts.as_slice(),
            &[("be helpful".to_string(), "ما هي مدة دورة الآيلتس؟".to_string())]
        );
    }

    #[tokio::test]
    async fn backend_error_becomes_fallback() {
        let reply = client(Arc::new(ScriptedBackend::failing()))
            .request_advice("hello")
            .await;
        assert_eq!(reply, FALLBACK);
    }

    #[tokio::test]
    async fn blank_reply_becomes_fallback() {
        let reply = client(Arc::new(ScriptedBackend::replying("  \n")))
            .request_advice("hello")
            .await;
        assert_eq!(reply, FALLBACK);
    }

    #[tokio::test]
    async fn missing_key_becomes_fallback() {
        let backend = Arc::new(ScriptedBackend::new(vec![Err(AdviceError::MissingApiKey(
            "gemini",
        ))]));
        let reply = client(backend).request_advice("hello").await;
        assert_eq!(reply, FALLBACK);
    }

    #[tokio::test]
    async fn spawned_request_resolves_to_reply() {
        let handle = client(Arc::new(ScriptedBackend::replying("ok"))).spawn_request("q".into());
        assert_eq!(handle.await.unwrap(), "ok");
    }
}
