//! Post generation.
//!
//! Turns a prompt into post text through a [`TextGenerator`]. Every failure
//! is logged and replaced by [`FALLBACK_POST`], so callers always get a
//! string back.

use std::future::Future;

use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::gemini::GeminiClient;
use crate::variant::GenerationMode;

/// Post text shown when generation fails for any reason
pub const FALLBACK_POST: &str = "投稿の生成中にエラーが発生しました。";

/// Anything that can go wrong while generating a post
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response contained no text")]
    EmptyResponse,
}

/// Source of generated text: prompt in, completion out
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GenerateError>> + Send;
}

/// Generator for variants without a remote model: the prompt is the post
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTemplate;

impl TextGenerator for LocalTemplate {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        Ok(prompt.to_string())
    }
}

/// Generator chosen for a variant at runtime
#[derive(Clone)]
pub enum Generator {
    Remote(GeminiClient),
    Local(LocalTemplate),
}

impl Generator {
    /// Pick the generator for a variant's generation mode
    pub fn for_mode(mode: GenerationMode, config: &GeneratorConfig) -> anyhow::Result<Self> {
        match mode {
            GenerationMode::Remote { model } => {
                let model = config.model.as_deref().unwrap_or(model);
                let client = GeminiClient::new(&config.endpoint, model)?
                    .with_api_key(config.api_key(), &config.api_key_env);
                Ok(Generator::Remote(client))
            }
            GenerationMode::Local => Ok(Generator::Local(LocalTemplate)),
        }
    }
}

impl TextGenerator for Generator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        match self {
            Generator::Remote(client) => client.generate(prompt).await,
            Generator::Local(local) => local.generate(prompt).await,
        }
    }
}

/// Generate a post, never failing.
///
/// On success the completion is returned verbatim; on any error the error is
/// logged and [`FALLBACK_POST`] is returned instead.
pub async fn generate_post<G: TextGenerator>(generator: &G, prompt: &str) -> String {
    let start = std::time::Instant::now();
    match generator.generate(prompt).await {
        Ok(text) => {
            tracing::info!(
                "Generated post ({} chars) in {:.1}s",
                text.chars().count(),
                start.elapsed().as_secs_f32()
            );
            text
        }
        Err(e) => {
            tracing::error!("Error generating post: {}", e);
            FALLBACK_POST.to_string()
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test generator returning a canned reply and recording prompts
    pub struct MockGenerator {
        reply: Option<String>,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        pub fn replying(text: &str) -> Self {
            Self { reply: Some(text.to_string()), calls: AtomicUsize::new(0), prompts: Mutex::new(Vec::new()) }
        }

        pub fn failing() -> Self {
            Self { reply: None, calls: AtomicUsize::new(0), prompts: Mutex::new(Vec::new()) }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextGenerator for MockGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(GenerateError::Api {
                    status: 500,
                    message: "mock failure".to_string(),
                }),
            }
        }
    }
}
