//! Post generation state

use eframe::egui;
use tokio::task::JoinHandle;

use crate::config::GeneratorConfig;
use crate::generate::{self, Generator};
use crate::roulette::Roulette;
use crate::state::StateEvent;
use crate::task::{PollResult, poll_task};

/// Generation-related state
#[derive(Default)]
pub struct GenerationState {
    /// Background generation task; always yields a post (or the fallback)
    task: Option<JoinHandle<String>>,
}

impl GenerationState {
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start generating a post for the current selection
    pub fn start(&mut self, roulette: &mut Roulette, config: &GeneratorConfig) -> Option<StateEvent> {
        if self.task.is_some() || !roulette.can_generate() {
            return None;
        }

        let generator = match Generator::for_mode(roulette.variant().generation(), config) {
            Ok(generator) => generator,
            Err(e) => {
                tracing::error!("Failed to create generator: {}", e);
                roulette.begin_generation()?;
                roulette.fail_generation();
                return Some(StateEvent::StatusMessage(format!("Error: {}", e)));
            }
        };

        self.start_with(roulette, generator)
    }

    /// Start generating with an already-built generator
    pub fn start_with(&mut self, roulette: &mut Roulette, generator: Generator) -> Option<StateEvent> {
        if self.task.is_some() {
            return None;
        }
        let prompt = roulette.begin_generation()?;
        tracing::info!("Generating post for {}", roulette.selection());

        self.task = Some(tokio::spawn(async move {
            generate::generate_post(&generator, &prompt).await
        }));

        Some(StateEvent::StatusMessage("生成中...".to_string()))
    }

    /// Poll the generation task for completion
    pub fn poll(&mut self, ctx: &egui::Context, roulette: &mut Roulette) -> Vec<StateEvent> {
        let mut events = Vec::new();

        match poll_task(&mut self.task) {
            PollResult::Complete(Ok(post)) => {
                let failed = post == generate::FALLBACK_POST;
                roulette.finish_generation(post);
                if failed {
                    events.push(StateEvent::StatusMessage("Generation failed".to_string()));
                } else {
                    events.push(StateEvent::StatusMessage("Post ready".to_string()));
                }
            }
            PollResult::Complete(Err(e)) => {
                roulette.fail_generation();
                events.push(StateEvent::LogError(format!("Generation task panicked: {}", e)));
                events.push(StateEvent::StatusMessage("Generation failed".to_string()));
            }
            PollResult::Pending => ctx.request_repaint(),
            PollResult::NoTask => {}
        }

        events
    }
}
