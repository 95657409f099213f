//! Spin animation state

use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::roulette::Roulette;
use crate::selection::Selection;
use crate::spin::{self, SpinFrame, SpinOptions};
use crate::state::StateEvent;
use crate::task::{PollResult, poll_task};

/// Spin-related state
#[derive(Default)]
pub struct SpinState {
    /// Background spin task
    task: Option<JoinHandle<Selection>>,
    /// Frames published by the spin task
    frame_rx: Option<watch::Receiver<SpinFrame>>,
    /// Progress of the running spin (0.0 - 1.0)
    pub progress: f32,
}

impl SpinState {
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start spinning. Returns `None` if the roulette refused (busy).
    pub fn start(&mut self, roulette: &mut Roulette, options: SpinOptions) -> Option<StateEvent> {
        if self.task.is_some() || !roulette.begin_spin() {
            return None;
        }

        let variant = roulette.variant();
        let (tx, rx) = watch::channel(SpinFrame::start(
            roulette.selection().clone(),
            variant.tick_count(),
        ));
        self.frame_rx = Some(rx);
        self.progress = 0.0;

        self.task = Some(tokio::spawn(async move {
            let mut rng = StdRng::from_os_rng();
            spin::run(variant, &mut rng, options, tx).await
        }));

        Some(StateEvent::StatusMessage("スピン中...".to_string()))
    }

    /// Apply new frames and detect completion
    pub fn poll(&mut self, ctx: &egui::Context, roulette: &mut Roulette) -> Vec<StateEvent> {
        let mut events = Vec::new();

        if let Some(rx) = &mut self.frame_rx {
            if rx.has_changed().unwrap_or(false) {
                let frame = rx.borrow_and_update().clone();
                self.progress = frame.fraction();
                roulette.apply_frame(&frame);
            }
        }

        match poll_task(&mut self.task) {
            PollResult::Complete(Ok(landing)) => {
                // The final frame may not have been observed yet
                if let Some(rx) = self.frame_rx.take() {
                    roulette.apply_frame(&rx.borrow());
                }
                roulette.abort_spin();
                self.progress = 1.0;
                events.push(StateEvent::StatusMessage(landing.names_line()));
                events.push(StateEvent::LogInfo(format!("Roulette landed on {}", landing)));
            }
            PollResult::Complete(Err(e)) => {
                self.frame_rx = None;
                roulette.abort_spin();
                events.push(StateEvent::LogError(format!("Spin task panicked: {}", e)));
            }
            PollResult::Pending => ctx.request_repaint(),
            PollResult::NoTask => {}
        }

        events
    }
}
