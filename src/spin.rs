//! Roulette spin animation.
//!
//! A spin redraws every slot once per tick for a fixed number of ticks and
//! publishes each intermediate selection on a `watch` channel. The last frame
//! has `finished` set and carries the landing selection.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::watch;

use crate::catalog::SlotKind;
use crate::selection::Selection;
use crate::variant::{LEGACY_REROLL_DELAY, TICK_INTERVAL, Variant};

/// One published spin state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinFrame {
    pub selection: Selection,
    /// Ticks elapsed so far
    pub tick: u32,
    /// Total ticks for this spin
    pub total: u32,
    pub finished: bool,
}

impl SpinFrame {
    /// Frame published before the first tick
    pub fn start(selection: Selection, total: u32) -> Self {
        Self { selection, tick: 0, total, finished: false }
    }

    /// Fraction of the spin completed (0.0 - 1.0)
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.tick.min(self.total) as f32 / self.total as f32
        }
    }
}

/// Spin options that do not come from the variant
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinOptions {
    /// Also re-roll every slot once, 1s after the spin starts
    pub legacy_double_roll: bool,
}

/// Run a spin for `variant`, publishing frames on `tx`.
///
/// Returns the landing selection. The final frame is only sent once every
/// pending update (including the legacy re-roll) has been applied.
pub async fn run<R: Rng>(
    variant: Variant,
    rng: &mut R,
    options: SpinOptions,
    tx: watch::Sender<SpinFrame>,
) -> Selection {
    let slots = variant.slots();
    let total = variant.tick_count();

    tracing::debug!("Spinning {} for {} ticks", variant, total);

    if options.legacy_double_roll {
        let mut reroll_rng = StdRng::seed_from_u64(rng.random());
        tokio::join!(
            tick_loop(slots, total, rng, &tx),
            legacy_reroll(slots, &mut reroll_rng, &tx),
        );
    } else {
        tick_loop(slots, total, rng, &tx).await;
    }

    let landing = tx.borrow().selection.clone();
    tx.send_modify(|frame| {
        frame.tick = total;
        frame.finished = true;
    });

    tracing::debug!("Spin landed on {}", landing);
    landing
}

async fn tick_loop<R: Rng>(
    slots: &[SlotKind],
    total: u32,
    rng: &mut R,
    tx: &watch::Sender<SpinFrame>,
) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    // First tick of a tokio interval completes immediately
    interval.tick().await;

    for tick in 1..=total {
        interval.tick().await;
        let selection = Selection::random(slots, rng);
        tx.send_modify(|frame| {
            frame.selection = selection;
            frame.tick = tick;
        });
    }
}

async fn legacy_reroll<R: Rng>(slots: &[SlotKind], rng: &mut R, tx: &watch::Sender<SpinFrame>) {
    tokio::time::sleep(LEGACY_REROLL_DELAY).await;
    let selection = Selection::random(slots, rng);
    tracing::trace!("Legacy re-roll: {}", selection);
    tx.send_modify(|frame| frame.selection = selection);
}
