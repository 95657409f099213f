//! Spin command

use anyhow::{Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tokio::sync::watch;

use crate::cli::output::{OutputFormat, print_formatted, should_show_progress};
use crate::config::Config;
use crate::roulette::Roulette;
use crate::selection::Selection;
use crate::spin::{self, SpinFrame, SpinOptions};
use crate::variant::Variant;

#[derive(Serialize)]
struct SpinResult<'a> {
    variant: Variant,
    selection: &'a Selection,
}

/// Spin `roulette` to completion, drawing frames on stderr if `show_progress`
pub async fn spin_roulette(
    roulette: &mut Roulette,
    options: SpinOptions,
    show_progress: bool,
) -> Result<Selection> {
    if !roulette.begin_spin() {
        bail!("The roulette is busy");
    }

    let variant = roulette.variant();
    let (tx, mut rx) = watch::channel(SpinFrame::start(
        roulette.selection().clone(),
        variant.tick_count(),
    ));

    let task = tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        spin::run(variant, &mut rng, options, tx).await
    });

    // Pending frames are still delivered after the sender is dropped
    while rx.changed().await.is_ok() {
        let frame = rx.borrow_and_update().clone();
        roulette.apply_frame(&frame);
        if show_progress {
            eprint!("\r{}  [{}/{}]   ", frame.selection.icons_line(), frame.tick, frame.total);
        }
    }
    if show_progress {
        eprintln!();
    }

    let landing = match task.await {
        Ok(landing) => landing,
        Err(e) => {
            roulette.abort_spin();
            bail!("Spin task failed: {}", e);
        }
    };
    if roulette.is_spinning() {
        roulette.abort_spin();
    }

    Ok(landing)
}

pub async fn run(variant: Option<Variant>, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = Config::load()?;
    let variant = variant.unwrap_or(config.ui.variant);
    let options = SpinOptions {
        legacy_double_roll: config.spin.legacy_double_roll,
    };

    let mut roulette = Roulette::new(variant);
    let landing = spin_roulette(&mut roulette, options, should_show_progress(quiet, format)).await?;

    let result = SpinResult { variant, selection: &landing };
    print_formatted(&result, format, |r| {
        format!("{}\n{}", r.selection.icons_line(), r.selection.names_line())
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_spin_roulette_lands_on_valid_selection() {
        let mut roulette = Roulette::new(Variant::Chef);
        let landing = spin_roulette(&mut roulette, SpinOptions::default(), false)
            .await
            .unwrap();

        assert!(!roulette.is_spinning());
        assert!(landing.is_valid());
        assert_eq!(roulette.selection(), &landing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spin_roulette_rejected_while_generating() {
        let mut roulette = Roulette::new(Variant::Daily);
        roulette.begin_generation();

        assert!(spin_roulette(&mut roulette, SpinOptions::default(), false).await.is_err());
        assert!(roulette.is_generating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spin_roulette_with_legacy_reroll() {
        let mut roulette = Roulette::new(Variant::Method);
        let options = SpinOptions { legacy_double_roll: true };
        let landing = spin_roulette(&mut roulette, options, false).await.unwrap();

        assert!(landing.is_valid());
        assert_eq!(roulette.selection(), &landing);
    }
}
