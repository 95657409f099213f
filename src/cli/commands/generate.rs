//! Post generation command

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::cli::commands::spin::spin_roulette;
use crate::cli::output::{OutputFormat, print_error, print_formatted, print_success, should_show_progress};
use crate::config::Config;
use crate::generate::{FALLBACK_POST, Generator};
use crate::roulette::Roulette;
use crate::selection::{Selection, SlotPick};
use crate::share;
use crate::spin::SpinOptions;
use crate::variant::Variant;

#[derive(Serialize)]
struct GenerateResult<'a> {
    variant: Variant,
    selection: &'a Selection,
    post: &'a str,
    failed: bool,
    share_url: Option<String>,
    generated_at: DateTime<Local>,
}

/// Build a selection from item names given in slot order
pub fn selection_from_names(variant: Variant, names: &[String]) -> Result<Selection> {
    let slots = variant.slots();
    if names.len() != slots.len() {
        bail!(
            "{} takes {} item(s) ({}), got {}",
            variant,
            slots.len(),
            slots.iter().map(|s| s.label()).collect::<Vec<_>>().join(", "),
            names.len()
        );
    }

    let picks = slots
        .iter()
        .zip(names)
        .map(|(&kind, name)| {
            kind.find(name)
                .map(|item| SlotPick { kind, item })
                .ok_or_else(|| anyhow!("Unknown {}: {}", kind.label(), name))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Selection::from_picks(picks))
}

pub async fn run(
    variant: Option<Variant>,
    items: &[String],
    share_after: bool,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let config = Config::load()?;
    let variant = variant.unwrap_or(config.ui.variant);
    let mut roulette = Roulette::new(variant);

    if items.is_empty() {
        let options = SpinOptions {
            legacy_double_roll: config.spin.legacy_double_roll,
        };
        spin_roulette(&mut roulette, options, should_show_progress(quiet, format)).await?;
    } else if !roulette.set_selection(selection_from_names(variant, items)?) {
        bail!("Selection does not fit {}", variant);
    }

    if format == OutputFormat::Text {
        print_success(&format!("Generating a post for {}...", roulette.selection().names_line()), quiet);
    }

    let generator = Generator::for_mode(variant.generation(), &config.generator)?;
    roulette.generate(&generator).await;

    let failed = roulette.post() == FALLBACK_POST;
    let share_url = if share_after && !failed {
        share::share(roulette.post())?
    } else {
        None
    };

    let result = GenerateResult {
        variant,
        selection: roulette.selection(),
        post: roulette.post(),
        failed,
        share_url,
        generated_at: Local::now(),
    };
    print_formatted(&result, format, |r| r.post.to_string());

    if failed {
        print_error("Generation failed; run with --verbose for details");
    }

    Ok(())
}
