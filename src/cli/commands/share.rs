//! Share command

use anyhow::{Result, bail};
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted};
use crate::share;

#[derive(Serialize)]
struct ShareResult {
    url: String,
    opened: bool,
}

pub fn run(text: &str, print_only: bool, format: OutputFormat) -> Result<()> {
    let url = if print_only {
        share::compose_url(text)
    } else {
        share::share(text)?
    };
    let Some(url) = url else {
        bail!("Nothing to share: the post is empty");
    };

    let result = ShareResult { url, opened: !print_only };
    print_formatted(&result, format, |r| r.url.clone());

    Ok(())
}
