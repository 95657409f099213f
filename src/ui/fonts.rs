//! Japanese font loading.
//!
//! egui's bundled fonts have no CJK glyphs, so a system font is added as a
//! fallback for both font families when one can be found.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

/// Environment variable pointing at a font file to use instead
pub const FONT_ENV: &str = "RECIPE_ROULETTE_FONT";

const CANDIDATES: &[&str] = &[
    // Linux
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/ipafont-gothic/ipag.ttf",
    "/usr/share/fonts/truetype/takao-gothic/TakaoGothic.ttf",
    // macOS
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    // Windows
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
];

/// First path in `paths` that exists on disk
fn first_existing<I, P>(paths: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths.into_iter().map(|p| p.as_ref().to_path_buf()).find(|p| p.is_file())
}

/// Locate a font with Japanese glyphs
pub fn find_cjk_font() -> Option<PathBuf> {
    let from_env = std::env::var_os(FONT_ENV).map(PathBuf::from);
    first_existing(from_env.into_iter().chain(CANDIDATES.iter().map(PathBuf::from)))
}

/// Install a CJK fallback font into the context, if one is available
pub fn install_cjk_font(ctx: &egui::Context) {
    let Some(path) = find_cjk_font() else {
        tracing::warn!("No Japanese font found; set {} to a .ttf/.ttc file", FONT_ENV);
        return;
    };

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to read font {:?}: {}", path, e);
            return;
        }
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);

    tracing::info!("Loaded Japanese font from {:?}", path);
}
