//! UI modules
//!
//! Rendering code for the eframe window, organized by tab.

pub mod components;
pub mod fonts;
mod roulette_tab;
mod settings_tab;
pub mod theme;

pub use roulette_tab::render_roulette_tab;
pub use settings_tab::render_settings_tab;
