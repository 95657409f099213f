//! UI-related application state

use egui_commonmark::CommonMarkCache;

use crate::ui::theme::Theme;

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Roulette face, generate and share controls
    #[default]
    Roulette,
    /// Theme, default variant, generator settings
    Settings,
}

/// UI-related state
pub struct UiState {
    /// Cache for rendering the generated post as markdown
    pub markdown_cache: CommonMarkCache,
    /// Current theme
    pub current_theme: Theme,
    /// Currently selected tab
    pub active_tab: Tab,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            markdown_cache: CommonMarkCache::default(),
            current_theme: theme,
            active_tab: Tab::default(),
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
        }
    }
}
