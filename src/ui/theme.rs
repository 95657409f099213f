use eframe::egui::{self, Color32, Stroke, Visuals, style::WidgetVisuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Curry,
    Matcha,
    Sakura,
    Nori,
}

impl ThemePreset {
    pub fn all() -> &'static [ThemePreset] {
        &[
            ThemePreset::Curry,
            ThemePreset::Matcha,
            ThemePreset::Sakura,
            ThemePreset::Nori,
        ]
    }

    /// Display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Curry => "Curry",
            ThemePreset::Matcha => "Matcha",
            ThemePreset::Sakura => "Sakura",
            ThemePreset::Nori => "Nori",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Curry => Theme::curry(),
            ThemePreset::Matcha => Theme::matcha(),
            ThemePreset::Sakura => Theme::sakura(),
            ThemePreset::Nori => Theme::nori(),
        }
    }
}

impl std::str::FromStr for ThemePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemePreset::all()
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown theme: {}", s))
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    // Semantic colors
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,

    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Warm turmeric tones
    pub fn curry() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(20, 16, 12),
            bg_dark: Color32::from_rgb(28, 23, 18),
            bg_medium: Color32::from_rgb(40, 33, 26),
            bg_light: Color32::from_rgb(58, 48, 38),

            text_primary: Color32::from_rgb(252, 248, 240),
            text_secondary: Color32::from_rgb(214, 204, 188),
            text_muted: Color32::from_rgb(150, 138, 120),

            accent: Color32::from_rgb(234, 159, 24),
            accent_hover: Color32::from_rgb(250, 190, 70),
            accent_muted: Color32::from_rgb(170, 112, 14),

            success: Color32::from_rgb(34, 197, 94),
            warning: Color32::from_rgb(234, 179, 8),
            error: Color32::from_rgb(239, 68, 68),

            border: Color32::from_rgb(74, 62, 50),
            selection: Color32::from_rgb(234, 159, 24).gamma_multiply(0.3),
        }
    }

    /// Green tea
    pub fn matcha() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(13, 18, 13),
            bg_dark: Color32::from_rgb(21, 29, 21),
            bg_medium: Color32::from_rgb(30, 42, 30),
            bg_light: Color32::from_rgb(45, 60, 44),

            text_primary: Color32::from_rgb(242, 250, 238),
            text_secondary: Color32::from_rgb(196, 218, 190),
            text_muted: Color32::from_rgb(128, 152, 122),

            accent: Color32::from_rgb(132, 186, 74),
            accent_hover: Color32::from_rgb(164, 212, 108),
            accent_muted: Color32::from_rgb(92, 138, 48),

            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(253, 224, 71),
            error: Color32::from_rgb(252, 140, 140),

            border: Color32::from_rgb(54, 74, 52),
            selection: Color32::from_rgb(132, 186, 74).gamma_multiply(0.3),
        }
    }

    /// Cherry blossom pink on plum
    pub fn sakura() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(24, 16, 22),
            bg_dark: Color32::from_rgb(33, 23, 31),
            bg_medium: Color32::from_rgb(46, 33, 43),
            bg_light: Color32::from_rgb(64, 47, 60),

            text_primary: Color32::from_rgb(255, 246, 250),
            text_secondary: Color32::from_rgb(226, 204, 216),
            text_muted: Color32::from_rgb(160, 136, 150),

            accent: Color32::from_rgb(244, 143, 177),
            accent_hover: Color32::from_rgb(248, 187, 208),
            accent_muted: Color32::from_rgb(194, 94, 130),

            success: Color32::from_rgb(110, 220, 150),
            warning: Color32::from_rgb(250, 204, 21),
            error: Color32::from_rgb(248, 113, 113),

            border: Color32::from_rgb(84, 62, 78),
            selection: Color32::from_rgb(244, 143, 177).gamma_multiply(0.3),
        }
    }

    /// Seaweed dark with a soy accent
    pub fn nori() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(10, 14, 14),
            bg_dark: Color32::from_rgb(16, 22, 22),
            bg_medium: Color32::from_rgb(24, 32, 32),
            bg_light: Color32::from_rgb(36, 48, 47),

            text_primary: Color32::from_rgb(236, 242, 240),
            text_secondary: Color32::from_rgb(190, 204, 200),
            text_muted: Color32::from_rgb(120, 138, 134),

            accent: Color32::from_rgb(214, 110, 58),
            accent_hover: Color32::from_rgb(236, 146, 98),
            accent_muted: Color32::from_rgb(156, 76, 38),

            success: Color32::from_rgb(52, 211, 153),
            warning: Color32::from_rgb(251, 191, 36),
            error: Color32::from_rgb(251, 113, 133),

            border: Color32::from_rgb(44, 60, 58),
            selection: Color32::from_rgb(214, 110, 58).gamma_multiply(0.3),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        let widgets = &mut visuals.widgets;
        paint(&mut widgets.noninteractive, self.bg_medium, self.bg_light, self.border, self.text_secondary);
        paint(&mut widgets.inactive, self.bg_medium, self.bg_light, self.border, self.text_primary);
        paint(&mut widgets.hovered, self.bg_light, self.bg_light, self.accent, self.text_primary);
        paint(&mut widgets.active, self.accent_muted, self.accent_muted, self.accent_hover, self.text_primary);
        paint(&mut widgets.open, self.bg_light, self.bg_light, self.accent, self.text_primary);

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}

/// Fill, weak fill, outline and text color for one widget state
fn paint(w: &mut WidgetVisuals, bg: Color32, weak_bg: Color32, stroke: Color32, fg: Color32) {
    w.bg_fill = bg;
    w.weak_bg_fill = weak_bg;
    w.bg_stroke = Stroke::new(1.0, stroke);
    w.fg_stroke = Stroke::new(1.0, fg);
}
