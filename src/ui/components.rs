//! Shared UI components

use eframe::egui::{self, Color32, CornerRadius, RichText, Vec2};

use crate::app::RouletteApp;
use crate::state::Tab;
use crate::ui::theme::Theme;

/// Render a tab button
pub fn render_tab(app: &mut RouletteApp, ui: &mut egui::Ui, tab: Tab, label: &str) {
    let theme = &app.ui.current_theme;
    let is_active = app.ui.active_tab == tab;

    let (bg, text_color) = if is_active {
        (theme.bg_medium, theme.accent)
    } else {
        (Color32::TRANSPARENT, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(label).color(text_color))
        .fill(bg)
        .corner_radius(CornerRadius { nw: 6, ne: 6, sw: 0, se: 0 })
        .min_size(Vec2::new(80.0, 32.0));

    if ui.add(button).clicked() {
        app.ui.active_tab = tab;
    }
}

/// Render a titled card
pub fn section_frame<R>(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    content: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).color(theme.accent).size(13.0).strong());
            ui.add_space(12.0);
            content(ui)
        })
        .inner
}

/// Full-width action button, filled with `fill` when enabled
pub fn action_button(
    ui: &mut egui::Ui,
    theme: &Theme,
    label: &str,
    fill: Color32,
    enabled: bool,
) -> egui::Response {
    let button = egui::Button::new(
        RichText::new(label)
            .color(if enabled { theme.bg_darkest } else { theme.text_muted })
            .size(16.0)
            .strong(),
    )
    .fill(if enabled { fill } else { theme.bg_medium })
    .min_size(Vec2::new(ui.available_width(), 40.0))
    .corner_radius(6.0);

    ui.add_enabled(enabled, button)
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut RouletteApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();

    egui::Window::new("About Recipe Roulette")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 220.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(RichText::new("🎰 Recipe Roulette").size(24.0).strong().color(theme.accent));

                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                ui.label(RichText::new("Spin a dish, get a post,").color(theme.text_secondary));
                ui.label(RichText::new("share it with the world.").color(theme.text_secondary));

                ui.add_space(12.0);
                ui.label(RichText::new("Built with Rust + egui").size(11.0).color(theme.text_muted));

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.ui.show_about_dialog = false;
                }
                ui.add_space(8.0);
            });
        });
}
