//! Settings tab UI rendering

use eframe::egui::{self, RichText, Vec2};

use crate::app::RouletteApp;
use crate::config::DEFAULT_ENDPOINT;
use crate::ui::components::section_frame;
use crate::ui::theme::ThemePreset;
use crate::variant::{DEFAULT_MODEL, Variant};

/// Render the settings tab
pub fn render_settings_tab(app: &mut RouletteApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    egui::ScrollArea::vertical()
        .id_salt("settings_scroll")
        .show(ui, |ui| {
            ui.label(RichText::new("Settings").color(theme.text_primary).size(20.0).strong());
            ui.add_space(16.0);

            section_frame(ui, &theme, "Appearance", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Theme:").color(theme.text_muted));

                    egui::ComboBox::from_id_salt("theme_select")
                        .selected_text(app.config.ui.theme.name())
                        .show_ui(ui, |ui| {
                            for preset in ThemePreset::all() {
                                if ui
                                    .selectable_label(app.config.ui.theme == *preset, preset.name())
                                    .clicked()
                                {
                                    app.config.ui.theme = *preset;
                                    app.ui.current_theme = preset.theme();
                                    app.ui.theme_dirty = true;
                                    app.save_config();
                                }
                            }
                        });
                });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Preview:").color(theme.text_muted));
                    ui.add_space(8.0);

                    let swatches = [
                        ("Background", theme.bg_dark),
                        ("Accent", theme.accent),
                        ("Success", theme.success),
                        ("Warning", theme.warning),
                        ("Error", theme.error),
                    ];
                    for (label, color) in swatches {
                        let (rect, response) =
                            ui.allocate_exact_size(Vec2::new(24.0, 24.0), egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, color);
                        response.on_hover_text(label);
                        ui.add_space(4.0);
                    }
                });
            });

            ui.add_space(12.0);

            section_frame(ui, &theme, "Roulette", |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Start with:").color(theme.text_muted));
                    egui::ComboBox::from_id_salt("default_variant_select")
                        .selected_text(app.config.ui.variant.name())
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for &variant in Variant::all() {
                                if ui
                                    .selectable_label(app.config.ui.variant == variant, variant.name())
                                    .clicked()
                                {
                                    app.config.ui.variant = variant;
                                    app.save_config();
                                }
                            }
                        });
                });

                ui.add_space(8.0);
                if ui
                    .checkbox(
                        &mut app.config.spin.legacy_double_roll,
                        "Extra re-roll one second into each spin",
                    )
                    .changed()
                {
                    app.save_config();
                }
                ui.label(
                    RichText::new("  The landing is still one uniform draw per slot")
                        .color(theme.text_muted)
                        .size(11.0),
                );
            });

            ui.add_space(12.0);

            section_frame(ui, &theme, "Text generation", |ui| {
                egui::Grid::new("generator_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Endpoint:").color(theme.text_muted));
                        let endpoint = ui.add(
                            egui::TextEdit::singleline(&mut app.config.generator.endpoint)
                                .hint_text(DEFAULT_ENDPOINT)
                                .desired_width(360.0),
                        );
                        if endpoint.lost_focus() {
                            if app.config.generator.endpoint.trim().is_empty() {
                                app.config.generator.endpoint = DEFAULT_ENDPOINT.to_string();
                            }
                            app.save_config();
                        }
                        ui.end_row();

                        ui.label(RichText::new("Model:").color(theme.text_muted));
                        let model = ui.add(
                            egui::TextEdit::singleline(&mut app.model_override)
                                .hint_text(DEFAULT_MODEL)
                                .desired_width(360.0),
                        );
                        if model.lost_focus() {
                            let trimmed = app.model_override.trim();
                            app.config.generator.model =
                                (!trimmed.is_empty()).then(|| trimmed.to_string());
                            app.save_config();
                        }
                        ui.end_row();

                        ui.label(RichText::new("Key variable:").color(theme.text_muted));
                        let key_env = ui.add(
                            egui::TextEdit::singleline(&mut app.config.generator.api_key_env)
                                .desired_width(200.0),
                        );
                        if key_env.lost_focus() {
                            app.save_config();
                        }
                        ui.end_row();
                    });

                ui.add_space(8.0);
                let (text, color) = if app.config.generator.api_key().is_some() {
                    (format!("${} is set", app.config.generator.api_key_env), theme.success)
                } else if app.config.generator.endpoint.trim_end_matches('/') != DEFAULT_ENDPOINT {
                    ("No local key; the endpoint is expected to add it".to_string(), theme.text_muted)
                } else {
                    (format!("${} is not set", app.config.generator.api_key_env), theme.warning)
                };
                ui.label(RichText::new(text).color(color).size(11.0));
            });
        });
}
