//! Roulette tab UI rendering

use eframe::egui::{self, RichText};
use egui_commonmark::CommonMarkViewer;

use crate::app::RouletteApp;
use crate::ui::components::{action_button, section_frame};
use crate::variant::{GenerationMode, Variant};

/// Render the roulette tab content
pub fn render_roulette_tab(app: &mut RouletteApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    // Variant picker
    ui.horizontal(|ui| {
        ui.label(RichText::new("Roulette:").color(theme.text_muted));
        let current = app.roulette.variant();
        let busy = app.roulette.is_busy();
        ui.add_enabled_ui(!busy, |ui| {
            egui::ComboBox::from_id_salt("variant_select")
                .selected_text(current.name())
                .width(220.0)
                .show_ui(ui, |ui| {
                    for &variant in Variant::all() {
                        if ui.selectable_label(current == variant, variant.name()).clicked() {
                            app.select_variant(variant);
                        }
                    }
                });
        });
    });

    ui.add_space(12.0);

    let variant = app.roulette.variant();
    section_frame(ui, &theme, variant.name(), |ui| {
        ui.vertical_centered(|ui| {
            let selection = app.roulette.selection();

            // Slot labels above the icons
            let labels: Vec<&str> = selection.picks().iter().map(|p| p.kind.label()).collect();
            ui.label(RichText::new(labels.join("   ")).color(theme.text_muted).size(11.0));

            ui.add_space(4.0);
            ui.label(RichText::new(selection.icons_line()).size(48.0));
            ui.add_space(4.0);
            ui.label(RichText::new(selection.names_line()).color(theme.text_primary).size(20.0));

            if app.roulette.is_spinning() {
                ui.add_space(8.0);
                ui.add(egui::ProgressBar::new(app.spin.progress).desired_height(4.0));
            }
        });
    });

    ui.add_space(12.0);

    // Spin
    let spin_label = if app.roulette.is_spinning() { "スピン中..." } else { "🎲 レシピをスピン" };
    if action_button(ui, &theme, spin_label, theme.accent, app.roulette.can_spin())
        .on_hover_text("レシピをスピンする")
        .clicked()
    {
        app.start_spin();
    }

    ui.add_space(8.0);

    // Generate
    let generate_label = match (app.roulette.is_generating(), variant.generation()) {
        (true, _) => "生成中...",
        (false, GenerationMode::Remote { .. }) => "✉ 投稿文を生成",
        (false, GenerationMode::Local) => "✉ 投稿文を作成",
    };
    if action_button(ui, &theme, generate_label, theme.success, app.roulette.can_generate())
        .on_hover_text("投稿文を生成する")
        .clicked()
    {
        app.start_generation();
    }

    // Generated post
    if app.roulette.can_share() {
        ui.add_space(12.0);
        let post = app.roulette.post().to_string();
        egui::Frame::new()
            .fill(theme.bg_light.gamma_multiply(0.5))
            .corner_radius(6.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .max_height(180.0)
                    .show(ui, |ui| {
                        CommonMarkViewer::new().show(ui, &mut app.ui.markdown_cache, &post);
                    });
                ui.add_space(4.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{} 文字", post.chars().count()))
                            .color(theme.text_muted)
                            .size(11.0),
                    );
                    if ui.small_button("Copy").clicked() {
                        ui.ctx().copy_text(post.clone());
                        app.status_message = "Copied to clipboard".to_string();
                    }
                });
            });
    }

    // Share, pinned to the bottom
    ui.add_space((ui.available_height() - 50.0).max(12.0));
    if action_button(ui, &theme, "Xに投稿", theme.accent_hover, app.roulette.can_share())
        .on_hover_text("Xに投稿する")
        .clicked()
    {
        app.share_post();
    }
}
