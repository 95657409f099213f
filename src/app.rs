use eframe::egui::{self, RichText};

use crate::config::Config;
use crate::roulette::Roulette;
use crate::share;
use crate::spin::SpinOptions;
use crate::state::{GenerationState, SpinState, StateEvent, Tab, UiState};
use crate::ui::{self, components};
use crate::variant::Variant;

/// Main application state
pub struct RouletteApp {
    /// Application configuration
    pub config: Config,
    /// Selection, busy flags and post
    pub roulette: Roulette,
    /// Running spin animation
    pub spin: SpinState,
    /// Running generation request
    pub generation: GenerationState,
    /// UI-related state
    pub ui: UiState,
    /// Status message for the status bar
    pub status_message: String,
    /// Edit buffer for the model override field
    pub model_override: String,
}

impl RouletteApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        ui::fonts::install_cjk_font(&cc.egui_ctx);
        Self::with_config(Config::load().unwrap_or_default())
    }

    pub fn with_config(config: Config) -> Self {
        let roulette = Roulette::new(config.ui.variant);
        let model_override = config.generator.model.clone().unwrap_or_default();
        let theme = config.ui.theme.theme();

        Self {
            config,
            roulette,
            spin: SpinState::default(),
            generation: GenerationState::default(),
            ui: UiState::new(theme),
            status_message: "Ready".to_string(),
            model_override,
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    pub fn select_variant(&mut self, variant: Variant) {
        if self.roulette.set_variant(variant) {
            self.status_message = variant.name().to_string();
        }
    }

    pub fn start_spin(&mut self) {
        let options = SpinOptions {
            legacy_double_roll: self.config.spin.legacy_double_roll,
        };
        if let Some(event) = self.spin.start(&mut self.roulette, options) {
            self.handle_event(event);
        }
    }

    pub fn start_generation(&mut self) {
        if let Some(event) = self.generation.start(&mut self.roulette, &self.config.generator) {
            self.handle_event(event);
        }
    }

    pub fn share_post(&mut self) {
        match share::share(self.roulette.post()) {
            Ok(Some(_)) => self.status_message = "Opened X in your browser".to_string(),
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to open share intent: {}", e);
                self.status_message = format!("Failed to open browser: {}", e);
            }
        }
    }

    fn handle_event(&mut self, event: StateEvent) {
        match event {
            StateEvent::StatusMessage(msg) => self.status_message = msg,
            StateEvent::LogError(msg) => tracing::error!("{}", msg),
            StateEvent::LogInfo(msg) => tracing::info!("{}", msg),
        }
    }

    /// Poll background tasks and apply their events
    fn poll_tasks(&mut self, ctx: &egui::Context) {
        let mut events = self.spin.poll(ctx, &mut self.roulette);
        events.extend(self.generation.poll(ctx, &mut self.roulette));
        for event in events {
            self.handle_event(event);
        }
    }
}

impl eframe::App for RouletteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        self.poll_tasks(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.ui.show_about_dialog = true;
                        ui.close();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&self.status_message).color(self.ui.current_theme.text_secondary));
                if self.spin.is_running() || self.generation.is_running() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.spinner();
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                components::render_tab(self, ui, Tab::Roulette, "Roulette");
                components::render_tab(self, ui, Tab::Settings, "Settings");
            });
            ui.separator();
            ui.add_space(8.0);

            match self.ui.active_tab {
                Tab::Roulette => ui::render_roulette_tab(self, ui),
                Tab::Settings => ui::render_settings_tab(self, ui),
            }
        });

        components::render_about_dialog(self, ctx);
    }
}
