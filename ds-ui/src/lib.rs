use bevy::app::Plugin;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts, EguiPlugin, EguiPrimaryContextPass,
    egui::{self},
};
use ds_render::ShowcaseScroll;
use ds_sim::sections::{SECTION_COUNT, section_at};
use ds_utils::{AppState, LoadingStatus, ShowcasePhase};
use tracing::debug;

const OVERLAY_FADE_SECS: f32 = 0.5;
const OVERLAY_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(10, 10, 10);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x4f, 0xac, 0xfe);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut bevy::app::App) {
        app.add_plugins(EguiPlugin::default())
            .init_resource::<LoadingOverlay>()
            .add_systems(
                EguiPrimaryContextPass,
                (loading_overlay_ui, section_hud_ui.after(loading_overlay_ui)),
            );
    }
}

/// Lifetime of the loading screen: shown until the model is ready, then faded out once.
#[derive(Resource, Debug, Default)]
pub struct LoadingOverlay {
    ready_at: Option<f32>,
    hidden: bool,
}

impl LoadingOverlay {
    /// Overlay opacity at `now`; `1.0` until ready, then a linear fade to `0.0`.
    pub fn alpha(&self, now: f32) -> f32 {
        if self.hidden {
            return 0.0;
        }
        match self.ready_at {
            None => 1.0,
            Some(start) => fade_alpha(now - start, OVERLAY_FADE_SECS),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn update(&mut self, ready: bool, now: f32) {
        if ready && self.ready_at.is_none() {
            self.ready_at = Some(now);
        }
        if !self.hidden && self.ready_at.is_some() && self.alpha(now) <= 0.0 {
            self.hidden = true;
            debug!("loading overlay dismissed");
        }
    }
}

pub fn fade_alpha(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    (1.0 - elapsed / duration).clamp(0.0, 1.0)
}

pub fn overlay_message(status: &LoadingStatus) -> &'static str {
    if status.failed {
        "Drone model unavailable, showing placeholder"
    } else {
        "Loading Drone Model..."
    }
}

fn with_alpha(color: egui::Color32, alpha: f32) -> egui::Color32 {
    let [r, g, b, a] = color.to_array();
    egui::Color32::from_rgba_unmultiplied(r, g, b, (a as f32 * alpha).round() as u8)
}

fn loading_overlay_ui(
    mut contexts: EguiContexts,
    time: Res<Time>,
    app_state: Res<AppState>,
    status: Res<LoadingStatus>,
    mut overlay: ResMut<LoadingOverlay>,
) {
    let now = time.elapsed_secs();
    overlay.update(app_state.is_ready(), now);
    if overlay.is_hidden() {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let alpha = overlay.alpha(now);

    let screen = ctx.screen_rect();
    egui::Area::new(egui::Id::new("loading_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .interactable(false)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen, 0.0, with_alpha(OVERLAY_BACKGROUND, alpha));
            ui.scope_builder(egui::UiBuilder::new().max_rect(screen), |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(screen.height() * 0.45);
                    ui.label(
                        egui::RichText::new(overlay_message(&status))
                            .size(20.0)
                            .color(with_alpha(egui::Color32::WHITE, alpha)),
                    );
                    ui.add_space(12.0);
                    ui.add(
                        egui::ProgressBar::new(status.ratio.clamp(0.0, 1.0))
                            .desired_width(240.0)
                            .fill(with_alpha(ACCENT, alpha))
                            .text(
                                egui::RichText::new(format!("{}%", status.percent()))
                                    .color(with_alpha(egui::Color32::WHITE, alpha)),
                            ),
                    );
                });
            });
        });
}

fn section_hud_ui(
    mut contexts: EguiContexts,
    app_state: Res<AppState>,
    scroll: Res<ShowcaseScroll>,
) {
    let ShowcasePhase::Ready { fallback } = app_state.0 else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let cursor = section_at(scroll.track.position());

    egui::Area::new(egui::Id::new("section_hud"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::Vec2::new(-16.0, -16.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(egui::Color32::from_black_alpha(150))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(64)))
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "#{}  {}/{}",
                            cursor.anchor,
                            cursor.index + 1,
                            SECTION_COUNT
                        ))
                        .color(egui::Color32::WHITE)
                        .monospace(),
                    );
                    ui.add(
                        egui::ProgressBar::new(scroll.track.page_progress().clamp(0.0, 1.0))
                            .desired_width(160.0)
                            .fill(ACCENT),
                    );
                    if fallback {
                        ui.label(
                            egui::RichText::new("placeholder model")
                                .small()
                                .color(egui::Color32::from_gray(160)),
                        );
                    }
                });
        });
}
