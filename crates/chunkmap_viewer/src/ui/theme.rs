//! Viewer colours and egui styling

use bevy_egui::egui::{self, Color32, CornerRadius, FontId, Stroke, TextStyle, Visuals};
use std::sync::atomic::{AtomicBool, Ordering};

static TEXT_STYLES_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Dark theme for the panels plus the overlay palette
pub struct ViewerTheme;

impl ViewerTheme {
    // -------------------------------------------------------------------------
    // Panels
    // -------------------------------------------------------------------------

    pub const BG_WINDOW: Color32 = Color32::from_rgb(40, 41, 47);
    pub const BG_PANEL: Color32 = Color32::from_rgb(52, 54, 60);
    pub const BG_WIDGET: Color32 = Color32::from_rgb(67, 68, 75);
    pub const BG_HOVER: Color32 = Color32::from_rgb(85, 86, 94);
    pub const BORDER_WIDGET: Color32 = Color32::from_rgb(85, 86, 90);
    pub const ACCENT_BLUE: Color32 = Color32::from_rgb(45, 130, 209);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(185, 185, 187);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(147, 148, 150);
    pub const ERROR: Color32 = Color32::from_rgb(214, 96, 110);
    pub const WARNING: Color32 = Color32::from_rgb(200, 160, 60);

    // -------------------------------------------------------------------------
    // Map overlays
    // -------------------------------------------------------------------------

    pub const CHUNK_GRID: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 60);
    pub const MAP_BORDER: Color32 = Color32::from_rgb(120, 120, 130);
    pub const SHAPE_STROKE: Color32 = Color32::from_rgb(51, 136, 255);
    pub const PREVIEW_STROKE: Color32 = Color32::from_rgb(255, 202, 57);
    pub const HANDLE_FILL: Color32 = Color32::WHITE;
    pub const HOVER_TILE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const MARKER: Color32 = Color32::from_rgb(230, 40, 40);

    /// Apply the viewer theme to the egui context
    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_PANEL;
        visuals.extreme_bg_color = Self::BG_WINDOW;
        visuals.window_shadow = egui::Shadow::NONE;
        visuals.popup_shadow = egui::Shadow::NONE;

        visuals.widgets.inactive.bg_fill = Self::BG_WIDGET;
        visuals.widgets.inactive.weak_bg_fill = Self::BG_WIDGET;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.inactive.corner_radius = CornerRadius::same(4);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::TEXT_MUTED);
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Self::BORDER_WIDGET);
        visuals.widgets.hovered.bg_fill = Self::BG_HOVER;
        visuals.widgets.hovered.weak_bg_fill = Self::BG_HOVER;
        visuals.widgets.active.bg_fill = Self::ACCENT_BLUE;
        visuals.widgets.active.weak_bg_fill = Self::ACCENT_BLUE;
        visuals.selection.bg_fill = Self::ACCENT_BLUE;

        visuals.warn_fg_color = Self::WARNING;
        visuals.error_fg_color = Self::ERROR;

        style.spacing.item_spacing = egui::vec2(6.0, 4.0);
        style.spacing.button_padding = egui::vec2(6.0, 3.0);
        style.visuals = visuals;
        ctx.set_style(style);

        Self::configure_text_styles(ctx);
    }

    /// Snippets and coordinate lists read best in monospace
    fn configure_text_styles(ctx: &egui::Context) {
        if TEXT_STYLES_CONFIGURED.swap(true, Ordering::SeqCst) {
            return;
        }
        ctx.style_mut(|style| {
            style
                .text_styles
                .insert(TextStyle::Monospace, FontId::monospace(12.0));
            style
                .text_styles
                .insert(TextStyle::Small, FontId::proportional(10.0));
        });
    }
}
