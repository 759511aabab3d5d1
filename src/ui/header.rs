use crate::theme::Theme;
use eframe::egui::{self, Align2, FontId, RichText, Sense};
use std::time::Duration;

pub fn show(ui: &mut egui::Ui, theme: &Theme, name: &str, tagline: &str) {
    ui.horizontal(|ui| {
        avatar(ui, theme, name);
        ui.add_space(theme.spacing_8);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(name)
                        .color(theme.text_on_accent)
                        .size(18.0)
                        .strong(),
                );
                online_dot(ui, theme);
            });
            ui.label(
                RichText::new(tagline)
                    .color(theme.text_on_accent_muted)
                    .size(11.0),
            );
        });
    });
}

fn avatar(ui: &mut egui::Ui, theme: &Theme, name: &str) {
    let size = egui::vec2(40.0, 40.0);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), size.x / 2.0, theme.surface_card);
    let initial = name
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().to_string())
        .unwrap_or_default();
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initial,
        FontId::proportional(20.0),
        theme.accent_primary,
    );
}

fn online_dot(ui: &mut egui::Ui, theme: &Theme) {
    let size = egui::vec2(12.0, 12.0);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let time = ui.input(|input| input.time);
    let pulse = ((time * 2.0).sin() * 0.5 + 0.5) as f32;
    let color = theme.online.gamma_multiply(0.6 + 0.4 * pulse);
    let painter = ui.painter();
    painter.circle_filled(rect.center(), 6.0, theme.accent_hover);
    painter.circle_filled(rect.center(), 4.5, color);
    ui.ctx().request_repaint_after(Duration::from_millis(100));
}
