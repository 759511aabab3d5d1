use crate::theme::Theme;
use eframe::egui::{self, Layout, Sense};
use std::time::Duration;

const DOT_COUNT: usize = 3;
const DOT_RADIUS: f32 = 4.0;

/// Three bouncing dots in an assistant-side bubble.
pub fn show(ui: &mut egui::Ui, theme: &Theme) {
    ui.with_layout(Layout::left_to_right(egui::Align::TOP), |ui| {
        theme
            .bubble_frame(theme.assistant_bubble, true)
            .show(ui, |ui| {
                let spacing = DOT_RADIUS * 3.0;
                let size = egui::vec2(spacing * DOT_COUNT as f32, DOT_RADIUS * 4.0);
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                let time = ui.input(|input| input.time);
                let painter = ui.painter();
                for index in 0..DOT_COUNT {
                    let phase = time * 6.0 - index as f64 * 0.8;
                    let lift = (phase.sin().max(0.0) * DOT_RADIUS as f64) as f32;
                    let center = egui::pos2(
                        rect.left() + spacing * (index as f32 + 0.5),
                        rect.center().y + DOT_RADIUS * 0.5 - lift,
                    );
                    painter.circle_filled(center, DOT_RADIUS, theme.text_muted);
                }
            });
    });
    ui.ctx().request_repaint_after(Duration::from_millis(50));
}
