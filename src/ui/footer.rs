use crate::theme::Theme;
use eframe::egui::{self, Button, CornerRadius, Key, RichText, TextEdit};

pub const PLACEHOLDER: &str = "Write a message...";

/// Submission is allowed only for non-blank input while the assistant is idle.
pub fn can_submit(input: &str, composing: bool) -> bool {
    !composing && !input.trim().is_empty()
}

/// Input row and branding line. Returns true when the user asked to send
/// and sending is currently allowed.
pub fn show(
    ui: &mut egui::Ui,
    theme: &Theme,
    input: &mut String,
    composing: bool,
    assistant_name: &str,
    focus_input: bool,
) -> bool {
    let mut send_requested = false;

    ui.horizontal(|ui| {
        let button_width = 44.0;
        let field_width = (ui.available_width() - button_width - theme.spacing_8).max(80.0);
        let response = ui.add_enabled(
            !composing,
            TextEdit::singleline(input)
                .hint_text(PLACEHOLDER)
                .desired_width(field_width),
        );
        if response.lost_focus() && ui.input(|state| state.key_pressed(Key::Enter)) {
            send_requested = true;
        }
        if focus_input && !composing {
            response.request_focus();
        }

        let send = Button::new(
            RichText::new("➤")
                .color(theme.text_on_accent)
                .size(16.0),
        )
        .fill(theme.accent_primary)
        .corner_radius(CornerRadius::same(u8::MAX))
        .min_size(egui::vec2(button_width, button_width));
        let clicked = ui
            .add_enabled(can_submit(input, composing), send)
            .on_hover_text("Send message")
            .clicked();
        send_requested |= clicked;
    });

    ui.add_space(theme.spacing_8);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(format!("Powered by {assistant_name}"))
                .color(theme.text_faint)
                .size(11.0),
        );
    });

    send_requested && can_submit(input, composing)
}
