use crate::conversation::{Message, Sender};
use crate::theme::Theme;
use crate::ui::format::format_timestamp;
use eframe::egui::{self, Align, Layout, RichText};

/// A text message: user on the right, assistant on the left.
pub fn show(ui: &mut egui::Ui, theme: &Theme, message: &Message) {
    let Some(text) = message.text_content() else {
        return;
    };

    let from_user = message.sender() == Sender::User;
    let (fill, text_color, time_color) = if from_user {
        (theme.user_bubble, theme.text_on_accent, theme.text_on_accent_muted)
    } else {
        (theme.assistant_bubble, theme.text_primary, theme.text_muted)
    };
    let layout = if from_user {
        Layout::right_to_left(Align::TOP)
    } else {
        Layout::left_to_right(Align::TOP)
    };
    let max_width = ui.available_width() * theme.bubble_max_fraction;

    ui.with_layout(layout, |ui| {
        theme.bubble_frame(fill, !from_user).show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.vertical(|ui| {
                ui.label(RichText::new(text).color(text_color).size(14.0));
                ui.with_layout(Layout::right_to_left(Align::TOP), |ui| {
                    ui.label(
                        RichText::new(format_timestamp(&message.created_at()))
                            .color(time_color)
                            .size(11.0),
                    );
                });
            });
        });
    });
}
