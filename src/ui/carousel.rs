use crate::catalog::Item;
use crate::conversation::Message;
use crate::theme::Theme;
use crate::ui::format::{format_price, format_timestamp, truncate_name};
use eframe::egui::{self, Align, Align2, Button, CornerRadius, FontId, Layout, RichText, ScrollArea, Sense};

pub const CAPTION: &str = "Here are some product recommendations for you:";

/// Recommendation message: caption plus a horizontally scrolling row of
/// product cards, left-aligned like any assistant message.
pub fn show(ui: &mut egui::Ui, theme: &Theme, message: &Message) {
    if message.items().is_empty() {
        return;
    }
    let max_width = ui.available_width() * theme.bubble_max_fraction;

    ui.with_layout(Layout::left_to_right(Align::TOP), |ui| {
        ui.vertical(|ui| {
            ui.set_max_width(max_width);
            theme
                .bubble_frame(theme.assistant_bubble, true)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(CAPTION)
                            .color(theme.text_primary)
                            .size(13.0)
                            .strong(),
                    );
                    ui.add_space(theme.spacing_8);
                    ScrollArea::horizontal()
                        .id_salt(message.id())
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.spacing_mut().item_spacing.x = theme.spacing_12;
                                for item in message.items() {
                                    card(ui, theme, item);
                                }
                            });
                        });
                });
            ui.label(
                RichText::new(format_timestamp(&message.created_at()))
                    .color(theme.text_muted)
                    .size(11.0),
            );
        });
    });
}

fn card(ui: &mut egui::Ui, theme: &Theme, item: &Item) {
    theme.card_frame().show(ui, |ui| {
        ui.set_width(theme.card_width);
        ui.horizontal(|ui| {
            thumbnail(ui, theme, item);
            ui.add_space(theme.spacing_8);
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(truncate_name(&item.name))
                        .color(theme.text_primary)
                        .size(13.0)
                        .strong(),
                )
                .on_hover_text(item.name.as_str());
                ui.label(
                    RichText::new(format_price(item.price))
                        .color(theme.price)
                        .size(15.0)
                        .strong(),
                );
                let view = Button::new(
                    RichText::new("View Product")
                        .color(theme.text_on_accent)
                        .size(12.0),
                )
                .fill(theme.user_bubble)
                .corner_radius(CornerRadius::same(theme.radius_8))
                .min_size(egui::vec2(ui.available_width(), 0.0));
                if ui.add(view).on_hover_text(item.detail_url.as_str()).clicked() {
                    ui.ctx()
                        .open_url(egui::OpenUrl::new_tab(item.detail_url.as_str()));
                }
            });
        });
    });
}

/// Round product image. A neutral placeholder stands in while the image is
/// loading or if it cannot be loaded at all.
fn thumbnail(ui: &mut egui::Ui, theme: &Theme, item: &Item) {
    let size = egui::vec2(theme.thumbnail_size, theme.thumbnail_size);
    let image = egui::Image::new(item.image_url.as_str())
        .fit_to_exact_size(size)
        .corner_radius(CornerRadius::same((theme.thumbnail_size / 2.0) as u8));

    let ready = matches!(
        image.load_for_size(ui.ctx(), size),
        Ok(egui::load::TexturePoll::Ready { .. })
    );
    if ready {
        ui.add(image);
        return;
    }

    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), size.x / 2.0, theme.placeholder);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Img",
        FontId::proportional(12.0),
        theme.text_faint,
    );
}
