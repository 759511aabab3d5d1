use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub surface_page: Color32,
    pub surface_thread: Color32,
    pub surface_card: Color32,
    pub surface_footer: Color32,
    pub accent_primary: Color32,
    pub accent_hover: Color32,
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,
    pub online: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub text_faint: Color32,
    pub text_on_accent: Color32,
    pub text_on_accent_muted: Color32,
    pub price: Color32,
    pub border_subtle: Color32,
    pub placeholder: Color32,
    pub spacing_4: f32,
    pub spacing_8: f32,
    pub spacing_12: f32,
    pub spacing_16: f32,
    pub radius_8: u8,
    pub radius_12: u8,
    pub card_width: f32,
    pub thumbnail_size: f32,
    pub bubble_max_fraction: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface_page: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            surface_thread: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            surface_card: Color32::WHITE,
            surface_footer: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            accent_primary: Color32::from_rgb(0x25, 0x63, 0xEB),
            accent_hover: Color32::from_rgb(0x1D, 0x4E, 0xD8),
            user_bubble: Color32::from_rgb(0x3B, 0x82, 0xF6),
            assistant_bubble: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            online: Color32::from_rgb(0x4A, 0xDE, 0x80),
            text_primary: Color32::from_rgb(0x1F, 0x29, 0x37),
            text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            text_faint: Color32::from_rgb(0x9C, 0xA3, 0xAF),
            text_on_accent: Color32::WHITE,
            text_on_accent_muted: Color32::from_rgb(0xBF, 0xDB, 0xFE),
            price: Color32::from_rgb(0x25, 0x63, 0xEB),
            border_subtle: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            placeholder: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            spacing_4: 4.0,
            spacing_8: Self::P8,
            spacing_12: Self::P12,
            spacing_16: Self::P16,
            radius_8: Self::R8,
            radius_12: Self::R12,
            card_width: 240.0,
            thumbnail_size: 64.0,
            bubble_max_fraction: 0.85,
        }
    }
}

impl Theme {
    pub const R8: u8 = 8;
    pub const R12: u8 = 12;
    pub const P8: f32 = 8.0;
    pub const P12: f32 = 12.0;
    pub const P16: f32 = 16.0;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.surface_thread;
        visuals.override_text_color = Some(self.text_primary);
        visuals.widgets.noninteractive.bg_stroke = Stroke::NONE;
        visuals.widgets.inactive.bg_fill = self.surface_card;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border_subtle);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent_primary);
        visuals.widgets.active.bg_fill = self.accent_hover;
        visuals.selection.bg_fill = self.user_bubble;
        visuals.selection.stroke = Stroke::new(1.0, self.accent_primary);
        visuals.hyperlink_color = self.accent_primary;
        visuals.window_fill = self.surface_page;
        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(12.0, 8.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(18.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Button, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(11.0));
        ctx.set_style(style);
    }

    pub fn bubble_frame(&self, fill: Color32, tail_left: bool) -> Frame {
        let mut corners = CornerRadius::same(self.radius_8);
        if tail_left {
            corners.sw = 0;
        } else {
            corners.se = 0;
        }
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(corners)
            .stroke(Stroke::NONE)
            .shadow(egui::epaint::Shadow {
                offset: [0, 1],
                blur: 3,
                spread: 0,
                color: Color32::from_black_alpha(24),
            })
    }

    pub fn card_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_card)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(self.radius_8))
            .stroke(Stroke::NONE)
            .shadow(egui::epaint::Shadow {
                offset: [0, 2],
                blur: 6,
                spread: 0,
                color: Color32::from_black_alpha(32),
            })
    }

    pub fn header_frame(&self) -> Frame {
        Frame::new()
            .fill(self.accent_primary)
            .inner_margin(Margin::same(self.spacing_16 as i8))
    }

    pub fn footer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_footer)
            .inner_margin(Margin::same(self.spacing_16 as i8))
            .stroke(Stroke::new(1.0, self.border_subtle))
    }

    pub fn thread_frame(&self) -> Frame {
        Frame::new()
            .fill(self.surface_thread)
            .inner_margin(Margin::same(self.spacing_16 as i8))
    }
}
