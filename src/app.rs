use crate::config::WidgetConfig;
use crate::conversation::{ConversationStore, MessageKind};
use crate::event::AppEvent;
use crate::reply::{ReplyPolicy, SubmitOutcome};
use crate::theme::Theme;
use crate::ui::{bubble, carousel, footer, header, typing};
use eframe::egui::{self, ScrollArea};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

/// The chat window. Owns the conversation for as long as the window is
/// open; dropping it drops the reply policy, which aborts any pending reply.
pub struct ChatApp {
    rx: UnboundedReceiver<AppEvent>,
    store: ConversationStore,
    policy: ReplyPolicy,
    config: WidgetConfig,
    theme: Theme,
    input_buffer: String,
    focus_input: bool,
}

impl ChatApp {
    pub fn new(
        creation_context: &eframe::CreationContext<'_>,
        config: WidgetConfig,
        policy: ReplyPolicy,
        rx: UnboundedReceiver<AppEvent>,
    ) -> Self {
        Self::with_context(&creation_context.egui_ctx, config, policy, rx)
    }

    fn with_context(
        ctx: &egui::Context,
        config: WidgetConfig,
        policy: ReplyPolicy,
        rx: UnboundedReceiver<AppEvent>,
    ) -> Self {
        egui_extras::install_image_loaders(ctx);
        let theme = Theme::default();
        theme.apply_visuals(ctx);

        Self {
            rx,
            store: ConversationStore::with_greeting(&config.greeting),
            policy,
            config,
            theme,
            input_buffer: String::new(),
            focus_input: true,
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.policy.handle_event(&mut self.store, event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn submit_input(&mut self) {
        let outcome = self.policy.submit(&mut self.store, &self.input_buffer);
        if outcome != SubmitOutcome::Ignored {
            self.input_buffer.clear();
            self.focus_input = true;
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("chat_header")
            .frame(self.theme.header_frame())
            .show_separator_line(false)
            .show(ctx, |ui| {
                header::show(
                    ui,
                    &self.theme,
                    &self.config.assistant_name,
                    &self.config.assistant_tagline,
                );
            });
    }

    fn render_footer(&mut self, ctx: &egui::Context) {
        let composing = self.store.is_composing();
        // The field is disabled while composing; focus waits for the first idle frame.
        let focus_input = self.focus_input && !composing;
        if focus_input {
            self.focus_input = false;
        }

        let send_now = egui::TopBottomPanel::bottom("chat_footer")
            .frame(self.theme.footer_frame())
            .show_separator_line(false)
            .show(ctx, |ui| {
                footer::show(
                    ui,
                    &self.theme,
                    &mut self.input_buffer,
                    composing,
                    &self.config.assistant_name,
                    focus_input,
                )
            })
            .inner;

        if send_now {
            self.submit_input();
            ctx.request_repaint();
        }
    }

    fn render_thread(&mut self, ctx: &egui::Context) {
        let scroll_to_bottom = self.store.take_scroll_request();

        egui::CentralPanel::default()
            .frame(self.theme.thread_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("chat_thread")
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in self.store.messages() {
                            match message.kind() {
                                MessageKind::Text => bubble::show(ui, &self.theme, message),
                                MessageKind::Recommendation => {
                                    carousel::show(ui, &self.theme, message)
                                }
                            }
                            ui.add_space(self.theme.spacing_12);
                        }

                        if self.store.is_composing() {
                            typing::show(ui, &self.theme);
                        }

                        if scroll_to_bottom {
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        }
                    });
            });
    }

    fn render(&mut self, ctx: &egui::Context) {
        self.drain_events();
        self.render_header(ctx);
        self.render_footer(ctx);
        self.render_thread(ctx);
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }
}
