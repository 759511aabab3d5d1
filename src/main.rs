mod app;
mod catalog;
mod config;
mod conversation;
mod event;
mod reply;
mod theme;
mod ui;

use app::ChatApp;
use catalog::{CatalogSource, HttpCatalog};
use config::WidgetConfig;
use eframe::egui;
use reply::ReplyPolicy;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = WidgetConfig::from_env()?;
    let (tx, rx) = mpsc::unbounded_channel();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("chat-widget-runtime")
        .build()?;

    let catalog: Arc<dyn CatalogSource> = Arc::new(HttpCatalog::new(config.catalog_url())?);
    let policy = ReplyPolicy::new(&config, catalog, runtime.handle().clone(), tx);
    tracing::info!(
        catalog = %config.catalog_url(),
        reply_delay_ms = config.reply_delay.as_millis() as u64,
        "chat widget starting"
    );

    let title = config.assistant_name.clone();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([448.0, 700.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |creation_context| {
            Ok(Box::new(ChatApp::new(creation_context, config, policy, rx)))
        }),
    )?;

    drop(runtime);
    Ok(())
}
