use crate::catalog::Item;

/// Results delivered from background tasks to the UI thread. Each carries
/// the turn it was scheduled for so superseded work can be recognised.
#[derive(Debug, Clone)]
pub enum AppEvent {
    CatalogFetched { turn: u64, items: Vec<Item> },
    ReplyDelayElapsed { turn: u64 },
}

impl AppEvent {
    pub fn turn(&self) -> u64 {
        match self {
            Self::CatalogFetched { turn, .. } | Self::ReplyDelayElapsed { turn } => *turn,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CatalogFetched { .. } => "catalog_fetched",
            Self::ReplyDelayElapsed { .. } => "reply_delay_elapsed",
        }
    }
}
