//! Decides how the assistant answers each user turn.
//!
//! A turn that matches the trigger phrase fetches the catalog and answers
//! with a recommendation carousel as soon as the fetch resolves. Any other
//! turn is answered with a canned line once the reply delay elapses. At most
//! one reply is outstanding: a new submission aborts the previous task, and
//! events from an older turn are discarded if they were already queued.

use crate::catalog::sampler::sample;
use crate::catalog::{CatalogSource, Item};
use crate::config::WidgetConfig;
use crate::conversation::{ConversationStore, Message, MessageError, Sender};
use crate::event::AppEvent;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

pub const CANNED_REPLIES: [&str; 7] = [
    "Interesting point! Tell me more.",
    "I understand. How can I assist you further?",
    "Got it. What else is on your mind?",
    "Thanks for sharing. Let me process that.",
    "Okay, I'm listening.",
    "That's a good question. Let me think...",
    "I see. Anything else I can help with today?",
];

pub const FETCH_FAILED_REPLY: &str =
    "I'm sorry, I couldn't fetch product recommendations at the moment. Please try again later.";
pub const NOTHING_PICKED_REPLY: &str =
    "I found some products, but couldn't pick recommendations at this moment. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// Trigger phrase matched; the catalog fetch is in flight.
    Recommending,
    /// A canned reply is scheduled after the reply delay.
    DelayedReply,
}

struct PendingReply {
    turn: u64,
    task: AbortHandle,
}

pub struct ReplyPolicy {
    trigger_phrase: String,
    reply_delay: Duration,
    recommendation_count: usize,
    catalog: Arc<dyn CatalogSource>,
    runtime: Handle,
    tx: UnboundedSender<AppEvent>,
    rng: StdRng,
    last_turn: u64,
    pending: Option<PendingReply>,
}

impl ReplyPolicy {
    pub fn new(
        config: &WidgetConfig,
        catalog: Arc<dyn CatalogSource>,
        runtime: Handle,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            trigger_phrase: config.trigger_phrase.trim().to_lowercase(),
            reply_delay: config.reply_delay,
            recommendation_count: config.recommendation_count,
            catalog,
            runtime,
            tx,
            rng: StdRng::from_os_rng(),
            last_turn: 0,
            pending: None,
        }
    }

    /// Replaces the random source used for sampling and canned replies.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Case-insensitive exact match against the trimmed input.
    pub fn is_trigger(&self, input: &str) -> bool {
        input.trim().to_lowercase() == self.trigger_phrase
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records the user's message and schedules the assistant's answer.
    ///
    /// Any reply still pending from an earlier turn is cancelled first.
    pub fn submit(&mut self, store: &mut ConversationStore, input: &str) -> SubmitOutcome {
        let text = input.trim();
        let Ok(message) = Message::text(Sender::User, text) else {
            return SubmitOutcome::Ignored;
        };

        store.append(message);
        store.set_composing(true);
        self.cancel();

        self.last_turn += 1;
        let turn = self.last_turn;

        if self.is_trigger(text) {
            info!(turn, "reply: trigger phrase matched, fetching catalog");
            let task = self.spawn_catalog_fetch(turn);
            self.pending = Some(PendingReply { turn, task });
            SubmitOutcome::Recommending
        } else {
            debug!(turn, delay_ms = self.reply_delay.as_millis() as u64, "reply: canned reply scheduled");
            let task = self.spawn_delayed_reply(turn);
            self.pending = Some(PendingReply { turn, task });
            SubmitOutcome::DelayedReply
        }
    }

    /// Applies a background result to the store if it belongs to the
    /// pending turn. Anything else is dropped.
    pub fn handle_event(&mut self, store: &mut ConversationStore, event: AppEvent) {
        let turn = event.turn();
        match &self.pending {
            Some(pending) if pending.turn == turn => {}
            _ => {
                debug!(turn, event = event.name(), "reply: discarding stale event");
                return;
            }
        }
        self.pending = None;

        match self.reply_for(event) {
            Ok(message) => store.append(message),
            Err(err) => warn!(turn, error = %err, "reply: could not build assistant message"),
        }
        store.set_composing(false);
    }

    /// Aborts the pending reply, if any. Called on supersession and teardown.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
            info!(turn = pending.turn, "reply: pending reply cancelled");
        }
    }

    fn reply_for(&mut self, event: AppEvent) -> Result<Message, MessageError> {
        match event {
            AppEvent::CatalogFetched { items, .. } => self.recommendation_reply(items),
            AppEvent::ReplyDelayElapsed { .. } => {
                let text = CANNED_REPLIES
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(CANNED_REPLIES[0]);
                Message::text(Sender::Assistant, text)
            }
        }
    }

    fn recommendation_reply(&mut self, items: Vec<Item>) -> Result<Message, MessageError> {
        if items.is_empty() {
            return Message::text(Sender::Assistant, FETCH_FAILED_REPLY);
        }

        let picked = sample(&items, self.recommendation_count, &mut self.rng);
        match Message::recommendation(picked) {
            Ok(message) => {
                info!(
                    available = items.len(),
                    picked = message.items().len(),
                    "reply: recommendations ready"
                );
                Ok(message)
            }
            Err(err) => {
                warn!(error = %err, available = items.len(), "reply: no recommendations picked");
                Message::text(Sender::Assistant, NOTHING_PICKED_REPLY)
            }
        }
    }

    fn spawn_catalog_fetch(&self, turn: u64) -> AbortHandle {
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        self.runtime
            .spawn(async move {
                let items = catalog.fetch_items().await;
                let _ = tx.send(AppEvent::CatalogFetched { turn, items });
            })
            .abort_handle()
    }

    fn spawn_delayed_reply(&self, turn: u64) -> AbortHandle {
        let delay = self.reply_delay;
        let tx = self.tx.clone();
        self.runtime
            .spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(AppEvent::ReplyDelayElapsed { turn });
            })
            .abort_handle()
    }
}

impl Drop for ReplyPolicy {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_GREETING;
    use crate::conversation::MessageKind;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use tokio::time::Instant;

    struct FixedCatalog {
        items: Vec<Item>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for FixedCatalog {
        async fn fetch_items(&self) -> Vec<Item> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.items.clone()
        }
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count)
            .map(|index| Item {
                id: format!("item-{index}"),
                name: format!("Item {index}"),
                price: 10.0 + index as f64,
                image_url: format!("https://cdn.example.com/{index}.png"),
                detail_url: format!("https://shop.example.com/{index}"),
            })
            .collect()
    }

    fn setup_with(
        config: WidgetConfig,
        catalog_items: Vec<Item>,
    ) -> (ReplyPolicy, UnboundedReceiver<AppEvent>, Arc<FixedCatalog>) {
        let catalog = Arc::new(FixedCatalog {
            items: catalog_items,
            calls: AtomicUsize::new(0),
        });
        let (tx, rx) = mpsc::unbounded_channel();
        let source: Arc<dyn CatalogSource> = catalog.clone();
        let policy = ReplyPolicy::new(&config, source, Handle::current(), tx)
            .with_rng(StdRng::seed_from_u64(17));
        (policy, rx, catalog)
    }

    fn setup(
        catalog_items: Vec<Item>,
    ) -> (ReplyPolicy, UnboundedReceiver<AppEvent>, Arc<FixedCatalog>) {
        setup_with(WidgetConfig::default(), catalog_items)
    }

    fn assistant_texts(store: &ConversationStore) -> Vec<String> {
        store
            .messages()
            .iter()
            .skip(1)
            .filter(|message| message.sender() == Sender::Assistant)
            .filter_map(|message| message.text_content().map(str::to_string))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn plain_text_gets_one_canned_reply_after_delay() {
        let (mut policy, mut rx, catalog) = setup(items(5));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);
        let started = Instant::now();

        assert_eq!(policy.submit(&mut store, "  hello  "), SubmitOutcome::DelayedReply);
        assert_eq!(store.len(), 2);
        let user = store.last().expect("user message should exist");
        assert_eq!(user.sender(), Sender::User);
        assert_eq!(user.text_content(), Some("hello"));
        assert!(store.is_composing());

        let early = tokio::time::timeout(Duration::from_millis(2900), rx.recv()).await;
        assert!(early.is_err(), "reply must not arrive before the delay");
        assert!(store.is_composing());

        let event = rx.recv().await.expect("reply event should arrive");
        assert!(started.elapsed() >= Duration::from_millis(3000));
        policy.handle_event(&mut store, event);

        assert_eq!(store.len(), 3);
        let reply = store.last().expect("reply should exist");
        assert_eq!(reply.sender(), Sender::Assistant);
        assert_eq!(reply.kind(), MessageKind::Text);
        assert!(CANNED_REPLIES.contains(&reply.text_content().unwrap_or_default()));
        assert!(!store.is_composing());
        assert!(!policy.has_pending());
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_is_a_no_op() {
        let (mut policy, mut rx, _) = setup(items(5));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        assert_eq!(policy.submit(&mut store, " \t  "), SubmitOutcome::Ignored);
        assert_eq!(policy.submit(&mut store, ""), SubmitOutcome::Ignored);
        assert_eq!(store.len(), 1);
        assert!(!store.is_composing());
        assert!(!policy.has_pending());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_phrase_is_case_insensitive_and_trimmed() {
        let (policy, _rx, _) = setup(Vec::new());
        assert!(policy.is_trigger("i want product recommendations"));
        assert!(policy.is_trigger("I WANT PRODUCT RECOMMENDATIONS"));
        assert!(policy.is_trigger("   I Want Product Recommendations  "));
        assert!(!policy.is_trigger("i want product recommendations!"));
        assert!(!policy.is_trigger("i want product recommendation"));
        assert!(!policy.is_trigger("please, i want product recommendations"));
    }

    #[tokio::test(start_paused = true)]
    async fn near_miss_falls_through_to_canned_reply() {
        let (mut policy, mut rx, catalog) = setup(items(5));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        assert_eq!(
            policy.submit(&mut store, "I want product recommendations please"),
            SubmitOutcome::DelayedReply
        );
        let event = rx.recv().await.expect("reply event should arrive");
        assert!(matches!(event, AppEvent::ReplyDelayElapsed { .. }));
        policy.handle_event(&mut store, event);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.last().map(Message::kind), Some(MessageKind::Text));
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_with_five_items_recommends_three_distinct() {
        let source = items(5);
        let (mut policy, mut rx, catalog) = setup(source.clone());
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);
        assert_eq!(store.len(), 1);
        assert_eq!(store.messages()[0].kind(), MessageKind::Text);

        assert_eq!(
            policy.submit(&mut store, "I WANT PRODUCT RECOMMENDATIONS"),
            SubmitOutcome::Recommending
        );
        assert_eq!(store.len(), 2);
        assert!(store.is_composing());

        let started = Instant::now();
        let event = rx.recv().await.expect("catalog event should arrive");
        assert!(started.elapsed() < Duration::from_millis(3000));
        policy.handle_event(&mut store, event);

        assert_eq!(store.len(), 3);
        let message = store.last().expect("recommendation should exist");
        assert_eq!(message.kind(), MessageKind::Recommendation);
        assert!(message.text_content().is_none());
        assert_eq!(message.items().len(), 3);
        let ids: HashSet<_> = message.items().iter().map(|item| item.id.clone()).collect();
        assert_eq!(ids.len(), 3);
        assert!(message.items().iter().all(|item| source.contains(item)));
        assert!(!store.is_composing());
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn small_catalog_recommends_everything_it_has() {
        let (mut policy, mut rx, _) = setup(items(2));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        policy.submit(&mut store, "i want product recommendations");
        let event = rx.recv().await.expect("catalog event should arrive");
        policy.handle_event(&mut store, event);

        let message = store.last().expect("recommendation should exist");
        assert_eq!(message.kind(), MessageKind::Recommendation);
        assert_eq!(message.items().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_catalog_falls_back_to_fetch_failed_text() {
        let (mut policy, mut rx, _) = setup(Vec::new());
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        policy.submit(&mut store, "i want product recommendations");
        let event = rx.recv().await.expect("catalog event should arrive");
        policy.handle_event(&mut store, event);

        assert_eq!(assistant_texts(&store), vec![FETCH_FAILED_REPLY.to_string()]);
        assert!(!store.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_pick_falls_back_to_nothing_picked_text() {
        let config = WidgetConfig {
            recommendation_count: 0,
            ..WidgetConfig::default()
        };
        let (mut policy, mut rx, _) = setup_with(config, items(4));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        policy.submit(&mut store, "i want product recommendations");
        let event = rx.recv().await.expect("catalog event should arrive");
        policy.handle_event(&mut store, event);

        assert_eq!(assistant_texts(&store), vec![NOTHING_PICKED_REPLY.to_string()]);
        assert!(!store.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_prevents_pending_reply() {
        let (mut policy, mut rx, _) = setup(items(5));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        policy.submit(&mut store, "hello");
        drop(policy);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_cancel_prevents_pending_reply() {
        let (mut policy, mut rx, _) = setup(items(5));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        policy.submit(&mut store, "hello");
        policy.cancel();
        assert!(!policy.has_pending());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn second_submission_supersedes_first_timer() {
        let (mut policy, mut rx, _) = setup(items(5));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        policy.submit(&mut store, "first");
        tokio::time::sleep(Duration::from_millis(1500)).await;
        policy.submit(&mut store, "second");

        let event = rx.recv().await.expect("second reply should arrive");
        assert_eq!(event.turn(), 2);
        policy.handle_event(&mut store, event);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(store.len(), 4);
        assert_eq!(assistant_texts(&store).len(), 1);
        assert!(!store.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_event_from_superseded_turn_is_discarded() {
        let (mut policy, _rx, _) = setup(items(5));
        let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);

        policy.submit(&mut store, "first");
        policy.submit(&mut store, "second");
        policy.handle_event(&mut store, AppEvent::ReplyDelayElapsed { turn: 1 });

        assert_eq!(store.len(), 3);
        assert!(store.is_composing());
        assert!(policy.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn same_seed_picks_same_canned_reply() {
        let mut replies = Vec::new();
        for _ in 0..2 {
            let (mut policy, mut rx, _) = setup(Vec::new());
            let mut store = ConversationStore::with_greeting(DEFAULT_GREETING);
            policy.submit(&mut store, "hello");
            let event = rx.recv().await.expect("reply event should arrive");
            policy.handle_event(&mut store, event);
            replies.push(assistant_texts(&store));
        }
        assert_eq!(replies[0], replies[1]);
    }
}
