use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use zacline_shared::Amount;

use crate::engine::PricingEngine;

/// Runs quotes as cancellable background tasks, one in flight per
/// pickup/dropoff pair. A newer request for the same pair aborts the
/// older task before its debounce window elapses; superseded lookups
/// are discarded, not queued. The receiver resolves with the quote, or
/// errors if the request was superseded.
pub struct QuoteDebouncer {
    engine: Arc<PricingEngine>,
    window: Duration,
    inflight: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl QuoteDebouncer {
    pub fn new(engine: Arc<PricingEngine>, window: Duration) -> Self {
        Self {
            engine,
            window,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    fn key(pickup: &str, dropoff: &str) -> String {
        format!(
            "{}|{}",
            pickup.trim().to_lowercase(),
            dropoff.trim().to_lowercase()
        )
    }

    pub fn request(&self, pickup: &str, dropoff: &str) -> oneshot::Receiver<Option<Amount>> {
        let (tx, rx) = oneshot::channel();
        let key = Self::key(pickup, dropoff);
        let engine = Arc::clone(&self.engine);
        let window = self.window;
        let pickup = pickup.to_string();
        let dropoff = dropoff.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let quote = engine.quote(&pickup, &dropoff).await;
            let _ = tx.send(quote);
        });

        let mut inflight = self.inflight.lock().expect("inflight lock poisoned");
        if let Some(previous) = inflight.insert(key, handle) {
            previous.abort();
        }
        rx
    }
}
