use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use zacline_core::access::{AccessControl, BindPolicy};
use zacline_escrow::OrderLedger;
use zacline_pricing::{HttpGeocoder, PricingConfig, PricingEngine, QuoteDebouncer};
use zacline_shared::Identity;
use zacline_tracking::ShipmentRegistry;

use crate::app_config::Config;
use crate::state::AppState;

const ORDER_EVENT_CAPACITY: usize = 100;

/// Build the component graph from configuration: access control seeded
/// with the configured admins, the registry, the ledger bound to the
/// registry under the owner, and the pricing engine.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let bind_policy = BindPolicy::parse(&config.access.bind_policy)
        .with_context(|| format!("invalid bind_policy: {}", config.access.bind_policy))?;

    let owner = Identity::from(config.access.owner.clone());
    anyhow::ensure!(owner.is_plausible(), "invalid owner identity");

    // The owner also operates as an admin, alongside the configured list.
    let mut admins = vec![owner.clone()];
    for raw in &config.access.initial_admins {
        let admin = Identity::from(raw.clone());
        anyhow::ensure!(admin.is_plausible(), "invalid admin identity: {raw:?}");
        admins.push(admin);
    }
    tracing::info!(admins = admins.len(), "seeding admin allowlist");

    let access = Arc::new(AccessControl::new(owner.clone(), admins, bind_policy));
    let registry = Arc::new(ShipmentRegistry::new(access.clone()));
    let ledger = Arc::new(OrderLedger::new(access.clone(), ORDER_EVENT_CAPACITY));
    ledger
        .bind_shipment_registry(&owner, registry.clone())
        .context("binding shipment registry")?;

    let geocoder = Arc::new(
        HttpGeocoder::new(
            config.pricing.geocoder_url.clone(),
            Duration::from_millis(config.pricing.geocode_timeout_ms),
        )
        .context("building geocoder client")?,
    );
    let pricing = Arc::new(PricingEngine::new(
        geocoder,
        PricingConfig {
            rate_per_km_cents: config.pricing.rate_per_km_cents,
        },
    ));
    let quotes = Arc::new(QuoteDebouncer::new(
        pricing,
        Duration::from_millis(config.pricing.quote_debounce_ms),
    ));

    Ok(AppState {
        access,
        ledger,
        registry,
        quotes,
    })
}
