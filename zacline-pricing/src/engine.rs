use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use zacline_shared::Amount;

use crate::geocode::{Coordinates, Geocoder};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, haversine formula.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PricingConfig {
    /// Suggested payment per kilometre, in minor units.
    pub rate_per_km_cents: Amount,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rate_per_km_cents: 100,
        }
    }
}

/// Turns a pair of free-text locations into a suggested payment
/// amount. Geocoding results are cached; lookup failures degrade to
/// `None` rather than failing the caller. The quote is advisory only:
/// the ledger accepts any positive amount regardless of what was
/// suggested here.
pub struct PricingEngine {
    geocoder: Arc<dyn Geocoder>,
    config: PricingConfig,
    cache: RwLock<HashMap<String, Coordinates>>,
}

impl PricingEngine {
    pub fn new(geocoder: Arc<dyn Geocoder>, config: PricingConfig) -> Self {
        Self {
            geocoder,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn cache_key(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Resolve free-text to coordinates, consulting the cache first.
    /// Returns `None` when the external lookup fails for any reason.
    pub async fn geocode(&self, text: &str) -> Option<Coordinates> {
        let key = Self::cache_key(text);
        if let Some(hit) = self.cache.read().expect("geocode cache lock poisoned").get(&key) {
            return Some(*hit);
        }

        match self.geocoder.lookup(text.trim()).await {
            Ok(coords) => {
                self.cache
                    .write()
                    .expect("geocode cache lock poisoned")
                    .insert(key, coords);
                Some(coords)
            }
            Err(err) => {
                tracing::warn!(query = %key, error = %err, "geocode unavailable");
                None
            }
        }
    }

    /// Distance between two free-text locations, or `None` when either
    /// end cannot be resolved.
    pub async fn quote_km(&self, pickup: &str, dropoff: &str) -> Option<f64> {
        let a = self.geocode(pickup).await?;
        let b = self.geocode(dropoff).await?;
        Some(haversine_km(a, b).max(0.0))
    }

    /// Suggested payment for a pickup/dropoff pair.
    pub async fn quote(&self, pickup: &str, dropoff: &str) -> Option<Amount> {
        let km = self.quote_km(pickup, dropoff).await?;
        Some((km * self.config.rate_per_km_cents as f64).round() as Amount)
    }
}
