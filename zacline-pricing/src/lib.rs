pub mod debounce;
pub mod engine;
pub mod geocode;

pub use debounce::QuoteDebouncer;
pub use engine::{haversine_km, PricingConfig, PricingEngine, EARTH_RADIUS_KM};
pub use geocode::{Coordinates, GeocodeError, Geocoder, HttpGeocoder};
