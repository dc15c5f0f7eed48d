use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// A point on the sphere, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("geocoder returned no match")]
    NoMatch,

    #[error("geocoder response malformed")]
    MalformedResponse,
}

/// External free-text location resolver. Implementations must bound
/// every lookup with a timeout; the engine absorbs failures rather
/// than propagating them.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<Coordinates, GeocodeError>;
}

/// Client for a Nominatim-style search endpoint
/// (`GET {base}/search?q=..&format=json&limit=1`).
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGeocoder {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("zacline/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn lookup(&self, query: &str) -> Result<Coordinates, GeocodeError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let places: Vec<Place> = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = places.into_iter().next().ok_or(GeocodeError::NoMatch)?;
        let lat = place
            .lat
            .parse()
            .map_err(|_| GeocodeError::MalformedResponse)?;
        let lon = place
            .lon
            .parse()
            .map_err(|_| GeocodeError::MalformedResponse)?;
        Ok(Coordinates { lat, lon })
    }
}
