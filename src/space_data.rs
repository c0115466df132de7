//! NASA open-data client
//!
//! Read-only GET endpoints behind a pluggable [`Transport`]. Every failure
//! (transport, HTTP status, JSON decode) degrades to an empty value; callers
//! never see an error.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const BASE_URL: &str = "https://api.nasa.gov";
pub const API_KEY_ENV: &str = "NASA_API_KEY";
pub const DEMO_KEY: &str = "DEMO_KEY";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("network unavailable")]
    Offline,

    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Blocking GET returning the response body
pub trait Transport {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, TransportError>;
}

/// Transport for headless runs; every request fails
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn get(&self, _url: &str, _timeout: Duration) -> Result<String, TransportError> {
        Err(TransportError::Offline)
    }
}

/// Astronomy Picture of the Day
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Apod {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoverCamera {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoverPhoto {
    pub id: u64,
    pub sol: u32,
    pub img_src: String,
    pub earth_date: String,
    pub camera: RoverCamera,
}

#[derive(Deserialize)]
struct RoverPhotos {
    #[serde(default)]
    photos: Vec<RoverPhoto>,
}

/// EPIC full-disc Earth image metadata
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpicImage {
    pub identifier: String,
    pub image: String,
    pub date: String,
    #[serde(default)]
    pub caption: String,
}

/// DONKI coronal mass ejection record
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoronalMassEjection {
    #[serde(rename = "activityID")]
    pub activity_id: String,
    pub start_time: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearEarthObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
}

#[derive(Deserialize)]
struct NeoFeed {
    #[serde(default)]
    near_earth_objects: HashMap<String, Vec<NearEarthObject>>,
}

pub struct SpaceDataClient<T: Transport> {
    transport: T,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl SpaceDataClient<OfflineTransport> {
    pub fn offline() -> Self {
        Self::new(OfflineTransport, DEMO_KEY)
    }
}

impl<T: Transport> SpaceDataClient<T> {
    pub fn new(transport: T, api_key: impl Into<String>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// API key from `NASA_API_KEY`, falling back to the shared demo key
    pub fn from_env(transport: T) -> Self {
        let key = std::env::var(API_KEY_ENV).unwrap_or_else(|_| DEMO_KEY.to_string());
        Self::new(transport, key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, path, self.api_key);
        for (key, value) in query {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    fn fetch<D: DeserializeOwned>(&self, url: &str) -> Result<D, TransportError> {
        let body = self.transport.get(url, self.timeout)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn fetch_or<D: DeserializeOwned>(&self, what: &str, url: String, fallback: D) -> D {
        match self.fetch(&url) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("{what} unavailable: {e}");
                fallback
            }
        }
    }

    pub fn apod(&self) -> Option<Apod> {
        let url = self.url("/planetary/apod", &[]);
        self.fetch_or("Picture of the day", url, None)
    }

    pub fn mars_photos(&self, rover: &str, sol: u32, camera: &str) -> Vec<RoverPhoto> {
        let url = self.url(
            &format!("/mars-photos/api/v1/rovers/{rover}/photos"),
            &[("sol", sol.to_string()), ("camera", camera.to_string())],
        );
        self.fetch_or("Rover photos", url, RoverPhotos { photos: Vec::new() })
            .photos
    }

    pub fn earth_imagery(&self, date: &str) -> Vec<EpicImage> {
        let url = self.url(&format!("/EPIC/api/natural/date/{date}"), &[]);
        self.fetch_or("Earth imagery", url, Vec::new())
    }

    pub fn space_weather(&self, start_date: &str, end_date: &str) -> Vec<CoronalMassEjection> {
        let url = self.url(
            "/DONKI/CME",
            &[
                ("startDate", start_date.to_string()),
                ("endDate", end_date.to_string()),
            ],
        );
        self.fetch_or("Space weather", url, Vec::new())
    }

    /// Objects keyed by close-approach date
    pub fn near_earth_objects(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> HashMap<String, Vec<NearEarthObject>> {
        let url = self.url(
            "/neo/rest/v1/feed",
            &[
                ("start_date", start_date.to_string()),
                ("end_date", end_date.to_string()),
            ],
        );
        self.fetch_or(
            "Near-Earth objects",
            url,
            NeoFeed {
                near_earth_objects: HashMap::new(),
            },
        )
        .near_earth_objects
    }

    /// Raw InSight report keyed by sol
    pub fn mars_weather(&self) -> HashMap<String, serde_json::Value> {
        let url = self.url(
            "/insight_weather/",
            &[("feedtype", "json".to_string()), ("ver", "1.0".to_string())],
        );
        self.fetch_or("Mars weather", url, HashMap::new())
    }
}
