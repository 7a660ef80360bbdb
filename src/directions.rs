//! Directions API adapter for road-following segment geometry.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::haversine::endpoint_drift_m;
use crate::polyline::{self, GeoPath, GeoPoint, PolylineError};
use crate::traits::RoadSnapper;

pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const BASE_URL_ENV: &str = "DIRECTIONS_BASE_URL";

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("GOOGLE_MAPS_API_KEY is not set")]
    MissingApiKey,

    #[error("directions request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("directions API returned status {status}{}", message_suffix(.message.as_deref()))]
    Status {
        status: String,
        message: Option<String>,
    },

    #[error("directions API returned no route")]
    NoRoute,

    #[error("route geometry could not be decoded: {0}")]
    Polyline(#[from] PolylineError),
}

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub mode: String,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            mode: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl DirectionsConfig {
    /// Builds a config from `GOOGLE_MAPS_API_KEY` and, optionally,
    /// `DIRECTIONS_BASE_URL`.
    pub fn from_env() -> Result<Self, DirectionsError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(DirectionsError::MissingApiKey)?;

        let mut config = Self {
            api_key,
            ..Self::default()
        };
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            config.base_url = base_url;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct DirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl DirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DirectionsConfig {
        &self.config
    }

    /// Requests a single route between two points. No retries.
    pub fn route(&self, origin: GeoPoint, destination: GeoPoint) -> Result<GeoPath, DirectionsError> {
        let origin_param = format_coord(origin);
        let destination_param = format_coord(destination);

        debug!(origin = %origin_param, destination = %destination_param, "requesting directions");

        let body = self
            .client
            .get(self.config.base_url.as_str())
            .query(&[
                ("origin", origin_param.as_str()),
                ("destination", destination_param.as_str()),
                ("mode", self.config.mode.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()?
            .json::<DirectionsResponse>()?;

        path_from_response(body)
    }
}

impl RoadSnapper for DirectionsClient {
    fn snap(&self, origin: GeoPoint, destination: GeoPoint) -> GeoPath {
        match self.route(origin, destination) {
            Ok(path) => {
                if let Some((start_m, end_m)) = endpoint_drift_m(&path, origin, destination) {
                    debug!(
                        points = path.len(),
                        start_drift_m = start_m.round(),
                        end_drift_m = end_m.round(),
                        "snapped to road"
                    );
                }
                path
            }
            Err(err) => {
                warn!(error = %err, "directions unavailable, using straight line");
                GeoPath::straight_line(origin, destination)
            }
        }
    }
}

/// Snapper that never leaves the process: every segment is a straight line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl RoadSnapper for StraightLine {
    fn snap(&self, origin: GeoPoint, destination: GeoPoint) -> GeoPath {
        GeoPath::straight_line(origin, destination)
    }
}

fn message_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

fn format_coord(point: GeoPoint) -> String {
    format!("{},{}", point.latitude, point.longitude)
}

/// Extracts the decoded overview geometry of the first route.
pub fn path_from_response(response: DirectionsResponse) -> Result<GeoPath, DirectionsError> {
    if response.status != "OK" {
        return Err(DirectionsError::Status {
            status: response.status,
            message: response.error_message,
        });
    }

    let route = response.routes.into_iter().next().ok_or(DirectionsError::NoRoute)?;
    let path = polyline::decode(&route.overview_polyline.points)?;
    if path.is_empty() {
        return Err(DirectionsError::NoRoute);
    }
    Ok(path)
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    pub overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}
