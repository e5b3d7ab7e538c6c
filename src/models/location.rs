use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair captured when a shift starts or ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "{latitude},{longitude}"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Both halves present and non-zero, as the gateway stores "no fix" as 0.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some(Self {
                latitude: lat,
                longitude: lng,
            }),
            _ => None,
        }
    }

    /// Parse `"lat,lng"` as typed on the command line.
    pub fn parse(s: &str) -> AppResult<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| AppError::InvalidCoordinates(s.to_string()))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinates(s.to_string()))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinates(s.to_string()))?;
        Self::new(lat, lng)
    }

    pub fn map_link(&self) -> String {
        format!(
            "https://www.google.com/maps/@{},{},16z",
            self.latitude, self.longitude
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}
