//! Core record types for spangapp.
//!
//! This module defines the typed view of the radar's `iteration` table, the
//! one dataset the transform layer computes over. The remaining tables are
//! opaque and flow through [`crate::dataset::Table`] untyped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The detection status recorded with an iteration.
///
/// The radar firmware writes free-form status strings; the only value this
/// pipeline gives meaning to is `PlateDetected`. Everything else is carried
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IterationStatus {
    /// A license plate was detected during this sample.
    PlateDetected,
    /// Any other status string, preserved as written.
    Other(String),
}

impl IterationStatus {
    /// The literal the radar writes for a plate detection.
    pub const PLATE_DETECTED: &'static str = "PlateDetected";

    /// Parse a status string as written by the radar.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == Self::PLATE_DETECTED {
            Self::PlateDetected
        } else {
            Self::Other(value.to_string())
        }
    }

    /// The status string as written by the radar.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PlateDetected => Self::PLATE_DETECTED,
            Self::Other(value) => value,
        }
    }

    /// Check whether this status marks a plate detection.
    #[must_use]
    pub fn is_plate_detected(&self) -> bool {
        matches!(self, Self::PlateDetected)
    }
}

impl From<String> for IterationStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<IterationStatus> for String {
    fn from(status: IterationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for IterationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// One sensor sample within a travel.
///
/// Each row of the `iteration` table is one timestamped radar reading:
/// where the vehicle was, how far it moved since the previous sample, how
/// fast it was going, and whether a plate was detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    /// Identifier of the travel this sample belongs to.
    pub travel_id: i64,
    /// When this sample was taken.
    pub timestamp: DateTime<Utc>,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Distance covered since the previous sample (summable increments).
    pub distance: f64,
    /// Vehicle speed at this sample.
    pub speed: f64,
    /// Detection status recorded by the radar.
    pub status: IterationStatus,
}

impl Iteration {
    /// The position of this sample.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Check whether a plate was detected during this sample.
    #[must_use]
    pub fn has_plate_detection(&self) -> bool {
        self.status.is_plate_detected()
    }
}
