//! Core domain types for the climate robotics catalog.

use serde::{Deserialize, Serialize};

use crate::error::ClimateMapError;

/// Robotics-type category used when the sheet leaves the column blank.
pub const DEFAULT_ROBOTICS_TYPE: &str = "Other";

/// Prefix of the textual form of an [`EntryId`].
const ENTRY_ID_PREFIX: &str = "entry-";

// ---------------------------------------------------------------------------
// EntryId
// ---------------------------------------------------------------------------

/// Row-position identifier. Stable only within a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EntryId(pub usize);

impl EntryId {
    /// Identifier for the data row at `index` (0-based, header excluded).
    pub fn from_row(index: usize) -> Self {
        Self(index)
    }

    /// The row index this identifier was derived from.
    pub fn row_index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{ENTRY_ID_PREFIX}{}", self.0)
    }
}

impl std::str::FromStr for EntryId {
    type Err = ClimateMapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.strip_prefix(ENTRY_ID_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| ClimateMapError::parse(format!("invalid entry id: {s}")))
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EntryId {
    type Error = ClimateMapError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// Approximate map position, serialized as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.latitude, c.longitude]
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One normalized organization record in the catalog.
///
/// Only built for rows with a real name and a resolvable headquarters country,
/// so `coordinates` is always populated on entries produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub website: String,
    pub is_robotics: bool,
    pub is_deployed: bool,
    /// Founding year; absent when the cell is blank or not numeric.
    pub founded: Option<i32>,
    pub country_hq: String,
    pub continent_hq: String,
    /// Never contains empty strings.
    pub deployment_countries: Vec<String>,
    /// Category such as "Aerial Robot"; [`DEFAULT_ROBOTICS_TYPE`] when unspecified.
    pub robotics_type: String,
    pub main_application: String,
    pub additional_application: String,
    pub adaptation_mitigation: String,
    pub biome_type: String,
    /// One-sentence description of what the solution does.
    pub description: String,
    pub linked_in: String,
    pub coordinates: Option<Coordinates>,
    /// Absolute icon-service URL, or absent when the website is unusable.
    pub logo_url: Option<String>,
}
