//! City reference record

use serde::{Deserialize, Serialize};

/// One entry of the static city table: canonical English name, Hebrew name
/// and coordinates. Loaded once at process start and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// Canonical English name used in upstream queries
    pub name: String,
    /// Hebrew display name
    pub hebrew_name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Whether this city appears on the default wind-overlay map
    pub major: bool,
}

impl CityRecord {
    /// Display name in the requested language
    #[must_use]
    pub fn display_name(&self, lang: crate::i18n::Language) -> &str {
        match lang {
            crate::i18n::Language::English => &self.name,
            crate::i18n::Language::Hebrew => &self.hebrew_name,
        }
    }
}
