//! Static reference table of Israeli cities
//!
//! Loaded once at process start and immutable for the process lifetime.
//! The Hebrew spellings and the set of entries follow the translation
//! table the dashboard ships with; the flagged major cities are the ones
//! shown on the default wind-overlay map.

use std::sync::LazyLock;

use crate::models::CityRecord;

static CITIES: LazyLock<Vec<CityRecord>> = LazyLock::new(|| {
    // (english, hebrew, lat, lon, major)
    let raw: &[(&str, &str, f64, f64, bool)] = &[
        ("Jerusalem", "ירושלים", 31.7683, 35.2137, true),
        ("Tel Aviv", "תל אביב", 32.0853, 34.7818, true),
        ("Haifa", "חיפה", 32.7940, 34.9896, true),
        ("Rishon LeZion", "ראשון לציון", 31.9730, 34.7925, false),
        ("Petah Tikva", "פתח תקווה", 32.0871, 34.8878, false),
        ("Ashdod", "אשדוד", 31.8044, 34.6448, true),
        ("Netanya", "נתניה", 32.3329, 34.8599, true),
        ("Beer Sheva", "באר שבע", 31.2516, 34.7915, true),
        ("Holon", "חולון", 32.0103, 34.7792, false),
        ("Ramat Gan", "רמת גן", 32.0684, 34.8248, false),
        ("Herzliya", "הרצליה", 32.1624, 34.8447, false),
        ("Rehovot", "רחובות", 31.8928, 34.8113, false),
        ("Bat Yam", "בת ים", 32.0231, 34.7454, false),
        ("Ashkelon", "אשקלון", 31.6688, 34.5743, false),
        ("Kfar Saba", "כפר סבא", 32.1750, 34.9070, false),
        ("Ra'anana", "רעננה", 32.1848, 34.8713, false),
        ("Modiin", "מודיעין", 31.8903, 35.0104, false),
        ("Nahariya", "נהריה", 33.0079, 35.0950, false),
        ("Lod", "לוד", 31.9467, 34.8903, false),
        ("Givatayim", "גבעתיים", 32.0697, 34.8117, false),
        ("Eilat", "אילת", 29.5577, 34.9519, true),
        ("Nazareth", "נצרת", 32.7021, 35.2978, true),
        ("Tiberias", "טבריה", 32.7959, 35.5300, false),
        ("Safed", "צפת", 32.9658, 35.4983, false),
        ("Acre", "עכו", 32.9226, 35.0687, false),
        ("Hadera", "חדרה", 32.4435, 34.9196, false),
    ];

    raw.iter()
        .map(|&(name, hebrew_name, latitude, longitude, major)| CityRecord {
            name: name.to_string(),
            hebrew_name: hebrew_name.to_string(),
            latitude,
            longitude,
            major,
        })
        .collect()
});

/// All cities in the reference table
#[must_use]
pub fn all() -> &'static [CityRecord] {
    &CITIES
}

/// The cities shown on the default overlay map
#[must_use]
pub fn major() -> impl Iterator<Item = &'static CityRecord> {
    CITIES.iter().filter(|c| c.major)
}

/// Look up a city by English or Hebrew name. English matching is
/// case-insensitive; Hebrew matching is exact.
#[must_use]
pub fn find(name: &str) -> Option<&'static CityRecord> {
    let lowered = name.to_lowercase();
    CITIES
        .iter()
        .find(|c| c.name.to_lowercase() == lowered || c.hebrew_name == name)
}

/// Translate a Hebrew city name to its canonical English name
#[must_use]
pub fn hebrew_to_english(name: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|c| c.hebrew_name == name)
        .map(|c| c.name.as_str())
}

/// Translate a canonical English city name to Hebrew
#[must_use]
pub fn english_to_hebrew(name: &str) -> Option<&'static str> {
    CITIES
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.hebrew_name.as_str())
}

/// Resolve the name sent to the upstream provider. Hebrew names map to
/// English via the table; anything else passes through untouched, matching
/// the original dashboard behavior of letting the provider reject unknowns.
#[must_use]
pub fn query_name(city: &str) -> &str {
    hebrew_to_english(city).unwrap_or(city)
}

/// Case-insensitive substring search over English and Hebrew names
#[must_use]
pub fn search(query: &str) -> Vec<&'static CityRecord> {
    let query = query.trim();
    if query.is_empty() {
        return CITIES.iter().collect();
    }
    let lowered = query.to_lowercase();
    CITIES
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&lowered) || c.hebrew_name.contains(query))
        .collect()
}
