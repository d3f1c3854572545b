//! Bilingual (English/Hebrew) UI strings and date names

use serde::{Deserialize, Serialize};

/// Display language selected per request or per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hebrew,
}

impl Language {
    /// Parse a language tag from a query parameter ("en"/"he", long forms
    /// accepted). Unknown tags fall back to English.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.to_lowercase().as_str() {
            "he" | "heb" | "hebrew" | "עברית" => Language::Hebrew,
            _ => Language::English,
        }
    }

    /// Short tag used in API responses
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hebrew => "he",
        }
    }
}

/// Translate a UI string key. Unknown keys pass through unchanged so a
/// missing entry degrades to the English key text.
#[must_use]
pub fn translate(lang: Language, key: &str) -> &str {
    let (en, he) = match key {
        // General terms
        "city" => ("City", "עיר"),
        "date" => ("Date", "תאריך"),
        "temperature" => ("Temperature", "טמפרטורה"),
        "humidity" => ("Humidity", "לחות"),
        "wind" => ("Wind", "רוח"),
        "conditions" => ("Conditions", "תנאים"),
        "celsius" => ("Celsius", "צלזיוס"),
        "fahrenheit" => ("Fahrenheit", "פרנהייט"),
        "error_fetching_weather" => (
            "Error fetching weather data",
            "שגיאה בטעינת נתוני מזג האוויר",
        ),
        "temperature_unit" => ("Temperature Unit", "יחידת טמפרטורה"),

        // Dashboard
        "multi_city_comparison" => (
            "Multi-City Weather Comparison",
            "השוואת מזג אוויר בין ערים",
        ),
        "select_cities_to_compare" => ("Select Cities to Compare", "בחר ערים להשוואה"),
        "add_city_to_compare" => ("Add a city to compare", "הוסף עיר להשוואה"),
        "add_city" => ("Add City", "הוסף עיר"),
        "selected_cities" => ("Selected Cities", "ערים נבחרות"),
        "current_weather_comparison" => (
            "Current Weather Comparison",
            "השוואת מזג אוויר נוכחי",
        ),
        "temperature_comparison" => ("Temperature Comparison", "השוואת טמפרטורות"),
        "humidity_comparison" => ("Humidity Comparison", "השוואת לחות"),
        "five_day_temperature_forecast" => (
            "5-Day Temperature Forecast",
            "תחזית טמפרטורות לחמישה ימים",
        ),
        "five_day_humidity_forecast" => (
            "5-Day Humidity Forecast",
            "תחזית לחות לחמישה ימים",
        ),

        // Single-city view
        "five_day_forecast" => ("5-Day Forecast", "תחזית לחמישה ימים"),
        "daily_details" => ("Daily Details", "פירוט יומי"),
        "temperature_trend" => ("Temperature Trend", "מגמת טמפרטורה"),
        "real_time_wind" => ("Real-Time Wind Map", "מפת רוחות בזמן אמת"),
        "favorite_cities" => ("Favorite Cities", "ערים מועדפות"),
        "search_city" => ("Search City", "חיפוש עיר"),
        "no_matching_cities" => ("No matching cities found", "לא נמצאו ערים מתאימות"),

        _ => return key,
    };

    match lang {
        Language::English => en,
        Language::Hebrew => he,
    }
}

/// Localized weekday name (`Weekday::num_days_from_sunday` ordering)
#[must_use]
pub fn weekday_name(lang: Language, weekday: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match (lang, weekday) {
        (Language::English, Sun) => "Sunday",
        (Language::English, Mon) => "Monday",
        (Language::English, Tue) => "Tuesday",
        (Language::English, Wed) => "Wednesday",
        (Language::English, Thu) => "Thursday",
        (Language::English, Fri) => "Friday",
        (Language::English, Sat) => "Saturday",
        (Language::Hebrew, Sun) => "יום ראשון",
        (Language::Hebrew, Mon) => "יום שני",
        (Language::Hebrew, Tue) => "יום שלישי",
        (Language::Hebrew, Wed) => "יום רביעי",
        (Language::Hebrew, Thu) => "יום חמישי",
        (Language::Hebrew, Fri) => "יום שישי",
        (Language::Hebrew, Sat) => "יום שבת",
    }
}

/// Localized month name for a 1-based month number. Out-of-range numbers
/// return an empty string.
#[must_use]
pub fn month_name(lang: Language, month: u32) -> &'static str {
    const ENGLISH: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    const HEBREW: [&str; 12] = [
        "ינואר",
        "פברואר",
        "מרץ",
        "אפריל",
        "מאי",
        "יוני",
        "יולי",
        "אוגוסט",
        "ספטמבר",
        "אוקטובר",
        "נובמבר",
        "דצמבר",
    ];

    let Some(index) = (month as usize).checked_sub(1) else {
        return "";
    };
    match lang {
        Language::English => ENGLISH.get(index).copied().unwrap_or(""),
        Language::Hebrew => HEBREW.get(index).copied().unwrap_or(""),
    }
}
