use serde::{Deserialize, Serialize};

/// Current conditions for one city, as reported by the provider.
///
/// Values are passed through in the provider's units. A record is only ever
/// built from a response that carried every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_name: String,
    pub country: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub condition_text: String,
    /// Relative humidity, 0-100.
    pub humidity: f64,
    pub wind_kph: f64,
    /// Compass abbreviation, e.g. "NW".
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub vis_km: f64,
    pub uv_index: f64,
}

impl WeatherRecord {
    /// Header line drawn at the top of the dashboard.
    pub fn title(&self) -> String {
        format!(
            "Current Weather Dashboard for {}, {}",
            self.location_name, self.country
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> WeatherRecord {
    WeatherRecord {
        location_name: "Paris".into(),
        country: "France".into(),
        temp_c: 18.0,
        temp_f: 64.4,
        feelslike_c: 17.0,
        feelslike_f: 62.6,
        condition_text: "Cloudy".into(),
        humidity: 70.0,
        wind_kph: 12.5,
        wind_dir: "NW".into(),
        pressure_mb: 1012.0,
        vis_km: 10.0,
        uv_index: 3.0,
    }
}
