use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// National Weather Service API Models
// ============================================================================
//
// Every field is optional: upstream documents routinely omit values, and a
// missing field is rendered with a placeholder rather than failing the decode.
// Display fields also tolerate unexpected JSON types, so one odd value cannot
// sink a whole alert list or forecast.

/// Strings pass through, other scalars become their text, anything else is absent
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Numbers and numeric strings become a value, anything else is absent
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Response of `/points/{lat},{lon}`
#[derive(Debug, Default, Deserialize)]
pub struct PointsResponse {
    pub properties: Option<PointsProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsProperties {
    /// Forecast URL for the grid cell covering the point
    pub forecast: Option<String>,
}

impl PointsResponse {
    /// The forecast URL, if the lookup carried a usable one
    pub fn forecast_url(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.forecast.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Response of the forecast URL handed out by the points endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    pub properties: Option<ForecastProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    pub periods: Option<Vec<ForecastPeriod>>,
}

impl ForecastResponse {
    /// Forecast periods in upstream order; empty when the field is missing
    pub fn periods(&self) -> &[ForecastPeriod] {
        self.properties
            .as_ref()
            .and_then(|p| p.periods.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastPeriod {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(rename = "temperatureUnit", default, deserialize_with = "lenient_text")]
    pub temperature_unit: Option<String>,
    #[serde(rename = "windSpeed", default, deserialize_with = "lenient_text")]
    pub wind_speed: Option<String>,
    #[serde(rename = "windDirection", default, deserialize_with = "lenient_text")]
    pub wind_direction: Option<String>,
    #[serde(rename = "shortForecast", default, deserialize_with = "lenient_text")]
    pub short_forecast: Option<String>,
}

/// Response of `/alerts?area={state}`
#[derive(Debug, Default, Deserialize)]
pub struct AlertResponse {
    pub features: Option<Vec<AlertFeature>>,
}

impl AlertResponse {
    /// Alert features in upstream order; empty when the field is missing
    pub fn features(&self) -> &[AlertFeature] {
        self.features.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    pub properties: Option<AlertProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertProperties {
    #[serde(default, deserialize_with = "lenient_text")]
    pub event: Option<String>,
    #[serde(rename = "areaDesc", default, deserialize_with = "lenient_text")]
    pub area_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub headline: Option<String>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    /// Two-letter state code (e.g. CA, NY)
    #[schemars(length(min = 2, max = 2))]
    pub state: String,
}

impl GetAlertsRequest {
    /// Uppercased state code, or a reason the argument is unusable
    pub fn state_code(&self) -> Result<String, String> {
        if self.state.chars().count() != 2 {
            return Err(format!(
                "state must be a two-letter code, got '{}'",
                self.state
            ));
        }
        Ok(self.state.to_uppercase())
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    /// Latitude of the location
    #[schemars(range(min = -90, max = 90))]
    pub latitude: f64,
    /// Longitude of the location
    #[schemars(range(min = -180, max = 180))]
    pub longitude: f64,
}

/// A latitude/longitude pair known to be in range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GetForecastRequest {
    pub fn coordinate(&self) -> Result<GeoCoordinate, String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "latitude must be between -90 and 90, got {}",
                self.latitude
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "longitude must be between -180 and 180, got {}",
                self.longitude
            ));
        }
        Ok(GeoCoordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CreateStudioRequest {
    /// Name of the studio to be created.
    pub name: String,
    /// Description of the studio's purpose.
    pub purpose: String,
    /// The full directory path where the studio will be created.
    pub directory: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn points_without_forecast_has_no_url() {
        let points: PointsResponse = serde_json::from_value(json!({ "properties": {} })).unwrap();
        assert_eq!(points.forecast_url(), None);

        let points: PointsResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(points.forecast_url(), None);

        let points: PointsResponse =
            serde_json::from_value(json!({ "properties": { "forecast": "" } })).unwrap();
        assert_eq!(points.forecast_url(), None);
    }

    #[test]
    fn points_forecast_url_is_kept_verbatim() {
        let points: PointsResponse = serde_json::from_value(json!({
            "properties": {
                "gridId": "LWX",
                "forecast": "https://api.weather.gov/gridpoints/LWX/97,71/forecast"
            }
        }))
        .unwrap();
        assert_eq!(
            points.forecast_url(),
            Some("https://api.weather.gov/gridpoints/LWX/97,71/forecast")
        );
    }

    #[test]
    fn missing_lists_decode_as_empty() {
        let forecast: ForecastResponse = serde_json::from_value(json!({ "properties": {} })).unwrap();
        assert!(forecast.periods().is_empty());

        let forecast: ForecastResponse =
            serde_json::from_value(json!({ "properties": { "periods": null } })).unwrap();
        assert!(forecast.periods().is_empty());

        let alerts: AlertResponse = serde_json::from_value(json!({ "type": "FeatureCollection" })).unwrap();
        assert!(alerts.features().is_empty());
    }

    #[test]
    fn period_with_partial_fields_decodes() {
        let forecast: ForecastResponse = serde_json::from_value(json!({
            "properties": { "periods": [ { "name": "Tonight", "temperature": 60 }, {} ] }
        }))
        .unwrap();

        let periods = forecast.periods();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].name.as_deref(), Some("Tonight"));
        assert_eq!(periods[0].temperature, Some(60.0));
        assert!(periods[1].name.is_none());
    }

    #[test]
    fn odd_alert_field_types_do_not_sink_the_list() {
        let alerts: AlertResponse = serde_json::from_value(json!({
            "features": [
                { "properties": { "event": "Heat Advisory" } },
                { "properties": { "event": "Flood", "severity": 3, "status": true, "headline": ["a"] } }
            ]
        }))
        .unwrap();

        let features = alerts.features();
        assert_eq!(features.len(), 2);
        assert_eq!(
            features[0].properties.as_ref().unwrap().event.as_deref(),
            Some("Heat Advisory")
        );
        let flood = features[1].properties.as_ref().unwrap();
        assert_eq!(flood.event.as_deref(), Some("Flood"));
        assert_eq!(flood.severity.as_deref(), Some("3"));
        assert_eq!(flood.status.as_deref(), Some("true"));
        assert!(flood.headline.is_none());
    }

    #[test]
    fn odd_period_field_types_do_not_sink_the_forecast() {
        let forecast: ForecastResponse = serde_json::from_value(json!({
            "properties": { "periods": [
                { "name": "Today", "temperature": { "value": 21 }, "windDirection": null },
                { "name": 7, "temperature": "58", "windDirection": 270 },
                { "name": "Tonight", "temperature": 60 }
            ] }
        }))
        .unwrap();

        let periods = forecast.periods();
        assert_eq!(periods.len(), 3);
        assert!(periods[0].temperature.is_none());
        assert!(periods[0].wind_direction.is_none());
        assert_eq!(periods[1].name.as_deref(), Some("7"));
        assert_eq!(periods[1].temperature, Some(58.0));
        assert_eq!(periods[1].wind_direction.as_deref(), Some("270"));
        assert_eq!(periods[2].temperature, Some(60.0));
    }

    #[test]
    fn coordinate_bounds_are_inclusive() {
        let ok = GetForecastRequest { latitude: -90.0, longitude: 180.0 };
        assert!(ok.coordinate().is_ok());

        let high = GetForecastRequest { latitude: 90.5, longitude: 0.0 };
        assert!(high.coordinate().unwrap_err().contains("latitude"));

        let west = GetForecastRequest { latitude: 0.0, longitude: -180.01 };
        assert!(west.coordinate().unwrap_err().contains("longitude"));

        let nan = GetForecastRequest { latitude: f64::NAN, longitude: 0.0 };
        assert!(nan.coordinate().is_err());
    }

    #[test]
    fn state_code_is_uppercased_and_length_checked() {
        let req = GetAlertsRequest { state: "ca".into() };
        assert_eq!(req.state_code().unwrap(), "CA");

        let req = GetAlertsRequest { state: "CAL".into() };
        assert!(req.state_code().is_err());

        let req = GetAlertsRequest { state: String::new() };
        assert!(req.state_code().is_err());
    }
}
