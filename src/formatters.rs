use crate::models::{AlertFeature, AlertProperties, ForecastPeriod, GeoCoordinate};

const SEPARATOR: &str = "---";
const UNKNOWN: &str = "Unknown";

/// Upstream value, or `fallback` when it is missing or empty
fn or_placeholder<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Formats a single alert feature into a labelled block ending in `---`
pub fn format_alert(feature: &AlertFeature) -> String {
    let empty = AlertProperties::default();
    let props = feature.properties.as_ref().unwrap_or(&empty);

    let fields = [
        ("Event", props.event.as_deref(), UNKNOWN),
        ("Area", props.area_desc.as_deref(), UNKNOWN),
        ("Severity", props.severity.as_deref(), UNKNOWN),
        ("Status", props.status.as_deref(), UNKNOWN),
        ("Headline", props.headline.as_deref(), "No headline"),
    ];

    let mut lines: Vec<String> = fields
        .into_iter()
        .map(|(label, value, fallback)| format!("{}: {}", label, or_placeholder(value, fallback)))
        .collect();
    lines.push(SEPARATOR.to_string());
    lines.join("\n")
}

/// Formats a single forecast period into a block ending in `---`
pub fn format_period(period: &ForecastPeriod) -> String {
    let temperature = period
        .temperature
        .map(|t| t.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    [
        format!("{}:", or_placeholder(period.name.as_deref(), UNKNOWN)),
        format!(
            "Temperature: {}\u{00b0}{}",
            temperature,
            or_placeholder(period.temperature_unit.as_deref(), "F")
        ),
        format!(
            "Wind: {} {}",
            or_placeholder(period.wind_speed.as_deref(), UNKNOWN),
            or_placeholder(period.wind_direction.as_deref(), "")
        ),
        or_placeholder(period.short_forecast.as_deref(), "No forecast available").to_string(),
        SEPARATOR.to_string(),
    ]
    .join("\n")
}

/// Formats the alerts report for a state; `features` must not be empty
pub fn format_alerts(state: &str, features: &[AlertFeature]) -> String {
    let blocks: Vec<String> = features.iter().map(format_alert).collect();
    format!("Active alerts for {}:\n\n{}", state, blocks.join("\n"))
}

/// Formats the forecast report, headed by the coordinates exactly as requested
pub fn format_forecast(coordinate: GeoCoordinate, periods: &[ForecastPeriod]) -> String {
    let blocks: Vec<String> = periods.iter().map(format_period).collect();
    format!(
        "Forecast for {}, {}:\n\n{}",
        coordinate.latitude,
        coordinate.longitude,
        blocks.join("\n")
    )
}
