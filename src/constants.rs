/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("nws-weather-mcp/", env!("CARGO_PKG_VERSION"));

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Media type requested from the NWS API
pub const GEO_JSON: &str = "application/geo+json";
