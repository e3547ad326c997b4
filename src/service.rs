use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use std::sync::Arc;

use crate::client::{fetch_json, JsonSource, NwsClient};
use crate::config::Config;
use crate::formatters::{format_alerts, format_forecast};
use crate::models::{
    AlertResponse, CreateStudioRequest, ForecastResponse, GeoCoordinate, GetAlertsRequest,
    GetForecastRequest, PointsResponse,
};
use crate::studio;

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    source: Arc<dyn JsonSource>,
    api_base: String,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a Weather service talking to the NWS API described by `config`
    pub fn new(config: &Config) -> Result<Self> {
        let client = NwsClient::new(config)?;
        Ok(Self::with_source(Arc::new(client), &config.api_base))
    }

    /// Creates a Weather service backed by an arbitrary JSON source
    pub fn with_source(source: Arc<dyn JsonSource>, api_base: &str) -> Self {
        Self {
            source,
            api_base: api_base.to_string(),
            tool_router: Self::tool_router(),
        }
    }

    /// Resolves the grid point, follows its forecast URL and formats the periods.
    ///
    /// Every failure along the way ends in its own message; nothing is fetched
    /// after the first missing piece.
    pub async fn forecast_report(&self, coordinate: GeoCoordinate) -> String {
        let points_url = format!(
            "{}/points/{:.4},{:.4}",
            self.api_base, coordinate.latitude, coordinate.longitude
        );

        let Some(points) = fetch_json::<PointsResponse>(self.source.as_ref(), &points_url).await else {
            return format!(
                "Failed to retrieve grid point data for coordinates: {}, {}. \
                 This location may not be supported by the NWS API (only US locations are supported).",
                coordinate.latitude, coordinate.longitude
            );
        };

        let Some(forecast_url) = points.forecast_url().map(str::to_string) else {
            return "Failed to get forecast URL from grid point data".to_string();
        };

        let Some(forecast) = fetch_json::<ForecastResponse>(self.source.as_ref(), &forecast_url).await else {
            return "Failed to retrieve forecast data".to_string();
        };

        let periods = forecast.periods();
        if periods.is_empty() {
            return "No forecast periods available".to_string();
        }

        format_forecast(coordinate, periods)
    }

    /// Fetches and formats active alerts for an already uppercased state code
    pub async fn alerts_report(&self, state: &str) -> String {
        let url = format!("{}/alerts?area={}", self.api_base, state);

        let Some(alerts) = fetch_json::<AlertResponse>(self.source.as_ref(), &url).await else {
            return "Failed to retrieve alerts data".to_string();
        };

        let features = alerts.features();
        if features.is_empty() {
            return format!("No active alerts for {}", state);
        }

        format_alerts(state, features)
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nws-weather-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Weather alerts and forecasts for US locations from the National Weather Service API, \
                plus a scaffolding tool for Modernization Studio definitions."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(name = "get-alerts", description = "Provides weather alerts for a state. Provide a two-letter state code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state = request
            .state_code()
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        tracing::info!("Getting alerts for state: {}", state);

        let text = self.alerts_report(&state).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Gets the weather forecast for a location
    #[tool(name = "get-forecast", description = "Provides weather forecast information for a given location. Provide latitude (-90 to 90) and longitude (-180 to 180); only US locations are covered.")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        let coordinate = request
            .coordinate()
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            coordinate.latitude,
            coordinate.longitude
        );

        let text = self.forecast_report(coordinate).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Writes a blank studio definition to disk
    #[tool(name = "create-studio", description = "Creates a json schema that is considered a studio inside the Modernization Studio.")]
    async fn create_studio(
        &self,
        Parameters(request): Parameters<CreateStudioRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Creating studio '{}' in {}", request.name, request.directory);

        let text = studio::create_studio(&request.name, &request.purpose, &request.directory).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
