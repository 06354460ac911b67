//! Agent-facing wrapper exposing the pipeline as a callable tool

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::error::ClimateError;
use crate::summary::ClimateService;

/// Outcome of a tool call. Failures are their own variant, never a success
/// string that happens to describe an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ToolOutput {
    Success { result: String },
    Error { stage: String, message: String },
}

impl ToolOutput {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutput::Success { .. })
    }
}

impl From<ClimateError> for ToolOutput {
    fn from(err: ClimateError) -> Self {
        ToolOutput::Error {
            stage: err.stage().to_string(),
            message: err.user_message(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Arguments {
    city: String,
    start_date: String,
    end_date: String,
}

pub struct HistoricalWeatherTool {
    service: ClimateService,
}

impl HistoricalWeatherTool {
    #[must_use]
    pub fn new(service: ClimateService) -> Self {
        Self { service }
    }

    pub fn name(&self) -> &str {
        "get_historical_average_weather"
    }

    pub fn description(&self) -> &str {
        "Historical average temperature and rain outlook for a city over a trip's dates, \
         based on climate data from previous years. Use for trips too far ahead for a forecast."
    }

    pub fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City or place name, e.g. 'Lisbon'"
                },
                "start_date": {
                    "type": "string",
                    "description": "First day of the trip, YYYY-MM-DD"
                },
                "end_date": {
                    "type": "string",
                    "description": "Last day of the trip, YYYY-MM-DD"
                }
            },
            "required": ["city", "start_date", "end_date"]
        })
    }

    pub async fn execute(&self, args: serde_json::Value) -> ToolOutput {
        let args: Arguments = match serde_json::from_value(args) {
            Ok(args) => args,
            Err(e) => {
                warn!("Invalid tool arguments: {}", e);
                return ClimateError::validation(format!("invalid arguments: {e}")).into();
            }
        };

        info!(
            "Tool call {} for {} between {} and {}",
            self.name(),
            args.city,
            args.start_date,
            args.end_date
        );

        match self
            .service
            .summarize_text(&args.city, &args.start_date, &args.end_date)
            .await
        {
            Ok(result) => ToolOutput::Success { result },
            Err(err) => err.into(),
        }
    }
}
