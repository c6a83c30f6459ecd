use crate::explanation::types::PredictionResult;

/// JSON formatter for prediction results
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format result as pretty-printed JSON
    pub fn format(result: &PredictionResult) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(result)
    }

    /// Format result as compact JSON (no whitespace)
    pub fn format_compact(result: &PredictionResult) -> Result<String, serde_json::Error> {
        serde_json::to_string(result)
    }
}
