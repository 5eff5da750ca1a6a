//! JSON renderer

use crate::error::ApiError;
use crate::types::ConsolidatedTable;

pub fn render_json(consolidated: &ConsolidatedTable) -> Result<String, ApiError> {
    serde_json::to_string_pretty(consolidated).map_err(|e| ApiError::RenderError(e.to_string()))
}
