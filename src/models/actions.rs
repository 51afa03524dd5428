use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Envelope returned by the action routes and `/api/deck`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_action: Option<String>,
    pub url_params: HashMap<String, String>,
    pub data: serde_json::Value,
}

impl ActionResponse {
    pub fn ok(
        requested_action: Option<String>,
        url_params: HashMap<String, String>,
        data: serde_json::Value,
    ) -> Self {
        ActionResponse {
            success: true,
            message: "run successful".into(),
            requested_action,
            url_params,
            data,
        }
    }

    pub fn failed(
        requested_action: Option<String>,
        url_params: HashMap<String, String>,
        message: String,
    ) -> Self {
        ActionResponse {
            success: false,
            message,
            requested_action,
            url_params,
            data: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnnounceQuery {
    pub username: Option<String>,
}
