//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::SharedRoundData;

pub const OEMBED_VERSION: &str = "1.0";
pub const OEMBED_TYPE: &str = "rich";
pub const EMBED_WIDTH: u32 = 430;
pub const EMBED_HEIGHT: u32 = 720;
pub const THUMBNAIL_SIZE: u32 = 512;
pub const PROVIDER_NAME: &str = "Wettkämpfe Timer";

/// Fields that must be present (and truthy) in a share request.
const REQUIRED_FIELDS: [&str; 3] = ["id", "laps", "teamName"];

/// Response for a successful share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRoundResponse {
    pub success: bool,
    pub shareable_id: String,
    pub shared_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShareRoundQuery {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OEmbedQuery {
    pub url: Option<String>,
    pub format: Option<String>,
}

/// oEmbed "rich" document describing the embeddable view of a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OEmbedResponse {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub author_name: String,
    pub author_url: String,
    pub provider_name: String,
    pub provider_url: String,
    pub html: String,
    pub thumbnail_url: String,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
}

impl OEmbedResponse {
    pub fn for_round(round: &SharedRoundData, round_id: &str, base_url: &str) -> Self {
        let title = round
            .description
            .clone()
            .unwrap_or_else(|| format!("{} - Geteilter Durchgang", round.team_name));

        Self {
            version: OEMBED_VERSION.to_string(),
            kind: OEMBED_TYPE.to_string(),
            width: EMBED_WIDTH,
            height: EMBED_HEIGHT,
            title,
            author_name: PROVIDER_NAME.to_string(),
            author_url: base_url.to_string(),
            provider_name: PROVIDER_NAME.to_string(),
            provider_url: base_url.to_string(),
            html: format!(
                r#"<iframe src="{}/embed/{}" width="{}" height="{}" frameborder="0" scrolling="no" allowfullscreen></iframe>"#,
                base_url, round_id, EMBED_WIDTH, EMBED_HEIGHT
            ),
            thumbnail_url: format!("{}/icons/icon-512x512.png", base_url),
            thumbnail_width: THUMBNAIL_SIZE,
            thumbnail_height: THUMBNAIL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
}

/// Why a share payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Malformed round data: {0}")]
    Malformed(String),
}

/// `null`, `false`, `0` and `""` count as missing.
fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Decode a share request body, flat or nested under `roundData`.
pub fn parse_share_payload(body: Value) -> Result<SharedRoundData, PayloadError> {
    let payload = match body {
        Value::Object(mut map) if map.get("roundData").is_some_and(Value::is_object) => {
            map.remove("roundData").unwrap_or(Value::Null)
        }
        other => other,
    };

    for field in REQUIRED_FIELDS {
        if is_blank(payload.get(field)) {
            return Err(PayloadError::MissingField(field));
        }
    }

    serde_json::from_value(payload).map_err(|e| PayloadError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "id": "3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b",
            "completedAt": "2024-06-01T09:05:00.000Z",
            "totalTime": 135000,
            "laps": [{ "lapNumber": 1, "time": 10000, "timestamp": "2024-06-01T09:03:00.000Z" }],
            "teamName": "Löschzwerge",
            "knotTime": 28.5
        })
    }

    #[test]
    fn test_parse_flat_and_nested() {
        let flat = parse_share_payload(payload()).unwrap();
        assert_eq!(flat.team_name, "Löschzwerge");
        assert_eq!(flat.scoring.knot_time, Some(28.5));

        let nested = parse_share_payload(json!({ "roundData": payload() })).unwrap();
        assert_eq!(nested, flat);
    }

    #[test]
    fn test_missing_and_blank_fields() {
        for field in REQUIRED_FIELDS {
            let mut body = payload();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(
                parse_share_payload(body),
                Err(PayloadError::MissingField(field))
            );
        }

        let mut body = payload();
        body["teamName"] = json!("");
        assert_eq!(
            parse_share_payload(body),
            Err(PayloadError::MissingField("teamName"))
        );

        let mut body = payload();
        body["id"] = Value::Null;
        assert_eq!(parse_share_payload(body), Err(PayloadError::MissingField("id")));
    }

    #[test]
    fn test_empty_laps_are_present() {
        let mut body = payload();
        body["laps"] = json!([]);
        assert!(parse_share_payload(body).unwrap().laps.is_empty());
    }

    #[test]
    fn test_wrong_types_are_malformed() {
        let mut body = payload();
        body["laps"] = json!("fast");
        assert!(matches!(parse_share_payload(body), Err(PayloadError::Malformed(_))));
    }

    #[test]
    fn test_oembed_title() {
        let round = parse_share_payload(payload()).unwrap();
        let doc = OEmbedResponse::for_round(&round, &round.id, "https://timer.example.org");
        assert_eq!(doc.title, "Löschzwerge - Geteilter Durchgang");
        assert!(doc
            .html
            .contains("https://timer.example.org/embed/3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b"));

        let mut described = round.clone();
        described.description = Some("Kreisentscheid 2024".to_string());
        let doc = OEmbedResponse::for_round(&described, &described.id, "https://timer.example.org");
        assert_eq!(doc.title, "Kreisentscheid 2024");

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["type"], "rich");
        assert_eq!(value["thumbnail_width"], 512);
    }
}
