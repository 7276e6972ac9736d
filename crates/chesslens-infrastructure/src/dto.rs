//! Wire formats of the ChessLens API.
//!
//! The server's JSON shapes differ from the domain model in small ways
//! (`image_path` vs. `image_location`, the prediction link under
//! `lichess_url`, timestamps without an offset). These DTOs absorb the
//! differences and convert into `chesslens_core` types.

use chesslens_core::auth::RegisteredUser;
use chesslens_core::board::{BoardId, BoardRecord};
use chesslens_core::capture::Prediction;
use chesslens_core::fen;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// A saved position as returned by the library and position endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionDto {
    pub id: BoardId,
    pub fen: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<PositionDto> for BoardRecord {
    fn from(dto: PositionDto) -> Self {
        BoardRecord {
            id: dto.id,
            fen: dto.fen,
            image_location: dto.image_path,
            category: dto.category,
            notes: dto.notes,
            created_at: dto.created_at,
        }
    }
}

/// Response of the upload endpoint: the new id and where the image landed.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponseDto {
    pub id: BoardId,
    #[serde(default, alias = "image_path")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl UploadResponseDto {
    /// Builds the new record from the response and the FEN that was sent.
    ///
    /// The server does not echo the FEN or a timestamp, so the submitted FEN
    /// is used and a missing timestamp defaults to now.
    pub fn into_record(self, fen: &str) -> BoardRecord {
        BoardRecord {
            id: self.id,
            fen: fen.to_string(),
            image_location: self.image_url,
            category: None,
            notes: None,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionDto {
    pub fen: String,
    #[serde(default, alias = "lichess_url")]
    pub external_analysis_url: Option<String>,
}

impl PredictionDto {
    /// Falls back to building the link from `analysis_base` when the server
    /// did not return one.
    pub fn into_prediction(self, analysis_base: &str) -> Prediction {
        let external_analysis_url = self
            .external_analysis_url
            .unwrap_or_else(|| fen::analysis_url(analysis_base, &self.fen));
        Prediction {
            fen: self.fen,
            external_analysis_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenDto {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl From<UserDto> for RegisteredUser {
    fn from(dto: UserDto) -> Self {
        RegisteredUser {
            id: dto.id,
            username: dto.username,
            email: dto.email,
            created_at: dto.created_at,
        }
    }
}

/// Error body: `{"detail": "..."}`, or a list of validation errors.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponseDto {
    pub detail: serde_json::Value,
}

impl ErrorResponseDto {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Extracts the human-readable message from an error body, falling back to
/// the raw text.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponseDto>(body)
        .map(|dto| dto.message())
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Parses RFC 3339 timestamps, and naive ones as UTC.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_timestamp(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {text}")))
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    match text {
        Some(text) => parse_timestamp(&text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {text}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_position_maps_image_path_and_numeric_id() {
        let json = r#"{
            "id": 12,
            "fen": "8/8/8/8/8/8/8/8 w - - 0 1",
            "category": null,
            "notes": "endgame study",
            "image_path": "https://storage.test/12.png",
            "user_id": 3,
            "created_at": "2024-05-01T09:30:00.123456"
        }"#;

        let record: BoardRecord = serde_json::from_str::<PositionDto>(json).unwrap().into();

        assert_eq!(record.id, BoardId::from(12));
        assert_eq!(record.image_location.as_deref(), Some("https://storage.test/12.png"));
        assert_eq!(record.category, None);
        assert_eq!(record.notes.as_deref(), Some("endgame study"));
        assert_eq!(
            record.created_at.timestamp(),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_offset_timestamp_is_converted_to_utc() {
        let ts = parse_timestamp("2024-05-01T11:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_prediction_reads_lichess_url() {
        let dto: PredictionDto = serde_json::from_str(
            r#"{"fen": "8/8/8/8/8/8/8/8 b - - 0 1", "lichess_url": "https://lichess.test/x"}"#,
        )
        .unwrap();

        let prediction = dto.into_prediction("https://lichess.org/editor");

        assert_eq!(prediction.external_analysis_url, "https://lichess.test/x");
    }

    #[test]
    fn test_prediction_without_link_builds_one() {
        let dto: PredictionDto =
            serde_json::from_str(r#"{"fen": "8/8/8/8/8/8/8/8 b - - 0 1"}"#).unwrap();

        let prediction = dto.into_prediction("https://lichess.org/editor/");

        assert_eq!(
            prediction.external_analysis_url,
            "https://lichess.org/editor/8/8/8/8/8/8/8/8_b_-_-_0_1"
        );
    }

    #[test]
    fn test_upload_response_uses_submitted_fen() {
        let dto: UploadResponseDto = serde_json::from_str(
            r#"{"message": "Uploaded", "image_url": "https://storage.test/42.png", "id": 42}"#,
        )
        .unwrap();

        let record = dto.into_record("8/8/8/8/8/8/8/8 w - - 0 1");

        assert_eq!(record.id, BoardId::from(42));
        assert_eq!(record.fen, "8/8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(record.image_location.as_deref(), Some("https://storage.test/42.png"));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"detail": "Position not found"}"#), "Position not found");
        assert!(error_message(r#"{"detail": [{"msg": "field required"}]}"#).contains("field required"));
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
