use crate::types::FootSide;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One foot photograph. Stores only a reference to the image; the bytes
/// live in the device filesystem the `imagePath` URI points into.
/// Immutable once created; appended to the photo collection and never
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSession {
    pub id: String,
    /// Epoch milliseconds at capture.
    pub timestamp: i64,
    pub foot_side: FootSide,
    pub image_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wound: Option<bool>,
}

impl PhotoSession {
    /// Create a session for a freshly captured image, stamping the id and
    /// timestamp. Empty or whitespace-only notes are dropped.
    pub fn new(
        foot_side: FootSide,
        image_path: impl Into<String>,
        notes: Option<String>,
        has_wound: Option<bool>,
    ) -> Self {
        let now = Utc::now().timestamp_millis();
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Self {
            id: now.to_string(),
            timestamp: now,
            foot_side,
            image_path: image_path.into(),
            notes,
            has_wound,
        }
    }

    /// Capture time as a UTC datetime, `None` if the stored millis are out
    /// of chrono's representable range.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stamps_id_from_timestamp() {
        let session = PhotoSession::new(FootSide::Left, "file:///photos/1.jpg", None, None);
        assert_eq!(session.id, session.timestamp.to_string());
        assert!(session.captured_at().is_some());
    }

    #[test]
    fn test_blank_notes_dropped() {
        let session = PhotoSession::new(
            FootSide::Right,
            "file:///photos/2.jpg",
            Some("   ".to_string()),
            Some(false),
        );
        assert!(session.notes.is_none());

        let session = PhotoSession::new(
            FootSide::Right,
            "file:///photos/2.jpg",
            Some("  swelling near heel ".to_string()),
            Some(true),
        );
        assert_eq!(session.notes.as_deref(), Some("swelling near heel"));
    }

    #[test]
    fn test_serialized_field_names() {
        let session = PhotoSession {
            id: "1700000000000".to_string(),
            timestamp: 1_700_000_000_000,
            foot_side: FootSide::Left,
            image_path: "file:///photos/3.jpg".to_string(),
            notes: None,
            has_wound: Some(true),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["footSide"], "left");
        assert_eq!(json["imagePath"], "file:///photos/3.jpg");
        assert_eq!(json["hasWound"], true);
        // Absent notes are omitted entirely, matching the stored shape.
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "1700000000000",
            "timestamp": 1700000000000,
            "footSide": "right",
            "imagePath": "file:///photos/4.jpg"
        }"#;
        let session: PhotoSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.foot_side, FootSide::Right);
        assert!(session.notes.is_none());
        assert!(session.has_wound.is_none());
    }
}
