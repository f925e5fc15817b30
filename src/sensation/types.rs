use crate::types::FootSide;
use serde::{Deserialize, Serialize};

/// Toe positions tested by the screening. Stored as the numeric position
/// (1, 3, 5) so existing session data keeps deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Toe {
    Big,
    Third,
    Fifth,
}

impl Toe {
    pub fn position(&self) -> u8 {
        match self {
            Toe::Big => 1,
            Toe::Third => 3,
            Toe::Fifth => 5,
        }
    }

    /// Display name used in test instructions.
    pub fn label(&self) -> &'static str {
        match self {
            Toe::Big => "big toe",
            Toe::Third => "3rd toe",
            Toe::Fifth => "5th toe",
        }
    }
}

impl From<Toe> for u8 {
    fn from(toe: Toe) -> u8 {
        toe.position()
    }
}

impl TryFrom<u8> for Toe {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Toe::Big),
            3 => Ok(Toe::Third),
            5 => Ok(Toe::Fifth),
            other => Err(format!("invalid toe position: {}", other)),
        }
    }
}

/// What the user reported for one touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SensationResponse {
    Felt,
    Faint,
    NotFelt,
}

/// One screening point: a (foot, toe) pair and the recorded response.
/// `response` is `None` until the user answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensationSite {
    pub toe: Toe,
    pub foot: FootSide,
    pub response: Option<SensationResponse>,
}

/// Three-way clinical-risk bucket derived from a test's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Normal,
    Borderline,
    AtRisk,
}

impl Classification {
    /// Short display label.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Normal => "Normal",
            Classification::Borderline => "Borderline",
            Classification::AtRisk => "At Risk",
        }
    }

    /// Status emoji shown next to the label.
    pub fn emoji(&self) -> &'static str {
        match self {
            Classification::Normal => "✅",
            Classification::Borderline => "⚠️",
            Classification::AtRisk => "🔴",
        }
    }

    /// Guidance message shown on the results screen.
    pub fn guidance(&self) -> &'static str {
        match self {
            Classification::Normal => "Nice job—small steps keep you safe.",
            Classification::Borderline => {
                "Let's keep monitoring. Consider discussing with your doctor."
            }
            Classification::AtRisk => {
                "Please schedule a visit with your healthcare provider soon."
            }
        }
    }
}

/// One completed six-site sensation test. Immutable once created; appended
/// to the sensation collection and never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensationSession {
    pub id: String,
    /// Epoch milliseconds at completion.
    pub date: i64,
    pub results: Vec<SensationSite>,
    pub total_score: u32,
    pub classification: Classification,
}
