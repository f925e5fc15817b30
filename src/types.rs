use serde::{Deserialize, Serialize};
use std::fmt;

/// Which foot a record refers to. Serialized as `"left"` / `"right"` in both
/// the photo and sensation collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootSide {
    Left,
    Right,
}

impl FootSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            FootSide::Left => "left",
            FootSide::Right => "right",
        }
    }
}

impl fmt::Display for FootSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
