//! The four emotion labels and their fixed integer encoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

/// Emotion label of a post.
///
/// The encoding is fixed: `fear → 0`, `sad → 1`, `anger → 2`, `joy → 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// Fear or anxiety.
    Fear,
    /// Sadness.
    Sad,
    /// Anger.
    Anger,
    /// Joy.
    Joy,
}

impl Emotion {
    /// Number of labels.
    pub const COUNT: usize = 4;

    /// All labels in encoding order.
    pub const ALL: [Emotion; Emotion::COUNT] =
        [Emotion::Fear, Emotion::Sad, Emotion::Anger, Emotion::Joy];

    /// Integer class index of this label.
    pub fn encode(self) -> usize {
        match self {
            Emotion::Fear => 0,
            Emotion::Sad => 1,
            Emotion::Anger => 2,
            Emotion::Joy => 3,
        }
    }

    /// Label for an integer class index.
    pub fn decode(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| SentimentError::model(format!("class index {index} has no label")))
    }

    /// Label name as it appears in the data file.
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Fear => "fear",
            Emotion::Sad => "sad",
            Emotion::Anger => "anger",
            Emotion::Joy => "joy",
        }
    }

    /// Label names in encoding order.
    pub fn names() -> [&'static str; Emotion::COUNT] {
        Self::ALL.map(Emotion::as_str)
    }
}

impl FromStr for Emotion {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "fear" => Ok(Emotion::Fear),
            "sad" => Ok(Emotion::Sad),
            "anger" => Ok(Emotion::Anger),
            "joy" => Ok(Emotion::Joy),
            other => Err(SentimentError::data(format!(
                "unknown sentiment label `{other}` (expected one of fear, sad, anger, joy)"
            ))),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_encoding() {
        assert_eq!(Emotion::Fear.encode(), 0);
        assert_eq!(Emotion::Sad.encode(), 1);
        assert_eq!(Emotion::Anger.encode(), 2);
        assert_eq!(Emotion::Joy.encode(), 3);
    }

    #[test]
    fn test_decode_inverts_encode() {
        for name in ["fear", "sad", "anger", "joy"] {
            let label: Emotion = name.parse().unwrap();
            let decoded = Emotion::decode(label.encode()).unwrap();
            assert_eq!(decoded.to_string(), name);
        }
    }

    #[test]
    fn test_decode_out_of_range() {
        assert!(Emotion::decode(4).is_err());
    }

    #[test]
    fn test_unknown_label() {
        let err = "surprise".parse::<Emotion>().unwrap_err();
        assert!(err.to_string().contains("surprise"));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Emotion::Anger).unwrap(), "\"anger\"");
        let label: Emotion = serde_json::from_str("\"joy\"").unwrap();
        assert_eq!(label, Emotion::Joy);
    }
}
