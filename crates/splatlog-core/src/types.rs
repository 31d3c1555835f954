//! Session data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the captured results screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Language {
    /// English client
    #[default]
    En,
    /// Japanese client
    Ja,
}

impl FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, crate::Error> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            _ => Err(crate::Error::UnknownLanguage(s.to_string())),
        }
    }
}

impl Language {
    /// Convert to tag representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Ja]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One battle within a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Win/loss phrasing, punctuation stripped
    pub result: String,
    /// Point count or knockout marker
    pub score: String,
    /// Stage name without the rule prefix
    pub stage: String,
}

impl MatchRecord {
    pub fn new(
        result: impl Into<String>,
        score: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            result: result.into(),
            score: score.into(),
            stage: stage.into(),
        }
    }
}

/// Parse result for one OCR capture
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocument {
    /// When the capture was parsed
    pub datetime: chrono::DateTime<chrono::Utc>,

    /// Fresh identifier per parse
    pub set_id: uuid::Uuid,

    /// X Power exactly as written in the capture
    pub x_power: String,

    /// Rule shared by every battle in the set
    pub rule: String,

    /// Battles, oldest first
    pub battles: Vec<MatchRecord>,
}

impl SessionDocument {
    /// Create a document stamped with the current time and a new set id
    pub fn new(
        x_power: impl Into<String>,
        rule: impl Into<String>,
        battles: Vec<MatchRecord>,
    ) -> Self {
        Self {
            datetime: chrono::Utc::now(),
            set_id: uuid::Uuid::new_v4(),
            x_power: x_power.into(),
            rule: rule.into(),
            battles,
        }
    }

    /// Count of battles won, judged by the profile's victory keyword
    pub fn wins(&self, victory_keyword: &str) -> usize {
        let keyword = victory_keyword.to_lowercase();
        self.battles
            .iter()
            .filter(|b| b.result.to_lowercase().contains(&keyword))
            .count()
    }

    /// Convert to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_conversion() {
        assert_eq!(Language::from_str("en").unwrap(), Language::En);
        assert_eq!(Language::from_str("JA").unwrap(), Language::Ja);

        let err = Language::from_str("fr").unwrap_err();
        assert!(matches!(err, crate::Error::UnknownLanguage(tag) if tag == "fr"));
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::Ja.to_string(), "ja");
    }

    #[test]
    fn test_document_key_order() {
        let doc = SessionDocument::new(
            "2187.3",
            "Splat Zones",
            vec![MatchRecord::new("Victory", "68", "Museum d'Alfonsino")],
        );
        let json = serde_json::to_string(&doc).unwrap();

        let keys = ["\"datetime\"", "\"set_id\"", "\"x_power\"", "\"rule\"", "\"battles\""];
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains(r#"{"result":"Victory","score":"68","stage":"Museum d'Alfonsino"}"#));
    }

    #[test]
    fn test_document_json_keeps_non_ascii() {
        let doc = SessionDocument::new("2450.5", "ガチエリア", Vec::new());
        let json = doc.to_json().unwrap();
        assert!(json.contains("ガチエリア"));

        let parsed = SessionDocument::from_json(&json).unwrap();
        assert_eq!(parsed.set_id, doc.set_id);
        assert_eq!(parsed.rule, "ガチエリア");
    }

    #[test]
    fn test_wins() {
        let doc = SessionDocument::new(
            "2000.0",
            "Rainmaker",
            vec![
                MatchRecord::new("Victory", "100", "Hagglefish Market"),
                MatchRecord::new("Defeat", "Knockout", "Mincemeat Metalworks"),
                MatchRecord::new("VICTORY", "Knockout", "Eeltail Alley"),
            ],
        );
        assert_eq!(doc.wins("victory"), 2);
    }
}
