//! Per-language lookup tables

use crate::{Error, Language, Result};
use regex::{Regex, RegexBuilder};

/// Keywords used to classify result, score and knockout lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keywords {
    pub victory: &'static str,
    pub defeat: &'static str,
    pub score: &'static str,
    /// Literal text stripped from score lines; empty means nothing to strip
    pub score_prefix: &'static str,
    pub knockout: &'static str,
}

/// Fixed configuration for one client language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub language: Language,
    /// Rule names in detection order
    pub rules: [&'static str; 4],
    /// X Power pattern; group 1 captures the value
    pub power_pattern: &'static str,
    pub keywords: Keywords,
}

static ENGLISH: LanguageProfile = LanguageProfile {
    language: Language::En,
    rules: ["Splat Zones", "Tower Control", "Rainmaker", "Clam Blitz"],
    power_pattern: r"X Power[:\s]+([\d\.]+)",
    keywords: Keywords {
        victory: "victory",
        defeat: "defeat",
        score: "score",
        score_prefix: "Score: ",
        knockout: "knockout",
    },
};

static JAPANESE: LanguageProfile = LanguageProfile {
    language: Language::Ja,
    rules: ["ガチエリア", "ガチヤグラ", "ガチホコ", "ガチアサリ"],
    power_pattern: r"Xパワー[:\s]+([\d\.]+)",
    keywords: Keywords {
        victory: "win",
        defeat: "lose",
        score: "カウント",
        score_prefix: "",
        knockout: "ノックアウト！",
    },
};

impl LanguageProfile {
    /// Get the profile for a language
    pub fn for_language(language: Language) -> &'static LanguageProfile {
        match language {
            Language::En => &ENGLISH,
            Language::Ja => &JAPANESE,
        }
    }

    /// Resolve a language tag such as `"en"` to its profile
    ///
    /// # Example
    ///
    /// ```
    /// use splatlog_core::LanguageProfile;
    ///
    /// let profile = LanguageProfile::for_tag("en").unwrap();
    /// assert_eq!(profile.rules[0], "Splat Zones");
    /// assert!(LanguageProfile::for_tag("xx").is_err());
    /// ```
    pub fn for_tag(tag: &str) -> Result<&'static LanguageProfile> {
        let language: Language = tag.parse()?;
        Ok(Self::for_language(language))
    }

    /// Compile the X Power pattern, anchored at line start and case-insensitive
    pub fn power_regex(&self) -> Result<Regex> {
        RegexBuilder::new(&format!("^(?:{})", self.power_pattern))
            .case_insensitive(true)
            .build()
            .map_err(Error::from)
    }

    /// Find the rule a line starts with, honoring the profile's rule order
    pub fn rule_prefix_of(&self, line: &str) -> Option<&'static str> {
        let lowered = line.to_lowercase();
        self.rules
            .iter()
            .copied()
            .find(|rule| lowered.starts_with(&rule.to_lowercase()))
    }
}
