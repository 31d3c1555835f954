//! OCR log parsing
//!
//! The pipeline is linear: normalize, extract X Power, detect the rule,
//! classify lines, validate counts, assemble. Any failing stage aborts the
//! whole parse; no partial document is ever returned.

use crate::{
    Error, LanguageProfile, LineClassifier, LineKind, MatchRecord, Result, SessionDocument,
};
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Lines routed by classification, in capture order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub results: Vec<String>,
    pub scores: Vec<String>,
    pub stages: Vec<String>,
}

/// Parser bound to one language profile
pub struct LogParser {
    profile: &'static LanguageProfile,
    power: Regex,
}

impl LogParser {
    /// Create a parser, compiling the profile's patterns once
    pub fn new(profile: &'static LanguageProfile) -> Result<Self> {
        Ok(Self {
            profile,
            power: profile.power_regex()?,
        })
    }

    /// The profile this parser was built for
    pub fn profile(&self) -> &'static LanguageProfile {
        self.profile
    }

    /// Parse raw OCR text into a session document
    pub fn parse(&self, text: &str) -> Result<SessionDocument> {
        let lines = normalize_lines(text);
        debug!(
            "Normalized {} lines ({} profile)",
            lines.len(),
            self.profile().language
        );

        let x_power = self.extract_power(&lines)?;
        let rule = self.detect_rule(&lines)?;
        debug!("X Power: {}, rule: {}", x_power, rule);

        let classified = self.classify(&lines, rule)?;
        debug!("results: {:?}", classified.results);
        debug!("scores: {:?}", classified.scores);
        debug!("stages: {:?}", classified.stages);

        let battles = assemble(classified)?;
        Ok(SessionDocument::new(x_power, rule, battles))
    }

    /// First X Power value found, as written
    pub fn extract_power(&self, lines: &[&str]) -> Result<String> {
        lines
            .iter()
            .find_map(|line| self.power.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(Error::PowerNotFound)
    }

    /// First line starting with a known rule decides the rule for the set
    pub fn detect_rule(&self, lines: &[&str]) -> Result<&'static str> {
        lines
            .iter()
            .find_map(|line| self.profile.rule_prefix_of(line))
            .ok_or(Error::RuleNotFound)
    }

    /// Route every line into at most one of results, scores or stages
    pub fn classify(&self, lines: &[&str], rule: &str) -> Result<Classified> {
        let classifier = LineClassifier::new(self.profile, rule)?;
        let mut classified = Classified::default();

        for line in lines {
            let Some(line) = classifier.classify_line(line) else {
                continue;
            };
            match line.kind {
                LineKind::Result => classified.results.push(line.text),
                LineKind::Score => classified.scores.push(line.text),
                LineKind::Stage => classified.stages.push(line.text),
            }
        }

        Ok(classified)
    }
}

/// Line boundaries recognized in OCR text: `\n`, `\r` (so also `\r\n`) and
/// the ASCII and Unicode separators
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split on line boundaries, trim, drop empty lines
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Zip the three sequences and put the battles in chronological order
///
/// Results screens list the most recent battle first, so capture order is
/// reversed once.
pub fn assemble(classified: Classified) -> Result<Vec<MatchRecord>> {
    let Classified {
        results,
        scores,
        stages,
    } = classified;

    if results.len() != scores.len() || scores.len() != stages.len() {
        return Err(Error::CountMismatch {
            results: results.len(),
            scores: scores.len(),
            stages: stages.len(),
        });
    }

    let mut battles: Vec<MatchRecord> = results
        .into_iter()
        .zip(scores)
        .zip(stages)
        .map(|((result, score), stage)| MatchRecord {
            result,
            score,
            stage,
        })
        .collect();
    battles.reverse();

    Ok(battles)
}

/// Convenience entry points keyed by language tag
pub struct SessionLogParser;

impl SessionLogParser {
    /// Parse OCR text for the given language tag
    ///
    /// An unknown tag fails before the text is inspected.
    ///
    /// # Example
    ///
    /// ```
    /// use splatlog_core::SessionLogParser;
    ///
    /// let text = "X Power: 2001.5\nRainmaker\nVictory!\nScore: 100\nRainmaker Eeltail Alley";
    /// let session = SessionLogParser::parse_str(text, "en").unwrap();
    /// assert_eq!(session.x_power, "2001.5");
    /// assert_eq!(session.battles[0].stage, "Eeltail Alley");
    /// ```
    pub fn parse_str(text: &str, lang: &str) -> Result<SessionDocument> {
        let profile = LanguageProfile::for_tag(lang)?;
        LogParser::new(profile)?.parse(text)
    }

    /// Read and parse an OCR text file
    pub fn parse_file<P: AsRef<Path>>(path: P, lang: &str) -> Result<SessionDocument> {
        let path = path.as_ref();
        let profile = LanguageProfile::for_tag(lang)?;
        debug!("Parsing OCR capture: {} ({})", path.display(), profile.language);

        let content = std::fs::read_to_string(path)?;
        LogParser::new(profile)?.parse(&content)
    }
}
