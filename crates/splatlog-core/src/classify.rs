//! Line classification into results, scores and stages
//!
//! Each line is tested against an ordered list of branches. The first branch
//! whose predicate holds claims the line; later branches never see it.

use crate::{LanguageProfile, Result};
use regex::{Regex, RegexBuilder};

/// Category a line was routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Victory or defeat line
    Result,
    /// Score count or knockout line
    Score,
    /// Rule-prefixed stage line
    Stage,
}

/// A line that survived classification, already cleaned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub text: String,
}

struct Branch {
    kind: LineKind,
    /// Receives the original line and its lowercase form
    matches: fn(&LineClassifier, &str, &str) -> bool,
    clean: fn(&LineClassifier, &str) -> String,
}

const BRANCHES: [Branch; 3] = [
    Branch {
        kind: LineKind::Result,
        matches: LineClassifier::is_result,
        clean: LineClassifier::clean_result,
    },
    Branch {
        kind: LineKind::Score,
        matches: LineClassifier::is_score,
        clean: LineClassifier::clean_score,
    },
    Branch {
        kind: LineKind::Stage,
        matches: LineClassifier::is_stage,
        clean: LineClassifier::clean_stage,
    },
];

/// Classifier bound to one language profile and one detected rule
pub struct LineClassifier {
    victory: String,
    defeat: String,
    score: String,
    knockout: String,
    score_prefix: &'static str,
    rule: String,
    rule_pattern: Regex,
}

impl LineClassifier {
    /// Build a classifier for `rule` under `profile`
    pub fn new(profile: &LanguageProfile, rule: &str) -> Result<Self> {
        let keywords = &profile.keywords;
        let rule_pattern = RegexBuilder::new(&regex::escape(rule))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            victory: keywords.victory.to_lowercase(),
            defeat: keywords.defeat.to_lowercase(),
            score: keywords.score.to_lowercase(),
            knockout: keywords.knockout.to_lowercase(),
            score_prefix: keywords.score_prefix,
            rule: rule.to_lowercase(),
            rule_pattern,
        })
    }

    /// Route a single normalized line; `None` means the line is irrelevant
    pub fn classify_line(&self, line: &str) -> Option<ClassifiedLine> {
        let lowered = line.to_lowercase();
        BRANCHES
            .iter()
            .find(|branch| (branch.matches)(self, line, lowered.as_str()))
            .map(|branch| ClassifiedLine {
                kind: branch.kind,
                text: (branch.clean)(self, line),
            })
    }

    fn is_result(&self, _line: &str, lowered: &str) -> bool {
        lowered.contains(&self.victory) || lowered.contains(&self.defeat)
    }

    fn is_score(&self, _line: &str, lowered: &str) -> bool {
        lowered.contains(&self.score) || lowered.contains(&self.knockout)
    }

    /// A line holding only the rule name is a header, not a stage
    fn is_stage(&self, line: &str, lowered: &str) -> bool {
        lowered.contains(&self.rule) && !self.clean_stage(line).is_empty()
    }

    fn clean_result(&self, line: &str) -> String {
        line.replace(['!', '.', '！'], "")
    }

    fn clean_score(&self, line: &str) -> String {
        let line = if self.score_prefix.is_empty() {
            line.to_string()
        } else {
            line.replace(self.score_prefix, "")
        };
        line.replace(['!', '！'], "")
            .replace('◎', "0")
            .trim()
            .to_string()
    }

    fn clean_stage(&self, line: &str) -> String {
        self.rule_pattern.replace_all(line, "").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english(rule: &str) -> LineClassifier {
        LineClassifier::new(LanguageProfile::for_tag("en").unwrap(), rule).unwrap()
    }

    fn japanese(rule: &str) -> LineClassifier {
        LineClassifier::new(LanguageProfile::for_tag("ja").unwrap(), rule).unwrap()
    }

    fn classified(kind: LineKind, text: &str) -> Option<ClassifiedLine> {
        Some(ClassifiedLine {
            kind,
            text: text.to_string(),
        })
    }

    #[test]
    fn test_result_branch() {
        let c = english("Splat Zones");
        assert_eq!(c.classify_line("Victory!"), classified(LineKind::Result, "Victory"));
        assert_eq!(c.classify_line("DEFEAT..."), classified(LineKind::Result, "DEFEAT"));
        assert_eq!(c.classify_line("Victory！"), classified(LineKind::Result, "Victory"));
    }

    #[test]
    fn test_score_branch() {
        let c = english("Splat Zones");
        assert_eq!(c.classify_line("Score: 68"), classified(LineKind::Score, "68"));
        assert_eq!(c.classify_line("Knockout!"), classified(LineKind::Score, "Knockout"));
        assert_eq!(c.classify_line("Score: ◎"), classified(LineKind::Score, "0"));
    }

    // Keyword match is case-insensitive but the prefix is stripped verbatim,
    // so a lowercase prefix survives in the score text.
    #[test]
    fn test_score_prefix_stripped_case_sensitively() {
        let c = english("Splat Zones");
        assert_eq!(c.classify_line("score: 68"), classified(LineKind::Score, "score: 68"));
        assert_eq!(c.classify_line("SCORE: 68"), classified(LineKind::Score, "SCORE: 68"));
    }

    #[test]
    fn test_stage_branch() {
        let c = english("Splat Zones");
        assert_eq!(
            c.classify_line("Splat Zones Museum d'Alfonsino"),
            classified(LineKind::Stage, "Museum d'Alfonsino")
        );
        assert_eq!(
            c.classify_line("splat zones Scorch Gorge"),
            classified(LineKind::Stage, "Scorch Gorge")
        );
        assert_eq!(
            c.classify_line("Hammerhead Bridge Splat Zones"),
            classified(LineKind::Stage, "Hammerhead Bridge")
        );
    }

    #[test]
    fn test_rule_header_is_not_a_stage() {
        let c = english("Splat Zones");
        assert_eq!(c.classify_line("Splat Zones"), None);
        assert_eq!(c.classify_line("SPLAT ZONES"), None);
    }

    #[test]
    fn test_irrelevant_lines_dropped() {
        let c = english("Splat Zones");
        assert_eq!(c.classify_line("X Power: 2187.3"), None);
        assert_eq!(c.classify_line("Tower Control Flounder Heights"), None);
        assert_eq!(c.classify_line("Next"), None);
    }

    // A stage name containing a result keyword is claimed by the result
    // branch. This mirrors the observed priority and is pinned here on purpose.
    #[test]
    fn test_result_keyword_wins_over_stage() {
        let c = english("Splat Zones");
        let line = c.classify_line("Splat Zones Victory Plaza").unwrap();
        assert_eq!(line.kind, LineKind::Result);
        assert_eq!(line.text, "Splat Zones Victory Plaza");
    }

    #[test]
    fn test_score_keyword_wins_over_stage() {
        let c = english("Rainmaker");
        let line = c.classify_line("Rainmaker Knockout Bay").unwrap();
        assert_eq!(line.kind, LineKind::Score);
    }

    #[test]
    fn test_japanese_lines() {
        let c = japanese("ガチエリア");
        assert_eq!(c.classify_line("WIN!"), classified(LineKind::Result, "WIN"));
        assert_eq!(c.classify_line("LOSE..."), classified(LineKind::Result, "LOSE"));
        assert_eq!(
            c.classify_line("ノックアウト！"),
            classified(LineKind::Score, "ノックアウト")
        );
        assert_eq!(
            c.classify_line("カウント 4◎"),
            classified(LineKind::Score, "カウント 40")
        );
        assert_eq!(
            c.classify_line("ガチエリア ユノハナ大渓谷"),
            classified(LineKind::Stage, "ユノハナ大渓谷")
        );
    }
}
