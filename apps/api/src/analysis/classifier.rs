//! Job-description classifier: local heuristics only, no network calls.
//!
//! Algorithm:
//! 1. Role: labeled field, then "<title> at|- ...", then the first non-blank line.
//! 2. Organization: labeled field, then "at|join|with <Name>", then "<Name> is seeking".
//! 3. Sector: whole-word keyword counts per sector; strictly greater score wins,
//!    so earlier sectors keep ties. No signal leaves the default sector.
//! 4. Confidence: bucketed from the winning score.
//! 5. Insight: labeled mission field, then "we are ..." / "our mission is to ..." sentences.
//!
//! Every rule is an independent pattern returning an optional capture; a rule
//! that finds nothing usable simply hands over to the next one.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::analysis::sectors::{Sector, SECTOR_KEYWORDS};
use crate::text::truncate_chars;

/// The first non-blank line used as a role is cut to this many characters.
pub const ROLE_FALLBACK_MAX_CHARS: usize = 80;
/// Extracted organization insight is cut to this many characters.
pub const INSIGHT_MAX_CHARS: usize = 200;
/// Scores strictly above this are HIGH confidence.
pub const HIGH_CONFIDENCE_THRESHOLD: usize = 3;
/// Scores strictly above this (and not HIGH) are MEDIUM confidence.
pub const MEDIUM_CONFIDENCE_THRESHOLD: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_score(score: usize) -> Self {
        if score > HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::High
        } else if score > MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(ConfidenceLevel::High),
            "MEDIUM" => Some(ConfidenceLevel::Medium),
            "LOW" => Some(ConfidenceLevel::Low),
            _ => None,
        }
    }
}

/// Structured analysis of a job description.
///
/// `template`, `routing_target` and `themes` are only ever filled by enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub role: String,
    pub organization: String,
    pub sector: Sector,
    pub organization_insight: String,
    pub confidence_level: ConfidenceLevel,
    pub template: Option<String>,
    pub routing_target: Option<String>,
    pub themes: Vec<String>,
}

/// One extraction attempt: a pattern and the capture group holding the value.
struct ExtractionRule {
    name: &'static str,
    pattern: Regex,
    group: usize,
}

impl ExtractionRule {
    fn new(name: &'static str, pattern: &str, group: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            group,
        })
    }

    fn apply(&self, text: &str) -> Option<String> {
        let captured = self.pattern.captures(text)?.get(self.group)?.as_str().trim();
        if captured.is_empty() {
            return None;
        }
        Some(captured.to_string())
    }
}

/// Runs rules in priority order and returns the first usable capture.
fn first_match(rules: &[ExtractionRule], text: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        let hit = rule.apply(text)?;
        trace!(rule = rule.name, "extraction rule matched");
        Some(hit)
    })
}

struct SectorMatcher {
    sector: Sector,
    keywords: Vec<Regex>,
}

impl SectorMatcher {
    /// Total whole-word keyword occurrences in already-lowercased text.
    fn score(&self, lowered: &str) -> usize {
        self.keywords
            .iter()
            .map(|keyword| keyword.find_iter(lowered).count())
            .sum()
    }
}

/// Compiled classifier. Build once at startup and share; `analyze` is pure.
pub struct Classifier {
    role_rules: Vec<ExtractionRule>,
    organization_rules: Vec<ExtractionRule>,
    insight_rules: Vec<ExtractionRule>,
    sector_matchers: Vec<SectorMatcher>,
}

impl Classifier {
    pub fn new() -> Result<Self, regex::Error> {
        let role_rules = vec![
            ExtractionRule::new("role_label", r"(?i)(?:position|role|title):\s*([^\n]+)", 1)?,
            ExtractionRule::new(
                "role_title_delimiter",
                r"(?im)^([^\n]+?)(?:\s+at\s+|\s+-\s+)",
                1,
            )?,
        ];

        let organization_rules = vec![
            ExtractionRule::new(
                "organization_label",
                r"(?i)(?:company|organization|org):\s*([^\n]+)",
                1,
            )?,
            ExtractionRule::new(
                "organization_after_preposition",
                r"(?:at|join|with)\s+([A-Z][A-Za-z0-9\s&.]+?)(?:\s+is\s+|\s+in\s+|\.|,)",
                1,
            )?,
            ExtractionRule::new(
                "organization_is_hiring",
                r"([A-Z][A-Za-z0-9\s&.]{2,30})\s+is\s+(?:seeking|looking|hiring)",
                1,
            )?,
        ];

        let insight_rules = vec![
            ExtractionRule::new(
                "insight_label",
                r"(?i)(?:mission|vision|purpose|about us):\s*([^.!?]+[.!?])",
                1,
            )?,
            ExtractionRule::new(
                "insight_we_are",
                r"(?i)(?:we|our organization|our company)\s+(?:is|are)\s+([^.!?]+[.!?])",
                1,
            )?,
            ExtractionRule::new(
                "insight_we_aim",
                r"(?i)(?:our mission is to|we aim to|we work to|we strive to)\s+([^.!?]+[.!?])",
                1,
            )?,
        ];

        let sector_matchers = SECTOR_KEYWORDS
            .iter()
            .map(|(sector, keywords)| -> Result<SectorMatcher, regex::Error> {
                let keywords = keywords
                    .iter()
                    .map(|keyword| Regex::new(&format!(r"\b{}\b", regex::escape(keyword))))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SectorMatcher {
                    sector: *sector,
                    keywords,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            role_rules,
            organization_rules,
            insight_rules,
            sector_matchers,
        })
    }

    /// Classifies raw job-description text. Never fails; missing signals
    /// leave fields empty and confidence LOW.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let role = first_match(&self.role_rules, text).unwrap_or_else(|| first_line(text));
        let organization = first_match(&self.organization_rules, text).unwrap_or_default();
        let (sector, score) = self.score_sectors(text);
        let organization_insight = first_match(&self.insight_rules, text)
            .map(|insight| truncate_chars(&insight, INSIGHT_MAX_CHARS))
            .unwrap_or_default();

        AnalysisResult {
            role,
            organization,
            sector,
            organization_insight,
            confidence_level: ConfidenceLevel::from_score(score),
            template: None,
            routing_target: None,
            themes: Vec::new(),
        }
    }

    /// Winning sector and its keyword score. Ties keep the earlier sector.
    pub fn score_sectors(&self, text: &str) -> (Sector, usize) {
        let lowered = text.to_lowercase();
        let mut best = (Sector::default(), 0);
        for matcher in &self.sector_matchers {
            let score = matcher.score(&lowered);
            if score > best.1 {
                best = (matcher.sector, score);
            }
        }
        best
    }
}

fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| truncate_chars(line, ROLE_FALLBACK_MAX_CHARS))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELED_JD: &str = "Job Title: Director of Partnerships\n\
        Company: Vital Voices Global Partnership\n\
        Mission: To advance women leaders worldwide. We are growing.\n\
        Responsibilities: partnerships, alliance building, stakeholder engagement and business development.";

    const DELIMITED_JD: &str = "Senior Program Manager at Acme Corp.\n\
        You will own delivery across teams.";

    const CLIMATE_JD: &str = "Climate and sustainability lead\n\
        We focus on climate finance, carbon removal and carbon accounting.";

    fn classifier() -> Classifier {
        Classifier::new().unwrap()
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let result = classifier().analyze("");
        assert_eq!(result.role, "");
        assert_eq!(result.organization, "");
        assert_eq!(result.organization_insight, "");
        assert_eq!(result.sector, Sector::PartnershipsBd);
        assert_eq!(result.confidence_level, ConfidenceLevel::Low);
        assert!(result.template.is_none());
        assert!(result.routing_target.is_none());
        assert!(result.themes.is_empty());
    }

    #[test]
    fn test_labeled_fields_win() {
        let result = classifier().analyze(LABELED_JD);
        assert_eq!(result.role, "Director of Partnerships");
        assert_eq!(result.organization, "Vital Voices Global Partnership");
        assert_eq!(result.organization_insight, "To advance women leaders worldwide.");
        assert_eq!(result.sector, Sector::PartnershipsBd);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn test_delimiter_rule_extracts_role_and_organization() {
        let result = classifier().analyze(DELIMITED_JD);
        assert_eq!(result.role, "Senior Program Manager");
        assert_eq!(result.organization, "Acme Corp");
    }

    #[test]
    fn test_dash_delimiter_extracts_role() {
        let result = classifier().analyze("Data Scientist - Remote (US)\nBuild models.");
        assert_eq!(result.role, "Data Scientist");
    }

    #[test]
    fn test_role_falls_back_to_first_non_blank_line() {
        let result = classifier().analyze("\n\n   \n  Head of Operations\nSecond line");
        assert_eq!(result.role, "Head of Operations");
    }

    #[test]
    fn test_role_fallback_truncates_to_80_chars() {
        let result = classifier().analyze(&"x".repeat(120));
        assert_eq!(result.role.chars().count(), ROLE_FALLBACK_MAX_CHARS);
    }

    #[test]
    fn test_organization_from_is_seeking_phrase() {
        let result = classifier().analyze("Greenfield Labs is seeking a data lead.");
        assert_eq!(result.organization, "Greenfield Labs");
    }

    #[test]
    fn test_no_organization_signal_leaves_it_empty() {
        let result = classifier().analyze("build dashboards and write reports");
        assert_eq!(result.organization, "");
    }

    #[test]
    fn test_climate_keywords_route_to_climate_with_high_confidence() {
        let c = classifier();
        assert_eq!(c.score_sectors(CLIMATE_JD), (Sector::ClimateEsg, 5));

        let result = c.analyze(CLIMATE_JD);
        assert_eq!(result.sector, Sector::ClimateEsg);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive_and_whole_word() {
        let c = classifier();
        assert_eq!(c.score_sectors("CLIMATE Climate climate"), (Sector::ClimateEsg, 3));
        // "ai" inside other words never counts
        assert_eq!(c.score_sectors("maintain email"), (Sector::PartnershipsBd, 0));
    }

    #[test]
    fn test_multi_word_keywords_count_alongside_their_parts() {
        // "market research" and "research" both score
        assert_eq!(
            classifier().score_sectors("market research"),
            (Sector::ResearchStrategy, 2)
        );
    }

    #[test]
    fn test_tie_keeps_earlier_declared_sector() {
        let c = classifier();
        assert_eq!(c.score_sectors("ai policy").0, Sector::AiTech);
        assert_eq!(c.score_sectors("policy ai").0, Sector::AiTech);
        assert_eq!(c.score_sectors("fintech climate").0, Sector::ClimateEsg);
    }

    #[test]
    fn test_confidence_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(1), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(2), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(3), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(4), ConfidenceLevel::High);
    }

    #[test]
    fn test_medium_confidence_from_two_hits() {
        let result = classifier().analyze("payments and crypto");
        assert_eq!(result.sector, Sector::Fintech);
        assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
    }

    #[test]
    fn test_insight_from_we_are_sentence() {
        let result = classifier().analyze("Our company is building tools for refugees. Join us.");
        assert_eq!(result.organization_insight, "building tools for refugees.");
    }

    #[test]
    fn test_insight_from_mission_statement() {
        let result =
            classifier().analyze("Our mission is to expand access to clean water! Apply today.");
        assert_eq!(result.organization_insight, "expand access to clean water!");
    }

    #[test]
    fn test_insight_truncated_to_200_chars() {
        let text = format!("Mission: {}.", "a".repeat(300));
        let result = classifier().analyze(&text);
        assert_eq!(result.organization_insight.chars().count(), INSIGHT_MAX_CHARS);
    }

    #[test]
    fn test_confidence_parse() {
        assert_eq!(ConfidenceLevel::parse("high"), Some(ConfidenceLevel::High));
        assert_eq!(ConfidenceLevel::parse(" Medium "), Some(ConfidenceLevel::Medium));
        assert_eq!(ConfidenceLevel::parse("certain"), None);
    }

    #[test]
    fn test_result_serializes_with_camel_case_wire_names() {
        let value = serde_json::to_value(classifier().analyze(DELIMITED_JD)).unwrap();
        assert_eq!(value["role"], "Senior Program Manager");
        assert_eq!(value["organization"], "Acme Corp");
        assert!(value["confidenceLevel"].is_string());
        assert!(value["organizationInsight"].is_string());
        assert!(value["routingTarget"].is_null());
        assert!(value["template"].is_null());
        assert_eq!(value["themes"], serde_json::json!([]));
    }

    #[test]
    fn test_invariants_hold_across_varied_inputs() {
        let c = classifier();
        let accents = "é".repeat(500);
        let inputs = [
            "",
            "   \n\t  ",
            LABELED_JD,
            DELIMITED_JD,
            CLIMATE_JD,
            "Résumé review \u{2014} Ñandú Institute seeks an AI lead",
            "Title:\n",
            "at , with . join",
            accents.as_str(),
            "grants grants fundraising donor philanthropy foundation",
        ];

        for input in inputs {
            let first = c.analyze(input);
            let second = c.analyze(input);
            assert_eq!(first, second, "analysis must be deterministic");

            assert!(Sector::ALL.contains(&first.sector));
            let (sector, score) = c.score_sectors(input);
            assert_eq!(first.sector, sector);
            assert_eq!(first.confidence_level, ConfidenceLevel::from_score(score));
            assert!(first.organization_insight.chars().count() <= INSIGHT_MAX_CHARS);
        }
    }
}
