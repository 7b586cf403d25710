//! The classification-result data contract.
//!
//! Field names and value domains here are the wire contract with the
//! classifier service and the archive blob; they must not drift. Scores are
//! untrusted input: the service is asked to make them sum to ~100, but no
//! code path may assume they do.

use serde::{Deserialize, Serialize};

/// Three-way percentage split across the responsibility domains.
///
/// Each value is conceptually in `[0, 100]`. Consumers must tolerate sums
/// other than exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationScores {
    pub my_domain: u32,
    pub others_domain: u32,
    pub life_domain: u32,
}

impl ClassificationScores {
    /// Weight the user is not obligated to carry: OTHERS + LIFE.
    ///
    /// Not clamped; may exceed 100 when the inputs don't sum to 100. The sum
    /// saturates: the scores are untrusted and may each be up to `u32::MAX`.
    pub fn unnecessary_load(&self) -> u32 {
        self.others_domain.saturating_add(self.life_domain)
    }

    /// Weight within the user's own control.
    pub fn actionable_agency(&self) -> u32 {
        self.my_domain
    }
}

/// A responsibility domain. Serialized as the exact literals the classifier
/// is constrained to; any other string is a malformed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Domain {
    #[serde(rename = "我的事")]
    #[strum(to_string = "我的事")]
    Mine,
    #[serde(rename = "別人的事")]
    #[strum(to_string = "別人的事")]
    Others,
    #[serde(rename = "天的事")]
    #[strum(to_string = "天的事")]
    Life,
}

impl Domain {
    /// English subtitle shown under the dominant-domain headline.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Domain::Mine => "My Responsibility",
            Domain::Others => "Not Your Control",
            Domain::Life => "Life's Domain",
        }
    }

    /// Styling accent. A pure function of the dominant domain; no numeric
    /// input is involved.
    pub fn accent(&self) -> Accent {
        match self {
            Domain::Mine => Accent::Magenta,
            Domain::Others => Accent::Amber,
            Domain::Life => Accent::Purple,
        }
    }
}

/// Accent color class for rendering. The original palette is pink / amber /
/// purple; terminal rendering maps these onto the nearest ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Magenta,
    Amber,
    Purple,
}

/// The immutable record of one classification event.
///
/// `timestamp` and `original_input` are attached by the caller after a
/// successful classify, never by the service. The timestamp is the dedup key
/// for the archive: re-committing a logged entry is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgencyResult {
    pub classification: ClassificationScores,
    /// Which domain the classifier judged primary. Independently supplied;
    /// may disagree with the max score, and is the source of truth for
    /// display regardless.
    pub dominant_domain: Domain,
    pub one_sentence_reason: String,
    pub recommended_action: String,
    pub optional_reframe: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_input: Option<String>,
}

impl AgencyResult {
    /// Stamp the client-side fields, finalizing an ephemeral result for
    /// display and (eventually) the archive.
    pub fn finalized(mut self, timestamp: String, original_input: String) -> Self {
        self.timestamp = Some(timestamp);
        self.original_input = Some(original_input);
        self
    }

    /// Achievement label for the result. Branches are evaluated in order;
    /// the first match wins.
    pub fn achievement(&self) -> Achievement {
        if self.classification.unnecessary_load() > 60 {
            Achievement::HighRelief
        } else if self.dominant_domain == Domain::Mine {
            Achievement::FullControl
        } else {
            Achievement::Clarity
        }
    }
}

/// Derived achievement badge shown on the result view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    HighRelief,
    FullControl,
    Clarity,
}

impl Achievement {
    pub fn label(&self) -> &'static str {
        match self {
            Achievement::HighRelief => "High Relief Achieved",
            Achievement::FullControl => "Full Control Unlocked",
            Achievement::Clarity => "Clarity Restored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(my: u32, others: u32, life: u32, dominant: Domain) -> AgencyResult {
        AgencyResult {
            classification: ClassificationScores {
                my_domain: my,
                others_domain: others,
                life_domain: life,
            },
            dominant_domain: dominant,
            one_sentence_reason: "reason".into(),
            recommended_action: "action".into(),
            optional_reframe: "reframe".into(),
            timestamp: None,
            original_input: None,
        }
    }

    #[test]
    fn unnecessary_load_sums_others_and_life() {
        let r = result(20, 50, 30, Domain::Others);
        assert_eq!(r.classification.unnecessary_load(), 80);
    }

    #[test]
    fn load_is_not_clamped_when_scores_overflow_100() {
        let r = result(40, 80, 70, Domain::Others);
        assert_eq!(r.classification.unnecessary_load(), 150);
    }

    #[test]
    fn extreme_scores_saturate_instead_of_overflowing() {
        // Schema-valid but absurd scores must never panic downstream.
        let payload = r#"{
            "classification": {"my_domain": 0, "others_domain": 4294967295, "life_domain": 1},
            "dominant_domain": "別人的事",
            "one_sentence_reason": "r",
            "recommended_action": "a",
            "optional_reframe": "f"
        }"#;
        let r: AgencyResult = serde_json::from_str(payload).unwrap();
        assert_eq!(r.classification.unnecessary_load(), u32::MAX);
        assert_eq!(r.achievement(), Achievement::HighRelief);
    }

    #[test]
    fn high_load_wins_over_dominant_mine() {
        // load > 60 branch fires first even when MINE dominates.
        let r = result(20, 50, 30, Domain::Mine);
        assert_eq!(r.achievement(), Achievement::HighRelief);
        assert_eq!(r.achievement().label(), "High Relief Achieved");
    }

    #[test]
    fn dominant_mine_with_low_load_unlocks_full_control() {
        let r = result(70, 20, 10, Domain::Mine);
        assert_eq!(r.classification.unnecessary_load(), 30);
        assert_eq!(r.achievement(), Achievement::FullControl);
    }

    #[test]
    fn load_of_exactly_60_is_not_high_relief() {
        let r = result(10, 40, 20, Domain::Others);
        assert_eq!(r.classification.unnecessary_load(), 60);
        assert_eq!(r.achievement(), Achievement::Clarity);
        assert_eq!(r.achievement().label(), "Clarity Restored");
    }

    #[test]
    fn domain_serializes_to_wire_literals() {
        assert_eq!(serde_json::to_string(&Domain::Mine).unwrap(), "\"我的事\"");
        assert_eq!(serde_json::to_string(&Domain::Others).unwrap(), "\"別人的事\"");
        assert_eq!(serde_json::to_string(&Domain::Life).unwrap(), "\"天的事\"");
    }

    #[test]
    fn domain_rejects_literals_outside_the_set() {
        assert!(serde_json::from_str::<Domain>("\"unknown\"").is_err());
        assert!(serde_json::from_str::<Domain>("\"mine\"").is_err());
    }

    #[test]
    fn result_rejects_unknown_fields() {
        let payload = r#"{
            "classification": {"my_domain": 10, "others_domain": 40, "life_domain": 50},
            "dominant_domain": "天的事",
            "one_sentence_reason": "r",
            "recommended_action": "a",
            "optional_reframe": "f",
            "extra": true
        }"#;
        assert!(serde_json::from_str::<AgencyResult>(payload).is_err());
    }

    #[test]
    fn result_rejects_missing_required_field() {
        let payload = r#"{
            "classification": {"my_domain": 10, "others_domain": 40, "life_domain": 50},
            "one_sentence_reason": "r",
            "recommended_action": "a",
            "optional_reframe": "f"
        }"#;
        assert!(serde_json::from_str::<AgencyResult>(payload).is_err());
    }

    #[test]
    fn finalized_attaches_client_fields() {
        let r = result(70, 20, 10, Domain::Mine)
            .finalized("2026-08-28T12:00:00+00:00".into(), "老細又改需求".into());
        assert_eq!(r.timestamp.as_deref(), Some("2026-08-28T12:00:00+00:00"));
        assert_eq!(r.original_input.as_deref(), Some("老細又改需求"));
    }

    #[test]
    fn serde_round_trip_preserves_all_fields() {
        let r = result(10, 40, 50, Domain::Life)
            .finalized("2026-08-28T09:30:00+00:00".into(), "input".into());
        let json = serde_json::to_string(&r).unwrap();
        let back: AgencyResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
