//! Classification of free-text handover status messages.
//!
//! Messages are matched against an ordered rule list; the first rule that
//! matches decides the [`Outcome`]. The order matters because patterns overlap:
//! a message ending in "Handover ... successful" is a success even when it
//! also mentions "failed" earlier on.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
    Running,
    Unknown,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        matches!(self, Outcome::Success | Outcome::Failure)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
            Outcome::Running => write!(f, "running"),
            Outcome::Unknown => write!(f, "unknown"),
        }
    }
}

/// In-progress pipeline stage named by a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Handling,
    Datachecks,
    Metadata,
    Copying,
    Dispatching,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Handling => write!(f, "handling"),
            Phase::Datachecks => write!(f, "datachecks"),
            Phase::Metadata => write!(f, "metadata"),
            Phase::Copying => write!(f, "copying"),
            Phase::Dispatching => write!(f, "dispatching"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub outcome: Outcome,
    /// Keyword that labelled a running job, if any.
    pub phase: Option<Phase>,
    /// Metadata loading failed; the console shows the auxiliary status panel.
    pub metadata_failed: bool,
}

struct StatusRule {
    pattern: Regex,
    outcome: Outcome,
    phase: Option<Phase>,
}

impl StatusRule {
    fn new(pattern: &str, outcome: Outcome, phase: Option<Phase>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid status pattern"),
            outcome,
            phase,
        }
    }
}

// First match wins.
static RULES: Lazy<Vec<StatusRule>> = Lazy::new(|| {
    vec![
        StatusRule::new(r"(?s)Handover.*successful$", Outcome::Success, None),
        StatusRule::new("failed", Outcome::Failure, None),
        StatusRule::new("problems", Outcome::Failure, None),
        StatusRule::new("Handling", Outcome::Running, Some(Phase::Handling)),
        StatusRule::new("Datachecks", Outcome::Running, Some(Phase::Datachecks)),
        StatusRule::new("metadata", Outcome::Running, Some(Phase::Metadata)),
        StatusRule::new("Copying", Outcome::Running, Some(Phase::Copying)),
        StatusRule::new("Dispatching", Outcome::Running, Some(Phase::Dispatching)),
    ]
});

static METADATA_FAILED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^Metadata.*failed").expect("valid metadata pattern"));

/// Classifies a status message into an [`Outcome`].
pub fn classify(message: &str) -> Outcome {
    classify_message(message).outcome
}

/// Classifies a status message and reports the phase keyword and metadata flag.
///
/// Messages matching no rule, including the empty string, are `Unknown`.
pub fn classify_message(message: &str) -> Classification {
    let metadata_failed = METADATA_FAILED.is_match(message);
    let (outcome, phase) = RULES
        .iter()
        .find(|rule| rule.pattern.is_match(message))
        .map(|rule| (rule.outcome, rule.phase))
        .unwrap_or((Outcome::Unknown, None));

    Classification {
        outcome,
        phase,
        metadata_failed,
    }
}
