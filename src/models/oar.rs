//! Outcome, Analysis and Resolution: the three stages of the OAR lifecycle.
//!
//! Wire spellings are PascalCase (`"Passed"`, `"TruePositive"`, ...) and are
//! stored verbatim in the database.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw pass/fail fact of a test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Outcome {
    Passed,
    Failed,
}

impl Outcome {
    pub const ALL: [Outcome; 2] = [Self::Passed, Self::Failed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Passed" => Some(Self::Passed),
            "Failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Analyses (besides `NotAnalyzed`) that may be assigned to a test with this outcome.
    ///
    /// A passing test can only be a true or false negative; a failing test can
    /// only be a true or false positive.
    pub fn permitted_analyses(&self) -> [Analysis; 2] {
        match self {
            Self::Passed => [Analysis::TrueNegative, Analysis::FalseNegative],
            Self::Failed => [Analysis::TruePositive, Analysis::FalsePositive],
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of why an outcome occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Analysis {
    NotAnalyzed,
    TruePositive,
    FalsePositive,
    TrueNegative,
    FalseNegative,
}

impl Analysis {
    pub const ALL: [Analysis; 5] = [
        Self::NotAnalyzed,
        Self::TruePositive,
        Self::FalsePositive,
        Self::TrueNegative,
        Self::FalseNegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAnalyzed => "NotAnalyzed",
            Self::TruePositive => "TruePositive",
            Self::FalsePositive => "FalsePositive",
            Self::TrueNegative => "TrueNegative",
            Self::FalseNegative => "FalseNegative",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NotAnalyzed" => Some(Self::NotAnalyzed),
            "TruePositive" => Some(Self::TruePositive),
            "FalsePositive" => Some(Self::FalsePositive),
            "TrueNegative" => Some(Self::TrueNegative),
            "FalseNegative" => Some(Self::FalseNegative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Disposition taken in response to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Resolution {
    Unresolved,
    NotNeeded,
    TicketCreated,
    QuickFix,
    KnownIssue,
    TestFixed,
    TestDisabled,
}

impl Resolution {
    pub const ALL: [Resolution; 7] = [
        Self::Unresolved,
        Self::NotNeeded,
        Self::TicketCreated,
        Self::QuickFix,
        Self::KnownIssue,
        Self::TestFixed,
        Self::TestDisabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unresolved => "Unresolved",
            Self::NotNeeded => "NotNeeded",
            Self::TicketCreated => "TicketCreated",
            Self::QuickFix => "QuickFix",
            Self::KnownIssue => "KnownIssue",
            Self::TestFixed => "TestFixed",
            Self::TestDisabled => "TestDisabled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Unresolved" => Some(Self::Unresolved),
            "NotNeeded" => Some(Self::NotNeeded),
            "TicketCreated" => Some(Self::TicketCreated),
            "QuickFix" => Some(Self::QuickFix),
            "KnownIssue" => Some(Self::KnownIssue),
            "TestFixed" => Some(Self::TestFixed),
            "TestDisabled" => Some(Self::TestDisabled),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
