use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight stages a Digital Employee passes through from sale to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseType {
    SalesHandover,
    Kickoff,
    DesignWeek,
    Onboarding,
    Uat,
    GoLive,
    Hypercare,
    HandoverToSupport,
}

impl PhaseType {
    pub const COUNT: usize = 8;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::SalesHandover,
            Self::Kickoff,
            Self::DesignWeek,
            Self::Onboarding,
            Self::Uat,
            Self::GoLive,
            Self::Hypercare,
            Self::HandoverToSupport,
        ]
    }

    /// Position in the journey, starting at 1.
    pub const fn order(self) -> u8 {
        match self {
            Self::SalesHandover => 1,
            Self::Kickoff => 2,
            Self::DesignWeek => 3,
            Self::Onboarding => 4,
            Self::Uat => 5,
            Self::GoLive => 6,
            Self::Hypercare => 7,
            Self::HandoverToSupport => 8,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self.order() as usize - 1
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SalesHandover => "Sales Handover",
            Self::Kickoff => "Kickoff",
            Self::DesignWeek => "Design Week",
            Self::Onboarding => "Onboarding",
            Self::Uat => "UAT",
            Self::GoLive => "Go Live",
            Self::Hypercare => "Hypercare",
            Self::HandoverToSupport => "Handover to Support",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::SalesHandover => "SALES_HANDOVER",
            Self::Kickoff => "KICKOFF",
            Self::DesignWeek => "DESIGN_WEEK",
            Self::Onboarding => "ONBOARDING",
            Self::Uat => "UAT",
            Self::GoLive => "GO_LIVE",
            Self::Hypercare => "HYPERCARE",
            Self::HandoverToSupport => "HANDOVER_TO_SUPPORT",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::ordered().get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::ordered().get(index).copied())
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PhaseType {
    type Err = PhaseParseError;

    /// Accepts `DESIGN_WEEK`, `design-week` and `Design Week` spellings.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .replace(['-', ' '], "_")
            .to_ascii_uppercase();

        Self::ordered()
            .into_iter()
            .find(|phase| phase.key() == normalized)
            .ok_or_else(|| PhaseParseError(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase type '{0}'")]
pub struct PhaseParseError(pub String);

/// One row of the phase catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseDefinition {
    pub phase: PhaseType,
    pub order: u8,
    pub standard_duration_days: u32,
    /// Support activity after go-live; excluded from completion projections.
    pub post_completion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("phase catalog must list {expected} phases, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("phase {0} appears out of order or more than once")]
    OutOfOrder(PhaseType),
    #[error("phase {phase} declares order {declared}, expected {expected}")]
    OrderMismatch {
        phase: PhaseType,
        declared: u8,
        expected: u8,
    },
    #[error("phase {0} must have a positive standard duration")]
    ZeroDuration(PhaseType),
    #[error("delivery phase {0} follows a post-completion phase")]
    PostCompletionGap(PhaseType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceStatus {
    Early,
    OnTime,
    Late,
}

impl VarianceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Early => "Early",
            Self::OnTime => "On Time",
            Self::Late => "Late",
        }
    }
}

/// Signed difference between planned and actual business days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleVariance {
    pub days: i64,
    pub percent: i64,
    pub status: VarianceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Upcoming,
    InProgress,
    Completed,
}

impl PhaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// Recorded actuals for a phase that has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: PhaseType,
    pub started_on: NaiveDate,
    #[serde(default)]
    pub completed_on: Option<NaiveDate>,
}
