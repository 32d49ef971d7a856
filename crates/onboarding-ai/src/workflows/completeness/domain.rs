use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content categories the extraction pipeline classifies items into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractedItemType {
    Stakeholder,
    Goal,
    Kpi,
    VolumeExpectation,
    HappyPathStep,
    ExceptionCase,
    BusinessRule,
    ScopeIn,
    ScopeOut,
    Channel,
    GuardrailNever,
    GuardrailMust,
    EscalationRule,
    Integration,
    SystemAccess,
    DataField,
    SecurityRequirement,
    ComplianceRequirement,
    TestScenario,
}

impl ExtractedItemType {
    pub const fn all() -> [Self; 19] {
        [
            Self::Stakeholder,
            Self::Goal,
            Self::Kpi,
            Self::VolumeExpectation,
            Self::HappyPathStep,
            Self::ExceptionCase,
            Self::BusinessRule,
            Self::ScopeIn,
            Self::ScopeOut,
            Self::Channel,
            Self::GuardrailNever,
            Self::GuardrailMust,
            Self::EscalationRule,
            Self::Integration,
            Self::SystemAccess,
            Self::DataField,
            Self::SecurityRequirement,
            Self::ComplianceRequirement,
            Self::TestScenario,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Stakeholder => "STAKEHOLDER",
            Self::Goal => "GOAL",
            Self::Kpi => "KPI",
            Self::VolumeExpectation => "VOLUME_EXPECTATION",
            Self::HappyPathStep => "HAPPY_PATH_STEP",
            Self::ExceptionCase => "EXCEPTION_CASE",
            Self::BusinessRule => "BUSINESS_RULE",
            Self::ScopeIn => "SCOPE_IN",
            Self::ScopeOut => "SCOPE_OUT",
            Self::Channel => "CHANNEL",
            Self::GuardrailNever => "GUARDRAIL_NEVER",
            Self::GuardrailMust => "GUARDRAIL_MUST",
            Self::EscalationRule => "ESCALATION_RULE",
            Self::Integration => "INTEGRATION",
            Self::SystemAccess => "SYSTEM_ACCESS",
            Self::DataField => "DATA_FIELD",
            Self::SecurityRequirement => "SECURITY_REQUIREMENT",
            Self::ComplianceRequirement => "COMPLIANCE_REQUIREMENT",
            Self::TestScenario => "TEST_SCENARIO",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Stakeholder => "Stakeholder",
            Self::Goal => "Goal",
            Self::Kpi => "KPI",
            Self::VolumeExpectation => "Volume Expectation",
            Self::HappyPathStep => "Happy Path Step",
            Self::ExceptionCase => "Exception Case",
            Self::BusinessRule => "Business Rule",
            Self::ScopeIn => "In Scope",
            Self::ScopeOut => "Out of Scope",
            Self::Channel => "Channel",
            Self::GuardrailNever => "Guardrail (Never)",
            Self::GuardrailMust => "Guardrail (Must)",
            Self::EscalationRule => "Escalation Rule",
            Self::Integration => "Integration",
            Self::SystemAccess => "System Access",
            Self::DataField => "Data Field",
            Self::SecurityRequirement => "Security Requirement",
            Self::ComplianceRequirement => "Compliance Requirement",
            Self::TestScenario => "Test Scenario",
        }
    }
}

impl fmt::Display for ExtractedItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExtractedItemType {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_key(value);
        Self::all()
            .into_iter()
            .find(|item_type| item_type.key() == normalized)
            .ok_or_else(|| UnknownValue {
                kind: "item type",
                value: value.to_string(),
            })
    }
}

/// Review state of an extracted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Pending,
    NeedsClarification,
    Approved,
    Rejected,
}

impl ItemStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::NeedsClarification => "Needs Clarification",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Still waiting on a human decision.
    pub const fn awaiting_review(self) -> bool {
        matches!(self, Self::Pending | Self::NeedsClarification)
    }
}

impl FromStr for ItemStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_key(value).as_str() {
            "PENDING" => Ok(Self::Pending),
            "NEEDS_CLARIFICATION" => Ok(Self::NeedsClarification),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(UnknownValue {
                kind: "item status",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// One atomic fact pulled from an uploaded document or transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ExtractedItemType,
    pub status: ItemStatus,
    /// Evidence back-reference only; never used for scoring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_session: Option<String>,
}

impl ExtractedItem {
    pub fn new(id: impl Into<String>, item_type: ExtractedItemType, status: ItemStatus) -> Self {
        Self {
            id: id.into(),
            item_type,
            status,
            source_session: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    Business,
    Technical,
}

impl ProfileKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Business => "Business Profile",
            Self::Technical => "Technical Profile",
        }
    }
}

impl FromStr for ProfileKind {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_key(value).as_str() {
            "BUSINESS" => Ok(Self::Business),
            "TECHNICAL" => Ok(Self::Technical),
            _ => Err(UnknownValue {
                kind: "profile",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Identity,
    Objectives,
    Process,
    Scope,
    Channels,
    Guardrails,
    Integrations,
    DataFields,
    Security,
    Testing,
}

impl SectionKey {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "Identity & Stakeholders",
            Self::Objectives => "Objectives & Volumes",
            Self::Process => "Process",
            Self::Scope => "Scope",
            Self::Channels => "Channels",
            Self::Guardrails => "Guardrails",
            Self::Integrations => "Integrations",
            Self::DataFields => "Data Fields",
            Self::Security => "Security & Compliance",
            Self::Testing => "Test Scenarios",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper-cases and joins words with underscores so `happy-path step`,
/// `Happy Path Step` and `HAPPY_PATH_STEP` compare equal.
pub(crate) fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_uppercase()
}
