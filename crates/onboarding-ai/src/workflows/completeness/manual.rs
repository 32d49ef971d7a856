//! Profile fields typed in by a human instead of extracted from documents.
//!
//! A filled field is equivalent evidence to an approved extracted item of the
//! matching type, so the scorer only needs the set of types a profile covers.

use super::domain::ExtractedItemType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualProfile {
    pub business: BusinessProfileFields,
    pub technical: TechnicalProfileFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfileFields {
    pub stakeholders: Vec<StakeholderEntry>,
    pub goals: Vec<String>,
    pub kpis: Vec<KpiEntry>,
    pub volume_expectations: Vec<String>,
    pub process: ProcessFields,
    pub scope: ScopeFields,
    pub channels: Vec<ChannelEntry>,
    pub guardrails: GuardrailFields,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakeholderEntry {
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiEntry {
    pub name: String,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessFields {
    pub happy_path: Vec<String>,
    pub exceptions: Vec<String>,
    pub business_rules: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeFields {
    pub in_scope: Vec<String>,
    pub out_of_scope: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelEntry {
    pub name: String,
    pub monthly_volume: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailFields {
    pub never: Vec<String>,
    pub must: Vec<String>,
    pub escalations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalProfileFields {
    pub integrations: Vec<IntegrationEntry>,
    pub data_fields: Vec<String>,
    pub security_requirements: Vec<String>,
    pub compliance_requirements: Vec<String>,
    pub test_scenarios: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationEntry {
    pub system: String,
    pub purpose: Option<String>,
    /// Credentials or access method agreed with the customer.
    pub access: Option<String>,
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn any_filled(values: &[String]) -> bool {
    values.iter().any(|value| filled(value))
}

impl ManualProfile {
    /// Every item type the manual entry satisfies.
    pub fn covered_types(&self) -> BTreeSet<ExtractedItemType> {
        let business = &self.business;
        let technical = &self.technical;

        let checks = [
            (
                ExtractedItemType::Stakeholder,
                business.stakeholders.iter().any(|entry| filled(&entry.name)),
            ),
            (ExtractedItemType::Goal, any_filled(&business.goals)),
            (
                ExtractedItemType::Kpi,
                business.kpis.iter().any(|entry| filled(&entry.name)),
            ),
            (
                ExtractedItemType::VolumeExpectation,
                any_filled(&business.volume_expectations)
                    || business
                        .channels
                        .iter()
                        .any(|entry| entry.monthly_volume.is_some_and(|volume| volume > 0)),
            ),
            (
                ExtractedItemType::HappyPathStep,
                any_filled(&business.process.happy_path),
            ),
            (
                ExtractedItemType::ExceptionCase,
                any_filled(&business.process.exceptions),
            ),
            (
                ExtractedItemType::BusinessRule,
                any_filled(&business.process.business_rules),
            ),
            (ExtractedItemType::ScopeIn, any_filled(&business.scope.in_scope)),
            (
                ExtractedItemType::ScopeOut,
                any_filled(&business.scope.out_of_scope),
            ),
            (
                ExtractedItemType::Channel,
                business.channels.iter().any(|entry| filled(&entry.name)),
            ),
            (
                ExtractedItemType::GuardrailNever,
                any_filled(&business.guardrails.never),
            ),
            (
                ExtractedItemType::GuardrailMust,
                any_filled(&business.guardrails.must),
            ),
            (
                ExtractedItemType::EscalationRule,
                any_filled(&business.guardrails.escalations),
            ),
            (
                ExtractedItemType::Integration,
                technical
                    .integrations
                    .iter()
                    .any(|entry| filled(&entry.system)),
            ),
            (
                ExtractedItemType::SystemAccess,
                technical.integrations.iter().any(|entry| {
                    filled(&entry.system) && entry.access.as_deref().is_some_and(filled)
                }),
            ),
            (ExtractedItemType::DataField, any_filled(&technical.data_fields)),
            (
                ExtractedItemType::SecurityRequirement,
                any_filled(&technical.security_requirements),
            ),
            (
                ExtractedItemType::ComplianceRequirement,
                any_filled(&technical.compliance_requirements),
            ),
            (
                ExtractedItemType::TestScenario,
                any_filled(&technical.test_scenarios),
            ),
        ];

        checks
            .into_iter()
            .filter_map(|(item_type, covered)| covered.then_some(item_type))
            .collect()
    }
}
