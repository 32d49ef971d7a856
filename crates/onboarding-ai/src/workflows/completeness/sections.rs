use super::domain::{ExtractedItemType, ProfileKind, SectionKey};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

static STANDARD_MAPPING: OnceLock<SectionMapping> = OnceLock::new();

/// Which item types count as evidence for a section and how many are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDefinition {
    pub key: SectionKey,
    pub profile: ProfileKind,
    pub item_types: Vec<ExtractedItemType>,
    pub required_count: u32,
}

impl SectionDefinition {
    pub fn new(
        key: SectionKey,
        profile: ProfileKind,
        item_types: Vec<ExtractedItemType>,
        required_count: u32,
    ) -> Self {
        Self {
            key,
            profile,
            item_types,
            required_count,
        }
    }

    pub fn label(&self) -> &'static str {
        self.key.label()
    }

    pub fn maps(&self, item_type: ExtractedItemType) -> bool {
        self.item_types.contains(&item_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionMappingError {
    #[error("section '{0}' is defined more than once")]
    DuplicateSection(SectionKey),
    #[error("item type {item_type} is mapped to both '{first}' and '{second}'")]
    DuplicateType {
        item_type: ExtractedItemType,
        first: SectionKey,
        second: SectionKey,
    },
}

/// Section table shared by every completeness calculation.
#[derive(Debug, Clone)]
pub struct SectionMapping {
    sections: Vec<SectionDefinition>,
}

impl SectionMapping {
    pub fn new(sections: Vec<SectionDefinition>) -> Result<Self, SectionMappingError> {
        let mut keys = HashSet::new();
        for (position, section) in sections.iter().enumerate() {
            if !keys.insert(section.key) {
                return Err(SectionMappingError::DuplicateSection(section.key));
            }

            for item_type in &section.item_types {
                if let Some(earlier) = sections[..position]
                    .iter()
                    .find(|earlier| earlier.maps(*item_type))
                {
                    return Err(SectionMappingError::DuplicateType {
                        item_type: *item_type,
                        first: earlier.key,
                        second: section.key,
                    });
                }
            }
        }

        Ok(Self { sections })
    }

    pub fn standard() -> &'static Self {
        STANDARD_MAPPING.get_or_init(|| Self {
            sections: standard_sections(),
        })
    }

    pub fn sections(&self) -> &[SectionDefinition] {
        &self.sections
    }

    pub fn sections_for(&self, profile: ProfileKind) -> impl Iterator<Item = &SectionDefinition> {
        self.sections
            .iter()
            .filter(move |section| section.profile == profile)
    }

    pub fn section(&self, key: SectionKey) -> Option<&SectionDefinition> {
        self.sections.iter().find(|section| section.key == key)
    }

    pub fn section_for_type(&self, item_type: ExtractedItemType) -> Option<&SectionDefinition> {
        self.sections.iter().find(|section| section.maps(item_type))
    }
}

fn standard_sections() -> Vec<SectionDefinition> {
    use ExtractedItemType::*;
    use ProfileKind::{Business, Technical};

    vec![
        SectionDefinition::new(SectionKey::Identity, Business, vec![Stakeholder, Goal], 2),
        SectionDefinition::new(
            SectionKey::Objectives,
            Business,
            vec![Kpi, VolumeExpectation],
            2,
        ),
        SectionDefinition::new(
            SectionKey::Process,
            Business,
            vec![HappyPathStep, ExceptionCase, BusinessRule],
            5,
        ),
        SectionDefinition::new(SectionKey::Scope, Business, vec![ScopeIn, ScopeOut], 2),
        SectionDefinition::new(SectionKey::Channels, Business, vec![Channel], 1),
        SectionDefinition::new(
            SectionKey::Guardrails,
            Business,
            vec![GuardrailNever, GuardrailMust, EscalationRule],
            3,
        ),
        SectionDefinition::new(
            SectionKey::Integrations,
            Technical,
            vec![Integration, SystemAccess],
            2,
        ),
        SectionDefinition::new(SectionKey::DataFields, Technical, vec![DataField], 3),
        SectionDefinition::new(
            SectionKey::Security,
            Technical,
            vec![SecurityRequirement, ComplianceRequirement],
            2,
        ),
        SectionDefinition::new(SectionKey::Testing, Technical, vec![TestScenario], 3),
    ]
}
