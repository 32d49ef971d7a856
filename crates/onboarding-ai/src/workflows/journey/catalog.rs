use super::domain::{CatalogError, PhaseDefinition, PhaseType};
use std::sync::OnceLock;

static STANDARD_CATALOG: OnceLock<PhaseCatalog> = OnceLock::new();

/// Validated, ordered list of phase definitions. Lookups are infallible once
/// a catalog has been constructed.
#[derive(Debug, Clone)]
pub struct PhaseCatalog {
    phases: [PhaseDefinition; PhaseType::COUNT],
}

impl PhaseCatalog {
    pub fn new(definitions: Vec<PhaseDefinition>) -> Result<Self, CatalogError> {
        let phases: [PhaseDefinition; PhaseType::COUNT] =
            definitions
                .try_into()
                .map_err(|rejected: Vec<PhaseDefinition>| CatalogError::WrongLength {
                    expected: PhaseType::COUNT,
                    found: rejected.len(),
                })?;

        let mut seen_post_completion = false;
        for (expected, definition) in PhaseType::ordered().into_iter().zip(phases.iter()) {
            if definition.phase != expected {
                return Err(CatalogError::OutOfOrder(definition.phase));
            }
            if definition.order != expected.order() {
                return Err(CatalogError::OrderMismatch {
                    phase: definition.phase,
                    declared: definition.order,
                    expected: expected.order(),
                });
            }
            if definition.standard_duration_days == 0 {
                return Err(CatalogError::ZeroDuration(definition.phase));
            }
            if seen_post_completion && !definition.post_completion {
                return Err(CatalogError::PostCompletionGap(definition.phase));
            }
            seen_post_completion |= definition.post_completion;
        }

        Ok(Self { phases })
    }

    /// The catalog shipped with the product, built once per process.
    pub fn standard() -> &'static Self {
        STANDARD_CATALOG.get_or_init(|| Self {
            phases: standard_phase_definitions(),
        })
    }

    pub fn definition(&self, phase: PhaseType) -> &PhaseDefinition {
        &self.phases[phase.index()]
    }

    pub fn definitions(&self) -> &[PhaseDefinition] {
        &self.phases
    }

    pub fn standard_duration(&self, phase: PhaseType) -> u32 {
        self.definition(phase).standard_duration_days
    }

    pub fn phase_display_name(&self, phase: PhaseType) -> &'static str {
        phase.label()
    }

    /// Phases strictly after `phase`, in catalog order.
    pub fn phases_after(&self, phase: PhaseType) -> &[PhaseDefinition] {
        &self.phases[phase.index() + 1..]
    }
}

const fn definition(
    phase: PhaseType,
    standard_duration_days: u32,
    post_completion: bool,
) -> PhaseDefinition {
    PhaseDefinition {
        phase,
        order: phase.order(),
        standard_duration_days,
        post_completion,
    }
}

fn standard_phase_definitions() -> [PhaseDefinition; PhaseType::COUNT] {
    [
        definition(PhaseType::SalesHandover, 2, false),
        definition(PhaseType::Kickoff, 1, false),
        definition(PhaseType::DesignWeek, 10, false),
        definition(PhaseType::Onboarding, 10, false),
        definition(PhaseType::Uat, 5, false),
        definition(PhaseType::GoLive, 1, false),
        definition(PhaseType::Hypercare, 10, true),
        definition(PhaseType::HandoverToSupport, 2, true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_passes_validation() {
        let catalog = PhaseCatalog::standard();
        let rebuilt = PhaseCatalog::new(catalog.definitions().to_vec()).expect("valid catalog");
        assert_eq!(rebuilt.definitions(), catalog.definitions());
    }

    #[test]
    fn orders_are_contiguous_from_one() {
        let orders: Vec<u8> = PhaseCatalog::standard()
            .definitions()
            .iter()
            .map(|definition| definition.order)
            .collect();
        assert_eq!(orders, (1..=8).collect::<Vec<u8>>());
    }

    #[test]
    fn rejects_short_catalog() {
        let mut definitions = standard_phase_definitions().to_vec();
        definitions.pop();
        assert_eq!(
            PhaseCatalog::new(definitions).expect_err("short catalog"),
            CatalogError::WrongLength {
                expected: 8,
                found: 7
            }
        );
    }

    #[test]
    fn rejects_swapped_phases() {
        let mut definitions = standard_phase_definitions().to_vec();
        definitions.swap(1, 2);
        assert_eq!(
            PhaseCatalog::new(definitions).expect_err("swapped phases"),
            CatalogError::OutOfOrder(PhaseType::DesignWeek)
        );
    }

    #[test]
    fn rejects_zero_duration_and_gapped_post_completion() {
        let mut definitions = standard_phase_definitions().to_vec();
        definitions[4].standard_duration_days = 0;
        assert_eq!(
            PhaseCatalog::new(definitions).expect_err("zero duration"),
            CatalogError::ZeroDuration(PhaseType::Uat)
        );

        let mut definitions = standard_phase_definitions().to_vec();
        definitions[5].post_completion = true;
        definitions[6].post_completion = false;
        assert_eq!(
            PhaseCatalog::new(definitions).expect_err("gap"),
            CatalogError::PostCompletionGap(PhaseType::Hypercare)
        );
    }

    #[test]
    fn phases_after_go_live_are_support_only() {
        let after: Vec<PhaseType> = PhaseCatalog::standard()
            .phases_after(PhaseType::GoLive)
            .iter()
            .map(|definition| definition.phase)
            .collect();
        assert_eq!(after, vec![PhaseType::Hypercare, PhaseType::HandoverToSupport]);
        assert!(PhaseCatalog::standard()
            .phases_after(PhaseType::HandoverToSupport)
            .is_empty());
    }
}
