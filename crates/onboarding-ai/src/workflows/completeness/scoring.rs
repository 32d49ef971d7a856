use super::domain::{ExtractedItem, ExtractedItemType, ItemStatus, ProfileKind, SectionKey};
use super::manual::ManualProfile;
use super::sections::{SectionDefinition, SectionMapping};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Sections at or above this score are capped while items await review.
const PENDING_REVIEW_THRESHOLD: u8 = 80;
const PENDING_REVIEW_CAP: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionCompleteness {
    pub percentage: u8,
    pub approved_count: usize,
    pub pending_count: usize,
    pub covered_types_count: usize,
    pub total_types_count: usize,
    pub item_count_score: u8,
    pub type_coverage_score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionCompletenessEntry {
    pub section: SectionKey,
    pub section_label: &'static str,
    #[serde(flatten)]
    pub completeness: SectionCompleteness,
    /// Mapped types with neither an approved item nor a manual entry.
    pub missing_types: Vec<ExtractedItemType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileCompleteness {
    pub profile: ProfileKind,
    pub profile_label: &'static str,
    pub overall: u8,
    pub sections: Vec<SectionCompletenessEntry>,
}

pub type GroupedItems<'a> = HashMap<SectionKey, Vec<&'a ExtractedItem>>;

fn rounded_percent(numerator: usize, denominator: usize) -> u8 {
    let percent = (100.0 * numerator as f64 / denominator as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Scores one section from extracted items and the types a manual profile
/// entry already satisfies. Items of unmapped types and rejected items are
/// ignored.
pub fn section_completeness<'a, I>(
    items: I,
    section: &SectionDefinition,
    manually_covered: Option<&BTreeSet<ExtractedItemType>>,
) -> SectionCompleteness
where
    I: IntoIterator<Item = &'a ExtractedItem>,
{
    let mut approved_count = 0;
    let mut pending_count = 0;
    let mut covered: BTreeSet<ExtractedItemType> = BTreeSet::new();

    for item in items {
        if !section.maps(item.item_type) {
            continue;
        }
        if item.status.awaiting_review() {
            pending_count += 1;
        } else if item.status == ItemStatus::Approved {
            approved_count += 1;
            covered.insert(item.item_type);
        }
    }

    let manual: BTreeSet<ExtractedItemType> = manually_covered
        .map(|types| {
            types
                .iter()
                .copied()
                .filter(|item_type| section.maps(*item_type))
                .collect()
        })
        .unwrap_or_default();
    covered.extend(manual.iter().copied());

    let effective_count = approved_count.max(manual.len());
    let item_count_score = if section.required_count == 0 {
        100
    } else {
        rounded_percent(effective_count, section.required_count as usize)
    };

    let total_types_count = section.item_types.len();
    let type_coverage_score = if total_types_count == 0 {
        100
    } else {
        rounded_percent(covered.len(), total_types_count)
    };

    let mut percentage = item_count_score.min(type_coverage_score);
    if pending_count > 0 && percentage >= PENDING_REVIEW_THRESHOLD {
        percentage = percentage.min(PENDING_REVIEW_CAP);
    }

    SectionCompleteness {
        percentage,
        approved_count,
        pending_count,
        covered_types_count: covered.len(),
        total_types_count,
        item_count_score,
        type_coverage_score,
    }
}

/// Buckets items by the section that maps their type. Unmapped types are
/// dropped.
pub fn group_by_section<'a>(
    items: &'a [ExtractedItem],
    mapping: &SectionMapping,
) -> GroupedItems<'a> {
    let mut grouped: GroupedItems<'a> = HashMap::new();
    for item in items {
        if let Some(section) = mapping.section_for_type(item.item_type) {
            grouped.entry(section.key).or_default().push(item);
        }
    }
    grouped
}

/// Unweighted mean of every section in `profile`.
pub fn overall_completeness(
    grouped: &GroupedItems<'_>,
    mapping: &SectionMapping,
    profile: ProfileKind,
    manual: Option<&ManualProfile>,
) -> ProfileCompleteness {
    let manual_types = manual.map(ManualProfile::covered_types);

    let sections: Vec<SectionCompletenessEntry> = mapping
        .sections_for(profile)
        .map(|section| {
            let items = grouped
                .get(&section.key)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let completeness =
                section_completeness(items.iter().copied(), section, manual_types.as_ref());

            let missing_types = section
                .item_types
                .iter()
                .copied()
                .filter(|item_type| {
                    let approved = items.iter().any(|item| {
                        item.item_type == *item_type
                            && item.status == ItemStatus::Approved
                    });
                    let manual = manual_types
                        .as_ref()
                        .is_some_and(|types| types.contains(item_type));
                    !approved && !manual
                })
                .collect();

            SectionCompletenessEntry {
                section: section.key,
                section_label: section.label(),
                completeness,
                missing_types,
            }
        })
        .collect();

    let overall = if sections.is_empty() {
        0
    } else {
        let total: usize = sections
            .iter()
            .map(|entry| usize::from(entry.completeness.percentage))
            .sum();
        rounded_percent(total, sections.len() * 100)
    };

    ProfileCompleteness {
        profile,
        profile_label: profile.label(),
        overall,
        sections,
    }
}

/// Groups `items` and scores `profile` in one call.
pub fn score_profile(
    items: &[ExtractedItem],
    mapping: &SectionMapping,
    profile: ProfileKind,
    manual: Option<&ManualProfile>,
) -> ProfileCompleteness {
    let grouped = group_by_section(items, mapping);
    overall_completeness(&grouped, mapping, profile, manual)
}
