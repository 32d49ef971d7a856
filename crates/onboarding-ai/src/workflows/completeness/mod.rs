//! Section and profile completeness scoring.
//!
//! Two signals are combined per section: whether enough evidence exists
//! (item count) and whether it spans the section's item types (coverage).
//! Approved extracted items and manually entered profile fields are
//! interchangeable evidence.

pub mod domain;
mod import;
pub mod manual;
mod scoring;
mod sections;

pub use domain::{
    ExtractedItem, ExtractedItemType, ItemStatus, ProfileKind, SectionKey, UnknownValue,
};
pub use import::{ExtractedItemImporter, ItemImportError};
pub use manual::ManualProfile;
pub use scoring::{
    group_by_section, overall_completeness, score_profile, section_completeness, GroupedItems,
    ProfileCompleteness, SectionCompleteness, SectionCompletenessEntry,
};
pub use sections::{SectionDefinition, SectionMapping, SectionMappingError};
