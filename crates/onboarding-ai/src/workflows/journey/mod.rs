//! Phase scheduling for the eight-phase Digital Employee journey.

pub mod calendar;
mod catalog;
pub mod domain;
mod schedule;
mod timeline;

pub use calendar::{add_business_days, business_days_between};
pub use catalog::PhaseCatalog;
pub use domain::{
    CatalogError, PhaseDefinition, PhaseParseError, PhaseRecord, PhaseStatus, PhaseType,
    ScheduleVariance, VarianceStatus,
};
pub use schedule::{format_variance, variance, PhaseScheduler};
pub use timeline::{JourneyError, JourneyReport, JourneyTimeline, PhaseTimelineEntry};
