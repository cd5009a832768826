//! Event result aggregation
//!
//! Pure transformations over raw result rows:
//! - Tie merging (one record per event)
//! - Filter option lists for the results dropdown
//! - Event / name / house filtered views
//!
//! Nothing here mutates its input or performs I/O.

pub mod filter;
pub mod merge;
pub mod options;
pub mod record;
pub mod values;

pub use filter::{FilterContext, FilterMode, FilterProjection, FilteredRecord, apply_filter};
pub use merge::{merge_by_event, merge_records};
pub use options::{FilterOptions, filter_options};
pub use record::{EventRow, Placement, PlacementRecord, Position};
pub use values::{DELIMITER, ValueSet};
