//! CSV-backed spreadsheet persistence for the pipeline.
//!
//! The sheet is the only durable state shared between stages: the collector
//! writes one row per scraped profile, the filter stage merges classification
//! results into it, and the reporter reads it back to build report rows.
//! Read and write are always whole-file (merge-on-read, overwrite-on-write);
//! there is no append mode.

mod error;
mod merge;
mod table;

pub use error::SheetError;
pub use merge::merge_classifications;
pub use table::{read_rows, write_profiles, write_rows, SheetRow};
