//! Four-stage lead-generation pipeline orchestration.
//!
//! One run is strictly sequential and file-system-mediated:
//! collect (scrape + download) → filter (classify + delete negatives) →
//! caption (LLM) → report (explicit index join). Every run starts from a
//! wipe of the prior image directory and sheet; there is no retry and no
//! partial resume — a failed run is restarted whole.

mod error;
mod report;
mod run;
mod wipe;

pub use error::PipelineError;
pub use report::{build_report, render_message};
pub use run::{run_pipeline, RunPhase, RunReport};
pub use wipe::wipe_run_state;
