use thiserror::Error;

/// A failed stage surfaces here and aborts the run; the operator restarts
/// from the wipe step.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("collector stage failed: {0}")]
    Collector(#[from] leadlens_collector::CollectorError),

    #[error("filter stage failed: {0}")]
    Vision(#[from] leadlens_vision::VisionError),

    #[error("caption stage failed: {0}")]
    Llm(#[from] leadlens_llm::LlmError),

    #[error("sheet persistence failed: {0}")]
    Sheet(#[from] leadlens_sheet::SheetError),

    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
