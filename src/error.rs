use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Failure inside a draw pass. The pass is aborted; earlier canvas
    /// output is not rolled back because the next pass repaints fully.
    #[error("render failure: {0}")]
    Render(String),

    /// Failure inside a hover/click callback. Caught at the dispatch
    /// boundary and routed to the canvas error display.
    #[error("interaction failure: {0}")]
    Interaction(String),

    #[error("scheduler failure: {0}")]
    Scheduler(String),
}
