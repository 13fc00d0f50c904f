use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::bar::BarSeries;

/// Boxed error from a sink's storage backend.
pub type BackendError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The destination rejected or failed the write.
    #[snafu(display("Failed to write data: {source}"))]
    Write {
        source: BackendError,
        backtrace: Backtrace,
    },

    /// An error occurred while converting the canonical `BarSeries` model into the destination format.
    #[snafu(display("Data conversion error: {message}"))]
    Conversion {
        message: String,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink: Send + Sync {
    /// The type of output returned after a successful write operation.
    ///
    /// This makes the trait flexible. For example:
    /// - A file sink might return `Vec<PathBuf>`, the paths to the created files.
    /// - A database sink might return `usize`, the number of rows upserted.
    type Output;

    /// Writes one `BarSeries` to the destination.
    async fn write(&self, data: &BarSeries) -> Result<Self::Output, SinkError>;
}
