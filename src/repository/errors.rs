use thiserror::Error;

/// Result type returned by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures a repository operation can surface.
///
/// The store is in-memory, so the only failure mode is a poisoned lock;
/// lookup misses and duplicate rejections are reported in-band as `None`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}
