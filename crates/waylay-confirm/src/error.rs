//! Error types for the confirmation flow.

use thiserror::Error;
use waylay_view::ViewError;

/// Result type for confirmation operations.
pub type Result<T> = std::result::Result<T, ConfirmError>;

/// Errors that can occur while binding or running a confirmation cycle.
///
/// Every domain-level "failure" (check failed, confirm declined, deny) is
/// ordinary control flow, not an error; what remains are invalid
/// configurations surfacing at the point of use.
#[derive(Error, Debug)]
pub enum ConfirmError {
    /// Element lookup or dispatch failed in the underlying view.
    #[error(transparent)]
    View(#[from] ViewError),
}
