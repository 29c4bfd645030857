//! Error types for the view layer.

use thiserror::Error;

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;

/// Errors that can occur during element lookup and event dispatch.
#[derive(Error, Debug)]
pub enum ViewError {
    /// An identifier resolved to no element in the tree.
    #[error("no element with id `{0}`")]
    MissingElement(String),

    /// An overlay was asked for its first child panel but has none.
    #[error("overlay `{0}` has no child element to use as the dialog panel")]
    NoChildPanel(String),
}
