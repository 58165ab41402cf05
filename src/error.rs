use thiserror::Error;

use crate::model::AreaId;

/// Result alias used by every fallible graph operation.
pub type Result<T> = std::result::Result<T, AreaError>;

/// Errors raised at the mutation boundary of an [`crate::AreaGraph`].
///
/// Lookups and traversals never produce these: an unknown id or alias is reported as
/// `None` or an empty collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AreaError {
    /// The referenced area does not exist.
    #[error("area {0} not found")]
    UnknownArea(AreaId),
    /// An area with this id is already present.
    #[error("area {0} already exists")]
    DuplicateArea(AreaId),
    /// The two areas are already linked.
    #[error("area {sub} is already a sub-area of {sup}")]
    DuplicateEdge {
        /// Super (parent) endpoint.
        sup: AreaId,
        /// Sub (child) endpoint.
        sub: AreaId,
    },
    /// No edge links the two areas.
    #[error("area {sub} is not a sub-area of {sup}")]
    MissingEdge {
        /// Super (parent) endpoint.
        sup: AreaId,
        /// Sub (child) endpoint.
        sub: AreaId,
    },
    /// The edit would break a structural rule of the hierarchy.
    #[error("invalid edit: {0}")]
    InvalidEdit(String),
}

impl AreaError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AreaError::InvalidEdit(msg.into())
    }
}
