//! Area hierarchy graph engine.
//!
//! Areas form a multiply-inherited hierarchy: an area may sit below several super-areas,
//! and links flagged `recursion` close cycles on purpose without being walked. The
//! [`AreaGraph`] owns every area by id and answers traversal, alias, project-scope and
//! file-path queries over them.

#![warn(missing_docs)]

mod error;
pub mod flags;
pub mod graph;
pub mod model;
pub mod options;

pub use error::{AreaError, Result};
pub use flags::{AreaFlags, FlagMap};
pub use graph::{AreaGraph, ConstructorGroup, ConstructorHolder, FileNameQuery, HolderContent};
pub use model::{
    AliasHint, Area, AreaEdge, AreaId, ConstructorGroupId, Enumeration, EnumerationId,
    EnumerationValue, EnumerationValueId, MimeType, MimeTypeId, Relation, ResourceId,
    TraversalDecision, Version, VersionId, DEFAULT_VERSION_ID, GLOBAL_ROOT_ID,
};
pub use options::{GraphOptions, OptionsError};
