//! The area hierarchy graph.
//!
//! [`AreaGraph`] owns every [`Area`] in a single id-keyed table. Links are stored on both
//! endpoints as ids, so every neighbour lookup goes back through the table. Operation
//! families live in the sibling files (`area_ops`, `edge_ops`, `traversal`, ...), each adding
//! an `impl AreaGraph` block.
//!
//! The graph is single-threaded: callers serialize graph-wide algorithms and never mutate
//! the graph from inside a traversal visitor.

use std::collections::BTreeMap;

use crate::error::{AreaError, Result};
use crate::model::{Area, AreaId, Enumeration, MimeType, Version, GLOBAL_ROOT_ID};
use crate::options::GraphOptions;

mod area_ops;
mod catalog;
mod constructor;
mod edge_ops;
mod flag_ops;
mod hierarchy;
mod paths;
mod traversal;

pub use constructor::{ConstructorGroup, ConstructorHolder, HolderContent};
pub use paths::FileNameQuery;

/// In-memory hierarchy of areas plus the catalogs they reference.
#[derive(Debug, Clone)]
pub struct AreaGraph {
    areas: BTreeMap<AreaId, Area>,
    next_id: AreaId,
    home_area_id: Option<AreaId>,
    options: GraphOptions,
    versions: Vec<Version>,
    enumerations: Vec<Enumeration>,
    mime_types: Vec<MimeType>,
}

impl Default for AreaGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaGraph {
    /// Creates a graph holding only the global root area.
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    /// Creates a graph holding only the global root area, configured by `options`.
    ///
    /// `options.home_area_id` becomes the home area as soon as an area with that id exists,
    /// so it may name an area the loader has not added yet.
    pub fn with_options(options: GraphOptions) -> Self {
        let mut root = Area::new(GLOBAL_ROOT_ID);
        root.alias = options.root_alias.clone();
        root.description = "global root".to_string();
        let mut areas = BTreeMap::new();
        areas.insert(GLOBAL_ROOT_ID, root);
        let home_area_id = options.home_area_id;
        Self {
            areas,
            next_id: GLOBAL_ROOT_ID + 1,
            home_area_id,
            options,
            versions: Vec::new(),
            enumerations: Vec::new(),
            mime_types: Vec::new(),
        }
    }

    /// Options the graph was built with.
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// The area stored under `id`.
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    /// Mutable access to an area's attributes. Links are edited through the graph.
    pub fn area_mut(&mut self, id: AreaId) -> Option<&mut Area> {
        self.areas.get_mut(&id)
    }

    /// True when an area is stored under `id`.
    pub fn contains_area(&self, id: AreaId) -> bool {
        self.areas.contains_key(&id)
    }

    /// The global root area.
    pub fn root(&self) -> &Area {
        &self.areas[&GLOBAL_ROOT_ID]
    }

    /// Number of areas, the global root included.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// True when only the global root is present.
    pub fn is_empty(&self) -> bool {
        self.areas.len() <= 1
    }

    /// Every area in ascending id order.
    pub fn areas(&self) -> impl Iterator<Item = &Area> + '_ {
        self.areas.values()
    }

    /// Every area id in ascending order.
    pub fn area_ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.areas.keys().copied()
    }

    /// The home area, once it exists.
    pub fn home_area(&self) -> Option<&Area> {
        self.home_area_id.and_then(|id| self.areas.get(&id))
    }

    /// Id of the home area; `None` while unset or not yet loaded.
    pub fn home_area_id(&self) -> Option<AreaId> {
        self.home_area().map(Area::id)
    }

    /// Makes `id` the home area.
    pub fn set_home_area(&mut self, id: AreaId) -> Result<()> {
        self.require(id)?;
        self.home_area_id = Some(id);
        Ok(())
    }

    /// Unsets the home area.
    pub fn clear_home_area(&mut self) {
        self.home_area_id = None;
    }

    pub(crate) fn require(&self, id: AreaId) -> Result<&Area> {
        self.areas.get(&id).ok_or(AreaError::UnknownArea(id))
    }
}
