use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier of an area. `AreaId::MAX` is never assigned.
pub type AreaId = u64;
/// Identifier of a site version.
pub type VersionId = u64;
pub type ResourceId = u64;
/// Identifier shared by the areas of one constructor group.
pub type ConstructorGroupId = u64;
pub type EnumerationId = u64;
pub type EnumerationValueId = u64;
pub type MimeTypeId = u64;

/// Reserved id of the global root area every graph owns.
pub const GLOBAL_ROOT_ID: AreaId = 0;
/// Version every area belongs to unless told otherwise.
pub const DEFAULT_VERSION_ID: VersionId = 0;

/// Metadata carried by a super → sub link.
///
/// A relation never changes once the edge exists; replace the edge to change it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Sub-area inherits slot and content values from the super-area.
    pub inheritance: bool,
    /// Label of the link as seen from the sub-area.
    pub name_sub: String,
    /// Label of the link as seen from the super-area.
    pub name_super: String,
    /// Sub-area is hidden from default listings reached through this link.
    pub hide_sub: bool,
    /// Intentional back-reference; traversals never descend through it.
    pub recursion: bool,
    /// Non-owning cross-link.
    pub reference: bool,
}

impl Relation {
    /// Plain inheriting link, the common case for authored hierarchies.
    pub fn inheriting() -> Self {
        Self {
            inheritance: true,
            ..Self::default()
        }
    }

    /// Back-reference that closes a cycle on purpose.
    pub fn recursive() -> Self {
        Self {
            recursion: true,
            ..Self::default()
        }
    }

    /// Sets both relation labels.
    pub fn names(mut self, name_sub: impl Into<String>, name_super: impl Into<String>) -> Self {
        self.name_sub = name_sub.into();
        self.name_super = name_super.into();
        self
    }

    /// Sets the hide flag.
    pub fn hide_sub(mut self, hide: bool) -> Self {
        self.hide_sub = hide;
        self
    }

    /// Sets the reference flag.
    pub fn reference(mut self, reference: bool) -> Self {
        self.reference = reference;
        self
    }
}

/// One end of a hierarchy link as stored on an area.
///
/// `area` is the far endpoint: the sub-area in [`Area::sub_edges`], the super-area in
/// [`Area::super_edges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaEdge {
    /// Far endpoint.
    pub area: AreaId,
    /// Link metadata, identical on both stored ends.
    pub relation: Relation,
}

pub(crate) type EdgeList = SmallVec<[AreaEdge; 4]>;

/// A node of the content hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    id: AreaId,
    /// Name used by alias lookups; unique within a project.
    pub alias: Option<String>,
    pub description: String,
    pub version_id: VersionId,
    /// Opens a new alias scope.
    pub is_project_root: bool,
    /// Hidden areas have no file.
    pub is_visible: bool,
    /// Disabling an area disables everything below it.
    pub is_enabled: bool,
    pub(crate) sub_edges: EdgeList,
    pub(crate) super_edges: EdgeList,
    /// Local description → resource name.
    pub resources: BTreeMap<String, String>,
    pub start_resource_id: Option<ResourceId>,
    /// File generated for this area, without folder.
    pub file_name: Option<String>,
    /// Folder that prefixes the files of this area and its sub-areas.
    pub folder: Option<String>,
    pub constructor_group_id: Option<ConstructorGroupId>,
    /// Template area of its constructor group; skipped by the group remap.
    pub is_constructor_source: bool,
    /// Caller-attached payload; the graph never reads it.
    pub user: Option<serde_json::Value>,
}

impl Default for Area {
    /// An area with no id yet, as handed to [`crate::AreaGraph::add_new_area`].
    fn default() -> Self {
        Self::new(GLOBAL_ROOT_ID)
    }
}

impl Area {
    /// An area carrying a loader-assigned `id`, for [`crate::AreaGraph::insert_area`] and
    /// [`crate::AreaGraph::update_areas`].
    pub fn new(id: AreaId) -> Self {
        Self {
            id,
            alias: None,
            description: String::new(),
            version_id: DEFAULT_VERSION_ID,
            is_project_root: false,
            is_visible: true,
            is_enabled: true,
            sub_edges: EdgeList::new(),
            super_edges: EdgeList::new(),
            resources: BTreeMap::new(),
            start_resource_id: None,
            file_name: None,
            folder: None,
            constructor_group_id: None,
            is_constructor_source: false,
            user: None,
        }
    }

    /// Id under which the graph stores this area.
    pub fn id(&self) -> AreaId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: AreaId) {
        self.id = id;
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_version(mut self, version_id: VersionId) -> Self {
        self.version_id = version_id;
        self
    }

    pub fn with_project_root(mut self, is_project_root: bool) -> Self {
        self.is_project_root = is_project_root;
        self
    }

    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Edges to sub-areas in priority order.
    pub fn sub_edges(&self) -> &[AreaEdge] {
        &self.sub_edges
    }

    /// Edges to super-areas in priority order.
    pub fn super_edges(&self) -> &[AreaEdge] {
        &self.super_edges
    }

    pub fn sub_area_ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.sub_edges.iter().map(|edge| edge.area)
    }

    pub fn super_area_ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.super_edges.iter().map(|edge| edge.area)
    }

    /// Relation of the link from this area down to `sub`.
    pub fn sub_relation(&self, sub: AreaId) -> Option<&Relation> {
        self.sub_edges
            .iter()
            .find(|edge| edge.area == sub)
            .map(|edge| &edge.relation)
    }

    /// Relation of the link from `sup` down to this area.
    pub fn super_relation(&self, sup: AreaId) -> Option<&Relation> {
        self.super_edges
            .iter()
            .find(|edge| edge.area == sup)
            .map(|edge| &edge.relation)
    }

    /// Sub-areas reachable without crossing a recursion link.
    pub(crate) fn structural_sub_ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.sub_edges
            .iter()
            .filter(|edge| !edge.relation.recursion)
            .map(|edge| edge.area)
    }

    /// Super-areas linked without a recursion flag.
    pub(crate) fn structural_super_ids(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.super_edges
            .iter()
            .filter(|edge| !edge.relation.recursion)
            .map(|edge| edge.area)
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.alias.as_deref() == Some(alias)
    }

    /// Copies every attribute except identity and edges from `other`.
    pub(crate) fn refresh_from(&mut self, other: Area) {
        let Area {
            alias,
            description,
            version_id,
            is_project_root,
            is_visible,
            is_enabled,
            resources,
            start_resource_id,
            file_name,
            folder,
            constructor_group_id,
            is_constructor_source,
            user,
            ..
        } = other;
        self.alias = alias;
        self.description = description;
        self.version_id = version_id;
        self.is_project_root = is_project_root;
        self.is_visible = is_visible;
        self.is_enabled = is_enabled;
        self.resources = resources;
        self.start_resource_id = start_resource_id;
        self.file_name = file_name;
        self.folder = folder;
        self.constructor_group_id = constructor_group_id;
        self.is_constructor_source = is_constructor_source;
        self.user = user;
    }
}

/// Which match wins when an alias occurs more than once in a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasHint {
    /// First match in traversal order.
    #[default]
    First,
    /// Last match in traversal order.
    Last,
}

/// Visitor verdict for [`crate::AreaGraph::for_each_area`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDecision {
    /// Descend into the visited area's sub-areas.
    Continue,
    /// Skip the visited area's sub-areas; siblings are still visited.
    Prune,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub alias: String,
    #[serde(default)]
    pub description: String,
    /// Area whose folder anchors file paths of this version.
    #[serde(default)]
    pub start_area_id: Option<AreaId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationValue {
    pub id: EnumerationValueId,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enumeration {
    pub id: EnumerationId,
    pub description: String,
    #[serde(default)]
    pub values: Vec<EnumerationValue>,
}

impl Enumeration {
    pub fn contains_value(&self, value_id: EnumerationValueId) -> bool {
        self.values.iter().any(|value| value.id == value_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeType {
    pub id: MimeTypeId,
    pub extension: String,
    pub type_name: String,
    /// Preferred type when several share an extension.
    #[serde(default)]
    pub preference: bool,
}
