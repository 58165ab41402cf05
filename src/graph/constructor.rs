use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashSet;
use tracing::debug;

use super::AreaGraph;
use crate::model::{AreaId, ConstructorGroupId};

/// A constructor group being duplicated: its current id and the id its copy receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorGroup {
    pub old_id: ConstructorGroupId,
    pub new_id: ConstructorGroupId,
    pub holders: Vec<ConstructorHolder>,
}

/// Slot of a constructor group holding one nested piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorHolder {
    pub id: u64,
    pub content: HolderContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolderContent {
    /// Group defined inside the holder; duplicated along with its parent.
    Group(ConstructorGroup),
    /// Link to a group defined elsewhere; left as is.
    Reference(ConstructorGroupId),
    Empty,
}

enum WorklistItem<'a> {
    Group(&'a ConstructorGroup),
    Holder(&'a ConstructorHolder),
}

impl AreaGraph {
    /// Non-source areas bound to `group_id`, ascending.
    pub fn areas_in_constructor_group(&self, group_id: ConstructorGroupId) -> Vec<AreaId> {
        self.areas
            .values()
            .filter(|area| {
                !area.is_constructor_source && area.constructor_group_id == Some(group_id)
            })
            .map(|area| area.id())
            .collect()
    }

    /// Builds the old → new group id table for duplicating the constructor tree at `root`.
    ///
    /// Groups are visited breadth-first; holders are expanded only when they embed a group,
    /// never through a reference. A group enters the table when at least one non-source area
    /// is bound to its old id. The graph itself is not changed.
    pub fn load_areas_constructor_group_ids(
        &self,
        root: &ConstructorGroup,
    ) -> BTreeMap<ConstructorGroupId, ConstructorGroupId> {
        let bound: FxHashSet<ConstructorGroupId> = self
            .areas
            .values()
            .filter(|area| !area.is_constructor_source)
            .filter_map(|area| area.constructor_group_id)
            .collect();

        let mut remap = BTreeMap::new();
        let mut worklist = VecDeque::from([WorklistItem::Group(root)]);
        while let Some(item) = worklist.pop_front() {
            match item {
                WorklistItem::Group(group) => {
                    if bound.contains(&group.old_id) {
                        remap.insert(group.old_id, group.new_id);
                    }
                    worklist.extend(group.holders.iter().map(WorklistItem::Holder));
                }
                WorklistItem::Holder(holder) => {
                    if let HolderContent::Group(group) = &holder.content {
                        worklist.push_back(WorklistItem::Group(group));
                    }
                }
            }
        }
        debug!(groups = remap.len(), "constructor group ids remapped");
        remap
    }
}
