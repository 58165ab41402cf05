use tracing::{debug, trace};

use super::AreaGraph;
use crate::error::{AreaError, Result};
use crate::flags::{AreaFlags, FlagMap};
use crate::model::{Area, AreaId, GLOBAL_ROOT_ID};

impl AreaGraph {
    /// Adds `area` under a freshly allocated id and returns that id.
    ///
    /// The id carried by `area` and any links it holds are ignored; link the new area with
    /// [`Self::add_subarea`]. Ids are never handed out twice, even after removal.
    ///
    /// # Errors
    /// * [`AreaError::InvalidEdit`] once every id below `AreaId::MAX` has been handed out.
    pub fn add_new_area(&mut self, mut area: Area) -> Result<AreaId> {
        let id = self.next_id;
        if id == AreaId::MAX {
            return Err(AreaError::invalid("area ids exhausted"));
        }
        self.next_id = id + 1;
        area.set_id(id);
        area.sub_edges.clear();
        area.super_edges.clear();
        self.areas.insert(id, area);
        debug!(area = id, "area added");
        Ok(id)
    }

    /// Adds `area` under its own id, as a loader replaying stored areas does.
    ///
    /// # Errors
    /// * [`AreaError::DuplicateArea`] when the id is taken (the global root included).
    /// * [`AreaError::InvalidEdit`] for `AreaId::MAX`, which is never assigned.
    pub fn insert_area(&mut self, mut area: Area) -> Result<()> {
        let id = area.id();
        let Some(after) = id.checked_add(1) else {
            return Err(AreaError::invalid(format!("area id {id} is reserved")));
        };
        if self.areas.contains_key(&id) {
            return Err(AreaError::DuplicateArea(id));
        }
        area.sub_edges.clear();
        area.super_edges.clear();
        self.areas.insert(id, area);
        self.next_id = self.next_id.max(after);
        debug!(area = id, "area inserted");
        Ok(())
    }

    /// Removes one area and every link touching it.
    pub fn remove_area(&mut self, id: AreaId) -> Result<()> {
        self.remove_areas(&[id]).map(|_| ())
    }

    /// Removes the given areas and every link that references any of them.
    ///
    /// Runs as mark-and-sweep: every id is marked first, then a snapshot of the id table is
    /// walked, dropping links whose far end is marked and finally the marked areas
    /// themselves. Nothing is removed if any id is unknown or names the global root.
    /// Returns the number of areas removed.
    pub fn remove_areas(&mut self, ids: &[AreaId]) -> Result<usize> {
        for &id in ids {
            if id == GLOBAL_ROOT_ID {
                return Err(AreaError::invalid("the global root area cannot be removed"));
            }
            self.require(id)?;
        }

        let mut marks = FlagMap::new();
        for &id in ids {
            marks.insert(id, AreaFlags::SET);
        }

        let snapshot: Vec<AreaId> = self.areas.keys().copied().collect();
        let mut removed = 0;
        for id in snapshot {
            let Some(area) = self.areas.get_mut(&id) else {
                continue;
            };
            area.super_edges
                .retain(|edge| !marks.contains(edge.area, AreaFlags::SET));
            area.sub_edges
                .retain(|edge| !marks.contains(edge.area, AreaFlags::SET));
            if marks.contains(id, AreaFlags::SET) {
                self.areas.remove(&id);
                removed += 1;
                trace!(area = id, "area swept");
            }
        }

        if let Some(home) = self.home_area_id {
            if marks.contains(home, AreaFlags::SET) {
                debug!(area = home, "home area removed; clearing home");
                self.home_area_id = None;
            }
        }
        debug!(removed, "areas removed");
        Ok(removed)
    }

    /// Refreshes the attributes of already loaded areas from reloaded copies, matched by id.
    ///
    /// Links are left untouched. Every id is checked before any area changes.
    pub fn update_areas(&mut self, fresh: impl IntoIterator<Item = Area>) -> Result<usize> {
        let fresh: Vec<Area> = fresh.into_iter().collect();
        for area in &fresh {
            self.require(area.id())?;
        }
        let count = fresh.len();
        for area in fresh {
            if let Some(current) = self.areas.get_mut(&area.id()) {
                current.refresh_from(area);
            }
        }
        debug!(count, "areas refreshed");
        Ok(count)
    }

    /// Drops every caller-attached payload.
    pub fn clear_areas_user_data(&mut self) {
        for area in self.areas.values_mut() {
            area.user = None;
        }
    }
}
