use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use super::AreaGraph;
use crate::error::{AreaError, Result};
use crate::flags::{AreaFlags, FlagMap};
use crate::model::{AreaId, GLOBAL_ROOT_ID};

const CONFIRMED: AreaFlags = AreaFlags::from_bits(AreaFlags::SET.bits() | AreaFlags::PROCESSED.bits());

impl AreaGraph {
    /// True when the hierarchy holds a cycle not closed by a recursion link.
    pub fn exists_circle_in_areas(&self) -> bool {
        self.structural_cycle().is_some()
    }

    /// Returns the areas forming a structural cycle, in link order, if one exists.
    pub fn structural_cycle(&self) -> Option<Vec<AreaId>> {
        let mut flags = FlagMap::new();
        let cycle = self.find_cycle(&mut flags);
        if let Some(cycle) = &cycle {
            warn!(?cycle, "structural cycle detected in area hierarchy");
        }
        cycle
    }

    /// Flag-based form of [`Self::exists_circle_in_areas`]: colours areas `PROCESSING` while
    /// on the DFS path and `FINISHED` once fully explored.
    ///
    /// `flags` must be clear; a finished run leaves every reached area `FINISHED`.
    pub fn exists_circle_in_areas_with(&self, flags: &mut FlagMap) -> bool {
        debug_assert!(
            !flags.any_with(AreaFlags::PROCESSING | AreaFlags::FINISHED),
            "cycle check started on stale flags"
        );
        self.find_cycle(flags).is_some()
    }

    fn find_cycle(&self, flags: &mut FlagMap) -> Option<Vec<AreaId>> {
        for start in self.areas.keys().copied() {
            if flags.get(start).intersects(AreaFlags::PROCESSING | AreaFlags::FINISHED) {
                continue;
            }

            flags.insert(start, AreaFlags::PROCESSING);
            let mut stack: Vec<(AreaId, usize)> = vec![(start, 0)];
            while let Some(top) = stack.last_mut() {
                let (current, next) = *top;
                let edges = self
                    .area(current)
                    .map(|area| area.sub_edges.as_slice())
                    .unwrap_or(&[]);

                let Some(edge) = edges.get(next) else {
                    let mut state = flags.get(current);
                    state.remove(AreaFlags::PROCESSING);
                    flags.set(current, state | AreaFlags::FINISHED);
                    stack.pop();
                    continue;
                };
                top.1 += 1;
                if edge.relation.recursion {
                    continue;
                }

                let child = edge.area;
                let state = flags.get(child);
                if state.contains(AreaFlags::PROCESSING) {
                    let from = stack.iter().position(|(id, _)| *id == child).unwrap_or(0);
                    return Some(stack[from..].iter().map(|(id, _)| *id).collect());
                }
                if state.contains(AreaFlags::FINISHED) {
                    continue;
                }
                flags.insert(child, AreaFlags::PROCESSING);
                stack.push((child, 0));
            }
        }
        None
    }

    /// ORs `flag` into every area of the subtree under `root`.
    ///
    /// A branch stops at the first area that already carries all of `flag`, so subtrees
    /// shared through a diamond are walked once. Recursion links are not followed.
    pub fn set_area_sub_tree_flags(&self, root: AreaId, flag: AreaFlags, flags: &mut FlagMap) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if flags.contains(id, flag) {
                continue;
            }
            let Some(area) = self.area(id) else {
                continue;
            };
            flags.insert(id, flag);
            stack.extend(area.structural_sub_ids().filter(|child| !flags.contains(*child, flag)));
        }
    }

    /// Withdraws `SET` marks from areas still held by an unmarked parent.
    ///
    /// Expects the marks of [`Self::set_area_sub_tree_flags`] from each of `roots` and no
    /// `PROCESSED` bits. Marked areas are finalized parents-first: each of `roots` ends as
    /// `SET|PROCESSED`; any other marked area ends as `SET|PROCESSED` only when every
    /// super-area (recursion links aside) ended that way, otherwise as `PROCESSED` alone.
    /// A withdrawn area therefore withdraws its whole subtree unless another confirmed
    /// path covers it. Areas caught on a structural cycle are withdrawn.
    pub fn reset_areas_overlaps_flags(&self, roots: &[AreaId], flags: &mut FlagMap) {
        debug_assert!(
            !flags.any_with(AreaFlags::PROCESSED),
            "overlap reset started on stale flags"
        );

        let marked: FxHashSet<AreaId> = flags.ids_with(AreaFlags::SET).into_iter().collect();
        let root_set: FxHashSet<AreaId> = roots
            .iter()
            .copied()
            .filter(|id| marked.contains(id))
            .collect();

        let mut pending: FxHashMap<AreaId, usize> = FxHashMap::default();
        for &id in &marked {
            let count = if root_set.contains(&id) {
                0
            } else {
                self.area(id)
                    .map(|area| {
                        area.structural_super_ids()
                            .filter(|sup| marked.contains(sup))
                            .count()
                    })
                    .unwrap_or(0)
            };
            pending.insert(id, count);
        }

        let mut ready: Vec<AreaId> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect();
        ready.sort_unstable();
        let mut queue: VecDeque<AreaId> = ready.into();

        while let Some(id) = queue.pop_front() {
            pending.remove(&id);
            let Some(area) = self.area(id) else {
                flags.set(id, AreaFlags::PROCESSED);
                continue;
            };
            let keep = root_set.contains(&id)
                || area
                    .structural_super_ids()
                    .all(|sup| flags.contains(sup, CONFIRMED));
            flags.set(id, if keep { CONFIRMED } else { AreaFlags::PROCESSED });

            for child in area.structural_sub_ids() {
                if root_set.contains(&child) {
                    continue;
                }
                if let Some(count) = pending.get_mut(&child) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }

        for (id, _) in pending {
            debug!(area = id, "marked area left on a structural cycle; withdrawn");
            flags.set(id, AreaFlags::PROCESSED);
        }
    }

    /// Areas that disappear with the subtrees under `roots`: every descendant not also held
    /// by an area outside them. Ascending id order.
    pub fn removable_subtree(&self, roots: &[AreaId]) -> Vec<AreaId> {
        let mut flags = FlagMap::new();
        for &root in roots {
            self.set_area_sub_tree_flags(root, AreaFlags::SET, &mut flags);
        }
        self.reset_areas_overlaps_flags(roots, &mut flags);
        flags.ids_with(CONFIRMED)
    }

    /// Removes the subtrees under `roots`, sparing areas still linked from elsewhere.
    pub fn remove_area_subtrees(&mut self, roots: &[AreaId]) -> Result<usize> {
        for &root in roots {
            if root == GLOBAL_ROOT_ID {
                return Err(AreaError::invalid("the global root area cannot be removed"));
            }
            self.require(root)?;
        }
        let doomed = self.removable_subtree(roots);
        self.remove_areas(&doomed)
    }

    /// True when the area and every ancestor above it are enabled.
    pub fn is_area_enabled(&self, id: AreaId) -> bool {
        let Some(area) = self.area(id) else {
            return false;
        };
        if !area.is_enabled {
            return false;
        }
        let mut visited = FxHashSet::default();
        let mut queue: VecDeque<AreaId> = area.structural_super_ids().collect();
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(ancestor) = self.area(current) else {
                continue;
            };
            if !ancestor.is_enabled {
                return false;
            }
            queue.extend(ancestor.structural_super_ids());
        }
        true
    }

    /// Every area switched off by its own flag or by a disabled ancestor, ascending.
    pub fn disabled_areas(&self) -> Vec<AreaId> {
        let mut flags = FlagMap::new();
        for area in self.areas.values().filter(|area| !area.is_enabled) {
            self.set_area_sub_tree_flags(area.id(), AreaFlags::SET, &mut flags);
        }
        flags.ids_with(AreaFlags::SET)
    }
}
