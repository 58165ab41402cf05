use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{trace, warn};

use super::AreaGraph;
use crate::model::{Area, AreaId, TraversalDecision};

struct Frame {
    id: AreaId,
    depth: usize,
    projects: Rc<Vec<AreaId>>,
}

#[derive(Clone, Copy)]
enum Direction {
    Sub,
    Super,
}

impl AreaGraph {
    /// Depth-first walk of sub-area links starting at `root`.
    ///
    /// `visitor` receives each area together with the ids of the project roots enclosing it,
    /// outermost first; a project root area sees itself last in that list. Returning
    /// [`TraversalDecision::Prune`] skips the area's sub-areas but not its siblings.
    ///
    /// With `duplicated == false` every area is visited at most once, in first-reached
    /// order. With `duplicated == true` every path is walked, so areas under a diamond are
    /// visited once per path; a structural cycle is cut where it re-enters the current
    /// path. Recursion links are never descended. An unknown `root` visits nothing.
    ///
    /// The visitor must not mutate the graph; the borrow checker enforces this for closures
    /// capturing the graph.
    pub fn for_each_area<F>(&self, root: AreaId, duplicated: bool, mut visitor: F)
    where
        F: FnMut(&Area, &[AreaId]) -> TraversalDecision,
    {
        let mut visited = FxHashSet::default();
        let mut path: Vec<AreaId> = Vec::new();
        let mut stack = vec![Frame {
            id: root,
            depth: 0,
            projects: Rc::new(Vec::new()),
        }];

        while let Some(frame) = stack.pop() {
            let Some(area) = self.area(frame.id) else {
                continue;
            };
            if duplicated {
                path.truncate(frame.depth);
                if path.contains(&frame.id) {
                    warn!(area = frame.id, "structural cycle reached during traversal");
                    continue;
                }
                path.push(frame.id);
            } else if !visited.insert(frame.id) {
                continue;
            }

            let projects = if area.is_project_root {
                let mut extended = Vec::with_capacity(frame.projects.len() + 1);
                extended.extend_from_slice(&frame.projects);
                extended.push(frame.id);
                Rc::new(extended)
            } else {
                frame.projects
            };

            if visitor(area, projects.as_slice()) == TraversalDecision::Prune {
                trace!(area = frame.id, "traversal pruned");
                continue;
            }

            for edge in area.sub_edges.iter().rev() {
                if edge.relation.recursion || (!duplicated && visited.contains(&edge.area)) {
                    continue;
                }
                stack.push(Frame {
                    id: edge.area,
                    depth: frame.depth + 1,
                    projects: Rc::clone(&projects),
                });
            }
        }
    }

    /// `id` followed by its sub-areas down to `levels` links deep (0 = unbounded), depth
    /// first, each area listed once.
    pub fn get_area_and_sub_areas(&self, id: AreaId, levels: usize) -> Vec<AreaId> {
        self.collect_levels(id, levels, Direction::Sub)
    }

    /// `id` followed by its super-areas up to `levels` links high (0 = unbounded), depth
    /// first, each area listed once.
    pub fn get_area_and_super_areas(&self, id: AreaId, levels: usize) -> Vec<AreaId> {
        self.collect_levels(id, levels, Direction::Super)
    }

    // An area already listed is expanded again only when reached at a smaller depth, so
    // deeper levels stay reachable through it without re-walking equal or longer paths.
    fn collect_levels(&self, id: AreaId, levels: usize, direction: Direction) -> Vec<AreaId> {
        let mut result = Vec::new();
        let mut expanded_at: FxHashMap<AreaId, usize> = FxHashMap::default();
        let mut stack = vec![(id, 0usize)];

        while let Some((current, depth)) = stack.pop() {
            let Some(area) = self.area(current) else {
                continue;
            };
            match expanded_at.get(&current) {
                Some(&seen) if seen <= depth => continue,
                Some(_) => {}
                None => result.push(current),
            }
            expanded_at.insert(current, depth);

            if levels != 0 && depth >= levels {
                continue;
            }
            let edges = match direction {
                Direction::Sub => &area.sub_edges,
                Direction::Super => &area.super_edges,
            };
            for edge in edges.iter().rev() {
                if !edge.relation.recursion {
                    stack.push((edge.area, depth + 1));
                }
            }
        }

        result
    }
}
