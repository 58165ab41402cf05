use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::AreaGraph;
use crate::model::{AliasHint, Area, AreaId, TraversalDecision, GLOBAL_ROOT_ID};

impl AreaGraph {
    /// Finds the project roots that scope aliases for `id`.
    ///
    /// Walks super-area links breadth-first from `id` (the area itself included), stopping
    /// each path at the first area flagged `is_project_root`. Several roots come back when
    /// diamond paths end at different projects, in discovery order. When no path meets a
    /// project root the global root is the only scope.
    ///
    /// # Arguments
    /// * `id` - Area whose enclosing projects are wanted.
    ///
    /// # Returns
    /// * Project root ids, closest first; `[GLOBAL_ROOT_ID]` when none encloses `id`.
    /// * An empty vector when `id` is unknown.
    ///
    /// # Time Complexity
    /// O(A) where A is the number of ancestors examined.
    ///
    /// # Example
    /// ```rust
    /// # use areagraph::{AreaGraph, Area, Relation, GLOBAL_ROOT_ID};
    /// let mut graph = AreaGraph::new();
    /// let project = graph.add_new_area(Area::default().with_project_root(true))?;
    /// let page = graph.add_new_area(Area::default())?;
    /// let orphan = graph.add_new_area(Area::default())?;
    /// graph.add_subarea(GLOBAL_ROOT_ID, project, Relation::inheriting())?;
    /// graph.add_subarea(project, page, Relation::inheriting())?;
    /// graph.add_subarea(GLOBAL_ROOT_ID, orphan, Relation::inheriting())?;
    ///
    /// assert_eq!(graph.get_project_root_areas(page), vec![project]);
    /// assert_eq!(graph.get_project_root_areas(orphan), vec![GLOBAL_ROOT_ID]);
    /// # Ok::<(), areagraph::AreaError>(())
    /// ```
    ///
    /// # See Also
    /// * [`Self::get_project_areas`] - Lists the areas inside the returned scopes.
    pub fn get_project_root_areas(&self, id: AreaId) -> Vec<AreaId> {
        if !self.contains_area(id) {
            return Vec::new();
        }

        let mut roots = Vec::new();
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(id);
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            let Some(area) = self.area(current) else {
                continue;
            };
            if area.is_project_root {
                roots.push(current);
                continue;
            }
            for sup in area.structural_super_ids() {
                if visited.insert(sup) {
                    queue.push_back(sup);
                }
            }
        }

        if roots.is_empty() {
            roots.push(GLOBAL_ROOT_ID);
        }
        roots
    }

    /// Every area below the given project roots, roots first, breadth-first.
    ///
    /// Nested project roots do not end the walk, so sub-project areas linked below a
    /// project belong to it as well. Recursion links are not followed.
    pub fn get_project_areas(&self, roots: &[AreaId]) -> Vec<AreaId> {
        let mut areas = Vec::new();
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        for &root in roots {
            if self.contains_area(root) && visited.insert(root) {
                queue.push_back(root);
            }
        }

        while let Some(current) = queue.pop_front() {
            let Some(area) = self.area(current) else {
                continue;
            };
            areas.push(current);
            for child in area.structural_sub_ids() {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        areas
    }

    /// Looks up `alias` in the subtree under `root`.
    ///
    /// The subtree is walked like [`Self::for_each_area`] without duplicates; `hint` picks
    /// the first or last match in that order. Returns `None` when nothing matches.
    pub fn get_area(&self, root: AreaId, alias: &str, hint: AliasHint) -> Option<&Area> {
        let mut found: Option<AreaId> = None;
        self.for_each_area(root, false, |area, _| {
            if hint == AliasHint::First && found.is_some() {
                return TraversalDecision::Prune;
            }
            if area.has_alias(alias) {
                found = Some(area.id());
            }
            TraversalDecision::Continue
        });
        found.and_then(|id| self.area(id))
    }

    /// Resolves `alias` as seen from the area `from`: searched inside each project enclosing
    /// `from`, in the order [`Self::get_project_root_areas`] reports them.
    pub fn get_area_from_area(&self, from: AreaId, alias: &str, hint: AliasHint) -> Option<&Area> {
        self.get_project_root_areas(from)
            .into_iter()
            .find_map(|root| self.get_area(root, alias, hint))
    }

    /// Resolves `alias` across the whole hierarchy.
    pub fn get_area_global(&self, alias: &str, hint: AliasHint) -> Option<&Area> {
        self.get_area(GLOBAL_ROOT_ID, alias, hint)
    }

    /// Checks that no area other than `area_id` uses `alias` within `area_id`'s projects.
    ///
    /// An empty or missing alias is always unique. An area not yet in the graph is checked
    /// against the global scope.
    pub fn is_area_alias_unique(&self, alias: Option<&str>, area_id: AreaId) -> bool {
        let Some(alias) = alias.filter(|alias| !alias.is_empty()) else {
            return true;
        };

        let mut roots = self.get_project_root_areas(area_id);
        if roots.is_empty() {
            roots.push(GLOBAL_ROOT_ID);
        }
        self.get_project_areas(&roots)
            .into_iter()
            .filter(|id| *id != area_id)
            .filter_map(|id| self.area(id))
            .all(|area| !area.has_alias(alias))
    }
}
