use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::AreaGraph;
use crate::error::{AreaError, Result};
use crate::model::{AreaEdge, AreaId, Relation, GLOBAL_ROOT_ID};

impl AreaGraph {
    /// Links `sub` below `sup`, appending it last in `sup`'s priority order.
    ///
    /// # Errors
    /// * [`AreaError::UnknownArea`] if either end is missing.
    /// * [`AreaError::DuplicateEdge`] if the two areas are already linked this way.
    /// * [`AreaError::InvalidEdit`] if `sub` is the global root, or for a self-link that is
    ///   not flagged `recursion`.
    ///
    /// Links that close a structural cycle are accepted; [`Self::exists_circle_in_areas`]
    /// reports them.
    pub fn add_subarea(&mut self, sup: AreaId, sub: AreaId, relation: Relation) -> Result<()> {
        let sup_area = self.require(sup)?;
        self.require(sub)?;
        if sub == GLOBAL_ROOT_ID {
            return Err(AreaError::invalid(
                "the global root area cannot be a sub-area",
            ));
        }
        if sup == sub && !relation.recursion {
            return Err(AreaError::invalid(format!(
                "area {sup} cannot be its own sub-area without a recursion link"
            )));
        }
        if sup_area.sub_relation(sub).is_some() {
            return Err(AreaError::DuplicateEdge { sup, sub });
        }

        let recursion = relation.recursion;
        if let Some(area) = self.areas.get_mut(&sup) {
            area.sub_edges.push(AreaEdge {
                area: sub,
                relation: relation.clone(),
            });
        }
        if let Some(area) = self.areas.get_mut(&sub) {
            area.super_edges.push(AreaEdge {
                area: sup,
                relation,
            });
        }
        debug!(sup, sub, recursion, "sub-area linked");
        Ok(())
    }

    /// Unlinks `sub` from `sup` and returns the relation the link carried.
    pub fn remove_subarea(&mut self, sup: AreaId, sub: AreaId) -> Result<Relation> {
        self.require(sub)?;
        let sup_area = self.areas.get_mut(&sup).ok_or(AreaError::UnknownArea(sup))?;
        let pos = sup_area
            .sub_edges
            .iter()
            .position(|edge| edge.area == sub)
            .ok_or(AreaError::MissingEdge { sup, sub })?;
        let edge = sup_area.sub_edges.remove(pos);

        if let Some(sub_area) = self.areas.get_mut(&sub) {
            if let Some(pos) = sub_area.super_edges.iter().position(|e| e.area == sup) {
                sub_area.super_edges.remove(pos);
            }
        }
        debug!(sup, sub, "sub-area unlinked");
        Ok(edge.relation)
    }

    /// Moves `sub` to `index` in `sup`'s priority order. Indices past the end move it last.
    pub fn move_subarea(&mut self, sup: AreaId, sub: AreaId, index: usize) -> Result<()> {
        let sup_area = self.areas.get_mut(&sup).ok_or(AreaError::UnknownArea(sup))?;
        let pos = sup_area
            .sub_edges
            .iter()
            .position(|edge| edge.area == sub)
            .ok_or(AreaError::MissingEdge { sup, sub })?;
        let edge = sup_area.sub_edges.remove(pos);
        let index = index.min(sup_area.sub_edges.len());
        sup_area.sub_edges.insert(index, edge);
        Ok(())
    }

    /// Sub-areas of `id` in priority order, minus those hidden by their link.
    pub fn visible_sub_area_ids(&self, id: AreaId) -> Vec<AreaId> {
        self.area(id)
            .map(|area| {
                area.sub_edges
                    .iter()
                    .filter(|edge| !edge.relation.hide_sub)
                    .map(|edge| edge.area)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True when `descendant` lies below `ancestor` without crossing a recursion link.
    pub fn is_sub_area_of(&self, ancestor: AreaId, descendant: AreaId) -> bool {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(ancestor);
        queue.push_back(ancestor);

        while let Some(current) = queue.pop_front() {
            let Some(area) = self.area(current) else {
                continue;
            };
            for child in area.structural_sub_ids() {
                if child == descendant {
                    return true;
                }
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_support::{add, diamond_graph, scenario_graph};
    use crate::model::Area;

    #[test]
    fn add_subarea_stores_relation_on_both_ends() {
        let mut graph = AreaGraph::new();
        let a = graph.add_new_area(Area::default()).expect("new area");
        let b = graph.add_new_area(Area::default()).expect("new area");
        let relation = Relation::inheriting().names("part", "whole").reference(true);
        graph.add_subarea(a, b, relation.clone()).expect("link");

        assert_eq!(graph.area(a).and_then(|x| x.sub_relation(b)), Some(&relation));
        assert_eq!(graph.area(b).and_then(|x| x.super_relation(a)), Some(&relation));
    }

    #[test]
    fn add_subarea_rejects_invalid_edits() {
        let (mut graph, [a, b, ..]) = diamond_graph();
        assert_eq!(
            graph.add_subarea(a, 99, Relation::default()),
            Err(AreaError::UnknownArea(99))
        );
        assert_eq!(
            graph.add_subarea(a, b, Relation::default()),
            Err(AreaError::DuplicateEdge { sup: a, sub: b })
        );
        assert!(matches!(
            graph.add_subarea(a, GLOBAL_ROOT_ID, Relation::default()),
            Err(AreaError::InvalidEdit(_))
        ));
        assert!(matches!(
            graph.add_subarea(a, a, Relation::inheriting()),
            Err(AreaError::InvalidEdit(_))
        ));
        graph
            .add_subarea(a, a, Relation::recursive())
            .expect("recursive self link");
    }

    #[test]
    fn remove_subarea_returns_relation_and_unlinks() {
        let (mut graph, [a, b, c, _]) = diamond_graph();
        let relation = graph.remove_subarea(a, b).expect("unlink");
        assert_eq!(relation, Relation::inheriting());
        assert_eq!(graph.area(a).expect("a").sub_area_ids().collect::<Vec<_>>(), vec![c]);
        assert!(graph.area(b).expect("b").super_edges().is_empty());

        assert_eq!(
            graph.remove_subarea(a, b),
            Err(AreaError::MissingEdge { sup: a, sub: b })
        );
    }

    #[test]
    fn move_subarea_reorders_priority() {
        let mut graph = AreaGraph::new();
        let parent = add(&mut graph, GLOBAL_ROOT_ID, Area::default());
        let x = add(&mut graph, parent, Area::default());
        let y = add(&mut graph, parent, Area::default());
        let z = add(&mut graph, parent, Area::default());

        graph.move_subarea(parent, z, 0).expect("move first");
        let order: Vec<_> = graph.area(parent).expect("parent").sub_area_ids().collect();
        assert_eq!(order, vec![z, x, y]);

        graph.move_subarea(parent, z, 10).expect("move last");
        let order: Vec<_> = graph.area(parent).expect("parent").sub_area_ids().collect();
        assert_eq!(order, vec![x, y, z]);
    }

    #[test]
    fn hidden_sub_areas_are_left_out_of_listing() {
        let mut graph = AreaGraph::new();
        let parent = add(&mut graph, GLOBAL_ROOT_ID, Area::default());
        let shown = add(&mut graph, parent, Area::default());
        let hidden = graph.add_new_area(Area::default()).expect("new area");
        graph
            .add_subarea(parent, hidden, Relation::inheriting().hide_sub(true))
            .expect("hidden link");
        assert_eq!(graph.visible_sub_area_ids(parent), vec![shown]);
        assert!(graph.visible_sub_area_ids(404).is_empty());
    }

    #[test]
    fn is_sub_area_of_ignores_recursion_links() {
        let (graph, [project, home, leaf]) = scenario_graph();
        assert!(graph.is_sub_area_of(project, leaf));
        assert!(graph.is_sub_area_of(GLOBAL_ROOT_ID, home));
        assert!(!graph.is_sub_area_of(leaf, project));
        assert!(!graph.is_sub_area_of(home, home));
    }
}
