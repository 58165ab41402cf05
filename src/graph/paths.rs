use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::AreaGraph;
use crate::model::{AreaId, VersionId, DEFAULT_VERSION_ID};

/// Parameters of a [`AreaGraph::get_area_full_file_name`] lookup.
#[derive(Debug, Clone, Default)]
pub struct FileNameQuery {
    /// Version whose folder layout applies.
    pub version_id: VersionId,
    /// Areas that may not supply the folder. Paths running through them are still walked
    /// (and marked visited) but nothing reached that way matches.
    pub omit: FxHashSet<AreaId>,
}

impl FileNameQuery {
    pub fn new(version_id: VersionId) -> Self {
        Self {
            version_id,
            omit: FxHashSet::default(),
        }
    }

    pub fn omit(mut self, id: AreaId) -> Self {
        self.omit.insert(id);
        self
    }
}

impl AreaGraph {
    /// Area that anchors file paths of `version_id`: the catalog entry's start area, else
    /// the home area.
    pub fn version_start_area(&self, version_id: VersionId) -> Option<AreaId> {
        self.version(version_id)
            .and_then(|version| version.start_area_id)
            .or(self.home_area_id())
    }

    /// Full file name of an area for the queried version.
    ///
    /// The folder comes from the nearest area, by link count, at or above `id` that belongs
    /// to the version and either has a non-empty folder or is the version's start area (the
    /// latter contributes no folder). Without such an area the bare file name is returned.
    /// Hidden areas and areas without a file name have no file.
    pub fn get_area_full_file_name(&self, id: AreaId, query: &FileNameQuery) -> Option<String> {
        let area = self.area(id)?;
        if !area.is_visible {
            return None;
        }
        let file_name = area.file_name.as_deref().filter(|name| !name.is_empty())?;
        let start_area = self.version_start_area(query.version_id);
        let separator = self.options.path_separator.as_str();

        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        visited.insert(id);
        queue.push_back((id, false));

        while let Some((current, omitted)) = queue.pop_front() {
            let Some(candidate) = self.area(current) else {
                continue;
            };
            let omitted = omitted || query.omit.contains(&current);
            if !omitted && candidate.version_id == query.version_id {
                if let Some(folder) = candidate.folder.as_deref().filter(|f| !f.is_empty()) {
                    let folder = if separator.is_empty() {
                        folder
                    } else {
                        folder.trim_end_matches(separator)
                    };
                    return Some(format!("{folder}{separator}{file_name}"));
                }
                if start_area == Some(current) {
                    return Some(file_name.to_string());
                }
            }
            for sup in candidate.structural_super_ids() {
                if visited.insert(sup) {
                    queue.push_back((sup, omitted));
                }
            }
        }

        Some(file_name.to_string())
    }

    /// [`Self::get_area_full_file_name`] for the default version.
    pub fn get_area_file_name(&self, id: AreaId) -> Option<String> {
        self.get_area_full_file_name(id, &FileNameQuery::new(DEFAULT_VERSION_ID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_support::{add, init_tracing, link};
    use crate::model::{Area, Version, GLOBAL_ROOT_ID};
    use crate::options::GraphOptions;

    fn site() -> (AreaGraph, [AreaId; 4]) {
        init_tracing();
        let mut graph = AreaGraph::with_options(GraphOptions::new().path_separator("/"));
        let docs = add(&mut graph, GLOBAL_ROOT_ID, Area::default().with_folder("docs/"));
        let section = add(&mut graph, docs, Area::default());
        let page = add(&mut graph, section, Area::default().with_file("intro.html"));
        let other = add(&mut graph, GLOBAL_ROOT_ID, Area::default().with_folder("other"));
        (graph, [docs, section, page, other])
    }

    #[test]
    fn nearest_folder_wins() {
        let (graph, [_, section, page, _]) = site();
        assert_eq!(
            graph.get_area_file_name(page).as_deref(),
            Some("docs/intro.html")
        );
        assert!(graph.get_area_file_name(section).is_none(), "no file name");
    }

    #[test]
    fn own_folder_counts_at_distance_zero() {
        let (mut graph, [_, _, page, _]) = site();
        graph.area_mut(page).expect("page").folder = Some("local".into());
        assert_eq!(
            graph.get_area_file_name(page).as_deref(),
            Some("local/intro.html")
        );
    }

    #[test]
    fn breadth_first_prefers_fewer_links() {
        let (mut graph, [_, _, page, other]) = site();
        link(&mut graph, other, page);
        assert_eq!(
            graph.get_area_file_name(page).as_deref(),
            Some("other/intro.html")
        );
    }

    #[test]
    fn omitted_branch_is_skipped() {
        let (mut graph, [_, section, page, other]) = site();
        link(&mut graph, other, page);
        let query = FileNameQuery::new(DEFAULT_VERSION_ID).omit(other);
        assert_eq!(
            graph.get_area_full_file_name(page, &query).as_deref(),
            Some("docs/intro.html")
        );

        let query = FileNameQuery::new(DEFAULT_VERSION_ID).omit(section);
        assert_eq!(
            graph.get_area_full_file_name(page, &query).as_deref(),
            Some("other/intro.html")
        );
    }

    #[test]
    fn other_version_folders_are_passed_over() {
        let (mut graph, [docs, section, page, _]) = site();
        graph.area_mut(docs).expect("docs").version_id = 2;
        graph.area_mut(section).expect("section").version_id = 2;
        graph.area_mut(page).expect("page").version_id = 2;
        graph.set_versions(vec![Version {
            id: 2,
            alias: "beta".into(),
            description: String::new(),
            start_area_id: Some(section),
        }]);

        let query = FileNameQuery::new(2);
        assert_eq!(
            graph.get_area_full_file_name(page, &query).as_deref(),
            Some("intro.html"),
            "start area is reached before the folder"
        );
        assert_eq!(
            graph.get_area_file_name(page).as_deref(),
            Some("intro.html"),
            "no default-version folder anywhere"
        );
    }

    #[test]
    fn hidden_area_has_no_file() {
        let (mut graph, [_, _, page, _]) = site();
        graph.area_mut(page).expect("page").is_visible = false;
        assert!(graph.get_area_file_name(page).is_none());
        assert!(graph.get_area_file_name(404).is_none());
    }

    #[test]
    fn start_area_falls_back_to_home() {
        let (mut graph, [docs, ..]) = site();
        assert_eq!(graph.version_start_area(DEFAULT_VERSION_ID), None);
        graph.set_home_area(docs).expect("home");
        assert_eq!(graph.version_start_area(DEFAULT_VERSION_ID), Some(docs));
    }
}
