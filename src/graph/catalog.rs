use rustc_hash::FxHashSet;

use super::AreaGraph;
use crate::model::{
    AreaId, Enumeration, EnumerationValueId, MimeType, ResourceId, Version, VersionId,
};

impl AreaGraph {
    /// Replaces the version catalog.
    pub fn set_versions(&mut self, versions: Vec<Version>) {
        self.versions = versions;
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn version(&self, id: VersionId) -> Option<&Version> {
        self.versions.iter().find(|version| version.id == id)
    }

    /// Replaces the enumeration catalog.
    pub fn set_enumerations(&mut self, enumerations: Vec<Enumeration>) {
        self.enumerations = enumerations;
    }

    pub fn enumerations(&self) -> &[Enumeration] {
        &self.enumerations
    }

    /// Enumerations owning any of `value_ids`, in catalog order, each listed once.
    pub fn get_enumerations(&self, value_ids: &[EnumerationValueId]) -> Vec<&Enumeration> {
        let wanted: FxHashSet<EnumerationValueId> = value_ids.iter().copied().collect();
        self.enumerations
            .iter()
            .filter(|enumeration| {
                enumeration
                    .values
                    .iter()
                    .any(|value| wanted.contains(&value.id))
            })
            .collect()
    }

    /// Replaces the MIME type catalog.
    pub fn set_mime_types(&mut self, mime_types: Vec<MimeType>) {
        self.mime_types = mime_types;
    }

    pub fn mime_types(&self) -> &[MimeType] {
        &self.mime_types
    }

    /// MIME type registered for `extension` (case-insensitive, leading dot optional),
    /// preferring entries flagged `preference`.
    pub fn mime_type_for_extension(&self, extension: &str) -> Option<&MimeType> {
        let extension = extension.trim_start_matches('.');
        let mut matches = self
            .mime_types
            .iter()
            .filter(|mime| mime.extension.eq_ignore_ascii_case(extension));
        let first = matches.next()?;
        if first.preference {
            return Some(first);
        }
        Some(matches.find(|mime| mime.preference).unwrap_or(first))
    }

    /// Area and version that use `resource_id` as their start resource.
    pub fn find_start_resource(&self, resource_id: ResourceId) -> Option<(AreaId, VersionId)> {
        self.areas
            .values()
            .find(|area| area.start_resource_id == Some(resource_id))
            .map(|area| (area.id(), area.version_id))
    }

    pub fn exists_start_resource(&self, resource_id: ResourceId) -> bool {
        self.find_start_resource(resource_id).is_some()
    }
}
