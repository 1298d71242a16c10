use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use boxview_common::{document::FaceEntry, types::FaceId};

/// Lookup from face ids to font files. Fixed once rendering starts.
#[derive(Debug, Clone, Default)]
pub struct FaceTable {
    paths: HashMap<FaceId, PathBuf>,
}

impl FaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from serialized entries, resolving each path against `base`.
    ///
    /// When a face appears more than once the later entry wins.
    pub fn from_entries(base: &Path, entries: &[FaceEntry]) -> Self {
        let mut table = Self::new();
        for entry in entries {
            if let Some(previous) = table.insert(entry.face, base.join(&entry.path)) {
                tracing::warn!(
                    "face {} listed twice, replacing {}",
                    entry.face,
                    previous.display()
                );
            }
        }
        table
    }

    pub fn insert(&mut self, face: FaceId, path: PathBuf) -> Option<PathBuf> {
        self.paths.insert(face, path)
    }

    pub fn resolve(&self, face: FaceId) -> Option<&Path> {
        self.paths.get(&face).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
