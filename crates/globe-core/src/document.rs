//! Layered vector document.
//!
//! The [`Document`] is the single mutable root of the editor. Every mutation
//! goes through a method that validates layer and path indices and reports
//! failure as `None`/`false` rather than panicking.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::path::{PathId, VectorPath};

/// Format version written by this crate.
pub const FORMAT_VERSION: &str = "2.0";

/// Name of the layer created for new documents.
pub const DEFAULT_LAYER_NAME: &str = "Coastlines";

/// Error type for document persistence.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(String),
}

/// Position of a path inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLocation {
    pub layer_index: usize,
    pub path_index: usize,
}

/// A named, ordered group of paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VectorLayer {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub paths: Vec<VectorPath>,
}

fn default_true() -> bool {
    true
}

impl VectorLayer {
    /// Creates an empty, visible, unlocked layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_visible: true,
            is_locked: false,
            paths: Vec::new(),
        }
    }

    /// True when paths in this layer may be edited by tools.
    pub fn is_editable(&self) -> bool {
        self.is_visible && !self.is_locked
    }
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentMeta {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocumentMeta {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created: now,
            modified: now,
            author: None,
            description: None,
        }
    }
}

/// Aggregate counts over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStatistics {
    pub layer_count: usize,
    pub path_count: usize,
    pub visible_path_count: usize,
    pub segment_count: usize,
    pub point_count: usize,
}

/// The editable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub format_version: String,
    pub meta: DocumentMeta,
    #[serde(default)]
    pub layers: Vec<VectorLayer>,
}

impl Document {
    /// Creates a document with a single empty "Coastlines" layer.
    pub fn new(name: impl Into<String>) -> Self {
        let mut document = Self::empty(name);
        document.layers.push(VectorLayer::new(DEFAULT_LAYER_NAME));
        document
    }

    /// Creates a document without layers.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            meta: DocumentMeta::new(name),
            layers: Vec::new(),
        }
    }

    /// Loads a document from JSON, rejecting unknown major versions.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        let major = document.format_version.split('.').next().unwrap_or_default();
        if !matches!(major, "1" | "2") {
            return Err(DocumentError::UnsupportedVersion(document.format_version));
        }
        Ok(document)
    }

    /// Serializes the document to compact JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reads a `.globe` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Writes the document as a compact `.globe` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Marks the document as modified now.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn layer(&self, layer_index: usize) -> Option<&VectorLayer> {
        self.layers.get(layer_index)
    }

    pub fn layer_mut(&mut self, layer_index: usize) -> Option<&mut VectorLayer> {
        self.layers.get_mut(layer_index)
    }

    pub fn path(&self, layer_index: usize, path_index: usize) -> Option<&VectorPath> {
        self.layers.get(layer_index)?.paths.get(path_index)
    }

    /// Resolves a path id to its current location.
    pub fn locate(&self, id: PathId) -> Option<PathLocation> {
        self.layers.iter().enumerate().find_map(|(layer_index, layer)| {
            layer
                .paths
                .iter()
                .position(|p| p.id == id)
                .map(|path_index| PathLocation {
                    layer_index,
                    path_index,
                })
        })
    }

    /// Looks up a path by id.
    pub fn find_path(&self, id: PathId) -> Option<&VectorPath> {
        let loc = self.locate(id)?;
        self.path(loc.layer_index, loc.path_index)
    }

    /// Appends a path to a layer and returns its index.
    pub fn push_path(&mut self, layer_index: usize, path: VectorPath) -> Option<usize> {
        let layer = self.layers.get_mut(layer_index)?;
        layer.paths.push(path);
        Some(layer.paths.len() - 1)
    }

    /// Inserts a path at `path_index` (which may equal the path count).
    pub fn insert_path(&mut self, layer_index: usize, path_index: usize, path: VectorPath) -> bool {
        let Some(layer) = self.layers.get_mut(layer_index) else {
            return false;
        };
        if path_index > layer.paths.len() {
            return false;
        }
        layer.paths.insert(path_index, path);
        true
    }

    pub fn remove_path(&mut self, layer_index: usize, path_index: usize) -> Option<VectorPath> {
        let layer = self.layers.get_mut(layer_index)?;
        if path_index >= layer.paths.len() {
            return None;
        }
        Some(layer.paths.remove(path_index))
    }

    /// Replaces a path in place, returning the previous value.
    pub fn replace_path(
        &mut self,
        layer_index: usize,
        path_index: usize,
        path: VectorPath,
    ) -> Option<VectorPath> {
        let slot = self.layers.get_mut(layer_index)?.paths.get_mut(path_index)?;
        Some(std::mem::replace(slot, path))
    }

    /// Replaces `count` paths starting at `path_index` with `paths`.
    pub fn splice_paths(
        &mut self,
        layer_index: usize,
        path_index: usize,
        count: usize,
        paths: Vec<VectorPath>,
    ) -> Option<Vec<VectorPath>> {
        let layer = self.layers.get_mut(layer_index)?;
        let end = path_index.checked_add(count)?;
        if end > layer.paths.len() {
            return None;
        }
        Some(layer.paths.splice(path_index..end, paths).collect())
    }

    /// Inserts a layer at `layer_index` (which may equal the layer count).
    pub fn insert_layer(&mut self, layer_index: usize, layer: VectorLayer) -> bool {
        if layer_index > self.layers.len() {
            return false;
        }
        self.layers.insert(layer_index, layer);
        true
    }

    pub fn remove_layer(&mut self, layer_index: usize) -> Option<VectorLayer> {
        if layer_index >= self.layers.len() {
            return None;
        }
        Some(self.layers.remove(layer_index))
    }

    /// Iterates `(layer_index, path_index, path)` over visible layers.
    pub fn visible_paths(&self) -> impl Iterator<Item = (usize, usize, &VectorPath)> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.is_visible)
            .flat_map(|(li, layer)| layer.paths.iter().enumerate().map(move |(pi, p)| (li, pi, p)))
    }

    pub fn statistics(&self) -> DocumentStatistics {
        let mut stats = DocumentStatistics {
            layer_count: self.layers.len(),
            ..DocumentStatistics::default()
        };
        for layer in &self.layers {
            stats.path_count += layer.paths.len();
            if layer.is_visible {
                stats.visible_path_count += layer.paths.len();
            }
            for path in &layer.paths {
                stats.segment_count += path.segment_count();
                stats.point_count += path.point_count();
            }
        }
        stats
    }
}
