//! Undo/redo history of reversible document edits.
//!
//! Each [`EditAction`] stores complete before/after values, so it can be
//! applied or reverted without recomputation. Indices are re-validated at
//! application time; an action whose target no longer matches the document
//! is skipped and logged instead of failing.

use std::collections::VecDeque;

use crate::document::{Document, VectorLayer};
use crate::path::{PathId, VectorPath};

/// Default number of undo steps kept.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// One reversible document mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    AddPath {
        layer_index: usize,
        path_index: usize,
        path: VectorPath,
    },
    DeletePath {
        layer_index: usize,
        path_index: usize,
        path: VectorPath,
    },
    ModifyPath {
        layer_index: usize,
        path_index: usize,
        old: VectorPath,
        new: VectorPath,
    },
    /// `original` replaced in place by the ordered `results` (possibly none).
    SplitPath {
        layer_index: usize,
        path_index: usize,
        original: VectorPath,
        results: Vec<VectorPath>,
    },
    AddLayer {
        layer_index: usize,
        layer: VectorLayer,
    },
    DeleteLayer {
        layer_index: usize,
        layer: VectorLayer,
    },
}

impl EditAction {
    /// Short human-readable label, e.g. for "Undo Add Path" menu items.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddPath { .. } => "Add Path",
            Self::DeletePath { .. } => "Delete Path",
            Self::ModifyPath { .. } => "Modify Path",
            Self::SplitPath { .. } => "Erase",
            Self::AddLayer { .. } => "Add Layer",
            Self::DeleteLayer { .. } => "Delete Layer",
        }
    }

    /// Applies the forward transform. Returns false if the action was skipped.
    pub fn apply(&self, document: &mut Document) -> bool {
        match self {
            Self::AddPath {
                layer_index,
                path_index,
                path,
            } => document.insert_path(*layer_index, *path_index, path.clone()),
            Self::DeletePath {
                layer_index,
                path_index,
                path,
            } => remove_matching(document, *layer_index, *path_index, path.id),
            Self::ModifyPath {
                layer_index,
                path_index,
                old,
                new,
            } => replace_matching(document, *layer_index, *path_index, old.id, new),
            Self::SplitPath {
                layer_index,
                path_index,
                original,
                results,
            } => splice_matching(
                document,
                *layer_index,
                *path_index,
                &[original.id],
                results.clone(),
            ),
            Self::AddLayer { layer_index, layer } => document.insert_layer(*layer_index, layer.clone()),
            Self::DeleteLayer { layer_index, layer } => {
                remove_layer_matching(document, *layer_index, layer)
            }
        }
    }

    /// Applies the inverse transform. Returns false if the action was skipped.
    pub fn revert(&self, document: &mut Document) -> bool {
        match self {
            Self::AddPath {
                layer_index,
                path_index,
                path,
            } => remove_matching(document, *layer_index, *path_index, path.id),
            Self::DeletePath {
                layer_index,
                path_index,
                path,
            } => document.insert_path(*layer_index, *path_index, path.clone()),
            Self::ModifyPath {
                layer_index,
                path_index,
                old,
                new,
            } => replace_matching(document, *layer_index, *path_index, new.id, old),
            Self::SplitPath {
                layer_index,
                path_index,
                original,
                results,
            } => {
                let ids: Vec<PathId> = results.iter().map(|p| p.id).collect();
                splice_matching(
                    document,
                    *layer_index,
                    *path_index,
                    &ids,
                    vec![original.clone()],
                )
            }
            Self::AddLayer { layer_index, layer } => {
                remove_layer_matching(document, *layer_index, layer)
            }
            Self::DeleteLayer { layer_index, layer } => document.insert_layer(*layer_index, layer.clone()),
        }
    }
}

fn remove_matching(document: &mut Document, layer_index: usize, path_index: usize, id: PathId) -> bool {
    if document.path(layer_index, path_index).map(|p| p.id) != Some(id) {
        return false;
    }
    document.remove_path(layer_index, path_index).is_some()
}

fn replace_matching(
    document: &mut Document,
    layer_index: usize,
    path_index: usize,
    expected: PathId,
    replacement: &VectorPath,
) -> bool {
    if document.path(layer_index, path_index).map(|p| p.id) != Some(expected) {
        return false;
    }
    document
        .replace_path(layer_index, path_index, replacement.clone())
        .is_some()
}

/// Replaces the run of paths whose ids equal `expected` with `replacement`.
fn splice_matching(
    document: &mut Document,
    layer_index: usize,
    path_index: usize,
    expected: &[PathId],
    replacement: Vec<VectorPath>,
) -> bool {
    let Some(layer) = document.layer(layer_index) else {
        return false;
    };
    let Some(current) = layer.paths.get(path_index..path_index.saturating_add(expected.len())) else {
        return false;
    };
    if !current.iter().map(|p| p.id).eq(expected.iter().copied()) {
        return false;
    }
    document
        .splice_paths(layer_index, path_index, expected.len(), replacement)
        .is_some()
}

fn remove_layer_matching(document: &mut Document, layer_index: usize, layer: &VectorLayer) -> bool {
    if document.layer(layer_index).map(|l| l.id) != Some(layer.id) {
        return false;
    }
    document.remove_layer(layer_index).is_some()
}

/// Linear undo/redo history with bounded depth.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<EditAction>,
    redo_stack: Vec<EditAction>,
    max_depth: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl EditHistory {
    /// Creates an empty history keeping at most `max_depth` undo steps.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Records an already-applied action. Clears the redo stack.
    pub fn record(&mut self, action: EditAction) {
        tracing::debug!("[history] record {}", action.label());
        self.undo_stack.push_back(action);
        self.redo_stack.clear();
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Reverts the most recent action. Returns false if there was nothing to undo.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(action) = self.undo_stack.pop_back() else {
            return false;
        };
        if !action.revert(document) {
            tracing::warn!("[history] undo {} skipped: stale target", action.label());
        }
        self.redo_stack.push(action);
        true
    }

    /// Re-applies the most recently undone action. Returns false if there was nothing to redo.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        if !action.apply(document) {
            tracing::warn!("[history] redo {} skipped: stale target", action.label());
        }
        self.undo_stack.push_back(action);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the action `undo` would revert.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.back().map(EditAction::label)
    }

    /// Label of the action `redo` would re-apply.
    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo_stack.last().map(EditAction::label)
    }

    /// Oldest action still undoable.
    pub fn oldest(&self) -> Option<&EditAction> {
        self.undo_stack.front()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
