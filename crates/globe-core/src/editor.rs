//! Editor orchestration: tools, gestures, selection and undoable commands.
//!
//! [`GlobeEditor`] owns the document, its history, the camera and the
//! configuration. Gestures are plain begin/continue/end calls; every committed
//! change goes through [`EditHistory`] so it can be undone.

use glam::DVec2;

use crate::camera::GlobeCamera;
use crate::config::EditorConfig;
use crate::coord::{Coordinate, distance_to_polyline};
use crate::document::{Document, DocumentStatistics, VectorLayer};
use crate::erase;
use crate::history::{EditAction, EditHistory};
use crate::path::{PathId, VectorPath};
use crate::render::{LineVertex, SphereMesh, push_polyline};

/// Active tool, deciding what pointer input does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolMode {
    /// Drag to rotate the globe.
    #[default]
    Navigate,
    /// Click to pick a path, drag to move it.
    Select,
    /// Drag to draw a freehand polyline.
    Draw,
    /// Drag to erase around the pointer.
    Erase,
}

/// Lifecycle of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

/// An in-progress move of the selected path.
#[derive(Debug, Clone)]
struct MoveDrag {
    anchor: Coordinate,
    original: VectorPath,
    preview: VectorPath,
}

pub struct GlobeEditor {
    document: Document,
    history: EditHistory,
    camera: GlobeCamera,
    config: EditorConfig,
    tool: ToolMode,
    active_layer: usize,
    /// Selected path, resolved against the document at use.
    selected: Option<PathId>,
    stroke: Option<Vec<Coordinate>>,
    drag: Option<MoveDrag>,
    /// Last pointer position of a navigation drag.
    pan_anchor: Option<DVec2>,
    viewport: DVec2,
    dirty: bool,
    vertices: Vec<LineVertex>,
}

impl Default for GlobeEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl GlobeEditor {
    /// Creates an editor over a new document with one "Coastlines" layer.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(Document::new("Untitled"), config)
    }

    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        let mut editor = Self {
            document,
            history: EditHistory::new(config.history_depth),
            camera: GlobeCamera::default(),
            config,
            tool: ToolMode::default(),
            active_layer: 0,
            selected: None,
            stroke: None,
            drag: None,
            pan_anchor: None,
            viewport: DVec2::ZERO,
            dirty: true,
            vertices: Vec::new(),
        };
        editor.set_viewport(800.0, 600.0);
        editor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn camera(&self) -> &GlobeCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut GlobeCamera {
        &mut self.camera
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn active_layer(&self) -> usize {
        self.active_layer
    }

    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    /// Id of the selected path, if it still exists.
    pub fn selected_path(&self) -> Option<PathId> {
        self.selected.filter(|id| self.document.locate(*id).is_some())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn statistics(&self) -> DocumentStatistics {
        self.document.statistics()
    }

    /// Sets the viewport size in pixels. Non-positive sizes are ignored.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = DVec2::new(width, height);
        self.camera.set_aspect_ratio(width / height);
    }

    /// Switches tools, abandoning any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if self.tool == tool {
            return;
        }
        self.cancel_gestures();
        tracing::debug!("[editor] tool {:?} -> {:?}", self.tool, tool);
        self.tool = tool;
    }

    fn cancel_gestures(&mut self) {
        self.cancel_stroke();
        self.cancel_move();
        self.pan_anchor = None;
    }

    /// Replaces the document. History and selection are reset.
    pub fn load_document(&mut self, document: Document) {
        tracing::info!(
            "[editor] load document '{}' ({} layers)",
            document.meta.name,
            document.layers.len()
        );
        self.cancel_gestures();
        self.document = document;
        self.history.clear();
        self.selected = None;
        self.active_layer = 0;
        self.dirty = true;
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Routes a pointer event to the active tool.
    ///
    /// Screen points are in pixels from the top-left corner. Points that miss
    /// the globe are ignored, except that an ending gesture still ends.
    pub fn handle_pointer(&mut self, phase: PointerPhase, screen: DVec2) {
        if self.tool == ToolMode::Navigate {
            self.navigate(phase, screen);
            return;
        }

        let hit = self.camera.hit_test(screen, self.viewport);
        match (self.tool, phase) {
            (ToolMode::Draw, PointerPhase::Began) => {
                if let Some(c) = hit {
                    self.begin_stroke(c);
                }
            }
            (ToolMode::Draw, PointerPhase::Moved) => {
                if let Some(c) = hit {
                    self.continue_stroke(c);
                }
            }
            (ToolMode::Draw, PointerPhase::Ended) => {
                if let Some(c) = hit {
                    self.continue_stroke(c);
                }
                self.end_stroke();
            }
            (ToolMode::Select, PointerPhase::Began) => {
                let picked = hit.and_then(|c| self.pick_path(&c).map(|id| (c, id)));
                match picked {
                    Some((c, id)) => {
                        self.select_path(id);
                        self.begin_move(c);
                    }
                    None => self.clear_selection(),
                }
            }
            (ToolMode::Select, PointerPhase::Moved) => {
                if let Some(c) = hit {
                    self.update_move(&c);
                }
            }
            (ToolMode::Select, PointerPhase::Ended) => {
                self.end_move();
            }
            (ToolMode::Erase, PointerPhase::Began | PointerPhase::Moved) => {
                if let Some(c) = hit {
                    self.erase_at(&c, self.config.eraser_radius);
                }
            }
            (_, PointerPhase::Cancelled) => self.cancel_gestures(),
            _ => {}
        }
    }

    fn navigate(&mut self, phase: PointerPhase, screen: DVec2) {
        match phase {
            PointerPhase::Began => self.pan_anchor = Some(screen),
            PointerPhase::Moved => {
                let Some(anchor) = self.pan_anchor else {
                    return;
                };
                let delta = (screen - anchor) * self.config.rotate_degrees_per_pixel;
                // Dragging right pulls the globe surface along with the pointer
                self.camera.rotate(-delta.x, delta.y);
                self.pan_anchor = Some(screen);
            }
            PointerPhase::Ended | PointerPhase::Cancelled => self.pan_anchor = None,
        }
    }

    // ---------------------------------------------------------------------
    // Freehand drawing
    // ---------------------------------------------------------------------

    pub fn begin_stroke(&mut self, start: Coordinate) {
        self.stroke = Some(vec![start]);
        self.dirty = true;
    }

    /// Adds a point to the stroke. Points closer than the configured spacing
    /// to the previous one are dropped.
    pub fn continue_stroke(&mut self, point: Coordinate) -> bool {
        let Some(points) = self.stroke.as_mut() else {
            return false;
        };
        if points
            .last()
            .is_some_and(|last| last.distance(&point) < self.config.min_point_spacing)
        {
            return false;
        }
        points.push(point);
        self.dirty = true;
        true
    }

    /// Commits the stroke as a new linear path in the active layer.
    ///
    /// Strokes with fewer than two points, or an active layer that is hidden
    /// or locked, commit nothing.
    pub fn end_stroke(&mut self) -> Option<PathId> {
        let points = self.stroke.take()?;
        self.dirty = true;
        if points.len() < 2 {
            return None;
        }
        let layer_index = self.active_layer;
        if !self.document.layer(layer_index).is_some_and(VectorLayer::is_editable) {
            tracing::warn!("[editor] stroke dropped: layer {} is not editable", layer_index);
            return None;
        }

        let path = VectorPath::linear(points, self.config.default_style);
        let id = path.id;
        let path_index = self.document.push_path(layer_index, path.clone())?;
        tracing::info!(
            "[editor] AddPath: {} points (layer={}, index={})",
            path.point_count(),
            layer_index,
            path_index
        );
        self.commit(EditAction::AddPath {
            layer_index,
            path_index,
            path,
        });
        Some(id)
    }

    pub fn cancel_stroke(&mut self) {
        if self.stroke.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn stroke_points(&self) -> Option<&[Coordinate]> {
        self.stroke.as_deref()
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Finds the editable path closest to `target` within the selection
    /// tolerance.
    pub fn pick_path(&self, target: &Coordinate) -> Option<PathId> {
        let per_curve = self.config.segments_per_curve;
        self.document
            .layers
            .iter()
            .filter(|layer| layer.is_editable())
            .flat_map(|layer| layer.paths.iter())
            .filter_map(|path| {
                let mut points = path.tessellate(per_curve);
                if let (true, Some(first)) = (path.is_closed, points.first().copied()) {
                    points.push(first);
                }
                let d = distance_to_polyline(&points, target);
                (d < self.config.selection_tolerance).then_some((d, path.id))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id)
    }

    /// Selects a path by id. Returns false if no such path exists.
    pub fn select_path(&mut self, id: PathId) -> bool {
        if self.document.locate(id).is_none() {
            return false;
        }
        if self.selected != Some(id) {
            self.cancel_move();
            self.selected = Some(id);
            self.dirty = true;
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.cancel_move();
        if self.selected.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn selected(&self) -> Option<&VectorPath> {
        self.document.find_path(self.selected?)
    }

    /// Turns the camera to the center of the selected path's bounds.
    pub fn focus_selected(&mut self) -> bool {
        let Some((lat, lon)) = self.selected().and_then(VectorPath::bounds).map(|b| b.center()) else {
            return false;
        };
        self.camera.look_at(Coordinate::new(lat, lon));
        true
    }

    /// Selected path location, only when its layer is editable.
    fn editable_selection(&self) -> Option<(usize, usize, &VectorPath)> {
        let loc = self.document.locate(self.selected?)?;
        let layer = self.document.layer(loc.layer_index)?;
        if !layer.is_editable() {
            return None;
        }
        Some((loc.layer_index, loc.path_index, layer.paths.get(loc.path_index)?))
    }

    // ---------------------------------------------------------------------
    // Moving, scaling, deleting
    // ---------------------------------------------------------------------

    /// Starts dragging the selected path from `anchor`.
    pub fn begin_move(&mut self, anchor: Coordinate) -> bool {
        let Some((_, _, path)) = self.editable_selection() else {
            return false;
        };
        self.drag = Some(MoveDrag {
            anchor,
            original: path.clone(),
            preview: path.clone(),
        });
        true
    }

    /// Updates the drag preview so the anchor follows `pointer`.
    pub fn update_move(&mut self, pointer: &Coordinate) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let (delta_lat, delta_lon) = drag.anchor.delta_to(pointer);
        drag.preview = drag.original.offset(delta_lat, delta_lon);
        self.dirty = true;
    }

    /// Commits the drag preview. A drag that never moved commits nothing.
    pub fn end_move(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        self.dirty = true;
        if drag.preview == drag.original {
            return false;
        }
        self.replace_selected(drag.preview)
    }

    pub fn cancel_move(&mut self) {
        if self.drag.take().is_some() {
            self.dirty = true;
        }
    }

    pub fn is_moving(&self) -> bool {
        self.drag.is_some()
    }

    /// Translates the selected path by degrees.
    pub fn move_selected(&mut self, delta_lat: f64, delta_lon: f64) -> bool {
        if !(delta_lat.is_finite() && delta_lon.is_finite()) {
            return false;
        }
        let Some((_, _, path)) = self.editable_selection() else {
            return false;
        };
        let moved = path.offset(delta_lat, delta_lon);
        self.replace_selected(moved)
    }

    /// Scales the selected path about its bounds center.
    pub fn scale_selected(&mut self, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let Some((_, _, path)) = self.editable_selection() else {
            return false;
        };
        let scaled = path.scaled(factor);
        self.replace_selected(scaled)
    }

    fn replace_selected(&mut self, new: VectorPath) -> bool {
        let Some((layer_index, path_index, _)) = self.editable_selection() else {
            return false;
        };
        let Some(old) = self.document.replace_path(layer_index, path_index, new.clone()) else {
            return false;
        };
        tracing::info!("[editor] ModifyPath (layer={}, index={})", layer_index, path_index);
        self.commit(EditAction::ModifyPath {
            layer_index,
            path_index,
            old,
            new,
        });
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some((layer_index, path_index, _)) = self.editable_selection() else {
            return false;
        };
        self.cancel_move();
        let Some(path) = self.document.remove_path(layer_index, path_index) else {
            return false;
        };
        tracing::info!("[editor] DeletePath (layer={}, index={})", layer_index, path_index);
        self.selected = None;
        self.commit(EditAction::DeletePath {
            layer_index,
            path_index,
            path,
        });
        true
    }

    // ---------------------------------------------------------------------
    // Erasing
    // ---------------------------------------------------------------------

    /// Erases around `center` and records one action per affected path.
    /// Returns the number of affected paths.
    pub fn erase_at(&mut self, center: &Coordinate, radius: f64) -> usize {
        let actions = erase::erase_at(
            &mut self.document,
            center,
            radius,
            self.config.segments_per_curve,
        );
        if actions.is_empty() {
            return 0;
        }
        let count = actions.len();
        tracing::info!("[editor] Erase: {} paths split", count);
        for action in actions {
            self.commit(action);
        }
        if self.selected.is_some_and(|id| self.document.locate(id).is_none()) {
            self.clear_selection();
        }
        count
    }

    // ---------------------------------------------------------------------
    // Layers
    // ---------------------------------------------------------------------

    /// Appends a layer, makes it active and returns its index.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        let layer = VectorLayer::new(name);
        let layer_index = self.document.layers.len();
        tracing::info!("[editor] AddLayer '{}' (index={})", layer.name, layer_index);
        self.document.layers.push(layer.clone());
        self.active_layer = layer_index;
        self.commit(EditAction::AddLayer { layer_index, layer });
        layer_index
    }

    pub fn delete_layer(&mut self, layer_index: usize) -> bool {
        let Some(layer) = self.document.remove_layer(layer_index) else {
            return false;
        };
        tracing::info!("[editor] DeleteLayer '{}' (index={})", layer.name, layer_index);
        self.cancel_gestures();
        if self.selected.is_some_and(|id| layer.paths.iter().any(|p| p.id == id)) {
            self.selected = None;
        }
        self.commit(EditAction::DeleteLayer { layer_index, layer });
        if layer_index < self.active_layer {
            self.active_layer -= 1;
        }
        self.clamp_active_layer();
        true
    }

    pub fn set_active_layer(&mut self, layer_index: usize) -> bool {
        if layer_index >= self.document.layers.len() {
            return false;
        }
        self.active_layer = layer_index;
        true
    }

    pub fn set_layer_visible(&mut self, layer_index: usize, visible: bool) -> bool {
        let Some(layer) = self.document.layer_mut(layer_index) else {
            return false;
        };
        layer.is_visible = visible;
        self.after_layer_flags_changed();
        true
    }

    pub fn set_layer_locked(&mut self, layer_index: usize, locked: bool) -> bool {
        let Some(layer) = self.document.layer_mut(layer_index) else {
            return false;
        };
        layer.is_locked = locked;
        self.after_layer_flags_changed();
        true
    }

    fn after_layer_flags_changed(&mut self) {
        if self.selected.is_some() && self.editable_selection().is_none() {
            self.clear_selection();
        }
        self.document.touch();
        self.dirty = true;
    }

    fn clamp_active_layer(&mut self) {
        self.active_layer = self.active_layer.min(self.document.layers.len().saturating_sub(1));
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    fn commit(&mut self, action: EditAction) {
        self.history.record(action);
        self.document.touch();
        self.dirty = true;
    }

    pub fn undo(&mut self) -> bool {
        self.step_history(true)
    }

    pub fn redo(&mut self) -> bool {
        self.step_history(false)
    }

    fn step_history(&mut self, undo: bool) -> bool {
        self.cancel_gestures();
        let active_id = self.document.layer(self.active_layer).map(|layer| layer.id);
        let stepped = if undo {
            self.history.undo(&mut self.document)
        } else {
            self.history.redo(&mut self.document)
        };
        if !stepped {
            return false;
        }
        tracing::info!("[editor] {}", if undo { "Undo" } else { "Redo" });
        self.selected = None;
        // Follow the active layer if it moved, else keep its slot.
        match active_id.and_then(|id| self.document.layers.iter().position(|layer| layer.id == id)) {
            Some(layer_index) => self.active_layer = layer_index,
            None => self.clamp_active_layer(),
        }
        self.document.touch();
        self.dirty = true;
        true
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    /// Line-strip vertices for everything on the globe, rebuilt when dirty.
    ///
    /// Order: visible document paths (the selected one highlighted, or
    /// replaced by its drag preview), then the stroke being drawn.
    pub fn line_vertices(&mut self) -> &[LineVertex] {
        if self.dirty {
            self.rebuild_vertices();
            self.dirty = false;
        }
        &self.vertices
    }

    fn rebuild_vertices(&mut self) {
        let per_curve = self.config.segments_per_curve;
        let highlight = self.config.selection_color;
        let mut out = std::mem::take(&mut self.vertices);
        out.clear();

        for (_, _, path) in self.document.visible_paths() {
            let is_selected = self.selected == Some(path.id);
            let shown = match &self.drag {
                Some(drag) if is_selected => &drag.preview,
                _ => path,
            };
            let color = if is_selected { highlight } else { path.style.stroke_color };
            push_polyline(&mut out, &shown.tessellate(per_curve), color, shown.is_closed);
        }

        if let Some(points) = &self.stroke {
            push_polyline(&mut out, points, self.config.default_style.stroke_color, false);
        }

        self.vertices = out;
    }

    /// Static globe mesh at the configured resolution.
    pub fn sphere_mesh(&self) -> SphereMesh {
        SphereMesh::uv_sphere(self.config.sphere_lat_segments, self.config.sphere_lon_segments)
    }
}
