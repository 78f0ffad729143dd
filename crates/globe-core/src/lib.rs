//! Globe Editor Core Library
//!
//! Vector editing on the surface of a sphere: coordinates and Bézier
//! geometry, a layered document model, an orbit camera with hit testing,
//! erasing, and undo/redo.
//!
//! The library is renderer-agnostic. [`editor::GlobeEditor`] produces flat
//! line-strip vertex buffers and a sphere mesh for whatever draws them.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod bezier;
pub mod camera;
pub mod config;
pub mod coord;
pub mod document;
pub mod editor;
pub mod erase;
pub mod history;
pub mod path;
pub mod render;
pub mod svg_import;

pub use bezier::{CubicSegment, DEFAULT_SEGMENTS_PER_CURVE};
pub use camera::{GlobeCamera, Ray};
pub use config::EditorConfig;
pub use coord::Coordinate;
pub use document::{Document, DocumentError, DocumentMeta, DocumentStatistics, PathLocation, VectorLayer};
pub use editor::{GlobeEditor, PointerPhase, ToolMode};
pub use history::{EditAction, EditHistory};
pub use path::{GeoBounds, PathGeometry, PathId, PathStyle, PathType, Rgba, TerrainType, VectorPath};
pub use render::{LineVertex, SphereMesh, SphereVertex};
pub use svg_import::{
    ImportError, MercatorFrame, document_from_svg, document_from_svg_files, extract_path_data, import_path_data,
};
