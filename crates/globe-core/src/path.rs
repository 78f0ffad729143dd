//! Vector paths drawn on the sphere surface.
//!
//! A path is either a polyline of coordinates or a chain of cubic Bézier
//! segments. The two payloads are variants of [`PathGeometry`], so a path can
//! never carry both or neither.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bezier::{CubicSegment, DEFAULT_SEGMENTS_PER_CURVE, tessellate_segments};
use crate::coord::Coordinate;

/// Stable identifier for a path.
pub type PathId = Uuid;

/// RGBA color with float components in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const COASTLINE: Rgba = Rgba::rgb(0.9, 0.9, 0.9);
    pub const HIGHLIGHT: Rgba = Rgba::rgb(1.0, 0.8, 0.2);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Visual style of a path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub stroke_color: Rgba,
    pub stroke_width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Rgba>,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::COASTLINE,
            stroke_width: 1.5,
            fill_color: None,
        }
    }
}

/// Terrain tag attached to a path. Carried through edits but not rendered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Land,
    Water,
    Mountain,
    Forest,
    Desert,
    Ice,
}

/// Path representation discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathType {
    Linear,
    Cubic,
}

/// The geometric payload of a path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "pathType", rename_all = "camelCase")]
pub enum PathGeometry {
    #[serde(rename_all = "camelCase")]
    Linear { linear_points: Vec<Coordinate> },
    #[serde(rename_all = "camelCase")]
    Cubic { cubic_segments: Vec<CubicSegment> },
}

impl PathGeometry {
    /// Applies `f` to every stored point, control points included.
    #[must_use]
    pub fn map_points(&self, mut f: impl FnMut(Coordinate) -> Coordinate) -> Self {
        match self {
            Self::Linear { linear_points } => Self::Linear {
                linear_points: linear_points.iter().map(|p| f(*p)).collect(),
            },
            Self::Cubic { cubic_segments } => Self::Cubic {
                cubic_segments: cubic_segments.iter().map(|s| s.map_points(&mut f)).collect(),
            },
        }
    }
}

/// Latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Bounds of a point set, `None` when empty.
    pub fn from_points(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_lat: first.lat(),
            max_lat: first.lat(),
            min_lon: first.lon(),
            max_lon: first.lon(),
        };
        Some(points.iter().skip(1).fold(init, |b, p| Self {
            min_lat: b.min_lat.min(p.lat()),
            max_lat: b.max_lat.max(p.lat()),
            min_lon: b.min_lon.min(p.lon()),
            max_lon: b.max_lon.max(p.lon()),
        }))
    }

    /// Center as raw `(lat, lon)`.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::midpoint(self.min_lat, self.max_lat),
            f64::midpoint(self.min_lon, self.max_lon),
        )
    }
}

/// A vector path on the sphere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VectorPath {
    pub id: PathId,
    #[serde(flatten)]
    pub geometry: PathGeometry,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub style: PathStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<TerrainType>,
}

impl VectorPath {
    /// Creates an open polyline path with a fresh id.
    pub fn linear(points: Vec<Coordinate>, style: PathStyle) -> Self {
        Self::with_geometry(PathGeometry::Linear { linear_points: points }, style)
    }

    /// Creates an open cubic path with a fresh id.
    pub fn cubic(segments: Vec<CubicSegment>, style: PathStyle) -> Self {
        Self::with_geometry(PathGeometry::Cubic { cubic_segments: segments }, style)
    }

    fn with_geometry(geometry: PathGeometry, style: PathStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            is_closed: false,
            style,
            terrain: None,
        }
    }

    #[must_use]
    pub fn closed(mut self, is_closed: bool) -> Self {
        self.is_closed = is_closed;
        self
    }

    #[must_use]
    pub fn with_terrain(mut self, terrain: Option<TerrainType>) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn path_type(&self) -> PathType {
        match self.geometry {
            PathGeometry::Linear { .. } => PathType::Linear,
            PathGeometry::Cubic { .. } => PathType::Cubic,
        }
    }

    /// Number of drawable segments: cubic pieces, or polyline edges.
    pub fn segment_count(&self) -> usize {
        match &self.geometry {
            PathGeometry::Linear { linear_points } => linear_points.len().saturating_sub(1),
            PathGeometry::Cubic { cubic_segments } => cubic_segments.len(),
        }
    }

    /// Number of stored points, control points included.
    pub fn point_count(&self) -> usize {
        match &self.geometry {
            PathGeometry::Linear { linear_points } => linear_points.len(),
            PathGeometry::Cubic { cubic_segments } => cubic_segments.len() * 4,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Polyline approximation. Linear paths return their points verbatim.
    pub fn tessellate(&self, per_curve: usize) -> Vec<Coordinate> {
        match &self.geometry {
            PathGeometry::Linear { linear_points } => linear_points.clone(),
            PathGeometry::Cubic { cubic_segments } => tessellate_segments(cubic_segments, per_curve),
        }
    }

    /// Bounds of the tessellated path, `None` when the path is empty.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(&self.tessellate(DEFAULT_SEGMENTS_PER_CURVE))
    }

    /// Returns a copy translated by `(delta_lat, delta_lon)`. Same id.
    #[must_use]
    pub fn offset(&self, delta_lat: f64, delta_lon: f64) -> Self {
        Self {
            geometry: self.geometry.map_points(|p| p.offset(delta_lat, delta_lon)),
            ..self.clone()
        }
    }

    /// Returns a copy scaled about its bounding-box center. Same id.
    ///
    /// Latitude and longitude distances are scaled independently; this is
    /// not a geodesic scale and distorts near the poles.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let Some(bounds) = self.bounds() else {
            return self.clone();
        };
        let (center_lat, center_lon) = bounds.center();
        Self {
            geometry: self.geometry.map_points(|p| {
                Coordinate::new(
                    center_lat + (p.lat() - center_lat) * factor,
                    center_lon + (p.lon() - center_lon) * factor,
                )
            }),
            ..self.clone()
        }
    }

    /// Creates an open linear path carrying this path's style and terrain.
    pub fn derive_linear(&self, points: Vec<Coordinate>) -> Self {
        Self::linear(points, self.style).with_terrain(self.terrain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> VectorPath {
        VectorPath::linear(
            vec![
                Coordinate::new(0.0, 0.0),
                Coordinate::new(0.0, 10.0),
                Coordinate::new(10.0, 10.0),
                Coordinate::new(10.0, 0.0),
            ],
            PathStyle::default(),
        )
        .closed(true)
    }

    #[test]
    fn test_segment_count() {
        assert_eq!(square().segment_count(), 3);
        assert_eq!(VectorPath::linear(vec![], PathStyle::default()).segment_count(), 0);
        let cubic = VectorPath::cubic(
            vec![
                CubicSegment::line(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)),
                CubicSegment::line(Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 0.0)),
            ],
            PathStyle::default(),
        );
        assert_eq!(cubic.segment_count(), 2);
        assert_eq!(cubic.path_type(), PathType::Cubic);
    }

    #[test]
    fn test_tessellate_linear_is_identity() {
        let path = square();
        let PathGeometry::Linear { linear_points } = &path.geometry else {
            panic!("expected linear geometry");
        };
        assert_eq!(&path.tessellate(16), linear_points);
    }

    #[test]
    fn test_empty_cubic_tessellates_to_nothing() {
        let path = VectorPath::cubic(vec![], PathStyle::default());
        assert!(path.tessellate(16).is_empty());
        assert!(path.bounds().is_none());
    }

    #[test]
    fn test_bounds() {
        let b = square().bounds().unwrap();
        assert_eq!(b.min_lat, 0.0);
        assert_eq!(b.max_lat, 10.0);
        assert_eq!(b.min_lon, 0.0);
        assert_eq!(b.max_lon, 10.0);
        assert_eq!(b.center(), (5.0, 5.0));
    }

    #[test]
    fn test_offset_keeps_identity_and_normalizes() {
        let path = square();
        let moved = path.offset(85.0, 175.0);
        assert_eq!(moved.id, path.id);
        assert!(moved.is_closed);
        let b = moved.bounds().unwrap();
        // 10 + 85 clamps to the pole
        assert_eq!(b.max_lat, 90.0);
        // 10 + 175 wraps past the antimeridian
        assert!(b.min_lon < 0.0);
    }

    #[test]
    fn test_scaled_about_center() {
        let scaled = square().scaled(2.0);
        let b = scaled.bounds().unwrap();
        assert_eq!((b.min_lat, b.max_lat), (-5.0, 15.0));
        assert_eq!((b.min_lon, b.max_lon), (-5.0, 15.0));

        let empty = VectorPath::linear(vec![], PathStyle::default());
        assert_eq!(empty.scaled(3.0), empty);
    }

    #[test]
    fn test_json_shape() {
        let path = square().with_terrain(Some(TerrainType::Land));
        let value = serde_json::to_value(&path).unwrap();
        assert_eq!(value["pathType"], "linear");
        assert_eq!(value["isClosed"], true);
        assert_eq!(value["terrain"], "land");
        assert_eq!(value["linearPoints"][1], serde_json::json!([0.0, 10.0]));
        assert!(value.get("cubicSegments").is_none());
        assert_eq!(value["style"]["strokeWidth"], 1.5);

        let back: VectorPath = serde_json::from_value(value).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_parse_cubic_path() {
        let json = r#"{
            "id": "5b0e8f6e-2f0c-4f7a-9a57-5d2f1f7c9a10",
            "pathType": "cubic",
            "cubicSegments": [[[0, 0], [1, 1], [2, 2], [3, 3]]],
            "isClosed": false,
            "style": { "strokeColor": { "r": 0.9, "g": 0.9, "b": 0.9, "a": 1.0 }, "strokeWidth": 1.5 }
        }"#;
        let path: VectorPath = serde_json::from_str(json).unwrap();
        assert_eq!(path.path_type(), PathType::Cubic);
        assert_eq!(path.segment_count(), 1);
        assert!(path.terrain.is_none());
    }
}
