//! CPU-side geometry handed to the renderer.
//!
//! Paths become one flat line-strip vertex stream. A vertex with zero alpha
//! marks a strip break, so many disjoint polylines fit in a single draw call.

use bytemuck::{Pod, Zeroable};

use crate::coord::Coordinate;
use crate::path::Rgba;

/// One line-strip vertex on the unit sphere.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    /// Strip-break sentinel.
    pub const BREAK: LineVertex = LineVertex {
        position: [0.0; 3],
        color: [0.0; 4],
    };

    #[allow(clippy::cast_possible_truncation)]
    pub fn new(coordinate: &Coordinate, color: Rgba) -> Self {
        let p = coordinate.to_cartesian(1.0);
        Self {
            position: [p.x as f32, p.y as f32, p.z as f32],
            color: color.to_array(),
        }
    }

    pub fn is_break(&self) -> bool {
        self.color[3] == 0.0
    }
}

/// Appends one polyline followed by a break sentinel.
///
/// Polylines with fewer than two points are skipped. Closed polylines repeat
/// their first point. Fully transparent colors are bumped to a tiny alpha so
/// they never read as a break.
pub fn push_polyline(out: &mut Vec<LineVertex>, points: &[Coordinate], color: Rgba, closed: bool) {
    if points.len() < 2 {
        return;
    }
    let color = if color.a > 0.0 {
        color
    } else {
        Rgba { a: f32::EPSILON, ..color }
    };
    out.extend(points.iter().map(|p| LineVertex::new(p, color)));
    if closed {
        out.push(LineVertex::new(&points[0], color));
    }
    out.push(LineVertex::BREAK);
}

/// Splits a vertex stream back into its strips.
pub fn strips(vertices: &[LineVertex]) -> impl Iterator<Item = &[LineVertex]> {
    vertices.split(LineVertex::is_break).filter(|s| !s.is_empty())
}

/// Vertex of the static globe mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// UV-sphere triangle mesh for the globe itself.
#[derive(Debug, Clone, Default)]
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Generates a unit UV sphere with z-up poles.
    ///
    /// Segment counts are raised to at least 2 rings and 3 slices.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn uv_sphere(lat_segments: u32, lon_segments: u32) -> Self {
        let rings = lat_segments.max(2);
        let slices = lon_segments.max(3);
        let mut vertices = Vec::with_capacity(((rings + 1) * (slices + 1)) as usize);
        let mut indices = Vec::with_capacity((rings * slices * 6) as usize);

        for ring in 0..=rings {
            let v = ring as f32 / rings as f32;
            let lat = 90.0 - 180.0 * f64::from(v);
            for slice in 0..=slices {
                let u = slice as f32 / slices as f32;
                let lon = -180.0 + 360.0 * f64::from(u);
                let p = Coordinate::new(lat, lon).to_cartesian(1.0);
                let position = [p.x as f32, p.y as f32, p.z as f32];
                vertices.push(SphereVertex {
                    position,
                    normal: position,
                    uv: [u, v],
                });
            }
        }

        let stride = slices + 1;
        for ring in 0..rings {
            for slice in 0..slices {
                let a = ring * stride + slice;
                let b = a + stride;
                if ring != 0 {
                    indices.extend_from_slice(&[a, b, a + 1]);
                }
                if ring != rings - 1 {
                    indices.extend_from_slice(&[a + 1, b, b + 1]);
                }
            }
        }

        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
