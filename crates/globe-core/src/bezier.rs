//! Cubic Bézier segments in latitude/longitude space.
//!
//! Control points and the curve itself live in lat/lon space, not 3D space:
//! the Bernstein blend is applied independently to latitude and longitude.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coord::Coordinate;

/// Samples per curve used when no explicit tessellation density is given.
pub const DEFAULT_SEGMENTS_PER_CURVE: usize = 16;

/// One cubic Bézier piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: Coordinate,
    pub control1: Coordinate,
    pub control2: Coordinate,
    pub end: Coordinate,
}

impl CubicSegment {
    pub const fn new(
        start: Coordinate,
        control1: Coordinate,
        control2: Coordinate,
        end: Coordinate,
    ) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    /// A straight segment with control points at one and two thirds.
    pub fn line(start: Coordinate, end: Coordinate) -> Self {
        let dlat = end.lat() - start.lat();
        let dlon = end.lon() - start.lon();
        Self::new(
            start,
            Coordinate::new(start.lat() + dlat / 3.0, start.lon() + dlon / 3.0),
            Coordinate::new(start.lat() + dlat * 2.0 / 3.0, start.lon() + dlon * 2.0 / 3.0),
            end,
        )
    }

    /// Evaluates the curve at `t` in `[0, 1]`.
    pub fn point(&self, t: f64) -> Coordinate {
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * mt * mt * t;
        let b2 = 3.0 * mt * t * t;
        let b3 = t * t * t;

        let lat = b0 * self.start.lat()
            + b1 * self.control1.lat()
            + b2 * self.control2.lat()
            + b3 * self.end.lat();
        let lon = b0 * self.start.lon()
            + b1 * self.control1.lon()
            + b2 * self.control2.lon()
            + b3 * self.end.lon();
        Coordinate::new(lat, lon)
    }

    /// Samples the curve at `segments + 1` evenly spaced values of `t`,
    /// endpoints included. A density of zero is treated as one.
    #[allow(clippy::cast_precision_loss)]
    pub fn tessellate(&self, segments: usize) -> Vec<Coordinate> {
        let segments = segments.max(1);
        let step = 1.0 / segments as f64;
        (0..=segments)
            .map(|i| {
                if i == segments {
                    self.end
                } else {
                    self.point(i as f64 * step)
                }
            })
            .collect()
    }

    /// All four points in order.
    pub fn points(&self) -> [Coordinate; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    /// Applies `f` to every point.
    #[must_use]
    pub fn map_points(&self, mut f: impl FnMut(Coordinate) -> Coordinate) -> Self {
        Self::new(f(self.start), f(self.control1), f(self.control2), f(self.end))
    }
}

/// Tessellates a contiguous run of segments into one polyline.
///
/// The first sample of every segment after the first is dropped because it
/// repeats the previous segment's end, so `N` segments yield `N·S + 1` points.
pub fn tessellate_segments(segments: &[CubicSegment], per_curve: usize) -> Vec<Coordinate> {
    let per_curve = per_curve.max(1);
    let mut points = Vec::with_capacity(segments.len() * per_curve + 1);
    for (i, segment) in segments.iter().enumerate() {
        let samples = segment.tessellate(per_curve);
        let skip = usize::from(i > 0);
        points.extend(samples.into_iter().skip(skip));
    }
    points
}

impl Serialize for CubicSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.points().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CubicSegment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [start, control1, control2, end] = <[Coordinate; 4]>::deserialize(deserializer)?;
        Ok(Self::new(start, control1, control2, end))
    }
}
