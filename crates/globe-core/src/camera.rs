//! Orbiting globe camera and screen-to-sphere hit testing.
//!
//! The camera looks at the origin of a unit sphere from a point that orbits
//! 30° above the look-at latitude, producing a tilted downward view. Every
//! parameter is clamped or wrapped on assignment, so the camera can never
//! reach an invalid orientation.

use glam::{DMat4, DVec2, DVec3};

use crate::coord::{Coordinate, wrap_longitude};

/// Latitude limit for the look-at point.
pub const MAX_LATITUDE: f64 = 89.5;
/// Closest orbit distance from the sphere center.
pub const MIN_DISTANCE: f64 = 1.5;
/// Farthest orbit distance from the sphere center.
pub const MAX_DISTANCE: f64 = 10.0;
/// Highest zoom level, reached at [`MIN_DISTANCE`].
pub const MAX_ZOOM_LEVEL: f64 = 10.0;
/// Vertical field of view in degrees.
pub const FOV_Y_DEGREES: f64 = 45.0;
pub const Z_NEAR: f64 = 0.1;
pub const Z_FAR: f64 = 100.0;
/// Elevation of the eye above the look-at latitude.
pub const TILT_DEGREES: f64 = 30.0;
/// Beyond this latitude the up vector is rotated to avoid gimbal lock.
pub const POLE_THRESHOLD: f64 = 85.0;

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit-length direction.
    pub direction: DVec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Intersects a ray with the unit sphere at the origin.
///
/// Returns the nearest root, or `None` when the ray misses or the nearest
/// intersection is not in front of the ray origin.
pub fn intersect_unit_sphere(ray: &Ray) -> Option<f64> {
    let a = ray.direction.length_squared();
    if a < f64::EPSILON {
        return None;
    }
    let b = 2.0 * ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - 1.0;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (t > 0.0).then_some(t)
}

/// Camera orbiting a unit sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeCamera {
    latitude: f64,
    longitude: f64,
    distance: f64,
    aspect_ratio: f64,
}

impl Default for GlobeCamera {
    fn default() -> Self {
        Self::new(0.0, 0.0, 3.0, 1.0)
    }
}

impl GlobeCamera {
    /// Creates a camera; every argument is normalized like the setters do.
    pub fn new(latitude: f64, longitude: f64, distance: f64, aspect_ratio: f64) -> Self {
        let mut camera = Self {
            latitude: 0.0,
            longitude: 0.0,
            distance: MAX_DISTANCE,
            aspect_ratio: 1.0,
        };
        camera.set_latitude(latitude);
        camera.set_longitude(longitude);
        camera.set_distance(distance);
        camera.set_aspect_ratio(aspect_ratio);
        camera
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        if latitude.is_finite() {
            self.latitude = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        }
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        if longitude.is_finite() {
            self.longitude = wrap_longitude(longitude);
        }
    }

    pub fn set_distance(&mut self, distance: f64) {
        if !distance.is_nan() {
            self.distance = distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    /// Sets width / height. Non-positive or non-finite ratios are ignored.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Centers the view on a coordinate.
    pub fn look_at(&mut self, target: Coordinate) {
        self.set_latitude(target.lat());
        self.set_longitude(target.lon());
    }

    /// The coordinate the camera is centered on.
    pub fn look_at_coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Eye position in world space.
    pub fn position(&self) -> DVec3 {
        // Not routed through Coordinate: the eye latitude may exceed 90°.
        let lat = (self.latitude + TILT_DEGREES).to_radians();
        let lon = self.longitude.to_radians();
        DVec3::new(
            self.distance * lat.cos() * lon.cos(),
            self.distance * lat.cos() * lon.sin(),
            self.distance * lat.sin(),
        )
    }

    /// Up vector, rotated near the poles to keep the look-at basis defined.
    pub fn up(&self) -> DVec3 {
        if self.latitude.abs() > POLE_THRESHOLD {
            let sign = if self.latitude > 0.0 { -1.0 } else { 1.0 };
            let lon = self.longitude.to_radians();
            DVec3::new(lon.cos() * sign, lon.sin() * sign, 0.0)
        } else {
            DVec3::Z
        }
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position(), DVec3::ZERO, self.up())
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect_ratio, Z_NEAR, Z_FAR)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Display zoom in `[0, 10]`: 0 is fully zoomed out, 10 is closest.
    pub fn zoom_level(&self) -> f64 {
        let normalized = (MAX_DISTANCE - self.distance) / (MAX_DISTANCE - MIN_DISTANCE);
        (normalized * MAX_ZOOM_LEVEL).clamp(0.0, MAX_ZOOM_LEVEL)
    }

    /// Sets the raw zoom value, which is the camera distance clamped to
    /// `[MIN_DISTANCE, MAX_DISTANCE]`. `set_zoom(10.0)` is fully zoomed out.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.set_distance(zoom);
    }

    /// Sets the distance that corresponds to a display zoom level.
    pub fn set_zoom_level(&mut self, level: f64) {
        if level.is_nan() {
            return;
        }
        let level = level.clamp(0.0, MAX_ZOOM_LEVEL);
        self.set_distance(MAX_DISTANCE - level / MAX_ZOOM_LEVEL * (MAX_DISTANCE - MIN_DISTANCE));
    }

    /// Pinch-style zoom: a scale above 1 moves closer.
    pub fn zoom_by(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.set_distance(self.distance / scale);
        }
    }

    /// Rotates the look-at point. Sensitivity drops as the camera zooms in.
    pub fn rotate(&mut self, delta_lon: f64, delta_lat: f64) {
        let sensitivity = 1.0 / (self.zoom_level() * 0.1 + 1.0);
        self.set_longitude(self.longitude + delta_lon * sensitivity);
        self.set_latitude(self.latitude + delta_lat * sensitivity);
    }

    /// Builds the world-space ray through a screen point.
    ///
    /// `screen` is in pixels with the origin at the top-left corner.
    pub fn screen_ray(&self, screen: DVec2, viewport: DVec2) -> Option<Ray> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let ndc_x = 2.0 * screen.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / viewport.y;

        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(DVec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(DVec3::new(ndc_x, ndc_y, 1.0));
        let direction = (far - near).try_normalize()?;
        Some(Ray {
            origin: near,
            direction,
        })
    }

    /// Resolves a screen point to the sphere-surface coordinate under it.
    pub fn hit_test(&self, screen: DVec2, viewport: DVec2) -> Option<Coordinate> {
        let ray = self.screen_ray(screen, viewport)?;
        let t = intersect_unit_sphere(&ray)?;
        Some(Coordinate::from_cartesian(ray.at(t)))
    }

    /// Projects a surface coordinate to screen pixels.
    ///
    /// Returns `None` for points on the hemisphere facing away from the
    /// camera or behind the eye.
    pub fn project_to_screen(&self, coordinate: Coordinate, viewport: DVec2) -> Option<DVec2> {
        let point = coordinate.to_cartesian(1.0);
        let eye = self.position();
        if point.dot(eye - point) <= 0.0 {
            return None;
        }
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(DVec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}
