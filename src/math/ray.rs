//! Ray type and intersection tests used for picking

use crate::core::types::{Mat4, Vec3};

const T_EPS: f32 = 1e-4;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform ray by matrix
    pub fn transform(&self, matrix: &Mat4) -> Ray {
        let new_origin = matrix.transform_point3(self.origin);
        let new_direction = matrix.transform_vector3(self.direction).normalize();
        Ray::new(new_origin, new_direction)
    }

    /// Intersect a closed finite cylinder centered at the origin with its axis
    /// along +Y, of the given radius and total length.
    ///
    /// Returns the nearest positive ray parameter, testing the lateral surface
    /// and both end caps.
    pub fn intersects_cylinder(&self, radius: f32, length: f32) -> Option<f32> {
        let half = length * 0.5;
        let mut nearest: Option<f32> = None;

        // Lateral surface: project onto the XZ plane and solve the quadratic
        let a = self.direction.x * self.direction.x + self.direction.z * self.direction.z;
        if a > 1e-12 {
            let b = 2.0 * (self.origin.x * self.direction.x + self.origin.z * self.direction.z);
            let c = self.origin.x * self.origin.x + self.origin.z * self.origin.z
                - radius * radius;
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sqrt_disc = disc.sqrt();
                for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
                    if t >= T_EPS && (self.origin.y + t * self.direction.y).abs() <= half {
                        nearest = Some(t);
                        break; // roots are ordered, first valid is nearest
                    }
                }
            }
        }

        // End caps at y = ±half
        if self.direction.y.abs() > 1e-12 {
            for cap_y in [half, -half] {
                let t = (cap_y - self.origin.y) / self.direction.y;
                if t >= T_EPS {
                    let x = self.origin.x + t * self.direction.x;
                    let z = self.origin.z + t * self.direction.z;
                    if x * x + z * z <= radius * radius {
                        nearest = Some(nearest.map_or(t, |n| n.min(t)));
                    }
                }
            }
        }

        nearest
    }

    /// Intersect an axis-aligned quad in the local XY plane, centered at the
    /// origin with the given half extent, facing ±Z.
    pub fn intersects_quad(&self, half_extent: f32) -> Option<f32> {
        if self.direction.z.abs() < 1e-12 {
            return None;
        }
        let t = -self.origin.z / self.direction.z;
        if t < T_EPS {
            return None;
        }
        let x = self.origin.x + t * self.direction.x;
        let y = self.origin.y + t * self.direction.y;
        if x.abs() <= half_extent && y.abs() <= half_extent {
            Some(t)
        } else {
            None
        }
    }
}
