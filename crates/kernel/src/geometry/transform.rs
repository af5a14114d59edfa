use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// A 4x4 affine matrix stored in column-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub m: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx,  dy,  dz,  1.0,
        ];
        Self { m }
    }

    pub fn from_translation_vec(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    /// Rotation around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let m = [
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    fn at(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        let v = self.transform_vector(&p.to_vec3());
        Point3d::new(v.x + self.at(0, 3), v.y + self.at(1, 3), v.z + self.at(2, 3))
    }

    /// Apply the linear part only.
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        Vec3::new(
            self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z,
            self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z,
            self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z,
        )
    }

    /// Compose: the result applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let mut m = [0.0f64; 16];
        for col in 0..4 {
            for row in 0..4 {
                m[col * 4 + row] = (0..4).map(|k| self.at(row, k) * other.at(k, col)).sum();
            }
        }
        Transform { m }
    }

    /// Uniform scale factor of the linear part, if it has one.
    pub fn uniform_scale(&self) -> Option<f64> {
        let sx = self.transform_vector(&Vec3::X).length();
        let sy = self.transform_vector(&Vec3::Y).length();
        let sz = self.transform_vector(&Vec3::Z).length();
        let tol = 1e-9 * sx.max(1.0);
        ((sx - sy).abs() < tol && (sx - sz).abs() < tol).then_some(sx)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Transform::translation(1.0, 2.0, -3.0);
        let p = t.transform_point(&Point3d::ORIGIN);
        assert!(p.equals(&Point3d::new(1.0, 2.0, -3.0)));
        let v = t.transform_vector(&Vec3::X);
        assert!((v - Vec3::X).length() < 1e-12);
    }

    #[test]
    fn test_rotation_then_translation() {
        let t = Transform::translation(0.0, 0.0, 5.0).then(&Transform::rotation_z(FRAC_PI_2));
        let p = t.transform_point(&Point3d::new(1.0, 0.0, 0.0));
        assert!(p.equals(&Point3d::new(0.0, 1.0, 5.0)));
        assert!((t.uniform_scale().unwrap() - 1.0).abs() < 1e-12);
    }
}
