use serde::{Deserialize, Serialize};

use super::curves::{Circle3d, Curve2d, TrimmedCurve};
use super::point::{Point2d, Point3d};
use super::vector::Vec3;

/// A local coordinate frame used to lift profile geometry into model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3d,
    pub x_axis: Vec3,
    pub y_axis: Vec3,
}

impl Plane {
    /// Build an orthonormal frame from a (not necessarily perpendicular)
    /// pair of in-plane directions. `None` if they are parallel or zero.
    pub fn new(origin: Point3d, x_dir: Vec3, y_hint: Vec3) -> Option<Self> {
        let x_axis = x_dir.normalized()?;
        let normal = x_axis.cross(&y_hint).normalized()?;
        Some(Self {
            origin,
            x_axis,
            y_axis: normal.cross(&x_axis),
        })
    }

    pub fn normal(&self) -> Vec3 {
        self.x_axis.cross(&self.y_axis)
    }

    pub fn to_3d(&self, p: &Point2d) -> Point3d {
        self.origin + self.x_axis * p.x + self.y_axis * p.y
    }

    pub fn to_2d(&self, p: &Point3d) -> Point2d {
        let v = *p - self.origin;
        Point2d::new(v.dot(&self.x_axis), v.dot(&self.y_axis))
    }

    /// Lift a profile curve into model space. Degenerate lines yield `None`.
    pub fn curve_3d(&self, curve: &Curve2d) -> Option<TrimmedCurve> {
        match *curve {
            Curve2d::Line2d { start, end } => TrimmedCurve::line(self.to_3d(&start), self.to_3d(&end)),
            Curve2d::Arc2d {
                center,
                radius,
                start_angle,
                end_angle,
            } => Some(TrimmedCurve::arc(
                Circle3d {
                    center: self.to_3d(&center),
                    normal: self.normal(),
                    x_axis: self.x_axis,
                    radius,
                },
                start_angle,
                end_angle,
            )),
        }
    }
}
