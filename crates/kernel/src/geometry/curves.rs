use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::point::{Point2d, Point3d};
use super::transform::Transform;
use super::vector::Vec3;

/// Unbounded analytic curves. Bounds live on [`TrimmedCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Curve {
    Line(Line3d),
    Circle(Circle3d),
}

/// An infinite line parameterized by arc length from `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line3d {
    pub origin: Point3d,
    pub direction: Vec3,
}

impl Line3d {
    /// Returns `None` when `direction` has no length.
    pub fn new(origin: Point3d, direction: Vec3) -> Option<Self> {
        Some(Self {
            origin,
            direction: direction.normalized()?,
        })
    }

    pub fn evaluate(&self, t: f64) -> Point3d {
        self.origin + self.direction * t
    }

    pub fn closest_param(&self, p: &Point3d) -> f64 {
        (*p - self.origin).dot(&self.direction)
    }
}

/// A circle parameterized by angle from `x_axis`, counter-clockwise about `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle3d {
    pub center: Point3d,
    pub normal: Vec3,
    pub x_axis: Vec3,
    pub radius: f64,
}

impl Circle3d {
    fn y_axis(&self) -> Vec3 {
        self.normal.cross(&self.x_axis)
    }

    pub fn evaluate(&self, t: f64) -> Point3d {
        self.center + self.x_axis * (self.radius * t.cos()) + self.y_axis() * (self.radius * t.sin())
    }

    /// Angle of the projection of `p`, unwrapped into `[reference - PI, reference + PI)`.
    pub fn closest_param(&self, p: &Point3d, reference: f64) -> f64 {
        let v = *p - self.center;
        let angle = v.dot(&self.y_axis()).atan2(v.dot(&self.x_axis));
        let k = ((reference - angle + PI) / (2.0 * PI)).floor();
        angle + k * 2.0 * PI
    }
}

impl Curve {
    pub fn evaluate(&self, t: f64) -> Point3d {
        match self {
            Curve::Line(l) => l.evaluate(t),
            Curve::Circle(c) => c.evaluate(t),
        }
    }
}

/// A curve bounded to the parameter domain `[t_start, t_end]`.
///
/// All geometric edits return a new value; a trimmed curve handed out by an
/// owner can be moved into another frame for comparison without touching
/// the owner's copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimmedCurve {
    pub curve: Curve,
    pub t_start: f64,
    pub t_end: f64,
}

impl TrimmedCurve {
    /// Straight segment from `a` to `b`; `None` for coincident points.
    pub fn line(a: Point3d, b: Point3d) -> Option<Self> {
        let line = Line3d::new(a, b - a)?;
        Some(Self {
            curve: Curve::Line(line),
            t_start: 0.0,
            t_end: a.distance_to(&b),
        })
    }

    /// Arc of `circle` between two angles.
    pub fn arc(circle: Circle3d, start_angle: f64, end_angle: f64) -> Self {
        Self {
            curve: Curve::Circle(circle),
            t_start: start_angle,
            t_end: end_angle,
        }
    }

    pub fn start_param(&self) -> f64 {
        self.t_start
    }

    pub fn end_param(&self) -> f64 {
        self.t_end
    }

    pub fn start_point(&self) -> Point3d {
        self.curve.evaluate(self.t_start)
    }

    pub fn end_point(&self) -> Point3d {
        self.curve.evaluate(self.t_end)
    }

    pub fn point_at(&self, t: f64) -> Point3d {
        self.curve.evaluate(t)
    }

    pub fn midpoint(&self) -> Point3d {
        self.point_at(0.5 * (self.t_start + self.t_end))
    }

    /// Parameter of the closest point on the underlying curve. The result is
    /// not clamped to the trimmed domain.
    pub fn param_at(&self, p: &Point3d) -> f64 {
        match &self.curve {
            Curve::Line(l) => l.closest_param(p),
            Curve::Circle(c) => c.closest_param(p, 0.5 * (self.t_start + self.t_end)),
        }
    }

    /// Distance from `p` to the underlying curve at its closest parameter.
    pub fn distance_to_point(&self, p: &Point3d) -> f64 {
        self.point_at(self.param_at(p)).distance_to(p)
    }

    pub fn length(&self) -> f64 {
        let span = (self.t_end - self.t_start).abs();
        match &self.curve {
            Curve::Line(_) => span,
            Curve::Circle(c) => c.radius * span,
        }
    }

    pub fn with_range(&self, t_start: f64, t_end: f64) -> Self {
        Self {
            curve: self.curve,
            t_start,
            t_end,
        }
    }

    /// Same point set traversed end to start.
    pub fn reversed(&self) -> Self {
        let curve = match self.curve {
            Curve::Line(l) => Curve::Line(Line3d {
                origin: l.origin,
                direction: -l.direction,
            }),
            Curve::Circle(c) => Curve::Circle(Circle3d {
                normal: -c.normal,
                ..c
            }),
        };
        Self {
            curve,
            t_start: -self.t_end,
            t_end: -self.t_start,
        }
    }

    /// Image of this curve under an affine transform. Lines keep arc-length
    /// parameterization, so their domain is rescaled with the direction.
    pub fn transformed(&self, t: &Transform) -> Self {
        match self.curve {
            Curve::Line(l) => {
                let dir = t.transform_vector(&l.direction);
                let scale = dir.length();
                let direction = dir.normalized().unwrap_or(l.direction);
                Self {
                    curve: Curve::Line(Line3d {
                        origin: t.transform_point(&l.origin),
                        direction,
                    }),
                    t_start: self.t_start * scale,
                    t_end: self.t_end * scale,
                }
            }
            Curve::Circle(c) => {
                let x = t.transform_vector(&c.x_axis);
                let y = t.transform_vector(&c.normal.cross(&c.x_axis));
                let scale = x.length();
                let x_axis = x.normalized().unwrap_or(c.x_axis);
                let normal = x.cross(&y).normalized().unwrap_or(c.normal);
                Self {
                    curve: Curve::Circle(Circle3d {
                        center: t.transform_point(&c.center),
                        normal,
                        x_axis,
                        radius: c.radius * scale,
                    }),
                    t_start: self.t_start,
                    t_end: self.t_end,
                }
            }
        }
    }

    pub fn translated(&self, v: Vec3) -> Self {
        self.transformed(&Transform::from_translation_vec(v))
    }

    /// Both endpoints coincide within `tol`, in the same orientation.
    pub fn endpoints_match(&self, other: &TrimmedCurve, tol: f64) -> bool {
        self.start_point().distance_to(&other.start_point()) < tol
            && self.end_point().distance_to(&other.end_point()) < tol
    }
}

/// A bounded curve in a profile plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Curve2d {
    Line2d {
        start: Point2d,
        end: Point2d,
    },
    /// Counter-clockwise arc from `start_angle` to `end_angle`.
    Arc2d {
        center: Point2d,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl Curve2d {
    pub fn start_point(&self) -> Point2d {
        match *self {
            Curve2d::Line2d { start, .. } => start,
            Curve2d::Arc2d {
                center,
                radius,
                start_angle,
                ..
            } => Point2d::new(
                center.x + radius * start_angle.cos(),
                center.y + radius * start_angle.sin(),
            ),
        }
    }

    pub fn end_point(&self) -> Point2d {
        match *self {
            Curve2d::Line2d { end, .. } => end,
            Curve2d::Arc2d {
                center,
                radius,
                end_angle,
                ..
            } => Point2d::new(
                center.x + radius * end_angle.cos(),
                center.y + radius * end_angle.sin(),
            ),
        }
    }
}
