pub mod line_segment;
pub mod polygon;

pub use line_segment::Segment;

use crate::common::error::{check_dimension, Result};
use crate::math::vec2::Vec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Shape-type tag of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Box,
    Polygon,
    Line,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Box => "Box",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Line => "Line",
        };
        f.write_str(name)
    }
}

/// Geometric shape of a rigid body together with its sizing.
///
/// `Polygon` shares the `Box` vertex layout (four corners); only the tag
/// differs. A `Line` is a segment of length `width` with thickness
/// `height`, so its half-thickness acts as the line radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f64 },
    Box { width: f64, height: f64 },
    Polygon { width: f64, height: f64 },
    Line { width: f64, height: f64 },
}

impl Shape {
    pub fn circle(radius: f64) -> Result<Self> {
        Ok(Shape::Circle {
            radius: check_dimension("radius", radius)?,
        })
    }

    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        Ok(Shape::Box {
            width: check_dimension("width", width)?,
            height: check_dimension("height", height)?,
        })
    }

    pub fn polygon(width: f64, height: f64) -> Result<Self> {
        Ok(Shape::Polygon {
            width: check_dimension("width", width)?,
            height: check_dimension("height", height)?,
        })
    }

    pub fn line(width: f64, height: f64) -> Result<Self> {
        Ok(Shape::Line {
            width: check_dimension("width", width)?,
            height: check_dimension("height", height)?,
        })
    }

    /// Re-checks the dimensions of an already-built shape (e.g. one
    /// that came out of deserialization).
    pub fn validated(self) -> Result<Self> {
        match self {
            Shape::Circle { radius } => Shape::circle(radius),
            Shape::Box { width, height } => Shape::rectangle(width, height),
            Shape::Polygon { width, height } => Shape::polygon(width, height),
            Shape::Line { width, height } => Shape::line(width, height),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Polygon { .. } => ShapeKind::Polygon,
            Shape::Line { .. } => ShapeKind::Line,
        }
    }

    /// Number of local vertices this shape carries.
    pub fn arity(&self) -> usize {
        match self {
            Shape::Circle { .. } => 1,
            Shape::Line { .. } => 2,
            Shape::Box { .. } | Shape::Polygon { .. } => 4,
        }
    }

    /// Area used for mass: pi r^2 for circles, width x height otherwise.
    pub fn area(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => PI * radius * radius,
            Shape::Box { width, height }
            | Shape::Polygon { width, height }
            | Shape::Line { width, height } => width * height,
        }
    }

    /// Half the longest dimension. For a circle this is the radius.
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Box { width, height }
            | Shape::Polygon { width, height }
            | Shape::Line { width, height } => width.max(height) / 2.0,
        }
    }

    /// `(width, height)`; a circle reports its diameter for both.
    pub fn size(&self) -> (f64, f64) {
        match *self {
            Shape::Circle { radius } => (radius * 2.0, radius * 2.0),
            Shape::Box { width, height }
            | Shape::Polygon { width, height }
            | Shape::Line { width, height } => (width, height),
        }
    }

    /// Canonical local vertex set, centered on the body origin.
    ///
    /// Box/Polygon corners are counter-clockwise starting bottom-left.
    pub fn local_vertices(&self) -> Vec<Vec2> {
        match *self {
            Shape::Circle { .. } => vec![Vec2::ZERO],
            Shape::Line { width, .. } => {
                let hw = width / 2.0;
                vec![Vec2::new(-hw, 0.0), Vec2::new(hw, 0.0)]
            }
            Shape::Box { width, height } | Shape::Polygon { width, height } => {
                let hw = width / 2.0;
                let hh = height / 2.0;
                vec![
                    Vec2::new(-hw, -hh),
                    Vec2::new(hw, -hh),
                    Vec2::new(hw, hh),
                    Vec2::new(-hw, hh),
                ]
            }
        }
    }

    /// Same kind, new dimensions. Circles take `width` as the diameter.
    pub(crate) fn resized(&self, width: f64, height: f64) -> Result<Shape> {
        match self {
            Shape::Circle { .. } => {
                check_dimension("height", height)?;
                Shape::circle(check_dimension("width", width)? / 2.0)
            }
            Shape::Box { .. } => Shape::rectangle(width, height),
            Shape::Polygon { .. } => Shape::polygon(width, height),
            Shape::Line { .. } => Shape::line(width, height),
        }
    }
}
