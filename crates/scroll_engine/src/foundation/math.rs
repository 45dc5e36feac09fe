//! Math utilities and types
//!
//! Provides the 2D math types used by the scene graph: vectors, homogeneous
//! 3x3 matrices, local transforms and axis-aligned rectangles.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 homogeneous matrix type for 2D transforms
pub type Mat3 = Matrix3<f32>;

type Point2 = nalgebra::Point2<f32>;

/// Local transform of a scene node: position, rotation, scale and origin
///
/// The origin is the point, in local coordinates, that position, rotation
/// and scale are applied around. Rotation is in degrees, clockwise on a
/// Y-down screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent node
    pub position: Vec2,

    /// Rotation in degrees
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,

    /// Local origin of all transformations
    pub origin: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            origin: Vec2::zeros(),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Move the position by an offset
    pub fn move_by(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Set the rotation, keeping it within [0, 360)
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees.rem_euclid(360.0);
    }

    /// Convert to a homogeneous transformation matrix
    ///
    /// Applies `-origin`, then scale, then rotation, then position.
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::new_translation(&self.position)
            * Mat3::new_rotation(utils::deg_to_rad(self.rotation))
            * Mat3::new_nonuniform_scaling(&self.scale)
            * Mat3::new_translation(&-self.origin)
    }
}

/// Apply a homogeneous transform to a point
pub fn transform_point(matrix: &Mat3, point: Vec2) -> Vec2 {
    matrix.transform_point(&Point2::from(point)).coords
}

/// Transform a rectangle and return the axis-aligned box enclosing the result
pub fn transform_rect(matrix: &Mat3, rect: &FloatRect) -> FloatRect {
    let corners = [
        transform_point(matrix, Vec2::new(rect.left, rect.top)),
        transform_point(matrix, Vec2::new(rect.left, rect.bottom())),
        transform_point(matrix, Vec2::new(rect.right(), rect.top)),
        transform_point(matrix, Vec2::new(rect.right(), rect.bottom())),
    ];

    let mut min = corners[0];
    let mut max = corners[0];
    for corner in &corners[1..] {
        min = min.inf(corner);
        max = max.sup(corner);
    }

    FloatRect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}

/// Axis-aligned rectangle in float coordinates (left, top, width, height)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatRect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl FloatRect {
    /// Create a new rectangle
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// True when the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside (left/top edges inclusive, right/bottom exclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right()
            && point.y >= self.top && point.y < self.bottom()
    }

    /// Check if this rectangle overlaps another
    ///
    /// Touching edges do not count, and empty rectangles never intersect.
    pub fn intersects(&self, other: &FloatRect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left < other.right() && other.left < self.right()
            && self.top < other.bottom() && other.top < self.bottom()
    }
}

/// Axis-aligned rectangle in integer texel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct IntRect {
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl IntRect {
    /// Create a new rectangle
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// Size as a float vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Check that the rectangle lies within a `width` x `height` image
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.width >= 0
            && self.height >= 0
            && i64::from(self.left) + i64::from(self.width) <= i64::from(width)
            && i64::from(self.top) + i64::from(self.height) <= i64::from(height)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Normalize a vector, leaving the zero vector untouched
    pub fn unit_vector(vector: Vec2) -> Vec2 {
        vector.try_normalize(f32::EPSILON).unwrap_or(vector)
    }

    /// Euclidean distance between two points
    pub fn distance(a: Vec2, b: Vec2) -> f32 {
        (a - b).magnitude()
    }
}
