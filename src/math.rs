//! Double-Precision Vector Mathematics
//!
//! Value types used throughout the engine: 3D vectors, unit quaternions,
//! and 3x3 matrices, all over `f64`.
//!
//! # Types
//!
//! - `Vec3`: 3D vector (positions, velocities, forces, normals)
//! - `Quat`: quaternion for orientations (kept unit length by the integrator)
//! - `Mat3`: 3x3 matrix for inertia tensors and rotation matrices
//!
//! # no_std
//!
//! Float intrinsics (`sqrt`, `sin`, `cos`, `abs`) route through `libm`
//! when the `std` feature is disabled.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Tolerance below which a squared length is treated as zero.
pub const EPSILON: f64 = 1.0e-12;

#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrt(x)
    }
}

#[inline]
pub(crate) fn abs(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.abs()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::fabs(x)
    }
}

#[inline]
pub(crate) fn sin(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.sin()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sin(x)
    }
}

#[inline]
pub(crate) fn cos(x: f64) -> f64 {
    #[cfg(feature = "std")]
    {
        x.cos()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::cos(x)
    }
}

// ============================================================================
// Vec3
// ============================================================================

/// 3D vector with `f64` components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// Zero vector
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit X axis
    pub const UNIT_X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit Y axis
    pub const UNIT_Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Unit Z axis
    pub const UNIT_Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Create a new vector
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product
    #[inline]
    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Squared length
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length
    #[inline]
    pub fn length(self) -> f64 {
        sqrt(self.length_squared())
    }

    /// Normalize to unit length. Returns the zero vector for inputs with
    /// near-zero length.
    #[inline]
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq < EPSILON {
            return Self::ZERO;
        }
        self / sqrt(len_sq)
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }

    /// Clamp each component into `[min, max]` component-wise
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self::new(
            self.x.clamp(min.x, max.x),
            self.y.clamp(min.y, max.y),
            self.z.clamp(min.z, max.z),
        )
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl core::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl core::ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// ============================================================================
// Quat
// ============================================================================

/// Quaternion for 3D orientations.
///
/// Stored as `(x, y, z, w)` with `w` the scalar part. Orientations are kept
/// unit length by renormalizing after every integration step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Quat {
    /// X component (vector part)
    pub x: f64,
    /// Y component (vector part)
    pub y: f64,
    /// Z component (vector part)
    pub z: f64,
    /// W component (scalar part)
    pub w: f64,
}

impl Quat {
    /// Identity rotation
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create from components
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Pure quaternion (zero scalar part) from a vector.
    ///
    /// Used by the integrator: `dq/dt = 0.5 * Quat(omega) * q`.
    #[inline]
    pub const fn from_vec(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w: 0.0,
        }
    }

    /// Rotation of `angle` radians about a unit `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let half = angle * 0.5;
        let s = sin(half);
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: cos(half),
        }
    }

    /// Hamilton product `self * rhs`
    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }

    /// Conjugate (inverse for unit quaternions)
    #[inline]
    pub fn conjugate(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Squared norm
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Norm
    #[inline]
    pub fn length(self) -> f64 {
        sqrt(self.length_squared())
    }

    /// Normalize to unit length. Falls back to identity for degenerate input.
    #[inline]
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq < EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / sqrt(len_sq);
        Self {
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv,
            w: self.w * inv,
        }
    }

    /// Rotate a vector by this quaternion (assumed unit length)
    #[inline]
    pub fn rotate_vec(self, v: Vec3) -> Vec3 {
        // v' = v + 2 * (u x (u x v + w * v)), with u the vector part
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Scale all components (used when forming the orientation derivative)
    #[inline]
    pub fn scale(self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }

    /// Component-wise sum (not a rotation composition)
    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

// ============================================================================
// Mat3
// ============================================================================

/// 3x3 matrix, column-major.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3 {
    /// Columns
    pub cols: [Vec3; 3],
}

impl Mat3 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        cols: [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z],
    };

    /// Zero matrix
    pub const ZERO: Self = Self {
        cols: [Vec3::ZERO; 3],
    };

    /// Build from columns
    #[inline]
    pub const fn from_cols(col0: Vec3, col1: Vec3, col2: Vec3) -> Self {
        Self {
            cols: [col0, col1, col2],
        }
    }

    /// Diagonal matrix
    #[inline]
    pub fn diagonal(x: f64, y: f64, z: f64) -> Self {
        Self::from_cols(
            Vec3::new(x, 0.0, 0.0),
            Vec3::new(0.0, y, 0.0),
            Vec3::new(0.0, 0.0, z),
        )
    }

    /// Rotation matrix from a unit quaternion
    pub fn from_quat(q: Quat) -> Self {
        Self::from_cols(
            q.rotate_vec(Vec3::UNIT_X),
            q.rotate_vec(Vec3::UNIT_Y),
            q.rotate_vec(Vec3::UNIT_Z),
        )
    }

    /// Matrix-vector product
    #[inline]
    pub fn mul_vec(self, v: Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }

    /// Matrix-matrix product
    pub fn mul_mat(self, rhs: Self) -> Self {
        Self::from_cols(
            self.mul_vec(rhs.cols[0]),
            self.mul_vec(rhs.cols[1]),
            self.mul_vec(rhs.cols[2]),
        )
    }

    /// Transpose
    pub fn transpose(self) -> Self {
        Self::from_cols(
            Vec3::new(self.cols[0].x, self.cols[1].x, self.cols[2].x),
            Vec3::new(self.cols[0].y, self.cols[1].y, self.cols[2].y),
            Vec3::new(self.cols[0].z, self.cols[1].z, self.cols[2].z),
        )
    }

    /// Scale every element
    pub fn scale(self, s: f64) -> Self {
        Self::from_cols(self.cols[0] * s, self.cols[1] * s, self.cols[2] * s)
    }
}
