//! Planar vector math and field geometry.
//!
//! All lengths are millimetres and all velocities metres per second, the
//! units vision and the referee use.  Our goal is always at negative `x`.

use std::ops::{Add, Mul, Neg, Sub};

/// A 2-D point or direction in field coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance_to(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len <= f64::EPSILON {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Angle of this vector in radians, measured from the positive x axis.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Point `dist` mm from `self` towards `target`.
    pub fn step_towards(self, target: Vec2, dist: f64) -> Vec2 {
        self + (target - self).normalized() * dist
    }

    /// Distance from `self` to the segment `a`–`b`.
    pub fn distance_to_segment(self, a: Vec2, b: Vec2) -> f64 {
        let ab = b - a;
        let len_sq = ab.dot(ab);
        if len_sq <= f64::EPSILON {
            return self.distance_to(a);
        }
        let t = ((self - a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.distance_to(a + ab * t)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Field dimensions for one match.
///
/// Defaults are the division-B field.  Pass a different value through
/// [`TeamConfig`][crate::TeamConfig] for other divisions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub field_length:       f64,
    pub field_width:        f64,
    pub goal_width:         f64,
    pub penalty_area_depth: f64,
    pub penalty_area_width: f64,
    pub bot_radius:         f64,
    pub ball_radius:        f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            field_length:       9_000.0,
            field_width:        6_000.0,
            goal_width:         1_000.0,
            penalty_area_depth: 1_000.0,
            penalty_area_width: 2_000.0,
            bot_radius:         90.0,
            ball_radius:        21.5,
        }
    }
}

impl Geometry {
    /// Centre of our goal line.
    #[inline]
    pub fn our_goal_center(&self) -> Vec2 {
        Vec2::new(-self.field_length / 2.0, 0.0)
    }

    /// Centre of the opponent goal line.
    #[inline]
    pub fn their_goal_center(&self) -> Vec2 {
        Vec2::new(self.field_length / 2.0, 0.0)
    }

    /// `true` if `p` lies inside our penalty area grown by `margin`.
    pub fn in_our_penalty_area(&self, p: Vec2, margin: f64) -> bool {
        let goal_x = -self.field_length / 2.0;
        p.x <= goal_x + self.penalty_area_depth + margin
            && p.x >= goal_x - margin
            && p.y.abs() <= self.penalty_area_width / 2.0 + margin
    }

    /// `true` if `p` lies inside the field boundary grown by `margin`.
    pub fn in_field(&self, p: Vec2, margin: f64) -> bool {
        p.x.abs() <= self.field_length / 2.0 + margin && p.y.abs() <= self.field_width / 2.0 + margin
    }

    /// Closest point to `p` inside our penalty area shrunk by `margin`.
    pub fn clamp_to_our_penalty_area(&self, p: Vec2, margin: f64) -> Vec2 {
        let goal_x = -self.field_length / 2.0;
        let half_w = self.penalty_area_width / 2.0 - margin;
        Vec2::new(
            p.x.clamp(goal_x + margin, goal_x + self.penalty_area_depth - margin),
            p.y.clamp(-half_w, half_w),
        )
    }
}
