use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D vector in world coordinates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along a rotation given in degrees.
    ///
    /// Rotation 0 points towards +y; positive rotations turn towards -x.
    #[must_use]
    pub fn heading(rotation_deg: f64) -> Self {
        let rad = rotation_deg.to_radians();
        Self::new(-rad.sin(), rad.cos())
    }

    /// Rotates the vector around the origin by `rotation_deg` degrees.
    #[must_use]
    pub fn rotated(self, rotation_deg: f64) -> Self {
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Wraps a position that left the `width × height` world back onto the opposite edge.
    #[must_use]
    pub fn wrapped(self, width: f64, height: f64) -> Self {
        let wrap = |v: f64, max: f64| {
            if v > max {
                0.0
            } else if v < 0.0 {
                max
            } else {
                v
            }
        };
        Self::new(wrap(self.x, width), wrap(self.y, height))
    }

    /// Shortest displacement from `self` to `to` on a toroidal `width × height` world.
    #[must_use]
    pub fn toroidal_delta(self, to: Self, width: f64, height: f64) -> Self {
        let shortest = |d: f64, max: f64| {
            if d > max / 2.0 {
                d - max
            } else if d < -max / 2.0 {
                d + max
            } else {
                d
            }
        };
        Self::new(shortest(to.x - self.x, width), shortest(to.y - self.y, height))
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A convex polygon in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    /// Places a mesh (vertices relative to its centre) at `origin`, rotated by `rotation_deg`.
    #[must_use]
    pub fn from_mesh(mesh: &[Vec2], origin: Vec2, rotation_deg: f64) -> Self {
        let points = mesh
            .iter()
            .map(|v| v.rotated(rotation_deg) + origin)
            .collect();
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Returns whether `point` lies inside the polygon (even-odd rule).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let mut inside = false;
        let n = self.points.len();
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + n - 1) % n];
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
        }
        inside
    }

    /// Returns whether two convex polygons overlap (separating axis test).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self
            .edge_normals()
            .chain(other.edge_normals())
            .any(|axis| {
                let (min_a, max_a) = self.project(axis);
                let (min_b, max_b) = other.project(axis);
                max_a < min_b || max_b < min_a
            })
    }

    fn edge_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| {
            let edge = self.points[(i + 1) % n] - self.points[i];
            Vec2::new(-edge.y, edge.x)
        })
    }

    fn project(&self, axis: Vec2) -> (f64, f64) {
        self.points
            .iter()
            .map(|p| p.dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(origin: Vec2, half: f64) -> Polygon {
        let mesh = [
            Vec2::new(-half, -half),
            Vec2::new(-half, half),
            Vec2::new(half, half),
            Vec2::new(half, -half),
        ];
        Polygon::from_mesh(&mesh, origin, 0.0)
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_heading() {
        assert_close(Vec2::heading(0.0), Vec2::new(0.0, 1.0));
        assert_close(Vec2::heading(90.0), Vec2::new(-1.0, 0.0));
        assert_close(Vec2::heading(180.0), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_rotated() {
        assert_close(Vec2::new(1.0, 0.0).rotated(90.0), Vec2::new(0.0, 1.0));
        assert_close(Vec2::new(0.0, 20.0).rotated(90.0), Vec2::heading(90.0) * 20.0);
    }

    #[test]
    fn test_wrapped() {
        assert_eq!(
            Vec2::new(1001.0, -1.0).wrapped(1000.0, 600.0),
            Vec2::new(0.0, 600.0)
        );
        assert_eq!(
            Vec2::new(-0.5, 601.0).wrapped(1000.0, 600.0),
            Vec2::new(1000.0, 0.0)
        );
        assert_eq!(
            Vec2::new(10.0, 20.0).wrapped(1000.0, 600.0),
            Vec2::new(10.0, 20.0)
        );
    }

    #[test]
    fn test_toroidal_delta_takes_shortest_path() {
        let from = Vec2::new(10.0, 10.0);
        assert_eq!(
            from.toroidal_delta(Vec2::new(990.0, 590.0), 1000.0, 600.0),
            Vec2::new(-20.0, -20.0)
        );
        assert_eq!(
            from.toroidal_delta(Vec2::new(110.0, 60.0), 1000.0, 600.0),
            Vec2::new(100.0, 50.0)
        );
    }

    #[test]
    fn test_contains() {
        let poly = square(Vec2::new(100.0, 100.0), 30.0);
        assert!(poly.contains(Vec2::new(100.0, 100.0)));
        assert!(poly.contains(Vec2::new(125.0, 80.0)));
        assert!(!poly.contains(Vec2::new(131.0, 100.0)));
        assert!(!poly.contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_intersects() {
        let a = square(Vec2::new(0.0, 0.0), 10.0);
        let b = square(Vec2::new(15.0, 0.0), 10.0);
        let c = square(Vec2::new(25.0, 0.0), 4.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));

        let ship = Polygon::from_mesh(
            &[
                Vec2::new(-10.0, -10.0),
                Vec2::new(0.0, 20.0),
                Vec2::new(10.0, -10.0),
            ],
            Vec2::new(0.0, 35.0),
            0.0,
        );
        assert!(!ship.intersects(&a));
        assert!(ship.intersects(&square(Vec2::new(0.0, 50.0), 5.0)));
    }
}
