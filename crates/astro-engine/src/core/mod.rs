//! World objects and the geometry they are built on.
//!
//! - [`geometry`] - Vectors, wrap-around arithmetic and convex polygon collision
//! - [`asteroid`] - Drifting rocks that split when shot
//! - [`bullet`] - Projectiles with a limited lifetime
//! - [`ship`] - The network-controlled ship: sensors, controls and physics

pub mod asteroid;
pub mod bullet;
pub mod geometry;
pub mod ship;
