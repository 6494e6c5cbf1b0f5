//! Core value types

mod bounds;
mod vector;

pub use bounds::BoundingBox2D;
pub use vector::Vector2;
