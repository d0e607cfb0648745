mod vec2;
mod vec3;
mod vec4;
mod mat3;
mod mat4;
mod ray;
mod aabb;
mod rng;
pub mod primitives;
pub mod sampling;

pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat3::Mat3;
pub use mat4::Mat4;
pub use ray::Ray;
pub use aabb::Aabb;
pub use rng::Rng;
pub use primitives::{intersect_plane, intersect_sphere};

/// Numerical slack used for grazing-angle and coplanarity comparisons.
pub static EPSILON : f32 = 0.0002;

pub fn clamp( x : f32, min_val : f32, max_val : f32 ) -> f32 {
  max_val.min( min_val.max( x ) )
}

pub fn lerp( a : f32, b : f32, t : f32 ) -> f32 {
  a + ( b - a ) * t
}
