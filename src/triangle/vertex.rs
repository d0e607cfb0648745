use crate::math::{Vec2, Vec3};

/// A single vertex of a triangle mesh: position plus shading attributes.
/// `normal` and `tangent` are unit length by contract.
#[derive(Copy, Clone, Debug)]
pub struct Vertex {
  pub position : Vec3,
  pub normal   : Vec3,
  pub tangent  : Vec3,
  pub uv       : Vec2
}

impl Vertex {
  pub fn new( position : Vec3, normal : Vec3, tangent : Vec3, uv : Vec2 ) -> Vertex {
    Vertex { position, normal, tangent, uv }
  }
}
