mod vertex;
pub mod setup;

pub use vertex::Vertex;
pub use setup::SetupTriangle;

use crate::math::{Aabb, Vec3};

/// A logical triangle: three interleaved vertices plus bookkeeping shared
/// with its derived `SetupTriangle`. Grounded on the teacher's
/// `graphics/primitives/triangle.rs`, generalized from a bare-position
/// triangle to one carrying full per-vertex attributes (normal/tangent/uv)
/// as required by the interpolation contract.
#[derive(Clone, Debug)]
pub struct Triangle {
  pub v0 : Vertex,
  pub v1 : Vertex,
  pub v2 : Vertex,
  pub face_normal : Vec3,
  pub triangle_id : u32,
  pub material_id : u32
}

impl Triangle {
  pub fn new( v0 : Vertex, v1 : Vertex, v2 : Vertex, triangle_id : u32, material_id : u32 ) -> Triangle {
    let face_normal = ( v1.position - v0.position ).cross( v2.position - v0.position ).normalize( );
    Triangle { v0, v1, v2, face_normal, triangle_id, material_id }
  }

  pub fn aabb( &self ) -> Aabb {
    Aabb::EMPTY
      .join_point( self.v0.position )
      .join_point( self.v1.position )
      .join_point( self.v2.position )
  }

  /// Interpolates vertex attributes at barycentric coordinates `(beta,
  /// gamma)`, with `alpha = 1 - beta - gamma`.
  pub fn interpolate( &self, beta : f32, gamma : f32 ) -> Vertex {
    let alpha = 1.0 - beta - gamma;
    Vertex {
      position: alpha * self.v0.position + beta * self.v1.position + gamma * self.v2.position,
      normal:   ( alpha * self.v0.normal + beta * self.v1.normal + gamma * self.v2.normal ).normalize( ),
      tangent:  ( alpha * self.v0.tangent + beta * self.v1.tangent + gamma * self.v2.tangent ).normalize( ),
      uv:       alpha * self.v0.uv + beta * self.v1.uv + gamma * self.v2.uv
    }
  }

  pub fn to_setup( &self ) -> SetupTriangle {
    SetupTriangle::from_triangle( self )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::math::Vec2;

  fn unit_triangle( ) -> Triangle {
    Triangle::new(
      Vertex { position: Vec3::new( 0.0, 0.0, 0.0 ), normal: Vec3::new( 0.0, 0.0, 1.0 ), tangent: Vec3::new( 1.0, 0.0, 0.0 ), uv: Vec2::new( 0.0, 0.0 ) },
      Vertex { position: Vec3::new( 1.0, 0.0, 0.0 ), normal: Vec3::new( 0.0, 0.0, 1.0 ), tangent: Vec3::new( 1.0, 0.0, 0.0 ), uv: Vec2::new( 1.0, 0.0 ) },
      Vertex { position: Vec3::new( 0.0, 1.0, 0.0 ), normal: Vec3::new( 0.0, 0.0, 1.0 ), tangent: Vec3::new( 1.0, 0.0, 0.0 ), uv: Vec2::new( 0.0, 1.0 ) },
      0, 0
    )
  }

  #[test]
  fn face_normal_points_along_z( ) {
    let t = unit_triangle( );
    assert!( ( t.face_normal - Vec3::new( 0.0, 0.0, 1.0 ) ).len( ) < 1e-5 );
  }

  #[test]
  fn interpolate_at_vertex_returns_that_vertex( ) {
    let t = unit_triangle( );
    let v = t.interpolate( 1.0, 0.0 );
    assert!( ( v.position - t.v1.position ).len( ) < 1e-5 );
  }

  #[test]
  fn interpolate_barycentric_sum_is_one( ) {
    let t = unit_triangle( );
    let v = t.interpolate( 0.3, 0.3 );
    let expected = 0.4 * t.v0.position + 0.3 * t.v1.position + 0.3 * t.v2.position;
    assert!( ( v.position - expected ).len( ) < 1e-5 );
  }
}
