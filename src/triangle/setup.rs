use crate::math::{Ray, EPSILON};
use crate::triangle::Triangle;
use crate::scene::Collision;

/// A cache-friendly, precomputed triangle for the intersection kernel.
///
/// This crate uses the Möller–Trumbore encoding (`v0, e1, e2`) rather than
/// Wald's dominant-axis-projection encoding — see `DESIGN.md` for the
/// tradeoff. The teacher's own `graphics/primitives/triangle.rs` already
/// reads edges off `v1 - v0` / `v2 - v0` in its intersection test, so this
/// keeps that idiom and just precomputes the edges once at build time
/// instead of per ray.
#[derive(Copy, Clone, Debug)]
pub struct SetupTriangle {
  pub v0 : crate::math::Vec3,
  pub e1 : crate::math::Vec3,
  pub e2 : crate::math::Vec3,
  pub triangle_id : u32
}

impl SetupTriangle {
  pub fn from_triangle( t : &Triangle ) -> SetupTriangle {
    SetupTriangle {
      v0: t.v0.position,
      e1: t.v1.position - t.v0.position,
      e2: t.v2.position - t.v0.position,
      triangle_id: t.triangle_id
    }
  }

  /// Intersects `ray` against this triangle. `t_min`/`t_max` bound the
  /// acceptable hit distance; `best_so_far` is the current closest hit (or
  /// `f32::INFINITY`) and prunes farther hits without a branch on
  /// `any_hit` inside the arithmetic.
  pub fn intersect( &self, ray : &Ray, t_min : f32, t_max : f32, best_so_far : f32 ) -> Option< Collision > {
    let p = ray.direction.cross( self.e2 );
    let det = self.e1.dot( p );
    if det.abs( ) <= EPSILON {
      return None; // ray parallel to the triangle's plane
    }
    let f = 1.0 / det;
    let s = ray.origin - self.v0;
    let beta = f * s.dot( p );
    if beta < 0.0 || beta > 1.0 {
      return None;
    }
    let q = s.cross( self.e1 );
    let gamma = f * ray.direction.dot( q );
    if gamma < 0.0 || beta + gamma > 1.0 {
      return None;
    }
    let t = f * self.e2.dot( q );
    if t < t_min || t > t_max || t >= best_so_far {
      return None;
    }
    Some( Collision { distance: t, beta, gamma, triangle_id: self.triangle_id } )
  }
}

/// Intersects a contiguous range of setup triangles. When `any_hit` is set,
/// returns on the first valid hit (used for shadow rays); otherwise returns
/// the closest hit in the range.
pub fn intersect_range( triangles : &[ SetupTriangle ], ray : &Ray, any_hit : bool, t_min : f32, t_max : f32 ) -> Option< Collision > {
  let mut best : Option< Collision > = None;
  let mut best_t = t_max;
  for tri in triangles {
    if let Some( hit ) = tri.intersect( ray, t_min, t_max, best_t ) {
      if any_hit {
        return Some( hit );
      }
      best_t = hit.distance;
      best = Some( hit );
    }
  }
  best
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::math::{Vec2, Vec3};
  use crate::triangle::Vertex;

  fn unit_triangle( ) -> Triangle {
    Triangle::new(
      Vertex::new( Vec3::new( 0.0, 0.0, 0.0 ), Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 1.0, 0.0, 0.0 ), Vec2::ZERO ),
      Vertex::new( Vec3::new( 1.0, 0.0, 0.0 ), Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 1.0, 0.0, 0.0 ), Vec2::new( 1.0, 0.0 ) ),
      Vertex::new( Vec3::new( 0.0, 1.0, 0.0 ), Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 1.0, 0.0, 0.0 ), Vec2::new( 0.0, 1.0 ) ),
      0, 0
    )
  }

  #[test]
  fn ray_through_center_hits_with_valid_barycentrics( ) {
    let t = unit_triangle( ).to_setup( );
    let r = Ray::new( Vec3::new( 0.2, 0.2, -5.0 ), Vec3::new( 0.0, 0.0, 1.0 ) );
    let hit = t.intersect( &r, 0.0, f32::INFINITY, f32::INFINITY ).unwrap( );
    assert!( ( hit.distance - 5.0 ).abs( ) < 1e-4 );
    assert!( hit.beta >= 0.0 && hit.gamma >= 0.0 && hit.beta + hit.gamma <= 1.0 );
  }

  #[test]
  fn ray_missing_triangle_returns_none( ) {
    let t = unit_triangle( ).to_setup( );
    let r = Ray::new( Vec3::new( 5.0, 5.0, -5.0 ), Vec3::new( 0.0, 0.0, 1.0 ) );
    assert!( t.intersect( &r, 0.0, f32::INFINITY, f32::INFINITY ).is_none( ) );
  }

  #[test]
  fn any_hit_stops_at_first_valid_triangle( ) {
    let near = unit_triangle( ).to_setup( );
    let mut far_tri = unit_triangle( );
    far_tri.v0.position.z = 10.0;
    far_tri.v1.position.z = 10.0;
    far_tri.v2.position.z = 10.0;
    let far = far_tri.to_setup( );

    let r = Ray::new( Vec3::new( 0.2, 0.2, -5.0 ), Vec3::new( 0.0, 0.0, 1.0 ) );
    // any_hit returns the first valid hit encountered, not the closest one
    let hit = intersect_range( &[ near, far ], &r, true, 0.0, f32::INFINITY ).unwrap( );
    assert_eq!( hit.distance, 5.0 );
  }
}
