use crate::math::Vec3;

/// A half-line in 3-dimensional space: it "shoots" from `origin` into
/// `direction`, which must be of unit length. `inv_direction` is precomputed
/// once so the AABB slab test and KD traversal never divide in their hot
/// loops.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
  pub origin        : Vec3,
  pub direction     : Vec3,
  pub inv_direction : Vec3
}

impl Ray {
  pub fn new( origin : Vec3, direction : Vec3 ) -> Ray {
    let inv_direction = Vec3::new( 1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z );
    Ray { origin, direction, inv_direction }
  }

  /// Evaluates the ray at `distance` from its origin.
  pub fn at( self, distance : f32 ) -> Vec3 {
    self.origin + distance * self.direction
  }

  /// Returns a ray offset slightly along its direction, to avoid immediate
  /// self-intersection when spawning a secondary ray from a surface.
  pub fn nudged( self, bias : f32 ) -> Ray {
    Ray::new( self.origin + bias * self.direction, self.direction )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn at_zero_is_origin( ) {
    let r = Ray::new( Vec3::new( 1.0, 2.0, 3.0 ), Vec3::new( 0.0, 0.0, 1.0 ) );
    assert_eq!( r.at( 0.0 ), r.origin );
  }

  #[test]
  fn inv_direction_is_reciprocal( ) {
    let r = Ray::new( Vec3::ZERO, Vec3::new( 2.0, 0.5, -4.0 ) );
    assert!( ( r.inv_direction.x - 0.5 ).abs( ) < 1e-6 );
    assert!( ( r.inv_direction.y - 2.0 ).abs( ) < 1e-6 );
    assert!( ( r.inv_direction.z + 0.25 ).abs( ) < 1e-6 );
  }
}
