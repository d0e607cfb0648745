use crate::math::Vec3;

/// A 3x3 matrix in row-major order: the linear (rotation/scale) part of a
/// `Mat4`, used where there is no translation to carry — transforming
/// normals/tangents and building an orthonormal basis from a single axis.
///
/// Grounded on `Mat4`'s builder-set shape (`original_source/include/math/matrix.h`),
/// trimmed to the 3x3 subset that transform applies to directions.
#[derive(Copy, Clone, Debug)]
pub struct Mat3 {
  pub m : [ [ f32; 3 ]; 3 ]
}

impl Mat3 {
  pub const IDENTITY: Mat3 = Mat3 {
    m: [
      [ 1.0, 0.0, 0.0 ],
      [ 0.0, 1.0, 0.0 ],
      [ 0.0, 0.0, 1.0 ]
    ]
  };

  /// The 3x3 basis whose rows are `right`, `up`, `forward` — as used to
  /// rotate a local-frame direction (e.g. a cosine-weighted hemisphere
  /// sample) into world space around a shading normal.
  pub fn from_basis( right : Vec3, up : Vec3, forward : Vec3 ) -> Mat3 {
    Mat3 {
      m: [
        [ right.x, right.y, right.z ],
        [ up.x, up.y, up.z ],
        [ forward.x, forward.y, forward.z ]
      ]
    }
  }

  pub fn from_mat4( m : &crate::math::Mat4 ) -> Mat3 {
    Mat3 {
      m: [
        [ m.m[ 0 ][ 0 ], m.m[ 0 ][ 1 ], m.m[ 0 ][ 2 ] ],
        [ m.m[ 1 ][ 0 ], m.m[ 1 ][ 1 ], m.m[ 1 ][ 2 ] ],
        [ m.m[ 2 ][ 0 ], m.m[ 2 ][ 1 ], m.m[ 2 ][ 2 ] ]
      ]
    }
  }

  pub fn transpose( &self ) -> Mat3 {
    let m = self.m;
    Mat3 {
      m: [
        [ m[ 0 ][ 0 ], m[ 1 ][ 0 ], m[ 2 ][ 0 ] ],
        [ m[ 0 ][ 1 ], m[ 1 ][ 1 ], m[ 2 ][ 1 ] ],
        [ m[ 0 ][ 2 ], m[ 1 ][ 2 ], m[ 2 ][ 2 ] ]
      ]
    }
  }

  pub fn mul( &self, rhs : &Mat3 ) -> Mat3 {
    let mut out = [ [ 0.0_f32; 3 ]; 3 ];
    for i in 0..3 {
      for j in 0..3 {
        let mut sum = 0.0;
        for k in 0..3 {
          sum += self.m[ i ][ k ] * rhs.m[ k ][ j ];
        }
        out[ i ][ j ] = sum;
      }
    }
    Mat3 { m: out }
  }

  pub fn transform( &self, v : Vec3 ) -> Vec3 {
    Vec3::new(
      self.m[ 0 ][ 0 ] * v.x + self.m[ 0 ][ 1 ] * v.y + self.m[ 0 ][ 2 ] * v.z,
      self.m[ 1 ][ 0 ] * v.x + self.m[ 1 ][ 1 ] * v.y + self.m[ 1 ][ 2 ] * v.z,
      self.m[ 2 ][ 0 ] * v.x + self.m[ 2 ][ 1 ] * v.y + self.m[ 2 ][ 2 ] * v.z
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identity_leaves_vector_unchanged( ) {
    let v = Vec3::new( 1.0, 2.0, 3.0 );
    assert_eq!( Mat3::IDENTITY.transform( v ), v );
  }

  #[test]
  fn basis_maps_local_up_to_world_up( ) {
    let right = Vec3::new( 1.0, 0.0, 0.0 );
    let up = Vec3::new( 0.0, 1.0, 0.0 );
    let forward = Vec3::new( 0.0, 0.0, 1.0 );
    let m = Mat3::from_basis( right, up, forward );
    let local_up = Vec3::new( 0.0, 1.0, 0.0 );
    assert_eq!( m.transform( local_up ), up );
  }

  #[test]
  fn transpose_of_orthonormal_basis_is_its_inverse( ) {
    let right = Vec3::new( 1.0, 0.0, 0.0 );
    let up = Vec3::new( 0.0, 1.0, 0.0 );
    let forward = Vec3::new( 0.0, 0.0, 1.0 );
    let m = Mat3::from_basis( right, up, forward );
    let v = Vec3::new( 0.3, 0.7, -0.2 );
    let round_tripped = m.transpose( ).transform( m.transform( v ) );
    assert!( ( round_tripped - v ).len( ) < 1e-5 );
  }
}
