use crate::math::Vec3;

/// A 4x4 matrix in row-major order, used for camera and transform setup.
///
/// The teacher has no matrix type of its own (the "native" pipeline
/// represents camera orientation with two Euler angles). The builder set
/// below follows the shape of `original_source/include/math/matrix.h`
/// (translation/scale/rotation/look-at/perspective/orthographic builders),
/// reimplemented with this crate's `Vec3` operator style.
#[derive(Copy, Clone, Debug)]
pub struct Mat4 {
  pub m : [ [ f32; 4 ]; 4 ]
}

impl Mat4 {
  pub const IDENTITY: Mat4 = Mat4 {
    m: [
      [ 1.0, 0.0, 0.0, 0.0 ],
      [ 0.0, 1.0, 0.0, 0.0 ],
      [ 0.0, 0.0, 1.0, 0.0 ],
      [ 0.0, 0.0, 0.0, 1.0 ]
    ]
  };

  pub fn translation( t : Vec3 ) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.m[ 0 ][ 3 ] = t.x;
    m.m[ 1 ][ 3 ] = t.y;
    m.m[ 2 ][ 3 ] = t.z;
    m
  }

  pub fn scale( s : Vec3 ) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.m[ 0 ][ 0 ] = s.x;
    m.m[ 1 ][ 1 ] = s.y;
    m.m[ 2 ][ 2 ] = s.z;
    m
  }

  pub fn rotation_x( angle : f32 ) -> Mat4 {
    let ( s, c ) = angle.sin_cos( );
    let mut m = Mat4::IDENTITY;
    m.m[ 1 ][ 1 ] = c; m.m[ 1 ][ 2 ] = -s;
    m.m[ 2 ][ 1 ] = s; m.m[ 2 ][ 2 ] = c;
    m
  }

  pub fn rotation_y( angle : f32 ) -> Mat4 {
    let ( s, c ) = angle.sin_cos( );
    let mut m = Mat4::IDENTITY;
    m.m[ 0 ][ 0 ] = c; m.m[ 0 ][ 2 ] = s;
    m.m[ 2 ][ 0 ] = -s; m.m[ 2 ][ 2 ] = c;
    m
  }

  pub fn rotation_z( angle : f32 ) -> Mat4 {
    let ( s, c ) = angle.sin_cos( );
    let mut m = Mat4::IDENTITY;
    m.m[ 0 ][ 0 ] = c; m.m[ 0 ][ 1 ] = -s;
    m.m[ 1 ][ 0 ] = s; m.m[ 1 ][ 1 ] = c;
    m
  }

  /// Combined yaw (y), pitch (x), roll (z) rotation, applied yaw then pitch
  /// then roll.
  pub fn yaw_pitch_roll( yaw : f32, pitch : f32, roll : f32 ) -> Mat4 {
    Mat4::rotation_z( roll ).mul( &Mat4::rotation_x( pitch ) ).mul( &Mat4::rotation_y( yaw ) )
  }

  /// A right-handed look-at matrix: transforms world space into camera
  /// space with `eye` at the origin and `-z` pointing toward `target`.
  pub fn look_at( eye : Vec3, target : Vec3, up : Vec3 ) -> Mat4 {
    let f = ( target - eye ).normalize( );
    let r = f.cross( up ).normalize( );
    let u = r.cross( f );
    Mat4 {
      m: [
        [ r.x, r.y, r.z, -r.dot( eye ) ],
        [ u.x, u.y, u.z, -u.dot( eye ) ],
        [ -f.x, -f.y, -f.z, f.dot( eye ) ],
        [ 0.0, 0.0, 0.0, 1.0 ]
      ]
    }
  }

  /// A right-handed perspective projection with vertical field of view
  /// `fovy` (radians), `aspect = width/height`, and near/far clip planes.
  pub fn perspective( fovy : f32, aspect : f32, near : f32, far : f32 ) -> Mat4 {
    let f = 1.0 / ( fovy * 0.5 ).tan( );
    let mut m = [ [ 0.0_f32; 4 ]; 4 ];
    m[ 0 ][ 0 ] = f / aspect;
    m[ 1 ][ 1 ] = f;
    m[ 2 ][ 2 ] = ( far + near ) / ( near - far );
    m[ 2 ][ 3 ] = ( 2.0 * far * near ) / ( near - far );
    m[ 3 ][ 2 ] = -1.0;
    Mat4 { m }
  }

  pub fn orthographic( left : f32, right : f32, bottom : f32, top : f32, near : f32, far : f32 ) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m.m[ 0 ][ 0 ] = 2.0 / ( right - left );
    m.m[ 1 ][ 1 ] = 2.0 / ( top - bottom );
    m.m[ 2 ][ 2 ] = -2.0 / ( far - near );
    m.m[ 0 ][ 3 ] = -( right + left ) / ( right - left );
    m.m[ 1 ][ 3 ] = -( top + bottom ) / ( top - bottom );
    m.m[ 2 ][ 3 ] = -( far + near ) / ( far - near );
    m
  }

  pub fn mul( &self, rhs : &Mat4 ) -> Mat4 {
    let mut out = [ [ 0.0_f32; 4 ]; 4 ];
    for i in 0..4 {
      for j in 0..4 {
        let mut sum = 0.0;
        for k in 0..4 {
          sum += self.m[ i ][ k ] * rhs.m[ k ][ j ];
        }
        out[ i ][ j ] = sum;
      }
    }
    Mat4 { m: out }
  }

  /// Transforms a point (implicit w=1).
  pub fn transform_point( &self, p : Vec3 ) -> Vec3 {
    Vec3::new(
      self.m[ 0 ][ 0 ] * p.x + self.m[ 0 ][ 1 ] * p.y + self.m[ 0 ][ 2 ] * p.z + self.m[ 0 ][ 3 ],
      self.m[ 1 ][ 0 ] * p.x + self.m[ 1 ][ 1 ] * p.y + self.m[ 1 ][ 2 ] * p.z + self.m[ 1 ][ 3 ],
      self.m[ 2 ][ 0 ] * p.x + self.m[ 2 ][ 1 ] * p.y + self.m[ 2 ][ 2 ] * p.z + self.m[ 2 ][ 3 ]
    )
  }

  /// Transforms a direction (implicit w=0; ignores translation).
  pub fn transform_dir( &self, d : Vec3 ) -> Vec3 {
    Vec3::new(
      self.m[ 0 ][ 0 ] * d.x + self.m[ 0 ][ 1 ] * d.y + self.m[ 0 ][ 2 ] * d.z,
      self.m[ 1 ][ 0 ] * d.x + self.m[ 1 ][ 1 ] * d.y + self.m[ 1 ][ 2 ] * d.z,
      self.m[ 2 ][ 0 ] * d.x + self.m[ 2 ][ 1 ] * d.y + self.m[ 2 ][ 2 ] * d.z
    )
  }
}
