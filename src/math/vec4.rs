use std::ops;

/// A 4-component vector of `f32`s, used to carry homogeneous coordinates
/// through `Mat3`/`Mat4` intermediate math and to hold RGBA pixel samples
/// before they are written into a tiled `Image<f32, 4>`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vec4 {
  pub x : f32,
  pub y : f32,
  pub z : f32,
  pub w : f32
}

impl Vec4 {
  pub const ZERO: Vec4 = Vec4 { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

  pub fn new( x : f32, y : f32, z : f32, w : f32 ) -> Vec4 {
    Vec4 { x, y, z, w }
  }

  pub fn from_vec3( v : crate::math::Vec3, w : f32 ) -> Vec4 {
    Vec4::new( v.x, v.y, v.z, w )
  }

  pub fn xyz( self ) -> crate::math::Vec3 {
    crate::math::Vec3::new( self.x, self.y, self.z )
  }

  /// Divides `x/y/z` by `w`, as the final step of a homogeneous transform.
  pub fn perspective_divide( self ) -> crate::math::Vec3 {
    crate::math::Vec3::new( self.x / self.w, self.y / self.w, self.z / self.w )
  }

  pub fn dot( self, rhs : Vec4 ) -> f32 {
    self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
  }
}

impl ops::Add< Vec4 > for Vec4 {
  type Output = Vec4;
  fn add( self, rhs : Vec4 ) -> Vec4 { Vec4::new( self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w ) }
}

impl ops::Mul< f32 > for Vec4 {
  type Output = Vec4;
  fn mul( self, rhs : f32 ) -> Vec4 { Vec4::new( self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs ) }
}
