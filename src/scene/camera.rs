use crate::math::{sampling, Ray, Vec2, Vec3};

/// A pinhole/thin-lens camera. Grounded on the teacher's
/// `Camera{location,rot_x,rot_y}` (in both `scene.rs` and `graphics/scene.rs`),
/// generalized from two Euler angles into a `position`/`target`/`up` frame
/// with a proper field-of-view, aspect ratio, and optional depth-of-field
/// (`aperture`/`focal_length`), per SPEC_FULL.md §4.7.
#[derive(Clone, Debug)]
pub struct Camera {
  position : Vec3,
  target   : Vec3,
  world_up : Vec3,
  fov      : f32,
  aspect   : f32,
  focal_length : f32,
  aperture : f32,

  forward     : Vec3,
  right       : Vec3,
  up          : Vec3,
  half_width  : f32,
  half_height : f32
}

impl Camera {
  pub fn new( position : Vec3, target : Vec3, world_up : Vec3, fov : f32, aspect : f32, focal_length : f32, aperture : f32 ) -> Camera {
    let mut cam = Camera {
      position, target, world_up, fov, aspect, focal_length, aperture,
      forward: Vec3::ZERO, right: Vec3::ZERO, up: Vec3::ZERO, half_width: 0.0, half_height: 0.0
    };
    cam.recompute( );
    cam
  }

  fn recompute( &mut self ) {
    self.forward = ( self.target - self.position ).normalize( );
    self.right = ( -self.forward.cross( self.world_up ) ).normalize( );
    self.up = self.right.cross( self.forward );
    self.half_width = ( self.fov * 0.5 ).tan( ) * self.focal_length;
    self.half_height = self.half_width / self.aspect;
  }

  pub fn set_position( &mut self, position : Vec3 ) { self.position = position; self.recompute( ); }
  pub fn set_target( &mut self, target : Vec3 ) { self.target = target; self.recompute( ); }
  pub fn set_fov( &mut self, fov : f32 ) { self.fov = fov; self.recompute( ); }
  pub fn set_aspect( &mut self, aspect : f32 ) { self.aspect = aspect; self.recompute( ); }

  pub fn position( &self ) -> Vec3 { self.position }

  /// Emits a primary ray through `uv in [0,1]^2` of the image plane, jittered
  /// across the lens by `lens_uv in [0,1]^2` (ignored when `aperture == 0`).
  pub fn view_ray( &self, uv : Vec2, lens_uv : Vec2 ) -> Ray {
    let x = uv.x * 2.0 - 1.0;
    let y = ( 1.0 - uv.y ) * 2.0 - 1.0; // image-space v grows downward; view-space up grows upward

    let target = self.position
      + self.forward * self.focal_length
      + self.right * ( self.half_width * x )
      + self.up * ( self.half_height * y );

    let origin = if self.aperture > 0.0 {
      let d = sampling::uniform_disk( lens_uv ) * self.aperture;
      self.position + self.right * d.x + self.up * d.y
    } else {
      self.position
    };

    Ray::new( origin, ( target - origin ).normalize( ) )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn center_of_image_points_toward_target_without_dof( ) {
    let cam = Camera::new( Vec3::new( 0.0, 0.0, -5.0 ), Vec3::ZERO, Vec3::new( 0.0, 1.0, 0.0 ), std::f32::consts::FRAC_PI_2, 1.0, 1.0, 0.0 );
    let ray = cam.view_ray( Vec2::new( 0.5, 0.5 ), Vec2::ZERO );
    assert!( ( ray.direction - Vec3::new( 0.0, 0.0, 1.0 ) ).len( ) < 1e-4 );
  }

  #[test]
  fn changing_aspect_changes_half_height( ) {
    let mut cam = Camera::new( Vec3::ZERO, Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 0.0, 1.0, 0.0 ), 1.0, 1.0, 1.0, 0.0 );
    let before = cam.view_ray( Vec2::new( 0.0, 0.0 ), Vec2::ZERO );
    cam.set_aspect( 2.0 );
    let after = cam.view_ray( Vec2::new( 0.0, 0.0 ), Vec2::ZERO );
    assert!( ( before.direction - after.direction ).len( ) > 1e-4 );
  }
}
