use std::sync::Mutex;

use crate::error::RenderError;
use crate::image::{Image, Sampler};
use crate::kdtree::KdTree;
use crate::scene::{Camera, Light, Material};
use crate::triangle::Triangle;

/// The full description of a scene to render: geometry, materials, lights,
/// a camera, an optional environment, and the output image samples are
/// accumulated into. Constructed by the caller before `render::render`,
/// immutable for the duration of the render, dropped after. Grounded on the
/// teacher's `graphics/scene.rs`.
///
/// `output` is a `Mutex` rather than a bare `Image`: each pixel is still
/// touched by exactly one render block/worker (§5), but writing the result
/// back requires a `&mut Image` and many workers hold a shared `&Scene` at
/// once, so the lock is the safe-Rust realization of that single-writer
/// guarantee. Contention is negligible next to the cost of tracing a block.
pub struct Scene {
  pub triangles    : Vec< Triangle >,
  pub material_ids : Vec< u32 >,
  pub materials    : Vec< Material >,
  pub lights       : Vec< Light >,
  pub camera       : Camera,
  pub environment  : Option< Image< f32, 3 > >,
  pub env_sampler  : Sampler,
  pub background   : crate::scene::Color,
  pub output       : Mutex< Image< f32, 4 > >
}

impl Scene {
  pub fn new(
    triangles : Vec< Triangle >,
    material_ids : Vec< u32 >,
    materials : Vec< Material >,
    lights : Vec< Light >,
    camera : Camera,
    background : crate::scene::Color,
    output_width : usize,
    output_height : usize
  ) -> Scene {
    Scene {
      triangles, material_ids, materials, lights, camera, background,
      environment: None,
      env_sampler: Sampler::new( crate::image::Filter::Bilinear, crate::image::Border::Wrap ),
      output: Mutex::new( Image::new( output_width, output_height ) )
    }
  }

  pub fn with_environment( mut self, environment : Image< f32, 3 >, env_sampler : Sampler ) -> Scene {
    self.environment = Some( environment );
    self.env_sampler = env_sampler;
    self
  }

  pub fn material_for( &self, triangle_id : u32 ) -> &Material {
    let idx = self.material_ids[ triangle_id as usize ] as usize;
    &self.materials[ idx ]
  }

  /// Validates the build-time invariants of §7's `InvalidScene`: a
  /// non-empty triangle list, no NaN vertex positions, no zero-area
  /// triangle.
  pub fn validate( &self ) -> Result< ( ), RenderError > {
    if self.triangles.is_empty( ) {
      return Err( RenderError::InvalidScene { reason: "scene has no triangles".into( ) } );
    }
    for t in &self.triangles {
      for v in [ &t.v0, &t.v1, &t.v2 ] {
        if v.position.x.is_nan( ) || v.position.y.is_nan( ) || v.position.z.is_nan( ) {
          return Err( RenderError::InvalidScene { reason: format!( "triangle {} has a NaN vertex", t.triangle_id ) } );
        }
      }
      if t.face_normal.len_sq( ).is_nan( ) || t.face_normal.len_sq( ) < 1e-12 {
        return Err( RenderError::InvalidScene { reason: format!( "triangle {} has zero area", t.triangle_id ) } );
      }
    }
    Ok( ( ) )
  }

  /// Builds the KD-tree accelerator over `self.triangles`. Kept as an
  /// explicit step (rather than bundled into construction) so settings can
  /// be supplied independently and a caller can rebuild after mutating
  /// geometry.
  pub fn build_tree( &self, settings : &crate::kdtree::KdBuildSettings ) -> KdTree {
    crate::kdtree::build( &self.triangles, settings )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::math::{Vec2, Vec3};
  use crate::scene::{Color, PhongMaterial};
  use crate::triangle::Vertex;

  fn unit_triangle( ) -> Triangle {
    let v = | x : f32, y : f32 | Vertex::new( Vec3::new( x, y, 0.0 ), Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 1.0, 0.0, 0.0 ), Vec2::new( x, y ) );
    Triangle::new( v( 0.0, 0.0 ), v( 1.0, 0.0 ), v( 0.0, 1.0 ), 0, 0 )
  }

  fn test_camera( ) -> Camera {
    Camera::new( Vec3::new( 0.0, 0.0, -5.0 ), Vec3::ZERO, Vec3::new( 0.0, 1.0, 0.0 ), std::f32::consts::FRAC_PI_2, 1.0, 1.0, 0.0 )
  }

  #[test]
  fn empty_scene_fails_validation( ) {
    let scene = Scene::new( vec![ ], vec![ ], vec![ ], vec![ ], test_camera( ), Color::BLACK, 4, 4 );
    assert!( scene.validate( ).is_err( ) );
  }

  #[test]
  fn well_formed_scene_validates( ) {
    let material = Material::Phong( PhongMaterial { diffuse: Color::WHITE, specular: Color::BLACK, shininess: 1.0, reflectivity: 0.0 } );
    let scene = Scene::new( vec![ unit_triangle( ) ], vec![ 0 ], vec![ material ], vec![ ], test_camera( ), Color::BLACK, 4, 4 );
    assert!( scene.validate( ).is_ok( ) );
  }
}
