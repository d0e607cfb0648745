mod ray_buffer;
mod settings;
mod shading_context;
mod stats;
mod worker;

pub use ray_buffer::{drain_with, QueuedRay, RayBuffer};
pub use settings::{RenderSettings, MAX_AO_SAMPLES, MAX_DEPTH, MAX_PIXEL_SAMPLES};
pub use shading_context::ShadingContext;
pub use stats::RenderStats;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::AtomicUsize;
use std::sync::Mutex;

use crate::error::RenderError;
use crate::kdtree::KdTree;
use crate::scene::Scene;

/// Renders `scene` through `tree` into `scene.output`, per `settings` (§4.8,
/// §5). Spawns `settings.resolved_thread_count()` workers on a
/// `rayon::scope`, each claiming image blocks off a shared atomic counter
/// until none remain. A panicking worker is caught so the others still
/// finish their blocks and the caller gets an error instead of a poisoned
/// process; grounded on the teacher's `main.rs` benchmark harness, which
/// runs the equivalent loop single-threaded with no isolation because it
/// trusts its own fixed demo scenes.
pub fn render( scene : &Scene, tree : &KdTree, settings : &RenderSettings ) -> Result< RenderStats, RenderError > {
  settings.validate( )?;
  scene.validate( )?;

  let block_count = settings.block_count( ) as usize;
  let next_block = AtomicUsize::new( 0 );
  let stats = Mutex::new( RenderStats::default( ) );
  let thread_count = settings.resolved_thread_count( ).max( 1 );

  let panicked = Mutex::new( false );

  rayon::scope( | s | {
    for worker_id in 0 .. thread_count {
      let next_block = &next_block;
      let stats = &stats;
      let panicked = &panicked;
      s.spawn( move | _ | {
        let seed = settings.width.wrapping_mul( 2654435761 ) ^ ( worker_id as u32 ).wrapping_mul( 0x9e3779b9 ) ^ 0x1234_5678;
        let result = catch_unwind( AssertUnwindSafe( || {
          worker::run_worker( scene, tree, settings, &scene.output, next_block, block_count, seed, stats );
        } ) );
        if result.is_err( ) {
          log::error!( "render worker {} panicked", worker_id );
          *panicked.lock( ).expect( "panicked-flag mutex poisoned" ) = true;
        }
      } );
    }
  } );

  if *panicked.lock( ).expect( "panicked-flag mutex poisoned" ) {
    return Err( RenderError::ResourceExhausted { reason: "one or more render workers panicked".into( ) } );
  }

  let stats = stats.into_inner( ).expect( "stats mutex poisoned" );
  stats.log_summary( );
  Ok( stats )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::kdtree::KdBuildSettings;
  use crate::scene::{Camera, Color, PhongMaterial, Material};
  use crate::triangle::{Triangle, Vertex};
  use crate::math::Vec3;

  fn single_triangle_scene( width : usize, height : usize ) -> Scene {
    let v0 = Vertex { position: Vec3::new( -1.0, -1.0, 0.0 ), normal: Vec3::new( 0.0, 0.0, 1.0 ), tangent: Vec3::new( 1.0, 0.0, 0.0 ), uv: crate::math::Vec2::new( 0.0, 0.0 ) };
    let v1 = Vertex { position: Vec3::new( 1.0, -1.0, 0.0 ), normal: Vec3::new( 0.0, 0.0, 1.0 ), tangent: Vec3::new( 1.0, 0.0, 0.0 ), uv: crate::math::Vec2::new( 1.0, 0.0 ) };
    let v2 = Vertex { position: Vec3::new( 0.0, 1.0, 0.0 ), normal: Vec3::new( 0.0, 0.0, 1.0 ), tangent: Vec3::new( 1.0, 0.0, 0.0 ), uv: crate::math::Vec2::new( 0.5, 1.0 ) };
    let triangle = Triangle::new( v0, v1, v2, 0, 0 );

    let camera = Camera::new(
      Vec3::new( 0.0, 0.0, 5.0 ),
      Vec3::ZERO,
      Vec3::new( 0.0, 1.0, 0.0 ),
      60.0_f32.to_radians( ),
      width as f32 / height as f32,
      1.0,
      0.0
    );

    let material = Material::Phong( PhongMaterial {
      diffuse: Color::new( 0.8, 0.2, 0.2 ),
      specular: Color::new( 0.2, 0.2, 0.2 ),
      shininess: 16.0,
      reflectivity: 0.0
    } );

    Scene::new(
      vec![ triangle ],
      vec![ 0 ],
      vec![ material ],
      vec![ ],
      camera,
      Color::new( 0.02, 0.02, 0.05 ),
      width,
      height
    )
  }

  #[test]
  fn renders_a_single_triangle_without_panicking( ) {
    let scene = single_triangle_scene( 32, 32 );
    let tree = scene.build_tree( &KdBuildSettings::default( ) );
    let mut settings = RenderSettings::default( );
    settings.width = 32;
    settings.height = 32;
    settings.block_size = 8;
    settings.pixel_samples = 1;
    settings.num_threads = 2;

    let stats = render( &scene, &tree, &settings ).expect( "render should succeed" );
    assert!( stats.total > std::time::Duration::ZERO );
  }

  #[test]
  fn rejects_invalid_settings_before_rendering( ) {
    let scene = single_triangle_scene( 4, 4 );
    let tree = scene.build_tree( &KdBuildSettings::default( ) );
    let mut settings = RenderSettings::default( );
    settings.width = 0;
    assert!( render( &scene, &tree, &settings ).is_err( ) );
  }

  #[test]
  fn rejects_empty_scene( ) {
    let camera = Camera::new( Vec3::new( 0.0, 0.0, 5.0 ), Vec3::ZERO, Vec3::new( 0.0, 1.0, 0.0 ), 60.0_f32.to_radians( ), 1.0, 1.0, 0.0 );
    let scene = Scene::new( vec![ ], vec![ ], vec![ ], vec![ ], camera, Color::BLACK, 4, 4 );
    let tree = scene.build_tree( &KdBuildSettings::default( ) );
    let settings = RenderSettings::default( );
    assert!( render( &scene, &tree, &settings ).is_err( ) );
  }
}
