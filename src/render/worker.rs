use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::image::{direction_to_uv, Image};
use crate::kdtree::traverse::TraversalStack;
use crate::kdtree::KdTree;
use crate::math::{sampling, Rng, Vec2};
use crate::render::ray_buffer::drain_with;
use crate::render::{RayBuffer, RenderSettings, RenderStats, ShadingContext};
use crate::scene::{Color, Scene};

/// One render worker's claim-a-block loop (§4.8). Runs until `next_block`
/// reaches `block_count`, at which point it returns and its accumulated
/// `RenderStats` are merged into `stats_out`.
///
/// Each worker owns its traversal stack, ray buffer, and RNG — none of
/// these are shared, matching §5's "per-worker state is thread-local and
/// never shared."
pub( crate ) fn run_worker(
  scene       : &Scene,
  tree        : &KdTree,
  settings    : &RenderSettings,
  image       : &Mutex< Image< f32, 4 > >,
  next_block  : &AtomicUsize,
  block_count : usize,
  seed        : u32,
  stats_out   : &Mutex< RenderStats >
) {
  let mut stack = TraversalStack::with_capacity( tree.max_depth( ) );
  let mut ray_buffer = RayBuffer::new( );
  let mut rng = Rng::new( seed );
  let mut local = RenderStats::default( );

  let worker_start = Instant::now( );

  let width = settings.width;
  let height = settings.height;
  let block_size = settings.block_size;
  let blocks_x = settings.blocks_x( );
  let samples = settings.pixel_samples.max( 1 ) as usize;
  let inv_sample_count = 1.0 / ( samples * samples ) as f32;

  loop {
    let id = next_block.fetch_add( 1, Ordering::Relaxed );
    if id >= block_count {
      break;
    }

    let bx = ( id as u32 ) % blocks_x;
    let by = ( id as u32 ) / blocks_x;
    let x0 = bx * block_size;
    let y0 = by * block_size;
    let x1 = ( x0 + block_size ).min( width );
    let y1 = ( y0 + block_size ).min( height );

    let mut block_samples = Vec::with_capacity( ( ( x1 - x0 ) * ( y1 - y0 ) ) as usize );

    for y in y0 .. y1 {
      for x in x0 .. x1 {
        let emit_start = Instant::now( );
        let jitter = sampling::jittered_square( samples, &mut rng );
        local.primary_emit += emit_start.elapsed( );

        let mut accum = Color::BLACK;

        for cell in &jitter {
          let uv = Vec2::new(
            ( x as f32 + cell.x ) / width as f32,
            ( y as f32 + cell.y ) / height as f32
          );
          let lens_uv = Vec2::new( rng.next( ), rng.next( ) );

          let emit_start = Instant::now( );
          let ray = scene.camera.view_ray( uv, lens_uv );
          local.primary_emit += emit_start.elapsed( );

          let trace_start = Instant::now( );
          let hit = tree.intersect( &ray, false, &mut stack );
          local.primary_trace += trace_start.elapsed( );

          let sample_color = match hit {
            Some( collision ) => {
              let shade_start = Instant::now( );
              let triangle = &scene.triangles[ collision.triangle_id as usize ];
              let material = scene.material_for( collision.triangle_id );

              let mut ctx = ShadingContext::new( tree, &mut stack, &mut ray_buffer, rng, 0, settings.max_depth, settings.shadow_samples, settings.occlusion_samples, settings.occlusion_distance );
              let direct = material.shade( &ray, &collision, triangle, scene, &mut ctx );
              rng = ctx.rng;
              local.shadow_trace += ctx.shadow_trace_time;
              local.shade += shade_start.elapsed( ).saturating_sub( ctx.shadow_trace_time );

              let secondary = drain_with( &mut ray_buffer, | buffer, queued | {
                let trace_start = Instant::now( );
                let hit = tree.intersect( &queued.ray, false, &mut stack );
                local.secondary_trace += trace_start.elapsed( );

                match hit {
                  Some( c ) => {
                    let shade_start = Instant::now( );
                    let tri = &scene.triangles[ c.triangle_id as usize ];
                    let mat = scene.material_for( c.triangle_id );
                    let mut ctx = ShadingContext::new( tree, &mut stack, buffer, rng, queued.depth, settings.max_depth, settings.shadow_samples, settings.occlusion_samples, settings.occlusion_distance );
                    let color = mat.shade( &queued.ray, &c, tri, scene, &mut ctx );
                    rng = ctx.rng;
                    local.shadow_trace += ctx.shadow_trace_time;
                    local.shade += shade_start.elapsed( ).saturating_sub( ctx.shadow_trace_time );
                    color
                  }
                  None => miss_color( scene, &queued.ray )
                }
              } );

              direct + secondary
            }
            None => miss_color( scene, &ray )
          };

          accum += sample_color * inv_sample_count;
        }

        block_samples.push( ( x, y, accum ) );
      }
    }

    let fb_start = Instant::now( );
    {
      let mut img = image.lock( ).expect( "output image mutex poisoned" );
      for ( x, y, color ) in &block_samples {
        img.set_pixel( *x as usize, *y as usize, [ color.r, color.g, color.b, 1.0 ] );
      }
    }
    local.framebuffer_update += fb_start.elapsed( );
  }

  local.total = worker_start.elapsed( );
  stats_out.lock( ).expect( "stats mutex poisoned" ).merge( &local );
}

/// The color of a ray that left the scene without hitting anything: the
/// environment map if one is set, otherwise the scene's flat background.
fn miss_color( scene : &Scene, ray : &crate::math::Ray ) -> Color {
  match &scene.environment {
    Some( env ) => {
      let uv = direction_to_uv( ray.direction );
      let px = scene.env_sampler.sample( env, uv );
      Color::new( px[ 0 ], px[ 1 ], px[ 2 ] )
    }
    None => scene.background
  }
}
