use std::time::{Duration, Instant};

use crate::kdtree::traverse::TraversalStack;
use crate::math::sampling::{self, Onb};
use crate::math::{Rng, Vec2, Vec3};
use crate::render::RayBuffer;
use crate::scene::Scene;

/// Everything a `Shader::shade` call needs besides the hit itself: a way to
/// trace shadow rays, a way to push weighted secondary rays, and the
/// per-thread state (traversal stack, RNG) those require. One
/// `ShadingContext` exists per render worker and is reused across every ray
/// it shades.
///
/// `rng` is handed in and read back out by value (`Rng` is `Copy`) rather
/// than borrowed, so the worker that constructs a `ShadingContext` per hit
/// can recover the advanced RNG state after `shade` returns without a
/// lifetime on the field.
pub struct ShadingContext< 'a > {
  tree       : &'a crate::kdtree::KdTree,
  stack      : &'a mut TraversalStack,
  ray_buffer : &'a mut RayBuffer,
  pub rng    : Rng,
  pub depth      : u32,
  pub max_depth  : u32,
  /// `§6`'s `shadowSamples`: the `n` a shader passes to
  /// `Light::sample_shadow_rays` (`n*n` rays for an area light).
  pub shadow_samples     : u32,
  /// `§6`'s `occlusionSamples`/`occlusionDistance`: how many cosine-weighted
  /// hemisphere rays `ambient_occlusion` casts, and how far they reach.
  pub occlusion_samples  : u32,
  pub occlusion_distance : f32,
  /// Time spent inside `trace_shadow`/`ambient_occlusion`, read back by the
  /// worker into `RenderStats::shadow_trace` after a `shade` call returns.
  pub shadow_trace_time : Duration
}

impl< 'a > ShadingContext< 'a > {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    tree : &'a crate::kdtree::KdTree,
    stack : &'a mut TraversalStack,
    ray_buffer : &'a mut RayBuffer,
    rng : Rng,
    depth : u32,
    max_depth : u32,
    shadow_samples : u32,
    occlusion_samples : u32,
    occlusion_distance : f32
  ) -> ShadingContext< 'a > {
    ShadingContext {
      tree, stack, ray_buffer, rng, depth, max_depth,
      shadow_samples, occlusion_samples, occlusion_distance,
      shadow_trace_time: Duration::ZERO
    }
  }

  /// Traces a single any-hit shadow ray from `origin` toward `direction`,
  /// never reporting occlusion past `max_distance` — a finite light's own
  /// distance, so that an occluder sitting behind it does not count.
  /// Returns `true` if occluded.
  pub fn trace_shadow( &mut self, origin : Vec3, direction : Vec3, max_distance : f32, _scene : &Scene ) -> bool {
    let ray = crate::math::Ray::new( origin, direction );
    let bound = ( max_distance - 1e-3 ).max( 0.0 );
    let start = Instant::now( );
    let hit = self.tree.intersect_bounded( &ray, true, bound, self.stack ).is_some( );
    self.shadow_trace_time += start.elapsed( );
    hit
  }

  /// Casts `sample_count` cosine-weighted hemisphere rays from `point`
  /// around `normal`, out to `max_distance`, and returns the unoccluded
  /// fraction (1.0 = fully open, 0.0 = fully occluded). Used to modulate the
  /// ambient term of a material by how enclosed a point is (§4.8's
  /// "reflection, refraction, AO" secondary rays) — folds its timing into
  /// `shadow_trace_time` alongside light shadow rays, both being any-hit
  /// traversals.
  pub fn ambient_occlusion( &mut self, point : Vec3, normal : Vec3, sample_count : u32, max_distance : f32 ) -> f32 {
    if sample_count == 0 {
      return 1.0;
    }
    let onb = Onb::from_normal( normal );
    let origin = point + normal * 1e-3;
    let mut occluded = 0u32;
    for _ in 0 .. sample_count {
      let u = Vec2::new( self.rng.next( ), self.rng.next( ) );
      let dir = onb.to_world( sampling::cosine_hemisphere( u ) );
      let ray = crate::math::Ray::new( origin, dir );
      let start = Instant::now( );
      let hit = self.tree.intersect_bounded( &ray, true, max_distance, self.stack ).is_some( );
      self.shadow_trace_time += start.elapsed( );
      if hit {
        occluded += 1;
      }
    }
    1.0 - occluded as f32 / sample_count as f32
  }

  /// Queues a secondary ray at `self.depth + 1`, scaled by `weight`. Dropped
  /// silently past `max_depth` (§7's at-most-`maxDepth` policy).
  pub fn push_secondary( &mut self, ray : crate::math::Ray, weight : f32 ) {
    if self.depth + 1 > self.max_depth {
      return;
    }
    self.ray_buffer.push( ray, weight, self.depth + 1 );
  }
}
