use crate::kdtree::KdTree;
use crate::math::Ray;
use crate::scene::Collision;
use crate::triangle::setup::intersect_range;

/// A per-thread preallocated stack of deferred far-subtrees, reused across
/// every ray a worker traces. Sized once from `tree.max_depth()` so
/// traversal never reallocates; grounded on the teacher's `data/stack.rs`
/// fixed-capacity stack idiom.
pub struct TraversalStack {
  frames : Vec< StackFrame >
}

#[derive(Copy, Clone)]
struct StackFrame {
  node  : u32,
  t_min : f32,
  t_max : f32
}

impl TraversalStack {
  pub fn with_capacity( max_depth : u32 ) -> TraversalStack {
    TraversalStack { frames: Vec::with_capacity( max_depth as usize + 1 ) }
  }

  fn push( &mut self, node : u32, t_min : f32, t_max : f32 ) {
    self.frames.push( StackFrame { node, t_min, t_max } );
  }

  fn pop( &mut self ) -> Option< StackFrame > {
    self.frames.pop( )
  }

  fn clear( &mut self ) {
    self.frames.clear( );
  }
}

impl KdTree {
  /// Intersects `ray` against the tree. `any_hit` selects shadow-ray
  /// semantics (return on the first valid hit) versus primary/secondary-ray
  /// semantics (return the closest hit). Convenience wrapper over
  /// `intersect_bounded` for callers with no distance cap (primary and
  /// secondary rays).
  pub fn intersect( &self, ray : &Ray, any_hit : bool, stack : &mut TraversalStack ) -> Option< Collision > {
    self.intersect_bounded( ray, any_hit, f32::INFINITY, stack )
  }

  /// Intersects `ray` against the tree, never reporting a hit past
  /// `max_distance`. Used by shadow rays so an occluder *behind* the light
  /// does not count — the traversal interval is clamped to
  /// `[t_entry, min(t_exit, max_distance)]` up front.
  pub fn intersect_bounded( &self, ray : &Ray, any_hit : bool, max_distance : f32, stack : &mut TraversalStack ) -> Option< Collision > {
    let ( t_entry, t_exit ) = match self.bounds.intersect( ray ) {
      Some( v ) => v,
      None => return None
    };
    let t_entry = t_entry.max( 0.0 );
    let t_exit = t_exit.min( max_distance );
    if t_entry > t_exit {
      return None;
    }

    stack.clear( );
    stack.push( self.root, t_entry, t_exit );

    let mut best : Option< Collision > = None;

    while let Some( frame ) = stack.pop( ) {
      let mut node_idx = frame.node;
      let mut t_min = frame.t_min;
      let mut t_max = frame.t_max;

      loop {
        let node = &self.nodes[ node_idx as usize ];
        if node.is_leaf( ) {
          let triangles = self.leaf_triangles( node );
          let limit = best.map( | c | c.distance ).unwrap_or( f32::INFINITY );
          if let Some( hit ) = intersect_range( triangles, ray, any_hit, t_min, t_max.min( limit ) ) {
            if any_hit {
              return Some( hit );
            }
            best = Some( hit );
          }
          break;
        }

        let axis = node.axis( );
        let split = node.split_dist( );
        let o = ray.origin.axis( axis );
        let inv_d = ray.inv_direction.axis( axis );
        let t = ( split - o ) * inv_d;

        let ( near, far ) = if split - o > 0.0 {
          ( node.left_child( ), node.right_child( ) )
        } else {
          ( node.right_child( ), node.left_child( ) )
        };

        if t > t_max || t < 0.0 {
          node_idx = near;
        } else if t < t_min {
          node_idx = far;
        } else {
          stack.push( far, t, t_max );
          node_idx = near;
          t_max = t;
        }
      }
    }

    best
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::kdtree::{build, KdBuildSettings};
  use crate::math::{Vec2, Vec3};
  use crate::triangle::{Triangle, Vertex};

  fn quad( ) -> Vec< Triangle > {
    // two triangles forming a unit quad in the z=0 plane
    let v = | x : f32, y : f32 | Vertex::new( Vec3::new( x, y, 0.0 ), Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 1.0, 0.0, 0.0 ), Vec2::new( x, y ) );
    vec![
      Triangle::new( v( 0.0, 0.0 ), v( 1.0, 0.0 ), v( 1.0, 1.0 ), 0, 0 ),
      Triangle::new( v( 0.0, 0.0 ), v( 1.0, 1.0 ), v( 0.0, 1.0 ), 1, 0 )
    ]
  }

  #[test]
  fn traversal_hits_the_nearest_triangle( ) {
    let tris = quad( );
    let tree = build( &tris, &KdBuildSettings::default( ) );
    let mut stack = TraversalStack::with_capacity( tree.max_depth( ) );

    let r = Ray::new( Vec3::new( 0.25, 0.25, -5.0 ), Vec3::new( 0.0, 0.0, 1.0 ) );
    let hit = tree.intersect( &r, false, &mut stack ).unwrap( );
    assert!( ( hit.distance - 5.0 ).abs( ) < 1e-4 );
  }

  #[test]
  fn traversal_misses_outside_quad( ) {
    let tris = quad( );
    let tree = build( &tris, &KdBuildSettings::default( ) );
    let mut stack = TraversalStack::with_capacity( tree.max_depth( ) );

    let r = Ray::new( Vec3::new( 5.0, 5.0, -5.0 ), Vec3::new( 0.0, 0.0, 1.0 ) );
    assert!( tree.intersect( &r, false, &mut stack ).is_none( ) );
  }

  #[test]
  fn traversal_matches_brute_force_on_random_scene( ) {
    let mut rng = crate::math::Rng::new( 123 );
    let mut tris = Vec::new( );
    for i in 0..200 {
      let base = Vec3::new( rng.next( ) * 20.0 - 10.0, rng.next( ) * 20.0 - 10.0, rng.next( ) * 20.0 - 10.0 );
      let v = | dx : f32, dy : f32, dz : f32 | Vertex::new( base + Vec3::new( dx, dy, dz ), Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 1.0, 0.0, 0.0 ), Vec2::ZERO );
      tris.push( Triangle::new( v( 0.0, 0.0, 0.0 ), v( 1.0, 0.0, 0.0 ), v( 0.0, 1.0, 0.3 ), i, 0 ) );
    }

    let tree = build( &tris, &KdBuildSettings::default( ) );
    let mut stack = TraversalStack::with_capacity( tree.max_depth( ) );
    let setup : Vec< _ > = tris.iter( ).map( | t | t.to_setup( ) ).collect( );

    for _ in 0..50 {
      let origin = Vec3::new( rng.next( ) * 40.0 - 20.0, rng.next( ) * 40.0 - 20.0, -30.0 );
      let dir = Vec3::new( rng.next( ) * 0.4 - 0.2, rng.next( ) * 0.4 - 0.2, 1.0 ).normalize( );
      let r = Ray::new( origin, dir );

      let tree_hit = tree.intersect( &r, false, &mut stack );
      let brute_hit = intersect_range( &setup, &r, false, 0.0, f32::INFINITY );

      match ( tree_hit, brute_hit ) {
        ( None, None ) => { }
        ( Some( a ), Some( b ) ) => assert!( ( a.distance - b.distance ).abs( ) < 1e-3 ),
        other => panic!( "traversal disagreed with brute force: {:?}", other.0.map( | c | c.distance ) )
      }
    }
  }
}
