use crate::kdtree::{KdNode, KdTree};
use crate::math::Aabb;
use crate::triangle::{SetupTriangle, Triangle};

/// SAH cost model constants, overridable by the caller's `KdBuildSettings`.
#[derive(Copy, Clone, Debug)]
pub struct KdBuildSettings {
  pub k_traversal : f32,
  pub k_intersect : f32,
  pub max_depth   : u32,
  pub min_triangles : u32,
  pub planar_mode : PlanarMode
}

impl Default for KdBuildSettings {
  fn default( ) -> KdBuildSettings {
    KdBuildSettings {
      k_traversal: 1.0,
      k_intersect: 1.0,
      max_depth: 23,
      min_triangles: 4,
      planar_mode: PlanarMode::Both
    }
  }
}

/// How in-plane ("planar") triangles are assigned when a split lands exactly
/// on their flattened extent. `Both` is the spec's accepted default (no
/// perfect-split clipping is performed, so a straddling triangle is simply
/// placed in both children); `Left`/`Right` are available for callers who
/// want the classic SAH event-sweep planar-side behavior without the
/// duplication.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlanarMode {
  Left,
  Right,
  Both
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
  End    = 0,
  Planar = 1,
  Begin  = 2
}

#[derive(Copy, Clone)]
struct Event {
  pos   : f32,
  kind  : EventKind,
  tri   : u32
}

/// An in-progress build-tree node: a pointer-linked arena representation
/// that is easier to construct top-down than the finalized flat array.
/// Collapsed into `KdNode`s by `finalize` in a single depth-first pass.
enum BuildNode {
  Leaf { triangles : Vec< u32 > },
  Inner { axis : usize, split : f32, left : Box< BuildNode >, right : Box< BuildNode > }
}

/// Builds a KD-tree over `triangles` using the Surface Area Heuristic.
///
/// The build recursion is expressed as `rayon::join` fork-join: independent
/// subtrees are built on separate tasks in the global thread pool, forming
/// the "work queue" called for in the distilled spec without a hand-rolled
/// mutex-guarded queue — `rayon::join`'s structural fork/join already
/// provides that queue.
pub fn build( triangles : &[ Triangle ], settings : &KdBuildSettings ) -> KdTree {
  let bounds = triangles.iter( ).fold( Aabb::EMPTY, | acc, t | acc.join( &t.aabb( ) ) );
  let setup : Vec< SetupTriangle > = triangles.iter( ).map( | t | t.to_setup( ) ).collect( );
  let indices : Vec< u32 > = ( 0 .. triangles.len( ) as u32 ).collect( );

  let bboxes : Vec< Aabb > = triangles.iter( ).map( | t | t.aabb( ) ).collect( );

  let build_tree = build_node( &bboxes, indices, bounds, 0, settings );

  let mut nodes = Vec::new( );
  let mut ordered_triangles = Vec::new( );
  let root = finalize( &build_tree, &setup, &mut nodes, &mut ordered_triangles );

  let tree = KdTree { root, bounds, nodes, triangles: ordered_triangles };
  crate::kdtree::stats::log_build_stats( &tree.stats( ) );
  tree
}

fn build_node( bboxes : &[ Aabb ], indices : Vec< u32 >, bounds : Aabb, depth : u32, settings : &KdBuildSettings ) -> BuildNode {
  if depth >= settings.max_depth || indices.len( ) <= settings.min_triangles as usize {
    return BuildNode::Leaf { triangles: indices };
  }

  match find_best_split( bboxes, &indices, &bounds, settings ) {
    None => BuildNode::Leaf { triangles: indices },
    Some( ( axis, pos, planar_left ) ) => {
      let ( left_bounds, right_bounds ) = bounds.split( axis, pos );

      let mut left_idx = Vec::new( );
      let mut right_idx = Vec::new( );
      for &i in &indices {
        let b = bboxes[ i as usize ];
        let min_a = b.min_axis( axis );
        let max_a = b.max_axis( axis );
        if max_a < pos || ( max_a == pos && planar_left ) {
          left_idx.push( i );
        } else if min_a > pos || ( min_a == pos && !planar_left ) {
          right_idx.push( i );
        } else {
          left_idx.push( i );
          right_idx.push( i );
        }
      }

      // a split that fails to separate anything degenerates to a leaf
      if left_idx.len( ) == indices.len( ) || right_idx.len( ) == indices.len( ) {
        return BuildNode::Leaf { triangles: indices };
      }

      let ( left, right ) =
        if indices.len( ) > 4096 {
          rayon::join(
            || build_node( bboxes, left_idx, left_bounds, depth + 1, settings ),
            || build_node( bboxes, right_idx, right_bounds, depth + 1, settings )
          )
        } else {
          (
            build_node( bboxes, left_idx, left_bounds, depth + 1, settings ),
            build_node( bboxes, right_idx, right_bounds, depth + 1, settings )
          )
        };

      BuildNode::Inner { axis, split: pos, left: Box::new( left ), right: Box::new( right ) }
    }
  }
}

/// Runs the SAH event sweep described in SPEC_FULL.md §4.3 for all three
/// axes and returns the best `(axis, position, planar_triangles_go_left)`,
/// or `None` if no split beats leaving everything in a leaf.
fn find_best_split( bboxes : &[ Aabb ], indices : &[ u32 ], bounds : &Aabb, settings : &KdBuildSettings ) -> Option< ( usize, f32, bool ) > {
  let n = indices.len( ) as f32;
  let leaf_cost = settings.k_intersect * n;
  let sa_v = bounds.surface_area( );
  if sa_v <= 0.0 {
    return None;
  }

  let mut best : Option< ( f32, usize, f32, bool ) > = None;

  for axis in 0..3 {
    let mut events = Vec::with_capacity( indices.len( ) * 2 );
    for &i in indices {
      let b = bboxes[ i as usize ];
      let lo = b.min_axis( axis );
      let hi = b.max_axis( axis );
      if lo == hi {
        events.push( Event { pos: lo, kind: EventKind::Planar, tri: i } );
      } else {
        events.push( Event { pos: lo, kind: EventKind::Begin, tri: i } );
        events.push( Event { pos: hi, kind: EventKind::End, tri: i } );
      }
    }
    events.sort_by( | a, b | a.pos.partial_cmp( &b.pos ).unwrap( ).then( a.kind.cmp( &b.kind ) ) );

    let mut n_left : u32 = 0;
    let mut n_right : u32 = indices.len( ) as u32;

    let mut i = 0;
    while i < events.len( ) {
      let pos = events[ i ].pos;
      let mut n_ending = 0;
      let mut n_planar = 0;
      let mut n_starting = 0;

      while i < events.len( ) && events[ i ].pos == pos && events[ i ].kind == EventKind::End {
        n_ending += 1; i += 1;
      }
      while i < events.len( ) && events[ i ].pos == pos && events[ i ].kind == EventKind::Planar {
        n_planar += 1; i += 1;
      }
      while i < events.len( ) && events[ i ].pos == pos && events[ i ].kind == EventKind::Begin {
        n_starting += 1; i += 1;
      }

      n_right -= n_ending;
      n_right -= n_planar;

      if pos > bounds.min_axis( axis ) && pos < bounds.max_axis( axis ) {
        let ( sa_l, sa_r ) = split_surface_areas( bounds, axis, pos );
        let cost_left = sah_cost( settings, sa_l, sa_r, sa_v, n_left + n_planar, n_right );
        let cost_right = sah_cost( settings, sa_l, sa_r, sa_v, n_left, n_right + n_planar );

        let ( cost, planar_left ) = if cost_left <= cost_right { ( cost_left, true ) } else { ( cost_right, false ) };

        if best.is_none( ) || cost < best.unwrap( ).0 {
          best = Some( ( cost, axis, pos, planar_left ) );
        }
      }

      n_left += n_planar;
      n_left += n_starting;
    }
  }

  best.and_then( | ( cost, axis, pos, planar_left ) | {
    if cost < leaf_cost { Some( ( axis, pos, planar_left ) ) } else { None }
  } )
}

fn split_surface_areas( bounds : &Aabb, axis : usize, pos : f32 ) -> ( f32, f32 ) {
  let ( left, right ) = bounds.split( axis, pos );
  ( left.surface_area( ), right.surface_area( ) )
}

fn sah_cost( settings : &KdBuildSettings, sa_l : f32, sa_r : f32, sa_v : f32, n_l : u32, n_r : u32 ) -> f32 {
  let p_l = sa_l / sa_v;
  let p_r = sa_r / sa_v;
  let empty_bonus = if n_l == 0 || n_r == 0 { 0.8 } else { 1.0 };
  empty_bonus * ( settings.k_traversal + settings.k_intersect * ( p_l * n_l as f32 + p_r * n_r as f32 ) )
}

/// Finalizes the arena build-tree into the flat node array, depth-first.
/// Returns the index this (sub)tree's root node ends up at.
///
/// For an inner node, the two children's slots are reserved *before*
/// either subtree is recursively finalized (which may itself append many
/// descendants) — that is what guarantees "children of an inner node are
/// stored adjacently" regardless of how large either subtree turns out to
/// be.
fn finalize( node : &BuildNode, setup : &[ SetupTriangle ], nodes : &mut Vec< KdNode >, ordered_triangles : &mut Vec< SetupTriangle > ) -> u32 {
  let slot = nodes.len( ) as u32;
  nodes.push( KdNode::new_leaf( 0, 0 ) ); // placeholder, overwritten by finalize_into
  finalize_into( node, setup, nodes, ordered_triangles, slot );
  slot
}

/// Fills the already-reserved `slot` with `node`'s finalized record. For an
/// inner node, both children's slots are reserved up front (before either
/// subtree is recursed into), which is what keeps them adjacent regardless
/// of how large either subtree turns out to be.
fn finalize_into( node : &BuildNode, setup : &[ SetupTriangle ], nodes : &mut Vec< KdNode >, ordered_triangles : &mut Vec< SetupTriangle >, slot : u32 ) {
  match node {
    BuildNode::Leaf { triangles } => {
      let first = ordered_triangles.len( ) as u32;
      for &i in triangles {
        ordered_triangles.push( setup[ i as usize ] );
      }
      nodes[ slot as usize ] = KdNode::new_leaf( first, triangles.len( ) as u32 );
    }
    BuildNode::Inner { axis, split, left, right } => {
      let left_slot = nodes.len( ) as u32;
      nodes.push( KdNode::new_leaf( 0, 0 ) );
      nodes.push( KdNode::new_leaf( 0, 0 ) );
      nodes[ slot as usize ] = KdNode::new_inner( *axis, left_slot, *split );
      finalize_into( left, setup, nodes, ordered_triangles, left_slot );
      finalize_into( right, setup, nodes, ordered_triangles, left_slot + 1 );
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::math::Vec2;
  use crate::triangle::Vertex;

  fn axial_triangle( cx : f32, cy : f32, cz : f32 ) -> Triangle {
    let v = | dx : f32, dy : f32 | Vertex::new(
      Vec3::new( cx + dx, cy + dy, cz ),
      Vec3::new( 0.0, 0.0, 1.0 ),
      Vec3::new( 1.0, 0.0, 0.0 ),
      Vec2::ZERO
    );
    Triangle::new( v( 0.0, 0.0 ), v( 0.1, 0.0 ), v( 0.0, 0.1 ), 0, 0 )
  }

  /// Ten triangles clustered at x<0, ten at x>0, inside a box centered on
  /// the origin: the root split must land on axis X near x=0 with both
  /// child counts equal to 10 (spec §8 scenario 5).
  #[test]
  fn sah_splits_two_clusters_on_the_separating_axis( ) {
    let mut triangles = Vec::new( );
    for i in 0..10 {
      triangles.push( axial_triangle( -5.0 - i as f32 * 0.2, 0.0, 0.0 ) );
    }
    for i in 0..10 {
      triangles.push( axial_triangle( 5.0 + i as f32 * 0.2, 0.0, 0.0 ) );
    }
    for ( idx, t ) in triangles.iter_mut( ).enumerate( ) {
      t.triangle_id = idx as u32;
    }

    let settings = KdBuildSettings { min_triangles: 10, ..KdBuildSettings::default( ) };
    let tree = build( &triangles, &settings );
    let root = &tree.nodes[ tree.root as usize ];
    assert!( !root.is_leaf( ), "root should split rather than become a single leaf" );
    assert_eq!( root.axis( ), 0, "split axis should be X, the separating axis" );
    assert!( root.split_dist( ).abs( ) < 1.0, "split position should land between the two clusters" );

    let left = &tree.nodes[ root.left_child( ) as usize ];
    let right = &tree.nodes[ root.right_child( ) as usize ];
    assert!( left.is_leaf( ) && right.is_leaf( ), "clusters of min_triangles size should each bottom out as a leaf" );
    assert_eq!( left.leaf_count( ), 10 );
    assert_eq!( right.leaf_count( ), 10 );
  }

  #[test]
  fn every_triangle_is_reachable_and_leaf_ranges_stay_in_bounds( ) {
    let mut rng = crate::math::Rng::new( 7 );
    let mut triangles = Vec::new( );
    for i in 0..300 {
      let base = Vec3::new( rng.next( ) * 10.0 - 5.0, rng.next( ) * 10.0 - 5.0, rng.next( ) * 10.0 - 5.0 );
      let v = | dx : f32, dy : f32, dz : f32 | Vertex::new( base + Vec3::new( dx, dy, dz ), Vec3::new( 0.0, 0.0, 1.0 ), Vec3::new( 1.0, 0.0, 0.0 ), Vec2::ZERO );
      triangles.push( Triangle::new( v( 0.0, 0.0, 0.0 ), v( 0.3, 0.0, 0.0 ), v( 0.0, 0.3, 0.1 ), i, 0 ) );
    }

    let tree = build( &triangles, &KdBuildSettings::default( ) );

    let mut seen = vec![ false; triangles.len( ) ];
    for node in &tree.nodes {
      if node.is_leaf( ) {
        let first = node.leaf_first_triangle( ) as usize;
        let count = node.leaf_count( ) as usize;
        assert!( first + count <= tree.triangles.len( ), "leaf range must stay within the triangle buffer" );
        for st in &tree.triangles[ first .. first + count ] {
          seen[ st.triangle_id as usize ] = true;
        }
      }
    }
    assert!( seen.iter( ).all( | &s | s ), "every input triangle must be reachable from some leaf" );
  }

  #[test]
  fn single_triangle_below_min_count_becomes_a_leaf( ) {
    let triangles = vec![ axial_triangle( 0.0, 0.0, 0.0 ) ];
    let tree = build( &triangles, &KdBuildSettings::default( ) );
    assert!( tree.nodes[ tree.root as usize ].is_leaf( ) );
    assert_eq!( tree.nodes[ tree.root as usize ].leaf_count( ), 1 );
  }
}
