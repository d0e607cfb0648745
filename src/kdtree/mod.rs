mod node;
mod build;
pub( crate ) mod traverse;
mod stats;

pub use node::KdNode;
pub use build::{build, KdBuildSettings, PlanarMode};
pub use stats::KdTreeStats;
pub use traverse::TraversalStack;

use crate::math::Aabb;
use crate::triangle::SetupTriangle;

/// An immutable KD-tree accelerator: a flat node array plus the triangle
/// buffer it indexes into. Built once by `kdtree::build`, then queried
/// read-only by every render worker.
pub struct KdTree {
  pub root      : u32,
  pub bounds    : Aabb,
  pub nodes     : Vec< KdNode >,
  pub triangles : Vec< SetupTriangle >
}

impl KdTree {
  pub fn leaf_triangles( &self, node : &KdNode ) -> &[ SetupTriangle ] {
    let first = node.leaf_first_triangle( ) as usize;
    let count = node.leaf_count( ) as usize;
    &self.triangles[ first .. first + count ]
  }

  /// The maximum depth actually reached, used to size each worker's
  /// preallocated traversal stack.
  pub fn max_depth( &self ) -> u32 {
    self.depth_of( self.root, 0 )
  }

  fn depth_of( &self, idx : u32, depth : u32 ) -> u32 {
    let node = &self.nodes[ idx as usize ];
    if node.is_leaf( ) {
      depth
    } else {
      self.depth_of( node.left_child( ), depth + 1 ).max( self.depth_of( node.right_child( ), depth + 1 ) )
    }
  }

  pub fn stats( &self ) -> KdTreeStats {
    stats::compute( self )
  }
}
