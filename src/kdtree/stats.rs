use crate::kdtree::KdTree;

/// Build-time diagnostics reported via `log::debug!` after a build
/// completes. Grounded on the teacher's progress reporting in `tracer.rs`
/// (there emitted with `println!`; this crate routes it through `log`).
#[derive(Debug, Default, Clone, Copy)]
pub struct KdTreeStats {
  pub node_count     : usize,
  pub leaf_count     : usize,
  pub internal_count : usize,
  pub empty_leaf_count : usize,
  pub max_leaf_depth : u32,
  pub min_leaf_depth : u32,
  pub total_leaf_triangles : usize,
  pub approx_bytes   : usize
}

pub( crate ) fn compute( tree : &KdTree ) -> KdTreeStats {
  let mut stats = KdTreeStats {
    min_leaf_depth: u32::MAX,
    ..Default::default( )
  };
  walk( tree, tree.root, 0, &mut stats );
  if stats.leaf_count == 0 {
    stats.min_leaf_depth = 0;
  }
  stats.node_count = tree.nodes.len( );
  stats.approx_bytes =
    tree.nodes.len( ) * std::mem::size_of::< crate::kdtree::KdNode >( ) +
    tree.triangles.len( ) * std::mem::size_of::< crate::triangle::SetupTriangle >( );
  stats
}

fn walk( tree : &KdTree, idx : u32, depth : u32, stats : &mut KdTreeStats ) {
  let node = &tree.nodes[ idx as usize ];
  if node.is_leaf( ) {
    stats.leaf_count += 1;
    stats.max_leaf_depth = stats.max_leaf_depth.max( depth );
    stats.min_leaf_depth = stats.min_leaf_depth.min( depth );
    let count = node.leaf_count( ) as usize;
    stats.total_leaf_triangles += count;
    if count == 0 {
      stats.empty_leaf_count += 1;
    }
  } else {
    stats.internal_count += 1;
    walk( tree, node.left_child( ), depth + 1, stats );
    walk( tree, node.right_child( ), depth + 1, stats );
  }
}

pub fn log_build_stats( stats : &KdTreeStats ) {
  log::debug!(
    "kd-tree build: {} nodes ({} leaves, {} internal), leaf depth {}..{}, {} triangles, ~{} bytes",
    stats.node_count, stats.leaf_count, stats.internal_count,
    stats.min_leaf_depth, stats.max_leaf_depth,
    stats.total_leaf_triangles, stats.approx_bytes
  );
  if stats.empty_leaf_count > 0 {
    log::warn!( "kd-tree build produced {} empty leaves", stats.empty_leaf_count );
  }
}
