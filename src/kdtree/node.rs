/// One 8-byte KD-tree node record.
///
/// `offset` packs two things depending on the node kind:
/// - **Leaf** (bit 31 of `offset` set): the remaining 31 bits hold the
///   index of the first setup triangle belonging to this leaf in the
///   tree's triangle buffer; `payload` holds the triangle count.
/// - **Inner** (bit 31 clear): the low 2 bits of `offset` hold the split
///   axis (0=x,1=y,2=z); the remaining bits hold the index of the *left*
///   child in the node array — the right child is always `left + 1` because
///   children of an inner node are stored adjacently.
///
/// `payload` is a leaf triangle count (`u32`) or an inner split distance
/// (`f32`), aliased via `union`-like reinterpretation through
/// `f32::to_bits`/`from_bits` (kept explicit rather than an actual `union`
/// so the type stays `Copy` + safe without `unsafe`).
#[derive(Copy, Clone, Debug)]
pub struct KdNode {
  offset  : u32,
  payload : u32
}

const LEAF_BIT : u32 = 1 << 31;
const AXIS_MASK : u32 = 0b11;

impl KdNode {
  pub fn new_leaf( first_triangle : u32, count : u32 ) -> KdNode {
    KdNode { offset: LEAF_BIT | first_triangle, payload: count }
  }

  pub fn new_inner( axis : usize, left_child : u32, split_dist : f32 ) -> KdNode {
    debug_assert!( left_child & AXIS_MASK == 0, "left child index must leave the low 2 bits free" );
    KdNode { offset: left_child | ( axis as u32 & AXIS_MASK ), payload: split_dist.to_bits( ) }
  }

  pub fn is_leaf( &self ) -> bool {
    self.offset & LEAF_BIT != 0
  }

  pub fn leaf_first_triangle( &self ) -> u32 {
    debug_assert!( self.is_leaf( ) );
    self.offset & !LEAF_BIT
  }

  pub fn leaf_count( &self ) -> u32 {
    debug_assert!( self.is_leaf( ) );
    self.payload
  }

  pub fn axis( &self ) -> usize {
    debug_assert!( !self.is_leaf( ) );
    ( self.offset & AXIS_MASK ) as usize
  }

  pub fn split_dist( &self ) -> f32 {
    debug_assert!( !self.is_leaf( ) );
    f32::from_bits( self.payload )
  }

  pub fn left_child( &self ) -> u32 {
    debug_assert!( !self.is_leaf( ) );
    self.offset & !AXIS_MASK
  }

  pub fn right_child( &self ) -> u32 {
    self.left_child( ) + 1
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn leaf_round_trips_first_and_count( ) {
    let n = KdNode::new_leaf( 17, 3 );
    assert!( n.is_leaf( ) );
    assert_eq!( n.leaf_first_triangle( ), 17 );
    assert_eq!( n.leaf_count( ), 3 );
  }

  #[test]
  fn inner_round_trips_axis_and_split( ) {
    let n = KdNode::new_inner( 2, 8, 4.5 );
    assert!( !n.is_leaf( ) );
    assert_eq!( n.axis( ), 2 );
    assert_eq!( n.left_child( ), 8 );
    assert_eq!( n.right_child( ), 9 );
    assert!( ( n.split_dist( ) - 4.5 ).abs( ) < 1e-6 );
  }

  #[test]
  fn node_is_8_bytes( ) {
    assert_eq!( std::mem::size_of::< KdNode >( ), 8 );
  }
}
