use crate::math::Ray;
use crate::scene::Color;

/// A ray queued by a shader to be traced later this block, tagged with the
/// weight its contribution should be scaled by and how deep in the
/// recursion it sits.
#[derive(Clone, Copy)]
pub struct QueuedRay {
  pub ray    : Ray,
  pub weight : f32,
  pub depth  : u32
}

/// A single-owner FIFO of deferred rays, used to decouple shading from
/// traversal (§4.5). Not thread-safe — one `RayBuffer` per worker. Grows by
/// doubling; never shrinks.
///
/// The teacher has no equivalent (`tracer.rs` recurses directly instead of
/// queueing secondary rays), so this is modeled directly on SPEC_FULL.md
/// §4.5 using the same `Vec`-backed ring idiom as the teacher's
/// `data/stack.rs`.
pub struct RayBuffer {
  data  : Vec< QueuedRay >,
  head  : usize
}

impl RayBuffer {
  pub fn new( ) -> RayBuffer {
    RayBuffer { data: Vec::with_capacity( 16 ), head: 0 }
  }

  pub fn push( &mut self, ray : Ray, weight : f32, depth : u32 ) {
    self.data.push( QueuedRay { ray, weight, depth } );
  }

  pub fn pop( &mut self ) -> Option< QueuedRay > {
    if self.head < self.data.len( ) {
      let v = self.data[ self.head ];
      self.head += 1;
      if self.head == self.data.len( ) {
        self.data.clear( );
        self.head = 0;
      }
      Some( v )
    } else {
      None
    }
  }

  pub fn is_empty( &self ) -> bool {
    self.head >= self.data.len( )
  }

  pub fn len( &self ) -> usize {
    self.data.len( ) - self.head
  }

  pub fn capacity( &self ) -> usize {
    self.data.capacity( )
  }
}

impl Default for RayBuffer {
  fn default( ) -> RayBuffer { RayBuffer::new( ) }
}

/// Drains `buffer` by repeatedly shading each queued ray via `shade`. `shade`
/// may itself push more rays into the same buffer (e.g. a second bounce);
/// those are drained in turn before this call returns. Returns the summed,
/// weighted color contribution.
pub fn drain_with< F >( buffer : &mut RayBuffer, mut shade : F ) -> Color
where F : FnMut( &mut RayBuffer, QueuedRay ) -> Color {
  let mut total = Color::BLACK;
  while let Some( queued ) = buffer.pop( ) {
    total += shade( buffer, queued ) * queued.weight;
  }
  total
}
