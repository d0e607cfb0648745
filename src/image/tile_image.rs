/// Tile dimensions (pixels per side of a square tile). Chosen so that a
/// tile's backing data for `C=4, f32` pixels (32*32*4*4 = 16KiB) spans a
/// convenient number of cache lines; kept a compile-time constant so the
/// tile-index arithmetic in `pixel_offset` reduces to shifts and masks.
pub const TILE_SIZE : usize = 32;

/// A 2D grid of pixels with `C` components each, stored tile-major (then
/// scanline-within-tile) so that a block-parallel renderer working one tile
/// at a time touches contiguous memory.
///
/// Grounded on the teacher's `render_target.rs`, which stored pixels in
/// plain scanline order; this generalizes that into same tiled layout the
/// block scheduler (`render::scheduler`) already partitions work by, and
/// parameterizes the pixel type/component count instead of hardcoding an
/// RGB `Vec3`.
pub struct Image< T, const C : usize > {
  width  : usize,
  height : usize,
  tiles_x : usize,
  data   : Vec< T >
}

impl< T : Copy + Default, const C : usize > Image< T, C > {
  pub fn new( width : usize, height : usize ) -> Image< T, C > {
    let tiles_x = ( width + TILE_SIZE - 1 ) / TILE_SIZE;
    let tiles_y = ( height + TILE_SIZE - 1 ) / TILE_SIZE;
    let data = vec![ T::default( ); tiles_x * tiles_y * TILE_SIZE * TILE_SIZE * C ];
    Image { width, height, tiles_x, data }
  }

  pub fn width( &self ) -> usize { self.width }
  pub fn height( &self ) -> usize { self.height }

  fn pixel_offset( &self, x : usize, y : usize ) -> usize {
    debug_assert!( x < self.width && y < self.height );
    let tx = x / TILE_SIZE;
    let ty = y / TILE_SIZE;
    let ox = x % TILE_SIZE;
    let oy = y % TILE_SIZE;
    let tile_index = ty * self.tiles_x + tx;
    let within_tile = oy * TILE_SIZE + ox;
    ( tile_index * TILE_SIZE * TILE_SIZE + within_tile ) * C
  }

  pub fn get_pixel( &self, x : usize, y : usize ) -> [ T; C ] {
    let off = self.pixel_offset( x, y );
    let mut out = [ T::default( ); C ];
    out.copy_from_slice( &self.data[ off .. off + C ] );
    out
  }

  pub fn set_pixel( &mut self, x : usize, y : usize, value : [ T; C ] ) {
    let off = self.pixel_offset( x, y );
    self.data[ off .. off + C ].copy_from_slice( &value );
  }

  /// Copies every pixel into `out`, in scanline-major row order, `C`
  /// components per pixel.
  pub fn get_pixels( &self, out : &mut [ T ] ) {
    debug_assert_eq!( out.len( ), self.width * self.height * C );
    for y in 0 .. self.height {
      for x in 0 .. self.width {
        let p = self.get_pixel( x, y );
        let base = ( y * self.width + x ) * C;
        out[ base .. base + C ].copy_from_slice( &p );
      }
    }
  }

  /// Loads every pixel from `data`, in scanline-major row order, `C`
  /// components per pixel.
  pub fn set_pixels( &mut self, data : &[ T ] ) {
    debug_assert_eq!( data.len( ), self.width * self.height * C );
    for y in 0 .. self.height {
      for x in 0 .. self.width {
        let base = ( y * self.width + x ) * C;
        let mut p = [ T::default( ); C ];
        p.copy_from_slice( &data[ base .. base + C ] );
        self.set_pixel( x, y, p );
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn get_set_round_trips_a_single_pixel( ) {
    let mut img : Image< f32, 4 > = Image::new( 64, 48 );
    img.set_pixel( 10, 20, [ 0.1, 0.2, 0.3, 1.0 ] );
    assert_eq!( img.get_pixel( 10, 20 ), [ 0.1, 0.2, 0.3, 1.0 ] );
  }

  #[test]
  fn corner_pixel_at_width_minus_one_is_addressable( ) {
    let mut img : Image< f32, 3 > = Image::new( 33, 33 ); // spans two tiles per axis
    img.set_pixel( 32, 32, [ 1.0, 1.0, 1.0 ] );
    assert_eq!( img.get_pixel( 32, 32 ), [ 1.0, 1.0, 1.0 ] );
  }

  #[test]
  fn bulk_round_trip_matches_input( ) {
    let mut img : Image< f32, 1 > = Image::new( 8, 8 );
    let data : Vec< f32 > = ( 0 .. 64 ).map( | i | i as f32 ).collect( );
    img.set_pixels( &data );
    let mut out = vec![ 0.0_f32; 64 ];
    img.get_pixels( &mut out );
    assert_eq!( data, out );
  }
}
