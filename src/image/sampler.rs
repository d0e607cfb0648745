use crate::image::Image;
use crate::math::{Vec2, Vec3};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Filter {
  Nearest,
  Bilinear
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Border {
  Clamp,
  Wrap,
  Mirror
}

/// Samples an `Image<f32, C>` at continuous `uv in [0,1]^2`, applying the
/// configured filter and border policy. Grounded on the teacher's
/// `graphics/texture.rs`/`graphics/sampling_strategy.rs` pair, generalized
/// from a single bilinear-clamped texture lookup into the full
/// filter x border product the spec requires.
#[derive(Copy, Clone, Debug)]
pub struct Sampler {
  pub filter : Filter,
  pub border : Border
}

impl Sampler {
  pub fn new( filter : Filter, border : Border ) -> Sampler {
    Sampler { filter, border }
  }

  fn resolve( &self, coord : i64, size : usize ) -> Option< usize > {
    let size_i = size as i64;
    match self.border {
      Border::Clamp => Some( coord.clamp( 0, size_i - 1 ) as usize ),
      Border::Wrap => Some( coord.rem_euclid( size_i ) as usize ),
      Border::Mirror => {
        if size_i <= 1 {
          return Some( 0 );
        }
        let period = 2 * size_i;
        let m = coord.rem_euclid( period );
        Some( if m < size_i { m as usize } else { ( period - 1 - m ) as usize } )
      }
    }
  }

  pub fn sample< const C : usize >( &self, image : &Image< f32, C >, uv : Vec2 ) -> [ f32; C ] {
    let fx = uv.x * ( image.width( ) as f32 - 1.0 );
    let fy = uv.y * ( image.height( ) as f32 - 1.0 );

    match self.filter {
      Filter::Nearest => {
        let x = self.resolve( fx.round( ) as i64, image.width( ) ).unwrap_or( 0 );
        let y = self.resolve( fy.round( ) as i64, image.height( ) ).unwrap_or( 0 );
        image.get_pixel( x, y )
      }
      Filter::Bilinear => {
        let fx0 = fx.floor( );
        let fy0 = fy.floor( );
        let du = fx - fx0;
        let dv = fy - fy0;

        let x0 = self.resolve( fx0 as i64, image.width( ) ).unwrap_or( 0 );
        let x1 = self.resolve( fx0 as i64 + 1, image.width( ) ).unwrap_or( x0 );
        let y0 = self.resolve( fy0 as i64, image.height( ) ).unwrap_or( 0 );
        let y1 = self.resolve( fy0 as i64 + 1, image.height( ) ).unwrap_or( y0 );

        let p00 = image.get_pixel( x0, y0 );
        let p10 = image.get_pixel( x1, y0 );
        let p01 = image.get_pixel( x0, y1 );
        let p11 = image.get_pixel( x1, y1 );

        let w00 = ( 1.0 - du ) * ( 1.0 - dv );
        let w10 = du * ( 1.0 - dv );
        let w01 = ( 1.0 - du ) * dv;
        let w11 = du * dv;

        let mut out = [ 0.0_f32; C ];
        for c in 0..C {
          out[ c ] = w00 * p00[ c ] + w10 * p10[ c ] + w01 * p01[ c ] + w11 * p11[ c ];
        }
        out
      }
    }
  }
}

/// Maps a unit direction vector to equirectangular `uv` for environment map
/// lookups.
pub fn direction_to_uv( d : Vec3 ) -> Vec2 {
  let u = ( d.z.atan2( d.x ) + std::f32::consts::PI ) / ( 2.0 * std::f32::consts::PI );
  let v = d.y.clamp( -1.0, 1.0 ).acos( ) / std::f32::consts::PI;
  Vec2::new( u, v )
}
