use crate::math::{Rng, Vec2, Vec3};

/// Returns `count*count` jittered samples within the unit square, one per
/// stratification cell, matching the renderer's `S x S` block sampling
/// (§4.8). Grounded on the teacher's `RandomSamplingStrategy`, generalized
/// from pixel-grid jitter to a reusable stratified-square sampler.
pub fn jittered_square( count : usize, rng : &mut Rng ) -> Vec< Vec2 > {
  let mut samples = Vec::with_capacity( count * count );
  let inv = 1.0 / count as f32;
  for p in 0..count {
    for q in 0..count {
      let ( u, v ) = rng.next2( );
      samples.push( Vec2::new( ( p as f32 + u ) * inv, ( q as f32 + v ) * inv ) );
    }
  }
  samples
}

/// Maps a uniform 2D sample to a point on the unit disk (concentric mapping).
pub fn uniform_disk( u : Vec2 ) -> Vec2 {
  let ox = 2.0 * u.x - 1.0;
  let oy = 2.0 * u.y - 1.0;
  if ox == 0.0 && oy == 0.0 {
    return Vec2::ZERO;
  }
  let ( r, theta ) = if ox.abs( ) > oy.abs( ) {
    ( ox, std::f32::consts::FRAC_PI_4 * ( oy / ox ) )
  } else {
    ( oy, std::f32::consts::FRAC_PI_2 - std::f32::consts::FRAC_PI_4 * ( ox / oy ) )
  };
  Vec2::new( r * theta.cos( ), r * theta.sin( ) )
}

/// Maps a uniform 2D sample to a cosine-weighted direction on the hemisphere
/// around `+z` in a local frame.
pub fn cosine_hemisphere( u : Vec2 ) -> Vec3 {
  let d = uniform_disk( u );
  let z = ( 1.0 - d.x * d.x - d.y * d.y ).max( 0.0 ).sqrt( );
  Vec3::new( d.x, d.y, z )
}

/// An orthonormal basis built from a single unit normal, used to transform a
/// locally-sampled direction (e.g. from `cosine_hemisphere`) into world
/// space.
pub struct Onb {
  pub tangent   : Vec3,
  pub bitangent : Vec3,
  pub normal    : Vec3
}

impl Onb {
  pub fn from_normal( n : Vec3 ) -> Onb {
    let a = if n.x.abs( ) > 0.9 { Vec3::new( 0.0, 1.0, 0.0 ) } else { Vec3::new( 1.0, 0.0, 0.0 ) };
    let tangent = a.cross( n ).normalize( );
    let bitangent = n.cross( tangent );
    Onb { tangent, bitangent, normal: n }
  }

  pub fn to_world( &self, v : Vec3 ) -> Vec3 {
    v.x * self.tangent + v.y * self.bitangent + v.z * self.normal
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn jittered_square_covers_every_cell_once( ) {
    let mut rng = Rng::new( 1 );
    let samples = jittered_square( 4, &mut rng );
    assert_eq!( samples.len( ), 16 );
    for s in &samples {
      assert!( s.x >= 0.0 && s.x <= 1.0 );
      assert!( s.y >= 0.0 && s.y <= 1.0 );
    }
  }

  #[test]
  fn cosine_hemisphere_stays_on_positive_z_side( ) {
    let mut rng = Rng::new( 2 );
    for _ in 0..100 {
      let u = Vec2::new( rng.next( ), rng.next( ) );
      let d = cosine_hemisphere( u );
      assert!( d.z >= 0.0 );
      assert!( ( d.len_sq( ) - 1.0 ).abs( ) < 1e-4 );
    }
  }

  #[test]
  fn onb_normal_maps_to_itself( ) {
    let n = Vec3::new( 0.0, 0.0, 1.0 ).normalize( );
    let onb = Onb::from_normal( n );
    let world = onb.to_world( Vec3::new( 0.0, 0.0, 1.0 ) );
    assert!( ( world - n ).len( ) < 1e-5 );
  }
}
