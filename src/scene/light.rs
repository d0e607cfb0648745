use crate::math::{sampling, Rng, Vec2, Vec3};
use crate::scene::Color;

/// A directional light: constant direction, as if from an infinitely
/// distant source. `angular_jitter` (radians) optionally perturbs the
/// sampled direction per shadow ray to produce soft shadows.
/// Grounded on `graphics/lights/directional.rs`.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
  pub direction      : Vec3,
  pub color          : Color,
  pub angular_jitter : f32
}

/// A point light with optional spherical area (`radius > 0`), inverse-square
/// `range` falloff, and an exponent controlling the falloff curve.
/// Grounded on `graphics/lights/point.rs` — the teacher's version there had
/// a broken constructor signature (`new` took a `Light` return type for a
/// bare struct); this rebuilds it correctly in the same idiom.
#[derive(Clone, Debug)]
pub struct PointLight {
  pub position : Vec3,
  pub color    : Color,
  pub radius   : f32,
  pub range    : f32,
  pub falloff  : f32
}

#[derive(Clone, Debug)]
pub enum Light {
  Directional( DirectionalLight ),
  Point( PointLight )
}

impl Light {
  pub fn directional( direction : Vec3, color : Color ) -> Light {
    Light::Directional( DirectionalLight { direction: direction.normalize( ), color, angular_jitter: 0.0 } )
  }

  pub fn directional_soft( direction : Vec3, color : Color, angular_jitter : f32 ) -> Light {
    Light::Directional( DirectionalLight { direction: direction.normalize( ), color, angular_jitter } )
  }

  pub fn point( position : Vec3, color : Color, range : f32, falloff : f32 ) -> Light {
    Light::Point( PointLight { position, color, radius: 0.0, range, falloff } )
  }

  pub fn point_area( position : Vec3, color : Color, radius : f32, range : f32, falloff : f32 ) -> Light {
    Light::Point( PointLight { position, color, radius, range, falloff } )
  }

  /// The canonical unit direction from `point` toward the light, used to
  /// evaluate `N·L` shading terms. For a point light this points at its
  /// center regardless of `radius` — per-sample jitter across the light's
  /// area is the concern of `sample_shadow_rays`, not this shading
  /// direction.
  pub fn sample_direction( &self, point : Vec3, rng : &mut Rng ) -> Vec3 {
    match self {
      Light::Directional( d ) => {
        if d.angular_jitter <= 0.0 {
          -d.direction
        } else {
          let jitter = Vec3::new(
            ( rng.next( ) - 0.5 ) * d.angular_jitter,
            ( rng.next( ) - 0.5 ) * d.angular_jitter,
            0.0
          );
          ( -d.direction + jitter ).normalize( )
        }
      }
      Light::Point( p ) => ( p.position - point ).normalize( )
    }
  }

  /// Appends `shadow_sample_count(n)` `(direction, max_distance)` shadow-ray
  /// targets toward this light from `point` to `out` (§3's
  /// `sample_shadow_rays`). An area point light (`radius > 0`) is sampled
  /// with `n*n` stratified points spread over its sphere, one per cell of
  /// `sampling::jittered_square`, producing soft shadows from multiple
  /// occlusion tests; every other light contributes exactly one target.
  ///
  /// `max_distance` is the distance from `point` to the sampled position so
  /// a caller can bound the shadow ray's `t_max` there — an occluder behind
  /// a finite light must not count as shadowing it. A directional light has
  /// no position to bound against, so its target carries `f32::INFINITY`.
  pub fn sample_shadow_rays( &self, point : Vec3, n : usize, rng : &mut Rng, out : &mut Vec< ( Vec3, f32 ) > ) {
    match self {
      Light::Directional( _ ) => {
        out.push( ( self.sample_direction( point, rng ), f32::INFINITY ) );
      }
      Light::Point( p ) if p.radius > 0.0 => {
        for cell in sampling::jittered_square( n.max( 1 ), rng ) {
          let sample_pos = p.position + p.radius * sphere_sample_from( cell );
          let delta = sample_pos - point;
          let dist = delta.len( ).max( 1e-6 );
          out.push( ( delta / dist, dist ) );
        }
      }
      Light::Point( p ) => {
        let delta = p.position - point;
        let dist = delta.len( ).max( 1e-6 );
        out.push( ( delta / dist, dist ) );
      }
    }
  }

  pub fn radiance( &self, point : Vec3 ) -> Color {
    match self {
      Light::Directional( d ) => d.color,
      Light::Point( p ) => {
        let dist = ( p.position - point ).len( ).max( 1e-4 );
        let atten = ( p.range / dist ).powf( p.falloff ).min( 1.0 );
        p.color * atten
      }
    }
  }

  pub fn casts_shadows( &self ) -> bool {
    true
  }

  /// Returns the number of independent shadow-ray samples a caller should
  /// take toward this light: `n*n` stratified samples for an area point
  /// light, one otherwise.
  pub fn shadow_sample_count( &self, n : usize ) -> usize {
    match self {
      Light::Point( p ) if p.radius > 0.0 => n * n,
      _ => 1
    }
  }
}

/// Maps a uniform 2D sample `u` to a point on the unit sphere.
fn sphere_sample_from( u : Vec2 ) -> Vec3 {
  let z = 1.0 - 2.0 * u.x;
  let r = ( 1.0 - z * z ).max( 0.0 ).sqrt( );
  let phi = 2.0 * std::f32::consts::PI * u.y;
  Vec3::new( r * phi.cos( ), r * phi.sin( ), z )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn directional_sample_direction_points_opposite_light_direction( ) {
    let light = Light::directional( Vec3::new( 0.0, -1.0, 0.0 ), Color::WHITE );
    let mut rng = Rng::new( 1 );
    let d = light.sample_direction( Vec3::ZERO, &mut rng );
    assert!( ( d - Vec3::new( 0.0, 1.0, 0.0 ) ).len( ) < 1e-5 );
  }

  #[test]
  fn point_light_attenuates_with_distance( ) {
    let light = Light::point( Vec3::new( 0.0, 0.0, 0.0 ), Color::WHITE, 10.0, 2.0 );
    let near = light.radiance( Vec3::new( 1.0, 0.0, 0.0 ) );
    let far = light.radiance( Vec3::new( 100.0, 0.0, 0.0 ) );
    assert!( near.r > far.r );
  }

  #[test]
  fn area_light_reports_stratified_sample_count( ) {
    let light = Light::point_area( Vec3::ZERO, Color::WHITE, 1.0, 10.0, 2.0 );
    assert_eq!( light.shadow_sample_count( 4 ), 16 );
    let point = Light::point( Vec3::ZERO, Color::WHITE, 10.0, 2.0 );
    assert_eq!( point.shadow_sample_count( 4 ), 1 );
  }

  #[test]
  fn point_light_yields_one_shadow_ray_bounded_at_its_distance( ) {
    let light = Light::point( Vec3::new( 0.0, 5.0, 0.0 ), Color::WHITE, 10.0, 2.0 );
    let mut rng = Rng::new( 3 );
    let mut out = Vec::new( );
    light.sample_shadow_rays( Vec3::ZERO, 4, &mut rng, &mut out );
    assert_eq!( out.len( ), 1 );
    let ( dir, dist ) = out[ 0 ];
    assert!( ( dir - Vec3::new( 0.0, 1.0, 0.0 ) ).len( ) < 1e-5 );
    assert!( ( dist - 5.0 ).abs( ) < 1e-4 );
  }

  #[test]
  fn area_light_yields_n_squared_shadow_rays_each_bounded_to_its_sample( ) {
    let light = Light::point_area( Vec3::new( 0.0, 5.0, 0.0 ), Color::WHITE, 1.0, 10.0, 2.0 );
    let mut rng = Rng::new( 5 );
    let mut out = Vec::new( );
    light.sample_shadow_rays( Vec3::ZERO, 3, &mut rng, &mut out );
    assert_eq!( out.len( ), 9 );
    for ( dir, dist ) in &out {
      assert!( ( dir.len( ) - 1.0 ).abs( ) < 1e-4 );
      // every sample sits on a unit sphere of radius 1 around a center 5
      // units up, so the distance to it is within [4, 6].
      assert!( *dist >= 4.0 && *dist <= 6.0 );
    }
  }

  #[test]
  fn directional_light_shadow_ray_is_unbounded( ) {
    let light = Light::directional( Vec3::new( 0.0, -1.0, 0.0 ), Color::WHITE );
    let mut rng = Rng::new( 9 );
    let mut out = Vec::new( );
    light.sample_shadow_rays( Vec3::ZERO, 4, &mut rng, &mut out );
    assert_eq!( out.len( ), 1 );
    assert_eq!( out[ 0 ].1, f32::INFINITY );
  }
}
