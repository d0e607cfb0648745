use crate::math::{Ray, Vec3};

/// Ray/sphere intersection: returns the nearest positive `t` where the ray
/// enters or is inside the sphere, or `None` if the ray misses or the
/// sphere is entirely behind the origin.
///
/// Used by area-light sampling (§4.9's spherical point-light shadow rays)
/// and by the property tests that check the KD-tree against a
/// closed-form reference shape. Grounded on `primitives/sphere.rs`'s
/// algebraic solve (`(O-P+D*t)^2 - R^2 = 0`), carried over unchanged.
pub fn intersect_sphere( center : Vec3, radius : f32, ray : &Ray ) -> Option< f32 > {
  let oc = ray.origin - center;
  let b = 2.0 * ray.direction.dot( oc );
  let c = oc.dot( oc ) - radius * radius;
  let d = b * b - 4.0 * c;

  if d < 0.0 {
    return None;
  }

  let d_sqrt = d.sqrt( );
  let t0 = ( -b + d_sqrt ) * 0.5;
  let t1 = ( -b - d_sqrt ) * 0.5;

  let mut t = t0.min( t1 );
  if t <= 0.0 {
    t = t0.max( t1 );
    if t <= 0.0 {
      return None;
    }
  }
  Some( t )
}

/// Ray/plane intersection against the infinite plane through `point` with
/// the given `normal`. Returns `None` if the ray is parallel to the plane
/// or the intersection lies behind the ray's origin.
///
/// Grounded on `primitives/plane.rs`, carried over unchanged; this crate
/// additionally returns the plane's orientation as it faces the ray
/// (`normal` flipped toward the ray origin when `n·d > 0`), matching
/// `graphics/primitives/plane.rs`'s "visible from both sides" behavior.
pub fn intersect_plane( point : Vec3, normal : Vec3, ray : &Ray ) -> Option< ( f32, Vec3 ) > {
  let normal = normal.normalize( );
  let n_dot_dir = normal.dot( ray.direction );

  if n_dot_dir.abs( ) < crate::math::EPSILON {
    return None;
  }

  let o_distance = normal.dot( point );
  let t = ( o_distance - normal.dot( ray.origin ) ) / n_dot_dir;

  if t <= 0.0 {
    return None;
  }

  let facing_normal = if n_dot_dir > 0.0 { -normal } else { normal };
  Some( ( t, facing_normal ) )
}
