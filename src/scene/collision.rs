/// The result of a successful ray/triangle intersection: distance along the
/// ray plus the barycentric coordinates needed to interpolate the hit
/// triangle's vertex attributes.
#[derive(Copy, Clone, Debug)]
pub struct Collision {
  pub distance     : f32,
  pub beta         : f32,
  pub gamma        : f32,
  pub triangle_id  : u32
}
