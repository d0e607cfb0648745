use crate::math::Vec3;
use crate::render::ShadingContext;
use crate::scene::{Collision, Color, Light, Scene};
use crate::triangle::Triangle;

/// The shading contract (§4.9): a material turns a hit into an outgoing
/// color, with the freedom to sample textures, trace shadow rays through
/// `ctx`, and push weighted secondary rays into `ctx`'s ray buffer.
///
/// Grounded on the teacher's `graphics/material.rs`, which hardcoded a
/// small closed `Material` enum (`Diffuse`/`Specular`/`Emissive`) dispatched
/// by `match`; this crate keeps that same "closed enum with a `shade`-style
/// method" shape but makes it an explicit trait so `Scene::materials` can
/// hold a `Vec<Box<dyn Shader>>` of genuinely different shading models
/// (Phong, PBR) without a combinatorial enum.
pub trait Shader : Send + Sync {
  fn shade( &self, ray : &crate::math::Ray, collision : &Collision, triangle : &Triangle, scene : &Scene, ctx : &mut ShadingContext ) -> Color;
}

/// A small closed set of reference shaders, kept alongside the `Shader`
/// trait so simple scenes can use `Material` directly without boxing.
pub enum Material {
  Phong( PhongMaterial ),
  Pbr( PbrMaterial )
}

impl Shader for Material {
  fn shade( &self, ray : &crate::math::Ray, collision : &Collision, triangle : &Triangle, scene : &Scene, ctx : &mut ShadingContext ) -> Color {
    match self {
      Material::Phong( m ) => m.shade( ray, collision, triangle, scene, ctx ),
      Material::Pbr( m ) => m.shade( ray, collision, triangle, scene, ctx )
    }
  }
}

/// A Phong reflection model: ambient + diffuse + specular against every
/// light in the scene, with a mirror-reflection term weighted by
/// `reflectivity`. Grounded on `graphics/material.rs`'s diffuse/specular
/// split and `include/shader/phongshader.h` from the original source.
pub struct PhongMaterial {
  pub diffuse      : Color,
  pub specular     : Color,
  pub shininess    : f32,
  pub reflectivity : f32
}

/// Ambient light contribution, scaled by the ambient-occlusion visibility
/// fraction when `ctx.occlusion_samples > 0`. Approximates the portion of
/// the hemisphere an indirect bounce could reach, at a small fixed
/// intensity — this crate has no separate ambient/environment light type,
/// so this is the only consumer of `RenderSettings::occlusion_samples`.
const AMBIENT_INTENSITY : f32 = 0.05;

impl Shader for PhongMaterial {
  fn shade( &self, ray : &crate::math::Ray, collision : &Collision, triangle : &Triangle, scene : &Scene, ctx : &mut ShadingContext ) -> Color {
    let hit_vertex = triangle.interpolate( collision.beta, collision.gamma );
    let point = hit_vertex.position;
    let normal = hit_vertex.normal;
    let view = -ray.direction;

    let mut out = Color::BLACK;
    for light in &scene.lights {
      let to_light = light.sample_direction( point, &mut ctx.rng );
      let n_dot_l = normal.dot( to_light ).max( 0.0 );
      if n_dot_l <= 0.0 {
        continue;
      }
      let visibility = shadow_visibility( light, point, normal, scene, ctx );
      if visibility <= 0.0 {
        continue;
      }
      let radiance = light.radiance( point );
      let diffuse_term = self.diffuse * radiance * n_dot_l;

      let reflect_dir = ( -to_light ).reflect( normal );
      let spec_amount = view.dot( reflect_dir ).max( 0.0 ).powf( self.shininess );
      let specular_term = self.specular * radiance * spec_amount;

      out += ( diffuse_term + specular_term ) * visibility;
    }

    if ctx.occlusion_samples > 0 {
      let ao = ctx.ambient_occlusion( point, normal, ctx.occlusion_samples, ctx.occlusion_distance );
      out += self.diffuse * ao * AMBIENT_INTENSITY;
    }

    if self.reflectivity > 0.0 && ctx.depth < ctx.max_depth {
      let reflected = ray.direction.reflect( normal );
      ctx.push_secondary( crate::math::Ray::new( point + normal * 1e-3, reflected ), self.reflectivity );
    }

    out
  }
}

/// Averages occlusion over `light.sample_shadow_rays`'s `n*n` stratified
/// targets (§3's area-light soft shadows), each bounded to its own sampled
/// distance so an occluder behind the light is not mistaken for one in
/// front of it. Returns the fraction of samples that were *not* occluded.
fn shadow_visibility( light : &Light, point : Vec3, normal : Vec3, scene : &Scene, ctx : &mut ShadingContext ) -> f32 {
  let mut targets = Vec::new( );
  light.sample_shadow_rays( point, ctx.shadow_samples.max( 1 ) as usize, &mut ctx.rng, &mut targets );
  let origin = point + normal * 1e-3;
  let visible = targets.iter( ).filter( | ( dir, dist ) | !ctx.trace_shadow( origin, *dir, *dist, scene ) ).count( );
  visible as f32 / targets.len( ) as f32
}

/// A simplified physically-based shader: GGX-style specular lobe over a
/// metallic/roughness parameterization, blended with a Lambertian diffuse
/// term weighted by `1 - metallic`. Grounded on `graphics/material.rs`'s
/// emissive/albedo handling plus `include/shader/pbrshader.h` and
/// `include/materials/pbrmaterial.h` from the original source.
pub struct PbrMaterial {
  pub albedo    : Color,
  pub metallic  : f32,
  pub roughness : f32,
  pub emissive  : Color
}

impl Shader for PbrMaterial {
  fn shade( &self, ray : &crate::math::Ray, collision : &Collision, triangle : &Triangle, scene : &Scene, ctx : &mut ShadingContext ) -> Color {
    let hit_vertex = triangle.interpolate( collision.beta, collision.gamma );
    let point = hit_vertex.position;
    let normal = hit_vertex.normal;
    let view = -ray.direction;

    let mut out = self.emissive;
    let alpha = ( self.roughness * self.roughness ).max( 1e-3 );

    for light in &scene.lights {
      let to_light = light.sample_direction( point, &mut ctx.rng );
      let n_dot_l = normal.dot( to_light ).max( 0.0 );
      if n_dot_l <= 0.0 {
        continue;
      }
      let visibility = shadow_visibility( light, point, normal, scene, ctx );
      if visibility <= 0.0 {
        continue;
      }
      let radiance = light.radiance( point );
      let half = ( to_light + view ).normalize( );
      let n_dot_h = normal.dot( half ).max( 0.0 );
      let d = ggx_distribution( n_dot_h, alpha );
      let fresnel = schlick_fresnel( view.dot( half ).max( 0.0 ), self.metallic );

      let diffuse_term = self.albedo * ( 1.0 - self.metallic ) * radiance * n_dot_l;
      let specular_term = radiance * ( d * fresnel * n_dot_l );

      out += ( diffuse_term + specular_term ) * visibility;
    }

    if ctx.occlusion_samples > 0 {
      let ao = ctx.ambient_occlusion( point, normal, ctx.occlusion_samples, ctx.occlusion_distance );
      out += self.albedo * ( 1.0 - self.metallic ) * ao * AMBIENT_INTENSITY;
    }

    out
  }
}

fn ggx_distribution( n_dot_h : f32, alpha : f32 ) -> f32 {
  let a2 = alpha * alpha;
  let denom = n_dot_h * n_dot_h * ( a2 - 1.0 ) + 1.0;
  a2 / ( std::f32::consts::PI * denom * denom ).max( 1e-6 )
}

fn schlick_fresnel( cos_theta : f32, metallic : f32 ) -> f32 {
  let f0 = 0.04 + ( 1.0 - 0.04 ) * metallic;
  let x = 1.0 - cos_theta;
  f0 + ( 1.0 - f0 ) * x * x * x * x * x
}
