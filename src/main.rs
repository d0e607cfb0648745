use std::time::Instant;

use kdtracer::kdtree::KdBuildSettings;
use kdtracer::math::{Rng, Vec2, Vec3};
use kdtracer::render::RenderSettings;
use kdtracer::scene::{Camera, Color, Material, PhongMaterial, Scene};
use kdtracer::triangle::{Triangle, Vertex};

/// A small native benchmark harness, in the spirit of the teacher's
/// `main.rs` point-cloud BVH benchmark: build an accelerator over a random
/// triangle cloud, then render it, reporting build and render statistics.
/// Where the teacher benchmarked BVH build/trace in isolation, this drives
/// the whole pipeline (KD build, then `render::render`) since that is the
/// unit this crate actually ships.
fn main( ) {
  env_logger::init( );

  let num_triangles = 100_000;
  let width = 512;
  let height = 512;

  let now = Instant::now( );
  let triangles = cloud( num_triangles );
  println!( "Generated {} triangles in {} ms", triangles.len( ), now.elapsed( ).as_millis( ) );

  let camera = Camera::new(
    Vec3::new( 0.0, 4.8, 2.6 ),
    Vec3::new( 0.0, 3.0, 0.0 ),
    Vec3::new( 0.0, 1.0, 0.0 ),
    60.0_f32.to_radians( ),
    width as f32 / height as f32,
    1.0,
    0.0
  );

  let material = Material::Phong( PhongMaterial {
    diffuse: Color::new( 0.8, 0.1, 0.1 ),
    specular: Color::new( 0.3, 0.3, 0.3 ),
    shininess: 32.0,
    reflectivity: 0.0
  } );

  let material_ids = vec![ 0u32; triangles.len( ) ];
  let scene = Scene::new( triangles, material_ids, vec![ material ], vec![ ], camera, Color::new( 0.02, 0.02, 0.05 ), width, height );

  let build_settings = KdBuildSettings::default( );
  let now = Instant::now( );
  let tree = scene.build_tree( &build_settings );
  println!( "KD-tree built in {} ms", now.elapsed( ).as_millis( ) );

  let tree_stats = tree.stats( );
  println!(
    "nodes={} leaves={} max_leaf_depth={} total_leaf_triangles={}",
    tree_stats.node_count, tree_stats.leaf_count, tree_stats.max_leaf_depth, tree_stats.total_leaf_triangles
  );

  let mut settings = RenderSettings::default( );
  settings.width = width as u32;
  settings.height = height as u32;
  settings.pixel_samples = 1;
  settings.max_depth = 2;

  let now = Instant::now( );
  let stats = kdtracer::render( &scene, &tree, &settings ).expect( "render should succeed" );
  println!( "Rendered {}x{} in {} ms", width, height, now.elapsed( ).as_millis( ) );
  stats.log_summary( );
}

/// Constructs a triangle cloud with triangles in `[0, 3.5]^3`, each a
/// randomly perturbed point spread into a small flat-shaded triangle.
/// Grounded on the teacher's `main.rs::cloud`, generalized from
/// position-only `Rc<dyn Tracable>` triangles into fully attributed
/// `Triangle`s (with normals, tangents, uvs) as the new pipeline requires.
fn cloud( n : usize ) -> Vec< Triangle > {
  let mut rng = Rng::new( 0xC10D_5EED );
  let mut triangles = Vec::with_capacity( n );
  for i in 0..n {
    let center = 3.0 * Vec3::new( rng.next( ), rng.next( ), rng.next( ) );
    let v0 = center + 0.5 * Vec3::new( rng.next( ), rng.next( ), rng.next( ) );
    let v1 = center + 0.5 * Vec3::new( rng.next( ), rng.next( ), rng.next( ) );
    let v2 = center + 0.5 * Vec3::new( rng.next( ), rng.next( ), rng.next( ) );

    let face_normal = ( v1 - v0 ).cross( v2 - v0 ).normalize( );
    let vertex = | p : Vec3 | Vertex { position: p, normal: face_normal, tangent: ( v1 - v0 ).normalize( ), uv: Vec2::new( 0.0, 0.0 ) };

    triangles.push( Triangle::new( vertex( v0 ), vertex( v1 ), vertex( v2 ), i as u32, 0 ) );
  }
  triangles
}
