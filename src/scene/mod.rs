mod collision;
mod camera;
mod light;
mod material;
mod color;
mod scene;

pub use collision::Collision;
pub use camera::Camera;
pub use light::Light;
pub use material::{Material, PbrMaterial, PhongMaterial, Shader};
pub use color::Color;
pub use scene::Scene;
