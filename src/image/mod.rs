mod tile_image;
mod sampler;

pub use tile_image::Image;
pub use sampler::{direction_to_uv, Sampler, Filter, Border};
