use serde::{Deserialize, Serialize};

use crate::error::RenderError;

pub const MAX_PIXEL_SAMPLES : u32 = 16;
pub const MAX_AO_SAMPLES    : u32 = 64;
pub const MAX_DEPTH         : u32 = 32;

/// Recognized render options (§6). Deriving `serde::{Serialize,Deserialize}`
/// lets a caller persist/load a configuration in whatever format it likes
/// (RON/JSON/TOML/...); the core itself never touches a file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
  pub width            : u32,
  pub height           : u32,
  pub pixel_samples    : u32,
  pub block_size       : u32,
  pub num_threads      : u32,
  pub max_depth        : u32,
  pub shadow_samples   : u32,
  pub occlusion_samples : u32,
  pub occlusion_distance : f32
}

impl Default for RenderSettings {
  fn default( ) -> RenderSettings {
    RenderSettings {
      width: 800,
      height: 600,
      pixel_samples: 2,
      block_size: 16,
      num_threads: 0,
      max_depth: 8,
      shadow_samples: 4,
      occlusion_samples: 0,
      occlusion_distance: 1.0
    }
  }
}

impl RenderSettings {
  pub fn validate( &self ) -> Result< ( ), RenderError > {
    if self.width == 0 || self.height == 0 {
      return Err( RenderError::InvalidSettings { reason: "width and height must be positive".into( ) } );
    }
    if self.block_size == 0 {
      return Err( RenderError::InvalidSettings { reason: "block_size must be positive".into( ) } );
    }
    if self.pixel_samples == 0 || self.pixel_samples > MAX_PIXEL_SAMPLES {
      return Err( RenderError::InvalidSettings { reason: format!( "pixel_samples must be in 1..={}", MAX_PIXEL_SAMPLES ) } );
    }
    if self.max_depth > MAX_DEPTH {
      return Err( RenderError::InvalidSettings { reason: format!( "max_depth must be <= {}", MAX_DEPTH ) } );
    }
    if self.occlusion_samples > MAX_AO_SAMPLES {
      return Err( RenderError::InvalidSettings { reason: format!( "occlusion_samples must be <= {}", MAX_AO_SAMPLES ) } );
    }
    Ok( ( ) )
  }

  pub fn resolved_thread_count( &self ) -> usize {
    if self.num_threads == 0 {
      num_cpus::get( )
    } else {
      self.num_threads as usize
    }
  }

  pub fn blocks_x( &self ) -> u32 { ( self.width + self.block_size - 1 ) / self.block_size }
  pub fn blocks_y( &self ) -> u32 { ( self.height + self.block_size - 1 ) / self.block_size }
  pub fn block_count( &self ) -> u32 { self.blocks_x( ) * self.blocks_y( ) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_settings_validate( ) {
    assert!( RenderSettings::default( ).validate( ).is_ok( ) );
  }

  #[test]
  fn zero_dimensions_are_rejected( ) {
    let mut s = RenderSettings::default( );
    s.width = 0;
    assert!( s.validate( ).is_err( ) );
  }

  #[test]
  fn oversized_pixel_samples_are_rejected( ) {
    let mut s = RenderSettings::default( );
    s.pixel_samples = MAX_PIXEL_SAMPLES + 1;
    assert!( s.validate( ).is_err( ) );
  }

  #[test]
  fn block_count_covers_the_whole_image( ) {
    let mut s = RenderSettings::default( );
    s.width = 17;
    s.height = 17;
    s.block_size = 16;
    assert_eq!( s.blocks_x( ), 2 );
    assert_eq!( s.blocks_y( ), 2 );
    assert_eq!( s.block_count( ), 4 );
  }
}
