use thiserror::Error;

/// The render core's error taxonomy (§7). All are surfaced from
/// `Scene::build_tree`/`render::render` before any worker starts; there are
/// no recoverable per-ray errors once rendering is underway.
#[derive(Error, Debug)]
pub enum RenderError {
  #[error("invalid scene: {reason}")]
  InvalidScene { reason : String },

  #[error("invalid render settings: {reason}")]
  InvalidSettings { reason : String },

  #[error("resource exhausted: {reason}")]
  ResourceExhausted { reason : String }
}
