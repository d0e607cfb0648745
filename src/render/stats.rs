use std::time::Duration;

/// Per-thread cycle counters (§6), summed across every worker at shutdown.
/// Grounded on the teacher's `tracer.rs` timing fields (there printed ad
/// hoc via `Instant`/`println!`); this crate routes the same phases through
/// named `Duration` accumulators and reports them via `log::info!`.
///
/// Not every label is broken out to the same precision as the distilled
/// spec's list: `pack`/`sort` stay at zero because this crate's ray buffer
/// does not reorder (§4.5 says ordering is not observable to callers), and
/// `secondary_emit` is folded into `shade` since queuing a ray is a single
/// `Vec::push` too cheap to profile meaningfully on its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
  pub primary_emit       : Duration,
  pub primary_trace      : Duration,
  pub secondary_emit     : Duration,
  pub secondary_trace    : Duration,
  pub shadow_trace       : Duration,
  pub pack               : Duration,
  pub sort               : Duration,
  pub shade              : Duration,
  pub framebuffer_update : Duration,
  pub total              : Duration
}

impl RenderStats {
  pub fn merge( &mut self, other : &RenderStats ) {
    self.primary_emit       += other.primary_emit;
    self.primary_trace      += other.primary_trace;
    self.secondary_emit     += other.secondary_emit;
    self.secondary_trace    += other.secondary_trace;
    self.shadow_trace       += other.shadow_trace;
    self.pack               += other.pack;
    self.sort               += other.sort;
    self.shade               += other.shade;
    self.framebuffer_update += other.framebuffer_update;
    self.total              += other.total;
  }

  fn accounted( &self ) -> Duration {
    self.primary_emit + self.primary_trace + self.secondary_emit + self.secondary_trace
      + self.shadow_trace + self.pack + self.sort + self.shade + self.framebuffer_update
  }

  pub fn unaccounted( &self ) -> Duration {
    self.total.saturating_sub( self.accounted( ) )
  }

  pub fn log_summary( &self ) {
    log::info!(
      "render stats: total={:?}, primary(emit={:?} trace={:?}), shade={:?}, shadow_trace={:?}, secondary_trace={:?}, framebuffer_update={:?}, unaccounted={:?}",
      self.total, self.primary_emit, self.primary_trace, self.shade, self.shadow_trace,
      self.secondary_trace, self.framebuffer_update, self.unaccounted( )
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn merge_sums_every_label( ) {
    let mut a = RenderStats { primary_trace: Duration::from_millis( 5 ), total: Duration::from_millis( 10 ), ..Default::default( ) };
    let b = RenderStats { primary_trace: Duration::from_millis( 3 ), total: Duration::from_millis( 7 ), ..Default::default( ) };
    a.merge( &b );
    assert_eq!( a.primary_trace, Duration::from_millis( 8 ) );
    assert_eq!( a.total, Duration::from_millis( 17 ) );
  }

  #[test]
  fn unaccounted_is_total_minus_labeled_phases( ) {
    let s = RenderStats {
      total: Duration::from_millis( 100 ),
      primary_trace: Duration::from_millis( 30 ),
      shade: Duration::from_millis( 20 ),
      ..Default::default( )
    };
    assert_eq!( s.unaccounted( ), Duration::from_millis( 50 ) );
  }
}
