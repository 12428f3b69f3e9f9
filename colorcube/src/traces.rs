//! Progress reporting for the phases of a decode.

use crate::fill::FillStats;
use crate::residual::ResidualStats;
use std::time::Duration;

pub trait DecodeTraces {
	fn palette(&self, duration: Duration);
	fn seeds(&self, count: usize, duration: Duration);
	fn boundaries(&self, marks: u64, duration: Duration);
	fn fill(&self, stats: FillStats, duration: Duration);
	fn residual(&self, stats: ResidualStats, duration: Duration);
	fn finished(&self, unresolved: usize, duration: Duration);
}

/// Sends traces to the `log` facade.
pub struct LogTraces;

impl LogTraces {
	fn us(duration: Duration) -> u64 {
		(duration.as_secs() * 1000000) + ((duration.subsec_nanos() / 1000) as u64)
	}
}

impl DecodeTraces for LogTraces {
	fn palette(&self, duration: Duration) {
		debug!("Read palette in {}us", Self::us(duration));
	}

	fn seeds(&self, count: usize, duration: Duration) {
		debug!("Read {} seeds in {}us", count, Self::us(duration));
	}

	fn boundaries(&self, marks: u64, duration: Duration) {
		debug!("Traced 256 boundary layers with {} marks in {}us", marks, Self::us(duration));
	}

	fn fill(&self, stats: FillStats, duration: Duration) {
		debug!(
			"Flood filled {} cells in {}us ({} passes, {} cells left pending)",
			stats.resolved,
			Self::us(duration),
			stats.passes,
			stats.pending
		);
	}

	fn residual(&self, stats: ResidualStats, duration: Duration) {
		debug!(
			"Corrected {} cells in {}us ({} previous R, {} previous G, {} next R, {} next G, {} literal)",
			stats.total(),
			Self::us(duration),
			stats.previous_r,
			stats.previous_g,
			stats.next_r,
			stats.next_g,
			stats.literal
		);

		if stats.truncated {
			warn!("Residual stream ended before every unresolved cell was corrected");
		}
	}

	fn finished(&self, unresolved: usize, duration: Duration) {
		info!("Decoded color cube in {}ms", duration.as_millis());

		if unresolved != 0 {
			warn!("{} cells of the color cube were left unresolved", unresolved);
		}
	}
}

/// Discards all traces.
pub struct IgnoreTraces;

impl DecodeTraces for IgnoreTraces {
	fn palette(&self, _: Duration) {}
	fn seeds(&self, _: usize, _: Duration) {}
	fn boundaries(&self, _: u64, _: Duration) {}
	fn fill(&self, _: FillStats, _: Duration) {}
	fn residual(&self, _: ResidualStats, _: Duration) {}
	fn finished(&self, _: usize, _: Duration) {}
}

impl<'a, T> DecodeTraces for &'a T where T: DecodeTraces {
	fn palette(&self, duration: Duration) {
		(**self).palette(duration)
	}

	fn seeds(&self, count: usize, duration: Duration) {
		(**self).seeds(count, duration)
	}

	fn boundaries(&self, marks: u64, duration: Duration) {
		(**self).boundaries(marks, duration)
	}

	fn fill(&self, stats: FillStats, duration: Duration) {
		(**self).fill(stats, duration)
	}

	fn residual(&self, stats: ResidualStats, duration: Duration) {
		(**self).residual(stats, duration)
	}

	fn finished(&self, unresolved: usize, duration: Duration) {
		(**self).finished(unresolved, duration)
	}
}
