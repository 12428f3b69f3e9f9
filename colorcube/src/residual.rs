//! Residual correction: the last phase of a decode.
//!
//! Every cell that is still 0 after the flood fill reads a short code from the stream telling it
//! where its value comes from:
//!
//! | bits | source |
//! |---|---|
//! | `0` | previous cell along R |
//! | `1 00` | previous cell along G |
//! | `1 01` | next cell along R |
//! | `1 10` | next cell along G |
//! | `1 11` + 8 bits | literal code |
//!
//! Cells are visited in ascending index order, so copies from a "next" cell read whatever that
//! cell holds at this point, which may itself still be 0.

use crate::bits::{BitReader, ByteSource};
use crate::error::{DecodeError, DecodeResult};

/// Row stride of the color cube: one step along G.
pub const CUBE_STRIDE: usize = 256;

/// Where an unresolved cell takes its code from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Correction {
	PreviousR,
	PreviousG,
	NextR,
	NextG,
	Literal(u8)
}

impl Correction {
	/// Reads a single correction, or `None` at the end of the stream.
	pub fn read<S>(reader: &mut BitReader<S>) -> DecodeResult<Option<Correction>> where S: ByteSource {
		let correction = match reader.read_bit()? {
			None => None,
			Some(false) => Some(Correction::PreviousR),
			Some(true) => match reader.read_bits(2)? {
				None => None,
				Some(0) => Some(Correction::PreviousG),
				Some(1) => Some(Correction::NextR),
				Some(2) => Some(Correction::NextG),
				Some(_) => reader.read_byte()?.map(Correction::Literal)
			}
		};

		Ok(correction)
	}

	/// Index of the cell this correction copies from. `None` for literals, and for copies
	/// from before the first cell.
	fn source(self, index: usize, stride: usize) -> Option<usize> {
		match self {
			Correction::PreviousR => index.checked_sub(1),
			Correction::PreviousG => index.checked_sub(stride),
			Correction::NextR => Some(index + 1),
			Correction::NextG => Some(index + stride),
			Correction::Literal(_) => None
		}
	}
}

/// How many cells each kind of correction resolved.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ResidualStats {
	pub previous_r: u32,
	pub previous_g: u32,
	pub next_r: u32,
	pub next_g: u32,
	pub literal: u32,
	/// Set if the stream ran out before every unresolved cell was visited.
	pub truncated: bool
}

impl ResidualStats {
	pub fn total(&self) -> u32 {
		self.previous_r + self.previous_g + self.next_r + self.next_g + self.literal
	}

	fn count(&mut self, correction: Correction) {
		match correction {
			Correction::PreviousR => self.previous_r += 1,
			Correction::PreviousG => self.previous_g += 1,
			Correction::NextR => self.next_r += 1,
			Correction::NextG => self.next_g += 1,
			Correction::Literal(_) => self.literal += 1
		}
	}
}

/// Resolves every cell of `cells` that holds 0, reading one correction per such cell. `stride`
/// is the distance between neighbors along G.
pub fn correct<S>(reader: &mut BitReader<S>, cells: &mut [u8], stride: usize) -> DecodeResult<ResidualStats> where S: ByteSource {
	let mut stats = ResidualStats::default();

	for index in 0..cells.len() {
		if cells[index] != 0 {
			continue;
		}

		let correction = match Correction::read(reader)? {
			Some(correction) => correction,
			None => {
				stats.truncated = true;
				break;
			}
		};

		cells[index] = match correction {
			Correction::Literal(code) => code,
			copy => match copy.source(index, stride) {
				Some(source) if source < cells.len() => cells[source],
				_ => return Err(DecodeError::ResidualOutOfRange { index })
			}
		};

		stats.count(correction);
	}

	Ok(stats)
}

#[cfg(test)]
mod test {
	use super::{correct, Correction};
	use crate::bits::BitReader;
	use crate::error::DecodeError;

	#[test]
	fn test_literal_ignores_neighbors() {
		let mut cells = [3u8, 0, 4, 5, 6, 7];
		// 1, 11, then 42
		let data = [0x57u8, 0x01];
		let mut reader = BitReader::new(&data[..]);

		let stats = correct(&mut reader, &mut cells, 3).unwrap();

		assert_eq!(cells, [3, 42, 4, 5, 6, 7]);
		assert_eq!(stats.literal, 1);
		assert_eq!(stats.total(), 1);
	}

	#[test]
	fn test_copy_modes() {
		// Unresolved cells at indices 1, 4, 5, 6 and 7 of a 3 wide plane
		let mut cells = [1u8, 0, 2, 3, 0, 0, 0, 0, 9];

		// Previous R, previous G, next G, previous R, next R
		let data = [0x52u8, 0x03];
		let mut reader = BitReader::new(&data[..]);

		let stats = correct(&mut reader, &mut cells, 3).unwrap();

		assert_eq!(cells, [1, 1, 2, 3, 1, 9, 9, 9, 9]);
		assert_eq!(stats.previous_r, 2);
		assert_eq!(stats.previous_g, 1);
		assert_eq!(stats.next_g, 1);
		assert_eq!(stats.next_r, 1);
		assert!(!stats.truncated);
	}

	#[test]
	fn test_reading_corrections() {
		// 0, 1 10, 1 11 0xA5, then a single bit of padding
		let data = [0xFAu8, 0x52];
		let mut reader = BitReader::new(&data[..]);

		assert_eq!(Correction::read(&mut reader).unwrap(), Some(Correction::PreviousR));
		assert_eq!(Correction::read(&mut reader).unwrap(), Some(Correction::NextG));
		assert_eq!(Correction::read(&mut reader).unwrap(), Some(Correction::Literal(0xA5)));
		assert_eq!(Correction::read(&mut reader).unwrap(), Some(Correction::PreviousR));
		assert_eq!(Correction::read(&mut reader).unwrap(), None);
	}

	#[test]
	fn test_end_of_stream() {
		let mut cells = [0u8, 0, 0];
		let data: [u8; 0] = [];
		let mut reader = BitReader::new(&data[..]);

		let stats = correct(&mut reader, &mut cells, 3).unwrap();

		assert!(stats.truncated);
		assert_eq!(cells, [0, 0, 0]);
	}

	#[test]
	fn test_copy_before_start() {
		let mut cells = [0u8, 1];
		let data = [0u8];
		let mut reader = BitReader::new(&data[..]);

		match correct(&mut reader, &mut cells, 1) {
			Err(DecodeError::ResidualOutOfRange { index: 0 }) => (),
			other => panic!("expected a range error, got {:?}", other)
		}
	}
}
