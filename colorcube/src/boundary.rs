use crate::bits::{BitReader, ByteSource};
use crate::error::{DecodeError, DecodeResult};
use bit_vec::BitVec;

/// Width (and height) of a single boundary layer.
pub const LAYER_SIDE: usize = 256;

/// Number of cells in a single boundary layer.
pub const LAYER_AREA: usize = LAYER_SIDE * LAYER_SIDE;

/// Cursor value before the first jump of a layer. Stepping from here never lands in range.
const UNSET: i32 = i32::min_value() / 2;

/// Creates an empty boundary layer.
pub fn empty_layer() -> BitVec {
	BitVec::from_elem(LAYER_AREA, false)
}

/// A single decoded instruction of the boundary chain code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Instruction {
	/// `00`: step along X, then mark.
	StepX,
	/// `01`: step along Y, then mark.
	StepY,
	/// `10`: step along both axes, then mark.
	StepXY,
	/// `11 1 0s`: set the X direction.
	DirectionX(i32),
	/// `11 1 1s`: set the Y direction.
	DirectionY(i32),
	/// `11 0 00 xxxxxxxx yyyyyyyy`: start a new segment at (x, y), then mark.
	Jump(u8, u8),
	/// `11 0 01`, or the end of the stream.
	Stop
}

impl Instruction {
	pub fn read<S>(reader: &mut BitReader<S>) -> DecodeResult<Instruction> where S: ByteSource {
		let op = match reader.read_bits(2)? {
			Some(op) => op,
			None => return Ok(Instruction::Stop)
		};

		let instruction = match op {
			0 => Instruction::StepX,
			1 => Instruction::StepY,
			2 => Instruction::StepXY,
			_ => match (reader.read_bit()?, reader.read_bits(2)?) {
				(Some(true), Some(0)) => Instruction::DirectionX(-1),
				(Some(true), Some(1)) => Instruction::DirectionX(1),
				(Some(true), Some(2)) => Instruction::DirectionY(-1),
				(Some(true), Some(_)) => Instruction::DirectionY(1),
				(Some(false), Some(0)) => match (reader.read_byte()?, reader.read_byte()?) {
					(Some(x), Some(y)) => Instruction::Jump(x, y),
					_ => Instruction::Stop
				},
				// 01 is the real stop code, 10 and 11 are unassigned and end the layer as well.
				_ => Instruction::Stop
			}
		};

		Ok(instruction)
	}
}

/// Traces boundary curves into a layer. One decoder can be reused for every layer, as long
/// as it is reset in between.
#[derive(Debug, Clone)]
pub struct CurveDecoder {
	x: i32,
	y: i32,
	dx: i32,
	dy: i32
}

impl CurveDecoder {
	pub fn new() -> Self {
		CurveDecoder {
			x: UNSET,
			y: UNSET,
			dx: 1,
			dy: 1
		}
	}

	/// Moves the cursor off the plane and points both directions upwards.
	pub fn reset(&mut self) {
		*self = CurveDecoder::new();
	}

	pub fn cursor(&self) -> (i32, i32) {
		(self.x, self.y)
	}

	pub fn directions(&self) -> (i32, i32) {
		(self.dx, self.dy)
	}

	/// Applies a single instruction. Returns false once the layer is complete.
	pub fn apply(&mut self, instruction: Instruction, layer: &mut BitVec, index: u8) -> DecodeResult<bool> {
		match instruction {
			Instruction::StepX => {
				self.x += self.dx;
			},
			Instruction::StepY => {
				self.y += self.dy;
			},
			Instruction::StepXY => {
				self.x += self.dx;
				self.y += self.dy;
			},
			Instruction::DirectionX(dx) => {
				self.dx = dx;
				return Ok(true);
			},
			Instruction::DirectionY(dy) => {
				self.dy = dy;
				return Ok(true);
			},
			Instruction::Jump(x, y) => {
				self.x = x as i32;
				self.y = y as i32;
			},
			Instruction::Stop => return Ok(false)
		}

		self.mark(layer, index)?;

		Ok(true)
	}

	/// Reads and applies the next instruction. Returns false once the layer is complete.
	pub fn step<S>(&mut self, reader: &mut BitReader<S>, layer: &mut BitVec, index: u8) -> DecodeResult<bool> where S: ByteSource {
		let instruction = Instruction::read(reader)?;

		self.apply(instruction, layer, index)
	}

	/// Resets the decoder and traces a whole layer, returning the number of marks made.
	/// Marks are counted even when they land on an already marked cell.
	pub fn decode_layer<S>(&mut self, reader: &mut BitReader<S>, layer: &mut BitVec, index: u8) -> DecodeResult<u32> where S: ByteSource {
		self.reset();

		let mut marks = 0;

		loop {
			let instruction = Instruction::read(reader)?;
			let marking = match instruction {
				Instruction::DirectionX(_) | Instruction::DirectionY(_) | Instruction::Stop => false,
				_ => true
			};

			if !self.apply(instruction, layer, index)? {
				return Ok(marks);
			}

			marks += marking as u32;
		}
	}

	fn mark(&self, layer: &mut BitVec, index: u8) -> DecodeResult<()> {
		let side = LAYER_SIDE as i32;

		if self.x < 0 || self.x >= side || self.y < 0 || self.y >= side {
			return Err(DecodeError::CursorOutOfRange { layer: index, x: self.x, y: self.y });
		}

		layer.set((self.x as usize) | ((self.y as usize) << 8), true);

		Ok(())
	}
}

impl Default for CurveDecoder {
	fn default() -> Self {
		CurveDecoder::new()
	}
}
