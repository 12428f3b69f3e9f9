#![allow(dead_code)]

/// Writes values least significant bit first, mirroring `BitReader`.
pub struct BitWriter {
	bytes: Vec<u8>,
	buffer: u64,
	len: u32
}

impl BitWriter {
	pub fn new() -> Self {
		BitWriter { bytes: Vec::new(), buffer: 0, len: 0 }
	}

	pub fn write(&mut self, value: u32, count: u32) {
		self.buffer |= ((value as u64) & ((1 << count) - 1)) << self.len;
		self.len += count;

		while self.len >= 8 {
			self.bytes.push(self.buffer as u8);
			self.buffer >>= 8;
			self.len -= 8;
		}
	}

	pub fn byte(&mut self, value: u8) {
		self.write(value as u32, 8);
	}

	/// Palette where code `c` is `(c, 255 - c, c / 2, 255)`.
	pub fn palette(&mut self) {
		for code in 0..256u32 {
			self.byte(code as u8);
			self.byte((255 - code) as u8);
			self.byte((code / 2) as u8);
			self.byte(255);
		}
	}

	pub fn seed(&mut self, color: u8, x: u8, y: u8, z_min: u8, z_span: u8) {
		self.byte(color);
		self.byte(x);
		self.byte(y);
		self.byte(z_min);
		self.byte(z_span);
	}

	pub fn end_seeds(&mut self) {
		self.byte(0);
	}

	pub fn jump(&mut self, x: u8, y: u8) {
		self.write(0b11, 2);
		self.write(0, 1);
		self.write(0b00, 2);
		self.byte(x);
		self.byte(y);
	}

	pub fn step_y(&mut self) {
		self.write(0b01, 2);
	}

	/// Points the Y direction upwards, which it already is at the start of a layer.
	pub fn face_up(&mut self) {
		self.write(0b11, 2);
		self.write(1, 1);
		self.write(0b11, 2);
	}

	pub fn stop(&mut self) {
		self.write(0b11, 2);
		self.write(0, 1);
		self.write(0b01, 2);
	}

	pub fn empty_layers(&mut self, count: usize) {
		for _ in 0..count {
			self.stop();
		}
	}

	/// Residual correction copying from the previous cell along R.
	pub fn copy_previous_r(&mut self) {
		self.write(0, 1);
	}

	pub fn literal(&mut self, code: u8) {
		self.write(1, 1);
		self.write(0b11, 2);
		self.byte(code);
	}

	pub fn finish(mut self) -> Vec<u8> {
		if self.len > 0 {
			self.bytes.push(self.buffer as u8);
		}

		self.bytes
	}
}
