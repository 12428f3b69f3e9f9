use std::io::{self, ErrorKind, Read};

/// Something that can hand out bytes one at a time.
///
/// `Ok(None)` signals a clean end of stream, which is distinct from a failed read.
pub trait ByteSource {
	fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<R> ByteSource for R where R: Read {
	fn next_byte(&mut self) -> io::Result<Option<u8>> {
		let mut byte = [0u8; 1];

		loop {
			match self.read(&mut byte) {
				Ok(0) => return Ok(None),
				Ok(_) => return Ok(Some(byte[0])),
				Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => return Err(e),
			}
		}
	}
}

/// Reads values of up to 32 bits, least significant bit first.
///
/// Bytes are only pulled from the source when the internal buffer runs dry, and are placed
/// above the bits that are still buffered. No validation is done here: a malformed stream
/// just produces wrong values.
///
/// ### Closing
/// The reader owns its source. [`close`](BitReader::close) drops it, which closes an owned
/// source such as a `File`. To keep the source open, hand the reader `&mut source` instead.
#[derive(Debug)]
pub struct BitReader<S> where S: ByteSource {
	source: Option<S>,
	buffer: u64,
	len: u32
}

impl<S> BitReader<S> where S: ByteSource {
	pub fn new(source: S) -> Self {
		BitReader {
			source: Some(source),
			buffer: 0,
			len: 0
		}
	}

	/// Reads the next `count` bits, returning `None` once the source runs out before enough
	/// bits could be buffered.
	/// # Panics
	/// If `count` is greater than 32, or if the reader has been closed.
	pub fn read_bits(&mut self, count: u32) -> io::Result<Option<u32>> {
		assert!(count <= 32, "cannot read more than 32 bits at a time, tried to read {}", count);

		let source = match self.source {
			Some(ref mut source) => source,
			None => panic!("tried to read from a closed BitReader")
		};

		while self.len < count {
			match source.next_byte()? {
				Some(byte) => {
					self.buffer |= (byte as u64) << self.len;
					self.len += 8;
				},
				None => return Ok(None)
			}
		}

		let value = self.buffer & ((1u64 << count) - 1);

		self.buffer >>= count;
		self.len -= count;

		Ok(Some(value as u32))
	}

	pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
		self.read_bits(1).map(|bit| bit.map(|bit| bit == 1))
	}

	pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
		self.read_bits(8).map(|byte| byte.map(|byte| byte as u8))
	}

	/// Number of bits pulled from the source but not yet returned.
	pub fn buffered(&self) -> u32 {
		self.len
	}

	pub fn is_closed(&self) -> bool {
		self.source.is_none()
	}

	/// Drops the source and any buffered bits. Closing twice is harmless.
	pub fn close(&mut self) {
		self.source = None;
		self.buffer = 0;
		self.len = 0;
	}

	/// Returns the source, discarding any buffered bits. Returns `None` if already closed.
	pub fn into_inner(self) -> Option<S> {
		self.source
	}
}

impl<S> Read for BitReader<S> where S: ByteSource {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		for (index, slot) in buf.iter_mut().enumerate() {
			match self.read_byte()? {
				Some(byte) => *slot = byte,
				None => return Ok(index)
			}
		}

		Ok(buf.len())
	}
}
