use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Failures that abort a decode. Running out of input is not one of these: the format has no
/// length fields, so every phase simply stops when the stream ends.
#[derive(Debug)]
pub enum DecodeError {
	/// The underlying byte source failed to produce a byte.
	Io(io::Error),
	/// A seed extends past the top of the cube.
	SeedOutOfRange { color: u8, x: u8, y: u8, z_min: u8, z_span: u8 },
	/// A boundary curve tried to mark a cell outside of its layer.
	CursorOutOfRange { layer: u8, x: i32, y: i32 },
	/// A residual copy refers to a cell outside of the cube.
	ResidualOutOfRange { index: usize },
}

impl Display for DecodeError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			DecodeError::Io(e) => write!(f, "I/O error while reading color cube: {}", e),
			DecodeError::SeedOutOfRange { color, x, y, z_min, z_span } => write!(
				f,
				"seed of color {} at ({}, {}) spans blue {}..={}, past the end of the cube",
				color,
				x,
				y,
				z_min,
				*z_min as u32 + *z_span as u32
			),
			DecodeError::CursorOutOfRange { layer, x, y } => {
				write!(f, "boundary cursor out of range in layer {}: ({}, {})", layer, x, y)
			}
			DecodeError::ResidualOutOfRange { index } => {
				write!(f, "residual correction at index {} copies from outside the cube", index)
			}
		}
	}
}

impl Error for DecodeError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			DecodeError::Io(e) => Some(e),
			_ => None,
		}
	}
}

impl From<io::Error> for DecodeError {
	fn from(e: io::Error) -> Self {
		DecodeError::Io(e)
	}
}
