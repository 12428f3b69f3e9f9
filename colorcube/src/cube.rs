use std::fmt::{self, Debug, Formatter};

/// Number of palette entries, and the number of distinct color codes.
pub const PALETTE_LEN: usize = 256;

/// Number of cells in the cube, one for each 24-bit color.
pub const CUBE_LEN: usize = 1 << 24;

/// A single palette entry.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Rgba {
	pub red: u8,
	pub green: u8,
	pub blue: u8,
	pub alpha: u8
}

impl Rgba {
	pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
		Rgba { red, green, blue, alpha }
	}

	pub fn into_array(self) -> [u8; 4] {
		[self.red, self.green, self.blue, self.alpha]
	}
}

/// Returns the cube index of a color, laid out as `(B<<16) | (G<<8) | R`.
pub fn index(red: u8, green: u8, blue: u8) -> usize {
	(red as usize) | ((green as usize) << 8) | ((blue as usize) << 16)
}

/// A palette together with the code of the nearest palette entry for every 24-bit color.
///
/// Code 0 doubles as "unresolved" while the cube is being decoded. Once decoding has finished,
/// the cube is only read from.
#[derive(Clone)]
pub struct ColorCube {
	palette: Box<[Rgba; PALETTE_LEN]>,
	codes: Box<[u8]>
}

impl ColorCube {
	/// Creates a cube with a blank palette where every cell is unresolved.
	pub fn new() -> Self {
		ColorCube {
			palette: Box::new([Rgba::default(); PALETTE_LEN]),
			codes: vec![0; CUBE_LEN].into_boxed_slice()
		}
	}

	pub fn get_code(&self, red: u8, green: u8, blue: u8) -> u8 {
		self.codes[index(red, green, blue)]
	}

	pub fn get_color(&self, code: u8) -> Rgba {
		self.palette[code as usize]
	}

	/// Looks up the palette entry nearest to a color.
	pub fn nearest(&self, red: u8, green: u8, blue: u8) -> Rgba {
		self.get_color(self.get_code(red, green, blue))
	}

	pub fn palette(&self) -> &[Rgba; PALETTE_LEN] {
		&self.palette
	}

	/// All codes, in cube index order. See [`index`].
	pub fn codes(&self) -> &[u8] {
		&self.codes
	}

	/// Counts the cells that still hold code 0.
	pub fn unresolved(&self) -> usize {
		self.codes.iter().filter(|&&code| code == 0).count()
	}

	/// Counts how many cells map to each code.
	pub fn histogram(&self) -> Box<[u32; PALETTE_LEN]> {
		let mut counts = Box::new([0u32; PALETTE_LEN]);

		for &code in self.codes.iter() {
			counts[code as usize] += 1;
		}

		counts
	}

	pub(crate) fn set_color(&mut self, code: u8, color: Rgba) {
		self.palette[code as usize] = color;
	}

	pub(crate) fn codes_mut(&mut self) -> &mut [u8] {
		&mut self.codes
	}
}

impl Default for ColorCube {
	fn default() -> Self {
		ColorCube::new()
	}
}

impl Debug for ColorCube {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "ColorCube {{ unresolved: {} }}", self.unresolved())
	}
}
