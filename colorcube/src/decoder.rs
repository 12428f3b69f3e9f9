use crate::bits::{BitReader, ByteSource};
use crate::boundary::{self, CurveDecoder, LAYER_AREA, LAYER_SIDE};
use crate::cube::{self, ColorCube, Rgba, PALETTE_LEN};
use crate::error::{DecodeError, DecodeResult};
use crate::fill::{self, FillStats};
use crate::residual::{self, CUBE_STRIDE};
use crate::traces::{DecodeTraces, IgnoreTraces};
use bit_vec::BitVec;
use std::time::Instant;

/// Number of blue layers, each with its own boundary.
pub const LAYERS: usize = 256;

/// A vertical run of a single code along the blue axis, at a fixed red and green.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Seed {
	pub x: u8,
	pub y: u8,
	pub z_min: u8,
	/// Inclusive.
	pub z_max: u8,
	pub color: u8
}

/// Reads the palette into the cube. Returns false if the stream ended early, in which case the
/// remaining entries are left blank.
pub fn read_palette<S>(reader: &mut BitReader<S>, cube: &mut ColorCube) -> DecodeResult<bool> where S: ByteSource {
	for code in 0..PALETTE_LEN {
		let mut components = [0u8; 4];

		for component in components.iter_mut() {
			match reader.read_byte()? {
				Some(value) => *component = value,
				None => return Ok(false)
			}
		}

		let [red, green, blue, alpha] = components;
		cube.set_color(code as u8, Rgba::new(red, green, blue, alpha));
	}

	Ok(true)
}

/// Reads seeds until a color of 0, or the end of the stream. Color 0 cannot be seeded, as it
/// terminates the list.
pub fn read_seeds<S>(reader: &mut BitReader<S>) -> DecodeResult<Vec<Seed>> where S: ByteSource {
	let mut seeds = Vec::new();

	loop {
		let color = match reader.read_byte()? {
			Some(0) | None => return Ok(seeds),
			Some(color) => color
		};

		let mut fields = [0u8; 4];

		for field in fields.iter_mut() {
			match reader.read_byte()? {
				Some(value) => *field = value,
				None => return Ok(seeds)
			}
		}

		let [x, y, z_min, z_span] = fields;

		let z_max = match z_min.checked_add(z_span) {
			Some(z_max) => z_max,
			None => return Err(DecodeError::SeedOutOfRange { color, x, y, z_min, z_span })
		};

		seeds.push(Seed { x, y, z_min, z_max, color });
	}
}

/// Traces the boundaries of all 256 layers. Returns the layers and the total number of marks.
pub fn read_boundaries<S>(reader: &mut BitReader<S>) -> DecodeResult<(Vec<BitVec>, u64)> where S: ByteSource {
	let mut decoder = CurveDecoder::new();
	let mut layers = Vec::with_capacity(LAYERS);
	let mut marks = 0;

	for index in 0..LAYERS {
		let mut layer = boundary::empty_layer();

		marks += decoder.decode_layer(reader, &mut layer, index as u8)? as u64;
		layers.push(layer);
	}

	Ok((layers, marks))
}

/// Clears every cell of the cube, then writes each seed over its whole blue range.
pub fn plant_seeds(codes: &mut [u8], seeds: &[Seed]) {
	for code in codes.iter_mut() {
		*code = 0;
	}

	for seed in seeds {
		for z in seed.z_min..=seed.z_max {
			codes[cube::index(seed.x, seed.y, z)] = seed.color;
		}
	}
}

/// Floods every blue layer independently, never along the blue axis itself.
pub fn fill_layers(codes: &mut [u8], boundaries: &[BitVec]) -> FillStats {
	let mut stats = FillStats::default();

	for (layer, boundary) in codes.chunks_mut(LAYER_AREA).zip(boundaries.iter()) {
		stats.combine(fill::fill_plane(layer, boundary, LAYER_SIDE));
	}

	stats
}

/// Decodes a color cube from an already inflated byte source.
///
/// The decoder owns its source for the duration of the decode, and drops it when finished,
/// whether or not decoding succeeded.
pub struct ColorCubeDecoder<S, T = IgnoreTraces> where S: ByteSource, T: DecodeTraces {
	reader: BitReader<S>,
	traces: T
}

impl<S> ColorCubeDecoder<S, IgnoreTraces> where S: ByteSource {
	pub fn new(source: S) -> Self {
		ColorCubeDecoder {
			reader: BitReader::new(source),
			traces: IgnoreTraces
		}
	}
}

impl<S, T> ColorCubeDecoder<S, T> where S: ByteSource, T: DecodeTraces {
	pub fn with_traces<U>(self, traces: U) -> ColorCubeDecoder<S, U> where U: DecodeTraces {
		ColorCubeDecoder {
			reader: self.reader,
			traces
		}
	}

	pub fn decode(mut self) -> DecodeResult<ColorCube> {
		let start = Instant::now();
		let mut cube = ColorCube::new();

		let phase = Instant::now();
		read_palette(&mut self.reader, &mut cube)?;
		self.traces.palette(phase.elapsed());

		let phase = Instant::now();
		let seeds = read_seeds(&mut self.reader)?;
		self.traces.seeds(seeds.len(), phase.elapsed());

		let phase = Instant::now();
		let (boundaries, marks) = read_boundaries(&mut self.reader)?;
		self.traces.boundaries(marks, phase.elapsed());

		let phase = Instant::now();
		plant_seeds(cube.codes_mut(), &seeds);
		let stats = fill_layers(cube.codes_mut(), &boundaries);
		self.traces.fill(stats, phase.elapsed());

		// The boundaries take up 2 MiB, and are no longer needed.
		drop(boundaries);

		let phase = Instant::now();
		let stats = residual::correct(&mut self.reader, cube.codes_mut(), CUBE_STRIDE)?;
		self.traces.residual(stats, phase.elapsed());

		self.reader.close();
		self.traces.finished(cube.unresolved(), start.elapsed());

		Ok(cube)
	}
}
