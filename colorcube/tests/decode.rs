extern crate colorcube;
extern crate flate2;
extern crate tempfile;

mod common;

use colorcube::cube::CUBE_LEN;
use colorcube::{ColorCube, ColorCubeDecoder, DecodeError, Rgba};
use common::BitWriter;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, ErrorKind, Read, Write};

/// One seed covering every layer at (0, 0), and no boundaries at all.
fn single_seed_stream(color: u8) -> Vec<u8> {
	let mut writer = BitWriter::new();

	writer.palette();
	writer.seed(color, 0, 0, 0, 255);
	writer.end_seeds();
	writer.empty_layers(256);

	writer.finish()
}

/// Like `single_seed_stream`, but layer 0 has a wall along R = 2 that keeps the seed out of
/// everything past it.
fn walled_stream() -> BitWriter {
	let mut writer = BitWriter::new();

	writer.palette();
	writer.seed(7, 0, 0, 0, 255);
	writer.end_seeds();

	writer.jump(2, 0);
	for _ in 0..255 {
		writer.step_y();
	}
	// No-op that byte aligns the end of the boundaries, so that no padding bits are taken as
	// residual corrections.
	writer.face_up();
	writer.stop();

	writer.empty_layers(255);

	writer
}

#[test]
fn test_unobstructed_fill() {
	let data = single_seed_stream(1);
	let cube = ColorCubeDecoder::new(&data[..]).decode().unwrap();

	assert_eq!(cube.unresolved(), 0);

	for (index, &code) in cube.codes().iter().enumerate() {
		if code != 1 {
			panic!("cell {} (r: {}, g: {}, b: {}) holds {} instead of 1", index, index & 255, (index >> 8) & 255, index >> 16, code);
		}
	}

	assert_eq!(cube.get_color(1), Rgba::new(1, 254, 0, 255));
	assert_eq!(cube.nearest(200, 100, 50), Rgba::new(1, 254, 0, 255));
}

#[test]
fn test_wall_leaves_cells_to_residual() {
	// No residual stream at all
	let data = walled_stream().finish();
	let cube = ColorCubeDecoder::new(&data[..]).decode().unwrap();

	// Everything from R = 2 onwards in layer 0 is still unresolved
	assert_eq!(cube.unresolved(), 254 * 256);

	for g in 0..=255 {
		assert_eq!(cube.get_code(0, g, 0), 7);
		assert_eq!(cube.get_code(1, g, 0), 7);
		assert_eq!(cube.get_code(2, g, 0), 0);
		assert_eq!(cube.get_code(255, g, 0), 0);
		assert_eq!(cube.get_code(255, g, 1), 7);
	}
}

#[test]
fn test_residual_resolves_walled_cells() {
	let mut writer = walled_stream();

	// The first unresolved cell is (2, 0, 0): give it a literal, then let every other cell
	// copy its left neighbor.
	writer.literal(3);
	for _ in 1..(254 * 256) {
		writer.copy_previous_r();
	}

	let data = writer.finish();
	let cube = ColorCubeDecoder::new(&data[..]).decode().unwrap();

	assert_eq!(cube.unresolved(), 0);

	assert_eq!(cube.get_code(2, 0, 0), 3);
	assert_eq!(cube.get_code(255, 0, 0), 3);
	assert_eq!(cube.get_code(1, 0, 0), 7);

	for g in 1..=255 {
		assert_eq!(cube.get_code(2, g, 0), 7, "wall cell at g = {} should copy from R = 1", g);
		assert_eq!(cube.get_code(255, g, 0), 7);
	}
}

#[test]
fn test_residual_literal_ignores_neighbors() {
	let mut writer = BitWriter::new();

	writer.palette();
	writer.seed(1, 0, 0, 0, 255);
	writer.end_seeds();

	// Layer 5 marks its far corner, which nothing is allowed to fill.
	writer.empty_layers(5);
	writer.jump(255, 255);
	writer.stop();
	writer.empty_layers(250);

	writer.literal(42);

	let data = writer.finish();
	let cube = ColorCubeDecoder::new(&data[..]).decode().unwrap();

	assert_eq!(cube.unresolved(), 0);
	assert_eq!(cube.get_code(255, 255, 5), 42);
	assert_eq!(cube.get_code(254, 255, 5), 1);
	assert_eq!(cube.get_code(255, 255, 4), 1);
}

#[test]
fn test_empty_stream() {
	let data: [u8; 0] = [];
	let cube = ColorCubeDecoder::new(&data[..]).decode().unwrap();

	assert_eq!(cube.unresolved(), CUBE_LEN);
	assert_eq!(cube.get_color(255), Rgba::default());
}

#[test]
fn test_io_error_aborts() {
	struct Failing {
		remaining: usize
	}

	impl Read for Failing {
		fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
			if self.remaining == 0 {
				return Err(io::Error::new(ErrorKind::Other, "source went away"));
			}

			let len = buf.len().min(self.remaining);

			for byte in &mut buf[..len] {
				*byte = 0x11;
			}

			self.remaining -= len;

			Ok(len)
		}
	}

	match ColorCubeDecoder::new(Failing { remaining: 100 }).decode() {
		Err(DecodeError::Io(error)) => assert_eq!(error.kind(), ErrorKind::Other),
		other => panic!("expected an I/O error, got {:?}", other)
	}
}

#[test]
fn test_compressed_sources() {
	let data = single_seed_stream(9);

	let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(&data).unwrap();
	let compressed = encoder.finish().unwrap();

	let cube = ColorCube::from_compressed(&compressed[..]).unwrap();
	assert_eq!(cube.unresolved(), 0);
	assert_eq!(cube.get_code(128, 128, 128), 9);

	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(&compressed).unwrap();
	file.flush().unwrap();

	let cube = ColorCube::load(file.path()).unwrap();
	assert_eq!(cube.get_code(0, 255, 17), 9);
	assert_eq!(cube.get_color(9), Rgba::new(9, 246, 4, 255));
}

#[test]
fn test_missing_file() {
	match ColorCube::load("this/file/does/not/exist.bin") {
		Err(DecodeError::Io(error)) => assert_eq!(error.kind(), ErrorKind::NotFound),
		other => panic!("expected an I/O error, got {:?}", other)
	}
}

#[test]
fn test_independent_decodes() {
	let first = single_seed_stream(4);
	let second = single_seed_stream(5);

	let a = ColorCubeDecoder::new(&first[..]).decode().unwrap();
	let b = ColorCubeDecoder::new(&second[..]).decode().unwrap();

	assert_eq!(a.get_code(10, 20, 30), 4);
	assert_eq!(b.get_code(10, 20, 30), 5);
}
