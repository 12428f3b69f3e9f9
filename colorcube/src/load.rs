use crate::cube::ColorCube;
use crate::decoder::ColorCubeDecoder;
use crate::error::DecodeResult;
use crate::traces::LogTraces;
use flate2::read::ZlibDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl ColorCube {
	/// Loads a zlib compressed cube from a file.
	pub fn load<P>(path: P) -> DecodeResult<ColorCube> where P: AsRef<Path> {
		let path = path.as_ref();

		debug!("Loading color cube from {}", path.display());

		ColorCube::from_compressed(BufReader::new(File::open(path)?))
	}

	/// Decodes a zlib compressed cube.
	pub fn from_compressed<R>(reader: R) -> DecodeResult<ColorCube> where R: Read {
		ColorCube::from_raw(BufReader::new(ZlibDecoder::new(reader)))
	}

	/// Decodes a cube that has already been inflated.
	pub fn from_raw<R>(reader: R) -> DecodeResult<ColorCube> where R: Read {
		ColorCubeDecoder::new(reader).with_traces(LogTraces).decode()
	}
}
