#![forbid(unsafe_code)]

//! # `colorcube`: Map color lookup cubes
//!
//! Map items only know a fixed palette of 256 colors, so every image that ends up on a map
//! has to be quantized, pixel by pixel, to the nearest palette entry. Searching the palette for
//! each pixel is far too slow, so the nearest entry for every possible 24-bit color is
//! precomputed into a 256x256x256 cube of palette codes.
//!
//! Storing that cube directly costs 16 MiB, so it is shipped in a compact format instead:
//!
//!  * Large regions of a single code are described by seeds: vertical runs along the blue axis
//!  * The edges between regions are traced, one blue layer at a time, by a chain coded curve
//!  * Each layer is flood filled from the seeds up to the traced edges
//!  * Whatever the geometry could not resolve is patched by a per-cell residual stream
//!
//! This crate decodes that format into a [`ColorCube`]. There is no encoder.
//!
//! ```no_run
//! use colorcube::ColorCube;
//!
//! let cube = ColorCube::load("colors.bin").unwrap();
//! let code = cube.get_code(255, 128, 0);
//! let color = cube.get_color(code);
//! ```

// Packed bit grids for the traced boundaries
extern crate bit_vec;

// Zlib wrapping of the shipped cube files
extern crate flate2;

#[macro_use]
extern crate log;

/// LSB first bit extraction on top of any byte source.
pub mod bits;

/// Chain coded boundary curves, one blue layer at a time.
pub mod boundary;

pub mod cube;
pub mod decoder;
mod error;

/// Flood fill of a single layer from its seeds up to its boundary.
pub mod fill;

mod load;
pub mod residual;
pub mod traces;

pub use bits::{BitReader, ByteSource};
pub use cube::{ColorCube, Rgba};
pub use decoder::{ColorCubeDecoder, Seed};
pub use error::{DecodeError, DecodeResult};
pub use traces::{DecodeTraces, IgnoreTraces, LogTraces};
