use colorcube::ColorCube;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// Pixels with an alpha below this are transparent on a map, and always get code 0.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Renders the plane of the cube at a fixed blue value. Red runs along X, green along Y.
pub fn render_layer(cube: &ColorCube, blue: u8) -> RgbaImage {
	RgbaImage::from_fn(256, 256, |x, y| {
		Rgba(cube.nearest(x as u8, y as u8, blue).into_array())
	})
}

/// Maps every pixel of an image to a palette code, in row-major order.
pub fn quantize_codes(cube: &ColorCube, image: &RgbaImage) -> Vec<u8> {
	let pixels: &[u8] = image;

	pixels
		.par_chunks(4)
		.map(|pixel| {
			if pixel[3] < ALPHA_THRESHOLD {
				0
			} else {
				cube.get_code(pixel[0], pixel[1], pixel[2])
			}
		})
		.collect()
}

/// Replaces every pixel of an image with the palette color a map would show in its place.
pub fn quantize_image(cube: &ColorCube, image: &mut RgbaImage) {
	let codes = quantize_codes(cube, image);
	let pixels: &mut [u8] = image;

	pixels.par_chunks_mut(4).zip(codes.par_iter()).for_each(|(pixel, &code)| {
		pixel.copy_from_slice(&cube.get_color(code).into_array());
	});
}
