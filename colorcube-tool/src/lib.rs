extern crate colorcube;
extern crate image;
extern crate rayon;

/// Turning a cube back into pictures, and pictures into palette codes.
pub mod render;
