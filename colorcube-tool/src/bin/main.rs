extern crate clap;
extern crate colorcube;
extern crate colorcube_tool;
extern crate env_logger;
extern crate image;
#[macro_use]
extern crate log;
extern crate num_cpus;
extern crate rayon;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use colorcube::ColorCube;
use colorcube_tool::render;
use log::LevelFilter;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process;
use std::str::FromStr;
use std::time::Instant;

struct ToolOptions {
	cube: String,
	raw: bool,
	threads: usize
}

fn validate_number(number: String) -> Result<(), String> {
	match number.parse::<u32>() {
		Ok(x) => if x == 0 {
			Err("zero values are not a valid argument".to_owned())
		} else {
			Ok(())
		},
		Err(parse) => Err(parse.to_string())
	}
}

fn validate_blue(number: String) -> Result<(), String> {
	number.parse::<u8>().map(|_| ()).map_err(|_| "the blue value must be between 0 and 255".to_owned())
}

fn cube_arg<'a, 'b>() -> Arg<'a, 'b> {
	Arg::with_name("cube")
		.value_name("CUBE")
		.help("Compressed color cube file to decode")
		.required(true)
		.index(1)
}

fn main() {
	let matches = App::new("colorcube")
		.version("0.1.0")
		.author("coderbot16 <coderbot16@gmail.com>")
		.about("Decodes, inspects, and applies map color cubes")
		.setting(AppSettings::SubcommandRequiredElseHelp)
		.arg(Arg::with_name("verbose")
			.short("v")
			.long("verbose")
			.help("Prints timings and statistics for every phase of the decode")
			.global(true)
		)
		.arg(Arg::with_name("raw")
			.long("raw")
			.help("Treats the cube file as already inflated")
			.global(true)
		)
		.arg(Arg::with_name("threads")
			.short("j")
			.long("threads")
			.value_name("COUNT")
			.help("Configures the number of threads used for quantizing images (default: CPU count)")
			.takes_value(true)
			.validator(validate_number)
			.global(true)
		)
		.subcommand(SubCommand::with_name("info")
			.about("Prints the palette, and how many colors map to each entry")
			.arg(cube_arg())
		)
		.subcommand(SubCommand::with_name("slice")
			.about("Renders the plane of the cube at a single blue value")
			.arg(cube_arg())
			.arg(Arg::with_name("blue")
				.value_name("BLUE")
				.help("Blue value of the plane")
				.required(true)
				.index(2)
				.validator(validate_blue)
			)
			.arg(Arg::with_name("output")
				.value_name("OUTPUT")
				.help("PNG file to write")
				.required(true)
				.index(3)
			)
		)
		.subcommand(SubCommand::with_name("quantize")
			.about("Recolors an image the way it would appear on a map")
			.arg(cube_arg())
			.arg(Arg::with_name("input")
				.value_name("INPUT")
				.help("Image to recolor")
				.required(true)
				.index(2)
			)
			.arg(Arg::with_name("output")
				.value_name("OUTPUT")
				.help("PNG file to write")
				.required(true)
				.index(3)
			)
		)
		.get_matches();

	let (name, sub) = match matches.subcommand() {
		(name, Some(sub)) => (name, sub),
		_ => unreachable!("clap requires a subcommand")
	};

	let verbose = matches.is_present("verbose") || sub.is_present("verbose");

	env_logger::Builder::new()
		.filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
		.parse_default_env()
		.init();

	let threads = sub.value_of("threads")
		.or_else(|| matches.value_of("threads"))
		.map(|value| usize::from_str(value).unwrap_or(1))
		.unwrap_or_else(num_cpus::get);

	let options = ToolOptions {
		cube: sub.value_of("cube").unwrap_or_default().to_owned(),
		raw: matches.is_present("raw") || sub.is_present("raw"),
		threads
	};

	if let Err(e) = execute(name, sub, options) {
		error!("{}", e);
		process::exit(1);
	}
}

fn execute(name: &str, sub: &ArgMatches, options: ToolOptions) -> Result<(), Box<dyn Error>> {
	rayon::ThreadPoolBuilder::new().num_threads(options.threads).build_global()?;

	let start = Instant::now();
	let cube = if options.raw {
		ColorCube::from_raw(BufReader::new(File::open(&options.cube)?))?
	} else {
		ColorCube::load(&options.cube)?
	};

	println!("[=======] Decoded {} in {}ms", options.cube, start.elapsed().as_millis());

	match name {
		"info" => info(&cube),
		"slice" => {
			let blue = sub.value_of("blue").map(u8::from_str).unwrap_or(Ok(0))?;
			let output = sub.value_of("output").unwrap_or_default();

			render::render_layer(&cube, blue).save(output)?;
			println!("[=======] Wrote plane at blue {} to {}", blue, output);
		},
		"quantize" => {
			let input = sub.value_of("input").unwrap_or_default();
			let output = sub.value_of("output").unwrap_or_default();

			let quantize_start = Instant::now();
			let mut image = image::open(input)?.to_rgba8();

			render::quantize_image(&cube, &mut image);
			image.save(output)?;

			println!(
				"[=======] Quantized {}x{} image to {} in {}ms using {} thread(s)",
				image.width(),
				image.height(),
				output,
				quantize_start.elapsed().as_millis(),
				options.threads
			);
		},
		other => unreachable!("unknown subcommand {}", other)
	}

	Ok(())
}

fn info(cube: &ColorCube) {
	let histogram = cube.histogram();
	let used = histogram.iter().skip(1).filter(|&&count| count != 0).count();

	println!("[=======] {} of 255 palette entries are in use", used);

	for (code, &count) in histogram.iter().enumerate() {
		let color = cube.get_color(code as u8);

		if count == 0 && color.alpha == 0 {
			continue;
		}

		println!(
			"{:3}: #{:02X}{:02X}{:02X}{:02X} {:9} cells",
			code, color.red, color.green, color.blue, color.alpha, count
		);
	}

	let unresolved = cube.unresolved();

	if unresolved != 0 {
		println!("warning: {} cells were left unresolved and hold code 0", unresolved);
	}
}
