// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate failure;
extern crate mandelbrot;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::output::{ensure_dir, image_filename, write_image, IMAGE_DIR};
use mandelbrot::parse::{parse_color_entry, parse_complex, parse_pair};
use mandelbrot::progress::DEFAULT_SPEECH_COMMAND;
use mandelbrot::{
    Chorus, ConsoleNarrator, NeverCancel, Palette, RenderConfig, Renderer, SpeechNarrator,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const SIZE: &str = "size";
const CENTER: &str = "center";
const TOP: &str = "top";
const MAGNIFICATION: &str = "magnification";
const ITERATIONS: &str = "iterations";
const COLOR: &str = "color";
const THREADS: &str = "threads";
const DIR: &str = "dir";
const OUTPUT: &str = "output";
const QUIET: &str = "quiet";
const NO_SPEAK: &str = "no-speak";
const SPEECH_COMMAND: &str = "speech-command";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelbrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Supersampled Mandelbrot renderer")
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, WIDTHxHEIGHT; both must be even"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.66,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Point of the complex plane at the centre of the image, RE,IM"),
        )
        .arg(
            Arg::with_name(TOP)
                .required(false)
                .long(TOP)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.6")
                .validator(|s| {
                    f64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse top".to_string())
                })
                .help("Imaginary coordinate of the top row of pixels"),
        )
        .arg(
            Arg::with_name(MAGNIFICATION)
                .required(false)
                .long(MAGNIFICATION)
                .short("m")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse magnification",
                        "Magnification must be between 1 and 1024",
                    )
                })
                .help("Number of subpixels sampled per pixel"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1600")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iterations before a point is taken to be in the set"),
        )
        .arg(
            Arg::with_name(COLOR)
                .required(true)
                .long(COLOR)
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .validator(|s| match parse_color_entry(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse color, expected KEY=R,G,B".to_string()),
                })
                .help("Colour table entry: m=R,G,B for the set, d=R,G,B for divergence"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the renderer"),
        )
        .arg(
            Arg::with_name(DIR)
                .required(false)
                .long(DIR)
                .short("d")
                .takes_value(true)
                .default_value(IMAGE_DIR)
                .help("Directory for images named after their view"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Write to this file instead of the conventionally named one in --dir"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("Do not print progress"),
        )
        .arg(
            Arg::with_name(NO_SPEAK)
                .long(NO_SPEAK)
                .help("Do not read progress aloud"),
        )
        .arg(
            Arg::with_name(SPEECH_COMMAND)
                .required(false)
                .long(SPEECH_COMMAND)
                .takes_value(true)
                .default_value(DEFAULT_SPEECH_COMMAND)
                .help("Text-to-speech program used to read progress aloud"),
        )
        .get_matches()
}

// Validators have already vetted every value, but a missing colour
// key can only be caught once the whole table is known.
fn config_from(matches: &ArgMatches) -> Result<RenderConfig, failure::Error> {
    let (width, height) = parse_pair(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))?;
    let center = parse_complex(matches.value_of(CENTER).unwrap_or_default())
        .ok_or_else(|| failure::err_msg("Error parsing center point"))?;
    let top = f64::from_str(matches.value_of(TOP).unwrap_or_default())?;
    let magnification = u32::from_str(matches.value_of(MAGNIFICATION).unwrap_or_default())?;
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap_or_default())?;

    let mut colors = HashMap::new();
    for entry in matches.values_of(COLOR).into_iter().flatten() {
        if let Some((key, color)) = parse_color_entry(entry) {
            colors.insert(key, color);
        }
    }
    let palette = Palette::from_map(&colors)?;

    Ok(RenderConfig::new(width, height, palette)
        .with_center(center)
        .with_top(top)
        .with_magnification(magnification)
        .with_divergence_iterations(iterations)
        .with_speak(!matches.is_present(NO_SPEAK)))
}

fn run(matches: &ArgMatches) -> Result<PathBuf, failure::Error> {
    let config = config_from(matches)?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or_default())?;
    let renderer = Renderer::new(config)?;

    let mut narrator = Chorus::new();
    if !matches.is_present(QUIET) {
        narrator = narrator.with(ConsoleNarrator);
    }
    if config.speak {
        let program = matches.value_of(SPEECH_COMMAND).unwrap_or(DEFAULT_SPEECH_COMMAND);
        narrator = narrator.with(SpeechNarrator::new(program));
    }

    let buffer = renderer.render_threaded(threads, &mut narrator, &NeverCancel)?;
    drop(narrator);

    let path = match matches.value_of(OUTPUT) {
        Some(file) => PathBuf::from(file),
        None => {
            let dir = Path::new(matches.value_of(DIR).unwrap_or(IMAGE_DIR));
            ensure_dir(dir)?;
            dir.join(image_filename(&config))
        }
    };
    write_image(&path, &buffer)?;
    Ok(path)
}

fn main() {
    let matches = args();
    match run(&matches) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(path) => {
            if !matches.is_present(QUIET) {
                println!("Wrote {}", path.display());
            }
        }
    }
}
