#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never carries `z` outside the circle of radius two.  Points
//! outside the set escape that circle eventually, and how long they
//! hang on before escaping is what gives the picture its glow.
//!
//! Each pixel of the image is divided along its diagonal into a
//! number of subpixels (the "magnification").  Every subpixel is
//! mapped onto the complex plane and tested; subpixels in the set
//! take the member colour, subpixels that escape take the divergent
//! colour scaled by how long they survived, and the pixel is the
//! average of its subpixels.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate itertools;
extern crate num;

pub mod buffer;
pub mod cancel;
pub mod config;
pub mod error;
pub mod escape;
pub mod output;
pub mod parse;
pub mod planes;
pub mod progress;
pub mod render;
pub mod tally;

pub use buffer::ImageBuffer;
pub use cancel::{CancelToken, NeverCancel};
pub use config::{Palette, RenderConfig, Rgb};
pub use error::RenderError;
pub use progress::{Chorus, ConsoleNarrator, Narrator, Silent, SpeechNarrator};
pub use render::Renderer;
