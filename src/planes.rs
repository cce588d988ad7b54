// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which relates the integral plane
//! of the image, with its origin at the top-left pixel, to the
//! complex plane, anchored at a centre point and scaled so that the
//! top row of pixels sits at a chosen imaginary coordinate.
use num::Complex;

use config::RenderConfig;

/// Describes the x, y of a pixel in the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixel and subpixel coordinates onto the complex plane.  The
/// transform is affine, and `unit_per_pixel` is the only thing worth
/// computing ahead of time.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The pixel that corresponds to `center`.  Halves of the image
    /// dimensions, which is why they must be even.
    pub center_pixel: Pixel,
    /// The point of the complex plane at the centre pixel.
    pub center: Complex<f64>,
    // The width and height of a single pixel on the complex plane.
    unit_per_pixel: f64,
}

impl PlaneMapper where {
    /// Constructor.  Takes the image size, the centre of the image on
    /// the complex plane, and the imaginary coordinate of the top row.
    /// Assumes the caller has already validated these.
    pub fn new(width: usize, height: usize, center: Complex<f64>, top: f64) -> PlaneMapper {
        PlaneMapper {
            center_pixel: Pixel(width / 2, height / 2),
            center,
            unit_per_pixel: (top - center.im) / ((height / 2) as f64),
        }
    }

    /// The mapper for a (validated) render configuration.
    pub fn from_config(config: &RenderConfig) -> PlaneMapper {
        PlaneMapper::new(config.width, config.height, config.center, config.top)
    }

    /// The side of one pixel, measured on the complex plane.
    pub fn unit_per_pixel(&self) -> f64 {
        self.unit_per_pixel
    }

    /// Given a pixel or subpixel position, return the point of the
    /// complex plane it covers.
    ///
    /// The imaginary part is offset by *minus* the centre's imaginary
    /// part, so the centre pixel lands on the conjugate of `center`.
    /// Rendered images have always been made this way; keep it.
    pub fn pixel_to_point(&self, x: f64, y: f64) -> Complex<f64> {
        Complex::new(
            (x - self.center_pixel.0 as f64) * self.unit_per_pixel + self.center.re,
            (y - self.center_pixel.1 as f64) * self.unit_per_pixel - self.center.im,
        )
    }

    /// The point under the top-left corner of a whole pixel.
    pub fn pixel_corner(&self, pixel: &Pixel) -> Complex<f64> {
        self.pixel_to_point(pixel.0 as f64, pixel.1 as f64)
    }
}
