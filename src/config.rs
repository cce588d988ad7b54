// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The immutable description of one render: how big, where, how
//! closely sampled, how hard to iterate, and in what colours.

use num::Complex;
use std::collections::HashMap;

use error::RenderError;

/// Key of the set-member colour in a colour table.
pub const MEMBER_KEY: &str = "m";
/// Key of the divergent colour in a colour table.
pub const DIVERGENT_KEY: &str = "d";

/// With the default top, this centre places the whole set in the
/// middle of the image.
pub const DEFAULT_CENTER: Complex<f64> = Complex { re: -0.66, im: 0.0 };
/// Default imaginary coordinate of the top row of pixels.
pub const DEFAULT_TOP: f64 = 1.6;
/// Default number of subpixels per pixel.
pub const DEFAULT_MAGNIFICATION: u32 = 1;
/// Default escape-time budget.
pub const DEFAULT_DIVERGENCE_ITERATIONS: u32 = 1600;

/// An 8-bit red, green, blue triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The channels as floats, for blending.
    pub fn channels(&self) -> [f64; 3] {
        [f64::from(self.0), f64::from(self.1), f64::from(self.2)]
    }
}

/// The colour table: one colour for points in the set, one for
/// points that escape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Colour of subpixels in the Mandelbrot set.
    pub member: Rgb,
    /// Colour of escaping subpixels at full brightness.
    pub divergent: Rgb,
}

impl Palette {
    /// Build a palette from a table keyed by `"m"` and `"d"`.  Other
    /// keys are ignored.
    pub fn from_map(colors: &HashMap<String, Rgb>) -> Result<Palette, RenderError> {
        let lookup = |key: &str| {
            colors
                .get(key)
                .cloned()
                .ok_or_else(|| RenderError::MissingColor {
                    key: key.to_string(),
                })
        };
        Ok(Palette {
            member: lookup(MEMBER_KEY)?,
            divergent: lookup(DIVERGENT_KEY)?,
        })
    }
}

/// Everything the renderer needs to know.  Build with `new`, adjust
/// with the `with_*` methods, and let `Renderer::new` validate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.  Must be even.
    pub width: usize,
    /// Image height in pixels.  Must be even.
    pub height: usize,
    /// The point of the complex plane at the centre pixel.
    pub center: Complex<f64>,
    /// The imaginary coordinate of the top row of pixels.
    pub top: f64,
    /// Subpixels sampled per pixel.
    pub magnification: u32,
    /// How many iterations before a point is declared a member.
    pub divergence_iterations: u32,
    /// Member and divergent colours.
    pub palette: Palette,
    /// Whether progress should also be read aloud.
    pub speak: bool,
}

impl RenderConfig {
    /// A configuration of the given size and colours, with every
    /// other setting at its default.
    pub fn new(width: usize, height: usize, palette: Palette) -> RenderConfig {
        RenderConfig {
            width,
            height,
            center: DEFAULT_CENTER,
            top: DEFAULT_TOP,
            magnification: DEFAULT_MAGNIFICATION,
            divergence_iterations: DEFAULT_DIVERGENCE_ITERATIONS,
            palette,
            speak: true,
        }
    }

    /// Move the centre of the image.
    pub fn with_center(mut self, center: Complex<f64>) -> RenderConfig {
        self.center = center;
        self
    }

    /// Move the top row of the image.
    pub fn with_top(mut self, top: f64) -> RenderConfig {
        self.top = top;
        self
    }

    /// Change the number of subpixels per pixel.
    pub fn with_magnification(mut self, magnification: u32) -> RenderConfig {
        self.magnification = magnification;
        self
    }

    /// Change the escape-time budget.
    pub fn with_divergence_iterations(mut self, iterations: u32) -> RenderConfig {
        self.divergence_iterations = iterations;
        self
    }

    /// Turn spoken progress on or off.
    pub fn with_speak(mut self, speak: bool) -> RenderConfig {
        self.speak = speak;
        self
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Check every precondition of a render.  Resolution is checked
    /// first, then vertical extent, then the sampling budgets.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 || self.width % 2 == 1 || self.height % 2 == 1 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }

        // Also rejects a NaN top or centre.
        if !(self.center.im < self.top) {
            return Err(RenderError::InvalidVerticalExtent {
                imaginary: self.center.im,
                top: self.top,
            });
        }

        if self.magnification == 0 {
            return Err(RenderError::ZeroMagnification);
        }

        if self.divergence_iterations == 0 {
            return Err(RenderError::ZeroIterations);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette {
            member: Rgb(255, 0, 0),
            divergent: Rgb(0, 0, 255),
        }
    }

    #[test]
    fn defaults_match_the_classic_view() {
        let config = RenderConfig::new(640, 480, palette());
        assert_eq!(config.center, Complex::new(-0.66, 0.0));
        assert_eq!(config.top, 1.6);
        assert_eq!(config.magnification, 1);
        assert_eq!(config.divergence_iterations, 1600);
        assert!(config.speak);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn odd_sizes_are_rejected() {
        for &(w, h) in &[(5, 4), (4, 5), (3, 3), (0, 4)] {
            match RenderConfig::new(w, h, palette()).validate() {
                Err(RenderError::InvalidResolution { width, height }) => {
                    assert_eq!((width, height), (w, h))
                }
                other => panic!("expected InvalidResolution, got {:?}", other),
            }
        }
    }

    #[test]
    fn centre_at_or_above_top_is_rejected() {
        for &im in &[1.6, 2.0] {
            let config = RenderConfig::new(4, 4, palette()).with_center(Complex::new(0.0, im));
            match config.validate() {
                Err(RenderError::InvalidVerticalExtent { .. }) => (),
                other => panic!("expected InvalidVerticalExtent, got {:?}", other),
            }
        }
    }

    #[test]
    fn resolution_is_checked_before_extent() {
        let config = RenderConfig::new(3, 4, palette()).with_top(-1.0);
        match config.validate() {
            Err(RenderError::InvalidResolution { .. }) => (),
            other => panic!("expected InvalidResolution, got {:?}", other),
        }
    }

    #[test]
    fn zero_budgets_are_rejected() {
        match RenderConfig::new(4, 4, palette()).with_magnification(0).validate() {
            Err(RenderError::ZeroMagnification) => (),
            other => panic!("expected ZeroMagnification, got {:?}", other),
        }
        match RenderConfig::new(4, 4, palette())
            .with_divergence_iterations(0)
            .validate()
        {
            Err(RenderError::ZeroIterations) => (),
            other => panic!("expected ZeroIterations, got {:?}", other),
        }
    }

    #[test]
    fn palette_requires_both_keys() {
        let mut colors = HashMap::new();
        colors.insert("m".to_string(), Rgb(1, 2, 3));
        match Palette::from_map(&colors) {
            Err(RenderError::MissingColor { key }) => assert_eq!(key, "d"),
            other => panic!("expected MissingColor, got {:?}", other),
        }

        colors.insert("d".to_string(), Rgb(4, 5, 6));
        let palette = Palette::from_map(&colors).unwrap();
        assert_eq!(palette.member, Rgb(1, 2, 3));
        assert_eq!(palette.divergent, Rgb(4, 5, 6));
    }
}
