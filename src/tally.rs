// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-pixel bookkeeping.  A pixel's subpixels are counted as they
//! are classified, and the counts are blended into a single colour.

use num::clamp;

use config::{Palette, Rgb};
use escape::LEVEL_COUNT;

/// Running counts for the subpixels of one pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PixelTally {
    /// Subpixels that stayed in the set.
    pub mandelbrot: u32,
    /// Subpixels that escaped.
    pub divergence: u32,
    level_sum: u64,
}

impl PixelTally {
    /// An empty tally.
    pub fn new() -> PixelTally {
        PixelTally::default()
    }

    /// Count one subpixel: `None` for a member of the set, or the
    /// brightness level of an escaping one.
    pub fn record(&mut self, level: Option<usize>) {
        match level {
            None => self.mandelbrot += 1,
            Some(level) => {
                self.divergence += 1;
                self.level_sum += level as u64;
            }
        }
    }

    /// Number of subpixels counted.
    pub fn samples(&self) -> u32 {
        self.mandelbrot + self.divergence
    }

    /// The brightness shared by all escaping subpixels: their mean
    /// level over the number of levels, in `[0, 1)`.
    pub fn brightness(&self) -> f64 {
        if self.divergence == 0 {
            return 0.0;
        }
        (self.level_sum as f64 / f64::from(self.divergence)) / LEVEL_COUNT as f64
    }

    /// Blend the tally into a colour.  Members contribute the member
    /// colour, escapees the divergent colour dimmed by `brightness`,
    /// and the pixel is the mean, truncated to bytes.  An empty tally
    /// is black.
    pub fn shade(&self, palette: &Palette) -> Rgb {
        let samples = self.samples();
        if samples == 0 {
            return Rgb(0, 0, 0);
        }

        let brightness = self.brightness();
        let member = palette.member.channels();
        let divergent = palette.divergent.channels();
        let mut out = [0u8; 3];
        for (channel, value) in out.iter_mut().enumerate() {
            let sum = f64::from(self.mandelbrot) * member[channel]
                + f64::from(self.divergence) * (divergent[channel] * brightness);
            *value = clamp(sum / f64::from(samples), 0.0, 255.0) as u8;
        }
        Rgb(out[0], out[1], out[2])
    }
}
