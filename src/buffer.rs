// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The rendered image: RGB bytes, row-major, top row first.

use config::Rgb;

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// A dense `height x width` grid of RGB pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// A black image.
    pub fn new(width: usize, height: usize) -> ImageBuffer {
        ImageBuffer {
            width,
            height,
            data: vec![0 as u8; width * height * CHANNELS],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of bytes in one row.
    pub fn stride(&self) -> usize {
        self.width * CHANNELS
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(x < self.width && y < self.height);
        (y * self.width + x) * CHANNELS
    }

    /// The pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        let o = self.offset(x, y);
        Rgb(self.data[o], self.data[o + 1], self.data[o + 2])
    }

    /// Set the pixel at column `x`, row `y`.
    pub fn put(&mut self, x: usize, y: usize, color: Rgb) {
        let o = self.offset(x, y);
        write_pixel(&mut self.data[o..o + CHANNELS], color);
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> Vec<Rgb> {
        (0..self.width).map(|x| self.get(x, y)).collect()
    }

    /// The raw bytes, ready for an encoder.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, keeping its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

/// Copy a colour into a three-byte cell.
#[inline]
pub(crate) fn write_pixel(cell: &mut [u8], color: Rgb) {
    cell[0] = color.0;
    cell[1] = color.1;
    cell[2] = color.2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_are_row_major() {
        let mut buffer = ImageBuffer::new(4, 2);
        buffer.put(1, 1, Rgb(1, 2, 3));
        assert_eq!(buffer.get(1, 1), Rgb(1, 2, 3));
        assert_eq!(&buffer.as_raw()[15..18], &[1, 2, 3]);
        assert_eq!(buffer.stride(), 12);
        assert_eq!(buffer.row(0), vec![Rgb(0, 0, 0); 4]);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_is_a_bug() {
        ImageBuffer::new(2, 2).get(2, 0);
    }
}
