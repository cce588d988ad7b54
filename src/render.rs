// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The render loop.  Every pixel is sampled along its diagonal, every
//! sample is mapped to the complex plane and classified, and the
//! pixel's tally is blended straight into the image.  Pixels depend
//! only on the configuration, never on each other, so the image can
//! also be cut into bands of rows and rendered by several threads.

use crossbeam::channel;
use crossbeam::thread::ScopedJoinHandle;
use std::cmp;

use buffer::{write_pixel, ImageBuffer, CHANNELS};
use cancel::{CancelToken, NeverCancel};
use config::{RenderConfig, Rgb};
use error::RenderError;
use escape::{classify, DivergenceLevels};
use planes::PlaneMapper;
use progress::{Narrator, ProgressTracker};
use tally::PixelTally;

/// A validated configuration, with the plane mapping and brightness
/// table worked out once for the whole image.
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    plane: PlaneMapper,
    levels: DivergenceLevels,
}

impl Renderer {
    /// Validate the configuration and prepare to render it.  Nothing
    /// is computed if the configuration is bad.
    pub fn new(config: RenderConfig) -> Result<Renderer, RenderError> {
        config.validate()?;
        Ok(Renderer {
            plane: PlaneMapper::from_config(&config),
            levels: DivergenceLevels::new(config.divergence_iterations),
            config,
        })
    }

    /// The configuration being rendered.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The plane mapping in use.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The brightness table in use.
    pub fn levels(&self) -> &DivergenceLevels {
        &self.levels
    }

    /// Classify every subpixel of a pixel.  Subpixel `k` of `n` sits at
    /// `(x + k/n, y + k/n)` for `k` in `1..=n`.
    pub fn sample_pixel(&self, x: usize, y: usize) -> PixelTally {
        let mut tally = PixelTally::new();
        let n = self.config.magnification;
        for k in 1..=n {
            let offset = f64::from(k) / f64::from(n);
            let c = self.plane.pixel_to_point(x as f64 + offset, y as f64 + offset);
            let escape = classify(c, self.config.divergence_iterations);
            tally.record(self.levels.level_of(escape));
        }
        tally
    }

    /// The colour of a single pixel.
    pub fn shade_pixel(&self, x: usize, y: usize) -> Rgb {
        self.sample_pixel(x, y).shade(&self.config.palette)
    }

    /// Render the whole image on this thread, row by row, telling
    /// `narrator` how far along it is.
    pub fn render(&self, narrator: &mut dyn Narrator) -> Result<ImageBuffer, RenderError> {
        self.render_cancellable(narrator, &NeverCancel)
    }

    /// As `render`, checking `cancel` before every pixel.
    pub fn render_cancellable<C: CancelToken>(
        &self,
        narrator: &mut dyn Narrator,
        cancel: &C,
    ) -> Result<ImageBuffer, RenderError> {
        let (width, height) = (self.config.width, self.config.height);
        let mut buffer = ImageBuffer::new(width, height);
        let mut tracker =
            ProgressTracker::start(self.config.center, self.config.pixel_count(), narrator);

        for (done, (y, x)) in iproduct!(0..height, 0..width).enumerate() {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            buffer.put(x, y, self.shade_pixel(x, y));
            tracker.advance(done + 1, narrator);
        }
        Ok(buffer)
    }

    /// Render with `threads` workers, each owning a band of rows.  The
    /// workers report finished rows to this thread, which alone talks
    /// to `narrator`, so announcements still arrive in order.  One
    /// thread means the plain serial render.
    pub fn render_threaded<C: CancelToken>(
        &self,
        threads: usize,
        narrator: &mut dyn Narrator,
        cancel: &C,
    ) -> Result<ImageBuffer, RenderError> {
        if threads <= 1 {
            return self.render_cancellable(narrator, cancel);
        }

        let (width, height) = (self.config.width, self.config.height);
        let mut buffer = ImageBuffer::new(width, height);
        let mut tracker =
            ProgressTracker::start(self.config.center, self.config.pixel_count(), narrator);

        let band_rows = cmp::max(1, (height + threads - 1) / threads);
        let stride = buffer.stride();
        let (sender, receiver) = channel::unbounded::<usize>();

        let outcome = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Result<(), RenderError>>> = buffer
                .data_mut()
                .chunks_mut(band_rows * stride)
                .enumerate()
                .map(|(band, rows)| {
                    let sender = sender.clone();
                    spawner.spawn(move |_| {
                        self.render_band(band * band_rows, rows, cancel, &sender)
                    })
                })
                .collect();

            // Once the workers hang up, the receiver runs dry.
            drop(sender);
            let mut done = 0;
            for pixels in receiver.iter() {
                done += pixels;
                tracker.advance(done, narrator);
            }

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or(Err(RenderError::WorkerPanicked)))
                .collect::<Result<Vec<()>, RenderError>>()
        });

        match outcome {
            Ok(Ok(_)) => Ok(buffer),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(RenderError::WorkerPanicked),
        }
    }

    /// Fill a band of whole rows starting at row `first_row`, sending
    /// the pixel count of each finished row.
    fn render_band<C: CancelToken>(
        &self,
        first_row: usize,
        rows: &mut [u8],
        cancel: &C,
        finished: &channel::Sender<usize>,
    ) -> Result<(), RenderError> {
        let width = self.config.width;
        for (offset, row) in rows.chunks_mut(width * CHANNELS).enumerate() {
            let y = first_row + offset;
            for (x, cell) in row.chunks_mut(CHANNELS).enumerate() {
                if cancel.is_cancelled() {
                    return Err(RenderError::Cancelled);
                }
                write_pixel(cell, self.shade_pixel(x, y));
            }
            // The receiver outlives every worker.
            let _ = finished.send(width);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Palette;
    use num::Complex;
    use progress::Silent;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn palette() -> Palette {
        Palette {
            member: Rgb(10, 20, 30),
            divergent: Rgb(200, 100, 50),
        }
    }

    fn unit_square() -> Renderer {
        let config = RenderConfig::new(2, 2, palette())
            .with_center(Complex::new(0.0, 0.0))
            .with_top(1.0)
            .with_divergence_iterations(50);
        Renderer::new(config).unwrap()
    }

    #[test]
    fn bad_configurations_never_build_a_renderer() {
        assert!(Renderer::new(RenderConfig::new(3, 4, palette())).is_err());
        assert!(Renderer::new(RenderConfig::new(4, 4, palette()).with_top(0.0)).is_err());
    }

    #[test]
    fn single_sample_sits_at_the_far_corner() {
        // Pixel (0, 0) samples (1, 1), which is c = 0.
        let renderer = unit_square();
        let tally = renderer.sample_pixel(0, 0);
        assert_eq!(tally.mandelbrot, 1);
        assert_eq!(tally.divergence, 0);
        assert_eq!(renderer.shade_pixel(0, 0), palette().member);
    }

    #[test]
    fn escaping_pixels_are_dimmed_by_level() {
        let renderer = unit_square();
        // c = 1 survives 3 iterations: level 239 of 255.
        assert_eq!(renderer.shade_pixel(1, 0), Rgb(187, 93, 46));
        // c = 1 + i survives 2: level 230.
        assert_eq!(renderer.shade_pixel(1, 1), Rgb(180, 90, 45));
    }

    #[test]
    fn points_outside_the_circle_are_black() {
        // With top = 3, pixel (1, 0) samples c = 3.
        let config = RenderConfig::new(2, 2, palette())
            .with_center(Complex::new(0.0, 0.0))
            .with_top(3.0);
        let renderer = Renderer::new(config).unwrap();
        assert_eq!(renderer.sample_pixel(1, 0).divergence, 1);
        assert_eq!(renderer.shade_pixel(1, 0), Rgb(0, 0, 0));
    }

    #[test]
    fn magnification_sets_the_sample_count() {
        let config = RenderConfig::new(4, 4, palette()).with_magnification(5);
        let renderer = Renderer::new(config).unwrap();
        assert_eq!(renderer.sample_pixel(1, 2).samples(), 5);
    }

    #[test]
    fn serial_render_fills_the_buffer() {
        let renderer = unit_square();
        let buffer = renderer.render(&mut Silent).unwrap();
        assert_eq!(buffer.get(0, 0), Rgb(10, 20, 30));
        assert_eq!(buffer.get(1, 0), Rgb(187, 93, 46));
        assert_eq!(buffer.get(0, 1), Rgb(10, 20, 30));
        assert_eq!(buffer.get(1, 1), Rgb(180, 90, 45));
    }

    #[test]
    fn cancellation_stops_the_render() {
        let renderer = unit_square();
        let polls = AtomicUsize::new(0);
        let token = || polls.fetch_add(1, Ordering::SeqCst) >= 2;
        match renderer.render_cancellable(&mut Silent, &token) {
            Err(RenderError::Cancelled) => (),
            other => panic!("expected Cancelled, got {:?}", other),
        }
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn threads_agree_with_the_serial_render() {
        let config = RenderConfig::new(8, 6, palette()).with_magnification(3);
        let renderer = Renderer::new(config).unwrap();
        let serial = renderer.render(&mut Silent).unwrap();
        for threads in 2..=7 {
            let threaded = renderer
                .render_threaded(threads, &mut Silent, &NeverCancel)
                .unwrap();
            assert_eq!(threaded, serial);
        }
    }
}
