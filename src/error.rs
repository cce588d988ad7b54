// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between a configuration and a file on
//! disk.  The escape-time arithmetic itself never fails; all of these
//! are either a bad configuration, caught before the first pixel, or
//! a problem talking to the outside world.

use std::io;

/// The one error type of the renderer.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The centre pixel is found by halving the image dimensions, so
    /// both must be even (and, to be an image at all, non-zero).
    #[fail(
        display = "image size {}x{} is invalid: both dimensions must be even and non-zero",
        width, height
    )]
    InvalidResolution {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The top row must lie above the centre, or the image has no
    /// vertical extent.
    #[fail(
        display = "the centre's imaginary part ({}) must be below the top of the image ({})",
        imaginary, top
    )]
    InvalidVerticalExtent {
        /// The imaginary part of the requested centre.
        imaginary: f64,
        /// The requested top.
        top: f64,
    },

    /// Every pixel needs at least one subpixel.
    #[fail(display = "magnification must be at least 1")]
    ZeroMagnification,

    /// A budget of zero iterations would put every point in the set.
    #[fail(display = "divergence iterations must be at least 1")]
    ZeroIterations,

    /// The colour table lacks one of its two required entries.
    #[fail(display = "missing color for key \"{}\"", key)]
    MissingColor {
        /// The absent key, `m` or `d`.
        key: String,
    },

    /// The output directory could not be created.
    #[fail(display = "could not create output directory {}: {}", path, cause)]
    CreateDirectory {
        /// The directory we tried to create.
        path: String,
        /// What the filesystem said.
        #[fail(cause)]
        cause: io::Error,
    },

    /// The image could not be encoded or written.
    #[fail(display = "could not write image {}: {}", path, cause)]
    WriteImage {
        /// The file we tried to write.
        path: String,
        /// What the encoder or filesystem said.
        #[fail(cause)]
        cause: io::Error,
    },

    /// The render was stopped through its cancellation token.
    #[fail(display = "render cancelled")]
    Cancelled,

    /// A worker thread panicked while rendering its band.
    #[fail(display = "a render thread panicked")]
    WorkerPanicked,
}

impl RenderError {
    /// True for the errors that mean the configuration was unusable,
    /// as opposed to trouble during or after rendering.
    pub fn is_config_error(&self) -> bool {
        match *self {
            RenderError::InvalidResolution { .. }
            | RenderError::InvalidVerticalExtent { .. }
            | RenderError::ZeroMagnification
            | RenderError::ZeroIterations
            | RenderError::MissingColor { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use failure::Fail;

    #[test]
    fn resolution_message_names_both_dimensions() {
        let e = RenderError::InvalidResolution {
            width: 5,
            height: 4,
        };
        assert_eq!(
            e.to_string(),
            "image size 5x4 is invalid: both dimensions must be even and non-zero"
        );
    }

    #[test]
    fn io_errors_are_not_config_errors() {
        let e = RenderError::WriteImage {
            path: "x.png".to_string(),
            cause: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert!(!e.is_config_error());
        assert!(e.cause().is_some());
        assert!(RenderError::ZeroMagnification.is_config_error());
    }
}
