// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing finished images to disk.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use buffer::ImageBuffer;
use config::RenderConfig;
use error::RenderError;

/// Where images go unless told otherwise.
pub const IMAGE_DIR: &str = "PNG";

/// The conventional file name for a render, which records where it
/// was centred, where its top was, and how big it is.
pub fn image_filename(config: &RenderConfig) -> String {
    format!(
        "mandelbrot center={}+{}i, top={}i, {}x{}.png",
        config.center.re, config.center.im, config.top, config.width, config.height
    )
}

/// Create the output directory, and any missing parents, if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), RenderError> {
    fs::create_dir_all(dir).map_err(|cause| RenderError::CreateDirectory {
        path: dir.display().to_string(),
        cause,
    })
}

/// Encode the buffer as an 8-bit RGB PNG at `path`.  If encoding
/// fails, the partial file is removed.
pub fn write_image(path: &Path, buffer: &ImageBuffer) -> Result<(), RenderError> {
    let wrap = |cause| RenderError::WriteImage {
        path: path.display().to_string(),
        cause,
    };
    let output = File::create(path).map_err(wrap)?;
    let encoder = PNGEncoder::new(output);
    let encoded = encoder.encode(
        buffer.as_raw(),
        buffer.width() as u32,
        buffer.height() as u32,
        ColorType::RGB(8),
    );
    if let Err(cause) = encoded {
        let _ = fs::remove_file(path);
        return Err(wrap(cause));
    }
    Ok(())
}

/// Write a render into `dir` under its conventional name, creating
/// `dir` on first use.  Returns the path written.
pub fn save(dir: &Path, config: &RenderConfig, buffer: &ImageBuffer) -> Result<PathBuf, RenderError> {
    ensure_dir(dir)?;
    let path = dir.join(image_filename(config));
    write_image(&path, buffer)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    extern crate tempfile;

    use super::*;
    use config::{Palette, Rgb};
    use image;

    fn config() -> RenderConfig {
        RenderConfig::new(
            4,
            2,
            Palette {
                member: Rgb(255, 0, 0),
                divergent: Rgb(0, 0, 255),
            },
        )
    }

    #[test]
    fn filename_records_the_view() {
        assert_eq!(
            image_filename(&config()),
            "mandelbrot center=-0.66+0i, top=1.6i, 4x2.png"
        );
    }

    #[test]
    fn save_creates_the_directory_and_the_png() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("PNG").join("nested");
        let mut buffer = ImageBuffer::new(4, 2);
        buffer.put(3, 1, Rgb(9, 8, 7));

        let path = save(&dir, &config(), &buffer).unwrap();
        assert!(dir.is_dir());
        assert_eq!(path, dir.join(image_filename(&config())));

        let decoded = image::open(&path).unwrap().to_rgb();
        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.into_raw(), buffer.into_raw());
    }

    #[test]
    fn directory_errors_are_their_own_kind() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        File::create(&blocker).unwrap();
        match ensure_dir(&blocker.join("dir")) {
            Err(RenderError::CreateDirectory { .. }) => (),
            other => panic!("expected CreateDirectory, got {:?}", other),
        }
    }

    #[test]
    fn write_errors_are_their_own_kind() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("image.png");
        match write_image(&path, &ImageBuffer::new(2, 2)) {
            Err(RenderError::WriteImage { .. }) => (),
            other => panic!("expected WriteImage, got {:?}", other),
        }
    }
}
