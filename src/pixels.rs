//! CPU-side image bytes awaiting upload.

use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded image as tightly packed RGBA8 rows, top row first.
///
/// The buffer owns its bytes; it is released when dropped, whether or not
/// the upload succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Decode an image file (PNG, JPEG, or BMP) and convert it to RGBA8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] naming `path` if the file cannot be opened or
    /// decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let buffer = Self::from_rgba(image.to_rgba8());
        debug!(
            "decoded {} ({}x{}, {} bytes)",
            path.display(),
            buffer.width,
            buffer.height,
            buffer.pixels.len()
        );
        Ok(buffer)
    }

    /// Decode an in-memory encoded image and convert it to RGBA8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the format is unknown or the data is
    /// corrupt.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_rgba(image.to_rgba8()))
    }

    /// A single-color image, used for off-screen checks.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: rgba.repeat(count),
        }
    }

    fn from_rgba(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    /// Reject the image unless it is exactly `width`×`height`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageSize`] on a mismatch.
    pub fn expect_size(self, width: u32, height: u32) -> Result<Self> {
        if (self.width, self.height) == (width, height) {
            Ok(self)
        } else {
            Err(Error::ImageSize {
                width: self.width,
                height: self.height,
                expected_width: width,
                expected_height: height,
            })
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, `width * height * 4` long.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Color of the pixel at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.pixels.get(start..start + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(image: &image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn checker(size: u32) -> image::RgbaImage {
        image::RgbaImage::from_fn(size, size, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn decoded_buffer_is_width_times_height_times_four() {
        let png = encode(&checker(256), image::ImageFormat::Png);
        let buffer = PixelBuffer::decode(&png).unwrap();
        assert_eq!(buffer.width(), 256);
        assert_eq!(buffer.height(), 256);
        assert_eq!(buffer.as_bytes().len(), 256 * 256 * BYTES_PER_PIXEL);
    }

    #[test]
    fn rgb_bmp_gains_opaque_alpha() {
        let rgb = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
        let mut out = Cursor::new(Vec::new());
        rgb.write_to(&mut out, image::ImageFormat::Bmp).unwrap();

        let buffer = PixelBuffer::decode(out.get_ref()).unwrap();
        assert_eq!(buffer.as_bytes().len(), 4 * 2 * BYTES_PER_PIXEL);
        assert_eq!(buffer.pixel(3, 1), Some([10, 20, 30, 255]));
    }

    #[test]
    fn rows_are_top_first() {
        let mut img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([200, 0, 0, 255]));
        let buffer = PixelBuffer::decode(&encode(&img, image::ImageFormat::Png)).unwrap();
        assert_eq!(buffer.pixel(1, 0), Some([200, 0, 0, 255]));
        assert_eq!(&buffer.as_bytes()[4..8], &[200, 0, 0, 255]);
    }

    #[test]
    fn expect_size_rejects_other_dimensions() {
        let png = encode(&checker(16), image::ImageFormat::Png);
        let err = PixelBuffer::decode(&png)
            .unwrap()
            .expect_size(256, 256)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ImageSize {
                width: 16,
                height: 16,
                expected_width: 256,
                expected_height: 256,
            }
        ));
    }

    #[test]
    fn expect_size_passes_matching_dimensions() {
        let buffer = PixelBuffer::solid(256, 256, [1, 2, 3, 4]).expect_size(256, 256);
        assert!(buffer.is_ok());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = PixelBuffer::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn open_reports_missing_file() {
        let err = PixelBuffer::open(Path::new("no/such/logo.bmp")).unwrap_err();
        match err {
            Error::Image { path, .. } => assert_eq!(path, Path::new("no/such/logo.bmp")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn open_decodes_shipped_logo() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/logo.bmp");
        let buffer = PixelBuffer::open(&path).unwrap().expect_size(256, 256).unwrap();
        assert_eq!(buffer.as_bytes().len(), 256 * 256 * BYTES_PER_PIXEL);
        assert!(buffer.as_bytes().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn solid_fills_every_pixel() {
        let buffer = PixelBuffer::solid(3, 2, [9, 8, 7, 6]);
        assert_eq!(buffer.as_bytes().len(), 3 * 2 * BYTES_PER_PIXEL);
        assert!(buffer.as_bytes().chunks_exact(4).all(|px| px == [9, 8, 7, 6]));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.pixel(0, 2), None);
    }
}
