//! Decoding and encoding between image files and [`Image`] sample buffers.

use crate::{
    Error, Result,
    buffer::{self, Image},
};
use image::{
    ColorType, DynamicImage, ImageError, ImageFormat, ImageReader,
    error::{
        ImageFormatHint, ParameterError, ParameterErrorKind, UnsupportedError,
        UnsupportedErrorKind,
    },
};
use std::{io::Cursor, path::Path};

/// Reads `path` into a `[height, width, channels]` buffer of 8-bit samples.
///
/// Luma sources keep 1 channel, luma + alpha keeps 2, RGB keeps 3 and
/// everything else is expanded to RGBA. Deeper sources are narrowed to 8 bits.
pub fn decode(path: impl AsRef<Path>) -> Result<Image> {
    let path = path.as_ref();
    let decode_err = |source: ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)?;

    let (width, height) = (img.width() as usize, img.height() as usize);
    let (channels, raw) = into_raw_samples(img);

    let image = Image::from_shape_vec((height, width, channels), raw).map_err(|_| {
        decode_err(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )))
    })?;

    log::debug!(
        "decoded {} as {}x{}x{}",
        path.display(),
        height,
        width,
        channels
    );

    Ok(image)
}

fn into_raw_samples(img: DynamicImage) -> (usize, Vec<u8>) {
    match img.color() {
        ColorType::L8 | ColorType::L16 => (1, img.into_luma8().into_raw()),
        ColorType::La8 | ColorType::La16 => (2, img.into_luma_alpha8().into_raw()),
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => (3, img.into_rgb8().into_raw()),
        _ => (4, img.into_rgba8().into_raw()),
    }
}

/// Writes `image` to `path`. The file format follows the extension of `path`.
///
/// The file is encoded in memory first, so nothing is created on failure.
pub fn encode(path: impl AsRef<Path>, image: &Image) -> Result<()> {
    let path = path.as_ref();
    let encode_err = |source: ImageError| Error::Encode {
        path: path.to_path_buf(),
        source,
    };

    let color = match buffer::channels(image) {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        n => {
            return Err(encode_err(ImageError::Unsupported(
                UnsupportedError::from_format_and_kind(
                    ImageFormatHint::Unknown,
                    UnsupportedErrorKind::GenericFeature(format!("{n} channels")),
                ),
            )));
        }
    };

    let (width, height) = (buffer::width(image), buffer::height(image));
    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(encode_err(ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))));
    };

    // Logical iteration order is row-major regardless of memory layout.
    let raw: Vec<u8> = image.iter().copied().collect();
    let format = ImageFormat::from_path(path).map_err(encode_err)?;

    let mut encoded = Cursor::new(Vec::new());
    image::write_buffer_with_format(&mut encoded, &raw, width, height, color, format)
        .map_err(encode_err)?;
    std::fs::write(path, encoded.into_inner())
        .map_err(|e| encode_err(ImageError::IoError(e)))?;

    log::debug!("encoded {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

    #[test]
    fn test_decode_missing_file() {
        let err = decode("/nonexistent/metal-tint/input.png").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.stage(), "decode");
    }

    #[test]
    fn test_decode_rgb() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rgb.png");

        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([1, 2, 3]));
        img.save(&path)?;

        let image = decode(&path)?;
        assert_eq!(image.dim(), (2, 3, 3));
        assert_eq!(image[[1, 2, 0]], 1);
        assert_eq!(image[[1, 2, 1]], 2);
        assert_eq!(image[[1, 2, 2]], 3);
        Ok(())
    }

    #[test]
    fn test_decode_gray_keeps_one_channel() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(4, 4, Luma([9])).save(&path)?;

        let image = decode(&path)?;
        assert_eq!(image.dim(), (4, 4, 1));
        Ok(())
    }

    #[test]
    fn test_decode_narrows_16_bit() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("deep.png");
        ImageBuffer::<Rgb<u16>, Vec<u16>>::from_pixel(2, 2, Rgb([65535, 0, 32896])).save(&path)?;

        let image = decode(&path)?;
        assert_eq!(image.dim(), (2, 2, 3));
        assert_eq!(image[[0, 0, 0]], 255);
        assert_eq!(image[[0, 0, 1]], 0);
        assert_eq!(image[[0, 0, 2]], 128);
        Ok(())
    }

    #[test]
    fn test_encode_rejects_five_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let err = encode(&path, &Image::zeros((1, 1, 5))).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_encode_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode(dir.path().join("out.unknown"), &Image::zeros((1, 1, 3))).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert_eq!(err.stage(), "encode");
    }

    #[test]
    fn test_encode_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");

        // JPEG has no alpha channel
        let err = encode(&path, &Image::zeros((2, 2, 4))).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_encode_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        let err = encode(&path, &Image::zeros((1, 1, 3))).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
    }

    #[test]
    fn test_png_round_trip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("rgba.png");

        let image = Image::from_shape_fn((5, 7, 4), |(r, c, ch)| (r * 40 + c * 3 + ch) as u8);
        encode(&path, &image)?;
        assert_eq!(decode(&path)?, image);
        Ok(())
    }
}
