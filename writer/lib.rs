use image::codecs::bmp::BmpEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError, ImageFormat};
use std::fs::File;
use std::io::{Error, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub struct Writer {}

/// One RGBA8 frame, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterImageFrame {
    pub width: u32,
    pub height: u32,
    pub delay: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterImage {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<WriterImageFrame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    Pam,
    Ppm,
    Bmp,
}

impl FrameFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FrameFormat::Pam => "pam",
            FrameFormat::Ppm => "ppm",
            FrameFormat::Bmp => "bmp",
        }
    }
}

impl Writer {
    /// Swaps the red and blue channel of every pixel, turning RGBA into the
    /// BGRA order of OS bitmaps and back.
    pub fn swap_red_blue(pixels: &[u8]) -> Vec<u8> {
        pixels.chunks_exact(4).flat_map(|px| [px[2], px[1], px[0], px[3]]).collect()
    }

    /// 32bpp BGRA bitmap with an alpha mask.
    pub fn encode_bmp(frame: &WriterImageFrame) -> Result<Vec<u8>, Error> {
        Writer::validate_pixel_count(frame)?;

        let mut out = Vec::new();
        BmpEncoder::new(&mut out)
            .write_image(&frame.pixels, frame.width, frame.height, ExtendedColorType::Rgba8)
            .map_err(to_io_error)?;

        Ok(out)
    }

    /// Reads any bitmap `image` understands back into RGBA.
    pub fn decode_bmp(data: &[u8]) -> Result<WriterImageFrame, Error> {
        let decoded = image::load_from_memory_with_format(data, ImageFormat::Bmp)
            .map_err(to_io_error)?
            .to_rgba8();

        Ok(WriterImageFrame {
            width: decoded.width(),
            height: decoded.height(),
            delay: 0,
            pixels: decoded.into_raw(),
        })
    }

    pub fn write_bmp(output_path: &Path, frame: &WriterImageFrame) -> Result<(), Error> {
        let data = Writer::encode_bmp(frame)?;

        let mut file = File::create(output_path)?;
        file.write_all(&data)?;

        Ok(())
    }

    pub fn write_pam(output_path: &Path, frame: &WriterImageFrame) -> Result<(), Error> {
        Writer::validate_pixel_count(frame)?;

        let mut file = File::create(output_path)?;

        file.write_all(b"P7\n")?;
        file.write_all(format!("WIDTH {}\n", frame.width).as_bytes())?;
        file.write_all(format!("HEIGHT {}\n", frame.height).as_bytes())?;
        file.write_all(b"DEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n")?;
        file.write_all(&frame.pixels)?;

        Ok(())
    }

    /// Binary PPM; alpha is dropped.
    pub fn write_ppm(output_path: &Path, frame: &WriterImageFrame) -> Result<(), Error> {
        Writer::validate_pixel_count(frame)?;

        let mut file = File::create(output_path)?;

        file.write_all(b"P6\n")?;
        file.write_all(format!("{} {}\n", frame.width, frame.height).as_bytes())?;
        file.write_all(b"255\n")?;

        let rgb: Vec<u8> = frame.pixels.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect();
        file.write_all(&rgb)?;

        Ok(())
    }

    /// Writes every frame next to `output_path` as `<stem>_frame_<i>.<ext>`
    /// and returns the paths written.
    pub fn write_frames(output_path: &Path, image: &WriterImage, format: FrameFormat) -> Result<Vec<PathBuf>, Error> {
        let output_dir = output_path.parent().unwrap_or_else(|| Path::new("."));
        let stem = output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "Output path has no file name"))?;

        let mut written = Vec::with_capacity(image.frames.len());

        for (i, frame) in image.frames.iter().enumerate() {
            let path = output_dir.join(format!("{}_frame_{}.{}", stem, i, format.extension()));

            match format {
                FrameFormat::Pam => Writer::write_pam(&path, frame)?,
                FrameFormat::Ppm => Writer::write_ppm(&path, frame)?,
                FrameFormat::Bmp => Writer::write_bmp(&path, frame)?,
            }

            written.push(path);
        }

        Ok(written)
    }

    fn validate_pixel_count(frame: &WriterImageFrame) -> Result<(), Error> {
        let expected_size = frame.width as usize * frame.height as usize * 4;
        let actual_size = frame.pixels.len();

        if expected_size != actual_size {
            let msg = format!(
                "Invalid pixel data size for {}x{} RGBA image: expected {} bytes, got {}",
                frame.width, frame.height, expected_size, actual_size
            );

            return Err(Error::new(ErrorKind::InvalidData, msg));
        }

        Ok(())
    }
}

fn to_io_error(error: ImageError) -> Error {
    match error {
        ImageError::IoError(e) => e,
        other => Error::new(ErrorKind::InvalidData, other),
    }
}
