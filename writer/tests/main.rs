#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use writer::{FrameFormat, Writer, WriterImage, WriterImageFrame};

    fn frame(width: u32, height: u32) -> WriterImageFrame {
        let pixels = (0..width * height)
            .flat_map(|i| [i as u8, (i * 3) as u8, 200, if i == 0 { 0 } else { 255 }])
            .collect();

        WriterImageFrame {
            width,
            height,
            delay: 100,
            pixels,
        }
    }

    fn temp_dir(name: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dir = std::env::temp_dir().join(format!("writer-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    #[test]
    fn test_swap_red_blue() {
        let bgra = Writer::swap_red_blue(&[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(bgra, vec![3, 2, 1, 4, 7, 6, 5, 8]);
        assert_eq!(Writer::swap_red_blue(&bgra), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    fn le_u32(bytes: &[u8], at: usize) -> Result<u32, Box<dyn std::error::Error>> {
        Ok(u32::from_le_bytes(bytes[at..at + 4].try_into()?))
    }

    #[test]
    fn test_bmp_layout() -> Result<(), Box<dyn std::error::Error>> {
        let source = frame(3, 2);
        let bmp = Writer::encode_bmp(&source)?;

        assert_eq!(&bmp[0..2], b"BM");
        assert_eq!(le_u32(&bmp, 2)? as usize, bmp.len());
        assert_eq!(le_u32(&bmp, 18)?, 3);
        assert_eq!(u16::from_le_bytes(bmp[28..30].try_into()?), 32);

        let offset = le_u32(&bmp, 10)? as usize;
        assert_eq!(bmp.len() - offset, 3 * 2 * 4);

        // body holds BGRA pixels, in either row order
        let mut body = Writer::swap_red_blue(&bmp[offset..]);
        let mut expected = source.pixels.clone();
        body.sort_unstable();
        expected.sort_unstable();
        assert_eq!(body, expected);

        let decoded = Writer::decode_bmp(&bmp)?;
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.pixels, source.pixels);

        Ok(())
    }

    #[test]
    fn test_flipped_row_order() -> Result<(), Box<dyn std::error::Error>> {
        let source = frame(2, 2);
        let mut bmp = Writer::encode_bmp(&source)?;

        // negate the height and swap the two rows: same picture, other row order
        let height = i32::from_le_bytes(bmp[22..26].try_into()?);
        bmp[22..26].copy_from_slice(&(-height).to_le_bytes());
        let offset = le_u32(&bmp, 10)? as usize;
        let (top, bottom) = bmp[offset..].split_at_mut(8);
        top.swap_with_slice(bottom);

        let decoded = Writer::decode_bmp(&bmp)?;
        assert_eq!((decoded.width, decoded.height), (2, 2));
        assert_eq!(decoded.pixels, source.pixels);

        Ok(())
    }

    #[test]
    fn test_invalid_bmp() -> Result<(), Box<dyn std::error::Error>> {
        let err = Writer::decode_bmp(b"PNG").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

        let bmp = Writer::encode_bmp(&frame(2, 2))?;
        assert!(Writer::decode_bmp(&bmp[..30]).is_err());

        // hostile dimensions must fail cleanly
        let mut huge = bmp.clone();
        huge[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
        huge[22..26].copy_from_slice(&i32::MAX.to_le_bytes());
        assert!(Writer::decode_bmp(&huge).is_err());

        Ok(())
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let mut bad = frame(2, 2);
        bad.pixels.pop();

        let err = Writer::encode_bmp(&bad).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_write_pam_and_ppm() -> Result<(), Box<dyn std::error::Error>> {
        let dir = temp_dir("pam")?;
        let source = frame(2, 1);

        let pam = dir.join("out.pam");
        Writer::write_pam(&pam, &source)?;
        let data = std::fs::read(&pam)?;
        let header = b"P7\nWIDTH 2\nHEIGHT 1\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n";
        assert_eq!(&data[..header.len()], header);
        assert_eq!(&data[header.len()..], source.pixels.as_slice());

        let ppm = dir.join("out.ppm");
        Writer::write_ppm(&ppm, &source)?;
        let data = std::fs::read(&ppm)?;
        assert_eq!(data, b"P6\n2 1\n255\n\x00\x00\xc8\x01\x03\xc8".to_vec());

        std::fs::remove_dir_all(&dir)?;

        Ok(())
    }

    #[test]
    fn test_write_frames() -> Result<(), Box<dyn std::error::Error>> {
        let dir = temp_dir("frames")?;
        let image = WriterImage {
            width: 2,
            height: 2,
            frames: vec![frame(2, 2), frame(2, 2), frame(2, 2)],
        };

        let written = Writer::write_frames(&dir.join("anim.png"), &image, FrameFormat::Bmp)?;
        assert_eq!(written.len(), 3);
        assert_eq!(written[2], dir.join("anim_frame_2.bmp"));

        let decoded = Writer::decode_bmp(&std::fs::read(&written[1])?)?;
        assert_eq!(decoded.pixels, image.frames[1].pixels);

        std::fs::remove_dir_all(&dir)?;

        Ok(())
    }
}
