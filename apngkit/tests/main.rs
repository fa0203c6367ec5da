mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use apngkit::png::container::read_chunks;
    use apngkit::{
        get_info, load_image, load_image_with, save_image, save_image_with, ChunkTag, ColorType, DecodeOptions,
        EncodeOptions, ErrorKind, PngDecoder, PngImage,
    };
    use std::io::Cursor;

    struct TestCase {
        name: &'static str,
        bytes: Vec<u8>,
        options: DecodeOptions,
        expected: ErrorKind,
    }

    #[test]
    fn test_round_trip_all_color_types() -> Result<(), Box<dyn std::error::Error>> {
        let sizes = [(1, 1), (3, 2), (7, 5)];

        for (width, height) in sizes {
            let translucent = pattern(width, height);
            let encoded = save_image(width, height, &translucent)?;
            let decoded = load_image(&encoded)?;
            assert_eq!((decoded.width(), decoded.height()), (width, height));
            assert_eq!(decoded.rgba(), translucent.as_slice(), "rgba {}x{}", width, height);

            let opaque: Vec<u8> = translucent
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect();
            let options = EncodeOptions::default().set_color_type(ColorType::Truecolor);
            let encoded = save_image_with(width, height, &opaque, options)?;
            assert_eq!(get_info(&encoded)?.color_type, ColorType::Truecolor);
            assert_eq!(load_image(&encoded)?.rgba(), opaque.as_slice(), "rgb {}x{}", width, height);

            let options = EncodeOptions::default().set_color_type(ColorType::Indexed);
            let encoded = save_image_with(width, height, &translucent, options)?;
            assert_eq!(get_info(&encoded)?.color_type, ColorType::Indexed);
            assert_eq!(load_image(&encoded)?.rgba(), translucent.as_slice(), "indexed {}x{}", width, height);
        }

        Ok(())
    }

    #[test]
    fn test_encoded_layout() -> Result<(), Box<dyn std::error::Error>> {
        let rgba = solid(2, 2, [1, 2, 3, 255]);
        let encoded = save_image(2, 2, &rgba)?;

        assert_eq!(&encoded[..8], &SIGNATURE);

        let chunks = read_chunks(&encoded)?;
        let tags: Vec<String> = chunks.iter().map(|c| c.tag.to_string()).collect();
        assert_eq!(tags, ["IHDR", "IDAT", "IEND"]);
        assert_eq!(chunks[0].data, ihdr(2, 2, 8, TRUECOLOR_ALPHA, 0).as_slice());
        assert_eq!(&chunks[1].data[..2], &[0x78, 0x9C]);

        // indexed output with transparency carries PLTE and tRNS
        let mut rgba = solid(2, 1, [9, 9, 9, 255]);
        rgba[7] = 0;
        let options = EncodeOptions::default().set_color_type(ColorType::Indexed);
        let encoded = save_image_with(2, 1, &rgba, options)?;
        let chunks = read_chunks(&encoded)?;
        let tags: Vec<ChunkTag> = chunks.iter().map(|c| c.tag).collect();
        assert_eq!(
            tags,
            [ChunkTag::IHDR, ChunkTag::PLTE, ChunkTag::TRNS, ChunkTag::IDAT, ChunkTag::IEND]
        );
        assert_eq!(chunks[1].data, &[9, 9, 9, 9, 9, 9]);
        assert_eq!(chunks[2].data, &[255, 0]);

        Ok(())
    }

    #[test]
    fn test_decode_hand_filtered_rows() -> Result<(), Box<dyn std::error::Error>> {
        // row 0 uses Sub, row 1 uses Up
        let scanlines: [u8; 18] = [
            1, 10, 20, 30, 255, 10, 10, 10, 0, //
            2, 5, 5, 5, 0, 5, 5, 5, 0,
        ];
        let bytes = PngBuilder::new()
            .header(2, 2, TRUECOLOR_ALPHA)
            .chunk(b"IDAT", &zlib(&scanlines))
            .end();

        let image = load_image(&bytes)?;
        assert_eq!(
            image.rgba(),
            &[10, 20, 30, 255, 20, 30, 40, 255, 15, 25, 35, 255, 25, 35, 45, 255]
        );

        Ok(())
    }

    #[test]
    fn test_idat_split_across_chunks() -> Result<(), Box<dyn std::error::Error>> {
        let pixels = pattern(4, 3);
        let compressed = zlib(&unfiltered_image(&pixels, 16));
        let (a, b) = compressed.split_at(compressed.len() / 2);

        let bytes = PngBuilder::new()
            .header(4, 3, TRUECOLOR_ALPHA)
            .chunk(b"IDAT", a)
            .chunk(b"IDAT", b)
            .end();

        assert_eq!(load_image(&bytes)?.rgba(), pixels.as_slice());

        Ok(())
    }

    #[test]
    fn test_truecolor_and_indexed_decode() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = PngBuilder::new().header(2, 1, TRUECOLOR).image(&[1, 2, 3, 4, 5, 6], 6).end();
        assert_eq!(load_image(&bytes)?.rgba(), &[1, 2, 3, 255, 4, 5, 6, 255]);

        let bytes = PngBuilder::new()
            .header(1, 1, INDEXED)
            .chunk(b"PLTE", &[10, 20, 30])
            .image(&[0], 1)
            .end();
        assert_eq!(load_image(&bytes)?.rgba(), &[10, 20, 30, 255]);

        // tRNS shorter than the palette: the rest stays opaque
        let bytes = PngBuilder::new()
            .header(3, 1, INDEXED)
            .chunk(b"PLTE", &[1, 1, 1, 2, 2, 2, 3, 3, 3])
            .chunk(b"tRNS", &[0, 128])
            .image(&[2, 1, 0], 3)
            .end();
        assert_eq!(
            load_image(&bytes)?.rgba(),
            &[3, 3, 3, 255, 2, 2, 2, 128, 1, 1, 1, 0]
        );

        Ok(())
    }

    #[test]
    fn test_rejected_inputs() -> Result<(), Box<dyn std::error::Error>> {
        let idat = zlib(&unfiltered_image(&[0; 16], 8));

        let test_cases = vec![
            TestCase {
                name: "16-bit depth",
                bytes: PngBuilder::new()
                    .chunk(b"IHDR", &ihdr(1, 1, 16, TRUECOLOR_ALPHA, 0))
                    .chunk(b"IDAT", &zlib(&[0; 9]))
                    .end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Unsupported,
            },
            TestCase {
                name: "Adam7",
                bytes: PngBuilder::new()
                    .chunk(b"IHDR", &ihdr(2, 2, 8, TRUECOLOR_ALPHA, 1))
                    .chunk(b"IDAT", &idat)
                    .end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Unsupported,
            },
            TestCase {
                name: "Greyscale",
                bytes: PngBuilder::new().chunk(b"IHDR", &ihdr(1, 1, 8, 0, 0)).image(&[0], 1).end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Unsupported,
            },
            TestCase {
                name: "Unknown color type",
                bytes: PngBuilder::new().chunk(b"IHDR", &ihdr(1, 1, 8, 5, 0)).image(&[0], 1).end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Unsupported,
            },
            TestCase {
                name: "Zero width",
                bytes: PngBuilder::new().header(0, 1, TRUECOLOR_ALPHA).chunk(b"IDAT", &zlib(&[0])).end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Format,
            },
            TestCase {
                name: "Wider than limit",
                bytes: PngBuilder::new().header(2, 2, TRUECOLOR_ALPHA).chunk(b"IDAT", &idat).end(),
                options: DecodeOptions::default().set_max_width(1),
                expected: ErrorKind::Unsupported,
            },
            TestCase {
                name: "Indexed without palette",
                bytes: PngBuilder::new().header(1, 1, INDEXED).image(&[0], 1).end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Data,
            },
            TestCase {
                name: "Palette index out of range",
                bytes: PngBuilder::new()
                    .header(1, 1, INDEXED)
                    .chunk(b"PLTE", &[1, 2, 3])
                    .image(&[4], 1)
                    .end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Data,
            },
            TestCase {
                name: "Truncated pixel data",
                bytes: PngBuilder::new().header(2, 2, TRUECOLOR_ALPHA).image(&[0; 8], 8).end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Data,
            },
            TestCase {
                name: "Unknown filter byte",
                bytes: PngBuilder::new()
                    .header(1, 1, TRUECOLOR_ALPHA)
                    .chunk(b"IDAT", &zlib(&[9, 0, 0, 0, 0]))
                    .end(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Unsupported,
            },
            TestCase {
                name: "Not a PNG",
                bytes: b"GIF89a not a png at all".to_vec(),
                options: DecodeOptions::default(),
                expected: ErrorKind::Format,
            },
        ];

        for test_case in test_cases {
            match load_image_with(&test_case.bytes, test_case.options) {
                Ok(_) => panic!("{} decoded", test_case.name),
                Err(e) => assert_eq!(e.kind(), test_case.expected, "{}: {}", test_case.name, e),
            }
        }

        Ok(())
    }

    #[test]
    fn test_save_rejects_bad_buffers() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(save_image(2, 2, &[0; 15]).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(save_image(0, 2, &[]).unwrap_err().kind(), ErrorKind::Format);

        let translucent = solid(1, 1, [0, 0, 0, 10]);
        let options = EncodeOptions::default().set_color_type(ColorType::Truecolor);
        assert_eq!(save_image_with(1, 1, &translucent, options).unwrap_err().kind(), ErrorKind::Data);

        let many_colors: Vec<u8> = (0..257u32).flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255]).collect();
        let options = EncodeOptions::default().set_color_type(ColorType::Indexed);
        assert_eq!(save_image_with(257, 1, &many_colors, options).unwrap_err().kind(), ErrorKind::Data);
        assert!(save_image_with(256, 1, &many_colors[..1024], options).is_ok());

        let options = EncodeOptions::default().set_color_type(ColorType::Greyscale);
        assert_eq!(save_image_with(1, 1, &[0; 4], options).unwrap_err().kind(), ErrorKind::Unsupported);

        Ok(())
    }

    #[test]
    fn test_get_info() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = PngBuilder::new()
            .header(3, 1, INDEXED)
            .chunk(b"PLTE", &[1, 1, 1, 2, 2, 2])
            .chunk(b"tEXt", b"Software\0apngkit")
            .image(&[0, 1, 0], 3)
            .end();

        let info = get_info(&bytes)?;
        assert_eq!((info.width, info.height, info.bit_depth), (3, 1, 8));
        assert_eq!(info.color_type, ColorType::Indexed);
        assert_eq!(info.palette_len, Some(2));
        assert_eq!(info.text.len(), 1);
        assert_eq!(info.text[0].keyword, "Software");
        assert!(!info.is_animated());
        assert_eq!(info.frame_count, 0);
        assert_eq!(info.chunks.len(), 5);

        // header-only inspection works for images that cannot be decoded
        let bytes = PngBuilder::new()
            .chunk(b"IHDR", &ihdr(4, 4, 16, TRUECOLOR_ALPHA, 0))
            .chunk(b"IDAT", &zlib(&[0]))
            .end();
        assert_eq!(get_info(&bytes)?.bit_depth, 16);

        Ok(())
    }

    #[test]
    fn test_decoder_struct() -> Result<(), Box<dyn std::error::Error>> {
        let rgba = pattern(3, 3);
        let encoded = save_image(3, 3, &rgba)?;

        let mut decoder = PngDecoder::new(Cursor::new(encoded)).with_options(DecodeOptions::default().set_strict_crc(true));
        assert!(decoder.get_info().is_none());

        let image: PngImage = decoder.decode()?;
        assert_eq!(image.into_rgba(), rgba);
        assert_eq!(decoder.get_info().map(|i| i.width), Some(3));

        // decoding again rewinds the reader
        assert_eq!(decoder.decode()?.rgba(), rgba.as_slice());

        Ok(())
    }

    #[test]
    fn test_open_and_save_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = std::env::temp_dir().join(format!("apngkit-main-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("pattern.png");

        let rgba = pattern(5, 4);
        apngkit::PngEncoder::new().encode_to_file(&path, 5, 4, &rgba)?;

        let image = PngDecoder::open(&path)?.decode()?;
        assert_eq!(image.rgba(), rgba.as_slice());

        std::fs::remove_dir_all(&dir)?;

        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() -> Result<(), Box<dyn std::error::Error>> {
        let path = std::env::temp_dir().join(format!("apngkit-missing-{}.png", std::process::id()));

        let err = PngDecoder::open(&path).err().ok_or("opening a missing file succeeded")?;
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(matches!(&err, apngkit::PngError::Io(io) if io.kind() == std::io::ErrorKind::NotFound));
        assert!(std::error::Error::source(&err).is_some());

        Ok(())
    }

    #[test]
    fn test_decoded_pixels_survive_bitmap_export() -> Result<(), Box<dyn std::error::Error>> {
        let rgba = pattern(4, 3);
        let image = load_image(&save_image(4, 3, &rgba)?)?;

        let frame = writer::WriterImageFrame {
            width: image.width(),
            height: image.height(),
            delay: 0,
            pixels: image.into_rgba(),
        };

        let bmp = writer::Writer::encode_bmp(&frame)?;
        assert_eq!(&bmp[0..2], b"BM");

        let decoded = writer::Writer::decode_bmp(&bmp)?;
        assert_eq!((decoded.width, decoded.height), (4, 3));
        assert_eq!(decoded.pixels, rgba);

        Ok(())
    }
}
