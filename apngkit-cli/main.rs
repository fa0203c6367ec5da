use apngkit::{
    get_info, ApngDecoder, ApngEncoder, ApngImage, ColorType, DecodeOptions, EncodeOptions, PngDecoder, PngEncoder,
    PngImage,
};
use clap::{Parser, ValueEnum};
use glob::glob;
use std::fs;
use std::path::{Path, PathBuf};
use writer::{FrameFormat, Writer, WriterImage, WriterImageFrame};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputColor {
    Rgba,
    Rgb,
    Indexed,
}

impl From<OutputColor> for ColorType {
    fn from(value: OutputColor) -> Self {
        match value {
            OutputColor::Rgba => ColorType::TruecolorAlpha,
            OutputColor::Rgb => ColorType::Truecolor,
            OutputColor::Indexed => ColorType::Indexed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DumpFormat {
    Pam,
    Ppm,
    Bmp,
}

impl From<DumpFormat> for FrameFormat {
    fn from(value: DumpFormat) -> Self {
        match value {
            DumpFormat::Pam => FrameFormat::Pam,
            DumpFormat::Ppm => FrameFormat::Ppm,
            DumpFormat::Bmp => FrameFormat::Bmp,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(name = "apngkit")]
struct Cli {
    #[arg(required = true)]
    path: String,

    #[arg(long, help = "Print header and chunk information without decoding")]
    info: bool,

    #[arg(long, help = "Decode as an animation even when no acTL chunk is present")]
    animated: bool,

    #[arg(long, help = "Reject files with chunk CRC mismatches")]
    strict: bool,

    #[arg(short = 'o', long = "output-dir", help = "Re-encode every file into this directory")]
    output_dir: Option<String>,

    #[arg(long, value_enum, default_value = "rgba", help = "Colour type used when re-encoding")]
    color: OutputColor,

    #[arg(long, value_enum, help = "Write every decoded frame as a separate image")]
    dump: Option<DumpFormat>,

    #[arg(long, help = "Decode the image without writing anything")]
    void: bool,
}

enum Decoded {
    Still(PngImage),
    Animated(ApngImage),
}

fn get_files(path: &str) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let absolute_pattern = if Path::new(path).is_relative() {
        base_dir.join(path).to_string_lossy().into_owned()
    } else {
        path.to_string()
    };

    for entry in glob(&absolute_pattern)? {
        match entry {
            Ok(path) => {
                if !path.is_file() {
                    continue;
                }

                files.push(path);
            }
            Err(e) => println!("{:?}", e),
        }
    }

    Ok(files)
}

fn get_output_path(file: &Path, output_dir: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_name = file.file_name().ok_or("Invalid file name")?;

    let output_dir = Path::new(output_dir);
    let output_dir = if output_dir.is_relative() {
        std::env::current_dir()?.join(output_dir)
    } else {
        output_dir.to_path_buf()
    };

    if !output_dir.exists() {
        fs::create_dir_all(&output_dir)?;
    }

    Ok(output_dir.join(file_name))
}

fn print_summary(decoded: &Decoded) {
    match decoded {
        Decoded::Still(image) => {
            println!("Still image {}x{}", image.width(), image.height());
            println!("Buffer size: {}", image.rgba().len());
        }
        Decoded::Animated(image) => {
            println!("Num of frames: {}", image.frames().len());
            println!("Width: {}, Height: {}", image.width(), image.height());

            match image.num_plays() {
                0 => println!("Plays: forever"),
                n => println!("Plays: {}", n),
            }

            for (i, frame) in image.frames().iter().enumerate() {
                println!(
                    "Frame: {}, Width: {}, Height: {}, Delay: {}ms, Buffer size: {}",
                    i,
                    frame.width,
                    frame.height,
                    frame.duration_ms,
                    frame.rgba.len()
                );
            }

            println!("Total duration: {}ms", image.total_duration_ms());
        }
    }

    let text = match decoded {
        Decoded::Still(image) => image.text(),
        Decoded::Animated(image) => image.text(),
    };

    for text in text {
        println!("{}: {}", text.keyword, text.text);
    }
}

fn to_writer_image(decoded: &Decoded) -> WriterImage {
    match decoded {
        Decoded::Still(image) => WriterImage {
            width: image.width(),
            height: image.height(),
            frames: vec![WriterImageFrame {
                width: image.width(),
                height: image.height(),
                delay: 0,
                pixels: image.rgba().to_vec(),
            }],
        },
        Decoded::Animated(image) => WriterImage {
            width: image.width(),
            height: image.height(),
            frames: image
                .frames()
                .iter()
                .map(|frame| WriterImageFrame {
                    width: frame.width,
                    height: frame.height,
                    delay: frame.duration_ms,
                    pixels: frame.rgba.clone(),
                })
                .collect(),
        },
    }
}

fn process_file(file: &Path, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    println!("File: {}", file.display());

    let options = DecodeOptions::default().set_strict_crc(cli.strict);

    if cli.info {
        let info = get_info(&fs::read(file)?)?;
        println!("{:#?}", info);
        return Ok(());
    }

    let info = get_info(&fs::read(file)?)?;
    let decoded = if cli.animated || info.is_animated() {
        Decoded::Animated(ApngDecoder::open(file)?.with_options(options).decode()?)
    } else {
        Decoded::Still(PngDecoder::open(file)?.with_options(options).decode()?)
    };

    if cli.void {
        return Ok(());
    }

    print_summary(&decoded);

    if let Some(output_dir) = cli.output_dir.as_deref() {
        let output_path = get_output_path(file, output_dir)?;
        let encode_options = EncodeOptions::default().set_color_type(cli.color.into());

        println!("Writing to: {}", output_path.display());

        match &decoded {
            Decoded::Still(image) => PngEncoder::new()
                .with_options(encode_options)
                .with_ancillary(image.ancillary().to_vec())
                .encode_to_file(&output_path, image.width(), image.height(), image.rgba())?,
            Decoded::Animated(image) => ApngEncoder::new()
                .with_options(encode_options.set_num_plays(image.num_plays()))
                .with_ancillary(image.ancillary().to_vec())
                .encode_to_file(&output_path, image.frames())?,
        }
    }

    if let Some(format) = cli.dump {
        let base = match cli.output_dir.as_deref() {
            Some(dir) => get_output_path(file, dir)?,
            None => file.to_path_buf(),
        };

        for path in Writer::write_frames(&base, &to_writer_image(&decoded), format.into())? {
            println!("Wrote frame: {}", path.display());
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let files = get_files(&cli.path)?;

    if files.is_empty() {
        println!("No files matched {}", cli.path);
        return Ok(());
    }

    for file in files {
        if let Err(e) = process_file(&file, &cli) {
            eprintln!("Error processing {}: {}", file.display(), e);
        }
    }

    Ok(())
}
