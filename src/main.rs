use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use rawbind_rs::logger;
use rawbind_rs::raw_processing::{
    LibRaw, Processor, ProcessorOptions, TiffCompression, TiffConfig, save_tiff,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode camera RAW files with LibRaw", long_about = None)]
struct Args {
    /// RAW file to decode
    input: PathBuf,

    /// Write the decoded image as a TIFF
    #[arg(short, long, value_name = "TIFF")]
    output: Option<PathBuf>,

    /// Processor options in TOML
    #[arg(long, value_name = "TOML")]
    options: Option<PathBuf>,

    /// Write the embedded preview to this file
    #[arg(long, value_name = "FILE")]
    thumbnail: Option<PathBuf>,

    /// Print metadata without demosaicing
    #[arg(long)]
    metadata_only: bool,

    /// Compression of the TIFF output
    #[arg(long, value_enum, default_value_t = Compression::None)]
    compression: Compression,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum Compression {
    None,
    Lzw,
    Deflate,
}

impl From<Compression> for TiffCompression {
    fn from(value: Compression) -> Self {
        match value {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::Deflate => TiffCompression::DeflateBalanced,
        }
    }
}

fn main() -> Result<()> {
    logger::init();
    let args = Args::parse();

    info!("LibRaw {}", LibRaw::version());

    let options = match &args.options {
        Some(path) => ProcessorOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => ProcessorOptions::default(),
    };
    let processor = Processor::new(options);

    if let Some(path) = &args.thumbnail {
        let thumbnail = processor
            .extract_thumbnail(&args.input)
            .with_context(|| format!("extracting thumbnail of {}", args.input.display()))?;
        std::fs::write(path, thumbnail.to_file_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
        info!(
            "Thumbnail {:?} {}x{} written to {}",
            thumbnail.format,
            thumbnail.width,
            thumbnail.height,
            path.display()
        );
    }

    if args.metadata_only {
        let metadata = processor
            .read_metadata(&args.input)
            .with_context(|| format!("reading {}", args.input.display()))?;
        print!("{}{}", metadata.camera, metadata.sizes);
        if let Some(date) = metadata.capture_date_local().filter(|_| metadata.has_capture_time()) {
            println!("Captured: {}", date.format("%Y-%m-%d %H:%M:%S"));
        }
        return Ok(());
    }

    let (image, metadata, _timings) = processor
        .process_raw_with_timings(&args.input)
        .with_context(|| format!("decoding {}", args.input.display()))?;

    info!(
        "{} {}: {}x{}",
        metadata.camera.make, metadata.camera.model, image.width, image.height
    );
    if !metadata.has_capture_time() {
        warn!("File has no capture time");
    }

    if let Some(path) = &args.output {
        let config = TiffConfig::builder()
            .compression(args.compression.into())
            .build();
        save_tiff(&image, path, &config).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
