use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use icebreaker_flash_image::{pack, parse_address, BIN_FILE_NAME, HEX_FILE_NAME};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Pack a firmware hex dump into an iCEBreaker flash image"
)]
struct Args {
    /// Entry point address (hex, `0x` prefix optional)
    #[arg(value_parser = parse_address)]
    entry: u32,

    /// Input hex dump; read from stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory for firmware.hex and firmware.bin
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read hex dump {:?}", path))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read hex dump from stdin")?;
            text
        }
    };

    let image = pack(&text, args.entry).context("Failed to pack flash image")?;

    fs::create_dir_all(&args.out_dir).context("Failed to create output directory")?;

    let hex_path = args.out_dir.join(HEX_FILE_NAME);
    fs::write(&hex_path, image.to_hex_dump())
        .with_context(|| format!("Failed to write {:?}", hex_path))?;

    let bin_path = args.out_dir.join(BIN_FILE_NAME);
    fs::write(&bin_path, image.as_bytes())
        .with_context(|| format!("Failed to write {:?}", bin_path))?;

    info!(
        "Packed {} bytes, entry {:#x} -> {:?}",
        image.as_bytes().len(),
        args.entry,
        args.out_dir
    );

    Ok(())
}
