use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug};
use qrgrid::{ErrorCorrectionLevel, QrCode};

/// Widest accepted light border, in modules.
const MAX_BORDER: u64 = 64;

#[derive(Parser)]
#[command(name = "qrgrid")]
#[command(about = "Print a payload as a QR code in the terminal", long_about = None)]
struct Cli {
    /// Text to encode (reads stdin when neither TEXT nor --file is given)
    text: Option<String>,

    /// Encode the raw contents of a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<String>,

    /// Error correction level recorded in the format information
    #[arg(short, long, value_enum, default_value_t = Level::M)]
    level: Level,

    /// Light border width, in modules
    #[arg(
        short,
        long,
        default_value_t = 2,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_BORDER)
    )]
    border: usize,

    /// Output glyph style
    #[arg(long, value_enum, default_value_t = Style::Compact)]
    style: Style,

    /// Print version, size, and mask after the code
    #[arg(long)]
    info: bool,

    /// Encode with the external `qrcode` crate instead
    #[cfg(feature = "external-backend")]
    #[arg(long)]
    external: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for ErrorCorrectionLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => ErrorCorrectionLevel::L,
            Level::M => ErrorCorrectionLevel::M,
            Level::Q => ErrorCorrectionLevel::Q,
            Level::H => ErrorCorrectionLevel::H,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Style {
    /// Two module rows per line (half blocks)
    Compact,
    /// One module row per line, two characters per module
    Wide,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    logger
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let payload = read_payload(&cli)?;
    debug!("payload: {} bytes", payload.len());

    print!("{}", render(&cli, &payload)?);
    Ok(())
}

fn render(cli: &Cli, payload: &[u8]) -> Result<String> {
    #[cfg(feature = "external-backend")]
    if cli.external {
        return qrgrid::render::render_external(payload, cli.level.into(), cli.border)
            .context("External encoder failed");
    }

    let qr = QrCode::encode(payload, cli.level.into()).context("Failed to encode payload")?;
    let mut rendered = match cli.style {
        Style::Compact => qr.to_ascii_compact(cli.border),
        Style::Wide => qr.to_ascii(cli.border),
    };

    if cli.info {
        rendered.push('\n');
        rendered.push_str(&format!("Version: {}\n", qr.version().number()));
        rendered.push_str(&format!("Size:    {}x{}\n", qr.size(), qr.size()));
        rendered.push_str(&format!("Level:   {:?}\n", qr.error_correction()));
        rendered.push_str(&format!("Mask:    {}\n", qr.mask().id()));
    }

    Ok(rendered)
}

fn read_payload(cli: &Cli) -> Result<Vec<u8>> {
    if let Some(text) = &cli.text {
        return Ok(text.as_bytes().to_vec());
    }
    if let Some(path) = &cli.file {
        return fs::read(path).with_context(|| format!("Failed to read '{}'", path));
    }

    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read stdin")?;
    Ok(strip_line_ending(input))
}

/// Drop one trailing "\n" or "\r\n", as left by `echo`.
fn strip_line_ending(mut input: Vec<u8>) -> Vec<u8> {
    if input.last() == Some(&b'\n') {
        input.pop();
        if input.last() == Some(&b'\r') {
            input.pop();
        }
    }
    input
}
