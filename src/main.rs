//! artconv CLI - Convert images to ASCII or Braille art

use artconv::config::{ArtConfig, Mode};
use artconv::{ArtError, Converter, Image, WeightedBrightness};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Simple,
    Braille,
}

#[derive(Parser)]
#[command(name = "artconv", about = "Convert images to ASCII or Braille art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Chunk side length in pixels (one output character per chunk)
    #[arg(short, long)]
    chunk_size: Option<usize>,
    /// Mapping mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
    /// Alphabet for simple mode, darkest first
    #[arg(short, long)]
    alphabet: Option<String>,
    /// Brightness threshold for braille dots
    #[arg(short, long)]
    break_point: Option<u8>,
    /// Convert the border chunks in braille mode
    #[arg(long)]
    edges: bool,
    /// Invert the image
    #[arg(short, long)]
    invert: bool,
    /// Average color channels equally instead of BT.601 luma
    #[arg(long)]
    equal_weights: bool,
    /// Convert rows in parallel
    #[arg(short, long)]
    parallel: bool,
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn resolve_config(&self) -> Result<ArtConfig, ArtError> {
        let mut config = match &self.config {
            Some(path) => ArtConfig::load(path)?,
            None => ArtConfig::default(),
        };

        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }

        let (alphabet, break_point, edges) = match &config.mode {
            Mode::Simple { alphabet } => (alphabet.clone(), None, false),
            Mode::Braille { break_point, edges } => (String::new(), Some(*break_point), *edges),
        };
        let braille = match self.mode {
            Some(ModeArg::Braille) => true,
            Some(ModeArg::Simple) => false,
            None => break_point.is_some(),
        };
        config.mode = if braille {
            Mode::Braille {
                break_point: self
                    .break_point
                    .or(break_point)
                    .unwrap_or(artconv::braille::DEFAULT_BREAK_POINT),
                edges: self.edges || edges,
            }
        } else {
            let alphabet = match &self.alphabet {
                Some(a) => a.clone(),
                None if alphabet.is_empty() => artconv::simple::DEFAULT_ALPHABET.to_string(),
                None => alphabet,
            };
            Mode::Simple { alphabet }
        };

        if self.equal_weights {
            config.weights = WeightedBrightness::equal();
        }
        config.invert |= self.invert;
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn main() -> Result<(), ArtError> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let config = args.resolve_config()?;
    log::info!("converting {} with {:?}", args.input.display(), config);

    let converter = Converter::from_config(&config)?;
    let image = Image::open(&args.input)?;

    print!("{}", converter.create_art(&image)?);
    Ok(())
}
