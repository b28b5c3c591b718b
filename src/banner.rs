//! banner - Render text as large ASCII or Braille art

use artconv::config::Mode;
use artconv::{ArtError, Converter, Image};
use clap::Parser;
use fontdue::{Font, FontSettings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "banner", about = "Render text as large ASCII or Braille art")]
struct Args {
    /// Text to render
    text: String,
    /// Font file for rendering the text
    #[arg(short, long, default_value = "assets/DejaVuSansMono.ttf")]
    font: PathBuf,
    /// Glyph height in pixels before conversion
    #[arg(short = 'H', long, default_value = "64")]
    height: u32,
    /// Chunk side length in pixels
    #[arg(short, long, default_value = "4")]
    chunk_size: usize,
    /// Render with braille dots instead of an alphabet
    #[arg(short, long)]
    braille: bool,
    /// Alphabet for simple mode, darkest first
    #[arg(short, long, default_value = " .:-=+*#%@")]
    alphabet: String,
}

fn main() -> Result<(), ArtError> {
    let args = Args::parse();
    env_logger::init();

    let font_data = std::fs::read(&args.font)?;
    let font = Font::from_bytes(font_data, FontSettings::default())
        .map_err(|e| ArtError::InvalidArguments(e.to_string()))?;

    let mode = if args.braille {
        // the blank border ring would eat the outer strokes of the text
        Mode::Braille { break_point: 127, edges: true }
    } else {
        Mode::Simple { alphabet: args.alphabet.clone() }
    };
    let converter = Converter::new(args.chunk_size).with_mode(&mode, false)?;

    let image = render_text(&font, &args.text, args.height)?;
    print!("{}", converter.create_art(&image)?);
    Ok(())
}

/// Rasterise `text` on one baseline into a greyscale image, white on black.
fn render_text(font: &Font, text: &str, height: u32) -> Result<Image, ArtError> {
    let height = height as usize;
    let font_size = height as f32 * 0.875; // ~87.5% to fit with baseline
    // Baseline at ~75% down
    let baseline_y = (height as f32 * 0.75) as i32;

    let glyphs: Vec<_> = text.chars().map(|ch| font.rasterize(ch, font_size)).collect();
    let width = glyphs
        .iter()
        .map(|(metrics, _)| metrics.advance_width.ceil() as usize)
        .sum::<usize>()
        .max(1);

    let mut pixels = vec![0u8; width * height];
    let mut pen_x = 0i32;
    for (metrics, bitmap) in &glyphs {
        let x_offset = pen_x + metrics.xmin;
        let y_offset = baseline_y - metrics.height as i32 - metrics.ymin;
        for sy in 0..metrics.height {
            for sx in 0..metrics.width {
                let tx = x_offset + sx as i32;
                let ty = y_offset + sy as i32;
                if tx >= 0 && (tx as usize) < width && ty >= 0 && (ty as usize) < height {
                    pixels[ty as usize * width + tx as usize] = bitmap[sy * metrics.width + sx];
                }
            }
        }
        pen_x += metrics.advance_width.ceil() as i32;
    }

    Image::from_raw(width, height, 1, pixels)
}
