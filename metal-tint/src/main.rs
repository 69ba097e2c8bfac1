mod logger;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tint_effect::{Error, Image, PROBE, decode, encode, parse_coefficient, sample_at, transform};

/// Fake a metallic tint by rewriting the blue channel from the inverted green channel.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Image to read
    input: PathBuf,

    /// Where to write the tinted image; the extension picks the format
    output: PathBuf,

    /// Scale applied to `255 - green` before it becomes the new blue
    #[arg(allow_hyphen_values = true)]
    coefficient: String,
}

fn main() -> Result<()> {
    logger::init_logger();

    let cli = Cli::parse();

    let coefficient = staged(parse_coefficient(&cli.coefficient))?;
    let mut image = staged(decode(&cli.input))?;

    log_probe("before", &image);
    staged(transform(&mut image, coefficient))?;
    log_probe("after", &image);

    staged(encode(&cli.output, &image))?;

    log::info!(
        "wrote {} (coefficient {coefficient})",
        cli.output.display()
    );

    Ok(())
}

/// Tags a library error with the stage it came from.
fn staged<T>(result: tint_effect::Result<T>) -> Result<T> {
    result.map_err(|err: Error| {
        let stage = err.stage();
        anyhow::Error::new(err).context(format!("{stage} failed"))
    })
}

fn log_probe(label: &str, image: &Image) {
    match sample_at(image, PROBE.0, PROBE.1) {
        Some(sample) => log::info!("sample at {PROBE:?} {label}: {sample}"),
        None => log::debug!("image smaller than probe {PROBE:?}, nothing to show {label}"),
    }
}
