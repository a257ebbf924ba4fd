use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gray_codec::Scheme;
use graypack::imaging;
use graypack::models::{AppConfig, CompressionReport, DecoderChoice};
use graypack::services::{self, CompressionService};

#[derive(Parser)]
#[command(name = "graypack")]
#[command(about = "Lossless grayscale image compression workbench")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress and decompress an image with each scheme and report the results
    Bench {
        /// Input PNG file
        input: PathBuf,

        /// Scheme to run: rle-grayscale, rle-bitplane or huffman (repeatable)
        #[arg(short, long = "scheme")]
        schemes: Vec<Scheme>,

        /// YAML config file (falls back to GRAYPACK_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Huffman decoder: length-scan or tree-walk
        #[arg(long)]
        decoder: Option<DecoderChoice>,

        /// Skip the pixel-for-pixel comparison
        #[arg(long)]
        no_verify: bool,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,

        /// Write each decoded image to DIR/<stem>.<scheme>.png
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Clear bit-planes from an image (0 = least significant)
    StripPlanes {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Plane to clear, 0-7 (repeatable)
        #[arg(
            short,
            long = "plane",
            required = true,
            value_parser = clap::value_parser!(u8).range(0..8)
        )]
        planes: Vec<u8>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Bench {
            input,
            schemes,
            config,
            decoder,
            no_verify,
            json,
            output_dir,
        }) => {
            init_logging();
            let config_path =
                config.or_else(|| std::env::var("GRAYPACK_CONFIG").ok().map(PathBuf::from));
            let mut config = AppConfig::load(config_path.as_deref()).with_schemes(schemes);
            if let Some(decoder) = decoder {
                config.huffman_decoder = decoder;
            }
            if no_verify {
                config.verify = false;
            }
            run_bench_command(&input, config, json, output_dir.as_deref())
        }
        Some(Commands::StripPlanes {
            input,
            output,
            planes,
        }) => {
            init_logging();
            let stripped = services::strip_planes(&input, &output, &planes)?;
            println!(
                "Wrote {} ({}x{})",
                output.display(),
                stripped.width(),
                stripped.height()
            );
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graypack=info,gray_codec=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Run every configured scheme over one image
fn run_bench_command(
    input: &Path,
    config: AppConfig,
    json: bool,
    output_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let grid = imaging::load_grayscale(input)?;
    tracing::info!(
        path = %input.display(),
        width = grid.width(),
        height = grid.height(),
        "Loaded image"
    );

    let service = CompressionService::new(config);
    let outcomes = service.run(&grid)?;

    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        for outcome in &outcomes {
            let path = dir.join(format!("{stem}.{}.png", outcome.report.scheme));
            imaging::save_grayscale(&path, &outcome.decoded)?;
        }
    }

    let reports: Vec<&CompressionReport> = outcomes.iter().map(|o| &o.report).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_table(input, &reports);
    }
    Ok(())
}

fn print_table(input: &Path, reports: &[&CompressionReport]) {
    if let Some(first) = reports.first() {
        println!(
            "{} ({}x{}, {} bytes)\n",
            input.display(),
            first.width,
            first.height,
            first.original_bytes
        );
    }
    println!(
        "{:<14} {:>12} {:>8} {:>8} {:>12} {:>12} {:>8}",
        "scheme", "bytes", "size %", "ratio", "compress", "decompress", "verified"
    );
    for r in reports {
        println!(
            "{:<14} {:>12} {:>7.1}% {:>8.3} {:>10.2}ms {:>10.2}ms {:>8}",
            r.scheme,
            r.compressed_bytes,
            r.size_percent(),
            r.ratio,
            r.compress_nanos as f64 / 1e6,
            r.decompress_nanos as f64 / 1e6,
            if r.verified { "yes" } else { "no" }
        );
    }
}

/// Print a short summary when no subcommand is given
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("GRAYPACK_CONFIG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Graypack v{VERSION}");
    println!("Lossless grayscale image compression workbench\n");

    println!("Environment Variables:");
    println!(
        "  GRAYPACK_CONFIG = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG        = {}",
        rust_log
            .as_deref()
            .unwrap_or("graypack=info,gray_codec=warn (default)")
    );

    println!("\nSchemes:");
    for scheme in Scheme::ALL {
        println!("  {scheme}");
    }

    println!("\nCommands:");
    println!("  graypack bench          Compress an image with each scheme and report");
    println!("  graypack strip-planes   Clear bit-planes from an image");
    println!("\nRun 'graypack --help' for more details.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_planes_accepts_planes_0_to_7() {
        let cli = Cli::try_parse_from([
            "graypack",
            "strip-planes",
            "in.png",
            "out.png",
            "--plane",
            "0",
            "-p",
            "7",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::StripPlanes { planes, .. }) => assert_eq!(planes, vec![0, 7]),
            _ => panic!("Expected StripPlanes command"),
        }
    }

    #[test]
    fn test_strip_planes_rejects_plane_8_at_parse_time() {
        for plane in ["8", "9", "255"] {
            let result = Cli::try_parse_from([
                "graypack",
                "strip-planes",
                "in.png",
                "out.png",
                "--plane",
                plane,
            ]);
            assert!(result.is_err(), "plane {plane} was accepted");
        }
    }

    #[test]
    fn test_bench_parses_schemes() {
        let cli =
            Cli::try_parse_from(["graypack", "bench", "in.png", "-s", "huffman", "--scheme", "rle-bitplane"])
                .unwrap();
        match cli.command {
            Some(Commands::Bench { schemes, .. }) => {
                assert_eq!(schemes, vec![Scheme::Huffman, Scheme::RleBitPlane])
            }
            _ => panic!("Expected Bench command"),
        }
    }
}
