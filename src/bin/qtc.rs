//! qtc CLI - quadtree grayscale image codec command-line utility.
//!
//! Compresses PGM images into the QTC (Q1) container and back, with an
//! optional lossy filtering pass and a segmentation-grid rendering of the
//! decomposition.

use clap::{ArgGroup, Parser};
use std::fs;
use std::path::{Path, PathBuf};

use qtc_rs::bit_stream::BitStream;
use qtc_rs::qtc::{build_quadtree, decode, encode, filter_quadtree, render_grid, render_image, Quadtree};
use qtc_rs::{pgm, qtc_stream_reader, qtc_stream_writer};

/// Quadtree codec for grayscale PGM images
#[derive(Parser)]
#[command(name = "qtc")]
#[command(author = "qtc-rs contributors")]
#[command(version)]
#[command(about = "Encode PGM images to QTC and decode them back", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["encode", "decode"])))]
#[command(after_help = "EXAMPLES:
    qtc -c -i image.pgm -o image.qtc
    qtc -c -i image.pgm -o image.qtc -a 1.5
    qtc -c -g -i image.pgm -o image.qtc
    qtc -u -i image.qtc -o image.pgm

ALPHA:
    alpha <= 1.0  barely filters; no extra compression gain
    alpha ~ 1.5   moderate filtering, reasonable gain
    alpha >= 2.0  aggressive filtering, visibly degraded output")]
struct Cli {
    /// Encode a PGM image into QTC format
    #[arg(short = 'c', long = "compress")]
    encode: bool,

    /// Decode a QTC file into a PGM image
    #[arg(short = 'u', long = "uncompress")]
    decode: bool,

    /// Also write the segmentation grid (<output stem>_g.pgm)
    #[arg(short, long)]
    grid: bool,

    /// Input file (.pgm for -c, .qtc for -u)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (defaults to out.qtc / out.pgm)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Filtering strength for lossy encoding; must be strictly positive
    #[arg(short, long, requires = "encode")]
    alpha: Option<f64>,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    }

    let result = if cli.encode {
        run_encode(&cli)
    } else {
        run_decode(&cli)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_encode(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(&cli.input)?;
    let image = pgm::decode(&data)?;

    let mut tree = build_quadtree(&image)?;
    if let Some(alpha) = cli.alpha {
        filter_quadtree(&mut tree, alpha)?;
    }

    let output = output_path(cli, "out.qtc");
    if cli.grid {
        write_grid(&tree, &output)?;
    }

    let stream = encode(&tree);
    let container = qtc_stream_writer::write_container(stream.as_bytes(), tree.levels());
    fs::write(&output, container)?;
    println!(
        "✓ Encoded {}x{} image to {:?}",
        image.width, image.height, output
    );
    Ok(())
}

fn run_decode(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(&cli.input)?;
    let payload = qtc_stream_reader::read_container(&data)?;

    let mut stream = BitStream::from_bytes(payload);
    let tree = decode(&mut stream)?;
    let image = render_image(&tree)?;

    let output = output_path(cli, "out.pgm");
    let date = chrono::Local::now().format("%a %b %e %H:%M:%S %Y");
    let comment = format!("Decompression date : {date}");
    fs::write(&output, pgm::encode(&image, &[&comment]))?;
    if cli.grid {
        write_grid(&tree, &output)?;
    }
    println!(
        "✓ Decoded {}x{} image to {:?}",
        image.width, image.height, output
    );
    Ok(())
}

fn write_grid(tree: &Quadtree, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let grid = render_grid(tree)?;
    let path = grid_path(output);
    fs::write(&path, pgm::encode(&grid, &[]))?;
    println!("✓ Segmentation grid written to {:?}", path);
    Ok(())
}

fn output_path(cli: &Cli, default: &str) -> PathBuf {
    cli.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default))
}

// out/image.qtc -> out/image_g.pgm
fn grid_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("out");
    output.with_file_name(format!("{stem}_g.pgm"))
}
