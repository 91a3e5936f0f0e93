use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ldactool::ToolConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ldactool")]
#[command(version)]
#[command(about = "Encode audio to LDAC-style frame streams", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// More logging (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an audio file (wav, flac, mp3, ogg, ...) to a frame stream
    Encode {
        /// Input audio file at 44.1, 48, 88.2 or 96 kHz
        input: PathBuf,
        /// Output frame stream
        output: PathBuf,
        /// Quality mode (high, standard, mobile)
        #[arg(short, long)]
        quality: Option<String>,
        /// Channel mode (stereo, dual, mono)
        #[arg(long)]
        channel_mode: Option<String>,
        /// Transport MTU in bytes
        #[arg(long)]
        mtu: Option<u32>,
    },
    /// Summarize a frame stream
    Inspect {
        /// Input frame stream
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the bitrate of every quality mode at every sampling frequency
    Bitrates {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ToolConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Encode {
            input,
            output,
            quality,
            channel_mode,
            mtu,
        } => {
            encode(EncodeArgs {
                input,
                output,
                quality,
                channel_mode,
                mtu,
                config,
            })?;
        }
        Commands::Inspect { input, json } => {
            inspect(&input, json)?;
        }
        Commands::Bitrates { json } => {
            bitrates(json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct EncodeArgs {
    input: PathBuf,
    output: PathBuf,
    quality: Option<String>,
    channel_mode: Option<String>,
    mtu: Option<u32>,
    config: ToolConfig,
}

fn encode(args: EncodeArgs) -> Result<()> {
    println!("Reading {}...", args.input.display());

    let audio = ldactool::audio::read_audio_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    println!("  Format:      {}", audio.source_format);
    println!("  Sample rate: {} Hz", audio.sample_rate);
    println!("  Channels:    {}", audio.channels);
    println!("  Duration:    {:.2}s", audio.duration_secs());

    // flags override the config file
    let mut encoder = args.config.encoder;
    if let Some(q) = args.quality.as_deref() {
        encoder = encoder.with_quality(ldactool::parse_quality(q)?);
    }
    if let Some(m) = args.channel_mode.as_deref() {
        encoder = encoder.with_channel_mode(ldactool::parse_channel_mode(m)?);
    }
    if let Some(mtu) = args.mtu {
        encoder = encoder.with_mtu(mtu);
    }

    println!(
        "Encoding ({}, {})...",
        encoder.quality.name(),
        encoder.channel_mode.name()
    );

    let report = ldactool::encode_audio(&audio, encoder, args.config.output.chunk_frames)
        .context("Failed to encode audio")?;

    fs::write(&args.output, &report.stream).context("Failed to write output file")?;

    println!("Done!");
    println!("  Output:      {}", args.output.display());
    println!("  Frames:      {}", report.stats.frames);
    println!(
        "  Packets:     {} (MTU {})",
        report.packets, report.config.mtu
    );
    println!("  Bitrate:     {} bps", report.stats.bitrate);
    println!("  Size:        {} bytes", report.stream.len());

    Ok(())
}

fn inspect(input: &Path, json: bool) -> Result<()> {
    let data = fs::read(input).context("Failed to read frame stream")?;
    let info = ldactool::inspect_stream(&data)?;

    if json {
        let json_str = serde_json::to_string_pretty(&info).context("Failed to serialize info")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("LDAC Frame Stream");
    println!("───────────────────────────────");
    println!("  Frames:       {}", info.frames);
    println!("  Sample rate:  {} Hz", info.sampling_frequency);
    println!("  Channel mode: {}", info.channel_mode);
    println!("  Quality:      {}", info.quality);
    println!("  Frame size:   {} bytes", info.frame_bytes);
    println!("  Bitrate:      {} bps", info.bitrate);
    println!("  Duration:     {:.2}s", info.duration_secs);
    println!("  File size:    {} bytes", info.file_size);
    if info.skipped_bytes > 0 {
        println!("  Skipped:      {} bytes", info.skipped_bytes);
    }
    println!(
        "  Consistent:   {}",
        if info.consistent { "yes" } else { "no" }
    );
    if let Some(ref reason) = info.truncated {
        println!("  Truncated:    {}", reason);
    }
    println!("  BLAKE3:       {}", info.blake3);

    Ok(())
}

fn bitrates(json: bool) -> Result<()> {
    let table = ldactool::bitrate_table();

    if json {
        let json_str = serde_json::to_string_pretty(&table).context("Failed to serialize table")?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("{:<10} {:>8} {:>8} {:>7} {:>10}", "quality", "rate", "payload", "frame", "bitrate");
    for row in table {
        println!(
            "{:<10} {:>8} {:>8} {:>7} {:>10}",
            row.quality, row.sampling_frequency, row.payload_bytes, row.frame_bytes, row.bitrate
        );
    }

    Ok(())
}
