use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagtrim::audio::{transform, TagSet, TransformOutcome};
use tagtrim::parse_cut_range;
use tagtrim::Config;
use tracing::info;

#[derive(Parser)]
#[command(name = "tagtrim", about = "Trim audio files and embed metadata tags")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trim an audio file to a range and re-export it with tags
    Cut {
        /// Input audio file (MP3, WAV, FLAC, OGG, M4A)
        input: PathBuf,
        /// Output file; `.mp3` is appended when there is no extension
        output: PathBuf,
        /// Cut range such as "1:15-2:30", "75-150" or "1m15s-2m30s";
        /// omit to re-export the full audio with new tags
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        album: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load("config/tagtrim").unwrap_or_default();
    info!("{} v0.1.0", cfg.service.name);

    match cli.command {
        Command::Cut {
            input,
            output,
            range,
            title,
            artist,
            album,
            genre,
            date,
        } => {
            let (start, end) = match range.as_deref() {
                Some(text) => {
                    let (start, end) = parse_cut_range(text)?;
                    (Some(start), Some(end))
                }
                None => (None, None),
            };

            let tags = TagSet {
                title,
                artist,
                album,
                genre,
                date,
            };

            let (outcome, path) = transform::process(&input, &output, start, end, &tags)?;
            match outcome {
                TransformOutcome::Saved => info!("Saved full audio to {}", path.display()),
                TransformOutcome::Cut => info!("Cut exported to {}", path.display()),
            }
        }
    }

    Ok(())
}
