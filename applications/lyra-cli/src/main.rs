/// Lyra - music library synchronization from the command line
use clap::{Parser, Subcommand};
use lyra_sync::{Diagnostic, SyncEngine, SyncReport, SyncRequest};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lyra")]
#[command(about = "Personal music library manager", long_about = None)]
struct Cli {
    /// SQLite database URL
    #[arg(long, env = "LYRA_DATABASE_URL", default_value = "sqlite://lyra.db")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synchronize the library with one or more music directories
    Sync {
        /// Absolute music directories to scan
        directories: Vec<PathBuf>,

        /// Directory cover images are written to
        #[arg(long, default_value = "covers")]
        covers: PathBuf,
    },
    /// List all tracks in the library
    Tracks,
    /// List all artists in the library
    Artists,
    /// List all albums in the library
    Albums,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyra=info,lyra_sync=info,lyra_storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    tracing::info!(database = %cli.database_url, "Starting Lyra");

    let pool = lyra_storage::create_pool(&cli.database_url).await?;
    lyra_storage::run_migrations(&pool).await?;

    match cli.command {
        Commands::Sync {
            directories,
            covers,
        } => {
            let directories = directories
                .into_iter()
                .map(|dir| {
                    if dir.is_absolute() {
                        Ok(dir)
                    } else {
                        std::fs::canonicalize(&dir)
                            .map_err(|e| anyhow::anyhow!("cannot resolve {}: {e}", dir.display()))
                    }
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let covers = if covers.is_absolute() {
                covers
            } else {
                std::env::current_dir()?.join(covers)
            };

            let engine = SyncEngine::new(pool.clone());
            let report = engine
                .sync(&SyncRequest {
                    directories,
                    covers_directory: covers,
                })
                .await?;
            print_report(&report);
        }
        Commands::Tracks => {
            for track in lyra_storage::tracks::get_all(&pool).await? {
                println!(
                    "{} - {} [{}]",
                    track.artist.as_deref().unwrap_or("Unknown Artist"),
                    track.title.as_deref().unwrap_or("Untitled"),
                    track.file_path
                );
            }
        }
        Commands::Artists => {
            for artist in lyra_storage::artists::get_all(&pool).await? {
                println!("{}", artist.name);
            }
        }
        Commands::Albums => {
            for album in lyra_storage::albums::get_all(&pool).await? {
                match &album.artist_name {
                    Some(artist) => println!("{} - {}", artist, album.name),
                    None => println!("{}", album.name),
                }
            }
        }
    }

    pool.close().await;

    Ok(())
}

fn print_report(report: &SyncReport) {
    println!(
        "Synced: {} added/updated, {} artists, {} albums",
        report.tracks.len(),
        report.artists.len(),
        report.albums.len()
    );

    for track in &report.tracks {
        println!("  + {}", track.file_path);
    }

    if !report.diagnostics.is_empty() {
        println!("Warnings:");
        for diagnostic in &report.diagnostics {
            match diagnostic {
                Diagnostic::Scan { directory, reason } => {
                    println!("  scan {directory}: {reason}");
                }
                Diagnostic::Read { file_path, reason } => {
                    println!("  read {file_path}: {reason}");
                }
                Diagnostic::Cover { file_path, reason } => {
                    println!("  cover {file_path}: {reason}");
                }
                Diagnostic::Upsert { file_path, reason } => {
                    println!("  upsert {file_path}: {reason}");
                }
                Diagnostic::Delete { target, reason } => {
                    println!("  delete {target}: {reason}");
                }
            }
        }
    }
}
