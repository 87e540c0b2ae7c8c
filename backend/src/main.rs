use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use songs_api::db::Database;
use songs_api::models::song::NewSong;
use songs_api::store::SongStore;

/// Bulk-load songs from a JSON array file into the songs table.
#[derive(Debug, Parser)]
#[command(name = "song-loader", version)]
struct Args {
    /// JSON file holding an array of song objects
    #[arg(default_value = "songs.json")]
    path: PathBuf,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

fn read_songs(path: &Path) -> anyhow::Result<Vec<NewSong>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a song array", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let songs = read_songs(&args.path)?;
    info!("Read {} songs from {}", songs.len(), args.path.display());

    let database = match &args.database_url {
        Some(url) => Database::connect(url).await?,
        None => Database::new().await?,
    };
    database.migrate().await?;

    let inserted = database.insert_songs(songs).await?;
    println!("Data inserted successfully ({inserted} songs)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_song_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"artist": "The Yousicians", "title": "Lycanthropic Metamorphosis",
                "difficulty": 14.6, "level": 13, "released": "2016-10-26"}}]"#
        )
        .unwrap();

        let songs = read_songs(file.path()).unwrap();

        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Lycanthropic Metamorphosis");
        assert_eq!(songs[0].level, 13);
    }

    #[test]
    fn rejects_non_array_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"artist": "solo"}}"#).unwrap();

        assert!(read_songs(file.path()).is_err());
    }

    #[test]
    fn path_defaults_to_songs_json() {
        let args = Args::try_parse_from(["song-loader", "--database-url", "postgres://x"]).unwrap();

        assert_eq!(args.path, PathBuf::from("songs.json"));
        assert_eq!(args.database_url.as_deref(), Some("postgres://x"));
    }
}
