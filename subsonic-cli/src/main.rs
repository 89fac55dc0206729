use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use subsonic_api::{
    Profile, Refreshable, SearchQuery, Song, StarTarget, SubsonicClient,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "subsonic", version, about = "Subsonic / OpenSubsonic music server CLI")]
struct Cli {
    /// Log requests (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save server and account
    Login {
        /// Server address, e.g. music.example.com
        #[arg(required_unless_present = "check")]
        url: Option<String>,
        #[arg(required_unless_present = "check")]
        username: Option<String>,
        #[arg(required_unless_present = "check")]
        password: Option<String>,
        /// Client name sent to the server
        #[arg(long)]
        client: Option<String>,
        /// Send the password instead of a salted token
        #[arg(long)]
        plain: bool,
        /// Use http:// instead of https://
        #[arg(long)]
        http: bool,
        /// Send parameters in the query string instead of a form body
        #[arg(long)]
        get: bool,
        /// Check the saved login against the server
        #[arg(long)]
        check: bool,
    },
    /// Clear saved login
    Logout,
    /// Check connectivity and credentials
    Ping,
    /// Search artists, albums and songs
    Search {
        query: String,
        /// Max results per kind
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
    /// Show album details
    Album { id: String },
    /// Show song details
    Song { id: String },
    /// Show artist details
    Artist { id: String },
    /// List playlists
    Playlists,
    /// Show playlist details
    Playlist { id: String },
    /// Star a song, album or artist
    Star {
        kind: StarKind,
        id: String,
        /// Remove the star instead
        #[arg(long)]
        remove: bool,
    },
    /// Rate a song, album or artist (1-5, 0 removes the rating)
    Rate { id: String, rating: u8 },
    /// Download a song
    Download {
        id: String,
        /// Output file or directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Download cover art
    Cover {
        id: String,
        /// Output file or directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Max width in pixels
        #[arg(short, long)]
        size: Option<u32>,
    },
    /// Start a library scan
    Scan,
}

#[derive(Clone, Copy, ValueEnum)]
enum StarKind {
    Song,
    Album,
    Artist,
}

impl From<StarKind> for StarTarget {
    fn from(k: StarKind) -> Self {
        match k {
            StarKind::Song => Self::Song,
            StarKind::Album => Self::Album,
            StarKind::Artist => Self::Artist,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json = cli.json;

    match cli.command {
        Command::Login {
            url,
            username,
            password,
            client,
            plain,
            http,
            get,
            check,
        } => {
            if check {
                return cmd_check();
            }
            let profile = Profile {
                url,
                username,
                password,
                client: client.unwrap_or_else(|| subsonic_api::config::DEFAULT_CLIENT_NAME.into()),
                use_https: !http,
                use_token: !plain,
                use_get: get,
            };
            cmd_login(&profile)
        }
        Command::Logout => cmd_logout(),
        Command::Ping => {
            connect()?.ping()?;
            println!("ok");
            Ok(())
        }
        Command::Search { query, limit } => cmd_search(&query, limit, json),
        Command::Album { id } => cmd_album(&id, json),
        Command::Song { id } => cmd_song(&id, json),
        Command::Artist { id } => cmd_artist(&id, json),
        Command::Playlists => cmd_playlists(json),
        Command::Playlist { id } => cmd_playlist(&id, json),
        Command::Star { kind, id, remove } => cmd_star(kind, &id, remove),
        Command::Rate { id, rating } => cmd_rate(&id, rating),
        Command::Download { id, output } => {
            let path = connect()?.download(&id, &output)?;
            println!("Downloaded {}", path.display());
            Ok(())
        }
        Command::Cover { id, output, size } => {
            let path = connect()?.get_cover_art(&id, size, &output)?;
            println!("Saved {}", path.display());
            Ok(())
        }
        Command::Scan => {
            let status = connect()?.start_scan()?;
            println!("Scanning: {}", status.scanning);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "subsonic_api=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn connect() -> Result<SubsonicClient> {
    let profile = Profile::load()?;
    if !profile.is_logged_in() {
        bail!("not logged in, run `subsonic login <url> <user> <password>` first");
    }
    Ok(SubsonicClient::new(profile.to_config()?)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── login / logout ──

fn cmd_login(profile: &Profile) -> Result<()> {
    let client = SubsonicClient::new(profile.to_config()?)?;
    client
        .ping()
        .context("server rejected the login, profile not saved")?;
    profile.save()?;
    println!("Profile saved for {}.", client.base_url());
    Ok(())
}

fn cmd_check() -> Result<()> {
    let profile = Profile::load()?;
    if !profile.is_logged_in() {
        println!("Not logged in.");
        return Ok(());
    }
    let client = SubsonicClient::new(profile.to_config()?)?;
    let username = &client.credentials().username;
    match client.ping() {
        Ok(()) => println!("Logged in as {username} on {}", client.base_url()),
        Err(e) => println!("Profile exists but validation failed: {e}"),
    }
    Ok(())
}

fn cmd_logout() -> Result<()> {
    Profile::clear()?;
    println!("Profile cleared.");
    Ok(())
}

// ── browsing ──

fn song_line(s: &Song) -> String {
    let artist = s
        .artist
        .as_ref()
        .and_then(|a| a.name.as_deref())
        .or(s.display_artist.as_deref())
        .unwrap_or("?");
    let title = s.title.as_deref().unwrap_or("?");
    match s.duration {
        Some(d) => format!("[{}] {artist} - {title} ({}:{:02})", s.id, d / 60, d % 60),
        None => format!("[{}] {artist} - {title}", s.id),
    }
}

fn cmd_search(query: &str, limit: u32, json: bool) -> Result<()> {
    let client = connect()?;
    let result = client.search(&SearchQuery::new(query).count(limit))?;
    if json {
        return print_json(&result);
    }

    for a in &result.artists {
        println!("  artist [{}] {}", a.id, a.name.as_deref().unwrap_or("?"));
    }
    for a in &result.albums {
        println!("  album  [{}] {}", a.id, a.name.as_deref().unwrap_or("?"));
    }
    for s in &result.songs {
        println!("  song   {}", song_line(s));
    }
    if result.is_empty() {
        println!("No results.");
    }
    Ok(())
}

fn cmd_album(id: &str, json: bool) -> Result<()> {
    let album = connect()?.get_album(id)?;
    if json {
        return print_json(&album);
    }
    println!("Album:  {} (id={})", album.name.as_deref().unwrap_or("?"), album.id);
    if let Some(artist) = &album.artist {
        println!("Artist: {} (id={})", artist.name.as_deref().unwrap_or("?"), artist.id);
    }
    if let Some(year) = album.year {
        println!("Year:   {year}");
    }
    if let Some(songs) = &album.songs {
        println!();
        for s in songs {
            println!("  {}", song_line(s));
        }
    }
    Ok(())
}

fn cmd_song(id: &str, json: bool) -> Result<()> {
    let song = connect()?.get_song(id)?;
    if json {
        return print_json(&song);
    }
    println!("{}", song_line(&song));
    if let Some(album) = &song.album {
        println!("Album:   {} (id={})", album.name.as_deref().unwrap_or("?"), album.id);
    }
    if let (Some(suffix), Some(bit_rate)) = (&song.suffix, song.bit_rate) {
        println!("Format:  {suffix} {bit_rate} kbps");
    }
    if let Some(starred) = song.starred {
        println!("Starred: {starred}");
    }
    if let Some(rating) = song.user_rating {
        println!("Rating:  {rating}/5");
    }
    Ok(())
}

fn cmd_artist(id: &str, json: bool) -> Result<()> {
    let artist = connect()?.get_artist(id)?;
    if json {
        return print_json(&artist);
    }
    println!("Artist: {} (id={})", artist.name.as_deref().unwrap_or("?"), artist.id);
    for a in artist.albums.iter().flatten() {
        let year = a.year.map(|y| format!(" ({y})")).unwrap_or_default();
        println!("  [{}] {}{year}", a.id, a.name.as_deref().unwrap_or("?"));
    }
    Ok(())
}

// ── playlists ──

fn cmd_playlists(json: bool) -> Result<()> {
    let playlists = connect()?.get_playlists(None)?;
    if json {
        return print_json(&playlists);
    }
    for p in &playlists {
        println!(
            "  [{}] {} ({} songs)",
            p.id,
            p.name.as_deref().unwrap_or("?"),
            p.song_count.unwrap_or(0)
        );
    }
    Ok(())
}

fn cmd_playlist(id: &str, json: bool) -> Result<()> {
    let p = connect()?.get_playlist(id)?;
    if json {
        return print_json(&p);
    }
    println!("Playlist: {} (id={})", p.name.as_deref().unwrap_or("?"), p.id);
    if let Some(owner) = &p.owner {
        println!("Owner:    {}", owner.username);
    }
    if let Some(comment) = &p.comment {
        println!("Comment:  {comment}");
    }
    if let Some(songs) = &p.songs {
        println!();
        for s in songs {
            println!("  {}", song_line(s));
        }
    }
    Ok(())
}

// ── annotation ──

fn cmd_star(kind: StarKind, id: &str, remove: bool) -> Result<()> {
    let client = connect()?;
    if remove {
        client.unstar(kind.into(), id)?;
        println!("Unstarred {id}.");
    } else {
        client.star(kind.into(), id)?;
        println!("Starred {id}.");
    }
    Ok(())
}

fn cmd_rate(id: &str, rating: u8) -> Result<()> {
    let client = connect()?;
    if rating == 0 {
        client.remove_rating(id)?;
        println!("Rating removed.");
        return Ok(());
    }
    client.set_rating(id, rating)?;
    let reloaded = Song::from_id(id, &client.handle()).generate();
    println!("{}", rated_message(id, rating, reloaded));
    Ok(())
}

/// Show the stored value when the id is a song. Albums and artists fail
/// the reload, which is logged and otherwise ignored.
fn rated_message(id: &str, rating: u8, reloaded: subsonic_api::Result<Song>) -> String {
    match reloaded {
        Ok(song) => format!("Rated {}.", song_line(&song)),
        Err(err) => {
            warn!(id, error = %err, "could not reload rated item as a song");
            format!("Rated {id} {rating}/5.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subsonic_api::{ClientRef, ErrorCode, SubsonicError};

    #[test]
    fn rated_song_is_shown_from_server_state() {
        let mut song = Song::from_id("s1", &ClientRef::detached());
        song.title = Some("Intro".into());
        song.duration = Some(95);
        assert_eq!(rated_message("s1", 4, Ok(song)), "Rated [s1] ? - Intro (1:35).");
    }

    #[test]
    fn failed_reload_falls_back_to_the_id() {
        let err = SubsonicError::Api {
            code: ErrorCode::NotFound,
            message: "Song not found".into(),
        };
        assert_eq!(rated_message("al-1", 5, Err(err)), "Rated al-1 5/5.");
    }
}
