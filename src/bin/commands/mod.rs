pub mod utils;

use clap::Subcommand;
use lastfm_scrobble::{
    AuthoriseOptions, LastFmClient, Track, UpdateMethod, UpdateOptions, UpdateRequest,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Exchange an authorisation token for a session key
    ///
    /// Get a token by sending the user to
    /// https://www.last.fm/api/auth/?api_key=YOUR_API_KEY and letting them
    /// grant access. The printed variables can be exported for later runs.
    ///
    /// Usage example:
    /// lastfm-scrobble authorise 0123456789abcdef0123456789abcdef
    Authorise {
        /// Token returned by the Last.fm authorisation page
        token: String,
    },

    /// Tell Last.fm that a track started playing
    ///
    /// Usage example:
    /// lastfm-scrobble now-playing --artist "The Mae Shi" --track "Run To Your Grave" --duration 232
    NowPlaying {
        /// Artist name
        #[arg(long)]
        artist: String,

        /// Track name
        #[arg(long)]
        track: String,

        /// Track length in seconds
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Record that a track was played
    ///
    /// Usage example:
    /// lastfm-scrobble scrobble --artist "The Mae Shi" --track "Run To Your Grave" --timestamp 1700000000
    Scrobble {
        /// Artist name
        #[arg(long)]
        artist: String,

        /// Track name
        #[arg(long)]
        track: String,

        /// Unix time the track started playing (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,

        /// Track length in seconds
        #[arg(long)]
        duration: Option<u32>,
    },
}

pub async fn execute_command(
    command: Commands,
    client: &LastFmClient,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Authorise { token } => {
            let mut session = client.session();
            let options = AuthoriseOptions::new()
                .on_authorised(|session| println!("✅ Authorised as {}", session.user()));
            session.authorise(&token, options).await?;

            println!();
            println!("export LASTFM_USERNAME=\"{}\"", session.user());
            println!("export LASTFM_SESSION_KEY=\"{}\"", session.key());
            Ok(())
        }
        Commands::NowPlaying {
            artist,
            track,
            duration,
        } => {
            let session = utils::restore_session(client)?;
            let track = Track::new(track, artist);
            match client.now_playing(&session, track, duration).await? {
                Some(track) => println!("🎵 Now playing: {} - {}", track.artist_name(), track.name),
                None => println!("⚠️  Last.fm returned an empty response"),
            }
            Ok(())
        }
        Commands::Scrobble {
            artist,
            track,
            timestamp,
            duration,
        } => {
            let session = utils::restore_session(client)?;
            let mut options = UpdateOptions::new(Track::new(track, artist))
                .with_timestamp(timestamp.unwrap_or_else(utils::now_timestamp));
            options.duration = duration;

            let request = UpdateRequest::new(client, UpdateMethod::Scrobble, &session, options)?;
            match request.send().await? {
                Some(track) => println!("✅ Scrobbled: {} - {}", track.artist_name(), track.name),
                None => println!("⚠️  Last.fm returned an empty response"),
            }
            Ok(())
        }
    }
}
