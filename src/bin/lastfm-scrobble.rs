mod commands;

use clap::Parser;
use commands::{execute_command, utils::get_api_credentials, Commands};
use lastfm_scrobble::LastFmClient;

/// Last.fm now playing and scrobble submitter
#[derive(Parser)]
#[command(
    name = "lastfm-scrobble",
    about = "Authorise a Last.fm session and submit now playing and scrobble updates",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let credentials = match get_api_credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variables:");
            eprintln!("  LASTFM_API_KEY=your_api_key");
            eprintln!("  LASTFM_API_SECRET=your_api_secret");
            eprintln!();
            eprintln!("API accounts can be created at https://www.last.fm/api/account/create");
            std::process::exit(1);
        }
    };

    let http_client = http_client::native::NativeClient::new();
    let client = LastFmClient::with_http_client(credentials, Box::new(http_client));

    if let Err(e) = execute_command(args.command, &client).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
