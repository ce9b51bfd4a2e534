use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use trackmatch::config::Config;

const USAGE: &str = "usage: trackmatch <title> [--artist NAME] [--album NAME]";

#[derive(Debug, Default)]
struct Args {
    title: String,
    artist: String,
    album: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<Args> {
    let mut parsed = Args::default();
    let mut title = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--artist" => parsed.artist = args.next()?,
            "--album" => parsed.album = args.next()?,
            "-h" | "--help" => return None,
            _ if title.is_none() => title = Some(arg),
            _ => return None,
        }
    }

    parsed.title = title?;
    Some(parsed)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let searcher = match config.searcher() {
        Ok(searcher) => searcher,
        Err(e) => {
            error!("Failed to create searcher: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match searcher.find(&args.title, &args.artist, &args.album).await {
        Ok(Some(track)) => match serde_json::to_string_pretty(&track) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to serialize track: {}", e);
                ExitCode::FAILURE
            }
        },
        Ok(None) => {
            println!("No matching track found");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Track search failed ({:?}): {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
