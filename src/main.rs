use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use futures::future::join_all;

use antakshari_helper::SongService;
use antakshari_helper::config::Config;
use antakshari_helper::error::AntakshariError;
use antakshari_helper::models::SongList;

/// Cheat-sheet for Antakshari: iconic film songs by starting letter
#[derive(Parser)]
#[command(name = "antakshari-helper", about, version)]
struct Cli {
    /// Letters to find songs for; several letters are looked up concurrently
    #[arg(required = true)]
    letters: Vec<String>,

    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load();
    let service = SongService::new(&config)?;

    let results = join_all(cli.letters.iter().map(|l| service.songs_for(l))).await;

    let mut failed = false;
    for (letter, result) in cli.letters.iter().zip(results) {
        failed |= result.is_err();
        if cli.json {
            print_json(letter, result)?;
        } else {
            print_text(letter, result);
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn print_text(letter: &str, result: antakshari_helper::error::Result<SongList>) {
    let heading = format!("Songs for \"{}\"", letter.trim().to_uppercase());
    println!("{}", heading.bold());
    match result {
        Ok(list) if list.is_empty() => {
            println!(
                "  {}",
                "Could not find any songs for this letter. Try another one!".yellow()
            );
        }
        Ok(list) => {
            for (i, song) in list.songs.iter().enumerate() {
                println!(
                    "{:>3}. {} {}",
                    i + 1,
                    song.title.bold(),
                    format!("({})", song.movie).italic()
                );
                for line in song.lyric_lines() {
                    println!("       {}", line.dimmed());
                }
            }
        }
        Err(e) => {
            println!("  {}", e.user_message().red());
        }
    }
    println!();
}

fn print_json(letter: &str, result: antakshari_helper::error::Result<SongList>) -> Result<()> {
    let value = match result {
        Ok(list) => serde_json::to_value(&list)?,
        Err(e) => error_json(letter, &e),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn error_json(letter: &str, e: &AntakshariError) -> serde_json::Value {
    serde_json::json!({
        "letter": letter.trim(),
        "error": {
            "kind": format!("{:?}", e.kind()),
            "message": e.user_message(),
            "detail": e.to_string(),
        }
    })
}
