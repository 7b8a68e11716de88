/// Jukebox - console host for the playback controller
mod audio;
mod catalog;
mod commands;
mod console;

use anyhow::Context;
use catalog::JsonCatalog;
use clap::Parser;
use commands::Command;
use console::{ConsoleHost, Toolbar};
use jukebox_playback::{
    ControlAction, LoadOptions, LoadOutcome, Player, PlayerEvent, PlayerSettings,
};
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jukebox")]
#[command(about = "Toolbar music player driven from the console", long_about = None)]
struct Cli {
    /// Settings file (TOML); JUKEBOX_* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON catalog of `{ "id", "name" }` entries
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Only resolve ids present in the catalog
    #[arg(long)]
    strict: bool,

    /// Playlist to load at startup (comma separated ids)
    #[arg(short, long, value_delimiter = ',')]
    playlist: Vec<String>,

    /// Shuffle the startup playlist
    #[arg(long)]
    shuffle: bool,

    /// Start playing the startup playlist right away
    #[arg(long)]
    autostart: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jukebox_cli=info,jukebox_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings =
        PlayerSettings::load(cli.config.as_deref()).context("failed to load settings")?;

    let catalog = match &cli.catalog {
        Some(path) => JsonCatalog::from_file(path, !cli.strict)
            .with_context(|| format!("failed to read catalog {}", path.display()))?,
        None => JsonCatalog::new(Vec::new(), !cli.strict),
    };
    tracing::info!("Catalog has {} named tracks", catalog.len());

    let host = ConsoleHost::new();
    let toolbar = host.toolbar();

    let mut player = Player::new(settings, Arc::new(catalog));
    player
        .init(Box::new(host))
        .context("failed to initialize player")?;

    if !cli.playlist.is_empty() {
        let options = LoadOptions::default()
            .shuffle(cli.shuffle)
            .autostart(cli.autostart);
        load(&mut player, &cli.playlist, options).await;
    }

    println!("{}", toolbar.render());
    println!("{}", commands::HELP);
    repl(&mut player, &toolbar).await?;

    player.destroy();
    Ok(())
}

async fn repl(player: &mut Player, toolbar: &Toolbar) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        execute(player, toolbar, command).await;
        player.process_pending();

        if !player.is_initialized() {
            break;
        }
        println!("{}", toolbar.render());
    }

    Ok(())
}

/// Run one command; events it causes are handled by the caller
async fn execute(player: &mut Player, toolbar: &Toolbar, command: Command) {
    match command {
        Command::Load {
            ids,
            shuffle,
            autostart,
        } => {
            let options = LoadOptions::default().shuffle(shuffle).autostart(autostart);
            load(player, &ids, options).await;
        }
        Command::Play => player.toggle_music(true, false),
        Command::Pause => player.toggle_music(false, false),
        Command::Toggle => click(toolbar, ControlAction::PlayPause),
        Command::Rewind => click(toolbar, ControlAction::Rewind),
        Command::Next => click(toolbar, ControlAction::FastForward),
        Command::Seek(position) => {
            if player.controller().current_track().is_some() {
                toolbar.audio().seek(position);
            } else {
                eprintln!("nothing to seek in");
            }
        }
        Command::End => {
            if !toolbar.audio().finish() {
                eprintln!("nothing is playing");
            }
        }
        Command::Interrupt => {
            toolbar.audio().external_pause();
        }
        Command::Status => print_status(player, toolbar),
        Command::Help => println!("{}", commands::HELP),
        Command::Quit => {
            player.event_sender().send(PlayerEvent::Shutdown).ok();
        }
    }
}

async fn load(player: &mut Player, ids: &[String], options: LoadOptions) {
    match player.load_tracks(ids, options).await {
        Ok(LoadOutcome::Loaded { tracks }) => println!("loaded {tracks} tracks"),
        Ok(LoadOutcome::Aborted { id }) => println!("load aborted: no name for {id}"),
        Err(e) => eprintln!("load failed: {e}"),
    }
}

fn click(toolbar: &Toolbar, action: ControlAction) {
    if !toolbar.click(action) {
        eprintln!("no button bound to {action:?}");
    }
}

fn print_status(player: &Player, toolbar: &Toolbar) {
    let state = player.state();
    let playlist = player.controller().playlist();

    let audio = toolbar.audio();

    println!(
        "{:?} | track {}/{} | {:.1}s | source {} ({}) | group {}",
        state.transport,
        state.current_index + 1,
        playlist.len(),
        state.position.as_secs_f64(),
        audio.source().as_deref().unwrap_or("-"),
        if audio.is_playing() { "running" } else { "idle" },
        audio.group().as_deref().unwrap_or("-"),
    );
    for (index, track) in playlist.iter().enumerate() {
        let marker = if index == state.current_index { '>' } else { ' ' };
        println!("{marker} {:>3}. {} ({})", index + 1, track.name, track.id);
    }
}
