use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use rockit_core::app::{GameGuard, GameStateStore};
use rockit_core::config::{DelayRange, GameConfig};
use rockit_core::impls::{FileStore, RecordingNavigator};

mod command;
mod render;

use command::{Command, Flow};

#[derive(Debug, Parser)]
#[command(author, version, about = "Rock, paper, scissors in the terminal", long_about = None)]
struct Args {
    /// JSON config file (every field optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the saved game lives in
    #[arg(long, default_value = ".rockit")]
    data_dir: PathBuf,

    /// Deliver state updates without the simulated latency
    #[arg(long)]
    no_delay: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if args.no_delay {
        config.delivery_delay_ms = DelayRange::fixed(0);
    }

    // (A) composition root: ports を組み立ててストアを作る
    let navigator = RecordingNavigator::new();
    let guard = GameGuard::new(navigator.clone());
    let mut store = GameStateStore::builder()
        .config(config)
        .storage(FileStore::new(&args.data_dir))
        .navigator(navigator.clone())
        .build()?;

    // (B) 状態の購読（遅延つきで届いたものから表示）
    let mut stream = store.subscribe();
    let printer = tokio::spawn(async move {
        while let Some(state) = stream.next().await {
            println!("\n{}", render::render(&state));
        }
    });

    // 保存済みのゲームが開始済みなら、そのままゲーム画面から再開
    if guard.resume(&store.state()) {
        println!("resuming saved game");
    }

    // (C) 1 行 1 コマンド
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match command::dispatch(&mut store, &guard, command) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        }
        tracing::debug!(route = %navigator.current(), "current view");
    }

    // (D) ストアを落とすと、積まれた状態を出し切ってから購読が終わる
    drop(store);
    printer.await?;
    Ok(())
}
