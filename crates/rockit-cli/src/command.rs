use std::error::Error;

use clap::{Parser, ValueEnum};
use rockit_core::app::{GameGuard, GameStateStore};
use rockit_core::domain::{GameMode, find_weapon};

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true)]
pub enum Command {
    #[command(about = "Register the human player", alias = "n")]
    Name {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    #[command(about = "Start a game", alias = "s")]
    Start {
        #[arg(value_enum, default_value = "hvc")]
        mode: ModeArg,
    },
    #[command(about = "Play a round with a weapon (rock, paper, scissors, ...)", alias = "p")]
    Play {
        #[arg(required = true)]
        weapon: String,
    },
    #[command(about = "Let the computers play a round", alias = "a")]
    Auto,
    #[command(about = "Finish the game and reset", alias = "f")]
    Finish,
    #[command(about = "Print the current state as json")]
    State,
    #[command(about = "Leave", alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// human vs computer
    Hvc,
    /// computer vs computer
    Cvc,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Hvc => GameMode::HumanVsComputer,
            ModeArg::Cvc => GameMode::ComputerVsComputer,
        }
    }
}

impl Command {
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}

/// What the prompt loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the store.
///
/// Err はそのコマンドだけの失敗。呼び出し側は表示して次の行へ進む。
pub fn dispatch(
    store: &mut GameStateStore,
    guard: &GameGuard,
    command: Command,
) -> Result<Flow, Box<dyn Error>> {
    match command {
        Command::Name { name } => store.create_human(name.join(" ")),
        Command::Start { mode } => store.start_game(mode.into()),
        Command::Play { weapon } => {
            let state = store.state();
            if !guard.can_enter(&state) {
                return Err("no game in progress, start one first".into());
            }
            let Some(weapon) = find_weapon(&state.weapon_catalog, &weapon).cloned() else {
                return Err(format!("unknown weapon '{weapon}'").into());
            };
            store.play_with_weapon(weapon)?;
        }
        Command::Auto => {
            if !guard.can_enter(&store.state()) {
                return Err("no game in progress, start one first".into());
            }
            store.computer_play()?;
        }
        Command::Finish => store.finish_game(),
        Command::State => println!("{}", serde_json::to_string_pretty(&*store.state())?),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
