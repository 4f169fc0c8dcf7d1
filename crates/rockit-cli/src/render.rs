use rockit_core::domain::{GamePhase, GameState};

/// Text view of one state snapshot.
pub fn render(state: &GameState) -> String {
    if state.phase() == GamePhase::NotStarted {
        return match state.human_name() {
            Some(name) => format!("welcome, {name}. start a game with `start hvc` or `start cvc`"),
            None => "welcome! tell me your name with `name <your name>`".to_string(),
        };
    }

    let mut lines = Vec::new();
    for player in state.visible_players() {
        let weapon = player
            .chosen_weapon
            .as_ref()
            .map(|w| w.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!("  {:<16} {:>3}  {}", player.name, player.score, weapon));
    }

    let board = &state.winner_board;
    match (&board.winner, board.message.is_empty()) {
        (_, true) => {}
        (Some(winner), false) => lines.push(format!("  {} {} wins", board.message, winner.name)),
        (None, false) => lines.push(format!("  {}", board.message)),
    }
    lines.join("\n")
}
