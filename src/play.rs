//! Interactive human-versus-engine loop
//!
//! Reads one command per line. Anything that is not a command is taken as a
//! UCI move; malformed or illegal moves are reported and the prompt repeats.

use std::io::{BufRead, Write};

use anyhow::Context;
use minimax_engine::GameSession;
use shakmaty::{Color, File, Position, Rank, Square};
use tracing::debug;

const HELP: &str = "commands: <uci move> | moves | undo | reset | fen | board | help | quit";

/// How a play loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The game reached a terminal position
    Finished(String),
    /// The player typed `quit`
    Quit,
    /// Input ran out before the game ended
    EndOfInput,
}

pub fn run_play<R: BufRead, W: Write>(
    session: &mut GameSession,
    engine_color: Color,
    mut input: R,
    mut out: W,
) -> anyhow::Result<PlayOutcome> {
    writeln!(out, "{HELP}")?;
    render_board(session, &mut out)?;

    loop {
        let snapshot = session.snapshot();
        if snapshot.game_over {
            let result = snapshot.result.unwrap_or_else(|| "game over".to_string());
            writeln!(out, "result: {result}")?;
            return Ok(PlayOutcome::Finished(result));
        }

        if session.state().turn() == engine_color {
            let reply = session.engine_move().context("engine failed to move")?;
            writeln!(out, "engine plays {}", reply.uci)?;
            render_board(session, &mut out)?;
            continue;
        }

        write!(out, "your move> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(PlayOutcome::EndOfInput);
        }

        match line.trim() {
            "" => {}
            "quit" | "exit" => return Ok(PlayOutcome::Quit),
            "help" => writeln!(out, "{HELP}")?,
            "board" => render_board(session, &mut out)?,
            "fen" => writeln!(out, "{}", session.state().fen())?,
            "moves" => writeln!(out, "{}", session.legal_moves().join(" "))?,
            "reset" => {
                session.reset();
                render_board(session, &mut out)?;
            }
            "undo" => {
                if session.undo().is_err() {
                    writeln!(out, "nothing to undo")?;
                    continue;
                }
                // Take back the engine's reply together with the player's move.
                if session.state().turn() == engine_color && session.state().ply() > 0 {
                    session.undo()?;
                }
                render_board(session, &mut out)?;
            }
            text => match session.apply_move(text) {
                Ok(_) => render_board(session, &mut out)?,
                Err(e) => {
                    debug!("[PLAY] Rejected input {:?}: {}", text, e);
                    writeln!(out, "{e}")?;
                }
            },
        }
    }
}

/// Plain-text board, rank 8 at the top, White in upper case
pub fn render_board<W: Write>(session: &GameSession, out: &mut W) -> std::io::Result<()> {
    let board = session.state().position().board();

    for rank in (0..8u32).rev() {
        write!(out, "{} ", rank + 1)?;
        for file in 0..8u32 {
            let square = Square::from_coords(File::new(file), Rank::new(rank));
            let c = board.piece_at(square).map_or('.', |piece| piece.char());
            write!(out, " {c}")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "   a b c d e f g h")
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimax_engine::{Engine, EngineConfig, SearchBudget};

    fn session() -> GameSession {
        let engine = Engine::new(EngineConfig {
            book_path: None,
            ..EngineConfig::default()
        });
        GameSession::new(engine, SearchBudget::Depth(1))
    }

    #[test]
    fn test_render_start_position() {
        let mut out = Vec::new();
        render_board(&session(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("8  r n b q k b n r\n"));
        assert!(text.contains("1  R N B Q K B N R\n"));
        assert!(text.ends_with("   a b c d e f g h\n"));
    }

    #[test]
    fn test_quit_command() {
        let mut session = session();
        let outcome = run_play(&mut session, Color::Black, "quit\n".as_bytes(), Vec::new()).unwrap();
        assert_eq!(outcome, PlayOutcome::Quit);
    }
}
