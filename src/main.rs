use std::io;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use minimax_chess::cli::{Cli, Command};
use minimax_chess::core::{init_logging, load_settings, save_settings, settings_path};
use minimax_chess::play::{run_play, PlayOutcome};
use minimax_engine::{Engine, EngineConfig, GameSession, GameState};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli.config.clone().unwrap_or_else(settings_path);
    let mut config = load_settings(&path);

    match cli.command {
        Command::Bestmove(args) => {
            args.overrides.apply(&mut config);
            bestmove(config, args.fen.as_deref(), args.json)
        }
        Command::Eval { fen } => {
            config.book_path = None;
            let engine = Engine::new(config);
            let state = load_position(&engine, fen.as_deref())?;
            println!("{}", engine.evaluate(&state));
            Ok(())
        }
        Command::Play {
            engine_color,
            overrides,
        } => {
            overrides.apply(&mut config);
            let budget = config.budget();
            let mut session = GameSession::new(Engine::new(config), budget);

            let outcome = run_play(
                &mut session,
                engine_color.into(),
                io::stdin().lock(),
                io::stdout().lock(),
            )?;
            if outcome == PlayOutcome::EndOfInput {
                info!("[PLAY] Input closed before the game ended");
            }
            Ok(())
        }
        Command::Config { write, overrides } => {
            overrides.apply(&mut config);
            println!("{}", serde_json::to_string_pretty(&config)?);
            if write {
                save_config(&path, &config)?;
            }
            Ok(())
        }
    }
}

fn bestmove(config: EngineConfig, fen: Option<&str>, json: bool) -> anyhow::Result<()> {
    let budget = config.budget();
    let mut engine = Engine::new(config);
    let mut state = load_position(&engine, fen)?;

    let report = engine.search(&mut state, budget)?;
    let uci = report.best_move_uci();

    if json {
        let value = serde_json::json!({
            "bestMove": uci,
            "score": report.score,
            "depth": report.depth,
            "nodes": report.nodes,
            "source": report.source,
        });
        println!("{value}");
    } else {
        println!("bestmove {}", uci.as_deref().unwrap_or("(none)"));
    }
    Ok(())
}

fn load_position(engine: &Engine, fen: Option<&str>) -> anyhow::Result<GameState> {
    match fen {
        Some(fen) => engine
            .game_from_fen(fen)
            .with_context(|| format!("cannot load position {fen:?}")),
        None => Ok(engine.new_game()),
    }
}

fn save_config(path: &Path, config: &EngineConfig) -> anyhow::Result<()> {
    save_settings(path, config).with_context(|| format!("cannot write settings to {path:?}"))?;
    println!("saved to {}", path.display());
    Ok(())
}
