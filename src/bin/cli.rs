//! Console front-end: a small REPL that drives the engine.

use std::io::{self, BufRead, Write};
use std::process::exit;
use std::time::Duration;

use acumen::game::{Game, GameStatus, Player};
use acumen::logger::{TracingLogger, init_logging};
use acumen::piece::Color;

fn main() {
    init_logging("logs/acumen.log", "search=info");

    let mut game = Game::new_standard();
    let mut paused = false;
    let logger = TracingLogger;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", game.board());
    loop {
        if !paused && game.current_player() == Player::ChessEngine && status_allows_play(&game) {
            match game.find_best_move(&logger, None) {
                Some(mv) => {
                    println!("{} moves {}", game.current_turn(), mv);
                    game.make_move(mv);
                    println!("{}", game.board());
                    report_status(&game);
                }
                None => {
                    println!("engine found no move; pausing");
                    paused = true;
                }
            }
            continue;
        }

        print!("({}) > ", game.current_turn());
        if io::stdout().flush().is_err() {
            exit(1);
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(_)) => exit(1),
            None => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "quit" | "exit" => break,
            "moves" => println!("{}", game.legal_moves()),
            "pause" => paused = true,
            "unpause" => paused = false,
            "switch" => {
                game.set_current_turn(game.current_turn().opposite());
                println!("{} to move", game.current_turn());
            }
            "computer_white" => game.set_player(Color::White, Player::ChessEngine),
            "computer_black" => game.set_player(Color::Black, Player::ChessEngine),
            "human_white" => game.set_player(Color::White, Player::Human),
            "human_black" => game.set_player(Color::Black, Player::Human),
            "maxdepth" => {
                if let Some(depth) = prompt_number(&mut lines, "max depth? ") {
                    game.set_max_depth(depth as i32);
                }
            }
            "timeout" => {
                if let Some(seconds) = prompt_number(&mut lines, "seconds? ") {
                    game.set_search_timeout(Duration::from_secs(seconds));
                }
            }
            "save" => {
                if let Some(filename) = prompt_line(&mut lines, "filename? ") {
                    match game.save(&filename) {
                        Ok(()) => println!("saved {}", filename),
                        Err(err) => println!("save failed: {}", err),
                    }
                }
            }
            "load" => {
                if let Some(filename) = prompt_line(&mut lines, "filename? ") {
                    match Game::load(&filename, [Player::Human, Player::ChessEngine]) {
                        Ok(loaded) => {
                            game = loaded;
                            println!("{}", game.board());
                        }
                        Err(err) => println!("load failed: {}", err),
                    }
                }
            }
            "fen" => {
                if let Some(fen) = prompt_line(&mut lines, "fen? ") {
                    match Game::from_fen(&fen) {
                        Ok(loaded) => {
                            game = loaded;
                            println!("{}", game.board());
                        }
                        Err(err) => println!("bad fen: {}", err),
                    }
                }
            }
            move_input => match game.parse_and_make_move(move_input) {
                Ok(mv) => {
                    println!("played {}", mv);
                    println!("{}", game.board());
                    report_status(&game);
                }
                Err(err) => println!("{}", err),
            },
        }
    }

    exit(0);
}

fn status_allows_play(game: &Game) -> bool {
    game.status() == GameStatus::Playing
}

fn report_status(game: &Game) {
    match game.status() {
        GameStatus::Playing => {}
        GameStatus::Checkmate => {
            println!("checkmate - {} wins", game.current_turn().opposite());
        }
        GameStatus::Stalemate => println!("stalemate"),
        GameStatus::ThreefoldRepetitionDraw => println!("draw by threefold repetition"),
        GameStatus::FivefoldRepetitionDraw => println!("draw by fivefold repetition"),
        GameStatus::FiftyMovesWithoutProgressDraw => println!("draw by fifty-move rule"),
        GameStatus::SeventyFiveMovesWithoutProgressDraw => {
            println!("draw by seventy-five-move rule")
        }
        GameStatus::InsufficientMaterialDraw => println!("draw by insufficient material"),
    }
}

fn prompt_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    match lines.next() {
        Some(Ok(line)) => {
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() { None } else { Some(trimmed) }
        }
        _ => None,
    }
}

fn prompt_number(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Option<u64> {
    let line = prompt_line(lines, prompt)?;
    match line.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("not a number: {}", line);
            None
        }
    }
}
