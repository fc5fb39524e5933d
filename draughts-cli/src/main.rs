//! Terminal front end for draughts-core.
//!
//! Usage:
//!   cargo run --release --bin draughts
//!   cargo run --release --bin draughts -- --seed 42 --delay 250
//!
//! You play the 'o' pieces (kings are 'O'), the machine plays 'x'/'X'.
//! Enter "row col" to select one of your pieces; its destinations show up
//! as '*'. Enter a destination the same way to move. The machine replies
//! after a short pause, one jump at a time for multi-captures.
//!
//! Options:
//!   --seed <u64>    Seed the machine's move choice (reproducible games)
//!   --delay <ms>    Pause before each machine move (default: 500)

use std::env;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use draughts_core::{Game, MoveCandidate, Player, Pos};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn print_usage() {
    eprintln!("Usage: draughts [--seed <u64>] [--delay <ms>]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed <u64>    Seed the machine's move choice");
    eprintln!("  --delay <ms>    Pause before each machine move (default: 500)");
}

fn piece_char(owner: Player, king: bool) -> char {
    match (owner, king) {
        (Player::Human, false) => 'o',
        (Player::Human, true) => 'O',
        (Player::Machine, false) => 'x',
        (Player::Machine, true) => 'X',
    }
}

fn print_board(game: &Game) {
    let board = game.board();
    println!();
    println!("    0 1 2 3 4 5 6 7");
    println!("  +-----------------+");
    for row in 0..8u8 {
        print!("{} | ", row);
        for col in 0..8u8 {
            let pos = Pos::from_row_col(row, col);
            let ch = match board.piece(pos) {
                Some(piece) => piece_char(piece.owner, piece.king),
                None if game.candidates().iter().any(|c| c.to == pos) => '*',
                None if pos.is_dark() => '.',
                None => ' ',
            };
            print!("{} ", ch);
        }
        println!("|");
    }
    println!("  +-----------------+");
    if let Some(sel) = game.selection() {
        println!("selected: {} {}", sel.row(), sel.col());
    }
    if !game.is_over() && game.current_player() == Player::Human && game.forced_capture() {
        println!("capture available - you must take it");
    }
    println!();
}

fn report_machine_move(from: Pos, candidate: MoveCandidate) {
    match candidate.captured {
        Some(cap) => println!(
            "machine jumps {} {} -> {} {}, taking {} {}",
            from.row(),
            from.col(),
            candidate.to.row(),
            candidate.to.col(),
            cap.row(),
            cap.col()
        ),
        None => println!(
            "machine moves {} {} -> {} {}",
            from.row(),
            from.col(),
            candidate.to.row(),
            candidate.to.col()
        ),
    }
}

/// Parse "row col" into a position; anything off-board is rejected.
fn parse_square(s: &str) -> Option<Pos> {
    let mut parts = s.split_whitespace();
    let row: i8 = parts.next()?.parse().ok()?;
    let col: i8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Pos::checked(row, col)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut seed: Option<u64> = None;
    let mut delay_ms: u64 = 500;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|s| s.parse().ok());
            }
            "--delay" => {
                i += 1;
                delay_ms = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(500);
            }
            "-h" | "--help" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let mut game = Game::new();
    let stdin = io::stdin();

    println!("Draughts: you play 'o' (kings 'O'), the machine plays 'x'.");
    println!("Enter \"row col\" to select a piece or one of its '*' destinations.");
    println!("Commands: r = restart, q = quit.");
    print_board(&game);

    loop {
        if game.is_over() {
            match game.winner() {
                Some(Player::Human) => println!("You win!"),
                Some(Player::Machine) => println!("The machine wins."),
                None => {}
            }
            println!("Press r to play again or q to quit.");
        } else if game.current_player() == Player::Machine {
            // Presentation pacing only; legality is settled in the engine.
            thread::sleep(Duration::from_millis(delay_ms));
            if let Some((from, candidate)) = game.machine_step(&mut rng) {
                report_machine_move(from, candidate);
                print_board(&game);
            }
            continue;
        }

        print!("> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "q" | "quit" => break,
            "r" | "restart" => {
                game.restart();
                print_board(&game);
                continue;
            }
            "" => continue,
            _ => {}
        }

        if game.is_over() {
            continue;
        }

        let Some(pos) = parse_square(line) else {
            println!("Could not read that - enter \"row col\" (0-7 each).");
            continue;
        };

        if game.select(pos) || game.attempt_move(pos) {
            print_board(&game);
        } else {
            println!("That square is not available right now.");
        }
    }
}
