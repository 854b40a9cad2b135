use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use log::info;

use std::io::{stdin, stdout, Write};

use connect4_minimax::{board::*, state::*, turn::Turn};

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum Side {
    Red,
    Yellow,
}

impl From<Side> for Turn {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Turn::Red,
            Side::Yellow => Turn::Yellow,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum AiControl {
    None,
    Red,
    Yellow,
    Both,
}

impl AiControl {
    fn controls(self, player: Turn) -> bool {
        match self {
            AiControl::None => false,
            AiControl::Red => player == Turn::Red,
            AiControl::Yellow => player == Turn::Yellow,
            AiControl::Both => true,
        }
    }
}

/// Play Connect 4 against a minimax agent
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of moves the agent looks ahead
    #[arg(short, long, default_value_t = 6)]
    depth: usize,

    /// Which side(s) the agent plays
    #[arg(long, value_enum, default_value_t = AiControl::Yellow)]
    ai: AiControl,

    /// The side that places the first tile
    #[arg(long, value_enum, default_value_t = Side::Red)]
    first: Side,

    /// Starting position as one-indexed columns, e.g. 4453
    #[arg(long, default_value = "")]
    moves: String,

    /// Print the searched game tree after every agent move
    #[arg(long)]
    dump: bool,
}

/// Searches the position for `player` and returns the agent's move
fn search(board: Board, player: Turn, args: &Args) -> Result<Move> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("AI is thinking...");
    spinner.enable_steady_tick(100);

    let mut state = State::new(player, board, player);
    state.expand_up_to(args.depth)?;
    let node_count = state.compute_minimax();
    let best_move = state.get_preferred_move();
    spinner.finish_and_clear();

    if args.dump {
        println!("{}", state);
    }
    let best_move = best_move?;
    let value = state.value()?;
    info!(
        "{} plays column {} with value {} ({} states evaluated)",
        player, best_move, value, node_count
    );

    match value {
        WIN_VALUE => println!("{} can force a win.", player),
        LOSS_VALUE => println!("{} cannot avoid a loss.", player),
        _ => {}
    }
    Ok(best_move)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    if args.depth == 0 {
        return Err(anyhow!("invalid argument: depth must be at least 1"));
    }

    let mut player: Turn = args.first.into();
    let mut board = Board::from_moves(player, &args.moves)?;
    if args.moves.len() % 2 == 1 {
        player = player.next();
    }

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        board.display()?;

        if let Some(winner) = board.has_connect_four() {
            println!("{} wins!", winner);
            break;
        }
        if board.is_full() {
            println!("Draw!");
            break;
        }

        let next_move = if args.ai.controls(player) {
            // AI player
            let best_move = search(board, player, &args)?;
            println!("Best move: {}", best_move);
            best_move
        } else {
            // human player
            print!("{} move input > ", player);
            stdout().flush()?;
            let mut input_str = String::new();
            if stdin.read_line(&mut input_str)? == 0 {
                return Ok(());
            }

            match input_str.parse::<Move>() {
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
                Ok(next_move) => next_move,
            }
        };

        match board.apply_move(player, next_move) {
            Ok(next) => {
                board = next;
                player = player.next();
            }
            Err(err) => {
                println!("{}", err);
                // try the move again
                continue;
            }
        }
    }
    Ok(())
}
