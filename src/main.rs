use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use crosspeg::{Board, Cell, Move, Solver};

/// Search for a winning move sequence in peg solitaire on a cross-shaped
/// board.
#[derive(Parser)]
#[command(name = "crosspeg", version)]
struct Cli {
    /// Row widths of the board, outermost row first. Defaults to the
    /// English board (3 3 7 7 7 3 3).
    #[arg(value_name = "WIDTH", num_args = 0..)]
    row_widths: Vec<usize>,

    /// Print the board before each move of the solution
    #[arg(short, long)]
    steps: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let row_widths = if cli.row_widths.is_empty() {
        vec![3, 3, 7, 7, 7, 3, 3]
    } else {
        cli.row_widths
    };

    let board = Board::new(&row_widths)?;
    println!("{}", render(&board));

    let mut solver = Solver::new(board);
    let started = Instant::now();
    let result = solver.solve();

    let stats = solver.stats();
    log::info!(
        "searched {} positions ({} memo hits, {} losing positions) in {:.2?}",
        stats.calls,
        stats.memo_hits,
        solver.known_losing_positions(),
        started.elapsed()
    );

    match result {
        Some(moves) => {
            let mut board = Board::new(&row_widths)?;
            for (nr, &mv) in moves.iter().enumerate() {
                if cli.steps {
                    println!("{}", render_with_move(&board, mv));
                }
                println!(
                    "{:2}. ({}, {}) -> ({}, {})",
                    nr + 1,
                    mv.src.0,
                    mv.src.1,
                    mv.dst.0,
                    mv.dst.1
                );
                board.apply_move(mv);
            }
            if cli.steps {
                println!("{}", render(&board));
            }
        }
        None => println!("no solution"),
    }

    Ok(())
}

fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..board.height() {
        for col in 0..board.width() {
            if col > 0 {
                out.push(' ');
            }
            out.push(cell_glyph(board, row, col));
        }
        out.push('\n');
    }
    out
}

/// Like [`render`], but with the moving peg and its landing hole highlighted.
fn render_with_move(board: &Board, mv: Move) -> String {
    let jumped = mv.jumped();

    let mut out = String::new();
    for row in 0..board.height() {
        for col in 0..board.width() {
            if col > 0 {
                out.push(' ');
            }
            let glyph = cell_glyph(board, row, col).to_string();
            let glyph = if (row, col) == mv.src || (row, col) == jumped {
                glyph.on_blue()
            } else if (row, col) == mv.dst {
                glyph.on_red()
            } else {
                glyph.normal()
            };
            out.push_str(&glyph.to_string());
        }
        out.push('\n');
    }
    out
}

fn cell_glyph(board: &Board, row: usize, col: usize) -> char {
    match board.cell(row as isize, col as isize) {
        Cell::Inactive => ' ',
        Cell::Active { row, col } => {
            if board.is_occupied(row, col) {
                'X'
            } else {
                'O'
            }
        }
    }
}
