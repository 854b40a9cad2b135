use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};
use std::str::FromStr;

use crate::error::{Result, SearchError};
use crate::turn::Turn;
use crate::{HEIGHT, WIDTH};

/// The number of distinct lines of four on the board
pub const NUM_FOUR_IN_A_ROWS: usize =
    (WIDTH - 3) * HEIGHT + WIDTH * (HEIGHT - 3) + 2 * (WIDTH - 3) * (HEIGHT - 3);

/// A column a tile can be dropped into
///
/// Moves are ordered by column, so the leftmost column sorts first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Move(usize);

impl Move {
    /// Creates a move from a zero-indexed column
    pub fn new(column: usize) -> Result<Self> {
        if column >= WIDTH {
            return Err(SearchError::InvalidArgument(format!(
                "column {} out of range, columns must be between 1 and {}",
                column + 1,
                WIDTH
            )));
        }
        Ok(Self(column))
    }

    /// The zero-indexed column of this move
    pub fn column(self) -> usize {
        self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Parses a one-indexed column, as typed by a player
impl FromStr for Move {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<usize>() {
            Ok(column @ 1..=WIDTH) => Move::new(column - 1),
            _ => Err(SearchError::InvalidArgument(format!(
                "could not parse '{}' as a column between 1 and {}",
                s.trim(),
                WIDTH
            ))),
        }
    }
}

/// A single cell of the board, row 0 is the bottom row
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    pub column: usize,
    pub row: usize,
}

impl Location {
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    pub fn is_occupied(&self, board: &Board) -> bool {
        self.player(board).is_some()
    }

    /// The owner of the tile at this location, if any
    pub fn player(&self, board: &Board) -> Option<Turn> {
        board.cells[self.column + WIDTH * self.row]
    }
}

mod static_windows {
    use super::{Location, NUM_FOUR_IN_A_ROWS};
    use crate::{HEIGHT, WIDTH};

    const fn line(column: usize, row: usize, dx: usize, dy: isize) -> [Location; 4] {
        let mut cells = [Location::new(0, 0); 4];
        let mut i = 0;
        while i < 4 {
            cells[i] = Location::new(column + i * dx, (row as isize + i as isize * dy) as usize);
            i += 1;
        }
        cells
    }

    pub const fn four_in_a_rows() -> [[Location; 4]; NUM_FOUR_IN_A_ROWS] {
        let mut windows = [[Location::new(0, 0); 4]; NUM_FOUR_IN_A_ROWS];
        let mut n = 0;

        let mut row = 0;
        while row < HEIGHT {
            let mut column = 0;
            while column < WIDTH {
                // horizontal
                if column + 3 < WIDTH {
                    windows[n] = line(column, row, 1, 0);
                    n += 1;
                }
                // vertical
                if row + 3 < HEIGHT {
                    windows[n] = line(column, row, 0, 1);
                    n += 1;
                }
                // diagonal /
                if column + 3 < WIDTH && row + 3 < HEIGHT {
                    windows[n] = line(column, row, 1, 1);
                    n += 1;
                }
                // diagonal \
                if column + 3 < WIDTH && row >= 3 {
                    windows[n] = line(column, row, 1, -1);
                    n += 1;
                }
                column += 1;
            }
            row += 1;
        }
        windows
    }
}

static FOUR_IN_A_ROWS: [[Location; 4]; NUM_FOUR_IN_A_ROWS] = static_windows::four_in_a_rows();

/// An immutable Connect 4 position
///
/// Playing a move never changes a board, it produces a new one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [Option<Turn>; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; WIDTH * HEIGHT],
            heights: [0; WIDTH],
        }
    }

    /// Replays a game from a string of one-indexed columns, e.g. "4453",
    /// with `first` placing the first tile
    pub fn from_moves<S: AsRef<str>>(first: Turn, moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = first;

        for column_char in moves.as_ref().chars() {
            let next_move = match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => Move::new(column - 1)?,
                _ => {
                    return Err(SearchError::InvalidArgument(format!(
                        "could not parse '{}' as a valid move",
                        column_char
                    )))
                }
            };
            // abort if the position is won at any point
            if board.has_connect_four().is_some() {
                return Err(SearchError::InvalidArgument(
                    "invalid position, game is over".to_string(),
                ));
            }
            board = board.apply_move(player, next_move)?;
            player = player.next();
        }
        Ok(board)
    }

    /// Returns the board resulting from `player` dropping a tile into the column of `next_move`
    pub fn apply_move(&self, player: Turn, next_move: Move) -> Result<Board> {
        let column = next_move.column();
        if !self.playable(column) {
            return Err(SearchError::InvalidArgument(format!(
                "invalid move, column {} full",
                next_move
            )));
        }
        let mut board = *self;
        board.cells[column + WIDTH * board.heights[column]] = Some(player);
        board.heights[column] += 1;
        Ok(board)
    }

    fn playable(&self, column: usize) -> bool {
        self.heights[column] < HEIGHT
    }

    /// All legal moves, leftmost column first
    pub fn possible_moves(&self) -> Vec<Move> {
        (0..WIDTH)
            .filter(|&column| self.playable(column))
            .map(Move)
            .collect()
    }

    /// The player owning a complete line of four, if there is one
    pub fn has_connect_four(&self) -> Option<Turn> {
        Self::four_in_a_rows().iter().find_map(|window| {
            let owner = window[0].player(self)?;
            if window[1..].iter().all(|loc| loc.player(self) == Some(owner)) {
                Some(owner)
            } else {
                None
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == HEIGHT)
    }

    /// Every line of four cells on the board, horizontal, vertical and both diagonals
    pub fn four_in_a_rows() -> &'static [[Location; 4]] {
        &FOUR_IN_A_ROWS
    }

    /// Renders the board as text, top row first, with every line prefixed by `indent`
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();
        for row in (0..HEIGHT).rev() {
            out.push_str(indent);
            for column in 0..WIDTH {
                out.push(match Location::new(column, row).player(self) {
                    Some(player) => player.initial(),
                    None => '.',
                });
            }
            out.push('\n');
        }
        out.push_str(indent);
        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        out.push_str(&cols);
        out.push('\n');
        out
    }

    /// Draws the board to the terminal in colour
    pub fn display(&self) -> anyhow::Result<()> {
        self.draw(&mut stdout())
    }

    /// Writes the coloured board to `out`, column numbers first, then the top row
    pub fn draw<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        out.queue(PrintStyledContent(style(cols + "\n")))?;

        // draw top row first, so every line is written below the previous one
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                out.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match Location::new(column, row).player(self) {
                            Some(Turn::Red) => Color::Red,
                            Some(Turn::Yellow) => Color::Yellow,
                            None => Color::DarkBlue,
                        }),
                ))?;
            }
            out.queue(PrintStyledContent(style("\n")))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(""))
    }
}
