//! A lazily expanded game tree searched with minimax

use log::{debug, trace};

use std::collections::BTreeMap;
use std::fmt;

use crate::board::{Board, Move};
use crate::error::{Result, SearchError};
use crate::turn::Turn;

/// The value of a position won by the AI
pub const WIN_VALUE: i32 = i32::MAX;
/// The value of a position won by the AI's opponent
pub const LOSS_VALUE: i32 = i32::MIN;
/// The value of a drawn (full) position
pub const DRAW_VALUE: i32 = 0;

/// Scores a board from the point of view of `ai`
///
/// Every line of four contributes +1 for each of `ai`'s tiles in it and -1 for
/// each of the opponent's, so a tile is counted once per line it belongs to.
pub fn evaluate(board: &Board, ai: Turn) -> i32 {
    Board::four_in_a_rows()
        .iter()
        .flat_map(|window| window.iter())
        .map(|loc| match loc.player(board) {
            None => 0,
            Some(player) if player == ai => 1,
            Some(_) => -1,
        })
        .sum()
}

fn precondition(message: &str) -> SearchError {
    SearchError::PreconditionViolation(message.to_string())
}

/// A node of the game tree: a board together with the player to move on it
///
/// # Values
/// After [`compute_minimax`](State::compute_minimax), a won board is worth [`WIN_VALUE`]
/// or [`LOSS_VALUE`], a full board [`DRAW_VALUE`], an unexpanded board its static
/// [`evaluate`] score, and an expanded board the best child value for the player to move
/// (maximised when that player is the AI, minimised otherwise).
#[derive(Debug)]
pub struct State {
    ai: Turn,
    board: Board,
    player: Turn,
    // None until the state is expanded, then one entry per legal move in column order
    children: Option<BTreeMap<Move, State>>,
    // None until computed, and for children skipped by the last search
    value: Option<i32>,
}

impl State {
    /// Creates an unexpanded state where `player` moves next on `board` and `ai` is the side being searched for
    pub fn new(ai: Turn, board: Board, player: Turn) -> Self {
        Self {
            ai,
            board,
            player,
            children: None,
            value: None,
        }
    }

    pub fn ai(&self) -> Turn {
        self.ai
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> Turn {
        self.player
    }

    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// The value from the most recent minimax search that reached this state
    pub fn value(&self) -> Result<i32> {
        self.value
            .ok_or_else(|| precondition("minimax has not been computed for this state"))
    }

    /// The children of this state, leftmost move first. Empty if not expanded.
    pub fn children(&self) -> impl Iterator<Item = (Move, &State)> + '_ {
        self.children
            .iter()
            .flat_map(|children| children.iter())
            .map(|(&next_move, child)| (next_move, child))
    }

    /// Returns the child reached by playing `next_move`
    pub fn get_child(&self, next_move: Move) -> Result<&State> {
        self.children
            .as_ref()
            .ok_or_else(|| precondition("state has not been expanded"))?
            .get(&next_move)
            .ok_or_else(|| {
                SearchError::PreconditionViolation(format!(
                    "column {} is not a possible move",
                    next_move
                ))
            })
    }

    /// Consumes this state and returns the subtree reached by playing `next_move`,
    /// so that the search can continue from it
    pub fn into_child(self, next_move: Move) -> Result<State> {
        self.children
            .ok_or_else(|| precondition("state has not been expanded"))?
            .remove(&next_move)
            .ok_or_else(|| {
                SearchError::PreconditionViolation(format!(
                    "column {} is not a possible move",
                    next_move
                ))
            })
    }

    /// Grows the tree so that every line of play from this state is expanded `depth` moves deep
    ///
    /// Existing children are kept, so calling this again with a larger depth only
    /// expands the frontier. A depth of zero does nothing. Every legal move gets
    /// a child, and a board refusing one of its own possible moves is an error.
    pub fn expand_up_to(&mut self, depth: usize) -> Result<()> {
        let created = self.expand(depth)?;
        debug!("expanded to depth {}, {} new states", depth, created);
        Ok(())
    }

    // returns the number of states created
    fn expand(&mut self, depth: usize) -> Result<usize> {
        if depth == 0 {
            return Ok(0);
        }

        let mut created = 0;
        if self.children.is_none() {
            let (ai, board, player) = (self.ai, self.board, self.player);
            let children: BTreeMap<Move, State> = board
                .possible_moves()
                .into_iter()
                .map(|next_move| {
                    let next = board.apply_move(player, next_move)?;
                    Ok((next_move, State::new(ai, next, player.next())))
                })
                .collect::<Result<_>>()?;
            created += children.len();
            self.children = Some(children);
        }

        if let Some(children) = self.children.as_mut() {
            for child in children.values_mut() {
                created += child.expand(depth - 1)?;
            }
        }
        Ok(created)
    }

    /// Computes the minimax value of this state and its expanded descendants
    ///
    /// Uses alpha-beta pruning: children that cannot change the result are skipped
    /// and hold no value afterwards. Returns the number of states evaluated.
    pub fn compute_minimax(&mut self) -> usize {
        let mut node_count = 0;
        let value = self.minimax(LOSS_VALUE, WIN_VALUE, &mut node_count);
        debug!(
            "minimax value {} for {}, {} states evaluated",
            value, self.player, node_count
        );
        node_count
    }

    fn minimax(&mut self, mut alpha: i32, mut beta: i32, node_count: &mut usize) -> i32 {
        *node_count += 1;

        // values left over from an earlier search must not be mistaken for fresh ones
        if let Some(children) = self.children.as_mut() {
            for child in children.values_mut() {
                child.value = None;
            }
        }

        let value = if let Some(c4) = self.board.has_connect_four() {
            if c4 == self.ai {
                WIN_VALUE
            } else {
                LOSS_VALUE
            }
        } else if self.board.is_full() {
            DRAW_VALUE
        } else {
            match self.children.as_mut() {
                None => evaluate(&self.board, self.ai),
                Some(children) => {
                    let maximising = self.player == self.ai;
                    let mut best = if maximising { LOSS_VALUE } else { WIN_VALUE };

                    for (next_move, child) in children.iter_mut() {
                        let val = child.minimax(alpha, beta, node_count);
                        if maximising {
                            best = best.max(val);
                            alpha = alpha.max(best);
                        } else {
                            best = best.min(val);
                            beta = beta.min(best);
                        }
                        if alpha >= beta {
                            trace!("cutoff after column {} ({}, {})", next_move, alpha, beta);
                            break;
                        }
                    }
                    best
                }
            }
        };

        self.value = Some(value);
        value
    }

    /// The move leading to the child whose value equals this state's value,
    /// preferring the leftmost column on ties
    ///
    /// Requires this state to be expanded and searched with
    /// [`compute_minimax`](State::compute_minimax), with at least one possible move.
    pub fn get_preferred_move(&self) -> Result<Move> {
        let children = self
            .children
            .as_ref()
            .ok_or_else(|| precondition("state has not been expanded"))?;
        let value = self.value()?;

        children
            .iter()
            .find(|(_, child)| child.value == Some(value))
            .map(|(&next_move, _)| next_move)
            .ok_or_else(|| precondition("no child has the value of this state"))
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, depth: usize, indent: &str) -> fmt::Result {
        writeln!(
            f,
            "{}{} will play next on the board below as {}",
            indent,
            if self.player == self.ai { "AI" } else { "Opponent" },
            self.player.initial()
        )?;
        match self.value {
            Some(value) => writeln!(f, "{}Value: {}", indent, value)?,
            None => writeln!(f, "{}Value: ?", indent)?,
        }
        writeln!(f, "{}", self.board.render(indent))?;

        if let Some(children) = self.children.as_ref().filter(|c| !c.is_empty()) {
            writeln!(f, "{}Children at depth {}:", indent, depth + 1)?;
            writeln!(f, "{}----------------", indent)?;

            let child_indent = format!("{}   ", indent);
            for child in children.values() {
                child.dump(f, depth + 1, &child_indent)?;
            }
        }
        Ok(())
    }
}

/// An indented description of the state and everything below it, for diagnostics
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, 0, "")
    }
}
