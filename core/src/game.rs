// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn state machine
//!
//! [`Game`] owns one board and drives it one placement at a time:
//! validate, commit the stone, remove captured stones, then either keep the
//! turn (continuing capture) or hand it to the opponent, and finally check
//! whether the game is over. A rejected move leaves everything untouched.

use crate::board::{Board, Cell};
use crate::cbor::{GameSnapshot, MoveRecord};
use crate::config::{GameConfig, Player};
use crate::groups::{group_of, Group};
use crate::rules::{MoveValidator, Placement};
use crate::{Color, Coord, GameError};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Where the game stands between moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "color", rename_all = "snake_case")]
pub enum TurnState {
    /// `Color` places the next stone
    ToMove(Color),
    /// `Color` just captured and keeps the turn
    ContinuingCapture(Color),
    /// Finished, `Color` won
    GameOver(Color),
}

impl TurnState {
    /// Color that places the next stone, `None` once the game is over
    pub fn mover(&self) -> Option<Color> {
        match *self {
            TurnState::ToMove(color) | TurnState::ContinuingCapture(color) => Some(color),
            TurnState::GameOver(_) => None,
        }
    }

    /// Winner, once decided
    pub fn winner(&self) -> Option<Color> {
        match *self {
            TurnState::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, TurnState::GameOver(_))
    }

    pub fn is_continuing_capture(&self) -> bool {
        matches!(self, TurnState::ContinuingCapture(_))
    }
}

/// Observer of committed transitions, called synchronously after each
/// accepted move
pub trait GameListener: Send {
    /// The turn passed to `mover`
    fn on_mover_changed(&mut self, mover: Color) {
        let _ = mover;
    }

    /// The game ended; called at most once per game
    fn on_game_over(&mut self, winner: Color) {
        let _ = winner;
    }
}

/// Effects of an accepted move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Cell the stone went to
    pub index: usize,
    /// Color of the placed stone
    pub color: Color,
    /// Rule that admitted the placement
    pub placement: Placement,
    /// Opposing stones removed
    pub captured: Group,
    /// The same color keeps the turn
    pub continuing_capture: bool,
    /// The move ended the game
    pub game_over: bool,
    /// Winner when `game_over` is set
    pub winner: Option<Color>,
}

/// One HexOust game: board, turn state and history
pub struct Game {
    config: GameConfig,
    board: Board,
    state: TurnState,
    history: Vec<MoveRecord>,
    /// Opposing stones removed by red, by blue
    captures: (usize, usize),
    listeners: Vec<Box<dyn GameListener>>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("state", &self.state)
            .field("history", &self.history.len())
            .field("captures", &self.captures)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start a game with the default configuration
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Start a game on an empty board
    pub fn with_config(config: GameConfig) -> Self {
        let state = TurnState::ToMove(config.first_mover);
        Self {
            config,
            board: Board::new(),
            state,
            history: Vec::new(),
            captures: (0, 0),
            listeners: Vec::new(),
        }
    }

    /// Resume a game from a snapshot
    ///
    /// Capture tallies are rebuilt from the recorded history.
    pub fn restore(snapshot: GameSnapshot, config: GameConfig) -> Result<Self> {
        let board = Board::from_cells(&snapshot.cells).ok_or_else(|| {
            anyhow!(
                "Snapshot has {} cells, expected {}",
                snapshot.cells.len(),
                crate::CELL_COUNT
            )
        })?;

        let mut captures = (0, 0);
        for record in &snapshot.history {
            match record.color {
                Color::Red => captures.0 += record.captured.len(),
                Color::Blue => captures.1 += record.captured.len(),
            }
        }

        tracing::debug!(state = ?snapshot.state, moves = snapshot.history.len(), "Game restored");

        Ok(Self {
            config,
            board,
            state: snapshot.state,
            history: snapshot.history,
            captures,
            listeners: Vec::new(),
        })
    }

    /// Capture the current board, turn state and history
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cells: self.board.cells(),
            state: self.state,
            history: self.history.clone(),
        }
    }

    /// Clear the board and start over; listeners and config are kept
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.state = TurnState::ToMove(self.config.first_mover);
        self.history.clear();
        self.captures = (0, 0);
        tracing::info!(first_mover = %self.config.first_mover, "Game reset");
    }

    /// Subscribe to mover changes and game over
    pub fn add_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    /// Place a stone for the current mover at `index`
    ///
    /// On rejection nothing changes and no listener is called.
    pub fn submit_move(&mut self, index: usize) -> Result<MoveOutcome, GameError> {
        let _span = tracing::debug_span!("game.submit_move", index).entered();

        let color = match self.state {
            TurnState::GameOver(_) => {
                tracing::debug!("Move rejected, game is already over");
                return Err(GameError::GameAlreadyOver);
            }
            TurnState::ToMove(color) | TurnState::ContinuingCapture(color) => color,
        };

        let (placement, captured) = {
            let validator = MoveValidator::new(&self.board);
            let placement = validator.classify(color, index).map_err(|err| {
                tracing::debug!(%color, %err, "Move rejected");
                err
            })?;
            let captured = match placement {
                Placement::Capturing => validator.capture_targets(color, index),
                Placement::NonCapturing => Group::new(),
            };
            (placement, captured)
        };

        let placed = self.board.place(color, index);
        debug_assert!(placed, "board refused validated placement at {}", index);
        if !placed {
            tracing::error!(%color, index, "Board refused a validated placement");
            return Err(GameError::BoardDesync(index));
        }

        for &cell in &captured {
            self.board.remove(cell);
        }

        match color {
            Color::Red => self.captures.0 += captured.len(),
            Color::Blue => self.captures.1 += captured.len(),
        }

        let continuing_capture = !captured.is_empty();
        self.state = if continuing_capture {
            TurnState::ContinuingCapture(color)
        } else {
            TurnState::ToMove(color.opposite())
        };

        if let Some(winner) = self.evaluate_terminal(color) {
            self.state = TurnState::GameOver(winner);
        }

        tracing::info!(
            %color,
            index,
            ?placement,
            captured = captured.len(),
            state = ?self.state,
            "Move committed"
        );

        if self.config.record_history {
            self.history
                .push(MoveRecord::new(index, color, placement, &captured));
        }

        let outcome = MoveOutcome {
            index,
            color,
            placement,
            captured,
            continuing_capture: self.state.is_continuing_capture(),
            game_over: self.state.is_game_over(),
            winner: self.state.winner(),
        };

        self.notify(color);
        Ok(outcome)
    }

    /// Decide whether the position after `just_moved`'s placement ends the
    /// game, and who wins
    fn evaluate_terminal(&self, just_moved: Color) -> Option<Color> {
        let mover = self.state.mover()?;
        let opponent = mover.opposite();

        if self.board.stone_count(opponent) == 0 {
            tracing::info!(winner = %mover, "Opponent has no stones left");
            return Some(mover);
        }

        let validator = MoveValidator::new(&self.board);
        let mover_can_move = validator.has_legal_move(mover);
        let opponent_can_move = validator.has_legal_move(opponent);

        match (mover_can_move, opponent_can_move) {
            (false, false) => {
                let other = just_moved.opposite();
                let winner = if self.board.stone_count(just_moved) >= self.board.stone_count(other)
                {
                    just_moved
                } else {
                    other
                };
                tracing::info!(%winner, "Neither side can move");
                Some(winner)
            }
            (false, true) => {
                tracing::info!(winner = %opponent, "Side to move has no legal move");
                Some(opponent)
            }
            (true, false) if self.state.is_continuing_capture() => None,
            (true, false) => {
                tracing::info!(winner = %mover, "Opponent has no legal move");
                Some(mover)
            }
            (true, true) => None,
        }
    }

    fn notify(&mut self, just_moved: Color) {
        match self.state {
            TurnState::GameOver(winner) => {
                for listener in &mut self.listeners {
                    listener.on_game_over(winner);
                }
            }
            TurnState::ToMove(mover) if mover != just_moved => {
                for listener in &mut self.listeners {
                    listener.on_mover_changed(mover);
                }
            }
            _ => {}
        }
    }

    /// Check if the current mover could place at `index` right now
    pub fn can_place(&self, index: usize) -> bool {
        match self.state.mover() {
            Some(color) => self.validator().classify(color, index).is_ok(),
            None => false,
        }
    }

    /// Validator over the current board
    pub fn validator(&self) -> MoveValidator<'_> {
        MoveValidator::new(&self.board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Color to move, `None` once the game is over
    pub fn mover(&self) -> Option<Color> {
        self.state.mover()
    }

    pub fn winner(&self) -> Option<Color> {
        self.state.winner()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn is_continuing_capture(&self) -> bool {
        self.state.is_continuing_capture()
    }

    /// The player bound to `color`
    pub fn player(&self, color: Color) -> Player {
        self.config.player(color)
    }

    /// The player to move, `None` once the game is over
    pub fn current_player(&self) -> Option<Player> {
        self.mover().map(|color| self.player(color))
    }

    /// Committed moves, oldest first (empty when history is disabled)
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Opposing stones removed by `color` so far
    pub fn captures(&self, color: Color) -> usize {
        match color {
            Color::Red => self.captures.0,
            Color::Blue => self.captures.1,
        }
    }

    pub fn cell_at(&self, coord: Coord) -> Option<Cell> {
        self.board.cell_at(coord)
    }

    pub fn cell_at_index(&self, index: usize) -> Option<Cell> {
        self.board.cell_at_index(index)
    }

    pub fn is_empty(&self, index: usize) -> bool {
        self.board.is_empty(index)
    }

    pub fn adjacent_indices(&self, index: usize) -> Vec<usize> {
        self.board.adjacent_indices(index)
    }

    pub fn group_of(&self, index: usize) -> Group {
        group_of(&self.board, index)
    }

    pub fn is_non_capturing_legal(&self, color: Color, index: usize) -> bool {
        self.validator().is_non_capturing_legal(color, index)
    }

    pub fn is_capturing_legal(&self, color: Color, index: usize) -> bool {
        self.validator().is_capturing_legal(color, index)
    }

    pub fn capture_targets(&self, color: Color, index: usize) -> Group {
        self.validator().capture_targets(color, index)
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        self.validator().has_legal_move(color)
    }

    pub fn legal_moves(&self, color: Color) -> Vec<usize> {
        self.validator().legal_moves(color)
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.board.stone_count(color)
    }
}
