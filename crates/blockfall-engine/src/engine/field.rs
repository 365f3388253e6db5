use crate::{
    CompletePieceDropError, HoldError, PieceCollisionError,
    core::{Grid, Piece},
};

use super::generator::{GameSeed, PieceGenerator};

/// Single-turn game state: the grid, the falling piece, the preview piece
/// and the hold slot.
///
/// `GameField` enforces the placement rules but knows nothing about time,
/// score, or effects; [`GameSession`](super::GameSession) layers those on top.
#[derive(Debug, Clone)]
pub struct GameField {
    grid: Grid,
    current_piece: Piece,
    next_piece: Piece,
    held_piece: Option<Piece>,
    can_hold: bool,
    generator: PieceGenerator,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::from_generator(PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self::from_generator(PieceGenerator::with_seed(seed))
    }

    fn from_generator(mut generator: PieceGenerator) -> Self {
        let current_piece = Piece::spawn(generator.sample());
        let next_piece = Piece::spawn(generator.sample());
        Self {
            grid: Grid::new(),
            current_piece,
            next_piece,
            held_piece: None,
            can_hold: true,
            generator,
        }
    }

    /// Clears the grid and the hold slot and draws fresh current and next
    /// pieces. The generator keeps its stream, so a restarted game gets new
    /// pieces rather than replaying the previous ones.
    pub fn reset(&mut self) {
        let generator = self.generator.clone();
        *self = Self::from_generator(generator);
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current_piece(&self) -> Piece {
        self.current_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.next_piece
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<Piece> {
        self.held_piece
    }

    /// Returns whether hold is still available before the next lock.
    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Replaces the falling piece if the new one fits.
    pub fn set_current_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !piece.is_valid_on(&self.grid) {
            return Err(PieceCollisionError);
        }
        self.current_piece = piece;
        Ok(())
    }

    /// Returns where the falling piece would land if hard dropped.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.current_piece.simulate_drop_position(&self.grid)
    }

    /// Returns the piece that would become current if hold were used now.
    #[must_use]
    pub fn peek_piece_after_hold(&self) -> Piece {
        match self.held_piece {
            Some(held) => held.respawned(),
            None => self.next_piece,
        }
    }

    /// Moves the falling piece into the hold slot.
    ///
    /// With an empty slot the next piece becomes current and a new next piece
    /// is drawn. Otherwise the held piece is swapped in, keeping its rotation,
    /// at the spawn position. Either way hold is disabled until the next lock.
    pub fn try_hold(&mut self) -> Result<(), HoldError> {
        if !self.can_hold {
            return Err(HoldError::HoldAlreadyUsed);
        }
        let incoming = self.peek_piece_after_hold();
        if !incoming.is_valid_on(&self.grid) {
            return Err(PieceCollisionError.into());
        }

        let outgoing = self.current_piece;
        if self.held_piece.is_none() {
            self.next_piece = Piece::spawn(self.generator.sample());
        }
        self.held_piece = Some(outgoing);
        self.current_piece = incoming;
        self.can_hold = false;
        Ok(())
    }

    /// Locks the falling piece and spawns the next one.
    ///
    /// Writes the piece into the grid, clears full rows (calling `on_clear`
    /// once per row as it is removed), promotes the next piece, draws a new
    /// next piece and re-enables hold. Returns the number of cleared rows, and
    /// an error if the promoted piece does not fit at its spawn position.
    pub fn complete_piece_drop<F>(
        &mut self,
        on_clear: F,
    ) -> (usize, Result<(), CompletePieceDropError>)
    where
        F: FnMut(usize),
    {
        self.grid.place(&self.current_piece);
        let cleared_lines = self.grid.clear_full_rows(on_clear);

        self.current_piece = self.next_piece;
        self.next_piece = Piece::spawn(self.generator.sample());
        self.can_hold = true;

        if !self.current_piece.is_valid_on(&self.grid) {
            return (
                cleared_lines,
                Err(CompletePieceDropError::NewPieceCollision),
            );
        }
        (cleared_lines, Ok(()))
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_current_piece_unchecked(&mut self, piece: Piece) {
        self.current_piece = piece;
    }

    #[cfg(test)]
    pub(crate) fn set_next_piece(&mut self, piece: Piece) {
        self.next_piece = piece;
    }
}
