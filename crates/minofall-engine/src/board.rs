use serde::{Deserialize, Serialize};

use crate::{
    BoardSizeError,
    catalog::PieceKind,
    grid::{Cell, Grid},
    placement::{MinoState, MoveDirection, PlacementDetail, Position, RotationMode},
};

/// Board dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameSize {
    pub width: usize,
    pub height: usize,
}

impl GameSize {
    /// Upper bound for either dimension, so every coordinate fits in `i32`.
    pub const MAX_DIMENSION: usize = 1024;

    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> Result<Self, BoardSizeError> {
        if self.width == 0 || self.height == 0 {
            return Err(BoardSizeError::Empty(self));
        }
        if self.width > Self::MAX_DIMENSION || self.height > Self::MAX_DIMENSION {
            return Err(BoardSizeError::TooLarge(self));
        }
        Ok(self)
    }
}

impl Default for GameSize {
    fn default() -> Self {
        Self::new(10, 20)
    }
}

/// Movement requested through [`GameBoard::move_mino`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMode {
    Left,
    Right,
    Up,
    Down,
    /// Slide left until blocked.
    Leftmost,
    /// Slide right until blocked.
    Rightmost,
    /// Fall until resting on the floor or the stack.
    Downmost,
}

impl From<MoveDirection> for MoveMode {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Left => MoveMode::Left,
            MoveDirection::Right => MoveMode::Right,
            MoveDirection::Up => MoveMode::Up,
            MoveDirection::Down => MoveMode::Down,
        }
    }
}

/// Outcome of checking the current placement against the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ValidationResult {
    Success,
    /// A piece cell is outside the board or on a settled cell.
    Blocked,
    /// No active piece.
    Failed,
}

/// Outcome of [`GameBoard::move_mino`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveResult {
    Success,
    /// The move was illegal; the placement is unchanged.
    Blocked,
    /// No active piece; nothing was done.
    Failed,
}

/// Outcome of [`GameBoard::rotate_mino`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RotateResult {
    Success,
    /// Neither the rotation nor any kick was legal; the placement is unchanged.
    Blocked,
    /// No active piece; nothing was done.
    Failed,
    /// Rotated after shifting down, left or right.
    WallKicked,
    /// Rotated after shifting up.
    FloorKicked,
}

/// Arguments for the piece that replaces a locked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub kind: PieceKind,
    pub detail: Option<PlacementDetail>,
}

impl Spawn {
    #[must_use]
    pub const fn new(kind: PieceKind, detail: Option<PlacementDetail>) -> Self {
        Self { kind, detail }
    }

    #[must_use]
    pub const fn at(kind: PieceKind, origin: Position) -> Self {
        Self::new(kind, Some(PlacementDetail::at(origin.x, origin.y)))
    }
}

const KICK_ORDER: [MoveDirection; 4] = [
    MoveDirection::Up,
    MoveDirection::Down,
    MoveDirection::Left,
    MoveDirection::Right,
];

/// The game-board state machine.
///
/// Owns the settled grid and the falling piece. Every mutation is computed
/// on a copy of the placement and committed only if [`GameBoard::validate`]
/// accepts it, so a rejected move or rotation never leaves a trace.
///
/// # Example
///
/// ```
/// use minofall_engine::{GameBoard, GameSize, MoveMode, MoveResult, PieceKind, PlacementDetail};
///
/// let mut board = GameBoard::new(GameSize::default()).unwrap();
/// board.set_mino(Some(PieceKind::O), Some(PlacementDetail::at(4, 0)));
///
/// assert_eq!(board.move_mino(MoveMode::Downmost), MoveResult::Success);
/// assert_eq!(board.mino_state().position().y, 18);
/// ```
#[derive(Debug, Clone)]
pub struct GameBoard {
    size: GameSize,
    grid: Grid,
    current: MinoState,
}

impl GameBoard {
    /// Creates an empty board with no active piece.
    pub fn new(size: GameSize) -> Result<Self, BoardSizeError> {
        let size = size.validate()?;
        Ok(Self {
            size,
            grid: Grid::new(size.width, size.height),
            current: MinoState::new(),
        })
    }

    #[must_use]
    pub fn game_size(&self) -> GameSize {
        self.size
    }

    /// Returns a copy of the current placement.
    #[must_use]
    pub fn mino_state(&self) -> MinoState {
        self.current
    }

    /// Read-only view of the settled cells, without the falling piece.
    #[must_use]
    pub fn settled_grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    fn board_index(&self, position: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.size.width && y < self.size.height).then_some((x, y))
    }

    fn is_legal(&self, state: &MinoState) -> ValidationResult {
        if state.kind().is_none() {
            return ValidationResult::Failed;
        }
        let blocked = state.occupied_cells().any(|position| {
            self.board_index(position)
                .is_none_or(|(x, y)| self.grid.cell(x, y) != Some(Cell::Empty))
        });
        if blocked {
            ValidationResult::Blocked
        } else {
            ValidationResult::Success
        }
    }

    /// Checks whether the current placement fits on the board.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        self.is_legal(&self.current)
    }

    /// Commits `candidate` if it is legal.
    fn try_commit(&mut self, candidate: MinoState) -> bool {
        if self.is_legal(&candidate).is_success() {
            self.current = candidate;
            true
        } else {
            false
        }
    }

    fn step(&mut self, direction: MoveDirection) -> MoveResult {
        let mut candidate = self.current;
        candidate.move_by(direction);
        if self.try_commit(candidate) {
            MoveResult::Success
        } else {
            tracing::trace!(?direction, "move blocked");
            MoveResult::Blocked
        }
    }

    /// Steps in `direction` until blocked, at most `limit` times.
    fn slide(&mut self, direction: MoveDirection, limit: usize) -> MoveResult {
        for _ in 0..limit {
            if self.step(direction).is_blocked() {
                return MoveResult::Success;
            }
        }
        MoveResult::Failed
    }

    /// Moves the falling piece.
    ///
    /// Single steps report `Blocked` when illegal. The repeated modes slide
    /// until the next step would be illegal and report `Success` even when
    /// the piece could not move at all.
    pub fn move_mino(&mut self, mode: MoveMode) -> MoveResult {
        if self.current.kind().is_none() {
            return MoveResult::Failed;
        }
        match mode {
            MoveMode::Left => self.step(MoveDirection::Left),
            MoveMode::Right => self.step(MoveDirection::Right),
            MoveMode::Up => self.step(MoveDirection::Up),
            MoveMode::Down => self.step(MoveDirection::Down),
            MoveMode::Leftmost => self.slide(MoveDirection::Left, self.size.width),
            MoveMode::Rightmost => self.slide(MoveDirection::Right, self.size.width),
            MoveMode::Downmost => self.slide(MoveDirection::Down, self.size.height),
        }
    }

    /// Rotates the falling piece, trying kicks when the plain rotation is
    /// blocked.
    ///
    /// Kicks shift the rotated piece by `1..=depth` cells, trying up, down,
    /// left and right in that order; the first legal offset wins. The depth
    /// comes from [`PieceKind::kick_search_depth`].
    pub fn rotate_mino(&mut self, mode: RotationMode) -> RotateResult {
        let Some(kind) = self.current.kind() else {
            return RotateResult::Failed;
        };

        let mut rotated = self.current;
        rotated.rotate(mode);
        if self.try_commit(rotated) {
            return RotateResult::Success;
        }

        let depth = kind.kick_search_depth();
        for direction in KICK_ORDER {
            let mut candidate = rotated;
            for distance in 1..=depth {
                candidate.move_by(direction);
                if self.try_commit(candidate) {
                    tracing::trace!(?kind, ?direction, distance, "rotation kicked");
                    return if direction == MoveDirection::Up {
                        RotateResult::FloorKicked
                    } else {
                        RotateResult::WallKicked
                    };
                }
            }
        }

        tracing::trace!(?kind, ?mode, "rotation blocked");
        RotateResult::Blocked
    }

    /// Replaces the falling piece. `None` clears it.
    pub fn set_mino(&mut self, kind: Option<PieceKind>, detail: Option<PlacementDetail>) {
        self.current.reset(kind, detail);
    }

    /// Copy of the settled grid with the falling piece drawn as
    /// [`Cell::Filled`]. Piece cells outside the board are skipped.
    #[must_use]
    pub fn rendered_grid(&self) -> Grid {
        let mut grid = self.grid.clone();
        for (x, y) in self.piece_cells_in_bounds() {
            grid.set(x, y, Cell::Filled);
        }
        grid
    }

    fn piece_cells_in_bounds(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.current
            .occupied_cells()
            .filter_map(|position| self.board_index(position))
    }

    /// Writes the falling piece into the settled grid, then replaces it with
    /// `next` (or clears it).
    ///
    /// Does nothing when no piece is active. The placement is not
    /// re-validated; callers lock only legal placements.
    pub fn lock(&mut self, next: Option<Spawn>) {
        let Some(kind) = self.current.kind() else {
            return;
        };
        let cells: Vec<_> = self.piece_cells_in_bounds().collect();
        for &(x, y) in &cells {
            self.grid.set(x, y, Cell::Settled);
        }
        let origin = self.current.position();
        tracing::debug!(
            ?kind,
            x = origin.x,
            y = origin.y,
            cells = cells.len(),
            "piece locked"
        );
        match next {
            Some(spawn) => self.set_mino(Some(spawn.kind), spawn.detail),
            None => self.set_mino(None, None),
        }
    }

    /// Drops the piece to its resting place and optionally locks it.
    pub fn hard_drop(&mut self, should_lock: bool, next: Option<Spawn>) -> MoveResult {
        let result = self.move_mino(MoveMode::Downmost);
        if should_lock {
            self.lock(next);
        }
        result
    }

    pub fn soft_drop(&mut self) -> MoveResult {
        self.move_mino(MoveMode::Down)
    }

    /// Indices of completely settled rows, top to bottom.
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        self.grid.settled_rows()
    }

    /// Removes the given rows and refills the top with empty rows.
    pub fn clear_rows(&mut self, indices: &[usize]) -> usize {
        let removed = self.grid.remove_rows(indices);
        if removed > 0 {
            tracing::debug!(rows = ?indices, removed, "rows cleared");
        }
        removed
    }
}
