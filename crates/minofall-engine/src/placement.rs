use serde::{Deserialize, Serialize};

use crate::catalog::{PieceKind, ROTATION_COUNT};

/// Single-cell movement of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

/// How far a rotation turns the piece.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    /// 90° clockwise.
    #[default]
    Clockwise,
    /// 90° counter-clockwise.
    CounterClockwise,
    /// 180°.
    HalfTurn,
}

impl RotationMode {
    const fn delta(self) -> i32 {
        match self {
            RotationMode::Clockwise => 1,
            RotationMode::CounterClockwise => -1,
            RotationMode::HalfTurn => 2,
        }
    }
}

/// Origin of a piece's bounding square on the board.
///
/// Coordinates are signed: a placement may hang outside the board while a
/// move or rotation is being tried.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn moved(self, direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Left => Self::new(self.x - 1, self.y),
            MoveDirection::Right => Self::new(self.x + 1, self.y),
            MoveDirection::Up => Self::new(self.x, self.y - 1),
            MoveDirection::Down => Self::new(self.x, self.y + 1),
        }
    }
}

/// Rotation state of a piece, always in `0..4`.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    /// Builds a rotation from any index, wrapping with floor modulo so that
    /// negative indices land in `0..4` as well.
    #[must_use]
    pub fn new(index: i32) -> Self {
        #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let count = ROTATION_COUNT as i32;
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index.rem_euclid(count) as u8;
        Self(index)
    }

    #[must_use]
    pub fn rotated(self, mode: RotationMode) -> Self {
        Self::new(i32::from(self.0) + mode.delta())
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Optional overrides applied by [`MinoState::reset`].
///
/// A field left as `None` resets to `0`; it is never carried over from the
/// previous placement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlacementDetail {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub rotation: Option<i32>,
}

impl PlacementDetail {
    #[must_use]
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            rotation: None,
        }
    }

    #[must_use]
    pub const fn with_rotation(self, rotation: i32) -> Self {
        Self {
            rotation: Some(rotation),
            ..self
        }
    }
}

impl From<Position> for PlacementDetail {
    fn from(position: Position) -> Self {
        Self::at(position.x, position.y)
    }
}

/// The currently falling piece: kind, origin and rotation.
///
/// `MinoState` knows nothing about the board. Every operation is a plain
/// mutation of its own fields; legality is decided by
/// [`GameBoard`](crate::GameBoard).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MinoState {
    kind: Option<PieceKind>,
    position: Position,
    rotation: PieceRotation,
}

impl MinoState {
    /// Creates an empty placement (no active piece) at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(kind: PieceKind, detail: PlacementDetail) -> Self {
        let mut state = Self::new();
        state.reset(Some(kind), Some(detail));
        state
    }

    #[must_use]
    pub fn kind(&self) -> Option<PieceKind> {
        self.kind
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    pub fn move_by(&mut self, direction: MoveDirection) {
        self.position = self.position.moved(direction);
    }

    pub fn rotate(&mut self, mode: RotationMode) {
        self.rotation = self.rotation.rotated(mode);
    }

    /// Replaces the piece kind and overwrites the pose.
    ///
    /// Without `detail` the pose becomes `(0, 0)` at rotation 0. With
    /// `detail`, each missing field defaults to 0.
    pub fn reset(&mut self, kind: Option<PieceKind>, detail: Option<PlacementDetail>) {
        let detail = detail.unwrap_or_default();
        self.kind = kind;
        self.position = Position::new(detail.x.unwrap_or(0), detail.y.unwrap_or(0));
        self.rotation = PieceRotation::new(detail.rotation.unwrap_or(0));
    }

    /// Returns the board coordinates covered by the piece, in bitmap order.
    ///
    /// Empty when no piece is active. Coordinates may lie outside the board.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let origin = self.position;
        let rotation = self.rotation.index();
        self.kind
            .into_iter()
            .flat_map(move |kind| kind.definition().occupied_offsets(rotation))
            .map(move |(dx, dy)| {
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let (dx, dy) = (dx as i32, dy as i32);
                Position::new(origin.x + dx, origin.y + dy)
            })
    }
}
