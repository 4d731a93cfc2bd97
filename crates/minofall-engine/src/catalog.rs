use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Number of rotation states every piece cycles through.
pub const ROTATION_COUNT: usize = 4;

/// Side length of the largest rotation bitmap (the I-piece).
pub const MAX_BOUNDING_SIZE: usize = 4;

/// Occupancy bits of one rotation state, indexed as `bitmap[y][x]`.
///
/// Only the top-left `bounding_size × bounding_size` square is meaningful;
/// cells outside of it are always `false`.
pub type RotationBitmap = [[bool; MAX_BOUNDING_SIZE]; MAX_BOUNDING_SIZE];

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the static definition of this piece kind.
    #[must_use]
    pub fn definition(self) -> &'static PieceDefinition {
        &PIECE_DEFINITIONS[self as usize]
    }

    /// How many cells a blocked rotation may be shifted in each direction
    /// while searching for a kick.
    #[must_use]
    pub const fn kick_search_depth(self) -> usize {
        match self {
            PieceKind::O => 0,
            PieceKind::I => 2,
            PieceKind::J | PieceKind::L | PieceKind::S | PieceKind::T | PieceKind::Z => 1,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use minofall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use minofall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('j'), Some(PieceKind::J));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Static shape data of a piece kind.
///
/// Rotation `n` is the spawn bitmap turned `n × 90°` clockwise inside the
/// bounding square. Rotation indices wrap modulo [`ROTATION_COUNT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDefinition {
    kind: PieceKind,
    bounding_size: usize,
    rotations: [RotationBitmap; ROTATION_COUNT],
}

impl PieceDefinition {
    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn bounding_size(&self) -> usize {
        self.bounding_size
    }

    #[must_use]
    pub fn rotation(&self, index: usize) -> &RotationBitmap {
        &self.rotations[index % ROTATION_COUNT]
    }

    /// Returns an iterator of `(dx, dy)` offsets occupied in the given rotation.
    pub fn occupied_offsets(&self, index: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.bounding_size;
        self.rotation(index)
            .iter()
            .take(size)
            .enumerate()
            .flat_map(move |(dy, row)| {
                row.iter()
                    .take(size)
                    .enumerate()
                    .filter_map(move |(dx, &occupied)| occupied.then_some((dx, dy)))
            })
    }
}

/// Pure lookup of the definition for `kind`.
#[must_use]
pub fn definition_for(kind: PieceKind) -> &'static PieceDefinition {
    kind.definition()
}

/// Draws a piece kind uniformly at random.
///
/// Every draw is independent; there is no 7-bag and no history, so streaks
/// of the same kind can happen.
pub fn random_kind<R>(rng: &mut R) -> PieceKind
where
    R: Rng + ?Sized,
{
    rng.random()
}

/// Generates all 4 rotation states of a bitmap by rotating 90° clockwise.
///
/// # Arguments
///
/// * `size` - Bounding size of the piece (4 for I, 2 for O, 3 otherwise)
/// * `spawn` - Bitmap at rotation 0
const fn bitmap_rotations(size: usize, spawn: RotationBitmap) -> [RotationBitmap; ROTATION_COUNT] {
    let mut rotations = [spawn; ROTATION_COUNT];
    let mut i = 1;
    while i < ROTATION_COUNT {
        let mut next = [[false; MAX_BOUNDING_SIZE]; MAX_BOUNDING_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                next[y][x] = rotations[i - 1][size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        rotations[i] = next;
        i += 1;
    }
    rotations
}

const fn define(kind: PieceKind, size: usize, spawn: RotationBitmap) -> PieceDefinition {
    PieceDefinition {
        kind,
        bounding_size: size,
        rotations: bitmap_rotations(size, spawn),
    }
}

static PIECE_DEFINITIONS: [PieceDefinition; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        define(PieceKind::I, 4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        define(PieceKind::J, 3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        define(PieceKind::L, 3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
        define(PieceKind::O, 2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        define(PieceKind::S, 3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        define(PieceKind::T, 3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        define(PieceKind::Z, 3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn bitmap_rows(def: &PieceDefinition, index: usize) -> Vec<String> {
        let size = def.bounding_size();
        def.rotation(index)[..size]
            .iter()
            .map(|row| {
                row[..size]
                    .iter()
                    .map(|&c| if c { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_definition_lookup_matches_kind() {
        for kind in PieceKind::ALL {
            let def = definition_for(kind);
            assert_eq!(def.kind(), kind);
            assert!((2..=4).contains(&def.bounding_size()));
        }
        assert_eq!(PieceKind::I.definition().bounding_size(), 4);
        assert_eq!(PieceKind::O.definition().bounding_size(), 2);
        assert_eq!(PieceKind::T.definition().bounding_size(), 3);
    }

    #[test]
    fn test_every_rotation_has_four_cells() {
        for kind in PieceKind::ALL {
            for index in 0..ROTATION_COUNT {
                let count = kind.definition().occupied_offsets(index).count();
                assert_eq!(count, 4, "{kind:?} rotation {index} has {count} cells");
            }
        }
    }

    #[test]
    fn test_j_rotation_table() {
        let def = PieceKind::J.definition();
        assert_eq!(bitmap_rows(def, 0), ["#..", "###", "..."]);
        assert_eq!(bitmap_rows(def, 1), [".##", ".#.", ".#."]);
        assert_eq!(bitmap_rows(def, 2), ["...", "###", "..#"]);
        assert_eq!(bitmap_rows(def, 3), [".#.", ".#.", "##."]);
    }

    #[test]
    fn test_i_rotation_table() {
        let def = PieceKind::I.definition();
        assert_eq!(bitmap_rows(def, 0), ["....", "####", "....", "...."]);
        assert_eq!(bitmap_rows(def, 1), ["..#.", "..#.", "..#.", "..#."]);
        assert_eq!(bitmap_rows(def, 2), ["....", "....", "####", "...."]);
        assert_eq!(bitmap_rows(def, 3), [".#..", ".#..", ".#..", ".#.."]);
    }

    #[test]
    fn test_s_and_z_rotation_tables() {
        let s = PieceKind::S.definition();
        assert_eq!(bitmap_rows(s, 1), [".#.", ".##", "..#"]);
        assert_eq!(bitmap_rows(s, 3), ["#..", "##.", ".#."]);
        let z = PieceKind::Z.definition();
        assert_eq!(bitmap_rows(z, 1), ["..#", ".##", ".#."]);
        assert_eq!(bitmap_rows(z, 3), [".#.", "##.", "#.."]);
    }

    #[test]
    fn test_o_rotations_identical() {
        let def = PieceKind::O.definition();
        for index in 1..ROTATION_COUNT {
            assert_eq!(def.rotation(index), def.rotation(0));
        }
    }

    #[test]
    fn test_rotation_index_wraps() {
        let def = PieceKind::T.definition();
        assert_eq!(def.rotation(5), def.rotation(1));
        assert_eq!(def.rotation(8), def.rotation(0));
    }

    #[test]
    fn test_kick_search_depth() {
        assert_eq!(PieceKind::O.kick_search_depth(), 0);
        assert_eq!(PieceKind::I.kick_search_depth(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(kind.kick_search_depth(), 1);
        }
    }

    #[test]
    fn test_random_kind_covers_all_kinds() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let mut counts = [0_usize; PieceKind::LEN];
        for _ in 0..7000 {
            counts[random_kind(&mut rng) as usize] += 1;
        }
        for (kind, count) in PieceKind::ALL.iter().zip(counts) {
            assert!(
                (700..1300).contains(&count),
                "{kind:?} drawn {count} times out of 7000"
            );
        }
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('o'), Some(PieceKind::O));
        assert_eq!(PieceKind::from_char('X'), None);
    }
}
