// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compass directions for the 8-connected boundary walk.

/// One of the eight neighbour directions, in clockwise order from north.
/// Image rows grow downwards, so north is `dy = -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// `(dx, dy)` of one step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// The next direction clockwise.
    pub fn clockwise(self) -> Self {
        match self {
            Self::North => Self::NorthEast,
            Self::NorthEast => Self::East,
            Self::East => Self::SouthEast,
            Self::SouthEast => Self::South,
            Self::South => Self::SouthWest,
            Self::SouthWest => Self::West,
            Self::West => Self::NorthWest,
            Self::NorthWest => Self::North,
        }
    }

    /// Where the neighbour search resumes after arriving by a step in this
    /// direction: back along the boundary, so the walk keeps the background
    /// on the same side.
    pub fn search_start(self) -> Self {
        match self {
            Self::North | Self::NorthEast => Self::West,
            Self::East | Self::SouthEast => Self::North,
            Self::South | Self::SouthWest => Self::East,
            Self::West | Self::NorthWest => Self::South,
        }
    }

    /// All eight directions clockwise, beginning with `self`.
    pub fn probe_order(self) -> impl Iterator<Item = Direction> {
        std::iter::successors(Some(self), |d| Some(d.clockwise())).take(8)
    }

    /// Whether a step in this direction stays on the same row.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::East | Self::West)
    }
}
