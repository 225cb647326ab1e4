//! Quarter turn rotations of rectangular blocks.

use thiserror::Error;

use crate::{grid::Grid, v, vec2::IVec2};

/// Amount of 90° clockwise steps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Turns {
    #[default]
    Zero,
    Quarter,
    Half,
    ThreeQuarters,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotationError {
    #[error("rotation of {0} degrees is not a multiple of 90")]
    NotRightAngle(i32),
}

impl Turns {
    pub const ALL: [Turns; 4] = [Turns::Zero, Turns::Quarter, Turns::Half, Turns::ThreeQuarters];

    /// Wraps any amount of clockwise steps, negative means counterclockwise.
    pub fn from_count(count: i32) -> Turns {
        Self::ALL[count.rem_euclid(4) as usize]
    }

    pub fn from_degrees(degrees: i32) -> Result<Turns, RotationError> {
        if degrees % 90 != 0 {
            return Err(RotationError::NotRightAngle(degrees));
        }
        Ok(Self::from_count(degrees / 90))
    }

    pub fn count(&self) -> i32 {
        match self {
            Turns::Zero => 0,
            Turns::Quarter => 1,
            Turns::Half => 2,
            Turns::ThreeQuarters => 3,
        }
    }

    pub fn degrees(&self) -> i32 {
        self.count() * 90
    }

    /// Size of a `size` block after this rotation.
    pub fn rotated_size(&self, size: IVec2) -> IVec2 {
        if self.count() % 2 == 1 {
            size.transposed()
        } else {
            size
        }
    }
}

impl std::ops::Add for Turns {
    type Output = Turns;

    fn add(self, rhs: Self) -> Self::Output {
        Turns::from_count(self.count() + rhs.count())
    }
}

impl std::ops::Neg for Turns {
    type Output = Turns;

    fn neg(self) -> Self::Output {
        Turns::from_count(-self.count())
    }
}

impl std::fmt::Display for Turns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Where `pos` of a `size` block lands once the block is rotated by `turns`.
pub fn rotate_point(pos: IVec2, size: IVec2, turns: Turns) -> IVec2 {
    let IVec2 { x, y } = pos;
    match turns {
        Turns::Zero => pos,
        Turns::Quarter => v!(size.y - 1 - y, x),
        Turns::Half => v!(size.x - 1 - x, size.y - 1 - y),
        Turns::ThreeQuarters => v!(y, size.x - 1 - x),
    }
}

/// Returns a rotated copy of `block`, every tile is moved untouched.
pub fn rotate<T: Clone>(block: &Grid<T>, turns: Turns) -> Grid<T> {
    let size = turns.rotated_size(block.size);
    Grid::from_fn(size, |pos| {
        block.get_at(&rotate_point(pos, size, -turns)).clone()
    })
}
