use std::fmt::Display;

/// Simple 2d coordinate struct inspired by glam IVec2 used in bevy.
/// `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, serde::Serialize, serde::Deserialize)]
pub struct IVec2 {
    pub x: i32,
    pub y: i32,
}

/// Sugar macro
#[macro_export]
macro_rules! v {
    ($x: expr, $y: expr) => {
        $crate::vec2::IVec2::new($x, $y)
    };
}

impl IVec2 {
    pub const ZERO: IVec2 = IVec2 { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn splat(v: i32) -> Self {
        v!(v, v)
    }

    /// Swaps rows and columns, the size of a block after an odd number of quarter turns.
    pub fn transposed(&self) -> IVec2 {
        v!(self.y, self.x)
    }

    /// Number of cells of a block of this size.
    pub fn area(&self) -> usize {
        (self.x.max(0) * self.y.max(0)) as usize
    }
}

impl Display for IVec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl std::ops::Add for IVec2 {
    type Output = IVec2;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for IVec2 {
    type Output = IVec2;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Sub<i32> for IVec2 {
    type Output = IVec2;

    fn sub(self, rhs: i32) -> Self::Output {
        Self {
            x: self.x - rhs,
            y: self.y - rhs,
        }
    }
}
