//! Four players rotational symmetry.
//!
//! The top-left quadrant of a square map is the sample. It is first turned by the
//! user supplied rotation, then copied into the four quadrants, each one turned a
//! further quarter clockwise:
//!
//! ```text
//!   0 | 1
//!  ---+---
//!   3 | 2
//! ```
//!
//! On odd sided maps the sample includes the middle row and column, so neighbouring
//! placements overlap. Every cell is owned by exactly one quadrant in a pinwheel:
//! quadrant 0 owns the sample minus its middle column, the others own its rotations,
//! and the center cell belongs to quadrant 0. When the kept start sits on that
//! middle column the pinwheel is transposed, quadrant 0 gives up its middle row
//! instead, so the start keeps its tile.

use thiserror::Error;

use crate::{
    grid::*,
    map::{Cell, Map, PlayerId},
    rotation::{rotate, rotate_point, Turns},
    v,
    vec2::IVec2,
};

pub const PLAYERS: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymmetrizeError {
    #[error("a {width}x{height} map can't be rotated onto itself, it must be square")]
    DimensionMismatch { height: usize, width: usize },
}

/// Rectangular block of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrant {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Quadrant {
    pub fn contains(&self, pos: &IVec2) -> bool {
        rect_contains(&self.size, &(*pos - self.origin))
    }
}

/// Quadrant geometry of a square grid with side `side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantLayout {
    side: i32,
    transposed: bool,
}

impl QuadrantLayout {
    pub fn new(size: IVec2) -> Result<Self, SymmetrizeError> {
        if size.x != size.y || size.x < 1 {
            return Err(SymmetrizeError::DimensionMismatch {
                height: size.y.max(0) as usize,
                width: size.x.max(0) as usize,
            });
        }
        Ok(Self {
            side: size.x,
            transposed: false,
        })
    }

    /// Quadrant 0 owns the sample minus its middle row instead of its middle column.
    pub fn transposed(self) -> Self {
        Self {
            transposed: !self.transposed,
            ..self
        }
    }

    pub fn size(&self) -> IVec2 {
        IVec2::splat(self.side)
    }

    /// Side of a placement, the extra middle row and column go to every placement.
    fn half(&self) -> i32 {
        (self.side + 1) / 2
    }

    /// The block copied into `quadrant`, quadrant 0 is the sample.
    pub fn placement(&self, quadrant: Turns) -> Quadrant {
        let (near, far) = (0, self.side - self.half());
        let origin = match quadrant {
            Turns::Zero => v!(near, near),
            Turns::Quarter => v!(far, near),
            Turns::Half => v!(far, far),
            Turns::ThreeQuarters => v!(near, far),
        };
        Quadrant {
            origin,
            size: IVec2::splat(self.half()),
        }
    }

    /// Cells written by quadrant 0, the other quadrants own its rotations.
    fn owned_by_first(&self, pos: &IVec2) -> bool {
        let (across, along) = if self.transposed {
            (pos.y, pos.x)
        } else {
            (pos.x, pos.y)
        };
        across < self.side / 2 && along < self.half()
    }

    /// True if `pos` is part of the sample but written by another quadrant.
    pub fn overwrites_sample(&self, pos: &IVec2) -> bool {
        self.placement(Turns::Zero).contains(pos) && self.owner(pos) != Turns::Zero
    }

    /// Rotates a cell position about the grid center.
    pub fn rotate_point(&self, pos: IVec2, turns: Turns) -> IVec2 {
        rotate_point(pos, self.size(), turns)
    }

    /// Which quadrant writes `pos`.
    pub fn owner(&self, pos: &IVec2) -> Turns {
        Turns::ALL
            .into_iter()
            .find(|turns| self.owned_by_first(&self.rotate_point(*pos, -*turns)))
            .unwrap_or(Turns::Zero)
    }
}

/// Builds a map with 4-fold rotational symmetry out of the top-left quadrant of `grid`,
/// after turning that quadrant clockwise by `turns`.
pub fn symmetrize(grid: &Grid<Cell>, turns: Turns) -> Result<Grid<Cell>, SymmetrizeError> {
    let layout = QuadrantLayout::new(grid.size)?;
    let sample = layout.placement(Turns::Zero);
    let Some(sample_grid) = grid.sub_grid(sample.origin, sample.size) else {
        return Err(SymmetrizeError::DimensionMismatch {
            height: grid.height(),
            width: grid.width(),
        });
    };

    let reference = rotate(&sample_grid, turns);
    let start = pick_start(&reference);
    let layout = match start {
        Some(start) if layout.overwrites_sample(&start) => layout.transposed(),
        _ => layout,
    };
    let reference = Grid::from_fn(reference.size, |pos| {
        reference.get_at(&pos).clone().with_start(None)
    });
    tracing::debug!(
        target: "symmetrize",
        "side {}, sample {}, turned {}, start {:?}",
        layout.side,
        sample.size,
        turns,
        start
    );

    let placements: Vec<(Quadrant, Grid<Cell>)> = Turns::ALL
        .into_iter()
        .map(|quadrant| (layout.placement(quadrant), rotate(&reference, quadrant)))
        .collect();
    for (placement, block) in placements.iter() {
        if placement.size != block.size {
            return Err(SymmetrizeError::DimensionMismatch {
                height: grid.height(),
                width: grid.width(),
            });
        }
    }

    let mut out = Grid::from_fn(layout.size(), |pos| {
        let (placement, block) = &placements[layout.owner(&pos).count() as usize];
        block.get_at(&(pos - placement.origin)).clone()
    });

    if let Some(start) = start {
        for quadrant in Turns::ALL {
            let pos = layout.rotate_point(start, quadrant);
            if quadrant != Turns::Zero && pos == start {
                // the center maps onto itself
                break;
            }
            out.get_at_mut(&pos).start = PlayerId::new(quadrant.count() as u32 + 1);
        }
    }

    Ok(out)
}

/// Same as [`symmetrize`], keeping the provenance of the source map.
pub fn symmetrize_map(map: &Map, turns: Turns) -> Result<Map, SymmetrizeError> {
    let grid = symmetrize(&map.grid, turns)?;
    Ok(Map {
        grid,
        origin: map.origin.clone(),
    })
}

/// Position of the start kept in the sample, the lowest player wins.
fn pick_start(sample: &Grid<Cell>) -> Option<IVec2> {
    let mut starts: Vec<(PlayerId, IVec2)> = sample
        .iter()
        .filter_map(|(pos, cell)| cell.start.map(|player| (player, pos)))
        .collect();
    starts.sort_by_key(|(player, _)| *player);
    if starts.len() > 1 {
        tracing::warn!(
            target: "symmetrize",
            "{} starts in the sample quadrant, keeping player {}",
            starts.len(),
            starts[0].0
        );
    }
    starts.first().map(|(_, pos)| *pos)
}

/// True if turning `grid` a quarter clockwise about its center reproduces its terrain,
/// with the start of player `k` landing on the start of player `k % 4 + 1`.
pub fn is_symmetric(grid: &Grid<Cell>) -> bool {
    let Ok(layout) = QuadrantLayout::new(grid.size) else {
        return false;
    };
    grid.iter().all(|(pos, cell)| {
        let turned = grid.get_at(&layout.rotate_point(pos, Turns::Quarter));
        let start_matches = match (cell.start, turned.start) {
            (None, None) => true,
            (Some(from), Some(to)) => {
                let next = from.get() as usize % PLAYERS + 1;
                to.get() as usize == next
            }
            (Some(_), None) | (None, Some(_)) => false,
        };
        cell.terrain == turned.terrain && (start_matches || is_center(&layout, &pos))
    })
}

fn is_center(layout: &QuadrantLayout, pos: &IVec2) -> bool {
    layout.rotate_point(*pos, Turns::Quarter) == *pos
}
