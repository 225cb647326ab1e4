use crate::vec2::*;

/// Simple 2d matrix type, row-major.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Grid<T: Clone> {
    tiles: Vec<T>,
    pub size: IVec2,
}

impl<T: Clone> Grid<T> {
    /// Builds a grid by calling `f` for every position in reading order.
    pub fn from_fn(size: IVec2, f: impl FnMut(IVec2) -> T) -> Grid<T> {
        Self {
            tiles: iter_area(size).map(f).collect(),
            size,
        }
    }

    /// Builds a grid from rows, returns None if the rows are not all the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Grid<T>> {
        let width = rows.first().map_or(0, |row| row.len());
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let size = IVec2::new(width as i32, rows.len() as i32);
        Some(Self {
            tiles: rows.into_iter().flatten().collect(),
            size,
        })
    }

    pub fn width(&self) -> usize {
        self.size.x as usize
    }

    pub fn height(&self) -> usize {
        self.size.y as usize
    }

    /// Caution: not bounds checked, call contains first
    pub fn get_at(&self, pos: &IVec2) -> &T {
        &self.tiles[pos_to_index(&self.size, pos)]
    }

    /// Caution: not bounds checked, call contains first
    pub fn get_at_mut(&mut self, pos: &IVec2) -> &mut T {
        &mut self.tiles[pos_to_index(&self.size, pos)]
    }

    /// Bound check
    pub fn contains(&self, pos: &IVec2) -> bool {
        rect_contains(&self.size, pos)
    }

    /// Copies the `size` block whose top-left corner is `origin`.
    /// Returns None if the block is not fully inside the grid.
    pub fn sub_grid(&self, origin: IVec2, size: IVec2) -> Option<Grid<T>> {
        let inside = size.x >= 0
            && size.y >= 0
            && self.contains(&origin)
            && self.contains(&(origin + size - 1));
        if !inside {
            return None;
        }
        Some(Grid::from_fn(size, |pos| self.get_at(&(origin + pos)).clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> {
        iter_area(self.size).map(|pos| (pos, self.get_at(&pos)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.tiles.chunks(self.width().max(1))
    }
}

pub fn pos_to_index(size: &IVec2, pos: &IVec2) -> usize {
    (pos.x + pos.y * size.x) as usize
}

pub fn rect_contains(size: &IVec2, pos: &IVec2) -> bool {
    (0..size.x).contains(&pos.x) && (0..size.y).contains(&pos.y)
}

pub fn iter_area(size: IVec2) -> impl Iterator<Item = IVec2> {
    (0..size.y).flat_map(move |y| (0..size.x).map(move |x| IVec2::new(x, y)))
}
