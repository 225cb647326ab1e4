
use rand::{rngs::StdRng, Rng};

use crate::prelude::*;

const TERRAINS: [&str; 8] = ["Gg", "Gs^Fp", "Ww", "Wo", "Hh", "Mm", "Ke", "Rd"];

/// Random grid, every start has a different player.
fn random_grid(rng: &mut StdRng, size: IVec2, start_chance: f64) -> Grid<Cell> {
    let mut next_player = 1;
    Grid::from_fn(size, |_| {
        let terrain = TERRAINS[rng.gen_range(0..TERRAINS.len())];
        let start = if rng.gen_bool(start_chance) {
            next_player += 1;
            PlayerId::new(next_player - 1)
        } else {
            None
        };
        Cell::new(terrain).with_start(start)
    })
}

fn random_square(rng: &mut StdRng, start_chance: f64) -> Grid<Cell> {
    let side = rng.gen_range(1..=11);
    random_grid(rng, IVec2::splat(side), start_chance)
}
