//=========================================================================
// Level Generation
//=========================================================================
//
// Builds the walls and landing pads of one round from a seed.
//
// Architecture:
//   generate(seed)
//     └─ LevelBuilder
//          ├─ OccupancyGrid   which blocks are taken
//          ├─ StdRng          seeded, so a seed always yields the same level
//          └─ World           wall and pad entities
//
// Passes, in order:
//   1. indestructible top and bottom rows
//   2. indestructible left and right columns
//   3. five landing pads (corners, then centre)
//   4. destructible vertical columns
//   5. destructible horizontal barriers
//   6. small indestructible obstacles in whatever space is left
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use super::components::{Collider, LandingPad, Sprite, Transform, Wall};
use crate::config::WorldConfig;
use crate::core::ecs::{Entity, World};
use crate::core::physics::Aabb;

//=== Generation Tuning ===================================================

const COLUMN_SPACING: usize = 10;
const COLUMN_CHANCE: f64 = 0.7;
const BARRIER_SPACING: usize = 8;
const BARRIER_CHANCE: f64 = 0.5;
/// Keeps generated structures away from the border walls.
const EDGE_MARGIN: i32 = 5;
const OBSTACLE_COUNT: usize = 20;
const OBSTACLE_ATTEMPTS: usize = 10;

//=== OccupancyGrid =======================================================

/// Block-level occupancy map. Anything outside the grid counts as taken.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True if every cell of the `w`x`h` area at (`gx`, `gy`) is in bounds
    /// and unoccupied.
    pub fn is_free(&self, gx: i32, gy: i32, w: i32, h: i32) -> bool {
        if gx < 0 || gy < 0 || gx + w > self.width || gy + h > self.height {
            return false;
        }

        (gy..gy + h).all(|y| (gx..gx + w).all(|x| !self.cells[self.index(x, y)]))
    }

    fn occupy(&mut self, gx: i32, gy: i32, w: i32, h: i32) {
        for y in gy..gy + h {
            for x in gx..gx + w {
                let index = self.index(x, y);
                self.cells[index] = true;
            }
        }
    }

    fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&taken| taken).count()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }
}

//=== Level ===============================================================

/// What the play scene keeps about a generated round.
#[derive(Debug, Clone)]
pub struct Level {
    pub seed: u64,
    pub grid: OccupancyGrid,
    /// Pads in placement order. The helicopter spawns on the first.
    pub pads: Vec<Entity>,
    pub wall_count: usize,
    /// The playable rectangle in world pixels.
    pub bounds: Aabb,
}

/// Generates a level into `world`, which should be empty.
pub fn generate(world: &mut World, config: &WorldConfig, seed: u64) -> Level {
    let mut builder = LevelBuilder::new(world, config, seed);

    builder.border();
    builder.landing_pads();
    builder.columns();
    builder.barriers();
    builder.obstacles();

    let level = builder.finish(config);
    info!(
        "Generated level (seed: {}, walls: {}, pads: {})",
        level.seed,
        level.wall_count,
        level.pads.len()
    );
    level
}

//=== LevelBuilder ========================================================

struct LevelBuilder<'w> {
    world: &'w mut World,
    grid: OccupancyGrid,
    block_size: f32,
    rng: StdRng,
    seed: u64,
    pads: Vec<Entity>,
    wall_count: usize,
}

impl<'w> LevelBuilder<'w> {
    fn new(world: &'w mut World, config: &WorldConfig, seed: u64) -> Self {
        Self {
            world,
            grid: OccupancyGrid::new(config.grid_width(), config.grid_height()),
            block_size: config.block_size as f32,
            rng: StdRng::seed_from_u64(seed),
            seed,
            pads: Vec::new(),
            wall_count: 0,
        }
    }

    fn finish(self, config: &WorldConfig) -> Level {
        Level {
            seed: self.seed,
            grid: self.grid,
            pads: self.pads,
            wall_count: self.wall_count,
            bounds: Aabb::new(Vec2::ZERO, Vec2::new(config.width as f32, config.height as f32)),
        }
    }

    //--- Placement --------------------------------------------------------

    /// One bs×bs wall on a free cell.
    fn place_block(&mut self, gx: i32, gy: i32, destructible: bool) -> Option<Entity> {
        if !self.grid.is_free(gx, gy, 1, 1) {
            return None;
        }
        self.grid.occupy(gx, gy, 1, 1);

        let bs = self.block_size;
        let wall = if destructible { Wall::destructible() } else { Wall::indestructible() };
        let entity = self
            .world
            .build_entity()
            .with(Transform::at(gx as f32 * bs + bs / 2.0, gy as f32 * bs + bs / 2.0))
            .with(Collider::new(bs, bs))
            .with(wall)
            .with(Sprite)
            .build();

        self.wall_count += 1;
        Some(entity)
    }

    /// `n` blocks in a row or column. All or nothing.
    fn wall_line(&mut self, gx: i32, gy: i32, n: i32, vertical: bool, destructible: bool) -> bool {
        let (w, h) = if vertical { (1, n) } else { (n, 1) };
        if !self.grid.is_free(gx, gy, w, h) {
            return false;
        }

        for i in 0..n {
            let (x, y) = if vertical { (gx, gy + i) } else { (gx + i, gy) };
            self.place_block(x, y, destructible);
        }
        true
    }

    /// A 2x1-block pad.
    fn place_pad(&mut self, gx: i32, gy: i32) -> Option<Entity> {
        if !self.grid.is_free(gx, gy, 2, 1) {
            return None;
        }
        self.grid.occupy(gx, gy, 2, 1);

        let bs = self.block_size;
        let entity = self
            .world
            .build_entity()
            .with(Transform::at((gx + 1) as f32 * bs, gy as f32 * bs + bs / 2.0))
            .with(Collider::new(bs * 2.0, bs))
            .with(LandingPad)
            .with(Sprite)
            .build();

        self.pads.push(entity);
        Some(entity)
    }

    //--- Passes -----------------------------------------------------------

    fn border(&mut self) {
        let (gw, gh) = (self.grid.width(), self.grid.height());

        self.wall_line(0, 0, gw, false, false);
        self.wall_line(0, gh - 1, gw, false, false);

        // Corners are already taken by the rows.
        for y in 0..gh {
            self.place_block(0, y, false);
            self.place_block(gw - 1, y, false);
        }
    }

    fn landing_pads(&mut self) {
        let (gw, gh) = (self.grid.width(), self.grid.height());
        let spots = [(3, gh - 5), (gw - 5, gh - 5), (gw - 5, 4), (3, 4), (gw / 2 - 1, gh / 2 - 1)];

        for (gx, gy) in spots {
            self.place_pad(gx, gy);
        }
    }

    fn columns(&mut self) {
        let (gw, gh) = (self.grid.width(), self.grid.height());

        for x in (8..gw - 8).step_by(COLUMN_SPACING) {
            if self.rng.gen::<f64>() < COLUMN_CHANCE {
                let h = self.rng.gen_range(3..=8);
                let y = self.rng.gen_range(EDGE_MARGIN..=gh - h - EDGE_MARGIN);
                self.wall_line(x, y, h, true, true);
            }
        }
    }

    fn barriers(&mut self) {
        let (gw, gh) = (self.grid.width(), self.grid.height());

        for y in (8..gh - 8).step_by(BARRIER_SPACING) {
            if self.rng.gen::<f64>() < BARRIER_CHANCE {
                let w = self.rng.gen_range(3..=8);
                let x = self.rng.gen_range(EDGE_MARGIN..=gw - w - EDGE_MARGIN);
                self.wall_line(x, y, w, false, true);
            }
        }
    }

    fn obstacles(&mut self) {
        let (gw, gh) = (self.grid.width(), self.grid.height());

        for _ in 0..OBSTACLE_COUNT {
            let w = self.rng.gen_range(2..=4);
            let h = self.rng.gen_range(1..=2);

            for _ in 0..OBSTACLE_ATTEMPTS {
                let gx = self.rng.gen_range(EDGE_MARGIN..=gw - w - EDGE_MARGIN);
                let gy = self.rng.gen_range(EDGE_MARGIN..=gh - h - EDGE_MARGIN);

                if self.grid.is_free(gx, gy, w, h) {
                    for y in gy..gy + h {
                        for x in gx..gx + w {
                            self.place_block(x, y, false);
                        }
                    }
                    break;
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
