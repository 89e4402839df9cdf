//! Segment raycasts through the bitvoxel grid.

use crate::core::glam::{IVec3, Vec3A};
use crate::world::VoxelWorld;
use crate::world_index::WorldIndex;

/// Casts line segments through a world, one bitvoxel cell at a time.
///
/// Obtained from [`VoxelWorld::raycaster`]; the borrow ties the caster to
/// the world it reads, and casting never mutates anything.
#[derive(Clone, Copy)]
pub struct Raycaster<'a> {
    world: &'a VoxelWorld,
}

impl<'a> Raycaster<'a> {
    pub(crate) fn new(world: &'a VoxelWorld) -> Self {
        Self { world }
    }

    /// Walks the segment from `start` to `end` (world coordinates, cell size
    /// one bitvoxel) and returns the first set bitvoxel it passes through,
    /// or `None` if the segment exits without a hit.
    ///
    /// This is the classic Amanatides–Woo traversal: per axis, `t` tracks
    /// the segment parameter at which the walk crosses the next grid plane
    /// and `dt` the parameter width of one cell. Each step advances the axis
    /// with the smallest `t` (ties resolve x, then y, then z) until that
    /// axis reaches the end cell. Axes with no extent never advance — their
    /// `t` stays infinite. The walk visits at most
    /// `|Δi| + |Δj| + |Δk| + 1` cells.
    pub fn cast_segment(&self, start: Vec3A, end: Vec3A) -> Option<WorldIndex> {
        let delta = end - start;

        let mut cell = [
            start.x.floor() as i32,
            start.y.floor() as i32,
            start.z.floor() as i32,
        ];
        let cell_end = [
            end.x.floor() as i32,
            end.y.floor() as i32,
            end.z.floor() as i32,
        ];

        let mut step = [0i32; 3];
        let mut t = [f32::INFINITY; 3];
        let mut dt = [f32::INFINITY; 3];
        for axis in 0..3 {
            let d = delta[axis];
            if d > 0.0 {
                step[axis] = 1;
                dt[axis] = 1.0 / d;
                t[axis] = ((cell[axis] + 1) as f32 - start[axis]) / d;
            } else if d < 0.0 {
                step[axis] = -1;
                dt[axis] = -1.0 / d;
                t[axis] = (start[axis] - cell[axis] as f32) / -d;
            }
        }

        loop {
            let index = WorldIndex::from_ivec3(IVec3::new(cell[0], cell[1], cell[2]));
            if self.world.bitvoxel_at(index) {
                return Some(index);
            }

            let axis = if t[0] <= t[1] && t[0] <= t[2] {
                0
            } else if t[1] <= t[2] {
                1
            } else {
                2
            };
            if cell[axis] == cell_end[axis] {
                return None;
            }
            cell[axis] += step[axis];
            t[axis] += dt[axis];
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
