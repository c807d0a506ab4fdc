//! Collision resolution between the actor and the block grid
//!
//! Movement is resolved one axis at a time (horizontal first), sweeping every
//! cell the box passes through so fast falls cannot tunnel through a block.

use glam::Vec2;

use super::chunk::Chunk;
use super::chunk_manager::ChunkManager;
use crate::entity::actor::Actor;
use crate::simulation::{BLOCK_SIZE, BlockType, CHUNK_HEIGHT};

/// Shrinks spans so boxes that merely touch a cell edge don't count as inside it
const EDGE_EPSILON: f32 = 1e-3;

/// How far below the bottom edge the ground probe looks
const GROUND_PROBE: f32 = 0.01;

/// Cells (inclusive) covered by the pixel interval `[start, end]`
fn cell_span(start: f32, end: f32) -> (i32, i32) {
    let first = ((start + EDGE_EPSILON) / BLOCK_SIZE).floor() as i32;
    let last = ((end - EDGE_EPSILON) / BLOCK_SIZE).floor() as i32;
    (first, last.max(first))
}

/// The actor's chunk and its two neighbours
struct Nearby<'a> {
    center: i32,
    chunks: [Option<&'a Chunk>; 3],
}

impl<'a> Nearby<'a> {
    fn around(actor: &Actor, chunks: &'a ChunkManager) -> Self {
        let center = ChunkManager::chunk_index_for(actor.center().x);
        Self {
            center,
            chunks: [
                chunks.get_chunk(center - 1),
                chunks.get_chunk(center),
                chunks.get_chunk(center + 1),
            ],
        }
    }

    fn block_type(&self, col: i32, row: i32) -> Option<BlockType> {
        let (position, local) = ChunkManager::cell_to_chunk(col);
        let slot = position - self.center + 1;
        if !(0..3).contains(&slot) {
            return None;
        }
        let chunk = self.chunks[slot as usize]?;
        Some(chunk.block_type(local, row as usize))
    }

    /// Off the bottom of the grid and outside loaded chunks count as solid;
    /// above the grid is open air.
    fn is_solid(&self, col: i32, row: i32) -> bool {
        if row < 0 {
            return false;
        }
        if row >= CHUNK_HEIGHT as i32 {
            return true;
        }
        self.block_type(col, row).map_or(true, BlockType::is_solid)
    }

    fn any_solid(&self, cols: (i32, i32), rows: (i32, i32)) -> bool {
        (cols.0..=cols.1).any(|col| (rows.0..=rows.1).any(|row| self.is_solid(col, row)))
    }
}

/// Stateless collision queries and resolution
pub struct Collision;

impl Collision {
    /// Apply the actor's pending displacement against the terrain
    ///
    /// Consumes `actor.displacement`, clamps the box against solid faces,
    /// zeroes vertical velocity on a vertical hit and refreshes the
    /// grounded / can_jump / in_water flags.
    pub fn update_player_position(actor: &mut Actor, chunks: &ChunkManager) {
        let displacement = actor.displacement;
        actor.displacement = Vec2::ZERO;

        let nearby = Nearby::around(actor, chunks);

        if displacement.x != 0.0 {
            Self::sweep_horizontal(actor, &nearby, displacement.x);
        }
        if displacement.y != 0.0 && Self::sweep_vertical(actor, &nearby, displacement.y) {
            actor.vertical_velocity = 0.0;
        }

        actor.is_grounded = Self::is_on_ground(actor, chunks);
        actor.can_jump = actor.is_grounded;
        if actor.is_grounded && actor.vertical_velocity > 0.0 {
            actor.vertical_velocity = 0.0;
        }
        actor.in_water = Self::check_if_in_water(actor, chunks);

        let overlapping = Self::overlaps_solid(actor, chunks);
        debug_assert!(
            !overlapping,
            "actor overlaps a solid block at {:?}",
            actor.position
        );
        if overlapping {
            log::error!(
                "Actor overlaps a solid block after collision resolution at {:?}",
                actor.position
            );
        }
    }

    /// Returns true if a solid cell stopped the movement
    fn sweep_horizontal(actor: &mut Actor, nearby: &Nearby, dx: f32) -> bool {
        let rows = cell_span(actor.top(), actor.bottom());

        if dx > 0.0 {
            let (_, from) = cell_span(actor.left(), actor.right());
            let (_, to) = cell_span(actor.left() + dx, actor.right() + dx);
            for col in (from + 1)..=to {
                if nearby.any_solid((col, col), rows) {
                    actor.position.x = col as f32 * BLOCK_SIZE - actor.width;
                    return true;
                }
            }
        } else {
            let (from, _) = cell_span(actor.left(), actor.right());
            let (to, _) = cell_span(actor.left() + dx, actor.right() + dx);
            for col in (to..from).rev() {
                if nearby.any_solid((col, col), rows) {
                    actor.position.x = (col + 1) as f32 * BLOCK_SIZE;
                    return true;
                }
            }
        }

        actor.position.x += dx;
        false
    }

    /// Returns true if a solid cell stopped the movement
    fn sweep_vertical(actor: &mut Actor, nearby: &Nearby, dy: f32) -> bool {
        let cols = cell_span(actor.left(), actor.right());

        if dy > 0.0 {
            let (_, from) = cell_span(actor.top(), actor.bottom());
            let (_, to) = cell_span(actor.top() + dy, actor.bottom() + dy);
            for row in (from + 1)..=to {
                if nearby.any_solid(cols, (row, row)) {
                    actor.position.y = row as f32 * BLOCK_SIZE - actor.height;
                    return true;
                }
            }
        } else {
            let (from, _) = cell_span(actor.top(), actor.bottom());
            let (to, _) = cell_span(actor.top() + dy, actor.bottom() + dy);
            for row in (to..from).rev() {
                if nearby.any_solid(cols, (row, row)) {
                    actor.position.y = (row + 1) as f32 * BLOCK_SIZE;
                    return true;
                }
            }
        }

        actor.position.y += dy;
        false
    }

    /// Is there a solid block directly under the actor's bottom edge?
    pub fn is_on_ground(actor: &Actor, chunks: &ChunkManager) -> bool {
        let nearby = Nearby::around(actor, chunks);
        let cols = cell_span(actor.left(), actor.right());
        let row = ((actor.bottom() + GROUND_PROBE) / BLOCK_SIZE).floor() as i32;
        nearby.any_solid(cols, (row, row))
    }

    /// Does the actor's box overlap any water block?
    pub fn check_if_in_water(actor: &Actor, chunks: &ChunkManager) -> bool {
        let (first_col, last_col) = cell_span(actor.left(), actor.right());
        let (first_row, last_row) = cell_span(actor.top(), actor.bottom());
        (first_col..=last_col).any(|col| {
            (first_row..=last_row)
                .any(|row| chunks.block_type_at_cell(col, row) == Some(BlockType::Water))
        })
    }

    /// Block type the actor stands on (Air when there is none)
    ///
    /// Looks at the same cells as `is_on_ground`: the cell under the bottom
    /// centre wins when solid, otherwise the first solid cell under the bottom
    /// edge.
    pub fn get_surface_type(actor: &Actor, chunks: &ChunkManager) -> BlockType {
        let (center_col, row) =
            ChunkManager::world_to_cell(actor.center().x, actor.bottom() + GROUND_PROBE);
        let center = chunks
            .block_type_at_cell(center_col, row)
            .unwrap_or(BlockType::Air);
        if center.is_solid() {
            return center;
        }

        let (first, last) = cell_span(actor.left(), actor.right());
        (first..=last)
            .filter_map(|col| chunks.block_type_at_cell(col, row))
            .find(|block_type| block_type.is_solid())
            .unwrap_or(center)
    }

    /// Does the actor's box overlap a solid cell?
    pub fn overlaps_solid(actor: &Actor, chunks: &ChunkManager) -> bool {
        let nearby = Nearby::around(actor, chunks);
        nearby.any_solid(
            cell_span(actor.left(), actor.right()),
            cell_span(actor.top(), actor.bottom()),
        )
    }
}
