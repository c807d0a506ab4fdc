//! Scripted headless play
//!
//! Drives a `World` without a window: walks back and forth, jumps, mines the
//! ground ahead, builds with what it mined and crafts whenever it can.

use glam::Vec2;
use tilecraft_core::entity::{Facing, InputState, Inventory, RecipeRegistry};
use tilecraft_core::simulation::{BLOCK_SIZE, BlockType};
use tilecraft_core::world::{BreakResult, CreativeSupply, PlaceResult, World};

use crate::config::SessionConfig;

/// Frames spent walking in one direction before turning around
const WALK_PHASE: u64 = 240;
const JUMP_EVERY: u64 = 45;
const MINE_EVERY: u64 = 30;
const CRAFT_EVERY: u64 = 120;

/// What a run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub frames: u64,
    pub water_ticks: u64,
    pub blocks_broken: u32,
    pub blocks_placed: u32,
    pub recipes_crafted: u32,
    pub final_position: Vec2,
    pub loaded_chunks: Vec<i32>,
}

pub struct Session {
    world: World,
    inventory: Inventory,
    recipes: RecipeRegistry,
    config: SessionConfig,
    report: SessionReport,
}

impl Session {
    pub fn new(world: World, config: SessionConfig) -> Self {
        Self {
            world,
            inventory: Inventory::default(),
            recipes: RecipeRegistry::new(),
            config,
            report: SessionReport::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Run every configured frame and return the summary
    pub fn run(mut self) -> SessionReport {
        for frame in 0..self.config.frames {
            self.step(frame);
        }

        self.report.frames = self.config.frames;
        self.report.final_position = self.world.actor.position;
        self.report.loaded_chunks = self.world.chunks.positions();
        log::info!(
            "Session finished: {} frames, {} water ticks, {} broken, {} placed, {} crafted, actor at {:?}",
            self.report.frames,
            self.report.water_ticks,
            self.report.blocks_broken,
            self.report.blocks_placed,
            self.report.recipes_crafted,
            self.report.final_position
        );
        self.report
    }

    fn step(&mut self, frame: u64) {
        let input = Self::scripted_input(frame);
        self.report.water_ticks += u64::from(self.world.update(&input, self.config.dt));

        if frame % MINE_EVERY == 0 {
            self.mine_ahead();
        }
        if frame % MINE_EVERY == MINE_EVERY / 2 {
            self.build_ahead();
        }
        if frame % CRAFT_EVERY == CRAFT_EVERY - 1 {
            self.craft_available();
        }
    }

    /// Walk right, then left, alternating; jump at a fixed cadence
    pub fn scripted_input(frame: u64) -> InputState {
        let rightward = (frame / WALK_PHASE) % 2 == 0;
        InputState {
            right_pressed: rightward,
            left_pressed: !rightward,
            jump_pressed: frame % JUMP_EVERY == 0,
            ..InputState::new()
        }
    }

    fn facing_sign(&self) -> f32 {
        match self.world.actor.facing {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Break the block diagonally below the actor in the walking direction
    fn mine_ahead(&mut self) {
        let actor = &self.world.actor;
        let target = Vec2::new(
            actor.center().x + self.facing_sign() * BLOCK_SIZE,
            actor.bottom() + BLOCK_SIZE * 0.5,
        );
        let screen = self.world.world_to_screen(target);

        if let BreakResult::Broken(block_type) = self.world.break_block_at(screen.x, screen.y) {
            self.report.blocks_broken += 1;
            let overflow = self.inventory.add_block(block_type, 1);
            if overflow > 0 {
                log::debug!("Inventory full, dropped {}", block_type);
            }
        }
    }

    /// Place the first stocked hotbar block in front of the actor's head
    fn build_ahead(&mut self) {
        let Some(block_type) = self.pick_stocked_block() else {
            return;
        };
        let actor = &self.world.actor;
        let target = Vec2::new(
            actor.center().x + self.facing_sign() * 1.5 * BLOCK_SIZE,
            actor.top() - BLOCK_SIZE * 0.5,
        );
        let screen = self.world.world_to_screen(target);

        let result = if self.config.creative {
            self.world
                .place_block_at(screen.x, screen.y, block_type, &CreativeSupply)
        } else {
            self.world
                .place_block_at(screen.x, screen.y, block_type, &self.inventory)
        };

        match result {
            PlaceResult::Placed => {
                self.report.blocks_placed += 1;
                if !self.config.creative {
                    self.inventory.remove_block(block_type, 1);
                }
            }
            other => log::trace!("Placing {} failed: {:?}", block_type, other),
        }
    }

    /// Cycle the hotbar to an entry the inventory holds (creative: current entry)
    fn pick_stocked_block(&mut self) -> Option<BlockType> {
        if self.config.creative {
            return Some(self.inventory.selected_block());
        }
        for _ in 0..Inventory::DEFAULT_HOTBAR.len() {
            let block_type = self.inventory.selected_block();
            if self.inventory.has_block(block_type, 1) {
                return Some(block_type);
            }
            self.inventory.select_next();
        }
        None
    }

    fn craft_available(&mut self) {
        let ready: Vec<String> = self
            .recipes
            .available(&self.inventory)
            .into_iter()
            .map(|recipe| recipe.name.clone())
            .collect();

        for name in ready {
            let Some(recipe) = self.recipes.find(&name) else {
                continue;
            };
            if self.recipes.craft(recipe, &mut self.inventory).is_some() {
                self.report.recipes_crafted += 1;
            }
        }
    }
}
