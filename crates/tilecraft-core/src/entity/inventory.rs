use serde::{Deserialize, Serialize};

use crate::simulation::BlockType;
use crate::world::interaction::BlockSupply;

/// A stack of blocks in an inventory slot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemStack {
    pub block_type: BlockType,
    pub count: u32,
}

impl ItemStack {
    pub const MAX_STACK_SIZE: u32 = 999;

    pub fn new(block_type: BlockType, count: u32) -> Self {
        ItemStack { block_type, count }
    }

    /// Add items to this stack, returns amount that didn't fit
    pub fn add(&mut self, amount: u32) -> u32 {
        let space = Self::MAX_STACK_SIZE.saturating_sub(self.count);
        let to_add = amount.min(space);
        self.count += to_add;
        amount - to_add
    }

    /// Remove items from this stack, returns amount actually removed
    pub fn remove(&mut self, amount: u32) -> u32 {
        let to_remove = amount.min(self.count);
        self.count -= to_remove;
        to_remove
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= Self::MAX_STACK_SIZE
    }
}

/// Player inventory: counted stacks plus a hotbar of selectable block types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub slots: Vec<Option<ItemStack>>,
    pub max_slots: usize,
    /// Block types cycled through by the selection keys
    pub hotbar: Vec<BlockType>,
    selected_index: usize,
}

impl Inventory {
    /// Hotbar a fresh inventory starts with
    pub const DEFAULT_HOTBAR: [BlockType; 4] = [
        BlockType::Grass,
        BlockType::Stone,
        BlockType::OakLog,
        BlockType::Iron,
    ];

    pub fn new(max_slots: usize) -> Self {
        Inventory {
            slots: vec![None; max_slots],
            max_slots,
            hotbar: Self::DEFAULT_HOTBAR.to_vec(),
            selected_index: 0,
        }
    }

    /// Try to add blocks to the inventory
    /// Returns the amount that couldn't be added (0 if all added successfully)
    pub fn add_block(&mut self, block_type: BlockType, mut amount: u32) -> u32 {
        for stack in self.slots.iter_mut().flatten() {
            if stack.block_type == block_type && !stack.is_full() {
                amount = stack.add(amount);
                if amount == 0 {
                    return 0;
                }
            }
        }

        while amount > 0 {
            match self.find_empty_slot() {
                Some(index) => {
                    let to_add = amount.min(ItemStack::MAX_STACK_SIZE);
                    self.slots[index] = Some(ItemStack::new(block_type, to_add));
                    amount -= to_add;
                }
                None => break,
            }
        }

        if amount > 0 {
            log::debug!("Inventory full, dropped {} {}", amount, block_type);
        }
        amount
    }

    /// Try to remove blocks from the inventory
    /// Returns the amount actually removed
    pub fn remove_block(&mut self, block_type: BlockType, mut amount: u32) -> u32 {
        let mut removed = 0;

        for slot in &mut self.slots {
            let Some(stack) = slot else {
                continue;
            };
            if stack.block_type != block_type {
                continue;
            }

            let taken = stack.remove(amount);
            removed += taken;
            amount -= taken;
            if stack.is_empty() {
                *slot = None;
            }
            if amount == 0 {
                break;
            }
        }

        removed
    }

    /// Total count of a block type across all stacks
    pub fn count(&self, block_type: BlockType) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.block_type == block_type)
            .map(|stack| stack.count)
            .sum()
    }

    pub fn has_block(&self, block_type: BlockType, amount: u32) -> bool {
        self.count(block_type) >= amount
    }

    fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.is_none())
    }

    pub fn empty_slot_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Select a hotbar entry; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.hotbar.len() {
            self.selected_index = index;
        }
    }

    pub fn select_next(&mut self) {
        if !self.hotbar.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.hotbar.len();
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.hotbar.len();
        if len > 0 {
            self.selected_index = (self.selected_index + len - 1) % len;
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Currently selected block type (Air when the hotbar is empty)
    pub fn selected_block(&self) -> BlockType {
        self.hotbar
            .get(self.selected_index)
            .copied()
            .unwrap_or(BlockType::Air)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(36)
    }
}

impl BlockSupply for Inventory {
    fn has_block(&self, block_type: BlockType) -> bool {
        Inventory::has_block(self, block_type, 1)
    }
}
