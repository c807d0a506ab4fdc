//! Crafting recipes - fixed input counts turned into an output stack

use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use crate::simulation::BlockType;

/// What a recipe produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeOutput {
    pub block_type: BlockType,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub inputs: Vec<(BlockType, u32)>,
    pub output: RecipeOutput,
}

impl Recipe {
    pub fn new(name: &str, inputs: &[(BlockType, u32)], block_type: BlockType, count: u32) -> Self {
        Self {
            name: name.to_string(),
            inputs: inputs.to_vec(),
            output: RecipeOutput { block_type, count },
        }
    }
}

/// All known recipes
#[derive(Debug, Clone)]
pub struct RecipeRegistry {
    recipes: Vec<Recipe>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        let recipes = vec![
            Recipe::new("Oak Planks", &[(BlockType::OakLog, 1)], BlockType::OakPlank, 4),
            Recipe::new("Stone", &[(BlockType::CobbleStone, 1)], BlockType::Stone, 1),
            Recipe::new("Iron Block", &[(BlockType::Iron, 9)], BlockType::IronBlock, 1),
            Recipe::new("Gold Block", &[(BlockType::Gold, 9)], BlockType::GoldBlock, 1),
            Recipe::new(
                "Diamond Block",
                &[(BlockType::Diamond, 9)],
                BlockType::DiamondBlock,
                1,
            ),
            Recipe::new("Coal Block", &[(BlockType::Coal, 9)], BlockType::CoalBlock, 1),
        ];
        Self { recipes }
    }

    pub fn all_recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn find(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    pub fn can_craft(&self, recipe: &Recipe, inventory: &Inventory) -> bool {
        recipe
            .inputs
            .iter()
            .all(|&(block_type, count)| inventory.has_block(block_type, count))
    }

    /// Recipes the inventory currently holds enough inputs for
    pub fn available(&self, inventory: &Inventory) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| self.can_craft(recipe, inventory))
            .collect()
    }

    /// Consume the inputs and add the output; `None` if the inputs are missing
    pub fn craft(&self, recipe: &Recipe, inventory: &mut Inventory) -> Option<RecipeOutput> {
        if !self.can_craft(recipe, inventory) {
            log::debug!("[CRAFTING] Missing inputs for {}", recipe.name);
            return None;
        }

        for &(block_type, count) in &recipe.inputs {
            inventory.remove_block(block_type, count);
        }
        let overflow = inventory.add_block(recipe.output.block_type, recipe.output.count);
        if overflow > 0 {
            log::warn!(
                "[CRAFTING] Inventory full, {} {} lost",
                overflow,
                recipe.output.block_type
            );
        }

        log::debug!("[CRAFTING] Crafted {}", recipe.name);
        Some(recipe.output)
    }
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_recipes() {
        let registry = RecipeRegistry::new();
        assert_eq!(registry.all_recipes().len(), 6);
        let planks = registry.find("Oak Planks").unwrap();
        assert_eq!(planks.output.block_type, BlockType::OakPlank);
        assert_eq!(planks.output.count, 4);
        assert!(registry.find("Torch").is_none());
    }

    #[test]
    fn test_craft_planks() {
        let registry = RecipeRegistry::new();
        let mut inventory = Inventory::default();
        inventory.add_block(BlockType::OakLog, 2);

        let recipe = registry.find("Oak Planks").unwrap().clone();
        let output = registry.craft(&recipe, &mut inventory);
        assert_eq!(
            output,
            Some(RecipeOutput {
                block_type: BlockType::OakPlank,
                count: 4
            })
        );
        assert_eq!(inventory.count(BlockType::OakLog), 1);
        assert_eq!(inventory.count(BlockType::OakPlank), 4);
    }

    #[test]
    fn test_craft_requires_nine_ores() {
        let registry = RecipeRegistry::new();
        let mut inventory = Inventory::default();
        inventory.add_block(BlockType::Iron, 8);

        let recipe = registry.find("Iron Block").unwrap().clone();
        assert!(!registry.can_craft(&recipe, &inventory));
        assert!(registry.craft(&recipe, &mut inventory).is_none());
        assert_eq!(inventory.count(BlockType::Iron), 8);

        inventory.add_block(BlockType::Iron, 1);
        assert!(registry.craft(&recipe, &mut inventory).is_some());
        assert_eq!(inventory.count(BlockType::Iron), 0);
        assert_eq!(inventory.count(BlockType::IronBlock), 1);
    }

    #[test]
    fn test_available() {
        let registry = RecipeRegistry::new();
        let mut inventory = Inventory::default();
        assert!(registry.available(&inventory).is_empty());

        inventory.add_block(BlockType::CobbleStone, 1);
        inventory.add_block(BlockType::Coal, 9);
        let names: Vec<_> = registry
            .available(&inventory)
            .iter()
            .map(|recipe| recipe.name.as_str())
            .collect();
        assert_eq!(names, vec!["Stone", "Coal Block"]);
    }
}
