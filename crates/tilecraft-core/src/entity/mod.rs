pub mod actor;
pub mod crafting;
pub mod input;
pub mod inventory;

pub use actor::{Actor, Facing, MotionState};
pub use crafting::{Recipe, RecipeOutput, RecipeRegistry};
pub use input::InputState;
pub use inventory::{Inventory, ItemStack};
