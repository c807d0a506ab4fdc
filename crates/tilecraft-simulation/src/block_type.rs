//! Block type definitions and per-type properties

use serde::{Deserialize, Serialize};

/// Every kind of cell the world grid can hold
///
/// The discriminants are stable numeric ids (used by renderers for sprite lookup
/// and by RON presets), so new variants are appended at the end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Coal = 4,
    Iron = 5,
    Gold = 6,
    Diamond = 7,
    OakLog = 8,
    Leaves = 9,
    Bedrock = 10,
    OakPlank = 11,
    CobbleStone = 12,
    Water = 13,
    Poppy = 14,
    Pumpkin = 15,
    Sand = 16,
    IronBlock = 17,
    GoldBlock = 18,
    DiamondBlock = 19,
    CoalBlock = 20,
}

/// Sound family the audio layer picks for footsteps and mining
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceSound {
    /// Nothing underfoot (free fall, air)
    None,
    /// Grass, dirt, sand and plants
    GrassDirt,
    /// Stone, cobble, ores
    Stone,
    /// Refined storage blocks (iron/gold/diamond/coal blocks)
    Blocks,
    /// Logs and planks
    Wood,
}

impl BlockType {
    /// All block types in id order
    pub const ALL: [BlockType; 21] = [
        BlockType::Air,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Coal,
        BlockType::Iron,
        BlockType::Gold,
        BlockType::Diamond,
        BlockType::OakLog,
        BlockType::Leaves,
        BlockType::Bedrock,
        BlockType::OakPlank,
        BlockType::CobbleStone,
        BlockType::Water,
        BlockType::Poppy,
        BlockType::Pumpkin,
        BlockType::Sand,
        BlockType::IronBlock,
        BlockType::GoldBlock,
        BlockType::DiamondBlock,
        BlockType::CoalBlock,
    ];

    /// Numeric id of this block type
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Look up a block type by numeric id
    pub fn from_id(id: u16) -> Option<BlockType> {
        Self::ALL.get(id as usize).copied()
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
            BlockType::Coal => "coal",
            BlockType::Iron => "iron",
            BlockType::Gold => "gold",
            BlockType::Diamond => "diamond",
            BlockType::OakLog => "oak_log",
            BlockType::Leaves => "leaves",
            BlockType::Bedrock => "bedrock",
            BlockType::OakPlank => "oak_plank",
            BlockType::CobbleStone => "cobble_stone",
            BlockType::Water => "water",
            BlockType::Poppy => "poppy",
            BlockType::Pumpkin => "pumpkin",
            BlockType::Sand => "sand",
            BlockType::IronBlock => "iron_block",
            BlockType::GoldBlock => "gold_block",
            BlockType::DiamondBlock => "diamond_block",
            BlockType::CoalBlock => "coal_block",
        }
    }

    /// Base color (RGBA), used as a fallback when no sprite is available
    pub fn color(self) -> [u8; 4] {
        match self {
            BlockType::Air => [0, 0, 0, 0],
            BlockType::Grass => [95, 159, 53, 255],
            BlockType::Dirt => [134, 96, 67, 255],
            BlockType::Stone => [125, 125, 125, 255],
            BlockType::Coal => [45, 45, 45, 255],
            BlockType::Iron => [216, 175, 147, 255],
            BlockType::Gold => [252, 238, 75, 255],
            BlockType::Diamond => [93, 236, 245, 255],
            BlockType::OakLog => [102, 81, 51, 255],
            BlockType::Leaves => [60, 130, 40, 200],
            BlockType::Bedrock => [40, 40, 40, 255],
            BlockType::OakPlank => [162, 130, 78, 255],
            BlockType::CobbleStone => [110, 110, 110, 255],
            BlockType::Water => [50, 90, 220, 180],
            BlockType::Poppy => [200, 30, 30, 255],
            BlockType::Pumpkin => [227, 144, 29, 255],
            BlockType::Sand => [219, 207, 163, 255],
            BlockType::IronBlock => [220, 220, 220, 255],
            BlockType::GoldBlock => [246, 208, 61, 255],
            BlockType::DiamondBlock => [98, 219, 214, 255],
            BlockType::CoalBlock => [20, 20, 20, 255],
        }
    }

    /// Does this block stop actor movement?
    ///
    /// Trees and flowers are scenery the actor walks through; water is swum in.
    pub fn is_solid(self) -> bool {
        !matches!(
            self,
            BlockType::Air
                | BlockType::Water
                | BlockType::OakLog
                | BlockType::Leaves
                | BlockType::Poppy
        )
    }

    /// Can the player break this block?
    pub fn is_breakable(self) -> bool {
        !matches!(self, BlockType::Air | BlockType::Bedrock)
    }

    /// Can flowing water move into a cell holding this block?
    pub fn is_water_replaceable(self) -> bool {
        matches!(self, BlockType::Air | BlockType::Poppy)
    }

    /// Is this one of the ores grown as veins during generation?
    pub fn is_ore(self) -> bool {
        matches!(
            self,
            BlockType::Coal | BlockType::Iron | BlockType::Gold | BlockType::Diamond
        )
    }

    /// Blocks placed by trees and flora during generation
    pub fn is_decoration(self) -> bool {
        matches!(
            self,
            BlockType::OakLog | BlockType::Leaves | BlockType::Poppy | BlockType::Pumpkin
        )
    }

    /// Sound family for footsteps and mining
    pub fn surface_sound(self) -> SurfaceSound {
        match self {
            BlockType::Air | BlockType::Water => SurfaceSound::None,
            BlockType::Grass
            | BlockType::Dirt
            | BlockType::Sand
            | BlockType::Leaves
            | BlockType::Poppy
            | BlockType::Pumpkin => SurfaceSound::GrassDirt,
            BlockType::Stone
            | BlockType::CobbleStone
            | BlockType::Bedrock
            | BlockType::Coal
            | BlockType::Iron
            | BlockType::Gold
            | BlockType::Diamond => SurfaceSound::Stone,
            BlockType::IronBlock
            | BlockType::GoldBlock
            | BlockType::DiamondBlock
            | BlockType::CoalBlock => SurfaceSound::Blocks,
            BlockType::OakLog | BlockType::OakPlank => SurfaceSound::Wood,
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
