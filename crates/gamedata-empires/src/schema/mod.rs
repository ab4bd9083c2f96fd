//! Structure definitions of the `empires.dat` format family.
//!
//! Each structure computes its member list from the
//! [`GameVersion`](gamedata_model::GameVersion). Decoding starts at
//! [`EmpiresDatWrapper`].

mod civ;
mod common;
mod empiresdat;
mod graphic;
mod maps;
mod playercolor;
mod research;
mod sound;
mod tech;
mod terrain;
mod unit;

pub use civ::Civ;
pub use empiresdat::{EmpiresDat, EmpiresDatWrapper};
pub use graphic::{Graphic, GraphicAttackSound, GraphicDelta, SoundProp};
pub use maps::{Map, MapElevation, MapInfo, MapLand, MapTerrain, MapUnit};
pub use playercolor::PlayerColor;
pub use research::{ResearchResourceCost, Tech};
pub use sound::{Sound, SoundItem};
pub use tech::{
    AgeTechTree, BuildingConnection, Effect, EffectBundle, OtherConnection, ResearchConnection,
    UnitConnection,
};
pub use terrain::{
    FrameData, Terrain, TerrainAnimation, TerrainBorder, TerrainPassGraphic, TerrainRestriction,
    TileSize,
};
pub use unit::{
    ActionUnit, AnimatedUnit, BuildingAnnex, BuildingUnit, DamageGraphic, DoppelgangerUnit,
    HitType, LivingUnit, MissileUnit, MovingUnit, ProjectileUnit, ResourceCost, ResourceStorage,
    TreeUnit, UNIT_TYPES, UnitCommand, UnitCommandList, UnitHeader, UnitLine, UnitObject,
};
