//! The `empires2_x1_p1.dat` root structure.
//!
//! The dat file contains everything the game needs to run: units,
//! buildings, terrains, researches and the tech tree.

use gamedata_format::descriptor::{
    discard, discard_named, id, id_array, int_array, read, read_export, skip, subdata, text,
};
use gamedata_format::{FieldDescriptor, Primitive, Result, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::civ::Civ;
use super::common::require_layout;
use super::graphic::Graphic;
use super::maps::{Map, MapInfo};
use super::playercolor::PlayerColor;
use super::research::Tech;
use super::sound::Sound;
use super::tech::{AgeTechTree, BuildingConnection, EffectBundle, ResearchConnection, UnitConnection};
use super::terrain::{Terrain, TerrainBorder, TerrainRestriction, TileSize};
use super::unit::{UnitHeader, UnitLine};

/// Number of terrain slots stored in the file.
///
/// The count is hardcoded per edition; usually fewer terrains are used.
const fn stored_terrain_count(edition: GameEdition) -> usize {
    match edition {
        GameEdition::Ror | GameEdition::Aok => 32,
        GameEdition::Aoc => 42,
        GameEdition::Swgb => 55,
        GameEdition::Aoe1De => 96,
        GameEdition::HdEdition => 100,
        GameEdition::Aoe2De => 200,
    }
}

/// Element counts of the two unknown terrain blobs.
const fn terrain_blob_lengths(edition: GameEdition) -> (usize, usize) {
    match edition {
        GameEdition::Swgb => (25, 157),
        GameEdition::Ror | GameEdition::Aoe1De => (2, 5),
        GameEdition::Aok | GameEdition::Aoc | GameEdition::HdEdition | GameEdition::Aoe2De => {
            (21, 157)
        }
    }
}

/// Root of the game data.
pub struct EmpiresDat;

impl Structure for EmpiresDat {
    const NAME: &'static str = "empiresdat";
    const DESCRIPTION: &'static str = "empires2_x1_p1.dat structure";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        require_layout(Self::NAME, version)?;
        let edition = version.edition;
        let aoe1 = edition.is_aoe1_family();

        let mut members = vec![read("versionstr", text(8usize))];

        if edition == GameEdition::Swgb {
            members.extend([
                read("civ_count_swgb", Primitive::U16),
                discard(Primitive::I32),
                discard(Primitive::I32),
                discard(Primitive::I32),
                discard(Primitive::I32),
            ]);
        }

        // terrain header
        members.extend([
            read("terrain_restriction_count", Primitive::U16),
            // number of used terrains
            read("terrain_count", Primitive::U16),
            read(
                "float_ptr_terrain_tables",
                id_array(Primitive::I32, "terrain_restriction_count"),
            ),
        ]);
        if !aoe1 {
            members.push(read(
                "terrain_pass_graphics_ptrs",
                id_array(Primitive::I32, "terrain_restriction_count"),
            ));
        }

        members.extend([
            read(
                "terrain_restrictions",
                subdata::<TerrainRestriction>("terrain_restriction_count")
                    .passed_args(&["terrain_count"]),
            ),
            read("player_color_count", Primitive::U16),
            read("player_colors", subdata::<PlayerColor>("player_color_count")),
            read_export("sound_count", Primitive::U16),
            read_export("sounds", subdata::<Sound>("sound_count")),
            read("graphic_count", Primitive::U16),
            read("graphic_ptrs", id_array(Primitive::U32, "graphic_count")),
            read_export(
                "graphics",
                subdata::<Graphic>("graphic_count").offset_to("graphic_ptrs"),
            ),
            // terrain data
            skip("virt_function_ptr", id(Primitive::I32)),
            skip("map_pointer", id(Primitive::I32)),
            skip("map_width", Primitive::I32),
            skip("map_height", Primitive::I32),
            skip("world_width", Primitive::I32),
            skip("world_height", Primitive::I32),
            // one per tile type
            read_export("tile_sizes", subdata::<TileSize>(19usize)),
            skip("padding1", Primitive::I16),
            read_export(
                "terrains",
                subdata::<Terrain>(stored_terrain_count(edition)),
            ),
        ]);

        if edition != GameEdition::Aoe2De {
            members.extend([
                read("terrain_border", subdata::<TerrainBorder>(16usize)),
                skip("map_row_offset", Primitive::I32),
            ]);
        }

        if !aoe1 {
            members.extend([
                skip("map_min_x", Primitive::F32),
                skip("map_min_y", Primitive::F32),
                skip("map_max_x", Primitive::F32),
                skip("map_max_y", Primitive::F32),
                skip("map_max_xplus1", Primitive::F32),
                skip("map_min_yplus1", Primitive::F32),
            ]);
        }

        members.extend([
            read("terrain_count_additional", Primitive::U16),
            read("borders_used", Primitive::U16),
            read("max_terrain", Primitive::I16),
            read_export("tile_width", Primitive::I16),
            read_export("tile_height", Primitive::I16),
            read_export("tile_half_height", Primitive::I16),
            read_export("tile_half_width", Primitive::I16),
            read_export("elev_height", Primitive::I16),
            skip("current_row", Primitive::I16),
            skip("current_column", Primitive::I16),
            skip("block_beginn_row", Primitive::I16),
            skip("block_end_row", Primitive::I16),
            skip("block_begin_column", Primitive::I16),
            skip("block_end_column", Primitive::I16),
        ]);

        if aoe1 {
            members.extend([
                skip("any_frame_change", Primitive::I32),
                skip("search_map_ptr", Primitive::I32),
                skip("search_map_rows_ptr", Primitive::I32),
            ]);
        } else {
            members.extend([
                skip("search_map_ptr", Primitive::I32),
                skip("search_map_rows_ptr", Primitive::I32),
                skip("any_frame_change", Primitive::I8),
            ]);
        }

        members.extend([
            skip("map_visible_flag", Primitive::I8),
            skip("fog_flag", Primitive::I8),
        ]);

        if edition != GameEdition::Aoe2De {
            let (bytes, words) = terrain_blob_lengths(edition);
            members.extend([
                discard_blob("terrain_blob0", Primitive::U8, bytes),
                discard_blob("terrain_blob1", Primitive::U32, words),
            ]);
        }

        // random map config
        members.extend([
            read("random_map_count", Primitive::U32),
            read("random_map_ptr", id(Primitive::U32)),
            read("map_infos", subdata::<MapInfo>("random_map_count")),
            read("maps", subdata::<Map>("random_map_count")),
            // technology effects
            read_export("effect_bundle_count", Primitive::U32),
            read_export("effect_bundles", subdata::<EffectBundle>("effect_bundle_count")),
        ]);

        if edition == GameEdition::Swgb {
            members.extend([
                read("unit_line_count", Primitive::U16),
                read("unit_lines", subdata::<UnitLine>("unit_line_count")),
            ]);
        }

        if !aoe1 {
            members.extend([
                read_export("unit_count", Primitive::U32),
                read_export("unit_headers", subdata::<UnitHeader>("unit_count")),
            ]);
        }

        members.extend([
            read_export("civ_count", Primitive::U16),
            read_export("civs", subdata::<Civ>("civ_count")),
        ]);
        if edition == GameEdition::Swgb {
            members.push(discard(Primitive::I8));
        }

        members.extend([
            read_export("research_count", Primitive::U16),
            read_export("researches", subdata::<Tech>("research_count")),
        ]);
        if edition == GameEdition::Swgb {
            members.push(discard(Primitive::I8));
        }

        if !aoe1 {
            members.extend(tech_tree(edition));
        }

        Ok(members)
    }
}

fn discard_blob(name: &'static str, element: Primitive, length: usize) -> FieldDescriptor {
    discard_named(name, int_array(element, length))
}

/// Kill statistics and the tech tree, absent for the first game.
fn tech_tree(edition: GameEdition) -> Vec<FieldDescriptor> {
    let mut members = vec![
        skip("time_slice", Primitive::I32),
        skip("unit_kill_rate", Primitive::I32),
        skip("unit_kill_total", Primitive::I32),
        skip("unit_hitpoint_rate", Primitive::I32),
        skip("unit_hitpoint_total", Primitive::I32),
        skip("razing_kill_rate", Primitive::I32),
        skip("razing_kill_total", Primitive::I32),
        read_export("age_connection_count", Primitive::U8),
        read_export("building_connection_count", Primitive::U8),
    ];

    let unit_connection_count = if edition == GameEdition::Swgb {
        Primitive::U16
    } else {
        Primitive::U8
    };

    members.extend([
        read_export("unit_connection_count", unit_connection_count),
        read_export("tech_connection_count", Primitive::U8),
        read_export("total_unit_tech_groups", Primitive::I32),
        read_export(
            "age_connections",
            subdata::<AgeTechTree>("age_connection_count"),
        ),
        read_export(
            "building_connections",
            subdata::<BuildingConnection>("building_connection_count"),
        ),
        read_export(
            "unit_connections",
            subdata::<UnitConnection>("unit_connection_count"),
        ),
        read_export(
            "tech_connections",
            subdata::<ResearchConnection>("tech_connection_count"),
        ),
    ]);
    members
}

/// Parent of [`EmpiresDat`].
///
/// Decoding starts here; the single `empiresdat` element is unwrapped by
/// the loader.
pub struct EmpiresDatWrapper;

impl Structure for EmpiresDatWrapper {
    const NAME: &'static str = "gamedata";
    const DESCRIPTION: &'static str = "wrapper for empires2_x1_p1.dat structure";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        require_layout(Self::NAME, version)?;
        Ok(vec![read_export(
            "empiresdat",
            subdata::<EmpiresDat>(1usize),
        )])
    }
}
