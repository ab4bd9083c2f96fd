//! Terrain, terrain restriction and terrain border structures.

use gamedata_format::descriptor::{
    discard, float_array, int_array, read, read_export, skip, subdata, text,
};
use gamedata_format::{FieldDescriptor, Primitive, Result, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::common::debug_string;

/// Units a terrain can place on itself.
const TERRAIN_UNITS: usize = 30;

/// Graphics of a unit walking over a terrain.
pub struct TerrainPassGraphic;

impl Structure for TerrainPassGraphic {
    const NAME: &'static str = "terrain_pass_graphic";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = vec![
            read("slp_id_exit_tile", Primitive::I32),
            read("slp_id_enter_tile", Primitive::I32),
            read("slp_id_walk_tile", Primitive::I32),
        ];

        if version.edition == GameEdition::Swgb {
            members.push(read("walk_sprite_rate", Primitive::F32));
        } else {
            members.push(read("replication_amount", Primitive::I32));
        }
        Ok(members)
    }
}

/// Per-terrain accessibility for one restriction class.
pub struct TerrainRestriction;

impl Structure for TerrainRestriction {
    const NAME: &'static str = "terrain_restriction";
    const DESCRIPTION: &'static str =
        "table of accessible terrains, used by units to check where they may go";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        // `terrain_count` is forwarded by the parent
        let mut members = vec![read(
            "accessible_dmgmultiplier",
            float_array(Primitive::F32, "terrain_count"),
        )];

        if !version.edition.is_aoe1_family() {
            members.push(read(
                "pass_graphics",
                subdata::<TerrainPassGraphic>("terrain_count"),
            ));
        }
        Ok(members)
    }
}

/// Sprite frame block of a terrain or border.
pub struct FrameData;

impl Structure for FrameData {
    const NAME: &'static str = "frame_data";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("frame_count", Primitive::I16),
            read_export("angle_count", Primitive::I16),
            read_export("shape_id", Primitive::I16),
        ])
    }
}

/// Width and height of one of the 19 tile shapes.
pub struct TileSize;

impl Structure for TileSize {
    const NAME: &'static str = "tile_size";
    const DESCRIPTION: &'static str = "size of one terrain tile type";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("width", Primitive::I16),
            read_export("height", Primitive::I16),
            read_export("delta_y", Primitive::I16),
        ])
    }
}

/// Animation state shared by terrains and terrain borders.
///
/// Never used as an array element; its members are spliced into the
/// including structure.
pub struct TerrainAnimation;

impl Structure for TerrainAnimation {
    const NAME: &'static str = "terrain_animation";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read("is_animated", Primitive::I8),
            read("animation_frame_count", Primitive::I16),
            read("pause_frame_count", Primitive::I16),
            read("interval", Primitive::F32),
            read("pause_between_loops", Primitive::F32),
            read("frame", Primitive::I16),
            read("draw_frame", Primitive::I16),
            read("animate_last", Primitive::F32),
            read("frame_changed", Primitive::I8),
            read("drawn", Primitive::I8),
        ])
    }
}

/// One terrain type.
pub struct Terrain;

impl Structure for Terrain {
    const NAME: &'static str = "terrain_type";
    const DESCRIPTION: &'static str = "describes a terrain type, like water, ice, etc.";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let edition = version.edition;
        let mut members = vec![
            read_export("enabled", Primitive::I8),
            read("random", Primitive::I8),
        ];

        if edition == GameEdition::Aoe2De {
            members.extend([
                read("is_water", Primitive::I8),
                skip("hide_in_editor", Primitive::I8),
                read("string_id", Primitive::I32),
            ]);
        }

        if edition.is_definitive() {
            members.extend(debug_string("internal_name_len_debug", "internal_name_len", "internal_name"));
            members.extend(debug_string("filename_len_debug", "filename_len", "filename"));
        } else if edition == GameEdition::Swgb {
            members.extend([
                read_export("internal_name", text(17usize)),
                read_export("filename", text(17usize)),
            ]);
        } else {
            members.extend([
                read_export("internal_name", text(13usize)),
                read_export("filename", text(13usize)),
            ]);
        }

        members.extend([
            read_export("slp_id", Primitive::I32),
            skip("shape_ptr", Primitive::I32),
            read_export("sound_id", Primitive::I32),
        ]);

        if edition == GameEdition::Aoe2De {
            members.extend([
                read_export("wwise_sound_id", Primitive::U32),
                read_export("wwise_sound_stop_id", Primitive::U32),
            ]);
        }

        if !edition.is_aoe1_family() {
            members.extend([
                read_export("blend_priority", Primitive::I32),
                read_export("blend_mode", Primitive::I32),
            ]);
        }

        if edition == GameEdition::Aoe2De {
            members.extend(debug_string(
                "overlay_mask_name_len_debug",
                "overlay_mask_name_len",
                "overlay_mask_name",
            ));
        }

        members.extend([
            read_export("map_color_hi", Primitive::U8),
            read_export("map_color_med", Primitive::U8),
            read_export("map_color_low", Primitive::U8),
            read_export("map_color_cliff_lt", Primitive::U8),
            read_export("map_color_cliff_rt", Primitive::U8),
            read_export("passable_terrain", Primitive::I8),
            read_export("impassable_terrain", Primitive::I8),
        ]);

        members.extend(TerrainAnimation::members(version)?);

        members.extend([
            read_export("elevation_graphics", subdata::<FrameData>(19usize)),
            read("terrain_replacement_id", Primitive::I16),
            read_export("terrain_to_draw0", Primitive::I16),
            read_export("terrain_to_draw1", Primitive::I16),
            read("terrain_unit_id", int_array(Primitive::I16, TERRAIN_UNITS)),
            read("terrain_unit_density", int_array(Primitive::I16, TERRAIN_UNITS)),
            // when placing two terrain units on the same spot, selects which one is drawn
            read("terrain_placement_flag", int_array(Primitive::I8, TERRAIN_UNITS)),
            read("terrain_units_used_count", Primitive::I16),
        ]);

        if edition != GameEdition::Swgb {
            members.push(discard(Primitive::I16));
        }

        Ok(members)
    }
}

/// Transition graphics between two terrains.
pub struct TerrainBorder;

impl Structure for TerrainBorder {
    const NAME: &'static str = "terrain_border";
    const DESCRIPTION: &'static str = "one inter-terraintile border definition";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = vec![
            read("enabled", Primitive::I8),
            read("random", Primitive::I8),
            read("internal_name", text(13usize)),
            read("filename", text(13usize)),
            read("slp_id", Primitive::I32),
            skip("shape_ptr", Primitive::I32),
            read("sound_id", Primitive::I32),
            read("color", int_array(Primitive::U8, 3usize)),
        ];

        members.extend(TerrainAnimation::members(version)?);

        members.extend([
            // 19 tile shapes in 12 variants each
            read("frames", subdata::<FrameData>(19usize * 12)),
            read("draw_tile", Primitive::I16),
            read("underlay_terrain", Primitive::I16),
            read("border_style", Primitive::I16),
        ]);
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedata_format::{StorageKind, StructRef, fingerprint};

    #[test]
    fn test_restriction_branches_on_edition() {
        let ror = TerrainRestriction::members(&GameVersion::new(GameEdition::Ror)).unwrap();
        let aoc = TerrainRestriction::members(&GameVersion::new(GameEdition::Aoc)).unwrap();
        assert_eq!(ror.len(), 1);
        assert_eq!(aoc.len(), 2);
        assert!(matches!(aoc[1].kind, StorageKind::ContainerArray(_)));
    }

    #[test]
    fn test_animation_is_spliced_into_terrain() {
        let version = GameVersion::new(GameEdition::Aoc);
        let members = StructRef::of::<Terrain>().members(&version).unwrap();
        assert!(members.iter().any(|m| m.name == Some("animate_last")));
        assert!(fingerprint(StructRef::of::<TerrainBorder>(), &version).is_ok());
    }
}
