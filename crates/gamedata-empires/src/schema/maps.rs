//! Random map generation settings.

use gamedata_format::descriptor::{id, read, read_export, skip, subdata};
use gamedata_format::{FieldDescriptor, Primitive, Result, Structure};
use gamedata_model::GameVersion;

/// Header fields shared by [`MapInfo`] and [`Map`].
fn map_header() -> Vec<FieldDescriptor> {
    vec![
        read_export("map_id", Primitive::I32),
        read_export("border_south_west", Primitive::I32),
        read_export("border_north_west", Primitive::I32),
        read_export("border_north_east", Primitive::I32),
        read_export("border_south_east", Primitive::I32),
        read_export("border_usage", Primitive::I32),
        read_export("water_shape", Primitive::I32),
        read_export("base_terrain", Primitive::I32),
        read_export("land_coverage", Primitive::I32),
        skip("unused_id", Primitive::I32),
    ]
}

/// Summary of one random map script.
pub struct MapInfo;

impl Structure for MapInfo {
    const NAME: &'static str = "map_header";
    const DESCRIPTION: &'static str = "random map information header";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = map_header();
        members.extend([
            read_export("base_zone_count", Primitive::U32),
            skip("base_zone_ptr", id(Primitive::I32)),
            read_export("map_terrain_count", Primitive::U32),
            skip("map_terrain_ptr", id(Primitive::I32)),
            read_export("map_unit_count", Primitive::U32),
            skip("map_unit_ptr", id(Primitive::I32)),
            read_export("map_elevation_count", Primitive::U32),
            skip("map_elevation_ptr", id(Primitive::I32)),
        ]);
        Ok(members)
    }
}

/// Player or free land zone.
pub struct MapLand;

impl Structure for MapLand {
    const NAME: &'static str = "map_land";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("land_id", Primitive::I32),
            read_export("terrain", Primitive::U8),
            skip("padding1", Primitive::I8),
            skip("padding2", Primitive::I16),
            read_export("land_spacing", Primitive::I32),
            read_export("base_size", Primitive::I32),
            read_export("zone", Primitive::I8),
            read_export("placement_type", Primitive::I8),
            skip("padding3", Primitive::I16),
            read_export("base_x", Primitive::I32),
            read_export("base_y", Primitive::I32),
            read_export("land_proportion", Primitive::I8),
            read_export("by_player_flag", Primitive::I8),
            skip("padding4", Primitive::I16),
            read_export("start_area_radius", Primitive::I32),
            read_export("terrain_edge_fade", Primitive::I32),
            read_export("clumpiness", Primitive::I32),
        ])
    }
}

pub struct MapTerrain;

impl Structure for MapTerrain {
    const NAME: &'static str = "map_terrain";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("proportion", Primitive::I32),
            read_export("terrain", Primitive::I32),
            read_export("number_of_clumps", Primitive::I32),
            read_export("edge_spacing", Primitive::I32),
            read_export("placement_zone", Primitive::I32),
            read_export("clumpiness", Primitive::I32),
        ])
    }
}

/// Objects placed by a random map.
pub struct MapUnit;

impl Structure for MapUnit {
    const NAME: &'static str = "map_unit";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("unit", Primitive::I32),
            read_export("host_terrain", Primitive::I32),
            read_export("group_placing", Primitive::I8),
            read_export("scale_flag", Primitive::I8),
            skip("padding1", Primitive::I16),
            read_export("objects_per_group", Primitive::I32),
            read_export("fluctuation", Primitive::I32),
            read_export("groups_per_player", Primitive::I32),
            read_export("group_radius", Primitive::I32),
            read_export("own_at_start", Primitive::I32),
            read_export("set_place_for_all_players", Primitive::I32),
            read_export("min_distance_to_players", Primitive::I32),
            read_export("max_distance_to_players", Primitive::I32),
        ])
    }
}

pub struct MapElevation;

impl Structure for MapElevation {
    const NAME: &'static str = "map_elevation";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("proportion", Primitive::I32),
            read_export("terrain", Primitive::I32),
            read_export("clump_count", Primitive::I32),
            read_export("base_terrain", Primitive::I32),
            read_export("base_elevation", Primitive::I32),
            read_export("tile_spacing", Primitive::I32),
        ])
    }
}

/// Full random map definition.
pub struct Map;

impl Structure for Map {
    const NAME: &'static str = "map";
    const DESCRIPTION: &'static str = "random map information data";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = map_header();
        members.extend([
            read_export("base_zone_count", Primitive::U32),
            skip("base_zone_ptr", id(Primitive::I32)),
            read_export("base_zones", subdata::<MapLand>("base_zone_count")),
            read_export("map_terrain_count", Primitive::U32),
            skip("map_terrain_ptr", id(Primitive::I32)),
            read_export("map_terrains", subdata::<MapTerrain>("map_terrain_count")),
            read_export("map_unit_count", Primitive::U32),
            skip("map_unit_ptr", id(Primitive::I32)),
            read_export("map_units", subdata::<MapUnit>("map_unit_count")),
            read_export("map_elevation_count", Primitive::U32),
            skip("map_elevation_ptr", id(Primitive::I32)),
            read_export(
                "map_elevations",
                subdata::<MapElevation>("map_elevation_count"),
            ),
        ]);
        Ok(members)
    }
}
