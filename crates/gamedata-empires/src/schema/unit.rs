//! Unit structures.
//!
//! Unit types form a hierarchy in the game. Each level here extends the
//! member list of its parent level:
//!
//! ```text
//! 10 eye candy, 90 tree
//!  └ 20 flag
//!     └ 25 doppelganger
//!        └ 30 dead/fish
//!           └ 40 bird
//!              └ 50 projectile base
//!                 ├ 60 missile
//!                 └ 70 living
//!                    └ 80 building
//! ```
//!
//! Civilisation unit lists pick the level per element from the leading
//! `type` byte, see [`UNIT_TYPES`].

use gamedata_format::descriptor::{
    float_array, int_array, read, read_export, skip, subdata, text,
};
use gamedata_format::{FieldDescriptor, Primitive, Result, StructRef, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::common::debug_string_export;

/// One ability of a unit: gather, attack, build, ...
pub struct UnitCommand;

impl Structure for UnitCommand {
    const NAME: &'static str = "unit_command";
    const DESCRIPTION: &'static str = "a command a single unit may receive by script or human";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = vec![
            // always 1
            read("command_used", Primitive::I16),
            read_export("id", Primitive::I16),
            skip("is_default", Primitive::I8),
            read_export("type", Primitive::I16),
            read_export("class_id", Primitive::I16),
            read_export("unit_id", Primitive::I16),
            read_export("terrain_id", Primitive::I16),
            read_export("resource_in", Primitive::I16),
            // resource that multiplies the amount you can gather
            read_export("resource_multiplier", Primitive::I16),
            read_export("resource_out", Primitive::I16),
            read_export("unused_resource", Primitive::I16),
            read_export("work_value1", Primitive::F32),
            read_export("work_value2", Primitive::F32),
            read_export("work_range", Primitive::F32),
            read_export("search_mode", Primitive::I8),
            read_export("search_time", Primitive::F32),
            read_export("enable_targeting", Primitive::I8),
            read_export("combat_level_flag", Primitive::I8),
            read_export("gather_type", Primitive::I16),
            read_export("work_mode2", Primitive::I16),
            read_export("owner_type", Primitive::I8),
            // checks if the unit carries resources
            read_export("carry_check", Primitive::I8),
            read_export("state_build", Primitive::I8),
            // walking with tool but no resource
            read_export("move_sprite_id", Primitive::I16),
            // proceeding resource gathering or attack
            read_export("proceed_sprite_id", Primitive::I16),
            // actual execution or transformation graphic
            read_export("work_sprite_id", Primitive::I16),
            // display resources in hands
            read_export("carry_sprite_id", Primitive::I16),
            read_export("resource_gather_sound_id", Primitive::I16),
            read_export("resource_deposit_sound_id", Primitive::I16),
        ];

        if version.edition == GameEdition::Aoe2De {
            members.extend([
                read_export("wwise_resource_gather_sound_id", Primitive::U32),
                read_export("wwise_resource_deposit_sound_id", Primitive::U32),
            ]);
        }
        Ok(members)
    }
}

/// Command list of a unit header that exists.
pub struct UnitCommandList;

impl Structure for UnitCommandList {
    const NAME: &'static str = "unit_command_list";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read("unit_command_count", Primitive::U16),
            read_export("unit_commands", subdata::<UnitCommand>("unit_command_count")),
        ])
    }
}

/// Commands shared by all units with the same id.
pub struct UnitHeader;

impl Structure for UnitHeader {
    const NAME: &'static str = "unit_header";
    const DESCRIPTION: &'static str = "stores a bunch of unit commands";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        // Headers of unused unit ids are the single `exists` byte; the
        // flag doubles as the count of the command list block.
        Ok(vec![
            read("exists", Primitive::U8),
            read_export("command_list", subdata::<UnitCommandList>("exists")),
        ])
    }
}

/// Named group of unit ids (Star Wars: Galactic Battlegrounds only).
pub struct UnitLine;

impl Structure for UnitLine {
    const NAME: &'static str = "unit_line";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("id", Primitive::I16),
            read_export("name_length", Primitive::U16),
            read_export("name", text("name_length")),
            read_export("unit_ids_count", Primitive::U16),
            read_export("unit_ids", int_array(Primitive::I16, "unit_ids_count")),
        ])
    }
}

/// Resource a unit provides or stores.
pub struct ResourceStorage;

impl Structure for ResourceStorage {
    const NAME: &'static str = "resource_storage";
    const DESCRIPTION: &'static str = "determines the resource storage capacity for one unit mode";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read("type", Primitive::I16),
            read("amount", Primitive::F32),
            // 0 = decayable, 1 = stored after death, 2 = kept on conversion
            read("used_mode", Primitive::I8),
        ])
    }
}

/// Overlay shown below a hit point threshold.
pub struct DamageGraphic;

impl Structure for DamageGraphic {
    const NAME: &'static str = "damage_graphic";
    const DESCRIPTION: &'static str = "stores one possible unit image that is displayed at a given damage percentage";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("graphic_id", Primitive::I16),
            read_export("damage_percent", Primitive::I8),
            // gets overwritten in aoe memory by the real apply_mode
            skip("old_apply_mode", Primitive::I8),
            read_export("apply_mode", Primitive::I8),
        ])
    }
}

/// Attack or armor value against one armor class.
pub struct HitType;

impl Structure for HitType {
    const NAME: &'static str = "hit_type";
    const DESCRIPTION: &'static str = "stores attack amount for a damage type";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read("type_id", Primitive::I16),
            read("amount", Primitive::I16),
        ])
    }
}

pub struct ResourceCost;

impl Structure for ResourceCost {
    const NAME: &'static str = "resource_cost";
    const DESCRIPTION: &'static str = "stores cost for one resource for creating the unit";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read("type_id", Primitive::I16),
            read("amount", Primitive::I16),
            read("enabled", Primitive::I16),
        ])
    }
}

/// Sub-building placed together with a building.
pub struct BuildingAnnex;

impl Structure for BuildingAnnex {
    const NAME: &'static str = "building_annex";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("unit_id", Primitive::I16),
            read_export("misplaced0", Primitive::F32),
            read_export("misplaced1", Primitive::F32),
        ])
    }
}

/// Type 10: base of all units.
pub struct UnitObject;

impl UnitObject {
    fn base_members(version: &GameVersion) -> Vec<FieldDescriptor> {
        let edition = version.edition;
        let aoe1 = edition.is_aoe1_family();

        let mut members = vec![read_export("type", Primitive::I8)];
        if edition.is_definitive() {
            members.extend(debug_string_export("name_len_debug", "name_length", "name"));
        } else {
            // the name itself is stored further down
            members.push(read("name_length", Primitive::U16));
        }

        members.extend([
            read_export("id0", Primitive::I16),
            read_export("language_dll_name", Primitive::U16),
            read_export("language_dll_creation", Primitive::U16),
            read_export("unit_class", Primitive::I16),
            read_export("idle_graphic0", Primitive::I16),
        ]);
        if !aoe1 {
            members.push(read_export("idle_graphic1", Primitive::I16));
        }
        members.extend([
            read_export("dying_graphic", Primitive::I16),
            read_export("undead_graphic", Primitive::I16),
            // 1 = become `dead_unit_id` after death
            read_export("undead_mode", Primitive::I8),
            read_export("hit_points", Primitive::I16),
            read_export("line_of_sight", Primitive::F32),
            read_export("garrison_capacity", Primitive::I8),
            read_export("radius_x", Primitive::F32),
            read_export("radius_y", Primitive::F32),
            read_export("radius_z", Primitive::F32),
            read_export("train_sound_id", Primitive::I16),
        ]);
        if !aoe1 {
            members.push(read_export("damage_sound_id", Primitive::I16));
        }
        if edition == GameEdition::Aoe2De {
            members.extend([
                read_export("wwise_train_sound_id", Primitive::U32),
                read_export("wwise_damage_sound_id", Primitive::U32),
            ]);
        }
        members.extend([
            // unit id to become on death
            read_export("dead_unit_id", Primitive::I16),
        ]);
        if edition.is_definitive() {
            members.push(read_export("blood_unit_id", Primitive::I16));
        }
        members.extend([
            read_export("placement_mode", Primitive::I8),
            read_export("can_be_built_on", Primitive::I8),
            read_export("icon_id", Primitive::I16),
            skip("hidden_in_editor", Primitive::I8),
            skip("old_portrait_icon_id", Primitive::I16),
            read_export("enabled", Primitive::I8),
        ]);
        if !aoe1 {
            members.push(read_export("disabled", Primitive::I8));
        }
        members.extend([
            read_export("placement_side_terrain0", Primitive::I16),
            read_export("placement_side_terrain1", Primitive::I16),
            read_export("placement_terrain0", Primitive::I16),
            read_export("placement_terrain1", Primitive::I16),
            read_export("clearance_size_x", Primitive::F32),
            read_export("clearance_size_y", Primitive::F32),
            read_export("elevation_mode", Primitive::I8),
            read_export("visible_in_fog", Primitive::I8),
            read_export("terrain_restriction", Primitive::I16),
            read_export("fly_mode", Primitive::I8),
            read_export("resource_capacity", Primitive::I16),
            read_export("resource_decay", Primitive::F32),
            read_export("blast_defense_level", Primitive::I8),
            read_export("combat_level", Primitive::I8),
            read_export("interaction_mode", Primitive::I8),
            read_export("map_draw_level", Primitive::I8),
            read_export("unit_level", Primitive::I8),
            read_export("attack_reaction", Primitive::F32),
            read_export("minimap_color", Primitive::I8),
            read_export("language_dll_help", Primitive::I32),
            read_export("language_dll_hotkey_text", Primitive::I32),
            read_export("hot_keys", Primitive::I32),
            skip("recyclable", Primitive::I8),
            skip("enable_auto_gather", Primitive::I8),
            skip("doppelgaenger_on_death", Primitive::I8),
            skip("resource_gather_drop", Primitive::I8),
        ]);
        if !aoe1 {
            members.extend([
                read_export("occlusion_mode", Primitive::U8),
                read_export("obstruction_type", Primitive::I8),
                read_export("obstruction_class", Primitive::I8),
                read_export("trait", Primitive::U8),
                read_export("civilization_id", Primitive::I8),
                read_export("attribute_piece", Primitive::I16),
            ]);
        }
        members.extend([
            read_export("selection_effect", Primitive::I8),
            read_export("editor_selection_color", Primitive::U8),
            read_export("selection_shape_x", Primitive::F32),
            read_export("selection_shape_y", Primitive::F32),
            read_export("selection_shape_z", Primitive::F32),
            read_export("resource_storage", subdata::<ResourceStorage>(3usize)),
            read("damage_graphic_count", Primitive::I8),
            read_export("damage_graphics", subdata::<DamageGraphic>("damage_graphic_count")),
            read_export("sound_selection", Primitive::I16),
            read_export("sound_dying", Primitive::I16),
        ]);
        if edition == GameEdition::Aoe2De {
            members.extend([
                read_export("wwise_sound_selection", Primitive::U32),
                read_export("wwise_sound_dying", Primitive::U32),
            ]);
        }
        members.extend([
            read_export("old_attack_mode", Primitive::I8),
            skip("convert_terrain", Primitive::I8),
        ]);
        if !edition.is_definitive() {
            members.push(read_export("name", text("name_length")));
        }
        if edition == GameEdition::Swgb {
            members.extend([
                read("name2_length", Primitive::U16),
                read_export("name2", text("name2_length")),
                read_export("unit_line", Primitive::I16),
                read_export("min_tech_level", Primitive::I8),
            ]);
        }
        members.push(read_export("id1", Primitive::I16));
        if !aoe1 {
            members.push(read_export("id2", Primitive::I16));
        }
        members
    }
}

impl Structure for UnitObject {
    const NAME: &'static str = "unit_object";
    const DESCRIPTION: &'static str = "base properties for all units";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(Self::base_members(version))
    }
}

/// Type 90: trees, same layout as eye candy.
pub struct TreeUnit;

impl Structure for TreeUnit {
    const NAME: &'static str = "tree_unit";
    const DESCRIPTION: &'static str = "just a tree unit";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        UnitObject::members(version)
    }
}

/// Type 20: flags and other animated eye candy.
pub struct AnimatedUnit;

impl Structure for AnimatedUnit {
    const NAME: &'static str = "animated_unit";
    const DESCRIPTION: &'static str = "adds speed property to units";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = UnitObject::members(version)?;
        members.push(read_export("speed", Primitive::F32));
        Ok(members)
    }
}

/// Type 25: copies of a unit shown after death.
pub struct DoppelgangerUnit;

impl Structure for DoppelgangerUnit {
    const NAME: &'static str = "doppelganger_unit";
    const DESCRIPTION: &'static str = "weird doppelganger unit thats actually the same as an animated unit";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        AnimatedUnit::members(version)
    }
}

/// Type 30: dead units and fish.
pub struct MovingUnit;

impl Structure for MovingUnit {
    const NAME: &'static str = "moving_unit";
    const DESCRIPTION: &'static str = "adds walking graphics, rotations and tracking properties to units";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = DoppelgangerUnit::members(version)?;
        members.extend([
            read_export("move_graphics", Primitive::I16),
            read_export("run_graphics", Primitive::I16),
            read_export("turn_speed", Primitive::F32),
            skip("old_size_class", Primitive::I8),
            // unit id for the ground traces
            read_export("trail_unit_id", Primitive::I16),
            // ground traces: -1: no tracking present, 2: projectiles with tracking unit
            read_export("trail_opsions", Primitive::U8),
            read_export("trail_spacing", Primitive::F32),
            skip("old_move_algorithm", Primitive::I8),
        ]);
        if !version.edition.is_aoe1_family() {
            members.extend([
                read_export("turn_radius", Primitive::F32),
                read_export("turn_radius_speed", Primitive::F32),
                read_export("max_yaw_per_sec_moving", Primitive::F32),
                read_export("stationary_yaw_revolution_time", Primitive::F32),
                read_export("max_yaw_per_sec_stationary", Primitive::F32),
            ]);
        }
        Ok(members)
    }
}

/// Type 40: birds and other units that act on their own.
pub struct ActionUnit;

impl Structure for ActionUnit {
    const NAME: &'static str = "action_unit";
    const DESCRIPTION: &'static str = "adds search radius and work properties, as well as movement sounds";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = MovingUnit::members(version)?;
        members.extend([
            // callback unit action id when found.
            read_export("default_task_id", Primitive::I16),
            read_export("search_radius", Primitive::F32),
            read_export("work_rate", Primitive::F32),
            read_export("drop_site0", Primitive::I16),
            read_export("drop_site1", Primitive::I16),
            read_export("task_by_group", Primitive::I8),
            read_export("command_sound_id", Primitive::I16),
            read_export("stop_sound_id", Primitive::I16),
            read_export("run_pattern", Primitive::I8),
        ]);
        if version.edition == GameEdition::Aoe2De {
            members.extend([
                read_export("wwise_command_sound_id", Primitive::U32),
                read_export("wwise_stop_sound_id", Primitive::U32),
            ]);
        }
        // commands moved to the unit headers with the second game
        if version.edition.is_aoe1_family() {
            members.extend([
                read("unit_command_count", Primitive::U16),
                read_export("unit_commands", subdata::<UnitCommand>("unit_command_count")),
            ]);
        }
        Ok(members)
    }
}

/// Type 50: base of all units that fight.
pub struct ProjectileUnit;

impl Structure for ProjectileUnit {
    const NAME: &'static str = "projectile_unit";
    const DESCRIPTION: &'static str = "adds attack and armor properties to units";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = ActionUnit::members(version)?;

        if version.edition.is_aoe1_family() {
            members.push(read_export("default_armor", Primitive::U8));
        } else {
            members.push(read_export("default_armor", Primitive::I16));
        }

        members.extend([
            read("attack_count", Primitive::U16),
            read_export("attacks", subdata::<HitType>("attack_count")),
            read("armor_count", Primitive::U16),
            read_export("armors", subdata::<HitType>("armor_count")),
            read_export("boundary_id", Primitive::I16),
            read_export("weapon_range_max", Primitive::F32),
            read_export("blast_range", Primitive::F32),
            // time between two attacks
            read_export("attack_speed", Primitive::F32),
            read_export("attack_projectile_primary_unit_id", Primitive::I16),
            read_export("accuracy", Primitive::I16),
            read_export("break_off_combat", Primitive::I8),
            read_export("frame_delay", Primitive::I16),
            read_export("weapon_offset", float_array(Primitive::F32, 3usize)),
            read_export("blast_level_offence", Primitive::I8),
            read_export("weapon_range_min", Primitive::F32),
        ]);
        if !version.edition.is_aoe1_family() {
            members.push(read_export("accuracy_dispersion", Primitive::F32));
        }
        members.extend([
            read_export("attack_sprite_id", Primitive::I16),
            read_export("melee_armor_displayed", Primitive::I16),
            read_export("attack_displayed", Primitive::I16),
            read_export("range_displayed", Primitive::F32),
            read_export("reload_time_displayed", Primitive::F32),
        ]);
        Ok(members)
    }
}

/// Type 60: arrows, bolts and other missiles.
pub struct MissileUnit;

impl Structure for MissileUnit {
    const NAME: &'static str = "missile_unit";
    const DESCRIPTION: &'static str = "adds missile specific unit properties";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = ProjectileUnit::members(version)?;
        members.extend([
            // 0 = default; 1 = projectile falls vertically to the bottom of the map; 3 = teleporting projectiles
            read_export("projectile_type", Primitive::I8),
            read_export("smart_mode", Primitive::I8),
            read_export("drop_animation_mode", Primitive::I8),
            // 1 = disappear on hit
            read_export("penetration_mode", Primitive::I8),
            read_export("area_of_effect_special", Primitive::I8),
            read_export("projectile_arc", Primitive::F32),
        ]);
        Ok(members)
    }
}

/// Type 70: trainable units.
pub struct LivingUnit;

impl Structure for LivingUnit {
    const NAME: &'static str = "living_unit";
    const DESCRIPTION: &'static str = "adds creation location and garrison unit properties";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let edition = version.edition;
        let mut members = ProjectileUnit::members(version)?;
        members.extend([
            read_export("resource_cost", subdata::<ResourceCost>(3usize)),
            read_export("creation_time", Primitive::I16),
            // e.g. 118 = villager builder
            read_export("train_location_id", Primitive::I16),
            read_export("creation_button_id", Primitive::I8),
        ]);
        if !edition.is_aoe1_family() {
            members.extend([
                read_export("rear_attack_modifier", Primitive::F32),
                read_export("flank_attack_modifier", Primitive::F32),
                read_export("creatable_type", Primitive::I8),
                // if building: "others" tab in editor, if living unit: "heroes" tab
                read_export("hero_mode", Primitive::I8),
                read_export("garrison_graphic", Primitive::I32),
            ]);
            if edition.is_definitive() {
                members.extend([
                    read_export("spawn_graphic_id", Primitive::I16),
                    read_export("upgrade_graphic_id", Primitive::I16),
                ]);
            }
            members.extend([
                read_export("attack_projectile_count", Primitive::F32),
                read_export("attack_projectile_max_count", Primitive::I8),
                read_export("attack_projectile_spawning_area_width", Primitive::F32),
                read_export("attack_projectile_spawning_area_length", Primitive::F32),
                // place the spawned projectile randomly in the box (1) or on a line (0)
                read_export("attack_projectile_spawning_area_randomness", Primitive::F32),
                read_export("attack_projectile_secondary_unit_id", Primitive::I32),
                read_export("special_graphic_id", Primitive::I32),
                read_export("special_activation", Primitive::I8),
            ]);
        }
        members.push(read_export("pierce_armor_displayed", Primitive::I16));
        Ok(members)
    }
}

/// Type 80: buildings.
pub struct BuildingUnit;

impl Structure for BuildingUnit {
    const NAME: &'static str = "building_unit";
    const DESCRIPTION: &'static str = "construction graphics and garrison building properties for units";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let edition = version.edition;
        let aoe1 = edition.is_aoe1_family();
        let mut members = LivingUnit::members(version)?;

        members.push(read_export("construction_graphic_id", Primitive::I16));
        if !aoe1 {
            members.push(read_export("snow_graphic_id", Primitive::I16));
        }
        if edition.is_definitive() {
            members.push(read_export("destruction_graphic_id", Primitive::I16));
        }
        members.extend([
            // 1 = adjacent units may change the graphics
            read_export("adjacent_mode", Primitive::I8),
            read_export("graphics_angle", Primitive::I16),
            read_export("disappears_when_built", Primitive::I8),
            // second building to place directly on top
            read_export("stack_unit_id", Primitive::I16),
            // change underlying terrain to this id when building completed
            read_export("foundation_terrain_id", Primitive::I16),
            // deprecated terrain-like structures knowns as "Overlays" from alpha AOE used for roads
            skip("old_overlay_id", Primitive::I16),
            // research_id to be enabled when building creation
            read_export("research_id", Primitive::I16),
        ]);
        if !aoe1 {
            members.extend([
                read_export("can_burn", Primitive::I8),
                read_export("building_annex", subdata::<BuildingAnnex>(4usize)),
                // building at which an annex building is attached to
                read_export("head_unit_id", Primitive::I16),
                // destination unit id when unit shall transform (e.g. unpack)
                read_export("transform_unit_id", Primitive::I16),
                read_export("transform_sound_id", Primitive::I16),
            ]);
        }
        members.push(read_export("construction_sound_id", Primitive::I16));
        if edition == GameEdition::Aoe2De {
            members.extend([
                read_export("wwise_transform_sound_id", Primitive::U32),
                read_export("wwise_construction_sound_id", Primitive::U32),
            ]);
        }
        if !aoe1 {
            members.extend([
                read_export("garrison_type", Primitive::I8),
                read_export("garrison_heal_rate", Primitive::F32),
                read_export("garrison_repair_rate", Primitive::F32),
                // id of the unit used for salvages
                read_export("salvage_unit_id", Primitive::I16),
                // list of attributes for salvages (looting table)
                read_export("salvage_attributes", int_array(Primitive::I8, 6usize)),
            ]);
        }
        Ok(members)
    }
}

/// Unit structure per `type` discriminator value.
pub static UNIT_TYPES: &[(i64, StructRef)] = &[
    (10, StructRef::of::<UnitObject>()),
    (20, StructRef::of::<AnimatedUnit>()),
    (25, StructRef::of::<DoppelgangerUnit>()),
    (30, StructRef::of::<MovingUnit>()),
    (40, StructRef::of::<ActionUnit>()),
    (50, StructRef::of::<ProjectileUnit>()),
    (60, StructRef::of::<MissileUnit>()),
    (70, StructRef::of::<LivingUnit>()),
    (80, StructRef::of::<BuildingUnit>()),
    (90, StructRef::of::<TreeUnit>()),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn names(structure: StructRef, edition: GameEdition) -> Vec<&'static str> {
        structure
            .members(&GameVersion::new(edition))
            .unwrap()
            .iter()
            .map(FieldDescriptor::display_name)
            .collect()
    }

    #[test]
    fn test_each_level_extends_its_parent() {
        for edition in [GameEdition::Ror, GameEdition::Aoc, GameEdition::Swgb, GameEdition::Aoe2De] {
            let mut previous: Vec<&str> = Vec::new();
            for &(_, structure) in &UNIT_TYPES[..6] {
                let current = names(structure, edition);
                assert!(current.starts_with(&previous), "{} on {edition}", structure.name());
                previous = current;
            }
            let building = names(StructRef::of::<BuildingUnit>(), edition);
            assert!(building.starts_with(&names(StructRef::of::<LivingUnit>(), edition)));
        }
    }

    #[test]
    fn test_commands_live_in_units_only_for_aoe1() {
        let ror = names(StructRef::of::<ActionUnit>(), GameEdition::Ror);
        let aoc = names(StructRef::of::<ActionUnit>(), GameEdition::Aoc);
        assert!(ror.contains(&"unit_commands"));
        assert!(!aoc.contains(&"unit_commands"));
    }

    #[test]
    fn test_discriminator_values_are_unique() {
        let mut keys: Vec<i64> = UNIT_TYPES.iter().map(|(key, _)| *key).collect();
        keys.dedup();
        assert_eq!(keys.len(), UNIT_TYPES.len());
    }
}
