//! Technology effects and the tech tree.

use gamedata_format::descriptor::{int_array, read, read_export, subdata, text};
use gamedata_format::{FieldDescriptor, LengthSource, Primitive, Result, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::common::debug_string_export;

/// Single attribute modification.
pub struct Effect;

impl Structure for Effect {
    const NAME: &'static str = "tech_effect";
    const DESCRIPTION: &'static str = "applied effect for a research technology";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("type_id", Primitive::I8),
            read_export("attr_a", Primitive::I16),
            read_export("attr_b", Primitive::I16),
            read_export("attr_c", Primitive::I16),
            read_export("attr_d", Primitive::F32),
        ])
    }
}

/// Named list of effects applied together.
pub struct EffectBundle;

impl Structure for EffectBundle {
    const NAME: &'static str = "effect_bundle";
    const DESCRIPTION: &'static str = "a bundle of effects";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = Vec::new();
        if version.edition == GameEdition::Aoe2De {
            members.extend(debug_string_export("name_len_debug", "name_len", "name"));
        } else {
            members.push(read_export("name", text(31usize)));
        }
        members.extend([
            read_export("effect_count", Primitive::U16),
            read_export("effects", subdata::<Effect>("effect_count")),
        ]);
        Ok(members)
    }
}

/// Kind of a tech tree connection slot.
pub struct OtherConnection;

impl Structure for OtherConnection {
    const NAME: &'static str = "other_connection";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        // 0 = age, 1 = building, 2 = unit, 3 = research
        Ok(vec![read_export("other_connection", Primitive::I32)])
    }
}

/// Connection slots per tech tree node.
const fn slot_count(edition: GameEdition) -> usize {
    match edition {
        GameEdition::Swgb => 20,
        GameEdition::Ror
        | GameEdition::Aok
        | GameEdition::Aoc
        | GameEdition::HdEdition
        | GameEdition::Aoe1De
        | GameEdition::Aoe2De => 10,
    }
}

/// Entries per id list in editions with fixed-size lists.
const ID_LIST_LEN: usize = 40;

/// `<count>` byte followed by an int32 id list.
///
/// Older editions always store [`ID_LIST_LEN`] ids of which the first
/// `<count>` are used; the definitive editions store exactly `<count>`.
fn id_list(
    version: &GameVersion,
    count: &'static str,
    list: &'static str,
) -> [FieldDescriptor; 2] {
    let length = if version.edition.is_definitive() {
        LengthSource::Field(count)
    } else {
        LengthSource::Literal(ID_LIST_LEN)
    };
    [
        read_export(count, Primitive::I8),
        read_export(list, int_array(Primitive::I32, length)),
    ]
}

fn common_header() -> [FieldDescriptor; 2] {
    [
        read_export("id", Primitive::I32),
        // 2 = available, 3 = researched
        read_export("status", Primitive::I8),
    ]
}

/// Buildings, units and researches depending on a node.
fn dependents(version: &GameVersion) -> Vec<FieldDescriptor> {
    let mut members = Vec::with_capacity(6);
    members.extend(id_list(version, "building_count", "buildings"));
    members.extend(id_list(version, "unit_count", "units"));
    members.extend(id_list(version, "research_count", "researches"));
    members
}

/// Links from a node to other tech tree nodes.
fn connections(version: &GameVersion) -> Vec<FieldDescriptor> {
    let slots = slot_count(version.edition);
    vec![
        read_export("connected_slots_used", Primitive::I32),
        read_export("other_connected_ids", int_array(Primitive::I32, slots)),
        read_export("other_connections", subdata::<OtherConnection>(slots)),
    ]
}

/// Tech tree node of an age.
pub struct AgeTechTree;

impl Structure for AgeTechTree {
    const NAME: &'static str = "age_tech_tree";
    const DESCRIPTION: &'static str = "items available when this age was reached";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let slots = slot_count(version.edition);
        let mut members = common_header().to_vec();
        members.extend(dependents(version));
        members.extend(connections(version));
        members.extend([
            read_export("building_level_count", Primitive::I8),
            read_export("buildings_per_zone", int_array(Primitive::I8, slots)),
            read_export("group_length_per_zone", int_array(Primitive::I8, slots)),
            read_export("max_age_length", Primitive::I8),
            // 1 = age
            read_export("line_mode", Primitive::I32),
        ]);
        Ok(members)
    }
}

/// Tech tree node of a building.
pub struct BuildingConnection;

impl Structure for BuildingConnection {
    const NAME: &'static str = "building_connection";
    const DESCRIPTION: &'static str = "new available buildings/units/researches when this building was created";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = common_header().to_vec();
        members.extend(dependents(version));
        members.extend(connections(version));
        members.extend([
            read_export("location_in_age", Primitive::I8),
            read_export("unit_techs_total", int_array(Primitive::I8, 5usize)),
            read_export("unit_techs_first", int_array(Primitive::I8, 5usize)),
            // 5 = building
            read_export("line_mode", Primitive::I32),
            read_export("enabling_research", Primitive::I32),
        ]);
        Ok(members)
    }
}

/// Tech tree node of a unit.
pub struct UnitConnection;

impl Structure for UnitConnection {
    const NAME: &'static str = "unit_connection";
    const DESCRIPTION: &'static str = "unit updates to apply when activating the technology";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = common_header().to_vec();
        members.push(read_export("upper_building", Primitive::I32));
        members.extend(connections(version));
        members.push(read_export("vertical_line", Primitive::I32));
        members.extend(id_list(version, "unit_count", "units"));
        members.extend([
            read_export("location_in_age", Primitive::I32),
            read_export("required_research", Primitive::I32),
            // 2 = first unit in line, 3 = following units
            read_export("line_mode", Primitive::I32),
            read_export("enabling_research", Primitive::I32),
        ]);
        Ok(members)
    }
}

/// Tech tree node of a research.
pub struct ResearchConnection;

impl Structure for ResearchConnection {
    const NAME: &'static str = "research_connection";
    const DESCRIPTION: &'static str = "research updates to apply when activating the technology";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = common_header().to_vec();
        members.push(read_export("upper_building", Primitive::I32));
        members.extend(dependents(version));
        members.extend(connections(version));
        members.extend([
            read_export("vertical_line", Primitive::I32),
            read_export("location_in_age", Primitive::I32),
            // 0 = first age, else other ages
            read_export("line_mode", Primitive::I32),
        ]);
        Ok(members)
    }
}
