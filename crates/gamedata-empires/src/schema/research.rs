//! Researchable technologies.

use gamedata_format::descriptor::{int_array, read, read_export, subdata, text};
use gamedata_format::{FieldDescriptor, Primitive, Result, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::common::debug_string_export;

pub struct ResearchResourceCost;

impl Structure for ResearchResourceCost {
    const NAME: &'static str = "research_resource_cost";
    const DESCRIPTION: &'static str = "amount of a resource type that a research costs";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("type_id", Primitive::I16),
            read_export("amount", Primitive::I16),
            read_export("enabled", Primitive::I8),
        ])
    }
}

/// One technology.
pub struct Tech;

impl Structure for Tech {
    const NAME: &'static str = "research";
    const DESCRIPTION: &'static str = "one researchable technology";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let edition = version.edition;
        let aoe1 = edition.is_aoe1_family();
        let required: usize = if aoe1 { 4 } else { 6 };

        let mut members = vec![
            // -1 = unused slot
            read_export("required_techs", int_array(Primitive::I16, required)),
            read_export(
                "research_resource_costs",
                subdata::<ResearchResourceCost>(3usize),
            ),
            read_export("required_tech_count", Primitive::I16),
        ];
        if !aoe1 {
            members.extend([
                read_export("civilization_id", Primitive::I16),
                read_export("full_tech_mode", Primitive::I16),
            ]);
        }
        members.extend([
            read_export("research_location_id", Primitive::I16),
            read_export("language_dll_name", Primitive::U16),
            read_export("language_dll_description", Primitive::U16),
            read_export("research_time", Primitive::I16),
            read_export("tech_effect_id", Primitive::I16),
            read_export("tech_type", Primitive::I16),
            read_export("icon_id", Primitive::I16),
            read_export("button_id", Primitive::I8),
            read_export("language_dll_help", Primitive::I32),
            read_export("language_dll_techtree", Primitive::I32),
            read_export("hotkey", Primitive::I32),
        ]);

        if edition.is_definitive() {
            members.extend(debug_string_export("name_len_debug", "name_length", "name"));
        } else {
            members.extend([
                read("name_length", Primitive::U16),
                read_export("name", text("name_length")),
            ]);
        }
        if edition == GameEdition::Swgb {
            members.extend([
                read("name2_length", Primitive::U16),
                read_export("name2", text("name2_length")),
            ]);
        }
        if edition == GameEdition::Aoe2De {
            members.push(read_export("repeatable", Primitive::I8));
        }
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedata_format::{Args, Decoder, StructRef, Value, Writer};

    #[test]
    fn test_ror_research_decodes() {
        let mut writer = Writer::new();
        for _ in 0..4 {
            writer.write_i16(-1);
        }
        for _ in 0..3 {
            writer.write_i16(0);
            writer.write_i16(50);
            writer.write_i8(1);
        }
        writer.write_i16(0);
        writer.write_zeros(2 * 7 + 1 + 4 * 3);
        writer.write_u16(9);
        writer.write_text("Wheel", 9);
        let data = writer.into_bytes();

        let mut decoder = Decoder::new(GameVersion::new(GameEdition::Ror));
        let (end, node) = decoder
            .decode(&data, 0, StructRef::of::<Tech>(), &Args::new())
            .unwrap();
        assert_eq!(end, data.len());
        assert_eq!(node.get_text("name"), Some("Wheel"));
        assert_eq!(
            node.get("required_techs").and_then(Value::as_int_slice),
            Some(&[-1, -1, -1, -1][..])
        );
        let costs = node.get_nodes("research_resource_costs").unwrap();
        assert_eq!(costs.len(), 3);
        assert_eq!(costs[2].as_ref().and_then(|c| c.get_int("amount")), Some(50));
    }
}
