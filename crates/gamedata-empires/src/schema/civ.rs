//! Civilisations.

use gamedata_format::descriptor::{
    float_array, id_array, int_array, read, read_export, subtypes, text,
};
use gamedata_format::{FieldDescriptor, Primitive, Result, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::common::debug_string_export;
use super::unit::UNIT_TYPES;

/// A playable civilisation and its unit definitions.
pub struct Civ;

impl Structure for Civ {
    const NAME: &'static str = "civilisation";
    const DESCRIPTION: &'static str = "describes a civilisation";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let edition = version.edition;
        // 1 = player, 0 = gaia
        let mut members = vec![read("player_type", Primitive::I8)];

        if edition.is_definitive() {
            members.extend(debug_string_export("name_len_debug", "name_len", "name"));
        } else {
            members.push(read_export("name", text(20usize)));
        }

        members.extend([
            read("resources_count", Primitive::U16),
            read_export("tech_tree_id", Primitive::I16),
        ]);
        if !edition.is_aoe1_family() {
            members.push(read_export("team_bonus_id", Primitive::I16));
        }
        if edition == GameEdition::Swgb {
            members.extend([
                read_export("name2", text(20usize)),
                read_export("unique_unit_techs", int_array(Primitive::I16, 4usize)),
            ]);
        }

        members.extend([
            read_export("resources", float_array(Primitive::F32, "resources_count")),
            read_export("icon_set", Primitive::I8),
            read_export("units_count", Primitive::U16),
            read("unit_offsets", id_array(Primitive::I32, "units_count")),
            // unused unit ids have a zero offset and no bytes
            read_export(
                "units",
                subtypes("type", Primitive::I8, UNIT_TYPES, "units_count").offset_to("unit_offsets"),
            ),
        ]);
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedata_format::{Args, Decoder, FormatError, StructRef, Writer};

    /// An AOC civ with two unit slots; only the second one is used.
    fn aoc_civ(unit_type: u8) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.write_i8(1);
        writer.write_text("Britons", 20);
        writer.write_u16(1);
        writer.write_i16(254);
        writer.write_i16(-1);
        writer.write_f32(200.0);
        writer.write_i8(1);
        writer.write_u16(2);
        writer.write_i32(0);
        writer.write_i32(0x1000);
        // `type` byte of the present unit, the variant reads it again
        writer.write_u8(unit_type);
        writer.into_bytes()
    }

    #[test]
    fn test_unknown_unit_type_is_rejected() {
        let data = aoc_civ(11);
        let mut decoder = Decoder::new(GameVersion::new(GameEdition::Aoc));
        let err = decoder
            .decode(&data, 0, StructRef::of::<Civ>(), &Args::new())
            .unwrap_err();
        assert!(matches!(err, FormatError::UnknownSubtype { value: 11, .. }), "{err}");
    }

    #[test]
    fn test_units_are_gated_by_offsets() {
        let members = Civ::members(&GameVersion::new(GameEdition::Aoc)).unwrap();
        let units = members.iter().find(|m| m.name == Some("units")).unwrap();
        let rendered = units.to_string();
        assert!(rendered.contains("gated_by(unit_offsets)"), "{rendered}");
        assert!(rendered.contains("70=living_unit"), "{rendered}");

        let data = aoc_civ(70);
        let mut decoder = Decoder::new(GameVersion::new(GameEdition::Aoc));
        let err = decoder
            .decode(&data, 0, StructRef::of::<Civ>(), &Args::new())
            .unwrap_err();
        // the first slot is absent, so the decoder runs out of bytes inside
        // the second one instead of failing on the first
        assert!(err.is_truncation(), "{err}");
    }
}
