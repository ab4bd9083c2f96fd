use gamedata_format::descriptor::{read, read_export, text};
use gamedata_format::{FieldDescriptor, Primitive, Result, Structure};
use gamedata_model::GameVersion;

/// Player color palette entry.
pub struct PlayerColor;

impl Structure for PlayerColor {
    const NAME: &'static str = "player_color";
    const DESCRIPTION: &'static str = "describes player color settings";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        if version.edition.is_aoe1_family() {
            return Ok(vec![
                read("name", text(30usize)),
                read_export("id", Primitive::I16),
                read("resource_id", Primitive::I16),
                read_export("minimap_color", Primitive::U8),
                read("type", Primitive::U8),
            ]);
        }

        Ok(vec![
            read_export("id", Primitive::I32),
            // palette index offset, where the 8 player colors start
            read_export("player_color_base", Primitive::I32),
            read_export("outline_color", Primitive::I32),
            read("unit_selection_color1", Primitive::I32),
            read("unit_selection_color2", Primitive::I32),
            read_export("minimap_color1", Primitive::I32),
            read("minimap_color2", Primitive::I32),
            read("minimap_color3", Primitive::I32),
            read_export("statistics_text_color", Primitive::I32),
        ])
    }
}
