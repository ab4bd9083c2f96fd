//! Sound table.

use gamedata_format::descriptor::{read, read_export, subdata, text};
use gamedata_format::{FieldDescriptor, Primitive, Result, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::common::debug_string_export;

/// One file a sound may play.
pub struct SoundItem;

impl Structure for SoundItem {
    const NAME: &'static str = "sound_item";
    const DESCRIPTION: &'static str = "one possible file for a sound";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = Vec::new();

        if version.edition.is_definitive() {
            members.extend(debug_string_export(
                "filename_len_debug",
                "filename_len",
                "filename",
            ));
        } else if version.edition == GameEdition::Swgb {
            members.push(read_export("filename", text(27usize)));
        } else {
            members.push(read_export("filename", text(13usize)));
        }

        members.extend([
            read_export("resource_id", Primitive::I32),
            read_export("probability", Primitive::I16),
        ]);

        if !version.edition.is_aoe1_family() {
            members.extend([
                read_export("civilization_id", Primitive::I16),
                read("icon_set", Primitive::I16),
            ]);
        }

        Ok(members)
    }
}

/// A sound and the files it picks from.
pub struct Sound;

impl Structure for Sound {
    const NAME: &'static str = "sound";
    const DESCRIPTION: &'static str = "describes a sound, consisting of several sound items";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = vec![
            read_export("sound_id", Primitive::I16),
            read_export("play_delay", Primitive::I16),
            read_export("file_count", Primitive::U16),
            read_export("cache_time", Primitive::I32),
        ];

        if version.edition == GameEdition::Aoe2De {
            members.push(read_export("total_probability", Primitive::I16));
        }

        members.push(read_export(
            "sound_items",
            subdata::<SoundItem>("file_count"),
        ));
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamedata_format::{Args, Decoder, StructRef, Writer};

    #[test]
    fn test_sound_items_follow_file_count() {
        let mut writer = Writer::new();
        writer.write_i16(303);
        writer.write_i16(0);
        writer.write_u16(2);
        writer.write_i32(300_000);
        for (name, id) in [("a_wolf1.wav", 50_300), ("a_wolf2.wav", 50_301)] {
            writer.write_text(name, 13);
            writer.write_i32(id);
            writer.write_i16(50);
            writer.write_i16(-1);
            writer.write_i16(0);
        }
        let data = writer.into_bytes();

        let mut decoder = Decoder::new(GameVersion::new(GameEdition::Aoc));
        let (end, sound) = decoder
            .decode(&data, 0, StructRef::of::<Sound>(), &Args::new())
            .unwrap();
        assert_eq!(end, data.len());
        let items = sound.get_nodes("sound_items").unwrap();
        let names: Vec<&str> = items
            .iter()
            .flatten()
            .filter_map(|item| item.get_text("filename"))
            .collect();
        assert_eq!(names, ["a_wolf1.wav", "a_wolf2.wav"]);
    }

    #[test]
    fn test_definitive_filenames_are_length_prefixed() {
        let members = SoundItem::members(&GameVersion::new(GameEdition::Aoe2De)).unwrap();
        let names: Vec<_> = members.iter().map(FieldDescriptor::display_name).collect();
        assert_eq!(
            &names[..3],
            ["filename_len_debug", "filename_len", "filename"]
        );
    }
}
