//! Sprite graphics.

use gamedata_format::descriptor::{int_array, read, read_export, skip, subdata, text};
use gamedata_format::{FieldDescriptor, LengthSource, Primitive, Result, Structure};
use gamedata_model::{GameEdition, GameVersion};

use super::common::debug_string_export;

/// Additional sprite drawn together with a graphic.
pub struct GraphicDelta;

impl Structure for GraphicDelta {
    const NAME: &'static str = "graphic_delta";
    const DESCRIPTION: &'static str = "delta definitions for ingame graphics files";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("graphic_id", Primitive::I16),
            skip("padding_1", Primitive::I16),
            skip("sprite_ptr", Primitive::I32),
            read_export("offset_x", Primitive::I16),
            read_export("offset_y", Primitive::I16),
            read("display_angle", Primitive::I16),
            skip("padding_2", Primitive::I16),
        ])
    }
}

/// Sound played at a frame of an attack animation.
pub struct SoundProp;

impl Structure for SoundProp {
    const NAME: &'static str = "sound_prop";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = vec![
            read_export("sound_delay", Primitive::I16),
            read_export("sound_id", Primitive::I16),
        ];
        if version.edition == GameEdition::Aoe2De {
            members.push(read_export("wwise_sound_id", Primitive::I32));
        }
        Ok(members)
    }
}

/// Attack sounds of one graphic angle.
pub struct GraphicAttackSound;

impl Structure for GraphicAttackSound {
    const NAME: &'static str = "graphic_attack_sound";
    const DESCRIPTION: &'static str = "attack sounds for a given graphics file";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![read_export(
            "sound_props",
            subdata::<SoundProp>(3usize),
        )])
    }
}

/// A sprite and its animation parameters.
pub struct Graphic;

impl Structure for Graphic {
    const NAME: &'static str = "graphic";
    const DESCRIPTION: &'static str = "metadata for ingame graphics files";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let edition = version.edition;
        let mut members = Vec::new();

        if edition.is_definitive() {
            members.extend(debug_string_export("name_len_debug", "name_len", "name"));
            members.extend(debug_string_export(
                "filename_len_debug",
                "filename_len",
                "filename",
            ));
            if edition == GameEdition::Aoe2De {
                members.extend(debug_string_export(
                    "particle_effect_name_len_debug",
                    "particle_effect_name_len",
                    "particle_effect_name",
                ));
            }
        } else if edition == GameEdition::Swgb {
            members.extend([
                read_export("name", text(25usize)),
                read_export("filename", text(25usize)),
            ]);
        } else {
            members.extend([
                read_export("name", text(21usize)),
                read_export("filename", text(13usize)),
            ]);
        }

        members.extend([
            read_export("slp_id", Primitive::I32),
            skip("is_loaded", Primitive::I8),
            skip("old_color_flag", Primitive::I8),
            read_export("layer", Primitive::U8),
            read_export("player_color_force_id", Primitive::I8),
            read_export("adapt_color", Primitive::I8),
            read_export("transparent_selection", Primitive::U8),
            read("coordinates", int_array(Primitive::I16, 4usize)),
            read_export("delta_count", Primitive::U16),
            read_export("sound_id", Primitive::I16),
        ]);

        if edition == GameEdition::Aoe2De {
            members.push(read_export("wwise_sound_id", Primitive::I32));
        }

        members.extend([
            read_export("attack_sound_used", Primitive::U8),
            read_export("frame_count", Primitive::U16),
            read_export("angle_count", Primitive::U16),
            read_export("speed_adjust", Primitive::F32),
            read_export("frame_rate", Primitive::F32),
            read_export("replay_delay", Primitive::F32),
            read_export("sequence_type", Primitive::I8),
            read_export("graphic_id", Primitive::I16),
            read_export("mirroring_mode", Primitive::I8),
        ]);

        if !edition.is_aoe1_family() {
            members.push(read("editor_flag", Primitive::I8));
        }

        members.extend([
            read_export("graphic_deltas", subdata::<GraphicDelta>("delta_count")),
            // one sound block per angle, only if the graphic uses attack sounds
            read_export(
                "graphic_attack_sounds",
                subdata::<GraphicAttackSound>(LengthSource::FieldIfSet {
                    flag: "attack_sound_used",
                    length: "angle_count",
                }),
            ),
        ]);

        Ok(members)
    }
}
