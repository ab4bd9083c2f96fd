//! Synthetic `empires.dat` payloads.
//!
//! Walks the same member lists the decoder uses and writes bytes for them:
//! scalars take their value from an override table by field name (zero
//! otherwise), texts and plain arrays are zero filled, id arrays hold ones
//! so every gated element is present, and subtype arrays use the variant
//! named by the discriminator's override.

#![allow(dead_code)]

use std::collections::HashMap;

use gamedata_format::{ElementSchema, LengthSource, StorageKind, StructRef, Writer};
use gamedata_model::{GameEdition, GameVersion};

/// Counts that give every list in the format at least one element.
pub const POPULATED: &[(&str, i64)] = &[
    ("terrain_restriction_count", 2),
    ("terrain_count", 3),
    ("player_color_count", 2),
    ("sound_count", 2),
    ("file_count", 2),
    ("graphic_count", 2),
    ("delta_count", 1),
    ("attack_sound_used", 1),
    ("angle_count", 2),
    ("random_map_count", 1),
    ("base_zone_count", 1),
    ("map_terrain_count", 1),
    ("map_unit_count", 1),
    ("map_elevation_count", 1),
    ("effect_bundle_count", 2),
    ("effect_count", 2),
    ("unit_line_count", 1),
    ("unit_ids_count", 2),
    ("unit_count", 2),
    ("exists", 1),
    ("unit_command_count", 1),
    ("civ_count", 2),
    ("resources_count", 4),
    ("units_count", 3),
    ("type", 70),
    ("damage_graphic_count", 1),
    ("attack_count", 2),
    ("armor_count", 1),
    ("research_count", 2),
    ("building_count", 1),
    ("age_connection_count", 1),
    ("building_connection_count", 1),
    ("unit_connection_count", 1),
    ("tech_connection_count", 1),
];

/// Editions with a known layout.
pub const SUPPORTED: [GameEdition; 6] = [
    GameEdition::Ror,
    GameEdition::Aoc,
    GameEdition::Swgb,
    GameEdition::HdEdition,
    GameEdition::Aoe1De,
    GameEdition::Aoe2De,
];

type Values = HashMap<&'static str, i64>;

/// Bytes that decode as `root` for `version`.
pub fn synthesize(root: StructRef, version: &GameVersion, overrides: &[(&'static str, i64)]) -> Vec<u8> {
    let mut synth = Synth {
        version,
        overrides: overrides.iter().copied().collect(),
        writer: Writer::new(),
    };
    synth.structure(root, &Values::new(), None);
    synth.writer.into_bytes()
}

struct Synth<'a> {
    version: &'a GameVersion,
    overrides: Values,
    writer: Writer,
}

impl Synth<'_> {
    fn structure(&mut self, structure: StructRef, args: &Values, forced: Option<(&'static str, i64)>) {
        let members = structure
            .members(self.version)
            .unwrap_or_else(|err| panic!("{}: {err}", structure.name()));
        let mut siblings = Values::new();

        for member in &members {
            match &member.kind {
                StorageKind::Scalar(primitive) | StorageKind::Id(primitive) => {
                    let value = member.name.map_or(0, |name| match forced {
                        Some((field, value)) if field == name => value,
                        _ => self.overrides.get(name).copied().unwrap_or(0),
                    });
                    self.writer.write_primitive(*primitive, value);
                    if let Some(name) = member.name {
                        siblings.insert(name, value);
                    }
                }
                StorageKind::Text { length } => {
                    let count = resolve(length, &siblings, args);
                    self.writer.write_zeros(count);
                }
                StorageKind::IntArray { element, length }
                | StorageKind::FloatArray { element, length } => {
                    let count = resolve(length, &siblings, args);
                    self.writer.write_zeros(count * element.width());
                }
                StorageKind::IdArray { element, length } => {
                    for _ in 0..resolve(length, &siblings, args) {
                        self.writer.write_primitive(*element, 1);
                    }
                }
                StorageKind::ContainerArray(nested) => {
                    let count = resolve(&nested.length, &siblings, args);
                    let child_args: Values = nested
                        .passed_args
                        .iter()
                        .map(|&name| (name, lookup(name, &siblings, args)))
                        .collect();
                    for _ in 0..count {
                        match &nested.element {
                            ElementSchema::Struct(element) => {
                                self.structure(*element, &child_args, None);
                            }
                            ElementSchema::Subtype {
                                discriminator,
                                variants,
                                ..
                            } => {
                                let wanted = self.overrides.get(discriminator).copied();
                                let (key, element) = variants
                                    .iter()
                                    .find(|(key, _)| Some(*key) == wanted)
                                    .or_else(|| variants.first())
                                    .copied()
                                    .expect("subtype without variants");
                                self.structure(element, &child_args, Some((*discriminator, key)));
                            }
                        }
                    }
                }
            }
        }
    }
}

fn lookup(name: &str, siblings: &Values, args: &Values) -> i64 {
    siblings
        .get(name)
        .or_else(|| args.get(name))
        .copied()
        .unwrap_or_else(|| panic!("length reference '{name}' is not available"))
}

fn resolve(length: &LengthSource, siblings: &Values, args: &Values) -> usize {
    let count = match *length {
        LengthSource::Literal(count) => return count,
        LengthSource::Field(name) => lookup(name, siblings, args),
        LengthSource::FieldIfSet { flag, length } => {
            if lookup(flag, siblings, args) == 0 {
                0
            } else {
                lookup(length, siblings, args)
            }
        }
    };
    usize::try_from(count).expect("negative length")
}
