use gamedata_format::descriptor::{discard, float_array, id_array, read, read_export, subdata, text};
use gamedata_format::{
    Args, Decoder, FieldDescriptor, FormatError, LengthSource, ParsedNode, Primitive, Result,
    StorageKind, StructRef, Structure, Value, Writer, fingerprint,
};
use gamedata_model::{GameEdition, GameVersion};
use proptest::prelude::*;

struct SoundItem;

impl Structure for SoundItem {
    const NAME: &'static str = "sound_item";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("filename", text(13usize)),
            read_export("resource_id", Primitive::I32),
            read_export("probability", Primitive::I16),
        ])
    }
}

struct Sound;

impl Structure for Sound {
    const NAME: &'static str = "sound";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read_export("sound_id", Primitive::I16),
            read_export("play_delay", Primitive::I16),
            read_export("file_count", Primitive::U16),
            discard(Primitive::I32),
            read_export("sound_items", subdata::<SoundItem>("file_count")),
        ])
    }
}

struct SoundTable;

impl Structure for SoundTable {
    const NAME: &'static str = "sound_table";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read("sound_count", Primitive::U16),
            read("sounds", subdata::<Sound>("sound_count")),
        ])
    }
}

struct Graphic;

impl Structure for Graphic {
    const NAME: &'static str = "graphic";

    fn members(_version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        Ok(vec![
            read("graphic_id", Primitive::I16),
            read("speed", Primitive::F32),
        ])
    }
}

struct GraphicTable;

impl Structure for GraphicTable {
    const NAME: &'static str = "graphic_table";

    fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
        let mut members = vec![
            read("graphic_count", Primitive::U16),
            read("graphic_ptrs", id_array(Primitive::I32, "graphic_count")),
            read(
                "graphics",
                subdata::<Graphic>("graphic_count").offset_to("graphic_ptrs"),
            ),
        ];
        if !version.edition.is_aoe1_family() {
            members.push(read("rendering", float_array(Primitive::F32, 2usize)));
        }
        members.push(read("trailer", Primitive::U8));
        Ok(members)
    }
}

fn aoc() -> GameVersion {
    GameVersion::new(GameEdition::Aoc)
}

fn sound_item(writer: &mut Writer, name: &str, resource_id: i32) {
    writer.write_text(name, 13);
    writer.write_i32(resource_id);
    writer.write_i16(100);
}

fn graphics_bytes(ptrs: &[i32]) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.write_u16(ptrs.len() as u16);
    for &ptr in ptrs {
        writer.write_i32(ptr);
    }
    for (i, &ptr) in ptrs.iter().enumerate() {
        if ptr != 0 {
            writer.write_i16(i as i16);
            writer.write_f32(0.5);
        }
    }
    writer.write_f32(1.0);
    writer.write_f32(2.0);
    writer.write_u8(0xee);
    writer.into_bytes()
}

#[test]
fn test_count_field_drives_container_length() {
    let mut writer = Writer::new();
    writer.write_u16(2);
    sound_item(&mut writer, "wolf.wav", 5000);
    sound_item(&mut writer, "bell.wav", 5001);
    writer.write_u8(0xff);
    let data = writer.into_bytes();

    let members = vec![
        read("file_count", Primitive::U16),
        read("sound_items", subdata::<SoundItem>("file_count")),
    ];
    let (end, node) = Decoder::new(aoc())
        .decode_members(&data, 0, "sound", &members, &Args::new())
        .unwrap();

    assert_eq!(node.get_int("file_count"), Some(2));
    let items = node.get_nodes("sound_items").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[1].as_ref().unwrap().get_text("filename"),
        Some("bell.wav")
    );
    assert_eq!(end, data.len() - 1);
}

#[test]
fn test_nested_structures_decode_in_order() {
    let mut writer = Writer::new();
    writer.write_u16(1);
    writer.write_i16(7);
    writer.write_i16(0);
    writer.write_u16(1);
    writer.write_i32(-1);
    sound_item(&mut writer, "arrow.wav", 42);
    let data = writer.into_bytes();

    let (end, table) = Decoder::new(aoc())
        .decode_root(&data, StructRef::of::<SoundTable>())
        .unwrap();
    assert_eq!(end, data.len());
    assert_eq!(table.structure, "sound_table");

    let sound = table.get_nodes("sounds").unwrap()[0].as_ref().unwrap();
    // the discarded int is not part of the node
    assert_eq!(sound.len(), 4);
    assert!(sound.fields.iter().all(|f| f.exported));
    let item = sound.get_nodes("sound_items").unwrap()[0].as_ref().unwrap();
    assert_eq!(item.get_int("resource_id"), Some(42));
}

#[test]
fn test_all_zero_gate_consumes_nothing() {
    let data = graphics_bytes(&[0, 0, 0]);
    let (end, node) = Decoder::new(aoc())
        .decode_root(&data, StructRef::of::<GraphicTable>())
        .unwrap();

    let graphics = node.get_nodes("graphics").unwrap();
    assert_eq!(graphics.len(), 3);
    assert!(graphics.iter().all(Option::is_none));
    assert_eq!(node.get_int("trailer"), Some(0xee));
    assert_eq!(end, data.len());
}

#[test]
fn test_gate_selects_present_elements() {
    let data = graphics_bytes(&[0x1000, 0, 0x2000]);
    let (end, node) = Decoder::new(aoc())
        .decode_root(&data, StructRef::of::<GraphicTable>())
        .unwrap();

    let graphics = node.get_nodes("graphics").unwrap();
    let ids: Vec<Option<i64>> = graphics
        .iter()
        .map(|g| g.as_ref().and_then(|g| g.get_int("graphic_id")))
        .collect();
    assert_eq!(ids, vec![Some(0), None, Some(2)]);
    assert_eq!(
        node.get("rendering"),
        Some(&Value::FloatArray(vec![1.0, 2.0]))
    );
    assert_eq!(end, data.len());
}

#[test]
fn test_zero_length_field_yields_empty_arrays() {
    let data = graphics_bytes(&[]);
    let (end, node) = Decoder::new(aoc())
        .decode_root(&data, StructRef::of::<GraphicTable>())
        .unwrap();
    assert_eq!(node.get("graphic_ptrs"), Some(&Value::IdArray(vec![])));
    assert_eq!(node.get_nodes("graphics").map(<[_]>::len), Some(0));
    // u16 count, two floats, trailer
    assert_eq!(end, 2 + 8 + 1);
}

#[test]
fn test_version_branch_changes_layout() {
    let ror = GameVersion::new(GameEdition::Ror);
    let data = {
        let mut writer = Writer::new();
        writer.write_u16(0);
        writer.write_u8(0x11);
        writer.into_bytes()
    };
    let (end, node) = Decoder::new(ror.clone())
        .decode_root(&data, StructRef::of::<GraphicTable>())
        .unwrap();
    assert_eq!(end, 3);
    assert!(node.get("rendering").is_none());
    assert_eq!(node.get_int("trailer"), Some(0x11));

    assert_ne!(
        fingerprint(StructRef::of::<GraphicTable>(), &ror).unwrap(),
        fingerprint(StructRef::of::<GraphicTable>(), &aoc()).unwrap()
    );
}

#[test]
fn test_truncated_input_returns_no_tree() {
    let data = graphics_bytes(&[0x10, 0x20]);
    let mut decoder = Decoder::new(aoc());
    for cut in 0..data.len() - 1 {
        let err = decoder
            .decode_root(&data[..cut], StructRef::of::<GraphicTable>())
            .unwrap_err();
        assert!(err.is_truncation(), "cut at {cut}: {err}");
    }
}

#[test]
fn test_missing_reference_is_fatal() {
    let members = vec![
        read("sounds", subdata::<Sound>("sound_count")),
        read("sound_count", Primitive::U16),
    ];
    let err = Decoder::new(aoc())
        .decode_members(&[0, 0], 0, "sound_table", &members, &Args::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "sound_table.sounds: length reference 'sound_count' is not a decoded field"
    );
}

#[test]
fn test_length_from_flagged_field() {
    let members = vec![
        read("used", Primitive::U8),
        read("angle_count", Primitive::U16),
        read(
            "angles",
            StorageKind::IntArray {
                element: Primitive::I16,
                length: LengthSource::FieldIfSet {
                    flag: "used",
                    length: "angle_count",
                },
            },
        ),
    ];
    let decode = |data: &[u8]| {
        Decoder::new(aoc())
            .decode_members(data, 0, "graphic", &members, &Args::new())
            .unwrap()
    };

    let (end, node) = decode(&[0, 2, 0]);
    assert_eq!(end, 3);
    assert_eq!(node.get("angles"), Some(&Value::IntArray(vec![])));

    let (end, node) = decode(&[1, 2, 0, 5, 0, 6, 0]);
    assert_eq!(end, 7);
    assert_eq!(node.get("angles"), Some(&Value::IntArray(vec![5, 6])));
}

#[test]
fn test_schema_listing_snapshot() {
    let members = StructRef::of::<GraphicTable>().members(&aoc()).unwrap();
    let listing: Vec<String> = members.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(listing.join("\n"), @r"
    read graphic_count uint16_t
    read graphic_ptrs id int32_t[graphic_count]
    read graphics graphic[graphic_count] gated_by(graphic_ptrs)
    read rendering float[2]
    read trailer uint8_t
    ");
}

#[test]
fn test_unsupported_version_fails_before_reading() {
    struct AocOnly;

    impl Structure for AocOnly {
        const NAME: &'static str = "aoc_only";

        fn members(version: &GameVersion) -> Result<Vec<FieldDescriptor>> {
            match version.edition {
                GameEdition::Aoc => Ok(vec![read("x", Primitive::U8)]),
                _ => Err(FormatError::unsupported_version(Self::NAME, version)),
            }
        }
    }

    let err = Decoder::new(GameVersion::new(GameEdition::Aok))
        .decode_root(&[], StructRef::of::<AocOnly>())
        .unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedVersion { .. }));
}

fn sound_table_bytes(files: &[Vec<(String, i32)>]) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.write_u16(files.len() as u16);
    for (id, items) in files.iter().enumerate() {
        writer.write_i16(id as i16);
        writer.write_i16(0);
        writer.write_u16(items.len() as u16);
        writer.write_i32(0);
        for (name, resource) in items {
            sound_item(&mut writer, name, *resource);
        }
    }
    writer.into_bytes()
}

fn item_names(table: &ParsedNode) -> Vec<Vec<String>> {
    table
        .get_nodes("sounds")
        .unwrap_or_default()
        .iter()
        .flatten()
        .map(|sound| {
            sound
                .get_nodes("sound_items")
                .unwrap_or_default()
                .iter()
                .flatten()
                .filter_map(|item| item.get_text("filename").map(str::to_string))
                .collect()
        })
        .collect()
}

proptest! {
    #[test]
    fn test_decode_consumes_exactly_what_was_written(
        files in prop::collection::vec(
            prop::collection::vec(("[a-z]{1,12}", any::<i32>()), 0..4),
            0..6,
        )
    ) {
        let data = sound_table_bytes(&files);
        let (end, table) = Decoder::new(aoc())
            .decode_root(&data, StructRef::of::<SoundTable>())
            .unwrap();
        prop_assert_eq!(end, data.len());

        let expected: Vec<Vec<String>> = files
            .iter()
            .map(|items| items.iter().map(|(name, _)| name.clone()).collect())
            .collect();
        prop_assert_eq!(item_names(&table), expected);
    }

    #[test]
    fn test_gated_elements_match_nonzero_pointers(ptrs in prop::collection::vec(prop_oneof![Just(0i32), 1..i32::MAX], 0..16)) {
        let data = graphics_bytes(&ptrs);
        let (end, node) = Decoder::new(aoc())
            .decode_root(&data, StructRef::of::<GraphicTable>())
            .unwrap();
        prop_assert_eq!(end, data.len());
        let present: Vec<bool> = node
            .get_nodes("graphics")
            .unwrap()
            .iter()
            .map(Option::is_some)
            .collect();
        let expected: Vec<bool> = ptrs.iter().map(|&p| p != 0).collect();
        prop_assert_eq!(present, expected);
    }
}
