use std::cmp::Ordering;

use rom_merge_catalog::{
    Catalog, CatalogBuilder, GroupingKey, Version, VersionKey, compare_versions, select_all,
    select_best,
};
use rom_merge_core::{Classifier, RawFileRecord};

fn raw(path: &str, collection: &str) -> RawFileRecord {
    let filename = path.rsplit('/').next().unwrap();
    RawFileRecord::new(path, filename, collection)
}

fn build(grouping: GroupingKey, records: &[RawFileRecord]) -> Catalog {
    let mut builder = CatalogBuilder::new(grouping, Classifier::default());
    builder.extend(records);
    builder.build()
}

fn catalog(records: &[RawFileRecord]) -> Catalog {
    build(GroupingKey::default(), records)
}

#[test]
fn format_beats_region() {
    let catalog = catalog(&[
        raw("roms/B/Winter Games (Europe).d64", "B"),
        raw("roms/A/Winter Games (USA).crt", "A"),
    ]);
    let sel = select_best(&catalog, "Winter Games").unwrap();
    assert_eq!(sel.version.format(), "crt");
    assert_eq!(sel.version.collection(), "A");
    assert!(sel.tie.is_none());
}

#[test]
fn region_breaks_format_tie() {
    let catalog = catalog(&[
        raw("roms/A/Game (USA).d64", "A"),
        raw("roms/B/Game (Europe).g64", "B"),
    ]);
    let sel = select_best(&catalog, "Game").unwrap();
    assert_eq!(sel.version.collection(), "B");
    assert_eq!(sel.version.region, "Europe");
}

#[test]
fn collection_name_breaks_remaining_tie() {
    let catalog = catalog(&[
        raw("roms/Zeta/Game (Europe).d64", "Zeta"),
        raw("roms/Alpha/Game (Europe).d64", "Alpha"),
    ]);
    let sel = select_best(&catalog, "Game").unwrap();
    assert_eq!(sel.version.collection(), "Alpha");
    assert!(sel.tie.is_none());
}

#[test]
fn region_is_ignored_when_grouping_does_not_track_it() {
    let records = [
        raw("roms/A/Game (USA).d64", "A"),
        raw("roms/B/Game (Europe).d64", "B"),
    ];

    let by_region = catalog(&records);
    assert_eq!(select_best(&by_region, "Game").unwrap().version.collection(), "B");

    let by_format = build(GroupingKey::CollectionFormat, &records);
    assert_eq!(select_best(&by_format, "Game").unwrap().version.collection(), "A");
}

#[test]
fn identical_rank_is_reported_and_resolved_by_format() {
    let catalog = catalog(&[
        raw("roms/A/Game (Europe).g64", "A"),
        raw("roms/A/Game (Europe).d64", "A"),
    ]);
    let sel = select_best(&catalog, "Game").unwrap();
    assert_eq!(sel.version.format(), "d64");

    let tie = sel.tie.unwrap();
    assert_eq!(tie.game, "Game");
    assert_eq!(tie.chosen.format, "d64");
    assert_eq!(tie.tied_with.len(), 1);
    assert_eq!(tie.tied_with[0].format, "g64");
}

#[test]
fn multi_part_parts_are_ordered() {
    let catalog = catalog(&[
        raw("roms/C64/Ultima IV (Disk 3).d64", "C64"),
        raw("roms/C64/Ultima IV (Disk 1).d64", "C64"),
        raw("roms/C64/Ultima IV (Disk 2).d64", "C64"),
        raw("roms/Tapes/Ultima IV (Europe).tap", "Tapes"),
    ]);
    let sel = select_best(&catalog, "Ultima 4").unwrap();
    assert!(sel.is_multi_part());
    assert_eq!(sel.version.collection(), "C64");
    let numbers: Vec<u32> = sel.parts.iter().map(|p| p.part_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn selection_is_independent_of_input_order() {
    let mut records = vec![
        raw("roms/A/Game (USA).d64", "A"),
        raw("roms/B/Game (Europe).g64", "B"),
        raw("roms/C/Game (Europe).g64", "C"),
        raw("roms/A/Game (Europe).tap", "A"),
        raw("roms/A/Other (Side B).d64", "A"),
        raw("roms/A/Other (Side A).d64", "A"),
        raw("roms/B/Other.crt", "B"),
    ];
    let forward = catalog(&records);
    records.reverse();
    let backward = catalog(&records);

    let summarize = |c: &Catalog| -> Vec<(String, String, Vec<String>)> {
        select_all(c)
            .iter()
            .map(|s| {
                (
                    s.clean_name().to_string(),
                    s.version.key.to_string(),
                    s.parts.iter().map(|p| p.source_path.clone()).collect(),
                )
            })
            .collect()
    };
    assert_eq!(summarize(&forward), summarize(&backward));
}

#[test]
fn select_all_is_sorted_by_name() {
    let catalog = catalog(&[
        raw("roms/A/Zaxxon.crt", "A"),
        raw("roms/A/Archon.d64", "A"),
        raw("roms/A/Montezuma's Revenge.tap", "A"),
    ]);
    let names: Vec<&str> = select_all(&catalog).iter().map(|s| s.clean_name()).collect();
    assert_eq!(names, vec!["Archon", "Montezuma's Revenge", "Zaxxon"]);
}

#[test]
fn unknown_game_has_no_selection() {
    let catalog = catalog(&[raw("roms/A/Archon.d64", "A")]);
    assert!(select_best(&catalog, "archon").is_none());
}

fn version(collection: &str, format: &str, region: &str) -> Version {
    Version {
        key: VersionKey {
            collection: collection.into(),
            format: format.into(),
            region: region.into(),
        },
        format_priority: 3,
        region: region.into(),
        region_priority: 0,
        parts: Vec::new(),
    }
}

#[test]
fn equal_rank_is_ordered_by_version_key() {
    let d64 = version("A", "d64", "");
    let g64 = version("A", "g64", "");
    for grouping in GroupingKey::all() {
        assert_eq!(compare_versions(*grouping, &d64, &g64), Ordering::Less);
        assert_eq!(compare_versions(*grouping, &g64, &d64), Ordering::Greater);
        assert_eq!(compare_versions(*grouping, &d64, &d64), Ordering::Equal);
    }

    let japan = version("A", "d64", "Japan");
    let europe = version("A", "d64", "Europe");
    assert_eq!(
        compare_versions(GroupingKey::CollectionFormatRegion, &europe, &japan),
        Ordering::Less
    );
}
