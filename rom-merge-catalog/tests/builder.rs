use rom_merge_catalog::{AddOutcome, CatalogBuilder, GroupingKey};
use rom_merge_core::{Classifier, RawFileRecord};

fn raw(path: &str, collection: &str) -> RawFileRecord {
    let filename = path.rsplit('/').next().unwrap();
    RawFileRecord::new(path, filename, collection)
}

#[test]
fn records_group_into_games_and_versions() {
    let mut builder = CatalogBuilder::default();
    assert_eq!(
        builder.add(&raw("roms/C64/Ultima IV (Disk 1).d64", "C64")),
        AddOutcome::Added {
            new_game: true,
            new_version: true
        }
    );
    assert_eq!(
        builder.add(&raw("roms/C64/Ultima IV (Disk 2).d64", "C64")),
        AddOutcome::Added {
            new_game: false,
            new_version: false
        }
    );
    assert_eq!(
        builder.add(&raw("roms/Tapes/Ultima IV (Europe).tap", "Tapes")),
        AddOutcome::Added {
            new_game: false,
            new_version: true
        }
    );

    let catalog = builder.build();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.version_count(), 2);
    assert_eq!(catalog.part_count(), 3);
    assert_eq!(catalog.stats().records, 3);

    let game = catalog.game("Ultima 4").unwrap();
    assert_eq!(game.versions.len(), 2);
}

#[test]
fn unidentified_records_are_dropped_and_counted() {
    let mut builder = CatalogBuilder::default();
    assert_eq!(
        builder.add(&raw("roms/C64/(Europe).crt", "C64")),
        AddOutcome::Unidentified
    );
    let catalog = builder.build();
    assert!(catalog.is_empty());
    assert_eq!(catalog.stats().unidentified, 1);
    assert_eq!(catalog.stats().records, 0);
}

#[test]
fn extend_reports_dropped_count() {
    let records = vec![
        raw("roms/A/Boulder Dash.crt", "A"),
        raw("roms/A/[Budget].tap", "A"),
        raw("roms/A/Elite.d64", "A"),
    ];
    let mut builder = CatalogBuilder::default();
    assert_eq!(builder.extend(&records), 1);
    assert_eq!(builder.stats().records, 2);
    assert_eq!(builder.build().len(), 2);
}

#[test]
fn game_names_are_case_sensitive() {
    let mut builder = CatalogBuilder::default();
    builder.add(&raw("roms/A/Elite.d64", "A"));
    builder.add(&raw("roms/A/ELITE.d64", "A"));
    assert_eq!(builder.build().len(), 2);
}

#[test]
fn region_separates_versions_only_when_tracked() {
    let records = [
        raw("roms/A/Game (USA).d64", "A"),
        raw("roms/A/Game (Europe).d64", "A"),
    ];

    let mut by_region = CatalogBuilder::default();
    by_region.extend(&records);
    assert_eq!(by_region.build().version_count(), 2);

    let mut by_format = CatalogBuilder::new(GroupingKey::CollectionFormat, Classifier::default());
    by_format.extend(&records);
    let catalog = by_format.build();
    assert_eq!(catalog.grouping(), GroupingKey::CollectionFormat);
    assert_eq!(catalog.version_count(), 1);

    let version = catalog.game("Game").unwrap().versions.values().next().unwrap();
    assert_eq!(version.key.region, "");
    assert_eq!(version.region, "USA");
    assert_eq!(version.parts.len(), 2);
}

#[test]
fn part_collisions_are_kept() {
    let mut builder = CatalogBuilder::default();
    builder.add(&raw("roms/A/x/Game (Disk 1).d64", "A"));
    builder.add(&raw("roms/A/y/Game (Disk 1).d64", "A"));
    let catalog = builder.build();
    let version = catalog.game("Game").unwrap().versions.values().next().unwrap();
    assert_eq!(version.parts.len(), 2);
    assert_eq!(version.part_collisions(), vec![1]);
}

#[test]
fn grouping_key_parses_and_serializes() {
    assert_eq!(
        "collection-format".parse::<GroupingKey>().unwrap(),
        GroupingKey::CollectionFormat
    );
    assert_eq!(
        "Collection_Format_Region".parse::<GroupingKey>().unwrap(),
        GroupingKey::CollectionFormatRegion
    );
    assert!("format".parse::<GroupingKey>().is_err());
    assert_eq!(
        serde_json::to_string(&GroupingKey::CollectionFormat).unwrap(),
        "\"collection-format\""
    );
    assert_eq!(GroupingKey::default(), GroupingKey::CollectionFormatRegion);
}
