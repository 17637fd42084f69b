use rom_merge_catalog::{CatalogBuilder, GroupingKey, select_all};
use rom_merge_core::{ClassifiedRecord, Classifier, RawFileRecord, classify};
use rom_merge_db::*;

fn record(path: &str, collection: &str) -> ClassifiedRecord {
    let filename = path.rsplit('/').next().unwrap();
    classify(&RawFileRecord::new(path, filename, collection)).unwrap()
}

fn sample() -> Vec<ClassifiedRecord> {
    vec![
        record("roms/C64/Ultima IV (Disk 2).d64", "C64"),
        record("roms/C64/Ultima IV (Disk 1).d64", "C64"),
        record("roms/Tapes/Ultima IV (Europe).tap", "Tapes"),
        record("roms/B/Winter Games (Europe).d64", "B"),
        record("roms/A/Winter Games (USA).crt", "A"),
        record("roms/A/Game (USA).d64", "A"),
        record("roms/B/Game (Europe).g64", "B"),
        record("roms/A/Tie (Europe).g64", "A"),
        record("roms/A/Tie (Europe).d64", "A"),
    ]
}

fn stored(grouping: GroupingKey) -> rusqlite::Connection {
    let mut conn = open_memory().unwrap();
    insert_records(&mut conn, &sample(), grouping).unwrap();
    conn
}

#[test]
fn best_versions_follow_ranking() {
    let conn = stored(GroupingKey::default());
    let best = best_versions(&conn, GroupingKey::default()).unwrap();

    let names: Vec<&str> = best.iter().map(|b| b.clean_name.as_str()).collect();
    assert_eq!(names, vec!["Game", "Tie", "Ultima 4", "Winter Games"]);

    assert_eq!(best[0].collection, "B");
    assert_eq!(best[1].format, "d64");
    assert_eq!(best[2].collection, "C64");
    let parts: Vec<u32> = best[2].parts.iter().map(|p| p.part_number).collect();
    assert_eq!(parts, vec![1, 2]);
    assert_eq!(best[3].format, "crt");
}

#[test]
fn sql_ranking_matches_selector() {
    for &grouping in GroupingKey::all() {
        let conn = stored(grouping);
        let sql = best_versions(&conn, grouping).unwrap();

        let mut builder = CatalogBuilder::new(grouping, Classifier::default());
        for record in sample() {
            builder.add_classified(record);
        }
        let catalog = builder.build();
        let engine = select_all(&catalog);

        assert_eq!(sql.len(), engine.len());
        for (row, sel) in sql.iter().zip(&engine) {
            assert_eq!(row.clean_name, sel.clean_name());
            assert_eq!(row.collection, sel.version.collection());
            assert_eq!(row.format, sel.version.format());
            let sql_paths: Vec<&str> = row.parts.iter().map(|p| p.source_path.as_str()).collect();
            let engine_paths: Vec<&str> = sel.parts.iter().map(|p| p.source_path.as_str()).collect();
            assert_eq!(sql_paths, engine_paths);
        }
    }
}

#[test]
fn load_records_round_trips_in_order() {
    let conn = stored(GroupingKey::default());
    let loaded = load_records(&conn).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn load_records_keeps_part_regions_without_region_grouping() {
    let conn = stored(GroupingKey::CollectionFormat);
    let loaded = load_records(&conn).unwrap();
    let winter: Vec<&str> = loaded
        .iter()
        .filter(|r| r.clean_name == "Winter Games")
        .map(|r| r.region.as_str())
        .collect();
    assert_eq!(winter, vec!["Europe", "USA"]);
}

#[test]
fn stats_count_everything() {
    let conn = stored(GroupingKey::default());
    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.games, 4);
    assert_eq!(stats.versions, 8);
    assert_eq!(stats.parts, 9);
    assert_eq!(stats.collections, 4);
    assert_eq!(stats.multi_part_games, 1);
    assert_eq!(stats.by_format[0], ("d64".to_string(), 5));
}

#[test]
fn import_logs_newest_first() {
    let conn = open_memory().unwrap();
    assert_eq!(last_import_grouping(&conn).unwrap(), None);

    for (i, grouping) in ["collection-format-region", "collection-format"].iter().enumerate() {
        log_import(
            &conn,
            &ImportLog {
                id: None,
                source_root: "roms".to_string(),
                grouping: grouping.to_string(),
                imported_at: format!("2024-01-0{}T00:00:00+00:00", i + 1),
                collections: 2,
                files_processed: 10,
                files_skipped: 1,
                files_unidentified: 0,
                games: 8,
                multi_part_games: 1,
            },
        )
        .unwrap();
    }

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].grouping, "collection-format");
    assert!(logs[0].id.is_some());
    assert_eq!(
        last_import_grouping(&conn).unwrap(),
        Some(GroupingKey::CollectionFormat)
    );
    assert_eq!(list_import_logs(&conn, Some(1)).unwrap().len(), 1);
}

#[test]
fn bad_stored_grouping_is_an_error() {
    let conn = open_memory().unwrap();
    conn.execute(
        "INSERT INTO import_log (source_root, grouping, imported_at) VALUES ('r', 'bogus', 'now')",
        [],
    )
    .unwrap();
    assert!(matches!(
        last_import_grouping(&conn),
        Err(OperationError::InvalidValue { .. })
    ));
}
