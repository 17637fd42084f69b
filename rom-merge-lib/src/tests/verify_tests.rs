use std::fs;

use rom_merge_catalog::{CatalogBuilder, GroupingKey, plan_all, select_all};
use rom_merge_core::{RawFileRecord, classify};
use rom_merge_db::{StoredPart, best_versions, insert_record, open_memory};

use super::*;
use crate::execute::execute_plan;

fn records() -> Vec<RawFileRecord> {
    vec![
        RawFileRecord::new("/roms/C64/Ultima IV (Disk 1).d64", "Ultima IV (Disk 1).d64", "C64"),
        RawFileRecord::new("/roms/C64/Ultima IV (Disk 2).d64", "Ultima IV (Disk 2).d64", "C64"),
        RawFileRecord::new("/roms/Tapes/Ultima IV (USA).tap", "Ultima IV (USA).tap", "Tapes"),
        RawFileRecord::new("/roms/A/Elite (USA).crt", "Elite (USA).crt", "A"),
        RawFileRecord::new("/roms/B/Elite (Europe).crt", "Elite (Europe).crt", "B"),
    ]
}

#[test]
fn target_report_counts_missing_and_extra() {
    let roms = tempfile::tempdir().unwrap();
    fs::write(roms.path().join("Elite.crt"), b"elite").unwrap();
    let record = RawFileRecord::new(
        slash_path(&roms.path().join("Elite.crt")),
        "Elite.crt",
        "A",
    );
    let mut builder = CatalogBuilder::default();
    builder.add(&record);
    let catalog = builder.build();
    let plan = plan_all(&select_all(&catalog));

    let out = tempfile::tempdir().unwrap();
    let report = check_target(&plan, out.path()).unwrap();
    assert_eq!(report.expected, 1);
    assert_eq!(report.present, 0);
    assert_eq!(report.missing, vec!["Elite.crt".to_string()]);
    assert!(!report.is_complete());

    assert!(execute_plan(&plan, out.path()).is_success());
    fs::create_dir_all(out.path().join("stray")).unwrap();
    fs::write(out.path().join("stray/old.d64"), b"x").unwrap();

    let report = check_target(&plan, out.path()).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.present, 1);
    assert_eq!(report.extra, 1);
}

#[test]
fn missing_target_root_reports_everything_missing() {
    let mut builder = CatalogBuilder::default();
    builder.extend(&records());
    let catalog = builder.build();
    let plan = plan_all(&select_all(&catalog));

    let dir = tempfile::tempdir().unwrap();
    let report = check_target(&plan, &dir.path().join("nope")).unwrap();
    assert_eq!(report.expected, 4);
    assert_eq!(report.missing.len(), 4);
    assert_eq!(report.extra, 0);
}

#[test]
fn store_and_engine_agree() {
    for grouping in GroupingKey::all() {
        let conn = open_memory().unwrap();
        let mut builder = CatalogBuilder::new(*grouping, Default::default());
        for raw in records() {
            let record = classify(&raw).unwrap();
            insert_record(&conn, &record, *grouping).unwrap();
            builder.add_classified(record);
        }
        let catalog = builder.build();

        let stored = best_versions(&conn, *grouping).unwrap();
        let mismatches = compare_rankings(&select_all(&catalog), &stored);
        assert!(mismatches.is_empty(), "{grouping}: {mismatches:?}");
    }
}

#[test]
fn detects_disagreement() {
    let mut builder = CatalogBuilder::default();
    builder.extend(&records());
    let catalog = builder.build();
    let selections = select_all(&catalog);

    let stored = vec![BestVersion {
        clean_name: "Elite".into(),
        collection: "A".into(),
        format: "crt".into(),
        format_priority: 4,
        region: "USA".into(),
        region_priority: 3,
        parts: vec![StoredPart {
            part_number: 0,
            source_path: "/roms/A/Elite (USA).crt".into(),
            original_name: "Elite (USA).crt".into(),
        }],
    }];

    let mismatches = compare_rankings(&selections, &stored);
    assert_eq!(mismatches.len(), 2);

    let elite = &mismatches[0];
    assert_eq!(elite.game, "Elite");
    assert_eq!(elite.engine.as_ref().unwrap().0.collection, "B");
    assert_eq!(elite.store.as_ref().unwrap().0.collection, "A");

    let ultima = &mismatches[1];
    assert_eq!(ultima.game, "Ultima 4");
    assert!(ultima.store.is_none());
}
