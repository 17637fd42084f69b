use rom_merge_catalog::{CatalogBuilder, plan, plan_all, sanitize_name, select_all, select_best};
use rom_merge_core::RawFileRecord;

fn raw(path: &str, collection: &str) -> RawFileRecord {
    let filename = path.rsplit('/').next().unwrap();
    RawFileRecord::new(path, filename, collection)
}

fn builder(records: &[RawFileRecord]) -> CatalogBuilder {
    let mut builder = CatalogBuilder::default();
    builder.extend(records);
    builder
}

#[test]
fn ultima_multi_part_layout() {
    let catalog = builder(&[
        raw("roms/C64/Ultima IV (Disk 2).d64", "C64"),
        raw("roms/C64/Ultima IV (Disk 1).d64", "C64"),
        raw("roms/Tapes/Ultima IV (Europe).tap", "Tapes"),
    ])
    .build();

    let spec = plan(&select_best(&catalog, "Ultima 4").unwrap());
    assert_eq!(spec.name, "Ultima 4");
    assert_eq!(spec.directory.as_deref(), Some("Ultima 4"));

    let targets: Vec<&str> = spec.files.iter().map(|f| f.target.as_str()).collect();
    assert_eq!(
        targets,
        vec!["Ultima 4/Ultima 4 (Disk 1).d64", "Ultima 4/Ultima 4 (Disk 2).d64"]
    );
    assert_eq!(spec.files[0].source_path, "roms/C64/Ultima IV (Disk 1).d64");

    let playlist = spec.playlist.unwrap();
    assert_eq!(playlist.path, "Ultima 4.m3u");
    assert_eq!(
        playlist.render(),
        "Ultima 4/Ultima 4 (Disk 1).d64|Disk 1\nUltima 4/Ultima 4 (Disk 2).d64|Disk 2\n"
    );
}

#[test]
fn single_part_goes_to_root() {
    let catalog = builder(&[raw("roms/A/Boulder Dash (Europe).crt", "A")]).build();
    let spec = plan(&select_best(&catalog, "Boulder Dash").unwrap());
    assert!(spec.directory.is_none());
    assert!(spec.playlist.is_none());
    assert_eq!(spec.files.len(), 1);
    assert_eq!(spec.files[0].target, "Boulder Dash.crt");
}

#[test]
fn deny_listed_file_exports_as_single_part() {
    let catalog = builder(&[raw("roms/A/10th Frame (USA) (Tape Port Dongle).nib", "A")]).build();
    let spec = plan(&select_best(&catalog, "10th Frame").unwrap());
    assert!(spec.playlist.is_none());
    assert_eq!(spec.files[0].target, "10th Frame.nib");
}

#[test]
fn single_side_letter_file_is_multi_part() {
    let catalog = builder(&[raw("roms/A/Game (Side A).d64", "A")]).build();
    let spec = plan(&select_best(&catalog, "Game").unwrap());
    assert_eq!(spec.files[0].target, "Game/Game (Disk 1).d64");
    assert_eq!(spec.playlist.unwrap().entries[0].label, "Disk 1");
}

#[test]
fn names_are_sanitized_for_paths() {
    let catalog = builder(&[raw("roms/A/Spy vs Spy: The Island Caper.d64", "A")]).build();
    let spec = plan(&select_all(&catalog)[0]);
    assert_eq!(spec.game, "Spy vs Spy: The Island Caper");
    assert_eq!(spec.files[0].target, "Spy vs Spy_ The Island Caper.d64");
}

#[test]
fn plan_counts() {
    let catalog = builder(&[
        raw("roms/C64/Ultima IV (Disk 1).d64", "C64"),
        raw("roms/C64/Ultima IV (Disk 2).d64", "C64"),
        raw("roms/A/Elite.crt", "A"),
    ])
    .build();
    let plan = plan_all(&select_all(&catalog));
    assert_eq!(plan.specs.len(), 2);
    assert_eq!(plan.file_count(), 3);
    assert_eq!(plan.directory_count(), 1);
    assert_eq!(plan.playlist_count(), 1);
    assert_eq!(plan.targets().count(), 4);
    assert!(plan.conflicts.is_empty());
}

#[test]
fn colliding_targets_are_reported() {
    let catalog = builder(&[
        raw("roms/A/Spy: Hunter.crt", "A"),
        raw("roms/A/Spy? Hunter.crt", "A"),
    ])
    .build();
    let plan = plan_all(&select_all(&catalog));
    assert_eq!(plan.conflicts.len(), 1);
    assert_eq!(plan.conflicts[0].target, "Spy_ Hunter.crt");
    assert_eq!(plan.conflicts[0].games, vec!["Spy: Hunter", "Spy? Hunter"]);
}

#[test]
fn plan_serializes_to_json() {
    let catalog = builder(&[raw("roms/A/Elite.crt", "A")]).build();
    let plan = plan_all(&select_all(&catalog));
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["specs"][0]["files"][0]["target"], "Elite.crt");
    assert_eq!(json["specs"][0]["playlist"], serde_json::Value::Null);
}

#[test]
fn sanitize_rules() {
    assert_eq!(sanitize_name("  Foo   Bar  "), "Foo Bar");
    assert_eq!(sanitize_name("a<>b"), "a_b");
    assert_eq!(sanitize_name("a/b\\c"), "a_b_c");
    assert_eq!(sanitize_name("..hidden.."), "hidden");
    assert_eq!(sanitize_name("___"), "unnamed");
    assert_eq!(sanitize_name(""), "unnamed");
    assert_eq!(sanitize_name("a\u{1}b"), "a_b");
    assert_eq!(sanitize_name("Ultima 4"), "Ultima 4");
}
