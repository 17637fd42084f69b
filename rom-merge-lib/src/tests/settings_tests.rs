use super::*;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.paths.roms_dir, PathBuf::from("roms"));
    assert_eq!(settings.catalog.grouping, GroupingKey::CollectionFormatRegion);
    assert!(settings.discovery.skip_patterns.contains(&"BIOS".to_string()));
}

#[test]
fn partial_file_overlays_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
[paths]
roms_dir = "/data/roms"

[catalog]
grouping = "collection-format"

[formats]
d81 = "disk"

[region_priority]
USA = 10
"#,
    )
    .unwrap();

    let settings = load_settings(&path).unwrap();
    assert_eq!(settings.paths.roms_dir, PathBuf::from("/data/roms"));
    assert_eq!(settings.paths.target_dir, PathBuf::from("target"));
    assert_eq!(settings.catalog.grouping, GroupingKey::CollectionFormat);

    let table = settings.priority_table().unwrap();
    assert_eq!(table.format_priority("d81"), 3);
    assert_eq!(table.region_priority("USA"), 10);
}

#[test]
fn bad_priorities_fail_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[formats]\nd81 = \"floppy\"\n").unwrap();
    assert!(matches!(load_settings(&path), Err(SettingsError::Priority(_))));
}

#[test]
fn bad_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[paths\nroms_dir = 1").unwrap();
    assert!(matches!(load_settings(&path), Err(SettingsError::Parse { .. })));
}

#[test]
fn unknown_grouping_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[catalog]\ngrouping = \"by-vibes\"\n").unwrap();
    assert!(matches!(load_settings(&path), Err(SettingsError::Parse { .. })));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let mut settings = Settings::default();
    settings.paths.database = PathBuf::from("db/catalog.db");
    settings.format_priority.insert("cartridge".into(), 9);
    save_settings(&path, &settings).unwrap();

    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(load_settings(&path).unwrap(), settings);
}

#[test]
fn effective_settings_list_every_priority() {
    let effective = Settings::default().effective().unwrap();
    assert_eq!(effective.formats.get("crt").map(String::as_str), Some("cartridge"));
    assert_eq!(effective.format_priority.get("tape"), Some(&1));
    assert_eq!(effective.region_priority.get("Europe"), Some(&6));
    assert_eq!(effective.region_priority.get("unspecified"), Some(&0));
    assert!(effective.to_toml_string().unwrap().contains("[region_priority]"));
}

#[test]
fn settings_path_is_under_rom_merge() {
    let path = settings_path();
    assert!(path.ends_with("rom-merge/settings.toml"));
}
