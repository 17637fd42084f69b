use super::*;

fn clean(name: &str) -> String {
    normalize(name).unwrap_or_default()
}

#[test]
fn plain_name_loses_extension() {
    assert_eq!(clean("Boulder Dash.crt"), "Boulder Dash");
}

#[test]
fn words_containing_numeral_letters_are_untouched() {
    assert_eq!(clean("Winter Games.crt"), "Winter Games");
    assert_eq!(clean("California Games.d64"), "California Games");
    assert_eq!(clean("Impossible Mission.tap"), "Impossible Mission");
}

#[test]
fn roman_numerals_become_digits() {
    assert_eq!(clean("Game II.crt"), "Game 2");
    assert_eq!(clean("Game III.crt"), "Game 3");
    assert_eq!(clean("Ultima IV.d64"), "Ultima 4");
    assert_eq!(clean("Ultima VI.d64"), "Ultima 6");
    assert_eq!(clean("Game VII.g64"), "Game 7");
    assert_eq!(clean("Game VIII.d64"), "Game 8");
}

#[test]
fn single_letter_numerals_are_not_converted() {
    assert_eq!(clean("Ultima V.d64"), "Ultima V");
    assert_eq!(clean("Rocky I.tap"), "Rocky I");
    assert_eq!(clean("Final Mission IX.d64"), "Final Mission IX");
}

#[test]
fn lowercase_numerals_are_not_converted() {
    assert_eq!(clean("Game ii.crt"), "Game ii");
}

#[test]
fn disk_marker_and_tail_are_removed() {
    assert_eq!(clean("Ultima IV (Disk 1).d64"), "Ultima 4");
    assert_eq!(clean("Ultima IV (Disk 4).d64"), "Ultima 4");
    assert_eq!(clean("Bard's Tale Side 2 (Europe).d64"), "Bard's Tale");
    assert_eq!(clean("Game [Part 3] - The End.tap"), "Game");
    assert_eq!(clean("Game disk2.d64"), "Game");
}

#[test]
fn region_tags_are_removed() {
    assert_eq!(clean("Commando (Europe).crt"), "Commando");
    assert_eq!(clean("Commando (USA, Europe).crt"), "Commando");
    assert_eq!(clean("Commando [PAL].d64"), "Commando");
    assert_eq!(clean("Commando (Eur).tap"), "Commando");
    assert_eq!(clean("Commando (Jp).tap"), "Commando");
    assert_eq!(clean("Commando (NTSC).tap"), "Commando");
    assert_eq!(clean("Commando (En,De).tap"), "Commando");
    assert_eq!(clean("Commando (japan).tap"), "Commando");
}

#[test]
fn version_markers_are_removed() {
    assert_eq!(clean("Elite (v1.1).d64"), "Elite");
    assert_eq!(clean("Elite [V2].d64"), "Elite");
    assert_eq!(clean("Elite v1.2.d64"), "Elite");
    assert_eq!(clean("Elite (Version 2.0b).d64"), "Elite");
}

#[test]
fn suffix_markers_are_removed() {
    assert_eq!(clean("Paperboy (Budget).tap"), "Paperboy");
    assert_eq!(clean("Paperboy [Alt].tap"), "Paperboy");
    assert_eq!(clean("Paperboy (Alternative).tap"), "Paperboy");
    assert_eq!(clean("Paperboy (Unl).crt"), "Paperboy");
    assert_eq!(clean("Paperboy (Aftermarket).crt"), "Paperboy");
    assert_eq!(clean("10th Frame (USA) (Tape Port Dongle).nib"), "10th Frame");
    assert_eq!(clean("10th Frame (TapePortDongle).nib"), "10th Frame");
}

#[test]
fn collection_markers_are_removed() {
    assert_eq!(clean("Epyx Games (Compilation).d64"), "Epyx Games");
    assert_eq!(clean("Epyx Games [Collection].d64"), "Epyx Games");
}

#[test]
fn remaining_groups_are_removed() {
    assert_eq!(clean("Giana Sisters (1987)(Rainbow Arts)[cr Ikari].d64"), "Giana Sisters");
    assert_eq!(clean("Giana Sisters (Proto).crt"), "Giana Sisters");
}

#[test]
fn whitespace_is_collapsed_and_trimmed() {
    assert_eq!(clean("  Space    Taxi   .crt"), "Space Taxi");
    assert_eq!(clean("Space\tTaxi.crt"), "Space Taxi");
}

#[test]
fn empty_identity_is_none() {
    assert_eq!(normalize("(Europe).crt"), None);
    assert_eq!(normalize("[Budget].tap"), None);
    assert_eq!(normalize("Disk 1.d64"), None);
    assert_eq!(normalize(".crt"), Some(".crt".to_string()));
}

#[test]
fn normalization_is_repeatable() {
    let names = [
        "Ultima IV (Disk 2).d64",
        "Commando (Europe) [Budget].tap",
        "Elite v1.2 (PAL).d64",
    ];
    for name in names {
        assert_eq!(normalize(name), normalize(name));
    }
}

#[test]
fn name_is_case_preserving() {
    assert_eq!(clean("BOULDER DASH.crt"), "BOULDER DASH");
    assert_ne!(clean("BOULDER DASH.crt"), clean("Boulder Dash.crt"));
}

#[test]
fn strip_extension_handles_dots() {
    assert_eq!(strip_extension("Game.d64"), "Game");
    assert_eq!(strip_extension("Dr. J.crt"), "Dr. J");
    assert_eq!(strip_extension(".crt"), ".crt");
    assert_eq!(strip_extension("NoExtension"), "NoExtension");
}

#[test]
fn extension_is_lowercased() {
    assert_eq!(extension("Game.D64"), "d64");
    assert_eq!(extension("Game.tap"), "tap");
    assert_eq!(extension("Game"), "");
    assert_eq!(extension(".crt"), "");
}
