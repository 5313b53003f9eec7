use std::fs;

use crate::common::fixtures;
use crate::common::harness::{TestContext, compile};
use nlsim_core::common::{NetlistError, RomError};
use nlsim_core::rom::RomStore;
use nlsim_core::sim::loader::{load_netlist, load_rom_image, load_rom_into};
use nlsim_core::Config;
use pretty_assertions::assert_eq;

const ROM_READER: &str = r#"{
    "name": "rom_reader",
    "inputs": ["addr"],
    "outputs": ["o"],
    "nets": [{ "name": "addr", "width": 2 }, { "name": "o", "width": 8 }],
    "equations": [{ "target": "o", "op": "rom", "args": ["addr"], "params": [2, 8] }]
}"#;

#[test]
fn test_netlist_and_rom_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let netlist_path = dir.path().join("rom_reader.json");
    let rom_path = dir.path().join("program.rom");
    fs::write(&netlist_path, ROM_READER).unwrap();
    fs::write(&rom_path, "# program\n5 9\n").unwrap();

    let desc = load_netlist(&netlist_path).unwrap();
    let image = load_rom_image(&rom_path).unwrap();
    assert_eq!(image.words(), &[5, 9]);

    let mut ctx = TestContext::with_rom(&desc, image.words());
    assert_eq!(ctx.out(&[("addr", 1)], "o"), 9);
    assert_eq!(ctx.out(&[("addr", 3)], "o"), 0);
}

#[test]
fn test_missing_netlist_file() {
    let err = load_netlist("/nonexistent/netlist.json").unwrap_err();
    assert!(matches!(err, NetlistError::Io { .. }));
}

#[test]
fn test_malformed_netlist_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), "{ not json").unwrap();
    assert!(matches!(load_netlist(file.path()), Err(NetlistError::Parse(_))));
}

#[test]
fn test_missing_rom_file() {
    let err = load_rom_image("/nonexistent/program.rom").unwrap_err();
    match err {
        RomError::Io { path, .. } => assert_eq!(path.to_str(), Some("/nonexistent/program.rom")),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_malformed_rom_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), "1\n2\nxyz\n").unwrap();
    assert!(matches!(load_rom_image(file.path()), Err(RomError::Parse { line: 3, .. })));
}

#[test]
fn test_zero_filled_rom_file_for_netlist_without_roms() {
    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), vec![0u8; 4096]).unwrap();
    let config = Config::default();
    let graph = compile(&fixtures::and_gate()).unwrap();
    let mut rom = RomStore::for_graph(&graph, &config);
    load_rom_into(file.path(), &mut rom).unwrap();
    assert!(!rom.is_loaded());
}

#[test]
fn test_rom_into_store_from_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), "5 9 1 2 3 4").unwrap();
    let config = Config::default();
    let graph = compile(&fixtures::rom_reader(2, 8)).unwrap();
    let mut rom = RomStore::for_graph(&graph, &config);
    load_rom_into(file.path(), &mut rom).unwrap();
    assert_eq!((rom.read(0, 0), rom.read(0, 3)), (5, 2));

    let mut empty = RomStore::for_graph(&graph, &config);
    let err = load_rom_into("/nonexistent/program.rom", &mut empty).unwrap_err();
    assert!(matches!(err, RomError::Io { .. }));
}
