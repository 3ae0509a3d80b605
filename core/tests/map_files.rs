use std::io::Write;
use std::path::PathBuf;

use mapsearch_core::{load_map_file, search, GraphError, NodeKey, SearchResult};

fn sample_map() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/mapinfo.json")
}

fn write_map(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_sample_map_arad_to_bucharest() {
    let g = load_map_file(sample_map()).unwrap();
    assert_eq!(g.node_count(), 20);

    let r = search(&g, 2, 3).unwrap();
    let path = r.path().unwrap();
    let labels: Vec<&str> = path.steps.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Arad", "Sibiu", "Fagaras", "Bucharest"]);
    assert_eq!(path.cost, 3);
}

#[test]
fn test_sample_map_is_connected() {
    let g = load_map_file(sample_map()).unwrap();
    let keys: Vec<NodeKey> = g.nodes().map(|n| n.key).collect();
    for goal in keys {
        let r = search(&g, 2, goal).unwrap();
        assert!(r.is_found(), "Arad cannot reach {}", goal);
    }
}

#[test]
fn test_temp_map_round_trip() {
    let file = write_map(
        r#"{
            "1": { "name": "A", "neighbors": [2] },
            "2": { "name": "B", "neighbors": [1] },
            "3": { "name": "C", "neighbors": [] }
        }"#,
    );
    let g = load_map_file(file.path()).unwrap();
    assert_eq!(search(&g, 1, 2).unwrap().path().unwrap().cost, 1);
    assert_eq!(search(&g, 1, 3).unwrap(), SearchResult::NotFound);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    match load_map_file(&missing) {
        Err(GraphError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_invalid_entry_aborts_load() {
    let file = write_map(
        r#"{
            "1": { "name": "A", "neighbors": [2] },
            "2": { "name": "B" }
        }"#,
    );
    assert!(matches!(
        load_map_file(file.path()),
        Err(GraphError::Validation { .. })
    ));
}
