//! Directory ingestion tests against real files in temporary directories.

mod common;

use std::sync::Arc;

use common::write_gpx;
use tempfile::TempDir;
use trails::{
    geo_math::haversine_distance,
    loader::{self, LoadReport},
    models::LoadState,
    store::TrailStore,
};

#[test]
fn test_loads_every_gpx_file_recursively() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("colorado")).unwrap();
    write_gpx(
        dir.path(),
        "mesa.gpx",
        "Mesa Trail",
        &[&[(39.95, -105.28, Some(1750.0)), (39.96, -105.28, Some(1800.0))]],
    );
    write_gpx(
        &dir.path().join("colorado"),
        "flatirons.GPX",
        "Flatirons Loop",
        &[&[(39.99, -105.29, None), (39.995, -105.29, None)]],
    );
    std::fs::write(dir.path().join("notes.txt"), "not a track").unwrap();

    let store = TrailStore::new();
    let report = loader::load_directory(&store, dir.path()).unwrap();

    assert_eq!(
        report,
        LoadReport {
            files_found: 2,
            trails_inserted: 2,
            files_failed: 0,
        }
    );
    assert_eq!(store.status().state, LoadState::Ready);

    let mesa = store.get_by_id("mesa").unwrap();
    assert_eq!(mesa.name, "Mesa Trail");
    assert_eq!(mesa.start_lat, 39.95);
    assert_eq!(mesa.start_lng, -105.28);
    assert_eq!(mesa.elevation.min, 1750.0);
    assert_eq!(mesa.elevation.max, 1800.0);
    let expected = haversine_distance(39.95, -105.28, 39.96, -105.28);
    assert!((mesa.distance - expected).abs() < 1e-6);

    let flatirons = store.get_by_id("flatirons").unwrap();
    assert!(!flatirons.elevation.measured);
    assert_eq!(flatirons.points.len(), 2);
}

#[test]
fn test_bad_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_gpx(dir.path(), "good.gpx", "Good", &[&[(10.0, 10.0, None)]]);
    std::fs::write(dir.path().join("broken.gpx"), "<gpx><trk>").unwrap();
    std::fs::write(dir.path().join("garbage.gpx"), "definitely not xml").unwrap();

    let store = TrailStore::new();
    let report = loader::load_directory(&store, dir.path()).unwrap();

    assert_eq!(report.files_found, 3);
    assert_eq!(report.trails_inserted, 1);
    assert_eq!(report.files_failed, 2);
    assert_eq!(store.status().trail_count, 1);
    assert!(store.get_by_id("good").is_some());
    assert!(store.get_by_id("broken").is_none());
}

#[test]
fn test_empty_track_file_is_loaded_with_sentinels() {
    let dir = TempDir::new().unwrap();
    write_gpx(dir.path(), "empty.gpx", "Nothing here", &[&[]]);

    let store = TrailStore::new();
    loader::load_directory(&store, dir.path()).unwrap();

    let empty = store.get_by_id("empty").unwrap();
    assert_eq!(empty.name, "Nothing here");
    assert_eq!(empty.distance, 0.0);
    assert_eq!((empty.start_lat, empty.start_lng), (0.0, 0.0));
    assert!(empty.bucket_key.is_empty());
}

#[test]
fn test_missing_directory_leaves_empty_ready_store() {
    let dir = TempDir::new().unwrap();
    let store = TrailStore::new();

    let report = loader::load_directory(&store, &dir.path().join("does-not-exist")).unwrap();

    assert_eq!(report, LoadReport::default());
    assert_eq!(store.status().state, LoadState::Ready);
    assert_eq!(store.status().trail_count, 0);
}

#[test]
fn test_duplicate_file_stems_keep_one_trail() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("a")).unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    write_gpx(&dir.path().join("a"), "loop.gpx", "First", &[&[(1.0, 1.0, None)]]);
    write_gpx(&dir.path().join("b"), "loop.gpx", "Second", &[&[(2.0, 2.0, None)]]);

    let store = TrailStore::new();
    let report = loader::load_directory(&store, dir.path()).unwrap();

    assert_eq!(report.trails_inserted, 2);
    assert_eq!(store.status().trail_count, 1);
    // Directories are walked in lexical order, so b/ is inserted last.
    assert_eq!(store.get_by_id("loop").unwrap().name, "Second");
}

#[test]
fn test_discovery_order_is_lexical_depth_first() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("m")).unwrap();
    for path in ["z.gpx", "a.gpx", "m/b.gpx"] {
        std::fs::write(dir.path().join(path), "").unwrap();
    }

    let files = loader::discover_gpx_files(dir.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();

    assert_eq!(
        names,
        vec![
            "a.gpx".to_string(),
            std::path::Path::new("m").join("b.gpx").display().to_string(),
            "z.gpx".to_string(),
        ]
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_not_followed() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    write_gpx(&sub, "a.gpx", "A", &[&[(1.0, 1.0, None)]]);
    std::os::unix::fs::symlink(dir.path(), sub.join("loop")).unwrap();
    std::os::unix::fs::symlink(&sub, dir.path().join("again")).unwrap();

    let files = loader::discover_gpx_files(dir.path()).unwrap();
    assert_eq!(files, vec![sub.join("a.gpx")]);

    let store = TrailStore::new();
    let report = loader::load_directory(&store, dir.path()).unwrap();
    assert_eq!(report.files_found, 1);
    assert_eq!(report.trails_inserted, 1);
    assert_eq!(store.status().state, LoadState::Ready);
}

#[test]
fn test_reload_of_ready_store_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = TrailStore::new();
    loader::load_directory(&store, dir.path()).unwrap();

    assert!(loader::load_directory(&store, dir.path()).is_err());
}

#[tokio::test]
async fn test_spawned_loader_reaches_ready() {
    let dir = TempDir::new().unwrap();
    write_gpx(dir.path(), "one.gpx", "One", &[&[(5.0, 5.0, Some(3.0))]]);

    let store = Arc::new(TrailStore::new());
    let handle = loader::spawn_loader(Arc::clone(&store), dir.path().to_path_buf());
    let report = handle.await.unwrap().unwrap();

    assert_eq!(report.trails_inserted, 1);
    assert_eq!(store.status().state, LoadState::Ready);
    assert_eq!(store.list_all()[0].id, "one");
}
