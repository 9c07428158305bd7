//! In-memory trail collection and its load lifecycle.
//!
//! A single loader drives the store `NotStarted -> Loading -> Ready` while any
//! number of readers query it. During loading the collection and its state sit
//! behind one `RwLock`, so every insert is published whole and readers never see
//! a half-updated collection. `finish_load` moves the collection into a
//! write-once cell; from then on readers go straight to the frozen snapshot
//! without taking the lock.

use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};

use thiserror::Error;

use crate::{
    geo_math::haversine_distance,
    models::{LoadState, NearbyTrail, StoreStatus, Trail, TrailSummary},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("cannot {operation} while the store is {state}")]
    InvalidState {
        operation: &'static str,
        state: LoadState,
    },
}

#[derive(Debug, Default)]
struct Collection {
    trails: Vec<Arc<Trail>>,
    by_id: HashMap<String, usize>,
}

impl Collection {
    fn get(&self, id: &str) -> Option<Arc<Trail>> {
        self.by_id.get(id).map(|&idx| Arc::clone(&self.trails[idx]))
    }

    /// Replaces in place on an id collision so the trail keeps its first position.
    fn upsert(&mut self, trail: Trail) -> bool {
        match self.by_id.get(&trail.id) {
            Some(&idx) => {
                self.trails[idx] = Arc::new(trail);
                true
            }
            None => {
                self.by_id.insert(trail.id.clone(), self.trails.len());
                self.trails.push(Arc::new(trail));
                false
            }
        }
    }
}

#[derive(Debug)]
struct LiveState {
    state: LoadState,
    collection: Collection,
}

#[derive(Debug)]
pub struct TrailStore {
    live: RwLock<LiveState>,
    frozen: OnceLock<Collection>,
}

impl Default for TrailStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailStore {
    pub fn new() -> Self {
        Self {
            live: RwLock::new(LiveState {
                state: LoadState::NotStarted,
                collection: Collection::default(),
            }),
            frozen: OnceLock::new(),
        }
    }

    /// Moves the store into `Loading`.
    ///
    /// Repeating the call while already loading is a no-op. Calling it on a
    /// ready store is an error since the collection can no longer change.
    pub fn begin_load(&self) -> Result<(), StoreError> {
        let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
        match live.state {
            LoadState::NotStarted => {
                live.state = LoadState::Loading;
                Ok(())
            }
            LoadState::Loading => Ok(()),
            LoadState::Ready => Err(StoreError::InvalidState {
                operation: "begin loading",
                state: LoadState::Ready,
            }),
        }
    }

    /// Publishes a trail. An existing trail with the same id is replaced
    /// (last writer wins) and keeps its original listing position.
    pub fn insert(&self, trail: Trail) -> Result<(), StoreError> {
        let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
        if live.state != LoadState::Loading {
            return Err(StoreError::InvalidState {
                operation: "insert a trail",
                state: live.state,
            });
        }

        let id = trail.id.clone();
        if live.collection.upsert(trail) {
            tracing::debug!(trail_id = %id, "Replaced trail with duplicate id");
        }
        Ok(())
    }

    /// Freezes the collection and moves the store into `Ready`.
    pub fn finish_load(&self) -> Result<(), StoreError> {
        let mut live = self.live.write().unwrap_or_else(PoisonError::into_inner);
        if live.state != LoadState::Loading {
            return Err(StoreError::InvalidState {
                operation: "finish loading",
                state: live.state,
            });
        }

        let collection = std::mem::take(&mut live.collection);
        // Set before the write lock is released: a reader that finds `frozen`
        // empty and then acquires the lock is guaranteed to see it populated.
        let _ = self.frozen.set(collection);
        live.state = LoadState::Ready;
        Ok(())
    }

    pub fn status(&self) -> StoreStatus {
        if let Some(collection) = self.frozen.get() {
            return StoreStatus {
                state: LoadState::Ready,
                trail_count: collection.trails.len(),
            };
        }
        let live = self.live.read().unwrap_or_else(PoisonError::into_inner);
        match self.frozen.get() {
            Some(collection) => StoreStatus {
                state: LoadState::Ready,
                trail_count: collection.trails.len(),
            },
            None => StoreStatus {
                state: live.state,
                trail_count: live.collection.trails.len(),
            },
        }
    }

    /// Looks a trail up by id. While loading, trails not yet inserted are `None`.
    pub fn get_by_id(&self, id: &str) -> Option<Arc<Trail>> {
        self.read(|collection| collection.get(id))
    }

    /// All trails without point data, in insertion order.
    ///
    /// Insertion order follows file discovery order, which callers should not
    /// rely on across platforms.
    pub fn list_all(&self) -> Vec<TrailSummary> {
        self.read(|collection| {
            collection
                .trails
                .iter()
                .map(|trail| TrailSummary::from(trail.as_ref()))
                .collect()
        })
    }

    /// Trails whose start point lies within `max_distance` meters of the query.
    ///
    /// `None` or `Some(0.0)` disables the cap. Results are in insertion order,
    /// not sorted by distance; see [`sort_by_distance`].
    pub fn search_near(&self, lat: f64, lng: f64, max_distance: Option<f64>) -> Vec<NearbyTrail> {
        let cap = max_distance.filter(|&d| d != 0.0);
        self.read(|collection| {
            collection
                .trails
                .iter()
                .filter_map(|trail| {
                    let distance = haversine_distance(lat, lng, trail.start_lat, trail.start_lng);
                    // Written as a negation so a NaN distance never passes a cap.
                    match cap {
                        Some(cap) if !(distance <= cap) => None,
                        _ => Some(NearbyTrail {
                            trail: TrailSummary::from(trail.as_ref()),
                            distance_to_start: distance,
                        }),
                    }
                })
                .collect()
        })
    }

    fn read<R>(&self, f: impl FnOnce(&Collection) -> R) -> R {
        if let Some(collection) = self.frozen.get() {
            return f(collection);
        }
        let live = self.live.read().unwrap_or_else(PoisonError::into_inner);
        match self.frozen.get() {
            Some(collection) => f(collection),
            None => f(&live.collection),
        }
    }
}

/// Orders search hits nearest first. NaN distances sort last.
pub fn sort_by_distance(results: &mut [NearbyTrail]) {
    results.sort_by(|a, b| {
        match (a.distance_to_start.is_nan(), b.distance_to_start.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.distance_to_start.total_cmp(&b.distance_to_start),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElevationRange, TrackPoint};

    fn trail(id: &str, lat: f64, lng: f64) -> Trail {
        Trail {
            id: id.to_string(),
            name: format!("Trail {id}"),
            description: String::new(),
            start_lat: lat,
            start_lng: lng,
            bucket_key: crate::geohash::encode(lat, lng),
            distance: 1234.0,
            elevation: ElevationRange {
                min: 100.0,
                max: 200.0,
                measured: true,
            },
            points: vec![
                TrackPoint::new(lat, lng, Some(100.0)),
                TrackPoint::new(lat + 0.01, lng, Some(200.0)),
            ],
        }
    }

    fn ready_store(trails: Vec<Trail>) -> TrailStore {
        let store = TrailStore::new();
        store.begin_load().unwrap();
        for t in trails {
            store.insert(t).unwrap();
        }
        store.finish_load().unwrap();
        store
    }

    /// Latitude offset that puts a point `meters` north of the equator origin.
    fn north_of_origin(meters: f64) -> f64 {
        (meters / crate::geo_math::EARTH_RADIUS_M).to_degrees()
    }

    #[test]
    fn test_state_transitions() {
        let store = TrailStore::new();
        assert_eq!(store.status().state, LoadState::NotStarted);
        assert_eq!(store.status().trail_count, 0);

        store.begin_load().unwrap();
        assert_eq!(store.status().state, LoadState::Loading);

        store.insert(trail("a", 1.0, 1.0)).unwrap();
        assert_eq!(
            store.status(),
            StoreStatus {
                state: LoadState::Loading,
                trail_count: 1
            }
        );

        store.finish_load().unwrap();
        assert_eq!(
            store.status(),
            StoreStatus {
                state: LoadState::Ready,
                trail_count: 1
            }
        );
    }

    #[test]
    fn test_insert_after_finish_is_rejected() {
        let store = ready_store(vec![trail("a", 1.0, 1.0)]);

        let err = store.insert(trail("b", 2.0, 2.0)).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidState {
                operation: "insert a trail",
                state: LoadState::Ready,
            }
        );
        assert_eq!(store.status().trail_count, 1);
        assert!(store.get_by_id("b").is_none());
    }

    #[test]
    fn test_insert_before_begin_is_rejected() {
        let store = TrailStore::new();
        assert!(matches!(
            store.insert(trail("a", 1.0, 1.0)),
            Err(StoreError::InvalidState {
                state: LoadState::NotStarted,
                ..
            })
        ));
    }

    #[test]
    fn test_begin_load_is_idempotent_while_loading() {
        let store = TrailStore::new();
        store.begin_load().unwrap();
        store.insert(trail("a", 1.0, 1.0)).unwrap();
        store.begin_load().unwrap();

        assert_eq!(store.status().state, LoadState::Loading);
        assert_eq!(store.status().trail_count, 1);
    }

    #[test]
    fn test_begin_load_after_ready_is_rejected() {
        let store = ready_store(vec![]);
        assert!(store.begin_load().is_err());
        assert_eq!(store.status().state, LoadState::Ready);
    }

    #[test]
    fn test_finish_load_requires_loading() {
        let store = TrailStore::new();
        assert!(store.finish_load().is_err());

        store.begin_load().unwrap();
        store.finish_load().unwrap();
        assert!(store.finish_load().is_err());
    }

    #[test]
    fn test_duplicate_id_last_writer_wins() {
        let store = TrailStore::new();
        store.begin_load().unwrap();
        store.insert(trail("first", 0.0, 0.0)).unwrap();
        store.insert(trail("dup", 1.0, 1.0)).unwrap();
        let mut replacement = trail("dup", 2.0, 2.0);
        replacement.name = "Replacement".to_string();
        store.insert(replacement).unwrap();
        store.finish_load().unwrap();

        assert_eq!(store.status().trail_count, 2);
        let found = store.get_by_id("dup").unwrap();
        assert_eq!(found.name, "Replacement");
        assert_eq!(found.start_lat, 2.0);

        let ids: Vec<String> = store.list_all().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["first", "dup"]);
    }

    #[test]
    fn test_get_by_id_during_loading_sees_inserted_subset() {
        let store = TrailStore::new();
        store.begin_load().unwrap();
        store.insert(trail("a", 1.0, 1.0)).unwrap();

        assert!(store.get_by_id("a").is_some());
        assert!(store.get_by_id("b").is_none());
    }

    #[test]
    fn test_get_by_id_returns_points() {
        let store = ready_store(vec![trail("a", 1.0, 1.0)]);
        let found = store.get_by_id("a").unwrap();
        assert_eq!(found.points.len(), 2);
        assert!(store.get_by_id("missing").is_none());
    }

    #[test]
    fn test_get_by_id_shares_the_stored_trail() {
        let store = ready_store(vec![trail("a", 1.0, 1.0)]);
        let first = store.get_by_id("a").unwrap();
        let second = store.get_by_id("a").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_list_all_strips_points_in_insertion_order() {
        let store = ready_store(vec![
            trail("c", 3.0, 3.0),
            trail("a", 1.0, 1.0),
            trail("b", 2.0, 2.0),
        ]);

        let listed = store.list_all();
        let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert!(listed.iter().all(|t| t.point_count == 2));
        assert_eq!(listed[0].distance, 1234.0);
    }

    #[test]
    fn test_search_near_filters_by_distance_in_insertion_order() {
        let store = ready_store(vec![
            trail("far", north_of_origin(1000.0), 0.0),
            trail("near", north_of_origin(100.0), 0.0),
            trail("mid", north_of_origin(500.0), 0.0),
        ]);

        let results = store.search_near(0.0, 0.0, Some(600.0));
        let ids: Vec<&str> = results.iter().map(|r| r.trail.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid"]);
        assert!((results[0].distance_to_start - 100.0).abs() < 0.01);
        assert!((results[1].distance_to_start - 500.0).abs() < 0.01);
        // The trail's own path length is untouched.
        assert_eq!(results[0].trail.distance, 1234.0);
    }

    #[test]
    fn test_search_near_cap_is_inclusive() {
        let store = ready_store(vec![trail("a", 10.0, 10.0)]);
        let exact = haversine_distance(0.0, 0.0, 10.0, 10.0);

        assert_eq!(store.search_near(0.0, 0.0, Some(exact)).len(), 1);
    }

    #[test]
    fn test_search_near_without_cap_returns_everything() {
        let store = ready_store(vec![
            trail("a", 10.0, 10.0),
            trail("b", -45.0, 120.0),
            trail("c", 60.0, -150.0),
        ]);

        assert_eq!(store.search_near(0.0, 0.0, None).len(), 3);
        assert_eq!(store.search_near(0.0, 0.0, Some(0.0)).len(), 3);
    }

    #[test]
    fn test_search_near_on_empty_store() {
        let store = ready_store(vec![]);
        assert!(store.search_near(1.0, 1.0, Some(10.0)).is_empty());
    }

    #[test]
    fn test_search_near_with_nan_query_matches_nothing_when_capped() {
        let store = ready_store(vec![trail("a", 1.0, 1.0)]);
        assert!(store.search_near(f64::NAN, 0.0, Some(1000.0)).is_empty());
    }

    #[test]
    fn test_sort_by_distance() {
        let store = ready_store(vec![
            trail("far", north_of_origin(1000.0), 0.0),
            trail("near", north_of_origin(100.0), 0.0),
            trail("mid", north_of_origin(500.0), 0.0),
        ]);

        let mut results = store.search_near(0.0, 0.0, None);
        sort_by_distance(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.trail.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
    }
}
