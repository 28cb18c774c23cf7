//! Persistence for chosen routes.
//!
//! An in-process document store guarded by an async `RwLock`. When opened
//! with a path, the whole store is rewritten as a JSON snapshot after every
//! mutation and reloaded on startup. A mutation whose snapshot write fails
//! is rolled back, so memory never runs ahead of disk.

mod error;
mod model;
mod snapshot;

use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::{debug, info};

pub use error::StoreError;
pub use model::{Choice, EmissionTotals, SavedRoute, UNKNOWN_DESTINATION, UNKNOWN_ORIGIN, now_secs};

use snapshot::{SnapshotFile, StoreData};

/// Saved routes and user choices.
#[derive(Debug)]
pub struct RouteStore {
    data: RwLock<StoreData>,
    snapshot: Option<SnapshotFile>,
}

impl RouteStore {
    /// A store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            snapshot: None,
        }
    }

    /// Open a store backed by a snapshot file.
    ///
    /// A missing file starts an empty store; an unreadable or corrupt one
    /// is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let snapshot = SnapshotFile::new(path);
        let data = snapshot.load()?;
        info!(
            path = %snapshot.path().display(),
            routes = data.routes.len(),
            choices = data.choices.len(),
            "opened route store"
        );

        Ok(Self {
            data: RwLock::new(data),
            snapshot: Some(snapshot),
        })
    }

    /// Snapshot path, if persistent.
    #[cfg(test)]
    pub(crate) fn path(&self) -> Option<&std::path::Path> {
        self.snapshot.as_ref().map(SnapshotFile::path)
    }

    /// Save a route unless one with the same id exists.
    ///
    /// Returns whether the route was inserted.
    pub async fn save_route(&self, route: SavedRoute) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        if data.routes.iter().any(|r| r.route_id == route.route_id) {
            debug!(route_id = %route.route_id, "route already saved");
            return Ok(false);
        }

        debug!(route_id = %route.route_id, mode = %route.mode, "saving route");
        data.routes.push(route);
        if let Err(e) = self.persist(&mut data).await {
            data.routes.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Record a user choosing a route.
    pub async fn record_choice(&self, choice: Choice) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        data.choices.push(choice);
        if let Err(e) = self.persist(&mut data).await {
            data.choices.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Look up a saved route by id.
    pub async fn get(&self, route_id: &str) -> Option<SavedRoute> {
        let data = self.data.read().await;
        data.routes.iter().find(|r| r.route_id == route_id).cloned()
    }

    /// Routes saved by a user, newest first.
    pub async fn routes_for_user(&self, user_id: &str) -> Vec<SavedRoute> {
        let data = self.data.read().await;
        // Reverse first so equal timestamps keep newest-inserted first
        let mut routes: Vec<SavedRoute> = data
            .routes
            .iter()
            .rev()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        routes.sort_by(|a, b| b.created_at_secs.cmp(&a.created_at_secs));
        routes
    }

    /// Choices made by a user, oldest first.
    #[cfg(test)]
    pub(crate) async fn choices_for_user(&self, user_id: &str) -> Vec<Choice> {
        let data = self.data.read().await;
        data.choices
            .iter()
            .filter(|c| c.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect()
    }

    /// Emissions over every saved route.
    pub async fn city_totals(&self) -> EmissionTotals {
        let data = self.data.read().await;
        EmissionTotals::over(&data.routes)
    }

    /// Emissions over the routes saved by one user.
    pub async fn user_totals(&self, user_id: &str) -> EmissionTotals {
        let data = self.data.read().await;
        EmissionTotals::over(
            data.routes
                .iter()
                .filter(|r| r.user_id.as_deref() == Some(user_id)),
        )
    }

    /// Write the snapshot. Callers hold the write lock across this so
    /// snapshots land in mutation order.
    async fn persist(&self, data: &mut StoreData) -> Result<(), StoreError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        let json = SnapshotFile::encode(data)?;
        snapshot.write_off_thread(json).await
    }
}

impl Default for RouteStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use tempfile::tempdir;

    fn route(id: &str, user: Option<&str>, emission_g: f64, created_at_secs: u64) -> SavedRoute {
        SavedRoute {
            route_id: id.to_string(),
            user_id: user.map(str::to_string),
            origin: Coordinate::new(12.9716, 77.5946).unwrap(),
            origin_name: "MG Road".to_string(),
            dest: Coordinate::new(12.9352, 77.6245).unwrap(),
            dest_name: "Koramangala".to_string(),
            mode: "driving-car".to_string(),
            distance_km: 6.222,
            duration_min: 7.47,
            emission_g,
            polyline: None,
            created_at_secs,
        }
    }

    #[tokio::test]
    async fn save_is_idempotent() {
        let store = RouteStore::in_memory();

        assert!(store.save_route(route("r1", None, 10.0, 1)).await.unwrap());
        assert!(!store.save_route(route("r1", None, 99.0, 2)).await.unwrap());

        assert_eq!(store.get("r1").await.unwrap().emission_g, 10.0);
        assert_eq!(store.city_totals().await.route_count, 1);
    }

    #[tokio::test]
    async fn user_routes_newest_first() {
        let store = RouteStore::in_memory();
        store.save_route(route("old", Some("u1"), 1.0, 100)).await.unwrap();
        store.save_route(route("other", Some("u2"), 1.0, 150)).await.unwrap();
        store.save_route(route("new", Some("u1"), 1.0, 200)).await.unwrap();
        store.save_route(route("tie", Some("u1"), 1.0, 200)).await.unwrap();

        let ids: Vec<_> = store
            .routes_for_user("u1")
            .await
            .into_iter()
            .map(|r| r.route_id)
            .collect();
        assert_eq!(ids, vec!["tie", "new", "old"]);
        assert!(store.routes_for_user("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn totals() {
        let store = RouteStore::in_memory();
        store.save_route(route("a", Some("u1"), 100.0, 1)).await.unwrap();
        store.save_route(route("b", Some("u2"), 50.5, 2)).await.unwrap();
        store.save_route(route("c", None, 0.0, 3)).await.unwrap();

        let city = store.city_totals().await;
        assert_eq!(city.total_emission_g, 150.5);
        assert_eq!(city.route_count, 3);

        let user = store.user_totals("u2").await;
        assert_eq!(user.total_emission_g, 50.5);
        assert_eq!(user.route_count, 1);

        assert_eq!(store.user_totals("u3").await, EmissionTotals::default());
    }

    #[tokio::test]
    async fn choices_are_appended() {
        let store = RouteStore::in_memory();
        for secs in [1, 2] {
            store
                .record_choice(Choice {
                    user_id: Some("u1".to_string()),
                    route_id: "r1".to_string(),
                    chosen_at_secs: secs,
                })
                .await
                .unwrap();
        }

        assert_eq!(store.choices_for_user("u1").await.len(), 2);
    }

    #[tokio::test]
    async fn snapshot_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("routes.json");

        {
            let store = RouteStore::open(&path).unwrap();
            store.save_route(route("r1", Some("u1"), 42.0, 7)).await.unwrap();
            store
                .record_choice(Choice {
                    user_id: Some("u1".to_string()),
                    route_id: "r1".to_string(),
                    chosen_at_secs: 8,
                })
                .await
                .unwrap();
        }

        let reopened = RouteStore::open(&path).unwrap();
        assert_eq!(reopened.path(), Some(path.as_path()));
        assert_eq!(reopened.get("r1").await, Some(route("r1", Some("u1"), 42.0, 7)));
        assert_eq!(reopened.choices_for_user("u1").await.len(), 1);
    }

    #[tokio::test]
    async fn failed_write_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let store = RouteStore::open(data_dir.join("routes.json")).unwrap();
        store.save_route(route("r1", Some("u1"), 105.0, 1)).await.unwrap();

        // Parent becomes a regular file, so every later write fails
        std::fs::remove_dir_all(&data_dir).unwrap();
        std::fs::write(&data_dir, "not a directory").unwrap();

        let err = store
            .save_route(route("r2", Some("u1"), 50.0, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.get("r2").await, None);
        assert_eq!(
            store.city_totals().await,
            EmissionTotals {
                total_emission_g: 105.0,
                route_count: 1,
            }
        );

        // A retry writes again instead of reporting a duplicate
        assert!(store.save_route(route("r2", Some("u1"), 50.0, 2)).await.is_err());

        let choice = Choice {
            user_id: Some("u1".to_string()),
            route_id: "r1".to_string(),
            chosen_at_secs: 3,
        };
        assert!(store.record_choice(choice).await.is_err());
        assert!(store.choices_for_user("u1").await.is_empty());
    }

    #[test]
    fn corrupt_snapshot_fails_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            RouteStore::open(&path),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
