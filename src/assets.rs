//! Local static assets: waypoints file and tile-set directories.

use std::fs;
use std::path::Path;

use crate::error::{Result, TrackError};

/// Reads the waypoints file as text.
pub fn read_waypoints(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TrackError::asset_unavailable(path.display(), e))
}

/// Lists the tile sets under `root`, sorted by name.
///
/// A tile set is an immediate subdirectory. Hidden entries (`.git`) and
/// system entries (`__MACOSX`) are skipped.
pub fn list_tile_sets(root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(root).map_err(|e| TrackError::asset_unavailable(root.display(), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TrackError::asset_unavailable(root.display(), e))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        // Follows symlinks, so linked tile sets count
        if entry.path().is_dir() {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn reads_waypoints_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waypoints.txt");
        fs::write(&path, "WP1 41.5 -70.6\nWP2 42.0 -71.0\n").unwrap();

        assert_eq!(read_waypoints(&path).unwrap(), "WP1 41.5 -70.6\nWP2 42.0 -71.0\n");
    }

    #[test]
    fn missing_waypoints_is_asset_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_waypoints(&dir.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.code, ErrorCode::AssetUnavailable);
        assert!(err.message.contains("nope.txt"));
    }

    #[test]
    fn lists_sorted_visible_directories() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["satellite", "bathymetry", ".cache", "__MACOSX", "nautical"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("README.txt"), "not a tile set").unwrap();

        assert_eq!(
            list_tile_sets(dir.path()).unwrap(),
            vec!["bathymetry", "nautical", "satellite"]
        );
    }

    #[test]
    fn empty_root_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_tile_sets(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_asset_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_tile_sets(&dir.path().join("tiles")).unwrap_err();
        assert_eq!(err.code, ErrorCode::AssetUnavailable);
    }
}
