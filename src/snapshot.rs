//! Artist list snapshot files
//!
//! A snapshot is a JSON array of artist records written after discovery.
//! Feeding it back on a later run skips re-discovery entirely, which is the
//! usual way to resume a long harvest: discover once, then re-run ingestion
//! against the same list until the recrawl gate reports nothing missing.

use crate::model::Artist;
use crate::HarvestError;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes the artist list to a snapshot file
pub fn write_snapshot(path: &Path, artists: &[Artist]) -> Result<(), HarvestError> {
    let file = File::create(path).map_err(|e| snapshot_error(path, e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, artists).map_err(|e| snapshot_error(path, e))?;
    Ok(())
}

/// Reads an artist list back from a snapshot file
pub fn read_snapshot(path: &Path) -> Result<Vec<Artist>, HarvestError> {
    let file = File::open(path).map_err(|e| snapshot_error(path, e))?;
    let reader = BufReader::new(file);
    let artists = serde_json::from_reader(reader).map_err(|e| snapshot_error(path, e))?;
    Ok(artists)
}

fn snapshot_error(path: &Path, cause: impl std::fmt::Display) -> HarvestError {
    HarvestError::Snapshot {
        path: path.display().to_string(),
        message: cause.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_snapshot_survives_write_and_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artists.json");

        let mut resolved = Artist::stub("MF DOOM", "https://example.com/artists/Mf-doom");
        resolved.artist_id = Some(16754);
        let artists = vec![
            resolved,
            Artist::stub("Madlib", "https://example.com/artists/Madlib"),
        ];

        write_snapshot(&path, &artists).unwrap();
        let restored = read_snapshot(&path).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].name, "MF DOOM");
        assert_eq!(restored[0].artist_id, Some(16754));
        assert_eq!(restored[1].artist_id, None);
        assert!(restored.iter().all(|artist| artist.works.is_empty()));
    }

    #[test]
    fn test_read_missing_snapshot_errors() {
        let result = read_snapshot(Path::new("/nonexistent/artists.json"));
        assert!(matches!(result, Err(HarvestError::Snapshot { .. })));
    }

    #[test]
    fn test_read_rejects_malformed_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("artists.json");
        std::fs::write(&path, "not json at all").unwrap();

        let result = read_snapshot(&path);
        assert!(matches!(result, Err(HarvestError::Snapshot { .. })));
    }
}
