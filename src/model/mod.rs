//! Core data model for the harvest pipeline
//!
//! This module defines the records that flow through the pipeline:
//! - `Artist`: the unit of work, from discovery stub to fully populated record
//! - `Work`: a single song with its lyrics payload
//! - `StorageKey`: the deterministic storage location derived from an artist

use serde::{Deserialize, Serialize};
use std::fmt;

/// An artist moving through the pipeline
///
/// Discovery creates artists in stub form (name and profile URL only). The
/// ingest worker resolves the numeric `artist_id`, populates `works`, and
/// clears `works` again after a successful store so a long run does not
/// accumulate lyrics payloads in memory. Storage holds the authoritative
/// full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Display name as scraped from the catalog index
    pub name: String,

    /// Absolute URL of the artist's profile page
    pub url: String,

    /// Numeric provider identity, resolved from the profile page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<u64>,

    /// The artist's works; empty until ingested, cleared after storing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub works: Vec<Work>,
}

impl Artist {
    /// Creates a discovery stub with no resolved identity and no works
    pub fn stub(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            artist_id: None,
            works: Vec::new(),
        }
    }

    /// Returns the partition character for this artist
    ///
    /// The partition is the lowercased first character of the display name,
    /// or '_' when the name has no characters.
    pub fn partition(&self) -> char {
        partition_of(&self.name)
    }

    /// Returns the deterministic storage key for this artist
    ///
    /// The same artist always maps to the same key, which is what makes
    /// overwrites idempotent and existence checks usable for dedup.
    pub fn storage_key(&self) -> StorageKey {
        StorageKey::for_name(&self.name)
    }

    /// Drops the works payload, keeping the lightweight identity marker
    pub fn release_works(&mut self) {
        self.works = Vec::new();
    }
}

/// A single song fetched from the lyrics provider
///
/// The payload is opaque to the pipeline; the only interpretation applied is
/// "absent or empty lyrics means the work has no content".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
    /// Song title
    pub title: String,

    /// Full lyrics text; may be empty
    #[serde(default)]
    pub lyrics: String,

    /// Provider-specific metadata, passed through untouched
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl Work {
    /// Returns true when the work carries non-whitespace lyrics text
    pub fn has_content(&self) -> bool {
        !self.lyrics.trim().is_empty()
    }
}

/// Deterministic storage location for an artist's record
///
/// Rendered as `<partition>/<name>.json`, where the partition is the
/// lowercased first character of the display name. Path separators in names
/// are replaced so the key stays a two-segment path on every backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    partition: char,
    name: String,
}

impl StorageKey {
    /// Derives the key for a display name
    pub fn for_name(name: &str) -> Self {
        Self {
            partition: partition_of(name),
            name: sanitize_name(name),
        }
    }

    /// The partition character of this key
    pub fn partition(&self) -> char {
        self.partition
    }

    /// The sanitized entity name of this key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the key as a relative object path
    pub fn object_path(&self) -> String {
        format!("{}/{}.json", self.partition, self.name)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.object_path())
    }
}

/// Computes the partition character for a display name
pub fn partition_of(name: &str) -> char {
    name.trim()
        .chars()
        .next()
        .and_then(|c| c.to_lowercase().next())
        .unwrap_or('_')
}

/// Replaces characters that would break the key's path structure
fn sanitize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "_".to_string();
    }
    trimmed
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_has_no_identity_or_works() {
        let artist = Artist::stub("MF DOOM", "https://example.com/artists/Mf-doom");
        assert_eq!(artist.name, "MF DOOM");
        assert!(artist.artist_id.is_none());
        assert!(artist.works.is_empty());
    }

    #[test]
    fn test_partition_is_lowercased_first_char() {
        assert_eq!(partition_of("Madvillain"), 'm');
        assert_eq!(partition_of("aesop rock"), 'a');

        let artist = Artist::stub("Madvillain", "https://example.com/artists/Madvillain");
        assert_eq!(artist.partition(), 'm');
    }

    #[test]
    fn test_partition_of_numeric_name() {
        assert_eq!(partition_of("2Pac"), '2');
    }

    #[test]
    fn test_partition_of_empty_name() {
        assert_eq!(partition_of(""), '_');
        assert_eq!(partition_of("   "), '_');
    }

    #[test]
    fn test_storage_key_is_stable() {
        let a = Artist::stub("Quasimoto", "https://example.com/artists/Quasimoto");
        let b = a.clone();
        assert_eq!(a.storage_key(), b.storage_key());
        assert_eq!(a.storage_key().object_path(), "q/Quasimoto.json");
    }

    #[test]
    fn test_storage_key_sanitizes_path_separators() {
        let key = StorageKey::for_name("AC/DC");
        assert_eq!(key.object_path(), "a/AC_DC.json");
    }

    #[test]
    fn test_storage_key_display_matches_object_path() {
        let key = StorageKey::for_name("Nas");
        assert_eq!(key.to_string(), key.object_path());
    }

    #[test]
    fn test_release_works_keeps_identity() {
        let mut artist = Artist::stub("Czarface", "https://example.com/artists/Czarface");
        artist.artist_id = Some(92);
        artist.works.push(Work {
            title: "Bomb Thrown".to_string(),
            lyrics: "...".to_string(),
            metadata: serde_json::Value::Null,
        });

        artist.release_works();

        assert!(artist.works.is_empty());
        assert_eq!(artist.artist_id, Some(92));
        assert_eq!(artist.name, "Czarface");
    }

    #[test]
    fn test_stub_serialization_omits_empty_fields() {
        let artist = Artist::stub("Doomtree", "https://example.com/artists/Doomtree");
        let json = serde_json::to_string(&artist).unwrap();
        assert!(!json.contains("artist_id"));
        assert!(!json.contains("works"));
    }

    #[test]
    fn test_work_content_detection() {
        let mut work = Work {
            title: "Accordion".to_string(),
            lyrics: String::new(),
            metadata: serde_json::Value::Null,
        };
        assert!(!work.has_content());

        work.lyrics = "   \n  ".to_string();
        assert!(!work.has_content());

        work.lyrics = "living off borrowed time".to_string();
        assert!(work.has_content());
    }
}
