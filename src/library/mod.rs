// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Source clip library.
//!
//! This module provides:
//! - The index of grouping keys (tempo + genre) to track names, built
//!   once from a directory of `tempo_genre_track.wav` files
//! - Loading every track of a grouping key as a `ClipSet` at one rate
//! - WAV reading and writing, and sample rate conversion

pub mod resample;
pub mod wav;

pub use resample::{resample, DEFAULT_SAMPLE_RATE};
pub use wav::{read_clip, write_waveform};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::assembly::AudioClip;

/// Clips of one grouping key with their shared sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSet {
    /// Sample rate shared by every clip
    pub sample_rate: u32,
    /// Clips in track order
    pub clips: Vec<AudioClip>,
}

/// Immutable index of grouping keys to track names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipLibrary {
    root: PathBuf,
    groups: BTreeMap<String, Vec<String>>,
}

impl ClipLibrary {
    /// Index every `tempo_genre_track.wav` file in a directory
    ///
    /// Files whose stem does not have exactly three `_`-separated parts
    /// are skipped with a warning.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        let entries = fs::read_dir(&root)
            .with_context(|| format!("Failed to read clip directory: {:?}", root))?;

        let mut pairs = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read clip directory: {:?}", root))?
                .path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("wav") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = ?path, "skipping clip with non-UTF-8 name");
                continue;
            };
            match split_clip_name(stem) {
                Some(pair) => pairs.push(pair),
                None => warn!(path = ?path, "skipping clip not named tempo_genre_track.wav"),
            }
        }

        let library = Self::from_entries(root, pairs);
        debug!(groups = library.len(), "indexed clip library");
        Ok(library)
    }

    /// Build an index from (grouping key, track name) pairs
    pub fn from_entries<P, I, K, T>(root: P, entries: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<String>,
    {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, track) in entries {
            let tracks = groups.entry(key.into()).or_default();
            let track = track.into();
            if !tracks.contains(&track) {
                tracks.push(track);
            }
        }
        for tracks in groups.values_mut() {
            tracks.sort();
        }

        Self {
            root: root.into(),
            groups,
        }
    }

    /// Directory the clips live in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Grouping keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Track names of a grouping key, sorted
    pub fn tracks(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of grouping keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the library has no clips
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// File path of one clip
    pub fn clip_path(&self, key: &str, track: &str) -> PathBuf {
        self.root.join(format!("{}_{}.wav", key, track))
    }

    /// Load every track of a grouping key, in track order
    ///
    /// Each clip is resampled to `sample_rate`, so clips recorded at
    /// different rates can share a group. Fails if the key is unknown or
    /// a clip is empty.
    pub fn load_group(&self, key: &str, sample_rate: u32) -> Result<ClipSet> {
        let Some(tracks) = self.tracks(key) else {
            bail!("Unknown grouping key: {:?}", key);
        };
        if sample_rate == 0 {
            bail!("Target sample rate must be non-zero");
        }

        let mut clips = Vec::with_capacity(tracks.len());

        for track in tracks {
            let path = self.clip_path(key, track);
            let (samples, rate) = read_clip(&path)?;

            if samples.is_empty() {
                bail!("Clip has no samples: {:?}", path);
            }
            if rate == 0 {
                bail!("Clip has a sample rate of 0 Hz: {:?}", path);
            }
            if rate != sample_rate {
                debug!(path = ?path, from = rate, to = sample_rate, "resampling clip");
            }

            clips.push(AudioClip::new(track.clone(), resample(&samples, rate, sample_rate)));
        }

        Ok(ClipSet { sample_rate, clips })
    }
}

/// Split `tempo_genre_track` into (`tempo_genre`, `track`)
fn split_clip_name(stem: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = stem.split('_').collect();
    match parts.as_slice() {
        [tempo, genre, track] if !tempo.is_empty() && !genre.is_empty() && !track.is_empty() => {
            Some((format!("{}_{}", tempo, genre), track.to_string()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_split_clip_name() {
        assert_eq!(
            split_clip_name("120_house_bass"),
            Some(("120_house".to_string(), "bass".to_string()))
        );
        assert_eq!(split_clip_name("120_house"), None);
        assert_eq!(split_clip_name("120_deep_house_bass"), None);
        assert_eq!(split_clip_name("120__bass"), None);
    }

    #[test]
    fn test_from_entries_sorts_and_dedups() {
        let library = ClipLibrary::from_entries(
            "/clips",
            vec![
                ("128_techno", "melody"),
                ("128_techno", "bass"),
                ("100_hiphop", "drum"),
                ("128_techno", "bass"),
            ],
        );

        assert_eq!(library.len(), 2);
        assert_eq!(library.keys().collect::<Vec<_>>(), vec!["100_hiphop", "128_techno"]);
        assert_eq!(
            library.tracks("128_techno").unwrap(),
            &["bass".to_string(), "melody".to_string()]
        );
        assert!(library.tracks("90_dub").is_none());
        assert_eq!(
            library.clip_path("100_hiphop", "drum"),
            PathBuf::from("/clips/100_hiphop_drum.wav")
        );
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempdir().unwrap();
        for name in ["120_house_drum", "120_house_bass", "90_dub_fx"] {
            write_waveform(dir.path().join(format!("{}.wav", name)), &[0.1, 0.2], 22050).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("badname.wav"), "ignored").unwrap();

        let library = ClipLibrary::scan(dir.path()).unwrap();
        assert_eq!(library.keys().collect::<Vec<_>>(), vec!["120_house", "90_dub"]);
        assert_eq!(
            library.tracks("120_house").unwrap(),
            &["bass".to_string(), "drum".to_string()]
        );
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(ClipLibrary::scan(dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_load_group() {
        let dir = tempdir().unwrap();
        write_waveform(dir.path().join("120_house_drum.wav"), &[0.5; 3], 22050).unwrap();
        write_waveform(dir.path().join("120_house_bass.wav"), &[0.25; 5], 22050).unwrap();

        let library = ClipLibrary::scan(dir.path()).unwrap();
        let set = library.load_group("120_house", 22050).unwrap();

        assert_eq!(set.sample_rate, 22050);
        assert_eq!(set.clips.len(), 2);
        assert_eq!(set.clips[0].name, "bass");
        assert_eq!(set.clips[0].len(), 5);
        assert_eq!(set.clips[1].name, "drum");
    }

    #[test]
    fn test_load_group_resamples_mixed_rates() {
        let dir = tempdir().unwrap();
        // One second of each
        write_waveform(dir.path().join("120_house_bass.wav"), &[0.25; 44100], 44100).unwrap();
        write_waveform(dir.path().join("120_house_drum.wav"), &[0.5; 48000], 48000).unwrap();

        let library = ClipLibrary::scan(dir.path()).unwrap();
        let set = library.load_group("120_house", DEFAULT_SAMPLE_RATE).unwrap();

        assert_eq!(set.sample_rate, 22050);
        assert_eq!(set.clips[0].name, "bass");
        assert_eq!(set.clips[0].len(), 22050);
        assert_eq!(set.clips[1].name, "drum");
        assert_eq!(set.clips[1].len(), 22050);
        assert!(set.clips[0].samples.iter().all(|&s| s == 0.25));
        assert!(set.clips[1].samples.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn test_load_group_native_rate_untouched() {
        let dir = tempdir().unwrap();
        write_waveform(dir.path().join("90_dub_fx.wav"), &[0.1, 0.2, 0.3], 44100).unwrap();

        let library = ClipLibrary::scan(dir.path()).unwrap();
        let set = library.load_group("90_dub", 44100).unwrap();
        assert_eq!(set.sample_rate, 44100);
        assert_eq!(set.clips[0].samples, vec![0.1, 0.2, 0.3]);

        assert!(library.load_group("90_dub", 0).is_err());
    }

    #[test]
    fn test_load_group_rejects_empty_clip() {
        let dir = tempdir().unwrap();
        write_waveform(dir.path().join("120_house_drum.wav"), &[], 22050).unwrap();

        let library = ClipLibrary::scan(dir.path()).unwrap();
        assert!(library.load_group("120_house", 22050).is_err());
        assert!(library.load_group("missing_key", 22050).is_err());
    }
}
