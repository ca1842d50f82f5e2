// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for plan generation and song assembly.
//!
//! Every variant is an invalid-argument condition: the call is aborted
//! and no partial result is returned. Resource mismatches that can be
//! resolved (fewer clips than tracks) are logged instead of raised.

use thiserror::Error;

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, StimulusError>;

/// Invalid-argument conditions raised by the plan generator and assembler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StimulusError {
    /// Policy name not recognized
    #[error("unknown plan policy: {0:?} (expected random, lopez_serrano, factorial or factorial_random)")]
    UnknownPolicy(String),

    /// A size argument is out of range
    #[error("invalid {name}: {value} ({reason})")]
    InvalidDimension {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// Fixed-pattern policy called with a different track count
    #[error("policy {policy} has {expected} tracks, but tracks = {actual}")]
    TrackCountMismatch {
        policy: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No clips to assemble from
    #[error("clips: no clips supplied")]
    EmptyClipSet,

    /// Every clip has zero samples
    #[error("clips: all {count} clips are empty")]
    SilentClips { count: usize },

    /// Plan without rows or columns
    #[error("plan: degenerate shape {tracks}x{loops}")]
    EmptyPlan { tracks: usize, loops: usize },

    /// Rows of differing lengths
    #[error("plan: row {row} has {len} entries, expected {expected}")]
    RaggedPlan { row: usize, len: usize, expected: usize },

    /// Entry other than 0 or 1
    #[error("plan: entry ({track}, {loop_index}) = {value}, expected 0 or 1")]
    NonBinaryEntry {
        track: usize,
        loop_index: usize,
        value: u8,
    },

    /// Solo index beyond the plan's rows
    #[error("solo_track: {index} is out of range for a plan with {tracks} tracks")]
    SoloTrackOutOfRange { index: usize, tracks: usize },
}
