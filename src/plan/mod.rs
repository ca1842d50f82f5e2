// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song plans: binary track-by-loop presence matrices.
//!
//! This module provides:
//! - The `Plan` matrix (rows = tracks, columns = loop slots)
//! - The four generation policies
//! - Full factorial design enumeration

pub mod factorial;
pub mod generator;

pub use factorial::full_factorial;
pub use generator::{generate, generate_named, generate_with_rng, MAX_FACTORIAL_TRACKS};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StimulusError};

/// Conventional track labels for the four-track stimulus sets
pub const TRACK_NAMES: [&str; 4] = ["bass", "drum", "fx", "melody"];

/// Plan generation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPolicy {
    /// Independent fair bits with silent rows/columns repaired
    Random,
    /// Fixed 4x8 pattern from the loop-layering literature
    LopezSerrano,
    /// Every non-silent track combination, in design order
    Factorial,
    /// Factorial combinations in seeded random order
    FactorialRandom,
}

impl PlanPolicy {
    /// All policies
    pub const ALL: [PlanPolicy; 4] = [
        PlanPolicy::Random,
        PlanPolicy::LopezSerrano,
        PlanPolicy::Factorial,
        PlanPolicy::FactorialRandom,
    ];

    /// Policy name as used in configs and output directories
    pub fn as_str(self) -> &'static str {
        match self {
            PlanPolicy::Random => "random",
            PlanPolicy::LopezSerrano => "lopez_serrano",
            PlanPolicy::Factorial => "factorial",
            PlanPolicy::FactorialRandom => "factorial_random",
        }
    }

    /// Whether the policy draws from the seeded generator
    pub fn uses_rng(self) -> bool {
        matches!(self, PlanPolicy::Random | PlanPolicy::FactorialRandom)
    }
}

impl fmt::Display for PlanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanPolicy {
    type Err = StimulusError;

    fn from_str(s: &str) -> Result<Self> {
        PlanPolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| StimulusError::UnknownPolicy(s.to_string()))
    }
}

/// Binary presence matrix, stored row-major
///
/// Positional accessors never panic: `get` and `column` read out-of-range
/// positions as 0, `row` returns `None`, and writes to out-of-range
/// positions are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    tracks: usize,
    loops: usize,
    cells: Vec<u8>,
}

impl Plan {
    /// Create an all-silent plan
    pub fn zeros(tracks: usize, loops: usize) -> Self {
        Self {
            tracks,
            loops,
            cells: vec![0; tracks * loops],
        }
    }

    /// Build a plan from rows, validating shape and entries
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let tracks = rows.len();
        let loops = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut cells = Vec::with_capacity(tracks * loops);

        for (track, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != loops {
                return Err(StimulusError::RaggedPlan {
                    row: track,
                    len: row.len(),
                    expected: loops,
                });
            }
            for (loop_index, &value) in row.iter().enumerate() {
                if value > 1 {
                    return Err(StimulusError::NonBinaryEntry {
                        track,
                        loop_index,
                        value,
                    });
                }
            }
            cells.extend_from_slice(row);
        }

        Ok(Self { tracks, loops, cells })
    }

    /// Number of tracks (rows)
    pub fn tracks(&self) -> usize {
        self.tracks
    }

    /// Number of loop slots (columns)
    pub fn loops(&self) -> usize {
        self.loops
    }

    /// Whether the plan has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.tracks == 0 || self.loops == 0
    }

    /// Entry at (track, loop); out-of-range positions read as 0
    pub fn get(&self, track: usize, loop_index: usize) -> u8 {
        if track < self.tracks && loop_index < self.loops {
            self.cells[track * self.loops + loop_index]
        } else {
            0
        }
    }

    /// Whether a track plays in a loop slot
    pub fn is_active(&self, track: usize, loop_index: usize) -> bool {
        self.get(track, loop_index) == 1
    }

    /// Set an entry; out-of-range positions are ignored
    pub fn set(&mut self, track: usize, loop_index: usize, active: bool) {
        if track < self.tracks && loop_index < self.loops {
            self.cells[track * self.loops + loop_index] = active as u8;
        }
    }

    /// One track's row, or `None` past the last track
    pub fn row(&self, track: usize) -> Option<&[u8]> {
        (track < self.tracks).then(|| self.row_cells(track))
    }

    fn row_cells(&self, track: usize) -> &[u8] {
        let start = track * self.loops;
        &self.cells[start..start + self.loops]
    }

    /// One loop slot's column; all zeros past the last loop
    pub fn column(&self, loop_index: usize) -> Vec<u8> {
        (0..self.tracks).map(|track| self.get(track, loop_index)).collect()
    }

    /// All rows as owned vectors
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.tracks).map(|track| self.row_cells(track).to_vec()).collect()
    }

    /// Number of loops a track plays in
    pub fn row_sum(&self, track: usize) -> usize {
        self.row(track)
            .map(|row| row.iter().map(|&v| v as usize).sum())
            .unwrap_or(0)
    }

    /// Number of tracks playing in a loop slot
    pub fn column_sum(&self, loop_index: usize) -> usize {
        (0..self.tracks)
            .map(|track| self.get(track, loop_index) as usize)
            .sum()
    }

    /// Tracks that never play
    pub fn silent_rows(&self) -> Vec<usize> {
        (0..self.tracks).filter(|&t| self.row_sum(t) == 0).collect()
    }

    /// Loop slots where nothing plays
    pub fn silent_columns(&self) -> Vec<usize> {
        (0..self.loops).filter(|&l| self.column_sum(l) == 0).collect()
    }

    /// Activate a whole row; out-of-range tracks are ignored
    pub(crate) fn fill_row(&mut self, track: usize) {
        if track < self.tracks {
            let start = track * self.loops;
            self.cells[start..start + self.loops].fill(1);
        }
    }

    /// Activate a whole column; out-of-range loops are ignored
    pub(crate) fn fill_column(&mut self, loop_index: usize) {
        for track in 0..self.tracks {
            self.set(track, loop_index, true);
        }
    }

    /// Reorder columns; `order[k]` is the source column placed at `k`
    pub fn permute_columns(&self, order: &[usize]) -> Plan {
        let mut permuted = Plan::zeros(self.tracks, order.len());
        for (dest, &src) in order.iter().enumerate() {
            for track in 0..self.tracks {
                permuted.cells[track * order.len() + dest] = self.get(track, src);
            }
        }
        permuted
    }

    /// Copy with every row except `track` silenced
    pub fn solo(&self, track: usize) -> Result<Plan> {
        if track >= self.tracks {
            return Err(StimulusError::SoloTrackOutOfRange {
                index: track,
                tracks: self.tracks,
            });
        }

        let mut soloed = Plan::zeros(self.tracks, self.loops);
        let start = track * self.loops;
        soloed.cells[start..start + self.loops].copy_from_slice(self.row_cells(track));
        Ok(soloed)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for track in 0..self.tracks {
            let cells: Vec<String> = self.row_cells(track).iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
