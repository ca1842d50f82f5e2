// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Song assembly.
//!
//! Lays per-track clips into loop slots according to a plan and sums
//! them into one mono waveform. Slots are as long as the longest clip;
//! shorter clips leave the rest of their slot untouched.

use tracing::warn;

use crate::error::{Result, StimulusError};
use crate::plan::Plan;

/// One mono source clip
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Clip name (track name in the library)
    pub name: String,
    /// Samples
    pub samples: Vec<f32>,
}

impl AudioClip {
    /// Create a clip
    pub fn new(name: impl Into<String>, samples: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    /// Length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the clip has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Rendered song with loop boundaries
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledWaveform {
    /// Output samples, `loops * loop_length` long
    pub samples: Vec<f32>,
    /// Start sample of each loop slot, plus the end of the last one
    pub downbeat_times: Vec<usize>,
    /// Slot length in samples
    pub loop_length: usize,
}

impl AssembledWaveform {
    /// Number of loop slots
    pub fn loops(&self) -> usize {
        self.downbeat_times.len().saturating_sub(1)
    }

    /// Samples of one loop slot, or `None` past the last slot
    pub fn segment(&self, loop_index: usize) -> Option<&[f32]> {
        let start = *self.downbeat_times.get(loop_index)?;
        let end = *self.downbeat_times.get(loop_index + 1)?;
        self.samples.get(start..end)
    }

    /// Duration in seconds at the given sample rate
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        self.samples.len() as f64 / sample_rate as f64
    }
}

/// Assemble a song from a plan and one clip per track
///
/// Track `i` plays clip `i % clips.len()`; fewer clips than tracks is
/// logged and the clips are reused in order. With `solo_track`, every
/// other row of the plan is silenced first.
pub fn assemble(
    plan: &Plan,
    clips: &[AudioClip],
    solo_track: Option<usize>,
) -> Result<AssembledWaveform> {
    if clips.is_empty() {
        return Err(StimulusError::EmptyClipSet);
    }
    if plan.is_empty() {
        return Err(StimulusError::EmptyPlan {
            tracks: plan.tracks(),
            loops: plan.loops(),
        });
    }

    let soloed;
    let plan = match solo_track {
        Some(track) => {
            soloed = plan.solo(track)?;
            &soloed
        }
        None => plan,
    };

    let loop_length = clips.iter().map(AudioClip::len).max().unwrap_or(0);
    if loop_length == 0 {
        return Err(StimulusError::SilentClips { count: clips.len() });
    }

    if plan.tracks() > clips.len() {
        warn!(
            tracks = plan.tracks(),
            clips = clips.len(),
            "fewer clips than planned tracks, reusing clips in order"
        );
    }

    let loops = plan.loops();
    let mut samples = vec![0.0f32; loops * loop_length];
    let downbeat_times: Vec<usize> = (0..=loops).map(|j| j * loop_length).collect();

    for track in 0..plan.tracks() {
        let clip = &clips[track % clips.len()];
        for loop_index in 0..loops {
            if !plan.is_active(track, loop_index) {
                continue;
            }
            let start = downbeat_times[loop_index];
            let slot = &mut samples[start..start + clip.len()];
            for (out, &sample) in slot.iter_mut().zip(&clip.samples) {
                *out += sample;
            }
        }
    }

    Ok(AssembledWaveform {
        samples,
        downbeat_times,
        loop_length,
    })
}
