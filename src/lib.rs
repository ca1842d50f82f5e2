// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Layered loop stimuli for music-cognition experiments.
//!
//! Short instrument loops are arranged into song plans (binary
//! track-by-loop matrices) and summed into mono waveforms, as full mixes
//! or with a single track soloed.

pub mod assembly;
pub mod config;
pub mod dataset;
pub mod error;
pub mod library;
pub mod plan;
pub mod random;

pub use assembly::{assemble, AssembledWaveform, AudioClip};
pub use config::DatasetConfig;
pub use dataset::{DatasetBuilder, DatasetReport};
pub use error::{Result, StimulusError};
pub use library::{ClipLibrary, ClipSet};
pub use plan::{generate, generate_named, Plan, PlanPolicy};
pub use random::Mt19937;
