// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for dataset builds.
//!
//! A YAML run file names the clip directory, the plan policies to render,
//! which renders (tutti, solo) to write and the rate they are written at.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::library::DEFAULT_SAMPLE_RATE;
use crate::plan::PlanPolicy;

/// Root configuration for a dataset build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetConfig {
    /// Source and destination directories
    pub dataset: DatasetPaths,
    /// Plan generation settings
    #[serde(default)]
    pub plan: PlanConfig,
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
}

impl DatasetConfig {
    /// Load a dataset configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a dataset configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.plan.loops == 0 {
            bail!("plan.loops must be at least 1");
        }
        if self.plan.tracks == 0 {
            bail!("plan.tracks must be at least 1");
        }
        if self.plan.policies.is_empty() {
            bail!("plan.policies must name at least one policy");
        }
        if self.render.sample_rate == 0 {
            bail!("render.sample_rate must be non-zero");
        }
        if self.render.extension.is_empty() {
            bail!("render.extension must not be empty");
        }
        Ok(())
    }
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetPaths {
    /// Directory of `tempo_genre_track.wav` clips
    pub source_dir: PathBuf,
    /// Directory the render folders are created in
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Plan generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanConfig {
    /// Loop slots for the random policy
    #[serde(default = "default_loops")]
    pub loops: usize,
    /// Tracks per plan
    #[serde(default = "default_tracks")]
    pub tracks: usize,
    /// Generator seed (0 reproduces the published sets)
    #[serde(default)]
    pub seed: u32,
    /// Policies to render, in order
    #[serde(default = "default_policies")]
    pub policies: Vec<PlanPolicy>,
}

fn default_loops() -> usize {
    15
}
fn default_tracks() -> usize {
    4
}
fn default_policies() -> Vec<PlanPolicy> {
    vec![
        PlanPolicy::LopezSerrano,
        PlanPolicy::Factorial,
        PlanPolicy::FactorialRandom,
    ]
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            loops: default_loops(),
            tracks: default_tracks(),
            seed: 0,
            policies: default_policies(),
        }
    }
}

/// Which renders to write and where
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Write full mixes
    #[serde(default = "default_true")]
    pub tutti: bool,
    /// Write one solo render per track
    #[serde(default = "default_true")]
    pub solo: bool,
    /// Folder for full mixes, under the output directory
    #[serde(default = "default_tutti_dir")]
    pub tutti_dir: String,
    /// Folder for solo renders, under the output directory
    #[serde(default = "default_solo_dir")]
    pub solo_dir: String,
    /// Rate every clip is resampled to, and the rate of every render
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Output file extension
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_true() -> bool {
    true
}
fn default_tutti_dir() -> String {
    "arranged_clips".to_string()
}
fn default_solo_dir() -> String {
    "solo_clips".to_string()
}
fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}
fn default_extension() -> String {
    "wav".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tutti: true,
            solo: true,
            tutti_dir: default_tutti_dir(),
            solo_dir: default_solo_dir(),
            sample_rate: default_sample_rate(),
            extension: default_extension(),
        }
    }
}
