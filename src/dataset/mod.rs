// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Dataset builds.
//!
//! Renders every grouping key of a clip library under every configured
//! plan policy, as full mixes and as one solo file per track. All plans
//! are generated before anything is written, so a bad policy or size
//! leaves the output directory untouched.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::assembly::assemble;
use crate::config::DatasetConfig;
use crate::library::{write_waveform, ClipLibrary};
use crate::plan::{generate, Plan, PlanPolicy};

/// Summary of a finished build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetReport {
    /// Grouping keys rendered
    pub groups: usize,
    /// Files written, in write order
    pub files: Vec<PathBuf>,
}

/// Renders a configured dataset from a clip library
pub struct DatasetBuilder {
    config: DatasetConfig,
    library: ClipLibrary,
}

impl DatasetBuilder {
    /// Create a builder
    pub fn new(config: DatasetConfig, library: ClipLibrary) -> Self {
        Self { config, library }
    }

    /// Get config
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Get library
    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    /// Generate one plan per configured policy
    pub fn plans(&self) -> Result<Vec<(PlanPolicy, Plan)>> {
        let plan_config = &self.config.plan;
        plan_config
            .policies
            .iter()
            .map(|&policy| -> Result<(PlanPolicy, Plan)> {
                let plan = generate(plan_config.loops, plan_config.tracks, policy, plan_config.seed)
                    .with_context(|| format!("Failed to generate {} plan", policy))?;
                Ok((policy, plan))
            })
            .collect()
    }

    /// Path of a full mix
    pub fn tutti_path(&self, policy: PlanPolicy, key: &str) -> PathBuf {
        self.policy_dir(&self.config.render.tutti_dir, policy)
            .join(format!("{}.{}", key, self.config.render.extension))
    }

    /// Path of a solo render
    pub fn solo_path(&self, policy: PlanPolicy, key: &str, track: usize) -> PathBuf {
        self.policy_dir(&self.config.render.solo_dir, policy)
            .join(format!("{}_{}.{}", key, track, self.config.render.extension))
    }

    fn policy_dir(&self, folder: &str, policy: PlanPolicy) -> PathBuf {
        self.config
            .dataset
            .output_dir
            .join(folder)
            .join(policy.as_str())
    }

    /// Render and write the whole dataset
    pub fn build(&self) -> Result<DatasetReport> {
        self.config.validate()?;
        let plans = self.plans()?;
        let render = &self.config.render;

        for (policy, _) in &plans {
            let folders = [(render.tutti, &render.tutti_dir), (render.solo, &render.solo_dir)];
            for (enabled, folder) in folders {
                if enabled {
                    let dir = self.policy_dir(folder, *policy);
                    fs::create_dir_all(&dir)
                        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
                }
            }
        }

        let mut report = DatasetReport::default();

        for key in self.library.keys() {
            let set = self
                .library
                .load_group(key, render.sample_rate)
                .with_context(|| format!("Failed to load clips for {:?}", key))?;
            info!(
                group = key,
                clips = set.clips.len(),
                sample_rate = set.sample_rate,
                "rendering group"
            );

            for (policy, plan) in &plans {
                if render.tutti {
                    let song = assemble(plan, &set.clips, None)?;
                    let path = self.tutti_path(*policy, key);
                    write_waveform(&path, &song.samples, set.sample_rate)?;
                    debug!(path = ?path, samples = song.samples.len(), "wrote tutti render");
                    report.files.push(path);
                }

                if render.solo {
                    for track in 0..plan.tracks() {
                        let song = assemble(plan, &set.clips, Some(track))?;
                        let path = self.solo_path(*policy, key, track);
                        write_waveform(&path, &song.samples, set.sample_rate)?;
                        debug!(path = ?path, track, "wrote solo render");
                        report.files.push(path);
                    }
                }
            }

            report.groups += 1;
        }

        info!(groups = report.groups, files = report.files.len(), "dataset complete");
        Ok(report)
    }
}
