// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! WAV reading and writing.
//!
//! Clips are read as mono `f32`; renders are written as mono 32-bit
//! float files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Read a WAV file as mono samples
///
/// Integer formats are scaled to -1.0..1.0 and multi-channel frames are
/// averaged. Returns the samples and the file's sample rate.
pub fn read_clip<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let path = path.as_ref();
    let mut reader =
        WavReader::open(path).with_context(|| format!("Failed to open clip: {:?}", path))?;
    let spec = reader.spec();

    let samples: Vec<f32> = if spec.sample_format == SampleFormat::Float {
        reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to decode clip: {:?}", path))?
    } else {
        let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
        reader
            .samples::<i32>()
            .map(|s| s.map(|x| x as f32 / max))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to decode clip: {:?}", path))?
    };

    let channels = spec.channels as usize;
    if channels == 0 {
        bail!("Clip has no channels: {:?}", path);
    }

    let mono = if channels == 1 {
        samples
    } else {
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    Ok((mono, spec.sample_rate))
}

/// Write a mono float WAV file
///
/// The data goes to `<path>.partial` first and is renamed into place,
/// so `path` is either complete or untouched. The parent directory must
/// exist.
pub fn write_waveform<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let result = (|| -> Result<()> {
        let mut writer = WavWriter::create(&partial, spec)
            .with_context(|| format!("Failed to create output file: {:?}", partial))?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .with_context(|| format!("Failed to write output file: {:?}", partial))?;
        }
        writer
            .finalize()
            .with_context(|| format!("Failed to finalize output file: {:?}", partial))
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&partial);
        return Err(err);
    }

    fs::rename(&partial, path)
        .with_context(|| format!("Failed to move {:?} into place at {:?}", partial, path))
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}
