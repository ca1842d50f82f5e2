// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sample rate conversion by linear interpolation.

/// Render rate of the published stimulus sets
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Resample mono audio from `source_rate` to `target_rate`
///
/// Output length is `ceil(len * target_rate / source_rate)`. Each output
/// sample interpolates between its two nearest source samples; past the
/// last pair the final source sample is held. Equal rates return a copy.
pub fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if samples.is_empty() || source_rate == target_rate {
        return samples.to_vec();
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let output_len =
        (samples.len() as u64 * target_rate as u64).div_ceil(source_rate as u64) as usize;

    (0..output_len)
        .map(|i| {
            let src_pos = i as f64 * ratio;
            let src_idx = src_pos.floor() as usize;
            let frac = (src_pos - src_idx as f64) as f32;

            match (samples.get(src_idx), samples.get(src_idx + 1)) {
                (Some(&s1), Some(&s2)) => s1 + (s2 - s1) * frac,
                (Some(&s1), None) => s1,
                _ => samples[samples.len() - 1],
            }
        })
        .collect()
}
