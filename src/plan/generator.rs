// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Plan generation under the four layering policies.
//!
//! Every call owns its generator. `generate` seeds a fresh MT19937 from
//! the caller's seed so a (policy, seed) pair always yields the same plan;
//! `generate_with_rng` accepts any generator for callers that manage
//! their own streams.

use rand::RngCore;
use tracing::debug;

use super::{full_factorial, Plan, PlanPolicy};
use crate::error::{Result, StimulusError};
use crate::random::{random_bit, shuffle, Mt19937};

/// Largest track count accepted by the factorial policies
pub const MAX_FACTORIAL_TRACKS: usize = 16;

/// Track count of the fixed literature pattern
const LOPEZ_SERRANO_TRACKS: usize = 4;

/// Fixed pattern: bass, drum, fx, melody over eight loops
const LOPEZ_SERRANO: [[u8; 8]; LOPEZ_SERRANO_TRACKS] = [
    [0, 0, 1, 1, 0, 1, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 1],
    [0, 0, 0, 1, 0, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 0],
];

/// Generate a plan with a generator seeded from `seed`
pub fn generate(loops: usize, tracks: usize, policy: PlanPolicy, seed: u32) -> Result<Plan> {
    let mut rng = Mt19937::new(seed);
    generate_with_rng(loops, tracks, policy, &mut rng)
}

/// Generate a plan from a policy name
///
/// The name is resolved before any generation work is done.
pub fn generate_named(loops: usize, tracks: usize, policy: &str, seed: u32) -> Result<Plan> {
    let policy: PlanPolicy = policy.parse()?;
    generate(loops, tracks, policy, seed)
}

/// Generate a plan drawing from a caller-owned generator
pub fn generate_with_rng<R: RngCore + ?Sized>(
    loops: usize,
    tracks: usize,
    policy: PlanPolicy,
    rng: &mut R,
) -> Result<Plan> {
    let plan = match policy {
        PlanPolicy::Random => random_plan(loops, tracks, rng)?,
        PlanPolicy::LopezSerrano => lopez_serrano_plan(tracks)?,
        PlanPolicy::Factorial => factorial_plan(tracks)?,
        PlanPolicy::FactorialRandom => {
            let plan = factorial_plan(tracks)?;
            let mut order: Vec<usize> = (0..plan.loops()).collect();
            shuffle(rng, &mut order);
            plan.permute_columns(&order)
        }
    };

    debug!(
        policy = %policy,
        tracks = plan.tracks(),
        loops = plan.loops(),
        "generated plan"
    );
    Ok(plan)
}

fn random_plan<R: RngCore + ?Sized>(loops: usize, tracks: usize, rng: &mut R) -> Result<Plan> {
    check_tracks(tracks)?;
    if loops == 0 {
        return Err(StimulusError::InvalidDimension {
            name: "loops",
            value: loops,
            reason: "must be at least 1",
        });
    }

    // Row-major draw: all of track 0's loops first
    let mut plan = Plan::zeros(tracks, loops);
    for track in 0..tracks {
        for loop_index in 0..loops {
            plan.set(track, loop_index, random_bit(rng) == 1);
        }
    }

    // Columns first, then rows of the repaired matrix
    for loop_index in plan.silent_columns() {
        plan.fill_column(loop_index);
    }
    for track in plan.silent_rows() {
        plan.fill_row(track);
    }

    Ok(plan)
}

fn lopez_serrano_plan(tracks: usize) -> Result<Plan> {
    if tracks != LOPEZ_SERRANO_TRACKS {
        return Err(StimulusError::TrackCountMismatch {
            policy: PlanPolicy::LopezSerrano.as_str(),
            expected: LOPEZ_SERRANO_TRACKS,
            actual: tracks,
        });
    }
    Plan::from_rows(&LOPEZ_SERRANO)
}

fn factorial_plan(tracks: usize) -> Result<Plan> {
    check_tracks(tracks)?;
    if tracks > MAX_FACTORIAL_TRACKS {
        return Err(StimulusError::InvalidDimension {
            name: "tracks",
            value: tracks,
            reason: "factorial designs support at most 16 tracks",
        });
    }
    Ok(full_factorial(tracks))
}

fn check_tracks(tracks: usize) -> Result<()> {
    if tracks == 0 {
        return Err(StimulusError::InvalidDimension {
            name: "tracks",
            value: tracks,
            reason: "must be at least 1",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rows(plan: &Plan) -> Vec<Vec<u8>> {
        plan.to_rows()
    }

    #[test]
    fn test_random_reference_seed_zero() {
        let plan = generate(10, 4, PlanPolicy::Random, 0).unwrap();
        assert_eq!(
            rows(&plan),
            vec![
                vec![0, 1, 1, 0, 1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 1, 0, 0, 0, 0, 0, 1],
                vec![0, 1, 1, 0, 0, 1, 1, 1, 1, 0],
                vec![1, 0, 1, 0, 1, 1, 0, 1, 1, 0],
            ]
        );
    }

    #[test]
    fn test_random_has_no_silent_rows_or_columns() {
        for seed in 0..500u32 {
            let plan = generate(6, 3, PlanPolicy::Random, seed).unwrap();
            assert!(plan.silent_rows().is_empty(), "seed {seed}");
            assert!(plan.silent_columns().is_empty(), "seed {seed}");
        }
    }

    #[test]
    fn test_random_repair_with_any_generator() {
        let mut rng = StdRng::seed_from_u64(2026);
        for _ in 0..200 {
            let plan = generate_with_rng(3, 5, PlanPolicy::Random, &mut rng).unwrap();
            assert!(plan.silent_rows().is_empty());
            assert!(plan.silent_columns().is_empty());
        }
    }

    #[test]
    fn test_random_single_cell_is_always_on() {
        for seed in 0..20u32 {
            let plan = generate(1, 1, PlanPolicy::Random, seed).unwrap();
            assert_eq!(rows(&plan), vec![vec![1]]);
        }
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = generate(12, 4, PlanPolicy::Random, 31).unwrap();
        let b = generate(12, 4, PlanPolicy::Random, 31).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_rejects_degenerate_sizes() {
        assert!(matches!(
            generate(0, 4, PlanPolicy::Random, 0),
            Err(StimulusError::InvalidDimension { name: "loops", value: 0, .. })
        ));
        assert!(matches!(
            generate(4, 0, PlanPolicy::Random, 0),
            Err(StimulusError::InvalidDimension { name: "tracks", value: 0, .. })
        ));
    }

    #[test]
    fn test_lopez_serrano_ignores_loops_and_seed() {
        let reference = generate(8, 4, PlanPolicy::LopezSerrano, 0).unwrap();
        assert_eq!(reference.tracks(), 4);
        assert_eq!(reference.loops(), 8);
        assert_eq!(reference.silent_rows(), Vec::<usize>::new());
        assert_eq!(reference.row(2), Some(&[0u8, 0, 0, 1, 0, 1, 1, 0][..]));

        for (loops, seed) in [(1, 5), (15, 0), (100, 12345)] {
            let plan = generate(loops, 4, PlanPolicy::LopezSerrano, seed).unwrap();
            assert_eq!(plan, reference);
        }
    }

    #[test]
    fn test_lopez_serrano_track_mismatch() {
        assert_eq!(
            generate(8, 3, PlanPolicy::LopezSerrano, 0).unwrap_err(),
            StimulusError::TrackCountMismatch {
                policy: "lopez_serrano",
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_factorial_ignores_loops() {
        let plan = generate(3, 4, PlanPolicy::Factorial, 9).unwrap();
        assert_eq!(plan.loops(), 15);
        assert_eq!(plan, full_factorial(4));
    }

    #[test]
    fn test_factorial_track_limits() {
        assert!(generate(1, 0, PlanPolicy::Factorial, 0).is_err());
        assert!(matches!(
            generate(1, MAX_FACTORIAL_TRACKS + 1, PlanPolicy::FactorialRandom, 0),
            Err(StimulusError::InvalidDimension { name: "tracks", .. })
        ));
    }

    #[test]
    fn test_factorial_random_reference_seed_zero() {
        let plan = generate(15, 4, PlanPolicy::FactorialRandom, 0).unwrap();
        assert_eq!(
            rows(&plan),
            vec![
                vec![0, 1, 1, 0, 1, 1, 1, 0, 1, 0, 0, 0, 1, 0, 1],
                vec![1, 1, 0, 1, 1, 0, 1, 1, 1, 0, 0, 0, 0, 1, 0],
                vec![0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1, 1, 0, 1, 1],
                vec![0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 0, 1],
            ]
        );
    }

    #[test]
    fn test_factorial_random_three_tracks() {
        let plan = generate(0, 3, PlanPolicy::FactorialRandom, 0).unwrap();
        assert_eq!(
            rows(&plan),
            vec![
                vec![1, 1, 0, 0, 1, 0, 1],
                vec![1, 1, 1, 0, 0, 1, 0],
                vec![1, 0, 0, 1, 0, 1, 1],
            ]
        );
    }

    #[test]
    fn test_factorial_random_is_column_permutation() {
        let mut reference: Vec<Vec<u8>> = {
            let plan = full_factorial(5);
            (0..plan.loops()).map(|l| plan.column(l)).collect()
        };
        reference.sort();

        for seed in [1u32, 2, 77, 4_000_000_000] {
            let plan = generate(0, 5, PlanPolicy::FactorialRandom, seed).unwrap();
            let mut columns: Vec<Vec<u8>> = (0..plan.loops()).map(|l| plan.column(l)).collect();
            columns.sort();
            assert_eq!(columns, reference);
        }
    }

    #[test]
    fn test_generate_named() {
        let plan = generate_named(15, 4, "factorial", 0).unwrap();
        assert_eq!(plan, full_factorial(4));

        assert_eq!(
            generate_named(0, 0, "shuffled", 0).unwrap_err(),
            StimulusError::UnknownPolicy("shuffled".to_string())
        );
    }
}
