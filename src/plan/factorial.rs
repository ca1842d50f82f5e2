// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Two-level full factorial designs.

use super::Plan;

/// Enumerate every on/off combination of `tracks` tracks
///
/// Column `k` activates track `i` when bit `i` of `k` is set, so the
/// first track alternates fastest. The all-silent combination (k = 0) is
/// dropped, leaving `2^tracks - 1` columns. Callers bound `tracks`.
pub fn full_factorial(tracks: usize) -> Plan {
    let combinations = 1usize << tracks;
    let mut plan = Plan::zeros(tracks, combinations - 1);

    for k in 1..combinations {
        for track in 0..tracks {
            plan.set(track, k - 1, (k >> track) & 1 == 1);
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_four_track_design_order() {
        let plan = full_factorial(4);
        let expected: Vec<Vec<u8>> = vec![
            vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
            vec![0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1],
            vec![0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1],
            vec![0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1],
        ];
        assert_eq!(plan.to_rows(), expected);
    }

    #[test]
    fn test_columns_cover_all_nonzero_combinations() {
        for tracks in 1..=6 {
            let plan = full_factorial(tracks);
            assert_eq!(plan.loops(), (1 << tracks) - 1);

            let columns: HashSet<Vec<u8>> = (0..plan.loops()).map(|l| plan.column(l)).collect();
            assert_eq!(columns.len(), plan.loops());
            assert!(!columns.contains(&vec![0u8; tracks]));
        }
    }

    #[test]
    fn test_single_track() {
        assert_eq!(full_factorial(1).to_rows(), vec![vec![1]]);
    }
}
