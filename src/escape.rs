// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test and the brightness levels it feeds.

use num::Complex;

/// Radius of the circle that contains the whole Mandelbrot set.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Number of discrete brightness levels for escaping points.
pub const LEVEL_COUNT: usize = 255;

/// True if the point lies in the circle of radius 2 centred on the
/// origin.  The boundary counts as inside.
#[inline]
pub fn coordinates_good(re: f64, im: f64) -> bool {
    (re * re + im * im).sqrt() <= ESCAPE_RADIUS
}

/// What became of a point under iteration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Escape {
    /// Never left the circle within the budget.
    Member,
    /// Started outside the circle; no iterations were run.
    Outside,
    /// Left the circle after surviving this many iterations.
    Diverged(u32),
}

/// The classic iterator: run `z = z^2 + c` from zero for at most
/// `limit` rounds and report when (if ever) `z` escapes.  Points that
/// are already outside the circle are not iterated at all.
pub fn classify(c: Complex<f64>, limit: u32) -> Escape {
    if !coordinates_good(c.re, c.im) {
        return Escape::Outside;
    }

    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for i in 0..limit {
        z = z * z + c;
        if !coordinates_good(z.re, z.im) {
            return Escape::Diverged(i + 1);
        }
    }
    Escape::Member
}

/// Thresholds that sort escaping points into brightness levels.  Entry
/// `k` is `iterations / (255 - k)`, so the table ascends and packs its
/// finest steps into the low iteration counts.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceLevels(Vec<u32>);

impl DivergenceLevels {
    /// Build the table for an iteration budget.
    pub fn new(iterations: u32) -> DivergenceLevels {
        DivergenceLevels(
            (1..=LEVEL_COUNT as u32)
                .rev()
                .map(|divisor| iterations / divisor)
                .collect(),
        )
    }

    /// The thresholds, ascending.
    pub fn thresholds(&self) -> &[u32] {
        &self.0
    }

    /// Number of levels in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.  It never is.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the smallest threshold not exceeded by `survived`.
    /// Repeated thresholds resolve to their first occurrence.  Counts
    /// beyond the budget get the top level.
    pub fn level(&self, survived: u32) -> usize {
        let index = self.0.partition_point(|&threshold| threshold < survived);
        index.min(self.0.len() - 1)
    }

    /// The level a classified point contributes, if it escaped at all.
    pub fn level_of(&self, escape: Escape) -> Option<usize> {
        match escape {
            Escape::Member => None,
            Escape::Outside => Some(0),
            Escape::Diverged(survived) => Some(self.level(survived)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_good() {
        assert!(coordinates_good(2.0, 0.0));
        assert!(coordinates_good(0.0, -2.0));
        assert!(coordinates_good(0.0, 0.0));
        assert!(!coordinates_good(2.0, 1e-6));
        assert!(!coordinates_good(-1.5, 1.5));
    }

    #[test]
    fn origin_is_a_member() {
        assert_eq!(classify(Complex::new(0.0, 0.0), 1600), Escape::Member);
        assert_eq!(classify(Complex::new(-1.0, 0.0), 1600), Escape::Member);
    }

    #[test]
    fn far_points_are_outside_without_iterating() {
        assert_eq!(classify(Complex::new(3.0, 0.0), 1600), Escape::Outside);
        assert_eq!(classify(Complex::new(-1.46, 1.6), 10), Escape::Outside);
    }

    #[test]
    fn survival_counts_the_escaping_iteration() {
        // 1 -> 2 -> 5
        assert_eq!(classify(Complex::new(1.0, 0.0), 50), Escape::Diverged(3));
        // 2 stays on the boundary, then 6.
        assert_eq!(classify(Complex::new(2.0, 0.0), 50), Escape::Diverged(2));
        // (1+i)^2 + (1+i) = 1+3i
        assert_eq!(classify(Complex::new(1.0, 1.0), 50), Escape::Diverged(2));
    }

    #[test]
    fn budget_bounds_the_iteration() {
        assert_eq!(classify(Complex::new(1.0, 0.0), 2), Escape::Member);
    }

    #[test]
    fn table_for_ten_iterations() {
        let levels = DivergenceLevels::new(10);
        assert_eq!(levels.len(), LEVEL_COUNT);
        assert_eq!(&levels.thresholds()[244..], &[0, 1, 1, 1, 1, 1, 2, 2, 3, 5, 10]);
        assert!(levels.thresholds()[..244].iter().all(|&t| t == 0));
    }

    #[test]
    fn level_is_first_threshold_reached() {
        let levels = DivergenceLevels::new(10);
        assert_eq!(levels.level(0), 0);
        assert_eq!(levels.level(1), 245);
        assert_eq!(levels.level(2), 250);
        assert_eq!(levels.level(3), 252);
        assert_eq!(levels.level(4), 253);
        assert_eq!(levels.level(10), 254);
        assert_eq!(levels.level(11), 254);

        let levels = DivergenceLevels::new(50);
        assert_eq!(levels.level(3), 239);
        assert_eq!(levels.level(2), 230);
    }

    #[test]
    fn binary_search_agrees_with_a_scan() {
        for &budget in &[1, 10, 255, 256, 1600, 5000] {
            let levels = DivergenceLevels::new(budget);
            let table = levels.thresholds();
            for survived in 1..=budget {
                let least = *table.iter().filter(|&&t| survived <= t).min().unwrap();
                let scanned = table.iter().position(|&t| t == least).unwrap();
                assert_eq!(levels.level(survived), scanned);
            }
        }
    }

    #[test]
    fn levels_are_monotonic_in_survival() {
        for &budget in &[10, 50, 1600] {
            let levels = DivergenceLevels::new(budget);
            for survived in 1..budget {
                assert!(levels.level(survived) <= levels.level(survived + 1));
            }
        }
    }

    #[test]
    fn outside_points_take_the_dimmest_level() {
        let levels = DivergenceLevels::new(1600);
        assert_eq!(levels.level_of(Escape::Outside), Some(0));
        assert_eq!(levels.level_of(Escape::Member), None);
        assert_eq!(levels.level_of(Escape::Diverged(1600)), Some(254));
    }
}
