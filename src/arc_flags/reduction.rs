//! Flag reduction (§4.7.4): shrinks the *distinct* flag set to save
//! memory by clustering similar flags and remapping every edge onto a
//! retained representative. Correctness invariant: every edge's
//! replacement flag is a bitwise superset of its original (§4.7.4) —
//! setting more bits only loses pruning, never correctness.

use std::collections::HashMap;

use crate::arc_flags::bitset::Bitset;

/// Tuning knobs the source hard-codes (§9 Open Questions, resolved).
#[derive(Debug, Clone, Copy)]
pub struct ReductionParams {
    /// BFS radius (extra bits) used when searching for a nearby retained
    /// flag before falling back to a superset scan.
    pub max_distance: u32,
    /// Extra-bit radius ranked reduction propagates each flag's count to
    /// before choosing which flags to retain.
    pub break_distance: u32,
    /// Exponential fade applied per extra bit during ranked propagation.
    pub fade_alpha: f64,
}

impl Default for ReductionParams {
    fn default() -> Self {
        Self { max_distance: 1, break_distance: 0, fade_alpha: 0.5 }
    }
}

/// Reduces `flags` to at most `⌈flags.len() * (1 - filter)⌉` distinct
/// values (plus the always-retained all-ones flag), returning the
/// remapped table. `filter` is the fraction of distinct flags to drop,
/// in `[0, 1]`.
pub fn reduce_greedy(flags: &[Bitset], filter: f64, params: ReductionParams) -> Vec<Bitset> {
    let counts = count_flags(flags);
    let retained = retain_top(&counts, filter);
    remap(flags, &retained, params)
}

fn count_flags(flags: &[Bitset]) -> HashMap<Bitset, f64> {
    let mut counts = HashMap::new();
    for &f in flags {
        *counts.entry(f).or_insert(0.0) += 1.0;
    }
    counts
}

/// Like [`reduce_greedy`], but before choosing the retained set each
/// flag's popularity count is propagated to its bit-flip neighbors with
/// exponential fade (§4.7.4), so flags that are "almost" a popular flag
/// inherit some of its weight.
pub fn reduce_ranked(flags: &[Bitset], filter: f64, params: ReductionParams) -> Vec<Bitset> {
    let counts = count_flags(flags);
    let ranked = propagate_scores(&counts, params);
    let retained = retain_top(&ranked, filter);
    remap(flags, &retained, params)
}

/// Propagates each flag's count to every flag reachable by flipping up
/// to `break_distance` unset bits, faded by `alpha` per extra bit.
fn propagate_scores(counts: &HashMap<Bitset, f64>, params: ReductionParams) -> HashMap<Bitset, f64> {
    let mut scores: HashMap<Bitset, f64> = counts.iter().map(|(&f, &c)| (f, c as f64)).collect();
    for (&flag, &count) in counts {
        for (neighbor, extra_bits) in near_supersets(flag, params.break_distance) {
            if neighbor == flag {
                continue;
            }
            let faded = count as f64 * params.fade_alpha.powi(extra_bits as i32);
            *scores.entry(neighbor).or_insert(0.0) += faded;
        }
    }
    scores
}

/// Every flag obtainable from `flag` by setting up to `radius` currently
/// unset bits, paired with how many bits were added. Always includes
/// `flag` itself (zero bits added).
fn near_supersets(flag: Bitset, radius: u32) -> Vec<(Bitset, u32)> {
    let unset: Vec<usize> = (0..Bitset::BITS as usize).filter(|&i| !flag.get(i)).collect();
    let mut out = vec![(flag, 0)];
    for combo in subsets_up_to(&unset, radius as usize) {
        let mut f = flag;
        for &b in &combo {
            f.set(b, true);
        }
        out.push((f, combo.len() as u32));
    }
    out
}

/// Every non-empty subset of `pool` of size at most `k`, each exactly
/// once.
fn subsets_up_to(pool: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut combo = Vec::new();
    fn rec(pool: &[usize], start: usize, k: usize, combo: &mut Vec<usize>, result: &mut Vec<Vec<usize>>) {
        if !combo.is_empty() {
            result.push(combo.clone());
        }
        if combo.len() == k {
            return;
        }
        for i in start..pool.len() {
            combo.push(pool[i]);
            rec(pool, i + 1, k, combo, result);
            combo.pop();
        }
    }
    rec(pool, 0, k, &mut combo, &mut result);
    result
}

fn retain_top(scored: &HashMap<Bitset, f64>, filter: f64) -> Vec<Bitset> {
    let mut by_score: Vec<(Bitset, f64)> = scored.iter().map(|(&f, &s)| (f, s)).collect();
    // Stable sort ascending by (count, popcount-then-bits), so truncating
    // from the front drops the least popular first and ties break
    // toward the more general (higher-popcount) flag.
    by_score.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap()
            .then_with(|| a.0.popcount().cmp(&b.0.popcount()))
            .then_with(|| a.0.bits().collect::<Vec<_>>().cmp(&b.0.bits().collect::<Vec<_>>()))
    });

    let keep = ((by_score.len() as f64) * (1.0 - filter)).ceil() as usize;
    let drop = by_score.len().saturating_sub(keep);
    let mut retained: Vec<Bitset> = by_score.into_iter().skip(drop).map(|(f, _)| f).collect();

    if !retained.contains(&Bitset::all()) {
        retained.push(Bitset::all());
    }
    retained
}

/// Maps every flag in `flags` onto the closest retained flag, per
/// §4.7.4's two-phase search: a bounded BFS over nearby supersets first,
/// then a full scan of retained flags by increasing popcount for the
/// first superset found. The all-ones flag is always retained, so this
/// terminates with a correct (if maximally unhelpful) answer in the
/// worst case.
fn remap(flags: &[Bitset], retained: &[Bitset], params: ReductionParams) -> Vec<Bitset> {
    let mut cache: HashMap<Bitset, Bitset> = HashMap::new();
    flags
        .iter()
        .map(|&f| *cache.entry(f).or_insert_with(|| closest_retained(f, retained, params.max_distance)))
        .collect()
}

fn closest_retained(flag: Bitset, retained: &[Bitset], max_distance: u32) -> Bitset {
    if retained.contains(&flag) {
        return flag;
    }
    for (candidate, _) in near_supersets(flag, max_distance) {
        if retained.contains(&candidate) {
            return candidate;
        }
    }
    let mut by_popcount: Vec<Bitset> = retained.to_vec();
    by_popcount.sort_by_key(|r| r.popcount());
    by_popcount
        .into_iter()
        .find(|r| r.is_superset_of(flag))
        .unwrap_or_else(Bitset::all)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(bits: &[usize]) -> Bitset {
        let mut f = Bitset::empty();
        for &b in bits {
            f.set(b, true);
        }
        f
    }

    #[test]
    fn reduction_never_loses_a_bit() {
        let flags = vec![flag(&[0]), flag(&[1]), flag(&[0, 1]), flag(&[2])];
        for reduced in [
            reduce_greedy(&flags, 0.5, ReductionParams::default()),
            reduce_ranked(&flags, 0.5, ReductionParams::default()),
        ] {
            for (original, replacement) in flags.iter().zip(&reduced) {
                assert!(
                    replacement.is_superset_of(*original),
                    "{:?} is not a superset of {:?}",
                    replacement,
                    original
                );
            }
        }
    }

    #[test]
    fn retaining_everything_is_the_identity_up_to_the_fallback_flag() {
        let flags = vec![flag(&[0]), flag(&[1]), flag(&[0, 1])];
        let reduced = reduce_greedy(&flags, 0.0, ReductionParams::default());
        assert_eq!(reduced, flags);
    }

    #[test]
    fn propagate_scores_fades_geometrically() {
        let base = flag(&[0]);
        let mut counts = HashMap::new();
        counts.insert(base, 10.0);
        let params = ReductionParams { max_distance: 1, break_distance: 1, fade_alpha: 0.5 };
        let scores = propagate_scores(&counts, params);

        let one_bit_over = flag(&[0, 1]);
        approx::assert_relative_eq!(scores[&one_bit_over], 5.0, epsilon = 1e-9);
        approx::assert_relative_eq!(scores[&base], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn aggressive_reduction_still_terminates_and_preserves_correctness() {
        let flags: Vec<Bitset> = (0..20).map(|i| flag(&[i % 8, (i + 3) % 8])).collect();
        let reduced = reduce_greedy(&flags, 0.9, ReductionParams::default());
        assert_eq!(reduced.len(), flags.len());
        for (o, r) in flags.iter().zip(&reduced) {
            assert!(r.is_superset_of(*o));
        }
    }
}
