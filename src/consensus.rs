//! Greedy consensus building from seed subtrees.
//!
//! Each seed is a small subtree known to occur in some share of a tree
//! corpus. The builder grows every seed independently: it repeatedly
//! merges the seed's current consensus with the not-yet-merged seed of
//! highest frequency and largest leaf-label overlap, keeps the merge
//! only if the merged pattern still occurs in more than the cutoff
//! number of trees, and stops once further growth cannot reach the
//! cutoff. Seeds grow in parallel; results come back in input order.

use crate::matching::{CompiledPattern, MatchError, leaf_label_overlap, restrict};
use crate::model::tree::Tree;
use crate::newick::to_newick;
use rayon::prelude::*;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error raised when consensus inputs violate the builder's contract.
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// No target trees to measure support against.
    #[error("no target trees given")]
    NoTrees,

    /// Every seed needs a frequency.
    #[error("{seeds} seeds but {frequencies} frequencies")]
    CountMismatch { seeds: usize, frequencies: usize },

    /// The candidate scan's early break is only sound on sorted input.
    #[error("seed frequencies must be non-increasing (violated at position {0})")]
    UnsortedFrequencies(usize),

    /// The support cutoff is a percentage.
    #[error("percent must be at most 100, got {0}")]
    InvalidPercent(u32),

    /// A seed or trial pattern could not be used for matching.
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// One grown consensus, tied back to the seed it started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusResult {
    /// Position of the originating seed in the input order.
    pub seed_index: usize,
    /// Canonical Newick text of the grown consensus.
    pub consensus: String,
    /// Number of target trees containing the consensus.
    pub support: usize,
}

// =#========================================================================#=
// GREEDY CONSENSUS
// =#========================================================================#=
/// Grows a consensus from every seed over the given tree corpus.
///
/// `frequencies[i]` is the support count of `seeds[i]` and the list must
/// be non-increasing; the growth loop scans merge candidates tier by
/// tier and breaks out of a tier at the first lower frequency.
///
/// The support cutoff is `percent * trees.len() / 100` (integer floor):
/// a merge survives only if strictly more trees than that contain the
/// merged pattern. Failed merges accumulate; once the trees they covered
/// exceed `trees.len() - cutoff`, no future merge can reach the cutoff
/// and the seed stops growing.
///
/// A seed with no labeled leaves cannot match anything; it is logged,
/// reported back as-is with support 0, and never offered as a merge
/// candidate to the other seeds.
///
/// # Returns
/// One [ConsensusResult] per seed, in input order.
pub fn greedy_consensus(
    seeds: &[Tree],
    frequencies: &[usize],
    trees: &[Tree],
    percent: u32,
) -> Result<Vec<ConsensusResult>, ConsensusError> {
    if trees.is_empty() {
        return Err(ConsensusError::NoTrees);
    }
    if seeds.len() != frequencies.len() {
        return Err(ConsensusError::CountMismatch {
            seeds: seeds.len(),
            frequencies: frequencies.len(),
        });
    }
    if let Some(position) = frequencies.windows(2).position(|pair| pair[0] < pair[1]) {
        return Err(ConsensusError::UnsortedFrequencies(position + 1));
    }
    if percent > 100 {
        return Err(ConsensusError::InvalidPercent(percent));
    }

    let cutoff = (percent as usize * trees.len()) / 100;
    let false_cutoff = trees.len() - cutoff;
    info!(
        num_seeds = seeds.len(),
        num_trees = trees.len(),
        cutoff,
        false_cutoff,
        "growing consensus"
    );

    // A seed that cannot be compiled (no labeled leaves) is reported
    // and stays out of the run instead of poisoning its siblings.
    let patterns: Vec<Option<CompiledPattern>> = seeds
        .iter()
        .enumerate()
        .map(|(index, seed)| match CompiledPattern::compile(seed.clone()) {
            Ok(pattern) => Some(pattern),
            Err(error) => {
                warn!(seed = index, %error, "skipping unusable seed");
                None
            }
        })
        .collect();

    // presence[s][t]: does tree t contain seed s
    let presence: Vec<Vec<bool>> = patterns
        .par_iter()
        .map(|pattern| match pattern {
            Some(pattern) => trees
                .iter()
                .map(|tree| pattern.is_match(tree))
                .collect::<Result<Vec<bool>, _>>(),
            None => Ok(vec![false; trees.len()]),
        })
        .collect::<Result<_, _>>()?;

    (0..seeds.len())
        .into_par_iter()
        .map(|seed_index| {
            let result = match &patterns[seed_index] {
                Some(pattern) => grow_seed(
                    seed_index,
                    pattern,
                    &patterns,
                    frequencies,
                    trees,
                    &presence,
                    cutoff,
                    false_cutoff,
                )?,
                // Skipped seed: echoed back as-is, supported nowhere
                None => ConsensusResult {
                    seed_index,
                    consensus: to_newick(&seeds[seed_index]),
                    support: 0,
                },
            };
            info!(
                seed = result.seed_index,
                support = result.support,
                consensus = result.consensus,
                "seed grown"
            );
            Ok(result)
        })
        .collect()
}

/// Grows one seed to its final consensus.
#[allow(clippy::too_many_arguments)]
fn grow_seed(
    seed_index: usize,
    pattern: &CompiledPattern,
    patterns: &[Option<CompiledPattern>],
    frequencies: &[usize],
    trees: &[Tree],
    presence: &[Vec<bool>],
    cutoff: usize,
    false_cutoff: usize,
) -> Result<ConsensusResult, ConsensusError> {
    let seed_count = patterns.len();

    // Trees containing the current consensus
    let mut present: Vec<usize> = (0..trees.len())
        .filter(|&t| presence[seed_index][t])
        .collect();
    let mut labels: HashSet<String> = pattern.labels().clone();
    let mut consensus: String = pattern.canonical().to_string();

    // Permutation of seed positions; merged seeds are swapped to the
    // front so slot k always holds round k's merge partner.
    let mut translate: Vec<usize> = (0..seed_count).collect();

    'growth: for k in 0..seed_count.saturating_sub(1) {
        // Scan the frequency tier anchored at slot k for the unmerged
        // seed with the largest leaf-label overlap; ties keep the
        // earliest candidate. The break is sound: frequencies are
        // validated non-increasing.
        let mut best: Option<(usize, usize)> = None; // (slot, overlap)
        for slot in k..seed_count {
            let candidate = translate[slot];
            if candidate == seed_index {
                continue;
            }
            if frequencies[candidate] != frequencies[k] {
                break;
            }
            let Some(candidate_pattern) = &patterns[candidate] else {
                continue;
            };
            let overlap = leaf_label_overlap(&labels, candidate_pattern.labels());
            if best.is_none_or(|(_, max)| overlap > max) {
                best = Some((slot, overlap));
            }
        }
        // No candidate left in the tier: growth is over
        let Some((slot, overlap)) = best else {
            break 'growth;
        };
        translate.swap(slot, k);
        let chosen = translate[k];
        // The scan only proposes compiled candidates
        let Some(chosen_pattern) = &patterns[chosen] else {
            break 'growth;
        };
        debug!(seed = seed_index, round = k, chosen, overlap, "merge candidate");

        // Trees containing both the consensus and the chosen seed
        let both: Vec<usize> = present
            .iter()
            .copied()
            .filter(|&t| presence[chosen][t])
            .collect();

        let union: HashSet<String> = labels.union(chosen_pattern.labels()).cloned().collect();

        // Trees already confirmed against some trial this round; a tree
        // that rejected every trial so far may still seed the next one
        let mut checked = vec![false; trees.len()];
        let mut false_frequency = 0;

        for &base in &both {
            if checked[base] {
                continue;
            }
            // Trial: this tree's own arrangement of the label union
            let trial = restrict(&trees[base], &union)?;
            let trial_pattern = CompiledPattern::compile(trial)?;

            let mut confirmed = Vec::new();
            for &t in &both {
                if checked[t] {
                    continue;
                }
                if trial_pattern.is_match(&trees[t])? {
                    checked[t] = true;
                    confirmed.push(t);
                }
            }

            if confirmed.len() > cutoff {
                debug!(
                    seed = seed_index,
                    round = k,
                    chosen,
                    support = confirmed.len(),
                    "merge accepted"
                );
                labels = trial_pattern.labels().clone();
                consensus = trial_pattern.canonical().to_string();
                present = confirmed;
                break;
            }

            false_frequency += confirmed.len();
            if false_frequency > false_cutoff {
                // Stalled: not enough unclaimed trees left for any
                // future merge to clear the cutoff
                debug!(seed = seed_index, round = k, chosen, false_frequency, "stalled");
                break 'growth;
            }
        }
    }

    Ok(ConsensusResult {
        seed_index,
        consensus,
        support: present.len(),
    })
}
