//! Per-round cluster-head rotation.
//!
//! Each round a fraction of the active motes is promoted to cluster head.
//! Heads get a routing discount (see `EnergyModel::edge_cost`) and pay a
//! higher receive cost. Selection favours motes with more residual energy,
//! and a round-dependent group bonus rotates the duty across the field.
//!
//! The rotation is a heuristic: depending on the mote count and fraction,
//! some groups may never receive the bonus.

use std::collections::BTreeSet;

use crate::network::Node;

/// Cluster-head ids of one round. Ordered so that logs and reports are stable.
pub type ClusterHeads = BTreeSet<usize>;

/// Score multiplier for motes whose group matches the current round.
const ROTATION_BONUS: f64 = 1.0;
/// Score multiplier for every other mote.
const OFF_ROTATION_BONUS: f64 = 0.3;

struct Candidate {
    id: usize,
    score: f64,
    battery: f64,
}

/// Select the cluster heads for `round`.
///
/// # Parameters
///
/// * `nodes` - Node arena; only motes with positive battery are considered
/// * `fraction` - Share of active motes to promote (at least one is chosen)
/// * `round` - Round index driving the rotation
///
/// # Returns
///
/// Up to `max(1, floor(active * fraction))` mote ids, or an empty set when no
/// mote is active.
pub fn select_heads(nodes: &[Node], fraction: f64, round: usize) -> ClusterHeads {
    let motes: Vec<&Node> = nodes.iter().filter(|n| n.is_mote() && n.is_active()).collect();
    if motes.is_empty() {
        return ClusterHeads::new();
    }

    let target = ((motes.len() as f64 * fraction).floor() as usize).max(1);

    let energy_max = motes.iter().map(|m| m.energy()).fold(0.0_f64, f64::max);
    let energy_mean = motes.iter().map(|m| m.energy()).sum::<f64>() / motes.len() as f64;
    let threshold = (energy_mean * 0.5).max(1.0);

    let relative = |m: &Node| if energy_max > 0.0 { m.energy() / energy_max } else { 1.0 };

    let groups = motes.len() / target + 1;
    let round_group = (round / target) % groups;

    let mut candidates: Vec<Candidate> = motes
        .iter()
        .copied()
        .filter(|m| m.energy() >= threshold)
        .map(|m| {
            let bonus = if m.id() % groups == round_group { ROTATION_BONUS } else { OFF_ROTATION_BONUS };
            Candidate {
                id: m.id(),
                score: relative(m) * bonus,
                battery: m.energy(),
            }
        })
        .collect();

    if candidates.len() < target {
        log::debug!(
            "Round {}: only {} motes above threshold {:.2}, ranking all {} active motes",
            round,
            candidates.len(),
            threshold,
            motes.len()
        );
        candidates = motes
            .iter()
            .copied()
            .map(|m| Candidate {
                id: m.id(),
                score: relative(m),
                battery: m.energy(),
            })
            .collect();
    }

    // Stable: equal (score, battery) keeps ascending id order.
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then(b.battery.total_cmp(&a.battery)));

    candidates.into_iter().take(target).map(|c| c.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{MAX_BATTERY, Network, Point};

    fn line_network(batteries: &[f64]) -> Network {
        Network::with_batteries(
            Point::new(0.0, 0.0),
            batteries.iter().enumerate().map(|(i, b)| (Point::new(i as f64 + 1.0, 0.0), *b)),
        )
    }

    #[test]
    fn ten_percent_of_twenty_motes_yields_two_heads() {
        let net = line_network(&[MAX_BATTERY; 20]);
        for round in 1..=10 {
            let heads = select_heads(net.nodes(), 0.1, round);
            assert_eq!(heads.len(), 2);
            assert!(heads.iter().all(|id| net.nodes()[*id].is_mote() && net.nodes()[*id].is_active()));
        }
    }

    #[test]
    fn at_least_one_head_and_none_without_active_motes() {
        let net = line_network(&[20.0, 30.0, 0.0]);
        let heads = select_heads(net.nodes(), 0.01, 1);
        assert_eq!(heads.len(), 1);

        let dead = line_network(&[0.0, 0.0]);
        assert!(select_heads(dead.nodes(), 0.5, 1).is_empty());
        assert!(select_heads(&[], 0.5, 1).is_empty());
    }

    #[test]
    fn rotation_bonus_moves_between_rounds() {
        // 10 equal motes, 2 heads per round, 6 groups.
        let net = line_network(&[MAX_BATTERY; 10]);
        let first = select_heads(net.nodes(), 0.2, 0);
        let later = select_heads(net.nodes(), 0.2, 2);
        // Round 0 favours ids with id % 6 == 0, round 2 favours id % 6 == 1.
        assert_eq!(first, ClusterHeads::from([6, 1]));
        assert_eq!(later, ClusterHeads::from([1, 7]));
    }

    #[test]
    fn depleted_motes_are_never_selected() {
        let net = line_network(&[0.0, 50.0, 0.0, 40.0]);
        for round in 0..8 {
            let heads = select_heads(net.nodes(), 1.0, round);
            assert!(!heads.contains(&1));
            assert!(!heads.contains(&3));
            assert!(heads.len() <= 2);
        }
    }

    #[test]
    fn falls_back_to_energy_ranking_below_threshold() {
        // Mean 14.5, threshold 7.25: only mote 1 qualifies but 2 heads are wanted.
        let net = line_network(&[40.0, 5.0, 6.0, 7.0]);
        let heads = select_heads(net.nodes(), 0.5, 0);
        assert_eq!(heads, ClusterHeads::from([1, 4]));
    }
}
