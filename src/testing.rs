/// Exercises the `IndexSet` contract of a backend against a reference
/// `Vec<bool>` membership model under a random add/remove workload.
macro_rules! test_index_set {
    ($env:ident, $set:ty, $ascending:literal) => {
        #[cfg(test)]
        mod $env {
            use crate::{node::*, set::*};
            use itertools::Itertools;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;

            #[test]
            fn contract_against_reference() {
                let rng = &mut Pcg64Mcg::seed_from_u64(13);

                for n in [10 as NumNodes, 70, 300] {
                    let mut set = <$set>::with_universe(n);
                    let mut reference = vec![false; n as usize];

                    for _ in 0..(n * 20) {
                        let u = rng.random_range(0..n);

                        if rng.random_bool(0.6) {
                            assert_eq!(set.insert(u), !reference[u as usize]);
                            reference[u as usize] = true;
                        } else {
                            assert_eq!(set.remove(u), reference[u as usize]);
                            reference[u as usize] = false;
                        }

                        assert!(set.contains(u) == reference[u as usize]);
                        assert_eq!(set.len(), reference.iter().filter(|&&b| b).count());
                    }

                    let mut elements = set.iter().collect_vec();
                    if !$ascending {
                        elements.sort_unstable();
                    }
                    let expected = (0..n).filter(|&u| reference[u as usize]).collect_vec();
                    assert_eq!(elements, expected);

                    set.clear();
                    assert!(set.is_empty());
                    assert_eq!(set.iter().count(), 0);
                }
            }

            #[test]
            fn union_and_intersection() {
                let rng = &mut Pcg64Mcg::seed_from_u64(14);

                for n in [16 as NumNodes, 90, 200] {
                    for _ in 0..10 {
                        let left = (0..n).filter(|_| rng.random_bool(0.3)).collect_vec();
                        let right = (0..n).filter(|_| rng.random_bool(0.3)).collect_vec();

                        let mut a = <$set>::with_universe(n);
                        a.insert_multiple(left.iter().copied());
                        let mut b = <$set>::with_universe(n);
                        b.insert_multiple(right.iter().copied());

                        let mut union = a.clone();
                        union.union_with(&b);
                        let expected = left.iter().merge(right.iter()).dedup().copied().collect_vec();
                        let mut got = union.iter().collect_vec();
                        got.sort_unstable();
                        assert_eq!(got, expected);

                        let mut intersection = a.clone();
                        intersection.intersect_with(&b);
                        let expected = left
                            .iter()
                            .copied()
                            .filter(|u| right.contains(u))
                            .collect_vec();
                        let mut got = intersection.iter().collect_vec();
                        got.sort_unstable();
                        assert_eq!(got, expected);

                        // operands stay untouched
                        assert_eq!(b.len(), right.len());
                    }
                }
            }
        }
    };
}

pub(crate) use test_index_set;

/// Exercises the `GraphView` contract of a view over a freshly built store
/// against a random edge list: membership, neighbors, degrees, counts and
/// edge iteration must all tell the same story.
macro_rules! test_view_contract {
    ($env:ident, $directed:literal, |$n:ident, $edges:ident| $build:expr, |$store:ident| $view:expr) => {
        #[cfg(test)]
        mod $env {
            use crate::{edge::*, matrix::*, node::*, repr::*, testing::random_edges, view::*};
            use itertools::Itertools;
            use rand::SeedableRng;
            use rand_pcg::Pcg64Mcg;

            #[test]
            fn agrees_with_edge_reference() {
                let rng = &mut Pcg64Mcg::seed_from_u64(77);

                for $n in [5 as NumNodes, 24, 60] {
                    let $edges = random_edges(rng, $n, $n as usize * 2, !$directed);
                    let $store = $build;
                    let view = $view;

                    let reference = |u: Node, v: Node| {
                        if $directed {
                            $edges.contains(&Edge(u, v))
                        } else {
                            $edges.contains(&Edge(u, v).normalized())
                        }
                    };

                    assert_eq!(view.is_directed(), $directed);
                    assert_eq!(view.edge_count(), $edges.len() as NumEdges);

                    for u in 0..$n {
                        for v in 0..$n {
                            assert_eq!(view.has_edge(u, v), reference(u, v), "has_edge({u}, {v})");
                        }

                        let mut neighbors = view.neighbors(u).collect_vec();
                        neighbors.sort_unstable();
                        let expected = (0..$n).filter(|&v| reference(u, v)).collect_vec();
                        assert_eq!(neighbors, expected, "neighbors({u})");
                        assert_eq!(view.degree(u), expected.len() as NumNodes);
                    }

                    let mut listed = view.edges().collect_vec();
                    listed.sort_unstable();
                    assert_eq!(listed, $edges);
                }
            }
        }
    };
}

pub(crate) use test_view_contract;

/// Creates a sorted, deduplicated list of at most `m_ub` random edges over
/// the vertices `0..n`; normalized when `undirected`.
#[cfg(test)]
pub(crate) fn random_edges<R: rand::Rng>(
    rng: &mut R,
    n: crate::node::NumNodes,
    m_ub: usize,
    undirected: bool,
) -> Vec<crate::edge::Edge> {
    use crate::edge::Edge;

    let mut edges: Vec<Edge> = (0..m_ub)
        .map(|_| {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);

            if undirected {
                Edge(u, v).normalized()
            } else {
                Edge(u, v)
            }
        })
        .collect();
    edges.sort_unstable();
    edges.dedup();

    edges
}
