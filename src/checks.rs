/*!
# Structure Predicates

Read-only checks deciding whether a set or sequence of vertices forms a known
motif inside a graph. Everything here goes through the [`GraphView`] query
contract only, so the predicates work unchanged over any backend — which also
makes them the reference consumers for the view abstraction.

Adjacency is probed in both orientations throughout, so on a directed view a
single arc already counts as a connection.
*/

use crate::{set::IndexSet, view::GraphView, Node};

fn adjacent<V: GraphView>(view: &V, u: Node, v: Node) -> bool {
    view.has_edge(u, v) || view.has_edge(v, u)
}

/// Returns *true* if no edge of `view` runs between two members of
/// `vertices`. A self-loop at a member counts as such an edge.
pub fn is_independent_set<V: GraphView, S: IndexSet>(view: &V, vertices: &S) -> bool {
    vertices
        .iter()
        .all(|u| view.neighbors(u).all(|n| !vertices.contains(n)))
}

/// Returns *true* if every pair of distinct members of `vertices` is
/// adjacent. Sets with fewer than two members are cliques trivially;
/// self-loops are not required.
pub fn is_clique<V: GraphView, S: IndexSet>(view: &V, vertices: &S) -> bool {
    vertices.iter().all(|u| {
        vertices
            .iter()
            .filter(|&v| v > u)
            .all(|v| adjacent(view, u, v))
    })
}

/// Returns *true* if the vertices are connected into a chain in the order
/// the sequence lists them. Fewer than two vertices never form a chain.
pub fn is_chain<V, I>(view: &V, nodes: I) -> bool
where
    V: GraphView,
    I: IntoIterator<Item = Node>,
{
    let mut iter = nodes.into_iter();

    let Some(mut prev) = iter.next() else {
        return false;
    };
    let mut hops = 0;
    for cur in iter {
        if !adjacent(view, prev, cur) {
            return false;
        }
        prev = cur;
        hops += 1;
    }

    hops > 0
}

/// Returns *true* if the vertices are connected into a closed cycle in the
/// order the sequence lists them, last back to first. A single vertex forms
/// a cycle exactly if it carries a self-loop; an empty sequence does not.
pub fn is_loop_cycle<V, I>(view: &V, nodes: I) -> bool
where
    V: GraphView,
    I: IntoIterator<Item = Node>,
{
    let mut iter = nodes.into_iter();

    let Some(first) = iter.next() else {
        return false;
    };
    let mut prev = first;
    for cur in iter {
        if !adjacent(view, prev, cur) {
            return false;
        }
        prev = cur;
    }

    adjacent(view, prev, first)
}

/// Returns the center if the members of `vertices` form a star inside
/// `view`: one center adjacent to all others, all others of inner degree
/// one. Needs at least three members; the inner edge count must match a
/// tree's, so extra edges among the leaves disqualify.
pub fn is_star<V: GraphView, S: IndexSet>(view: &V, vertices: &S) -> Option<Node> {
    let len = vertices.len();
    if len < 3 {
        return None;
    }

    let inner_degree =
        |u: Node| vertices.iter().filter(|&v| v != u && adjacent(view, u, v)).count();

    let mut degrees_sum = 0;
    let mut center = None;
    for u in vertices.iter() {
        let deg = inner_degree(u);
        degrees_sum += deg;

        if deg == len - 1 {
            // a second full-degree member means the set is denser than a star
            if center.replace(u).is_some() {
                return None;
            }
        } else if deg != 1 {
            return None;
        }
    }

    (degrees_sum == 2 * (len - 1)).then_some(center?)
}
