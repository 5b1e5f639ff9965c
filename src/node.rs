/*!
# Vertex Representation

We choose `Node = u32` as almost all use-cases involve less than `2^32` vertices.
This allows us to (1) save space compared to `usize`/`u64` and (2) manipulate
vertex values directly without abstracting over them.

Vertex ids are dense: every container interprets them as indices into the
range `0..n` where `n` is the vertex count it was created with.
*/

/// Vertices can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// There can be at most `2^32 - 1` vertices in a graph!
pub type NumNodes = Node;
