//! Edge-incidence counting.
//!
//! Edges are undirected and keyed as `(min, max)`. Degenerate triangles
//! (two corners on the same vertex) contribute no edges.
//!
//! Orientation is checked separately on directed edges: in a consistently
//! wound closed surface every directed edge `(a, b)` appears exactly once.

use std::collections::HashMap;

/// How many undirected edges are used by one, two, or more triangles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeStats {
    /// Shared by exactly two triangles.
    pub manifold: usize,
    /// Used by a single triangle (a hole or open border).
    pub boundary: usize,
    /// Shared by three or more triangles.
    pub non_manifold: usize,
}

impl EdgeStats {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.manifold + self.boundary + self.non_manifold
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.boundary == 0 && self.non_manifold == 0
    }
}

pub(crate) const fn is_degenerate([a, b, c]: [u32; 3]) -> bool {
    a == b || b == c || c == a
}

pub(crate) fn edge_stats(triangles: &[[u32; 3]]) -> EdgeStats {
    let mut incidence: HashMap<(u32, u32), usize> = HashMap::new();
    for &[a, b, c] in triangles {
        if is_degenerate([a, b, c]) {
            continue;
        }
        for (v0, v1) in [(a, b), (b, c), (c, a)] {
            let key = if v0 < v1 { (v0, v1) } else { (v1, v0) };
            *incidence.entry(key).or_default() += 1;
        }
    }

    let mut stats = EdgeStats::default();
    for count in incidence.into_values() {
        match count {
            1 => stats.boundary += 1,
            2 => stats.manifold += 1,
            _ => stats.non_manifold += 1,
        }
    }
    stats
}

/// Directed edges walked the same way by more than one triangle.
pub(crate) fn misoriented_edges(triangles: &[[u32; 3]]) -> usize {
    let mut uses: HashMap<(u32, u32), usize> = HashMap::new();
    for &[a, b, c] in triangles {
        if is_degenerate([a, b, c]) {
            continue;
        }
        for edge in [(a, b), (b, c), (c, a)] {
            *uses.entry(edge).or_default() += 1;
        }
    }
    uses.into_values().filter(|&count| count > 1).count()
}
