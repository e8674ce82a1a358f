//! Arena-backed ND-Tree holding a set of mutually non-dominated points.
//!
//! Nodes live in a [`StableGraph`] and are addressed by stable
//! [`NodeIndex`] handles; an edge `parent -> child` records the tree shape.
//! Parent links are only read back to propagate bounding-box growth and to
//! splice collapsed nodes, never to own anything.

use log::trace;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Direction;

use super::config::NDTreeConfig;
use super::error::NDTreeError;
use crate::geometry::{Point, Rectangle};

#[derive(Debug, Clone, Default)]
struct Node {
    /// Stored points; always empty on internal nodes.
    points: Vec<Point>,
    /// Ideal (min) / nadir (max) corners over the subtree. Only ever grows.
    bounds: Option<Rectangle>,
}

/// Recursive, owned view of a subtree, used for comparison and persistence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSnapshot {
    pub bounds: Option<Rectangle>,
    pub points: Vec<Point>,
    pub children: Vec<NodeSnapshot>,
}

enum Update {
    Rejected,
    Kept,
    Emptied,
}

/// Archive of mutually non-dominated points under weak Pareto dominance
/// (`a` dominates `b` iff `a <= b` on every axis).
///
/// # Invariants
///
/// - The stored points form an antichain: no stored point dominates another.
/// - Leaves hold at most `max_points` points; internal nodes hold none.
/// - No internal node has exactly one child.
/// - A node's bounds cover every point in its subtree.
#[derive(Debug, Clone)]
pub struct NDTree {
    graph: StableGraph<Node, ()>,
    root: NodeIndex,
    config: NDTreeConfig,
    dim: Option<usize>,
    len: usize,
}

impl NDTree {
    pub fn new(config: NDTreeConfig) -> Result<Self, NDTreeError> {
        config.validate()?;
        let mut graph = StableGraph::default();
        let root = graph.add_node(Node::default());
        Ok(Self {
            graph,
            root,
            config,
            dim: None,
            len: 0,
        })
    }

    /// Builds a tree by inserting every point in order.
    pub fn from_points<I>(config: NDTreeConfig, points: I) -> Result<Self, NDTreeError>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut tree = Self::new(config)?;
        for p in points {
            tree.insert(p)?;
        }
        Ok(tree)
    }

    pub fn config(&self) -> NDTreeConfig {
        self.config
    }

    /// Dimension fixed by the first inserted point.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of levels; a tree with a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, idx: NodeIndex) -> usize {
        1 + self
            .children(idx)
            .into_iter()
            .map(|c| self.depth_of(c))
            .max()
            .unwrap_or(0)
    }

    fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        // Neighbors come newest first.
        let mut children: Vec<_> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        children.reverse();
        children
    }

    fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    fn check_dim(&self, p: &Point) -> Result<(), NDTreeError> {
        match self.dim {
            Some(expected) if expected != p.dim() => Err(NDTreeError::DimensionMismatch {
                expected,
                found: p.dim(),
            }),
            _ => Ok(()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// True iff some stored point dominates `p`.
    pub fn dominates(&self, p: &Point) -> Result<bool, NDTreeError> {
        self.check_dim(p)?;
        Ok(self.node_dominates(self.root, p))
    }

    fn node_dominates(&self, idx: NodeIndex, p: &Point) -> bool {
        let node = &self.graph[idx];
        let Some(bounds) = &node.bounds else {
            return false;
        };
        if !bounds.min_corner().dominates(p) {
            return false;
        }
        if bounds.max_corner().dominates(p) {
            return true;
        }
        let children = self.children(idx);
        if children.is_empty() {
            node.points.iter().any(|q| q.dominates(p))
        } else {
            children.into_iter().any(|c| self.node_dominates(c, p))
        }
    }

    /// True iff `p` itself is stored.
    pub fn contains(&self, p: &Point) -> bool {
        self.dim == Some(p.dim()) && self.points().iter().any(|q| q == p)
    }

    /// Stored points in depth-first order.
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.len);
        self.collect_points(self.root, &mut out);
        out
    }

    fn collect_points(&self, idx: NodeIndex, out: &mut Vec<Point>) {
        out.extend(self.graph[idx].points.iter().cloned());
        for child in self.children(idx) {
            self.collect_points(child, out);
        }
    }

    /// Bounding box of every stored point, if any.
    pub fn bounds(&self) -> Option<&Rectangle> {
        self.graph[self.root].bounds.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Insertion
    // ─────────────────────────────────────────────────────────────────────

    /// Adds `p` unless a stored point dominates it, first discarding every
    /// stored point that `p` dominates.
    ///
    /// Returns whether `p` was added.
    pub fn insert(&mut self, p: Point) -> Result<bool, NDTreeError> {
        self.check_dim(&p)?;
        if p.dim() == 0 {
            return Err(NDTreeError::InvalidConfig(
                "points must have at least one coordinate".to_string(),
            ));
        }
        match self.update_node(self.root, &p) {
            Update::Rejected => return Ok(false),
            Update::Emptied => {
                self.remove_subtree(self.root);
                self.root = self.graph.add_node(Node::default());
            }
            Update::Kept => {}
        }
        self.dim = Some(p.dim());
        self.insert_point(p);
        Ok(true)
    }

    fn update_node(&mut self, idx: NodeIndex, p: &Point) -> Update {
        let Some(bounds) = self.graph[idx].bounds.clone() else {
            return Update::Kept;
        };
        let (ideal, nadir) = (bounds.min_corner(), bounds.max_corner());

        // Every point of the subtree dominates p.
        if nadir.dominates(p) {
            return Update::Rejected;
        }
        // p dominates every point of the subtree.
        if p.dominates(ideal) && p != ideal {
            return Update::Emptied;
        }
        // p is incomparable with the whole region.
        if !ideal.dominates(p) && !p.dominates(nadir) {
            return Update::Kept;
        }

        let children = self.children(idx);
        if children.is_empty() {
            let node = &mut self.graph[idx];
            if node.points.iter().any(|q| q.dominates(p)) {
                return Update::Rejected;
            }
            let before = node.points.len();
            node.points.retain(|q| !p.dominates(q));
            let removed = before - node.points.len();
            let emptied = node.points.is_empty();
            self.len -= removed;
            return if emptied { Update::Emptied } else { Update::Kept };
        }

        for child in children {
            match self.update_node(child, p) {
                Update::Rejected => return Update::Rejected,
                Update::Emptied => self.remove_subtree(child),
                Update::Kept => {}
            }
        }

        match self.children(idx).as_slice() {
            [] => Update::Emptied,
            [only] => {
                self.collapse(idx, *only);
                Update::Kept
            }
            _ => Update::Kept,
        }
    }

    /// Replaces `idx` by its single child.
    fn collapse(&mut self, idx: NodeIndex, child: NodeIndex) {
        trace!("ndtree: collapsing node {:?} into {:?}", idx, child);
        let parent = self.parent(idx);
        self.graph.remove_node(idx);
        match parent {
            Some(parent) => {
                self.graph.add_edge(parent, child, ());
            }
            None => self.root = child,
        }
    }

    fn remove_subtree(&mut self, idx: NodeIndex) {
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            stack.extend(self.children(current));
            if let Some(node) = self.graph.remove_node(current) {
                self.len -= node.points.len();
            }
        }
    }

    fn insert_point(&mut self, p: Point) {
        let mut idx = self.root;
        loop {
            let children = self.children(idx);
            match self.nearest(&children, &p) {
                Some(child) => idx = child,
                None => break,
            }
        }

        self.extend_bounds_upward(idx, &p);
        self.graph[idx].points.push(p);
        self.len += 1;

        if self.graph[idx].points.len() > self.config.max_points {
            self.split(idx);
        }
    }

    /// Child whose bounding-box center is closest to `p`.
    fn nearest(&self, candidates: &[NodeIndex], p: &Point) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, f64)> = None;
        for &c in candidates {
            let Some(bounds) = &self.graph[c].bounds else {
                continue;
            };
            let d = bounds.center().distance(p);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c).or_else(|| candidates.first().copied())
    }

    /// Grows the bounds of `idx` to cover `p`. Returns whether they changed.
    fn extend_bounds(&mut self, idx: NodeIndex, p: &Point) -> bool {
        let node = &mut self.graph[idx];
        let grown = match &node.bounds {
            None => Rectangle::degenerate(p.clone()),
            Some(b) if b.inside(p) => return false,
            Some(b) => Rectangle::new(b.min_corner().min_point(p), b.max_corner().max_point(p)),
        };
        node.bounds = Some(grown);
        true
    }

    fn extend_bounds_upward(&mut self, mut idx: NodeIndex, p: &Point) {
        while self.extend_bounds(idx, p) {
            match self.parent(idx) {
                Some(parent) => idx = parent,
                None => break,
            }
        }
    }

    /// Turns the overflowing leaf `idx` into an internal node.
    ///
    /// Seeds are picked one at a time as the point farthest, on average,
    /// from the other points still in the node; the remaining points then go
    /// to the seed child with the nearest center.
    fn split(&mut self, idx: NodeIndex) {
        let mut remaining = std::mem::take(&mut self.graph[idx].points);
        trace!(
            "ndtree: splitting node {:?} holding {} points",
            idx,
            remaining.len()
        );

        let mut seeds = Vec::with_capacity(self.config.min_children);
        while seeds.len() < self.config.min_children && !remaining.is_empty() {
            let seed = remaining.remove(farthest_point(&remaining));
            let child = self.graph.add_node(Node::default());
            self.graph.add_edge(idx, child, ());
            self.extend_bounds(child, &seed);
            self.graph[child].points.push(seed);
            seeds.push(child);
        }

        for p in remaining {
            if let Some(child) = self.nearest(&seeds, &p) {
                self.extend_bounds(child, &p);
                self.graph[child].points.push(p);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Snapshots
    // ─────────────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> NodeSnapshot {
        self.snapshot_of(self.root)
    }

    fn snapshot_of(&self, idx: NodeIndex) -> NodeSnapshot {
        let node = &self.graph[idx];
        NodeSnapshot {
            bounds: node.bounds.clone(),
            points: node.points.clone(),
            children: self
                .children(idx)
                .into_iter()
                .map(|c| self.snapshot_of(c))
                .collect(),
        }
    }

    /// Rebuilds a tree with exactly the shape recorded in `snapshot`.
    ///
    /// # Errors
    ///
    /// Rejects snapshots that break any of the tree invariants with
    /// [`NDTreeError::MalformedSnapshot`].
    pub fn from_snapshot(config: NDTreeConfig, snapshot: &NodeSnapshot) -> Result<Self, NDTreeError> {
        let mut tree = Self::new(config)?;
        let root = tree.root;
        let points = tree.restore(root, snapshot, true)?;
        for (i, a) in points.iter().enumerate() {
            if let Some(b) = points[i + 1..]
                .iter()
                .find(|b| a.dominates(b) || b.dominates(a))
            {
                return Err(malformed(format!("stored points {a} and {b} are comparable")));
            }
        }
        Ok(tree)
    }

    /// Restores `snapshot` under `idx` and returns the points of its subtree.
    fn restore(
        &mut self,
        idx: NodeIndex,
        snapshot: &NodeSnapshot,
        is_root: bool,
    ) -> Result<Vec<Point>, NDTreeError> {
        let max_points = self.config.max_points;
        match (snapshot.points.len(), snapshot.children.len()) {
            (_, 1) => return Err(malformed("internal node has a single child")),
            (n, c) if n > 0 && c > 0 => return Err(malformed("internal node holds points")),
            (0, 0) if !is_root => return Err(malformed("non-root leaf holds no points")),
            (n, _) if n > max_points => {
                return Err(malformed(format!(
                    "leaf holds {n} points, more than max_points = {max_points}"
                )))
            }
            _ => {}
        }

        for p in &snapshot.points {
            self.check_dim(p)?;
            self.dim = Some(p.dim());
        }
        let mut subtree = snapshot.points.clone();
        for child_snapshot in &snapshot.children {
            let child = self.graph.add_node(Node::default());
            self.graph.add_edge(idx, child, ());
            subtree.extend(self.restore(child, child_snapshot, false)?);
        }

        let covered = match &snapshot.bounds {
            Some(bounds) => {
                self.check_dim(bounds.min_corner())?;
                subtree.iter().all(|p| bounds.inside(p))
            }
            None => subtree.is_empty(),
        };
        if !covered {
            return Err(malformed("node bounds do not cover its points"));
        }

        let node = &mut self.graph[idx];
        node.points = snapshot.points.clone();
        node.bounds = snapshot.bounds.clone();
        self.len += snapshot.points.len();
        Ok(subtree)
    }
}

fn malformed(reason: impl Into<String>) -> NDTreeError {
    NDTreeError::MalformedSnapshot(reason.into())
}

impl PartialEq for NDTree {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot() == other.snapshot()
    }
}

/// Index of the point with the largest mean distance to the others.
fn farthest_point(points: &[Point]) -> usize {
    if points.len() < 2 {
        return 0;
    }
    let mut best = (0, f64::NEG_INFINITY);
    for (i, p) in points.iter().enumerate() {
        let total: f64 = points
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, q)| p.distance(q))
            .sum();
        let mean = total / (points.len() - 1) as f64;
        if mean > best.1 {
            best = (i, mean);
        }
    }
    best.0
}
