//! Point octree with lazy subdivision
//!
//! Nodes live in a flat arena and reference their 8 children by the index of
//! the first one. A node holds up to `capacity` points before it subdivides;
//! nodes at `max_level` never subdivide and accept any number of points.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{DVec3, Result};
use crate::math::BoundingVolume;
use super::node::{NodeIndex, OctreeNode};
use super::point::Point3D;

/// Construction parameters for a [`PointOctree`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Region covered by the root node. Points outside are rejected.
    pub root: BoundingVolume,
    /// Points a node holds before subdividing (>= 1)
    pub capacity: usize,
    /// Deepest level a node may reach (root = 0)
    pub max_level: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            root: BoundingVolume::from_size(DVec3::ZERO, DVec3::splat(200_000.0)),
            capacity: 4,
            max_level: 4,
        }
    }
}

impl OctreeConfig {
    /// Reject configurations the tree cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.capacity < 1 {
            return Err(Error::InvalidConfig("octree capacity must be at least 1".into()));
        }
        if !self.root.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "octree root boundary must be finite, got {:?}",
                self.root
            )));
        }
        if self.root.half_extent.min_element() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "octree root boundary must have positive extents, got {:?}",
                self.root.half_extent
            )));
        }
        Ok(())
    }
}

/// Summary of the current tree shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
    /// Points stored in the tree
    pub points: usize,
    /// Nodes in the arena
    pub nodes: usize,
    /// Nodes without children
    pub leaves: usize,
    /// Deepest level reached
    pub depth: u32,
    /// Max-level nodes holding more than `capacity` points
    pub overflowing_nodes: usize,
}

/// Octree over 3D points with opaque payloads.
#[derive(Clone, Debug)]
pub struct PointOctree<P> {
    /// All nodes (root is at index 0)
    nodes: Vec<OctreeNode<P>>,
    /// Points per node before subdivision
    capacity: usize,
    /// Maximum tree depth
    max_level: u32,
    /// Number of stored points
    len: usize,
}

impl<P> PointOctree<P> {
    /// Create an empty octree from a validated config
    pub fn new(config: &OctreeConfig) -> Result<Self> {
        config.validate()?;

        log::debug!(
            "PointOctree: root center={:?} half_extent={:?} capacity={} max_level={}",
            config.root.center,
            config.root.half_extent,
            config.capacity,
            config.max_level,
        );

        Ok(Self {
            nodes: vec![OctreeNode::new(config.root, 0)],
            capacity: config.capacity,
            max_level: config.max_level,
            len: 0,
        })
    }

    /// Create an empty octree covering `boundary`
    ///
    /// # Arguments
    /// * `boundary` - Region covered by the root node
    /// * `capacity` - Points a node holds before subdividing
    /// * `max_level` - Deepest level a node may reach
    pub fn with_boundary(boundary: BoundingVolume, capacity: usize, max_level: u32) -> Result<Self> {
        Self::new(&OctreeConfig {
            root: boundary,
            capacity,
            max_level,
        })
    }

    // --- Mutation ---

    /// Insert a point.
    ///
    /// Returns `false` without modifying the tree when the point lies outside
    /// the root boundary (including non-finite coordinates).
    pub fn insert(&mut self, point: Point3D<P>) -> bool {
        let position = point.position();
        if !self.nodes[NodeIndex::ROOT.as_usize()].boundary.contains(position) {
            return false;
        }

        let mut node_idx = NodeIndex::ROOT;
        loop {
            let node = &self.nodes[node_idx.as_usize()];

            let has_room = node.is_leaf() && node.points.len() < self.capacity;
            if has_room || node.level >= self.max_level {
                self.nodes[node_idx.as_usize()].points.push(point);
                self.len += 1;
                return true;
            }

            let existing_child = node.first_child;
            let first_child = match existing_child {
                Some(first) => first,
                None => self.subdivide(node_idx),
            };

            // Octants share faces; the first child in octant order wins.
            let claimed = (0..8u8)
                .map(|octant| first_child.offset(octant))
                .find(|child| self.nodes[child.as_usize()].boundary.contains(position));

            match claimed {
                Some(child) => node_idx = child,
                None => return false,
            }
        }
    }

    /// Create the 8 children of a leaf and return the first one
    fn subdivide(&mut self, node_idx: NodeIndex) -> NodeIndex {
        let parent = &self.nodes[node_idx.as_usize()];
        debug_assert!(parent.is_leaf());

        let boundary = parent.boundary;
        let level = parent.level + 1;
        let first_child = NodeIndex::new(self.nodes.len());

        for octant in 0..8u8 {
            self.nodes.push(OctreeNode::new(boundary.child_octant(octant), level));
        }
        self.nodes[node_idx.as_usize()].first_child = Some(first_child);

        log::trace!(
            "Subdivided node {} at level {} (center {:?})",
            node_idx.as_usize(),
            level - 1,
            boundary.center,
        );

        first_child
    }

    // --- Queries ---

    /// Collect every point inside `range`.
    ///
    /// Order is insertion order within a node, nodes visited depth-first in
    /// octant order. It carries no spatial meaning.
    pub fn query(&self, range: &BoundingVolume) -> Vec<&Point3D<P>> {
        let mut results = Vec::new();
        self.query_into(range, &mut results);
        results
    }

    /// Same as [`query`](Self::query), appending to `results`.
    pub fn query_into<'a>(&'a self, range: &BoundingVolume, results: &mut Vec<&'a Point3D<P>>) {
        let mut stack = vec![NodeIndex::ROOT];

        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx.as_usize()];
            if !node.boundary.intersects(range) {
                continue;
            }

            results.extend(node.points.iter().filter(|p| range.contains(p.position())));

            if let Some(children) = node.children() {
                // Reversed so octant 0 is popped first
                stack.extend(children.iter().rev());
            }
        }
    }

    /// Iterate over all stored points in arena order
    pub fn iter(&self) -> impl Iterator<Item = &Point3D<P>> {
        self.nodes.iter().flat_map(|node| node.points.iter())
    }

    // --- Accessors ---

    /// Number of stored points
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Root boundary
    pub fn boundary(&self) -> &BoundingVolume {
        &self.nodes[NodeIndex::ROOT.as_usize()].boundary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Get root node
    pub fn root(&self) -> &OctreeNode<P> {
        &self.nodes[NodeIndex::ROOT.as_usize()]
    }

    /// Get node by index
    pub fn node(&self, index: NodeIndex) -> &OctreeNode<P> {
        &self.nodes[index.as_usize()]
    }

    /// Get all nodes as slice
    pub fn nodes_slice(&self) -> &[OctreeNode<P>] {
        &self.nodes
    }

    /// Get number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level any node has reached
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|node| node.level).max().unwrap_or(0)
    }

    /// Shape summary, mostly for logging
    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats {
            points: self.len,
            nodes: self.nodes.len(),
            ..Default::default()
        };

        for node in &self.nodes {
            if node.is_leaf() {
                stats.leaves += 1;
            }
            if node.points.len() > self.capacity {
                stats.overflowing_nodes += 1;
            }
            stats.depth = stats.depth.max(node.level);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic LCG so tests do not need a random crate
    struct Lcg(u64);

    impl Lcg {
        fn next_f64(&mut self) -> f64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }

        fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
            lo + (hi - lo) * self.next_f64()
        }
    }

    fn clustered_tree() -> PointOctree<u32> {
        let root = BoundingVolume::new(DVec3::ZERO, DVec3::splat(100.0));
        let mut tree = PointOctree::with_boundary(root, 1, 2).unwrap();

        let cluster = [
            DVec3::new(10.0, 10.0, 10.0),
            DVec3::new(11.0, 10.0, 10.0),
            DVec3::new(10.0, 11.0, 10.0),
            DVec3::new(10.0, 10.0, 11.0),
            DVec3::new(11.0, 11.0, 11.0),
        ];
        for (id, pos) in cluster.into_iter().enumerate() {
            assert!(tree.insert(Point3D::new(pos, id as u32)));
        }
        assert!(tree.insert(Point3D::new(DVec3::splat(-90.0), 99)));
        tree
    }

    fn random_tree(count: usize, capacity: usize, max_level: u32, seed: u64) -> PointOctree<usize> {
        let root = BoundingVolume::cube(DVec3::ZERO, 1000.0);
        let mut tree = PointOctree::with_boundary(root, capacity, max_level).unwrap();
        let mut rng = Lcg(seed);
        for id in 0..count {
            let pos = DVec3::new(
                rng.in_range(-1000.0, 1000.0),
                rng.in_range(-1000.0, 1000.0),
                rng.in_range(-1000.0, 1000.0),
            );
            assert!(tree.insert(Point3D::new(pos, id)));
        }
        tree
    }

    fn assert_invariants<P>(tree: &PointOctree<P>) {
        for node in tree.nodes_slice() {
            assert!(node.level <= tree.max_level(), "level {} exceeds max", node.level);
            if node.level < tree.max_level() {
                assert!(node.points.len() <= tree.capacity());
            }
            for p in &node.points {
                assert!(node.boundary.contains(p.position()));
            }
            if let Some(children) = node.children() {
                for (octant, child) in children.iter().enumerate() {
                    let child = tree.node(*child);
                    assert_eq!(child.level, node.level + 1);
                    assert_eq!(child.boundary, node.boundary.child_octant(octant as u8));
                }
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = OctreeConfig::default();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.max_level, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OctreeConfig { capacity: 0, ..Default::default() };
        assert!(matches!(PointOctree::<()>::new(&config), Err(Error::InvalidConfig(_))));

        let config = OctreeConfig {
            root: BoundingVolume::cube(DVec3::new(f64::NAN, 0.0, 0.0), 1.0),
            ..Default::default()
        };
        assert!(PointOctree::<()>::new(&config).is_err());

        let config = OctreeConfig {
            root: BoundingVolume::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0)),
            ..Default::default()
        };
        assert!(PointOctree::<()>::new(&config).is_err());
    }

    #[test]
    fn test_query_empty_tree() {
        let tree: PointOctree<()> = PointOctree::new(&OctreeConfig::default()).unwrap();
        assert!(tree.is_empty());
        assert!(tree.query(tree.boundary()).is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_insert_outside_rejected_without_mutation() {
        let mut tree = PointOctree::with_boundary(BoundingVolume::cube(DVec3::ZERO, 10.0), 1, 3).unwrap();
        assert!(!tree.insert(Point3D::from_xyz(20.0, 0.0, 0.0, ())));
        assert!(!tree.insert(Point3D::from_xyz(f64::NAN, 0.0, 0.0, ())));
        assert!(!tree.insert(Point3D::from_xyz(0.0, f64::INFINITY, 0.0, ())));
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_cluster_subdivides_and_root_query_returns_all() {
        let tree = clustered_tree();

        assert_eq!(tree.len(), 6);
        assert!(!tree.root().is_leaf());
        assert_eq!(tree.depth(), 2);
        assert_invariants(&tree);

        let found = tree.query(tree.boundary());
        assert_eq!(found.len(), 6);
        let mut ids: Vec<u32> = found.iter().map(|p| *p.payload()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 99]);

        // Cluster overflowed into a max-level node
        assert_eq!(tree.stats().overflowing_nodes, 1);
    }

    #[test]
    fn test_subdivision_happens_once() {
        let mut tree = PointOctree::with_boundary(BoundingVolume::cube(DVec3::ZERO, 10.0), 1, 1).unwrap();
        for i in 0..20 {
            let offset = i as f64 * 0.1;
            assert!(tree.insert(Point3D::from_xyz(offset, offset, offset, i)));
        }
        // Root plus a single set of 8 children
        assert_eq!(tree.node_count(), 9);
        assert_invariants(&tree);
    }

    #[test]
    fn test_face_point_goes_to_first_octant() {
        let mut tree = PointOctree::with_boundary(BoundingVolume::cube(DVec3::ZERO, 10.0), 1, 2).unwrap();
        assert!(tree.insert(Point3D::from_xyz(5.0, 5.0, 5.0, 0)));
        assert!(tree.insert(Point3D::from_xyz(0.0, 0.0, 0.0, 1)));

        let first_child = tree.root().children().unwrap()[0];
        assert_eq!(tree.node(first_child).points().len(), 1);
        assert_eq!(*tree.node(first_child).points()[0].payload(), 1);
    }

    #[test]
    fn test_completeness_and_invariants_random() {
        let tree = random_tree(2_000, 4, 4, 42);
        assert_eq!(tree.len(), 2_000);
        assert_invariants(&tree);

        let mut ids: Vec<usize> = tree.query(tree.boundary()).iter().map(|p| *p.payload()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..2_000).collect::<Vec<_>>());

        // A superset of the root returns the same set
        let bigger = BoundingVolume::cube(DVec3::ZERO, 5_000.0);
        assert_eq!(tree.query(&bigger).len(), 2_000);
    }

    #[test]
    fn test_soundness_random_ranges() {
        let tree = random_tree(1_500, 3, 5, 7);
        let mut rng = Lcg(99);

        for _ in 0..50 {
            let range = BoundingVolume::new(
                DVec3::new(
                    rng.in_range(-1000.0, 1000.0),
                    rng.in_range(-1000.0, 1000.0),
                    rng.in_range(-1000.0, 1000.0),
                ),
                DVec3::new(
                    rng.in_range(0.0, 400.0),
                    rng.in_range(0.0, 400.0),
                    rng.in_range(0.0, 400.0),
                ),
            );

            let found = tree.query(&range);
            assert!(found.iter().all(|p| range.contains(p.position())));

            let expected = tree.iter().filter(|p| range.contains(p.position())).count();
            assert_eq!(found.len(), expected);
        }
    }

    #[test]
    fn test_query_order_is_deterministic() {
        let tree = random_tree(500, 2, 4, 3);
        let range = BoundingVolume::cube(DVec3::splat(100.0), 600.0);
        let first: Vec<usize> = tree.query(&range).iter().map(|p| *p.payload()).collect();
        let second: Vec<usize> = tree.query(&range).iter().map(|p| *p.payload()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_into_appends() {
        let tree = clustered_tree();
        let mut results = Vec::new();
        tree.query_into(&BoundingVolume::cube(DVec3::splat(-90.0), 1.0), &mut results);
        tree.query_into(&BoundingVolume::cube(DVec3::splat(10.5), 1.0), &mut results);
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn test_max_level_zero_never_subdivides() {
        let mut tree = PointOctree::with_boundary(BoundingVolume::cube(DVec3::ZERO, 10.0), 1, 0).unwrap();
        for i in 0..10 {
            assert!(tree.insert(Point3D::from_xyz(i as f64 - 5.0, 0.0, 0.0, i)));
        }
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root().points().len(), 10);
    }

    #[test]
    fn test_stats() {
        let tree = random_tree(300, 4, 3, 11);
        let stats = tree.stats();
        assert_eq!(stats.points, 300);
        assert_eq!(stats.nodes, tree.node_count());
        assert_eq!((stats.nodes - 1) % 8, 0);
        assert!(stats.leaves > 0);
        assert!(stats.depth <= 3);
    }
}
