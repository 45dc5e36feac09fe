//! Pairwise collision detection over the scene graph

use std::collections::BTreeSet;

use super::category::Category;
use super::graph::SceneGraph;
use super::node::NodeId;

/// Unordered pair of colliding nodes
///
/// The smaller handle is always stored first, so `(a, b)` and `(b, a)` are
/// the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    first: NodeId,
    second: NodeId,
}

impl CollisionPair {
    /// Normalize two handles into a pair
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Smaller handle
    pub fn first(&self) -> NodeId {
        self.first
    }

    /// Larger handle
    pub fn second(&self) -> NodeId {
        self.second
    }

    /// Whether the pair involves `id`
    pub fn contains(&self, id: NodeId) -> bool {
        self.first == id || self.second == id
    }
}

/// Deduplicated, deterministically ordered set of collisions for one frame
pub type CollisionSet = BTreeSet<CollisionPair>;

/// Order a pair so its first node matches `type1` and its second `type2`
///
/// Returns `None` when the categories match in neither order.
pub fn match_categories(
    graph: &SceneGraph,
    pair: CollisionPair,
    type1: Category,
    type2: Category,
) -> Option<(NodeId, NodeId)> {
    let category1 = graph.category(pair.first);
    let category2 = graph.category(pair.second);

    if category1.matches(type1) && category2.matches(type2) {
        Some((pair.first, pair.second))
    } else if category1.matches(type2) && category2.matches(type1) {
        Some((pair.second, pair.first))
    } else {
        None
    }
}

impl SceneGraph {
    /// Every colliding pair of attached nodes
    pub fn collisions(&self) -> CollisionSet {
        let mut pairs = CollisionSet::new();
        self.check_scene_collision(self.root, self.root, &mut pairs);
        pairs
    }

    /// Test every node of `node`'s subtree against every node of `scene`'s
    pub fn check_scene_collision(&self, node: NodeId, scene: NodeId, pairs: &mut CollisionSet) {
        self.check_node_collision(node, scene, pairs);

        if let Some(scene_node) = self.nodes.get(scene) {
            for &child in &scene_node.children {
                self.check_scene_collision(node, child, pairs);
            }
        }
    }

    /// Test every node of `node`'s subtree against the single node `other`
    pub fn check_node_collision(&self, node: NodeId, other: NodeId, pairs: &mut CollisionSet) {
        if self.collides(node, other) {
            pairs.insert(CollisionPair::new(node, other));
        }

        if let Some(scene_node) = self.nodes.get(node) {
            for &child in &scene_node.children {
                self.check_node_collision(child, other, pairs);
            }
        }
    }

    /// Whether two distinct, live, unrelated nodes overlap
    pub fn collides(&self, a: NodeId, b: NodeId) -> bool {
        if a == b || !self.is_collidable(a) || !self.is_collidable(b) {
            return false;
        }
        if self.is_ancestor(a, b) || self.is_ancestor(b, a) {
            return false;
        }
        self.bounding_rect(a).intersects(&self.bounding_rect(b))
    }

    fn is_collidable(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.category() != Category::NONE && !node.is_destroyed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::scene::graph::tests::Probe;
    use crate::scene::node::SceneNode;

    fn collidable(category: Category, position: Vec2) -> SceneNode {
        SceneNode::new(Probe::collidable(category, 10.0)).at(position)
    }

    #[test]
    fn test_pair_is_unordered() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(SceneNode::group(Category::NONE));
        let b = graph.insert(SceneNode::group(Category::NONE));

        assert_eq!(CollisionPair::new(a, b), CollisionPair::new(b, a));
        assert!(CollisionPair::new(b, a).contains(a));
    }

    #[test]
    fn test_overlapping_siblings_collide_once() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let player = graph
            .attach_new(root, collidable(Category::PLAYER_AIRCRAFT, Vec2::new(0.0, 0.0)))
            .unwrap();
        let enemy = graph
            .attach_new(root, collidable(Category::ENEMY_AIRCRAFT, Vec2::new(5.0, 5.0)))
            .unwrap();
        graph
            .attach_new(root, collidable(Category::PICKUP, Vec2::new(100.0, 0.0)))
            .unwrap();

        let pairs = graph.collisions();

        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&CollisionPair::new(enemy, player)));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph
            .attach_new(root, collidable(Category::PLAYER_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        let b = graph
            .attach_new(root, collidable(Category::PICKUP, Vec2::new(9.0, 0.0)))
            .unwrap();

        assert!(graph.collides(a, b));
        assert!(graph.collides(b, a));
    }

    #[test]
    fn test_scene_collision_is_symmetric_across_subtrees() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let allies = graph.attach_new(root, SceneNode::group(Category::NONE)).unwrap();
        let enemies = graph
            .attach_new(root, SceneNode::group(Category::NONE).at(Vec2::new(4.0, 0.0)))
            .unwrap();

        let player = graph
            .attach_new(allies, collidable(Category::PLAYER_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        graph
            .attach_new(allies, collidable(Category::ALLIED_PROJECTILE, Vec2::new(6.0, 3.0)))
            .unwrap();
        graph
            .attach_new(player, collidable(Category::ALLIED_PROJECTILE, Vec2::new(0.0, 4.0)))
            .unwrap();
        for x in [0.0, 3.0, 50.0] {
            graph
                .attach_new(enemies, collidable(Category::ENEMY_AIRCRAFT, Vec2::new(x, 2.0)))
                .unwrap();
        }

        let mut forward = CollisionSet::new();
        graph.check_scene_collision(allies, enemies, &mut forward);
        let mut backward = CollisionSet::new();
        graph.check_scene_collision(enemies, allies, &mut backward);

        assert!(forward.len() >= 4);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph
            .attach_new(root, collidable(Category::PLAYER_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        let b = graph
            .attach_new(root, collidable(Category::PICKUP, Vec2::new(10.0, 0.0)))
            .unwrap();

        assert!(!graph.collides(a, b));
    }

    #[test]
    fn test_ancestor_and_self_are_excluded() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let parent = graph
            .attach_new(root, collidable(Category::PLAYER_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        let child = graph
            .attach_new(parent, collidable(Category::ALLIED_AIRCRAFT, Vec2::zeros()))
            .unwrap();

        assert!(!graph.collides(parent, parent));
        assert!(!graph.collides(parent, child));
        assert!(!graph.collides(child, parent));
        assert!(graph.collisions().is_empty());
    }

    #[test]
    fn test_destroyed_and_uncategorized_nodes_are_skipped() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let player = graph
            .attach_new(root, collidable(Category::PLAYER_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        let wreck = graph
            .attach_new(root, collidable(Category::ENEMY_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        let decoration = graph
            .attach_new(root, SceneNode::new(Probe::collidable(Category::NONE, 10.0)))
            .unwrap();
        graph.behavior_mut::<Probe>(wreck).unwrap().destroyed = true;

        assert!(!graph.collides(player, wreck));
        assert!(!graph.collides(player, decoration));
        assert!(graph.collisions().is_empty());
    }

    #[test]
    fn test_nodes_without_bounds_never_collide() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let a = graph
            .attach_new(root, collidable(Category::PLAYER_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        let b = graph
            .attach_new(root, SceneNode::group(Category::PICKUP))
            .unwrap();
        // The empty bounds sit at the origin, inside `a`'s rectangle
        assert!(graph.bounding_rect(b).is_empty());

        assert!(!graph.collides(a, b));
        assert!(!graph.collides(b, a));
        assert!(graph.collisions().is_empty());
    }

    #[test]
    fn test_match_categories_orders_pair() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let player = graph
            .attach_new(root, collidable(Category::PLAYER_AIRCRAFT, Vec2::zeros()))
            .unwrap();
        let pickup = graph
            .attach_new(root, collidable(Category::PICKUP, Vec2::zeros()))
            .unwrap();
        let pair = CollisionPair::new(pickup, player);

        assert_eq!(
            match_categories(&graph, pair, Category::PLAYER_AIRCRAFT, Category::PICKUP),
            Some((player, pickup))
        );
        assert_eq!(
            match_categories(&graph, pair, Category::PICKUP, Category::PLAYER_AIRCRAFT),
            Some((pickup, player))
        );
        assert_eq!(
            match_categories(&graph, pair, Category::ENEMY_AIRCRAFT, Category::PICKUP),
            None
        );
    }
}
