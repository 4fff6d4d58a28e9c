use crate::TreeNode;

/// Visitor pattern for traversing a tree immutably
///
/// The default implementation walks the whole subtree depth-first.
/// Override `visit_node` to act on nodes, calling `walk_node` to continue
/// into children (or not, to prune).
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &TreeNode, depth: usize) {
        walk_node(self, node, depth);
    }

    fn visit_root(&mut self, root: &TreeNode) {
        self.visit_node(root, 0);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &TreeNode, depth: usize) {
    for child in &node.children {
        visitor.visit_node(child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DepthCollector {
        seen: Vec<(String, usize)>,
    }

    impl Visitor for DepthCollector {
        fn visit_node(&mut self, node: &TreeNode, depth: usize) {
            self.seen.push((node.id.to_string(), depth));
            walk_node(self, node, depth);
        }
    }

    struct LeafCounter(usize);

    impl Visitor for LeafCounter {
        fn visit_node(&mut self, node: &TreeNode, depth: usize) {
            if !node.has_children() {
                self.0 += 1;
            }
            walk_node(self, node, depth);
        }
    }

    fn tree() -> TreeNode {
        TreeNode::new("root", "Root", "R")
            .with_child(TreeNode::new("a", "Def", "A").with_child(TreeNode::new("a1", "Def", "A1")))
            .with_child(TreeNode::new("b", "Def", "B"))
    }

    #[test]
    fn test_visitor_reports_depths() {
        let mut collector = DepthCollector { seen: vec![] };
        collector.visit_root(&tree());
        assert_eq!(
            collector.seen,
            vec![
                ("root".to_string(), 0),
                ("a".to_string(), 1),
                ("a1".to_string(), 2),
                ("b".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_leaf_counter() {
        let mut counter = LeafCounter(0);
        counter.visit_root(&tree());
        assert_eq!(counter.0, 2);
    }
}
