use arbor_tree::{Position, TreeNode, TreeStore};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Balanced tree: `fanout` children per node, `depth` levels below the root
fn build_tree(fanout: usize, depth: usize) -> TreeNode {
    fn grow(node: &mut TreeNode, fanout: usize, depth: usize) {
        if depth == 0 {
            return;
        }
        for i in 0..fanout {
            let mut child =
                TreeNode::new(format!("{}.{}", node.id, i), "Def", format!("Node {}", i));
            grow(&mut child, fanout, depth - 1);
            node.children.push(child);
        }
    }

    let mut root = TreeNode::new("r", "Root", "Root");
    grow(&mut root, fanout, depth);
    root
}

fn find_deepest(c: &mut Criterion) {
    // 6 + 36 + 216 + 1296 nodes below the root
    let store = TreeStore::new(build_tree(6, 4)).unwrap();

    c.bench_function("find_by_id_last_leaf", |b| {
        b.iter(|| store.find_by_id(black_box("r.5.5.5.5")))
    });

    c.bench_function("find_parent_last_leaf", |b| {
        b.iter(|| store.find_parent(black_box("r.5.5.5.5")))
    });
}

fn move_back_and_forth(c: &mut Criterion) {
    let mut store = TreeStore::new(build_tree(6, 4)).unwrap();

    c.bench_function("move_subtree_round_trip", |b| {
        b.iter(|| {
            store.move_node("r.0.1", "r.5.5", Position::Inside).unwrap();
            store.move_node("r.0.1", "r.0.0", Position::After).unwrap();
        })
    });
}

fn clone_and_serialize(c: &mut Criterion) {
    let store = TreeStore::new(build_tree(6, 4)).unwrap();

    c.bench_function("clone_subtree", |b| {
        b.iter(|| store.clone_subtree(black_box("r.3")))
    });

    c.bench_function("to_json_pretty", |b| {
        b.iter(|| arbor_tree::codec::to_json_pretty(black_box(store.root())))
    });
}

criterion_group!(benches, find_deepest, move_back_and_forth, clone_and_serialize);
criterion_main!(benches);
