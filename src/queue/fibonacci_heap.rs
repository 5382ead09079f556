use super::AddressableQueue;
use crate::constants::Distance;

/// A node in the Fibonacci heap's forest, indexed by `data_id` directly
/// (one slot per possible id, as in the reference implementation's
/// pointer-based node array) — here an arena index instead of a raw
/// pointer, per the portability design note (§9).
#[derive(Clone, Copy)]
struct Node {
    key: Distance,
    parent: Option<usize>,
    child: Option<usize>,
    left: usize,
    right: usize,
    degree: usize,
    had_child_cut: bool,
}

/// Fibonacci heap (§4.3): a mergeable heap with O(1) amortized
/// `decrease_key`, via cascading cuts on the root list. Asymptotically
/// ideal for Dijkstra but rarely faster in practice on road networks due
/// to constant factors; included for completeness and benchmarking.
pub struct FibonacciHeap {
    nodes: Vec<Option<Node>>,
    min: Option<usize>,
    len: usize,
}

impl FibonacciHeap {
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: vec![None; capacity],
            min: None,
            len: 0,
        }
    }

    fn is_less(&self, a: usize, b: usize) -> bool {
        self.nodes[a].unwrap().key < self.nodes[b].unwrap().key
            || (self.nodes[a].unwrap().key == self.nodes[b].unwrap().key && a < b)
    }

    fn link_siblings(&mut self, a: usize, b: usize) {
        self.nodes[a].as_mut().unwrap().right = b;
        self.nodes[b].as_mut().unwrap().left = a;
    }

    fn merge_root_lists(&mut self, a: usize, b: usize) {
        let b_left = self.nodes[b].unwrap().left;
        let a_right = self.nodes[a].unwrap().right;
        self.link_siblings(b_left, a_right);
        self.link_siblings(a, b);
    }

    fn cut_node(&mut self, id: usize) {
        let left = self.nodes[id].unwrap().left;
        let right = self.nodes[id].unwrap().right;
        self.link_siblings(left, right);
        self.nodes[id].as_mut().unwrap().left = id;
        self.nodes[id].as_mut().unwrap().right = id;
    }

    fn insert_root(&mut self, id: usize) {
        match self.min {
            None => self.min = Some(id),
            Some(min) => {
                self.merge_root_lists(min, id);
                if self.is_less(id, min) {
                    self.min = Some(id);
                }
            }
        }
    }

    fn cascade_cut(&mut self, id: usize) {
        let parent = self.nodes[id].unwrap().parent.unwrap();
        let only_child = self.nodes[id].unwrap().right == id;
        if self.nodes[parent].unwrap().child == Some(id) {
            self.nodes[parent].as_mut().unwrap().child = if only_child { None } else { Some(self.nodes[id].unwrap().right) };
        }
        self.cut_node(id);
        self.nodes[id].as_mut().unwrap().parent = None;
        self.nodes[id].as_mut().unwrap().had_child_cut = false;
        self.insert_root(id);

        self.nodes[parent].as_mut().unwrap().degree -= 1;
        let parent_has_parent = self.nodes[parent].unwrap().parent.is_some();
        if !self.nodes[parent].unwrap().had_child_cut || !parent_has_parent {
            self.nodes[parent].as_mut().unwrap().had_child_cut = true;
            return;
        }
        self.cascade_cut(parent);
    }

    fn consolidate(&mut self) {
        let Some(start) = self.min else { return };
        let mut roots: Vec<Option<usize>> = vec![None; 64];

        let mut root = start;
        let mut next_root = self.nodes[root].unwrap().right;
        loop {
            let mut d = self.nodes[root].unwrap().degree;
            while let Some(other) = roots[d] {
                let (winner, loser) = if self.is_less(root, other) { (root, other) } else { (other, root) };
                if Some(loser) == self.min {
                    self.min = Some(self.nodes[loser].unwrap().right);
                }
                if next_root == loser {
                    next_root = self.nodes[loser].unwrap().right;
                }
                self.cut_node(loser);
                match self.nodes[winner].unwrap().child {
                    None => self.nodes[winner].as_mut().unwrap().child = Some(loser),
                    Some(child) => self.merge_root_lists(child, loser),
                }
                self.nodes[loser].as_mut().unwrap().parent = Some(winner);
                self.nodes[winner].as_mut().unwrap().degree += 1;
                roots[d] = None;
                root = winner;
                d = self.nodes[root].unwrap().degree;
            }
            roots[d] = Some(root);
            if next_root == root {
                break;
            }
            root = next_root;
            next_root = self.nodes[root].unwrap().right;
        }

        let start = self.min.unwrap();
        self.min = Some(start);
        let mut cur = self.nodes[start].unwrap().right;
        while cur != start {
            if self.is_less(cur, self.min.unwrap()) {
                self.min = Some(cur);
            }
            cur = self.nodes[cur].unwrap().right;
        }
    }

    fn extract_min(&mut self) -> usize {
        let min = self.min.unwrap();
        if let Some(child) = self.nodes[min].unwrap().child {
            let mut c = child;
            loop {
                self.nodes[c].as_mut().unwrap().parent = None;
                c = self.nodes[c].unwrap().right;
                if c == child {
                    break;
                }
            }
            self.merge_root_lists(min, child);
            self.nodes[min].as_mut().unwrap().child = None;
        }

        let right = self.nodes[min].unwrap().right;
        self.min = if right != min { Some(right) } else { None };
        self.cut_node(min);
        self.consolidate();
        min
    }
}

impl AddressableQueue for FibonacciHeap {
    fn insert(&mut self, key: Distance, data_id: usize) {
        debug_assert!(self.nodes[data_id].is_none(), "data_id already enqueued");
        self.nodes[data_id] = Some(Node {
            key,
            parent: None,
            child: None,
            left: data_id,
            right: data_id,
            degree: 0,
            had_child_cut: false,
        });
        self.insert_root(data_id);
        self.len += 1;
    }

    fn decrease_key(&mut self, data_id: usize, new_key: Distance) {
        self.nodes[data_id].as_mut().unwrap().key = new_key;
        match self.nodes[data_id].unwrap().parent {
            None => {
                if Some(true) == self.min.map(|m| self.is_less(data_id, m)) {
                    self.min = Some(data_id);
                }
            }
            Some(parent) => {
                if !self.is_less(data_id, parent) {
                    return;
                }
                self.cascade_cut(data_id);
            }
        }
    }

    fn peek_min(&self) -> Option<(Distance, usize)> {
        self.min.map(|m| (self.nodes[m].unwrap().key, m))
    }

    fn delete_min(&mut self) -> Option<(Distance, usize)> {
        if self.min.is_none() {
            return None;
        }
        let key = self.nodes[self.min.unwrap()].unwrap().key;
        let id = self.extract_min();
        self.nodes[id] = None;
        self.len -= 1;
        Some((key, id))
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }
}
