//! Min-priority queues for ordering the search frontier.
//!
//! Two implementations are offered because search costs come in two shapes:
//! real-valued costs (e.g. weighted heuristic sums) favor the Fibonacci heap,
//! while integer-valued costs collide constantly and favor the bucket queue,
//! which stacks equal-priority elements together.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// A queue yielding the element with the minimum associated priority.
///
/// Elements and priorities are kept separate, which allows storage layouts
/// that exploit repeated priorities. The same element may be pushed several
/// times, with equal or different priorities; pushing never replaces an
/// existing entry.
pub trait PriorityQueue<E, P> {
    /// The number of elements in the queue.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements.
    fn clear(&mut self);

    /// Adds an element with the associated priority.
    fn push(&mut self, element: E, priority: P);

    /// The element with the minimum priority, or `None` if empty.
    fn top(&self) -> Option<&E>;

    /// The minimum priority over all elements, or `None` if empty.
    fn min_priority(&self) -> Option<&P>;

    /// Removes and returns the element with the minimum priority.
    fn pop(&mut self) -> Option<E>;
}

struct FibNode<E, P> {
    element: E,
    priority: P,
    children: Vec<usize>,
}

/// A Fibonacci heap over a `Vec` arena: `push` and `top` are O(1), `pop` is
/// amortized O(log n) through degree consolidation of the root list.
///
/// Since entries are never reprioritized, no decrease-key machinery (marks,
/// cascading cuts, parent links) is needed; the lazy root list alone gives
/// the amortized bounds. Priorities only need `PartialOrd`, so `f32` costs
/// (including infinities) work directly.
pub struct FibonacciQueue<E, P> {
    nodes: Vec<Option<FibNode<E, P>>>,
    roots: Vec<usize>,
    min_root: Option<usize>,
    free: Vec<usize>,
    len: usize,
}

impl<E, P: PartialOrd> FibonacciQueue<E, P> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            min_root: None,
            free: Vec::new(),
            len: 0,
        }
    }

    fn node(&self, id: usize) -> &FibNode<E, P> {
        self.nodes[id].as_ref().expect("live heap node")
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        // NaN-free priorities are assumed; any incomparable pair falls back
        // to keeping the existing order.
        matches!(
            self.node(a).priority.partial_cmp(&self.node(b).priority),
            Some(Ordering::Less)
        )
    }

    /// Melds equal-degree roots until all remaining roots have distinct
    /// degrees, then re-finds the minimum root.
    fn consolidate(&mut self) {
        let mut by_degree: Vec<Option<usize>> = Vec::new();

        for root in std::mem::take(&mut self.roots) {
            let mut root = root;
            loop {
                let degree = self.node(root).children.len();
                if by_degree.len() <= degree {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    None => {
                        by_degree[degree] = Some(root);
                        break;
                    }
                    Some(other) => {
                        // The smaller-priority node adopts the other.
                        let (parent, child) = if self.precedes(other, root) {
                            (other, root)
                        } else {
                            (root, other)
                        };
                        self.nodes[parent]
                            .as_mut()
                            .expect("live heap node")
                            .children
                            .push(child);
                        root = parent;
                    }
                }
            }
        }

        self.roots.extend(by_degree.into_iter().flatten());

        self.min_root = None;
        for &root in &self.roots {
            match self.min_root {
                None => self.min_root = Some(root),
                Some(min) if self.precedes(root, min) => self.min_root = Some(root),
                Some(_) => {}
            }
        }
    }
}

impl<E, P: PartialOrd> Default for FibonacciQueue<E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P: PartialOrd> PriorityQueue<E, P> for FibonacciQueue<E, P> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.min_root = None;
        self.free.clear();
        self.len = 0;
    }

    fn push(&mut self, element: E, priority: P) {
        let node = FibNode {
            element,
            priority,
            children: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        self.roots.push(id);
        self.len += 1;

        match self.min_root {
            None => self.min_root = Some(id),
            Some(min) if self.precedes(id, min) => self.min_root = Some(id),
            Some(_) => {}
        }
    }

    fn top(&self) -> Option<&E> {
        self.min_root.map(|id| &self.node(id).element)
    }

    fn min_priority(&self) -> Option<&P> {
        self.min_root.map(|id| &self.node(id).priority)
    }

    fn pop(&mut self) -> Option<E> {
        let min_id = self.min_root?;

        let node = self.nodes[min_id].take().expect("live heap node");
        self.roots.retain(|&id| id != min_id);
        self.roots.extend(node.children.iter().copied());
        self.free.push(min_id);
        self.len -= 1;

        self.consolidate();
        Some(node.element)
    }
}

/// A queue that stacks elements of equal priority into per-priority buckets.
///
/// A heap of the *unique* priorities selects the minimum bucket; elements
/// within a bucket pop in LIFO order. When many elements share priorities,
/// as integer-valued heuristic costs do during a search, this beats the
/// Fibonacci heap, whose node count grows with every push. With all-distinct
/// priorities it is strictly slower.
pub struct BucketQueue<E, P> {
    priorities: BinaryHeap<Reverse<P>>,
    buckets: FxHashMap<P, Vec<E>>,
    len: usize,
}

impl<E, P: Ord + Hash + Copy> BucketQueue<E, P> {
    pub fn new() -> Self {
        Self {
            priorities: BinaryHeap::new(),
            buckets: FxHashMap::default(),
            len: 0,
        }
    }
}

impl<E, P: Ord + Hash + Copy> Default for BucketQueue<E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P: Ord + Hash + Copy> PriorityQueue<E, P> for BucketQueue<E, P> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        self.priorities.clear();
        self.buckets.clear();
        self.len = 0;
    }

    fn push(&mut self, element: E, priority: P) {
        match self.buckets.get_mut(&priority) {
            Some(bucket) => bucket.push(element),
            None => {
                // First element at this priority: a new bucket.
                self.priorities.push(Reverse(priority));
                self.buckets.insert(priority, vec![element]);
            }
        }
        self.len += 1;
    }

    fn top(&self) -> Option<&E> {
        let Reverse(priority) = self.priorities.peek()?;
        self.buckets[priority].last()
    }

    fn min_priority(&self) -> Option<&P> {
        self.priorities.peek().map(|Reverse(priority)| priority)
    }

    fn pop(&mut self) -> Option<E> {
        let Reverse(priority) = *self.priorities.peek()?;
        let bucket = self.buckets.get_mut(&priority)?;
        let element = bucket.pop()?;

        if bucket.is_empty() {
            self.priorities.pop();
            self.buckets.remove(&priority);
        }
        self.len -= 1;
        Some(element)
    }
}
