//! Reconstruction of comment threads from the flat lists the server pages out
//!
//! Every comment carries its materialized path, so its parent is known without
//! any further request. Nodes live in an arena and refer to each other by
//! index.

use std::collections::{HashMap, VecDeque};

use crate::api::{CommentId, CommentView};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentNode {
    pub comment: CommentView,
    pub parent: Option<usize>,

    /// Indices into the forest, in server order
    pub children: Vec<usize>,

    pub descendant_count: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentForest {
    nodes: Vec<CommentNode>,
    roots: Vec<usize>,
    index: HashMap<CommentId, usize>,
}

impl CommentForest {
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// `None` if `idx` is not an index of this forest
    pub fn node(&self, idx: usize) -> Option<&CommentNode> {
        self.nodes.get(idx)
    }

    /// Yields nothing if `idx` is not an index of this forest
    pub fn children(&self, idx: usize) -> impl Iterator<Item = &CommentNode> {
        self.nodes
            .get(idx)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .map(|c| &self.nodes[*c])
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &CommentNode> {
        self.roots.iter().map(|r| &self.nodes[*r])
    }

    pub fn get(&self, id: &CommentId) -> Option<&CommentNode> {
        self.index.get(id).map(|i| &self.nodes[*i])
    }

    /// Total number of nodes, roots included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in display order (each node followed by its subtree), along
    /// with their depth, 0 for roots
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            forest: self,
            stack: self.roots.iter().rev().map(|r| (0, *r)).collect(),
        }
    }
}

pub struct DepthFirst<'a> {
    forest: &'a CommentForest,
    stack: Vec<(usize, usize)>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = (usize, &'a CommentNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, idx) = self.stack.pop()?;
        let node = &self.forest.nodes[idx];
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, *c)));
        Some((depth, node))
    }
}

/// Builds the forest of `records`, keeping their order among siblings.
///
/// A comment whose parent is not in `records` becomes a root.
pub fn build(records: &[CommentView]) -> CommentForest {
    let mut index = HashMap::with_capacity(records.len());
    for (i, r) in records.iter().enumerate() {
        index.entry(r.comment.id).or_insert(i);
    }

    let mut parents = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            r.comment
                .path
                .parent()
                .and_then(|p| index.get(&p).copied())
                .filter(|p| *p != i)
        })
        .collect::<Vec<_>>();
    break_cycles(&mut parents);

    let mut nodes = records
        .iter()
        .zip(parents.iter())
        .map(|(r, parent)| CommentNode {
            comment: r.clone(),
            parent: *parent,
            children: Vec::new(),
            descendant_count: 0,
        })
        .collect::<Vec<_>>();
    let mut roots = Vec::new();
    for (i, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => nodes[*p].children.push(i),
            None => roots.push(i),
        }
    }

    // parents come before their children in breadth-first order, so summing
    // in reverse sees every subtree complete
    let mut order = Vec::with_capacity(nodes.len());
    let mut queue = roots.iter().copied().collect::<VecDeque<_>>();
    while let Some(i) = queue.pop_front() {
        order.push(i);
        queue.extend(nodes[i].children.iter().copied());
    }
    for i in order.into_iter().rev() {
        if let Some(p) = nodes[i].parent {
            nodes[p].descendant_count += 1 + nodes[i].descendant_count;
        }
    }

    tracing::trace!(
        num_records = records.len(),
        num_roots = roots.len(),
        "built comment forest"
    );
    CommentForest {
        nodes,
        roots,
        index,
    }
}

/// Paths from a well-behaved server never loop, but a record whose path
/// disagrees with its parent's could. Promotes the earliest record of each
/// loop to a root so that every record stays reachable.
fn break_cycles(parents: &mut [Option<usize>]) {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Walking,
        Done,
    }

    let mut marks = vec![Mark::New; parents.len()];
    let mut chain = Vec::new();
    for start in 0..parents.len() {
        let mut cur = Some(start);
        while let Some(i) = cur {
            match marks[i] {
                Mark::Done => break,
                Mark::Walking => {
                    if let Some(pos) = chain.iter().position(|c| *c == i) {
                        if let Some(head) = chain[pos..].iter().min().copied() {
                            tracing::warn!(
                                record = head,
                                "comment paths form a loop, promoting to root"
                            );
                            parents[head] = None;
                        }
                    }
                    break;
                }
                Mark::New => {
                    marks[i] = Mark::Walking;
                    chain.push(i);
                    cur = parents[i];
                }
            }
        }
        for i in chain.drain(..) {
            marks[i] = Mark::Done;
        }
    }
}
