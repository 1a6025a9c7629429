//! Arena-backed ordered forest with cursor navigation.
//!
//! # Architecture
//!
//! Nodes live in a flat `Vec` and refer to each other by index: parent,
//! first/last child and previous/next sibling. This provides:
//! - O(1) parent, child and sibling steps
//! - Pre-order stepping across all trees via [`Location::next`] and
//!   [`Location::prev`]
//! - Structure-preserving [`Forest::map`] that keeps every [`NodeId`] valid
//!
//! A [`ForestBuilder`] appends nodes; the built [`Forest`] is read-only.

use std::fmt;

/// Index of a node inside its [`Forest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Links {
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// Builder for constructing [`Forest`] instances.
pub struct ForestBuilder<T> {
    values: Vec<T>,
    links: Vec<Links>,
    first_root: Option<NodeId>,
    last_root: Option<NodeId>,
}

impl<T> ForestBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            links: Vec::new(),
            first_root: None,
            last_root: None,
        }
    }

    /// Append a node as the last child of `parent`, or as the last root.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by this builder.
    pub fn push(&mut self, value: T, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.values.len());
        assert!(
            parent.is_none_or(|p| p.0 < self.values.len()),
            "parent {parent:?} does not belong to this forest"
        );

        let prev_sibling = match parent {
            Some(p) => self.links[p.0].last_child,
            None => self.last_root,
        };

        self.values.push(value);
        self.links.push(Links {
            parent,
            prev_sibling,
            ..Links::default()
        });

        if let Some(prev) = prev_sibling {
            self.links[prev.0].next_sibling = Some(id);
        }
        match parent {
            Some(p) => {
                let slot = &mut self.links[p.0];
                slot.first_child.get_or_insert(id);
                slot.last_child = Some(id);
            }
            None => {
                self.first_root.get_or_insert(id);
                self.last_root = Some(id);
            }
        }

        id
    }

    /// Number of nodes added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a node added so far.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.values.get(id.0)
    }

    #[must_use]
    pub fn build(self) -> Forest<T> {
        Forest {
            values: self.values,
            links: self.links,
            first_root: self.first_root,
        }
    }
}

impl<T> Default for ForestBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered forest of trees.
pub struct Forest<T> {
    values: Vec<T>,
    links: Vec<Links>,
    first_root: Option<NodeId>,
}

impl<T> Forest<T> {
    /// Total number of nodes across all trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.values.get(id.0)
    }

    /// Cursor positioned on `id`.
    #[must_use]
    pub fn location(&self, id: NodeId) -> Option<Location<'_, T>> {
        (id.0 < self.values.len()).then_some(Location { forest: self, id })
    }

    /// Fresh cursor on the first root, `None` for an empty forest.
    #[must_use]
    pub fn first(&self) -> Option<Location<'_, T>> {
        self.first_root.map(|id| Location { forest: self, id })
    }

    /// Cursors on the roots of every tree, in order.
    pub fn roots(&self) -> Siblings<'_, T> {
        Siblings {
            next: self.first(),
        }
    }

    /// Pre-order walk over every node of every tree.
    pub fn iter(&self) -> Preorder<'_, T> {
        Preorder { next: self.first() }
    }

    /// Apply `f` to every value, keeping shape and node ids.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Forest<U> {
        Forest {
            values: self.values.into_iter().map(f).collect(),
            links: self.links,
            first_root: self.first_root,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Forest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|loc| (loc.depth(), loc.value())))
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a Forest<T> {
    type Item = Location<'a, T>;
    type IntoIter = Preorder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor on one node of a [`Forest`].
pub struct Location<'a, T> {
    forest: &'a Forest<T>,
    id: NodeId,
}

impl<T> Clone for Location<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Location<'_, T> {}

impl<T> PartialEq for Location<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.forest, other.forest) && self.id == other.id
    }
}

impl<T> Eq for Location<'_, T> {}

impl<T> fmt::Debug for Location<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Location").field(&self.id).finish()
    }
}

impl<'a, T> Location<'a, T> {
    fn at(self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Location {
            forest: self.forest,
            id,
        })
    }

    fn links(self) -> Links {
        self.forest.links[self.id.0]
    }

    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn value(self) -> &'a T {
        &self.forest.values[self.id.0]
    }

    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.at(self.links().parent)
    }

    #[must_use]
    pub fn first_child(self) -> Option<Self> {
        self.at(self.links().first_child)
    }

    #[must_use]
    pub fn last_child(self) -> Option<Self> {
        self.at(self.links().last_child)
    }

    #[must_use]
    pub fn next_sibling(self) -> Option<Self> {
        self.at(self.links().next_sibling)
    }

    #[must_use]
    pub fn prev_sibling(self) -> Option<Self> {
        self.at(self.links().prev_sibling)
    }

    /// Cursors on the direct children, in order.
    pub fn children(self) -> Siblings<'a, T> {
        Siblings {
            next: self.first_child(),
        }
    }

    /// Cursors on the ancestors, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), |loc| loc.parent())
    }

    /// Root of the tree containing this node.
    #[must_use]
    pub fn root(self) -> Self {
        self.ancestors().last().unwrap_or(self)
    }

    #[must_use]
    pub fn is_root(self) -> bool {
        self.links().parent.is_none()
    }

    /// Number of ancestors (0 for roots).
    #[must_use]
    pub fn depth(self) -> usize {
        self.ancestors().count()
    }

    /// Pre-order successor across the whole forest.
    ///
    /// Descends into the first child, otherwise moves to the next sibling of
    /// the nearest node (self or ancestor) that has one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        if let Some(child) = self.first_child() {
            return Some(child);
        }
        let mut current = self;
        loop {
            if let Some(sibling) = current.next_sibling() {
                return Some(sibling);
            }
            current = current.parent()?;
        }
    }

    /// Pre-order predecessor across the whole forest.
    ///
    /// The deepest last descendant of the previous sibling, otherwise the
    /// parent.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        match self.prev_sibling() {
            Some(sibling) => {
                let mut current = sibling;
                while let Some(child) = current.last_child() {
                    current = child;
                }
                Some(current)
            }
            None => self.parent(),
        }
    }
}

/// Iterator over a run of siblings.
pub struct Siblings<'a, T> {
    next: Option<Location<'a, T>>,
}

impl<'a, T> Iterator for Siblings<'a, T> {
    type Item = Location<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// Pre-order iterator over a whole [`Forest`].
pub struct Preorder<'a, T> {
    next: Option<Location<'a, T>>,
}

impl<'a, T> Iterator for Preorder<'a, T> {
    type Item = Location<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next();
        Some(current)
    }
}
