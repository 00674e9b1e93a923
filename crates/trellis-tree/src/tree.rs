//! The compressed-prefix route tree.
//!
//! Every node owns a label and its children. The label's first byte
//! decides the node kind: `:` marks a parameter segment, `*` a terminal
//! wildcard, anything else a static run of literal bytes. Variable
//! children are kept at the front of the child list so lookup probes
//! them before static siblings.
//!
//! Insertion keeps the tree canonical: static labels are edge-compressed
//! and split on demand, at most one parameter or wildcard child exists
//! per node, and no two static siblings share a first byte. Conflicting
//! registrations are rejected with the full offending route.

use std::fmt;

use crate::error::InsertError;
use crate::label;
use crate::r#match::{Params, RouteMatch};

/// A single tree node.
#[derive(Debug)]
pub(crate) struct Node<T> {
    label: String,
    value: Option<T>,
    children: Vec<Node<T>>,
}

impl<T> Node<T> {
    fn unclaimed() -> Self {
        Self {
            label: String::new(),
            value: None,
            children: Vec::new(),
        }
    }

    fn with_label(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: None,
            children: Vec::new(),
        }
    }

    fn leaf(label: &str, value: Option<T>) -> Self {
        Self {
            label: label.to_string(),
            value,
            children: Vec::new(),
        }
    }

    /// A node that has never been written: only the root of a tree with
    /// no registrations is in this state.
    fn is_unclaimed(&self) -> bool {
        self.label.is_empty() && self.value.is_none()
    }

    fn is_wildcard(&self) -> bool {
        self.label.as_bytes().first() == Some(&b'*')
    }

    fn is_parameter(&self) -> bool {
        self.label.as_bytes().first() == Some(&b':')
    }

    /// A label of at least two bytes can be divided into a shorter
    /// prefix node and a suffix child.
    fn can_split(&self) -> bool {
        self.label.len() > 1
    }

    /// Breaks this node at `at`: the suffix keeps the old value and
    /// children on a fresh child, the prefix stays here with neither.
    fn split(&mut self, at: usize) {
        let suffix = self.label.split_off(at);
        let child = Node {
            label: suffix,
            value: self.value.take(),
            children: std::mem::take(&mut self.children),
        };
        self.children.push(child);
    }

    /// Whether this node can consume the front of `path`.
    ///
    /// Variable nodes accept anything; a static node requires a first
    /// byte match. Sibling sets never contain two candidates that would
    /// both accept, so the first supporting child owns the continuation.
    fn supports(&self, path: &str) -> bool {
        self.is_wildcard()
            || self.is_parameter()
            || self.label.as_bytes().first() == path.as_bytes().first()
    }

    /// Inserts `label` below this node, terminating in a node holding
    /// `value`. `route` is the complete route being registered and is
    /// used verbatim in diagnostics.
    ///
    /// A `None` value marks the re-entrant half of a variable insertion
    /// (the static prefix in front of a `:` or `*`) and never displaces
    /// an existing handler.
    pub(crate) fn insert(
        &mut self,
        label: &str,
        value: Option<T>,
        route: &str,
    ) -> Result<&mut Node<T>, InsertError> {
        // A tree with no registrations: claim the root.
        if self.is_unclaimed() {
            if !label::is_valid_root_label(label) {
                return Err(InsertError::missing_leading_slash(route));
            }
            if let Some(pos) = label::find_variable(label) {
                // pos > 0 always: the label begins with '/'.
                self.label = label[..pos].to_string();
                return self.insert(&label[pos..], value, route);
            }
            self.label = label.to_string();
            self.value = value;
            return Ok(self);
        }

        if let Some(pos) = label::find_parameter(label) {
            if pos > 0 {
                let node = self.insert(&label[..pos], None, route)?;
                return node.insert(&label[pos..], value, route);
            }

            let (end, has_slash) = label::find_segment_end(label);
            if self.children.len() > 1 {
                return Err(InsertError::duplicate(route));
            }
            if self.children.len() == 1 {
                // Only an identical parameter child with more path to
                // come can absorb this insertion.
                if self.children[0].label != label[..end] || !has_slash {
                    return Err(InsertError::duplicate(route));
                }
                return self.children[0].insert(&label[end..], value, route);
            }
            self.children.insert(0, Node::with_label(&label[..end]));
            if has_slash {
                return self.children[0].insert(&label[end..], value, route);
            }
            self.children[0].value = value;
            return Ok(&mut self.children[0]);
        }

        if let Some(pos) = label::find_wildcard(label) {
            if pos > 0 {
                let node = self.insert(&label[..pos], None, route)?;
                return node.insert(&label[pos..], value, route);
            }

            if label::find_segment_end(label).1 {
                return Err(InsertError::wildcard_not_terminal(route));
            }
            if !self.children.is_empty() {
                return Err(InsertError::duplicate(route));
            }
            self.children.insert(0, Node::leaf(label, value));
            return Ok(&mut self.children[0]);
        }

        // Static path from here on.
        if self.label == label {
            if self.value.is_none() {
                self.value = value;
                return Ok(self);
            }
            if value.is_none() {
                // Re-entered through a variable split; nothing to do.
                return Ok(self);
            }
            return Err(InsertError::duplicate(route));
        }

        let prefix = label::common_prefix_len(&self.label, label);

        // The new label is a strict prefix of this node: split and claim
        // the now-shorter node.
        if self.can_split() && label.len() == prefix {
            self.split(prefix);
            self.value = value;
            return Ok(self);
        }

        // Shared prefix shorter than this node's label: split first,
        // then fall through to the child scan.
        if self.can_split() && prefix > 0 && prefix < self.label.len() {
            self.split(prefix);
        }

        // A variable sibling already claims this position; a static
        // branch cannot be added next to it.
        if self
            .children
            .iter()
            .any(|c| c.is_wildcard() || c.is_parameter())
        {
            return Err(InsertError::duplicate(route));
        }

        let next = label.as_bytes()[prefix];
        if let Some(idx) = self
            .children
            .iter()
            .position(|c| c.label.as_bytes().first() == Some(&next))
        {
            return self.children[idx].insert(&label[prefix..], value, route);
        }

        self.children.push(Node::leaf(&label[prefix..], value));
        let idx = self.children.len() - 1;
        Ok(&mut self.children[idx])
    }

    /// Walks the subtree consuming `path`, recording parameter captures
    /// into `params` on the unwind.
    ///
    /// Returns the stored value of the terminal node, or `None` when no
    /// value-bearing node consumes the whole path. Captures pushed on a
    /// failed branch are discarded by the caller along with the miss.
    fn find<'t, 'p>(&'t self, path: &'p str, params: &mut Params<'t, 'p>) -> Option<&'t T> {
        if self.is_unclaimed() {
            return None;
        }

        if self.is_wildcard() {
            params.push(&self.label[1..], path);
            return self.value.as_ref();
        }

        if self.is_parameter() {
            let (end, has_slash) = label::find_segment_end(path);
            if !has_slash {
                params.push(&self.label[1..], path);
                return self.value.as_ref();
            }
            let rest = &path[end..];
            let child = self.children.iter().find(|c| c.supports(rest))?;
            let value = child.find(rest, params);
            params.push(&self.label[1..], &path[..end]);
            return value;
        }

        if !path.starts_with(self.label.as_str()) {
            return None;
        }
        if path.len() == self.label.len() {
            return self.value.as_ref();
        }
        let rest = &path[self.label.len()..];
        let child = self.children.iter().find(|c| c.supports(rest))?;
        child.find(rest, params)
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth > 1 {
            for _ in 0..depth - 1 {
                f.write_str("   ")?;
            }
        }
        if depth > 0 {
            f.write_str("└── ")?;
        }
        f.write_str(&self.label)?;
        if self.value.is_some() {
            f.write_str(" *")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// An edge-compressed route tree mapping paths to values of type `T`.
///
/// Routes are registered once during startup with [`Tree::insert`];
/// afterwards the tree is read-only and [`Tree::find`] may be called
/// from any number of threads.
///
/// # Route syntax
///
/// - `/literal` matches the literal bytes.
/// - `/:name` matches one path segment, captured under `name`.
/// - `/*name` matches the whole remaining path (slashes included) and
///   must be the last element of the route.
///
/// # Example
///
/// ```
/// use trellis_tree::Tree;
///
/// let mut tree = Tree::new();
/// tree.insert("/users/:id", "user").unwrap();
/// tree.insert("/files/*path", "file").unwrap();
///
/// let hit = tree.find("/users/42").unwrap();
/// assert_eq!(*hit.value, "user");
/// assert_eq!(hit.params.get("id"), Some("42"));
/// ```
#[derive(Debug)]
pub struct Tree<T> {
    root: Node<T>,
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::unclaimed(),
        }
    }

    /// Registers `route` with `value`.
    ///
    /// # Errors
    ///
    /// Fails when the route is missing its leading `/`, collides with
    /// an existing registration, or places a wildcard anywhere but the
    /// end of the route. The tree keeps its pre-call shape on error for
    /// every conflict detected before any structural change; callers
    /// are expected to treat any error as fatal to startup.
    pub fn insert(&mut self, route: &str, value: T) -> Result<(), InsertError> {
        self.root.insert(route, Some(value), route).map(|_| ())
    }

    /// Looks up `path`, capturing parameter bindings along the way.
    ///
    /// Returns `None` when no registered route consumes the whole path;
    /// intermediate nodes created by splitting are invisible here.
    #[must_use]
    pub fn find<'t, 'p>(&'t self, path: &'p str) -> Option<RouteMatch<'t, 'p, T>> {
        let mut params = Params::new();
        let value = self.root.find(path, &mut params)?;
        Some(RouteMatch { value, params })
    }

    /// Whether the tree has no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_unclaimed() && self.root.children.is_empty()
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Tree<T> {
    /// Renders the indented diagnostic dump; value-bearing nodes are
    /// marked with `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(empty)");
        }
        self.root.write_indented(f, 0)
    }
}
