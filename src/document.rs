//! DOM seam: the handful of document operations the page features need.
//!
//! SYSTEM CONTEXT
//! ==============
//! Theme, shortcut, and toast logic never touch `web_sys` directly. They go
//! through [`PageDocument`], implemented by `browser::WebDocument` in the
//! browser and by [`MemoryDocument`] natively. Missing lookup targets are
//! reported as `None` and treated as silent no-ops by callers.
//!
//! [`MemoryDocument`] keeps a flat element list in insertion order, which is
//! also the order selectors match in (first match wins, like
//! `querySelector`). It understands `#id`, `.class`, and `[attribute]`
//! selectors, which covers every lookup hook the page uses.

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::toast::Toast;

/// Document operations used by the page features.
pub trait PageDocument {
    /// Handle to an element in this document.
    type Element;

    /// Whether `<body>` currently carries `class`.
    fn body_has_class(&self, class: &str) -> bool;

    /// Flip `class` on `<body>`, returning whether it is present afterwards.
    /// `None` when there is no body, so nothing changed.
    fn toggle_body_class(&self, class: &str) -> Option<bool>;

    /// Add `class` to `<body>` (no-op when already present).
    fn add_body_class(&self, class: &str);

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element matching `selector` in document order.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Move input focus to `element`.
    fn focus(&self, element: &Self::Element);

    /// Activate `element` as if the user clicked it.
    fn click(&self, element: &Self::Element);

    /// Build a toast element with `style`, append it to `<body>`, and return
    /// it. `None` when there is no body to append to.
    fn append_toast(&self, toast: &Toast, style: &str) -> Option<Self::Element>;

    /// Detach `element` from the document.
    fn remove(&self, element: &Self::Element);
}

// =============================================================================
// MEMORY DOCUMENT
// =============================================================================

/// Handle to an element in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Element stored in a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub tag: String,
    pub id: Option<String>,
    /// Space-separated class list, as in the `class` attribute.
    pub class_name: String,
    pub attributes: BTreeMap<String, String>,
    pub style: String,
    pub inner_html: String,
}

impl MemoryElement {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_owned(), ..Self::default() }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_owned();
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(*id),
            Selector::Class(class) => self.has_class(class),
            Selector::Attribute(name) => self.attributes.contains_key(*name),
        }
    }
}

/// Simple selectors understood by [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    Attribute(&'a str),
}

impl<'a> Selector<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(id) = raw.strip_prefix('#') {
            return (!id.is_empty()).then_some(Self::Id(id));
        }
        if let Some(class) = raw.strip_prefix('.') {
            return (!class.is_empty()).then_some(Self::Class(class));
        }
        let name = raw.strip_prefix('[')?.strip_suffix(']')?.trim();
        (!name.is_empty()).then_some(Self::Attribute(name))
    }
}

#[derive(Debug, Default)]
struct Tree {
    no_body: bool,
    body_classes: BTreeSet<String>,
    nodes: BTreeMap<NodeId, MemoryElement>,
    next_node: usize,
    focused: Option<NodeId>,
    clicks: HashMap<NodeId, u32>,
}

/// In-memory document for native tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    tree: RefCell<Tree>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document whose `<body>` has not been parsed yet: body class changes
    /// and toast insertion are refused.
    #[must_use]
    pub fn without_body() -> Self {
        Self { tree: RefCell::new(Tree { no_body: true, ..Tree::default() }) }
    }

    /// Append `element` to the body and return its handle.
    pub fn insert(&self, element: MemoryElement) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let node = NodeId(tree.next_node);
        tree.next_node += 1;
        tree.nodes.insert(node, element);
        node
    }

    /// Snapshot of an attached element.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<MemoryElement> {
        self.tree.borrow().nodes.get(&node).cloned()
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.tree.borrow().nodes.contains_key(&node)
    }

    /// Number of attached elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.borrow().nodes.is_empty()
    }

    /// Element currently holding input focus.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.tree.borrow().focused
    }

    /// How many times `node` has been clicked.
    #[must_use]
    pub fn click_count(&self, node: NodeId) -> u32 {
        self.tree.borrow().clicks.get(&node).copied().unwrap_or(0)
    }

    /// Classes currently on `<body>`, sorted.
    #[must_use]
    pub fn body_classes(&self) -> Vec<String> {
        self.tree.borrow().body_classes.iter().cloned().collect()
    }

    /// Attached elements carrying `class`, in document order.
    #[must_use]
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.tree
            .borrow()
            .nodes
            .iter()
            .filter(|(_, el)| el.has_class(class))
            .map(|(node, _)| *node)
            .collect()
    }
}

impl PageDocument for MemoryDocument {
    type Element = NodeId;

    fn body_has_class(&self, class: &str) -> bool {
        self.tree.borrow().body_classes.contains(class)
    }

    fn toggle_body_class(&self, class: &str) -> Option<bool> {
        let mut tree = self.tree.borrow_mut();
        if tree.no_body {
            return None;
        }
        if tree.body_classes.remove(class) {
            Some(false)
        } else {
            tree.body_classes.insert(class.to_owned());
            Some(true)
        }
    }

    fn add_body_class(&self, class: &str) {
        let mut tree = self.tree.borrow_mut();
        if !tree.no_body {
            tree.body_classes.insert(class.to_owned());
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&Selector::Id(id))
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let Some(parsed) = Selector::parse(selector) else {
            log::debug!("unsupported selector {selector:?}");
            return None;
        };
        self.query(&parsed)
    }

    fn focus(&self, element: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.nodes.contains_key(element) {
            tree.focused = Some(*element);
        }
    }

    fn click(&self, element: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        if tree.nodes.contains_key(element) {
            *tree.clicks.entry(*element).or_insert(0) += 1;
        }
    }

    fn append_toast(&self, toast: &Toast, style: &str) -> Option<NodeId> {
        if self.tree.borrow().no_body {
            return None;
        }
        let element = MemoryElement {
            tag: "div".to_owned(),
            class_name: toast.class_name(),
            style: style.to_owned(),
            inner_html: toast.message.clone(),
            ..MemoryElement::default()
        };
        Some(self.insert(element))
    }

    fn remove(&self, element: &NodeId) {
        let mut tree = self.tree.borrow_mut();
        tree.nodes.remove(element);
        tree.clicks.remove(element);
        if tree.focused == Some(*element) {
            tree.focused = None;
        }
    }
}

impl MemoryDocument {
    fn query(&self, selector: &Selector<'_>) -> Option<NodeId> {
        self.tree
            .borrow()
            .nodes
            .iter()
            .find(|(_, el)| el.matches(selector))
            .map(|(node, _)| *node)
    }
}
