//! Selection forest: arena-backed checkbox trees with cascading changes,
//! name-linked peers and a root-level listener registry.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, TreeResult};
use crate::domain::handle::CheckboxHandle;
use crate::domain::registry::Registry;

/// Stable reference to a node inside a [`SelectionForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Index);

/// Events dispatched through a tree root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TreeEvent {
    /// A node's checked state was (re)applied
    Change,
    Custom(String),
}

impl fmt::Display for TreeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeEvent::Change => write!(f, "change"),
            TreeEvent::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for TreeEvent {
    fn from(name: &str) -> Self {
        match name {
            "change" => TreeEvent::Change,
            other => TreeEvent::Custom(other.to_string()),
        }
    }
}

/// Callback invoked as `(forest, root, payload)`.
pub type Listener<H> = Rc<dyn Fn(&mut SelectionForest<H>, NodeId, NodeId) -> TreeResult<()>>;

struct Registration<H: CheckboxHandle> {
    event: TreeEvent,
    callback: Listener<H>,
}

/// One checkbox in one tree.
pub struct SelectionNode<H: CheckboxHandle> {
    handle: H,
    /// Weak back-reference, None for roots
    parent: Option<NodeId>,
    /// Owning tree root, resolved once at construction
    root: NodeId,
    children: Vec<NodeId>,
    /// Same-named nodes across the forest, filled on first use
    linked: Option<Vec<NodeId>>,
    /// Only populated on roots
    listeners: Vec<Registration<H>>,
    /// Selected+counted total of this subtree as of the last calculation
    total: usize,
}

impl<H: CheckboxHandle> SelectionNode<H> {
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn name(&self) -> Option<&str> {
        self.handle.name()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_checked(&self) -> bool {
        self.handle.is_checked()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn counted(&self) -> bool {
        self.handle.is_checked() && self.handle.counts_toward_total()
    }
}

impl<H: CheckboxHandle> fmt::Debug for SelectionNode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionNode")
            .field("handle", &self.handle)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("listeners", &self.listeners.len())
            .field("total", &self.total)
            .finish()
    }
}

/// All trees built from one page, glued only by name-based linking.
///
/// Tree shape is fixed at construction; afterwards only checked state,
/// cached totals and link caches change.
pub struct SelectionForest<H: CheckboxHandle> {
    arena: Arena<SelectionNode<H>>,
    roots: Vec<NodeId>,
    observers: HashMap<H::Key, Vec<NodeId>>,
    steps: usize,
}

impl<H: CheckboxHandle> fmt::Debug for SelectionForest<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionForest")
            .field("roots", &self.roots)
            .field("nodes", &self.arena.len())
            .field("steps", &self.steps)
            .finish()
    }
}

impl<H: CheckboxHandle> SelectionForest<H> {
    /// Build one tree per root handle of `registry`.
    ///
    /// Every handle whose parent name equals a node's name becomes a child
    /// of that node, so a shared name gives each of its nodes the same
    /// children. A name repeating on its own ancestor chain is rejected.
    #[instrument(level = "debug", skip(registry), fields(handles = registry.len()))]
    pub fn build(registry: &Registry<H>) -> TreeResult<Self> {
        let mut forest = Self {
            arena: Arena::new(),
            roots: Vec::new(),
            observers: HashMap::new(),
            steps: 0,
        };

        let mut ancestors = Vec::new();
        for handle in registry.roots() {
            let root = forest.build_node(registry, handle.clone(), None, &mut ancestors)?;
            forest.roots.push(root);
        }

        debug!(
            roots = forest.roots.len(),
            nodes = forest.arena.len(),
            "forest built"
        );
        Ok(forest)
    }

    fn build_node(
        &mut self,
        registry: &Registry<H>,
        handle: H,
        parent: Option<NodeId>,
        ancestors: &mut Vec<String>,
    ) -> TreeResult<NodeId> {
        let name = handle.name().map(str::to_string);
        if let Some(name) = &name {
            if ancestors.contains(name) {
                return Err(DomainError::CycleDetected(name.clone()));
            }
        }

        let parent_root = match parent {
            Some(parent_id) => Some(self.node(parent_id)?.root),
            None => None,
        };
        let key = handle.key();
        let idx = self.arena.insert_with(|idx| SelectionNode {
            handle,
            parent,
            root: parent_root.unwrap_or(NodeId(idx)),
            children: Vec::new(),
            linked: None,
            listeners: Vec::new(),
            total: 0,
        });
        let id = NodeId(idx);

        if let Some(parent_id) = parent {
            self.node_mut(parent_id)?.children.push(id);
        }

        // Unnamed nodes cannot be anyone's parent.
        if let Some(name) = name {
            ancestors.push(name.clone());
            for child in registry.by_parent_name(Some(name.as_str())) {
                self.build_node(registry, child.clone(), Some(id), ancestors)?;
            }
            ancestors.pop();
        }

        self.observers.entry(key).or_default().push(id);
        Ok(id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn node(&self, id: NodeId) -> TreeResult<&SelectionNode<H>> {
        self.arena.get(id.0).ok_or(DomainError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut SelectionNode<H>> {
        self.arena.get_mut(id.0).ok_or(DomainError::UnknownNode(id))
    }

    pub fn root_of(&self, id: NodeId) -> TreeResult<NodeId> {
        Ok(self.node(id)?.root)
    }

    pub fn is_checked(&self, id: NodeId) -> TreeResult<bool> {
        Ok(self.node(id)?.is_checked())
    }

    /// Cached subtree total from the last [`Self::calc_total_selected`].
    pub fn total(&self, id: NodeId) -> TreeResult<usize> {
        Ok(self.node(id)?.total)
    }

    /// Number of `on_change` invocations so far, transitive ones included.
    pub fn propagation_steps(&self) -> usize {
        self.steps
    }

    /// Pre-order walk of the tree rooted at `root`.
    pub fn iter_tree(&self, root: NodeId) -> TreeIterator<'_, H> {
        TreeIterator::new(self, root)
    }

    /// Pre-order walk of every tree, in root order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SelectionNode<H>)> + '_ {
        self.roots
            .iter()
            .flat_map(move |&root| self.iter_tree(root))
    }

    /// Nodes built around the handle identified by `key`.
    pub fn nodes_for_handle(&self, key: &H::Key) -> &[NodeId] {
        self.observers.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every node named `name`, searched from the owning root of `id`:
    /// its own tree first, then the remaining trees in root order.
    #[instrument(level = "trace", skip(self))]
    pub fn find_named(&self, id: NodeId, name: &str) -> TreeResult<Vec<NodeId>> {
        let own_root = self.root_of(id)?;
        let search_order = std::iter::once(own_root)
            .chain(self.roots.iter().copied().filter(|&root| root != own_root));

        Ok(search_order
            .flat_map(|root| self.iter_tree(root))
            .filter(|(_, node)| node.name() == Some(name))
            .map(|(node_id, _)| node_id)
            .collect())
    }

    /// Same-named nodes across the forest, `id` included.
    ///
    /// Computed on first use and cached; unnamed nodes have no links.
    pub fn find_linked(&mut self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let node = self.node(id)?;
        if let Some(linked) = &node.linked {
            return Ok(linked.clone());
        }

        let linked = match node.name().map(str::to_string) {
            Some(name) => self.find_named(id, &name)?,
            None => Vec::new(),
        };
        trace!(?id, linked = linked.len(), "resolved links");
        self.node_mut(id)?.linked = Some(linked.clone());
        Ok(linked)
    }

    /// Apply `checked` to `id`, force it onto every descendant, pull
    /// same-named peers along and notify the owning root.
    ///
    /// Peers are only revisited when their state differs, which is what
    /// ends propagation between mutually linked nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn on_change(&mut self, id: NodeId, checked: bool) -> TreeResult<()> {
        self.steps += 1;

        // Resolved before our own state flips.
        let linked = self.find_linked(id)?;

        let children = {
            let node = self.node(id)?;
            node.handle.set_checked(checked);
            node.children.clone()
        };

        for child in children {
            self.on_change(child, checked)?;
        }

        for peer in linked {
            if self.is_checked(peer)? != checked {
                self.on_change(peer, checked)?;
            }
        }

        self.fire_event(id, &TreeEvent::Change, id)
    }

    /// Route a user toggle reported by the host to every node wrapping
    /// that handle. Returns false when no node observes `key`.
    #[instrument(level = "debug", skip(self))]
    pub fn handle_user_toggle(&mut self, key: &H::Key) -> TreeResult<bool> {
        let observers = self.nodes_for_handle(key).to_vec();
        if observers.is_empty() {
            debug!(?key, "toggle on unobserved handle");
            return Ok(false);
        }

        for id in observers {
            let checked = self.is_checked(id)?;
            self.on_change(id, checked)?;
        }
        Ok(true)
    }

    /// Register `callback` for `event` on the root owning `id`.
    pub fn add_listener<F>(&mut self, id: NodeId, event: TreeEvent, callback: F) -> TreeResult<()>
    where
        F: Fn(&mut SelectionForest<H>, NodeId, NodeId) -> TreeResult<()> + 'static,
    {
        let root = self.root_of(id)?;
        self.node_mut(root)?.listeners.push(Registration {
            event,
            callback: Rc::new(callback),
        });
        Ok(())
    }

    pub fn listener_count(&self, id: NodeId) -> TreeResult<usize> {
        let root = self.root_of(id)?;
        Ok(self.node(root)?.listeners.len())
    }

    /// Dispatch `event` to every matching listener on the root owning `id`.
    pub fn fire_event(&mut self, id: NodeId, event: &TreeEvent, payload: NodeId) -> TreeResult<()> {
        let root = self.root_of(id)?;
        let callbacks: Vec<Listener<H>> = self
            .node(root)?
            .listeners
            .iter()
            .filter(|registration| &registration.event == event)
            .map(|registration| Rc::clone(&registration.callback))
            .collect();

        trace!(%event, ?root, ?payload, listeners = callbacks.len(), "fire event");
        for callback in callbacks {
            callback(self, root, payload)?;
        }
        Ok(())
    }

    /// Count checked, counted nodes in the subtree of `id`, caching each
    /// visited node's subtree total.
    pub fn calc_total_selected(&mut self, id: NodeId) -> TreeResult<usize> {
        let (mut total, children) = {
            let node = self.node(id)?;
            (usize::from(node.counted()), node.children.clone())
        };

        for child in children {
            total += self.calc_total_selected(child)?;
        }

        self.node_mut(id)?.total = total;
        Ok(total)
    }
}

/// Pre-order iterator over one tree.
pub struct TreeIterator<'a, H: CheckboxHandle> {
    forest: &'a SelectionForest<H>,
    stack: Vec<NodeId>,
}

impl<'a, H: CheckboxHandle> TreeIterator<'a, H> {
    fn new(forest: &'a SelectionForest<H>, root: NodeId) -> Self {
        Self {
            forest,
            stack: vec![root],
        }
    }
}

impl<'a, H: CheckboxHandle> Iterator for TreeIterator<'a, H> {
    type Item = (NodeId, &'a SelectionNode<H>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Ok(node) = self.forest.node(current) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current, node));
            }
        }
        None
    }
}
