/*
Tree rendering lives in a trait so hosts can swap their own renderer
without the forest knowing about termtree.
 */
use termtree::Tree;

use crate::domain::error::TreeResult;
use crate::domain::forest::{NodeId, SelectionForest, SelectionNode};
use crate::domain::handle::CheckboxHandle;

pub trait TreeNodeConvert {
    fn to_tree_string(&self, root: NodeId) -> TreeResult<Tree<String>>;
}

/// `[x] name *` where `*` marks nodes that count toward totals.
pub fn node_label<H: CheckboxHandle>(node: &SelectionNode<H>) -> String {
    let mark = if node.is_checked() { "[x]" } else { "[ ]" };
    let name = node.name().unwrap_or("<unnamed>");
    if node.handle().counts_toward_total() {
        format!("{} {} *", mark, name)
    } else {
        format!("{} {}", mark, name)
    }
}

impl<H: CheckboxHandle> TreeNodeConvert for SelectionForest<H> {
    fn to_tree_string(&self, root: NodeId) -> TreeResult<Tree<String>> {
        let node = self.node(root)?;
        let leaves = node
            .children()
            .iter()
            .map(|&child| self.to_tree_string(child))
            .collect::<TreeResult<Vec<_>>>()?;
        Ok(Tree::new(node_label(node)).with_leaves(leaves))
    }
}
