//! Dialog tree - nested conversation content opened by dialog objects.

use serde::{Deserialize, Serialize};

use crate::value_objects::LocalizedText;
use crate::{DialogNodeId, Flag};

/// One node of a dialog tree.
///
/// A node without children is terminal; reaching a terminal node that
/// carries `resolves_flag` resolves that flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogNode {
    pub id: DialogNodeId,
    /// Line spoken when this node is active.
    #[serde(default)]
    pub text: LocalizedText,
    /// Label of the choice leading to this node from its parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choice_label: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DialogNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolves_flag: Option<Flag>,
}

impl DialogNode {
    pub fn new(id: impl Into<DialogNodeId>, text: LocalizedText) -> Self {
        Self {
            id: id.into(),
            text,
            choice_label: None,
            children: Vec::new(),
            resolves_flag: None,
        }
    }

    pub fn with_choice_label(mut self, label: LocalizedText) -> Self {
        self.choice_label = Some(label);
        self
    }

    pub fn with_child(mut self, child: DialogNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn resolving(mut self, flag: impl Into<Flag>) -> Self {
        self.resolves_flag = Some(flag.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first search for a node anywhere under (and including) this one.
    pub fn find(&self, id: &DialogNodeId) -> Option<&DialogNode> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Direct child with the given id.
    pub fn child(&self, id: &DialogNodeId) -> Option<&DialogNode> {
        self.children.iter().find(|child| &child.id == id)
    }

    /// All node ids in depth-first order.
    pub fn node_ids(&self) -> Vec<&DialogNodeId> {
        let mut ids = vec![&self.id];
        for child in &self.children {
            ids.extend(child.node_ids());
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DialogNode {
        DialogNode::new("root", LocalizedText::new("en", "I'll kill your time"))
            .with_child(
                DialogNode::new("ask", LocalizedText::new("en", "Why?"))
                    .with_child(
                        DialogNode::new("answer", LocalizedText::new("en", "Because."))
                            .resolving("virus1-talked"),
                    ),
            )
            .with_child(DialogNode::new("leave", LocalizedText::new("en", "Bye")))
    }

    #[test]
    fn finds_nested_nodes() {
        let tree = tree();
        let answer = tree.find(&DialogNodeId::from("answer")).unwrap();
        assert!(answer.is_terminal());
        assert_eq!(answer.resolves_flag, Some(Flag::from("virus1-talked")));
        assert!(tree.find(&DialogNodeId::from("missing")).is_none());
    }

    #[test]
    fn child_only_looks_one_level_down() {
        let tree = tree();
        assert!(tree.child(&DialogNodeId::from("ask")).is_some());
        assert!(tree.child(&DialogNodeId::from("answer")).is_none());
    }

    #[test]
    fn node_ids_are_depth_first() {
        let ids: Vec<String> = tree().node_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["root", "ask", "answer", "leave"]);
    }
}
