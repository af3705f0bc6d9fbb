//! Wire model of a repository tree as served by `/tree`.
//!
//! A [`TreeNode`] owns its children directly, so a decoded tree is always
//! finite and acyclic.  The JSON shape is
//! `{ "name": …, "is_dir": …, "children": [ … ] }` where `children` may be
//! absent or `null` for leaves.
//!
//! Trees of any depth decode and drop without recursing on the call stack.

use serde::{Deserialize, Serialize};

// ───────────────────────────────────────── tree node ─────────

/// A single file-or-directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub is_dir: bool,
    /// Child entries in display order.  Omitted on the wire when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// A leaf file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            children: None,
        }
    }

    /// A directory entry.  An empty `children` list is stored as `None`
    /// so that it is omitted when serialised.
    pub fn dir(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            children: if children.is_empty() {
                None
            } else {
                Some(children)
            },
        }
    }

    /// Borrow the children, treating an absent list as empty.
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Decode a tree from JSON with no nesting limit.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let mut json = serde_json::Deserializer::from_slice(bytes);
        json.disable_recursion_limit();
        let tree = TreeNode::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(tree)
    }
}

impl Drop for TreeNode {
    // Flatten the subtree first so dropping a deep chain stays iterative.
    fn drop(&mut self) {
        let Some(mut pending) = self.children.take() else {
            return;
        };
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children.take() {
                pending.extend(children);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[test]
    fn decodes_leaf_without_children_field() {
        let node: TreeNode = serde_json::from_str(r#"{"name":"a.txt","is_dir":false}"#).unwrap();
        assert_eq!(node, TreeNode::file("a.txt"));
        assert!(node.children().is_empty());
    }

    #[test]
    fn null_children_decode_as_absent() {
        let node: TreeNode =
            serde_json::from_str(r#"{"name":"src","is_dir":true,"children":null}"#).unwrap();
        assert_eq!(node.children, None);
    }

    #[test]
    fn empty_directory_omits_children_when_serialised() {
        let json = serde_json::to_string(&TreeNode::dir("empty", Vec::new())).unwrap();
        assert_eq!(json, r#"{"name":"empty","is_dir":true}"#);
    }

    /// `{"name":"d","is_dir":true,"children":[` repeated `depth` times
    /// around a single file leaf.
    pub(crate) fn nested_json(depth: usize) -> String {
        let mut json = String::new();
        for _ in 0..depth {
            json.push_str(r#"{"name":"d","is_dir":true,"children":["#);
        }
        json.push_str(r#"{"name":"leaf","is_dir":false}"#);
        for _ in 0..depth {
            json.push_str("]}");
        }
        json
    }

    #[test]
    fn decodes_trees_past_the_default_nesting_limit() {
        let tree = TreeNode::from_json_slice(nested_json(70).as_bytes()).unwrap();
        let mut depth = 0;
        let mut node = &tree;
        while let [child] = node.children() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 70);
        assert_eq!(node, &TreeNode::file("leaf"));
    }

    #[test]
    fn very_deep_tree_decodes_and_drops() {
        let tree = TreeNode::from_json_slice(nested_json(20_000).as_bytes()).unwrap();
        assert_eq!(tree.name, "d");
        drop(tree);
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let err = TreeNode::from_json_slice(br#"{"name":"a","is_dir":false} x"#).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let err = serde_json::from_str::<TreeNode>(r#"{"name":"x"}"#).unwrap_err();
        assert!(err.to_string().contains("is_dir"));
    }
}
