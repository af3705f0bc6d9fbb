//! Text rendering of a [`TreeNode`] — one line per entry, two spaces of
//! indent per level, a folder or file icon in front of the name.
//!
//! Traversal uses an explicit stack rather than call recursion, so a deeply
//! nested tree from the server cannot exhaust the thread's stack.

use super::tree::TreeNode;

/// One level of indentation.
pub const INDENT: &str = "  ";
pub const DIR_ICON: &str = "📁 ";
pub const FILE_ICON: &str = "📄 ";

/// Render `node` (and everything beneath it) starting at `depth`.
///
/// Children follow their parent in array order, each one level deeper.
pub fn render_tree(node: &TreeNode, depth: usize) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&TreeNode, usize)> = vec![(node, depth)];

    while let Some((node, depth)) = stack.pop() {
        push_line(&mut out, node, depth);
        // Reverse so the first child is popped first.
        for child in node.children().iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    out
}

fn push_line(out: &mut String, node: &TreeNode, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(if node.is_dir { DIR_ICON } else { FILE_ICON });
    out.push_str(&node.name);
    out.push('\n');
}
