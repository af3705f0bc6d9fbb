//! Filesystem traversal — turn an on-disk directory into a [`TreeNode`].
//!
//! Each directory is listed one level at a time with [`walkdir`], sorted by
//! file name.  Symlinks are reported as entries but never followed, so a
//! link inside an extracted archive cannot lead the walk outside of it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use super::tree::TreeNode;

/// Build the tree rooted at `root`.  Fails only if `root` itself cannot be
/// read; unreadable entries further down are skipped.
pub fn build_tree(root: &Path) -> anyhow::Result<TreeNode> {
    let meta = std::fs::symlink_metadata(root)
        .with_context(|| format!("cannot stat {}", root.display()))?;
    Ok(build_node(root, entry_name(root), meta.is_dir()))
}

fn build_node(path: &Path, name: String, is_dir: bool) -> TreeNode {
    if !is_dir {
        return TreeNode::file(name);
    }
    let children = list_dir(path)
        .into_iter()
        .map(|(child_path, child_name, child_is_dir)| {
            build_node(&child_path, child_name, child_is_dir)
        })
        .collect();
    TreeNode::dir(name, children)
}

/// Immediate children of `dir` as `(path, name, is_dir)`, in file-name order.
fn list_dir(dir: &Path) -> Vec<(PathBuf, String, bool)> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("skipping unreadable entry: {e}");
                None
            }
        })
        .map(|entry| {
            let is_dir = entry.file_type().is_dir();
            let name = entry.file_name().to_string_lossy().into_owned();
            (entry.into_path(), name, is_dir)
        })
        .collect()
}

/// The first entry of `dir` by file name, if any.
pub fn first_entry(dir: &Path) -> Option<PathBuf> {
    list_dir(dir).into_iter().next().map(|(path, _, _)| path)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn builds_sorted_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("repo-main");
        std::fs::create_dir_all(root.join("src/core")).unwrap();
        std::fs::create_dir_all(root.join("empty")).unwrap();
        touch(&root.join("src/main.rs"));
        touch(&root.join("src/core/tree.rs"));
        touch(&root.join("README.md"));
        touch(&root.join("Cargo.toml"));

        let tree = build_tree(&root).unwrap();
        let expected = TreeNode::dir(
            "repo-main",
            vec![
                TreeNode::file("Cargo.toml"),
                TreeNode::file("README.md"),
                TreeNode::dir("empty", Vec::new()),
                TreeNode::dir(
                    "src",
                    vec![
                        TreeNode::dir("core", vec![TreeNode::file("tree.rs")]),
                        TreeNode::file("main.rs"),
                    ],
                ),
            ],
        );
        assert_eq!(tree, expected);
    }

    #[test]
    fn single_file_root() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("only.txt");
        touch(&file);
        assert_eq!(build_tree(&file).unwrap(), TreeNode::file("only.txt"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(build_tree(&tmp.path().join("absent")).is_err());
    }

    #[test]
    fn first_entry_picks_lowest_name() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(first_entry(tmp.path()), None);
        std::fs::create_dir(tmp.path().join("b")).unwrap();
        std::fs::create_dir(tmp.path().join("a")).unwrap();
        assert_eq!(first_entry(tmp.path()), Some(tmp.path().join("a")));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        std::fs::create_dir_all(root.join("real")).unwrap();
        touch(&root.join("real/inner.txt"));
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

        let tree = build_tree(&root).unwrap();
        assert_eq!(tree.children()[0], TreeNode::file("link"));
        assert_eq!(tree.children()[1].children().len(), 1);
    }
}
