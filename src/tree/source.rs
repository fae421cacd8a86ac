//! Include tree of assembled source files.
//!
//! After assembling, the assembler reports a flat list of source files. Files
//! pulled in by `#INCLUDE` carry the index of the including file and the line
//! of the directive. This module folds that list into a forest: main sources
//! at the top, each including file a category over the files it includes.

use serde::{Deserialize, Serialize};

use super::node::{Label, TreeNode};
use super::provider::{TreeError, TreeProvider};

/// Deepest include chain accepted. Building, cloning and dropping the tree
/// all recurse once per level.
pub const MAX_INCLUDE_DEPTH: usize = 64;

/// One source file as reported by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// True for `#INCLUDE`d files.
    pub included: bool,
    /// Index of the including file (meaningful when `included`).
    pub parent_file: u16,
    /// Line of the `#INCLUDE` directive in the parent.
    pub parent_line: u16,
    /// Directory part of the path.
    pub file_path: String,
    /// File name part of the path.
    pub file_name: String,
}

impl SourceFile {
    /// A top-level source file.
    pub fn main(file_path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            included: false,
            parent_file: 0,
            parent_line: 0,
            file_path: file_path.into(),
            file_name: file_name.into(),
        }
    }

    /// A file included from `parent_file` at `parent_line`.
    pub fn included(
        parent_file: u16,
        parent_line: u16,
        file_path: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            included: true,
            parent_file,
            parent_line,
            file_path: file_path.into(),
            file_name: file_name.into(),
        }
    }
}

impl Label for SourceFile {
    fn label(&self) -> &str {
        &self.file_name
    }
}

/// Build the include forest for `files`.
///
/// A parent must appear earlier in the list than the files it includes,
/// which is the order the assembler discovers them in. Include chains may be
/// at most `MAX_INCLUDE_DEPTH` levels deep. Children are sorted by the line
/// of their `#INCLUDE` directive.
pub fn source_tree(files: &[SourceFile]) -> Result<TreeProvider<SourceFile, SourceFile>, TreeError> {
    let mut includes: Vec<Vec<usize>> = vec![Vec::new(); files.len()];
    let mut depths = vec![0usize; files.len()];
    let mut roots = Vec::new();

    for (index, file) in files.iter().enumerate() {
        if !file.included {
            roots.push(index);
            continue;
        }
        let parent = file.parent_file as usize;
        if parent >= index {
            return Err(TreeError::UnknownParent { file: index, parent });
        }
        let depth = depths[parent] + 1;
        if depth > MAX_INCLUDE_DEPTH {
            return Err(TreeError::IncludeTooDeep { file: index, depth });
        }
        depths[index] = depth;
        includes[parent].push(index);
    }

    for children in &mut includes {
        children.sort_by_key(|&i| (files[i].parent_line, i));
    }

    log::debug!("Source tree: {} files, {} main sources", files.len(), roots.len());

    let roots = roots
        .into_iter()
        .map(|index| build(files, &includes, index))
        .collect();
    Ok(TreeProvider::new(roots))
}

fn build(files: &[SourceFile], includes: &[Vec<usize>], index: usize) -> TreeNode<SourceFile, SourceFile> {
    let file = files[index].clone();
    if includes[index].is_empty() {
        return TreeNode::leaf(file);
    }
    let children = includes[index]
        .iter()
        .map(|&child| build(files, includes, child))
        .collect();
    TreeNode::category(file, children)
}
