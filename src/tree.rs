//! Navigation tree built from page paths.

use crate::text::{Collator, slugify};
use crate::types::Page;
use ahash::AHashMap;
use std::cmp::Ordering;
use std::sync::Arc;

/// A node of the navigation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Folder(Folder),
    Page(Arc<Page>),
}

/// A folder derived from one path prefix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folder {
    pub title: String,
    /// Slash-joined slugs of the path prefix; empty for the root.
    pub key: String,
    pub children: Vec<TreeNode>,
}

impl Folder {
    /// Walk every folder depth-first, parents before children.
    pub fn folders(&self) -> Vec<&Folder> {
        let mut out = vec![self];
        for child in &self.children {
            if let TreeNode::Folder(folder) = child {
                out.extend(folder.folders());
            }
        }
        out
    }

    /// Pages in navigation order.
    pub fn pages(&self) -> Vec<&Arc<Page>> {
        let mut out = Vec::new();
        for child in &self.children {
            match child {
                TreeNode::Folder(folder) => out.extend(folder.pages()),
                TreeNode::Page(page) => out.push(page),
            }
        }
        out
    }
}

/// Persistence key of the folder reached by `path`.
pub fn folder_key_from_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|segment| slugify(segment.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Keys of every folder containing a page at `path`, outermost first.
pub fn ancestor_keys(path: &[String]) -> Vec<String> {
    (1..=path.len())
        .map(|depth| folder_key_from_path(&path[..depth]))
        .filter(|key| !key.is_empty())
        .collect()
}

/// Folder under construction; children refer to other builders by index.
#[derive(Default)]
struct FolderBuilder {
    title: String,
    key: String,
    children: Vec<Child>,
}

enum Child {
    Folder(usize),
    Page(Arc<Page>),
}

/// Build the navigation tree for `pages`, sorted with `collator`.
///
/// Folders are identified by their path key, so pages sharing a path prefix
/// share folders. A page with an empty path sits directly under the root.
pub fn build_tree(pages: &[Arc<Page>], collator: &Collator) -> Folder {
    let mut folders = vec![FolderBuilder::default()];
    let mut by_key: AHashMap<String, usize> = AHashMap::new();
    by_key.insert(String::new(), 0);

    for page in pages {
        let mut parent = 0;
        for depth in 1..=page.path.len() {
            let key = folder_key_from_path(&page.path[..depth]);
            parent = match by_key.get(&key) {
                Some(&existing) => existing,
                None => {
                    let index = folders.len();
                    folders.push(FolderBuilder {
                        title: page.path[depth - 1].clone(),
                        key: key.clone(),
                        children: Vec::new(),
                    });
                    folders[parent].children.push(Child::Folder(index));
                    by_key.insert(key, index);
                    index
                }
            };
        }
        folders[parent].children.push(Child::Page(Arc::clone(page)));
    }

    assemble(&mut folders, 0, collator)
}

fn assemble(folders: &mut [FolderBuilder], index: usize, collator: &Collator) -> Folder {
    let builder = std::mem::take(&mut folders[index]);
    let mut children: Vec<TreeNode> = builder
        .children
        .into_iter()
        .map(|child| match child {
            Child::Folder(i) => TreeNode::Folder(assemble(folders, i, collator)),
            Child::Page(page) => TreeNode::Page(page),
        })
        .collect();
    children.sort_by(|a, b| compare_nodes(a, b, collator));

    Folder {
        title: builder.title,
        key: builder.key,
        children,
    }
}

fn compare_nodes(a: &TreeNode, b: &TreeNode, collator: &Collator) -> Ordering {
    match (a, b) {
        (TreeNode::Folder(_), TreeNode::Page(_)) => Ordering::Less,
        (TreeNode::Page(_), TreeNode::Folder(_)) => Ordering::Greater,
        (TreeNode::Folder(a), TreeNode::Folder(b)) => collator.compare(&a.title, &b.title),
        (TreeNode::Page(a), TreeNode::Page(b)) => compare_pages(a, b, collator),
    }
}

/// Order ascending, then title (or id) in collation order.
pub fn compare_pages(a: &Page, b: &Page, collator: &Collator) -> Ordering {
    a.order
        .total_cmp(&b.order)
        .then_with(|| collator.compare(a.display_title(), b.display_title()))
}
