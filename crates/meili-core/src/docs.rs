//! Documentation tree built from the docs site sitemap.
//!
//! Every page URL becomes a path from the root node, one node per path
//! segment. Segments are turned into readable labels with
//! [`format_section`]:
//!
//! ```
//! use meili_core::docs::{build_tree, format_section};
//!
//! assert_eq!(format_section("getting_started.html"), "Getting Started");
//!
//! let tree = build_tree(&[
//!     "https://www.meilisearch.com/docs/learn/getting_started".to_string(),
//!     "https://www.meilisearch.com/docs/learn/what_is_meilisearch".to_string(),
//! ])
//! .unwrap();
//! assert_eq!(tree.label, "Meilisearch Documentation");
//! assert_eq!(tree.children[0].label, "Docs");
//! assert_eq!(tree.children[0].children[0].children.len(), 2);
//! ```

use crate::{Error, Result};
use serde::Serialize;

/// Label of the root node, standing in for the site's scheme and host.
pub const ROOT_LABEL: &str = "Meilisearch Documentation";

/// A node of the documentation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocNode {
    /// Readable label.
    pub label: String,
    /// URL of the page that introduced this node.
    pub link: String,
    /// Children in discovery order. Labels are unique among siblings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl DocNode {
    fn new(label: impl Into<String>, link: &str) -> Self {
        Self {
            label: label.into(),
            link: link.to_string(),
            children: Vec::new(),
        }
    }

    /// Total number of nodes, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Whether a sitemap URL should be left out of the tree.
///
/// Not-found pages are dropped wherever they live, with or without an
/// extension or trailing slash.
pub fn is_excluded(url: &str) -> bool {
    let last = url.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    matches!(last, "404" | "404.html")
}

/// Turn a URL path segment into a label.
///
/// Underscores and hyphens become spaces, anything from the first `.` on is
/// dropped, and every word is title-cased.
pub fn format_section(section: &str) -> String {
    let stem = section.split('.').next().unwrap_or_default();
    let mut label = String::with_capacity(stem.len());
    let mut previous_is_letter = false;

    for ch in stem.chars() {
        let ch = if ch == '_' || ch == '-' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if previous_is_letter {
                label.extend(ch.to_lowercase());
            } else {
                label.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            label.push(ch);
            previous_is_letter = false;
        }
    }
    label
}

/// Split a URL into tree segments.
///
/// The scheme and host are replaced by [`ROOT_LABEL`]; the path is split on
/// `/` and a trailing empty segment is dropped.
pub fn split_link(link: &str) -> Vec<String> {
    let path = link.split_once("://").map_or(link, |(_, rest)| {
        rest.find('/').map_or("", |slash| &rest[slash..])
    });

    let mut segments = vec![ROOT_LABEL.to_string()];
    segments.extend(
        path.split('/')
            .skip(1)
            .map(str::to_string),
    );
    if segments.len() > 1 && segments.last().is_some_and(String::is_empty) {
        segments.pop();
    }
    segments
}

/// Build the documentation tree from page URLs.
///
/// The root carries the first URL. For each URL the path is walked from the
/// root; a segment whose label has no matching child under the current node
/// is appended as a new child carrying that URL.
pub fn build_tree(links: &[String]) -> Result<DocNode> {
    let mut root: Option<DocNode> = None;

    for link in links {
        let segments = split_link(link);
        let mut node = root.get_or_insert_with(|| DocNode::new(ROOT_LABEL, link));

        for segment in segments.iter().skip(1) {
            let label = format_section(segment);
            let index = match node.children.iter().position(|child| child.label == label) {
                Some(index) => index,
                None => {
                    node.children.push(DocNode::new(label, link));
                    node.children.len() - 1
                },
            };
            node = &mut node.children[index];
        }
    }

    root.ok_or_else(|| Error::TreeBuild("no documentation links found".to_string()))
}
