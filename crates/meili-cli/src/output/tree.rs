//! Tree rendering for the documentation map.

use colored::Colorize;
use meili_core::DocNode;

/// Render `root` with box-drawing branches, one node per line.
///
/// With `links`, every label is followed by its page URL.
pub fn render_tree(root: &DocNode, links: bool) -> String {
    let mut lines = vec![label(root, links)];
    push_children(root, "", links, &mut lines);
    lines.join("\n")
}

fn push_children(node: &DocNode, prefix: &str, links: bool, lines: &mut Vec<String>) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, continuation) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        lines.push(format!("{prefix}{branch}{}", label(child, links)));
        push_children(child, &format!("{prefix}{continuation}"), links, lines);
    }
}

fn label(node: &DocNode, links: bool) -> String {
    if links {
        format!("{} {}", node.label.bold(), node.link.dimmed())
    } else {
        node.label.bold().to_string()
    }
}
