//! # Output Formatting
//!
//! Every command ends by handing a JSON value and a title to [`Output`],
//! which prints it in one of two forms:
//!
//! - **Panel** (default): a rounded box with one `key: value` line per field,
//!   colored when the terminal allows it.
//! - **Raw** (`--raw`): the JSON value, pretty-printed, ready for `jq`.
//!
//! ```bash
//! meilisearch-cli index get movies
//! meilisearch-cli index get movies --raw | jq .primaryKey
//! ```
//!
//! ```text
//! ╭─ Index ──────────────────────────────╮
//! │ uid: movies                          │
//! │ primaryKey: id                       │
//! ╰──────────────────────────────────────╯
//! ```
//!
//! Both forms carry the same values. Spinners and logs go to stderr so
//! stdout stays clean for piping.

mod panel;
mod progress;
mod tree;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use meili_core::DocNode;
use serde_json::Value;
use std::future::Future;
use std::io::{self, Write};

pub use panel::render_panel;
pub use tree::render_tree;

/// Output sink shared by all commands.
pub struct Output {
    writer: Box<dyn Write>,
    raw: bool,
    spinners: bool,
}

impl Output {
    /// Print to stdout. Spinners are shown only on an interactive stderr.
    pub fn stdout(raw: bool) -> Self {
        Self {
            writer: Box::new(io::stdout()),
            raw,
            spinners: !raw && io::stderr().is_terminal(),
        }
    }

    /// Print to `writer` without spinners.
    pub fn new(writer: Box<dyn Write>, raw: bool) -> Self {
        Self {
            writer,
            raw,
            spinners: false,
        }
    }

    /// Print a response under `title`.
    pub fn value(&mut self, title: &str, value: &Value) -> Result<()> {
        let text = if self.raw {
            serde_json::to_string_pretty(value).context("Failed to serialize response")?
        } else {
            render_panel(title, value)
        };
        self.line(&text)
    }

    /// Print a plain message under `title`. Raw mode prints a JSON string.
    pub fn message(&mut self, title: &str, message: &str) -> Result<()> {
        self.value(title, &Value::String(message.to_string()))
    }

    /// Print the documentation tree.
    pub fn tree(&mut self, root: &DocNode, links: bool) -> Result<()> {
        let text = if self.raw {
            serde_json::to_string_pretty(root).context("Failed to serialize tree")?
        } else {
            render_tree(root, links)
        };
        self.line(&text)
    }

    /// Await `future` while a spinner shows `message` on stderr.
    pub async fn spin<F: Future>(&self, message: &str, future: F) -> F::Output {
        let pb = progress::spinner(message, self.spinners);
        let output = future.await;
        pb.finish_and_clear();
        output
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_raw_value_is_json() {
        let buffer = Buffer::default();
        let mut output = Output::new(Box::new(buffer.clone()), true);
        let value = json!({"uid": "movies", "primaryKey": null});
        output.value("Index", &value).unwrap();

        let parsed: Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_raw_message_is_json_string() {
        let buffer = Buffer::default();
        let mut output = Output::new(Box::new(buffer.clone()), true);
        output
            .message("Delete Index", "Index movies successfully deleted")
            .unwrap();
        assert_eq!(buffer.contents(), "\"Index movies successfully deleted\"\n");
    }

    #[test]
    fn test_panel_and_raw_carry_same_values() {
        colored::control::set_override(false);
        let value = json!({"uid": "movies", "primaryKey": "id"});

        let panel = Buffer::default();
        Output::new(Box::new(panel.clone()), false)
            .value("Index", &value)
            .unwrap();
        let text = panel.contents();
        assert!(text.contains("Index"));
        assert!(text.contains("uid: movies"));
        assert!(text.contains("primaryKey: id"));
    }

    #[tokio::test]
    async fn test_spin_returns_output() {
        let output = Output::new(Box::new(Buffer::default()), false);
        let value = output.spin("Working", async { 42 }).await;
        assert_eq!(value, 42);
    }
}
