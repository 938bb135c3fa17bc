//! Code-emission Intermediate Representation (IR)
//!
//! A small expression/statement/declaration algebra that the backend translator assembles and the writer prints.
//! Every node renders to a [`Block`]: a non-empty run of [`Line`]s whose depths are relative to the line the node
//! starts on. Composite nodes glue child blocks together (the last line of one child continues with the first line of
//! the next) and nest bodies one level deeper.
//!
//! ## Pipeline
//!
//! ```text
//! MethodSpec → backend translator → Expr / Stmt / Decl → Block → CodeWriter → text
//! ```
//!
//! Rendering is a pure function of the tree: identical trees always produce identical lines.

pub mod decl;
pub mod expr;
pub mod stmt;

pub use decl::{Decl, Param};
pub use expr::Expr;
pub use stmt::Stmt;

/// One output line without its indentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Indentation levels relative to the start of the enclosing block.
    pub depth: usize,
    pub text: String,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            depth: 0,
            text: text.into(),
        }
    }
}

/// Lines produced by one node.
pub type Block = Vec<Line>;

/// A block holding a single line.
pub fn single(text: impl Into<String>) -> Block {
    vec![Line::new(text)]
}

/// Continue the last line of `head` with `separator` and the first line of `tail`; the rest of `tail` follows.
pub fn glue(mut head: Block, tail: Block, separator: &str) -> Block {
    let mut tail = tail.into_iter();
    match (head.last_mut(), tail.next()) {
        (Some(last), Some(first)) => {
            last.text.push_str(separator);
            last.text.push_str(&first.text);
        }
        (None, Some(first)) => head.push(first),
        (_, None) => {}
    }
    head.extend(tail);
    head
}

/// Glue a sequence of blocks with one separator, e.g. call arguments with `", "`.
pub fn glue_all(blocks: impl IntoIterator<Item = Block>, separator: &str) -> Block {
    let mut out = Block::new();
    for (i, block) in blocks.into_iter().enumerate() {
        out = if i == 0 { block } else { glue(out, block, separator) };
    }
    out
}

/// Shift every line of `block` by `levels`.
pub fn nest(block: Block, levels: usize) -> Block {
    block
        .into_iter()
        .map(|line| Line {
            depth: line.depth + levels,
            text: line.text,
        })
        .collect()
}

/// Render a block with `indent` per level. Mainly for tests and debugging; files go through the writer.
pub fn render(block: &[Line], indent: &str) -> String {
    let mut out = String::new();
    for line in block {
        out.push_str(&indent.repeat(line.depth));
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}
