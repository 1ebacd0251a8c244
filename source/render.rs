use crate::{tree, utf7};
use crossterm::style::Stylize as _;
use unicode_width::UnicodeWidthStr as _;

// Each ancestor takes a glyph plus INDENT spaces, as wide as the "`-- " connector.
pub const INDENT: usize = 3;
// Counts start at this column, whatever the depth or the length of the name.
pub const COLUMN: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Options {
  /// Embolden the counts of folders with unread messages.
  pub color: bool,
  /// Only print the summary line.
  pub summary: bool,
  /// Display folder names as stored on disk instead of decoding modified UTF-7.
  pub raw: bool,
}

/// One line per folder, depth first, in insertion order. The root isn't included (see
/// [`root_line`]).
pub fn render(tree: &tree::Tree, options: &Options) -> Vec<String> {
  let mut lines = Vec::new();
  if options.summary {
    return lines;
  }
  for child in &tree.root().children {
    walk(tree, *child, options, &mut lines);
  }
  lines
}

fn walk(tree: &tree::Tree, index: tree::Index, options: &Options, lines: &mut Vec<String>) {
  lines.push(line(tree, index, options));
  for child in &tree.node(index).children {
    walk(tree, *child, options, lines);
  }
}

fn line(tree: &tree::Tree, index: tree::Index, options: &Options) -> String {
  let node = tree.node(index);
  // Ancestors are visited nearest first but drawn outermost first.
  let ancestors: Vec<_> = tree.ancestors(index).collect();
  let mut line = String::new();
  for ancestor in ancestors.iter().rev() {
    // Nothing left to connect to below the last child.
    line.push(if tree.node(*ancestor).last { ' ' } else { '|' });
    line.push_str(&" ".repeat(INDENT));
  }
  line.push(if node.last { '`' } else { '|' });
  line.push_str("-- ");
  if options.raw {
    line.push_str(&node.name);
  } else {
    line.push_str(&utf7::display(&node.name));
  }
  annotate(line, node, options)
}

pub fn root_line(tree: &tree::Tree, options: &Options) -> String {
  let root = tree.root();
  annotate(root.name.clone(), root, options)
}

fn annotate(mut line: String, node: &tree::Node, options: &Options) -> String {
  // Long names push the counts further right instead of overlapping them. Wide characters (CJK
  // folder names) take two columns.
  let width = line.as_str().width();
  line.push_str(&" ".repeat(COLUMN.saturating_sub(width)));
  let counts = format!("({}/{})", node.unread, node.total());
  if options.color && node.unread > 0 {
    line.push_str(&counts.bold().to_string());
  } else {
    line.push_str(&counts);
  }
  line
}

fn plural(n: u64, word: &str) -> String {
  if n == 1 {
    format!("{n} {word}")
  } else {
    format!("{n} {word}s")
  }
}

pub fn summary(counts: &tree::Counts) -> String {
  if counts.folders > 1 {
    format!(
      "{} unread in {}, {} total.",
      plural(counts.unread, "message"),
      plural(counts.folders, "folder"),
      plural(counts.total(), "message"),
    )
  } else {
    format!(
      "{} unread, {} total.",
      plural(counts.unread, "message"),
      plural(counts.total(), "message"),
    )
  }
}

/// Everything printed for one Maildir.
pub fn report(tree: &tree::Tree, options: &Options) -> Vec<String> {
  if options.summary {
    return vec![format!("{}: {}", tree.root().name, summary(&tree.counts()))];
  }
  let mut lines = vec![root_line(tree, options)];
  lines.extend(render(tree, options));
  lines.push(summary(&tree.counts()));
  lines
}
