// https://www.courier-mta.org/imap/README.maildirquota.html
// Can folders have subfolders, defined in a recursive fashion? The answer is no. If you want to
// have a client with a hierarchy of folders, emulate it. Pick a hierarchy separator character, say
// ":". Then, folder foo/bar is subdirectory .foo:bar.
//
// Courier picked ".", so the hierarchy has to be rebuilt from the flat list of sibling directories.

use std::{error, fmt};

pub const SEPARATOR: char = '.';

#[derive(Debug, PartialEq)]
pub enum Error {
  MalformedFolderName(String),
}

impl fmt::Display for Error {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::MalformedFolderName(name) => write!(formatter, "malformed folder name {name:?}"),
    }
  }
}

impl error::Error for Error {}

// Nodes are addressed by their position in the arena.
pub type Index = usize;

pub const ROOT: Index = 0;

#[derive(Debug, PartialEq)]
pub struct Node {
  pub name: String,
  pub read: u64,
  pub unread: u64,
  pub parent: Option<Index>,
  pub children: Vec<Index>,
  // Whether this node is currently the last of its parent's children.
  pub last: bool,
}

impl Node {
  fn new(name: &str, parent: Option<Index>) -> Self {
    Self {
      name: name.to_string(),
      read: 0,
      unread: 0,
      parent,
      children: Vec::new(),
      last: true,
    }
  }

  pub fn total(&self) -> u64 {
    self.read.saturating_add(self.unread)
  }
}

/// A record discovered by scanning a Maildir: the raw directory name (e.g. `.Work.Projects`) and
/// the messages found in it.
#[derive(Clone, Debug, PartialEq)]
pub struct Folder {
  pub name: String,
  pub read: u64,
  pub unread: u64,
}

impl Folder {
  pub fn new(name: &str, read: u64, unread: u64) -> Self {
    Self {
      name: name.to_string(),
      read,
      unread,
    }
  }
}

/// Totals over the root and every folder whose counts were set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Counts {
  pub read: u64,
  pub unread: u64,
  /// Folders with at least one unread message.
  pub folders: u64,
}

impl Counts {
  pub fn total(&self) -> u64 {
    self.read.saturating_add(self.unread)
  }

  // Overwriting a folder's counts (a duplicate path) must not count it twice.
  fn replace(&mut self, (old_read, old_unread): (u64, u64), (read, unread): (u64, u64)) {
    // Totals saturate, so they're never below one of their terms.
    self.read = self.read.saturating_sub(old_read).saturating_add(read);
    self.unread = self.unread.saturating_sub(old_unread).saturating_add(unread);
    if old_unread > 0 {
      self.folders -= 1;
    }
    if unread > 0 {
      self.folders += 1;
    }
  }
}

#[derive(Debug)]
pub struct Tree {
  nodes: Vec<Node>,
  counts: Counts,
}

impl Tree {
  pub fn new(name: &str, read: u64, unread: u64) -> Self {
    let mut root = Node::new(name, None);
    root.read = read;
    root.unread = unread;
    let mut counts = Counts::default();
    counts.replace((0, 0), (read, unread));
    Self {
      nodes: vec![root],
      counts,
    }
  }

  pub fn build<I>(name: &str, read: u64, unread: u64, folders: I) -> Self
  where
    I: IntoIterator<Item = Folder>,
  {
    let mut tree = Self::new(name, read, unread);
    for folder in folders {
      // One bad record shouldn't prevent displaying the others.
      if let Err(error) = tree.insert(&folder.name, folder.read, folder.unread) {
        log::warn!("skipping folder in {name}: {error}");
      }
    }
    tree
  }

  pub fn insert(&mut self, name: &str, read: u64, unread: u64) -> Result<Index, Error> {
    // Empty segments (".a..b", a trailing ".") are ignored, only "." and ".." are left without any.
    let segments: Vec<&str> = match name.strip_prefix(SEPARATOR) {
      Some(path) => path
        .split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect(),
      None => Vec::new(),
    };
    if segments.is_empty() {
      return Err(Error::MalformedFolderName(name.to_string()));
    }

    let mut current = ROOT;
    for segment in segments {
      current = match self.find(current, segment) {
        Some(child) => child,
        // Parents that aren't folders on their own (or that haven't been seen yet) are created
        // empty.
        None => self.append(current, segment),
      };
    }

    let node = &mut self.nodes[current];
    let old = (node.read, node.unread);
    (node.read, node.unread) = (read, unread);
    self.counts.replace(old, (read, unread));
    log::debug!("{name} -> {current} ({unread}/{})", read.saturating_add(unread));
    Ok(current)
  }

  fn find(&self, parent: Index, name: &str) -> Option<Index> {
    self.nodes[parent]
      .children
      .iter()
      .copied()
      .find(|child| self.nodes[*child].name == name)
  }

  fn append(&mut self, parent: Index, name: &str) -> Index {
    let index = self.nodes.len();
    if let Some(previous) = self.nodes[parent].children.last().copied() {
      self.nodes[previous].last = false;
    }
    self.nodes.push(Node::new(name, Some(parent)));
    self.nodes[parent].children.push(index);
    index
  }

  pub fn root(&self) -> &Node {
    &self.nodes[ROOT]
  }

  pub fn node(&self, index: Index) -> &Node {
    &self.nodes[index]
  }

  pub fn counts(&self) -> Counts {
    self.counts
  }

  /// Number of folders, the root excluded.
  pub fn folders(&self) -> usize {
    self.nodes.len() - 1
  }

  pub fn has_folders(&self) -> bool {
    self.folders() > 0
  }

  /// Ancestors of `index`, nearest first, excluding the root.
  pub fn ancestors(&self, index: Index) -> impl Iterator<Item = Index> + '_ {
    let mut parent = self.nodes[index].parent;
    std::iter::from_fn(move || {
      let ancestor = parent.filter(|ancestor| *ancestor != ROOT)?;
      parent = self.nodes[ancestor].parent;
      Some(ancestor)
    })
  }

  /// Looks up a folder by its path segments (e.g. `["Work", "Projects"]`).
  pub fn get(&self, path: &[&str]) -> Option<&Node> {
    let mut current = ROOT;
    for segment in path {
      current = self.find(current, segment)?;
    }
    Some(&self.nodes[current])
  }

  pub fn names(&self, index: Index) -> Vec<&str> {
    self.nodes[index]
      .children
      .iter()
      .map(|child| self.nodes[*child].name.as_str())
      .collect()
  }
}
