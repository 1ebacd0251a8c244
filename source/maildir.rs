// https://cr.yp.to/proto/maildir.html - Maildir
// https://www.courier-mta.org/imap/README.maildirquota.html - Maildir++
// https://doc.dovecot.org/admin_manual/mailbox_formats/maildir/ - Maildir Mailbox Format

use crate::tree;
use std::{fs, io, path};

#[derive(Debug)]
pub struct Maildir {
  path: path::PathBuf,
}

// 'tmp' is only needed to deliver messages, not to read them.
fn is_maildir(path: &path::Path) -> bool {
  path.join("cur").is_dir() && path.join("new").is_dir()
}

// https://cr.yp.to/proto/maildir.html
// When you move a file from new to cur, you have to change its name from uniq to uniq:info.
// Info starting with "2," [...] Each flag must be in ASCII order. [...] Flag "S" (seen): the user
// has viewed this message, though perhaps he didn't read all the way through it.
fn seen(name: &str) -> bool {
  match name.rsplit_once(":2,") {
    Some((_, flags)) => flags.contains('S'),
    None => false,
  }
}

fn messages(directory: &path::Path) -> io::Result<impl Iterator<Item = String>> {
  let mut names = Vec::new();
  for entry in fs::read_dir(directory)? {
    let entry = entry?;
    // Unique names don't start with a dot and some tools leave dotfiles around.
    let name = entry.file_name().to_string_lossy().into_owned();
    if name.starts_with('.') || !entry.file_type()?.is_file() {
      continue;
    }
    names.push(name);
  }
  Ok(names.into_iter())
}

impl Maildir {
  pub fn open(path: &path::Path) -> io::Result<Self> {
    if !path.is_dir() {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} isn't a directory", path.display()),
      ));
    }
    if !is_maildir(path) {
      return Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{} isn't a Maildir (missing cur or new)", path.display()),
      ));
    }
    Ok(Self {
      path: path.to_path_buf(),
    })
  }

  pub fn path(&self) -> &path::Path {
    self.path.as_path()
  }

  // "maildirtree ." should still display something meaningful.
  pub fn name(&self) -> String {
    let path = self
      .path
      .canonicalize()
      .unwrap_or_else(|_| self.path.clone());
    match path.file_name() {
      Some(name) => name.to_string_lossy().into_owned(),
      None => path.display().to_string(),
    }
  }

  /// Returns the (read, unread) messages of this Maildir, sub-folders excluded.
  pub fn count(&self) -> io::Result<(u64, u64)> {
    count(&self.path)
  }

  /// Lists the Maildir++ folders in filesystem order. Directories that don't look like Maildirs
  /// are skipped.
  pub fn folders(&self) -> io::Result<Vec<tree::Folder>> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(&self.path)? {
      let entry = entry?;
      let name = entry.file_name();
      let Some(name) = name.to_str() else {
        log::warn!("skipping {:?}: not UTF-8", entry.path());
        continue;
      };
      if !name.starts_with(tree::SEPARATOR) || name == "." || name == ".." {
        continue;
      }
      let path = entry.path();
      if !path.is_dir() {
        log::debug!("skipping {path:?}: not a directory");
        continue;
      }
      if !is_maildir(&path) {
        log::warn!("skipping {path:?}: not a Maildir (missing cur or new)");
        continue;
      }
      match count(&path) {
        Ok((read, unread)) => folders.push(tree::Folder::new(name, read, unread)),
        Err(error) => log::warn!("skipping {path:?}: {error}"),
      }
    }
    Ok(folders)
  }
}

fn count(path: &path::Path) -> io::Result<(u64, u64)> {
  // Messages in 'new' haven't even been seen by a client yet.
  let mut unread = messages(&path.join("new"))?.count() as u64;
  let mut read = 0;
  for name in messages(&path.join("cur"))? {
    if seen(&name) {
      read += 1;
    } else {
      unread += 1;
    }
  }
  Ok((read, unread))
}
