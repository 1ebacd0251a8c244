use std::{
  fs,
  io::{self, Write as _},
  path,
};

#[derive(Debug)]
pub struct Builder {
  path: path::PathBuf,
}

#[derive(Debug)]
pub struct Maildir {
  path: path::PathBuf,
}

impl Builder {
  pub fn new(path: &path::Path) -> io::Result<Self> {
    fs::create_dir_all(path)?;
    Ok(Self {
      path: path.to_path_buf(),
    })
  }

  // Folders are given as stored on disk, without the leading dot ("INBOX" is the root).
  pub fn maildir(&self, folder: &str) -> io::Result<Maildir> {
    if folder == "INBOX" {
      return Maildir::new(self.path.clone(), true);
    }
    Maildir::new(self.path.join(format!(".{folder}")), false)
  }
}

impl Maildir {
  fn new(path: path::PathBuf, root: bool) -> io::Result<Self> {
    for directory in &["cur", "new", "tmp"] {
      fs::create_dir_all(path.join(directory))?;
    }
    if !root {
      // https://www.courier-mta.org/imap/README.maildirquota.html
      // Within each subdirectory there's an empty file, maildirfolder.
      fs::File::create(path.join("maildirfolder"))?;
    }
    Ok(Self { path })
  }

  pub fn path(&self) -> &path::Path {
    self.path.as_path()
  }

  fn write(&self, directory: &str, name: &str, buffer: &[u8]) -> io::Result<path::PathBuf> {
    let path = self.path.join(directory).join(name);
    let mut file = fs::File::create(&path)?;
    file.write_all(buffer)?;
    Ok(path)
  }

  pub fn new_message(&self, buffer: &[u8]) -> io::Result<path::PathBuf> {
    self.write("new", &uuid::Uuid::new_v4().hyphenated().to_string(), buffer)
  }

  pub fn cur_message(&self, buffer: &[u8], flags: &str) -> io::Result<path::PathBuf> {
    let name = format!("{}:2,{flags}", uuid::Uuid::new_v4().hyphenated());
    self.write("cur", &name, buffer)
  }

  // Fills the folder with read and unread messages, unread ones split between 'new' and 'cur'.
  pub fn fill(&self, read: usize, unread: usize) -> io::Result<()> {
    for i in 0..read {
      self.cur_message(super::email(&format!("read{i}")).as_bytes(), "S")?;
    }
    for i in 0..unread {
      let email = super::email(&format!("unread{i}"));
      if i % 2 == 0 {
        self.new_message(email.as_bytes())?;
      } else {
        self.cur_message(email.as_bytes(), "F")?;
      }
    }
    Ok(())
  }
}
