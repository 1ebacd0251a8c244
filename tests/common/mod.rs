use std::{io, panic, path};

pub mod maildir;

#[derive(Clone)]
pub struct Runner {
  directory: path::PathBuf,
  maildirs: Vec<path::PathBuf>,
  summary: bool,
  color: maildirtree::Color,
  label: Option<String>,
  raw: bool,
}

impl Runner {
  fn new(directory: &path::Path) -> Self {
    Self {
      directory: directory.to_path_buf(),
      maildirs: vec![directory.join("Maildir")],
      summary: false,
      color: maildirtree::Color::Never,
      label: None,
      raw: false,
    }
  }

  pub fn with_maildirs(&self, maildirs: &[&str]) -> Self {
    Self {
      maildirs: maildirs
        .iter()
        .map(|maildir| self.directory.join(maildir))
        .collect(),
      ..self.clone()
    }
  }

  pub fn with_summary(&self) -> Self {
    Self {
      summary: true,
      ..self.clone()
    }
  }

  pub fn with_color(&self, color: maildirtree::Color) -> Self {
    Self {
      color,
      ..self.clone()
    }
  }

  pub fn with_label(&self, label: &str) -> Self {
    Self {
      label: Some(label.to_string()),
      ..self.clone()
    }
  }

  pub fn with_raw(&self) -> Self {
    Self {
      raw: true,
      ..self.clone()
    }
  }

  pub fn maildir_builder(&self, name: &str) -> io::Result<maildir::Builder> {
    maildir::Builder::new(&self.directory.join(name))
  }

  // The default Maildir.
  pub fn maildir(&self, folder: &str) -> io::Result<maildir::Maildir> {
    self.maildir_builder("Maildir")?.maildir(folder)
  }

  pub fn path(&self, name: &str) -> path::PathBuf {
    self.directory.join(name)
  }

  pub fn run(&self) -> anyhow::Result<String> {
    let (output, result) = self.output();
    result?;
    Ok(output)
  }

  // What was printed, even when some Maildirs failed.
  pub fn output(&self) -> (String, anyhow::Result<()>) {
    let arguments = maildirtree::Arguments {
      maildirs: self.maildirs.clone(),
      summary: self.summary,
      color: self.color,
      label: self.label.clone(),
      raw: self.raw,
    };
    let mut output = Vec::new();
    // Never a terminal, Color::Auto is the same as Color::Never.
    let result = maildirtree::run(&arguments, &mut output, false);
    (String::from_utf8_lossy(&output).into_owned(), result)
  }
}

pub fn setup<B>(body: B)
where
  B: Fn(&Runner) -> anyhow::Result<()> + panic::RefUnwindSafe,
{
  let directory = tempfile::tempdir().unwrap();
  let runner = Runner::new(directory.path());
  match panic::catch_unwind(|| body(&runner).unwrap()) {
    Ok(()) => (),
    Err(error) => {
      let path = directory.into_path(); // This prevents the removal of the directory.
      log::error!("keeping {}", path.display());
      panic::resume_unwind(error)
    }
  }
}

pub fn email(id: &str) -> String {
  format!(
    "From: {id}
To: {id}
Subject: {id}
Message-ID: {id}

{id}"
  )
}

// Pads like the renderer does.
pub fn line(prefix: &str, counts: &str) -> String {
  format!("{prefix:<width$}{counts}", width = maildirtree::render::COLUMN)
}
