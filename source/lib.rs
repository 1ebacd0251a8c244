// https://www.courier-mta.org/imap/README.maildirquota.html - Maildir++
//
// Prints the folders of Courier-style Maildirs as a tree:
//
//  INBOX                                   (3/13)
//  `-- Work                                (1/3)
//      `-- Projects                        (0/0)
//          `-- Alpha                       (0/5)
//  4 messages unread in 2 folders, 21 messages total.

use anyhow::Context as _;
use std::{env, io, path};

pub mod maildir;
pub mod render;
pub mod tree;
pub mod utf7;

#[derive(Copy, Clone, Debug, PartialEq, clap::ValueEnum)]
pub enum Color {
  Auto,
  Always,
  Never,
}

#[derive(clap::Args)]
#[group(skip)]
pub struct Arguments {
  #[arg(help = "Maildir directories (defaults to $MAILDIR or ~/Maildir)")]
  pub maildirs: Vec<path::PathBuf>,

  #[arg(
    short = 's',
    long = "summary",
    help = "Only print a summary line per Maildir",
    default_value_t = false
  )]
  pub summary: bool,
  #[arg(
    long = "color",
    help = "Embolden unread counts: auto | always | never",
    value_enum,
    default_value_t = Color::Auto,
    hide_possible_values(true)
  )]
  pub color: Color,
  #[arg(long = "label", help = "Display name of the root Maildir")]
  pub label: Option<String>,
  #[arg(
    long = "raw",
    help = "Don't decode modified UTF-7 folder names",
    default_value_t = false
  )]
  pub raw: bool,
}

impl Arguments {
  pub fn options(&self, terminal: bool) -> render::Options {
    render::Options {
      color: match self.color {
        Color::Auto => terminal,
        Color::Always => true,
        Color::Never => false,
      },
      summary: self.summary,
      raw: self.raw,
    }
  }
}

fn default_maildir() -> anyhow::Result<path::PathBuf> {
  if let Some(maildir) = env::var_os("MAILDIR") {
    return Ok(path::PathBuf::from(maildir));
  }
  let home = env::var_os("HOME").with_context(|| "neither $MAILDIR nor $HOME are set")?;
  Ok(path::Path::new(&home).join("Maildir"))
}

/// Scans one Maildir and rebuilds its folder hierarchy.
pub fn process(path: &path::Path, label: Option<&str>) -> anyhow::Result<tree::Tree> {
  let maildir =
    maildir::Maildir::open(path).with_context(|| format!("couldn't open {}", path.display()))?;
  let (read, unread) = maildir
    .count()
    .with_context(|| format!("couldn't count messages in {}", path.display()))?;
  let folders = maildir
    .folders()
    .with_context(|| format!("couldn't list folders in {}", path.display()))?;
  log::debug!("{} folder(s) found in {}", folders.len(), path.display());
  let name = match label {
    Some(label) => label.to_string(),
    None => maildir.name(),
  };
  Ok(tree::Tree::build(&name, read, unread, folders))
}

pub fn run<W>(arguments: &Arguments, mut output: W, terminal: bool) -> anyhow::Result<()>
where
  W: io::Write,
{
  let maildirs = if arguments.maildirs.is_empty() {
    vec![default_maildir()?]
  } else {
    arguments.maildirs.clone()
  };
  anyhow::ensure!(
    arguments.label.is_none() || maildirs.len() == 1,
    "--label needs exactly one Maildir"
  );
  let options = arguments.options(terminal);

  let mut printed = false;
  let mut failures = 0;
  for path in &maildirs {
    let tree = match process(path, arguments.label.as_deref()) {
      Ok(tree) => tree,
      Err(error) => {
        // Keep going, the other Maildirs may be fine.
        log::error!("{error:#}");
        failures += 1;
        continue;
      }
    };
    if printed && !options.summary {
      writeln!(output)?;
    }
    for line in render::report(&tree, &options) {
      writeln!(output, "{line}")?;
    }
    printed = true;
  }
  output.flush()?;

  anyhow::ensure!(
    failures == 0,
    "{failures} of {} Maildir(s) couldn't be processed",
    maildirs.len()
  );
  Ok(())
}
