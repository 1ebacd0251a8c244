use clap::Parser as _;
use std::io::{self, IsTerminal as _};

#[derive(clap::Parser)]
#[command(version, about = "Print Courier-style Maildir folders as a tree")]
struct Arguments {
  #[clap(flatten)]
  arguments: maildirtree::Arguments,
  #[clap(flatten)]
  verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,
}

fn main() -> anyhow::Result<()> {
  let arguments = Arguments::parse();

  // Logs go to stderr, stdout is reserved for the tree.
  let encoder = Box::new(log4rs::encode::pattern::PatternEncoder::new(
    "{d(%F %T)} {l} {t} - {m}{n}",
  ));
  log4rs::init_config(
    log4rs::config::Config::builder()
      .appender(
        log4rs::config::Appender::builder()
          .filter(Box::new(log4rs::filter::threshold::ThresholdFilter::new(
            arguments.verbose.log_level_filter(),
          )))
          .build(
            "console",
            Box::new(
              log4rs::append::console::ConsoleAppender::builder()
                .target(log4rs::append::console::Target::Stderr)
                .encoder(encoder)
                .build(),
            ),
          ),
      )
      .build(
        log4rs::config::Root::builder()
          .appender("console")
          .build(log::LevelFilter::Trace),
      )?,
  )?;

  let stdout = io::stdout();
  let terminal = stdout.is_terminal();
  maildirtree::run(&arguments.arguments, stdout.lock(), terminal)
}
