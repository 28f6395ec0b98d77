use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};

mod cli;
mod config;
mod errors;
mod ext;
mod logging;
mod model;
mod params;
mod render;
mod report;
mod story;
mod story_repo;
mod tracker;
mod util;
mod window;
mod working_hours;

use crate::cli::{normalize, Cli};
use crate::story_repo::StoryRepo;

fn main() -> ExitCode {
  logging::init();

  let cli = Cli::parse();

  if cli.gen_man {
    return match util::render_man_page::<Cli>() {
      Ok(page) => {
        print!("{}", page);
        ExitCode::SUCCESS
      }
      Err(err) => abort(&err),
    };
  }

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => abort(&err),
  }
}

fn run(cli: Cli) -> Result<()> {
  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;
  let params = params::build_report_params(&cfg, config::holidays()?)?;

  // Phase 2: connection settings (skipped for the offline fixture backend)
  let (settings, estimate_field) = if tracker::fixtures_path().is_some() {
    (None, config::estimate_field())
  } else {
    let settings = config::load_settings()?;
    let field = settings.estimate_field.clone();
    (Some(settings), field)
  };

  // Phase 3: scan and write rows
  let backend = tracker::build_tracker(settings.as_ref())?;
  let repo = StoryRepo::new(backend, &estimate_field);
  report::run(&params, &repo)?;

  Ok(())
}

fn abort(err: &anyhow::Error) -> ExitCode {
  if let Some(cfg_err) = err.downcast_ref::<errors::ConfigError>() {
    error!("{}", cfg_err);
  } else {
    error!("Aborting ({:#})", err);
    debug!("{:?}", err);
  }
  ExitCode::FAILURE
}
