use chrono::{DateTime, Utc};
use clap::Parser;
use log::warn;
use prstats::config::{ReportConfig, DEFAULT_LOOKBACK_DAYS};
use prstats::filter::select_recent;
use prstats::run::generate;
use prstats::source::load_records;
use prstats_common::PrStatsError;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "prstats", about = "Time-to-merge statistics for recently created pull requests")]
struct Args {
    /// CSV export with Repository, #, User, Title, State, Created, Updated, Merged and URL columns
    file: Option<PathBuf>,

    /// Only pull requests created within this many days are analysed
    #[arg(
        long,
        default_value_t = DEFAULT_LOOKBACK_DAYS,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    lookback_days: i64,

    /// Reference instant (RFC 3339) the lookback is measured from; defaults to now
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Also print the pull requests inside the window as JSON
    #[arg(long)]
    dump_records: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        let argument_error = matches!(
            e.downcast_ref::<PrStatsError>(),
            Some(PrStatsError::MissingArgument | PrStatsError::InvalidArgument(_))
        );
        process::exit(if argument_error { 2 } else { 1 });
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let path = args.file.as_ref().ok_or(PrStatsError::MissingArgument)?;
    let config = ReportConfig::new(args.now.unwrap_or_else(Utc::now), args.lookback_days)?;

    let records = load_records(path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out)?;
    for section in generate(&records, &config) {
        match section.rendered {
            Ok(text) => out.write_all(text.as_bytes())?,
            Err(e) => {
                warn!("skipping {:?}: {e}", section.description);
                eprintln!("Skipping \"{}\": {e}", section.description);
            }
        }
    }

    if args.dump_records {
        let recent = select_recent(&records, config.cutoff);
        serde_json::to_writer_pretty(&mut out, &recent)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
