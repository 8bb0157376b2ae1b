//! # locc
//!
//! A CLI tool that counts lines of code by language and writes line count
//! reports.
//!
//! ## Overview
//!
//! locc is built on top of locclib. It discovers the source files of a
//! project, counts code, comment and blank lines per language, and renders
//! the results in any of the supported report formats.
//!
//! ## Usage
//!
//! ```bash
//! # Count the current directory, writing XML and HTML reports
//! locc
//!
//! # Print a table to the console and write a JSON report
//! locc --format console,json
//!
//! # Count only some directories of a project
//! locc src/main src/test --root . --project-name demo
//!
//! # Leave test sources out of the counts
//! locc --no-tests
//!
//! # Treat *.kts files as Kotlin, and stop counting *.h files
//! locc --ext kts=Kotlin --remove-ext h
//!
//! # List the known languages
//! locc languages
//! ```
//!
//! Settings are read from `locc.toml` in the root directory (or `--config`);
//! command line flags override them.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use locclib::output::ReportFormat;
use locclib::{
    discover_files_in_dirs, CountsCache, FileCounter, Language, LanguageRegistry, LineCounter,
    LoccConfig, ReportContext, Reports,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    let formats: Vec<&'static str> = ReportFormat::ALL.iter().map(|f| f.name()).collect();

    Command::new("locc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count lines of code by language and write line count reports")
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("paths")
                .help("Files or directories to count (defaults to the root directory)")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Project root; reports show paths relative to it [default: .]"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file [default: <root>/locc.toml]"),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory reports are written to [default: build/reports/locc]"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FMT")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(formats)
                .help("Report formats (comma-separated) [default: xml,html]"),
        )
        .arg(
            Arg::new("project-name")
                .long("project-name")
                .value_name("NAME")
                .help("Project name shown in reports [default: root directory name]"),
        )
        .arg(
            Arg::new("project-version")
                .long("project-version")
                .value_name("VERSION")
                .help("Project version shown in reports"),
        )
        .arg(
            Arg::new("no-doc-strings")
                .long("no-doc-strings")
                .action(ArgAction::SetTrue)
                .help("Do not count documentation strings as comments"),
        )
        .arg(
            Arg::new("no-tests")
                .long("no-tests")
                .action(ArgAction::SetTrue)
                .help("Do not count files under test and tests directories"),
        )
        .arg(
            Arg::new("absolute-paths")
                .long("absolute-paths")
                .action(ArgAction::SetTrue)
                .help("Show file paths as counted instead of relative to the root"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .value_name("GLOB")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .value_name("GLOB")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .value_name("EXT=LANG")
                .action(ArgAction::Append)
                .help("Map a file extension to a language"),
        )
        .arg(
            Arg::new("remove-ext")
                .long("remove-ext")
                .value_name("EXT")
                .action(ArgAction::Append)
                .help("Stop recognizing a file extension"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase logging (-v info, -vv debug)"),
        )
        .subcommand(Command::new("languages").about("List the known languages and their extensions"))
}

/// Install the stderr logger. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn strings<'a>(matches: &'a ArgMatches, id: &str) -> impl Iterator<Item = &'a String> {
    matches.get_many::<String>(id).into_iter().flatten()
}

/// Load the configuration and apply the command line overrides to it.
fn resolve_config(matches: &ArgMatches, root: &Path) -> anyhow::Result<LoccConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => LoccConfig::load(path)?,
        None => LoccConfig::discover(root)?,
    };

    if let Some(name) = matches.get_one::<String>("project-name") {
        config.project.name = Some(name.clone());
    }
    if let Some(version) = matches.get_one::<String>("project-version") {
        config.project.version = Some(version.clone());
    }
    if matches.get_flag("no-doc-strings") {
        config.count.doc_strings = false;
    }
    if matches.get_flag("no-tests") {
        config.count.include_tests = false;
    }
    if matches.get_flag("absolute-paths") {
        config.reports.relative_paths = false;
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output-dir") {
        config.reports.dir = dir.clone();
    }
    if let Some(formats) = matches.get_many::<String>("format") {
        config.reports.formats = formats
            .map(|f| f.parse::<ReportFormat>().map_err(anyhow::Error::msg))
            .collect::<anyhow::Result<_>>()?;
    }
    config.count.include.extend(strings(matches, "include").cloned());
    config.count.exclude.extend(strings(matches, "exclude").cloned());
    config
        .languages
        .remove_extensions
        .extend(strings(matches, "remove-ext").cloned());
    for mapping in strings(matches, "ext") {
        let Some((extension, language)) = mapping.split_once('=') else {
            bail!("invalid --ext value '{mapping}', expected EXT=LANG");
        };
        config
            .languages
            .extensions
            .insert(extension.trim().to_string(), language.trim().to_string());
    }

    Ok(config)
}

fn count_handler(matches: &ArgMatches) -> anyhow::Result<bool> {
    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let root = root
        .canonicalize()
        .with_context(|| format!("root directory '{}' not found", root.display()))?;

    let config = resolve_config(matches, &root)?;
    debug!(?config, "resolved configuration");

    let paths: Vec<PathBuf> = match matches.get_many::<PathBuf>("paths") {
        Some(paths) => paths
            .map(|p| {
                p.canonicalize()
                    .with_context(|| format!("path '{}' not found", p.display()))
            })
            .collect::<anyhow::Result<_>>()?,
        None => vec![root.clone()],
    };

    let filter = config.filter()?;
    let files = discover_files_in_dirs(&paths, &filter)?;
    info!(files = files.len(), "counting files");

    let counter = FileCounter::new(config.registry()?, config.count_options());
    let cache = CountsCache::new(counter.count(&files)?);
    info!(
        files = cache.num_files(),
        languages = cache.num_languages(),
        unrecognized = cache.num_unrecognized(),
        lines = cache.total_counts().total(),
        "counted lines"
    );

    let ctx = ReportContext::new(config.project_name(&root), config.project_version(), &root)
        .relative_paths(config.reports.relative_paths);
    let reports = Reports::new(&config.reports_dir(&root), &config.reports.formats);

    let mut all_ok = true;
    let written = Style::new().green();
    for outcome in reports.generate(&cache, &ctx) {
        match &outcome.result {
            Ok(()) if outcome.format != ReportFormat::Console => {
                eprintln!("{} {}", written.apply_to("Wrote"), outcome.destination);
            }
            Ok(()) => {}
            Err(err) => {
                error!("{err}");
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

fn languages_handler() {
    let registry = LanguageRegistry::new();
    let mut languages: Vec<Language> = Language::all().collect();
    languages.sort_by_key(|l| l.display_name());

    let width = languages
        .iter()
        .map(|l| l.display_name().len())
        .max()
        .unwrap_or(0);
    let name = Style::new().bold();
    for language in languages {
        let extensions = registry.extensions_for(language).join(", ");
        println!(
            "{}  {}",
            name.apply_to(format!("{:<width$}", language.display_name())),
            extensions
        );
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    if matches.subcommand_matches("languages").is_some() {
        languages_handler();
        return ExitCode::SUCCESS;
    }

    match count_handler(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
