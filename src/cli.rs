// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::{
    commands::run::{self, RunOptions},
    core::config::Overrides,
    infra::t,
};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    "en".to_string()
}

pub fn build_cli(locale: &str) -> Command {
    Command::new("fixture-harness")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli.verbose", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli.config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("fixture")
                .short('f')
                .long("fixture")
                .help(t!("cli.fixture", locale = locale).to_string())
                .value_name("FIXTURE")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("subject")
                .short('s')
                .long("subject")
                .help(t!("cli.subject", locale = locale).to_string())
                .value_name("COMMAND")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help(t!("cli.timeout", locale = locale).to_string())
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("working-dir")
                .short('C')
                .long("working-dir")
                .help(t!("cli.working_dir", locale = locale).to_string())
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help(t!("cli.html", locale = locale).to_string())
                .value_name("HTML")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help(t!("cli.json", locale = locale).to_string())
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

fn run_options(matches: &ArgMatches) -> RunOptions {
    RunOptions {
        config: matches.get_one::<PathBuf>("config").cloned(),
        overrides: Overrides {
            language: matches.get_one::<String>("lang").cloned(),
            fixture: matches.get_one::<PathBuf>("fixture").cloned(),
            subject: matches.get_one::<String>("subject").cloned(),
            working_dir: matches.get_one::<PathBuf>("working-dir").cloned(),
            timeout_secs: matches.get_one::<u64>("timeout").copied(),
        },
        verbose: matches.get_flag("verbose"),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
    }
}

/// Parses the command line, runs the fixture and maps the outcome to an exit code:
/// `0` when every case passed, `1` otherwise.
pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();
    let summary = run::execute(run_options(&matches)).await?;

    Ok(if summary.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
