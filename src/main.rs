use anyhow::{bail, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use solprint::{verify, AstParser, Expectation, Pass, RenderContext};

fn cli() -> Command {
    let input = Arg::new("input")
        .help("AST document (JSON)")
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .index(1);
    let indent = Arg::new("indent")
        .long("indent")
        .help("Spaces per nesting level")
        .value_parser(clap::value_parser!(usize))
        .default_value("2");
    let close_functions = Arg::new("close-functions")
        .long("close-functions")
        .help("Close function blocks with a matching brace")
        .action(ArgAction::SetTrue);

    Command::new("solprint")
        .about("Render a contract AST to text and check optimizer passes against it")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("render")
                .about("Print the rendered tree")
                .arg(input.clone())
                .arg(indent.clone())
                .arg(close_functions.clone()),
        )
        .subcommand(
            Command::new("verify")
                .about("Render before and after optimizer passes and compare")
                .arg(input)
                .arg(indent)
                .arg(close_functions)
                .arg(
                    Arg::new("pass")
                        .long("pass")
                        .short('p')
                        .help("Pass to run (repeatable)")
                        .value_parser(["struct-pack", "calldata", "storage-cache"])
                        .action(ArgAction::Append)
                        .required(true),
                )
                .arg(
                    Arg::new("expect-unchanged")
                        .long("expect-unchanged")
                        .help("Fail if the passes change the rendered tree")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Print both snapshots and their diff")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn render_context(matches: &ArgMatches) -> RenderContext {
    let indent = matches.get_one::<usize>("indent").copied().unwrap_or(2);
    RenderContext::new()
        .with_indent_width(indent)
        .with_closed_functions(matches.get_flag("close-functions"))
}

fn input_path(matches: &ArgMatches) -> Result<&PathBuf> {
    matches
        .get_one::<PathBuf>("input")
        .ok_or_else(|| anyhow::anyhow!("missing input file"))
}

fn run_render(matches: &ArgMatches) -> Result<()> {
    let ast = AstParser::parse_file(input_path(matches)?)?;
    let output = solprint::render_to_string(&ast, &render_context(matches));
    print!("{}", output);
    Ok(())
}

fn run_verify(matches: &ArgMatches) -> Result<()> {
    let mut ast = AstParser::parse_file(input_path(matches)?)?;
    let passes = matches
        .get_many::<String>("pass")
        .into_iter()
        .flatten()
        .map(|name| name.parse::<Pass>())
        .collect::<Result<Vec<_>>>()?;
    let expectation = if matches.get_flag("expect-unchanged") {
        Expectation::Unchanged
    } else {
        Expectation::Changed
    };

    let outcome = verify(&mut ast, &passes, expectation, &render_context(matches));

    if matches.get_flag("show") {
        println!("UNOPTIMIZED====================");
        println!("{}", outcome.before);
        println!("OPTIMIZED======================");
        println!("{}", outcome.after);
        println!("================================");
        print!("{}", outcome.diff());
    }
    for (pass, changes) in &outcome.report.applied {
        println!("{}: {} change(s)", pass, changes);
    }

    if !outcome.passed() {
        match expectation {
            Expectation::Changed => bail!("rendered tree unchanged after optimization"),
            Expectation::Unchanged => {
                bail!("rendered tree changed but no optimization was expected")
            }
        }
    }
    println!("ok");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("render", sub)) => run_render(sub),
        Some(("verify", sub)) => run_verify(sub),
        _ => bail!("unknown command"),
    }
}
