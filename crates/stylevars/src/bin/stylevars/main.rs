mod cli;

use anyhow::Context;
use stylevars::{Options, Stylesheet, Substitution};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("STYLEVARS_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Substitute(substitute_cli) => substitute(substitute_cli),
        cli::Command::Dev(dev_cli) => dev(dev_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn substitute(cli: cli::SubstituteCommand) -> anyhow::Result<()> {
    let mut document = load(&cli.input)?;
    let mut substitution = Substitution::new(options(&cli.options)?);

    substitution
        .apply(&mut document)
        .with_context(|| format!("Unable to substitute variables in {}", source_name(&cli.input)))?;

    output(&cli.output, &document)?;
    Ok(())
}

fn load(input: &cli::InputArgs) -> anyhow::Result<Stylesheet> {
    let Some(file_path) = &input.file else {
        let stdin = std::io::read_to_string(std::io::stdin())?;
        return Stylesheet::from_yaml(&stdin).context("Unable to load document from stdin");
    };

    Stylesheet::load_file(file_path)
        .with_context(|| format!("Unable to load document {}", file_path.display()))
}

fn source_name(input: &cli::InputArgs) -> String {
    input
        .file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string())
}

/// Config file first, then command line flags on top
fn options(args: &cli::OptionArgs) -> anyhow::Result<Options> {
    let mut options = match &args.config {
        Some(config_path) => Options::load_file(config_path)
            .with_context(|| format!("Unable to load options {}", config_path.display()))?,
        None => Options::default(),
    };

    for (name, value) in &args.variables {
        options = options.variable(name, value.as_str());
    }

    for (name, value) in &args.only {
        options = options.only(name, value.as_str());
    }

    if args.silent {
        options = options.silent(true);
    }

    tracing::debug!(?options, "options loaded");
    Ok(options)
}

fn output(output: &cli::OutputArgs, document: &Stylesheet) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), document)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), document)?,
    };

    Ok(())
}

/// (stylevars-)developer utilities
///
/// A quick way to expose internal structures for debugging purposes
pub fn dev(cli: cli::DevCommand) -> anyhow::Result<()> {
    use cli::DevSubCommand::*;

    let mut document = load(&cli.input)?;

    match cli.command {
        Tree => println!("{document:#?}"),
        Table => {
            let mut substitution = Substitution::new(options(&cli.options)?);
            substitution.apply(&mut document)?;
            println!("{:#?}", substitution.table());
        }
    }

    Ok(())
}
