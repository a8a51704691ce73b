//! flowsetup CLI
//!
//! Usage:
//!   flowsetup [OPTIONS] <COMMAND>
//!
//! Commands:
//!   fill     Fill a job-script template and write <name>.sh
//!   check    List placeholders of a template that have no value
//!   plane    Describe the boundary planes of a saved setup
//!
//! Options:
//!   -c, --config <FILE>  Project config file (TOML format)
//!   -v, --verbose        Enable debug logging
//!   -h, --help           Print help

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use flowsetup::{
    describe_snapshot, Bindings, ProjectConfig, SetupSnapshot, TemplateError, TemplateFiller,
};

#[derive(Parser)]
#[command(name = "flowsetup")]
#[command(about = "Boundary conditions and job scripts for flow simulation setup")]
struct Cli {
    /// Project config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a job-script template and write <name>.sh
    Fill {
        /// Template file name under the templates directory
        template: String,

        /// Substitution as key=value; repeatable, overrides ambient values
        #[arg(short, long = "set", value_parser = parse_binding)]
        set: Vec<(String, String)>,

        /// Do not seed ambient values from the process environment
        #[arg(long)]
        no_env: bool,

        /// Print the filled script instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// List placeholders of a template that have no value
    Check {
        /// Template file name under the templates directory
        template: String,

        /// Substitution as key=value; repeatable
        #[arg(short, long = "set", value_parser = parse_binding)]
        set: Vec<(String, String)>,

        /// Do not seed ambient values from the process environment
        #[arg(long)]
        no_env: bool,
    },

    /// Describe the boundary planes of a saved setup
    Plane {
        /// Snapshot file (TOML format)
        snapshot: PathBuf,
    },
}

fn parse_binding(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    // Load project config
    let config = match &cli.config {
        Some(path) => match ProjectConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ProjectConfig::default(),
    };

    init_logging(&config, cli.verbose);
    debug!("configuration loaded from: {:?}", cli.config);

    match cli.command {
        Command::Fill {
            template,
            set,
            no_env,
            dry_run,
        } => {
            let filler = TemplateFiller::from_config(&config.with_inherit_environment(!no_env));
            let arguments: Bindings = set.into_iter().collect();
            if dry_run {
                match filler.render(&template, &arguments) {
                    Ok(rendered) => print!("{}", rendered.text),
                    Err(e) => fail_template(&filler, &template, e),
                }
            } else {
                match filler.fill(&template, &arguments) {
                    Ok(path) => println!("{}", path.display()),
                    Err(e) => fail_template(&filler, &template, e),
                }
            }
        }
        Command::Check {
            template,
            set,
            no_env,
        } => {
            let filler = TemplateFiller::from_config(&config.with_inherit_environment(!no_env));
            let arguments: Bindings = set.into_iter().collect();
            match filler.unbound(&template, &arguments) {
                Ok(unbound) if unbound.is_empty() => println!("all placeholders bound"),
                Ok(unbound) => {
                    for name in unbound {
                        println!("{}", name);
                    }
                    std::process::exit(1);
                }
                Err(e) => fail_template(&filler, &template, e),
            }
        }
        Command::Plane { snapshot } => match SetupSnapshot::load(&snapshot) {
            Ok(s) => print!("{}", describe_snapshot(&s)),
            Err(e) => {
                eprintln!("Error loading snapshot '{}': {}", snapshot.display(), e);
                std::process::exit(1);
            }
        },
    }
}

/// Initialize logging; `RUST_LOG` overrides the verbose flag and config level
fn init_logging(config: &ProjectConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Report a template error, with source context when it points into the template
fn fail_template(filler: &TemplateFiller, template: &str, err: TemplateError) -> ! {
    let report = match (err.span(), filler.load(template)) {
        (Some(_), Ok(source)) => {
            let filename = filler.template_path(template).display().to_string();
            err.format(&source, &filename)
        }
        _ => format!("Error: {}", err),
    };
    eprintln!("{}", report);
    std::process::exit(1);
}
