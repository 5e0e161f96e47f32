use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use fourbanger::interpreter::{self, Grammar, Outcome};
use fourbanger::value::{Complex, Integer, Numeric};

#[derive(ClapParser, Debug)]
#[command(version, about = "Four-function expression evaluator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Grammar variant: integer-only `base` or complex-valued `extended`
    #[arg(long, global = true, value_enum, default_value_t = Grammar::Extended)]
    grammar: Grammar,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes an expression, printing each token
    Tokenize { expr: Option<String> },

    /// Evaluates an expression and prints the result
    Evaluate { expr: Option<String> },
}

/// The expression given on the command line, or one line read from stdin
/// after a prompt.  A failed read exits with the error's status.
fn expression_or_prompt(expr: Option<String>, grammar: Grammar) -> Result<String> {
    if let Some(expr) = expr {
        return Ok(expr);
    }

    print!("Please enter an expression: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    match interpreter::read_expression(io::stdin().lock(), grammar) {
        Ok(expr) => Ok(expr),

        Err(e) => {
            debug!("Input debug: {}", e);
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'fourbanger::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("fourbanger::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{} {}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Evaluates `expr`, prints the outcome and returns the exit status.
fn report<N: Numeric>(expr: &str, grammar: Grammar, json: bool) -> Result<i32> {
    let outcome: Outcome<N> = interpreter::evaluate::<N>(expr, grammar).into();

    if json {
        println!(
            "{}",
            serde_json::to_string(&outcome).context("Failed to serialize outcome")?
        );
    } else {
        match &outcome {
            Outcome::Accepted(evaluation) => println!("{}", evaluation),

            Outcome::Rejected { error, .. } => {
                eprintln!("{}", error);
                println!("Not accepted.");
            }
        }
    }

    Ok(outcome.exit_code())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { expr } => {
            info!("Running Tokenize subcommand");

            let expr = expression_or_prompt(expr, args.grammar)?;

            let tokens = interpreter::tokenize(&expr, args.grammar);

            if args.json {
                println!(
                    "{}",
                    serde_json::to_string(&tokens).context("Failed to serialize tokens")?
                );
            } else {
                for token in &tokens {
                    println!("{}", token);
                }
            }

            info!("Tokenization completed: {} tokens", tokens.len());
        }

        Commands::Evaluate { expr } => {
            info!("Running Evaluate subcommand");

            let expr = expression_or_prompt(expr, args.grammar)?;

            let code = match args.grammar {
                Grammar::Base => report::<Integer>(&expr, args.grammar, args.json)?,
                Grammar::Extended => report::<Complex>(&expr, args.grammar, args.json)?,
            };

            if code != 0 {
                debug!("Evaluation rejected, exiting with code {}", code);

                std::process::exit(code);
            }

            info!("Evaluate subcommand completed");
        }
    }

    Ok(())
}
