//! Tidymark — categorize saved posts from the command line.
//!
//! Reads one post per line and prints one JSON object per line to stdout.
//! Logs and the run summary go to stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use tidymark_core::Taxonomy;
use tidymark_pipeline::{CategorizationPipeline, RecategorizeItem};
use tidymark_remote::ClassifierConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    taxonomy: Option<PathBuf>,
    config: Option<PathBuf>,
    statistical_only: bool,
    input: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(CliArgs),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => return Ok(Command::Help),
            "--taxonomy" | "-t" => {
                let value = iter.next().ok_or("--taxonomy needs a file path")?;
                parsed.taxonomy = Some(PathBuf::from(value));
            }
            "--config" | "-c" => {
                let value = iter.next().ok_or("--config needs a file path")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--statistical-only" => parsed.statistical_only = true,
            other if other.starts_with('-') && other != "-" => {
                return Err(format!("Unknown option: {}", other));
            }
            path => {
                if parsed.input.is_some() {
                    return Err(format!("Unexpected extra argument: {}", path));
                }
                if path != "-" {
                    parsed.input = Some(PathBuf::from(path));
                }
            }
        }
    }

    Ok(Command::Run(parsed))
}

fn print_help() {
    println!("Tidymark — sort saved posts into categories");
    println!();
    println!("Usage: tidymark [options] [FILE]");
    println!();
    println!("Reads one post per line from FILE (or stdin) and prints");
    println!("{{\"index\", \"categoryId\", \"category\"}} per line.");
    println!();
    println!("Options:");
    println!("  -t, --taxonomy <file>    JSON array of {{id, name, description}} (default: built-in)");
    println!("  -c, --config <file>      Classifier config JSON (default: environment only)");
    println!("      --statistical-only   Never call the remote classifier");
    println!("  -h, --help               Show this help message");
}

fn read_lines(input: Option<&PathBuf>) -> anyhow::Result<Vec<String>> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(raw.lines().map(str::to_string).collect())
}

fn load_taxonomy(path: Option<&PathBuf>) -> anyhow::Result<Taxonomy> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read taxonomy {}", path.display()))?;
            Ok(Taxonomy::from_json(&json)?)
        }
        None => Ok(Taxonomy::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(Command::Run(cli)) => cli,
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{}. Use 'tidymark --help' for usage.", msg);
            std::process::exit(1);
        }
    };

    let taxonomy = load_taxonomy(cli.taxonomy.as_ref())?;
    info!(
        "Loaded {} categories (default: {})",
        taxonomy.len(),
        taxonomy.default_category_id()
    );

    let pipeline = if cli.statistical_only {
        CategorizationPipeline::statistical_only(taxonomy)
    } else {
        let config = match &cli.config {
            Some(path) => ClassifierConfig::load(path),
            None => ClassifierConfig::from_env(),
        };
        CategorizationPipeline::from_config(taxonomy, &config)?
    };

    let items: Vec<RecategorizeItem> = read_lines(cli.input.as_ref())?
        .into_iter()
        .map(|text| RecategorizeItem { current: None, text })
        .collect();

    let summary = pipeline.recategorize(&items).await;

    for (index, id) in summary.assignments.iter().enumerate() {
        let name = pipeline
            .taxonomy()
            .get(*id)
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        println!(
            "{}",
            serde_json::json!({"index": index, "categoryId": id, "category": name})
        );
    }

    eprintln!("{}", serde_json::to_string(&summary.categorized)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse_args(&[]), Ok(Command::Run(CliArgs::default())));
        assert_eq!(parse_args(&args(&["-"])), Ok(Command::Run(CliArgs::default())));
    }

    #[test]
    fn test_all_options() {
        let parsed = parse_args(&args(&[
            "--taxonomy",
            "cats.json",
            "-c",
            "cfg.json",
            "--statistical-only",
            "posts.txt",
        ]))
        .unwrap();
        assert_eq!(
            parsed,
            Command::Run(CliArgs {
                taxonomy: Some(PathBuf::from("cats.json")),
                config: Some(PathBuf::from("cfg.json")),
                statistical_only: true,
                input: Some(PathBuf::from("posts.txt")),
            })
        );
    }

    #[test]
    fn test_help_and_errors() {
        assert_eq!(parse_args(&args(&["--help"])), Ok(Command::Help));
        assert!(parse_args(&args(&["--taxonomy"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["a.txt", "b.txt"])).is_err());
    }

    #[test]
    fn test_builtin_taxonomy_when_no_file() {
        assert_eq!(load_taxonomy(None).unwrap().len(), 8);
    }
}
