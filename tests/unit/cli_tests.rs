//! Unit tests for CLI argument parsing and validation

use clap::Parser;
use propdiff::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_cli_init_command() {
    let cli = Cli::try_parse_from(["propdiff", "init"]).unwrap();
    match cli.command {
        Commands::Init { force } => assert!(!force),
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn test_cli_init_command_with_force() {
    let cli = Cli::try_parse_from(["propdiff", "init", "--force"]).unwrap();
    match cli.command {
        Commands::Init { force } => assert!(force),
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn test_cli_list_default_format() {
    let cli = Cli::try_parse_from(["propdiff", "list"]).unwrap();
    match cli.command {
        Commands::List { format } => assert_eq!(format, "pretty"),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_show_command() {
    let cli = Cli::try_parse_from(["propdiff", "show", "www.example.com", "--format", "json"]).unwrap();
    match cli.command {
        Commands::Show { property, format } => {
            assert_eq!(property, "www.example.com");
            assert_eq!(format, "json");
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn test_cli_diff_cross_property() {
    let cli = Cli::try_parse_from([
        "propdiff",
        "diff",
        "a.example.com@PRODUCTION",
        "b.example.com@7",
        "--prune",
        "top",
        "--format",
        "json",
        "--output",
        "diff.json",
    ])
    .unwrap();

    match cli.command {
        Commands::Diff { from, to, prop, prune, format, output } => {
            assert_eq!(from, "a.example.com@PRODUCTION");
            assert_eq!(to, "b.example.com@7");
            assert!(prop.is_none());
            assert_eq!(prune.as_deref(), Some("top"));
            assert_eq!(format.as_deref(), Some("json"));
            assert_eq!(output, Some(PathBuf::from("diff.json")));
        }
        _ => panic!("Expected Diff command"),
    }
}

#[test]
fn test_cli_diff_requires_two_versions() {
    assert!(Cli::try_parse_from(["propdiff", "diff", "LATEST"]).is_err());
}

#[test]
fn test_cli_global_flags() {
    let cli = Cli::try_parse_from(["propdiff", "list", "--verbose", "--store", "/tmp/props"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.store, Some(PathBuf::from("/tmp/props")));
}

#[test]
fn test_output_format_parse() {
    assert!(matches!(OutputFormat::parse("pretty"), Ok(OutputFormat::Pretty)));
    assert!(matches!(OutputFormat::parse("Json"), Ok(OutputFormat::Json)));
    assert!(OutputFormat::parse("table").is_err());
}
