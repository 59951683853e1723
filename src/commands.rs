//! Command implementations for propdiff CLI

use crate::cli::{Commands, OutputFormat};
use crate::config::DiffSettings;
use crate::error::{PropdiffError, Result};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::resolver::{VersionRef, VersionSelector};
use crate::store::PropertyStore;
use crate::view::diff_versions;
use std::fs;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands, store_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Init { force } => init_command(store_path, force),
        Commands::List { format } => list_command(store_path, &format),
        Commands::Show { property, format } => show_command(store_path, &property, &format),
        Commands::Diff {
            from,
            to,
            prop,
            prune,
            format,
            output,
        } => diff_command(
            store_path,
            &from,
            &to,
            prop.as_deref(),
            prune.as_deref(),
            format.as_deref(),
            output.as_deref(),
        ),
    }
}

/// Initialize propdiff store
fn init_command(store_path: Option<&Path>, force: bool) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let root = store_path.unwrap_or(&current_dir);

    // Always create in the given directory, never in a parent's store
    let store = PropertyStore::create_new(root.to_path_buf())?;
    if force {
        store.create_config_with_force(true)?;
    }

    println!("✅ Initialized propdiff store at: {}", store.root.display());
    println!("📁 Properties directory: {}", store.properties_dir.display());

    Ok(())
}

/// List all stored properties
fn list_command(store_path: Option<&Path>, format: &str) -> Result<()> {
    let store = PropertyStore::find(store_path)?;
    let output_format = OutputFormat::parse(format).map_err(PropdiffError::invalid_input)?;
    let properties = store.list_properties()?;

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_property_list(&properties),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&properties)?),
    }

    Ok(())
}

/// Show a property's version pointers
fn show_command(store_path: Option<&Path>, property: &str, format: &str) -> Result<()> {
    let store = PropertyStore::find(store_path)?;
    let output_format = OutputFormat::parse(format).map_err(PropdiffError::invalid_input)?;
    let document = store.load_property(property)?;

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_property(&document),
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "propertyName": document.property_name,
                "propertyId": document.property_id,
                "latestVersion": document.index.latest_version,
                "stagingVersion": document.index.staging_version,
                "productionVersion": document.index.production_version,
                "versions": document.versions.keys().collect::<Vec<_>>(),
            });
            println!("{}", JsonFormatter::format(&summary)?);
        }
    }

    Ok(())
}

/// Compare two property versions
fn diff_command(
    store_path: Option<&Path>,
    from: &str,
    to: &str,
    prop: Option<&str>,
    prune: Option<&str>,
    format: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let store = PropertyStore::find(store_path)?;
    let settings = DiffSettings::resolve(&store.load_config()?, prune, format)?;
    let (from_ref, to_ref) = version_refs(from, to, prop)?;

    println!("🔍 Comparing {} with {}...", from_ref, to_ref);

    let diff = diff_versions(&store, &from_ref, &to_ref, settings.prune_mode)?;

    if let Some(output_path) = output {
        fs::write(output_path, JsonFormatter::format_diff(&diff)?)?;
        println!("💾 Diff written to: {}", output_path.display());
    }

    match settings.format {
        OutputFormat::Pretty => PrettyPrinter::print_diff(&diff),
        OutputFormat::Json => println!("{}", JsonFormatter::format_diff(&diff)?),
    }

    Ok(())
}

/// Build the two sides of a comparison from command-line values
pub fn version_refs(from: &str, to: &str, prop: Option<&str>) -> Result<(VersionRef, VersionRef)> {
    match prop {
        Some(property) => Ok((
            VersionRef::new(property, VersionSelector::parse(from)),
            VersionRef::new(property, VersionSelector::parse(to)),
        )),
        None => Ok((VersionRef::parse(from)?, VersionRef::parse(to)?)),
    }
}
