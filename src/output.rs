//! Output formatting utilities

use crate::error::Result;
use crate::resolver::VersionId;
use crate::store::PropertyDocument;
use crate::tree::ConfigTree;
use crate::view::{VersionDiff, VersionLabel};
use std::fmt;

/// Pretty printer for propdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print property list
    pub fn print_property_list(properties: &[String]) {
        if properties.is_empty() {
            println!("No properties found.");
            return;
        }

        println!("📦 Stored Properties:");
        for (i, property) in properties.iter().enumerate() {
            let prefix = if i == properties.len() - 1 { "└─" } else { "├─" };
            println!("{} {}", prefix, property);
        }
    }

    /// Print a property's version pointers and stored versions
    pub fn print_property(document: &PropertyDocument) {
        print!("{}", PropertyReport(document));
    }

    pub fn format_property(document: &PropertyDocument) -> String {
        PropertyReport(document).to_string()
    }

    /// Print diff results
    pub fn print_diff(diff: &VersionDiff) {
        print!("{}", DiffReport(diff));
    }

    pub fn format_diff(diff: &VersionDiff) -> String {
        DiffReport(diff).to_string()
    }
}

/// Tree-style summary of one property document
struct PropertyReport<'a>(&'a PropertyDocument);

impl fmt::Display for PropertyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.0;
        let pointer = |version: &Option<VersionId>| {
            version
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string())
        };

        writeln!(f, "📦 Property: {}", document.property_name)?;
        if let Some(id) = &document.property_id {
            writeln!(f, "├─ Id: {}", id)?;
        }
        writeln!(f, "├─ Latest: {}", pointer(&document.index.latest_version))?;
        writeln!(f, "├─ Staging: {}", pointer(&document.index.staging_version))?;
        writeln!(f, "├─ Production: {}", pointer(&document.index.production_version))?;

        let versions: Vec<&str> = document.versions.keys().map(String::as_str).collect();
        if versions.is_empty() {
            writeln!(f, "└─ Versions: none stored")
        } else {
            writeln!(f, "└─ Versions: {}", versions.join(", "))
        }
    }
}

/// One line per changed path, each followed by the value on either side
struct DiffReport<'a>(&'a VersionDiff);

impl fmt::Display for DiffReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diff = self.0;
        writeln!(f, "🔍 Diff: {} → {}", diff.from_label(), diff.to_label())?;

        let changes = diff.changes();
        if changes.is_empty() {
            return writeln!(f, "└─ ✅ No differences");
        }

        for (i, change) in changes.iter().enumerate() {
            let last = i == changes.len() - 1;
            let (marker, indent) = if last { ("└─", "   ") } else { ("├─", "│  ") };
            writeln!(f, "{} {}", marker, change.path_string())?;

            let sides: Vec<(&VersionLabel, &ConfigTree)> = [
                change.from.map(|value| (diff.from_label(), value)),
                change.to.map(|value| (diff.to_label(), value)),
            ]
            .into_iter()
            .flatten()
            .collect();

            for (j, (label, value)) in sides.iter().enumerate() {
                let side_marker = if j == sides.len() - 1 { "└─" } else { "├─" };
                writeln!(f, "{}{} {}: {}", indent, side_marker, label, value)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{} difference(s)", changes.len())
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format a diff with version labels as leaf keys
    pub fn format_diff(diff: &VersionDiff) -> Result<String> {
        Self::format(&diff.to_json())
    }
}
