use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::LicenseState;

use super::LicenseRecord;

/// Render a colored terminal report.
pub fn render(records: &[LicenseRecord], quiet: bool) -> Result<()> {
    let count =
        |state: LicenseState| records.iter().filter(|r| r.state == state).count();

    let valid = count(LicenseState::Valid);
    let deprecated = count(LicenseState::Deprecated);
    let ambiguous = count(LicenseState::Ambiguous);
    let invalid = count(LicenseState::Invalid);
    let unknown = count(LicenseState::Unknown);

    if quiet {
        println!(
            "Total: {}  Valid: {}  Deprecated: {}  Ambiguous: {}  Invalid: {}  Unknown: {}",
            records.len(),
            valid.to_string().green(),
            deprecated.to_string().yellow(),
            ambiguous.to_string().yellow(),
            invalid.to_string().red(),
            unknown.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "license-scanner".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Findings: {}\n", records.len());
    println!("   {}  Valid      : {:>4}", "✓".green(), valid);
    println!("   {}  Deprecated : {:>4}", "⚠".yellow(), deprecated);
    println!("   {}  Ambiguous  : {:>4}", "⚠".yellow(), ambiguous);
    println!("   {}  Invalid    : {:>4}", "✗".red(), invalid);
    println!("   {}  Unknown    : {:>4}", "✗".red(), unknown);
    println!();

    render_table(records);
    Ok(())
}

fn render_table(records: &[LicenseRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("State").add_attribute(Attribute::Bold),
        ]);

    for record in records {
        let state_color = match record.state {
            LicenseState::Valid => Color::Green,
            LicenseState::Deprecated | LicenseState::Ambiguous => Color::Yellow,
            LicenseState::Invalid => Color::Red,
            LicenseState::Unknown => Color::DarkGrey,
        };

        table.add_row(vec![
            Cell::new(&record.package_name),
            Cell::new(&record.package_version),
            Cell::new(&record.license),
            Cell::new(record.source.to_string()),
            Cell::new(record.state.to_string()).fg(state_color),
        ]);
    }

    println!("{table}");
}
