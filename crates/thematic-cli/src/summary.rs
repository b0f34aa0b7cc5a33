use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use thematic_cli::commands::{ConfigReport, ListedResource, ResolvedResource, ThemeSummary};
use thematic_core::{DumpSummary, ResourceKind};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}

pub fn print_resource(resource: &ResolvedResource) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![header_cell("Identifier"), Cell::new(&resource.identifier)]);
    table.add_row(vec![header_cell("Kind"), kind_cell(resource.kind)]);
    table.add_row(vec![header_cell("Theme"), theme_cell(&resource.theme, &resource.calling_theme)]);
    table.add_row(vec![header_cell("Path"), path_cell(&resource.absolute_path)]);
    table.add_row(vec![header_cell("View file"), optional_path_cell(resource.view_file.as_ref())]);
    table.add_row(vec![header_cell("Class file"), optional_path_cell(resource.class_file.as_ref())]);
    table.add_row(vec![
        header_cell("Style source"),
        optional_path_cell(resource.style_source_file.as_ref()),
    ]);
    println!("{table}");
}

pub fn print_listing(resources: &[ListedResource]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Path"),
        header_cell("Kind"),
        header_cell("Theme"),
    ]);
    apply_table_style(&mut table);
    for resource in resources {
        table.add_row(vec![
            Cell::new(resource.relative_path.display()),
            kind_cell(resource.kind),
            Cell::new(&resource.theme),
        ]);
    }
    println!("{table}");
    println!("{} resource(s)", resources.len());
}

pub fn print_dump(summary: &DumpSummary) {
    println!(
        "Copied {} file(s) to {} ({} skipped by extension filter)",
        summary.copied,
        summary.destination.display(),
        summary.skipped
    );
}

pub fn print_config(report: &ConfigReport) -> Result<()> {
    let mut chain = report.ancestry.join(" -> ");
    if let Some(cycle) = &report.cycle {
        chain.push_str(&format!(" -> {cycle} (cycle)"));
    }
    println!("# theme: {}", report.theme);
    println!("# ancestry: {chain}");
    let text = toml::to_string_pretty(&report.config).context("render config as TOML")?;
    print!("{text}");
    Ok(())
}

pub fn print_themes(themes: &[ThemeSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Theme"),
        header_cell("Extends"),
        header_cell("Roots"),
        header_cell("Ancestry"),
        header_cell("Config errors"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(4) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for theme in themes {
        let ancestry = match &theme.cycle {
            Some(cycle) => Cell::new(format!("{} -> {cycle}", theme.ancestry.join(" -> ")))
                .fg(Color::Yellow),
            None => Cell::new(theme.ancestry.join(" -> ")),
        };
        table.add_row(vec![
            Cell::new(&theme.name).add_attribute(Attribute::Bold),
            theme
                .parent
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(theme.roots.join(", ")),
            ancestry,
            count_cell(theme.config_errors.len()),
        ]);
    }
    println!("{table}");
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(kind: ResourceKind) -> Cell {
    match kind {
        ResourceKind::File => Cell::new("file"),
        ResourceKind::Directory => Cell::new("dir").fg(Color::Blue),
    }
}

fn theme_cell(owning: &str, calling: &str) -> Cell {
    if owning == calling {
        Cell::new(owning)
    } else {
        Cell::new(format!("{owning} (inherited by {calling})")).fg(Color::Yellow)
    }
}

fn path_cell(path: &Path) -> Cell {
    Cell::new(path.display())
}

fn optional_path_cell(path: Option<&PathBuf>) -> Cell {
    match path {
        Some(path) => path_cell(path).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(Color::Red)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
