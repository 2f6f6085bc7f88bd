//! Honey Factory - grid inspector
//!
//! Builds the grid world from a layout, applies any requested building
//! placements, and prints the result as an ASCII map or as JSON.

use clap::{Parser, ValueEnum};
use honey_factory::catalog::{BuildingType, Catalog};
use honey_factory::core::config::GridConfig;
use honey_factory::core::error::{FactoryError, Result};
use honey_factory::grid::{CellType, GridCell, GridWorld, PathTile};
use honey_factory::placement::BuildingRegistry;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspect the honey factory grid layout
#[derive(Parser, Debug)]
#[command(name = "honey-factory")]
#[command(about = "Build the honey factory grid and print its cells")]
struct Args {
    /// Grid layout TOML (defaults to the built-in starter map)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Building catalog TOML (defaults to the built-in catalog)
    #[arg(long)]
    buildings: Option<PathBuf>,

    /// Place a building before printing, e.g. `basic_hive@hive_0`
    #[arg(long = "place", value_name = "TYPE@CELL")]
    placements: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// JSON row for one cell
#[derive(Serialize)]
struct CellReport<'a> {
    #[serde(flatten)]
    cell: &'a GridCell,
    occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_tile: Option<PathTile>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("honey_factory=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GridConfig::load_from_toml(path)?,
        None => GridConfig::default(),
    };
    let catalog = match &args.buildings {
        Some(path) => Catalog::<BuildingType>::load_from_toml(path)?,
        None => Catalog::with_defaults(),
    };

    let mut world = GridWorld::new(&config)?;
    let mut registry = BuildingRegistry::new();

    for spec in &args.placements {
        let (type_id, cell_id) = parse_placement(spec)?;
        match registry.place(&mut world, &catalog, type_id, cell_id) {
            Ok(id) => tracing::info!("Placed {} on {}", id, cell_id),
            Err(e) => tracing::warn!("Skipping {}: {}", spec, e),
        }
    }

    match args.format {
        Format::Text => print!("{}", render_text(&world)),
        Format::Json => {
            let report: Vec<CellReport> = world
                .cells()
                .iter()
                .map(|cell| CellReport {
                    cell,
                    occupied: cell.is_occupied(),
                    path_tile: world.path_tile(cell.id().as_str()),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn parse_placement(spec: &str) -> Result<(&str, &str)> {
    spec.split_once('@')
        .filter(|(type_id, cell_id)| !type_id.is_empty() && !cell_id.is_empty())
        .ok_or_else(|| FactoryError::InvalidArgument(format!("expected TYPE@CELL, got `{}`", spec)))
}

/// Map glyph; uppercase marks an occupied cell
fn glyph(cell: &GridCell) -> char {
    let glyph = match cell.cell_type() {
        CellType::Path => '=',
        CellType::Hive => 'h',
        CellType::Colony => 'c',
        CellType::Lab => 'l',
        CellType::Depot => 'd',
        CellType::Storage => 's',
        CellType::Environment => '*',
    };
    if cell.is_occupied() {
        glyph.to_ascii_uppercase()
    } else {
        glyph
    }
}

fn render_text(world: &GridWorld) -> String {
    let Some((min, max)) = world.bounds() else {
        return "(empty grid)\n".to_string();
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{} cells, spacing {}, lattice {} to {} (north at top)\n\n",
        world.len(),
        world.spacing(),
        min,
        max
    ));

    for z in min.z..=max.z {
        let row: Vec<String> = (min.x..=max.x)
            .map(|x| world.cell_at(x, z).map_or('.', glyph).to_string())
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out.push_str("\n= path  h hive  c colony  l lab  d depot  s storage  * environment\n");
    out.push_str("(uppercase = occupied)\n");

    let occupied: Vec<&GridCell> = world.occupied_cells().collect();
    if !occupied.is_empty() {
        out.push_str(&format!("\n{:<16} {:<12} {:>5}  {}\n", "CELL", "TYPE", "LEVEL", "BUILDING"));
        for cell in occupied {
            out.push_str(&format!(
                "{:<16} {:<12} {:>5}  {}\n",
                cell.id().as_str(),
                cell.cell_type().as_str(),
                cell.level(),
                cell.building_id().map_or("", |b| b.as_str())
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_placement() {
        assert_eq!(parse_placement("basic_hive@hive_0").unwrap(), ("basic_hive", "hive_0"));
        assert!(parse_placement("basic_hive").is_err());
        assert!(parse_placement("@hive_0").is_err());
        assert!(parse_placement("basic_hive@").is_err());
    }

    #[test]
    fn test_render_text_map() {
        let mut world = GridWorld::new(&GridConfig::default()).unwrap();
        world.occupy_cell("hive_0", "basic_hive-1").unwrap();
        let text = render_text(&world);

        let lines: Vec<&str> = text.lines().collect();
        // Header, blank line, then z = -4 .. 4
        assert_eq!(lines[2], "c . c . c . c . *");
        assert_eq!(lines[6], ". . . . = = = = =");
        assert!(lines[4].starts_with("* . H"));
        assert!(text.contains("basic_hive-1"));
    }

    #[test]
    fn test_render_empty_world() {
        let world = GridWorld::new(&GridConfig::empty()).unwrap();
        assert_eq!(render_text(&world), "(empty grid)\n");
    }
}
