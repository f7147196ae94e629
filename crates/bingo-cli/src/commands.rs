use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use comfy_table::{Cell, Table};
use serde_json::json;
use tracing::{info, info_span};

use bingo_cli::config::{PathOverrides, ResolvedPaths, Settings};
use bingo_cli::session::{load_catalog, move_visible, open_tile_store, outcome_notice};
use bingo_cli::table::{
    TileLine, apply_table_style, dataset_table, dim_cell, header_cell, projection_table, tile_table,
};
use bingo_index::{COMBINED_KEY, DatasetCatalog, Selection, ViewKey, project};
use bingo_tiles::{FileSnapshot, FilteredView, InitialSource, Outcome, StepDirection, TypeFilter};

use crate::cli::{DatasetArgs, DirectionArg, TileSourceArgs, TilesCommand, ViewArgs};

/// Settings and global flags shared by every command.
pub struct Env {
    pub settings: Settings,
    pub data_dir: Option<PathBuf>,
}

impl Env {
    fn paths(&self, source: Option<&TileSourceArgs>) -> ResolvedPaths {
        let overrides = PathOverrides {
            data_dir: self.data_dir.clone(),
            snapshot_path: source.and_then(|s| s.snapshot_path.clone()),
            tile_source: source.and_then(|s| s.tile_source.clone()),
        };
        ResolvedPaths::resolve(&self.settings, &overrides)
    }

    fn catalog(&self) -> Result<DatasetCatalog> {
        load_catalog(&self.paths(None).data_root)
    }
}

fn unknown_dataset(key: &str) -> anyhow::Error {
    anyhow!("unknown dataset `{key}` (see `bingo datasets`)")
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize output")?
    );
    Ok(())
}

pub fn run_datasets(env: &Env) -> Result<()> {
    let catalog = env.catalog()?;
    println!("{}", dataset_table(&catalog.datasets(), COMBINED_KEY));
    Ok(())
}

pub fn run_categories(env: &Env, args: &DatasetArgs) -> Result<()> {
    let mut catalog = env.catalog()?;
    let listing = catalog
        .list_categories(&args.dataset)
        .ok_or_else(|| unknown_dataset(&args.dataset))?;
    if args.json {
        return print_json(&json!({ "plain": listing.plain, "eras": listing.eras }));
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Kind")]);
    apply_table_style(&mut table);
    for label in &listing.plain {
        table.add_row(vec![Cell::new(label), dim_cell("category")]);
    }
    for label in &listing.eras {
        table.add_row(vec![Cell::new(label), dim_cell("era")]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_types(env: &Env, args: &DatasetArgs) -> Result<()> {
    let mut catalog = env.catalog()?;
    let types = catalog
        .list_types(&args.dataset)
        .ok_or_else(|| unknown_dataset(&args.dataset))?;
    if args.json {
        return print_json(&types);
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Drop Type")]);
    apply_table_style(&mut table);
    for label in types {
        table.add_row(vec![label]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_view(env: &Env, args: &ViewArgs) -> Result<()> {
    let span = info_span!("view", dataset = %args.dataset.dataset);
    let _guard = span.enter();

    let mut catalog = env.catalog()?;
    let mut selection = Selection::default();
    selection.select_dataset(args.dataset.dataset.as_str());
    if let Some(category) = &args.category {
        selection.select_view(ViewKey::Category(category.clone()));
    } else if let Some(drop_type) = &args.drop_type {
        selection.select_view(ViewKey::Type(drop_type.clone()));
    }

    let result = catalog
        .result(selection.dataset())
        .ok_or_else(|| unknown_dataset(selection.dataset()))?;
    let projection = project(result, selection.view());
    info!(rows = projection.rows.len(), "projected view");

    if args.dataset.json {
        return print_json(&json!({ "view": selection.view(), "table": projection }));
    }
    if projection.is_empty() {
        match selection.view() {
            None => println!("Choose a view with --category or --type."),
            Some(_) => println!("No rows."),
        }
        return Ok(());
    }
    println!("{}", projection_table(&projection));
    Ok(())
}

fn report(outcome: &Outcome, done: &str) {
    if let Some(notice) = outcome_notice(outcome) {
        eprintln!("warning: {notice}");
    }
    if outcome.changed() {
        println!("{done}");
    } else {
        println!("No change.");
    }
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read tiles from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(input).with_context(|| format!("read {}", input.display()))
}

pub fn run_tiles(env: &Env, command: &TilesCommand) -> Result<()> {
    match command {
        TilesCommand::List { source, filter } => {
            let store = open_tile_store(&env.paths(Some(source)))?;
            let type_filter = TypeFilter::parse(&filter.tile_type);
            let view = FilteredView::compute(&store, &filter.query, &type_filter);
            let lines = (0..view.len()).filter_map(|visible| {
                let absolute = view.to_absolute_index(&store, visible)?;
                let tile = store.get(absolute)?;
                Some(TileLine {
                    visible,
                    absolute,
                    tile,
                })
            });
            println!("{}", tile_table(lines));
            let origin = match store.initial_source() {
                InitialSource::Snapshot => "saved order",
                InitialSource::Canonical => "canonical order",
            };
            println!("{} of {} tiles ({origin})", view.len(), store.len());
        }
        TilesCommand::Move {
            source,
            filter,
            from,
            to,
        } => {
            let mut store = open_tile_store(&env.paths(Some(source)))?;
            let type_filter = TypeFilter::parse(&filter.tile_type);
            let outcome = move_visible(&mut store, &filter.query, &type_filter, *from, *to);
            report(&outcome, &format!("Moved tile {from} to {to}."));
        }
        TilesCommand::Step {
            source,
            index,
            direction,
        } => {
            let mut store = open_tile_store(&env.paths(Some(source)))?;
            let direction = match direction {
                DirectionArg::Up => StepDirection::Up,
                DirectionArg::Down => StepDirection::Down,
            };
            let outcome = store.move_step(*index, direction);
            report(&outcome, &format!("Moved tile {index} {direction:?}."));
        }
        TilesCommand::Reset { source, forget } => {
            let paths = env.paths(Some(source));
            if *forget {
                FileSnapshot::new(&paths.snapshot_path)
                    .clear()
                    .context("remove tile snapshot")?;
                println!("Removed {}.", paths.snapshot_path.display());
                return Ok(());
            }
            let mut store = open_tile_store(&paths)?;
            let outcome = store.reset_to_source();
            report(&outcome, "Restored the canonical tile order.");
        }
        TilesCommand::Export { source, out } => {
            let store = open_tile_store(&env.paths(Some(source)))?;
            let json = store.export_json().context("serialize tile order")?;
            match out {
                Some(path) => {
                    fs::write(path, &json)
                        .with_context(|| format!("write {}", path.display()))?;
                    println!("Exported {} tiles to {}.", store.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
        TilesCommand::Import { source, input } => {
            let mut store = open_tile_store(&env.paths(Some(source)))?;
            let text = read_input(input)?;
            let outcome = store
                .import_json(&text)
                .context("import rejected, tile order unchanged")?;
            report(&outcome, &format!("Imported {} tiles.", store.len()));
        }
    }
    Ok(())
}
