pub mod cli;
pub mod config;
pub mod filter;
pub mod preset;
pub mod share;

use crate::config::{FilterConfig, load_config};
use crate::filter::fields::FAVORITE;
use crate::filter::{
    DomainFilterSet, FilterOperation, PropertyFilterQuery, construct_predicate,
    favorites_predicate, to_domain_filter,
};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use comfy_table::Table;
use std::path::Path;

pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use filter::{
    DomainFilter, FilterError, FilterToken, assemble, compile_query, to_domain_filter_set,
    to_property_filter_query,
};
pub use preset::{PresetList, SavedFilterPreset};

/// Inline JSON, or the contents of the file it names
fn read_input(input: &str) -> Result<String> {
    let path = Path::new(input);
    if path.is_file() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display()))
    } else {
        Ok(input.to_string())
    }
}

/// Parse a UI query, applying the configured combine operator when the
/// JSON does not name one
fn parse_query(raw: &str, default_operation: FilterOperation) -> Result<PropertyFilterQuery> {
    let mut value: serde_json::Value =
        serde_json::from_str(raw).context("Input is not valid JSON")?;
    if let Some(object) = value.as_object_mut()
        && !object.contains_key("operation")
    {
        object.insert(
            "operation".to_string(),
            serde_json::to_value(default_operation)?,
        );
    }
    serde_json::from_value(value).context("Input is not a filter query")
}

fn explain_table(
    query: &PropertyFilterQuery,
    set: &DomainFilterSet,
    config: &FilterConfig,
) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(vec!["Token", "Field", "Operator", "Value", "Predicate"]);

    for token in &query.tokens {
        let label = format!(
            "{} {} {}",
            token.property_key.as_deref().unwrap_or("(text)"),
            token.operator,
            token.value
        );
        if token.field_path() == FAVORITE {
            let predicate = favorites_predicate(&set.favorite_devices)
                .unwrap_or_else(|| "(no favorite devices)".to_string());
            table.add_row(vec![
                label,
                "favoriteDevices".to_string(),
                String::new(),
                String::new(),
                predicate,
            ]);
            continue;
        }
        let filter = to_domain_filter(token, &config.firmware_types)?;
        table.add_row(vec![
            label,
            filter.field_name.clone(),
            filter.operator.to_string(),
            filter.value.to_string(),
            construct_predicate(&filter)?,
        ]);
    }
    Ok(table)
}

pub fn run() -> Result<()> {
    let cli = cli_parse();
    cli.color.apply();

    let config = load_config(cli.config.as_deref())
        .context("Failed to load config")?
        .with_overrides(cli.firmware_types.clone(), cli.favorites.clone());

    match &cli.command {
        Commands::Compile { input, format } => {
            let query = parse_query(&read_input(input)?, config.default_operation)?;
            let set = to_domain_filter_set(
                &query,
                &config.favorite_devices,
                &config.firmware_types,
            )?;
            match format {
                OutputFormat::Text => println!("{}", assemble(&set)?),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&set)?),
            }
        }
        Commands::Explain { input } => {
            let query = parse_query(&read_input(input)?, config.default_operation)?;
            let set = to_domain_filter_set(
                &query,
                &config.favorite_devices,
                &config.firmware_types,
            )?;
            println!("{}", explain_table(&query, &set, &config)?);
            println!("{} {}", "Query:".bold(), assemble(&set)?.cyan());
        }
        Commands::Validate { input } => {
            let query = parse_query(&read_input(input)?, config.default_operation)?;
            filter::validate_query(&query)?;
            println!("{}", "Query is valid".green());
        }
        Commands::Restore { input, preset } => {
            let raw = read_input(input)?;
            let query = if *preset {
                let preset: SavedFilterPreset =
                    serde_json::from_str(&raw).context("Input is not a filter preset")?;
                preset.to_query()?
            } else {
                let set: DomainFilterSet =
                    serde_json::from_str(&raw).context("Input is not a filter set")?;
                to_property_filter_query(&set)?
            };
            println!("{}", serde_json::to_string_pretty(&query)?);
        }
        Commands::Link { input, decode } => {
            if *decode {
                let Some(query) = share::from_query_param(input)? else {
                    bail!("No '{}' parameter in '{}'", share::QUERY_PARAM, input);
                };
                println!("{}", serde_json::to_string_pretty(&query)?);
            } else {
                let query = parse_query(&read_input(input)?, config.default_operation)?;
                match share::to_query_param(&query)? {
                    Some(param) => println!("{param}"),
                    None => eprintln!("{}", "Empty query, nothing to share".yellow()),
                }
            }
        }
    }

    Ok(())
}
