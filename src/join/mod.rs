// src/join/mod.rs
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::{
    config::JoinConfig,
    error::{LoadError, Result},
    fetch::{fetch_source, SourceLocation},
    process::{
        parse_csv,
        utils::{parse_number, parse_pct_or_zero},
        RawTable,
    },
    record::NormalizedRecord,
};

pub mod keyed;

pub use keyed::{ForeignBornEntry, KeyedTable, SmokingEntry};

fn require_column(table: &RawTable, column: &str) -> Result<()> {
    match table.column_index(column) {
        Some(_) => Ok(()),
        None => Err(LoadError::MissingColumn {
            name: table.name.clone(),
            column: column.to_string(),
        }),
    }
}

/// Key the smoking-rate source by county identifier.
///
/// A missing value column yields `NaN` values; a row too short to hold the
/// value reads it as empty text, which coerces to `0`.
pub fn key_smoking(table: &RawTable, cfg: &JoinConfig) -> Result<KeyedTable<SmokingEntry>> {
    let cols = &cfg.smoking;
    require_column(table, &cols.key)?;
    let has_value = table.column_index(&cols.value).is_some();

    let mut out = KeyedTable::with_capacity(table.len());
    for i in 0..table.len() {
        let key = table.field(i, &cols.key).unwrap_or("");
        let value = if has_value {
            parse_number(table.field(i, &cols.value).unwrap_or(""))
        } else {
            f64::NAN
        };
        out.insert(
            key,
            SmokingEntry {
                value,
                state: cfg.states.derive_state_or(key, &cfg.unknown_state),
            },
        );
    }
    Ok(out)
}

/// Key the foreign-born source by county identifier.
///
/// Rows are only kept when the value column exists; blank or non-numeric
/// values become `0`.
pub fn key_foreign_born(
    table: &RawTable,
    cfg: &JoinConfig,
) -> Result<KeyedTable<ForeignBornEntry>> {
    let cols = &cfg.foreign_born;
    require_column(table, &cols.key)?;

    let mut out = KeyedTable::with_capacity(table.len());
    if table.column_index(&cols.value).is_none() {
        debug!(source = %table.name, column = %cols.value, "value column absent; no rows keyed");
        return Ok(out);
    }

    for i in 0..table.len() {
        let key = table.field(i, &cols.key).unwrap_or("");
        let value = parse_pct_or_zero(table.field(i, &cols.value).unwrap_or(""));
        out.insert(
            key,
            ForeignBornEntry {
                value,
                state: cfg.states.derive_state_or(key, &cfg.unknown_state),
                county: table.field(i, &cols.county).unwrap_or("").to_string(),
            },
        );
    }
    Ok(out)
}

/// Inner join on county identifier, in the smoking table's iteration order
/// (index-like identifiers ascending, then the rest as first seen).
///
/// The smoking source's state wins unless it is empty.
pub fn join_tables(
    smoking: &KeyedTable<SmokingEntry>,
    foreign_born: &KeyedTable<ForeignBornEntry>,
) -> Vec<NormalizedRecord> {
    smoking
        .iter()
        .filter_map(|(county_id, a)| {
            let b = foreign_born.get(county_id)?;
            let state_name = if a.state.is_empty() {
                b.state.clone()
            } else {
                a.state.clone()
            };
            Some(NormalizedRecord {
                county_id: county_id.to_string(),
                state_name,
                county_name: b.county.clone(),
                smoking_pct: a.value,
                foreign_born_pct: b.value,
            })
        })
        .collect()
}

/// Drop records with an unresolved state and the configured exclusions.
pub fn quality_filter(records: Vec<NormalizedRecord>, cfg: &JoinConfig) -> Vec<NormalizedRecord> {
    records
        .into_iter()
        .filter(|r| {
            r.state_name != cfg.unknown_state && !cfg.is_excluded(&r.state_name, &r.county_name)
        })
        .collect()
}

/// Key, join and filter two already-parsed sources.
pub fn join_raw(
    smoking: &RawTable,
    foreign_born: &RawTable,
    cfg: &JoinConfig,
) -> Result<Vec<NormalizedRecord>> {
    let a = key_smoking(smoking, cfg)?;
    let b = key_foreign_born(foreign_born, cfg)?;
    let joined = join_tables(&a, &b);
    let joined_len = joined.len();
    let kept = quality_filter(joined, cfg);
    debug!(
        smoking_keys = a.len(),
        foreign_born_keys = b.len(),
        unmatched = a.len() - joined_len,
        filtered = joined_len - kept.len(),
        "joined sources"
    );
    Ok(kept)
}

/// Fetch and parse one source.
pub async fn load_source(client: &Client, location: &SourceLocation) -> Result<RawTable> {
    let bytes = fetch_source(client, location).await?;
    parse_csv(&location.name(), &bytes)
}

/// Load both sources with the default configuration and join them.
pub async fn load_and_join(
    smoking: &SourceLocation,
    foreign_born: &SourceLocation,
) -> Result<Vec<NormalizedRecord>> {
    load_and_join_with(&Client::new(), smoking, foreign_born, &JoinConfig::default()).await
}

/// Load both sources and join them.
///
/// The foreign-born source is requested only after the smoking source has
/// loaded, unless `cfg.concurrent_loads` is set. Either failure aborts.
#[instrument(level = "info", skip_all, fields(smoking = %smoking, foreign_born = %foreign_born))]
pub async fn load_and_join_with(
    client: &Client,
    smoking: &SourceLocation,
    foreign_born: &SourceLocation,
    cfg: &JoinConfig,
) -> Result<Vec<NormalizedRecord>> {
    let (a, b) = if cfg.concurrent_loads {
        futures::try_join!(load_source(client, smoking), load_source(client, foreign_born))?
    } else {
        let a = load_source(client, smoking).await?;
        let b = load_source(client, foreign_born).await?;
        (a, b)
    };
    let records = join_raw(&a, &b, cfg)?;
    info!(records = records.len(), "dataset ready");
    Ok(records)
}
