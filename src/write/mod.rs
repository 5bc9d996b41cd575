// src/write/mod.rs
use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, ArrayRef, Float64Array, StringArray},
    datatypes::{DataType, Field, Schema as ArrowSchema},
    record_batch::RecordBatch,
};
use parquet::{
    arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ArrowWriter},
    basic::Compression,
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{info, instrument};

use crate::record::NormalizedRecord;

/// Arrow schema of an exported dataset. Column names match the JSON export.
pub fn record_schema() -> ArrowSchema {
    ArrowSchema::new(vec![
        Field::new("countyId", DataType::Utf8, false),
        Field::new("stateName", DataType::Utf8, false),
        Field::new("countyName", DataType::Utf8, false),
        Field::new("smokingPct", DataType::Float64, false),
        Field::new("foreignBornPct", DataType::Float64, false),
    ])
}

fn to_arrays(records: &[NormalizedRecord]) -> Vec<ArrayRef> {
    vec![
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.county_id.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.state_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.county_name.as_str()),
        )),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| r.smoking_pct),
        )),
        Arc::new(Float64Array::from_iter_values(
            records.iter().map(|r| r.foreign_born_pct),
        )),
    ]
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

/// Write the dataset as a single-row-group Parquet file.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display(), rows = records.len()))]
pub fn write_parquet<P: AsRef<Path>>(records: &[NormalizedRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let schema = Arc::new(record_schema());
    let batch = RecordBatch::try_new(schema.clone(), to_arrays(records))
        .context("building record batch")?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let tmp = tmp_sibling(path);
    let file = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
    let mut writer = ArrowWriter::try_new(BufWriter::new(file), schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} -> {}", tmp.display(), path.display()))?;

    info!("wrote parquet");
    Ok(())
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| anyhow!("column `{}` missing or not Utf8", name))
}

fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| anyhow!("column `{}` missing or not Float64", name))
}

/// Read back a file produced by `write_parquet`.
pub fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Vec<NormalizedRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(1024)
        .build()?;

    let mut out = Vec::new();
    for batch in reader {
        let batch = batch?;
        let ids = string_column(&batch, "countyId")?;
        let states = string_column(&batch, "stateName")?;
        let counties = string_column(&batch, "countyName")?;
        let smoking = float_column(&batch, "smokingPct")?;
        let foreign_born = float_column(&batch, "foreignBornPct")?;
        for i in 0..batch.num_rows() {
            out.push(NormalizedRecord {
                county_id: ids.value(i).to_string(),
                state_name: states.value(i).to_string(),
                county_name: counties.value(i).to_string(),
                smoking_pct: smoking.value(i),
                foreign_born_pct: foreign_born.value(i),
            });
        }
    }
    Ok(out)
}

/// Write the dataset as a pretty-printed JSON array, atomically.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display(), rows = records.len()))]
pub fn write_json<P: AsRef<Path>>(records: &[NormalizedRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let tmp = tmp_sibling(path);
    let file = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, records).context("serializing JSON")?;
    w.write_all(b"\n")?;
    w.flush()?;
    drop(w);

    fs::rename(&tmp, path)
        .with_context(|| format!("renaming {} -> {}", tmp.display(), path.display()))?;
    info!("wrote json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<NormalizedRecord> {
        vec![
            NormalizedRecord {
                county_id: "06037".into(),
                state_name: "California".into(),
                county_name: "Los Angeles".into(),
                smoking_pct: 12.5,
                foreign_born_pct: 34.2,
            },
            NormalizedRecord {
                county_id: "48201".into(),
                state_name: "Texas".into(),
                county_name: "Harris".into(),
                smoking_pct: 14.3,
                foreign_born_pct: 0.0,
            },
        ]
    }

    #[test]
    fn parquet_reads_back() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out").join("joined.parquet");
        write_parquet(&sample(), &path)?;
        assert!(path.exists());
        assert!(!tmp_sibling(&path).exists());
        assert_eq!(read_parquet(&path)?, sample());
        Ok(())
    }

    #[test]
    fn empty_parquet() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.parquet");
        write_parquet(&[], &path)?;
        assert!(read_parquet(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn json_uses_camel_case() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("joined.json");
        write_json(&sample(), &path)?;
        let text = fs::read_to_string(&path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        assert_eq!(value[0]["countyId"], "06037");
        assert_eq!(value[1]["foreignBornPct"], 0.0);
        let back: Vec<NormalizedRecord> = serde_json::from_str(&text)?;
        assert_eq!(back, sample());
        Ok(())
    }
}
