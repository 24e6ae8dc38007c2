use anyhow::{bail, Context};
use log::{debug, info};
use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use crate::types::{DistanceRecord, LengthRecord};

pub fn read_distances<R: Read>(reader: R) -> anyhow::Result<Vec<DistanceRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let records = rdr.deserialize().collect::<Result<Vec<_>, csv::Error>>()?;
    Ok(records)
}

pub fn read_lengths<R: Read>(reader: R) -> anyhow::Result<Vec<LengthRecord>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let records = rdr.deserialize().collect::<Result<Vec<_>, csv::Error>>()?;
    Ok(records)
}

/// Loads the BGC distance table. Needs `strain`, `distance` and `completeness` columns.
pub fn load_distances<P>(path: P) -> anyhow::Result<Vec<DistanceRecord>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Could not open: {:?}", path))?;
    let records =
        read_distances(file).with_context(|| format!("Failed to parse distance table: {:?}", path))?;

    info!("Read {} BGC rows from {:?}", records.len(), path);
    Ok(records)
}

pub fn filter_complete(records: Vec<DistanceRecord>) -> Vec<DistanceRecord> {
    let total = records.len();
    let complete: Vec<DistanceRecord> = records.into_iter().filter(|r| r.is_complete()).collect();

    info!(
        "Kept {} of {} BGCs flagged complete",
        complete.len(),
        total
    );
    complete
}

/// Loads the assembly length table keyed by strain. A strain listed twice is an error.
pub fn load_lengths<P>(path: P) -> anyhow::Result<BTreeMap<String, f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Could not open: {:?}", path))?;
    let records =
        read_lengths(file).with_context(|| format!("Failed to parse length table: {:?}", path))?;

    info!("Read {} assembly lengths from {:?}", records.len(), path);
    index_lengths(records).with_context(|| format!("Invalid length table: {:?}", path))
}

pub fn index_lengths(records: Vec<LengthRecord>) -> anyhow::Result<BTreeMap<String, f64>> {
    let mut lengths = BTreeMap::new();

    for record in records {
        if lengths.contains_key(&record.strain) {
            bail!("Strain listed more than once: {}", record.strain);
        }
        debug!("{}: length {}", record.strain, record.length);
        lengths.insert(record.strain, record.length);
    }
    Ok(lengths)
}
