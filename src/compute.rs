use anyhow::{anyhow, bail};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{DistanceRecord, StrainMetric};

/// Rounds to 4 decimal places on the exact decimal value of the double.
///
/// Scaling by 10^4 first would turn values just below a tie (the double nearest
/// 0.00225, say) into exact ties and round them up.
pub fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}

/// Strains present in both tables, sorted by name.
pub fn common_strains<'a>(
    distances: &'a [DistanceRecord],
    lengths: &BTreeMap<String, f64>,
) -> BTreeSet<&'a str> {
    let strains: BTreeSet<&str> = distances.iter().map(|r| r.strain.as_str()).collect();

    strains
        .into_iter()
        .filter(|strain| {
            let found = lengths.contains_key(*strain);
            if !found {
                debug!("{}: no assembly length, skipped", strain);
            }
            found
        })
        .collect()
}

pub fn compute_bini(mean_distance: f64, length: f64, strain: &str) -> anyhow::Result<f64> {
    if length == 0.0 {
        bail!("assembly length is zero for strain {}", strain);
    }
    if !(length > 0.0) {
        bail!("assembly length is not positive ({}) for strain {}", length, strain);
    }
    Ok(round4(mean_distance / length))
}

/// Builds one metric row per strain found in both tables, in strain order.
pub fn aggregate(
    distances: &[DistanceRecord],
    lengths: &BTreeMap<String, f64>,
) -> anyhow::Result<Vec<StrainMetric>> {
    let strains = common_strains(distances, lengths);
    info!("Strains in both tables: {}", strains.len());

    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in distances {
        if strains.contains(record.strain.as_str()) {
            let entry = totals.entry(record.strain.as_str()).or_insert((0.0, 0));
            entry.0 += record.distance;
            entry.1 += 1;
        }
    }

    let mut metrics = Vec::with_capacity(totals.len());
    for (strain, (sum_distances, cluster_count)) in totals {
        let length = lengths
            .get(strain)
            .copied()
            .ok_or_else(|| anyhow!("no assembly length for strain {}", strain))?;
        let mean_distance = round4(sum_distances / cluster_count as f64);
        let bini = compute_bini(mean_distance, length, strain)?;

        debug!(
            "{}: {} clusters, mean distance {}, BiNI {}",
            strain, cluster_count, mean_distance, bini
        );

        metrics.push(StrainMetric {
            strain: strain.to_string(),
            sum_distances,
            cluster_count,
            length,
            mean_distance,
            bini,
        });
    }

    Ok(metrics)
}
