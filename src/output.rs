use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::info;

use crate::types::{StrainMetric, METRIC_COLUMNS};

pub fn table_path<P: AsRef<Path>>(outdir: P, name: &str) -> PathBuf {
    outdir
        .as_ref()
        .join(format!("{}_BiNI_table_parameters.csv", name))
}

pub fn figure_path<P: AsRef<Path>>(outdir: P, name: &str) -> PathBuf {
    outdir.as_ref().join(format!("{}_BiNI_fig.png", name))
}

/// Creates `<parent>/<name>`. Fails if it is already there.
pub fn create_output_dir<P: AsRef<Path>>(parent: P, name: &str) -> Result<PathBuf> {
    let outdir = parent.as_ref().join(name);
    std::fs::create_dir(&outdir)
        .with_context(|| anyhow!("Could not create output directory: {:?}", outdir))?;
    Ok(outdir)
}

pub fn write_table<P: AsRef<Path>>(outdir: P, name: &str, data: &[StrainMetric]) -> Result<PathBuf> {
    let outpath = table_path(outdir, name);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&outpath)
        .with_context(|| anyhow!("Could not create file: {:?}", outpath))?;

    writer.write_record(METRIC_COLUMNS)?;
    for m in data {
        writer.serialize(m)?;
    }

    writer.flush()?;
    info!("Wrote {} rows to {:?}", data.len(), outpath);
    Ok(outpath)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric() -> StrainMetric {
        StrainMetric {
            strain: "s1".into(),
            sum_distances: 4.0,
            cluster_count: 2,
            length: 10.0,
            mean_distance: 2.0,
            bini: 0.2,
        }
    }

    #[test]
    fn test_write_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "run1", &[metric()]).unwrap();

        assert_eq!(path, dir.path().join("run1_BiNI_table_parameters.csv"));
        let text = std::fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "strain,sum_distances,#_Clusters,Length,Mean_distance,BiNI_Complete_BCGS"
        );
        assert_eq!(lines[1], "s1,4.0,2,10.0,2.0,0.2");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_empty_table_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "empty", &[]).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            text.trim_end(),
            "strain,sum_distances,#_Clusters,Length,Mean_distance,BiNI_Complete_BCGS"
        );
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut second = metric();
        second.strain = "s2".into();
        let path = write_table(dir.path(), "two", &[metric(), second]).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let headers = text.lines().filter(|l| l.starts_with("strain,")).count();
        assert_eq!(headers, 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_create_output_dir_refuses_existing() {
        let dir = tempfile::tempdir().unwrap();
        let outdir = create_output_dir(dir.path(), "run1").unwrap();

        assert!(outdir.is_dir());
        assert!(create_output_dir(dir.path(), "run1").is_err());
    }

    #[test]
    fn test_figure_path() {
        assert_eq!(
            figure_path("out", "run1"),
            Path::new("out").join("run1_BiNI_fig.png")
        );
    }
}
