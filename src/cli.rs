use anyhow::{anyhow, bail};
use clap::Parser;
use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

/// Biosynthetic novelty index (BiNI) per strain from BGC distances and assembly lengths.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    #[arg(value_parser = csv_path, help = "BGC distance table with strain, distance and completeness columns")]
    pub distance_table: PathBuf,

    #[arg(value_parser = csv_path, help = "Assembly length table with strain and length columns")]
    pub length_table: PathBuf,

    #[arg(short, long, help = "Output folder name. Asked for on stdin when omitted")]
    pub output: Option<String>,

    #[arg(
        short = 'd',
        long,
        default_value = ".",
        help = "Directory in which the output folder is created"
    )]
    pub outdir: PathBuf,

    #[arg(long, help = "Skip the BiNI figure")]
    pub no_plot: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

fn csv_path(s: &str) -> Result<PathBuf, String> {
    if s.to_lowercase().ends_with(".csv") {
        Ok(PathBuf::from(s))
    } else {
        Err(format!("{} <not a csv file>", s))
    }
}

fn read_name<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> anyhow::Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow!("No output name given"));
    }
    let name = line.trim().to_string();
    if name.is_empty() {
        bail!("Output name must not be empty");
    }
    Ok(name)
}

/// Asks for an output folder name until one is given that does not exist under `parent`.
pub fn prompt_output_name<R, W>(parent: &Path, input: &mut R, out: &mut W) -> anyhow::Result<String>
where
    R: BufRead,
    W: Write,
{
    let mut name = read_name(input, out, "Provide output file name: ")?;
    while parent.join(&name).exists() {
        name = read_name(
            input,
            out,
            "name already exist, please provide another output file name: ",
        )?;
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positionals() {
        let args = Args::try_parse_from(["bini", "bigfam.csv", "lengths.CSV", "-o", "run1"]).unwrap();

        assert_eq!(args.distance_table, PathBuf::from("bigfam.csv"));
        assert_eq!(args.length_table, PathBuf::from("lengths.CSV"));
        assert_eq!(args.output.as_deref(), Some("run1"));
        assert_eq!(args.outdir, PathBuf::from("."));
        assert!(!args.no_plot);
    }

    #[test]
    fn test_missing_argument_is_error() {
        assert!(Args::try_parse_from(["bini", "bigfam.csv"]).is_err());
    }

    #[test]
    fn test_wrong_extension_is_error() {
        let err = Args::try_parse_from(["bini", "bigfam.tsv", "lengths.csv"]).unwrap_err();
        assert!(err.to_string().contains("bigfam.tsv <not a csv file>"));

        assert!(Args::try_parse_from(["bini", "bigfam.csv", "lengths.txt"]).is_err());
    }

    #[test]
    fn test_prompt_reasks_for_existing_folder() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();

        let mut input = "taken\nfree\n".as_bytes();
        let mut out = Vec::new();
        let name = prompt_output_name(dir.path(), &mut input, &mut out).unwrap();

        assert_eq!(name, "free");
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("name already exist"));
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut input = "".as_bytes();
        let mut out = Vec::new();

        assert!(prompt_output_name(dir.path(), &mut input, &mut out).is_err());
    }

    #[test]
    fn test_prompt_blank_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut input = "  \n".as_bytes();
        let mut out = Vec::new();

        assert!(prompt_output_name(dir.path(), &mut input, &mut out).is_err());
    }
}
