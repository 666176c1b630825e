//! Point tables as CSV (`x,y` columns) via polars.

use anyhow::{ensure, Context, Result};
use linkpart::Vec2;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Read every row of an `x,y` CSV as points.
pub fn read_points(path: &Path) -> Result<Vec<Vec2<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y columns from {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "points table");

    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => out.push(Vec2::new(x, y)),
            _ => anyhow::bail!("row {row} of {} has a missing or non-finite coordinate", path.display()),
        }
    }
    Ok(out)
}

/// Write points as an `x,y` CSV with a header row.
pub fn write_points(path: &Path, points: &[Vec2<f64>]) -> Result<()> {
    ensure!(!points.is_empty(), "refusing to write an empty point table");
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn written_points_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("points.csv");
        let pts = vec![Vec2::new(0.25, -1.5), Vec2::new(2.0, 3.125)];
        write_points(&path, &pts).unwrap();
        assert_eq!(read_points(&path).unwrap(), pts);
    }

    #[test]
    fn integer_columns_are_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ints.csv");
        std::fs::write(&path, "x,y\n0,2\n-1,3\n").unwrap();
        let pts = read_points(&path).unwrap();
        assert_eq!(pts, vec![Vec2::new(0.0, 2.0), Vec2::new(-1.0, 3.0)]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "x,z\n0,2\n").unwrap();
        assert!(read_points(&path).is_err());
    }
}
