use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use ndarray::{s, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ensure_len, Error, Result};
use crate::{Matrix, Vector};

#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub targets: Vector,
}

impl Dataset {
    pub fn new(features: Matrix, targets: Vector) -> Result<Self> {
        ensure_len("target rows", features.nrows(), targets.len())?;
        Ok(Self { features, targets })
    }

    /// Loads a CSV file with a header row; the last column is the target.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (_, data) = read_csv(path)?;
        if data.ncols() < 2 {
            return Err(Error::Parse {
                line: 1,
                message: "need at least one feature column and one target column".to_string(),
            });
        }

        let n_features = data.ncols() - 1;
        let features = data.slice(s![.., ..n_features]).to_owned();
        let targets = data.column(n_features).to_owned();
        Self::new(features, targets)
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Shuffles rows with a seeded generator and holds out `test_size` of them.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<(Self, Self)> {
        if test_size <= 0.0 || test_size >= 1.0 {
            return Err(Error::InvalidConfig(format!(
                "test_size must be between 0 and 1, got {test_size}"
            )));
        }

        let n_samples = self.n_samples();
        let n_test = (n_samples as f64 * test_size).round() as usize;
        if n_test == 0 || n_test >= n_samples {
            return Err(Error::InvalidConfig(format!(
                "test_size {test_size} leaves an empty split of {n_samples} samples"
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);
        let (test_idx, train_idx) = indices.split_at(n_test);

        let train = Self::new(
            self.features.select(Axis(0), train_idx),
            self.targets.select(Axis(0), train_idx),
        )?;
        let test = Self::new(
            self.features.select(Axis(0), test_idx),
            self.targets.select(Axis(0), test_idx),
        )?;
        debug!("split {n_samples} samples into {} train / {} test", train.n_samples(), test.n_samples());

        Ok((train, test))
    }
}

/// Reads a numeric CSV file, returning the header names and the data rows.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<(Vec<String>, Matrix)> {
    let reader = BufReader::new(File::open(path)?);

    let mut header = Vec::new();
    let mut values = Vec::new();
    let mut n_rows = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if i == 0 {
            header = line
                .split(',')
                .map(|name| name.trim().trim_matches('"').to_string())
                .collect();
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split(',')
            .map(|field| field.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|e| Error::Parse {
                line: i + 1,
                message: e.to_string(),
            })?;

        if row.len() != header.len() {
            return Err(Error::Parse {
                line: i + 1,
                message: format!("expected {} fields, found {}", header.len(), row.len()),
            });
        }

        values.extend(row);
        n_rows += 1;
    }

    if n_rows == 0 {
        return Err(Error::EmptyInput("csv data"));
    }

    let data = Matrix::from_shape_vec((n_rows, header.len()), values).map_err(|e| Error::Parse {
        line: 0,
        message: e.to_string(),
    })?;
    Ok((header, data))
}

/// Writes `data` as CSV with a quoted header row.
pub fn write_csv<P: AsRef<Path>>(path: P, header: &[&str], data: &Matrix) -> Result<()> {
    ensure_len("csv header columns", data.ncols(), header.len())?;

    let mut writer = BufWriter::new(File::create(path)?);
    let quoted: Vec<String> = header.iter().map(|name| format!("\"{name}\"")).collect();
    writeln!(writer, "{}", quoted.join(","))?;
    for row in data.rows() {
        let fields: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
        writeln!(writer, "{}", fields.join(","))?;
    }
    writer.flush()?;
    Ok(())
}
