//! Table Loading
//!
//! Reads a delimited phenotypic table with a header row. The schema is
//! validated before any row is parsed, so a table without the core columns
//! fails fast with [`DataError::ColumnNotFound`].

use crate::dataset::{Dataset, Subject};
use crate::error::{DataError, Result};
use crate::schema::{Schema, SchemaConfig};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Load a table from a file using the default column names
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    load_with(path, &SchemaConfig::default())
}

/// Load a table from a file using the given column names and parsing rules
pub fn load_with(path: impl AsRef<Path>, config: &SchemaConfig) -> Result<Dataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = from_reader(std::io::BufReader::new(file), config)?;
    tracing::debug!(
        path = %path.display(),
        subjects = dataset.len(),
        columns = dataset.schema().columns().len(),
        "loaded table"
    );
    Ok(dataset)
}

/// Parse a table from any reader
pub fn from_reader<R: Read>(reader: R, config: &SchemaConfig) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let schema = Schema::new(headers, config.clone())?;

    let id = schema.position(&config.id_column)?;
    let age = schema.position(&config.age_column)?;
    let mean_fd = schema.position(&config.mean_fd_column)?;
    let perc_fd = schema.position(&config.perc_fd_column)?;

    let mut subjects = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(String::from).collect();

        subjects.push(Subject {
            row,
            id: cells[id].trim().to_string(),
            age_at_scan: schema.parse_cell(row, &config.age_column, &cells[age])?,
            mean_fd: schema.parse_cell(row, &config.mean_fd_column, &cells[mean_fd])?,
            perc_fd: schema.parse_cell(row, &config.perc_fd_column, &cells[perc_fd])?,
            age_years: None,
            cells,
        });
    }

    Ok(Dataset::new(Arc::new(schema), subjects))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic() {
        let input = "FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd\n\
                     s1,10.4,0.12,3.5\n\
                     s2,,0.30,NA\n";
        let df = from_reader(input.as_bytes(), &SchemaConfig::default()).unwrap();

        assert_eq!(df.len(), 2);
        let s1 = &df.subjects()[0];
        assert_eq!(s1.id, "s1");
        assert_eq!(s1.age_at_scan, Some(10.4));
        assert_eq!(s1.perc_fd, Some(3.5));
        assert_eq!(s1.age_years, None);

        let s2 = &df.subjects()[1];
        assert_eq!(s2.age_at_scan, None);
        assert_eq!(s2.perc_fd, None);
        assert_eq!(s2.row, 1);
    }

    #[test]
    fn test_load_custom_delimiter_and_names() {
        let config = SchemaConfig {
            id_column: "subject".to_string(),
            delimiter: '\t',
            ..Default::default()
        };
        let input = "subject\tAGE_AT_SCAN\tfunc_mean_fd\tfunc_perc_fd\nx\t8\t0.1\t2\n";
        let df = from_reader(input.as_bytes(), &config).unwrap();
        assert_eq!(df.subjects()[0].id, "x");
    }

    #[test]
    fn test_load_ragged_row_is_malformed() {
        let input = "FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd\ns1,10,0.1\n";
        let result = from_reader(input.as_bytes(), &SchemaConfig::default());
        assert!(matches!(result, Err(DataError::Csv(_))));
    }

    #[test]
    fn test_load_non_numeric_core_cell() {
        let input = "FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd\ns1,ten,0.1,2\n";
        let result = from_reader(input.as_bytes(), &SchemaConfig::default());
        assert!(matches!(
            result,
            Err(DataError::Parse { ref column, .. }) if column == "AGE_AT_SCAN"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load("/definitely/not/here/phenotypic.csv");
        assert!(matches!(result, Err(DataError::Io { .. })));
    }
}
