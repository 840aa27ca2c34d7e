//! Subject Records and Datasets

use crate::error::{DataError, Result};
use crate::schema::{AGE_YEARS_COLUMN, Schema};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// One participant row
///
/// Core fields are parsed when the table is loaded; the raw cells of every
/// source column are kept for on-demand numeric lookups and for writing the
/// table back out.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    /// Zero-based record index in the source table
    pub row: usize,
    /// Participant / file identifier
    pub id: String,
    /// Age at scan in (fractional) years
    pub age_at_scan: Option<f64>,
    /// Mean framewise displacement
    pub mean_fd: Option<f64>,
    /// Percentage of high-motion frames
    pub perc_fd: Option<f64>,
    /// Whole years of age, set by `clean`
    pub age_years: Option<i32>,
    pub(crate) cells: Vec<String>,
}

/// Ordered collection of subjects sharing one schema
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Arc<Schema>,
    subjects: Vec<Subject>,
    has_age_years: bool,
}

impl Dataset {
    pub(crate) fn new(schema: Arc<Schema>, subjects: Vec<Subject>) -> Self {
        Self {
            schema,
            subjects,
            has_age_years: false,
        }
    }

    /// New dataset with the same schema and derived columns but other rows
    pub(crate) fn with_subjects(&self, subjects: Vec<Subject>) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            subjects,
            has_age_years: self.has_age_years,
        }
    }

    pub(crate) fn with_age_years(mut self) -> Self {
        self.has_age_years = true;
        self
    }

    /// Column layout of the source table
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Subjects in order
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Iterate over subjects
    pub fn iter(&self) -> std::slice::Iter<'_, Subject> {
        self.subjects.iter()
    }

    /// Number of subjects
    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    /// Whether there are no subjects
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Whether the derived `AGE_YRS` column is available
    pub fn has_age_years(&self) -> bool {
        self.has_age_years
    }

    /// Whether a column can be looked up by name
    pub fn has_column(&self, name: &str) -> bool {
        (self.has_age_years && name == AGE_YEARS_COLUMN) || self.schema.contains(name)
    }

    /// All column names, with `AGE_YRS` appended once it has been derived
    pub fn column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schema.columns().iter().map(String::as_str).collect();
        if self.has_age_years && !self.schema.contains(AGE_YEARS_COLUMN) {
            names.push(AGE_YEARS_COLUMN);
        }
        names
    }

    /// Values of a numeric column, one entry per subject, `None` for missing cells
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        if name == AGE_YEARS_COLUMN && self.has_age_years {
            return Ok(self
                .subjects
                .iter()
                .map(|s| s.age_years.map(f64::from))
                .collect());
        }

        let config = self.schema.config();
        if name == config.age_column {
            return Ok(self.subjects.iter().map(|s| s.age_at_scan).collect());
        }
        if name == config.mean_fd_column {
            return Ok(self.subjects.iter().map(|s| s.mean_fd).collect());
        }
        if name == config.perc_fd_column {
            return Ok(self.subjects.iter().map(|s| s.perc_fd).collect());
        }

        let position = self.schema.position(name)?;
        self.subjects
            .iter()
            .map(|s| self.schema.parse_cell(s.row, name, &s.cells[position]))
            .collect()
    }

    /// Non-missing values of a numeric column
    pub fn column_values(&self, name: &str) -> Result<Vec<f64>> {
        Ok(self.numeric_column(name)?.into_iter().flatten().collect())
    }

    /// Write the table, including derived columns, as delimited text
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<()> {
        let delimiter = self.schema.config().delimiter_byte()?;
        let mut out = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        let age_position = self.schema.position(AGE_YEARS_COLUMN).ok();
        let append_age = self.has_age_years && age_position.is_none();

        let mut header: Vec<&str> = self.schema.columns().iter().map(String::as_str).collect();
        if append_age {
            header.push(AGE_YEARS_COLUMN);
        }
        out.write_record(&header)?;

        for subject in &self.subjects {
            let years = subject.age_years.map(|y| y.to_string()).unwrap_or_default();
            let mut record: Vec<&str> = subject.cells.iter().map(String::as_str).collect();
            if self.has_age_years {
                match age_position {
                    Some(i) => record[i] = &years,
                    None => record.push(&years),
                }
            }
            out.write_record(&record)?;
        }

        out.flush().map_err(|e| DataError::Csv(e.into()))?;
        Ok(())
    }

    /// Write the table to a file
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.to_csv_writer(std::io::BufWriter::new(file))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Subject;
    type IntoIter = std::slice::Iter<'a, Subject>;

    fn into_iter(self) -> Self::IntoIter {
        self.subjects.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::{SchemaConfig, clean, from_reader};

    const TABLE: &str = "\
FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd,SITE_ID,lh_thick
a,7.5,0.10,5.0,NYU,2.5
b,12.2,0.20,,NYU,
c,9.9,0.05,1.0,UCLA,3.0
";

    #[test]
    fn test_numeric_column_core_and_extra() {
        let df = from_reader(TABLE.as_bytes(), &SchemaConfig::default()).unwrap();

        assert_eq!(
            df.numeric_column("func_perc_fd").unwrap(),
            vec![Some(5.0), None, Some(1.0)]
        );
        assert_eq!(
            df.numeric_column("lh_thick").unwrap(),
            vec![Some(2.5), None, Some(3.0)]
        );
        assert_eq!(df.column_values("lh_thick").unwrap(), vec![2.5, 3.0]);
    }

    #[test]
    fn test_numeric_column_errors() {
        let df = from_reader(TABLE.as_bytes(), &SchemaConfig::default()).unwrap();

        assert!(matches!(
            df.numeric_column("missing"),
            Err(crate::DataError::ColumnNotFound(_))
        ));
        assert!(matches!(
            df.numeric_column("SITE_ID"),
            Err(crate::DataError::Parse { .. })
        ));
        // AGE_YRS only exists after cleaning
        assert!(df.numeric_column("AGE_YRS").is_err());
        assert!(!df.has_column("AGE_YRS"));
        assert!(df.has_column("SITE_ID") && !df.has_column("missing"));
        assert!(clean(&df).has_column("AGE_YRS"));
    }

    #[test]
    fn test_write_csv_appends_age_years() {
        let df = from_reader(TABLE.as_bytes(), &SchemaConfig::default()).unwrap();
        let cleaned = clean(&df);
        assert!(cleaned.column_names().contains(&"AGE_YRS"));

        let mut buf = Vec::new();
        cleaned.to_csv_writer(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "FILE_ID,AGE_AT_SCAN,func_mean_fd,func_perc_fd,SITE_ID,lh_thick,AGE_YRS"
        );
        assert_eq!(lines.next().unwrap(), "a,7.5,0.10,5.0,NYU,2.5,7");
        assert_eq!(lines.next().unwrap(), "c,9.9,0.05,1.0,UCLA,3.0,9");
        assert!(lines.next().is_none());
    }
}
