use crate::utils::{CsvEnumeratorError, Result};
use csv::StringRecord;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Forward-only handle over a delimited text file, read through exactly once.
pub struct CsvSource {
    reader: csv::Reader<Box<dyn Read + Send>>,
    path: Option<PathBuf>,
    has_headers: bool,
}

impl CsvSource {
    pub fn from_path(path: impl Into<PathBuf>, has_headers: bool) -> Result<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(CsvEnumeratorError::InvalidArgument(format!(
                "not a readable CSV file: {}",
                path.display()
            )));
        }

        let file = std::fs::File::open(&path)?;
        let reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .from_reader(Box::new(file) as Box<dyn Read + Send>);

        Ok(Self {
            reader,
            path: Some(path),
            has_headers,
        })
    }

    /// Wraps a path-less stream; no row-count estimate will be available.
    pub fn from_reader(rdr: impl Read + Send + 'static, has_headers: bool) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(has_headers)
            .from_reader(Box::new(rdr) as Box<dyn Read + Send>);

        Self {
            reader,
            path: None,
            has_headers,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    pub(crate) fn read_headers(&mut self) -> Result<Option<StringRecord>> {
        if !self.has_headers {
            return Ok(None);
        }
        let headers = self.reader.headers()?.clone();
        Ok(Some(headers))
    }

    pub(crate) fn into_records(self) -> csv::StringRecordsIntoIter<Box<dyn Read + Send>> {
        self.reader.into_records()
    }
}
