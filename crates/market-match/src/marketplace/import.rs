use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::listing::{IntakeError, Requirement, RequirementRecord};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Intake { line: u64, source: IntakeError },
    DuplicateId { line: u64, id: u64 },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            ImportError::Intake { line, source } => write!(f, "line {}: {}", line, source),
            ImportError::DuplicateId { line, id } => {
                write!(f, "line {}: requirement id {} appears more than once", line, id)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Intake { source, .. } => Some(source),
            ImportError::DuplicateId { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads a catalog export (one requirement per CSV row) into typed requirements.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Requirement>, ImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Requirement>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut seen = HashSet::new();
        let mut requirements = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map(|position| position.line()).unwrap_or(0);
            let record: RequirementRecord = row.deserialize(Some(&headers))?;

            if !seen.insert(record.id) {
                return Err(ImportError::DuplicateId {
                    line,
                    id: record.id,
                });
            }

            let requirement = Requirement::try_from(record)
                .map_err(|source| ImportError::Intake { line, source })?;
            requirements.push(requirement);
        }

        tracing::debug!(count = requirements.len(), "catalog imported");
        Ok(requirements)
    }
}
