use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading a source spreadsheet. All of them are fatal: the
/// pipeline never starts on a table it could not fully load.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("not a valid xlsx archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("malformed xml in {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },
    #[error("{path} contains no worksheet")]
    NoWorksheet { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
