//! CSV decoding of staged dataset files into an index.

use std::io::Read;

use camino::Utf8Path;
use log::{debug, info, warn};
use tablescout_core::{DatasetIndex, IndexOptions, RawRestaurantRow};

use crate::DatasetError;
use crate::fs::open_file;

/// Rows decoded from a CSV source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowBatch {
    /// Rows that decoded cleanly.
    pub rows: Vec<RawRestaurantRow>,
    /// Rows skipped because their shape could not be decoded.
    pub malformed: usize,
}

/// Row accounting for one dataset load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows encountered, malformed ones included.
    pub rows_read: usize,
    /// Rows that could not be decoded.
    pub malformed: usize,
    /// Decoded rows dropped during normalisation.
    pub skipped: usize,
    /// Records that reached the index.
    pub indexed: usize,
}

/// An index together with the accounting of how it was built.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// The built index.
    pub index: DatasetIndex,
    /// Row accounting.
    pub report: LoadReport,
}

/// Decode raw rows from CSV with a header row.
///
/// Rows whose field count differs from the header, or whose text is not
/// valid UTF-8, are counted in [`RowBatch::malformed`] and skipped. Only I/O
/// failures abort decoding.
///
/// # Errors
/// Returns the underlying [`csv::Error`] when reading from `reader` fails.
///
/// # Examples
/// ```
/// use tablescout_data::read_rows;
///
/// let csv = "name,listed_in(city),rate\nJalsa,Banashankari,4.1/5\n";
/// let batch = read_rows(csv.as_bytes()).expect("in-memory read");
/// assert_eq!(batch.rows.len(), 1);
/// assert_eq!(batch.rows[0].city.as_deref(), Some("Banashankari"));
/// ```
pub fn read_rows<R: Read>(reader: R) -> Result<RowBatch, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
    let mut batch = RowBatch::default();
    for result in csv_reader.deserialize::<RawRestaurantRow>() {
        match result {
            Ok(row) => batch.rows.push(row),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err),
            Err(err) => {
                debug!("Skipping malformed dataset row: {err}");
                batch.malformed += 1;
            }
        }
    }
    Ok(batch)
}

/// Decode `reader` and build an index from its rows.
///
/// # Errors
/// Returns the underlying [`csv::Error`] when reading fails.
pub fn load_from_reader<R: Read>(
    reader: R,
    options: IndexOptions,
) -> Result<LoadedDataset, csv::Error> {
    let batch = read_rows(reader)?;
    let rows_read = batch.rows.len() + batch.malformed;
    if batch.malformed > 0 {
        warn!("Skipped {} malformed dataset rows", batch.malformed);
    }
    let index = DatasetIndex::build(&batch.rows, options);
    let built = index.report();
    Ok(LoadedDataset {
        report: LoadReport {
            rows_read,
            malformed: batch.malformed,
            skipped: built.skipped,
            indexed: built.accepted,
        },
        index,
    })
}

/// Load and index the CSV dataset staged at `path`.
///
/// # Errors
/// Returns [`DatasetError::Open`] when the file cannot be opened and
/// [`DatasetError::Parse`] when reading it fails.
pub fn load_dataset(path: &Utf8Path, options: IndexOptions) -> Result<LoadedDataset, DatasetError> {
    let file = open_file(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = load_from_reader(file, options).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Loaded {} restaurants from {path} ({} rows read)",
        loaded.report.indexed, loaded.report.rows_read
    );
    Ok(loaded)
}
