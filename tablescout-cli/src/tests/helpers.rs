//! Test helpers: staged datasets and stub dataset sources.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tablescout_data::{DatasetSource, StubSource};
use tempfile::TempDir;

use crate::CliError;
use crate::dataset::SourceFactory;

pub(super) const SAMPLE_CSV: &str = "\
name,location,cuisines,rate,votes,approx_cost(for two people),listed_in(city)
Jalsa,Banashankari,\"North Indian, Chinese\",4.1/5,775,800,Banashankari
Onesta,Banashankari,\"Pizza, Cafe\",4.6/5,2556,600,Banashankari
Fresh Place,Banashankari,South Indian,NEW,10,400,Banashankari
Corner House,Koramangala,Desserts,4.5/5,900,\"1,200\",Koramangala 5th Block
";

/// A temporary directory holding a staged dataset.
pub(super) struct StagedDataset {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl StagedDataset {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let staged = Self { _dir: dir, root };
        fs::create_dir_all(staged.root.join("data")).expect("create data dir");
        fs::write(staged.path(), SAMPLE_CSV).expect("write dataset");
        staged
    }

    /// A directory with nothing staged yet.
    pub(super) fn empty() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self) -> Utf8PathBuf {
        self.root.join("data/zomato.csv")
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Factory whose sources serve fixed bytes.
pub(super) struct StubFactory {
    body: Option<Vec<u8>>,
}

impl StubFactory {
    /// Sources serve `body`.
    pub(super) fn serving(body: &str) -> Self {
        Self {
            body: Some(body.as_bytes().to_vec()),
        }
    }

    /// Sources fail, as if offline; use when the dataset is already staged.
    pub(super) fn offline() -> Self {
        Self { body: None }
    }
}

impl SourceFactory for StubFactory {
    fn build(&self, _url: &str) -> Result<Box<dyn DatasetSource>, CliError> {
        Ok(match &self.body {
            Some(body) => Box::new(StubSource::with_body(body.clone())),
            None => Box::new(StubSource::failing(503)),
        })
    }
}

pub(super) fn output_of(
    run: impl FnOnce(&mut Vec<u8>) -> Result<(), CliError>,
) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(&mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}
