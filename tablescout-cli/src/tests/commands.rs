//! Command runs against staged datasets and stub sources.

use super::helpers::{SAMPLE_CSV, StagedDataset, StubFactory, output_of};
use super::*;
use crate::cities::run_cities_with;
use crate::fetch::{run_clear_cache_with, run_fetch_with};
use crate::recommend::run_recommend_with;
use rstest::{fixture, rstest};
use tablescout_data::DatasetError;

#[fixture]
fn staged() -> StagedDataset {
    StagedDataset::new()
}

fn recommend_args(staged: &StagedDataset, city: &str, price: &str) -> RecommendArgs {
    RecommendArgs {
        city: Some(city.to_owned()),
        price: Some(price.to_owned()),
        dataset: Some(staged.path()),
        ..RecommendArgs::default()
    }
}

#[rstest]
fn recommends_from_staged_dataset(staged: StagedDataset) {
    let args = recommend_args(&staged, "banashankari", "800");
    let output = output_of(|out| run_recommend_with(args, &StubFactory::offline(), out))
        .expect("recommend succeeds");
    let onesta = output.find("Onesta").expect("Onesta listed");
    let jalsa = output.find("Jalsa").expect("Jalsa listed");
    assert!(onesta < jalsa, "higher score ranks first:\n{output}");
    assert!(!output.contains("Corner House"));
}

#[rstest]
fn recommends_as_json(staged: StagedDataset) {
    let mut args = recommend_args(&staged, "Banashankari", "500");
    args.format = Some(OutputFormat::Json);
    let output = output_of(|out| run_recommend_with(args, &StubFactory::offline(), out))
        .expect("recommend succeeds");
    let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    let rows = parsed.as_array().expect("array of results");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Fresh Place");
    assert!(rows[0]["rating"].is_null());
}

#[rstest]
fn empty_result_is_explained(staged: StagedDataset) {
    let args = recommend_args(&staged, "Atlantis", "800");
    let output = output_of(|out| run_recommend_with(args, &StubFactory::offline(), out))
        .expect("recommend succeeds");
    assert!(
        output.contains("No restaurants found in Atlantis"),
        "{output}"
    );
}

#[rstest]
fn strict_validation_rejects_unknown_city(staged: StagedDataset) {
    let mut args = recommend_args(&staged, "Koramangala", "2000");
    args.validate_city = true;
    let err = output_of(|out| run_recommend_with(args, &StubFactory::offline(), out))
        .expect_err("partial city is not an exact match");
    match err {
        CliError::InvalidInput(InputError::UnknownCity { city, choices }) => {
            assert_eq!(city, "Koramangala");
            assert_eq!(choices, "banashankari, koramangala 5th block");
        }
        other => panic!("expected UnknownCity, found {other:?}"),
    }
}

#[rstest]
fn downloads_missing_dataset_before_recommending() {
    let empty = StagedDataset::empty();
    let args = RecommendArgs {
        city: Some("Koramangala".to_owned()),
        price: Some("1500".to_owned()),
        dataset: Some(empty.path()),
        ..RecommendArgs::default()
    };
    let factory = StubFactory::serving(SAMPLE_CSV);
    let output = output_of(|out| run_recommend_with(args, &factory, out))
        .expect("recommend succeeds");
    assert!(output.contains("Corner House"), "{output}");
    assert!(empty.path().exists());
}

#[rstest]
fn failed_download_surfaces_dataset_error() {
    let empty = StagedDataset::empty();
    let args = RecommendArgs {
        city: Some("BTM".to_owned()),
        price: Some("800".to_owned()),
        dataset: Some(empty.path()),
        ..RecommendArgs::default()
    };
    let err = output_of(|out| run_recommend_with(args, &StubFactory::offline(), out))
        .expect_err("download fails");
    assert!(
        matches!(err, CliError::Dataset(DatasetError::Download { .. })),
        "unexpected error {err:?}"
    );
    assert!(!empty.path().exists());
}

#[rstest]
fn lists_cities_alphabetically(staged: StagedDataset) {
    let args = CitiesArgs {
        dataset: Some(staged.path()),
        format: Some(OutputFormat::Json),
        ..CitiesArgs::default()
    };
    let output = output_of(|out| run_cities_with(&args, &StubFactory::offline(), out))
        .expect("cities succeeds");
    let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(parsed[0]["name"], "Banashankari");
    assert_eq!(parsed[0]["restaurants"], 3);
    assert_eq!(parsed[1]["name"], "Koramangala 5th Block");
}

#[rstest]
fn fetch_downloads_then_reuses() {
    let empty = StagedDataset::empty();
    let fetch = |overwrite: bool| FetchArgs {
        dataset: Some(empty.path()),
        overwrite,
        ..FetchArgs::default()
    };
    let factory = StubFactory::serving(SAMPLE_CSV);

    let run = |overwrite: bool| {
        output_of(|out| run_fetch_with(&fetch(overwrite), &factory, out)).expect("fetch succeeds")
    };

    let first = run(false);
    let downloaded = format!("Downloaded {} bytes", SAMPLE_CSV.len());
    assert!(first.starts_with(&downloaded), "{first}");

    let second = run(false);
    assert!(second.contains("already cached"), "{second}");
    assert!(second.contains("--overwrite"));

    let third = run(true);
    assert!(third.starts_with("Downloaded"), "{third}");
}

#[rstest]
fn clear_cache_reports_both_outcomes(staged: StagedDataset) {
    let clear = || ClearCacheArgs {
        dataset: Some(staged.path()),
    };
    let removed = output_of(|out| run_clear_cache_with(&clear(), out)).expect("clear succeeds");
    assert_eq!(
        removed.trim(),
        format!("Removed cached dataset at {}.", staged.path())
    );
    assert!(!staged.path().exists());
    assert!(staged.root().exists());

    let absent = output_of(|out| run_clear_cache_with(&clear(), out)).expect("clear succeeds");
    assert_eq!(
        absent.trim(),
        format!("No cached dataset at {}.", staged.path())
    );
}
