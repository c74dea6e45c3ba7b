use std::fs;
use std::path::Path;

use movielens_etl::PipelineError;
use movielens_etl::config::{InputPaths, PipelineConfig};
use movielens_etl::pipeline::{NoopObserver, run_pipeline};

const FIXTURE_DIR: &str = "tests/fixtures/ml-mini";

const EXPECTED_CSV: &str = "\
UserID,MovieID,Rating,Timestamp,Gender,Age,Occ_10,Occ_15,Occ_16,ZipPrefix,Title,Adventure,Animation,Children's,Comedy,Fantasy,Unknown
1,1,5,978300760,0,1,1,0,0,0,Toy Story (1995),0,1,1,1,0,0
1,2,3,978302109,0,1,1,0,0,0,Jumanji (1995),1,0,1,0,1,0
2,1,4,978298413,1,56,0,0,1,1,Toy Story (1995),0,1,1,1,0,0
3,2,4,978299026,1,25,0,1,0,0,Jumanji (1995),1,0,1,0,1,0
3,3,5,978300001,1,25,0,1,0,0,Café au lait (1993),0,0,0,0,0,1
";

fn write_inputs(dir: &Path, ratings: &str, movies: &str, users: &str) -> PipelineConfig {
    fs::write(dir.join("ratings.dat"), ratings).unwrap();
    fs::write(dir.join("movies.dat"), movies).unwrap();
    fs::write(dir.join("users.dat"), users).unwrap();
    PipelineConfig::from_data_dir(dir).with_output_path(dir.join("out.csv"))
}

#[test]
fn fixture_run_produces_expected_csv() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("processed_movielens_data.csv");
    let config = PipelineConfig::from_data_dir(FIXTURE_DIR).with_output_path(&output);

    let report = run_pipeline(&config, &NoopObserver).unwrap();

    assert_eq!((report.rows, report.columns), (5, 17));
    assert_eq!(fs::read_to_string(&output).unwrap(), EXPECTED_CSV);
    assert_eq!(report.file_size_bytes, fs::metadata(&output).unwrap().len());
    assert_eq!(report.preview.row_count(), 5);
}

#[test]
fn report_counts_missing_values_before_cleaning() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::from_data_dir(FIXTURE_DIR)
        .with_output_path(out_dir.path().join("out.csv"));

    let report = run_pipeline(&config, &NoopObserver).unwrap();
    let totals: Vec<(&str, usize)> = report
        .missing_before_clean
        .iter()
        .map(|m| (m.table, m.total()))
        .collect();
    assert_eq!(totals, vec![("ratings", 1), ("movies", 1), ("users", 1)]);
}

#[test]
fn single_record_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "1::1::5::978300760\n",
        "1::Toy Story (1995)::Animation|Children's|Comedy\n",
        "1::F::1::10::48067\n",
    );

    run_pipeline(&config, &NoopObserver).unwrap();

    let text = fs::read_to_string(&config.output_path).unwrap();
    assert_eq!(
        text,
        "UserID,MovieID,Rating,Timestamp,Gender,Age,Occ_10,ZipPrefix,Title,Animation,Children's,Comedy\n\
         1,1,5,978300760,0,1,1,0,Toy Story (1995),1,1,1\n"
    );
}

#[test]
fn rating_with_empty_timestamp_never_reaches_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "1::1::5::978300760\n1::2::3::\n",
        "1::Toy Story (1995)::Comedy\n2::Jumanji (1995)::Fantasy\n",
        "1::M::25::4::55117\n",
    );

    let report = run_pipeline(&config, &NoopObserver).unwrap();
    assert_eq!(report.rows, 1);

    let text = fs::read_to_string(&config.output_path).unwrap();
    assert!(!text.contains("Jumanji"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn identical_inputs_give_byte_identical_outputs() {
    let out_dir = tempfile::tempdir().unwrap();
    let first = out_dir.path().join("first.csv");
    let second = out_dir.path().join("second.csv");

    run_pipeline(
        &PipelineConfig::from_data_dir(FIXTURE_DIR).with_output_path(&first),
        &NoopObserver,
    )
    .unwrap();
    run_pipeline(
        &PipelineConfig::from_data_dir(FIXTURE_DIR).with_output_path(&second),
        &NoopObserver,
    )
    .unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn missing_input_fails_fast_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ratings.dat"), "1::1::5::978300760\n").unwrap();
    fs::write(dir.path().join("users.dat"), "1::F::1::10::48067\n").unwrap();
    let config = PipelineConfig::from_data_dir(dir.path()).with_output_path(dir.path().join("out.csv"));

    let err = run_pipeline(&config, &NoopObserver).unwrap_err();

    let expected = InputPaths::in_dir(dir.path()).movies;
    match &err {
        PipelineError::MissingInputFile { path } => assert_eq!(path, &expected),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("movies.dat"));
    assert!(!config.output_path.exists());
}

#[test]
fn malformed_record_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "1::1::5::978300760\nnot-a-user::1::5::978300760\n",
        "1::Toy Story (1995)::Comedy\n",
        "1::F::1::10::48067\n",
    );

    let err = run_pipeline(&config, &NoopObserver).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ParseError { row: 2, ref column, .. } if column == "UserID"
    ));
    assert!(!config.output_path.exists());
}

#[test]
fn no_matching_ratings_is_an_error_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "7::1::5::978300760\n",
        "1::Toy Story (1995)::Comedy\n",
        "1::F::1::10::48067\n",
    );

    let err = run_pipeline(&config, &NoopObserver).unwrap_err();
    assert!(matches!(err, PipelineError::EmptyResult { .. }));
    assert!(!config.output_path.exists());
}

#[test]
fn failed_run_keeps_previous_output_intact() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_inputs(
        dir.path(),
        "1::1::5::978300760\n",
        "1::Toy Story (1995)::Comedy\n",
        "1::F::1::10::48067\n",
    );
    run_pipeline(&config, &NoopObserver).unwrap();
    let before = fs::read(&config.output_path).unwrap();

    fs::write(dir.path().join("users.dat"), "1::F::1\n").unwrap();
    assert!(run_pipeline(&config, &NoopObserver).is_err());

    assert_eq!(fs::read(&config.output_path).unwrap(), before);
}
