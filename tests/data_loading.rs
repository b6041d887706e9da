use state_scatter::data::{DataLoader, Field, LoaderError, ParsePolicy};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "id,state,abbr,poverty,povertyMoe,age,ageMoe,income,incomeMoe,healthcare,obesity,smokes";

fn write_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file should be creatable");
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn loads_records_and_truncates_decimals() {
    let file = write_csv(&[
        "1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,33.5,21.1",
        "2,Alaska,AK,11.2,0.9,33.3,0.3,71583,1784,15,29.7,19.9",
    ]);

    let outcome = DataLoader::default().load_csv(file.path()).unwrap();
    let ds = outcome.dataset;

    assert!(outcome.skipped.is_empty());
    assert_eq!(ds.len(), 2);

    let al = ds.get(0).unwrap();
    assert_eq!(al.state(), "Alabama");
    assert_eq!(al.abbr(), "AL");
    assert_eq!(al.value(Field::Poverty), 19);
    assert_eq!(al.value(Field::Age), 38);
    assert_eq!(al.value(Field::Income), 42830);
    assert_eq!(al.value(Field::Healthcare), 13);
    assert_eq!(al.value(Field::Obesity), 33);
    assert_eq!(al.value(Field::Smokes), 21);

    assert_eq!(ds.get(1).unwrap().value(Field::Healthcare), 15);
}

#[test]
fn skip_policy_drops_bad_rows_and_reports_them() {
    let file = write_csv(&[
        "1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,33.5,21.1",
        "2,Alaska,AK,n/a,0.9,33.3,0.3,71583,1784,15,29.7,19.9",
        "4,Arizona,AZ,18.2,0.4,36.9,0.1,50068,267,14.4,28.9,",
    ]);

    let outcome = DataLoader::new(ParsePolicy::Skip)
        .load_csv(file.path())
        .unwrap();

    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(outcome.skipped.len(), 2);

    assert_eq!(outcome.skipped[0].line, 3);
    assert_eq!(outcome.skipped[0].column, "poverty");
    assert_eq!(outcome.skipped[0].value, "n/a");

    assert_eq!(outcome.skipped[1].line, 4);
    assert_eq!(outcome.skipped[1].column, "smokes");
    assert_eq!(outcome.skipped[1].value, "");
}

#[test]
fn fail_policy_stops_at_first_bad_row() {
    let file = write_csv(&[
        "1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,33.5,21.1",
        "2,Alaska,AK,11.2,0.9,old,0.3,71583,1784,15,29.7,19.9",
    ]);

    let err = DataLoader::new(ParsePolicy::Fail)
        .load_csv(file.path())
        .unwrap_err();

    match err {
        LoaderError::FieldParse(e) => {
            assert_eq!(e.line, 3);
            assert_eq!(e.column, "age");
            assert_eq!(e.value, "old");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_required_column_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "state,abbr,poverty,healthcare,age,smokes,income").unwrap();
    writeln!(file, "Alabama,AL,19,13,38,21,42830").unwrap();
    file.flush().unwrap();

    let err = DataLoader::default().load_csv(file.path()).unwrap_err();
    assert!(matches!(err, LoaderError::MissingColumn("obesity")));
}

#[test]
fn header_only_file_has_no_data() {
    let file = write_csv(&[]);
    let err = DataLoader::default().load_csv(file.path()).unwrap_err();
    assert!(matches!(err, LoaderError::NoData));
}

#[test]
fn all_rows_skipped_has_no_data() {
    let file = write_csv(&["2,Alaska,AK,x,0.9,33.3,0.3,71583,1784,15,29.7,19.9"]);
    let err = DataLoader::default().load_csv(file.path()).unwrap_err();
    assert!(matches!(err, LoaderError::NoData));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    let err = DataLoader::default().load_csv(&path).unwrap_err();
    assert!(matches!(err, LoaderError::NotFound(p) if p == path));
}
