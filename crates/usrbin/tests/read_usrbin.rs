//! Integration tests for reading USRBIN listings

use ftools_usrbin::{
    read_usrbin, read_usrbin_files, read_usrbin_target, write_ascii, write_json, Axis, Document,
    Error, GridRecord,
};
use rstest::{fixture, rstest};

#[fixture]
fn vault() -> Document {
    read_usrbin("./data/vault_dose.bnn.lis").unwrap()
}

#[fixture]
fn single() -> Document {
    read_usrbin("./data/single.bnn.lis").unwrap()
}

#[rstest]
fn records_in_file_order(vault: Document) {
    assert_eq!(vault.len(), 2);
    assert_eq!(vault.records()[0].value(0, 0, 0), Some(0.1));
    assert_eq!(vault.records()[1].value(0, 0, 0), Some(1.0e3));
}

#[rstest]
fn adjacent_records_share_binning(vault: Document) {
    let expected = [
        Axis::new(-300.0, 300.0, 3),
        Axis::new(-100.0, 100.0, 2),
        Axis::new(0.0, 400.0, 2),
    ];
    for record in &vault {
        assert_eq!(record.axes(), &expected);
        assert_eq!(record.shape(), (3, 2, 2));
    }
}

#[rstest]
fn shape_matches_values(vault: Document) {
    for record in vault {
        let (nx, ny, nz) = record.shape();
        assert_eq!(record.values().len(), nx * ny * nz);
        assert_eq!(record.errors().map(|e| e.len()), Some(record.n_cells()));
    }
}

#[rstest]
#[case((0, 0, 0), 0.1, 12.0)] // first value
#[case((1, 0, 0), 0.2, 11.5)] // i varies fastest
#[case((0, 1, 0), 0.4, 10.5)] // then j
#[case((0, 0, 1), 0.7, 9.0)] // then k
#[case((2, 1, 1), 1.2, 6.5)] // last value
fn linear_index_convention(
    vault: Document,
    #[case] cell: (usize, usize, usize),
    #[case] value: f64,
    #[case] error: f64,
) {
    let record = vault.get_record(0).unwrap();
    let (i, j, k) = cell;
    assert_eq!(record.value(i, j, k), Some(value));
    assert_eq!(record.error(i, j, k), Some(error));
    assert_eq!(record.to_nested()[i][j][k], value);
}

#[rstest]
fn single_block_without_errors(single: Document) {
    assert_eq!(single.len(), 1);

    let record = single.get_record(0).unwrap();
    assert_eq!(record.shape(), (2, 2, 1));
    assert_eq!(record.value(0, 0, 0), Some(1.0));
    assert_eq!(record.value(1, 0, 0), Some(2.0));
    assert_eq!(record.value(0, 1, 0), Some(3.0));
    assert_eq!(record.value(1, 1, 0), Some(4.0));
    assert!(record.errors().is_none());
}

#[rstest]
#[case(0, 0.1)]
#[case(1, 1.0e3)]
fn target_record(#[case] index: usize, #[case] first: f64) {
    let record: GridRecord = read_usrbin_target("./data/vault_dose.bnn.lis", index).unwrap();
    assert_eq!(record.values()[0], first);
}

#[test]
fn missing_target_record() {
    let result = read_usrbin_target("./data/vault_dose.bnn.lis", 2);
    assert!(matches!(result, Err(Error::RecordNotFound(2))));
}

#[test]
fn truncated_record_is_rejected() {
    let err = read_usrbin("./data/truncated.bnn.lis").unwrap_err();
    assert!(matches!(
        err,
        Error::GridSizeMismatch {
            block: 1,
            expected: 12,
            found: 11
        }
    ));
}

#[test]
fn missing_file() {
    let result = read_usrbin("./data/does_not_exist.bnn.lis");
    assert!(matches!(result, Err(Error::IOError(_))));
}

#[rstest]
fn parsing_is_repeatable(vault: Document) {
    let again = read_usrbin("./data/vault_dose.bnn.lis").unwrap();
    assert_eq!(vault, again);

    let text = std::fs::read_to_string("./data/vault_dose.bnn.lis").unwrap();
    assert_eq!(Document::from_text(&text).unwrap(), vault);
}

#[test]
fn parallel_reads_keep_order() {
    let paths = [
        "./data/single.bnn.lis",
        "./data/truncated.bnn.lis",
        "./data/vault_dose.bnn.lis",
    ];
    let results = read_usrbin_files(&paths);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().len(), 1);
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().len(), 2);
}

#[test]
fn invalid_utf8_is_replaced() {
    let text = std::fs::read("./data/single.bnn.lis").unwrap();
    let mut bytes = vec![0xFF, 0xFE, b'\n'];
    bytes.extend(text);

    let path = std::env::temp_dir().join("ftools_usrbin_invalid_utf8.bnn.lis");
    std::fs::write(&path, bytes).unwrap();

    let document = read_usrbin(&path).unwrap();
    assert_eq!(document.len(), 1);

    std::fs::remove_file(path).unwrap();
}

#[rstest]
fn subgrid_of_file_record(vault: Document) {
    let record = vault.get_record(0).unwrap();

    // x coordinates are -300, 0, 300 so this keeps the upper two
    let subgrid = record
        .subgrid([(Some(-1.0), None), (None, None), (Some(400.0), Some(400.0))])
        .unwrap();

    assert_eq!(subgrid.shape(), (2, 2, 1));
    assert_eq!(subgrid.axes()[0], Axis::new(0.0, 300.0, 2));
    assert_eq!(subgrid.axes()[2], Axis::new(400.0, 400.0, 1));
    assert_eq!(subgrid.values(), &[0.8, 0.9, 1.1, 1.2]);
}

#[rstest]
fn json_output(vault: Document) {
    let path = std::env::temp_dir().join("ftools_usrbin_vault.json");
    write_json(&vault, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let records = json["records"].as_array().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["axes"][0]["bin_count"], 3);
    assert_eq!(records[1]["values"].as_array().unwrap().len(), 12);

    std::fs::remove_file(path).unwrap();
}

#[rstest]
fn ascii_output(single: Document) {
    let path = std::env::temp_dir().join("ftools_usrbin_single.txt");
    write_ascii(single.get_record(0).unwrap(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 5);

    std::fs::remove_file(path).unwrap();
}
