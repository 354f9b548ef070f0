use ctnxtract::CtnXtract;
use ctnxtract::error::PipelineError;
use ctnxtract::extract::error::ExtractionError;
use polars::io::SerReader;
use polars::prelude::{CsvReadOptions, DataFrame};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RSA: &str = "\
patdeid,VISIT,RSA001,RSA002
101,BASELINE,1,x
101,WK1,1,x
101,WK1,1,y
101,WK2,1,x
102,BASELINE,1,x
103,BASELINE,1,x
103,WK1,1,x
103,WK2,1,x
104,BASELINE,1,x
";

const UDS: &str = "\
patdeid,VISIT,UDS011
101,BASELINE,1
101,WK1,0
101,WK2,0
102,BASELINE,-5
103,BASELINE,0
103,WK1,0
103,WK2,1
";

const DOS: &str = "\
patdeid,VISIT,DOS002,DOS005
101,BASELINE,1,40
101,WK1,,
101,WK1,1,10
102,BASELINE,2,16
103,BASELINE,1,30
103,WK2,1,30
";

const COWS: &str = "\
patdeid,COWS012
101,4
103,8
";

const DSM: &str = "\
patdeid,DSMOPI
101,1
102,3
103,
";

fn study_config(data_dir: &Path, output_file: &Path) -> String {
    format!(
        r#"
extract:
  data_dir: "{data_dir}"
  tables:
    - name: rsa
      file: T_FRRSA.csv
      columns: [patdeid, VISIT, {{ source: RSA001, rename: rsa_week }}]
    - name: uds
      file: T_FRUDSAB.csv
      columns: [patdeid, VISIT, {{ source: UDS011, rename: test_Opiate300 }}]
    - name: dos
      file: T_FRDOS.csv
      columns:
        - patdeid
        - VISIT
        - {{ source: DOS002, rename: medication }}
        - {{ source: DOS005, rename: total_dose }}
    - name: cw1
      file: T_FRCOWS.csv
      columns: [patdeid, {{ source: COWS012, rename: cows_predose }}]
    - name: dsm
      file: T_FRDSM.csv
      columns: [patdeid, {{ source: DSMOPI, rename: dsm_opiates }}]
pipeline:
  transform_strategies:
    - drop_duplicates: {{ table: rsa, subset: [patdeid, VISIT] }}
    - count_rows: {{ table: rsa, into: attendance, column: weeks_attended }}
    - flatten: {{ table: rsa, into: rsa_flat, schedule: {{ start: 0, stop: 2 }} }}
    - fill_null: {{ table: rsa_flat, value: 0 }}
    - rename_columns: {{ table: rsa_flat, columns: [{{ from: rsa_week_2, to: dropout }}] }}
    - recode_values:
        table: rsa_flat
        columns: [dropout]
        mapping: [{{ from: 0, to: 1 }}, {{ from: 1, to: 0 }}]
    - recode_values: {{ table: uds, columns: "^test_", mapping: [{{ from: -5, to: 0 }}] }}
    - flatten: {{ table: uds, into: uds_flat, schedule: {{ start: 0, stop: 2 }} }}
    - fill_null: {{ table: uds_flat, value: 1 }}
    - urine_test_outcomes:
        table: uds_flat
        into: uds_features
        columns: '^test_Opiate300_\d+$'
        window: {{ total_weeks: 3, trailing_weeks: 2 }}
    - label_codes:
        table: dsm
        labels: [{{ code: "1", label: dependence }}, {{ code: "3", label: no_diagnosis }}]
    - fill_null: {{ table: dsm, value: not_present }}
    - forward_backward_fill: {{ table: dos, columns: [medication, total_dose] }}
    - select_first: {{ table: dos, into: medication, columns: [medication] }}
    - sum_by_keys: {{ table: dos, keys: [patdeid, VISIT, medication] }}
    - pivot_categories:
        table: dos
        category_column: medication
        value_column: total_dose
        categories:
          - {{ code: "1", column: meds_methadone }}
          - {{ code: "2", column: meds_buprenorphine }}
    - flatten: {{ table: dos, into: dos_flat, schedule: {{ start: 0, stop: 2 }} }}
  merge:
    - {{ table: rsa_flat, category: attendance }}
    - {{ table: dos_flat, category: medication }}
    - {{ table: uds_features, category: outcome }}
    - {{ table: dsm, category: diagnosis }}
    - {{ table: medication, category: medication }}
    - {{ table: attendance, category: attendance }}
    - {{ table: cw1, category: withdrawal }}
  cohort_filter:
    column: weeks_attended
    equals: 1
    require_present: [meds_methadone_0, meds_buprenorphine_0]
  imputation:
    rules:
      - {{ category: medication, strategy: zero }}
      - {{ category: diagnosis, strategy: {{ label: not_evaluated }} }}
      - {{ category: withdrawal, strategy: regression }}
    regression:
      columns: [cows_predose]
  loader:
    csv_file:
      output_file: "{output_file}"
      create_dir: true
"#,
        data_dir = data_dir.display(),
        output_file = output_file.display(),
    )
}

#[fixture]
fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

fn write_extracts(dir: &Path) {
    for (file, content) in [
        ("T_FRRSA.csv", RSA),
        ("T_FRUDSAB.csv", UDS),
        ("T_FRDOS.csv", DOS),
        ("T_FRCOWS.csv", COWS),
        ("T_FRDSM.csv", DSM),
    ] {
        fs::write(dir.join(file), content).unwrap();
    }
}

fn write_config(dir: &Path, output_file: &Path) -> PathBuf {
    let config_path = dir.join("study.yaml");
    fs::write(&config_path, study_config(dir, output_file)).unwrap();
    config_path
}

fn read_output(path: &Path) -> DataFrame {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .unwrap()
        .finish()
        .unwrap()
}

fn i64_values(data: &DataFrame, name: &str) -> Vec<Option<i64>> {
    data.column(name).unwrap().i64().unwrap().into_iter().collect()
}

fn f64_values(data: &DataFrame, name: &str) -> Vec<Option<f64>> {
    data.column(name).unwrap().f64().unwrap().into_iter().collect()
}

#[rstest]
fn test_pipeline_integration(temp_dir: TempDir) {
    write_extracts(temp_dir.path());
    let output_file = temp_dir.path().join("out").join("merged.csv");
    let config_path = write_config(temp_dir.path(), &output_file);

    let study = CtnXtract::try_from(config_path).unwrap();
    study.run().unwrap();

    let merged = read_output(&output_file);

    // Patient 104 left after baseline without any dose and is dropped,
    // patient 102 left after baseline with a dose and is moved to the end.
    assert_eq!(i64_values(&merged, "patdeid"), [Some(101), Some(103), Some(102)]);
    assert_eq!(i64_values(&merged, "weeks_attended"), [Some(3), Some(3), Some(1)]);
    assert_eq!(i64_values(&merged, "rsa_week_1"), [Some(1), Some(1), Some(0)]);
    assert_eq!(i64_values(&merged, "dropout"), [Some(0), Some(0), Some(1)]);

    assert_eq!(
        f64_values(&merged, "meds_methadone_1"),
        [Some(50.0), Some(0.0), Some(0.0)]
    );
    assert_eq!(
        f64_values(&merged, "meds_buprenorphine_0"),
        [Some(0.0), Some(0.0), Some(16.0)]
    );
    assert_eq!(
        f64_values(&merged, "medication"),
        [Some(1.0), Some(1.0), Some(2.0)]
    );

    assert_eq!(i64_values(&merged, "TNT"), [Some(2), Some(2), Some(1)]);
    assert_eq!(i64_values(&merged, "CNT"), [Some(2), Some(2), Some(1)]);
    assert_eq!(i64_values(&merged, "responder"), [Some(1), Some(0), Some(0)]);

    let dsm: Vec<Option<&str>> = merged
        .column("dsm_opiates")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(
        dsm,
        [Some("dependence"), Some("not_present"), Some("no_diagnosis")]
    );

    assert_eq!(
        f64_values(&merged, "cows_predose"),
        [Some(4.0), Some(8.0), Some(6.0)]
    );
    assert!(merged.get_column_index("RSA002").is_none());
}

#[rstest]
fn test_pipeline_missing_extract(temp_dir: TempDir) {
    write_extracts(temp_dir.path());
    fs::remove_file(temp_dir.path().join("T_FRDSM.csv")).unwrap();
    let output_file = temp_dir.path().join("merged.csv");
    let config_path = write_config(temp_dir.path(), &output_file);

    let study = CtnXtract::try_from(config_path).unwrap();

    assert!(matches!(
        study.run(),
        Err(PipelineError::ExtractionError(
            ExtractionError::MissingFile { .. }
        ))
    ));
    assert!(!output_file.exists());
}
