//! Golden file tests for the cleaning pipeline.
//!
//! Each case directory under `tests/golden/` holds:
//! - `input.tsv`: a slice of the raw extract
//! - `expected_*.csv`: the exact bytes the pipeline must write
//! - `manifest.json`: which region each expected file belongs to
//!
//! Outputs are written to a temporary directory, never into the case directory.

use std::fs;
use std::path::{Path, PathBuf};

use life_expectancy::{Pipeline, PipelineConfig, Region};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct GoldenManifest {
    name: String,
    description: String,
    input: String,
    runs: Vec<GoldenRun>,
}

#[derive(Debug, Deserialize)]
struct GoldenRun {
    region: Option<Region>,
    expected: String,
    output_file: String,
    dropped_missing: usize,
    filtered_out: usize,
}

fn golden_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("golden")
}

fn load_manifest(case_dir: &Path) -> GoldenManifest {
    let manifest_path = case_dir.join("manifest.json");
    let content = fs::read_to_string(&manifest_path)
        .unwrap_or_else(|e| panic!("Failed to read manifest at {:?}: {}", manifest_path, e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse manifest at {:?}: {}", manifest_path, e))
}

fn run_case(case: &str) {
    let case_dir = golden_dir().join(case);
    let manifest = load_manifest(&case_dir);

    for run in &manifest.runs {
        let out = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig::new()
            .with_input_dir(&case_dir)
            .with_output_dir(out.path())
            .with_filename(manifest.input.as_str());
        config.region = run.region;

        let report = Pipeline::new(config)
            .run()
            .unwrap_or_else(|e| panic!("{} ({:?}) failed: {}", manifest.name, run.region, e));

        assert_eq!(report.output_path, out.path().join(&run.output_file));
        assert_eq!(report.transform.dropped_missing, run.dropped_missing);
        assert_eq!(report.transform.filtered_out, run.filtered_out);

        let expected = fs::read_to_string(case_dir.join(&run.expected)).unwrap();
        let actual = fs::read_to_string(&report.output_path).unwrap();
        assert_eq!(
            actual, expected,
            "{} ({:?}) differs from {}",
            manifest.name, run.region, run.expected
        );
    }
}

#[test]
fn golden_pt_sample() {
    run_case("pt_sample");
}

#[test]
fn golden_cases_are_deterministic() {
    let case_dir = golden_dir().join("pt_sample");
    let manifest = load_manifest(&case_dir);

    let hashes: Vec<String> = (0..2)
        .map(|_| {
            let out = tempfile::tempdir().unwrap();
            let config = PipelineConfig::new()
                .with_input_dir(&case_dir)
                .with_output_dir(out.path())
                .with_filename(manifest.input.as_str())
                .with_region(Region::PT);
            Pipeline::new(config).run().unwrap().output_hash
        })
        .collect();

    assert_eq!(hashes[0], hashes[1]);
}
