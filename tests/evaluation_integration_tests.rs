// End-to-end evaluation tests
//
// Purpose: Load real JSON artifacts from disk and run full evaluations
// Run with: cargo test --test evaluation_integration_tests

use approx::assert_relative_eq;
use process_eval_rust::{
    EstimationError, EvalConfig, EvalError, Flag, LogisticPipeline, Observation, ProcessEvaluator,
    RangeLookup, RangeStore, ReferenceLoadError, SuitabilityEstimator, Variable, Verdict,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GUIDE: &str = r#"{
  "crops": {
    "rice": {
      "stages": [
        {
          "stage": "vegetative",
          "ideal_ranges": {
            "N": {"min": 60, "max": 100},
            "P": {"min": 30, "max": 60},
            "K": {"min": 30, "max": 60},
            "temperature": {"min": 20, "max": 35},
            "humidity": {"min": 70, "max": 90},
            "ph": {"min": 5.5, "max": 7.0},
            "rainfall": {"min": 150, "max": 300}
          }
        }
      ]
    }
  }
}"#;

// Intercept-only model: logistic(0.2) for any input, shifted by crop weight
const MODEL: &str = r#"{
  "numeric": {
    "N": {"mean": 0, "scale": 1, "coef": 0},
    "P": {"mean": 0, "scale": 1, "coef": 0},
    "K": {"mean": 0, "scale": 1, "coef": 0},
    "temperature": {"mean": 0, "scale": 1, "coef": 0},
    "humidity": {"mean": 0, "scale": 1, "coef": 0},
    "ph": {"mean": 0, "scale": 1, "coef": 0},
    "rainfall": {"mean": 0, "scale": 1, "coef": 0}
  },
  "categorical": {"crop": {"rice": 0.2}},
  "intercept": 0.0
}"#;

struct Fixture {
    _dir: TempDir,
    rules: PathBuf,
    model: PathBuf,
}

fn write_artifacts(guide: &str, model: &str) -> Fixture {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let rules = dir.path().join("all_crops_stage_guide.json");
    let model_path = dir.path().join("process_eval_pipeline.json");
    fs::write(&rules, guide).expect("Failed to write guide");
    fs::write(&model_path, model).expect("Failed to write model");
    Fixture {
        _dir: dir,
        rules,
        model: model_path,
    }
}

fn config(fixture: &Fixture) -> EvalConfig {
    EvalConfig::default()
        .with_rules_path(&fixture.rules)
        .with_model_path(&fixture.model)
}

fn rice(n: f64) -> Observation {
    Observation::builder("rice", "vegetative")
        .values([n, 45.0, 45.0, 25.0, 80.0, 6.5, 200.0])
        .build()
        .expect("valid observation")
}

struct Fixed(f64);

impl SuitabilityEstimator for Fixed {
    fn predict_probability(&self, _: &Observation) -> Result<f64, EstimationError> {
        Ok(self.0)
    }
}

// =========================================================================
// Section 1: Full pipeline from disk
// =========================================================================

#[test]
fn test_evaluate_from_files() {
    let fixture = write_artifacts(GUIDE, MODEL);
    let evaluator = ProcessEvaluator::from_config(&config(&fixture)).unwrap();
    let result = evaluator.evaluate(&rice(40.0)).unwrap();

    // logistic(0.2) = 0.549834
    assert_relative_eq!(result.suitability_score, 0.55, epsilon = 1e-12);
    assert_eq!(result.prediction, Verdict::Suitable);
    assert_eq!(result.flags.get(Variable::N), Flag::Low);
    assert_eq!(result.advice, "Increase N");
}

#[test]
fn test_output_record_shape() {
    let fixture = write_artifacts(GUIDE, MODEL);
    let evaluator = ProcessEvaluator::from_config(&config(&fixture)).unwrap();
    let result = evaluator.evaluate(&rice(40.0)).unwrap();

    let json: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "prediction": "suitable",
            "suitability_score": 0.55,
            "threshold": 0.4,
            "flags": {
                "N": "low", "P": "ok", "K": "ok", "temperature": "ok",
                "humidity": "ok", "ph": "ok", "rainfall": "ok"
            },
            "advice": "Increase N"
        })
    );
}

#[test]
fn test_unknown_crop_from_files() {
    let fixture = write_artifacts(GUIDE, MODEL);
    let evaluator = ProcessEvaluator::from_config(&config(&fixture)).unwrap();
    let observation = Observation::builder("unknown_crop", "vegetative")
        .values([40.0, 45.0, 45.0, 25.0, 80.0, 6.5, 200.0])
        .build()
        .unwrap();
    let result = evaluator.evaluate(&observation).unwrap();

    // Unknown crop encodes to zeros: logistic(0) = 0.5
    assert_relative_eq!(result.suitability_score, 0.5, epsilon = 1e-12);
    assert_eq!(result.flags.count(Flag::Unknown), 7);
    assert_eq!(result.flags.count(Flag::Low), 0);
    assert_eq!(result.advice, "All within the recommended range.");
}

#[test]
fn test_shipped_sample_artifacts_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let config = EvalConfig::default()
        .with_rules_path(root.join("all_crops_stage_guide.json"))
        .with_model_path(root.join("process_eval_pipeline.json"));
    let evaluator = ProcessEvaluator::from_config(&config).unwrap();

    assert!(evaluator.ranges().lookup("rice", "vegetative").is_some());
    assert!(evaluator.ranges().lookup("maize", "planting").is_some());

    let result = evaluator.evaluate(&rice(80.0)).unwrap();
    assert!((0.0..=1.0).contains(&result.suitability_score));
    assert_eq!(result.flags.count(Flag::Ok), 7);
}

// =========================================================================
// Section 2: Threshold behaviour
// =========================================================================

#[test]
fn test_threshold_boundary() {
    let store = RangeStore::from_json_str(GUIDE).unwrap();

    let below = ProcessEvaluator::new(Fixed(0.39), store.clone(), &EvalConfig::default());
    assert_eq!(below.evaluate(&rice(80.0)).unwrap().prediction, Verdict::NotSuitable);

    let tie = ProcessEvaluator::new(Fixed(0.40), store, &EvalConfig::default());
    assert_eq!(tie.evaluate(&rice(80.0)).unwrap().prediction, Verdict::Suitable);
}

#[test]
fn test_threshold_override_is_reported() {
    let store = RangeStore::from_json_str(GUIDE).unwrap();
    let config = EvalConfig::default().with_threshold(0.75);
    let evaluator = ProcessEvaluator::new(Fixed(0.7), store, &config);
    let result = evaluator.evaluate(&rice(80.0)).unwrap();
    assert_eq!(result.prediction, Verdict::NotSuitable);
    assert_eq!(result.threshold, 0.75);
}

// =========================================================================
// Section 3: Artifact failures
// =========================================================================

#[test]
fn test_missing_rules_file() {
    let fixture = write_artifacts(GUIDE, MODEL);
    let config = config(&fixture).with_rules_path(fixture.rules.with_file_name("missing.json"));
    let err = ProcessEvaluator::from_config(&config).err().unwrap();
    assert!(matches!(err, EvalError::ReferenceLoad(ReferenceLoadError::Io { .. })));
}

#[test]
fn test_malformed_rules_file() {
    let fixture = write_artifacts(r#"{"crops": "#, MODEL);
    let err = ProcessEvaluator::from_config(&config(&fixture)).err().unwrap();
    assert!(matches!(err, EvalError::ReferenceLoad(ReferenceLoadError::Parse { .. })));
}

#[test]
fn test_missing_model_file() {
    let fixture = write_artifacts(GUIDE, MODEL);
    let config = config(&fixture).with_model_path(fixture.model.with_file_name("missing.json"));
    let err = ProcessEvaluator::from_config(&config).err().unwrap();
    assert!(matches!(err, EvalError::Estimation(EstimationError::Io { .. })));
}

#[test]
fn test_model_missing_feature() {
    let incomplete = r#"{"numeric": {"N": {"mean": 0, "scale": 1, "coef": 1}}, "intercept": 0}"#;
    let fixture = write_artifacts(GUIDE, incomplete);
    let err = ProcessEvaluator::from_config(&config(&fixture)).err().unwrap();
    assert!(matches!(err, EvalError::Estimation(EstimationError::MissingFeature("P"))));
}

#[test]
fn test_loaded_pipeline_matches_direct_scoring() {
    let fixture = write_artifacts(GUIDE, MODEL);
    let pipeline = LogisticPipeline::load(&fixture.model).unwrap();
    let p = pipeline.predict_probability(&rice(40.0)).unwrap();
    assert_relative_eq!(p, 0.549834, epsilon = 1e-6);
}
