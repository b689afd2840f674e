use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

mod common;
use common::TestEnv;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).expect("read schema");
    serde_json::from_str(&raw).expect("parse schema")
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

#[test]
fn receivable_list_output_matches_contract() {
    let env = TestEnv::new();
    let out = env.run_json_backend(&["receivables", "list"]);
    validate("receivable_list.schema.json", &out);
}

#[test]
fn filtered_list_output_matches_contract() {
    let env = TestEnv::new();
    let out = env.run_json_backend(&[
        "receivables",
        "list",
        "--query",
        "acme",
        "--status",
        "pendiente",
    ]);
    validate("receivable_list.schema.json", &out);
}

#[test]
fn summary_output_matches_contract() {
    let env = TestEnv::new();
    let out = env.run_json_backend(&["receivables", "summary"]);
    validate("receivable_summary.schema.json", &out);
}

#[test]
fn error_envelope_matches_contract() {
    let env = TestEnv::new();
    let out = env
        .cmd()
        .arg("--json")
        .arg("--backend")
        .arg(env.data_arg())
        .args(["receivables", "show", "rec-404"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let err: Value = serde_json::from_slice(&out).expect("error json output");
    validate("error_envelope.schema.json", &err);
}
