use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::TestEnv;

#[test]
fn validate_workspace() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--backend", env.data_arg(), "validate"])
        .assert()
        .success()
        .stdout(contains("workspace valid"));
}

#[test]
fn receivables_query_filters_by_client() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "--backend",
            env.data_arg(),
            "receivables",
            "list",
            "--query",
            "acme",
        ])
        .assert()
        .success()
        .stdout(contains("INV-001"))
        .stdout(contains("INV-002").not());
}

#[test]
fn receivables_status_filter_folds_case() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "--backend",
            env.data_arg(),
            "receivables",
            "list",
            "--status",
            "pagado",
        ])
        .assert()
        .success()
        .stdout(contains("INV-002"))
        .stdout(contains("INV-001").not());
}

#[test]
fn quotes_list_matches_folio() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "--backend",
            env.data_arg(),
            "quotes",
            "list",
            "--query",
            "cot-001",
        ])
        .assert()
        .success()
        .stdout(contains("q-1"));
}
