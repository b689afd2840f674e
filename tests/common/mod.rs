use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub data: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let data = make_fixture_workspace(tmp.path());

        Self {
            _tmp: tmp,
            home,
            data,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("cartera").expect("cartera binary");
        cmd.env("HOME", &self.home);
        cmd
    }

    pub fn data_arg(&self) -> &str {
        self.data.to_str().expect("data path utf8")
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_backend(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .arg("--backend")
            .arg(self.data_arg())
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

pub fn make_fixture_workspace(base: &Path) -> PathBuf {
    let data = base.join("data");
    fs::create_dir_all(&data).expect("create data dir");

    write_table(
        &data,
        "clients",
        serde_json::json!([
            {"id": "c-1", "name": "Acme Corp", "email": "pagos@acme.example", "city": "Bogota"},
            {"id": "c-2", "name": "Beta LLC", "city": "Medellin"}
        ]),
    );
    write_table(
        &data,
        "companies",
        serde_json::json!([
            {"id": "e-1", "name": "Grupo Acme", "tax_id": "900123456", "sector": "manufactura"}
        ]),
    );
    write_table(
        &data,
        "products",
        serde_json::json!([
            {"id": "p-1", "name": "Instalacion", "sku": "SRV-INST", "unit_price": 150.0},
            {"id": "p-2", "name": "Soporte mensual", "unit_price": 80.0, "active": false}
        ]),
    );
    write_table(
        &data,
        "quotes",
        serde_json::json!([
            {
                "id": "q-1",
                "client_id": "c-1",
                "client_name": "Acme Corp",
                "folio": "COT-001",
                "status": "enviada",
                "valid_until": "2024-03-01",
                "items": [
                    {"description": "Instalacion", "quantity": 2.0, "unit_price": 150.0}
                ],
                "total": 300.0
            }
        ]),
    );
    write_table(
        &data,
        "opportunities",
        serde_json::json!([
            {"id": "o-1", "name": "Renovacion Acme", "client_id": "c-1", "stage": "negociacion", "estimated_value": 5000.0}
        ]),
    );
    write_table(
        &data,
        "receivables",
        serde_json::json!([
            {"id": "rec-1", "client_name": "Acme Corp", "invoice": "INV-001", "status": "Pendiente", "due_date": "2024-01-10", "amount": 500.0},
            {"id": "rec-2", "client_name": "Beta LLC", "invoice": "INV-002", "status": "Pagado", "due_date": "2024-02-15", "amount": 1500.0},
            {"id": "rec-3", "client_name": "Acme Corp", "invoice": "INV-007", "status": "pendiente", "due_date": "2024-02-20", "amount": 800.0}
        ]),
    );

    data
}

fn write_table(data: &Path, table: &str, rows: Value) {
    fs::write(
        data.join(format!("{}.json", table)),
        serde_json::to_string_pretty(&rows).expect("serialize fixture table"),
    )
    .expect("write fixture table");
}
