// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Integration tests for the oficina CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// The oficina binary with a clean, uncoloured environment
fn oficina() -> Command {
    let mut cmd = Command::cargo_bin("oficina").expect("binary builds");
    cmd.env_remove("OFICINA_CONFIG")
        .env_remove("OFICINA_DATASET")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

/// Helper to get stdout as string
fn stdout_str(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_shops_search_ignores_accents() {
    oficina()
        .args(["shops", "REVISAO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 oficinas encontradas"))
        .stdout(predicate::str::contains("Mecânica Ágil"))
        .stdout(predicate::str::contains("AutoCar"));
}

#[test]
fn test_shops_sorted_by_name() {
    let output = oficina().args(["shops", "--sort", "name"]).output().unwrap();
    assert!(output.status.success());

    let stdout = stdout_str(&output);
    let agil = stdout.find("Ágil Pneus").unwrap();
    let autocar = stdout.find("AutoCar").unwrap();
    let sao_jorge = stdout.find("Oficina São Jorge").unwrap();
    assert!(agil < autocar);
    assert!(autocar < sao_jorge);
}

#[test]
fn test_shops_no_match() {
    oficina()
        .args(["shops", "helicóptero"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nenhuma oficina encontrada"));
}

#[test]
fn test_shops_json_output() {
    let output = oficina().args(["--json", "shops", "carro"]).output().unwrap();
    assert!(output.status.success());

    let shops: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let shops = shops.as_array().unwrap();
    assert_eq!(shops.len(), 1);
    assert_eq!(shops[0]["id"], "4");
}

#[test]
fn test_shop_details_and_unknown_shop() {
    oficina()
        .args(["shop", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(11) 33334-444"))
        .stdout(predicate::str::contains("Revisão Completa"))
        .stdout(predicate::str::contains("R$ 450,00"))
        .stdout(predicate::str::contains("2h"))
        .stdout(predicate::str::contains("dias: Seg, Ter, Qua, Qui, Sex"));

    oficina()
        .args(["shop", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shop not found: 999"));
}

#[test]
fn test_appointments_filtered_by_status() {
    oficina()
        .args(["appointments", "--status", "pendente"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 agendamento\n"))
        .stdout(predicate::str::contains("Revisão de Freios"))
        .stdout(predicate::str::contains("XYZ-9876"))
        .stdout(predicate::str::contains("22/12/2024 às 14:30"));

    oficina()
        .args(["appointments", "--status", "perdido"])
        .assert()
        .failure();
}

#[test]
fn test_groups_show_price_breakdown() {
    oficina()
        .arg("groups")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 / 5 participantes"))
        .stdout(predicate::str::contains("até 40% OFF"))
        .stdout(predicate::str::contains("Desconto (40%): -R$ 180,00"))
        .stdout(predicate::str::contains("Seu preço agora: R$ 270,00"));
}

#[test]
fn test_join_reports_new_price() {
    let output = oficina()
        .args(["--json", "join", "comp1", "--user", "user3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["booking"]["participants"].as_array().unwrap().len(), 3);
    let new_price = outcome["new_price"].as_f64().unwrap();
    assert!((new_price - 180.0).abs() < 1e-6);
}

#[test]
fn test_join_existing_member() {
    oficina()
        .args(["join", "comp1", "--user", "user1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user1 já participa"))
        .stdout(predicate::str::contains("novo preço: R$ 270,00"));
}

#[test]
fn test_communities_for_user() {
    let output = oficina()
        .args(["--json", "communities", "--user", "user1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let communities: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = communities
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Proprietários de Corolla"]);
}

#[test]
fn test_profile_shows_vehicles_and_reputation() {
    oficina()
        .arg("profile")
        .assert()
        .success()
        .stdout(predicate::str::contains("João Silva"))
        .stdout(predicate::str::contains("(11) 98765-4321"))
        .stdout(predicate::str::contains("membro desde: 10/01/2024"))
        .stdout(predicate::str::contains("Meus veículos (2):"))
        .stdout(predicate::str::contains("ABC-1234"))
        .stdout(predicate::str::contains("XYZ-9876"))
        .stdout(predicate::str::contains("Reputação: 5.0"))
        .stdout(predicate::str::contains("1 avaliações · 1 serviços · 2 recomendações"))
        .stdout(predicate::str::contains("Nenhum selo ainda"));
}

#[test]
fn test_profile_json_and_unknown_user() {
    let output = oficina()
        .args(["--json", "profile", "--user", "user3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["user"]["name"], "Carlos Pereira");
    assert!(profile["reputation"]["score"].is_null());
    assert_eq!(profile["reputation"]["activity"]["shared_bookings"], 1);
    assert_eq!(profile["vehicles"].as_array().unwrap().len(), 0);

    oficina()
        .args(["profile", "--user", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user not found: ghost"));
}

#[test]
fn test_referral_code() {
    oficina()
        .arg("referral")
        .assert()
        .success()
        .stdout(predicate::str::contains("REFERENCIA_USER1"))
        .stdout(predicate::str::contains("Crédito disponível: R$ 50,00"));
}

#[test]
fn test_validate_fields() {
    oficina()
        .args(["validate", "plate", "ABC-1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC-1234"));

    oficina()
        .args(["validate", "phone", "(11) 98765-4321"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(11) 98765-4321"));

    oficina()
        .args(["validate", "email", "bad"])
        .assert()
        .failure();
}

#[test]
fn test_config_sets_user_and_sort() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "user_id = \"user2\"\ndefault_sort = \"name\"\n").unwrap();

    oficina()
        .args(["referral"])
        .env("OFICINA_CONFIG", &config)
        .assert()
        .success()
        .stdout(predicate::str::contains("REFERENCIA_USER2"))
        .stdout(predicate::str::contains("Nenhuma indicação ainda"));

    let output = oficina()
        .args(["shops"])
        .env("OFICINA_CONFIG", &config)
        .output()
        .unwrap();
    let stdout = stdout_str(&output);
    assert!(stdout.find("Ágil Pneus").unwrap() < stdout.find("Mecânica Ágil").unwrap());
}

#[test]
fn test_custom_dataset() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("data.json");
    fs::write(
        &dataset,
        r#"{
            "current_user_id": "u1",
            "shops": [
                {
                    "id": "s1",
                    "name": "Garagem Única",
                    "address": "Rua Única, 1",
                    "phone": "1100000000",
                    "email": "g@u.com",
                    "rating": 3.0,
                    "review_count": 1,
                    "specialties": ["Funilaria"],
                    "opens_at": "08:00:00",
                    "closes_at": "12:00:00",
                    "operating_days": ["Sáb"]
                }
            ]
        }"#,
    )
    .unwrap();

    oficina()
        .args(["shops", "unica"])
        .arg("--dataset")
        .arg(&dataset)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 oficina encontrada\n"))
        .stdout(predicate::str::contains("Garagem Única"));
}

#[test]
fn test_malformed_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("broken.json");
    fs::write(&dataset, "{ not json").unwrap();

    oficina()
        .args(["groups"])
        .env("OFICINA_DATASET", &dataset)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dataset"));
}

#[test]
fn test_completions() {
    oficina()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oficina"));
}
