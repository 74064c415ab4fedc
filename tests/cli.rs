//! Binary-level smoke tests
//!
//! Drives the `eloan` binary end to end against a temp data directory.
//! Interactive commands (register, login) prompt on the controlling TTY and
//! are covered at the service level instead.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use eloan_cli::config::paths::EloanPaths;
use eloan_cli::crypto::{EncryptionKey, FieldCipher};
use eloan_cli::models::{ApplicationStatus, UserRole};
use eloan_cli::services::{
    ApplicationRequest, ApplicationService, LoanProductInput, LoanService, Registration,
    UserService,
};
use eloan_cli::storage::Storage;

const TEST_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

fn eloan(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("eloan").unwrap();
    cmd.env("ELOAN_DATA_DIR", data_dir.path())
        .env("ELOAN_ENCRYPTION_KEY", TEST_KEY);
    cmd
}

#[test]
fn keygen_emits_a_usable_key() {
    let data_dir = TempDir::new().unwrap();
    let output = Command::cargo_bin("eloan")
        .unwrap()
        .env("ELOAN_DATA_DIR", data_dir.path())
        .env_remove("ELOAN_ENCRYPTION_KEY")
        .arg("keygen")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let printed = String::from_utf8(output).unwrap();
    let key_line = printed.lines().next().unwrap();
    assert_eq!(key_line.len(), 64);
    assert!(key_line.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(EncryptionKey::from_hex(key_line).is_ok());
}

#[test]
fn missing_key_fails_fast() {
    let data_dir = TempDir::new().unwrap();
    Command::cargo_bin("eloan")
        .unwrap()
        .env("ELOAN_DATA_DIR", data_dir.path())
        .env_remove("ELOAN_ENCRYPTION_KEY")
        .args(["loan", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ELOAN_ENCRYPTION_KEY"));
}

#[test]
fn malformed_key_fails_fast() {
    let data_dir = TempDir::new().unwrap();
    Command::cargo_bin("eloan")
        .unwrap()
        .env("ELOAN_DATA_DIR", data_dir.path())
        .env("ELOAN_ENCRYPTION_KEY", "deadbeef")
        .args(["loan", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Encryption key error"));
}

#[test]
fn catalog_add_and_list() {
    let data_dir = TempDir::new().unwrap();

    eloan(&data_dir)
        .args([
            "loan", "add", "Gold Personal Loan", "--rate", "10", "--min", "10000", "--max",
            "500000", "--tenure", "12",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added loan product: Gold Personal Loan"));

    eloan(&data_dir)
        .args(["loan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold Personal Loan"));

    eloan(&data_dir)
        .args(["loan", "show", "gold personal loan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Annual rate:     10%"));
}

#[test]
fn rejects_zero_rate_product() {
    let data_dir = TempDir::new().unwrap();

    eloan(&data_dir)
        .args([
            "loan", "add", "Zero Rate Loan", "--rate", "0", "--min", "10000", "--max", "500000",
            "--tenure", "12",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Annual interest rate must be positive"));
}

#[test]
fn disbursed_application_schedule_end_to_end() {
    let data_dir = TempDir::new().unwrap();

    // Seed a borrower, a product, and a disbursed application through the
    // library against the same data directory the binary will read.
    let application_id = {
        let paths = EloanPaths::with_base_dir(data_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let cipher = FieldCipher::new(&EncryptionKey::from_hex(TEST_KEY).unwrap()).unwrap();

        let user = UserService::new(&storage, &cipher)
            .register(
                Registration {
                    name: "Asha Rao".into(),
                    phone: "9000000001".into(),
                    email: "asha@example.com".into(),
                    national_id: "1234-5678-9012".into(),
                    tax_id: "ABCDE1234F".into(),
                    occupation: "Engineer".into(),
                    organization: "Acme".into(),
                    password: "hunter2hunter2".into(),
                },
                UserRole::User,
            )
            .unwrap();

        let product = LoanService::new(&storage)
            .create(LoanProductInput {
                name: "Gold Personal Loan".into(),
                description: String::new(),
                annual_rate_percent: "10".parse().unwrap(),
                processing_fee_percent: "0".parse().unwrap(),
                min_amount: eloan_cli::models::Money::from_units(10_000),
                max_amount: eloan_cli::models::Money::from_units(500_000),
                tenure_months: 12,
                required_docs: String::new(),
                eligibility_info: String::new(),
            })
            .unwrap();

        let applications = ApplicationService::new(&storage, &cipher);
        let application = applications
            .submit(ApplicationRequest {
                user_id: user.id,
                loan_id: product.id,
                amount_required: eloan_cli::models::Money::from_units(100_000),
                account_holder_name: "Asha Rao".into(),
                account_number: "00998877665544".into(),
                routing_code: "IFSC0001234".into(),
            })
            .unwrap();
        applications
            .set_status(
                application.id,
                ApplicationStatus::AcceptedDisbursed,
                Some("funds released".into()),
            )
            .unwrap();

        application.id
    };

    // Schedule is only available to the owning borrower
    eloan(&data_dir)
        .args([
            "application",
            "schedule",
            &application_id.to_string(),
            "--borrower",
            "asha@example.com",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("8791.59")
                .and(predicate::str::contains("105499.08"))
                .and(predicate::str::contains("5499.08")),
        );

    // The admin detail view decrypts the stored bank fields
    eloan(&data_dir)
        .args(["application", "show", &application_id.to_string()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("00998877665544")
                .and(predicate::str::contains("1234-5678-9012")),
        );

    // And the portfolio stats see the pipeline
    eloan(&data_dir)
        .args(["stats"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Borrowers:          1")
                .and(predicate::str::contains("accepted-disbursed:       1")),
        );
}

#[test]
fn schedule_refused_for_pending_application() {
    let data_dir = TempDir::new().unwrap();

    let application_id = {
        let paths = EloanPaths::with_base_dir(data_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let cipher = FieldCipher::new(&EncryptionKey::from_hex(TEST_KEY).unwrap()).unwrap();

        let user = UserService::new(&storage, &cipher)
            .register(
                Registration {
                    name: "Vikram Shah".into(),
                    phone: "9000000002".into(),
                    email: "vikram@example.com".into(),
                    national_id: "9876-5432-1098".into(),
                    tax_id: "ZYXWV9876K".into(),
                    occupation: String::new(),
                    organization: String::new(),
                    password: "hunter2hunter2".into(),
                },
                UserRole::User,
            )
            .unwrap();

        let product = LoanService::new(&storage)
            .create(LoanProductInput {
                name: "Vehicle Loan".into(),
                description: String::new(),
                annual_rate_percent: "9.5".parse().unwrap(),
                processing_fee_percent: "0".parse().unwrap(),
                min_amount: eloan_cli::models::Money::from_units(50_000),
                max_amount: eloan_cli::models::Money::from_units(1_000_000),
                tenure_months: 48,
                required_docs: String::new(),
                eligibility_info: String::new(),
            })
            .unwrap();

        ApplicationService::new(&storage, &cipher)
            .submit(ApplicationRequest {
                user_id: user.id,
                loan_id: product.id,
                amount_required: eloan_cli::models::Money::from_units(200_000),
                account_holder_name: "Vikram Shah".into(),
                account_number: "11223344556677".into(),
                routing_code: "IFSC0009876".into(),
            })
            .unwrap()
            .id
    };

    eloan(&data_dir)
        .args(["application", "schedule", &application_id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only available for disbursed loans"));
}
