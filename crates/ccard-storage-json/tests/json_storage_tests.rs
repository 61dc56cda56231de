use ccard_core::{storage::PurchaseStore, CoreError, PurchaseBook};
use ccard_domain::{Category, InstallmentPlan, Purchase};
use ccard_storage_json::{JsonPurchaseStorage, STORAGE_KEY};
use chrono::NaiveDate;
use std::fs;
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn json_storage_can_save_and_load_purchases() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::new(dir.path().join("data")).expect("create storage");

    let plan = InstallmentPlan::new(1, 3).unwrap();
    let purchases = vec![
        Purchase::new("1", "Mercado", 100.0, Category::Food, date(2024, 3, 11))
            .unwrap()
            .with_description(Some("weekly".into())),
        Purchase::installment("2", "TV", 300.0, date(2024, 3, 12), plan).unwrap(),
    ];

    storage.save_all(&purchases).expect("save purchases");
    let loaded = storage.load_all().expect("load purchases");

    assert_eq!(loaded, purchases);
    let path = storage.path();
    assert_eq!(
        path.file_stem().and_then(|stem| stem.to_str()),
        Some(STORAGE_KEY)
    );
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_storage_writes_document_shape() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::new(dir.path().to_path_buf()).expect("create storage");
    let plan = InstallmentPlan::new(2, 4).unwrap();
    let sofa = Purchase::installment("s", "Sofa", 400.0, date(2024, 1, 20), plan).unwrap();

    storage.save_all(&[sofa]).expect("save");
    let raw = fs::read_to_string(storage.path()).expect("read");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

    let entry = &json["purchases"][0];
    assert_eq!(entry["id"], "s");
    assert_eq!(entry["category"], "Installment Purchases");
    assert_eq!(entry["date"], "2024-01-20T00:00:00.000Z");
    assert_eq!(entry["installmentValue"], 100.0);
    assert_eq!(entry["currentInstallment"], 2);
    assert_eq!(entry["totalInstallments"], 4);
}

#[test]
fn missing_file_loads_as_empty_collection() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::at_path(dir.path().join("absent.json"));
    assert!(storage.load_all().expect("load").is_empty());
}

#[test]
fn corrupt_payload_degrades_to_empty_collection() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.path(), "{ not json").expect("write corrupt file");

    assert!(storage.load_all().expect("load").is_empty());
}

#[test]
fn non_utf8_payload_degrades_to_empty_collection() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.path(), [0xff, 0xfe, 0x7b, 0x00, 0xc3]).expect("write binary file");

    assert!(storage.load_all().expect("load").is_empty());

    let path = storage.path().to_path_buf();
    let mut book = PurchaseBook::new(Box::new(storage));
    let bus = Purchase::new("bus", "Bus", 4.4, Category::Transport, date(2024, 2, 1)).unwrap();
    book.add(bus.clone()).expect("add over unreadable file");

    let reopened = JsonPurchaseStorage::at_path(path);
    assert_eq!(reopened.load_all().expect("reload"), vec![bus]);
}

#[test]
fn unreadable_path_still_reports_io_error() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::at_path(dir.path().to_path_buf());

    assert!(matches!(storage.load_all(), Err(CoreError::Io(_))));
}

#[test]
fn invalid_record_degrades_to_empty_collection() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(
        storage.path(),
        r#"{"purchases": [{"id": "1", "name": "x", "value": -4, "category": "Food",
            "date": "2024-03-01"}]}"#,
    )
    .expect("write file");

    assert!(storage.load_all().expect("load").is_empty());
}

#[test]
fn reads_documents_written_by_the_web_app() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(
        storage.path(),
        r#"{"purchases":[{"id":"1712345678901","name":"Padaria","value":12.5,
            "category":"Alimentação","date":"2024-04-02T00:00:00.000Z"}]}"#,
    )
    .expect("write file");

    let loaded = storage.load_all().expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].category(), Category::Food);
    assert_eq!(loaded[0].date, date(2024, 4, 2));
}

#[test]
fn purchase_book_round_trips_through_disk() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonPurchaseStorage::new(dir.path().to_path_buf()).expect("create storage");
    let path = storage.path().to_path_buf();
    let mut book = PurchaseBook::new(Box::new(storage));

    let bus = Purchase::new("bus", "Bus", 4.4, Category::Transport, date(2024, 2, 1)).unwrap();
    book.add(bus.clone()).expect("add");
    assert!(!book.remove("nope").expect("remove missing"));

    let reopened = PurchaseBook::new(Box::new(JsonPurchaseStorage::at_path(path)));
    assert_eq!(reopened.list().expect("list"), vec![bus]);
}
