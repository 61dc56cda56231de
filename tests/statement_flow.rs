mod common;

use ccard_core::{
    time::FixedClock, PurchaseDraft, PurchaseService, StatementBrowser, StatementService,
    SummaryService,
};
use ccard_domain::{Category, StatementPeriod};
use chrono::NaiveDate;

use common::{book_in, temp_home};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn period(month: u32, year: i32) -> StatementPeriod {
    StatementPeriod::new(month, year).unwrap()
}

#[test]
fn december_purchases_after_cutoff_roll_into_january() {
    let home = temp_home();
    let mut book = book_in(&home);
    let gift = PurchaseService::create(PurchaseDraft::new(
        "Presente",
        250.0,
        Category::Leisure,
        date(2024, 12, 20),
    ))
    .unwrap();
    book.add(gift).unwrap();

    let mut browser = StatementBrowser::from_clock(&FixedClock::new(date(2025, 1, 3)), 12);
    let pair = browser.statements(&book).unwrap();
    assert_eq!(pair.current.period, period(1, 2025));
    assert_eq!(pair.current.len(), 1);

    assert!(browser.select_previous());
    let pair = browser.statements(&book).unwrap();
    assert!(pair.current.is_empty());
    assert_eq!(pair.next.period, period(1, 2025));
}

#[test]
fn reopened_book_reproduces_statement_totals() {
    let home = temp_home();
    let mut book = book_in(&home);
    let drafts = [
        PurchaseDraft::new("Uber", 30.0, Category::Transport, date(2024, 6, 1)),
        PurchaseDraft::new("Ração", 70.0, Category::Pet, date(2024, 6, 11)),
        PurchaseDraft::new("Geladeira", 2400.0, Category::Installments, date(2024, 6, 2))
            .with_installments(3, 12),
        PurchaseDraft::new("Cinema", 50.0, Category::Leisure, date(2024, 6, 12)),
    ];
    for draft in drafts {
        book.add(PurchaseService::create(draft).unwrap()).unwrap();
    }

    let reopened = book_in(&home);
    let statement = reopened.statement(period(6, 2024)).unwrap();
    let names: Vec<&str> = statement.purchases.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Uber", "Ração", "Geladeira"]);

    let summary = SummaryService::summarize(&statement.purchases);
    assert_eq!(summary.grand_total, 2500.0);
    assert_eq!(summary.totals.get(Category::Leisure), 0.0);
    assert_eq!(summary.ranked[0].category, Category::Installments);
    assert_eq!(summary.ranked.len(), 3);

    let fridge = &statement.purchases[2];
    let schedule = StatementService::installment_schedule(fridge);
    assert_eq!(schedule.len(), 10);
    assert_eq!(schedule[0].period, period(6, 2024));
    assert_eq!(schedule[9].period, period(3, 2025));
    assert_eq!(schedule[0].amount, 200.0);
}
