mod common;

use anyhow::Result;
use common::{alice_and_bob, test_service};
use divvy::io::{Exporter, LedgerSnapshot};

#[tokio::test]
async fn test_balances_csv_has_header_and_one_row_per_roommate() -> Result<()> {
    let (service, _temp) = test_service().await?;
    alice_and_bob(&service).await?;
    service.record_expense("Alice", 10000).await?;

    let exporter = Exporter::new(&service);
    let mut buf = Vec::new();
    let count = exporter.export_balances_csv(&mut buf).await?;

    assert_eq!(count, 2);
    let csv = String::from_utf8(buf)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "roommate,paid,balance");
    assert_eq!(lines[1], "Alice,100.00,-50.00");
    assert_eq!(lines[2], "Bob,0.00,50.00");

    Ok(())
}

#[tokio::test]
async fn test_expenses_csv_resolves_payers() -> Result<()> {
    let (service, _temp) = test_service().await?;
    alice_and_bob(&service).await?;
    service.record_expense("Bob", 1234).await?;

    let exporter = Exporter::new(&service);
    let mut buf = Vec::new();
    let count = exporter.export_expenses_csv(&mut buf).await?;

    assert_eq!(count, 1);
    let csv = String::from_utf8(buf)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "id,recorded_at,payer,amount");
    assert!(lines[1].ends_with(",Bob,12.34"));

    Ok(())
}

#[tokio::test]
async fn test_full_json_snapshot_round_trips() -> Result<()> {
    let (service, _temp) = test_service().await?;
    alice_and_bob(&service).await?;
    service.record_expense("Alice", 500).await?;
    service.record_expense("Bob", 750).await?;

    let exporter = Exporter::new(&service);
    let mut buf = Vec::new();
    let count = exporter.export_full_json(&mut buf).await?;
    assert_eq!(count, 4);

    let snapshot: LedgerSnapshot = serde_json::from_slice(&buf)?;
    assert_eq!(snapshot.roommates.len(), 2);
    assert_eq!(snapshot.expenses.len(), 2);
    assert_eq!(snapshot.roommates[0].name, "Alice");
    assert_eq!(snapshot.expenses[1].amount_cents, 750);

    Ok(())
}
