mod common;

use anyhow::Result;
use common::{add_expense, add_income, test_service, today};
use tally::application::LedgerError;
use tally::domain::Period;

#[tokio::test]
async fn test_add_budget_initializes_zero_spent() -> Result<()> {
    let service = test_service();

    let budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    assert_eq!(budget.category, "Groceries");
    assert_eq!(budget.amount_cents, 40000);
    assert_eq!(budget.spent_cents, 0);
    assert_eq!(budget.period, Period::Monthly);

    Ok(())
}

#[tokio::test]
async fn test_add_budget_rejects_negative_amount() -> Result<()> {
    let service = test_service();

    let result = service
        .add_budget("Groceries".to_string(), -1, Period::Monthly)
        .await;

    assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    assert!(service.list_budgets().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_list_budgets_keeps_insertion_order() -> Result<()> {
    let service = test_service();
    let first = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;
    let second = service
        .add_budget("Entertainment".to_string(), 20000, Period::Monthly)
        .await?;

    let budgets = service.list_budgets().await;
    let ids: Vec<_> = budgets.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}

#[tokio::test]
async fn test_update_budget_replaces_record() -> Result<()> {
    let service = test_service();
    let mut budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    budget.amount_cents = 45000;
    budget.period = Period::Weekly;
    service.update_budget(budget.clone()).await?;

    let stored = service.get_budget(budget.id).await?;
    assert_eq!(stored.amount_cents, 45000);
    assert_eq!(stored.period, Period::Weekly);
    assert_eq!(service.list_budgets().await.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_update_unknown_budget_is_not_found() -> Result<()> {
    let service = test_service();
    service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    let stranger = tally::domain::Budget::new("Travel", 10000, Period::Monthly);
    let result = service.update_budget(stranger.clone()).await;
    assert_eq!(result, Err(LedgerError::BudgetNotFound(stranger.id)));
    assert_eq!(service.list_budgets().await.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_delete_budget_and_not_found_invariant() -> Result<()> {
    let service = test_service();
    let budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    service.delete_budget(budget.id).await?;
    assert!(service.list_budgets().await.is_empty());

    let result = service.delete_budget(budget.id).await;
    assert_eq!(result, Err(LedgerError::BudgetNotFound(budget.id)));
    assert!(service.list_budgets().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_recompute_sums_matching_expenses_in_current_month() -> Result<()> {
    let service = test_service();
    add_expense(&service, "2025-04-02", 15000, "Groceries").await;
    add_expense(&service, "2025-04-10", 6000, "Groceries").await;
    add_expense(&service, "2025-04-05", 9000, "Dining Out").await;

    let budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;
    let unmatched = service
        .add_budget("Travel".to_string(), 50000, Period::Monthly)
        .await?;

    service.recompute_spending_at(today()).await;

    assert_eq!(service.get_budget(budget.id).await?.spent_cents, 21000);
    assert_eq!(
        service.get_budget(unmatched.id).await?.spent_cents,
        0,
        "Budgets with no matching expenses get zero spend"
    );

    Ok(())
}

#[tokio::test]
async fn test_recompute_ignores_other_months_and_income() -> Result<()> {
    let service = test_service();
    add_expense(&service, "2025-03-20", 30000, "Groceries").await; // last month
    add_expense(&service, "2025-05-01", 12000, "Groceries").await; // next month
    add_income(&service, "2025-04-10", 8000, "Groceries").await; // income, same label
    add_expense(&service, "2025-04-10", 5000, "Groceries").await;

    let budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    service.recompute_spending_at(today()).await;

    assert_eq!(service.get_budget(budget.id).await?.spent_cents, 5000);

    Ok(())
}

#[tokio::test]
async fn test_recompute_is_caller_driven() -> Result<()> {
    let service = test_service();
    let budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    add_expense(&service, "2025-04-10", 5000, "Groceries").await;

    // Transaction mutations never refresh spend on their own
    assert_eq!(service.get_budget(budget.id).await?.spent_cents, 0);

    service.recompute_spending_at(today()).await;
    assert_eq!(service.get_budget(budget.id).await?.spent_cents, 5000);

    Ok(())
}

#[tokio::test]
async fn test_recompute_is_full_not_incremental() -> Result<()> {
    let service = test_service();
    let tx = add_expense(&service, "2025-04-10", 5000, "Groceries").await;
    add_expense(&service, "2025-04-12", 3000, "Groceries").await;

    let budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    service.recompute_spending_at(today()).await;
    assert_eq!(service.get_budget(budget.id).await?.spent_cents, 8000);

    service.delete_transaction(tx.id).await?;
    service.recompute_spending_at(today()).await;
    assert_eq!(service.get_budget(budget.id).await?.spent_cents, 3000);

    Ok(())
}

#[tokio::test]
async fn test_recompute_uses_each_budgets_own_period_window() -> Result<()> {
    let service = test_service();
    // today() is Tuesday 2025-04-15; the week runs 04-14 to 04-20
    add_expense(&service, "2025-04-14", 4000, "Groceries").await; // this week
    add_expense(&service, "2025-04-02", 6000, "Groceries").await; // this month
    add_expense(&service, "2025-01-10", 9000, "Groceries").await; // this year

    let weekly = service
        .add_budget("Groceries".to_string(), 10000, Period::Weekly)
        .await?;
    let monthly = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;
    let yearly = service
        .add_budget("Groceries".to_string(), 100000, Period::Yearly)
        .await?;

    service.recompute_spending_at(today()).await;

    assert_eq!(service.get_budget(weekly.id).await?.spent_cents, 4000);
    assert_eq!(service.get_budget(monthly.id).await?.spent_cents, 10000);
    assert_eq!(service.get_budget(yearly.id).await?.spent_cents, 19000);

    Ok(())
}

#[tokio::test]
async fn test_budget_reports_reflect_stored_spend() -> Result<()> {
    let service = test_service();
    add_expense(&service, "2025-04-10", 21000, "Groceries").await;
    let budget = service
        .add_budget("Groceries".to_string(), 40000, Period::Monthly)
        .await?;

    service.recompute_spending_at(today()).await;
    let reports = service.budget_reports().await;

    let report = reports
        .iter()
        .find(|r| r.budget.id == budget.id)
        .expect("should report the groceries budget");
    assert_eq!(report.budget.spent_cents, 21000);
    assert_eq!(report.remaining_cents(), 19000);
    assert_eq!(report.health.percentage, 52.5);

    Ok(())
}
