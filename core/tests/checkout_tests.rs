//! Tests for the checkout transaction
//!
//! Covers sale totals, per-item stock decrements, weak item references, and
//! the refetch-on-failure reconciliation path.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use shared::{InventoryItem, Role, Session};
use shopkeeper_core::gateway::{MemoryGateway, StoreGateway};
use shopkeeper_core::services::SaleLine;
use shopkeeper_core::{AppError, RetailStore};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn admin() -> Session {
    Session::new(Uuid::new_v4(), "Alice".to_string(), Role::Admin)
}

fn cashier() -> Session {
    Session::new(Uuid::new_v4(), "Bob".to_string(), Role::Cashier)
}

fn item(name: &str, quantity: i32) -> InventoryItem {
    InventoryItem {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: "general".to_string(),
        quantity,
        cost_price: dec("3.00"),
        sales_price: dec("5.00"),
        low_stock_threshold: 5,
        last_updated: Utc::now(),
    }
}

fn line(item_id: Uuid, quantity: i32, price: &str, cost: &str) -> SaleLine {
    SaleLine {
        item_id,
        quantity,
        price_at_sale: dec(price),
        cost_at_sale: dec(cost),
    }
}

/// Seed a gateway, load a store from it, and hand both back.
async fn store_with(items: Vec<InventoryItem>) -> (RetailStore, Arc<MemoryGateway>) {
    let gateway = Arc::new(MemoryGateway::new());
    gateway.seed_inventory(items);
    let mut store = RetailStore::new(gateway.clone());
    store.refresh_all().await.unwrap();
    (store, gateway)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_sale_decrements_stock_and_records_totals() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, gateway) = store_with(vec![soap]).await;

        let sale = store
            .complete_sale(&cashier(), vec![line(soap_id, 3, "5.00", "3.00")])
            .await
            .unwrap();

        assert_eq!(sale.total_amount, dec("15.00"));
        assert_eq!(sale.total_profit, dec("6.00"));
        assert_eq!(store.inventory()[0].quantity, 7);
        assert_eq!(store.sales().len(), 1);

        // The remote store saw the same absolute quantity.
        let remote = gateway.list_inventory().await.unwrap();
        assert_eq!(remote[0].quantity, 7);
        assert_eq!(gateway.list_sales().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_lines_decrement_once_per_distinct_item() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, _gateway) = store_with(vec![soap]).await;

        // Same item scanned on two separate lines.
        store
            .complete_sale(
                &cashier(),
                vec![
                    line(soap_id, 2, "5.00", "3.00"),
                    line(soap_id, 3, "5.00", "3.00"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(store.inventory()[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_stock_may_go_negative() {
        let soap = item("Soap", 2);
        let soap_id = soap.id;
        let (mut store, _gateway) = store_with(vec![soap]).await;

        store
            .complete_sale(&cashier(), vec![line(soap_id, 5, "5.00", "3.00")])
            .await
            .unwrap();

        assert_eq!(store.inventory()[0].quantity, -3);
    }

    #[tokio::test]
    async fn test_line_for_missing_item_is_a_silent_no_op() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, gateway) = store_with(vec![soap]).await;

        let sale = store
            .complete_sale(
                &cashier(),
                vec![
                    line(soap_id, 1, "5.00", "3.00"),
                    line(Uuid::new_v4(), 4, "2.00", "1.00"),
                ],
            )
            .await
            .unwrap();

        // The ghost line still contributes to the totals.
        assert_eq!(sale.total_amount, dec("13.00"));
        // But no item is created or touched for it.
        assert_eq!(store.inventory().len(), 1);
        assert_eq!(store.inventory()[0].quantity, 9);
        assert_eq!(gateway.list_inventory().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_denormalized_name_captured_at_sale_time() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, _gateway) = store_with(vec![soap]).await;

        let sale = store
            .complete_sale(&cashier(), vec![line(soap_id, 1, "5.00", "3.00")])
            .await
            .unwrap();

        assert_eq!(sale.items[0].name, "Soap");
    }

    #[tokio::test]
    async fn test_empty_sale_rejected() {
        let (mut store, _gateway) = store_with(vec![]).await;
        let result = store.complete_sale(&cashier(), vec![]).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_zero_quantity_line_rejected() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, _gateway) = store_with(vec![soap]).await;
        let result = store
            .complete_sale(&cashier(), vec![line(soap_id, 0, "5.00", "3.00")])
            .await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_admin_can_also_run_checkout() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, _gateway) = store_with(vec![soap]).await;
        assert!(store
            .complete_sale(&admin(), vec![line(soap_id, 1, "5.00", "3.00")])
            .await
            .is_ok());
    }
}

// ============================================================================
// Reconciliation Tests
// ============================================================================

#[cfg(test)]
mod reconciliation_tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_sale_insert_discards_local_delta() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, gateway) = store_with(vec![soap]).await;

        // Every write fails: the sale insert itself is rejected.
        gateway.fail_after_writes(0);
        let result = store
            .complete_sale(&cashier(), vec![line(soap_id, 3, "5.00", "3.00")])
            .await;

        assert!(matches!(result, Err(AppError::RemoteStore(_))));
        // Snapshots match a fresh authoritative read: nothing changed.
        assert_eq!(store.sales().len(), 0);
        assert_eq!(store.inventory()[0].quantity, 10);
        assert_eq!(gateway.list_sales().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_partial_commit_resynchronizes_to_remote_truth() {
        let soap = item("Soap", 10);
        let soap_id = soap.id;
        let (mut store, gateway) = store_with(vec![soap]).await;

        // The sale insert lands, the quantity update does not.
        gateway.fail_after_writes(1);
        let result = store
            .complete_sale(&cashier(), vec![line(soap_id, 3, "5.00", "3.00")])
            .await;

        assert!(result.is_err());
        // Local state equals what the remote store actually holds now: the
        // sale record exists, the decrement was never applied.
        assert_eq!(store.sales().len(), 1);
        assert_eq!(store.inventory()[0].quantity, 10);
        assert_eq!(store.inventory()[0].quantity, gateway.list_inventory().await.unwrap()[0].quantity);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// Stock decreases by exactly the summed line quantity.
        #[test]
        fn prop_sale_decrements_by_summed_quantity(
            initial in 0i32..1000,
            quantities in prop::collection::vec(1i32..50, 1..5)
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let soap = item("Soap", initial);
                let soap_id = soap.id;
                let (mut store, _gateway) = store_with(vec![soap]).await;

                let lines: Vec<SaleLine> = quantities
                    .iter()
                    .map(|q| line(soap_id, *q, "5.00", "3.00"))
                    .collect();
                let sold: i32 = quantities.iter().sum();

                store.complete_sale(&cashier(), lines).await.unwrap();
                prop_assert_eq!(store.inventory()[0].quantity, initial - sold);
                Ok(())
            })?;
        }

        /// total_profit is total_amount minus summed line costs.
        #[test]
        fn prop_profit_is_revenue_minus_cost(
            quantity in 1i32..100,
            price_cents in 0i64..100_000,
            cost_cents in 0i64..100_000
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let price = Decimal::new(price_cents, 2);
                let cost = Decimal::new(cost_cents, 2);
                let soap = item("Soap", 1000);
                let soap_id = soap.id;
                let (mut store, _gateway) = store_with(vec![soap]).await;

                let sale = store
                    .complete_sale(
                        &cashier(),
                        vec![SaleLine {
                            item_id: soap_id,
                            quantity,
                            price_at_sale: price,
                            cost_at_sale: cost,
                        }],
                    )
                    .await
                    .unwrap();

                let qty = Decimal::from(quantity);
                prop_assert_eq!(sale.total_amount, price * qty);
                prop_assert_eq!(sale.total_profit, (price - cost) * qty);
                Ok(())
            })?;
        }
    }
}
