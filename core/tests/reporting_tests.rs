//! Tests for the reporting aggregations
//!
//! Pure-function coverage: financial roll-ups, the seven-day sales window,
//! and CSV export.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::{ExpenseRecord, InventoryItem, SaleItem, SaleRecord};
use shopkeeper_core::services::reporting;
use shopkeeper_core::Snapshots;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sale(quantity: i32, price: &str, cost: &str, timestamp: DateTime<Utc>) -> SaleRecord {
    SaleRecord::new(
        vec![SaleItem {
            item_id: Uuid::new_v4(),
            name: "test".to_string(),
            quantity,
            price_at_sale: dec(price),
            cost_at_sale: dec(cost),
        }],
        timestamp,
    )
}

fn expense(amount: &str) -> ExpenseRecord {
    ExpenseRecord::new(
        "rent".to_string(),
        dec(amount),
        "overhead".to_string(),
        Utc::now().date_naive(),
    )
}

fn item(quantity: i32, cost: &str, threshold: i32) -> InventoryItem {
    InventoryItem {
        id: Uuid::new_v4(),
        name: "test".to_string(),
        category: "general".to_string(),
        quantity,
        cost_price: dec(cost),
        sales_price: dec("9.99"),
        low_stock_threshold: threshold,
        last_updated: Utc::now(),
    }
}

/// Noon on the given local calendar date, as a UTC instant. Noon keeps the
/// instant on the same local date regardless of the host timezone offset.
fn local_noon(date: NaiveDate) -> DateTime<Utc> {
    Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

// ============================================================================
// Financial Aggregation Tests
// ============================================================================

#[cfg(test)]
mod aggregation_tests {
    use super::*;

    #[test]
    fn test_dashboard_metrics_roll_up() {
        let snapshots = Snapshots {
            inventory: vec![item(10, "2.00", 5), item(3, "4.00", 5)],
            sales: vec![
                sale(2, "5.00", "3.00", Utc::now()),
                sale(1, "10.00", "4.00", Utc::now()),
            ],
            expenses: vec![expense("7.00"), expense("3.00")],
            purchase_orders: vec![],
        };

        let metrics = reporting::dashboard_metrics(&snapshots);

        assert_eq!(metrics.total_revenue, dec("20.00"));
        assert_eq!(metrics.cost_of_goods_sold, dec("10.00"));
        assert_eq!(metrics.gross_profit, dec("10.00"));
        assert_eq!(metrics.total_profit, dec("10.00"));
        assert_eq!(metrics.total_expenses, dec("10.00"));
        assert_eq!(metrics.net_income, Decimal::ZERO);
        // 10 × 2.00 + 3 × 4.00
        assert_eq!(metrics.inventory_valuation, dec("32.00"));
        // Only the 3-unit item sits at or below its threshold.
        assert_eq!(metrics.low_stock_count, 1);
    }

    #[test]
    fn test_metrics_on_empty_snapshots_are_zero() {
        let metrics = reporting::dashboard_metrics(&Snapshots::default());
        assert_eq!(metrics.total_revenue, Decimal::ZERO);
        assert_eq!(metrics.net_income, Decimal::ZERO);
        assert_eq!(metrics.inventory_valuation, Decimal::ZERO);
        assert_eq!(metrics.low_stock_count, 0);
    }

    #[test]
    fn test_low_stock_is_inclusive_at_threshold() {
        let inventory = vec![item(5, "1.00", 5), item(6, "1.00", 5)];
        assert_eq!(reporting::low_stock_count(&inventory), 1);
    }
}

// ============================================================================
// Daily Sales Window Tests
// ============================================================================

#[cfg(test)]
mod daily_window_tests {
    use super::*;

    #[test]
    fn test_series_always_has_seven_zero_filled_points() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let series = reporting::daily_sales_series(&[], today);

        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, today - Duration::days(6));
        assert_eq!(series[6].date, today);
        assert!(series.iter().all(|p| p.total == Decimal::ZERO));
    }

    #[test]
    fn test_window_boundaries_are_inclusive_of_today_and_six_days_back() {
        let today = Local::now().date_naive();
        let sales = vec![
            sale(1, "1.00", "0.50", local_noon(today)),
            sale(1, "2.00", "0.50", local_noon(today - Duration::days(6))),
            // One day too old: outside the window entirely.
            sale(1, "4.00", "0.50", local_noon(today - Duration::days(7))),
        ];

        let series = reporting::daily_sales_series(&sales, today);

        assert_eq!(series[6].total, dec("1.00"));
        assert_eq!(series[0].total, dec("2.00"));
        let window_total: Decimal = series.iter().map(|p| p.total).sum();
        assert_eq!(window_total, dec("3.00"));
    }

    #[test]
    fn test_same_day_sales_accumulate() {
        let today = Local::now().date_naive();
        let day = today - Duration::days(2);
        let sales = vec![
            sale(1, "1.50", "1.00", local_noon(day)),
            sale(2, "2.00", "1.00", local_noon(day)),
        ];

        let series = reporting::daily_sales_series(&sales, today);
        let point = series.iter().find(|p| p.date == day).unwrap();

        assert_eq!(point.total, dec("5.50"));
        assert_eq!(point.profit, dec("2.50"));
    }
}

// ============================================================================
// CSV Export Tests
// ============================================================================

#[cfg(test)]
mod export_tests {
    use super::*;

    #[test]
    fn test_sales_export_includes_totals() {
        let rows: Vec<reporting::DailySalesPoint> = reporting::daily_sales_series(
            &[sale(
                2,
                "5.00",
                "3.00",
                local_noon(Local::now().date_naive()),
            )],
            Local::now().date_naive(),
        );
        let csv = reporting::export_to_csv(&rows).unwrap();

        assert!(csv.starts_with("date,total,profit"));
        assert!(csv.contains("10.00,4.00"));
    }

    #[test]
    fn test_export_of_no_rows_is_empty() {
        let rows: Vec<reporting::DailySalesPoint> = vec![];
        assert_eq!(reporting::export_to_csv(&rows).unwrap(), "");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn sales_strategy() -> impl Strategy<Value = Vec<SaleRecord>> {
        prop::collection::vec(
            (1i32..50, 0i64..10_000, 0i64..10_000).prop_map(|(qty, price, cost)| {
                sale(
                    qty,
                    &Decimal::new(price, 2).to_string(),
                    &Decimal::new(cost, 2).to_string(),
                    Utc::now(),
                )
            }),
            0..20,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Revenue is the plain sum of committed sale totals.
        #[test]
        fn prop_revenue_is_sum_of_sale_totals(sales in sales_strategy()) {
            let expected: Decimal = sales.iter().map(|s| s.total_amount).sum();
            prop_assert_eq!(reporting::total_revenue(&sales), expected);
        }

        /// Gross profit and per-sale profit agree, both being
        /// revenue minus cost of goods sold.
        #[test]
        fn prop_gross_profit_matches_summed_sale_profit(sales in sales_strategy()) {
            prop_assert_eq!(
                reporting::gross_profit(&sales),
                reporting::total_profit(&sales)
            );
        }

        /// Net income is gross profit minus expenses, always.
        #[test]
        fn prop_net_income_identity(
            sales in sales_strategy(),
            amounts in prop::collection::vec(0i64..100_000, 0..10)
        ) {
            let expenses: Vec<ExpenseRecord> = amounts
                .iter()
                .map(|a| expense(&Decimal::new(*a, 2).to_string()))
                .collect();
            prop_assert_eq!(
                reporting::net_income(&sales, &expenses),
                reporting::gross_profit(&sales) - reporting::total_expenses(&expenses)
            );
        }

        /// The seven-day series never gains or loses points, whatever the
        /// sales look like.
        #[test]
        fn prop_series_length_fixed(sales in sales_strategy()) {
            let series = reporting::daily_sales_series(&sales, Local::now().date_naive());
            prop_assert_eq!(series.len(), 7);
        }
    }
}
