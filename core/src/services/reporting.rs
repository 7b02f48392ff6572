//! Reporting helpers for the dashboards
//!
//! Pure functions over the current snapshots. Deterministic, side-effect
//! free, and recomputed from scratch on every call. There is no caching
//! layer and no incremental update.

use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use shared::{ExpenseRecord, InventoryItem, SaleRecord};

use crate::error::{AppError, AppResult};
use crate::store::Snapshots;

/// Dashboard roll-up of the financial aggregates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardMetrics {
    pub total_revenue: Decimal,
    pub total_profit: Decimal,
    pub cost_of_goods_sold: Decimal,
    pub gross_profit: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    pub inventory_valuation: Decimal,
    pub low_stock_count: usize,
}

/// One day of the trailing sales series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailySalesPoint {
    pub date: NaiveDate,
    pub total: Decimal,
    pub profit: Decimal,
}

/// Σ of committed sale totals.
pub fn total_revenue(sales: &[SaleRecord]) -> Decimal {
    sales.iter().map(|s| s.total_amount).sum()
}

/// Σ of committed sale profits.
pub fn total_profit(sales: &[SaleRecord]) -> Decimal {
    sales.iter().map(|s| s.total_profit).sum()
}

/// Σ over all sale lines of cost_at_sale × quantity.
pub fn cost_of_goods_sold(sales: &[SaleRecord]) -> Decimal {
    sales
        .iter()
        .flat_map(|s| s.items.iter())
        .map(|item| item.line_cost())
        .sum()
}

/// Revenue minus cost of goods sold.
pub fn gross_profit(sales: &[SaleRecord]) -> Decimal {
    total_revenue(sales) - cost_of_goods_sold(sales)
}

pub fn total_expenses(expenses: &[ExpenseRecord]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// Gross profit minus expenses.
pub fn net_income(sales: &[SaleRecord], expenses: &[ExpenseRecord]) -> Decimal {
    gross_profit(sales) - total_expenses(expenses)
}

/// Σ of cost_price × quantity over the catalog.
pub fn inventory_valuation(inventory: &[InventoryItem]) -> Decimal {
    inventory.iter().map(InventoryItem::stock_value).sum()
}

/// Items at or below their low-stock threshold.
pub fn low_stock_count(inventory: &[InventoryItem]) -> usize {
    inventory.iter().filter(|i| i.is_low_stock()).count()
}

/// Everything the dashboard header shows, in one pass over the snapshots.
pub fn dashboard_metrics(snapshots: &Snapshots) -> DashboardMetrics {
    DashboardMetrics {
        total_revenue: total_revenue(&snapshots.sales),
        total_profit: total_profit(&snapshots.sales),
        cost_of_goods_sold: cost_of_goods_sold(&snapshots.sales),
        gross_profit: gross_profit(&snapshots.sales),
        total_expenses: total_expenses(&snapshots.expenses),
        net_income: net_income(&snapshots.sales, &snapshots.expenses),
        inventory_valuation: inventory_valuation(&snapshots.inventory),
        low_stock_count: low_stock_count(&snapshots.inventory),
    }
}

/// Seven-day trailing daily sales series, inclusive range [today-6, today].
///
/// Sales bucket by their local calendar date; the caller supplies `today`
/// (normally `Local::now().date_naive()`). Days without sales appear with
/// zero totals so the chart always has seven points.
pub fn daily_sales_series(sales: &[SaleRecord], today: NaiveDate) -> Vec<DailySalesPoint> {
    let mut series: Vec<DailySalesPoint> = (0..7)
        .map(|i| DailySalesPoint {
            date: today - Duration::days(6 - i),
            total: Decimal::ZERO,
            profit: Decimal::ZERO,
        })
        .collect();

    for sale in sales {
        let day = sale.timestamp.with_timezone(&Local).date_naive();
        if let Some(point) = series.iter_mut().find(|p| p.date == day) {
            point.total += sale.total_amount;
            point.profit += sale.total_profit;
        }
    }

    series
}

/// Export report rows as CSV.
pub fn export_to_csv<T: Serialize>(rows: &[T]) -> AppResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
    }
    let data = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV writer error: {}", e)))?;
    String::from_utf8(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("UTF-8 conversion error: {}", e)))
}
