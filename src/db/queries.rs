//! The fixed catalogue of aggregate read queries.
//!
//! All sales queries count non-cancelled orders only (pending, preparing,
//! ready and completed all count). Window parameters arrive as a cutoff date
//! computed by the caller so results are reproducible in tests.
//!
//! Queries over uncertain schema (inventory logs, stock column naming) are
//! ordered candidate lists tried in sequence: first success wins, last
//! failure yields an empty result rather than an error.

use chrono::NaiveDate;
use rusqlite::Connection;

use super::DbError;
use crate::config::AnalyticsConfig;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// One calendar day with at least one non-cancelled order. Days without
/// orders are absent, not zero-filled.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total: f64,
}

/// Units sold per menu item over a window. Zero-sale items are retained
/// through the outer join.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSales {
    pub id: i64,
    pub name: String,
    pub qty: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCount {
    pub method: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LowStockItem {
    pub name: String,
    pub stock: i64,
}

/// Signed net stock change for one item over the current day.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDelta {
    pub name: String,
    pub change: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockSnapshot {
    pub name: String,
    pub stock: i64,
}

/// Result of the inventory-activity lookup, coarsening as schema support
/// drops away.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryReport {
    /// Per-item net change for today, from the inventory log.
    Deltas(Vec<InventoryDelta>),
    /// The log is unavailable; items whose stock was touched today, with the
    /// current level only.
    UpdatedToday(Vec<StockSnapshot>),
    /// Neither view of today's activity could be read.
    Unavailable,
}

/// 7x24 order counts, weekday (Sunday = 0) by hour of day.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub counts: [[u32; 24]; 7],
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            counts: [[0; 24]; 7],
        }
    }
}

impl Heatmap {
    /// The (weekday, hour, count) cell with the highest count, if any orders
    /// exist. Ties resolve to the first cell in row-major scan order.
    pub fn busiest_cell(&self) -> Option<(usize, usize, u32)> {
        let mut best: Option<(usize, usize, u32)> = None;
        for (day, row) in self.counts.iter().enumerate() {
            for (hour, &count) in row.iter().enumerate() {
                if count > 0 && best.map_or(true, |(_, _, c)| count > c) {
                    best = Some((day, hour, count));
                }
            }
        }
        best
    }

    pub fn total_orders(&self) -> u64 {
        self.counts
            .iter()
            .flat_map(|row| row.iter())
            .map(|&c| u64::from(c))
            .sum()
    }

    pub fn to_matrix(&self) -> Vec<Vec<u32>> {
        self.counts.iter().map(|row| row.to_vec()).collect()
    }
}

/// Everything the engine needs from the data store for one request.
#[derive(Debug, Clone, Default)]
pub struct AggregateBundle {
    pub total_sales: f64,
    pub short_series: Vec<DailySales>,
    pub long_series: Vec<DailySales>,
    pub short_total: f64,
    pub short_order_count: i64,
    pub item_sales: Vec<ItemSales>,
    pub payments: Vec<PaymentCount>,
    pub low_stock: Vec<LowStockItem>,
    pub heatmap: Heatmap,
}

fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// All-time total over non-cancelled orders.
pub fn total_sales(conn: &Connection) -> Result<f64, DbError> {
    let total = conn.query_row(
        "SELECT COALESCE(SUM(total), 0) FROM orders WHERE status <> 'cancelled'",
        [],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Per-day sales totals from `since` (inclusive) onward, ascending by date.
pub fn daily_sales(conn: &Connection, since: NaiveDate) -> Result<Vec<DailySales>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT date(created_at) AS day, COALESCE(SUM(total), 0) AS total_sales
         FROM orders
         WHERE status <> 'cancelled' AND date(created_at) >= ?1
         GROUP BY day
         ORDER BY day",
    )?;

    let rows = stmt
        .query_map([date_param(since)], |row| {
            let day: String = row.get(0)?;
            let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d").map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(DailySales {
                date,
                total: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Window total and order count in one scan.
pub fn window_totals(conn: &Connection, since: NaiveDate) -> Result<(f64, i64), DbError> {
    let totals = conn.query_row(
        "SELECT COALESCE(SUM(total), 0), COUNT(*)
         FROM orders
         WHERE status <> 'cancelled' AND date(created_at) >= ?1",
        [date_param(since)],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(totals)
}

/// Units sold per menu item within the window. The outer join keeps items
/// that never sold, with qty 0; cancelled orders contribute nothing.
pub fn item_sales(conn: &Connection, since: NaiveDate) -> Result<Vec<ItemSales>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT mi.id, mi.name,
                COALESCE(SUM(CASE
                    WHEN o.id IS NOT NULL
                         AND o.status <> 'cancelled'
                         AND date(o.created_at) >= ?1
                    THEN oi.quantity
                END), 0) AS qty
         FROM menu_items mi
         LEFT JOIN order_items oi ON oi.menu_item_id = mi.id
         LEFT JOIN orders o ON o.id = oi.order_id
         GROUP BY mi.id, mi.name
         ORDER BY mi.id",
    )?;

    let rows = stmt
        .query_map([date_param(since)], |row| {
            Ok(ItemSales {
                id: row.get(0)?,
                name: row.get(1)?,
                qty: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Order counts per uppercased payment method. Orders without a recorded
/// method are excluded entirely.
pub fn payment_breakdown(conn: &Connection, since: NaiveDate) -> Result<Vec<PaymentCount>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT UPPER(payment_method) AS method, COUNT(*) AS orders
         FROM orders
         WHERE status <> 'cancelled'
           AND payment_method IS NOT NULL
           AND date(created_at) >= ?1
         GROUP BY method
         ORDER BY orders DESC, method",
    )?;

    let rows = stmt
        .query_map([date_param(since)], |row| {
            Ok(PaymentCount {
                method: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Items at or below the stock threshold, lowest first. The stock column is
/// named `stock` or `stock_qty` depending on schema vintage; candidates are
/// tried in order and total failure degrades to an empty list.
pub fn low_stock(
    conn: &Connection,
    threshold: i64,
    limit: usize,
) -> Result<Vec<LowStockItem>, DbError> {
    const CANDIDATES: [&str; 2] = [
        "SELECT name, stock FROM menu_items
         WHERE stock <= ?1 ORDER BY stock ASC, name ASC LIMIT ?2",
        "SELECT name, stock_qty FROM menu_items
         WHERE stock_qty <= ?1 ORDER BY stock_qty ASC, name ASC LIMIT ?2",
    ];

    for sql in CANDIDATES {
        let result = conn.prepare(sql).and_then(|mut stmt| {
            stmt.query_map(rusqlite::params![threshold, limit as i64], |row| {
                Ok(LowStockItem {
                    name: row.get(0)?,
                    stock: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
        });
        match result {
            Ok(items) => return Ok(items),
            Err(e) => {
                tracing::debug!("[queries] low-stock candidate failed, trying next: {}", e)
            }
        }
    }

    tracing::warn!("[queries] no usable stock column on menu_items, reporting none");
    Ok(Vec::new())
}

/// Order counts per (weekday, hour) cell within the window.
pub fn order_heatmap(conn: &Connection, since: NaiveDate) -> Result<Heatmap, DbError> {
    let mut stmt = conn.prepare(
        "SELECT CAST(strftime('%w', created_at) AS INTEGER) AS wd,
                CAST(strftime('%H', created_at) AS INTEGER) AS hr,
                COUNT(*)
         FROM orders
         WHERE status <> 'cancelled' AND date(created_at) >= ?1
         GROUP BY wd, hr",
    )?;

    let mut heatmap = Heatmap::default();
    let cells = stmt
        .query_map([date_param(since)], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for (wd, hr, count) in cells {
        if (0..7).contains(&wd) && (0..24).contains(&hr) {
            heatmap.counts[wd as usize][hr as usize] = count.max(0) as u32;
        }
    }

    Ok(heatmap)
}

/// Today's inventory activity. Tries the log with both known column names,
/// then falls back to a plain "touched today" stock snapshot.
pub fn inventory_activity(conn: &Connection, today: NaiveDate) -> InventoryReport {
    const DELTA_CANDIDATES: [&str; 2] = [
        "SELECT mi.name, COALESCE(SUM(il.quantity_change), 0) AS net
         FROM inventory_logs il
         JOIN menu_items mi ON mi.id = il.menu_item_id
         WHERE date(il.created_at) = ?1
         GROUP BY mi.name
         ORDER BY mi.name",
        "SELECT mi.name, COALESCE(SUM(il.change), 0) AS net
         FROM inventory_logs il
         JOIN menu_items mi ON mi.id = il.menu_item_id
         WHERE date(il.created_at) = ?1
         GROUP BY mi.name
         ORDER BY mi.name",
    ];

    for sql in DELTA_CANDIDATES {
        let result = conn.prepare(sql).and_then(|mut stmt| {
            stmt.query_map([date_param(today)], |row| {
                Ok(InventoryDelta {
                    name: row.get(0)?,
                    change: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
        });
        match result {
            Ok(deltas) => return InventoryReport::Deltas(deltas),
            Err(e) => {
                tracing::debug!("[queries] inventory-log candidate failed, trying next: {}", e)
            }
        }
    }

    const SNAPSHOT_CANDIDATES: [&str; 2] = [
        "SELECT name, stock FROM menu_items WHERE date(updated_at) = ?1 ORDER BY name",
        "SELECT name, stock_qty FROM menu_items WHERE date(updated_at) = ?1 ORDER BY name",
    ];

    for sql in SNAPSHOT_CANDIDATES {
        let result = conn.prepare(sql).and_then(|mut stmt| {
            stmt.query_map([date_param(today)], |row| {
                Ok(StockSnapshot {
                    name: row.get(0)?,
                    stock: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
        });
        match result {
            Ok(snapshots) => return InventoryReport::UpdatedToday(snapshots),
            Err(e) => {
                tracing::debug!("[queries] stock-snapshot candidate failed, trying next: {}", e)
            }
        }
    }

    tracing::warn!("[queries] inventory activity is unavailable in this schema");
    InventoryReport::Unavailable
}

/// Registered user emails, oldest account first.
pub fn user_emails(conn: &Connection) -> Result<Vec<String>, DbError> {
    let mut stmt = conn.prepare("SELECT email FROM users ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// The whole fetch phase for one request. Any error here degrades every
/// aggregate at once; partial bundles are never returned.
pub fn fetch_aggregates(
    conn: &Connection,
    today: NaiveDate,
    short_days: i64,
    long_days: i64,
    cfg: &AnalyticsConfig,
) -> Result<AggregateBundle, DbError> {
    let short_since = today - chrono::Duration::days(short_days);
    let long_since = today - chrono::Duration::days(long_days);

    let total = total_sales(conn)?;
    let short_series = daily_sales(conn, short_since)?;
    let long_series = daily_sales(conn, long_since)?;
    let (short_total, short_order_count) = window_totals(conn, short_since)?;
    let items = item_sales(conn, short_since)?;
    let payments = payment_breakdown(conn, short_since)?;
    let stock = low_stock(conn, cfg.low_stock_threshold, cfg.low_stock_limit)?;
    let heatmap = order_heatmap(conn, short_since)?;

    Ok(AggregateBundle {
        total_sales: total,
        short_series,
        long_series,
        short_total,
        short_order_count,
        item_sales: items,
        payments,
        low_stock: stock,
        heatmap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use rusqlite::params;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory database");
        init_schema(&conn).expect("schema");
        conn
    }

    fn insert_item(conn: &Connection, name: &str, stock: i64) -> i64 {
        conn.execute(
            "INSERT INTO menu_items (name, price, stock) VALUES (?1, 3.5, ?2)",
            params![name, stock],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn insert_order(
        conn: &Connection,
        status: &str,
        total: f64,
        method: Option<&str>,
        created_at: &str,
    ) -> i64 {
        conn.execute(
            "INSERT INTO orders (status, total, payment_method, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![status, total, method, created_at],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    fn insert_order_item(conn: &Connection, order_id: i64, item_id: i64, qty: i64) {
        conn.execute(
            "INSERT INTO order_items (order_id, menu_item_id, quantity) VALUES (?1, ?2, ?3)",
            params![order_id, item_id, qty],
        )
        .unwrap();
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn total_sales_excludes_cancelled() {
        let conn = setup();
        insert_order(&conn, "completed", 10.0, Some("cash"), "2026-08-01 12:00:00");
        insert_order(&conn, "pending", 5.0, Some("cash"), "2026-08-02 12:00:00");
        insert_order(&conn, "cancelled", 99.0, Some("cash"), "2026-08-02 13:00:00");

        let total = total_sales(&conn).unwrap();
        assert_eq!(total, 15.0);
    }

    #[test]
    fn daily_sales_groups_and_orders_ascending() {
        let conn = setup();
        insert_order(&conn, "completed", 10.0, None, "2026-08-03 09:00:00");
        insert_order(&conn, "completed", 5.0, None, "2026-08-01 12:00:00");
        insert_order(&conn, "ready", 2.5, None, "2026-08-03 18:00:00");

        let series = daily_sales(&conn, day("2026-08-01")).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date, day("2026-08-01"));
        assert_eq!(series[0].total, 5.0);
        assert_eq!(series[1].date, day("2026-08-03"));
        assert_eq!(series[1].total, 12.5);
    }

    #[test]
    fn item_sales_keeps_zero_sale_items() {
        let conn = setup();
        let latte = insert_item(&conn, "Latte", 50);
        let _tea = insert_item(&conn, "Tea", 50);
        let order = insert_order(&conn, "completed", 7.0, None, "2026-08-02 10:00:00");
        insert_order_item(&conn, order, latte, 2);

        let items = item_sales(&conn, day("2026-08-01")).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Latte");
        assert_eq!(items[0].qty, 2);
        assert_eq!(items[1].name, "Tea");
        assert_eq!(items[1].qty, 0);
    }

    #[test]
    fn item_sales_ignores_cancelled_and_out_of_window() {
        let conn = setup();
        let latte = insert_item(&conn, "Latte", 50);
        let cancelled = insert_order(&conn, "cancelled", 7.0, None, "2026-08-02 10:00:00");
        insert_order_item(&conn, cancelled, latte, 5);
        let old = insert_order(&conn, "completed", 7.0, None, "2026-07-01 10:00:00");
        insert_order_item(&conn, old, latte, 3);

        let items = item_sales(&conn, day("2026-08-01")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].qty, 0);
    }

    #[test]
    fn payment_breakdown_uppercases_and_skips_null() {
        let conn = setup();
        insert_order(&conn, "completed", 5.0, Some("cash"), "2026-08-02 10:00:00");
        insert_order(&conn, "completed", 5.0, Some("Cash"), "2026-08-02 11:00:00");
        insert_order(&conn, "completed", 5.0, Some("qr"), "2026-08-02 12:00:00");
        insert_order(&conn, "completed", 5.0, None, "2026-08-02 13:00:00");

        let payments = payment_breakdown(&conn, day("2026-08-01")).unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].method, "CASH");
        assert_eq!(payments[0].count, 2);
        assert_eq!(payments[1].method, "QR");
        assert_eq!(payments[1].count, 1);
    }

    #[test]
    fn low_stock_orders_by_stock_then_name() {
        let conn = setup();
        insert_item(&conn, "Muffin", 3);
        insert_item(&conn, "Bagel", 3);
        insert_item(&conn, "Croissant", 1);
        insert_item(&conn, "Latte", 40);

        let items = low_stock(&conn, 5, 10).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Croissant", "Bagel", "Muffin"]);
    }

    #[test]
    fn low_stock_falls_back_to_stock_qty_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE menu_items (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                stock_qty INTEGER NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            INSERT INTO menu_items (name, stock_qty) VALUES ('Scone', 2);",
        )
        .unwrap();

        let items = low_stock(&conn, 5, 10).unwrap();
        assert_eq!(items, vec![LowStockItem { name: "Scone".into(), stock: 2 }]);
    }

    #[test]
    fn low_stock_degrades_to_empty_without_stock_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE menu_items (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();

        let items = low_stock(&conn, 5, 10).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn heatmap_counts_by_weekday_and_hour() {
        let conn = setup();
        // 2026-08-02 is a Sunday.
        insert_order(&conn, "completed", 5.0, None, "2026-08-02 12:15:00");
        insert_order(&conn, "completed", 5.0, None, "2026-08-02 12:45:00");
        insert_order(&conn, "completed", 5.0, None, "2026-08-03 08:05:00");
        insert_order(&conn, "cancelled", 5.0, None, "2026-08-03 08:10:00");

        let heatmap = order_heatmap(&conn, day("2026-08-01")).unwrap();
        assert_eq!(heatmap.counts[0][12], 2);
        assert_eq!(heatmap.counts[1][8], 1);
        assert_eq!(heatmap.total_orders(), 3);
        assert_eq!(heatmap.busiest_cell(), Some((0, 12, 2)));
    }

    #[test]
    fn busiest_cell_tie_resolves_in_scan_order() {
        let mut heatmap = Heatmap::default();
        heatmap.counts[2][9] = 4;
        heatmap.counts[5][17] = 4;
        assert_eq!(heatmap.busiest_cell(), Some((2, 9, 4)));
    }

    #[test]
    fn inventory_activity_prefers_quantity_change_log() {
        let conn = setup();
        let latte = insert_item(&conn, "Latte", 50);
        conn.execute(
            "INSERT INTO inventory_logs (menu_item_id, quantity_change, created_at)
             VALUES (?1, -5, '2026-08-02 09:00:00'), (?1, 12, '2026-08-02 15:00:00')",
            params![latte],
        )
        .unwrap();

        let report = inventory_activity(&conn, day("2026-08-02"));
        assert_eq!(
            report,
            InventoryReport::Deltas(vec![InventoryDelta { name: "Latte".into(), change: 7 }])
        );
    }

    #[test]
    fn inventory_activity_uses_change_column_when_needed() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE menu_items (id INTEGER PRIMARY KEY, name TEXT NOT NULL,
                 stock INTEGER NOT NULL DEFAULT 0,
                 updated_at DATETIME DEFAULT CURRENT_TIMESTAMP);
            CREATE TABLE inventory_logs (id INTEGER PRIMARY KEY, menu_item_id INTEGER,
                 change INTEGER NOT NULL, created_at DATETIME);
            INSERT INTO menu_items (id, name) VALUES (1, 'Tea');
            INSERT INTO inventory_logs (menu_item_id, change, created_at)
                 VALUES (1, -2, '2026-08-02 10:00:00');",
        )
        .unwrap();

        let report = inventory_activity(&conn, day("2026-08-02"));
        assert_eq!(
            report,
            InventoryReport::Deltas(vec![InventoryDelta { name: "Tea".into(), change: -2 }])
        );
    }

    #[test]
    fn inventory_activity_falls_back_to_updated_today() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE menu_items (id INTEGER PRIMARY KEY, name TEXT NOT NULL,
                 stock INTEGER NOT NULL DEFAULT 0,
                 updated_at DATETIME DEFAULT CURRENT_TIMESTAMP);
            INSERT INTO menu_items (name, stock, updated_at)
                 VALUES ('Tea', 9, '2026-08-02 10:00:00');
            INSERT INTO menu_items (name, stock, updated_at)
                 VALUES ('Latte', 4, '2026-07-30 10:00:00');",
        )
        .unwrap();

        let report = inventory_activity(&conn, day("2026-08-02"));
        assert_eq!(
            report,
            InventoryReport::UpdatedToday(vec![StockSnapshot { name: "Tea".into(), stock: 9 }])
        );
    }

    #[test]
    fn inventory_activity_unavailable_without_any_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE menu_items (id INTEGER PRIMARY KEY, name TEXT);")
            .unwrap();

        let report = inventory_activity(&conn, day("2026-08-02"));
        assert_eq!(report, InventoryReport::Unavailable);
    }

    #[test]
    fn fetch_aggregates_builds_a_full_bundle() {
        let conn = setup();
        let latte = insert_item(&conn, "Latte", 2);
        let order = insert_order(&conn, "completed", 9.0, Some("cash"), "2026-08-02 12:00:00");
        insert_order_item(&conn, order, latte, 3);

        let cfg = AnalyticsConfig::default();
        let bundle = fetch_aggregates(&conn, day("2026-08-03"), 7, 30, &cfg).unwrap();

        assert_eq!(bundle.total_sales, 9.0);
        assert_eq!(bundle.short_series.len(), 1);
        assert_eq!(bundle.short_total, 9.0);
        assert_eq!(bundle.short_order_count, 1);
        assert_eq!(bundle.item_sales[0].qty, 3);
        assert_eq!(bundle.payments[0].method, "CASH");
        assert_eq!(bundle.low_stock.len(), 1);
        assert_eq!(bundle.heatmap.total_orders(), 1);
    }
}
