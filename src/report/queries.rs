//! The fixed single-store analytical reports.
//!
//! Each report is static data — title, SQL, prompted parameters, output
//! columns — consumed by one generic dispatcher. SQL is always bound
//! positionally; user input never reaches the query text.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tabled::builder::Builder;
use uuid::Uuid;

use crate::error::{Error, StoreError, StoreKind};

use super::format_money;

#[derive(Debug, Clone, Copy)]
pub enum PromptKind {
    /// A UUID entity id (user, category).
    EntityId,
    /// A calendar date, `YYYY-MM-DD`.
    Date,
}

pub struct Prompt {
    pub label: &'static str,
    pub kind: PromptKind,
}

#[derive(Debug, Clone, Copy)]
pub enum ColumnKind {
    Text,
    Int32,
    Int64,
    Money,
    Timestamp,
    Id,
}

pub struct ColumnSpec {
    pub name: &'static str,
    pub heading: &'static str,
    pub kind: ColumnKind,
}

pub struct ReportSpec {
    pub title: &'static str,
    pub sql: &'static str,
    pub prompts: &'static [Prompt],
    pub columns: &'static [ColumnSpec],
}

const fn prompt(label: &'static str, kind: PromptKind) -> Prompt {
    Prompt { label, kind }
}

const fn column(name: &'static str, heading: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        heading,
        kind,
    }
}

/// The report catalog, in menu order.
pub const REPORTS: &[ReportSpec] = &[
    ReportSpec {
        title: "Total revenue by seller in a date range",
        sql: "SELECT u.name AS seller, SUM(oi.subtotal) AS revenue \
              FROM products p \
              JOIN users u ON u.user_id = p.user_id \
              JOIN order_items oi ON oi.product_id = p.product_id \
              JOIN orders o ON o.order_id = oi.order_id \
              WHERE u.user_id = $1 AND o.created_at BETWEEN $2 AND $3 \
              GROUP BY u.name",
        prompts: &[
            prompt("Seller id", PromptKind::EntityId),
            prompt("From date (YYYY-MM-DD)", PromptKind::Date),
            prompt("To date (YYYY-MM-DD)", PromptKind::Date),
        ],
        columns: &[
            column("seller", "Seller", ColumnKind::Text),
            column("revenue", "Revenue", ColumnKind::Money),
        ],
    },
    ReportSpec {
        title: "Top categories by units sold, last month",
        sql: "SELECT c.category_name AS category, SUM(oi.quantity) AS units_sold \
              FROM categories c \
              JOIN products p ON p.category_id = c.category_id \
              JOIN order_items oi ON oi.product_id = p.product_id \
              JOIN orders o ON o.order_id = oi.order_id \
              WHERE o.created_at >= NOW() - INTERVAL '1 month' \
              GROUP BY c.category_name \
              ORDER BY units_sold DESC \
              LIMIT 5",
        prompts: &[],
        columns: &[
            column("category", "Category", ColumnKind::Text),
            column("units_sold", "Units sold", ColumnKind::Int64),
        ],
    },
    ReportSpec {
        title: "Active products of a category",
        sql: "SELECT title, price, stock, status \
              FROM products \
              WHERE status = 'active' AND category_id = $1",
        prompts: &[prompt("Category id", PromptKind::EntityId)],
        columns: &[
            column("title", "Title", ColumnKind::Text),
            column("price", "Price", ColumnKind::Money),
            column("stock", "Stock", ColumnKind::Int32),
            column("status", "Status", ColumnKind::Text),
        ],
    },
    ReportSpec {
        title: "Pending orders of a seller",
        sql: "SELECT DISTINCT o.order_id, o.amount, o.status, o.created_at \
              FROM orders o \
              JOIN order_items oi ON oi.order_id = o.order_id \
              JOIN products p ON p.product_id = oi.product_id \
              WHERE o.status = 'pending' AND p.user_id = $1",
        prompts: &[prompt("Seller id", PromptKind::EntityId)],
        columns: &[
            column("order_id", "Order", ColumnKind::Id),
            column("amount", "Amount", ColumnKind::Money),
            column("status", "Status", ColumnKind::Text),
            column("created_at", "Created", ColumnKind::Timestamp),
        ],
    },
    ReportSpec {
        title: "Orders by date range and seller",
        sql: "SELECT DISTINCT o.order_id, o.amount, o.created_at, o.status \
              FROM orders o \
              JOIN order_items oi ON oi.order_id = o.order_id \
              JOIN products p ON p.product_id = oi.product_id \
              WHERE p.user_id = $1 AND o.created_at BETWEEN $2 AND $3 \
              ORDER BY o.created_at",
        prompts: &[
            prompt("Seller id", PromptKind::EntityId),
            prompt("From date (YYYY-MM-DD)", PromptKind::Date),
            prompt("To date (YYYY-MM-DD)", PromptKind::Date),
        ],
        columns: &[
            column("order_id", "Order", ColumnKind::Id),
            column("amount", "Amount", ColumnKind::Money),
            column("created_at", "Created", ColumnKind::Timestamp),
            column("status", "Status", ColumnKind::Text),
        ],
    },
    ReportSpec {
        title: "Best-selling products",
        sql: "SELECT p.title, SUM(oi.quantity) AS units_sold \
              FROM products p \
              JOIN order_items oi ON oi.product_id = p.product_id \
              GROUP BY p.title \
              ORDER BY units_sold DESC \
              LIMIT 10",
        prompts: &[],
        columns: &[
            column("title", "Title", ColumnKind::Text),
            column("units_sold", "Units sold", ColumnKind::Int64),
        ],
    },
    ReportSpec {
        title: "Buyers active in two or more categories",
        sql: "SELECT u.name, COUNT(DISTINCT p.category_id) AS distinct_categories \
              FROM orders o \
              JOIN order_items oi ON oi.order_id = o.order_id \
              JOIN products p ON oi.product_id = p.product_id \
              JOIN users u ON u.user_id = o.user_id \
              GROUP BY u.name, u.user_id \
              HAVING COUNT(DISTINCT p.category_id) >= 2",
        prompts: &[],
        columns: &[
            column("name", "Buyer", ColumnKind::Text),
            column("distinct_categories", "Categories", ColumnKind::Int64),
        ],
    },
];

/// A parsed, type-checked parameter ready to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundValue {
    Id(Uuid),
    Date(NaiveDate),
}

/// Parse raw user input for one prompt. Failures surface before any query
/// is issued.
pub fn parse_value(prompt: &Prompt, raw: &str) -> Result<BoundValue, Error> {
    let raw = raw.trim();
    match prompt.kind {
        PromptKind::EntityId => Uuid::parse_str(raw).map(BoundValue::Id).map_err(|e| {
            Error::MalformedInput {
                field: prompt.label,
                reason: e.to_string(),
            }
        }),
        PromptKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(BoundValue::Date)
            .map_err(|e| Error::MalformedInput {
                field: prompt.label,
                reason: e.to_string(),
            }),
    }
}

/// Run one report against the relational store and render it as a table.
pub async fn execute(
    pool: &PgPool,
    spec: &ReportSpec,
    values: &[BoundValue],
) -> Result<String, StoreError> {
    let mut query = sqlx::query(spec.sql);
    for value in values {
        query = match value {
            BoundValue::Id(id) => query.bind(*id),
            BoundValue::Date(date) => query.bind(*date),
        };
    }

    let rows = query
        .fetch_all(pool)
        .await
        .map_err(|e| StoreError::query(StoreKind::Postgres, e))?;

    render_rows(spec, &rows)
}

fn render_rows(spec: &ReportSpec, rows: &[PgRow]) -> Result<String, StoreError> {
    if rows.is_empty() {
        return Ok("No rows.\n".into());
    }

    let mut builder = Builder::default();
    builder.push_record(spec.columns.iter().map(|c| c.heading));
    for row in rows {
        let cells = spec
            .columns
            .iter()
            .map(|col| cell(row, col))
            .collect::<Result<Vec<String>, StoreError>>()?;
        builder.push_record(cells);
    }

    Ok(format!("{}\n", builder.build()))
}

fn cell(row: &PgRow, col: &ColumnSpec) -> Result<String, StoreError> {
    let err = |e: sqlx::Error| StoreError::query(StoreKind::Postgres, e);
    Ok(match col.kind {
        ColumnKind::Text => row.try_get::<String, _>(col.name).map_err(err)?,
        ColumnKind::Int32 => row.try_get::<i32, _>(col.name).map_err(err)?.to_string(),
        ColumnKind::Int64 => row.try_get::<i64, _>(col.name).map_err(err)?.to_string(),
        ColumnKind::Money => format_money(row.try_get::<Decimal, _>(col.name).map_err(err)?),
        ColumnKind::Timestamp => row
            .try_get::<DateTime<Utc>, _>(col.name)
            .map_err(err)?
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        ColumnKind::Id => row.try_get::<Uuid, _>(col.name).map_err(err)?.to_string(),
    })
}
