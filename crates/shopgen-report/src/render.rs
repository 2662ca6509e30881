use crate::model::{CustomerOrderReport, ReportRow};
use crate::query::REPORT_WINDOW_DAYS;

const RULE_WIDTH: usize = 120;

const HEADERS: [&str; 7] = [
    "Customer Name",
    "Order Date",
    "Product Name",
    "Quantity",
    "Unit Price ($)",
    "Avg Rating",
    "Review Count",
];

const MIN_WIDTHS: [usize; 7] = [15, 12, 25, 10, 15, 12, 13];

const PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

const ALIGNMENT: [Align; 7] = [
    Align::Left,
    Align::Center,
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Right,
];

/// Render the report as a fixed-width text table followed by summary statistics.
pub fn render_report(report: &CustomerOrderReport) -> String {
    let mut lines = Vec::new();
    let rule = "=".repeat(RULE_WIDTH);

    if report.rows.is_empty() {
        lines.push(format!(
            "No orders found in the last {REPORT_WINDOW_DAYS} days."
        ));
    } else {
        lines.push(rule.clone());
        lines.push("CUSTOMER ORDER DETAILS WITH PRODUCT INFORMATION AND REVIEW RATINGS".to_string());
        lines.push(format!(
            "Orders from the last {REPORT_WINDOW_DAYS} days (since {})",
            report.cutoff
        ));
        lines.push(rule.clone());
        lines.push(String::new());

        let cells: Vec<[String; 7]> = report.rows.iter().map(format_row).collect();
        let widths = column_widths(&cells);

        let header = HEADERS
            .iter()
            .zip(widths.iter())
            .map(|(header, width)| align(header, *width, Align::Center))
            .collect::<Vec<_>>()
            .join(" | ");
        let rule_len = header.chars().count();
        lines.push(header);
        lines.push("-".repeat(rule_len));

        for row in &cells {
            let line = row
                .iter()
                .zip(widths.iter().zip(ALIGNMENT.iter()))
                .map(|(cell, (width, alignment))| align(cell, *width, *alignment))
                .collect::<Vec<_>>()
                .join(" | ");
            lines.push(line);
        }

        lines.push(String::new());
        lines.push(format!("Total records: {}", report.rows.len()));
    }

    let summary = &report.summary;
    lines.push(String::new());
    lines.push(rule.clone());
    lines.push("SUMMARY STATISTICS".to_string());
    lines.push(rule);
    lines.push(format!(
        "Total orders in last {REPORT_WINDOW_DAYS} days: {}",
        summary.total_orders
    ));
    lines.push(format!("Total unique customers: {}", summary.total_customers));
    lines.push(format!(
        "Total unique products ordered: {}",
        summary.total_products
    ));
    lines.push(format!(
        "Products with reviews: {}",
        summary.products_with_reviews
    ));

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

/// Average rating to one decimal, or `N/A` for products without reviews.
pub fn format_rating(avg_rating: f64) -> String {
    if avg_rating > 0.0 {
        format!("{avg_rating:.1}")
    } else {
        "N/A".to_string()
    }
}

fn format_row(row: &ReportRow) -> [String; 7] {
    [
        row.customer_name.clone(),
        row.order_date.clone(),
        row.product_name.clone(),
        row.quantity.to_string(),
        format!("${:.2}", row.unit_price),
        format_rating(row.avg_rating),
        row.review_count.to_string(),
    ]
}

fn column_widths(rows: &[[String; 7]]) -> [usize; 7] {
    let mut widths = [0; 7];
    for (idx, width) in widths.iter_mut().enumerate() {
        let longest = rows
            .iter()
            .map(|row| row[idx].chars().count())
            .max()
            .unwrap_or(0);
        *width = HEADERS[idx]
            .chars()
            .count()
            .max(MIN_WIDTHS[idx])
            .max(longest)
            + PADDING;
    }
    widths
}

fn align(value: &str, width: usize, alignment: Align) -> String {
    match alignment {
        Align::Left => format!("{value:<width$}"),
        Align::Center => format!("{value:^width$}"),
        Align::Right => format!("{value:>width$}"),
    }
}
