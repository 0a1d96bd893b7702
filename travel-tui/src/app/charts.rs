//! Reshapes the analytics payload into what the chart widgets draw.

use crate::types::AnalyticsData;

/// One row of a proportional horizontal bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub value: f64,
    /// Filled columns out of the available width.
    pub filled: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieShare {
    pub label: String,
    pub value: f64,
    /// 0.0–100.0 of the sum of all shares.
    pub percentage: f64,
}

pub fn proportional_bars(rows: &[(String, f64)], width: usize) -> Vec<BarRow> {
    let mut rows: Vec<&(String, f64)> = rows.iter().collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let max = rows.iter().map(|r| r.1).fold(0.0_f64, f64::max);
    rows.into_iter()
        .map(|(label, value)| {
            let filled = if max > 0.0 && *value > 0.0 {
                ((value / max) * width as f64).round().max(1.0) as usize
            } else {
                0
            };
            BarRow {
                label: label.clone(),
                value: *value,
                filled: filled.min(width),
            }
        })
        .collect()
}

pub fn employee_bars(data: &AnalyticsData, width: usize) -> Vec<BarRow> {
    let rows: Vec<(String, f64)> = data
        .expenses_by_employee
        .iter()
        .map(|row| (row.employee.clone(), row.total_expenses))
        .collect();
    proportional_bars(&rows, width)
}

pub fn category_shares(data: &AnalyticsData) -> Vec<PieShare> {
    let total: f64 = data
        .expenses_by_expense_type
        .iter()
        .map(|row| row.total_expenses.max(0.0))
        .sum();

    data.expenses_by_expense_type
        .iter()
        .filter(|row| row.total_expenses > 0.0)
        .map(|row| PieShare {
            label: row.expense_type.clone(),
            value: row.total_expenses,
            percentage: if total > 0.0 {
                row.total_expenses / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

pub fn destination_counts(data: &AnalyticsData) -> Vec<(String, u64)> {
    data.most_popular_destinations
        .iter()
        .map(|row| {
            (
                destination_label(row.destination.as_deref()),
                row.trip_count.max(0) as u64,
            )
        })
        .collect()
}

pub fn trip_counts(data: &AnalyticsData) -> Vec<(String, u64)> {
    data.employees_with_most_trips
        .iter()
        .map(|row| (row.employee.clone(), row.trip_count.max(0) as u64))
        .collect()
}

pub fn destination_label(destination: Option<&str>) -> String {
    match destination {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => "Not specified".to_string(),
    }
}

/// `None` stands for "No data".
pub fn total_headline(data: Option<&AnalyticsData>) -> Option<String> {
    data.map(|d| d.total_expenses)
        .filter(|total| total.is_finite() && *total != 0.0)
        .map(format_amount)
}

pub fn average_headline(data: Option<&AnalyticsData>) -> Option<String> {
    data.and_then(|d| d.average_expense_per_trip.trim().parse::<f64>().ok())
        .filter(|avg| avg.is_finite() && *avg != 0.0)
        .map(format_amount)
}

/// Two decimals, thousands separated by spaces, e.g. `62 900.00`.
pub fn format_amount(value: f64) -> String {
    let raw = format!("{:.2}", value.abs());
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
