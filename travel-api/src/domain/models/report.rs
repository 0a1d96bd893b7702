use serde::Serialize;
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::AnalyticsSummary;
use crate::domain::TravelError;

/// Output format of a downloadable analytics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(raw: &str) -> Result<Self, TravelError> {
        raw.parse()
            .map_err(|_| TravelError::InvalidReportType(raw.to_string()))
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Text => "report.txt",
            Self::Json => "report.json",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    pub fn render(&self, data: &Map<String, Value>) -> Result<String, TravelError> {
        match self {
            Self::Text => Ok(render_text(data)),
            Self::Json => render_json(data),
        }
    }
}

/// Slice of the analytics summary a report is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ReportDataset {
    All,
    TotalExpenses,
    ExpensesByEmployee,
    ExpensesByExpenseType,
    EmployeesWithMostTrips,
    MostPopularDestinations,
    AverageExpensePerTrip,
}

impl ReportDataset {
    pub fn parse(raw: &str) -> Result<Self, TravelError> {
        raw.parse()
            .map_err(|_| TravelError::InvalidDataType(raw.to_string()))
    }

    /// Projects the summary down to the keys this dataset covers.
    pub fn select(&self, summary: &AnalyticsSummary) -> Result<Map<String, Value>, TravelError> {
        let Value::Object(mut all) = serde_json::to_value(summary)
            .map_err(|err| TravelError::Report(err.to_string()))?
        else {
            return Err(TravelError::Report(
                "analytics summary is not an object".to_string(),
            ));
        };

        if *self == Self::All {
            return Ok(all);
        }

        let key = self.as_ref();
        let value = all
            .remove(key)
            .ok_or_else(|| TravelError::Report(format!("missing analytics key {key}")))?;

        let mut selected = Map::new();
        selected.insert(key.to_string(), value);
        Ok(selected)
    }
}

fn render_json(data: &Map<String, Value>) -> Result<String, TravelError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)
        .map_err(|err| TravelError::Report(err.to_string()))?;

    String::from_utf8(buf).map_err(|err| TravelError::Report(err.to_string()))
}

fn render_text(data: &Map<String, Value>) -> String {
    let mut out = String::new();
    for (key, value) in data {
        match value {
            Value::Array(items) if items.is_empty() => {
                out.push_str(&format!("{key}: (empty)\n"));
            }
            Value::Array(items) => {
                out.push_str(&format!("{key}:\n"));
                for item in items {
                    out.push_str(&format!("  - {}\n", text_item(item)));
                }
            }
            other => out.push_str(&format!("{key}: {}\n", text_scalar(other))),
        }
    }
    out
}

fn text_item(item: &Value) -> String {
    match item {
        Value::Object(fields) => fields
            .iter()
            .map(|(field, value)| format!("{field}: {}", text_scalar(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => text_scalar(other),
    }
}

fn text_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "n/a".to_string(),
        other => other.to_string(),
    }
}
