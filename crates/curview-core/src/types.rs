//! Core domain types for curview
//!
//! This module contains the billing record model shared by every crate: the
//! [`LineItem`] as delivered by a record source, the raw [`Amount`] carried in
//! its cost and quantity columns, and the [`Report`] envelope a source returns.
//!
//! Records arrive loosely typed (JSON objects, JSON Lines, CSV rows), so every
//! field is optional and tolerant of odd scalar types. Rendering defaults are
//! applied at display time, never at load time.

use crate::cost_parser;
use crate::error::{CurviewError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Placeholder shown for missing text fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder shown for missing cost or quantity fields
pub const ZERO_AMOUNT: &str = "0";

/// Raw cost or quantity value as found in the report
///
/// CUR exports are inconsistent about whether numeric columns are numbers or
/// strings, so both shapes are kept until the cost parser normalizes them.
///
/// # Examples
/// ```
/// use curview_core::types::Amount;
///
/// let numeric = Amount::Number(12.5);
/// let textual = Amount::Text("12.5 USD".to_string());
/// assert_eq!(numeric.to_f64(), 12.5);
/// assert_eq!(textual.to_f64(), 12.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    /// Value that was already numeric in the source
    Number(f64),
    /// Value that arrived as text
    Text(String),
}

impl Amount {
    /// Build an amount from any JSON scalar
    ///
    /// Numbers stay numeric, everything else is kept as its textual form and
    /// left for the cost parser to interpret.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) => Amount::Number(f),
                None => Amount::Text(n.to_string()),
            },
            Value::String(s) => Amount::Text(s),
            other => Amount::Text(other.to_string()),
        }
    }

    /// Normalize to a float using the permissive cost parser
    pub fn to_f64(&self) -> f64 {
        cost_parser::parse_cost(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Amount::from_json)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{n}"),
            Amount::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Accept any JSON scalar for a text column
///
/// Empty strings count as missing, matching empty CSV cells.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Accept any JSON scalar for an amount column; empty strings count as missing
fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<Option<Amount>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(Amount::from_json(other)),
    })
}

/// A single billing record from a Cost and Usage Report
///
/// Field names follow the column headers of the report export. Unknown
/// columns are ignored and missing columns deserialize to `None`.
///
/// # Examples
/// ```
/// use curview_core::types::LineItem;
///
/// let item: LineItem = serde_json::from_str(
///     r#"{"Product Code": "AmazonEC2", "Cost": "10.5", "Period Start": "2024-01-05"}"#,
/// ).unwrap();
///
/// assert_eq!(item.product_code.as_deref(), Some("AmazonEC2"));
/// assert_eq!(item.cost(), 10.5);
/// assert_eq!(item.display_payment_method(), "N/A");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Owning project or linked account
    #[serde(
        rename = "Project ID",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<String>,
    /// Usage type detail reported for the service
    #[serde(
        rename = "Service Usage Details",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_usage_details: Option<String>,
    /// AWS product code, used as the breakdown key
    #[serde(
        rename = "Product Code",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_code: Option<String>,
    /// Free-form line item description
    #[serde(
        rename = "Line-item Description",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Unblended cost, textual or numeric
    #[serde(
        rename = "Cost",
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost: Option<Amount>,
    /// Usage amount, textual or numeric
    #[serde(
        rename = "Usage Quantity",
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub usage_quantity: Option<Amount>,
    /// Billing period start, kept as the raw string from the report
    #[serde(
        rename = "Period Start",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_start: Option<String>,
    /// Billing period end, kept as the raw string from the report
    #[serde(
        rename = "Period End",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_end: Option<String>,
    /// Payment method or billing entity
    #[serde(
        rename = "Payment Method",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<String>,
}

impl LineItem {
    /// Create an empty line item
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the product code
    pub fn with_product_code(mut self, code: impl Into<String>) -> Self {
        self.product_code = Some(code.into());
        self
    }

    /// Set the cost
    pub fn with_cost(mut self, cost: Amount) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Set the billing period start and end
    pub fn with_period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.period_start = Some(start.into());
        self.period_end = Some(end.into());
        self
    }

    /// Cost as a float; missing or unparsable costs count as 0.0
    pub fn cost(&self) -> f64 {
        self.cost.as_ref().map_or(0.0, Amount::to_f64)
    }

    pub fn display_project_id(&self) -> &str {
        display_text(&self.project_id)
    }

    pub fn display_service_usage_details(&self) -> &str {
        display_text(&self.service_usage_details)
    }

    pub fn display_product_code(&self) -> &str {
        display_text(&self.product_code)
    }

    pub fn display_description(&self) -> &str {
        display_text(&self.description)
    }

    pub fn display_period_start(&self) -> &str {
        display_text(&self.period_start)
    }

    pub fn display_period_end(&self) -> &str {
        display_text(&self.period_end)
    }

    pub fn display_payment_method(&self) -> &str {
        display_text(&self.payment_method)
    }

    /// Cost as shown in the detail table (raw value, `0` when missing)
    pub fn display_cost(&self) -> String {
        display_amount(&self.cost)
    }

    /// Usage quantity as shown in the detail table (raw value, `0` when missing)
    pub fn display_usage_quantity(&self) -> String {
        display_amount(&self.usage_quantity)
    }
}

fn display_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn display_amount(value: &Option<Amount>) -> String {
    value
        .as_ref()
        .map_or_else(|| ZERO_AMOUNT.to_string(), |a| a.to_string())
}

/// Everything a record source returns for one fetch
///
/// `aggregate` is the source's own summary block. It is passed through to the
/// presentation layer untouched and is `null` when the source has none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Raw billing records
    #[serde(alias = "lineItems")]
    pub line_items: Vec<LineItem>,
    /// Opaque summary supplied by the source
    #[serde(default)]
    pub aggregate: Value,
}

impl Report {
    /// Create a report without an aggregate summary
    pub fn new(line_items: Vec<LineItem>) -> Self {
        Self {
            line_items,
            aggregate: Value::Null,
        }
    }

    /// Interpret a JSON document as a report
    ///
    /// Accepts either the envelope form `{"line_items": [...], "aggregate": ...}`
    /// or a bare array of line items.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(_) => Ok(Self::new(serde_json::from_value(value)?)),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(CurviewError::InvalidArgument(format!(
                "expected a report object or an array of line items, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
