use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// `nature` tag of the statement preferred for evaluation.
pub const STANDALONE_NATURE: &str = "STANDALONE";

// ============ Flags ============

/// Risk flag produced by a rule.
///
/// The integer codes are the wire format. Only `Red`, `Green` and `Amber`
/// are produced by the current rules; `MediumRisk` is reserved for display
/// and `White` marks a field with missing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Red,
    Green,
    Amber,
    MediumRisk,
    White,
}

impl Flag {
    /// Integer code used on the wire.
    pub const fn code(self) -> u8 {
        match self {
            Flag::Red => 0,
            Flag::Green => 1,
            Flag::Amber => 2,
            Flag::MediumRisk => 3,
            Flag::White => 4,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Flag::Red),
            1 => Some(Flag::Green),
            2 => Some(Flag::Amber),
            3 => Some(Flag::MediumRisk),
            4 => Some(Flag::White),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Flag::Red => "RED",
            Flag::Green => "GREEN",
            Flag::Amber => "AMBER",
            Flag::MediumRisk => "MEDIUM_RISK",
            Flag::White => "WHITE",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Flag::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown flag code {}", code)))
    }
}

/// Flags computed for one document, keyed by rule name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlagReport {
    pub flags: BTreeMap<String, Flag>,
}

impl FlagReport {
    pub fn get(&self, rule: &str) -> Option<Flag> {
        self.flags.get(rule).copied()
    }
}

// ============ Financial Statements ============
//
// Every field is optional and malformed values deserialize as absent, so a
// partial disclosure never fails to parse.

/// Root input: the `data` object of an uploaded document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FinancialDataset {
    /// Statements in the order given. Anything other than an array is empty.
    #[serde(default, deserialize_with = "lenient_statements")]
    pub financials: Vec<FinancialStatement>,
}

impl FinancialDataset {
    /// Extracts the dataset from a parsed `{"data": {...}}` document.
    ///
    /// Returns `None` when the root is not an object, or `data` is missing or
    /// not an object.
    pub fn from_document(document: Value) -> Option<Self> {
        let Value::Object(mut root) = document else {
            return None;
        };
        match root.remove("data")? {
            data @ Value::Object(_) => serde_json::from_value(data).ok(),
            _ => None,
        }
    }

    pub fn statement(&self, index: usize) -> Option<&FinancialStatement> {
        self.financials.get(index)
    }
}

/// One financial statement (a filing for a period).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FinancialStatement {
    /// e.g. "STANDALONE" or "CONSOLIDATED".
    #[serde(default, deserialize_with = "lenient")]
    pub nature: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub pnl: Option<ProfitAndLoss>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub bs: Option<BalanceSheet>,
}

impl FinancialStatement {
    pub fn is_standalone(&self) -> bool {
        self.nature.as_deref() == Some(STANDALONE_NATURE)
    }

    /// `pnl.lineItems`, if both levels are present.
    pub fn line_items(&self) -> Option<&PnlLineItems> {
        self.pnl.as_ref()?.line_items.as_ref()
    }

    /// `bs.liabilities`, if both levels are present.
    pub fn liabilities(&self) -> Option<&Liabilities> {
        self.bs.as_ref()?.liabilities.as_ref()
    }
}

/// Profit and loss section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfitAndLoss {
    #[serde(rename = "lineItems", default, deserialize_with = "lenient_object")]
    pub line_items: Option<PnlLineItems>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PnlLineItems {
    #[serde(default, deserialize_with = "lenient")]
    pub net_revenue: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub profit_before_interest_and_tax: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub depreciation: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub interest: Option<f64>,
}

/// Balance sheet section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BalanceSheet {
    #[serde(default, deserialize_with = "lenient_object")]
    pub liabilities: Option<Liabilities>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Liabilities {
    #[serde(default, deserialize_with = "lenient")]
    pub long_term_borrowings: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub short_term_borrowings: Option<f64>,
}

/// Deserializes a value, mapping anything of the wrong type to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like `lenient`, but only JSON objects are accepted (serde would otherwise
/// read a struct from an array positionally).
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

/// Keeps one entry per array element so indices line up with the input.
fn lenient_statements<'de, D>(deserializer: D) -> Result<Vec<FinancialStatement>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
            _ => FinancialStatement::default(),
        })
        .collect())
}
