//! Declarative source layouts.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::imports_errors::ImportError;
use crate::utils::decimal_utils::parse_flexible_decimal;

/// One logical column of a source layout.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Name the row mappers use to look the value up
    pub field: &'static str,
    /// Accepted header spellings, compared after [`normalize_header`]
    pub headers: &'static [&'static str],
    pub required: bool,
    /// Used when the column is absent or the cell is blank
    pub default: Option<&'static str>,
}

const fn required(field: &'static str, headers: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        field,
        headers,
        required: true,
        default: None,
    }
}

const fn optional(field: &'static str, headers: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        field,
        headers,
        required: false,
        default: None,
    }
}

const fn with_default(
    field: &'static str,
    headers: &'static [&'static str],
    default: &'static str,
) -> ColumnSpec {
    ColumnSpec {
        field,
        headers,
        required: false,
        default: Some(default),
    }
}

static CLIENT_SHEET_COLUMNS: &[ColumnSpec] = &[
    required("client_id", &["Client ID"]),
    required("name", &["Name", "Client Name"]),
    required("risk_tolerance", &["Risk Tolerance"]),
    with_default("investment_horizon", &["Investment Horizon"], "5"),
    with_default("investment_experience", &["Investment Experience"], "Moderate"),
    with_default("free_asset_ratio", &["Free Asset Ratio"], "75"),
    with_default("investment_objective", &["Investment Objective"], "Growth"),
    optional("portfolio_value", &["Portfolio Value", "Total Value"]),
    optional("ytd_return", &["YTD Return"]),
    optional("volatility", &["Volatility"]),
];

static PERSONA_COLUMNS: &[ColumnSpec] = &[
    required("persona", &["Persona"]),
    required(
        "masked_client_id",
        &["Masked Client ID", "Masked ID", "Client ID"],
    ),
    required("risk_tolerance", &["Risk Tolerance", "Risk Profile"]),
    with_default("portfolio_ccy", &["Portfolio CCY", "Currency"], "USD"),
    optional("portfolio_risk_breach", &["Portfolio Risk Breach"]),
    required(
        "portfolio_volatility",
        &["Portfolio Volatility", "Portfolio Vol"],
    ),
    required(
        "saa_portfolio_volatility",
        &["SAA Portfolio Volatility", "SAA Portfolio Vol", "SAA Vol"],
    ),
    required(
        "number_of_positions",
        &["Number of Positions", "Num Positions", "Positions"],
    ),
];

static TRANSACTION_COLUMNS: &[ColumnSpec] = &[
    required("transaction_date", &["Transaction Date", "Trade Date"]),
    required("client_id", &["Client ID", "Masked Client ID"]),
    optional("settlement_date", &["Settlement Date"]),
    optional("maturity_date", &["Maturity Date"]),
    optional("order_type", &["Order Type"]),
    optional("status", &["Status", "Order Status"]),
    optional("price_type", &["Price Type"]),
    optional("side", &["Side", "Buy/Sell"]),
    optional("initiation", &["Initiation"]),
    optional("time_in_force", &["Time in Force"]),
    optional("instrument_id", &["Instrument ID"]),
    optional("isin", &["ISIN"]),
    optional("quantity", &["Quantity"]),
    optional("currency", &["Currency", "CCY"]),
    optional("market_value", &["Market Value"]),
    optional("nominal_value", &["Nominal Value"]),
    optional("price", &["Price"]),
    optional("interest_rate", &["Interest Rate"]),
    optional("instrument_name", &["Instrument Name"]),
    optional("asset_class", &["Asset Class"]),
    optional("instrument_type", &["Instrument Type"]),
    optional("investment_category", &["Investment Category"]),
    optional("advisory_type", &["Advisory Type"]),
];

/// The spreadsheet layouts the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// One client per row, optional portfolio summary columns
    ClientSheet,
    /// Masked persona export with risk codes and volatility figures
    PersonaPortfolios,
    /// Order book export
    Transactions,
}

impl SourceFormat {
    pub fn columns(&self) -> &'static [ColumnSpec] {
        match self {
            SourceFormat::ClientSheet => CLIENT_SHEET_COLUMNS,
            SourceFormat::PersonaPortfolios => PERSONA_COLUMNS,
            SourceFormat::Transactions => TRANSACTION_COLUMNS,
        }
    }

    /// Strict layouts reject headers that match no column.
    /// Order book exports carry many reporting columns we do not keep.
    pub fn is_strict(&self) -> bool {
        !matches!(self, SourceFormat::Transactions)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::ClientSheet => "client sheet",
            SourceFormat::PersonaPortfolios => "persona portfolios",
            SourceFormat::Transactions => "transactions",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower-cases a header and drops everything that is not a letter or digit,
/// so `Client ID`, `ClientID` and `client_id` compare equal.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// A layout resolved against the header row of one sheet.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    format: SourceFormat,
    positions: HashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Matches `headers` to the layout of `format`.
    ///
    /// Every problem with the header row is collected before failing, so the
    /// error lists all missing required columns and, for strict layouts, all
    /// headers that match nothing.
    pub fn resolve(format: SourceFormat, headers: &[String]) -> Result<Self, ImportError> {
        let mut lookup: HashMap<String, &'static ColumnSpec> = HashMap::new();
        for spec in format.columns() {
            lookup.insert(normalize_header(spec.field), spec);
            for header in spec.headers {
                lookup.insert(normalize_header(header), spec);
            }
        }

        let mut positions = HashMap::new();
        let mut unexpected = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            let key = normalize_header(header);
            if key.is_empty() {
                continue;
            }
            match lookup.get(&key) {
                Some(spec) => {
                    if positions.insert(spec.field, index).is_some() {
                        return Err(ImportError::DuplicateColumn {
                            format: format.to_string(),
                            header: header.trim().to_string(),
                        });
                    }
                }
                None => unexpected.push(header.trim().to_string()),
            }
        }

        let missing: Vec<String> = format
            .columns()
            .iter()
            .filter(|spec| spec.required && !positions.contains_key(spec.field))
            .map(|spec| spec.headers[0].to_string())
            .collect();
        if !format.is_strict() {
            unexpected.clear();
        }
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(ImportError::HeaderMismatch {
                format: format.to_string(),
                missing,
                unexpected,
            });
        }

        Ok(Self { format, positions })
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn has(&self, field: &str) -> bool {
        self.positions.contains_key(field)
    }

    /// Binds the map to one data row. `line` is the 1-based source line.
    pub fn row<'a>(&'a self, line: usize, cells: &'a [String]) -> MappedRow<'a> {
        MappedRow {
            map: self,
            line,
            cells,
        }
    }

    fn spec(&self, field: &str) -> Option<&'static ColumnSpec> {
        self.format.columns().iter().find(|spec| spec.field == field)
    }
}

/// Field-level access to a single row.
#[derive(Debug, Clone, Copy)]
pub struct MappedRow<'a> {
    map: &'a ColumnMap,
    line: usize,
    cells: &'a [String],
}

impl<'a> MappedRow<'a> {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Trimmed cell text, falling back to the column default.
    pub fn text(&self, field: &str) -> Option<&'a str> {
        let cell = self
            .map
            .positions
            .get(field)
            .and_then(|index| self.cells.get(*index))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty());
        cell.or_else(|| self.map.spec(field).and_then(|spec| spec.default))
    }

    pub fn owned_text(&self, field: &str) -> Option<String> {
        self.text(field).map(str::to_string)
    }

    pub fn required_text(&self, field: &str) -> Result<&'a str, ImportError> {
        self.text(field)
            .ok_or_else(|| ImportError::row(self.line, format!("'{}' is blank", field)))
    }

    /// Blank cells are `None`; text that is not a number is an error.
    pub fn decimal(&self, field: &str) -> Result<Option<Decimal>, ImportError> {
        match self.text(field) {
            None => Ok(None),
            Some(raw) => parse_flexible_decimal(raw).map(Some).ok_or_else(|| {
                ImportError::row(
                    self.line,
                    format!("'{}' is not a number: {}", field, raw),
                )
            }),
        }
    }

    pub fn required_decimal(&self, field: &str) -> Result<Decimal, ImportError> {
        self.decimal(field)?
            .ok_or_else(|| ImportError::row(self.line, format!("'{}' is blank", field)))
    }

    /// Whole numbers; spreadsheet floats such as `7.0` are accepted.
    pub fn integer(&self, field: &str) -> Result<Option<i64>, ImportError> {
        match self.decimal(field)? {
            None => Ok(None),
            Some(value) if value.fract().is_zero() => value.to_i64().map(Some).ok_or_else(|| {
                ImportError::row(self.line, format!("'{}' is out of range", field))
            }),
            Some(value) => Err(ImportError::row(
                self.line,
                format!("'{}' must be a whole number: {}", field, value),
            )),
        }
    }
}
