use super::column_mapping::MappedRow;
use super::imports_errors::ImportError;
use crate::transactions::NewTransaction;
use crate::utils::time_utils::normalize_date_text;

/// Maps one order book row. Only the client and trade date are required.
pub fn transaction_from_row(row: &MappedRow<'_>) -> Result<NewTransaction, ImportError> {
    let date = |field: &str| row.text(field).map(normalize_date_text);

    let transaction = NewTransaction {
        client_id: row.required_text("client_id")?.to_string(),
        transaction_date: normalize_date_text(row.required_text("transaction_date")?),
        settlement_date: date("settlement_date"),
        maturity_date: date("maturity_date"),
        order_type: row.owned_text("order_type"),
        status: row.owned_text("status"),
        price_type: row.owned_text("price_type"),
        side: row.owned_text("side"),
        initiation: row.owned_text("initiation"),
        time_in_force: row.owned_text("time_in_force"),
        instrument_id: row.owned_text("instrument_id"),
        isin: row.owned_text("isin"),
        quantity: row.decimal("quantity")?,
        currency: row.owned_text("currency"),
        market_value: row.decimal("market_value")?,
        nominal_value: row.decimal("nominal_value")?,
        price: row.decimal("price")?,
        interest_rate: row.decimal("interest_rate")?,
        instrument_name: row.owned_text("instrument_name"),
        asset_class: row.owned_text("asset_class"),
        instrument_type: row.owned_text("instrument_type"),
        investment_category: row.owned_text("investment_category"),
        advisory_type: row.owned_text("advisory_type"),
    };
    transaction
        .validate()
        .map_err(|e| ImportError::row(row.line(), e.to_string()))?;
    Ok(transaction)
}
