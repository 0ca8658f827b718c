use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Language used when a glossary request does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Performance rows returned per portfolio when no limit is given
pub const DEFAULT_PERFORMANCE_LIMIT: i64 = 12;

/// Chat rows returned by the history listing
pub const DEFAULT_CHAT_HISTORY_LIMIT: i64 = 50;

/// Chat rows embedded in the client bundle
pub const BUNDLE_CHAT_HISTORY_LIMIT: i64 = 10;

/// Market insights returned by the listing
pub const DEFAULT_INSIGHTS_LIMIT: i64 = 10;

/// Transactions returned per client when no limit is given
pub const DEFAULT_TRANSACTIONS_LIMIT: i64 = 50;

/// Upper bound accepted for any list limit
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Rows per insert statement for bulk transaction imports
pub const TRANSACTION_BATCH_SIZE: usize = 100;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Maximum length of a business client identifier
pub const MAX_CLIENT_ID_LEN: usize = 64;

/// Largest portfolio or position value accepted from user input
pub const MAX_PORTFOLIO_VALUE: Decimal = dec!(1000000000000000);

/// Largest absolute YTD return, in percent
pub const MAX_RETURN_PERCENT: Decimal = dec!(10000);

/// Largest volatility, in percent
pub const MAX_VOLATILITY_PERCENT: Decimal = dec!(1000);

/// Free asset ratio is a share of total assets, in percent
pub const MAX_FREE_ASSET_RATIO: Decimal = dec!(100);
