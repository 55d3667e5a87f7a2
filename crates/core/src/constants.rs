/// Decimal precision for percentage figures (ROI, change percent).
pub const PERCENT_DECIMAL_PRECISION: u32 = 4;

/// Sell commission rate for local-market trades (0.1425%).
pub const LOCAL_COMMISSION_RATE: &str = "0.001425";

/// Minimum sell commission charged per local-market trade, in whole
/// local currency units.
pub const LOCAL_MIN_COMMISSION: &str = "20";

/// Transaction tax rate for standard local equities (0.3%).
pub const LOCAL_TAX_RATE_EQUITY: &str = "0.003";

/// Transaction tax rate for fund-class instruments such as ETFs (0.1%).
pub const LOCAL_TAX_RATE_FUND: &str = "0.001";

/// Take-profit floor as a multiple of average cost (+10%).
pub const TAKE_PROFIT_RATIO: &str = "1.1";

/// Trailing take-profit as a fraction of the high watermark (-10%).
pub const TRAILING_WATERMARK_RATIO: &str = "0.9";

/// Half-width of the cost-zone alert band around average cost (±2%).
pub const COST_ZONE_TOLERANCE: &str = "0.02";
