//! The standard macro ratios.
//!
//! Column names are shared with the dashboards through the [`columns`]
//! constants. All metrics are plain ratios of their inputs unless noted.

use macrolens_types::Frequency;

use crate::MetricSpec;

/// Column names read or produced by the standard metrics.
pub mod columns {
    /// Federal current receipts.
    pub const REVENUE: &str = "Revenue";
    /// Federal interest payments.
    pub const INTEREST: &str = "Interest";
    /// Social Security outlays.
    pub const SOCIAL_SECURITY: &str = "SocialSecurity";
    /// Medicare outlays.
    pub const MEDICARE: &str = "Medicare";
    /// Medicaid outlays.
    pub const MEDICAID: &str = "Medicaid";
    /// WTI crude front-month price.
    pub const OIL_PRICE: &str = "Oil_Price";
    /// 10-year Treasury yield as a decimal fraction.
    pub const TEN_YEAR_YIELD: &str = "10Y_Yield";
    /// Federal Reserve total assets.
    pub const FED_BALANCE_SHEET: &str = "FedBalanceSheet";
    /// U.S. goods exports to China.
    pub const EXPORTS_CHINA: &str = "Exports_China";
    /// U.S. goods imports from China.
    pub const IMPORTS_CHINA: &str = "Imports_China";

    /// Sum of the mandatory-spending columns.
    pub const MANDATORY_PROXY: &str = "Mandatory_Proxy";
    /// (Mandatory spending + interest) / revenue.
    pub const FISCAL_UNSUSTAINABILITY_RATIO: &str = "Fiscal_Unsustainability_Ratio";
    /// Interest / revenue.
    pub const INTEREST_REVENUE_RATIO: &str = "Interest_Revenue_Ratio";
    /// Year-over-year change of the Fed balance sheet, in percent.
    pub const FED_BALANCE_SHEET_YOY: &str = "FedBalanceSheet_YoY";
    /// Price of a 10-year zero-coupon bond with face 100.
    pub const BOND_PRICE: &str = "Bond_Price";
    /// Barrels of oil one theoretical bond buys.
    pub const ENERGY_VALUE: &str = "Energy_Value";
    /// Exports to China minus imports from China.
    pub const US_CHINA_TRADE_BALANCE: &str = "US_China_Trade_Balance";

    /// Mandatory-spending components summed into the proxy.
    pub const MANDATORY_COMPONENTS: [&str; 3] = [SOCIAL_SECURITY, MEDICARE, MEDICAID];
}

use columns::*;

/// Face value of the theoretical bond.
pub const FACE_VALUE: f64 = 100.0;

/// Maturity of the theoretical bond, in years.
pub const HORIZON_YEARS: f64 = 10.0;

/// Present value of [`FACE_VALUE`] paid in [`HORIZON_YEARS`] years.
///
/// `yield_decimal` is a fraction (`0.042`), not a percent.
#[must_use]
pub fn zero_coupon_price(yield_decimal: f64) -> f64 {
    FACE_VALUE / (1.0 + yield_decimal).powf(HORIZON_YEARS)
}

/// Sum of the named mandatory-spending columns.
pub fn mandatory_proxy_of<I, S>(components: I) -> MetricSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MetricSpec::row_wise(MANDATORY_PROXY, components, |v| v.iter().sum())
}

/// Sum of Social Security, Medicare and Medicaid.
#[must_use]
pub fn mandatory_proxy() -> MetricSpec {
    mandatory_proxy_of(MANDATORY_COMPONENTS)
}

/// `(Mandatory_Proxy + Interest) / Revenue`.
#[must_use]
pub fn fiscal_unsustainability_ratio() -> MetricSpec {
    MetricSpec::row_wise(
        FISCAL_UNSUSTAINABILITY_RATIO,
        [MANDATORY_PROXY, INTEREST, REVENUE],
        |v| (v[0] + v[1]) / v[2],
    )
}

/// `Interest / Revenue`.
#[must_use]
pub fn interest_revenue_ratio() -> MetricSpec {
    MetricSpec::row_wise(INTEREST_REVENUE_RATIO, [INTEREST, REVENUE], |v| v[0] / v[1])
}

/// Percent change of the Fed balance sheet over one year of rows.
///
/// The look-back is `periods_per_year()` rows at the frequency inferred from
/// the table's dates, so the table must be on the series' native calendar.
/// The first year of rows is undefined.
#[must_use]
pub fn fed_balance_sheet_yoy() -> MetricSpec {
    MetricSpec::columnar(FED_BALANCE_SHEET_YOY, [FED_BALANCE_SHEET], |dates, cols| {
        Frequency::infer(dates).map_or_else(
            || vec![None; cols[0].len()],
            |frequency| percent_change(cols[0], frequency.periods_per_year()),
        )
    })
}

/// Percent change of each value against the value `lag` rows earlier.
#[must_use]
pub fn percent_change(values: &[f64], lag: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            let base = values[i.checked_sub(lag)?];
            (base != 0.0).then(|| (values[i] / base - 1.0) * 100.0)
        })
        .collect()
}

/// Price of the theoretical 10-year zero-coupon bond at the current yield.
#[must_use]
pub fn bond_price() -> MetricSpec {
    MetricSpec::row_wise(BOND_PRICE, [TEN_YEAR_YIELD], |v| zero_coupon_price(v[0]))
}

/// `Bond_Price / Oil_Price`.
#[must_use]
pub fn energy_value() -> MetricSpec {
    MetricSpec::row_wise(ENERGY_VALUE, [BOND_PRICE, OIL_PRICE], |v| v[0] / v[1])
}

/// `Exports_China - Imports_China`; positive is a U.S. surplus.
#[must_use]
pub fn us_china_trade_balance() -> MetricSpec {
    MetricSpec::row_wise(
        US_CHINA_TRADE_BALANCE,
        [EXPORTS_CHINA, IMPORTS_CHINA],
        |v| v[0] - v[1],
    )
}

/// Fiscal metrics in dependency order.
#[must_use]
pub fn fiscal_metrics() -> Vec<MetricSpec> {
    vec![
        mandatory_proxy(),
        fiscal_unsustainability_ratio(),
        interest_revenue_ratio(),
    ]
}

/// Energy-value-of-money metrics in dependency order.
#[must_use]
pub fn energy_metrics() -> Vec<MetricSpec> {
    vec![bond_price(), energy_value()]
}
