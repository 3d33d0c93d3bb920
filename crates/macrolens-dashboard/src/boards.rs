//! Column names and series of each built-in dashboard.

use macrolens_fetch::SeriesRequest;
use macrolens_metrics::MetricSpec;
use macrolens_metrics::standard::{self, columns};

use crate::dashboard::request;
use crate::{DashboardKind, Sources};

pub(crate) use columns::FED_BALANCE_SHEET;

/// Broad trade-weighted dollar index.
pub const DOLLAR_INDEX: &str = "Dollar_Index";
/// Gold front-month price.
pub const GOLD_PRICE: &str = "Gold_Price";
/// Bitcoin spot price.
pub const BITCOIN_PRICE: &str = "Bitcoin_Price";
/// Federal debt held by foreign investors.
pub const FOREIGN_HOLDINGS_TOTAL: &str = "Foreign_Holdings_Total";
/// Treasury holdings of mainland China.
pub const TIC_CHINA: &str = "TIC_China";
/// Treasury holdings of Japan.
pub const TIC_JAPAN: &str = "TIC_Japan";
/// China total reserves, trillions.
pub const CHINA_RESERVES: &str = "China_Reserves";
/// Copper front-month price.
pub const COPPER_PRICE: &str = "Copper_Price";
/// Wheat front-month price.
pub const WHEAT_PRICE: &str = "Wheat_Price";
/// Corn front-month price.
pub const CORN_PRICE: &str = "Corn_Price";
/// Crude oil production index.
pub const CRUDE_PRODUCTION: &str = "Crude_Production";
/// Total goods and services trade balance.
pub const TRADE_BALANCE_TOTAL: &str = "Trade_Balance_Total";
/// Industrial production index.
pub const INDUSTRIAL_PRODUCTION: &str = "Industrial_Production";
/// Manufacturing value added, percent of GDP.
pub const MANUF_GDP_SHARE: &str = "Manuf_GDP_Share";
/// U.S. nominal GDP, trillions.
pub const GDP_NOMINAL_USA: &str = "GDP_Nominal_USA";
/// China nominal GDP, trillions.
pub const GDP_NOMINAL_CHN: &str = "GDP_Nominal_CHN";
/// U.S. GDP at PPP, trillions.
pub const GDP_PPP_USA: &str = "GDP_PPP_USA";
/// China GDP at PPP, trillions.
pub const GDP_PPP_CHN: &str = "GDP_PPP_CHN";
/// Articles mentioning tariffs.
pub const NEWS_TARIFFS: &str = "News_Tariffs";
/// Articles mentioning tariffs or protectionism.
pub const NEWS_PROTECTIONISM: &str = "News_Protectionism";

pub(crate) fn build(
    kind: DashboardKind,
    sources: &Sources,
) -> (Vec<SeriesRequest>, Vec<MetricSpec>) {
    match kind {
        DashboardKind::Fiscal => (fiscal(sources), standard::fiscal_metrics()),
        DashboardKind::Energy => (energy(sources), standard::energy_metrics()),
        DashboardKind::Dedollar => (dedollar(sources), Vec::new()),
        DashboardKind::Physical => (physical(sources), standard::energy_metrics()),
        DashboardKind::Geopolitics => (
            geopolitics(sources),
            vec![standard::us_china_trade_balance()],
        ),
        DashboardKind::Liquidity => (
            vec![request(FED_BALANCE_SHEET, "WALCL", &sources.fred)],
            vec![standard::fed_balance_sheet_yoy()],
        ),
    }
}

fn fiscal(sources: &Sources) -> Vec<SeriesRequest> {
    let fred = &sources.fred;
    vec![
        request(columns::REVENUE, "W006RC1Q027SBEA", fred),
        request(columns::INTEREST, "A091RC1Q027SBEA", fred),
        request(columns::SOCIAL_SECURITY, "W823RC1", fred),
        request(columns::MEDICARE, "W824RC1", fred),
        request(columns::MEDICAID, "W825RC1", fred),
    ]
}

fn energy(sources: &Sources) -> Vec<SeriesRequest> {
    vec![
        request(columns::OIL_PRICE, "CL=F", &sources.market),
        request(columns::TEN_YEAR_YIELD, "^TNX", &sources.market),
    ]
}

fn dedollar(sources: &Sources) -> Vec<SeriesRequest> {
    vec![
        request(DOLLAR_INDEX, "DTWEXBGS", &sources.fred),
        request(GOLD_PRICE, "GC=F", &sources.market),
        request(BITCOIN_PRICE, "BTC-USD", &sources.market),
        request(FOREIGN_HOLDINGS_TOTAL, "FDHBFIN", &sources.fred),
        request(TIC_CHINA, "China, Mainland", &sources.tic),
        request(TIC_JAPAN, "Japan", &sources.tic),
        request(CHINA_RESERVES, "CHN/FI.RES.TOTL.CD", &sources.world_bank),
    ]
}

fn physical(sources: &Sources) -> Vec<SeriesRequest> {
    let mut requests = energy(sources);
    requests.extend([
        request(COPPER_PRICE, "HG=F", &sources.market),
        request(WHEAT_PRICE, "ZW=F", &sources.market),
        request(CORN_PRICE, "ZC=F", &sources.market),
        request(CRUDE_PRODUCTION, "IPG211111CN", &sources.fred),
    ]);
    requests
}

fn geopolitics(sources: &Sources) -> Vec<SeriesRequest> {
    let wb = &sources.world_bank;
    vec![
        request(columns::IMPORTS_CHINA, "IMPCH", &sources.fred),
        request(columns::EXPORTS_CHINA, "EXPCH", &sources.fred),
        request(TRADE_BALANCE_TOTAL, "BOPGSTB", &sources.fred),
        request(INDUSTRIAL_PRODUCTION, "INDPRO", &sources.fred),
        request(MANUF_GDP_SHARE, "USA/NV.IND.MANF.ZS", wb),
        request(GDP_NOMINAL_USA, "USA/NY.GDP.MKTP.CD", wb),
        request(GDP_NOMINAL_CHN, "CHN/NY.GDP.MKTP.CD", wb),
        request(GDP_PPP_USA, "USA/NY.GDP.MKTP.PP.CD", wb),
        request(GDP_PPP_CHN, "CHN/NY.GDP.MKTP.PP.CD", wb),
        request(NEWS_TARIFFS, "tariffs", &sources.gdelt),
        request(NEWS_PROTECTIONISM, "(tariffs OR protectionism)", &sources.gdelt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dashboard;
    use macrolens_catalog::SeriesCatalog;
    use macrolens_fetch::url::Endpoints;
    use macrolens_fetch::{ClientConfig, HttpClient};

    fn live_sources() -> Sources {
        let client = HttpClient::new(ClientConfig::default()).unwrap();
        Sources::new(client, Endpoints::default())
    }

    #[test]
    fn test_every_dashboard_validates() {
        let sources = live_sources();
        for kind in DashboardKind::all() {
            let dashboard = Dashboard::new(*kind, &sources);
            assert!(dashboard.validate().is_ok(), "{kind} has inconsistent metrics");
        }
    }

    #[test]
    fn test_every_series_is_catalogued() {
        let sources = live_sources();
        let catalog = SeriesCatalog::global();
        for kind in DashboardKind::all() {
            for request in Dashboard::new(*kind, &sources).requests() {
                assert!(
                    catalog.get(&request.source_id).is_some(),
                    "{} missing from catalog",
                    request.source_id
                );
            }
        }
    }

    #[test]
    fn test_liquidity_anchored_on_balance_sheet() {
        let dashboard = Dashboard::new(DashboardKind::Liquidity, &live_sources());
        assert_eq!(
            dashboard.calendar(),
            &macrolens_aggregate::Calendar::Anchor(FED_BALANCE_SHEET.to_string())
        );
    }
}
