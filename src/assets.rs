//! Asset endpoint bindings and their data contracts.

use serde::{Deserialize, Serialize};

use crate::{headers, CoinApiClient, QueryParams, Result};

const ASSETS_PATH: &str = "/v1/assets";
const ASSET_ICONS_PATH: &str = "/v1/assets/icons";

/// One asset record from `GET /v1/assets`.
///
/// Every field is optional in the response contract; fields absent from the
/// payload decode as `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetDto {
    pub asset_id: Option<String>,
    pub name: Option<String>,
    pub type_is_crypto: Option<i64>,
    pub data_quote_start: Option<String>,
    pub data_quote_end: Option<String>,
    pub data_orderbook_start: Option<String>,
    pub data_orderbook_end: Option<String>,
    pub data_trade_start: Option<String>,
    pub data_trade_end: Option<String>,
    pub data_symbols_count: Option<i64>,
    pub volume_1hrs_usd: Option<f64>,
    pub volume_1day_usd: Option<f64>,
    pub volume_1mth_usd: Option<f64>,
    pub price_usd: Option<f64>,
    pub chain_addresses: Option<Vec<ChainAddressDto>>,
    pub data_start: Option<String>,
    pub data_end: Option<String>,
}

/// On-chain address entry inside an [`AssetDto`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAddressDto {
    pub chain_id: Option<String>,
    pub network_id: Option<String>,
    pub address: Option<String>,
}

/// One icon record from `GET /v1/assets/icons/{size}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIconDto {
    pub exchange_id: Option<String>,
    pub asset_id: Option<String>,
    pub url: Option<String>,
}

impl CoinApiClient {
    /// Lists every asset known to the API.
    pub async fn assets(&self) -> Result<Vec<AssetDto>> {
        self.get(ASSETS_PATH, (), headers::accept_text_plain()).await
    }

    /// Lists the assets whose IDs are given.
    ///
    /// The service expects the filter as one semicolon-delimited
    /// `filter_asset_id` value.
    pub async fn assets_by_ids<I, S>(&self, ids: I) -> Result<Vec<AssetDto>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filter = ids
            .into_iter()
            .map(|id| id.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(";");
        let query = QueryParams::new().with("filter_asset_id", filter);
        self.get(ASSETS_PATH, query, headers::accept_text_plain())
            .await
    }

    /// Lists icon URLs rendered at `size` pixels.
    pub async fn asset_icons(&self, size: u32) -> Result<Vec<AssetIconDto>> {
        let path = format!("{ASSET_ICONS_PATH}/{size}");
        self.get(&path, (), headers::accept_json()).await
    }
}
