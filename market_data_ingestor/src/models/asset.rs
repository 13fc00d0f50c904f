use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    #[default]
    UsEquity,
    Etf,
    Index,
    Crypto,
    Other,
}

impl AssetClass {
    /// Maps a provider instrument tag (e.g. Yahoo's `instrumentType`) to an asset class.
    pub fn from_instrument_type(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "EQUITY" => AssetClass::UsEquity,
            "ETF" => AssetClass::Etf,
            "INDEX" => AssetClass::Index,
            "CRYPTOCURRENCY" => AssetClass::Crypto,
            _ => AssetClass::Other,
        }
    }

    /// Type tag stored on the graph's Asset node.
    pub fn graph_type(self) -> &'static str {
        match self {
            AssetClass::UsEquity => "Equity",
            AssetClass::Etf => "ETF",
            AssetClass::Index => "Index",
            AssetClass::Crypto => "Crypto",
            AssetClass::Other => "Other",
        }
    }
}
