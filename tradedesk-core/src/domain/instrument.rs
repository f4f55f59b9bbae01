use serde::{Deserialize, Serialize};

/// Tradable instrument, used to populate the instrument selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub isin: String,
    pub name: String,
    pub ticker: String,
    pub trade_currency: String,
}

/// Current price of an instrument, paired with [`Instrument`] by ISIN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub isin: String,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instrument_decodes_camel_case() {
        let json = r#"{"isin":"US0378331005","name":"Apple Inc.","ticker":"AAPL","tradeCurrency":"USD"}"#;
        let instrument: Instrument = serde_json::from_str(json).unwrap();
        assert_eq!(instrument.ticker, "AAPL");
        assert_eq!(instrument.trade_currency, "USD");
    }
}
