//! Instruments and current prices backing the instrument selector.

use rayon::join;

use crate::api::{ApiError, BrokerApi};
use crate::domain::{Instrument, PriceQuote};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub instruments: Vec<Instrument>,
    pub prices: Vec<PriceQuote>,
}

impl ReferenceData {
    /// Fetch instruments and prices concurrently and wait for both.
    ///
    /// Fails with the instruments error if both calls fail.
    pub fn fetch<A: BrokerApi + ?Sized>(api: &A) -> Result<Self, ApiError> {
        let (instruments, prices) = join(|| api.list_instruments(), || api.current_prices());
        let data = Self {
            instruments: instruments?,
            prices: prices?,
        };
        tracing::debug!(
            instruments = data.instruments.len(),
            prices = data.prices.len(),
            "reference data loaded"
        );
        Ok(data)
    }

    pub fn instrument(&self, isin: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.isin == isin)
    }

    pub fn index_of(&self, isin: &str) -> Option<usize> {
        self.instruments.iter().position(|i| i.isin == isin)
    }

    /// Live price of an instrument, if the backend quoted it.
    pub fn price(&self, isin: &str) -> Option<f64> {
        self.prices.iter().find(|p| p.isin == isin).map(|p| p.price)
    }

    /// The instrument `offset` positions away from `isin`, wrapping around.
    /// With no current selection, stepping forward starts at the first one.
    pub fn step(&self, isin: &str, offset: isize) -> Option<&Instrument> {
        let len = self.instruments.len() as isize;
        if len == 0 {
            return None;
        }
        let next = match self.index_of(isin) {
            Some(i) => (i as isize + offset).rem_euclid(len),
            None if offset >= 0 => 0,
            None => len - 1,
        };
        self.instruments.get(next as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument(isin: &str, ccy: &str) -> Instrument {
        Instrument {
            isin: isin.into(),
            name: format!("{isin} name"),
            ticker: isin[..3].into(),
            trade_currency: ccy.into(),
        }
    }

    fn sample() -> ReferenceData {
        ReferenceData {
            instruments: vec![
                instrument("PL0000000001", "PLN"),
                instrument("US0378331005", "USD"),
                instrument("DE0007164600", "EUR"),
            ],
            prices: vec![PriceQuote {
                isin: "US0378331005".into(),
                price: 231.4,
            }],
        }
    }

    #[test]
    fn lookup_by_isin() {
        let data = sample();
        assert_eq!(data.instrument("US0378331005").unwrap().trade_currency, "USD");
        assert_eq!(data.price("US0378331005"), Some(231.4));
        assert_eq!(data.price("PL0000000001"), None);
        assert!(data.instrument("XX").is_none());
    }

    #[test]
    fn step_wraps_around() {
        let data = sample();
        assert_eq!(data.step("", 1).unwrap().isin, "PL0000000001");
        assert_eq!(data.step("", -1).unwrap().isin, "DE0007164600");
        assert_eq!(data.step("DE0007164600", 1).unwrap().isin, "PL0000000001");
        assert_eq!(data.step("PL0000000001", -1).unwrap().isin, "DE0007164600");
        assert!(ReferenceData::default().step("", 1).is_none());
    }
}
