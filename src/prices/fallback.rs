/// Hardcoded last-resort price table
///
/// Served only when no cached data of any age exists for a request and
/// every retry failed. Round reference figures, not live data.
use super::types::{AssetQuote, PriceMap};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static FALLBACK_PRICES: Lazy<PriceMap> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        "bitcoin".to_string(),
        AssetQuote {
            brl: 385_000.0,
            usd: 70_000.0,
            usd_24h_change: Some(0.0),
            usd_market_cap: Some(1_380_000_000_000.0),
            usd_24h_vol: None,
            last_updated_at: None,
        },
    );
    table.insert(
        "ethereum".to_string(),
        AssetQuote {
            brl: 19_250.0,
            usd: 3_500.0,
            usd_24h_change: Some(0.0),
            usd_market_cap: Some(420_000_000_000.0),
            usd_24h_vol: None,
            last_updated_at: None,
        },
    );
    table.insert(
        "solana".to_string(),
        AssetQuote {
            brl: 825.0,
            usd: 150.0,
            usd_24h_change: Some(0.0),
            usd_market_cap: Some(70_000_000_000.0),
            usd_24h_vol: None,
            last_updated_at: None,
        },
    );
    table.insert(
        "binancecoin".to_string(),
        AssetQuote {
            brl: 3_190.0,
            usd: 580.0,
            usd_24h_change: Some(0.0),
            usd_market_cap: Some(85_000_000_000.0),
            usd_24h_vol: None,
            last_updated_at: None,
        },
    );
    table.insert(
        "ripple".to_string(),
        AssetQuote {
            brl: 2.86,
            usd: 0.52,
            usd_24h_change: Some(0.0),
            usd_market_cap: Some(29_000_000_000.0),
            usd_24h_vol: None,
            last_updated_at: None,
        },
    );

    table
});

/// A copy of the static table
pub fn fallback_table() -> PriceMap {
    FALLBACK_PRICES.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_ASSETS;

    #[test]
    fn covers_exactly_the_default_assets() {
        let table = fallback_table();
        assert_eq!(table.len(), DEFAULT_ASSETS.len());
        for id in DEFAULT_ASSETS {
            assert!(table.contains_key(id), "missing fallback entry for {}", id);
        }
    }

    #[test]
    fn entries_carry_both_currencies() {
        for (id, quote) in fallback_table() {
            assert!(quote.brl > 0.0, "{} brl", id);
            assert!(quote.usd > 0.0, "{} usd", id);
        }
    }
}
