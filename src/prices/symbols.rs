/// Ticker-symbol to API coin-id lookup
///
/// Unknown symbols pass through lower-cased: a best-effort guess that is
/// not validated against the upstream API's known ids.
pub fn coin_id(symbol: &str) -> String {
    match symbol.trim().to_uppercase().as_str() {
        "BTC" => "bitcoin".to_string(),
        "ETH" => "ethereum".to_string(),
        "SOL" => "solana".to_string(),
        "BNB" => "binancecoin".to_string(),
        "XRP" => "ripple".to_string(),
        "PENDLE" => "pendle".to_string(),
        "SPX6900" => "spx6900".to_string(),
        other => other.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_map_to_ids() {
        assert_eq!(coin_id("BTC"), "bitcoin");
        assert_eq!(coin_id("ETH"), "ethereum");
        assert_eq!(coin_id("SOL"), "solana");
        assert_eq!(coin_id("BNB"), "binancecoin");
        assert_eq!(coin_id("XRP"), "ripple");
        assert_eq!(coin_id("PENDLE"), "pendle");
        assert_eq!(coin_id("SPX6900"), "spx6900");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(coin_id("btc"), "bitcoin");
        assert_eq!(coin_id("Eth"), "ethereum");
    }

    #[test]
    fn unknown_symbols_pass_through_lowercased() {
        assert_eq!(coin_id("DOGE"), "doge");
        assert_eq!(coin_id("NotAToken"), "notatoken");
    }
}
