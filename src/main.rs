/// pricewatch CLI
///
/// Fetches current prices, historical charts and trending coins from the
/// upstream API and prints them together with the tier that served them.
///
/// Usage: pricewatch [--symbols BTC,ETH] [--history bitcoin --days 7]
///        [--trending] [--cache-stats]
use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use pricewatch::format::{format_change, format_price, ChangeDirection};
use pricewatch::prices::{symbols, PriceClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = Command::new("pricewatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Cryptocurrency price watcher with cached, degradable fetches")
        .arg(
            Arg::new("symbols")
                .short('s')
                .long("symbols")
                .value_name("LIST")
                .help("Comma-separated ticker symbols (default: BTC,ETH,SOL,BNB,XRP)"),
        )
        .arg(
            Arg::new("history")
                .long("history")
                .value_name("COIN_ID")
                .help("Print the market chart for one coin id"),
        )
        .arg(
            Arg::new("days")
                .long("days")
                .value_name("N")
                .default_value("7")
                .help("History window in days"),
        )
        .arg(
            Arg::new("trending")
                .long("trending")
                .action(ArgAction::SetTrue)
                .help("Print trending coins instead of prices"),
        )
        .arg(
            Arg::new("cache-stats")
                .long("cache-stats")
                .action(ArgAction::SetTrue)
                .help("Print cache statistics after the run"),
        )
        .get_matches();

    let client = PriceClient::new()?;

    if let Some(id) = matches.get_one::<String>("history") {
        let days: u32 = matches
            .get_one::<String>("days")
            .map(|d| d.parse())
            .transpose()?
            .unwrap_or(pricewatch::constants::DEFAULT_HISTORY_DAYS);
        print_history(&client, id, days).await;
    } else if matches.get_flag("trending") {
        print_trending(&client).await;
    } else {
        let ids: Vec<String> = match matches.get_one::<String>("symbols") {
            Some(list) => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(symbols::coin_id)
                .collect(),
            None => Vec::new(),
        };
        print_prices(&client, &ids).await;
    }

    if matches.get_flag("cache-stats") {
        let stats = client.cache_stats();
        println!(
            "\ncache: {} entries ({} fresh, {} stale)",
            stats.total_entries, stats.fresh_entries, stats.stale_entries
        );
    }

    Ok(())
}

async fn print_prices(client: &PriceClient, ids: &[String]) {
    let snapshot = client.current_prices(ids).await;

    let mut rows: Vec<_> = snapshot.prices.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    for (id, quote) in rows {
        let change = format_change(quote.usd_24h_change.unwrap_or(f64::NAN));
        let change_text = match change.direction {
            ChangeDirection::Positive => change.text.green(),
            ChangeDirection::Negative => change.text.red(),
            ChangeDirection::Neutral => change.text.normal(),
        };

        println!(
            "{:<14} {:>16} {:>18} {:>10}",
            id.as_str().bold(),
            format_price(quote.usd, "usd"),
            format_price(quote.brl, "brl"),
            change_text
        );
    }

    println!("source: {}", snapshot.tier.to_string().dimmed());
}

async fn print_history(client: &PriceClient, id: &str, days: u32) {
    match client.historical_data(id, days).await {
        Some(chart) if !chart.is_empty() => {
            let values = chart.price_values();
            let first = values.first().copied().unwrap_or(f64::NAN);
            let last = values.last().copied().unwrap_or(f64::NAN);
            let change = if first != 0.0 {
                (last - first) / first * 100.0
            } else {
                f64::NAN
            };

            println!("{} over {} days: {} points", id.bold(), days, chart.len());
            println!("  start {}", format_price(first, "brl"));
            println!("  end   {}", format_price(last, "brl"));
            println!("  move  {}", format_change(change).text);
        }
        Some(_) => println!("{}: empty series for the requested window", id),
        None => println!("{}: no data available", id),
    }
}

async fn print_trending(client: &PriceClient) {
    let coins = client.trending().await;
    if coins.is_empty() {
        println!("no trending data available");
        return;
    }

    for coin in coins {
        let rank = coin
            .market_cap_rank
            .map(|r| format!("#{}", r))
            .unwrap_or_else(|| "#-".to_string());
        println!("{:>5}  {} ({})", rank, coin.name.bold(), coin.symbol);
    }
}
