use chrono::{Local, TimeZone};
use common::models::{DisplayMode, FetchResult, PriceRecord};

/// Render a fetched price in the given display mode.
///
/// `previous` is the ledger entry for the same coin and currency; it is only
/// consulted in [`DisplayMode::Change`].
pub fn render(fetched: &FetchResult, mode: DisplayMode, previous: Option<&PriceRecord>) -> String {
    match mode {
        DisplayMode::Human => human(fetched),
        DisplayMode::Simple => format!("{:.6}", fetched.price),
        DisplayMode::Change => match previous.and_then(|previous| change_since(fetched.price, previous)) {
            Some(change) => format!("{}\n{}", human(fetched), change),
            None => human(fetched),
        },
        DisplayMode::Change24h => {
            let sign = if fetched.change_24h >= 0.0 { " +" } else { " " };
            format!(
                "1 {} = {:.4} {}{}{:.2}%",
                fetched.symbol, fetched.price, fetched.currency, sign, fetched.change_24h
            )
        }
    }
}

fn human(fetched: &FetchResult) -> String {
    format!(
        "1 {} = {:.2} {}, as of {}.",
        fetched.symbol,
        fetched.price,
        fetched.currency,
        format_timestamp(fetched.observed_at)
    )
}

fn change_since(price: f64, previous: &PriceRecord) -> Option<String> {
    if previous.price == 0.0 {
        return None;
    }

    let delta = (price / previous.price * 100.0 - 100.0).abs();
    let direction = if previous.price < price {
        "Increased"
    } else {
        "Decreased"
    };

    Some(format!(
        "{} by {:.2}% since you last checked on {}",
        direction,
        delta,
        format_timestamp(previous.observed_at)
    ))
}

/// Local date and time for a unix timestamp.
pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(time) => time.format("%c").to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(price: f64, change_24h: f64) -> FetchResult {
        FetchResult {
            symbol: "BTC".to_string(),
            price,
            observed_at: 1_515_848_961,
            change_24h,
            currency: "USD".to_string(),
            fell_back_to_usd: false,
        }
    }

    fn previous(price: f64) -> PriceRecord {
        PriceRecord {
            coin: "bitcoin".to_string(),
            currency: "USD".to_string(),
            price,
            observed_at: 1_515_000_000,
        }
    }

    #[test]
    fn human_mode() {
        let line = render(&fetched(11432.1, 0.0), DisplayMode::Human, None);
        assert!(line.starts_with("1 BTC = 11432.10 USD, as of "));
        assert!(line.ends_with(&format!("{}.", format_timestamp(1_515_848_961))));
    }

    #[test]
    fn simple_mode() {
        assert_eq!(
            render(&fetched(11432.1, 0.0), DisplayMode::Simple, None),
            "11432.100000"
        );
    }

    #[test]
    fn change_mode_increase() {
        let text = render(&fetched(110.0, 0.0), DisplayMode::Change, Some(&previous(100.0)));
        let (first, second) = text.split_once('\n').unwrap();
        assert_eq!(first, render(&fetched(110.0, 0.0), DisplayMode::Human, None));
        assert_eq!(
            second,
            format!(
                "Increased by 10.00% since you last checked on {}",
                format_timestamp(1_515_000_000)
            )
        );
    }

    #[test]
    fn change_mode_decrease_and_tie() {
        let text = render(&fetched(90.0, 0.0), DisplayMode::Change, Some(&previous(100.0)));
        assert!(text.contains("Decreased by 10.00%"));

        let text = render(&fetched(100.0, 0.0), DisplayMode::Change, Some(&previous(100.0)));
        assert!(text.contains("Decreased by 0.00%"));
    }

    #[test]
    fn change_mode_without_history_is_human() {
        assert_eq!(
            render(&fetched(100.0, 0.0), DisplayMode::Change, None),
            render(&fetched(100.0, 0.0), DisplayMode::Human, None)
        );
        assert_eq!(
            render(&fetched(100.0, 0.0), DisplayMode::Change, Some(&previous(0.0))),
            render(&fetched(100.0, 0.0), DisplayMode::Human, None)
        );
    }

    #[test]
    fn change_24h_mode_signs() {
        assert_eq!(
            render(&fetched(11432.1, 2.5), DisplayMode::Change24h, None),
            "1 BTC = 11432.1000 USD +2.50%"
        );
        assert_eq!(
            render(&fetched(11432.1, 0.0), DisplayMode::Change24h, None),
            "1 BTC = 11432.1000 USD +0.00%"
        );
        assert_eq!(
            render(&fetched(11432.1, -3.17), DisplayMode::Change24h, None),
            "1 BTC = 11432.1000 USD -3.17%"
        );
    }
}
