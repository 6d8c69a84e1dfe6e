/// Race times travel through the system as strings: `ss.xx` under a minute,
/// `m:ss.xx` from a minute up, always two centisecond digits.
pub struct SwimTime {}

impl SwimTime {
    /// # format seconds as a time string
    ///
    /// ## Arguments
    /// * `seconds` - raw seconds, e.g. from a parsed results file
    ///
    /// ## Returns
    /// * `String` - `ss.xx` or `m:ss.xx`
    pub fn format(seconds: f64) -> String {
        let centis = (seconds * 100.0).round() as i64;
        let minutes = centis / 6000;
        let rest = centis % 6000;

        if minutes > 0 {
            format!("{}:{:02}.{:02}", minutes, rest / 100, rest % 100)
        } else {
            format!("{}.{:02}", rest / 100, rest % 100)
        }
    }

    /// # format a seed time
    /// a zero seed means no previous time on record
    pub fn format_seed(seconds: f64) -> String {
        if seconds == 0.0 {
            return "NT".to_string();
        }
        SwimTime::format(seconds)
    }

    /// # sort key for a time string
    /// bare-seconds times get a `0:` prefix so lexicographic order matches
    /// chronological order
    pub fn sort_key(time: &str) -> String {
        if time.len() <= 5 {
            format!("0:{}", time)
        } else {
            time.to_string()
        }
    }

    /// # check whether `time` beats (or equals) `cutoff`
    /// used for qualifying standards
    pub fn makes_cut(time: &str, cutoff: &str) -> bool {
        SwimTime::sort_key(time) <= SwimTime::sort_key(cutoff)
    }
}

#[cfg(test)]
mod tests {
    use super::SwimTime;

    #[test]
    fn formats_under_a_minute() {
        assert_eq!(SwimTime::format(29.5), "29.50");
        assert_eq!(SwimTime::format(59.99), "59.99");
        assert_eq!(SwimTime::format(5.07), "5.07");
    }

    #[test]
    fn formats_over_a_minute() {
        assert_eq!(SwimTime::format(65.37), "1:05.37");
        assert_eq!(SwimTime::format(60.0), "1:00.00");
        assert_eq!(SwimTime::format(325.19), "5:25.19");
    }

    #[test]
    fn zero_seed_is_nt() {
        assert_eq!(SwimTime::format_seed(0.0), "NT");
        assert_eq!(SwimTime::format_seed(31.02), "31.02");
    }

    #[test]
    fn sort_key_pads_bare_seconds() {
        assert_eq!(SwimTime::sort_key("29.50"), "0:29.50");
        assert_eq!(SwimTime::sort_key("1:05.37"), "1:05.37");
    }

    #[test]
    fn padded_keys_order_chronologically() {
        let mut times = vec!["1:05.37", "29.50", "59.99", "1:00.00"];
        times.sort_by_key(|t| SwimTime::sort_key(t));
        assert_eq!(times, vec!["29.50", "59.99", "1:00.00", "1:05.37"]);
    }

    #[test]
    fn cutoff_comparison() {
        assert!(SwimTime::makes_cut("59.19", "59.19"));
        assert!(SwimTime::makes_cut("58.80", "59.19"));
        assert!(!SwimTime::makes_cut("1:00.01", "59.19"));
    }
}
