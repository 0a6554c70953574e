use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_rides: u64,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_drivers: u64,
    #[serde(default)]
    pub rides_by_day: Vec<DailyRides>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRides {
    pub date: String,
    pub rides: u64,
}

impl AdminStats {
    pub fn busiest_day(&self) -> u64 {
        self.rides_by_day.iter().map(|d| d.rides).max().unwrap_or(0)
    }

    pub fn average_daily_rides(&self) -> f64 {
        if self.rides_by_day.is_empty() {
            return 0.0;
        }
        let total: u64 = self.rides_by_day.iter().map(|d| d.rides).sum();
        total as f64 / self.rides_by_day.len() as f64
    }

    /// Users per driver, `None` while there are no drivers.
    pub fn users_per_driver(&self) -> Option<f64> {
        (self.total_drivers > 0).then(|| self.total_users as f64 / self.total_drivers as f64)
    }

    /// Bar width of each day as a percentage of the busiest day.
    pub fn day_bars(&self) -> Vec<(&str, u64, u8)> {
        let max = self.busiest_day();
        self.rides_by_day
            .iter()
            .map(|d| {
                let pct = if max == 0 { 0 } else { (d.rides * 100 / max) as u8 };
                (d.date.as_str(), d.rides, pct)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_busiest_day() {
        let stats = AdminStats {
            rides_by_day: vec![
                DailyRides { date: "2025-10-01".into(), rides: 2 },
                DailyRides { date: "2025-10-02".into(), rides: 8 },
                DailyRides { date: "2025-10-03".into(), rides: 0 },
            ],
            ..Default::default()
        };

        let bars = stats.day_bars();
        assert_eq!(bars[0].2, 25);
        assert_eq!(bars[1].2, 100);
        assert_eq!(bars[2].2, 0);
    }

    #[test]
    fn empty_history_has_no_bars() {
        assert!(AdminStats::default().day_bars().is_empty());
    }

    #[test]
    fn platform_summary_ratios() {
        let stats = AdminStats {
            total_users: 30,
            total_drivers: 4,
            rides_by_day: vec![
                DailyRides { date: "a".into(), rides: 3 },
                DailyRides { date: "b".into(), rides: 4 },
            ],
            ..Default::default()
        };
        assert_eq!(stats.average_daily_rides(), 3.5);
        assert_eq!(stats.users_per_driver(), Some(7.5));
        assert_eq!(AdminStats::default().users_per_driver(), None);
    }
}
