//! Static public holiday calendar.

use chrono::NaiveDate;
use serde::Serialize;

/// A public holiday. Reference data, not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub id: &'static str,
    pub name: &'static str,
    pub date: NaiveDate,
}

/// Organization holidays as (id, name, year, month, day).
pub const HOLIDAYS: [(&str, &str, i32, u32, u32); 15] = [
    ("h1", "New Year Day", 2026, 1, 1),
    ("h2", "New Year Holiday", 2026, 1, 2),
    ("h3", "National Heroes Day", 2026, 2, 1),
    ("h4", "Eid al-Fitr", 2026, 3, 20),
    ("h5", "Good Friday", 2026, 4, 3),
    ("h6", "Easter Monday", 2026, 4, 6),
    ("h7", "Genocide Memorial Day", 2026, 4, 7),
    ("h8", "Labor Day", 2026, 5, 1),
    ("h9", "Eid al-Adha", 2026, 5, 27),
    ("h10", "Independence Day", 2026, 7, 1),
    ("h11", "Liberation Day", 2026, 7, 4),
    ("h12", "Umuganura (Harvest Day)", 2026, 8, 7),
    ("h13", "Assumption Day", 2026, 8, 15),
    ("h14", "Christmas Day", 2026, 12, 25),
    ("h15", "Boxing Day", 2026, 12, 26),
];

impl Holiday {
    /// All holidays in calendar order.
    pub fn all() -> Vec<Holiday> {
        HOLIDAYS
            .iter()
            .filter_map(|&(id, name, year, month, day)| {
                NaiveDate::from_ymd_opt(year, month, day).map(|date| Holiday { id, name, date })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_holidays_parse() {
        let all = Holiday::all();
        assert_eq!(all.len(), HOLIDAYS.len());
        assert!(all.windows(2).all(|w| w[0].date <= w[1].date));
    }
}
