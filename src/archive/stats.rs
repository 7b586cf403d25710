//! Dashboard aggregates. Recomputed from the full archive on every render,
//! never stored.

use chrono::{DateTime, Local, NaiveDate};

use crate::model::{AgencyResult, Domain};

/// Summary statistics over the whole archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    pub total: usize,
    pub mine: usize,
    pub others: usize,
    pub life: usize,
    /// Rounded mean unnecessary load across all entries; 0 on an empty
    /// archive.
    pub energy_reclaimed: u32,
}

impl ArchiveStats {
    pub fn compute(entries: &[AgencyResult]) -> Self {
        let total = entries.len();
        let mut mine = 0;
        let mut others = 0;
        let mut life = 0;
        let mut load_sum: u64 = 0;

        for entry in entries {
            match entry.dominant_domain {
                Domain::Mine => mine += 1,
                Domain::Others => others += 1,
                Domain::Life => life += 1,
            }
            load_sum += u64::from(entry.classification.unnecessary_load());
        }

        let energy_reclaimed = if total == 0 {
            0
        } else {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            {
                (load_sum as f64 / total as f64).round() as u32
            }
        };

        Self {
            total,
            mine,
            others,
            life,
            energy_reclaimed,
        }
    }

    pub fn count_for(&self, domain: Domain) -> usize {
        match domain {
            Domain::Mine => self.mine,
            Domain::Others => self.others,
            Domain::Life => self.life,
        }
    }

    /// Clarity-balance proportions `[mine, others, life]` for the
    /// three-segment bar. `None` on an empty archive: the caller renders
    /// empty segments instead of dividing by zero.
    pub fn balance(&self) -> Option<[f64; 3]> {
        if self.total == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let total = self.total as f64;
        #[allow(clippy::cast_precision_loss)]
        Some([
            self.mine as f64 / total,
            self.others as f64 / total,
            self.life as f64 / total,
        ])
    }
}

/// Entries whose timestamp falls on `today` in local time. Entries lacking a
/// timestamp (or carrying an unparseable one) are excluded from the bucket
/// but still count toward the total.
pub fn todays_entries<'a>(entries: &'a [AgencyResult], today: NaiveDate) -> Vec<&'a AgencyResult> {
    entries
        .iter()
        .filter(|entry| local_timestamp(entry).is_some_and(|dt| dt.date_naive() == today))
        .collect()
}

/// Local hour of an entry's timestamp, for the Today's Pulse strip.
pub fn local_hour(entry: &AgencyResult) -> Option<u32> {
    use chrono::Timelike;
    local_timestamp(entry).map(|dt| dt.hour())
}

fn local_timestamp(entry: &AgencyResult) -> Option<DateTime<Local>> {
    let raw = entry.timestamp.as_deref()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}
