//! Linear interpolation of missing candidate dates.
//!
//! Operates positionally over a slice already sorted by candidate
//! number: each gap between two known dates is filled evenly on the
//! epoch-day axis. Gaps before the first or after the last known date
//! stay empty; nothing is ever extrapolated.

use chrono::{Duration, NaiveDate};

use comp_model::CandidateRecord;

/// Fill missing dates in place. Returns the number of dates filled.
pub fn interpolate_dates(records: &mut [CandidateRecord]) -> usize {
    let known: Vec<(usize, NaiveDate)> = records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| record.date.map(|date| (idx, date)))
        .collect();

    let mut filled = 0;
    for pair in known.windows(2) {
        let (start_idx, start_date) = pair[0];
        let (end_idx, end_date) = pair[1];
        let span = (end_idx - start_idx) as i64;
        if span <= 1 {
            continue;
        }
        let total_days = (end_date - start_date).num_days();
        for position in 1..span {
            let offset = (total_days as f64 * position as f64 / span as f64).round() as i64;
            records[start_idx + position as usize].date = Some(start_date + Duration::days(offset));
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::interpolate_dates;
    use chrono::NaiveDate;
    use comp_model::CandidateRecord;

    fn candidate(number: u32, date: Option<NaiveDate>) -> CandidateRecord {
        CandidateRecord {
            name: format!("Candidate {number}"),
            candidate_number: Some(number),
            date,
            ..CandidateRecord::default()
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn fills_single_gap_strictly_between_neighbors() {
        let mut records = vec![
            candidate(1, Some(day(10))),
            candidate(2, None),
            candidate(3, Some(day(20))),
        ];
        assert_eq!(interpolate_dates(&mut records), 1);
        let filled = records[1].date.unwrap();
        assert!(filled > day(10) && filled < day(20));
        assert_eq!(filled, day(15));
    }

    #[test]
    fn fills_multi_gap_evenly() {
        let mut records = vec![
            candidate(1, Some(day(1))),
            candidate(2, None),
            candidate(3, None),
            candidate(4, Some(day(10))),
        ];
        assert_eq!(interpolate_dates(&mut records), 2);
        assert_eq!(records[1].date, Some(day(4)));
        assert_eq!(records[2].date, Some(day(7)));
    }

    #[test]
    fn never_extrapolates_past_either_end() {
        let mut records = vec![
            candidate(1, None),
            candidate(2, Some(day(10))),
            candidate(3, Some(day(12))),
            candidate(4, None),
        ];
        assert_eq!(interpolate_dates(&mut records), 0);
        assert_eq!(records[0].date, None);
        assert_eq!(records[3].date, None);
    }

    #[test]
    fn all_missing_stays_missing() {
        let mut records = vec![candidate(1, None), candidate(2, None)];
        assert_eq!(interpolate_dates(&mut records), 0);
        assert!(records.iter().all(|record| record.date.is_none()));
    }
}
