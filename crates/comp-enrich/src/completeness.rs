//! Completeness partition over enriched candidate records.

use comp_model::{CandidateRecord, UNKNOWN_COUNTRY};

/// A record is complete when every critical field is present and the
/// location is a real one.
///
/// Critical fields: location, high-potential flag, geo factor, comp
/// type, current level, base comp.
pub fn is_complete(record: &CandidateRecord) -> bool {
    let has = |field: &Option<String>| field.as_deref().is_some_and(|value| !value.trim().is_empty());
    has(&record.location)
        && record.location.as_deref() != Some(UNKNOWN_COUNTRY)
        && has(&record.high_potential)
        && record.geo_factor.is_some()
        && has(&record.comp_type)
        && has(&record.current_level)
        && has(&record.base_comp)
}

/// Split records into (complete, incomplete) partitions, preserving
/// input order within each.
pub fn partition_by_completeness(
    records: Vec<CandidateRecord>,
) -> (Vec<CandidateRecord>, Vec<CandidateRecord>) {
    records.into_iter().partition(is_complete)
}

#[cfg(test)]
mod tests {
    use super::{is_complete, partition_by_completeness};
    use comp_model::CandidateRecord;

    fn complete_record(name: &str) -> CandidateRecord {
        CandidateRecord {
            name: name.to_string(),
            location: Some("Spain".to_string()),
            high_potential: Some("Yes".to_string()),
            geo_factor: Some(0.8),
            comp_type: Some("Salary".to_string()),
            current_level: Some("L4 (Senior)".to_string()),
            base_comp: Some("95000".to_string()),
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn every_critical_field_is_required() {
        assert!(is_complete(&complete_record("a")));

        let mut unknown_location = complete_record("b");
        unknown_location.location = Some("Unknown".to_string());
        assert!(!is_complete(&unknown_location));

        let mut no_geo = complete_record("c");
        no_geo.geo_factor = None;
        assert!(!is_complete(&no_geo));

        let mut blank_comp_type = complete_record("d");
        blank_comp_type.comp_type = Some("  ".to_string());
        assert!(!is_complete(&blank_comp_type));

        let mut no_base = complete_record("e");
        no_base.base_comp = None;
        assert!(!is_complete(&no_base));
    }

    #[test]
    fn partitions_are_disjoint_exhaustive_and_ordered() {
        let mut second = complete_record("second");
        second.high_potential = None;
        let records = vec![complete_record("first"), second, complete_record("third")];

        let (complete, incomplete) = partition_by_completeness(records);
        assert_eq!(complete.len(), 2);
        assert_eq!(incomplete.len(), 1);
        assert_eq!(complete[0].name, "first");
        assert_eq!(complete[1].name, "third");
        assert_eq!(incomplete[0].name, "second");
    }
}
