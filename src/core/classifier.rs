//! Buckets records into the three grade towers.

use crate::domain::model::{GradeGroup, Record};
use std::cmp::Ordering;

/// Ordering used inside every tower: domain, then cluster, then standard id.
/// Plain ordinal string comparison on each key.
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    a.domain
        .cmp(&b.domain)
        .then_with(|| a.cluster.cmp(&b.cluster))
        .then_with(|| a.standard_id.cmp(&b.standard_id))
}

/// Stable sort, so records equal on all three keys keep their input order.
pub fn order_records(records: &mut [Record]) {
    records.sort_by(compare_records);
}

/// Sorts the whole input, then splits it by grade. Index 0 is grade 6, 2 is grade 8.
///
/// Records whose grade is empty or does not start with 6, 7 or 8 are dropped
/// without error. Sorting happens before filtering, so dropped records still
/// take part in the comparisons; the output is the same either way.
pub fn classify(mut records: Vec<Record>) -> [Vec<Record>; 3] {
    order_records(&mut records);

    let mut groups: [Vec<Record>; 3] = Default::default();
    for record in records {
        match GradeGroup::from_grade(&record.grade) {
            Some(group) => groups[group.index()].push(record),
            None => tracing::debug!(
                "Dropping {} with unusable grade {:?}",
                record.standard_id,
                record.grade
            ),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, grade: &str, domain: &str, cluster: &str, standard_id: &str) -> Record {
        Record {
            id,
            subject: "Math".to_string(),
            grade: grade.to_string(),
            mastery: 1,
            domain_id: String::new(),
            domain: domain.to_string(),
            cluster: cluster.to_string(),
            standard_id: standard_id.to_string(),
            standard_description: String::new(),
        }
    }

    fn ids(group: &[Record]) -> Vec<i64> {
        group.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_classify_buckets_by_leading_digit() {
        let input = vec![
            record(1, "6th Grade", "A", "a", "1"),
            record(2, "7th Grade", "A", "a", "2"),
            record(3, "8th Grade", "A", "a", "3"),
            record(4, "", "A", "a", "4"),
            record(5, "Algebra I", "A", "a", "5"),
            record(6, "9th Grade", "A", "a", "6"),
            record(7, "6", "A", "a", "7"),
        ];

        let groups = classify(input);

        assert_eq!(ids(&groups[0]), vec![1, 7]);
        assert_eq!(ids(&groups[1]), vec![2]);
        assert_eq!(ids(&groups[2]), vec![3]);
        for (index, group) in groups.iter().enumerate() {
            for r in group {
                let digit = r.grade.chars().next().unwrap().to_digit(10).unwrap();
                assert_eq!(digit as usize, index + 6);
            }
        }
    }

    #[test]
    fn test_classify_orders_by_domain_cluster_standard() {
        let input = vec![
            record(1, "6th Grade", "Geometry", "b", "6.G.2"),
            record(2, "6th Grade", "Expressions", "z", "6.EE.9"),
            record(3, "6th Grade", "Geometry", "a", "6.G.9"),
            record(4, "6th Grade", "Geometry", "a", "6.G.1"),
        ];

        let groups = classify(input);

        assert_eq!(ids(&groups[0]), vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_domain_alone_decides_when_domains_differ() {
        let input = vec![
            record(1, "7th Grade", "C", "a", "a"),
            record(2, "7th Grade", "A", "z", "z"),
            record(3, "7th Grade", "B", "m", "0"),
        ];

        let groups = classify(input);

        assert_eq!(ids(&groups[1]), vec![2, 3, 1]);
    }

    #[test]
    fn test_classify_is_stable_for_equal_keys() {
        let input = vec![
            record(10, "8th Grade", "D", "c", "s"),
            record(11, "8th Grade", "D", "c", "s"),
            record(5, "8th Grade", "A", "c", "s"),
            record(12, "8th Grade", "D", "c", "s"),
        ];

        let groups = classify(input);

        assert_eq!(ids(&groups[2]), vec![5, 10, 11, 12]);
    }

    #[test]
    fn test_ordinal_compare_is_case_sensitive() {
        let a = record(1, "6", "apple", "", "");
        let b = record(2, "6", "Banana", "", "");
        // 'B' (0x42) sorts before 'a' (0x61)
        assert_eq!(compare_records(&b, &a), Ordering::Less);
    }

    #[test]
    fn test_classify_empty_input() {
        let groups = classify(Vec::new());
        assert!(groups.iter().all(Vec::is_empty));
    }
}
