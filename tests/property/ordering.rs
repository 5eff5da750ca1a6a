//! Row ordering does not depend on input order

use dirtrail::snapshot::path::compare_filenames;
use dirtrail::{consolidate, ChangeKind, FileChange, NamedFileChange};
use proptest::prelude::*;
use std::cmp::Ordering;

fn filename_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_]{1,4}(/[a-zA-Z]{1,3})?\\.(txt|rs)"
}

proptest! {
    #[test]
    fn rows_are_sorted_by_collation(names in prop::collection::hash_set(filename_strategy(), 0..20)) {
        let transition: Vec<NamedFileChange> = names
            .iter()
            .map(|n| NamedFileChange::new(n.clone(), FileChange::new(ChangeKind::Creation, 1, 0)))
            .collect();
        let rows = consolidate(&[transition]);
        for pair in rows.windows(2) {
            prop_assert_eq!(
                compare_filenames(&pair[0].filename, &pair[1].filename),
                Ordering::Less
            );
        }
    }

    #[test]
    fn input_order_is_irrelevant(names in prop::collection::hash_set(filename_strategy(), 0..20)) {
        let forward: Vec<NamedFileChange> = names
            .iter()
            .map(|n| NamedFileChange::new(n.clone(), FileChange::new(ChangeKind::Modification, 2, 1)))
            .collect();
        let mut reversed = forward.clone();
        reversed.reverse();
        prop_assert_eq!(consolidate(&[forward]), consolidate(&[reversed]));
    }

    #[test]
    fn collation_is_a_total_order(a in filename_strategy(), b in filename_strategy()) {
        let ab = compare_filenames(&a, &b);
        let ba = compare_filenames(&b, &a);
        prop_assert_eq!(ab, ba.reverse());
        prop_assert_eq!(ab == Ordering::Equal, a == b);
    }
}
