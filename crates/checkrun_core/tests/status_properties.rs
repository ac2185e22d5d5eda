//! Property tests for pass/fail aggregation.

use checkrun_core::status::{EXIT_FAILURE, EXIT_SUCCESS, Status, aggregate, status_line};
use proptest::prelude::*;

proptest! {
    /// Property: the aggregate is success iff every exit code was zero.
    #[test]
    fn aggregate_is_success_iff_all_zero(codes in prop::collection::vec(prop::option::of(-2i32..4), 0..32)) {
        let expected = if codes.iter().all(|c| *c == Some(0)) { EXIT_SUCCESS } else { EXIT_FAILURE };
        let actual = aggregate(codes.iter().map(|c| Status::from_exit_code(*c)));
        prop_assert_eq!(actual, expected);
    }

    /// Property: the label always starts at the same column for names that fit.
    #[test]
    fn status_label_column_is_stable(name in "test_[a-z_]{1,20}\\.py", width in 32usize..64) {
        let line = status_line(&name, Status::Pass, width);
        prop_assert_eq!(line.find("[ pass ]"), Some(width + 5));
    }
}
