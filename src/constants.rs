pub const DEFAULT_PATIENT_ID_COLUMN: &str = "patdeid";
pub const DEFAULT_VISIT_COLUMN: &str = "VISIT";

pub const DEFAULT_VISIT_PREFIX: &str = "VISIT";
pub const DEFAULT_BASELINE_TOKEN: &str = "BASELINE";
pub const DEFAULT_WEEK_PREFIX: &str = "WK";

pub const TOTAL_NEGATIVE_TESTS_COL: &str = "TNT";
pub const NEGATIVE_TEST_RATE_COL: &str = "NTR";
pub const CONSECUTIVE_NEGATIVE_TESTS_COL: &str = "CNT";
pub const RESPONDER_COL: &str = "responder";

// Weeks 0 through 24 of the treatment phase.
pub const DEFAULT_TOTAL_WEEKS: usize = 25;
pub const DEFAULT_TRAILING_WEEKS: usize = 4;

/// Temporary column used to restore row order after joins.
pub(crate) const ROW_ORDER_COL: &str = "__ctnxtract_row_order";
