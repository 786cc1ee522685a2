//! Fixed limits, response prefixes and column id tables shared by the tools

use std::time::Duration;

/// Prefixes marking expected failures that are reported as tool output rather than errors
pub mod prefix {
    pub const BOARD_NOT_FOUND: &str = "BOARD_NOT_FOUND:";
    pub const DOCUMENT_NOT_FOUND: &str = "DOCUMENT_NOT_FOUND:";
    pub const SPRINT_NOT_FOUND: &str = "SPRINT_NOT_FOUND:";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR:";
    pub const WORKSPACE_NOT_FOUND: &str = "WORKSPACE_NOT_FOUND:";
}

pub mod board_insights {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 1000;
    pub const NO_RESULTS: &str = "No board insights found for the given query.";
}

pub mod items_page {
    use super::Duration;

    pub const DEFAULT_LIMIT: u32 = 25;
    pub const MAX_LIMIT: u32 = 500;
    pub const DEFAULT_SUBITEM_LIMIT: u32 = 25;
    pub const MAX_SUBITEM_LIMIT: u32 = 100;
    pub const SMART_SEARCH_TIMEOUT: Duration = Duration::from_secs(5);
    pub const SMART_SEARCH_SIZE: u32 = 100;
    pub const NO_ITEMS_FOUND: &str = "No items found matching the specified searchTerm";
    pub const UNSUPPORTED_COLUMN_VALUE: &str = "Column value type is not supported";
}

/// Column ids monday dev uses on sprint and task boards
pub mod sprint_columns {
    pub const SPRINT_TASKS: &str = "sprint_tasks";
    pub const SPRINT_TIMELINE: &str = "sprint_timeline";
    pub const SPRINT_COMPLETION: &str = "sprint_completion";
    pub const SPRINT_START_DATE: &str = "sprint_start_date";
    pub const SPRINT_END_DATE: &str = "sprint_end_date";
    pub const SPRINT_ACTIVATION: &str = "sprint_activation";
    pub const SPRINT_SUMMARY: &str = "sprint_summary";

    pub const REQUIRED_SPRINT_COLUMNS: [&str; 7] = [
        SPRINT_TASKS,
        SPRINT_TIMELINE,
        SPRINT_COMPLETION,
        SPRINT_START_DATE,
        SPRINT_END_DATE,
        SPRINT_ACTIVATION,
        SPRINT_SUMMARY,
    ];

    pub const TASK_SPRINT: &str = "task_sprint";

    pub const REQUIRED_TASK_COLUMNS: [&str; 1] = [TASK_SPRINT];
}
