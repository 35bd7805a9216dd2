//! Fixed names inside a store root

/// One file per idea
pub const IDEAS_DIR: &str = "ideas";

/// Removed ideas when `trash_on_remove` is set
pub const TRASH_DIR: &str = "trash";

/// Last committed id
pub const COUNTER_FILE: &str = "counter";

/// Recently resolved ids
pub const LAST_FILE: &str = "last";

/// Filename pane of the working set
pub const WORKING_FILES: &str = "working_files";

/// Content pane of the working set
pub const WORKING_CONTENT: &str = "working_content";

pub const CONFIG_FILE: &str = "config.toml";
