//! V001: memory_leak_logs: append-only leak and excessive-usage rows.

pub const MIGRATION_SQL: &str = r#"
-- One row per LEAK_DETECTED or EXCESSIVE_USAGE event.
-- Columns that do not apply to a row's type stay NULL.
CREATE TABLE IF NOT EXISTS memory_leak_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    test_time TEXT NOT NULL,
    build_commit TEXT NOT NULL,
    test_name TEXT NOT NULL,
    memory_status TEXT NOT NULL,
    initial_memory_kb INTEGER,
    final_memory_kb INTEGER,
    peak_memory_kb INTEGER,
    leaked_memory_kb INTEGER,
    status_code INTEGER,
    error_message TEXT
);

CREATE INDEX IF NOT EXISTS idx_memory_leak_logs_commit
    ON memory_leak_logs(build_commit);
"#;
