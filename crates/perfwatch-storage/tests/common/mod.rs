//! Shared fixtures: a llama-bench style `test` table in a temp database.

use std::path::Path;

use rusqlite::{params, Connection};

pub const BENCH_SCHEMA: &str = r#"
CREATE TABLE test (
    build_commit TEXT, build_number INTEGER, backends TEXT,
    model_type TEXT, model_size INTEGER, n_batch INTEGER, n_ubatch INTEGER,
    n_threads INTEGER, n_gpu_layers INTEGER, flash_attn INTEGER,
    n_prompt INTEGER, n_gen INTEGER, test_time TEXT,
    avg_ns INTEGER, stddev_ns INTEGER, avg_ts REAL, stddev_ts REAL
);
"#;

pub struct BenchRow<'a> {
    pub model_type: &'a str,
    pub backends: &'a str,
    pub n_prompt: i64,
    pub n_gen: i64,
    pub avg_ts: f64,
    pub avg_ns: i64,
}

pub fn create_bench_db(path: &Path, rows: &[BenchRow<'_>]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(BENCH_SCHEMA).unwrap();
    for row in rows {
        conn.execute(
            "INSERT INTO test (build_commit, build_number, backends, model_type, model_size,
                n_batch, n_ubatch, n_threads, n_gpu_layers, flash_attn, n_prompt, n_gen,
                test_time, avg_ns, stddev_ns, avg_ts, stddev_ts)
             VALUES ('abc123', 42, ?1, ?2, 3825065984, 2048, 512, 8, 0, 0, ?3, ?4,
                '2024-01-01T00:00:00Z', ?5, 1000, ?6, 0.5)",
            params![row.backends, row.model_type, row.n_prompt, row.n_gen, row.avg_ns, row.avg_ts],
        )
        .unwrap();
    }
}
