#![allow(dead_code)]

use connectors::file::jsonl::source::LineSource;
use engine_config::{
    report::summary::{RunCounters, RunSummary},
    settings::{TableMode, batch_size::BatchSize, validated::LoadSettings},
};
use engine_runtime::{
    error::LoadError,
    execution::{executor::LoadExecutor, executor::run, factory},
};
use model::schema::SUBMISSIONS;
use rusqlite::{Connection, types::Value as SqlValue};
use std::{
    io,
    path::{Path, PathBuf},
    pin::Pin,
    task::{Context, Poll},
};
use tempfile::TempDir;
use tokio::io::{AsyncRead, BufReader, ReadBuf};

/// Scratch directory holding one input file and one output database.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self) -> PathBuf {
        self.dir.path().join("input.jsonl")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("output.db")
    }

    pub fn write_input(&self, contents: &str) -> PathBuf {
        let path = self.input();
        std::fs::write(&path, contents).expect("write input");
        path
    }

    pub fn settings(&self, batch_size: i64, mode: TableMode) -> LoadSettings {
        LoadSettings::builder()
            .input(self.input())
            .output(self.output())
            .batch_size(BatchSize::new(batch_size).expect("valid batch size"))
            .mode(mode)
            .build()
            .expect("valid settings")
    }
}

/// Runs a load, panicking on any error
pub async fn run_load(settings: &LoadSettings) -> RunSummary {
    run(settings).await.expect("load should succeed")
}

/// Drives the real SQLite destination from a reader that fails once `data`
/// has been served.
pub async fn run_with_failing_input(
    settings: &LoadSettings,
    data: &str,
) -> Result<RunCounters, LoadError> {
    let reader = FailingReader::new(data);
    let destination = factory::create_destination(settings, &SUBMISSIONS)?;
    LoadExecutor::new(LineSource::new(BufReader::new(reader)), destination, &SUBMISSIONS)
        .execute()
        .await
}

/// Serves its bytes and then errors on every further read.
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        FailingReader {
            data: data.as_bytes().to_vec(),
            pos: 0,
        }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.pos >= self.data.len() {
            return Poll::Ready(Err(io::Error::other("input device error")));
        }
        let n = buf.remaining().min(self.data.len() - self.pos);
        let start = self.pos;
        buf.put_slice(&self.data[start..start + n]);
        self.pos += n;
        Poll::Ready(Ok(()))
    }
}

/// `n` well-formed submission lines, each terminated by a newline.
pub fn submission_lines(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "{{\"created_utc\":{},\"num_comments\":{i},\"permalink\":\"/r/{i}\",\"score\":{},\"title\":\"post {i}\"}}\n",
                1_600_000_000 + i,
                i * 10
            )
        })
        .collect()
}

fn open(db: &Path) -> Connection {
    Connection::open(db).expect("open output database")
}

pub fn get_row_count(db: &Path, table: &str) -> i64 {
    open(db)
        .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |r| r.get(0))
        .expect("count rows")
}

pub fn get_table_names(db: &Path) -> Vec<String> {
    let conn = open(db);
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .expect("prepare");
    stmt.query_map([], |r| r.get(0))
        .expect("query tables")
        .collect::<Result<_, _>>()
        .expect("read table names")
}

pub fn assert_table_exists(db: &Path, table: &str, expected: bool) {
    let exists = get_table_names(db).iter().any(|t| t == table);
    assert_eq!(exists, expected, "table '{table}' existence mismatch");
}

/// Column names and declared types, in table order.
pub fn get_columns(db: &Path, table: &str) -> Vec<(String, String)> {
    let conn = open(db);
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info(\"{table}\")"))
        .expect("prepare");
    stmt.query_map([], |r| Ok((r.get(1)?, r.get(2)?)))
        .expect("query columns")
        .collect::<Result<_, _>>()
        .expect("read columns")
}

/// All rows in insertion order.
pub fn fetch_rows(db: &Path, table: &str) -> Vec<Vec<SqlValue>> {
    let conn = open(db);
    let mut stmt = conn
        .prepare(&format!("SELECT * FROM \"{table}\" ORDER BY rowid"))
        .expect("prepare");
    let width = stmt.column_count();
    stmt.query_map([], |r| (0..width).map(|i| r.get(i)).collect())
        .expect("query rows")
        .collect::<Result<_, _>>()
        .expect("read rows")
}

pub fn column_index(name: &str) -> usize {
    SUBMISSIONS
        .column_names()
        .position(|c| c == name)
        .unwrap_or_else(|| panic!("unknown column {name}"))
}
