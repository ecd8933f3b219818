use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, OpenFlags, Row, Rows, Statement};
use spdlog::debug;

use crate::error::{ConvertError, Result};
use crate::post::PostRecord;

/// Read-only handle to the old blog database.
pub struct PostSource {
    conn: Connection,
    path: PathBuf,
    table: String,
}

/// Prepared query over the posts table, oldest first, drafts before everything else.
pub struct PostQuery<'conn> {
    stmt: Statement<'conn>,
    path: &'conn Path,
    table: &'conn str,
}

/// Lazy cursor over the query result. Not restartable.
pub struct PostRecords<'stmt> {
    rows: Rows<'stmt>,
    table: &'stmt str,
}

impl PostSource {
    /// `table` must be a plain identifier, it is spliced into the query.
    pub fn open(path: &Path, table: &str) -> Result<PostSource> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = match Connection::open_with_flags(path, flags) {
            Ok(conn) => conn,
            Err(source) => return Err(ConvertError::SourceUnavailable { path: path.to_path_buf(), source }),
        };
        debug!("Opened {} read-only", path.display());

        Ok(PostSource {
            conn,
            path: path.to_path_buf(),
            table: table.to_string(),
        })
    }

    pub fn query(&self) -> Result<PostQuery<'_>> {
        let sql = format!(
            "SELECT text, name, title, published, modified, summary FROM {} \
             ORDER BY published IS NOT NULL, published, modified",
            self.table
        );

        match self.conn.prepare(&sql) {
            Ok(stmt) => Ok(PostQuery { stmt, path: &self.path, table: &self.table }),
            Err(source) => Err(classify_error(&self.path, &self.table, source)),
        }
    }
}

impl<'conn> PostQuery<'conn> {
    pub fn records(&mut self) -> Result<PostRecords<'_>> {
        let table = self.table;
        match self.stmt.query([]) {
            Ok(rows) => Ok(PostRecords { rows, table }),
            Err(source) => Err(classify_error(self.path, table, source)),
        }
    }
}

impl Iterator for PostRecords<'_> {
    type Item = Result<PostRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rows.next() {
            Ok(Some(row)) => Some(read_record(row)),
            Ok(None) => None,
            Err(source) => Some(Err(ConvertError::QueryError { table: self.table.to_string(), source })),
        }
    }
}

/// A file that is not a database only fails once it is actually read.
fn classify_error(path: &Path, table: &str, source: rusqlite::Error) -> ConvertError {
    match source.sqlite_error_code() {
        Some(ErrorCode::NotADatabase)
        | Some(ErrorCode::DatabaseCorrupt)
        | Some(ErrorCode::CannotOpen)
        | Some(ErrorCode::PermissionDenied) => ConvertError::SourceUnavailable { path: path.to_path_buf(), source },
        _ => ConvertError::QueryError { table: table.to_string(), source },
    }
}

fn malformed(name: &str, reason: String) -> ConvertError {
    ConvertError::MalformedRecord { name: name.to_string(), reason }
}

fn text_column(row: &Row, column: &str, name: &str) -> Result<String> {
    row.get::<_, String>(column)
        .map_err(|e| malformed(name, format!("{} is not text: {}", column, e)))
}

fn timestamp_column(row: &Row, column: &str, name: &str) -> Result<Option<i64>> {
    match row.get_ref(column) {
        Ok(ValueRef::Null) => Ok(None),
        Ok(ValueRef::Integer(ts)) => Ok(Some(ts)),
        Ok(ValueRef::Real(ts)) if ts.is_finite() => Ok(Some(ts.trunc() as i64)),
        Ok(other) => Err(malformed(name, format!("{} is not a timestamp ({})", column, other.data_type()))),
        Err(e) => Err(malformed(name, format!("{}: {}", column, e))),
    }
}

fn read_record(row: &Row) -> Result<PostRecord> {
    let name = text_column(row, "name", "<unnamed>")?;
    let modified = timestamp_column(row, "modified", &name)?
        .ok_or_else(|| malformed(&name, "modified is NULL".to_string()))?;

    Ok(PostRecord {
        text: text_column(row, "text", &name)?,
        title: text_column(row, "title", &name)?,
        published: timestamp_column(row, "published", &name)?,
        modified,
        summary: text_column(row, "summary", &name)?,
        name,
    })
}
