//! Scripted executor for database-free tests.
//!
//! `MockExecutor` records every statement it receives and answers from a
//! queue of scripted responses. An exhausted queue answers with no rows and
//! zero affected rows.
//!
//! ```ignore
//! use rowguard::test_helpers::MockExecutor;
//! use rowguard::{DataRow, RowExecutor};
//! use sea_query::{Value, Values};
//!
//! let executor = MockExecutor::new();
//! executor.push_rows(vec![DataRow::from_pairs([("Id", Value::Int(Some(7)))])]);
//!
//! let row = executor.query_one("SELECT 1", &Values(vec![])).unwrap();
//! assert!(row.is_some());
//! assert_eq!(executor.sql(), vec!["SELECT 1".to_string()]);
//! ```

use sea_query::{Value, Values};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::data_row::DataRow;
use crate::executor::{RowError, RowExecutor};

/// One statement as seen by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<Value>,
}

#[derive(Debug)]
enum Response {
    Rows(Vec<DataRow>),
    Affected(u64),
    Error(String),
}

#[derive(Debug, Default)]
pub struct MockExecutor {
    statements: Mutex<Vec<Statement>>,
    responses: Mutex<VecDeque<Response>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next statement with `rows`.
    pub fn push_rows(&self, rows: Vec<DataRow>) -> &Self {
        self.push(Response::Rows(rows))
    }

    /// Answer the next statement with an affected-row count.
    pub fn push_affected(&self, count: u64) -> &Self {
        self.push(Response::Affected(count))
    }

    /// Fail the next statement with `RowError::QueryError(message)`.
    pub fn push_error(&self, message: &str) -> &Self {
        self.push(Response::Error(message.to_string()))
    }

    /// Every statement received so far.
    pub fn statements(&self) -> Vec<Statement> {
        self.lock_statements().clone()
    }

    pub fn sql(&self) -> Vec<String> {
        self.lock_statements().iter().map(|s| s.sql.clone()).collect()
    }

    pub fn last(&self) -> Option<Statement> {
        self.lock_statements().last().cloned()
    }

    pub fn clear(&self) {
        self.lock_statements().clear();
        self.lock_responses().clear();
    }

    fn push(&self, response: Response) -> &Self {
        self.lock_responses().push_back(response);
        self
    }

    fn record(&self, sql: &str, values: &Values) -> Option<Response> {
        self.lock_statements().push(Statement {
            sql: sql.to_string(),
            values: values.0.clone(),
        });
        self.lock_responses().pop_front()
    }

    fn lock_statements(&self) -> std::sync::MutexGuard<'_, Vec<Statement>> {
        self.statements.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Response>> {
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RowExecutor for MockExecutor {
    fn execute(&self, sql: &str, values: &Values) -> Result<u64, RowError> {
        match self.record(sql, values) {
            Some(Response::Affected(n)) => Ok(n),
            Some(Response::Rows(rows)) => Ok(rows.len() as u64),
            Some(Response::Error(msg)) => Err(RowError::QueryError(msg)),
            None => Ok(0),
        }
    }

    fn query_one(&self, sql: &str, values: &Values) -> Result<Option<DataRow>, RowError> {
        self.query_all(sql, values).map(|rows| rows.into_iter().next())
    }

    fn query_all(&self, sql: &str, values: &Values) -> Result<Vec<DataRow>, RowError> {
        match self.record(sql, values) {
            Some(Response::Rows(rows)) => Ok(rows),
            Some(Response::Affected(_)) | None => Ok(Vec::new()),
            Some(Response::Error(msg)) => Err(RowError::QueryError(msg)),
        }
    }
}
