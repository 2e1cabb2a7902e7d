use super::{MigrationConnection, MigrationTransaction};
use crate::core::{MigrationError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Observable connection lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Open,
    BeginTransaction,
    Commit,
    Rollback,
    Statement(String),
    Close,
}

#[derive(Debug)]
struct MemoryInner {
    open: bool,
    in_transaction: bool,
    events: Vec<ConnectionEvent>,
    statements_run: usize,
    fail_on_statement: Option<usize>,
}

/// In-memory connection journaling every lifecycle event
///
/// Backend stand-in for tests and examples: statements are recorded, not
/// interpreted. The journal captures opens, transaction boundaries, executed
/// statement text and closes in call order, so tests can assert on the exact
/// sequence the executor produced.
///
/// # Examples
///
/// ```
/// use relmig::connection::MigrationConnection;
/// use relmig::connection::memory::{ConnectionEvent, MemoryConnection};
///
/// # fn main() -> relmig::Result<()> {
/// let mut connection = MemoryConnection::new();
/// connection.open()?;
/// connection.execute_non_query("SELECT 1;")?;
/// connection.close()?;
///
/// assert_eq!(
///     connection.events(),
///     vec![
///         ConnectionEvent::Open,
///         ConnectionEvent::Statement("SELECT 1;".into()),
///         ConnectionEvent::Close,
///     ],
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryConnection {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                open: false,
                in_transaction: false,
                events: Vec::new(),
                statements_run: 0,
                fail_on_statement: None,
            })),
        }
    }

    /// Fail the n-th executed statement (zero-based) with an execution error
    pub fn fail_on_statement(self, index: usize) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_on_statement = Some(index);
        }
        self
    }

    /// Snapshot of the journal so far
    pub fn events(&self) -> Vec<ConnectionEvent> {
        self.inner
            .lock()
            .map(|inner| inner.events.clone())
            .unwrap_or_default()
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().map(|inner| inner.open).unwrap_or(false)
    }

    pub fn is_in_transaction(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.in_transaction)
            .unwrap_or(false)
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MigrationConnection for MemoryConnection {
    fn open(&mut self) -> Result<()> {
        let mut inner = self.inner.lock()?;

        if inner.open {
            return Err(MigrationError::ConnectionError(
                "Connection is already open".into(),
            ));
        }

        inner.open = true;
        inner.events.push(ConnectionEvent::Open);
        Ok(())
    }

    async fn open_async(&mut self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(MigrationError::Canceled);
        }
        self.open()
    }

    fn close(&mut self) -> Result<()> {
        let mut inner = self.inner.lock()?;

        if !inner.open {
            return Ok(());
        }

        if inner.in_transaction {
            inner.in_transaction = false;
            inner.events.push(ConnectionEvent::Rollback);
        }

        inner.open = false;
        inner.events.push(ConnectionEvent::Close);
        Ok(())
    }

    fn begin_transaction(&mut self) -> Result<Box<dyn MigrationTransaction>> {
        let mut inner = self.inner.lock()?;

        if !inner.open {
            return Err(MigrationError::ConnectionError("Connection is closed".into()));
        }

        if inner.in_transaction {
            return Err(MigrationError::TransactionError(
                "Transaction already active".into(),
            ));
        }

        inner.in_transaction = true;
        inner.events.push(ConnectionEvent::BeginTransaction);

        Ok(Box::new(MemoryTransaction {
            inner: Arc::clone(&self.inner),
            finished: false,
        }))
    }

    async fn begin_transaction_async(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Box<dyn MigrationTransaction>> {
        if cancel.is_cancelled() {
            return Err(MigrationError::Canceled);
        }
        self.begin_transaction()
    }

    fn execute_non_query(&mut self, sql: &str) -> Result<()> {
        let mut inner = self.inner.lock()?;

        if !inner.open {
            return Err(MigrationError::ConnectionError("Connection is closed".into()));
        }

        let index = inner.statements_run;
        inner.statements_run += 1;

        if inner.fail_on_statement == Some(index) {
            return Err(MigrationError::ExecutionError(format!(
                "Injected failure at statement {}",
                index
            )));
        }

        inner.events.push(ConnectionEvent::Statement(sql.to_string()));
        Ok(())
    }

    async fn execute_non_query_async(
        &mut self,
        sql: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(MigrationError::Canceled);
        }
        self.execute_non_query(sql)
    }
}

/// Transaction handle sharing journal state with its [`MemoryConnection`]
struct MemoryTransaction {
    inner: Arc<Mutex<MemoryInner>>,
    finished: bool,
}

impl MigrationTransaction for MemoryTransaction {
    fn commit(mut self: Box<Self>) -> Result<()> {
        let mut inner = self.inner.lock()?;

        if !inner.in_transaction {
            return Err(MigrationError::TransactionError(
                "No active transaction".into(),
            ));
        }

        inner.in_transaction = false;
        inner.events.push(ConnectionEvent::Commit);
        drop(inner);

        self.finished = true;
        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        if let Ok(mut inner) = self.inner.lock() {
            if inner.in_transaction {
                inner.in_transaction = false;
                inner.events.push(ConnectionEvent::Rollback);
            }
        }
    }
}
