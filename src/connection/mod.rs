pub mod memory;

use crate::core::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Backend connection consumed by the migration executor
///
/// Implement this to run generated migrations against a real database. The
/// executor drives the full lifecycle: it opens the connection, brackets
/// commands with transactions, and closes the connection when done. A
/// connection is exclusively owned (`&mut`) by one executor call at a time.
///
/// Statement text is opaque to this layer; `execute_non_query` receives it
/// verbatim.
#[async_trait]
pub trait MigrationConnection: Send {
    /// Open the connection. The connection must be in a closed state.
    fn open(&mut self) -> Result<()>;

    /// Async form of [`open`](Self::open), honoring cancellation.
    async fn open_async(&mut self, cancel: &CancellationToken) -> Result<()>;

    /// Close the connection. Safe to call regardless of prior failures.
    fn close(&mut self) -> Result<()>;

    /// Begin a transaction, returning its handle.
    fn begin_transaction(&mut self) -> Result<Box<dyn MigrationTransaction>>;

    /// Async form of [`begin_transaction`](Self::begin_transaction).
    async fn begin_transaction_async(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Box<dyn MigrationTransaction>>;

    /// Execute opaque statement text, returning nothing on success.
    fn execute_non_query(&mut self, sql: &str) -> Result<()>;

    /// Async form of [`execute_non_query`](Self::execute_non_query).
    async fn execute_non_query_async(
        &mut self,
        sql: &str,
        cancel: &CancellationToken,
    ) -> Result<()>;
}

/// Handle for a transaction begun on a [`MigrationConnection`]
///
/// `commit` consumes the handle. Dropping a handle that was never committed
/// releases it, which rolls back any pending work at the backend. Drop runs
/// once, so release is idempotent by construction.
pub trait MigrationTransaction: Send {
    fn commit(self: Box<Self>) -> Result<()>;
}
