// ============================================================================
// Migration Command Execution
// ============================================================================

use crate::command::MigrationCommandList;
use crate::connection::{MigrationConnection, MigrationTransaction};
use crate::core::{MigrationError, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs a command list against a connection with transaction bracketing
///
/// Commands execute strictly in list order. Consecutive commands that allow
/// transactions share one ambient transaction; a suppressing command first
/// commits any ambient transaction, then runs standalone. The sync and async
/// entry points make identical transaction-boundary decisions.
///
/// Execution failures propagate unchanged after cleanup: any live
/// transaction is released (rolling back uncommitted work at the backend)
/// and the connection is closed. Earlier segments that already committed
/// stay committed.
///
/// # Examples
///
/// ```
/// use relmig::{MigrationCommandExecutor, MigrationCommandListBuilder};
/// use relmig::connection::memory::MemoryConnection;
///
/// # fn main() -> relmig::Result<()> {
/// let mut builder = MigrationCommandListBuilder::new();
/// builder.append_line("CREATE TABLE users (id INTEGER);");
/// builder.end_command(false);
/// builder.append_line("CREATE INDEX ix_users ON users (id);");
/// builder.end_command(true);
/// let commands = builder.get_command_list();
///
/// let mut connection = MemoryConnection::new();
/// MigrationCommandExecutor::new().execute_non_query(&commands, &mut connection)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MigrationCommandExecutor;

impl MigrationCommandExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute all commands in order against the given connection
    ///
    /// Opens the connection first and closes it on every path after a
    /// successful open. An empty list opens and closes the connection
    /// without beginning a transaction.
    pub fn execute_non_query<C>(
        &self,
        commands: &MigrationCommandList,
        connection: &mut C,
    ) -> Result<()>
    where
        C: MigrationConnection + ?Sized,
    {
        connection.open()?;

        let result = self.execute_all(commands, connection);

        let closed = connection.close();
        debug!("Migration connection closed");

        result.and(closed)
    }

    /// Async form of [`execute_non_query`](Self::execute_non_query)
    ///
    /// Cancellation is honored at suspension points only: connection open,
    /// transaction begin and statement execution. An issued statement is not
    /// interrupted mid-flight. Cleanup runs on cancellation like on any
    /// other failure.
    pub async fn execute_non_query_async<C>(
        &self,
        commands: &MigrationCommandList,
        connection: &mut C,
        cancel: &CancellationToken,
    ) -> Result<()>
    where
        C: MigrationConnection + ?Sized,
    {
        connection.open_async(cancel).await?;

        let result = self.execute_all_async(commands, connection, cancel).await;

        let closed = connection.close();
        debug!("Migration connection closed");

        result.and(closed)
    }

    fn execute_all<C>(&self, commands: &MigrationCommandList, connection: &mut C) -> Result<()>
    where
        C: MigrationConnection + ?Sized,
    {
        // Dropped without commit on the error path, which rolls back any
        // uncommitted work at the backend.
        let mut transaction: Option<Box<dyn MigrationTransaction>> = None;

        for command in commands {
            if transaction.is_none() && !command.transaction_suppressed() {
                transaction = Some(connection.begin_transaction()?);
                debug!("Began migration transaction");
            }

            if command.transaction_suppressed() {
                if let Some(active) = transaction.take() {
                    active.commit()?;
                    debug!("Committed migration transaction before suppressed command");
                }
            }

            debug!("Executing migration command: {}", command.command_text());
            connection.execute_non_query(command.command_text())?;
        }

        if let Some(active) = transaction.take() {
            active.commit()?;
            debug!("Committed migration transaction");
        }

        Ok(())
    }

    async fn execute_all_async<C>(
        &self,
        commands: &MigrationCommandList,
        connection: &mut C,
        cancel: &CancellationToken,
    ) -> Result<()>
    where
        C: MigrationConnection + ?Sized,
    {
        let mut transaction: Option<Box<dyn MigrationTransaction>> = None;

        for command in commands {
            if cancel.is_cancelled() {
                return Err(MigrationError::Canceled);
            }

            if transaction.is_none() && !command.transaction_suppressed() {
                transaction = Some(connection.begin_transaction_async(cancel).await?);
                debug!("Began migration transaction");
            }

            if command.transaction_suppressed() {
                if let Some(active) = transaction.take() {
                    active.commit()?;
                    debug!("Committed migration transaction before suppressed command");
                }
            }

            debug!("Executing migration command: {}", command.command_text());
            connection
                .execute_non_query_async(command.command_text(), cancel)
                .await?;
        }

        if let Some(active) = transaction.take() {
            active.commit()?;
            debug!("Committed migration transaction");
        }

        Ok(())
    }
}
