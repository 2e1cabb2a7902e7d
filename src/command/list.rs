use super::MigrationCommand;
use crate::connection::MigrationConnection;
use crate::core::Result;
use crate::executor::MigrationCommandExecutor;
use tokio_util::sync::CancellationToken;

/// Ordered, immutable sequence of migration commands
///
/// Order is generation order and therefore required execution order. The
/// list never contains a command built from an empty batch. It is read-only
/// to the executor and may be executed more than once.
#[derive(Debug, Clone)]
pub struct MigrationCommandList {
    commands: Vec<MigrationCommand>,
}

impl MigrationCommandList {
    pub fn empty() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn new(commands: Vec<MigrationCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[MigrationCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MigrationCommand> {
        self.commands.iter()
    }

    /// Execute all commands in order against the given connection
    ///
    /// Convenience for [`MigrationCommandExecutor::execute_non_query`].
    pub fn execute_non_query<C>(&self, connection: &mut C) -> Result<()>
    where
        C: MigrationConnection + ?Sized,
    {
        MigrationCommandExecutor::new().execute_non_query(self, connection)
    }

    /// Async form of [`execute_non_query`](Self::execute_non_query)
    pub async fn execute_non_query_async<C>(
        &self,
        connection: &mut C,
        cancel: &CancellationToken,
    ) -> Result<()>
    where
        C: MigrationConnection + ?Sized,
    {
        MigrationCommandExecutor::new()
            .execute_non_query_async(self, connection, cancel)
            .await
    }
}

impl From<Vec<MigrationCommand>> for MigrationCommandList {
    fn from(commands: Vec<MigrationCommand>) -> Self {
        Self::new(commands)
    }
}

impl<'a> IntoIterator for &'a MigrationCommandList {
    type Item = &'a MigrationCommand;
    type IntoIter = std::slice::Iter<'a, MigrationCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
