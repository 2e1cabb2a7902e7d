use super::{MigrationCommand, MigrationCommandList};
use crate::text::IndentedStringBuilder;

/// Accumulates generated statement text and splits it into commands
///
/// Statement fragments are buffered into the current batch; `end_command`
/// seals the batch into a [`MigrationCommand`] carrying the
/// transaction-suppression flag for that batch. Batches the generator never
/// wrote anything into are dropped, so boundary signals can be emitted
/// unconditionally.
///
/// Intended for single-writer sequential use during command generation.
///
/// # Examples
///
/// ```
/// use relmig::MigrationCommandListBuilder;
///
/// let mut builder = MigrationCommandListBuilder::new();
/// builder.append_line("CREATE TABLE users (id INTEGER);");
/// builder.end_command(false);
/// builder.append_line("ALTER DATABASE app SET READ_COMMITTED_SNAPSHOT ON;");
/// builder.end_command(true);
///
/// let commands = builder.get_command_list();
/// assert_eq!(commands.len(), 2);
/// assert!(commands.commands()[1].transaction_suppressed());
/// ```
#[derive(Debug, Default)]
pub struct MigrationCommandListBuilder {
    commands: Vec<MigrationCommand>,
    statement: IndentedStringBuilder,
}

impl MigrationCommandListBuilder {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            statement: IndentedStringBuilder::new(),
        }
    }

    /// Append text to the pending batch without a terminator
    pub fn append(&mut self, value: &str) -> &mut Self {
        self.statement.append(value);
        self
    }

    /// Append one line of statement text to the pending batch
    pub fn append_line(&mut self, value: &str) -> &mut Self {
        self.statement.append_line(value);
        self
    }

    /// Append multi-line text to the pending batch, line by line
    pub fn append_lines(&mut self, value: &str) -> &mut Self {
        self.statement.append_lines(value);
        self
    }

    pub fn increment_indent(&mut self) -> &mut Self {
        self.statement.increment_indent();
        self
    }

    pub fn decrement_indent(&mut self) -> &mut Self {
        self.statement.decrement_indent();
        self
    }

    /// Seal the pending batch into a command
    ///
    /// A no-op when nothing was appended since the last call; the flag is
    /// discarded in that case. Callers without a suppression requirement
    /// pass `false`.
    pub fn end_command(&mut self, suppress_transaction: bool) -> &mut Self {
        if !self.statement.is_empty() {
            let text = self.statement.take();
            self.commands
                .push(MigrationCommand::new(text, suppress_transaction));
        }
        self
    }

    /// Consume the builder and return the commands sealed so far
    ///
    /// Does not finalize a still-pending batch; text appended after the last
    /// `end_command` is silently excluded.
    pub fn get_command_list(self) -> MigrationCommandList {
        MigrationCommandList::new(self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_command_clears_pending_batch() {
        let mut builder = MigrationCommandListBuilder::new();
        builder.append_line("Statement1");
        builder.end_command(false);
        builder.append_line("Statement2");
        builder.end_command(false);

        let commands = builder.get_command_list();
        assert_eq!(commands.commands()[0].command_text(), "Statement1\n");
        assert_eq!(commands.commands()[1].command_text(), "Statement2\n");
    }

    #[test]
    fn test_pending_batch_without_end_command_is_excluded() {
        let mut builder = MigrationCommandListBuilder::new();
        builder.append_line("Statement1");
        builder.end_command(false);
        builder.append_line("dangling");

        let commands = builder.get_command_list();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_indentation_flows_into_command_text() {
        let mut builder = MigrationCommandListBuilder::new();
        builder.append_line("CREATE TABLE t (");
        builder.increment_indent();
        builder.append_line("id INTEGER");
        builder.decrement_indent();
        builder.append_line(");");
        builder.end_command(false);

        let commands = builder.get_command_list();
        assert_eq!(
            commands.commands()[0].command_text(),
            "CREATE TABLE t (\n    id INTEGER\n);\n"
        );
    }

    #[test]
    fn test_append_without_terminator() {
        let mut builder = MigrationCommandListBuilder::new();
        builder.append("DROP TABLE ");
        builder.append("users;");
        builder.end_command(true);

        let commands = builder.get_command_list();
        assert_eq!(commands.commands()[0].command_text(), "DROP TABLE users;");
        assert!(commands.commands()[0].transaction_suppressed());
    }
}
