//! Command list builder tests
//!
//! Batching behavior: grouping, batch boundaries and empty-batch elision.
//! Run with: cargo test --test command_list_builder_tests

use relmig::MigrationCommandListBuilder;

#[test]
fn test_groups_multiple_statements_into_one_batch() {
    for suppress_transaction in [false, true] {
        let mut builder = MigrationCommandListBuilder::new();
        builder.append_line("Statement1");
        builder.append_line("Statement2");
        builder.append_line("Statement3");
        builder.end_command(suppress_transaction);

        let commands = builder.get_command_list();

        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands.commands()[0].transaction_suppressed(),
            suppress_transaction
        );
        assert_eq!(
            commands.commands()[0].command_text(),
            "Statement1\nStatement2\nStatement3\n"
        );
    }
}

#[test]
fn test_produces_multiple_batches() {
    for suppress_transaction in [false, true] {
        let mut builder = MigrationCommandListBuilder::new();
        builder.append_line("Statement1");
        builder.end_command(suppress_transaction);
        builder.append_line("Statement2");
        builder.append_line("Statement3");
        builder.end_command(suppress_transaction);
        builder.append_line("Statement4");
        builder.append_line("Statement5");
        builder.append_line("Statement6");
        builder.end_command(suppress_transaction);

        let commands = builder.get_command_list();

        assert_eq!(commands.len(), 3);

        assert_eq!(
            commands.commands()[0].transaction_suppressed(),
            suppress_transaction
        );
        assert_eq!(commands.commands()[0].command_text(), "Statement1\n");

        assert_eq!(
            commands.commands()[1].transaction_suppressed(),
            suppress_transaction
        );
        assert_eq!(
            commands.commands()[1].command_text(),
            "Statement2\nStatement3\n"
        );

        assert_eq!(
            commands.commands()[2].transaction_suppressed(),
            suppress_transaction
        );
        assert_eq!(
            commands.commands()[2].command_text(),
            "Statement4\nStatement5\nStatement6\n"
        );
    }
}

#[test]
fn test_ignores_empty_batches() {
    for suppress_transaction in [false, true] {
        let mut builder = MigrationCommandListBuilder::new();
        builder.append_line("Statement1");
        builder.end_command(suppress_transaction);
        builder.end_command(true);
        builder.end_command(true);
        builder.append_line("Statement2");
        builder.append_line("Statement3");
        builder.end_command(suppress_transaction);
        builder.end_command(false);

        let commands = builder.get_command_list();

        assert_eq!(commands.len(), 2);

        assert_eq!(
            commands.commands()[0].transaction_suppressed(),
            suppress_transaction
        );
        assert_eq!(commands.commands()[0].command_text(), "Statement1\n");

        assert_eq!(
            commands.commands()[1].transaction_suppressed(),
            suppress_transaction
        );
        assert_eq!(
            commands.commands()[1].command_text(),
            "Statement2\nStatement3\n"
        );
    }
}

#[test]
fn test_fresh_builder_end_command_yields_nothing() {
    for suppress_transaction in [false, true] {
        let mut builder = MigrationCommandListBuilder::new();
        builder.end_command(suppress_transaction);

        let commands = builder.get_command_list();
        assert!(commands.is_empty());
    }
}

#[test]
fn test_chained_appends() {
    let mut builder = MigrationCommandListBuilder::new();
    builder
        .append("CREATE TABLE ")
        .append_line("users (")
        .increment_indent()
        .append_line("id INTEGER,")
        .append_line("name TEXT")
        .decrement_indent()
        .append_line(");")
        .end_command(false);

    let commands = builder.get_command_list();

    assert_eq!(
        commands.commands()[0].command_text(),
        "CREATE TABLE users (\n    id INTEGER,\n    name TEXT\n);\n"
    );
}
