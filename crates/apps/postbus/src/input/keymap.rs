//! Command help text

/// A category of commands for display in the help listing
pub struct CommandCategory {
    pub name: &'static str,
    pub commands: Vec<CommandHelp>,
}

/// A single command for display
pub struct CommandHelp {
    pub names: &'static str,
    pub description: &'static str,
}

/// Returns all commands grouped by category
pub fn commands_help() -> Vec<CommandCategory> {
    vec![
        CommandCategory {
            name: "Folders",
            commands: vec![
                CommandHelp {
                    names: "inbox | i",
                    description: "Show received messages",
                },
                CommandHelp {
                    names: "outbox | o",
                    description: "Show sent messages",
                },
                CommandHelp {
                    names: "refresh | r",
                    description: "Fetch the current folder again",
                },
                CommandHelp {
                    names: "sort | s",
                    description: "Toggle date order (re-fetches the inbox)",
                },
            ],
        },
        CommandCategory {
            name: "Messages",
            commands: vec![
                CommandHelp {
                    names: "list | ls",
                    description: "Print the message list",
                },
                CommandHelp {
                    names: "check | x",
                    description: "Select a message: check <id>",
                },
                CommandHelp {
                    names: "uncheck",
                    description: "Deselect a message: uncheck <id>",
                },
                CommandHelp {
                    names: "open",
                    description: "Mark as read and open details: open <id>",
                },
                CommandHelp {
                    names: "toggle | u",
                    description: "Mark selection read, or unread if all are read",
                },
                CommandHelp {
                    names: "delete | d",
                    description: "Archive the selection",
                },
            ],
        },
        CommandCategory {
            name: "General",
            commands: vec![
                CommandHelp {
                    names: "help | ?",
                    description: "Show this help",
                },
                CommandHelp {
                    names: "quit | q | exit",
                    description: "Leave Postbus",
                },
            ],
        },
    ]
}

/// Render the help listing
pub fn help_text() -> String {
    let mut out = String::new();
    for category in commands_help() {
        out.push_str(category.name);
        out.push('\n');
        for command in &category.commands {
            out.push_str(&format!("  {:<18} {}\n", command.names, command.description));
        }
    }
    out
}
