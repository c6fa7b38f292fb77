#[derive(Clone, Copy, Debug)]
pub(crate) struct CommandSpec {
    pub command: &'static str,
    pub action: &'static str,
}

pub(crate) const NO_ARG_COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: "help",
        action: "help",
    },
    CommandSpec {
        command: "prefs",
        action: "show_preferences",
    },
    CommandSpec {
        command: "next",
        action: "next_outfit",
    },
    CommandSpec {
        command: "prev",
        action: "previous_outfit",
    },
    CommandSpec {
        command: "generate",
        action: "generate",
    },
    CommandSpec {
        command: "lookbook",
        action: "show_lookbook",
    },
    CommandSpec {
        command: "quit",
        action: "quit",
    },
    CommandSpec {
        command: "exit",
        action: "quit",
    },
];

pub(crate) const SET_COMMAND: CommandSpec = CommandSpec {
    command: "set",
    action: "toggle_filter",
};

pub(crate) const CLEAR_COMMAND: CommandSpec = CommandSpec {
    command: "clear",
    action: "clear_preference",
};

pub(crate) const SHOW_COMMAND: CommandSpec = CommandSpec {
    command: "show",
    action: "jump_outfit",
};

pub(crate) const EXPORT_COMMAND: CommandSpec = CommandSpec {
    command: "export",
    action: "export",
};

pub const CHAT_HELP_COMMANDS: &[&str] = &[
    "/help",
    "/prefs",
    "/set <category> <value>",
    "/clear <category>",
    "/generate",
    "/lookbook",
    "/next",
    "/prev",
    "/show <n>",
    "/export [path]",
    "/quit",
];
