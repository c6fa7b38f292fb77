use std::collections::BTreeMap;

use serde_json::Value;

use super::command_registry::{
    CommandSpec, CLEAR_COMMAND, EXPORT_COMMAND, NO_ARG_COMMANDS, SET_COMMAND, SHOW_COMMAND,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub action: String,
    pub raw: String,
    pub message: Option<String>,
    pub command_args: BTreeMap<String, Value>,
}

impl Intent {
    fn new(action: &str, raw: &str) -> Self {
        Self {
            action: action.to_string(),
            raw: raw.to_string(),
            message: None,
            command_args: BTreeMap::new(),
        }
    }
}

fn find_action(command: &str, specs: &[CommandSpec]) -> Option<&'static str> {
    specs
        .iter()
        .find(|spec| spec.command == command)
        .map(|spec| spec.action)
}

fn split_args(arg: &str) -> Vec<String> {
    if arg.trim().is_empty() {
        return Vec::new();
    }
    match shell_words::split(arg) {
        Ok(parts) => parts
            .into_iter()
            .filter(|value| !value.is_empty())
            .collect(),
        Err(_) => arg
            .split_whitespace()
            .map(str::to_string)
            .filter(|value| !value.is_empty())
            .collect(),
    }
}

fn parse_set_args(arg: &str) -> (Option<String>, Option<String>) {
    let mut parts = split_args(arg).into_iter();
    let category = parts.next().map(|value| value.to_ascii_lowercase());
    let rest = parts.collect::<Vec<String>>().join(" ");
    let value = if rest.trim().is_empty() {
        None
    } else {
        Some(rest.trim().to_string())
    };
    (category, value)
}

fn optional_string(value: Option<String>) -> Value {
    value.map(Value::String).unwrap_or(Value::Null)
}

pub fn parse_intent(text: &str) -> Intent {
    let raw_trimmed = text.trim();
    if raw_trimmed.is_empty() {
        return Intent::new("noop", text);
    }

    if let Some(slash_tail) = raw_trimmed.strip_prefix('/') {
        let command_len = slash_tail
            .chars()
            .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
            .count();
        if command_len > 0 {
            let command = slash_tail[..command_len].to_ascii_lowercase();
            let arg = slash_tail[command_len..].trim();

            if let Some(action) = find_action(&command, NO_ARG_COMMANDS) {
                return Intent::new(action, text);
            }

            if command == SET_COMMAND.command {
                let (category, value) = parse_set_args(arg);
                let mut intent = Intent::new(SET_COMMAND.action, text);
                intent
                    .command_args
                    .insert("category".to_string(), optional_string(category));
                intent
                    .command_args
                    .insert("value".to_string(), optional_string(value));
                return intent;
            }

            if command == CLEAR_COMMAND.command {
                let (category, _) = parse_set_args(arg);
                let mut intent = Intent::new(CLEAR_COMMAND.action, text);
                intent
                    .command_args
                    .insert("category".to_string(), optional_string(category));
                return intent;
            }

            if command == SHOW_COMMAND.command {
                let mut intent = Intent::new(SHOW_COMMAND.action, text);
                let index = arg
                    .parse::<u64>()
                    .ok()
                    .filter(|value| *value > 0)
                    .map(|value| Value::Number(value.into()))
                    .unwrap_or(Value::Null);
                intent.command_args.insert("index".to_string(), index);
                return intent;
            }

            if command == EXPORT_COMMAND.command {
                let parts = split_args(arg);
                let path = if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" "))
                };
                let mut intent = Intent::new(EXPORT_COMMAND.action, text);
                intent
                    .command_args
                    .insert("path".to_string(), optional_string(path));
                return intent;
            }

            let mut intent = Intent::new("unknown", text);
            intent
                .command_args
                .insert("command".to_string(), Value::String(command));
            intent
                .command_args
                .insert("arg".to_string(), Value::String(arg.to_string()));
            return intent;
        }
    }

    let mut intent = Intent::new("chat", text);
    intent.message = Some(raw_trimmed.to_string());
    intent
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::parse_intent;

    #[test]
    fn plain_text_is_a_chat_message() {
        let intent = parse_intent("  I like boho summer looks  ");
        assert_eq!(intent.action, "chat");
        assert_eq!(intent.message.as_deref(), Some("I like boho summer looks"));
    }

    #[test]
    fn blank_input_is_noop() {
        assert_eq!(parse_intent("   ").action, "noop");
    }

    #[test]
    fn parse_no_arg_commands() {
        assert_eq!(parse_intent("/help").action, "help");
        assert_eq!(parse_intent("/PREFS").action, "show_preferences");
        assert_eq!(parse_intent("/next").action, "next_outfit");
        assert_eq!(parse_intent("/prev").action, "previous_outfit");
        assert_eq!(parse_intent("/generate").action, "generate");
        assert_eq!(parse_intent("/exit").action, "quit");
    }

    #[test]
    fn parse_set_with_multiword_value() {
        let intent = parse_intent("/set color earth tone");
        assert_eq!(intent.action, "toggle_filter");
        assert_eq!(intent.command_args["category"], json!("color"));
        assert_eq!(intent.command_args["value"], json!("earth tone"));

        let quoted = parse_intent("/set Occasion \"night out\"");
        assert_eq!(quoted.command_args["category"], json!("occasion"));
        assert_eq!(quoted.command_args["value"], json!("night out"));
    }

    #[test]
    fn parse_set_missing_value_is_null() {
        let intent = parse_intent("/set style");
        assert_eq!(intent.command_args["category"], json!("style"));
        assert_eq!(intent.command_args["value"], Value::Null);
    }

    #[test]
    fn parse_clear_and_show() {
        let clear = parse_intent("/clear season");
        assert_eq!(clear.action, "clear_preference");
        assert_eq!(clear.command_args["category"], json!("season"));

        assert_eq!(parse_intent("/show 2").command_args["index"], json!(2));
        assert_eq!(parse_intent("/show 0").command_args["index"], Value::Null);
        assert_eq!(parse_intent("/show two").command_args["index"], Value::Null);
    }

    #[test]
    fn parse_export_paths() {
        let export = parse_intent("/export \"/tmp/my looks.json\"");
        assert_eq!(export.action, "export");
        assert_eq!(export.command_args["path"], json!("/tmp/my looks.json"));
        assert_eq!(parse_intent("/export").command_args["path"], Value::Null);
    }

    #[test]
    fn unrecognized_slash_command_keeps_its_argument() {
        let intent = parse_intent("/Wardrobe   rain jacket");
        assert_eq!(intent.action, "unknown");
        assert_eq!(intent.command_args["command"], json!("wardrobe"));
        assert_eq!(intent.command_args["arg"], json!("rain jacket"));
        assert!(intent.message.is_none());
    }
}
