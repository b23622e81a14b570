//! Slash command parsing for the terminal host.
//!
//! Input that starts with `/` controls the host instead of being submitted to the backend.  A
//! question that itself starts with `/` is typed with the slash doubled.

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Clear the message list.
    Clear,

    /// Display help information.
    Help,

    /// Show the current configuration.
    ShowConfig,

    /// Exit the application.
    Quit,

    /// Send the text as a question.  Produced by `//`-escaped input.
    Ask(String),

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it should be submitted
/// as a question.
///
/// # Examples
///
/// ```
/// # use askchat::widget::{ChatCommand, parse_command};
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("What is the tallest building in Chicago?").is_none());
/// assert_eq!(
///     parse_command("//etc/hosts format?"),
///     Some(ChatCommand::Ask("/etc/hosts format?".to_string()))
/// );
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }
    if let Some(question) = input.strip_prefix("//") {
        return Some(ChatCommand::Ask(format!("/{question}")));
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "clear" => no_argument(argument, ChatCommand::Clear, "/clear"),
        "help" | "?" => ChatCommand::Help,
        "config" => no_argument(argument, ChatCommand::ShowConfig, "/config"),
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn no_argument(argument: Option<&str>, command: ChatCommand, name: &str) -> ChatCommand {
    match argument {
        Some(_) => ChatCommand::Invalid(format!("{} takes no arguments", name)),
        None => command,
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /clear                 Clear the message list
  /config                Show current configuration
  /help                  Show this help message
  /quit                  Exit the chat
  //text                 Send /text as a question
Anything else is sent to the backend as a question."#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_clear() {
        assert_eq!(parse_command("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse_command("/CLEAR"), Some(ChatCommand::Clear));
        assert!(matches!(
            parse_command("/clear everything"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("no arguments")
        ));
    }

    #[test]
    fn parse_help_and_config() {
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/?"), Some(ChatCommand::Help));
        assert_eq!(parse_command("/config"), Some(ChatCommand::ShowConfig));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            parse_command("/model gemini"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn doubled_slash_sends_a_question() {
        assert_eq!(
            parse_command("//etc/hosts format?"),
            Some(ChatCommand::Ask("/etc/hosts format?".to_string()))
        );
        assert_eq!(
            parse_command("  //clear  "),
            Some(ChatCommand::Ask("/clear".to_string()))
        );
        assert_eq!(parse_command("//"), Some(ChatCommand::Ask("/".to_string())));
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello!"), None);
        assert_eq!(parse_command("What is 1/2?"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/quit"));
        assert!(help.contains("/clear"));
        assert!(help.contains("/config"));
        assert!(help.contains("//text"));
    }
}
