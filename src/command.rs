//! Commands entered on the command line.

/// A parsed command.
#[derive(Eq, PartialEq, Debug)]
pub enum Command {
    Quit,
    Path(String),
}

/// Parses `text` into a [`Command`], or returns the message to echo if `text` is
/// not a valid command.
pub fn parse(text: &str) -> Result<Command, String> {
    match text.split_once(char::is_whitespace) {
        _ if text == "quit" => Ok(Command::Quit),
        _ if text == "path" => Err("path: expecting value".to_string()),
        Some(("path", value)) if value.trim().len() > 0 => {
            Ok(Command::Path(value.trim().to_string()))
        }
        Some(("path", _)) => Err("path: expecting value".to_string()),
        _ => Err(format!("unknown command '{text}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(parse("quit"), Ok(Command::Quit));
        assert_eq!(parse("path foo.c"), Ok(Command::Path("foo.c".to_string())));
        assert_eq!(parse("path   bar.h "), Ok(Command::Path("bar.h".to_string())));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse("path"), Err("path: expecting value".to_string()));
        assert_eq!(parse("path  "), Err("path: expecting value".to_string()));
        assert_eq!(parse("quit now"), Err("unknown command 'quit now'".to_string()));
        assert_eq!(parse("pathfoo"), Err("unknown command 'pathfoo'".to_string()));
        assert_eq!(parse(""), Err("unknown command ''".to_string()));
    }
}
