//! Module `command`
//!
//! Defines the core FTP command parsing logic and related data structures
//! used to represent commands and the status a handler reports back to the
//! session loop.

/// Represents an FTP command parsed from the client input.
///
/// Every variant except `Quit` keeps its raw argument string; validation of
/// the argument belongs to the handler so that a malformed argument produces
/// the right reply code instead of falling through to `Unknown`.
#[derive(Debug, PartialEq)]
pub enum Command {
    User(String),
    Cwd(String),
    Quit,
    Port(String),
    List(String),
    Retr(String),
    Type(String),
    Unknown { verb: String, args: String },
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Parses one control-channel line into a `Command`.
///
/// The verb runs up to the first space and is matched case-sensitively; the
/// remainder is the argument, passed on verbatim.
pub fn parse_command(raw: &str) -> Command {
    let line = raw.trim_end_matches(['\r', '\n']);
    let (verb, args) = match line.split_once(' ') {
        Some((verb, args)) => (verb, args.to_string()),
        None => (line, String::new()),
    };

    match verb {
        "USER" => Command::User(args),
        "CWD" => Command::Cwd(args),
        "QUIT" => Command::Quit,
        "PORT" => Command::Port(args),
        "LIST" => Command::List(args),
        "RETR" => Command::Retr(args),
        "TYPE" => Command::Type(args),
        _ => Command::Unknown {
            verb: verb.to_string(),
            args,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("LIST"), Command::List(String::new()));
        assert_eq!(parse_command("CWD"), Command::Cwd(String::new()));
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(
            parse_command("CWD /some/path"),
            Command::Cwd("/some/path".to_string())
        );
        assert_eq!(
            parse_command("USER anonymous"),
            Command::User("anonymous".to_string())
        );
        assert_eq!(
            parse_command("PORT 127,0,0,1,4,1"),
            Command::Port("127,0,0,1,4,1".to_string())
        );
        assert_eq!(
            parse_command("RETR file with spaces.txt"),
            Command::Retr("file with spaces.txt".to_string())
        );
        assert_eq!(parse_command("TYPE L 8"), Command::Type("L 8".to_string()));
    }

    #[test]
    fn test_parse_strips_line_terminator() {
        assert_eq!(parse_command("QUIT\r\n"), Command::Quit);
        assert_eq!(parse_command("LIST sub\n"), Command::List("sub".to_string()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            parse_command("quit"),
            Command::Unknown {
                verb: "quit".to_string(),
                args: String::new()
            }
        );
        assert_eq!(
            parse_command("Retr a.txt"),
            Command::Unknown {
                verb: "Retr".to_string(),
                args: "a.txt".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            parse_command("STOR upload.txt"),
            Command::Unknown {
                verb: "STOR".to_string(),
                args: "upload.txt".to_string()
            }
        );
        assert_eq!(
            parse_command(""),
            Command::Unknown {
                verb: String::new(),
                args: String::new()
            }
        );
    }
}
