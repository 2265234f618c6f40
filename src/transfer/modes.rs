//! FTP Transfer modes
//!
//! Representation types selected with TYPE and the parsing of its argument.

use std::fmt;

use crate::error::TypeError;

/// How file contents are put on the data connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// Line-oriented, every line rewritten with a CRLF terminator.
    #[default]
    Ascii,
    /// Byte-exact copy.
    Binary,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Ascii => write!(f, "ASCII"),
            TransferMode::Binary => write!(f, "BINARY"),
        }
    }
}

/// Parses a TYPE argument (`A [N]`, `I`, `L 8`, ...) into a mode.
pub fn parse_type_argument(arg: &str) -> Result<TransferMode, TypeError> {
    let mut tokens = arg.split_whitespace();
    let Some(code) = tokens.next() else {
        return Err(TypeError::MissingCode);
    };
    let param = tokens.next();
    let extra = tokens.next();

    match code.to_ascii_uppercase().as_str() {
        "A" => {
            if let Some(extra) = extra {
                return Err(TypeError::Syntax(extra.to_string()));
            }
            match param.map(str::to_ascii_uppercase).as_deref() {
                None | Some("N") => Ok(TransferMode::Ascii),
                Some("T") | Some("C") => Err(TypeError::UnsupportedParameter(arg.to_string())),
                Some(_) => Err(TypeError::Syntax(arg.to_string())),
            }
        }
        "I" => match param {
            None => Ok(TransferMode::Binary),
            Some(param) => Err(TypeError::Syntax(param.to_string())),
        },
        "L" => {
            if let Some(extra) = extra {
                return Err(TypeError::Syntax(extra.to_string()));
            }
            let size = param
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(|| TypeError::Syntax(arg.to_string()))?;
            if size != 8 {
                return Err(TypeError::UnsupportedParameter(arg.to_string()));
            }
            Ok(TransferMode::Binary)
        }
        "E" => Err(TypeError::UnsupportedParameter(arg.to_string())),
        _ => Err(TypeError::UnsupportedParameter(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ascii() {
        assert_eq!(TransferMode::default(), TransferMode::Ascii);
    }

    #[test]
    fn test_ascii() {
        assert_eq!(parse_type_argument("A"), Ok(TransferMode::Ascii));
        assert_eq!(parse_type_argument("a"), Ok(TransferMode::Ascii));
        assert_eq!(parse_type_argument("A N"), Ok(TransferMode::Ascii));
        assert!(matches!(
            parse_type_argument("A T"),
            Err(TypeError::UnsupportedParameter(_))
        ));
        assert!(matches!(
            parse_type_argument("A C"),
            Err(TypeError::UnsupportedParameter(_))
        ));
        assert!(matches!(parse_type_argument("A X"), Err(TypeError::Syntax(_))));
        assert!(matches!(parse_type_argument("A N X"), Err(TypeError::Syntax(_))));
    }

    #[test]
    fn test_image() {
        assert_eq!(parse_type_argument("I"), Ok(TransferMode::Binary));
        assert!(matches!(parse_type_argument("I N"), Err(TypeError::Syntax(_))));
    }

    #[test]
    fn test_local_byte_size() {
        assert_eq!(parse_type_argument("L 8"), Ok(TransferMode::Binary));
        assert!(matches!(
            parse_type_argument("L 7"),
            Err(TypeError::UnsupportedParameter(_))
        ));
        assert!(matches!(parse_type_argument("L x"), Err(TypeError::Syntax(_))));
        assert!(matches!(parse_type_argument("L"), Err(TypeError::Syntax(_))));
    }

    #[test]
    fn test_rejected_codes() {
        assert!(matches!(
            parse_type_argument("E"),
            Err(TypeError::UnsupportedParameter(_))
        ));
        assert!(matches!(
            parse_type_argument("Z"),
            Err(TypeError::UnsupportedParameter(_))
        ));
        assert_eq!(parse_type_argument(""), Err(TypeError::MissingCode));
        assert_eq!(parse_type_argument("   "), Err(TypeError::MissingCode));
    }
}
