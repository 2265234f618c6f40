//! FTP Response handling
//!
//! Defines FTP response codes and formatting, and writes replies onto the
//! control channel.

use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Standard FTP response codes
pub const OPENING_DATA_CONNECTION: u16 = 150;
pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const CLOSING: u16 = 221;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const LOGIN_SUCCESS: u16 = 230;
pub const CANT_OPEN_DATA_CONNECTION: u16 = 425;
pub const TRANSFER_ABORTED: u16 = 426;
pub const SYNTAX_ERROR: u16 = 500;
pub const ARGUMENT_SYNTAX_ERROR: u16 = 501;
pub const NOT_IMPLEMENTED: u16 = 502;
pub const PARAMETER_NOT_IMPLEMENTED: u16 = 504;
pub const ACTION_FAILED: u16 = 550;

/// Line terminator used on both the control and the data channel.
pub const EOL: &str = "\r\n";

/// Format an FTP response message
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}{}", code, message, EOL)
}

/// Writes one reply line to the control channel.
pub async fn send_response<W>(control: &mut W, code: u16, message: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = format_response(code, message);
    debug!("<< {:?}", line);
    control.write_all(line.as_bytes()).await?;
    control.flush().await
}
