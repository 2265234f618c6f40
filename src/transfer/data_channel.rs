//! Module `data_channel`
//!
//! Active-mode data connections: the client announces a listening address
//! with PORT and the server dials it once per LIST or RETR.

use log::{debug, error};
use tokio::net::TcpStream;

use crate::error::{PortError, TransferError};

/// Parses `h1,h2,h3,h4,p1,p2` into a dial-able `h1.h2.h3.h4:port` string.
///
/// The port is `p1 * 256 + p2`. Host octets are passed through verbatim; a
/// bad host only shows up when the address is dialed.
pub fn parse_port_argument(arg: &str) -> Result<String, PortError> {
    let tokens: Vec<&str> = arg.split(',').collect();
    if tokens.len() != 6 {
        return Err(PortError::WrongArity(tokens.len()));
    }

    let high = parse_port_token(tokens[4])?;
    let low = parse_port_token(tokens[5])?;
    let port = high
        .checked_mul(256)
        .and_then(|p| p.checked_add(low))
        .ok_or_else(|| PortError::InvalidPort(format!("{},{}", tokens[4], tokens[5])))?;

    Ok(format!(
        "{}.{}.{}.{}:{}",
        tokens[0], tokens[1], tokens[2], tokens[3], port
    ))
}

fn parse_port_token(token: &str) -> Result<i64, PortError> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| PortError::InvalidPort(token.to_string()))
}

/// Opens a fresh data connection to the session's announced address.
///
/// There is no connect timeout: a peer that never answers holds the session
/// until the OS gives up or the control connection is closed.
pub async fn connect_data_channel(data_address: Option<&str>) -> Result<TcpStream, TransferError> {
    let addr = data_address.ok_or(TransferError::NoDataAddress)?;

    debug!("Dialing data connection {}", addr);
    match TcpStream::connect(addr).await {
        Ok(stream) => Ok(stream),
        Err(source) => {
            error!("Failed to connect data channel to {}: {}", addr, source);
            Err(TransferError::Connect {
                addr: addr.to_string(),
                source,
            })
        }
    }
}
