use log::{debug, error, info, warn};
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, BufReader};

use crate::client::Session;
use crate::protocol::responses::READY;
use crate::protocol::{CommandStatus, handle_command, parse_command, send_response};
use crate::storage::FileSystem;

/// Longest command line accepted, terminator included.
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Serves one control connection from greeting to close.
///
/// - Sends the `220` greeting.
/// - Reads newline-terminated command lines one at a time and dispatches
///   each with `handle_command`; a command, including its data transfer,
///   finishes before the next line is read.
/// - Stops on QUIT, end of stream, a control-channel I/O error, or a line
///   longer than 64 KiB.
pub async fn handle_client<S, F>(
    stream: S,
    client_addr: SocketAddr,
    mut session: Session,
    fs: &F,
    banner: &str,
) where
    S: AsyncRead + AsyncWrite + Send,
    F: FileSystem,
{
    if let Err(e) = serve(stream, client_addr, &mut session, fs, banner).await {
        error!("Control connection with {} failed: {}", client_addr, e);
    }
    info!("Client {} disconnected", client_addr);
}

async fn serve<S, F>(
    stream: S,
    client_addr: SocketAddr,
    session: &mut Session,
    fs: &F,
    banner: &str,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Send,
    F: FileSystem,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();

    send_response(&mut write_half, READY, banner).await?;

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_LENGTH as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            info!("Connection closed by client {}", client_addr);
            return Ok(());
        }
        if buf.len() > MAX_LINE_LENGTH {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("command line exceeds {} bytes", MAX_LINE_LENGTH),
            ));
        }

        let line = String::from_utf8_lossy(&buf);
        debug!(">> {:?}", line);
        let command = parse_command(&line);
        debug!("Received from {}: {:?}", client_addr, command);

        match handle_command(&command, session, fs, &mut write_half).await? {
            CommandStatus::Success => {}
            CommandStatus::Failure(reason) => {
                warn!("Command from {} failed: {}", client_addr, reason);
            }
            CommandStatus::CloseConnection => {
                info!("Client {} requested to quit", client_addr);
                return Ok(());
            }
        }
    }
}
