//! Module `file_ops`
//!
//! Writes directory listings and file contents onto a data connection.

use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::responses::EOL;
use crate::transfer::modes::TransferMode;

/// Sends one entry name per line, then a blank line, all CRLF-terminated.
pub async fn send_listing<W>(data: &mut W, entries: &[String]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut listing = String::new();
    for entry in entries {
        listing.push_str(entry);
        listing.push_str(EOL);
    }
    listing.push_str(EOL);

    data.write_all(listing.as_bytes()).await?;
    data.flush().await
}

/// Copies `source` to `data` in the given mode, returning bytes written.
pub async fn send_file<R, W>(source: R, data: &mut W, mode: TransferMode) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match mode {
        TransferMode::Binary => send_binary(source, data).await,
        TransferMode::Ascii => send_ascii(source, data).await,
    }
}

async fn send_binary<R, W>(mut source: R, data: &mut W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let written = tokio::io::copy(&mut source, data).await?;
    data.flush().await?;
    Ok(written)
}

/// Rewrites every line with a CRLF terminator. The original terminator
/// (`\n` or `\r\n`) is dropped, and a final line without one still gets CRLF.
async fn send_ascii<R, W>(source: R, data: &mut W) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(source);
    let mut line = Vec::new();
    let mut written = 0u64;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        line.extend_from_slice(EOL.as_bytes());
        data.write_all(&line).await?;
        written += line.len() as u64;
    }

    data.flush().await?;
    debug!("ASCII transfer wrote {} bytes", written);
    Ok(written)
}
