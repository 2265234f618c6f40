//! Command handlers module.
//!
//! One handler per supported verb plus `handle_command`, which dispatches a
//! parsed `Command` to it. Handlers write their replies straight onto the
//! control channel because LIST and RETR answer twice (150, then 226 or an
//! error) around the data transfer.
//!
//! Every client-caused failure is reported with a reply and leaves the
//! session running; only an I/O error on the control channel itself is
//! returned as `Err`.

use std::io;

use log::{info, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::client::Session;
use crate::error::{NavigateError, TransferError};
use crate::navigate::{change_directory, resolve_in_jail};
use crate::protocol::responses::{
    ACTION_FAILED, ARGUMENT_SYNTAX_ERROR, CLOSING, LOGIN_SUCCESS, NOT_IMPLEMENTED, OK,
    OPENING_DATA_CONNECTION, TRANSFER_COMPLETE, send_response,
};
use crate::protocol::{Command, CommandStatus};
use crate::storage::FileSystem;
use crate::transfer::{
    connect_data_channel, parse_port_argument, parse_type_argument, send_file, send_listing,
};

/// Dispatches a received FTP command to its corresponding handler.
///
/// # Arguments
///
/// * `command` - The parsed command.
/// * `session` - The state of the connection the command arrived on.
/// * `fs` - Filesystem the jail is served from.
/// * `control` - Control channel the replies are written to.
///
/// # Returns
///
/// * `CommandStatus` - Whether the command succeeded, failed, or ends the session.
pub async fn handle_command<F, W>(
    command: &Command,
    session: &mut Session,
    fs: &F,
    control: &mut W,
) -> io::Result<CommandStatus>
where
    F: FileSystem,
    W: AsyncWrite + Unpin + Send,
{
    match command {
        Command::User(name) => handle_cmd_user(control, name).await,
        Command::Cwd(path) => handle_cmd_cwd(control, session, fs, path).await,
        Command::Quit => handle_cmd_quit(control).await,
        Command::Port(args) => handle_cmd_port(control, session, args).await,
        Command::List(path) => handle_cmd_list(control, session, fs, path).await,
        Command::Retr(path) => handle_cmd_retr(control, session, fs, path).await,
        Command::Type(args) => handle_cmd_type(control, session, args).await,
        Command::Unknown { verb, args } => handle_cmd_unknown(control, verb, args).await,
    }
}

/// Handles USER: any name is accepted.
async fn handle_cmd_user<W>(control: &mut W, name: &str) -> io::Result<CommandStatus>
where
    W: AsyncWrite + Unpin,
{
    info!("User {:?} logged in", name);
    send_response(
        control,
        LOGIN_SUCCESS,
        &format!("User {} logged in, proceed.", name),
    )
    .await?;
    Ok(CommandStatus::Success)
}

/// Handles CWD: moves the working directory to an existing directory
/// inside the jail.
async fn handle_cmd_cwd<F, W>(
    control: &mut W,
    session: &mut Session,
    fs: &F,
    path: &str,
) -> io::Result<CommandStatus>
where
    F: FileSystem,
    W: AsyncWrite + Unpin,
{
    if path.is_empty() {
        send_response(control, ARGUMENT_SYNTAX_ERROR, "Empty parameters.").await?;
        return Ok(CommandStatus::Failure("CWD without a path".into()));
    }

    match change_directory(fs, session.jail_root(), session.current_dir(), path).await {
        Ok(new_dir) => {
            info!("Working directory changed to {}", new_dir.display());
            session.set_current_dir(new_dir);
            send_response(control, OK, "Current workdir changed.").await?;
            Ok(CommandStatus::Success)
        }
        Err(e) => {
            let message = match &e {
                NavigateError::OutOfJail(_) => format!("{}: out of jail.", path),
                NavigateError::NotFound { .. } => {
                    format!("{}: new working dir does not exist.", path)
                }
                NavigateError::NotADirectory(_) => format!("{}: not a directory.", path),
            };
            send_response(control, e.reply_code(), &message).await?;
            Ok(CommandStatus::Failure(e.to_string()))
        }
    }
}

/// Handles QUIT: says goodbye and ends the session.
async fn handle_cmd_quit<W>(control: &mut W) -> io::Result<CommandStatus>
where
    W: AsyncWrite + Unpin,
{
    send_response(control, CLOSING, "Bye.").await?;
    Ok(CommandStatus::CloseConnection)
}

/// Handles PORT: records the address the next transfers dial.
async fn handle_cmd_port<W>(
    control: &mut W,
    session: &mut Session,
    args: &str,
) -> io::Result<CommandStatus>
where
    W: AsyncWrite + Unpin,
{
    match parse_port_argument(args) {
        Ok(addr) => {
            info!("Data address is {}", addr);
            session.set_data_address(addr);
            send_response(control, OK, "Cmd ok").await?;
            Ok(CommandStatus::Success)
        }
        Err(e) => {
            send_response(control, e.reply_code(), &e.to_string()).await?;
            Ok(CommandStatus::Failure(e.to_string()))
        }
    }
}

/// Handles TYPE: switches between ASCII and binary transfers.
async fn handle_cmd_type<W>(
    control: &mut W,
    session: &mut Session,
    args: &str,
) -> io::Result<CommandStatus>
where
    W: AsyncWrite + Unpin,
{
    match parse_type_argument(args) {
        Ok(mode) => {
            session.set_transfer_mode(mode);
            send_response(control, OK, &format!("Type set to {}", mode)).await?;
            Ok(CommandStatus::Success)
        }
        Err(e) => {
            send_response(control, e.reply_code(), &e.to_string()).await?;
            Ok(CommandStatus::Failure(e.to_string()))
        }
    }
}

/// Handles LIST: sends the names in a directory over a new data connection.
///
/// The directory is read before anything is promised to the client, so an
/// unreadable directory only gets a 550.
async fn handle_cmd_list<F, W>(
    control: &mut W,
    session: &Session,
    fs: &F,
    path: &str,
) -> io::Result<CommandStatus>
where
    F: FileSystem,
    W: AsyncWrite + Unpin,
{
    let target = match resolve_in_jail(session.jail_root(), session.current_dir(), path) {
        Ok(target) => target,
        Err(e) => {
            send_response(control, e.reply_code(), &format!("{}: out of jail.", path)).await?;
            return Ok(CommandStatus::Failure(e.to_string()));
        }
    };

    let entries = match fs.list_dir(&target).await {
        Ok(entries) => entries,
        Err(e) => {
            send_response(control, ACTION_FAILED, &e.to_string()).await?;
            return Ok(CommandStatus::Failure(format!(
                "listing {}: {}",
                target.display(),
                e
            )));
        }
    };

    send_response(control, OPENING_DATA_CONNECTION, "Opening data connection").await?;

    let mut data = match connect_data_channel(session.data_address()).await {
        Ok(data) => data,
        Err(e) => return report_transfer_error(control, e).await,
    };

    let sent = send_listing(&mut data, &entries).await;
    close_data_channel(&mut data).await;
    if let Err(e) = sent {
        return report_transfer_error(control, TransferError::Aborted(e)).await;
    }

    info!("Listed {} ({} entries)", target.display(), entries.len());
    send_response(control, TRANSFER_COMPLETE, "Closing data connection").await?;
    Ok(CommandStatus::Success)
}

/// Handles RETR: sends a file over a new data connection in the session's
/// transfer mode.
async fn handle_cmd_retr<F, W>(
    control: &mut W,
    session: &Session,
    fs: &F,
    path: &str,
) -> io::Result<CommandStatus>
where
    F: FileSystem,
    W: AsyncWrite + Unpin,
{
    if path.is_empty() {
        send_response(control, ARGUMENT_SYNTAX_ERROR, "Empty parameters.").await?;
        return Ok(CommandStatus::Failure("RETR without a path".into()));
    }

    let target = match resolve_in_jail(session.jail_root(), session.current_dir(), path) {
        Ok(target) => target,
        Err(e) => {
            send_response(control, e.reply_code(), &format!("{}: out of jail.", path)).await?;
            return Ok(CommandStatus::Failure(e.to_string()));
        }
    };

    match fs.stat(&target).await {
        Ok(stat) if stat.is_dir => {
            send_response(control, ACTION_FAILED, "Bad file").await?;
            return Ok(CommandStatus::Failure(format!(
                "{} is a directory",
                target.display()
            )));
        }
        Ok(_) => {}
        Err(e) => {
            send_response(control, ACTION_FAILED, "Bad file").await?;
            return Ok(CommandStatus::Failure(format!("{}: {}", target.display(), e)));
        }
    }

    let source = match fs.open(&target).await {
        Ok(source) => source,
        Err(e) => {
            send_response(control, ACTION_FAILED, "Bad file").await?;
            return Ok(CommandStatus::Failure(format!("{}: {}", target.display(), e)));
        }
    };

    send_response(control, OPENING_DATA_CONNECTION, "Open data connection").await?;

    let mut data = match connect_data_channel(session.data_address()).await {
        Ok(data) => data,
        Err(e) => return report_transfer_error(control, e).await,
    };

    let sent = send_file(source, &mut data, session.transfer_mode()).await;
    close_data_channel(&mut data).await;
    match sent {
        Ok(bytes) => {
            info!(
                "Sent {} ({} bytes, {})",
                target.display(),
                bytes,
                session.transfer_mode()
            );
            send_response(control, TRANSFER_COMPLETE, "Close data connection").await?;
            Ok(CommandStatus::Success)
        }
        Err(e) => report_transfer_error(control, TransferError::Aborted(e)).await,
    }
}

/// Handles unknown or unsupported commands: returns error response.
async fn handle_cmd_unknown<W>(control: &mut W, verb: &str, args: &str) -> io::Result<CommandStatus>
where
    W: AsyncWrite + Unpin,
{
    send_response(control, NOT_IMPLEMENTED, "Not implemented").await?;
    Ok(CommandStatus::Failure(format!(
        "unknown command {:?} args [{}]",
        verb, args
    )))
}

async fn report_transfer_error<W>(control: &mut W, e: TransferError) -> io::Result<CommandStatus>
where
    W: AsyncWrite + Unpin,
{
    let message = match e {
        TransferError::NoDataAddress | TransferError::Connect { .. } => {
            "Cannot open data connection."
        }
        TransferError::Aborted(_) => "Connection closed; transfer aborted.",
    };
    send_response(control, e.reply_code(), message).await?;
    Ok(CommandStatus::Failure(e.to_string()))
}

async fn close_data_channel<D>(data: &mut D)
where
    D: AsyncWrite + Unpin,
{
    if let Err(e) = data.shutdown().await {
        warn!("Failed to close data connection: {}", e);
    }
}
