//! Error types
//!
//! Defines domain-specific error types for each module of the FTP server.
//! Errors a client can cause carry the reply code they are reported with.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::protocol::responses::{
    ACTION_FAILED, ARGUMENT_SYNTAX_ERROR, CANT_OPEN_DATA_CONNECTION, PARAMETER_NOT_IMPLEMENTED,
    SYNTAX_ERROR, TRANSFER_ABORTED,
};

/// Fatal errors raised while starting or running the listener.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid server root {path}: {source}")]
    ServerRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to accept connection: {0}")]
    Accept(#[source] io::Error),
}

/// Errors from resolving or entering a directory.
#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("{} is out of jail", .0.display())]
    OutOfJail(PathBuf),

    #[error("{}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

impl NavigateError {
    pub fn reply_code(&self) -> u16 {
        ACTION_FAILED
    }
}

/// Errors from parsing a PORT argument.
#[derive(Debug, Error, PartialEq)]
pub enum PortError {
    #[error("{0} is the wrong number of arguments for the port cmd")]
    WrongArity(usize),

    #[error("{0:?} is not a valid port number")]
    InvalidPort(String),
}

impl PortError {
    pub fn reply_code(&self) -> u16 {
        ARGUMENT_SYNTAX_ERROR
    }
}

/// Errors from parsing a TYPE argument.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("missing type code")]
    MissingCode,

    #[error("syntax error in TYPE parameters: {0}")]
    Syntax(String),

    #[error("TYPE not implemented for parameter {0}")]
    UnsupportedParameter(String),
}

impl TypeError {
    pub fn reply_code(&self) -> u16 {
        match self {
            TypeError::MissingCode => ARGUMENT_SYNTAX_ERROR,
            TypeError::Syntax(_) => SYNTAX_ERROR,
            TypeError::UnsupportedParameter(_) => PARAMETER_NOT_IMPLEMENTED,
        }
    }
}

/// Errors on the data channel.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("no data address, send PORT first")]
    NoDataAddress,

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("transfer aborted: {0}")]
    Aborted(#[source] io::Error),
}

impl TransferError {
    pub fn reply_code(&self) -> u16 {
        match self {
            TransferError::NoDataAddress | TransferError::Connect { .. } => {
                CANT_OPEN_DATA_CONNECTION
            }
            TransferError::Aborted(_) => TRANSFER_ABORTED,
        }
    }
}
