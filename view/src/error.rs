use thiserror::Error;

use crate::actors::view::ViewEvent;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Session(#[from] ircmux_core::error::SessionError),

    #[error("view actor is no longer running: {0}")]
    ChannelClosed(#[from] tokio::sync::mpsc::error::SendError<ViewEvent>),

    #[error("view actor dropped the reply: {0}")]
    ReplyDropped(#[from] tokio::sync::oneshot::error::RecvError),

    #[error("logging init failed: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub type Result<T> = std::result::Result<T, Error>;
