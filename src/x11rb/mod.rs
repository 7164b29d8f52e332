//! An [XConn][crate::x::XConn] implementation backed by [x11rb]
use crate::Xid;

pub mod event;
pub mod xconn;

#[doc(inline)]
pub use xconn::X11rbConn;

/// Result type for fallible methods using x11rb
pub type Result<T> = std::result::Result<T, X11rbError>;

/// Enum to store the various ways that operations can fail inside of the
/// x11rb implementation of [XConn][crate::x::XConn].
#[derive(thiserror::Error, Debug)]
pub enum X11rbError {
    /// Unable to establish a connection to the X server
    #[error(transparent)]
    Connect(#[from] ::x11rb::errors::ConnectError),

    /// The X11 connection broke
    #[error(transparent)]
    Connection(#[from] ::x11rb::errors::ConnectionError),

    /// Could not get X11 request reply
    #[error(transparent)]
    ReplyError(#[from] ::x11rb::errors::ReplyError),

    /// Could not get X11 request reply or could not generate_id()
    #[error(transparent)]
    ReplyOrIdError(#[from] ::x11rb::errors::ReplyOrIdError),

    /// A property had a type that we do not know how to read
    #[error("property {0} on {1} has an unsupported type")]
    UnsupportedProp(String, Xid),
}
