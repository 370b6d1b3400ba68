//! Core of the markdown editor's window bridge.
//!
//! The privileged process owns a [`bridge::CommandBridge`]: surfaces send it
//! [`protocol::BridgeCommand`]s, it performs dialog and file work through
//! [`gateway::FileAccessGateway`], and answers with
//! [`protocol::BridgeEvent`]s addressed to the asking window only.
//!
//! Without the default `host` feature only the protocol and the document
//! model are built, which is what the wasm surface links against.

pub mod document;
pub mod protocol;

#[cfg(feature = "host")]
pub mod bridge;
#[cfg(feature = "host")]
pub mod dialogs;
#[cfg(feature = "host")]
pub mod error;
#[cfg(feature = "host")]
pub mod gateway;
#[cfg(feature = "host")]
pub mod menu;
#[cfg(feature = "host")]
pub mod registry;
#[cfg(feature = "host")]
pub mod sink;
#[cfg(feature = "host")]
pub mod windows;

pub use document::{Document, SurfaceAction};
pub use protocol::{BridgeCommand, BridgeEvent, WindowId, BRIDGE_EVENT};

#[cfg(feature = "host")]
pub use bridge::CommandBridge;
#[cfg(feature = "host")]
pub use error::{BridgeError, Result};
