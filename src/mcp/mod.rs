/// MCP (Model Context Protocol) implementation
///
/// This module handles the JSON-RPC communication protocol that MCP clients
/// use to talk to the wellness tracker server.

pub mod protocol;
pub mod server;

pub use protocol::*;
pub use server::*;
