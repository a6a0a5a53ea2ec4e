// MCP (Model Context Protocol) server exposing the MCC lookup operations
// as tools to agent clients (Claude Code, etc.)

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
