//! MCP (Model Context Protocol) implementation.

mod seminar_tool;
pub mod server;
mod tools;

pub use seminar_tool::{GenerateSeminarHandler, INVALID_ARGUMENTS, TOOL_NAME};
pub use server::{SeminarServer, SERVER_NAME};
pub use tools::{
    TextContent, Tool, ToolError, ToolHandler, ToolRegistry, ToolResponse, INTERNAL_ERROR,
    INVALID_PARAMS, METHOD_NOT_FOUND,
};
