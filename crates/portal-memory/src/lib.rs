mod call;
mod memory;
mod scripted;

pub use call::{CallLog, PortalCall};
pub use memory::{MemoryPortal, MemoryPortalConfig};
pub use scripted::ScriptedPortal;
