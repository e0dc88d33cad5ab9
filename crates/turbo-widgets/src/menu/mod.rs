//! Category navigation: the expandable menu tree and the mobile sidebar.

mod node;
mod sidebar;
mod tree;

pub use node::{CategoryId, MenuNodeState};
pub use sidebar::{CloseReason, SidebarConfig, SidebarMenu};
pub use tree::{CategoryEntry, CategoryMenu, MenuItemView};
