//! UI Components
//!
//! Leptos components for the playlist page.

mod add_link_form;
mod delete_confirm_button;
mod group_row;
mod link_edit_form;
mod link_row;
mod playlist_items;
mod toast_host;

pub use add_link_form::AddLinkForm;
pub use delete_confirm_button::DeleteConfirmButton;
pub use group_row::GroupRow;
pub use link_edit_form::LinkEditForm;
pub use link_row::LinkRow;
pub use playlist_items::{DropZone, PlaylistItems};
pub use toast_host::ToastHost;
