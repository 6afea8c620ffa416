//! Chart shell - the designer's interactive state and flows
//!
//! This crate holds everything the GUI toolkit binds to: the editable form,
//! the per-category color state, and the show/save flows. The toolkit side
//! plugs in through the collaborator traits in [`dialogs`], which keeps the
//! flows testable without a display.

mod dialogs;
mod form;
mod session;

pub use dialogs::*;
pub use form::*;
pub use session::*;
