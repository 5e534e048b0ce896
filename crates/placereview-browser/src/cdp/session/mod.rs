//! A session attached to one page target.

mod core;
mod emulation;
mod js;
mod navigation;

pub use self::core::PageSession;
