mod common;
mod memo;
mod page;
mod user;

pub use common::*;
pub use memo::*;
pub use page::*;
pub use user::*;
