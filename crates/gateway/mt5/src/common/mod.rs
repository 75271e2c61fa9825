pub mod consts;
pub mod credential;
pub mod enums;
pub mod parse;

pub use consts::*;
pub use credential::*;
pub use enums::*;
pub use parse::*;
