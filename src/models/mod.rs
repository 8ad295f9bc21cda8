mod order;
mod product;
mod status;
mod user;

pub use order::*;
pub use product::*;
pub use status::*;
pub use user::*;
