pub mod navigation;
pub mod open_page;
pub mod reload;
pub mod search;

pub use navigation::*;
pub use open_page::*;
pub use reload::*;
pub use search::*;
