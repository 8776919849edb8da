pub mod console;
pub mod menu;
pub mod session;

pub use console::Console;
pub use session::{Atm, SessionEnd, SessionState};
