pub mod branding;
pub mod config;
pub mod update;
pub mod window_state;

pub use branding::*;
pub use config::*;
pub use update::*;
pub use window_state::*;
