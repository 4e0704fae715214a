pub mod download;
pub mod history;
pub mod info;
pub mod snapshot;

pub mod util;
