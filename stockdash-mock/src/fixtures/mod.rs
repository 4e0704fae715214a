pub mod history;
pub mod info;
