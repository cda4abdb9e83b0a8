pub mod history;
pub mod network;
pub mod scanner;
