pub mod busy;
pub mod slot;
pub mod weekly;
