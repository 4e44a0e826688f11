pub mod build;
pub mod check;
pub mod complete;
pub mod next;
