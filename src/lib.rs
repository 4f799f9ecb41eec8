pub mod aggregate;
pub mod io;
pub mod process;
pub mod report;
