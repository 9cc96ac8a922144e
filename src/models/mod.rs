pub mod responses;
pub mod student;

pub use responses::*;
pub use student::*;
