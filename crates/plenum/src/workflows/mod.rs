pub mod assignment;
pub mod directory;
pub mod forms;
pub mod papers;
pub mod registration;
