pub mod control;
pub mod counter;
pub mod device;
pub mod script;
