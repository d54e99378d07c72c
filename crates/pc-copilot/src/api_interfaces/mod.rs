pub mod completion;
pub mod token;
