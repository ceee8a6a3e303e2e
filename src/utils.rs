pub mod git;

pub use git::commit_messages;
