pub mod card;
pub mod generate;
pub mod list;
pub mod reset;
pub mod show;
pub mod topic;
