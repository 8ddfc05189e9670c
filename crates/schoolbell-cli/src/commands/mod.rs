pub mod bell;
pub mod run;
pub mod schedule;
pub mod sound;
