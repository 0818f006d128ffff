pub mod contest;
pub mod samples;
pub mod title;
