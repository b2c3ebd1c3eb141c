pub mod calendar;
pub mod fortune;
pub mod photos;
pub mod reset;
