pub mod attendance;
pub mod stats;
pub mod worker;
