pub mod due;
pub mod review;
pub mod settings;
pub mod stats;
