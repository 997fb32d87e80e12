pub mod export;
pub mod health;
pub mod resume;
pub mod solve;
