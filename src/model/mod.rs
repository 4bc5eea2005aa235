pub mod attendance;
pub mod car;
pub mod driver;
pub mod earning;
pub mod expense;
pub mod owner;
pub mod role;
