pub mod attendance;
pub mod parameter;
pub mod role;
