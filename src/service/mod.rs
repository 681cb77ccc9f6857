pub mod attendance;
pub mod clock;
pub mod parameter;
pub mod role;

pub use attendance::AttendanceService;
pub use clock::{Clock, LocalClock};
pub use parameter::ParamService;
pub use role::RoleService;
