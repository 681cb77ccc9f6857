/// Privilege tier derived from the caller's role id on every request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RoleLevel {
    /// Sees every attendance record
    Global = 1,
    /// Sees records of its own institution
    Institution = 2,
    /// Sees only its own records
    Own = 3,
}

impl RoleLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
