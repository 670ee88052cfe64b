use aiventory_core::StaffId;

/// Authenticated staff identity for a request.
///
/// Inserted by the auth middleware; present on all protected routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffContext {
    staff_id: StaffId,
    name: String,
    role: String,
}

impl StaffContext {
    pub fn new(staff_id: StaffId, name: String, role: String) -> Self {
        Self { staff_id, name, role }
    }

    pub fn staff_id(&self) -> StaffId {
        self.staff_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}
