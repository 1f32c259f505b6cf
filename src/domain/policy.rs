//! Access policy - which actor may perform which action.

use uuid::Uuid;

use super::user::UserRole;
use crate::errors::{AppError, AppResult};

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn can(&self, action: Action) -> bool {
        match action {
            Action::ListShifts | Action::ListUsers(_) => true,
            Action::ViewAssignments { owner } => self.is_admin() || self.id == owner,
            Action::CreateShift
            | Action::UpdateShift
            | Action::DeleteShift
            | Action::ViewUser(_)
            | Action::CreateUser(_)
            | Action::UpdateUser(_)
            | Action::DeleteUser(_)
            | Action::ReplaceAssignments => self.is_admin(),
        }
    }
}

/// Operations gated by the policy. User actions carry the target role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListShifts,
    CreateShift,
    UpdateShift,
    DeleteShift,
    ListUsers(UserRole),
    ViewUser(UserRole),
    CreateUser(UserRole),
    UpdateUser(UserRole),
    DeleteUser(UserRole),
    ViewAssignments { owner: Uuid },
    ReplaceAssignments,
}

/// Fail with `Forbidden` unless the actor may perform the action.
pub fn authorize(actor: &Actor, action: Action) -> AppResult<()> {
    if actor.can(action) {
        Ok(())
    } else {
        tracing::warn!(actor = %actor.id, role = %actor.role, ?action, "access denied");
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MUTATIONS: [Action; 10] = [
        Action::CreateShift,
        Action::UpdateShift,
        Action::DeleteShift,
        Action::CreateUser(UserRole::Employee),
        Action::CreateUser(UserRole::Customer),
        Action::UpdateUser(UserRole::Employee),
        Action::UpdateUser(UserRole::Customer),
        Action::DeleteUser(UserRole::Employee),
        Action::DeleteUser(UserRole::Customer),
        Action::ReplaceAssignments,
    ];

    #[test]
    fn test_admin_may_mutate_everything() {
        let admin = Actor::new(Uuid::new_v4(), UserRole::Admin);
        for action in MUTATIONS {
            assert!(authorize(&admin, action).is_ok(), "{:?}", action);
        }
    }

    #[test]
    fn test_non_admins_may_not_mutate() {
        for role in [UserRole::Employee, UserRole::Customer] {
            let actor = Actor::new(Uuid::new_v4(), role);
            for action in MUTATIONS {
                assert!(
                    matches!(authorize(&actor, action), Err(AppError::Forbidden)),
                    "{:?} {:?}",
                    role,
                    action
                );
            }
        }
    }

    #[test]
    fn test_everyone_may_list() {
        for role in [UserRole::Admin, UserRole::Employee, UserRole::Customer] {
            let actor = Actor::new(Uuid::new_v4(), role);
            assert!(actor.can(Action::ListShifts));
            assert!(actor.can(Action::ListUsers(UserRole::Employee)));
            assert!(actor.can(Action::ListUsers(UserRole::Customer)));
        }
    }

    #[test]
    fn test_assignments_visible_to_owner_and_admin() {
        let employee = Actor::new(Uuid::new_v4(), UserRole::Employee);
        let other = Actor::new(Uuid::new_v4(), UserRole::Employee);
        let admin = Actor::new(Uuid::new_v4(), UserRole::Admin);
        let action = Action::ViewAssignments { owner: employee.id };

        assert!(employee.can(action));
        assert!(admin.can(action));
        assert!(!other.can(action));
    }
}
