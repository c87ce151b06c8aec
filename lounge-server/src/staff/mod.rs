//! Staff directory
//!
//! Accounts for the back-office. At least one ADMIN must exist at all times.

use chrono::Utc;
use parking_lot::RwLock;
use shared::models::{Page, PageQuery, Staff, StaffCreate, StaffRole};
use std::sync::atomic::{AtomicI64, Ordering};

use crate::admin::paginate;
use crate::auth::password::{hash_password, verify_password};
use crate::utils::validation::{validate_payload, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug)]
pub struct StaffDirectory {
    staff: RwLock<Vec<Staff>>,
    next_id: AtomicI64,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::StaffNotFound, format!("Staff {} not found", id))
        .with_detail("id", id)
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password).map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

fn is_last_admin(staff: &[Staff], id: i64) -> bool {
    let admins: Vec<_> = staff.iter().filter(|s| s.role == StaffRole::Admin).collect();
    admins.len() == 1 && admins[0].id == id
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self {
            staff: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create the initial admin unless the email is already registered
    pub fn seed_admin(&self, email: &str, password: &str) -> AppResult<Staff> {
        if let Some(existing) = self.find_by_email(email) {
            return Ok(existing);
        }
        self.create(StaffCreate {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: StaffRole::Admin,
        })
    }

    fn find_by_email(&self, email: &str) -> Option<Staff> {
        self.staff
            .read()
            .iter()
            .find(|s| s.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
    }

    /// Verify credentials and mark the account online
    ///
    /// Unknown email and wrong password produce the same error.
    pub fn authenticate(&self, email: &str, password: &str) -> AppResult<Staff> {
        let Some(staff) = self.find_by_email(email) else {
            return Err(AppError::invalid_credentials());
        };

        match verify_password(&staff.password_hash, password) {
            Ok(true) => {}
            Ok(false) => return Err(AppError::invalid_credentials()),
            Err(e) => {
                tracing::error!(staff_id = staff.id, error = %e, "Stored password hash is malformed");
                return Err(AppError::invalid_credentials());
            }
        }

        let mut all = self.staff.write();
        let entry = all
            .iter_mut()
            .find(|s| s.id == staff.id)
            .ok_or_else(|| not_found(staff.id))?;
        entry.is_online = true;
        entry.last_active = Some(Utc::now());
        entry.current_action = Some("Signed in".to_string());
        Ok(entry.clone())
    }

    pub fn get(&self, id: i64) -> AppResult<Staff> {
        self.staff
            .read()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub fn list(&self, query: &PageQuery, default_page_size: u32) -> Page<Staff> {
        paginate(self.staff.read().clone(), query.page, query.page_size, default_page_size)
    }

    pub fn create(&self, payload: StaffCreate) -> AppResult<Staff> {
        validate_payload(&payload)?;
        validate_required_text(&payload.name, "name", 200)?;

        let password_hash = hash(&payload.password)?;
        let email = payload.email.trim().to_lowercase();

        let mut all = self.staff.write();
        if all.iter().any(|s| s.email.eq_ignore_ascii_case(&email)) {
            return Err(AppError::with_message(
                ErrorCode::StaffEmailExists,
                format!("Email {} is already registered", email),
            )
            .with_detail("email", email));
        }

        let staff = Staff {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: payload.name.trim().to_string(),
            email,
            role: payload.role,
            created_at: Utc::now(),
            is_online: false,
            last_active: None,
            current_action: None,
            password_hash,
        };
        all.push(staff.clone());
        tracing::info!(staff_id = staff.id, role = staff.role.as_str(), "Staff account created");
        Ok(staff)
    }

    pub fn update_role(&self, id: i64, role: StaffRole) -> AppResult<Staff> {
        let mut all = self.staff.write();
        if role != StaffRole::Admin && is_last_admin(&all, id) {
            return Err(AppError::with_message(
                ErrorCode::LastAdminRequired,
                "Cannot demote the last admin",
            ));
        }

        let staff = all
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(id))?;
        staff.role = role;
        tracing::info!(staff_id = id, role = role.as_str(), "Staff role changed");
        Ok(staff.clone())
    }

    /// Remove an account; `acting_id` is the admin performing the delete
    pub fn delete(&self, id: i64, acting_id: i64) -> AppResult<Staff> {
        if id == acting_id {
            return Err(AppError::new(ErrorCode::StaffCannotDeleteSelf));
        }

        let mut all = self.staff.write();
        let idx = all
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found(id))?;
        if is_last_admin(&all, id) {
            return Err(AppError::with_message(
                ErrorCode::LastAdminRequired,
                "Cannot delete the last admin",
            ));
        }

        let removed = all.remove(idx);
        tracing::info!(staff_id = id, by = acting_id, "Staff account deleted");
        Ok(removed)
    }
}

impl Default for StaffDirectory {
    fn default() -> Self {
        Self::new()
    }
}
