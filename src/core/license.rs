//! License registrar business logic.
//!
//! Issues license keys to user accounts, enforcing at most one active holder
//! per key. The duplicate check and the bind run inside one database
//! transaction so two concurrent issuances of the same key cannot both pass
//! the check; the check also happens strictly before any write, so a refused
//! issuance leaves no partial state behind.

use crate::{
    entities::{LicenseKey, license_key},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};
use tracing::info;

/// Status value for a bound key.
const STATUS_ACTIVE: &str = "active";
/// Status value for an unbound/revoked key.
const STATUS_INACTIVE: &str = "inactive";

/// Issues a license key to a user account.
///
/// If the key is already bound to a *different* user the call fails with
/// `DuplicateKey` and performs no writes. Issuing to the current holder
/// refreshes the validity window. Unknown keys are created bound; known
/// unbound keys are re-bound and reactivated.
///
/// # Arguments
/// * `db` - Database connection
/// * `key` - The license key string
/// * `user_id` - Account the key is issued to
/// * `valid_until` - End of the validity window, None for open-ended
pub async fn issue_license(
    db: &DatabaseConnection,
    key: &str,
    user_id: &str,
    valid_until: Option<chrono::DateTime<chrono::Utc>>,
) -> Result<license_key::Model> {
    if key.trim().is_empty() || user_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "License key and user id cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let existing = LicenseKey::find()
        .filter(license_key::Column::Key.eq(key))
        .one(&txn)
        .await?;

    let issued = match existing {
        Some(record) => {
            if let Some(holder) = &record.bound_user {
                if holder != user_id {
                    // Refuse before any account mutation happens.
                    return Err(Error::DuplicateKey {
                        key: key.to_string(),
                        holder: holder.clone(),
                    });
                }
            }
            let mut active: license_key::ActiveModel = record.into();
            active.bound_user = Set(Some(user_id.to_string()));
            active.status = Set(STATUS_ACTIVE.to_string());
            active.valid_until = Set(valid_until);
            active.update(&txn).await?
        }
        None => {
            license_key::ActiveModel {
                key: Set(key.to_string()),
                bound_user: Set(Some(user_id.to_string())),
                status: Set(STATUS_ACTIVE.to_string()),
                valid_until: Set(valid_until),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;
    info!(key, user = user_id, "license key issued");
    Ok(issued)
}

/// Revokes a license key: clears the holder and marks the key inactive.
/// Idempotent; revoking an unbound or unknown key is Ok.
pub async fn revoke_license(db: &DatabaseConnection, key: &str) -> Result<()> {
    let existing = LicenseKey::find()
        .filter(license_key::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(record) = existing {
        let mut active: license_key::ActiveModel = record.into();
        active.bound_user = Set(None);
        active.status = Set(STATUS_INACTIVE.to_string());
        active.update(db).await?;
        info!(key, "license key revoked");
    }

    Ok(())
}

/// Finds a license key record by its key string.
pub async fn get_license(db: &DatabaseConnection, key: &str) -> Result<Option<license_key::Model>> {
    LicenseKey::find()
        .filter(license_key::Column::Key.eq(key))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the active license currently held by a user, if any.
pub async fn find_license_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<license_key::Model>> {
    LicenseKey::find()
        .filter(license_key::Column::BoundUser.eq(user_id))
        .filter(license_key::Column::Status.eq(STATUS_ACTIVE))
        .one(db)
        .await
        .map_err(Into::into)
}
