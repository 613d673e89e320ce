// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map an internal user onto their CRM user ID.
//!
//! A stored ID is only trusted once it shows up in the current CRM user
//! list. Otherwise we look the user up by name and cache what we find on
//! the profile. If nothing matches unambiguously, the user stays
//! unresolved; we never guess.

use crate::db::UserStore;
use crate::models::appointment::non_empty;
use crate::models::{CrmUser, User};
use crate::services::crm::UserDirectory;
use std::collections::BTreeSet;

/// Outcome of resolving a user's CRM identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrmIdentity {
    /// The ID already on the profile, confirmed against the CRM user list.
    Stored(String),
    /// Found by name; written back to the profile.
    Discovered(String),
    /// No usable CRM ID.
    Unresolved,
}

impl CrmIdentity {
    pub fn crm_user_id(&self) -> Option<&str> {
        match self {
            CrmIdentity::Stored(id) | CrmIdentity::Discovered(id) => Some(id.as_str()),
            CrmIdentity::Unresolved => None,
        }
    }
}

/// Resolve (and cache) the CRM user ID for `user`.
///
/// Makes at most one directory call and one store write. Never fails:
/// if the directory is unreachable the user is `Unresolved`, stored ID
/// or not.
pub async fn resolve_crm_identity(
    user: &User,
    directory: &dyn UserDirectory,
    store: &dyn UserStore,
) -> CrmIdentity {
    let stored = non_empty(&user.ghl_user_id);

    let crm_users = match directory.list_users().await {
        Ok(users) => users,
        Err(e) => {
            // A stored ID is never used unconfirmed.
            tracing::warn!(
                user_id = %user.id,
                stored_crm_user_id = stored.unwrap_or(""),
                error = %e,
                "CRM user list unavailable, cannot confirm CRM identity"
            );
            return CrmIdentity::Unresolved;
        }
    };

    if let Some(id) = stored {
        if crm_users.iter().any(|u| u.id == id) {
            return CrmIdentity::Stored(id.to_string());
        }
        tracing::warn!(
            user_id = %user.id,
            crm_user_id = id,
            "Stored CRM user ID not found in CRM user list, searching by name"
        );
    }

    let display_name = user.display_name();
    let Some(found) = find_by_name(&crm_users, &display_name) else {
        tracing::info!(
            user_id = %user.id,
            name = %display_name,
            candidates = crm_users.len(),
            "No unambiguous CRM user matches this name"
        );
        return CrmIdentity::Unresolved;
    };

    let crm_user_id = found.id.clone();
    tracing::info!(
        user_id = %user.id,
        crm_user_id = %crm_user_id,
        crm_name = %found.display_name(),
        "Resolved CRM user by name"
    );

    if let Err(e) = store.set_ghl_user_id(&user.id, &crm_user_id).await {
        tracing::warn!(
            user_id = %user.id,
            error = %e,
            "Failed to cache CRM user ID on profile, continuing anyway"
        );
    }

    CrmIdentity::Discovered(crm_user_id)
}

/// Find the CRM user whose name matches `display_name`.
///
/// Tiers, first hit wins:
/// 1. same name after normalization
/// 2. every word of our name appears in theirs (CRM has a middle name)
/// 3. every word of theirs (at least two) appears in ours
///
/// A tier matching more than one distinct user is ambiguous and yields `None`.
pub fn find_by_name<'a>(users: &'a [CrmUser], display_name: &str) -> Option<&'a CrmUser> {
    let wanted = name_tokens(display_name);
    if wanted.is_empty() {
        return None;
    }

    let candidates: Vec<(&CrmUser, BTreeSet<String>)> = users
        .iter()
        .map(|u| (u, name_tokens(&u.display_name())))
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect();

    let tiers: [&dyn Fn(&BTreeSet<String>) -> bool; 3] = [
        &|theirs: &BTreeSet<String>| *theirs == wanted,
        &|theirs: &BTreeSet<String>| wanted.is_subset(theirs),
        &|theirs: &BTreeSet<String>| theirs.len() >= 2 && theirs.is_subset(&wanted),
    ];

    for tier in tiers {
        let mut matched: Vec<&CrmUser> = candidates
            .iter()
            .filter(|(_, tokens)| tier(tokens))
            .map(|(user, _)| *user)
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        matched.dedup_by(|a, b| a.id == b.id);

        match matched.as_slice() {
            [] => continue,
            [only] => return Some(*only),
            _ => return None,
        }
    }

    None
}

/// Lower-cased words of a name with punctuation stripped.
fn name_tokens(name: &str) -> BTreeSet<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
