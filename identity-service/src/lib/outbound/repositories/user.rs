use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserRegistry;
use crate::user::errors::RegistryError;

/// Volatile user registry.
///
/// Records live in one map keyed by id; the name index stores ids only. Both
/// maps sit behind a single lock so that a name check and the insert that
/// depends on it cannot interleave with another writer.
#[derive(Debug, Default)]
pub struct InMemoryUserRegistry {
    state: RwLock<RegistryState>,
}

#[derive(Debug, Default)]
struct RegistryState {
    users_by_id: HashMap<UserId, User>,
    user_ids_by_name: HashMap<UserName, UserId>,
}

impl RegistryState {
    fn by_name(&self, user_name: &UserName) -> Option<&User> {
        self.user_ids_by_name
            .get(user_name)
            .and_then(|id| self.users_by_id.get(id))
    }
}

impl InMemoryUserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation updates both maps under one guard, so a poisoned lock
    // still holds consistent data.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserRegistry for InMemoryUserRegistry {
    fn find_by_id(&self, id: &UserId) -> Result<User, RegistryError> {
        self.read()
            .users_by_id
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    fn find_by_user_name(&self, user_name: &UserName) -> Result<User, RegistryError> {
        self.read()
            .by_name(user_name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(user_name.to_string()))
    }

    fn is_user_name_available(&self, user_name: &UserName) -> bool {
        self.read().by_name(user_name).is_none()
    }

    fn insert(&self, user: User) -> Result<User, RegistryError> {
        let mut state = self.write();

        if state.user_ids_by_name.contains_key(&user.user_name) {
            return Err(RegistryError::UserNameTaken(user.user_name.to_string()));
        }

        state.user_ids_by_name.insert(user.user_name.clone(), user.id);
        state.users_by_id.insert(user.id, user.clone());

        Ok(user)
    }

    fn store_access_token(&self, id: &UserId, token: String) -> Result<(), RegistryError> {
        let mut state = self.write();

        let user = state
            .users_by_id
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        user.access_token = Some(token);

        Ok(())
    }

    fn len(&self) -> usize {
        self.read().users_by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn user(name: &str) -> User {
        User::new(
            UserName::new(name).unwrap(),
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        )
    }

    #[test]
    fn test_insert_and_find() {
        let registry = InMemoryUserRegistry::new();
        let created = registry.insert(user("peter")).unwrap();

        let by_name = registry
            .find_by_user_name(&UserName::new("peter").unwrap())
            .unwrap();
        let by_id = registry.find_by_id(&created.id).unwrap();

        assert_eq!(by_name, created);
        assert_eq!(by_id, created);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_find_unknown_user() {
        let registry = InMemoryUserRegistry::new();

        let result = registry.find_by_user_name(&UserName::new("nosuchuser").unwrap());
        assert_eq!(result, Err(RegistryError::NotFound("nosuchuser".to_string())));
        assert!(registry.find_by_id(&UserId::new()).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_availability() {
        let registry = InMemoryUserRegistry::new();
        let name = UserName::new("anna").unwrap();

        assert!(registry.is_user_name_available(&name));
        registry.insert(user("anna")).unwrap();
        assert!(!registry.is_user_name_available(&name));
        assert!(registry.is_user_name_available(&UserName::new("Anna").unwrap()));
    }

    #[test]
    fn test_insert_rejects_taken_name() {
        let registry = InMemoryUserRegistry::new();
        let first = registry.insert(user("anna")).unwrap();

        let result = registry.insert(user("anna"));
        assert_eq!(result, Err(RegistryError::UserNameTaken("anna".to_string())));

        // The first record is untouched
        let stored = registry
            .find_by_user_name(&UserName::new("anna").unwrap())
            .unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_store_access_token_overwrites() {
        let registry = InMemoryUserRegistry::new();
        let created = registry.insert(user("bob")).unwrap();

        registry
            .store_access_token(&created.id, "t1".to_string())
            .unwrap();
        registry
            .store_access_token(&created.id, "t2".to_string())
            .unwrap();

        let stored = registry.find_by_id(&created.id).unwrap();
        assert_eq!(stored.access_token.as_deref(), Some("t2"));
    }

    #[test]
    fn test_store_access_token_unknown_user() {
        let registry = InMemoryUserRegistry::new();

        let result = registry.store_access_token(&UserId::new(), "t1".to_string());
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn test_concurrent_inserts_of_same_name() {
        let registry = Arc::new(InMemoryUserRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.insert(user("admin")).is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(registry.len(), 1);
    }
}
