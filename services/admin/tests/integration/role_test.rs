use uuid::Uuid;

use lyceum_admin::error::AdminServiceError;
use lyceum_admin::usecase::role::{GrantRoleInput, GrantRoleUseCase, RevokeRoleUseCase};

use crate::helpers::{MockCatalogRepo, MockGrantRepo, MockUserRepo, test_role, test_user};

fn grant_input(user_id: Uuid, role_id: Uuid) -> GrantRoleInput {
    GrantRoleInput {
        user_id,
        role_id,
        school_id: None,
        academic_unit_id: None,
        granted_by: None,
    }
}

// ── GrantRole ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_grant_role_to_user() {
    let user = test_user("admin@example.com");
    let role = test_role("principal");
    let usecase = GrantRoleUseCase {
        grants: MockGrantRepo::empty(),
        catalog: MockCatalogRepo::new(vec![role.clone()]),
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let granter = Uuid::new_v4();
    let mut input = grant_input(user.id, role.id);
    input.granted_by = Some(granter);
    let grant = usecase.execute(input).await.unwrap();

    assert!(grant.is_active);
    assert_eq!(grant.granted_by, Some(granter));
    assert!(grant.revoked_at.is_none());
}

#[tokio::test]
async fn should_reject_grant_for_missing_user() {
    let role = test_role("principal");
    let usecase = GrantRoleUseCase {
        grants: MockGrantRepo::empty(),
        catalog: MockCatalogRepo::new(vec![role.clone()]),
        users: MockUserRepo::empty(),
    };
    let err = usecase
        .execute(grant_input(Uuid::new_v4(), role.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("user")));
}

#[tokio::test]
async fn should_reject_grant_for_missing_role() {
    let user = test_user("admin@example.com");
    let user_id = user.id;
    let usecase = GrantRoleUseCase {
        grants: MockGrantRepo::empty(),
        catalog: MockCatalogRepo::new(vec![]),
        users: MockUserRepo::new(vec![user]),
    };
    let err = usecase
        .execute(grant_input(user_id, Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("role")));
}

#[tokio::test]
async fn should_reject_duplicate_active_grant() {
    let user = test_user("admin@example.com");
    let role = test_role("principal");
    let usecase = GrantRoleUseCase {
        grants: MockGrantRepo::empty(),
        catalog: MockCatalogRepo::new(vec![role.clone()]),
        users: MockUserRepo::new(vec![user.clone()]),
    };
    usecase.execute(grant_input(user.id, role.id)).await.unwrap();
    let err = usecase
        .execute(grant_input(user.id, role.id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdminServiceError::AlreadyExists {
            field: "user_role",
            ..
        }
    ));
}

#[tokio::test]
async fn should_allow_same_role_in_different_scope() {
    let user = test_user("admin@example.com");
    let role = test_role("principal");
    let usecase = GrantRoleUseCase {
        grants: MockGrantRepo::empty(),
        catalog: MockCatalogRepo::new(vec![role.clone()]),
        users: MockUserRepo::new(vec![user.clone()]),
    };
    usecase.execute(grant_input(user.id, role.id)).await.unwrap();

    // Same role scoped to a school is a distinct grant.
    let mut scoped = grant_input(user.id, role.id);
    scoped.school_id = Some(Uuid::new_v4());
    usecase.execute(scoped).await.unwrap();
}

// ── RevokeRole ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_revoke_active_grant() {
    let user = test_user("admin@example.com");
    let role = test_role("principal");
    let grant_usecase = GrantRoleUseCase {
        grants: MockGrantRepo::empty(),
        catalog: MockCatalogRepo::new(vec![role.clone()]),
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let grant = grant_usecase
        .execute(grant_input(user.id, role.id))
        .await
        .unwrap();
    let handle = grant_usecase.grants.handle();

    let revoke = RevokeRoleUseCase {
        grants: MockGrantRepo {
            grants: handle,
            roles: vec![],
            role_permissions: Default::default(),
        },
    };
    revoke.execute(grant.id).await.unwrap();

    let stored = revoke.grants.grants.lock().unwrap()[0].clone();
    assert!(!stored.is_active);
    assert!(stored.revoked_at.is_some());
}

#[tokio::test]
async fn should_return_not_found_when_revoking_twice() {
    let user = test_user("admin@example.com");
    let role = test_role("principal");
    let grant_usecase = GrantRoleUseCase {
        grants: MockGrantRepo::empty(),
        catalog: MockCatalogRepo::new(vec![role.clone()]),
        users: MockUserRepo::new(vec![user.clone()]),
    };
    let grant = grant_usecase
        .execute(grant_input(user.id, role.id))
        .await
        .unwrap();

    let revoke = RevokeRoleUseCase {
        grants: MockGrantRepo {
            grants: grant_usecase.grants.handle(),
            roles: vec![],
            role_permissions: Default::default(),
        },
    };
    revoke.execute(grant.id).await.unwrap();
    let err = revoke.execute(grant.id).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("role grant")));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_grant() {
    let usecase = RevokeRoleUseCase {
        grants: MockGrantRepo::empty(),
    };
    let err = usecase.execute(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("role grant")));
}
