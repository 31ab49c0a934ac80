use std::collections::HashMap;

use chrono::{Duration, Utc};

use lyceum_admin::error::AdminServiceError;
use lyceum_admin::usecase::auth::{LoginInput, LoginUseCase};
use lyceum_auth_types::token::validate_access_token;

use crate::helpers::{
    MockGrantRepo, MockUserRepo, TEST_PASSWORD, test_grant, test_role, test_user,
};

const TEST_SECRET: &str = "test-jwt-secret-for-integration";
const TEST_ISSUER: &str = "lyceum-admin";

fn login_usecase(users: MockUserRepo, grants: MockGrantRepo) -> LoginUseCase<MockUserRepo, MockGrantRepo> {
    LoginUseCase {
        users,
        grants,
        jwt_secret: TEST_SECRET.to_owned(),
        jwt_issuer: TEST_ISSUER.to_owned(),
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_and_embed_active_context_in_token() {
    let user = test_user("admin@example.com");
    let role = test_role("admin");
    let grant = test_grant(user.id, role.id, None);
    let perms = HashMap::from([(
        role.id,
        vec!["schools:read".to_owned(), "schools:create".to_owned()],
    )]);

    let usecase = login_usecase(
        MockUserRepo::new(vec![user.clone()]),
        MockGrantRepo::new(vec![grant], vec![role.clone()], perms),
    );
    let output = usecase
        .execute(LoginInput {
            email: "admin@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(output.user.id, user.id);
    assert_eq!(output.active_context.role_name, "admin");
    // Sorted, de-duplicated union.
    assert_eq!(
        output.active_context.permissions,
        vec!["schools:create".to_owned(), "schools:read".to_owned()]
    );

    let info = validate_access_token(&output.access_token, TEST_SECRET, TEST_ISSUER).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.email, "admin@example.com");
    assert!(info.active_context.has_permission("schools:read"));
    assert_eq!(info.expires_at, output.access_token_exp);
}

#[tokio::test]
async fn should_case_fold_email_on_login() {
    let user = test_user("admin@example.com");
    let role = test_role("admin");
    let grant = test_grant(user.id, role.id, None);

    let usecase = login_usecase(
        MockUserRepo::new(vec![user]),
        MockGrantRepo::new(vec![grant], vec![role], HashMap::new()),
    );
    let output = usecase
        .execute(LoginInput {
            email: "  Admin@Example.COM ".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(output.user.email, "admin@example.com");
}

#[tokio::test]
async fn should_reject_unknown_email_with_invalid_credentials() {
    let usecase = login_usecase(MockUserRepo::empty(), MockGrantRepo::empty());
    let err = usecase
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: "whatever-password".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_wrong_password_with_invalid_credentials() {
    let user = test_user("admin@example.com");
    let usecase = login_usecase(MockUserRepo::new(vec![user]), MockGrantRepo::empty());
    let err = usecase
        .execute(LoginInput {
            email: "admin@example.com".to_owned(),
            password: "not-the-password".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::InvalidCredentials));
}

#[tokio::test]
async fn should_reject_inactive_user_before_password_check() {
    let mut user = test_user("admin@example.com");
    user.is_active = false;
    let usecase = login_usecase(MockUserRepo::new(vec![user]), MockGrantRepo::empty());
    let err = usecase
        .execute(LoginInput {
            email: "admin@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::UserInactive));
}

#[tokio::test]
async fn should_fail_login_when_user_has_no_active_grants() {
    let user = test_user("admin@example.com");
    let usecase = login_usecase(MockUserRepo::new(vec![user]), MockGrantRepo::empty());
    let err = usecase
        .execute(LoginInput {
            email: "admin@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::NoRolesAssigned));
}

#[tokio::test]
async fn should_pick_primary_role_by_earliest_grant() {
    let user = test_user("admin@example.com");
    let first_role = test_role("principal");
    let second_role = test_role("teacher");
    let mut first_grant = test_grant(user.id, first_role.id, None);
    first_grant.granted_at = Utc::now() - Duration::days(30);
    let second_grant = test_grant(user.id, second_role.id, None);

    let usecase = login_usecase(
        MockUserRepo::new(vec![user]),
        MockGrantRepo::new(
            vec![second_grant, first_grant],
            vec![first_role.clone(), second_role],
            HashMap::new(),
        ),
    );
    let output = usecase
        .execute(LoginInput {
            email: "admin@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(output.active_context.role_id, first_role.id);
    assert_eq!(output.active_context.role_name, "principal");
}

#[tokio::test]
async fn should_scope_grants_to_home_tenant() {
    let school_id = uuid::Uuid::new_v4();
    let mut user = test_user("admin@example.com");
    user.school_id = Some(school_id);
    let role = test_role("principal");
    // Grant in a different tenant scope must not count.
    let foreign_grant = test_grant(user.id, role.id, Some(uuid::Uuid::new_v4()));

    let usecase = login_usecase(
        MockUserRepo::new(vec![user]),
        MockGrantRepo::new(vec![foreign_grant], vec![role], HashMap::new()),
    );
    let err = usecase
        .execute(LoginInput {
            email: "admin@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::NoRolesAssigned));
}
