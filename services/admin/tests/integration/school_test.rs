use chrono::Utc;
use uuid::Uuid;

use lyceum_admin::config::SchoolDefaults;
use lyceum_admin::error::AdminServiceError;
use lyceum_admin::usecase::school::{
    CreateSchoolInput, CreateSchoolUseCase, DeleteSchoolUseCase, GetSchoolUseCase,
    UpdateSchoolInput, UpdateSchoolUseCase,
};

use crate::helpers::{MockSchoolRepo, test_school};

fn defaults() -> SchoolDefaults {
    SchoolDefaults {
        country: "US".to_owned(),
        subscription_tier: "basic".to_owned(),
        max_teachers: 50,
        max_students: 1000,
    }
}

fn create_input(name: &str, code: &str) -> CreateSchoolInput {
    CreateSchoolInput {
        name: name.to_owned(),
        code: code.to_owned(),
        address: None,
        city: None,
        country: None,
        email: None,
        phone: None,
        subscription_tier: None,
        max_teachers: None,
        max_students: None,
        metadata: None,
    }
}

// ── CreateSchool ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_school_with_defaults() {
    let usecase = CreateSchoolUseCase {
        repo: MockSchoolRepo::empty(),
        defaults: defaults(),
    };
    let school = usecase
        .execute(create_input("Northfield High", "NORTH"))
        .await
        .unwrap();

    assert_eq!(school.country, "US");
    assert_eq!(school.subscription_tier, "basic");
    assert_eq!(school.max_teachers, 50);
    assert_eq!(school.max_students, 1000);
    assert!(school.is_active);
    assert_eq!(school.metadata, serde_json::json!({}));
}

#[tokio::test]
async fn should_not_override_explicit_values_with_defaults() {
    let usecase = CreateSchoolUseCase {
        repo: MockSchoolRepo::empty(),
        defaults: defaults(),
    };
    let mut input = create_input("Lycee Sud", "SUD01");
    input.country = Some("FR".to_owned());
    input.max_teachers = Some(10);
    let school = usecase.execute(input).await.unwrap();

    assert_eq!(school.country, "FR");
    assert_eq!(school.max_teachers, 10);
}

#[tokio::test]
async fn should_reject_short_name() {
    let usecase = CreateSchoolUseCase {
        repo: MockSchoolRepo::empty(),
        defaults: defaults(),
    };
    let err = usecase.execute(create_input("Ab", "CODE1")).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::Validation { field: "name", .. }));
}

#[tokio::test]
async fn should_reject_duplicate_code() {
    let existing = test_school("NORTH");
    let usecase = CreateSchoolUseCase {
        repo: MockSchoolRepo::new(vec![existing]),
        defaults: defaults(),
    };
    let err = usecase
        .execute(create_input("Another School", "NORTH"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::AlreadyExists { field: "code", .. }));
}

#[tokio::test]
async fn should_allow_code_reuse_after_soft_delete() {
    let mut tombstoned = test_school("NORTH");
    tombstoned.deleted_at = Some(Utc::now());
    let usecase = CreateSchoolUseCase {
        repo: MockSchoolRepo::new(vec![tombstoned]),
        defaults: defaults(),
    };
    let school = usecase
        .execute(create_input("Northfield High", "NORTH"))
        .await
        .unwrap();
    assert_eq!(school.code, "NORTH");
}

// ── Update / Delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_only_provided_fields() {
    let school = test_school("NORTH");
    let id = school.id;
    let usecase = UpdateSchoolUseCase {
        repo: MockSchoolRepo::new(vec![school.clone()]),
    };
    let updated = usecase
        .execute(
            id,
            UpdateSchoolInput {
                city: Some("Springfield".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.city.as_deref(), Some("Springfield"));
    assert_eq!(updated.name, school.name);
    assert_eq!(updated.code, school.code);
}

#[tokio::test]
async fn should_hide_soft_deleted_school_from_reads() {
    let school = test_school("NORTH");
    let id = school.id;
    let repo = MockSchoolRepo::new(vec![school]);
    let handle = repo.handle();

    DeleteSchoolUseCase { repo }.execute(id).await.unwrap();
    assert!(handle.lock().unwrap()[0].deleted_at.is_some());

    let err = GetSchoolUseCase {
        repo: MockSchoolRepo {
            schools: handle,
        },
    }
    .execute(id)
    .await
    .unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("school")));
}

#[tokio::test]
async fn should_return_not_found_when_deleting_twice() {
    let mut school = test_school("NORTH");
    school.deleted_at = Some(Utc::now());
    let id = school.id;
    let usecase = DeleteSchoolUseCase {
        repo: MockSchoolRepo::new(vec![school]),
    };
    let err = usecase.execute(id).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("school")));
}

#[tokio::test]
async fn should_return_not_found_for_missing_school() {
    let usecase = GetSchoolUseCase {
        repo: MockSchoolRepo::empty(),
    };
    let err = usecase.execute(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("school")));
}
