use uuid::Uuid;

use lyceum_admin::error::AdminServiceError;
use lyceum_admin::usecase::guardian::{
    CreateGuardianRelationInput, CreateGuardianRelationUseCase, DeactivateGuardianRelationUseCase,
    ListStudentGuardiansUseCase,
};

use crate::helpers::{MockGuardianRepo, MockUserRepo, test_user};

// ── CreateGuardianRelation ───────────────────────────────────────────────────

#[tokio::test]
async fn should_create_guardian_relation() {
    let guardian = test_user("parent@example.com");
    let student = test_user("kid@example.com");
    let input = CreateGuardianRelationInput {
        guardian_id: guardian.id,
        student_id: student.id,
        relation_type: Some("parent".to_owned()),
    };
    let usecase = CreateGuardianRelationUseCase {
        guardians: MockGuardianRepo::empty(),
        users: MockUserRepo::new(vec![guardian, student]),
    };
    let relation = usecase.execute(input).await.unwrap();
    assert!(relation.is_active);
    assert_eq!(relation.relation_type.as_deref(), Some("parent"));
}

#[tokio::test]
async fn should_reject_self_guardianship() {
    let user = test_user("parent@example.com");
    let user_id = user.id;
    let usecase = CreateGuardianRelationUseCase {
        guardians: MockGuardianRepo::empty(),
        users: MockUserRepo::new(vec![user]),
    };
    let err = usecase
        .execute(CreateGuardianRelationInput {
            guardian_id: user_id,
            student_id: user_id,
            relation_type: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdminServiceError::Validation {
            field: "student_id",
            ..
        }
    ));
}

#[tokio::test]
async fn should_reject_relation_for_missing_student() {
    let guardian = test_user("parent@example.com");
    let guardian_id = guardian.id;
    let usecase = CreateGuardianRelationUseCase {
        guardians: MockGuardianRepo::empty(),
        users: MockUserRepo::new(vec![guardian]),
    };
    let err = usecase
        .execute(CreateGuardianRelationInput {
            guardian_id,
            student_id: Uuid::new_v4(),
            relation_type: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("user")));
}

#[tokio::test]
async fn should_reject_duplicate_active_pair() {
    let guardian = test_user("parent@example.com");
    let student = test_user("kid@example.com");
    let input = |g, s| CreateGuardianRelationInput {
        guardian_id: g,
        student_id: s,
        relation_type: None,
    };
    let usecase = CreateGuardianRelationUseCase {
        guardians: MockGuardianRepo::empty(),
        users: MockUserRepo::new(vec![guardian.clone(), student.clone()]),
    };
    usecase.execute(input(guardian.id, student.id)).await.unwrap();
    let err = usecase
        .execute(input(guardian.id, student.id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdminServiceError::AlreadyExists {
            field: "guardian_relation",
            ..
        }
    ));
}

#[tokio::test]
async fn should_allow_new_relation_after_deactivation() {
    let guardian = test_user("parent@example.com");
    let student = test_user("kid@example.com");
    let usecase = CreateGuardianRelationUseCase {
        guardians: MockGuardianRepo::empty(),
        users: MockUserRepo::new(vec![guardian.clone(), student.clone()]),
    };
    let relation = usecase
        .execute(CreateGuardianRelationInput {
            guardian_id: guardian.id,
            student_id: student.id,
            relation_type: None,
        })
        .await
        .unwrap();

    DeactivateGuardianRelationUseCase {
        guardians: MockGuardianRepo {
            relations: usecase.guardians.handle(),
        },
    }
    .execute(relation.id)
    .await
    .unwrap();

    usecase
        .execute(CreateGuardianRelationInput {
            guardian_id: guardian.id,
            student_id: student.id,
            relation_type: None,
        })
        .await
        .unwrap();
}

// ── List / Deactivate ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_active_relations_for_student() {
    let guardian = test_user("parent@example.com");
    let other_guardian = test_user("aunt@example.com");
    let student = test_user("kid@example.com");
    let usecase = CreateGuardianRelationUseCase {
        guardians: MockGuardianRepo::empty(),
        users: MockUserRepo::new(vec![
            guardian.clone(),
            other_guardian.clone(),
            student.clone(),
        ]),
    };
    let first = usecase
        .execute(CreateGuardianRelationInput {
            guardian_id: guardian.id,
            student_id: student.id,
            relation_type: None,
        })
        .await
        .unwrap();
    usecase
        .execute(CreateGuardianRelationInput {
            guardian_id: other_guardian.id,
            student_id: student.id,
            relation_type: None,
        })
        .await
        .unwrap();
    let handle = usecase.guardians.handle();

    DeactivateGuardianRelationUseCase {
        guardians: MockGuardianRepo {
            relations: std::sync::Arc::clone(&handle),
        },
    }
    .execute(first.id)
    .await
    .unwrap();

    let list = ListStudentGuardiansUseCase {
        guardians: MockGuardianRepo { relations: handle },
    }
    .execute(student.id)
    .await
    .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].guardian_id, other_guardian.id);
}

#[tokio::test]
async fn should_return_not_found_when_deactivating_twice() {
    let usecase = DeactivateGuardianRelationUseCase {
        guardians: MockGuardianRepo::empty(),
    };
    let err = usecase.execute(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AdminServiceError::NotFound("guardian relation")));
}
