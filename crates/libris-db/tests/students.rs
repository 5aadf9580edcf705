//! Student scenarios: sign-up, search, status, and profile.

mod common;

use libris_auth::AuthError;
use libris_core::enums::ActiveStatus;
use libris_db::bootstrap::FIXTURE_PASSWORD;
use libris_db::error::DatabaseError;
use libris_db::login::LoginOutcome;
use libris_db::repos::student::NewStudent;
use libris_db::updates::student::StudentProfileUpdateBuilder;
use pretty_assertions::assert_eq;
use rstest::rstest;

use common::{seeded_service, test_service};

fn sign_up(student_id: &str, email: &str) -> NewStudent {
    NewStudent {
        student_id: student_id.into(),
        full_name: "Test Student".into(),
        email: email.into(),
        mobile_number: Some("1234567890".into()),
        password: "Test@123".into(),
    }
}

// ---------------------------------------------------------------------------
// Sign-up
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_sign_up() {
    let svc = test_service().await;
    let student = svc
        .register_student(sign_up("STD001", "test@example.com"))
        .await
        .unwrap();

    let stored = svc.get_student_by_student_id("STD001").await.unwrap();
    assert_eq!(stored, student);
    assert_eq!(stored.full_name, "Test Student");
    assert_ne!(stored.password_hash, "Test@123", "password should be hashed");
}

enum Expect {
    Validation,
    WeakPassword,
}

#[rstest]
#[case::invalid_email("STD001", "Test Student", "invalid-email", "Test@123", Expect::Validation)]
#[case::short_password("STD002", "Test Student", "test2@example.com", "short", Expect::WeakPassword)]
#[case::empty_name("STD003", "", "test3@example.com", "Test@123", Expect::Validation)]
#[tokio::test]
async fn invalid_sign_up_rejected(
    #[case] student_id: &str,
    #[case] full_name: &str,
    #[case] email: &str,
    #[case] password: &str,
    #[case] expect: Expect,
) {
    let svc = test_service().await;
    let result = svc
        .register_student(NewStudent {
            student_id: student_id.into(),
            full_name: full_name.into(),
            email: email.into(),
            mobile_number: Some("1234567890".into()),
            password: password.into(),
        })
        .await;

    match expect {
        Expect::Validation => assert!(matches!(result, Err(DatabaseError::Validation(_)))),
        Expect::WeakPassword => assert!(matches!(
            result,
            Err(DatabaseError::Auth(AuthError::WeakPassword(_)))
        )),
    }
    assert!(matches!(
        svc.get_student_by_student_id(student_id).await,
        Err(DatabaseError::NoResult)
    ));
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let svc = test_service().await;
    svc.register_student(sign_up("STD101", "duplicate@example.com"))
        .await
        .unwrap();
    let err = svc
        .register_student(sign_up("STD102", "duplicate@example.com"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(), "{err}");
}

#[tokio::test]
async fn duplicate_email_in_other_case_rejected() {
    let svc = test_service().await;
    svc.register_student(sign_up("STD111", "casing@example.com"))
        .await
        .unwrap();
    let err = svc
        .register_student(sign_up("STD112", "Casing@Example.COM"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(), "{err}");
}

#[tokio::test]
async fn duplicate_student_id_in_other_case_rejected() {
    let svc = test_service().await;
    svc.register_student(sign_up("std301", "lower@example.com"))
        .await
        .unwrap();
    let err = svc
        .register_student(sign_up("STD301", "upper@example.com"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(), "{err}");
}

#[tokio::test]
async fn duplicate_student_id_rejected() {
    let svc = test_service().await;
    svc.register_student(sign_up("STD201", "first@example.com"))
        .await
        .unwrap();
    let err = svc
        .register_student(sign_up("STD201", "second@example.com"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation(), "{err}");
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_by_exact_id() {
    let (svc, seeded) = seeded_service().await;
    let student = svc.get_student_by_student_id("TEST001").await.unwrap();
    assert_eq!(student.id, seeded.student_ids[0]);
    assert_eq!(student.full_name, "Test Student 1");
}

#[tokio::test]
async fn search_by_prefix() {
    let (svc, _) = seeded_service().await;
    let found = svc.students_with_id_prefix("TEST").await.unwrap();
    let ids: Vec<_> = found.iter().map(|s| s.student_id.as_str()).collect();
    assert_eq!(ids, vec!["TEST001", "TEST002"]);
}

#[tokio::test]
async fn search_unknown_id() {
    let (svc, _) = seeded_service().await;
    assert!(matches!(
        svc.get_student_by_student_id("NOPE999").await,
        Err(DatabaseError::NoResult)
    ));
    assert!(svc.search_students("NOPE%").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_with_wildcards() {
    let (svc, _) = seeded_service().await;
    assert_eq!(svc.search_students("%").await.unwrap().len(), 2);
    assert_eq!(svc.search_students("TEST00_").await.unwrap().len(), 2);
    let one = svc.search_students("%002").await.unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].email, "student2@example.com");
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn block_student() {
    let (svc, seeded) = seeded_service().await;
    let student = svc.block_student(seeded.student_ids[0]).await.unwrap();
    assert_eq!(student.status, ActiveStatus::Inactive);
    assert!(student.updated_at.is_some());
}

#[tokio::test]
async fn activate_student() {
    let (svc, seeded) = seeded_service().await;
    svc.block_student(seeded.student_ids[1]).await.unwrap();
    let student = svc.activate_student(seeded.student_ids[1]).await.unwrap();
    assert_eq!(student.status, ActiveStatus::Active);
}

#[tokio::test]
async fn blocked_student_cannot_log_in() {
    let (svc, seeded) = seeded_service().await;
    svc.block_student(seeded.student_ids[0]).await.unwrap();
    let outcome = svc
        .authenticate_student("student1@example.com", FIXTURE_PASSWORD)
        .await
        .unwrap();
    assert_eq!(outcome, LoginOutcome::Inactive);
}

#[tokio::test]
async fn activated_student_can_log_in() {
    let (svc, seeded) = seeded_service().await;
    svc.block_student(seeded.student_ids[0]).await.unwrap();
    svc.activate_student(seeded.student_ids[0]).await.unwrap();
    let outcome = svc
        .authenticate_student("student1@example.com", FIXTURE_PASSWORD)
        .await
        .unwrap();
    assert!(outcome.is_success());
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_name_and_mobile() {
    let (svc, seeded) = seeded_service().await;
    let update = StudentProfileUpdateBuilder::new()
        .full_name("Updated Name")
        .mobile_number(Some("9876543210".into()))
        .build();
    let student = svc
        .update_student_profile(seeded.student_ids[0], update)
        .await
        .unwrap();
    assert_eq!(student.full_name, "Updated Name");
    assert_eq!(student.mobile_number.as_deref(), Some("9876543210"));
    assert!(student.updated_at.is_some());
}

#[rstest]
#[case("12345678901", true)]
#[case("1234567890", true)]
#[case("123456789", false)]
#[case("123456789012", false)]
#[case("12345abcde", false)]
#[tokio::test]
async fn mobile_number_length(#[case] mobile: &str, #[case] accepted: bool) {
    let (svc, seeded) = seeded_service().await;
    let update = StudentProfileUpdateBuilder::new()
        .mobile_number(Some(mobile.into()))
        .build();
    let result = svc
        .update_student_profile(seeded.student_ids[0], update)
        .await;
    if accepted {
        assert_eq!(result.unwrap().mobile_number.as_deref(), Some(mobile));
    } else {
        assert!(matches!(result, Err(DatabaseError::Validation(_))), "{mobile}");
    }
}

#[tokio::test]
async fn schema_rejects_overlong_mobile() {
    let (svc, seeded) = seeded_service().await;
    let err = svc
        .db()
        .execute(
            "UPDATE tblstudents SET MobileNumber = ?1 WHERE id = ?2",
            libsql::params!["123456789012", seeded.student_ids[0]],
        )
        .await
        .unwrap_err();
    assert!(err.is_check_violation(), "{err}");
}

#[tokio::test]
async fn email_cannot_be_changed_from_profile() {
    let (svc, seeded) = seeded_service().await;
    let original = svc.get_student(seeded.student_ids[0]).await.unwrap();

    let update = StudentProfileUpdateBuilder::new()
        .full_name("New Name")
        .build();
    let student = svc
        .update_student_profile(seeded.student_ids[0], update)
        .await
        .unwrap();

    assert_eq!(student.email, original.email);
    assert_eq!(student.full_name, "New Name");
}
