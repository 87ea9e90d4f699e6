use argon2::password_hash::PasswordHash;

use vitrex_auth_types::policy::AdminPolicy;
use vitrex_domain::pagination::PageRequest;
use vitrex_domain::role::Role;
use vitrex_leads::error::LeadsServiceError;
use vitrex_leads::usecase::user::{
    DeleteUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetAdminUseCase,
};

use crate::helpers::{MAIN_ADMIN, MockUserRepo, test_user};

fn register_input(password: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: " Claire.Moreau@Example.fr ".to_owned(),
        password: password.to_owned(),
        first_name: "Claire".to_owned(),
        last_name: "Moreau".to_owned(),
        phone: None,
    }
}

#[tokio::test]
async fn should_register_customer_with_hashed_password() {
    let users = MockUserRepo::empty();
    let stored = users.users_handle();
    let uc = RegisterUserUseCase {
        users,
        policy: AdminPolicy::new(MAIN_ADMIN),
    };

    let user = uc.execute(register_input("s3cret-pass")).await.unwrap();

    assert_eq!(user.email, "claire.moreau@example.fr");
    assert!(!user.is_admin);
    assert_ne!(user.password_hash, "s3cret-pass");
    assert!(PasswordHash::new(&user.password_hash).is_ok());
    assert_eq!(stored.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_short_password() {
    let uc = RegisterUserUseCase {
        users: MockUserRepo::empty(),
        policy: AdminPolicy::new(MAIN_ADMIN),
    };

    let result = uc.execute(register_input("short")).await;

    match result {
        Err(LeadsServiceError::InvalidPayload(e)) => assert!(e.fields.contains("password")),
        other => panic!("expected InvalidPayload, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let uc = RegisterUserUseCase {
        users: MockUserRepo::new(vec![test_user("claire.moreau@example.fr", false)]),
        policy: AdminPolicy::new(MAIN_ADMIN),
    };

    let result = uc.execute(register_input("s3cret-pass")).await;

    assert!(matches!(result, Err(LeadsServiceError::UserEmailTaken)));
}

#[tokio::test]
async fn should_refuse_registration_with_main_admin_email() {
    let users = MockUserRepo::empty();
    let stored = users.users_handle();
    let uc = RegisterUserUseCase {
        users,
        policy: AdminPolicy::new(MAIN_ADMIN),
    };

    let mut input = register_input("s3cret-pass");
    input.email = " Direction@Vitrex.fr ".to_owned();
    let result = uc.execute(input).await;

    assert!(
        matches!(result, Err(LeadsServiceError::ProtectedAccount)),
        "expected ProtectedAccount, got {result:?}"
    );
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_list_users_with_derived_roles() {
    let uc = ListUsersUseCase {
        users: MockUserRepo::new(vec![
            test_user(MAIN_ADMIN, true),
            test_user("admin@vitrex.fr", true),
            test_user("client@example.fr", false),
        ]),
        policy: AdminPolicy::new(MAIN_ADMIN),
    };

    let page = uc.execute(PageRequest::default()).await.unwrap();

    let roles: Vec<Role> = page.items.iter().map(|u| u.role).collect();
    assert_eq!(roles, vec![Role::MainAdmin, Role::Admin, Role::Customer]);
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn should_promote_and_demote_regular_user() {
    let user = test_user("client@example.fr", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let stored = users.users_handle();
    let uc = SetAdminUseCase {
        users,
        policy: AdminPolicy::new(MAIN_ADMIN),
    };

    uc.execute(user.id, true).await.unwrap();
    assert!(stored.lock().unwrap()[0].is_admin);

    uc.execute(user.id, false).await.unwrap();
    assert!(!stored.lock().unwrap()[0].is_admin);
}

#[tokio::test]
async fn should_protect_main_admin_from_demotion_and_deletion() {
    let main = test_user(MAIN_ADMIN, true);
    let users = MockUserRepo::new(vec![main.clone()]);
    let stored = users.users_handle();

    let demote = SetAdminUseCase {
        users: users.clone(),
        policy: AdminPolicy::new(MAIN_ADMIN),
    };
    let result = demote.execute(main.id, false).await;
    assert!(
        matches!(result, Err(LeadsServiceError::ProtectedAccount)),
        "expected ProtectedAccount, got {result:?}"
    );

    let delete = DeleteUserUseCase {
        users,
        policy: AdminPolicy::new(MAIN_ADMIN),
    };
    let result = delete.execute(main.id).await;
    assert!(matches!(result, Err(LeadsServiceError::ProtectedAccount)));

    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].is_admin);
}

#[tokio::test]
async fn should_delete_regular_user() {
    let user = test_user("client@example.fr", false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let stored = users.users_handle();
    let uc = DeleteUserUseCase {
        users,
        policy: AdminPolicy::new(MAIN_ADMIN),
    };

    uc.execute(user.id).await.unwrap();

    assert!(stored.lock().unwrap().is_empty());
    assert!(matches!(
        uc.execute(user.id).await,
        Err(LeadsServiceError::UserNotFound)
    ));
}
