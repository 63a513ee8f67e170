use std::sync::Arc;

use sea_orm::EntityTrait;

use cafedex::config::SecurityConfig;
use cafedex::db::Store;
use cafedex::entities::users;
use cafedex::models::cafe::NewCafe;
use cafedex::models::user::Role;
use cafedex::services::{
    AccountError, AccountService, DirectoryError, DirectoryService, SeaOrmAccountService,
    SeaOrmDirectoryService,
};

const ADMIN_TOKEN: &str = "open-sesame";

async fn test_store() -> Store {
    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open in-memory store")
}

fn test_security() -> SecurityConfig {
    SecurityConfig {
        // Keep test hashing cheap.
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
        admin_promotion_token: Some(ADMIN_TOKEN.to_string()),
    }
}

async fn test_services() -> (Store, Arc<SeaOrmAccountService>, Arc<SeaOrmDirectoryService>) {
    let store = test_store().await;
    let accounts = Arc::new(SeaOrmAccountService::new(store.clone(), test_security()));
    let directory = Arc::new(SeaOrmDirectoryService::new(store.clone()));
    (store, accounts, directory)
}

fn sample_cafe(name: &str, location: &str) -> NewCafe {
    NewCafe {
        name: name.to_string(),
        map_url: "https://maps.example.com/cafe".to_string(),
        img_url: "https://img.example.com/cafe.jpg".to_string(),
        location: location.to_string(),
        seats: "20-30".to_string(),
        has_toilet: true,
        has_wifi: true,
        has_sockets: false,
        can_take_calls: false,
        coffee_price: Some("$3".to_string()),
    }
}

#[tokio::test]
async fn registration_never_stores_the_plaintext_password() {
    let (store, accounts, _) = test_services().await;

    let user = accounts
        .register("maria", "maria@example.com", "hunter2longer")
        .await
        .unwrap();
    assert_eq!(user.role, Role::User);

    let stored = users::Entity::find_by_id(user.id)
        .one(&store.conn)
        .await
        .unwrap()
        .unwrap();

    assert_ne!(stored.password_hash, "hunter2longer");
    assert!(stored.password_hash.starts_with("$argon2"));

    // And the hash still verifies the original password.
    let verified = store
        .verify_user_credentials("maria@example.com", "hunter2longer")
        .await
        .unwrap();
    assert!(verified.is_some());
}

#[tokio::test]
async fn duplicate_email_creates_no_second_user() {
    let (store, accounts, _) = test_services().await;

    accounts
        .register("maria", "maria@example.com", "hunter2longer")
        .await
        .unwrap();

    let err = accounts
        .register("imposter", "maria@example.com", "other-password")
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::DuplicateEmail));
    assert_eq!(store.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn promotion_token_elevates_once_and_sticks() {
    let (_, accounts, _) = test_services().await;

    accounts
        .register("maria", "maria@example.com", "hunter2longer")
        .await
        .unwrap();

    let outcome = accounts
        .login("maria@example.com", "hunter2longer", Some(ADMIN_TOKEN))
        .await
        .unwrap();
    assert!(outcome.promoted);
    assert_eq!(outcome.user.role, Role::Admin);

    // Later logins keep the role regardless of the code supplied.
    let outcome = accounts
        .login("maria@example.com", "hunter2longer", None)
        .await
        .unwrap();
    assert!(!outcome.promoted);
    assert_eq!(outcome.user.role, Role::Admin);

    let outcome = accounts
        .login("maria@example.com", "hunter2longer", Some("wrong-code"))
        .await
        .unwrap();
    assert!(!outcome.promoted);
    assert_eq!(outcome.user.role, Role::Admin);
}

#[tokio::test]
async fn wrong_code_does_not_promote() {
    let (_, accounts, _) = test_services().await;

    accounts
        .register("maria", "maria@example.com", "hunter2longer")
        .await
        .unwrap();

    let outcome = accounts
        .login("maria@example.com", "hunter2longer", Some("wrong-code"))
        .await
        .unwrap();

    assert!(!outcome.promoted);
    assert_eq!(outcome.user.role, Role::User);
}

#[tokio::test]
async fn failed_login_leaves_the_role_unchanged() {
    let (_, accounts, _) = test_services().await;

    let user = accounts
        .register("maria", "maria@example.com", "hunter2longer")
        .await
        .unwrap();

    let err = accounts
        .login("maria@example.com", "wrong-password", Some(ADMIN_TOKEN))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidCredentials));

    let reloaded = accounts.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, Role::User);
}

#[tokio::test]
async fn unknown_email_fails_with_invalid_credentials() {
    let (_, accounts, _) = test_services().await;

    let err = accounts
        .login("ghost@example.com", "whatever-pw", None)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::InvalidCredentials));
}

#[tokio::test]
async fn random_one_over_empty_directory_fails() {
    let (_, _, directory) = test_services().await;

    let err = directory.random_one().await.unwrap_err();
    assert!(matches!(err, DirectoryError::EmptyDirectory));
}

#[tokio::test]
async fn random_one_over_a_single_cafe_always_returns_it() {
    let (_, accounts, directory) = test_services().await;

    let admin = accounts
        .register("root", "root@example.com", "hunter2longer")
        .await
        .unwrap();

    directory
        .add_cafe(sample_cafe("Only One", "Paris"), admin.id)
        .await
        .unwrap();

    for _ in 0..5 {
        let cafe = directory.random_one().await.unwrap();
        assert_eq!(cafe.name, "Only One");
    }
}

#[tokio::test]
async fn location_search_is_exact() {
    let (_, accounts, directory) = test_services().await;

    let admin = accounts
        .register("root", "root@example.com", "hunter2longer")
        .await
        .unwrap();

    directory
        .add_cafe(sample_cafe("Blue Bottle", "Paris"), admin.id)
        .await
        .unwrap();
    directory
        .add_cafe(sample_cafe("Monmouth", "London"), admin.id)
        .await
        .unwrap();
    directory
        .add_cafe(sample_cafe("Le Peloton", "Paris Marais"), admin.id)
        .await
        .unwrap();

    let results = directory.search_by_location("Paris").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Blue Bottle");

    let results = directory.search_by_location("Oslo").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn duplicate_cafe_name_leaves_the_directory_unchanged() {
    let (store, accounts, directory) = test_services().await;

    let admin = accounts
        .register("root", "root@example.com", "hunter2longer")
        .await
        .unwrap();

    directory
        .add_cafe(sample_cafe("Blue Bottle", "Paris"), admin.id)
        .await
        .unwrap();

    let err = directory
        .add_cafe(sample_cafe("Blue Bottle", "London"), admin.id)
        .await
        .unwrap_err();

    assert!(matches!(err, DirectoryError::DuplicateName(ref name) if name == "Blue Bottle"));
    assert_eq!(store.count_cafes().await.unwrap(), 1);
}

#[tokio::test]
async fn deleting_an_unknown_cafe_changes_nothing() {
    let (store, accounts, directory) = test_services().await;

    let admin = accounts
        .register("root", "root@example.com", "hunter2longer")
        .await
        .unwrap();

    directory
        .add_cafe(sample_cafe("Blue Bottle", "Paris"), admin.id)
        .await
        .unwrap();

    let err = directory.delete_cafe(9999).await.unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound(9999)));
    assert_eq!(store.count_cafes().await.unwrap(), 1);
}

#[tokio::test]
async fn price_update_is_visible_on_the_next_fetch() {
    let (_, accounts, directory) = test_services().await;

    let admin = accounts
        .register("root", "root@example.com", "hunter2longer")
        .await
        .unwrap();

    let cafe = directory
        .add_cafe(sample_cafe("Blue Bottle", "Paris"), admin.id)
        .await
        .unwrap();
    assert_eq!(cafe.coffee_price.as_deref(), Some("$3"));

    let updated = directory.update_price(cafe.id, "$4").await.unwrap();
    assert_eq!(updated.coffee_price.as_deref(), Some("$4"));

    let fetched = directory.get(cafe.id).await.unwrap().unwrap();
    assert_eq!(fetched.coffee_price.as_deref(), Some("$4"));
}

#[tokio::test]
async fn updating_the_price_of_an_unknown_cafe_fails() {
    let (_, _, directory) = test_services().await;

    let err = directory.update_price(9999, "$4").await.unwrap_err();
    assert!(matches!(err, DirectoryError::NotFound(9999)));
}

#[tokio::test]
async fn deleting_a_user_clears_authorship_but_keeps_the_cafe() {
    let (_, accounts, directory) = test_services().await;

    let admin = accounts
        .register("root", "root@example.com", "hunter2longer")
        .await
        .unwrap();

    let cafe = directory
        .add_cafe(sample_cafe("Blue Bottle", "Paris"), admin.id)
        .await
        .unwrap();
    assert_eq!(cafe.author_id, Some(admin.id));

    accounts.delete_user(admin.id).await.unwrap();

    let orphaned = directory.get(cafe.id).await.unwrap().unwrap();
    assert_eq!(orphaned.author_id, None);
}

#[tokio::test]
async fn deleting_an_unknown_user_fails_with_not_found() {
    let (_, accounts, _) = test_services().await;

    let err = accounts.delete_user(9999).await.unwrap_err();
    assert!(matches!(err, AccountError::NotFound(9999)));
}
