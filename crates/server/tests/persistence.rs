//! Database-backed service tests.
//!
//! These run the services against a real `PostgreSQL` instance and cover the
//! behavior that only shows up with live rows: unique-constraint conflicts,
//! cart quantity merging, recommendation exclusion, and history ordering.
//!
//! Set `SHOPLITE_TEST_DATABASE_URL` to a disposable database to enable them;
//! without it every test returns early. Migrations are applied on connect and
//! each test generates unique names and emails, so a shared database survives
//! repeated runs.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use shoplite_core::{InteractionKind, ProductId};
use shoplite_server::db::MIGRATOR;
use shoplite_server::db::products::{NewProduct, ProductRepository};
use shoplite_server::models::{Product, User};
use shoplite_server::services::auth::{AuthError, AuthService};
use shoplite_server::services::cart::CartService;
use shoplite_server::services::interaction::{InteractionError, InteractionService};
use shoplite_server::services::recommend::RecommendService;
use shoplite_server::services::token::TokenService;

const PASSWORD: &str = "long enough password";

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("SHOPLITE_TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");

    MIGRATOR.run(&pool).await.expect("apply migrations");

    Some(pool)
}

fn test_tokens() -> TokenService {
    let secret = SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6dE1");
    TokenService::new(&secret, Duration::from_secs(3600))
}

/// Unique per call, so tests can share one database.
fn unique_tag() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos()
}

async fn register_user(pool: &PgPool, tokens: &TokenService, label: &str) -> User {
    let tag = unique_tag();
    let auth = AuthService::new(pool, tokens, false);

    auth.register(
        &format!("{label}-{tag}"),
        &format!("{label}-{tag}@example.com"),
        PASSWORD,
        None,
    )
    .await
    .expect("register user")
}

async fn create_product(pool: &PgPool, label: &str, price: Decimal) -> Product {
    let tag = unique_tag();
    let products = ProductRepository::new(pool);

    products
        .create(&NewProduct {
            name: &format!("{label}-{tag}"),
            description: "test item",
            category: "test",
            price,
        })
        .await
        .expect("create product")
}

async fn delete_product(pool: &PgPool, id: ProductId) {
    sqlx::query("DELETE FROM shop.product WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("delete product");
}

#[tokio::test]
async fn registering_a_taken_email_conflicts() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();
    let auth = AuthService::new(&pool, &tokens, false);

    let tag = unique_tag();
    let email = format!("dup-{tag}@example.com");

    auth.register(&format!("dup-first-{tag}"), &email, PASSWORD, None)
        .await
        .expect("first registration");

    let second = auth
        .register(&format!("dup-second-{tag}"), &email, PASSWORD, None)
        .await;

    assert!(matches!(second, Err(AuthError::UserAlreadyExists(_))));
}

#[tokio::test]
async fn login_checks_the_password_and_binds_the_token() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();
    let auth = AuthService::new(&pool, &tokens, false);

    let user = register_user(&pool, &tokens, "login").await;

    let wrong = auth.login(user.email.as_str(), "not the password").await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    let token = auth
        .login(user.email.as_str(), PASSWORD)
        .await
        .expect("login with the right password");
    let subject = tokens.verify(&token).expect("verify issued token");
    assert_eq!(subject, user.id);
}

#[tokio::test]
async fn adding_the_same_product_twice_merges_the_line() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();

    let user = register_user(&pool, &tokens, "cart-merge").await;
    let product = create_product(&pool, "mug", Decimal::new(1250, 2)).await;
    let carts = CartService::new(&pool);

    carts
        .add_item(user.id, product.id, 2)
        .await
        .expect("first add");
    let view = carts
        .add_item(user.id, product.id, 3)
        .await
        .expect("second add");

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].quantity, 5);
    assert_eq!(view.total, Decimal::new(6250, 2));
}

#[tokio::test]
async fn removing_a_product_not_in_the_cart_changes_nothing() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();

    let user = register_user(&pool, &tokens, "cart-noop").await;
    let kept = create_product(&pool, "lamp", Decimal::new(900, 2)).await;
    let absent = create_product(&pool, "chair", Decimal::new(4500, 2)).await;
    let carts = CartService::new(&pool);

    carts
        .add_item(user.id, kept.id, 4)
        .await
        .expect("seed the cart");

    let view = carts
        .remove_by_product(user.id, absent.id)
        .await
        .expect("removing an absent line succeeds");

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].product_id, kept.id);
    assert_eq!(view.items[0].quantity, 4);
}

#[tokio::test]
async fn recommendations_never_include_the_requesters_own_products() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();

    let requester = register_user(&pool, &tokens, "rec-self").await;
    let other = register_user(&pool, &tokens, "rec-other").await;
    let own = create_product(&pool, "own", Decimal::new(100, 2)).await;
    let popular = create_product(&pool, "popular", Decimal::new(100, 2)).await;

    let interactions = InteractionService::new(&pool);
    interactions
        .record(requester.id, own.id, InteractionKind::View)
        .await
        .expect("record own interaction");
    for _ in 0..12 {
        interactions
            .record(other.id, popular.id, InteractionKind::Like)
            .await
            .expect("record popular interaction");
    }

    let recommend = RecommendService::new(&pool);
    let picks = recommend
        .recommend(requester.id)
        .await
        .expect("recommendations");

    assert!(!picks.is_empty());
    assert!(picks.iter().all(|p| p.id != own.id));

    // The heavily-interacted product is nobody else's, so the other user
    // must not see it either.
    let other_picks = recommend.recommend(other.id).await.expect("recommendations");
    assert!(other_picks.iter().all(|p| p.id != popular.id));
}

#[tokio::test]
async fn history_is_newest_first_and_skips_deleted_products() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();

    let user = register_user(&pool, &tokens, "history").await;
    let kept = create_product(&pool, "kept", Decimal::new(500, 2)).await;
    let doomed = create_product(&pool, "doomed", Decimal::new(500, 2)).await;

    let interactions = InteractionService::new(&pool);
    interactions
        .record(user.id, kept.id, InteractionKind::View)
        .await
        .expect("first record");
    tokio::time::sleep(Duration::from_millis(20)).await;
    interactions
        .record(user.id, doomed.id, InteractionKind::Like)
        .await
        .expect("second record");
    tokio::time::sleep(Duration::from_millis(20)).await;
    interactions
        .record(user.id, kept.id, InteractionKind::Purchase)
        .await
        .expect("third record");

    let history = interactions.history(user.id).await.expect("history");
    assert_eq!(history.len(), 3);
    assert!(history.windows(2).all(|w| w[0].recorded_at >= w[1].recorded_at));
    assert_eq!(history[0].product_id, kept.id);
    assert_eq!(history[0].kind, InteractionKind::Purchase);

    delete_product(&pool, doomed.id).await;

    let history = interactions.history(user.id).await.expect("history");
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|e| e.product_id == kept.id));
}

#[tokio::test]
async fn history_with_only_orphaned_entries_is_empty_not_an_error() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();

    let user = register_user(&pool, &tokens, "orphan").await;
    let product = create_product(&pool, "ghost", Decimal::new(300, 2)).await;

    let interactions = InteractionService::new(&pool);
    interactions
        .record(user.id, product.id, InteractionKind::View)
        .await
        .expect("record interaction");

    delete_product(&pool, product.id).await;

    let history = interactions.history(user.id).await.expect("orphans only");
    assert!(history.is_empty());
}

#[tokio::test]
async fn history_without_any_interactions_is_an_error() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();

    let user = register_user(&pool, &tokens, "silent").await;

    let interactions = InteractionService::new(&pool);
    let history = interactions.history(user.id).await;

    assert!(matches!(history, Err(InteractionError::EmptyHistory)));
}

#[tokio::test]
async fn an_explicit_null_clears_the_bio_while_absent_keeps_it() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let tokens = test_tokens();
    let auth = AuthService::new(&pool, &tokens, false);

    let user = register_user(&pool, &tokens, "bio").await;

    let user = auth
        .update_profile(user.id, None, None, Some(Some("likes tea".to_string())))
        .await
        .expect("set bio");
    assert_eq!(user.bio.as_deref(), Some("likes tea"));

    let renamed = format!("bio-renamed-{}", unique_tag());
    let user = auth
        .update_profile(user.id, Some(renamed.clone()), None, None)
        .await
        .expect("rename without touching bio");
    assert_eq!(user.name, renamed);
    assert_eq!(user.bio.as_deref(), Some("likes tea"));

    let user = auth
        .update_profile(user.id, None, None, Some(None))
        .await
        .expect("clear bio");
    assert_eq!(user.bio, None);
}
