//! End-to-end flow: register, sign in, address, cart, checkout.

use minimart_core::models::{Account, AddressDraft, OrderStatus, PaymentMethod, Product};
use minimart_core::{CheckoutError, ServiceError, Shop};

fn draft_address() -> AddressDraft {
    AddressDraft {
        recipient_name: "Alice".to_string(),
        phone: "13800138000".to_string(),
        full_address: "42 Example Road, Example City".to_string(),
        is_default: true,
    }
}

fn product(id: u32, price: i64) -> Product {
    Product {
        id,
        name: format!("product-{id}"),
        price,
        image: String::new(),
        description: String::new(),
    }
}

async fn signed_in_shop() -> Shop {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let shop = Shop::in_memory();
    shop.accounts
        .register(Account::new("alice", "secret123"))
        .await
        .unwrap();
    shop.sign_in("alice", "secret123").await.unwrap();
    shop
}

#[tokio::test]
async fn full_purchase_flow() {
    let shop = signed_in_shop().await;

    shop.addresses.add("alice", draft_address()).await.unwrap();
    let address = shop.addresses.get_default("alice").await.unwrap();
    assert!(address.is_some());

    shop.session.cart().add_item(product(1, 100), 2);
    shop.session.cart().add_item(product(2, 200), 3);

    let receipt = shop
        .checkout
        .checkout(address, PaymentMethod::Wechat)
        .await
        .unwrap();

    assert_eq!(receipt.total_price, 800);
    assert_eq!(receipt.item_count, 2);
    assert!(shop.session.cart().is_empty());

    let order = shop
        .orders
        .find_by_id("alice", &receipt.order_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.payment_method, PaymentMethod::Wechat);
    assert_eq!(order.shipping_address.recipient_name, "Alice");

    let stats = shop.profile_stats().await.unwrap();
    assert_eq!(stats.order_count, 1);
    assert_eq!(stats.address_count, 1);
    assert_eq!(stats.favorite_count, 0);

    let order_stats = shop.orders.stats("alice").await.unwrap();
    assert_eq!(order_stats.total, 1);
    assert_eq!(order_stats.paid, 1);
    assert_eq!(order_stats.completed, 0);
}

#[tokio::test]
async fn checkout_without_address_leaves_cart_intact() {
    let shop = signed_in_shop().await;
    shop.session.cart().add_item(product(1, 100), 1);

    let err = shop
        .checkout
        .checkout(None, PaymentMethod::Alipay)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NoAddress));
    assert_eq!(shop.session.cart().items().len(), 1);
    assert!(shop.orders.list("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn favorites_survive_sign_out() {
    let shop = signed_in_shop().await;

    shop.favorites.toggle("alice", 1).await.unwrap();
    shop.sign_out();

    shop.sign_in("alice", "secret123").await.unwrap();
    assert!(shop.favorites.contains("alice", 1).await.unwrap());
}

#[tokio::test]
async fn second_user_sees_only_own_records() {
    let shop = signed_in_shop().await;
    shop.addresses.add("alice", draft_address()).await.unwrap();
    shop.favorites.add("alice", 3).await.unwrap();
    shop.sign_out();

    shop.accounts
        .register(Account::new("bob", "hunter2222"))
        .await
        .unwrap();
    shop.sign_in("bob", "hunter2222").await.unwrap();

    let stats = shop.profile_stats().await.unwrap();
    assert_eq!(stats, minimart_core::ProfileStats::default());
    assert!(shop.addresses.list("bob").await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let shop = Shop::in_memory();
    shop.accounts
        .register(Account::new("alice", "secret123"))
        .await
        .unwrap();

    let err = shop
        .accounts
        .register(Account::new("alice", "other-pass"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}
