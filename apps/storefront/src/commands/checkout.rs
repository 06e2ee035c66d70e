//! # Checkout Commands
//!
//! The three-step wizard and order placement.
//!
//! ## Wizard Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   ┌────────────┐  next_step   ┌────────────┐  next_step   ┌──────────┐  │
//! │   │ 1 Shipping │─────────────►│ 2 Payment  │─────────────►│ 3 Review │  │
//! │   │   form     │◄─────────────│   method   │◄─────────────│          │  │
//! │   └────────────┘  prev_step   └────────────┘  prev_step   └────┬─────┘  │
//! │         ▲                                                      │        │
//! │         └──────────── go_to_step (backwards only) ─────────────┤        │
//! │                                                                │        │
//! │                                                        place_order      │
//! │                                                                │        │
//! │                                       Order created, cart cleared,      │
//! │                                       wizard reset to step 1            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{
    Checkout, CheckoutStep, CoreError, NewOrder, Order, OrderTotals, PaymentMethod,
    ShippingInfoPatch,
};
use storefront_store::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::{CartState, CheckoutState, ConfigState, OrderState};

/// Wizard state plus the totals the review step shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    #[serde(flatten)]
    pub checkout: Checkout,
    pub step_number: u8,
    pub totals: OrderTotals,
}

impl CheckoutResponse {
    fn new(checkout: &Checkout, totals: OrderTotals) -> Self {
        CheckoutResponse {
            checkout: checkout.clone(),
            step_number: checkout.step.number(),
            totals,
        }
    }
}

/// Totals for whatever is in the cart right now.
async fn current_totals<S: KeyValueStore>(config: &ConfigState, cart: &CartState<S>) -> OrderTotals {
    let subtotal = cart.lock().await.cart().total_price();
    OrderTotals::compute(subtotal, &config.pricing_policy())
}

pub async fn get_checkout<S: KeyValueStore>(
    config: &ConfigState,
    cart: &CartState<S>,
    checkout: &CheckoutState,
) -> CheckoutResponse {
    debug!("get_checkout command");
    let totals = current_totals(config, cart).await;
    CheckoutResponse::new(&checkout.snapshot().await, totals)
}

/// Merges form fields into the shipping info.
pub async fn set_shipping_info<S: KeyValueStore>(
    config: &ConfigState,
    cart: &CartState<S>,
    checkout: &CheckoutState,
    patch: ShippingInfoPatch,
) -> CheckoutResponse {
    debug!("set_shipping_info command");
    let totals = current_totals(config, cart).await;
    let mut wizard = checkout.lock().await;
    wizard.set_shipping_info(patch);
    CheckoutResponse::new(&wizard, totals)
}

/// Selects a payment method by id (`credit_card`, `e_wallet`,
/// `bank_transfer`).
pub async fn set_payment_method<S: KeyValueStore>(
    config: &ConfigState,
    cart: &CartState<S>,
    checkout: &CheckoutState,
    method: &str,
) -> Result<CheckoutResponse, ApiError> {
    debug!(method = %method, "set_payment_method command");
    let method: PaymentMethod = method.parse()?;

    let totals = current_totals(config, cart).await;
    let mut wizard = checkout.lock().await;
    wizard.set_payment_method(method);
    Ok(CheckoutResponse::new(&wizard, totals))
}

/// Advances one step.
///
/// ## Errors
/// A validation error carrying the per-field messages when the current step
/// is incomplete. The wizard keeps the same messages in `errors`.
pub async fn next_step<S: KeyValueStore>(
    config: &ConfigState,
    cart: &CartState<S>,
    checkout: &CheckoutState,
) -> Result<CheckoutResponse, ApiError> {
    let totals = current_totals(config, cart).await;
    let mut wizard = checkout.lock().await;

    match wizard.next_step() {
        Ok(step) => {
            debug!(step = step.number(), "Checkout advanced");
            Ok(CheckoutResponse::new(&wizard, totals))
        }
        Err(fields) => {
            debug!(step = wizard.step.number(), errors = fields.len(), "Checkout step blocked");
            Err(ApiError::form(
                format!("Please fix: {}", fields.summary()),
                fields,
            ))
        }
    }
}

pub async fn prev_step<S: KeyValueStore>(
    config: &ConfigState,
    cart: &CartState<S>,
    checkout: &CheckoutState,
) -> CheckoutResponse {
    let totals = current_totals(config, cart).await;
    let mut wizard = checkout.lock().await;
    wizard.prev_step();
    CheckoutResponse::new(&wizard, totals)
}

/// Jumps back to an earlier step.
///
/// ## Errors
/// A validation error when `step` is ahead of the current one.
pub async fn go_to_step<S: KeyValueStore>(
    config: &ConfigState,
    cart: &CartState<S>,
    checkout: &CheckoutState,
    step: CheckoutStep,
) -> Result<CheckoutResponse, ApiError> {
    let totals = current_totals(config, cart).await;
    let mut wizard = checkout.lock().await;

    if !wizard.go_to_step(step) {
        return Err(ApiError::validation(format!(
            "Cannot jump ahead to step {}",
            step.number()
        )));
    }
    Ok(CheckoutResponse::new(&wizard, totals))
}

pub async fn reset_checkout(checkout: &CheckoutState) -> Checkout {
    debug!("reset_checkout command");
    let mut wizard = checkout.lock().await;
    wizard.reset();
    wizard.clone()
}

/// Places an order from the cart and the finished wizard.
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  lock cart → lock checkout → lock orders                               │
/// │       │                                                                 │
/// │       ├── cart empty?                    → CART_ERROR                   │
/// │       ├── wizard not on review / invalid → VALIDATION_ERROR + fields    │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  totals = subtotal + shipping + tax      (pricing policy from config)  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  simulated latency                                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  create order → clear cart → reset wizard                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The three writes are separate snapshots. A crash between them can leave
/// an order with a still-full cart.
pub async fn place_order<S: KeyValueStore>(
    config: &ConfigState,
    cart: &CartState<S>,
    checkout: &CheckoutState,
    orders: &OrderState<S>,
) -> Result<Order, ApiError> {
    let mut cart = cart.lock().await;
    let mut wizard = checkout.lock().await;

    if cart.cart().is_empty() {
        warn!("place_order with an empty cart");
        return Err(CoreError::EmptyCart.into());
    }

    let (shipping_info, payment_method) = wizard.ready_to_place()?;
    let totals = wizard.order_totals(cart.cart().total_price(), &config.pricing_policy());
    let new_order = NewOrder::from_cart(cart.cart(), shipping_info, payment_method, totals);

    let latency = config.order_latency();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let order = orders.lock().await.create_order(new_order).await;

    cart.clear().await;
    wizard.reset();

    info!(
        order_id = %order.id,
        payment_method = %order.payment_method,
        total = order.total,
        "Order placed"
    );
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use crate::state::CatalogState;
    use storefront_core::{AddOptions, OrderStatus, PaymentStatus};
    use storefront_store::MemoryStore;

    struct Fixture {
        config: ConfigState,
        catalog: CatalogState,
        cart: CartState<MemoryStore>,
        checkout: CheckoutState,
        orders: OrderState<MemoryStore>,
    }

    async fn fixture() -> Fixture {
        let kv = MemoryStore::new();
        Fixture {
            config: ConfigState {
                order_latency_ms: 0,
                ..ConfigState::default()
            },
            catalog: CatalogState::mock(),
            cart: CartState::load(kv.clone()).await,
            checkout: CheckoutState::new(),
            orders: OrderState::load(kv).await,
        }
    }

    fn filled_form() -> ShippingInfoPatch {
        ShippingInfoPatch {
            first_name: Some("Sari".to_string()),
            last_name: Some("Wijaya".to_string()),
            email: Some("sari@example.com".to_string()),
            phone: Some("081234567890".to_string()),
            address: Some("Jl. Merdeka No. 10".to_string()),
            city: Some("Bandung".to_string()),
            zip_code: Some("40111".to_string()),
            ..Default::default()
        }
    }

    async fn walk_to_review(f: &Fixture) {
        set_shipping_info(&f.config, &f.cart, &f.checkout, filled_form()).await;
        next_step(&f.config, &f.cart, &f.checkout).await.unwrap();
        set_payment_method(&f.config, &f.cart, &f.checkout, "bank_transfer")
            .await
            .unwrap();
        next_step(&f.config, &f.cart, &f.checkout).await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_form_blocks_step_one() {
        let f = fixture().await;
        let err = next_step(&f.config, &f.cart, &f.checkout).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        let fields = err.fields.unwrap();
        assert!(fields.contains("email"));
        assert!(fields.contains("zipCode"));

        let state = get_checkout(&f.config, &f.cart, &f.checkout).await;
        assert_eq!(state.checkout.step, CheckoutStep::Shipping);
        assert!(!state.checkout.errors.is_empty());
    }

    #[tokio::test]
    async fn test_payment_step_needs_method() {
        let f = fixture().await;
        set_shipping_info(&f.config, &f.cart, &f.checkout, filled_form()).await;
        next_step(&f.config, &f.cart, &f.checkout).await.unwrap();

        let err = next_step(&f.config, &f.cart, &f.checkout).await.unwrap_err();
        assert!(err.fields.unwrap().contains("paymentMethod"));

        let err = set_payment_method(&f.config, &f.cart, &f.checkout, "cash")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_go_to_step_only_backwards() {
        let f = fixture().await;
        let err = go_to_step(&f.config, &f.cart, &f.checkout, CheckoutStep::Review)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        walk_to_review(&f).await;
        let state = go_to_step(&f.config, &f.cart, &f.checkout, CheckoutStep::Shipping)
            .await
            .unwrap();
        assert_eq!(state.step_number, 1);
        assert_eq!(state.checkout.shipping_info.city, "Bandung");
    }

    #[tokio::test]
    async fn test_place_order_with_empty_cart() {
        let f = fixture().await;
        walk_to_review(&f).await;

        let err = place_order(&f.config, &f.cart, &f.checkout, &f.orders)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert!(f.orders.lock().await.list().is_empty());
    }

    #[tokio::test]
    async fn test_place_order_before_review() {
        let f = fixture().await;
        add_to_cart(&f.catalog, &f.cart, "bag-tote-05", AddOptions::default())
            .await
            .unwrap();
        set_shipping_info(&f.config, &f.cart, &f.checkout, filled_form()).await;

        let err = place_order(&f.config, &f.cart, &f.checkout, &f.orders)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(crate::commands::cart::get_cart(&f.cart).await.items.len(), 1);
    }

    #[tokio::test]
    async fn test_place_order_end_to_end() {
        let f = fixture().await;
        // 2 × 549.000 = 1.098.000: free shipping, 11% tax = 120.780
        add_to_cart(
            &f.catalog,
            &f.cart,
            "jeans-slim-03",
            AddOptions::quantity(2).with_size("32").with_color("Dark Blue"),
        )
        .await
        .unwrap();
        walk_to_review(&f).await;

        let review = get_checkout(&f.config, &f.cart, &f.checkout).await;
        assert_eq!(review.totals.total, 1_218_780);

        let order = place_order(&f.config, &f.cart, &f.checkout, &f.orders)
            .await
            .unwrap();

        assert_eq!(order.subtotal, 1_098_000);
        assert_eq!(order.shipping, 0);
        assert_eq!(order.tax, 120_780);
        assert_eq!(order.total, order.subtotal + order.shipping + order.tax);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.history.len(), 1);

        assert!(f.cart.lock().await.cart().is_empty());
        assert_eq!(f.checkout.snapshot().await, Checkout::default());
        assert_eq!(f.orders.lock().await.get_by_id(&order.id), Some(&order));
    }

    #[tokio::test]
    async fn test_small_order_pays_shipping() {
        let f = fixture().await;
        add_to_cart(&f.catalog, &f.cart, "bag-tote-05", AddOptions::default())
            .await
            .unwrap();
        walk_to_review(&f).await;

        let order = place_order(&f.config, &f.cart, &f.checkout, &f.orders)
            .await
            .unwrap();
        assert_eq!(order.subtotal, 159_000);
        assert_eq!(order.shipping, 15_000);
        assert_eq!(order.tax, 17_490);
        assert_eq!(order.total, 191_490);
    }
}
