//! # Command Line
//!
//! Maps `storefront <subcommand>` onto the command functions. Every
//! subcommand prints one JSON document on stdout.
//!
//! The checkout wizard lives in memory, so `checkout` runs the whole wizard
//! in one invocation: fill the form, pick the payment method, advance to
//! review, place the order.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use storefront_core::{AddOptions, PriceRange, ProductFilter, ShippingInfoPatch, SortBy};
use storefront_store::KeyValueStore;

use crate::commands::{cart, checkout, config, order, product, wishlist};
use crate::error::ApiError;
use crate::Storefront;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart, checkout and orders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products, optionally in one category
    Products {
        category: Option<String>,

        /// Match name, brand or category
        #[arg(long)]
        search: Option<String>,

        /// name, price_asc, price_desc, rating or newest
        #[arg(long, default_value = "newest")]
        sort: String,

        /// under_100k, from_100k_to_500k, from_500k_to_1m, over_1m or MIN-MAX
        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        min_rating: Option<f32>,

        /// Repeat for several sizes
        #[arg(long = "size")]
        sizes: Vec<String>,

        #[arg(long)]
        brand: Option<String>,

        /// Color substring
        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        in_stock: bool,
    },
    /// List category names
    Categories,
    /// Show one product
    Product { id: String },
    /// Show the cart
    Cart,
    /// Add a product to the cart
    Add {
        product_id: String,
        quantity: Option<i64>,
        size: Option<String>,
        color: Option<String>,
    },
    /// Set a cart line's quantity (0 removes it)
    Qty {
        item_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart line
    Remove { item_id: String },
    /// Empty the cart
    Clear,
    /// Show the wishlist, or toggle a product on it
    Wishlist { product_id: Option<String> },
    /// Place an order: `firstName=Sari ... payment=bank_transfer`
    Checkout {
        #[arg(value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// List orders, optionally with one status
    Orders { status: Option<String> },
    /// Show one order
    Order { id: String },
    /// Move an order to a new status
    Status {
        id: String,
        status: String,
        description: Option<String>,
    },
    /// Cancel an order that is still processing
    Cancel { id: String, reason: Option<String> },
    /// Show the active configuration
    Config,
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(format!("Failed to encode output: {e}")))
}

/// Splits `key=value` checkout arguments into the form patch and the
/// payment method id.
fn parse_checkout_fields(fields: &[String]) -> Result<(ShippingInfoPatch, Option<String>), ApiError> {
    let mut patch = ShippingInfoPatch::default();
    let mut payment = None;

    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| ApiError::validation(format!("Expected FIELD=VALUE, got '{field}'")))?;

        if key == "payment" || key == "paymentMethod" {
            payment = Some(value.to_string());
        } else if !patch.set(key, value) {
            return Err(ApiError::validation(format!("Unknown checkout field: {key}")));
        }
    }

    Ok((patch, payment))
}

/// Runs one subcommand against the loaded storefront.
pub async fn execute<S: KeyValueStore>(app: &Storefront<S>, command: Command) -> Result<Value, ApiError> {
    match command {
        Command::Products {
            category,
            search,
            sort,
            price,
            min_rating,
            sizes,
            brand,
            color,
            in_stock,
        } => {
            let query = product::ProductQuery {
                search,
                filter: ProductFilter {
                    categories: category.into_iter().collect(),
                    price: price.as_deref().map(str::parse::<PriceRange>).transpose()?,
                    min_rating,
                    sizes,
                    brand,
                    variant: color,
                    in_stock_only: in_stock,
                },
                sort: sort.parse::<SortBy>()?,
            };
            to_json(&product::list_products(&app.catalog, &app.config, &query)?)
        }
        Command::Categories => to_json(&product::list_categories(&app.catalog)),
        Command::Product { id } => to_json(&product::get_product(&app.catalog, &app.config, &id)?),
        Command::Cart => to_json(&cart::get_cart(&app.cart).await),
        Command::Add {
            product_id,
            quantity,
            size,
            color,
        } => {
            let options = AddOptions {
                quantity,
                size,
                color,
            };
            to_json(&cart::add_to_cart(&app.catalog, &app.cart, &product_id, options).await?)
        }
        Command::Qty { item_id, quantity } => {
            to_json(&cart::update_cart_item(&app.cart, &item_id, quantity).await)
        }
        Command::Remove { item_id } => to_json(&cart::remove_from_cart(&app.cart, &item_id).await),
        Command::Clear => to_json(&cart::clear_cart(&app.cart).await),
        Command::Wishlist { product_id } => {
            let saved = match product_id {
                Some(id) => Some(wishlist::toggle_wishlist(&app.catalog, &app.wishlist, &id).await?),
                None => None,
            };
            let items = wishlist::get_wishlist(&app.catalog, &app.config, &app.wishlist).await;
            Ok(json!({ "saved": saved, "items": to_json(&items)? }))
        }
        Command::Checkout { fields } => {
            let (patch, payment) = parse_checkout_fields(&fields)?;

            checkout::set_shipping_info(&app.config, &app.cart, &app.checkout, patch).await;
            checkout::next_step(&app.config, &app.cart, &app.checkout).await?;
            if let Some(method) = payment {
                checkout::set_payment_method(&app.config, &app.cart, &app.checkout, &method).await?;
            }
            checkout::next_step(&app.config, &app.cart, &app.checkout).await?;

            let placed = checkout::place_order(&app.config, &app.cart, &app.checkout, &app.orders).await?;
            to_json(&placed)
        }
        Command::Orders { status } => to_json(&order::list_orders(&app.orders, status.as_deref()).await?),
        Command::Order { id } => to_json(&order::get_order(&app.orders, &id).await),
        Command::Status {
            id,
            status,
            description,
        } => to_json(&order::update_order_status(&app.orders, &id, &status, description).await?),
        Command::Cancel { id, reason } => to_json(&order::cancel_order(&app.orders, &id, reason).await?),
        Command::Config => to_json(&config::get_config(&app.config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::{CatalogState, ConfigState};
    use storefront_store::MemoryStore;

    async fn app(kv: MemoryStore) -> Storefront<MemoryStore> {
        let config = ConfigState {
            order_latency_ms: 0,
            ..ConfigState::default()
        };
        Storefront::load(config, CatalogState::mock(), kv).await
    }

    async fn run(app: &Storefront<MemoryStore>, args: &[&str]) -> Result<Value, ApiError> {
        let cli = Cli::try_parse_from(std::iter::once("storefront").chain(args.iter().copied())).unwrap();
        execute(app, cli.command).await
    }

    #[test]
    fn test_parse_checkout_fields() {
        let fields = vec![
            "firstName=Sari".to_string(),
            "zip=40111".to_string(),
            "notes=Leave at the gate, thanks".to_string(),
            "payment=e_wallet".to_string(),
        ];
        let (patch, payment) = parse_checkout_fields(&fields).unwrap();
        assert_eq!(patch.first_name.as_deref(), Some("Sari"));
        assert_eq!(patch.zip_code.as_deref(), Some("40111"));
        assert_eq!(patch.notes.as_deref(), Some("Leave at the gate, thanks"));
        assert_eq!(payment.as_deref(), Some("e_wallet"));

        assert!(parse_checkout_fields(&["nickname=Sari".to_string()]).is_err());
        assert!(parse_checkout_fields(&["firstName".to_string()]).is_err());
    }

    #[tokio::test]
    async fn test_products_with_flags() {
        let app = app(MemoryStore::new()).await;
        let out = run(&app, &["products", "accessories", "--in-stock", "--sort", "price_desc"])
            .await
            .unwrap();
        let ids: Vec<_> = out
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["watch-steel-10"]);

        let err = run(&app, &["products", "--sort", "cheapest"]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_cart_survives_restart() {
        let kv = MemoryStore::new();
        let first = app(kv.clone()).await;
        run(&first, &["add", "tee-basic-01", "3", "M"]).await.unwrap();

        let second = app(kv).await;
        let out = run(&second, &["cart"]).await.unwrap();
        assert_eq!(out["totals"]["totalItems"], 3);
        assert_eq!(out["totals"]["totalPrice"], 297_000);
    }

    #[tokio::test]
    async fn test_checkout_then_track_order() {
        let kv = MemoryStore::new();
        let app = app(kv.clone()).await;
        run(&app, &["add", "watch-steel-10"]).await.unwrap();

        let placed = run(
            &app,
            &[
                "checkout",
                "firstName=Sari",
                "lastName=Wijaya",
                "email=sari@example.com",
                "phone=081234567890",
                "address=Jl. Merdeka No. 10",
                "city=Bandung",
                "zipCode=40111",
                "payment=credit_card",
            ],
        )
        .await
        .unwrap();
        // 1.850.000 + free shipping + 203.500 tax
        assert_eq!(placed["total"], 2_053_500);
        assert_eq!(placed["status"], "processing");
        let id = placed["id"].as_str().unwrap().to_string();

        let cart = run(&app, &["cart"]).await.unwrap();
        assert_eq!(cart["items"].as_array().unwrap().len(), 0);

        let shipped = run(&app, &["status", &id, "shipped", "Picked up by courier"])
            .await
            .unwrap();
        assert_eq!(shipped["history"][1]["description"], "Picked up by courier");

        let err = run(&app, &["cancel", &id]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let reloaded = self::app(kv).await;
        let orders = run(&reloaded, &["orders", "shipped"]).await.unwrap();
        assert_eq!(orders.as_array().unwrap().len(), 1);
        assert_eq!(run(&reloaded, &["order", "ORD-nope"]).await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_checkout_without_payment_is_rejected() {
        let app = app(MemoryStore::new()).await;
        run(&app, &["add", "bag-tote-05"]).await.unwrap();

        let err = run(
            &app,
            &[
                "checkout",
                "firstName=Sari",
                "lastName=Wijaya",
                "email=sari@example.com",
                "phone=0812",
                "address=Jl. Merdeka",
                "city=Bandung",
                "zip=40111",
            ],
        )
        .await
        .unwrap_err();
        assert!(err.fields.unwrap().contains("paymentMethod"));
        assert!(app.orders.lock().await.list().is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_toggle() {
        let app = app(MemoryStore::new()).await;
        let out = run(&app, &["wishlist", "dress-linen-08"]).await.unwrap();
        assert_eq!(out["saved"], true);
        assert_eq!(out["items"][0]["id"], "dress-linen-08");

        let out = run(&app, &["wishlist"]).await.unwrap();
        assert_eq!(out["saved"], Value::Null);
        assert_eq!(out["items"].as_array().unwrap().len(), 1);
    }
}
