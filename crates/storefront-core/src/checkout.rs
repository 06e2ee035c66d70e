//! # Checkout Wizard
//!
//! The three-step checkout: shipping → payment → review.
//!
//! ## Step Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌────────────┐  next_step   ┌────────────┐  next_step   ┌──────────┐ │
//! │   │ 1 Shipping │─────────────►│ 2 Payment  │─────────────►│ 3 Review │ │
//! │   │            │◄─────────────│            │◄─────────────│          │ │
//! │   └────────────┘  prev_step   └────────────┘  prev_step   └──────────┘ │
//! │         │                           │                          │        │
//! │   blocked until              blocked until a            place order    │
//! │   shipping form is           payment method is          (app layer)    │
//! │   valid                      selected                        │         │
//! │                                                              ▼         │
//! │                                                           reset()      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout state is never persisted: a reload starts from a blank form.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentMethod, TaxRate};
use crate::validation::{validate_shipping_info, FieldErrors};
use crate::{DEFAULT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD};

// =============================================================================
// Shipping Info
// =============================================================================

/// Where the order goes and who to contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: Option<String>,
    pub zip_code: String,
    pub notes: Option<String>,
}

impl ShippingInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// A partial update to the shipping form. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfoPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

impl ShippingInfoPatch {
    /// Sets one field by its form name (`firstName`, `zip_code`, ...).
    ///
    /// Returns false for an unknown field name.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "firstName" | "first_name" => &mut self.first_name,
            "lastName" | "last_name" => &mut self.last_name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "province" => &mut self.province,
            "zipCode" | "zip_code" | "zip" => &mut self.zip_code,
            "notes" => &mut self.notes,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    pub fn is_empty(&self) -> bool {
        *self == ShippingInfoPatch::default()
    }

    /// Merges the supplied fields into `info`, returning the form names that
    /// were touched.
    fn merge_into(self, info: &mut ShippingInfo) -> Vec<&'static str> {
        let mut touched = Vec::new();

        let required = [
            (self.first_name, &mut info.first_name, "firstName"),
            (self.last_name, &mut info.last_name, "lastName"),
            (self.email, &mut info.email, "email"),
            (self.phone, &mut info.phone, "phone"),
            (self.address, &mut info.address, "address"),
            (self.city, &mut info.city, "city"),
            (self.zip_code, &mut info.zip_code, "zipCode"),
        ];
        for (value, slot, name) in required {
            if let Some(value) = value {
                *slot = value;
                touched.push(name);
            }
        }

        if let Some(province) = self.province {
            info.province = Some(province).filter(|p| !p.trim().is_empty());
            touched.push("province");
        }
        if let Some(notes) = self.notes {
            info.notes = Some(notes).filter(|n| !n.trim().is_empty());
            touched.push("notes");
        }

        touched
    }
}

// =============================================================================
// Steps
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Review,
}

impl CheckoutStep {
    /// 1-based step number shown in the progress bar.
    pub const fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
        }
    }

    pub const fn next(&self) -> CheckoutStep {
        match self {
            CheckoutStep::Shipping => CheckoutStep::Payment,
            CheckoutStep::Payment | CheckoutStep::Review => CheckoutStep::Review,
        }
    }

    pub const fn prev(&self) -> CheckoutStep {
        match self {
            CheckoutStep::Shipping | CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
        }
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// How shipping and tax are derived from the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    pub tax_rate: TaxRate,
    pub shipping_fee: Money,
    /// Subtotals at or above this ship free. `None` disables free shipping.
    pub free_shipping_threshold: Option<Money>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: TaxRate::default(),
            shipping_fee: Money::from_minor(DEFAULT_SHIPPING_FEE),
            free_shipping_threshold: Some(Money::from_minor(FREE_SHIPPING_THRESHOLD)),
        }
    }
}

impl PricingPolicy {
    /// Shipping charged for a subtotal. Nothing to ship costs nothing.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if !subtotal.is_positive() {
            return Money::zero();
        }
        match self.free_shipping_threshold {
            Some(threshold) if subtotal >= threshold => Money::zero(),
            _ => self.shipping_fee,
        }
    }
}

/// The four numbers on the review step and on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: i64,
    pub shipping: i64,
    pub tax: i64,
    pub total: i64,
}

impl OrderTotals {
    /// Builds totals from parts; `total` is always their sum.
    pub fn new(subtotal: Money, shipping: Money, tax: Money) -> Self {
        OrderTotals {
            subtotal: subtotal.amount(),
            shipping: shipping.amount(),
            tax: tax.amount(),
            total: (subtotal + shipping + tax).amount(),
        }
    }

    /// Applies a pricing policy to a subtotal. Tax is charged on the subtotal
    /// only, not on shipping.
    pub fn compute(subtotal: Money, policy: &PricingPolicy) -> Self {
        let shipping = policy.shipping_for(subtotal);
        let tax = subtotal.calculate_tax(policy.tax_rate);
        OrderTotals::new(subtotal, shipping, tax)
    }
}

// =============================================================================
// Checkout State
// =============================================================================

/// Everything the wizard can be asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutCommand {
    SetShippingInfo(ShippingInfoPatch),
    SetPaymentMethod(PaymentMethod),
    NextStep,
    PrevStep,
    GoToStep(CheckoutStep),
    Reset,
}

/// Checkout wizard state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub step: CheckoutStep,
    pub shipping_info: ShippingInfo,
    pub payment_method: Option<PaymentMethod>,
    /// Errors from the last blocked `next_step`, shown inline.
    pub errors: FieldErrors,
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::default()
    }

    /// Applies a command and returns the next state. A blocked step change
    /// leaves the step alone and records the errors.
    pub fn apply(mut self, command: CheckoutCommand) -> Self {
        match command {
            CheckoutCommand::SetShippingInfo(patch) => self.set_shipping_info(patch),
            CheckoutCommand::SetPaymentMethod(method) => self.set_payment_method(method),
            CheckoutCommand::NextStep => {
                let _ = self.next_step();
            }
            CheckoutCommand::PrevStep => {
                self.prev_step();
            }
            CheckoutCommand::GoToStep(step) => {
                self.go_to_step(step);
            }
            CheckoutCommand::Reset => self.reset(),
        }
        self
    }

    /// Merges a partial form update. Errors on the touched fields are cleared
    /// so they disappear as the user types.
    pub fn set_shipping_info(&mut self, patch: ShippingInfoPatch) {
        let touched = patch.merge_into(&mut self.shipping_info);
        let remaining = self
            .errors
            .iter()
            .filter(|(field, _)| !touched.iter().any(|t| t == field))
            .fold(FieldErrors::new(), |mut acc, (field, message)| {
                acc.insert(field, message);
                acc
            });
        self.errors = remaining;
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
        self.errors = FieldErrors::new();
    }

    /// Shipping form errors. Empty when the form is complete.
    pub fn validate(&self) -> FieldErrors {
        validate_shipping_info(&self.shipping_info)
    }

    fn payment_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.payment_method.is_none() {
            errors.insert("paymentMethod", "Choose a payment method");
        }
        errors
    }

    /// Advances one step if the current step is complete.
    pub fn next_step(&mut self) -> Result<CheckoutStep, FieldErrors> {
        let errors = match self.step {
            CheckoutStep::Shipping => self.validate(),
            CheckoutStep::Payment => self.payment_errors(),
            CheckoutStep::Review => FieldErrors::new(),
        };

        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }

        self.errors = FieldErrors::new();
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Goes back one step; stays on step 1.
    pub fn prev_step(&mut self) -> CheckoutStep {
        self.step = self.step.prev();
        self.step
    }

    /// Jumps back to an earlier (or the current) step, e.g. "edit address"
    /// from the review page. Forward jumps are refused and return false.
    pub fn go_to_step(&mut self, step: CheckoutStep) -> bool {
        if step > self.step {
            return false;
        }
        self.step = step;
        true
    }

    /// Restores the blank initial state.
    pub fn reset(&mut self) {
        *self = Checkout::default();
    }

    /// Totals for the review step.
    pub fn order_totals(&self, subtotal: Money, policy: &PricingPolicy) -> OrderTotals {
        OrderTotals::compute(subtotal, policy)
    }

    /// Everything needed to place an order, if the wizard is finished.
    pub fn ready_to_place(&self) -> CoreResult<(ShippingInfo, PaymentMethod)> {
        let mut errors = self.validate();
        for (field, message) in self.payment_errors().iter() {
            errors.insert(field, message);
        }
        if self.step != CheckoutStep::Review {
            errors.insert("step", "Finish the previous steps first");
        }
        if !errors.is_empty() {
            return Err(CoreError::IncompleteCheckout(errors));
        }

        match self.payment_method {
            Some(method) => Ok((self.shipping_info.clone(), method)),
            None => Err(CoreError::IncompleteCheckout(self.payment_errors())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
