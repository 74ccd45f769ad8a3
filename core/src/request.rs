// core/src/request.rs

//! Untrusted product input and its validation.
//!
//! Create input is turned into a complete [`Product`]; update input is turned
//! into a [`ProductPatch`] that is merged over a stored record. Every field of
//! both request types is an `Option` so that an absent field can be told apart
//! from a field that is present with a zero or empty value.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Product, ProductId};

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 255;
pub const CURRENCY_MAX_CHARS: usize = 16;
/// Prices carry at most this many fractional digits.
pub const PRICE_MAX_SCALE: u32 = 2;
/// Exclusive upper bound on a price: 10^10, i.e. at most 12 digits with the scale above.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(0x540B_E400, 0x2, 0, false, 0); // 10_000_000_000

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// All constraint violations found in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    fn into_result<T>(self, ok: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn check_name(name: &str, errors: &mut ValidationErrors) {
    if name.trim().chars().count() < NAME_MIN_CHARS {
        errors.push("name", format!("must be at least {} characters", NAME_MIN_CHARS));
    } else if name.chars().count() > NAME_MAX_CHARS {
        errors.push("name", format!("must be at most {} characters", NAME_MAX_CHARS));
    }
}

fn check_price(price: Decimal, errors: &mut ValidationErrors) {
    if price <= Decimal::ZERO {
        errors.push("price", "must be greater than 0");
    } else if price.normalize().scale() > PRICE_MAX_SCALE {
        errors.push("price", format!("must have at most {} decimal places", PRICE_MAX_SCALE));
    } else if price >= PRICE_LIMIT {
        errors.push("price", format!("must be less than {}", PRICE_LIMIT));
    }
}

fn check_currency(currency: Option<&str>, errors: &mut ValidationErrors) {
    check_required_text("currency", currency, errors);
    if let Some(c) = currency {
        if c.chars().count() > CURRENCY_MAX_CHARS {
            errors.push("currency", format!("must be at most {} characters", CURRENCY_MAX_CHARS));
        }
    }
}

fn check_stock(stock: i64, errors: &mut ValidationErrors) {
    if stock < 0 {
        errors.push("stock", "must not be negative");
    }
}

fn check_required_text(field: &'static str, value: Option<&str>, errors: &mut ValidationErrors) {
    match value {
        None => errors.push(field, "is required"),
        Some(v) if v.trim().is_empty() => errors.push(field, "must not be empty"),
        Some(_) => {}
    }
}

// --- Create ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub url: Option<String>,
    pub stock: Option<i64>,
    pub active: Option<bool>,
}

/// A create request that passed validation. Only obtainable through
/// [`CreateProductRequest::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCreate {
    name: String,
    description: String,
    price: Decimal,
    currency: String,
    url: String,
    stock: i64,
    active: bool,
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<ValidCreate, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        match self.name.as_deref() {
            None => errors.push("name", "is required"),
            Some(name) => check_name(name, &mut errors),
        }
        match self.price {
            None => errors.push("price", "is required"),
            Some(price) => check_price(price, &mut errors),
        }
        check_currency(self.currency.as_deref(), &mut errors);
        check_required_text("url", self.url.as_deref(), &mut errors);
        match self.stock {
            None => errors.push("stock", "is required"),
            Some(stock) => check_stock(stock, &mut errors),
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every required field was checked above.
        match (self.name, self.price, self.currency, self.url, self.stock) {
            (Some(name), Some(price), Some(currency), Some(url), Some(stock)) => Ok(ValidCreate {
                name,
                description: self.description.unwrap_or_default(),
                price,
                currency,
                url,
                stock,
                active: self.active.unwrap_or(true),
            }),
            _ => Err(errors),
        }
    }
}

impl ValidCreate {
    /// Builds the full record: fresh id, `created_at == updated_at == now`.
    pub fn into_product(self, created_by: &str, now: DateTime<Utc>) -> Product {
        Product {
            id: ProductId::generate(),
            name: self.name,
            description: self.description,
            price: self.price,
            currency: self.currency,
            url: self.url,
            stock: self.stock,
            active: self.active,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

// --- Update ---

/// Sparse update input. `null` and an absent key both mean "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub active: Option<bool>,
}

/// A validated set of field replacements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    stock: Option<i64>,
    active: Option<bool>,
}

impl UpdateProductRequest {
    /// Checks only the fields that are present.
    pub fn validate(self) -> Result<ProductPatch, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(name) = self.name.as_deref() {
            check_name(name, &mut errors);
        }
        if let Some(price) = self.price {
            check_price(price, &mut errors);
        }
        if let Some(stock) = self.stock {
            check_stock(stock, &mut errors);
        }
        errors.into_result(ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            active: self.active,
        })
    }
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.active.is_none()
    }

    /// Overwrites the present fields and refreshes `updated_at`.
    ///
    /// `updated_at` never goes below `created_at`, even if the clock stepped back.
    pub fn apply_to(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(active) = self.active {
            product.active = active;
        }
        product.updated_at = now.max(product.created_at);
    }
}
