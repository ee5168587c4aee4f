use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::money::format_minor_units;

/// Program tier selecting the base price of a package purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramLevel {
    Level1,
    Level2,
    Level3,
}

impl ProgramLevel {
    /// Exact match only: padding or capitals make the identifier unknown.
    pub fn from_id(value: &str) -> Option<Self> {
        match value {
            "level1" => Some(Self::Level1),
            "level2" => Some(Self::Level2),
            "level3" => Some(Self::Level3),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ProgramLevel::Level1 => "level1",
            ProgramLevel::Level2 => "level2",
            ProgramLevel::Level3 => "level3",
        }
    }
}

impl fmt::Display for ProgramLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Discount and validity window attached to a package size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageTerms {
    pub discount_pct: u8,
    pub expiry_days: u32,
}

/// Bundle of sessions purchasable at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPackage {
    pub sessions: u32,
    #[serde(flatten)]
    pub terms: PackageTerms,
}

/// Caller input for a quote. Optional fields fall back to table defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub level: String,
    pub sessions: i64,
    #[serde(default)]
    pub promo_code: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl QuoteRequest {
    pub fn new(level: impl Into<String>, sessions: i64) -> Self {
        Self {
            level: level.into(),
            sessions,
            promo_code: None,
            currency: None,
        }
    }

    pub fn with_promo_code(mut self, promo_code: impl Into<String>) -> Self {
        self.promo_code = Some(promo_code.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Itemized amounts behind a quote total, in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBreakdown {
    pub base_cents: i64,
    pub package_discount_cents: i64,
    pub time_adj_cents: i64,
    pub promo_cents: i64,
}

impl QuoteBreakdown {
    pub fn subtotal_cents(&self) -> i64 {
        self.base_cents + self.time_adj_cents - self.package_discount_cents
    }
}

/// Priced package ready to display or hand to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub currency: String,
    pub total_cents: i64,
    pub breakdown: QuoteBreakdown,
    pub expiry_days: u32,
}

impl QuoteResult {
    pub fn display_total(&self) -> String {
        format_minor_units(self.total_cents, &self.currency)
    }

    pub fn payment_amount(&self) -> PaymentAmount {
        PaymentAmount {
            amount: self.total_cents,
            currency: self.currency.trim().to_ascii_uppercase(),
        }
    }

    /// Last day on which sessions from a package bought on `purchased_on` can be used.
    pub fn expires_on(&self, purchased_on: NaiveDate) -> NaiveDate {
        purchased_on
            .checked_add_signed(Duration::days(i64::from(self.expiry_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Amount handed to the payment gateway when the learner checks out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAmount {
    pub amount: i64,
    pub currency: String,
}
