use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{PackageTerms, ProgramLevel, SessionPackage};

/// Upper bound on a base price so percentage arithmetic stays well inside `i64`.
pub const MAX_BASE_PRICE_CENTS: i64 = 1_000_000_000_000;

/// Pricing rules the quote engine applies. Immutable once handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTable {
    pub default_currency: String,
    pub fallback_level: ProgramLevel,
    pub base_prices: BTreeMap<ProgramLevel, i64>,
    pub packages: Vec<SessionPackage>,
    pub default_package: PackageTerms,
    pub promo_codes: BTreeMap<String, u8>,
}

impl Default for PricingTable {
    fn default() -> Self {
        let base_prices = BTreeMap::from([
            (ProgramLevel::Level1, 8_000),
            (ProgramLevel::Level2, 10_000),
            (ProgramLevel::Level3, 12_000),
        ]);

        let packages = vec![
            SessionPackage {
                sessions: 8,
                terms: PackageTerms {
                    discount_pct: 0,
                    expiry_days: 30,
                },
            },
            SessionPackage {
                sessions: 16,
                terms: PackageTerms {
                    discount_pct: 10,
                    expiry_days: 60,
                },
            },
            SessionPackage {
                sessions: 24,
                terms: PackageTerms {
                    discount_pct: 20,
                    expiry_days: 90,
                },
            },
        ];

        Self {
            default_currency: "USD".to_string(),
            fallback_level: ProgramLevel::Level2,
            base_prices,
            packages,
            default_package: PackageTerms {
                discount_pct: 0,
                expiry_days: 30,
            },
            promo_codes: BTreeMap::from([("WELCOME10".to_string(), 10)]),
        }
    }
}

impl PricingTable {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PricingTableError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PricingTableError> {
        let table: PricingTable = serde_json::from_reader(reader)?;
        table.validated()
    }

    /// Checks the table invariants and normalizes promo codes to their match form.
    pub fn validated(mut self) -> Result<Self, PricingTableError> {
        for (level, cents) in &self.base_prices {
            if *cents < 0 {
                return Err(PricingTableError::NegativeBasePrice {
                    level: *level,
                    cents: *cents,
                });
            }
            if *cents > MAX_BASE_PRICE_CENTS {
                return Err(PricingTableError::BasePriceTooLarge {
                    level: *level,
                    cents: *cents,
                });
            }
        }

        if !self.base_prices.contains_key(&self.fallback_level) {
            return Err(PricingTableError::MissingFallbackPrice(self.fallback_level));
        }

        let mut seen = BTreeSet::new();
        for package in &self.packages {
            if !seen.insert(package.sessions) {
                return Err(PricingTableError::DuplicatePackage(package.sessions));
            }
            check_terms(&package.terms, &format!("{}-session package", package.sessions))?;
        }
        check_terms(&self.default_package, "default package")?;

        let mut promo_codes = BTreeMap::new();
        for (code, pct) in std::mem::take(&mut self.promo_codes) {
            let normalized = normalize_promo_code(&code);
            if normalized.is_empty() {
                return Err(PricingTableError::EmptyPromoCode);
            }
            if pct > 100 {
                return Err(PricingTableError::PercentOutOfRange {
                    context: format!("promo code {normalized}"),
                    pct,
                });
            }
            if promo_codes.insert(normalized.clone(), pct).is_some() {
                return Err(PricingTableError::DuplicatePromoCode(normalized));
            }
        }
        self.promo_codes = promo_codes;

        Ok(self)
    }

    pub fn base_price(&self, level: ProgramLevel) -> Option<i64> {
        self.base_prices.get(&level).copied()
    }

    pub fn package(&self, sessions: u32) -> Option<&SessionPackage> {
        self.packages
            .iter()
            .find(|package| package.sessions == sessions)
    }

    /// Looks up a promo code that has already been trimmed and upper-cased.
    pub fn promo_pct(&self, normalized_code: &str) -> Option<u8> {
        self.promo_codes.get(normalized_code).copied()
    }
}

pub(crate) fn normalize_promo_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn check_terms(terms: &PackageTerms, context: &str) -> Result<(), PricingTableError> {
    if terms.discount_pct > 100 {
        return Err(PricingTableError::PercentOutOfRange {
            context: context.to_string(),
            pct: terms.discount_pct,
        });
    }
    if terms.expiry_days == 0 {
        return Err(PricingTableError::ZeroExpiry(context.to_string()));
    }
    Ok(())
}

/// Reasons a pricing table is refused at load time.
#[derive(Debug, thiserror::Error)]
pub enum PricingTableError {
    #[error("unable to read pricing table: {0}")]
    Io(#[from] std::io::Error),
    #[error("pricing table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("base price for {level} must not be negative (got {cents})")]
    NegativeBasePrice { level: ProgramLevel, cents: i64 },
    #[error("base price for {level} exceeds {} (got {cents})", MAX_BASE_PRICE_CENTS)]
    BasePriceTooLarge { level: ProgramLevel, cents: i64 },
    #[error("fallback level {0} has no base price")]
    MissingFallbackPrice(ProgramLevel),
    #[error("{context}: percentage {pct} exceeds 100")]
    PercentOutOfRange { context: String, pct: u8 },
    #[error("{0}: expiry window must be at least one day")]
    ZeroExpiry(String),
    #[error("package size {0} is listed more than once")]
    DuplicatePackage(u32),
    #[error("promo codes must not be blank")]
    EmptyPromoCode,
    #[error("promo code {0} is listed more than once")]
    DuplicatePromoCode(String),
}
