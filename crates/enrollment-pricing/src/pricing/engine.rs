use tracing::debug;

use super::domain::{PackageTerms, ProgramLevel, QuoteBreakdown, QuoteRequest, QuoteResult};
use super::money::percent_of;
use super::table::{normalize_promo_code, PricingTable, PricingTableError};

/// Stateless quote calculator over an immutable pricing table.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    table: PricingTable,
}

impl QuoteEngine {
    pub fn new(table: PricingTable) -> Result<Self, PricingTableError> {
        Ok(Self {
            table: table.validated()?,
        })
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    pub fn compute_quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteError> {
        if request.level.trim().is_empty() {
            return Err(QuoteError::MissingLevel);
        }
        if request.sessions < 0 {
            return Err(QuoteError::NegativeSessions(request.sessions));
        }

        let base = self.base_price(&request.level);
        let terms = self.package_terms(request.sessions);
        let package_discount = percent_of(base, terms.discount_pct);
        let time_adj = self.time_adjustment(request);
        let subtotal = base + time_adj - package_discount;
        let promo = self.promo_discount(subtotal, request.promo_code.as_deref());
        let total = (subtotal - promo).max(0);

        let currency = request
            .currency
            .clone()
            .unwrap_or_else(|| self.table.default_currency.clone());

        Ok(QuoteResult {
            currency,
            total_cents: total,
            breakdown: QuoteBreakdown {
                base_cents: base,
                package_discount_cents: package_discount,
                time_adj_cents: time_adj,
                promo_cents: promo,
            },
            expiry_days: terms.expiry_days,
        })
    }

    /// Validity window in days for a package of `sessions`.
    pub fn expiry_days(&self, sessions: i64) -> u32 {
        self.package_terms(sessions).expiry_days
    }

    fn base_price(&self, level: &str) -> i64 {
        let resolved = match ProgramLevel::from_id(level) {
            Some(level) if self.table.base_prices.contains_key(&level) => level,
            _ => {
                debug!(
                    program_level = level,
                    fallback = %self.table.fallback_level,
                    "unrecognized program level, using fallback price"
                );
                self.table.fallback_level
            }
        };

        // validated tables always price the fallback level
        self.table.base_price(resolved).unwrap_or_default()
    }

    fn package_terms(&self, sessions: i64) -> PackageTerms {
        let package = u32::try_from(sessions)
            .ok()
            .and_then(|sessions| self.table.package(sessions));

        match package {
            Some(package) => package.terms,
            None => {
                debug!(sessions, "no package tier for session count, using default terms");
                self.table.default_package
            }
        }
    }

    /// Demand or time-of-day pricing hook; the current policy never adjusts.
    fn time_adjustment(&self, _request: &QuoteRequest) -> i64 {
        0
    }

    fn promo_discount(&self, subtotal: i64, promo_code: Option<&str>) -> i64 {
        let Some(code) = promo_code else {
            return 0;
        };

        let code = normalize_promo_code(code);
        if code.is_empty() {
            return 0;
        }

        match self.table.promo_pct(&code) {
            Some(pct) => percent_of(subtotal, pct),
            None => {
                debug!(promo_code = %code, "promo code not recognized, no discount applied");
                0
            }
        }
    }
}

/// Structurally invalid quote input. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    #[error("program level must not be empty")]
    MissingLevel,
    #[error("session count must not be negative (got {0})")]
    NegativeSessions(i64),
}
