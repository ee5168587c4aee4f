//! Quote engine for tutoring session packages.
//!
//! A quote starts from the base price of a program level, takes the package
//! discount for the number of sessions bought, then applies an optional promo
//! code to what remains. All amounts are integer minor currency units.

pub mod domain;
mod engine;
pub mod money;
pub mod router;
mod table;

#[cfg(test)]
mod tests;

pub use domain::{
    PackageTerms, PaymentAmount, ProgramLevel, QuoteBreakdown, QuoteRequest, QuoteResult,
    SessionPackage,
};
pub use engine::{QuoteEngine, QuoteError};
pub use money::format_minor_units;
pub use router::{quote_router, QuoteView};
pub use table::{PricingTable, PricingTableError, MAX_BASE_PRICE_CENTS};
