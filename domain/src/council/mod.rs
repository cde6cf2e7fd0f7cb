//! The council subdomain: anonymization, peer ranking, and aggregation.
//!
//! The flow these types support:
//!
//! 1. Surviving first-stage responses are anonymized — labeled `Response A`,
//!    `Response B`, ... in randomized order ([`anonymize::Anonymizer`]).
//! 2. Each survivor ranks the anonymized set; replies are parsed and
//!    validated as exact permutations ([`ranking`]).
//! 3. Valid submissions are Borda-scored into a consensus order and the
//!    label assignment is disclosed ([`aggregate::AggregateRanking`]).

pub mod aggregate;
pub mod anonymize;
pub mod label;
pub mod ranking;
