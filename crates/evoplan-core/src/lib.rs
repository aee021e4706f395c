//! evoplan core -- shared types and catalogs for the evolution planning engine.
//!
//! This crate holds everything the planning modules agree on: the static
//! data model (units, evolution tiers, material metadata), the material
//! requirement grammar, the read-only catalog repositories, and the chain
//! resolver that turns a unit id into a normalized [`resolver::EvolutionChain`].
//!
//! # Catalog Lifecycle
//!
//! Static tables are registered into a [`catalog::CatalogBuilder`] and frozen
//! with [`catalog::CatalogBuilder::build`]. Building validates every
//! structural invariant (tier numbering, drop rates, source lists) and is
//! the only place a corrupt table fails. After that the [`catalog::Catalog`]
//! is immutable and every per-unit computation over it is infallible.
//!
//! ```rust,ignore
//! let catalog = builder.build()?;
//! let resolver = EvolutionChainResolver::new(&catalog, &catalog);
//! match resolver.resolve("aqua-disciple") {
//!     Some(chain) => println!("{} tiers", chain.tiers().len()),
//!     None => println!("no evolution path"),
//! }
//! ```
//!
//! # Key Types
//!
//! - [`rarity::Rarity`] -- Ordinal material rarity, Common through Mythic.
//! - [`material::ParsedMaterial`] -- Tagged result of parsing `"Name xN"`.
//! - [`catalog::UnitCatalog`], [`catalog::EvolutionCatalog`],
//!   [`catalog::MaterialCatalog`] -- Injectable read-only repositories.
//! - [`resolver::EvolutionChainResolver`] -- Unit id to normalized chain.
//! - [`diagnostics::Diagnostic`] -- Non-fatal issues recovered during planning.

pub mod catalog;
pub mod diagnostics;
pub mod material;
pub mod model;
pub mod rarity;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use catalog::{Catalog, CatalogBuilder, CatalogError, EvolutionCatalog, MaterialCatalog, UnitCatalog};
pub use diagnostics::Diagnostic;
pub use material::{MaterialRequirement, ParsedMaterial};
pub use model::{EvolutionTier, MaterialMetadata, Requirements, Unit};
pub use rarity::Rarity;
pub use resolver::{EvolutionChain, EvolutionChainResolver, ResolvedTier};
