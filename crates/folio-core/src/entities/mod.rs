//! Entity structs for all Folio domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `folio-db/migrations`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod about;
mod audit;
mod contact;
mod portfolio;
mod timeline;
mod user;

pub use about::About;
pub use audit::AuditEntry;
pub use contact::ContactMessage;
pub use portfolio::PortfolioItem;
pub use timeline::TimelineEntry;
pub use user::User;
