//! Domain core: value objects, aggregates and the nutrition engine.
//!
//! Everything here is pure and deterministic given a [`Clock`]; no I/O,
//! no logging. Aggregate constructors report every failing field at once
//! through [`ValidationErrors`].

mod advice;
mod clock;
pub mod error;
pub mod nutrition;
pub mod ports;
mod record;
mod record_pfc;
mod session;
pub mod statistics;
mod user;
mod validation;
pub mod values;

pub use advice::{start_of_day, AdviceCache};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, Nutrient};
pub use record::{NewRecordItem, Record, RecordItem};
pub use record_pfc::RecordPfc;
pub use session::{Session, SESSION_TTL};
pub use user::{NewUser, ProfileUpdate, User, UserParts};
pub use validation::ValidationErrors;
pub use values::*;
