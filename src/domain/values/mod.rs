//! Self-validating value objects.
//!
//! Every type offers a validating constructor (`new`/`parse`) for user input
//! and, where values come back from storage, a `reconstruct` that trusts its
//! input. Values are immutable; operations such as [`Calories::add`] return a
//! new value.

mod birth_date;
mod calories;
mod email;
mod ids;
mod meal;
mod password;
mod pfc;
mod profile;
mod session_id;
mod statistics_period;

pub use birth_date::{BirthDate, BIRTH_DATE_MAX_YEARS};
pub use calories::{Calories, CALORIES_MAX};
pub use email::{Email, EMAIL_MAX_LEN};
pub use ids::{RecordId, RecordItemId, UserId};
pub use meal::{EatenAt, ItemName};
pub use password::{HashedPassword, Password, PASSWORD_MIN_LEN};
pub use pfc::Pfc;
pub use profile::{
    ActivityLevel, Gender, Height, Nickname, Weight, HEIGHT_MAX_CM, NICKNAME_MAX_LEN,
    WEIGHT_MAX_KG,
};
pub use session_id::{SessionId, SESSION_ID_BYTES};
pub use statistics_period::StatisticsPeriod;
