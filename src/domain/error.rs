use thiserror::Error;

/// Which macronutrient of a PFC triple a rule refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nutrient {
    Protein,
    Fat,
    Carbs,
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Protein => "protein",
            Self::Fat => "fat",
            Self::Carbs => "carbs",
        })
    }
}

/// Every business rule violation the domain can report.
///
/// The `Display` text is safe to show to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // identifiers
    #[error("user id must be a valid UUID")]
    InvalidUserId,
    #[error("record id must be a valid UUID")]
    InvalidRecordId,
    #[error("record item id must be a valid UUID")]
    InvalidRecordItemId,

    // user fields
    #[error("email is required")]
    EmailRequired,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("email format is invalid")]
    EmailInvalidFormat,
    #[error("password is required")]
    PasswordRequired,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("password could not be hashed")]
    PasswordHashFailed,
    #[error("nickname is required")]
    NicknameRequired,
    #[error("nickname must be at most {max} characters")]
    NicknameTooLong { max: usize },
    #[error("weight must be greater than 0")]
    WeightMustBePositive,
    #[error("weight must be at most {max} kg")]
    WeightTooHeavy { max: u32 },
    #[error("height must be greater than 0")]
    HeightMustBePositive,
    #[error("height must be at most {max} cm")]
    HeightTooTall { max: u32 },
    #[error("birth date must be formatted as YYYY-MM-DD")]
    BirthDateInvalidFormat,
    #[error("birth date must be in the past")]
    BirthDateNotInPast,
    #[error("birth date must be within the last {max_years} years")]
    BirthDateTooOld { max_years: i32 },
    #[error("gender must be one of male, female, other")]
    InvalidGender,
    #[error("activity level must be one of sedentary, light, moderate, active, very_active")]
    InvalidActivityLevel,
    #[error("statistics period must be one of week, month, year")]
    InvalidStatisticsPeriod,

    // record fields
    #[error("calories must be at least 1")]
    CaloriesMustBePositive,
    #[error("calories must be at most {max}")]
    CaloriesTooLarge { max: u32 },
    #[error("item name is required")]
    ItemNameRequired,
    #[error("eaten at must not be in the future")]
    EatenAtInFuture,
    #[error("{0} must be a non-negative number of grams")]
    PfcMustBeNonNegative(Nutrient),
    #[error("advice text is required")]
    AdviceRequired,
    #[error("from must not be after to")]
    InvalidDateRange,

    // aggregates
    #[error("a record needs at least one item")]
    RecordItemsRequired,

    // authentication
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("session id is invalid")]
    InvalidSessionId,
    #[error("session id could not be generated")]
    SessionIdGenerationFailed,
    #[error("session not found")]
    SessionNotFound,
    #[error("session expired")]
    SessionExpired,

    // lookups
    #[error("user not found")]
    UserNotFound,
    #[error("record not found")]
    RecordNotFound,
}

impl DomainError {
    /// Authentication failures, surfaced to clients without detail.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::InvalidSessionId
                | Self::SessionNotFound
                | Self::SessionExpired
        )
    }
}
