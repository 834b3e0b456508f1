//! User aggregate.

use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::{
    ActivityLevel, BirthDate, Clock, Email, Gender, HashedPassword, Height, Nickname, Password,
    UserId, ValidationErrors, Weight,
};

/// Raw registration input.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub nickname: &'a str,
    pub weight_kg: f64,
    pub height_cm: f64,
    /// `YYYY-MM-DD`
    pub birth_date: &'a str,
    pub gender: &'a str,
    pub activity_level: &'a str,
}

/// Raw input for [`User::update_profile`].
#[derive(Debug, Clone, Copy)]
pub struct ProfileUpdate<'a> {
    pub nickname: &'a str,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: &'a str,
}

/// Trusted persisted fields, mapped 1:1 onto a [`User`] by [`User::reconstruct`].
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub birth_date: Date,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A registered user.
///
/// ## Invariants
/// - every field passed its value-object validation at registration time;
/// - body measurements stay within physiological bounds across updates.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: Email,
    password: HashedPassword,
    nickname: Nickname,
    weight: Weight,
    height: Height,
    birth_date: BirthDate,
    gender: Gender,
    activity_level: ActivityLevel,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl User {
    /// Validate every field, reporting all failures at once.
    ///
    /// The password is hashed only when every field is valid.
    pub fn new(input: NewUser<'_>, clock: &dyn Clock) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = errors.collect(Email::new(input.email));
        let password = errors.collect(Password::new(input.password));
        let nickname = errors.collect(Nickname::new(input.nickname));
        let weight = errors.collect(Weight::new(input.weight_kg));
        let height = errors.collect(Height::new(input.height_cm));
        let birth_date = errors.collect(BirthDate::parse(input.birth_date, clock));
        let gender = errors.collect(input.gender.parse::<Gender>());
        let activity_level = errors.collect(input.activity_level.parse::<ActivityLevel>());

        let (
            Some(email),
            Some(password),
            Some(nickname),
            Some(weight),
            Some(height),
            Some(birth_date),
            Some(gender),
            Some(activity_level),
        ) = (
            email,
            password,
            nickname,
            weight,
            height,
            birth_date,
            gender,
            activity_level,
        )
        else {
            return Err(errors);
        };

        let password = password.hash()?;
        let now = clock.now();
        Ok(Self {
            id: UserId::generate(),
            email,
            password,
            nickname,
            weight,
            height,
            birth_date,
            gender,
            activity_level,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstruct(parts: UserParts) -> Self {
        Self {
            id: UserId::reconstruct(parts.id),
            email: Email::reconstruct(parts.email),
            password: HashedPassword::reconstruct(parts.password_hash),
            nickname: Nickname::reconstruct(parts.nickname),
            weight: Weight::reconstruct(parts.weight_kg),
            height: Height::reconstruct(parts.height_cm),
            birth_date: BirthDate::reconstruct(parts.birth_date),
            gender: parts.gender,
            activity_level: parts.activity_level,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        }
    }

    /// All-or-nothing profile change; on error the user is left untouched.
    pub fn update_profile(
        &mut self,
        update: ProfileUpdate<'_>,
        clock: &dyn Clock,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let nickname = errors.collect(Nickname::new(update.nickname));
        let height = errors.collect(Height::new(update.height_cm));
        let weight = errors.collect(Weight::new(update.weight_kg));
        let activity_level = errors.collect(update.activity_level.parse::<ActivityLevel>());

        let (Some(nickname), Some(height), Some(weight), Some(activity_level)) =
            (nickname, height, weight, activity_level)
        else {
            return Err(errors);
        };

        self.nickname = nickname;
        self.height = height;
        self.weight = weight;
        self.activity_level = activity_level;
        self.updated_at = clock.now();
        Ok(())
    }

    pub fn verify_password(&self, plain: &str) -> bool {
        self.password.verify(plain)
    }

    pub fn age(&self, clock: &dyn Clock) -> u32 {
        self.birth_date.age(clock)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password
    }

    pub fn nickname(&self) -> &Nickname {
        &self.nickname
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn height(&self) -> Height {
        self.height
    }

    pub fn birth_date(&self) -> BirthDate {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// Primitive snapshot accepted back by [`User::reconstruct`].
    pub fn to_parts(&self) -> UserParts {
        UserParts {
            id: self.id.as_uuid(),
            email: self.email.as_str().to_owned(),
            password_hash: self.password.as_str().to_owned(),
            nickname: self.nickname.as_str().to_owned(),
            weight_kg: self.weight.kg(),
            height_cm: self.height.cm(),
            birth_date: self.birth_date.date(),
            gender: self.gender,
            activity_level: self.activity_level,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
