use tracing::info;

use crate::{
    domain::{nutrition, Calories, DomainError, Pfc, ProfileUpdate, User, UserId},
    error::AppResult,
    state::AppState,
};

/// Daily targets derived from the user's profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub age: u32,
    pub bmr: f64,
    pub calories: Calories,
    pub pfc: Pfc,
}

pub async fn profile(state: &AppState, user_id: UserId) -> AppResult<User> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(DomainError::UserNotFound)?;
    Ok(user)
}

pub async fn update_profile(
    state: &AppState,
    user_id: UserId,
    update: ProfileUpdate<'_>,
) -> AppResult<User> {
    let mut user = profile(state, user_id).await?;
    user.update_profile(update, state.clock())?;
    state.users.save(&user).await?;
    info!(user_id = %user_id, "profile updated");
    Ok(user)
}

pub async fn targets(state: &AppState, user_id: UserId) -> AppResult<Targets> {
    let user = profile(state, user_id).await?;
    Ok(targets_for(&user, state))
}

pub(crate) fn targets_for(user: &User, state: &AppState) -> Targets {
    let today = state.clock().today();
    let calories = nutrition::target_calories(user, today);
    Targets {
        age: user.birth_date().age_on(today),
        bmr: nutrition::user_bmr(user, today),
        calories,
        pfc: nutrition::target_pfc(calories),
    }
}
