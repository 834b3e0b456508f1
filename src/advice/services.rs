use time::OffsetDateTime;
use tracing::{debug, info};

use super::generator::DailyIntake;
use crate::{
    domain::{start_of_day, AdviceCache, Calories, Pfc, UserId},
    error::AppResult,
    records,
    state::AppState,
    users,
};

/// Advice for the local day containing `at`, generated at most once per day.
pub async fn advice_for_day(
    state: &AppState,
    user_id: UserId,
    at: OffsetDateTime,
) -> AppResult<AdviceCache> {
    let at = at.to_offset(state.clock().now().offset());
    let day = start_of_day(at).date();

    if let Some(cached) = state.advice.find(user_id, day).await? {
        debug!(user_id = %user_id, %day, "advice cache hit");
        return Ok(cached);
    }

    let intake = daily_intake(state, user_id, at).await?;
    let text = state.advisor.advise(&intake).await?;
    let cache = AdviceCache::new(user_id, at, &text, state.clock())?;
    state.advice.save(&cache).await?;

    info!(user_id = %user_id, %day, "advice generated");
    Ok(cache)
}

async fn daily_intake(
    state: &AppState,
    user_id: UserId,
    at: OffsetDateTime,
) -> AppResult<DailyIntake> {
    let user = users::services::profile(state, user_id).await?;
    let targets = users::services::targets_for(&user, state);

    let day = at.date();
    let day_records = records::services::records_between(state, user_id, day, day).await?;
    let mut calories = Calories::ZERO;
    let mut pfc = Pfc::default();
    for record in &day_records {
        calories = calories.add(record.total_calories());
        if let Some(logged) = state.record_pfcs.find_by_record_id(record.id()).await? {
            pfc = pfc.add(logged.pfc());
        }
    }

    Ok(DailyIntake {
        date: day,
        calories,
        target: targets.calories,
        pfc,
        target_pfc: targets.pfc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::services::register,
        domain::{NewRecordItem, NewUser, User},
        error::AppError,
        records::services::{create_record, PfcInput},
        test_support::*,
    };
    use time::{macros::datetime, Duration};

    const NOW: OffsetDateTime = datetime!(2024-06-15 20:00 +09:00);

    async fn registered(app: &TestApp) -> User {
        let input = NewUser {
            email: "advice@example.com",
            password: "password123",
            nickname: "yuki",
            weight_kg: 70.0,
            height_cm: 175.0,
            birth_date: "1990-01-01",
            gender: "male",
            activity_level: "moderate",
        };
        register(&app.state, input).await.expect("registered").0
    }

    #[tokio::test]
    async fn generates_once_per_local_day() {
        let app = test_app(NOW);
        let user = registered(&app).await;
        let items = [NewRecordItem {
            name: "ramen",
            calories: 2200,
        }];
        let pfc = PfcInput {
            protein: 126.0,
            fat: 70.0,
            carbs: 347.0,
        };
        create_record(&app.state, user.id(), NOW - Duration::hours(2), &items, Some(pfc))
            .await
            .expect("created");

        let first = advice_for_day(&app.state, user.id(), NOW)
            .await
            .expect("advice");
        assert!(first.advice().starts_with("Well done: 2200 of 2524 kcal"));
        assert_eq!(first.day(), datetime!(2024-06-15 00:00 +09:00));
        assert_eq!(app.advice.len(), 1);

        // a later meal the same day does not change cached advice
        create_record(&app.state, user.id(), NOW, &items, None)
            .await
            .expect("created");
        let again = advice_for_day(&app.state, user.id(), NOW + Duration::hours(1))
            .await
            .expect("advice");
        assert_eq!(again, first);
        assert_eq!(app.advice.len(), 1);
    }

    #[tokio::test]
    async fn instants_are_bucketed_by_local_day() {
        let app = test_app(NOW);
        let user = registered(&app).await;

        // 16:00 UTC on the 14th is already the 15th at +09:00
        let cache = advice_for_day(&app.state, user.id(), datetime!(2024-06-14 16:00 UTC))
            .await
            .expect("advice");
        assert_eq!(cache.date(), time::macros::date!(2024-06-15));

        advice_for_day(&app.state, user.id(), datetime!(2024-06-14 14:00 UTC))
            .await
            .expect("advice");
        assert_eq!(app.advice.len(), 2);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let app = test_app(NOW);
        let err = advice_for_day(&app.state, UserId::generate(), NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(app.advice.len(), 0);
    }
}
