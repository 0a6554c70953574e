use axum::{
    extract::{Multipart, Path, Query, State},
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;
use reqwest::multipart::Form as UploadForm;
use validator::Validate;

use crate::backend::check_record_id;
use crate::entities::ride::RideAction;
use crate::error::{AppError, AppResult};
use crate::handlers::{
    outcome_flash, redirect_with, FlashRedirect, PageContext, PageResponse, RecordId,
};
use crate::session::SessionContext;
use crate::utils::flash::Flash;
use crate::utils::multipart::FormUpload;
use crate::utils::pagination::{PageQuery, Pagination};
use crate::utils::validation::not_blank;
use crate::views::driver as views;
use crate::AppState;

const COMPLETED_PER_PAGE: u32 = 5;

pub async fn profile(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
) -> AppResult<PageResponse> {
    let (me, token) = session.require().await?;
    let user = state.backend.user(&token, &me.id).await?.into_data()?;

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::profile_page(&ctx.chrome(), &user))))
}

const MISSING_FIELDS: &str = "Please fill all required fields!";

/// Text fields of the add-vehicle form.
#[derive(Debug, Validate)]
pub struct VehicleFields {
    #[validate(custom(function = "not_blank", message = "Please fill all required fields!"))]
    pub model: String,
    #[validate(required(message = "Please fill all required fields!"))]
    pub year: Option<u16>,
    #[validate(
        required(message = "Please fill all required fields!"),
        range(min = 1, message = "Max capacity must be at least 1")
    )]
    pub max_capacity: Option<u16>,
    pub kind: String,
}

impl VehicleFields {
    fn from_upload(upload: &FormUpload) -> Self {
        let number = |name: &str| upload.field(name).and_then(|v| v.trim().parse().ok());
        let kind = upload.field("type").map(str::trim).filter(|k| !k.is_empty());
        Self {
            model: upload.field("model").unwrap_or_default().trim().to_string(),
            year: number("year"),
            max_capacity: number("maxCapacity"),
            kind: kind.unwrap_or("Car").to_string(),
        }
    }
}

fn vehicle_form(owner: &str, mut upload: FormUpload) -> AppResult<UploadForm> {
    let image = upload
        .take_file("vehicleImage")
        .ok_or_else(|| AppError::BadRequest("Please upload a vehicle image!".to_string()))?;

    let fields = VehicleFields::from_upload(&upload);
    fields.validate()?;
    let (Some(year), Some(capacity)) = (fields.year, fields.max_capacity) else {
        return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
    };

    Ok(UploadForm::new()
        .text("owner", owner.to_string())
        .text("model", fields.model)
        .text("year", year.to_string())
        .text("maxCapacity", capacity.to_string())
        .text("type", fields.kind)
        .part("vehicleImage", image.into_part()?))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<FlashRedirect> {
    let (me, token) = session.require().await?;
    let upload = FormUpload::read(multipart).await?;

    let form = match vehicle_form(&me.id, upload) {
        Ok(form) => form,
        Err(AppError::BadRequest(message)) => {
            return Ok(redirect_with(jar, Flash::error(message), "/Driver/profile"));
        }
        Err(e) => return Err(e),
    };

    let flash = outcome_flash(
        state.backend.create_vehicle(&token, form).await,
        "Vehicle added successfully!",
        "Failed to add vehicle",
    )?;
    Ok(redirect_with(jar, flash, "/Driver/profile"))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    RecordId(vehicle_id): RecordId,
) -> AppResult<FlashRedirect> {
    let (_, token) = session.require().await?;

    let flash = outcome_flash(
        state.backend.delete_vehicle(&token, &vehicle_id).await,
        "Vehicle deleted successfully!",
        "Failed to delete vehicle",
    )?;
    Ok(redirect_with(jar, flash, "/Driver/profile"))
}

/// Rides the driver can still act on.
pub async fn active_rides(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let mut rides = state
        .backend
        .all_rides(Some(&token), None, None)
        .await?
        .into_data()?
        .data;
    rides.retain(|ride| ride.ride_status.is_active());

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((jar, Html(views::manage_rides_page(&ctx.chrome(), &rides))))
}

pub async fn ride_action(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Path((ride_id, action)): Path<(String, String)>,
) -> AppResult<FlashRedirect> {
    let (me, token) = session.require().await?;
    check_record_id(&ride_id)?;
    let action = RideAction::from_slug(&action)
        .filter(|a| *a != RideAction::Cancel)
        .ok_or_else(|| AppError::NotFound("Unknown ride action".to_string()))?;

    tracing::info!(driver = %me.id, ride_id = %ride_id, action = action.slug(), "Ride transition");
    let flash = outcome_flash(
        state.backend.transition_ride(&token, action, &ride_id).await,
        &format!("Ride {} successfully", action.past_tense()),
        "Something went wrong",
    )?;
    Ok(redirect_with(jar, flash, "/Driver/manage-ride"))
}

pub async fn completed_rides(
    State(state): State<AppState>,
    session: SessionContext,
    jar: CookieJar,
    Query(query): Query<PageQuery>,
) -> AppResult<PageResponse> {
    let (_, token) = session.require().await?;
    let page = query.page();

    let listing = state
        .backend
        .driver_completed_rides(&token, page, COMPLETED_PER_PAGE)
        .await?
        .into_data()?;
    let pager = Pagination::from_meta(page, listing.meta.as_ref());

    let (jar, ctx) = PageContext::load(&session, jar).await;
    Ok((
        jar,
        Html(views::completed_rides_page(&ctx.chrome(), &listing.data, &pager)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::multipart::UploadedFile;

    fn photo() -> UploadedFile {
        UploadedFile {
            file_name: "car.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        }
    }

    fn rejection(result: AppResult<UploadForm>) -> String {
        match result {
            Err(AppError::BadRequest(message)) => message,
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("form was accepted"),
        }
    }

    #[test]
    fn vehicle_needs_an_image() {
        let upload = FormUpload::from_fields(&[("model", "Axio"), ("year", "2018"), ("maxCapacity", "4")]);
        assert_eq!(rejection(vehicle_form("d1", upload)), "Please upload a vehicle image!");
    }

    #[test]
    fn vehicle_needs_numeric_year_and_capacity() {
        let upload = FormUpload::from_fields(&[("model", "Axio"), ("year", "new"), ("maxCapacity", "4")])
            .with_file("vehicleImage", photo());
        assert_eq!(rejection(vehicle_form("d1", upload)), "Please fill all required fields!");

        let upload = FormUpload::from_fields(&[("model", "  "), ("year", "2018"), ("maxCapacity", "4")])
            .with_file("vehicleImage", photo());
        assert_eq!(rejection(vehicle_form("d1", upload)), "Please fill all required fields!");
    }

    #[test]
    fn vehicle_type_defaults_to_car() {
        let upload = FormUpload::from_fields(&[("model", "Axio"), ("year", "2018"), ("maxCapacity", "4")]);
        let fields = VehicleFields::from_upload(&upload);
        assert!(fields.validate().is_ok());
        assert_eq!(fields.kind, "Car");
        assert_eq!(fields.max_capacity, Some(4));
    }

    #[test]
    fn complete_vehicle_form_is_accepted() {
        let upload = FormUpload::from_fields(&[
            ("model", "Axio"),
            ("year", "2018"),
            ("maxCapacity", "4"),
            ("type", "Car"),
        ])
        .with_file("vehicleImage", photo());
        assert!(vehicle_form("d1", upload).is_ok());
    }
}
