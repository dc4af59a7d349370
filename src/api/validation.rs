use super::{ApiError, CreateSpotRequest, UpdateSpotRequest};
use crate::config::SearchConfig;
use crate::constants::{geo, limits};
use crate::domain::{CategoryId, NewSpot, Page, SortBy, SpotChanges, UserId};

pub fn validate_page(
    limit: Option<u64>,
    offset: Option<u64>,
    search: &SearchConfig,
) -> Result<Page, ApiError> {
    let limit = limit.unwrap_or(search.default_limit);

    if !(1..=search.max_limit).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between 1 and {}",
            limit, search.max_limit
        )));
    }

    Ok(Page::new(limit, offset.unwrap_or(0)))
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(f64, f64), ApiError> {
    if !latitude.is_finite() || !(geo::MIN_LATITUDE..=geo::MAX_LATITUDE).contains(&latitude) {
        return Err(ApiError::validation(format!(
            "Invalid latitude: {latitude}. Latitude must be between -90 and 90"
        )));
    }

    if !longitude.is_finite() || !(geo::MIN_LONGITUDE..=geo::MAX_LONGITUDE).contains(&longitude)
    {
        return Err(ApiError::validation(format!(
            "Invalid longitude: {longitude}. Longitude must be between -180 and 180"
        )));
    }

    Ok((latitude, longitude))
}

pub fn validate_radius(radius_km: f64) -> Result<f64, ApiError> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(ApiError::validation(format!(
            "Invalid radius: {radius_km}. Radius must be a non-negative number of kilometers"
        )));
    }
    Ok(radius_km)
}

/// Resolves an optional search center. Latitude and longitude come as a pair;
/// a center without a radius uses `default_radius_km`.
pub fn validate_center(
    latitude: Option<f64>,
    longitude: Option<f64>,
    radius_km: Option<f64>,
    default_radius_km: f64,
) -> Result<Option<(f64, f64, f64)>, ApiError> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => {
            let (lat, lon) = validate_coordinates(lat, lon)?;
            let radius = validate_radius(radius_km.unwrap_or(default_radius_km))?;
            Ok(Some((lat, lon, radius)))
        }
        (None, None) => Ok(None),
        _ => Err(ApiError::validation(
            "Latitude and longitude must be supplied together",
        )),
    }
}

pub fn validate_sort(sort_by: Option<&str>) -> Result<SortBy, ApiError> {
    sort_by.map_or(Ok(SortBy::default()), |value| {
        value
            .parse::<SortBy>()
            .map_err(|e| ApiError::validation(e.to_string()))
    })
}

/// Splits a comma separated category list, skipping blank entries.
#[must_use]
pub fn parse_category_list(raw: Option<&str>) -> Vec<CategoryId> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(CategoryId::from)
            .collect()
    })
    .unwrap_or_default()
}

pub fn validate_text(field: &str, value: &str, max_chars: usize) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} cannot be empty")));
    }

    if trimmed.chars().count() > max_chars {
        return Err(ApiError::validation(format!(
            "{field} must be {max_chars} characters or less"
        )));
    }

    Ok(trimmed.to_string())
}

/// Like [`validate_text`], but blank input means "no value".
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>, ApiError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => validate_text(field, text, max_chars).map(Some),
        _ => Ok(None),
    }
}

pub fn validate_rating(rating: i32) -> Result<i32, ApiError> {
    if !(limits::MIN_HIDDEN_GEM_RATING..=limits::MAX_HIDDEN_GEM_RATING).contains(&rating) {
        return Err(ApiError::validation(format!(
            "Invalid hidden gem rating: {rating}. Rating must be between 1 and 5"
        )));
    }
    Ok(rating)
}

pub fn validate_photos(photos: Vec<String>) -> Result<Vec<String>, ApiError> {
    let photos: Vec<String> = photos
        .into_iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    if photos.is_empty() {
        return Err(ApiError::validation("At least one photo is required"));
    }
    Ok(photos)
}

pub fn validate_category_ids(ids: &[String]) -> Result<Vec<CategoryId>, ApiError> {
    let ids: Vec<CategoryId> = ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(CategoryId::from)
        .collect();

    if ids.is_empty() {
        return Err(ApiError::validation("At least one category is required"));
    }
    Ok(ids)
}

pub fn validate_create_spot(req: CreateSpotRequest, owner: UserId) -> Result<NewSpot, ApiError> {
    let (latitude, longitude) = validate_coordinates(req.latitude, req.longitude)?;

    Ok(NewSpot {
        name: validate_text("Name", &req.name, limits::NAME_MAX_CHARS)?,
        description: validate_text(
            "Description",
            &req.description,
            limits::DESCRIPTION_MAX_CHARS,
        )?,
        latitude,
        longitude,
        address: req
            .address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty()),
        category_ids: validate_category_ids(&req.category_ids)?,
        user_id: owner,
        photos: validate_photos(req.photos)?,
        best_seasons: req.best_seasons,
        best_time_of_day: req.best_time_of_day,
        hidden_gem_rating: validate_rating(req.hidden_gem_rating)?,
        special_experience: validate_optional_text(
            "Special experience",
            req.special_experience.as_deref(),
            limits::SPECIAL_EXPERIENCE_MAX_CHARS,
        )?,
        ..Default::default()
    })
}

pub fn validate_update_spot(req: UpdateSpotRequest) -> Result<SpotChanges, ApiError> {
    Ok(SpotChanges {
        name: req
            .name
            .map(|name| validate_text("Name", &name, limits::NAME_MAX_CHARS))
            .transpose()?,
        description: req
            .description
            .map(|d| validate_text("Description", &d, limits::DESCRIPTION_MAX_CHARS))
            .transpose()?,
        address: req
            .address
            .map(|a| a.map(|a| a.trim().to_string()).filter(|a| !a.is_empty())),
        category_ids: req
            .category_ids
            .map(|ids| validate_category_ids(&ids))
            .transpose()?,
        photos: req.photos.map(validate_photos).transpose()?,
        best_seasons: req.best_seasons,
        best_time_of_day: req.best_time_of_day,
        hidden_gem_rating: req.hidden_gem_rating.map(validate_rating).transpose()?,
        special_experience: req
            .special_experience
            .map(|text| {
                validate_optional_text(
                    "Special experience",
                    text.as_deref(),
                    limits::SPECIAL_EXPERIENCE_MAX_CHARS,
                )
            })
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateSpotRequest {
        CreateSpotRequest {
            name: "  Cherry Blossom Lane ".into(),
            description: "A quiet lane".into(),
            latitude: 35.689,
            longitude: 139.692,
            address: Some("   ".into()),
            category_ids: vec!["nature".into(), " photo ".into()],
            photos: vec!["https://example.com/1.jpg".into()],
            best_seasons: None,
            best_time_of_day: None,
            hidden_gem_rating: 4,
            special_experience: None,
        }
    }

    #[test]
    fn test_validate_page() {
        let search = SearchConfig::default();
        assert_eq!(validate_page(None, None, &search).unwrap(), Page::new(20, 0));
        assert_eq!(
            validate_page(Some(100), Some(40), &search).unwrap(),
            Page::new(100, 40)
        );
        assert!(validate_page(Some(0), None, &search).is_err());
        assert!(validate_page(Some(101), None, &search).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(35.689, 139.692).is_ok());
        assert!(validate_coordinates(90.0, -180.0).is_ok());
        assert!(validate_coordinates(90.1, 0.0).is_err());
        assert!(validate_coordinates(0.0, 180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_validate_center() {
        assert_eq!(validate_center(None, None, Some(3.0), 10.0).unwrap(), None);
        assert_eq!(
            validate_center(Some(35.0), Some(135.0), None, 10.0).unwrap(),
            Some((35.0, 135.0, 10.0))
        );
        assert!(validate_center(Some(35.0), None, None, 10.0).is_err());
        assert!(validate_center(Some(35.0), Some(135.0), Some(-1.0), 10.0).is_err());
        assert!(validate_center(Some(35.0), Some(135.0), Some(f64::INFINITY), 10.0).is_err());
    }

    #[test]
    fn test_validate_sort() {
        assert_eq!(validate_sort(None).unwrap(), SortBy::Newest);
        assert_eq!(validate_sort(Some("popular")).unwrap(), SortBy::Popular);
        assert_eq!(validate_sort(Some("hidden_gem")).unwrap(), SortBy::HiddenGem);
        assert!(validate_sort(Some("random")).is_err());
    }

    #[test]
    fn test_parse_category_list() {
        let ids = parse_category_list(Some("food, nature,,"));
        assert_eq!(ids, vec![CategoryId::new("food"), CategoryId::new("nature")]);
        assert!(parse_category_list(None).is_empty());
    }

    #[test]
    fn test_validate_text_counts_characters() {
        assert!(validate_text("Name", &"桜".repeat(100), 100).is_ok());
        assert!(validate_text("Name", &"桜".repeat(101), 100).is_err());
        assert!(validate_text("Name", "   ", 100).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_create_spot() {
        let new = validate_create_spot(create_request(), UserId::new("user-1")).unwrap();
        assert_eq!(new.name, "Cherry Blossom Lane");
        assert_eq!(new.address, None);
        assert_eq!(
            new.category_ids,
            vec![CategoryId::new("nature"), CategoryId::new("photo")]
        );

        let mut req = create_request();
        req.photos = vec!["  ".into()];
        assert!(validate_create_spot(req, UserId::new("user-1")).is_err());

        let mut req = create_request();
        req.category_ids.clear();
        assert!(validate_create_spot(req, UserId::new("user-1")).is_err());

        let mut req = create_request();
        req.special_experience = Some("x".repeat(1001));
        assert!(validate_create_spot(req, UserId::new("user-1")).is_err());
    }

    #[test]
    fn test_validate_update_spot_only_checks_supplied_fields() {
        let changes = validate_update_spot(UpdateSpotRequest {
            hidden_gem_rating: Some(5),
            address: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.hidden_gem_rating, Some(5));
        assert_eq!(changes.address, Some(None));
        assert_eq!(changes.name, None);

        assert!(
            validate_update_spot(UpdateSpotRequest {
                name: Some(String::new()),
                ..Default::default()
            })
            .is_err()
        );
    }
}
