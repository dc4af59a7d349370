pub mod geo {

    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Kilometers per degree of latitude, and of longitude at the equator.
    pub const KM_PER_DEGREE: f64 = 111.0;

    pub const MIN_LATITUDE: f64 = -90.0;

    pub const MAX_LATITUDE: f64 = 90.0;

    pub const MIN_LONGITUDE: f64 = -180.0;

    pub const MAX_LONGITUDE: f64 = 180.0;
}

pub mod search {

    pub const DEFAULT_LIMIT: u64 = 20;

    pub const DEFAULT_OFFSET: u64 = 0;

    pub const MAX_LIMIT: u64 = 100;

    pub const DEFAULT_RADIUS_KM: f64 = 10.0;
}

pub mod limits {

    pub const NAME_MAX_CHARS: usize = 100;

    pub const DESCRIPTION_MAX_CHARS: usize = 2000;

    pub const SPECIAL_EXPERIENCE_MAX_CHARS: usize = 1000;

    pub const COMMENT_MAX_CHARS: usize = 1000;

    pub const MIN_HIDDEN_GEM_RATING: i32 = 1;

    pub const MAX_HIDDEN_GEM_RATING: i32 = 5;
}

pub mod categories {

    /// Canonical category catalog seeded into the `categories` table:
    /// `(id, name, description, icon_name)`.
    pub const CATALOG: &[(&str, &str, &str, &str)] = &[
        (
            "food",
            "Food",
            "Local food, hidden restaurants, traditional dishes",
            "utensils",
        ),
        (
            "nature",
            "Nature",
            "Scenic views, secret places, nature spots",
            "tree",
        ),
        (
            "history",
            "History",
            "Historic sites, old buildings, monuments, local history",
            "landmark",
        ),
        (
            "culture",
            "Culture",
            "Local culture, art, traditions, events",
            "palette",
        ),
        (
            "activity",
            "Activity",
            "Experiences, adventures, sports",
            "hiking",
        ),
        (
            "photo",
            "Photo Spot",
            "Great places for photography and views",
            "camera",
        ),
        (
            "shopping",
            "Shopping",
            "Local shops, markets, souvenirs, craft workshops",
            "shopping-bag",
        ),
        (
            "accommodation",
            "Accommodation",
            "Unique inns, guesthouses, traditional houses",
            "bed",
        ),
        ("other", "Other", "Other unique spots", "star"),
    ];
}
