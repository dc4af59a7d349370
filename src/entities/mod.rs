pub mod prelude;

pub mod categories;
pub mod comments;
pub mod photos;
pub mod saved_list_spots;
pub mod saved_lists;
pub mod spot_categories;
pub mod spot_visits;
pub mod spots;
