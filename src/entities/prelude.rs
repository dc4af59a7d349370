pub use super::categories::Entity as Categories;
pub use super::comments::Entity as Comments;
pub use super::photos::Entity as Photos;
pub use super::saved_list_spots::Entity as SavedListSpots;
pub use super::saved_lists::Entity as SavedLists;
pub use super::spot_categories::Entity as SpotCategories;
pub use super::spot_visits::Entity as SpotVisits;
pub use super::spots::Entity as Spots;
