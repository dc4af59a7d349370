pub mod category;
pub mod comment;
pub mod saved_list;
pub mod spot;
