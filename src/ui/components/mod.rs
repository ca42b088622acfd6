pub mod form_view;
pub mod header;
pub mod landing;
pub mod progress_bar;
pub mod question_card;
pub mod question_grid;
pub mod result_panel;
