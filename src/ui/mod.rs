pub mod components;
pub mod form;
pub mod layout;
pub mod line_input;
pub mod theme;
