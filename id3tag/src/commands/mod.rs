pub mod edit;
pub mod view;
