pub mod app;
pub mod layout;
pub mod pages_view;
pub mod path_prompt;
pub mod sidebar;
pub mod theme;

pub use app::App;
pub use theme::Theme;
