/// Base URL prepended to bundled assets such as the placeholder image.
/// Set `ASSET_BASE_URL` at build time to serve assets from a CDN.
pub fn get_asset_base_url() -> &'static str {
    option_env!("ASSET_BASE_URL").unwrap_or("")
}

pub fn placeholder_image_url() -> String {
    format!("{}/assets/project-placeholder.svg", get_asset_base_url())
}

// Local storage keys
pub const SELECTED_CATEGORIES_KEY: &str = "portfolio.selectedCategories";
pub const SELECTED_TAGS_KEY: &str = "portfolio.selectedTags";
pub const THEME_KEY: &str = "theme";

/// Delay between mounting the modal and settling it into `Open`.
pub const MODAL_ENTER_MS: u32 = 30;
/// Exit transition length; the modal keeps its project until this elapses.
pub const MODAL_EXIT_MS: u32 = 300;
/// Idle time before the player controls fade out while playing.
pub const CONTROLS_HIDE_MS: u32 = 2_500;

/// How long the gallery shows skeleton cards on first mount.
pub const GALLERY_LOADING_MS: u32 = 1_200;
/// Skeleton cards shown while loading, before any limit applies.
pub const SKELETON_CARDS: usize = 6;

/// Scroll offset after which the scroll-to-top button shows up.
pub const SCROLL_TOP_THRESHOLD_PX: f64 = 400.0;

/// Number of projects shown by the condensed gallery on the home page.
pub const HOME_PREVIEW_LIMIT: usize = 3;
