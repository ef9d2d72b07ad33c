/// Relative path of the event document when nothing else is configured
pub const DEFAULT_DATA_PATH: &str = "data/event.json";

/// Where `invite render` writes the page by default
pub const DEFAULT_OUTPUT_PATH: &str = "dist/index.html";

/// Published list of demo invitations
pub const DEFAULT_DEMOS_URL: &str =
    "https://raw.githubusercontent.com/Rainier-PS/Invitation-Template/refs/heads/main/data/demos.json";

/// Document title used when the event has no title
pub const DEFAULT_PAGE_TITLE: &str = "You're Invited";

pub const FALLBACK_TITLE: &str = "Unable to load event details";
pub const FALLBACK_SUBTITLE: &str = "Please check back later.";
