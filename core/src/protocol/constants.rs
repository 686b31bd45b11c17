//! Centralized protocol constants
//!
//! Endpoint paths, payload formats and UI timings are defined here so the
//! controllers and the backends agree on them.

/// Default base URL of the QR backend
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Endpoint that renders a QR code for the posted content
pub const GENERATE_PATH: &str = "/generate-qr";

/// Endpoint prefix for deleting a stored QR code (`/delete-qr/<id>`)
pub const DELETE_PATH: &str = "/delete-qr";

/// Prefix turning a base64 PNG payload into an `img` source
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Default request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// How long a notification stays on screen, in milliseconds
pub const NOTIFICATION_TTL_MS: u64 = 5_000;

/// Card fade-out duration before removal, in milliseconds
pub const FADE_OUT_MS: u64 = 300;

/// Duration of the stat counter count-up, in milliseconds
pub const COUNT_UP_DURATION_MS: u64 = 2_000;

/// Frame interval of the stat counter count-up, in milliseconds
pub const COUNT_UP_FRAME_MS: u64 = 16;

/// Created-time text of a card inserted by this session
pub const JUST_NOW: &str = "Just now";

/// File name stem used by the widget export
pub const WIDGET_EXPORT_NAME: &str = "aesthetic-qr-code";

/// Side length of the backend-less PNG, in pixels per module
pub const LOCAL_MODULE_PX: u32 = 8;
