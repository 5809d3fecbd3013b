//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 6;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum full name length
pub const MAX_FULL_NAME_LENGTH: u64 = 120;

/// Domain used to turn a candidate phone number into a login email
pub const DEFAULT_PHONE_LOGIN_DOMAIN: &str = "jee.bf";

/// Minimum number of digits in a candidate phone number
pub const MIN_PHONE_DIGITS: usize = 8;

// =============================================================================
// STORAGE DEFAULTS
// =============================================================================

/// Default bucket for candidate uploads
pub const DEFAULT_STORAGE_BUCKET: &str = "candidatures";

/// Default root directory of the filesystem object store
pub const DEFAULT_STORAGE_ROOT: &str = "/data/objects";

/// Default public base URL for stored objects
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080/files";

/// Default maximum upload size in bytes (200 MB, videos included)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Upload purposes, used in stored object names
pub mod upload_purposes {
    pub const DOCUMENT: &str = "document";
    pub const VIDEO: &str = "video";
}

/// Maximum video title length
pub const MAX_VIDEO_TITLE_LENGTH: usize = 120;

// =============================================================================
// PROFILE ROLES
// =============================================================================

/// Stored role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const JURY: &str = "jury";
    pub const CANDIDATE: &str = "candidat";
}

/// Marker prefixed to a jury speciality to denote the category president
pub const PRESIDENT_MARKER: &str = "president_";

// =============================================================================
// SCORING
// =============================================================================

/// Lowest value of a rubric sub-score
pub const MIN_SUB_SCORE: i32 = 0;

/// Highest value of a rubric sub-score
pub const MAX_SUB_SCORE: i32 = 10;

/// Starting value of an unscored rubric sub-score
pub const DEFAULT_SUB_SCORE: i32 = 5;

// =============================================================================
// VIEW PATHS
// =============================================================================

/// In-app view paths
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const CANDIDATE_DASHBOARD: &str = "/dashboard-candidat";
    pub const JURY_DASHBOARD: &str = "/jury";
    pub const JURY_NOTATION_PREFIX: &str = "/jury/notation/";
    pub const ADMIN_DASHBOARD: &str = "/admin";
    pub const ADMIN_RESULTS: &str = "/admin/results";
    pub const ADMIN_JURIES: &str = "/admin/jurys";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

/// Path under which stored objects are served
pub const FILES_BASE_PATH: &str = "/files";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 10;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Upload endpoints - max requests
    pub const UPLOAD_MAX_REQUESTS: i64 = 20;
    /// Upload endpoints - window in seconds
    pub const UPLOAD_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 300;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// EXPORT
// =============================================================================

/// Header row of the ranking export
pub const RANKING_EXPORT_HEADER: &[&str] = &["Rank", "Full Name", "Competition", "Evaluations", "Average"];

/// Header row of the candidate export
pub const CANDIDATE_EXPORT_HEADER: &[&str] = &[
    "Full Name",
    "Phone",
    "Competition",
    "Document",
    "Videos",
    "Registered At",
];
