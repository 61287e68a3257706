/// Prefix applied to every cache key so the admin cache never collides with
/// other SyncKaro apps sharing the same store.
pub const CACHE_PREFIX: &str = "synckaro_admin_";

/// Teachers are paginated locally with a fixed page size.
pub const TEACHER_PAGE_SIZE: usize = 10;

/// Page sizes offered on the student directory.
pub const STUDENT_PAGE_SIZE_OPTIONS: [usize; 4] = [50, 100, 200, 300];

/// Default student page size.
pub const DEFAULT_STUDENT_PAGE_SIZE: usize = STUDENT_PAGE_SIZE_OPTIONS[0];

/// The teacher picker asks for every teacher in one page.
pub const TEACHER_LOOKUP_LIMIT: usize = 1000;

/// Recent trades shown on a teacher profile.
pub const RECENT_TRADES_LIMIT: usize = 10;

/// Top students listed on teacher statistics.
pub const TOP_STUDENTS_LIMIT: usize = 10;

/// Role sent with the OTP login request.
pub const ADMIN_ROLE: &str = "admin";

/// Placeholder for metrics with no data.
pub const NOT_AVAILABLE: &str = "N/A";
