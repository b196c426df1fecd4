mod streak_refresh;

pub use streak_refresh::StreakRefreshService;
