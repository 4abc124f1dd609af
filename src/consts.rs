pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for the dashboard worker
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Maximum number of pending UI commands before key presses are dropped
    pub const COMMAND_QUEUE_SIZE: usize = 32;

    // =============================================================================
    // PAGINATION
    // =============================================================================

    /// Number of transactions shown per table page.
    pub const ITEMS_PER_PAGE: usize = 15;

    /// Number of leading characters of a transaction ID shown in the table.
    pub const SHORT_ID_LEN: usize = 8;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Background polling configuration
    pub mod polling {
        use std::time::Duration;

        /// Interval between unconditional list refreshes (milliseconds)
        pub const POLL_INTERVAL_MS: u64 = 3_000;

        /// Connect and overall timeout for a single API request (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        /// Helper function to get the poll interval
        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }

        /// Helper function to get the request timeout
        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    /// Simulation request configuration
    pub mod simulation {
        use std::time::Duration;

        /// Default number of transactions generated per simulation
        pub const DEFAULT_COUNT: u32 = 10;
        pub const MIN_COUNT: u32 = 1;
        pub const MAX_COUNT: u32 = 100;

        /// Default spacing between generated transactions (milliseconds)
        pub const DEFAULT_INTERVAL_MS: u64 = 500;
        pub const MAX_INTERVAL_MS: u64 = 5_000;
        /// Step used by the interval controls in the UI
        pub const INTERVAL_STEP_MS: u64 = 100;

        /// Extra wait on top of the expected generation time before re-fetching
        pub const FOLLOW_UP_MARGIN_MS: u64 = 200;

        /// Time to wait after scheduling a simulation before the follow-up refresh
        pub fn follow_up_delay(count: u32, interval_ms: u64) -> Duration {
            Duration::from_millis(
                u64::from(count)
                    .saturating_mul(interval_ms)
                    .saturating_add(FOLLOW_UP_MARGIN_MS),
            )
        }
    }

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    pub mod ui {
        use std::time::Duration;

        /// How long the splash screen stays up unless a key is pressed
        pub const SPLASH_DURATION_MS: u64 = 1_500;

        /// How long the "Copied!" marker stays next to a row
        pub const COPY_FEEDBACK_MS: u64 = 2_000;

        pub const fn splash_duration() -> Duration {
            Duration::from_millis(SPLASH_DURATION_MS)
        }

        pub const fn copy_feedback() -> Duration {
            Duration::from_millis(COPY_FEEDBACK_MS)
        }
    }
}
