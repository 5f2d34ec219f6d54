//! # Per-work-item supervisor configuration.
//!
//! [`Config`] carries the identity and switches of one supervisor: the
//! application name stamped on every event, the optional process id and
//! item description, the activated/dispensed name sets consulted by the
//! `optional` and `dispensable` operators, and the crash/debug switches.
//!
//! # Example
//! ```
//! use stepvisor::Config;
//!
//! let cfg = Config::new("importer")
//!     .with_process_id(std::process::id())
//!     .with_item_info("batch-2024-11-02")
//!     .activate_option("import:photos")
//!     .dispense_with("import:thumbnails");
//!
//! assert!(cfg.is_activated("import:photos"));
//! assert!(cfg.is_dispensed_with("import:thumbnails"));
//! ```

use std::collections::HashSet;

/// Configuration of one supervisor (one work item).
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Application name stamped on every event.
    pub application_name: String,
    /// Process id stamped on every event, if set.
    pub process_id: Option<u32>,
    /// Description of the work item, if set.
    pub item_info: Option<String>,
    /// Description of the log destination, for hosts that surface it.
    pub log_file_info: Option<String>,
    /// Names of optional parts that should run. `None` activates nothing.
    pub activated_options: Option<HashSet<String>>,
    /// Names of parts switched off. Dispensing wins over activation.
    pub dispensed_with: Option<HashSet<String>>,
    /// Route every event to the crash sink, not just flagged ones.
    pub always_add_crash_info: bool,
    /// Emit a `Debug` event when a deduplicated step is skipped.
    pub debug: bool,
}

impl Config {
    /// Creates a configuration with the given application name.
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
            ..Self::default()
        }
    }

    /// Sets the process id.
    pub fn with_process_id(mut self, pid: u32) -> Self {
        self.process_id = Some(pid);
        self
    }

    /// Sets the work-item description.
    pub fn with_item_info(mut self, info: impl Into<String>) -> Self {
        self.item_info = Some(info.into());
        self
    }

    /// Sets the log destination description.
    pub fn with_log_file_info(mut self, info: impl Into<String>) -> Self {
        self.log_file_info = Some(info.into());
        self
    }

    /// Activates the optional part `name`.
    pub fn activate_option(mut self, name: impl Into<String>) -> Self {
        self.activated_options
            .get_or_insert_with(HashSet::new)
            .insert(name.into());
        self
    }

    /// Switches off the part `name`.
    pub fn dispense_with(mut self, name: impl Into<String>) -> Self {
        self.dispensed_with
            .get_or_insert_with(HashSet::new)
            .insert(name.into());
        self
    }

    /// Routes every event to the crash sink.
    pub fn with_always_add_crash_info(mut self) -> Self {
        self.always_add_crash_info = true;
        self
    }

    /// Enables debug events for deduplicated skips.
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Whether the optional part `name` is activated.
    pub fn is_activated(&self, name: &str) -> bool {
        self.activated_options
            .as_ref()
            .is_some_and(|set| set.contains(name))
    }

    /// Whether the part `name` is dispensed with.
    pub fn is_dispensed_with(&self, name: &str) -> bool {
        self.dispensed_with
            .as_ref()
            .is_some_and(|set| set.contains(name))
    }
}
