//! Application coordinator that manages the complete lifecycle of autotheme.
//!
//! This module handles resource acquisition, initialization, and orchestration
//! of the core application logic. It manages:
//! - Configuration loading (creating the default file on first run)
//! - Lock file management for single-instance enforcement
//! - Signal handler setup
//! - Backend creation
//!
//! The `AutoTheme` struct uses a builder pattern:
//! - Normal startup: `AutoTheme::new(debug_enabled).run()`
//! - Embedded or test use: `AutoTheme::new(debug_enabled).without_lock().without_headers().run()`

use anyhow::{Context, Result};

use crate::{
    backend::create_applier,
    config::{self, loading::load_or_create},
    core::{Core, CoreParams},
    io::instance::{InstanceLock, ensure_single_instance},
    io::signals::setup_signal_handler,
    time::RealTimeSource,
};

/// Builder for configuring and running the autotheme poll loop.
///
/// # Examples
///
/// ```no_run
/// use autotheme::AutoTheme;
///
/// # fn main() -> anyhow::Result<()> {
/// let debug_enabled = false;
/// AutoTheme::new(debug_enabled).run()?;
/// # Ok(())
/// # }
/// ```
pub struct AutoTheme {
    debug_enabled: bool,
    create_lock: bool,
    show_headers: bool,
}

impl AutoTheme {
    /// Create a new runner with defaults matching normal run
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            create_lock: true,
            show_headers: true,
        }
    }

    /// Skip lock file creation
    pub fn without_lock(mut self) -> Self {
        self.create_lock = false;
        self
    }

    /// Skip header display
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    /// Execute the application with the configured settings.
    ///
    /// Returns `Ok(())` without polling when another instance already runs.
    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();
        }

        let config_path = config::get_config_path()?;
        let config = load_or_create(&config_path).context("Configuration failed")?;

        let lock = if self.create_lock {
            match ensure_single_instance()? {
                InstanceLock::Acquired(lock) => Some(lock),
                InstanceLock::AlreadyRunning(info) => {
                    log_pipe!();
                    match info {
                        Some(info) => log_info!("autotheme is already running (PID {})", info.pid),
                        None => log_info!("autotheme is already running"),
                    }
                    log_block_start!("Did you mean to:");
                    log_indented!("• Re-apply the current profile: autotheme reload");
                    log_indented!("• Restart the background instance: autotheme restart");
                    log_indented!("• Stop it: autotheme stop");
                    log_end!();
                    return Ok(());
                }
            }
        } else {
            None
        };

        let signal_state = setup_signal_handler(self.debug_enabled)?;

        config.log_config();

        let applier = create_applier(self.debug_enabled)?;

        if lock.is_some() {
            log_block_start!("Lock acquired, starting autotheme...");
        }

        let core = Core::new(CoreParams {
            applier,
            config,
            config_path,
            signal_state,
            time_source: Box::new(RealTimeSource),
            debug_enabled: self.debug_enabled,
            lock,
        });

        core.execute()
    }
}
