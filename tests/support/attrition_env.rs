use std::{
    ffi::OsStr,
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Sets environment variables for one test and restores them on drop.
pub struct AttritionEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl AttritionEnvGuard {
    pub fn new() -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        Self {
            previous: Vec::new(),
            _lock: lock,
        }
    }

    pub fn set_config_home(path: PathBuf) -> Self {
        let mut guard = Self::new();
        guard.set(attrition::app_dirs::CONFIG_HOME_ENV, path.as_os_str());
        guard
    }

    pub fn set(&mut self, key: &'static str, value: impl AsRef<OsStr>) {
        self.previous.push((key, std::env::var(key).ok()));
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

impl Drop for AttritionEnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.previous.drain(..).rev() {
            match previous {
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                Some(value) => unsafe { std::env::set_var(key, value) },
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}
