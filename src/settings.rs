use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    /// IANA zone the seed schedule is localized in.
    pub seed_timezone: String,
    /// IANA zone every `booking_time` is stamped in.
    pub booking_timezone: String,
    /// Answer an empty bookings lookup with 404 instead of `200 []`.
    pub empty_bookings_not_found: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            enable_swagger: true,
            port: 8080,
            seed_timezone: "Asia/Kolkata".to_string(),
            booking_timezone: "Asia/Kolkata".to_string(),
            empty_bookings_not_found: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let defaults = Settings::default();

        let config = Config::builder()
            // APP_PORT, APP_SEED_TIMEZONE, ...
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .set_default("debug", defaults.debug)?
            .set_default("enable_swagger", defaults.enable_swagger)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("seed_timezone", defaults.seed_timezone)?
            .set_default("booking_timezone", defaults.booking_timezone)?
            .set_default("empty_bookings_not_found", defaults.empty_bookings_not_found)?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const VARS: [&str; 6] = [
        "APP_DEBUG",
        "APP_ENABLE_SWAGGER",
        "APP_PORT",
        "APP_SEED_TIMEZONE",
        "APP_BOOKING_TIMEZONE",
        "APP_EMPTY_BOOKINGS_NOT_FOUND",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env-touching tests are serialized.
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let settings = Settings::from_env().unwrap();

        assert!(!settings.debug);
        assert!(settings.enable_swagger);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.seed_timezone, "Asia/Kolkata");
        assert_eq!(settings.booking_timezone, "Asia/Kolkata");
        assert!(settings.empty_bookings_not_found);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: env-touching tests are serialized.
        unsafe {
            std::env::set_var("APP_PORT", "9090");
            std::env::set_var("APP_SEED_TIMEZONE", "Europe/Warsaw");
            std::env::set_var("APP_BOOKING_TIMEZONE", "UTC");
            std::env::set_var("APP_ENABLE_SWAGGER", "false");
            std::env::set_var("APP_EMPTY_BOOKINGS_NOT_FOUND", "false");
        }

        let settings = Settings::from_env().unwrap();
        clear_env();

        assert_eq!(settings.port, 9090);
        assert_eq!(settings.seed_timezone, "Europe/Warsaw");
        assert_eq!(settings.booking_timezone, "UTC");
        assert!(!settings.enable_swagger);
        assert!(!settings.empty_bookings_not_found);
    }
}
