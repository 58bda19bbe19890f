use std::sync::Arc;

use chrono_tz::Tz;
use tracing::{info, warn};

use crate::catalog::{ClassCatalog, InvalidTimezone};

/// Admin entry point for moving the whole schedule into another timezone.
#[derive(Debug, Clone)]
pub struct TimezoneRewriter {
    catalog: Arc<ClassCatalog>,
}

impl TimezoneRewriter {
    pub fn new(catalog: Arc<ClassCatalog>) -> Self {
        Self { catalog }
    }

    pub fn apply(&self, timezone: &str) -> Result<Tz, InvalidTimezone> {
        match self.catalog.rewrite_timezone(timezone) {
            Ok(tz) => {
                info!(timezone = %tz, "Timezone changed for all classes");
                Ok(tz)
            }
            Err(err) => {
                warn!(timezone, "Timezone change rejected");
                Err(err)
            }
        }
    }

    pub fn current(&self) -> Tz {
        self.catalog.timezone()
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::Asia::Kolkata;
    use chrono_tz::Europe::London;

    use super::*;
    use crate::seed::seed_classes;

    #[test]
    fn test_apply_switches_current_zone() {
        let catalog = Arc::new(ClassCatalog::new(Kolkata, seed_classes(Kolkata).unwrap()));
        let rewriter = TimezoneRewriter::new(catalog.clone());

        assert_eq!(rewriter.apply("Europe/London"), Ok(London));
        assert_eq!(rewriter.current(), London);
        assert!(
            catalog
                .list()
                .iter()
                .all(|class| class.scheduled.timezone() == London)
        );
    }

    #[test]
    fn test_apply_rejects_unknown_zone() {
        let catalog = Arc::new(ClassCatalog::new(Kolkata, seed_classes(Kolkata).unwrap()));
        let rewriter = TimezoneRewriter::new(catalog);

        assert!(rewriter.apply("Mars/Olympus_Mons").is_err());
        assert!(rewriter.apply("").is_err());
        assert_eq!(rewriter.current(), Kolkata);
    }
}
