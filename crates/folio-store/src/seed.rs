use chrono::{Duration, Utc};

use folio_types::api::NewProgressUpdate;

use crate::Tables;

/// Fill a fresh store with the two sample updates the site ships with.
/// They take ids 1 and 2; the older week is stamped a week earlier so the
/// newest-first listing shows "Week 12" on top.
pub fn run(tables: &mut Tables) {
    let now = Utc::now();

    tables.updates.insert(
        NewProgressUpdate {
            week: "Week 12".into(),
            title: "Core Mechanics Implementation".into(),
            description: "Successfully implemented the base game mechanics and player interaction systems. The foundation is looking solid!".into(),
            date: "2024-01-15".into(),
        },
        now,
    );

    tables.updates.insert(
        NewProgressUpdate {
            week: "Week 11".into(),
            title: "UI/UX Design Phase".into(),
            description: "Completed the initial UI mockups and user flow diagrams. The interface is intuitive and engaging.".into(),
            date: "2024-01-08".into(),
        },
        now - Duration::days(7),
    );
}
