//! Résolution des jours bloqués d'un employé pour un mois cible.
//!
//! Fonction pure : (contraintes brutes, année, mois) -> jeu de dates. Les
//! saisies invalides sont ignorées, les plages inversées corrigées ; le
//! blocage Shabbat est relatif au mois cible, d'où la re-dérivation mensuelle.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;
use tracing::debug;

use crate::calendar::iter_month;
use crate::model::BlockedRange;

/// Calcule le jeu final de jours bloqués pour `(year, month)` :
/// jours explicites, plages développées bornes incluses, et vendredis +
/// samedis du mois si l'employé observe le Shabbat.
pub fn resolve_blocked_days(
    blocked_days: &[String],
    blocked_ranges: &[BlockedRange],
    observes_sabbath: bool,
    year: i32,
    month: u32,
) -> BTreeSet<NaiveDate> {
    let mut out = BTreeSet::new();

    for raw in blocked_days {
        match parse_date(raw) {
            Some(d) => {
                out.insert(d);
            }
            None => debug!(%raw, "skipping malformed blocked day"),
        }
    }

    for range in blocked_ranges {
        let (Some(a), Some(b)) = (parse_date(&range.start), parse_date(&range.end)) else {
            debug!(start = %range.start, end = %range.end, "skipping malformed blocked range");
            continue;
        };
        // plage inversée : correction silencieuse
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let mut cur = start;
        while cur <= end {
            out.insert(cur);
            let Some(next) = cur.succ_opt() else { break };
            cur = next;
        }
    }

    if observes_sabbath {
        for d in iter_month(year, month) {
            if matches!(d.weekday(), Weekday::Fri | Weekday::Sat) {
                out.insert(d);
            }
        }
    }

    out
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.trim().parse::<NaiveDate>().ok()
}
