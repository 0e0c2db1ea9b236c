//! Most recent sponsorship or cosponsorship of a member.
//!
//! Sponsored bills only come as ids, so their introduction dates are fetched
//! in batches of [`SPONSORED_BATCH_SIZE`]. Cosponsorships already carry their
//! date. Once the winner is known, one more fetch reads its code and title.

use futures::future::try_join_all;

use crate::congress::{
    fetch_record, fetch_records, BillDateRecord, BillHeadlineRecord, CongressApiClient,
    CosponsoredBillDate, Lang,
};

use super::bill_types::BillType;
use super::display::format_date;
use super::error::CardError;

/// Upper bound on ids per record request.
pub const SPONSORED_BATCH_SIZE: usize = 10;

const HEADLINE_FIELDS: &[&str] = &["title", "billType", "billNumber"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Sponsored,
    Cosponsored,
}

/// A dated activity on one bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub bill_id: String,
    pub date: i64,
    pub kind: ActivityKind,
}

/// Rendered last action. Both parts are empty when the member has none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastAction {
    /// "H.R. 1 - For the People Act"
    pub summary: String,
    /// "(Sponsored on 01/03/2019)"
    pub time: String,
}

/// Activity with the greatest date. The first one wins a tie.
fn max_by_date(activities: impl IntoIterator<Item = Activity>) -> Option<Activity> {
    activities
        .into_iter()
        .reduce(|best, candidate| if candidate.date > best.date { candidate } else { best })
}

/// Pick the later of the latest sponsorship and latest cosponsorship.
///
/// A cosponsorship dated exactly at the latest sponsorship wins.
#[must_use]
pub fn pick_latest(sponsored: Option<Activity>, cosponsored: Option<Activity>) -> Option<Activity> {
    match (sponsored, cosponsored) {
        (Some(s), Some(c)) => Some(if s.date > c.date { s } else { c }),
        (s, c) => s.or(c),
    }
}

/// Resolve the member's last action and render it for `lang`.
///
/// # Errors
///
/// Any failed fetch, an unknown bill type, or an unrepresentable date.
pub async fn resolve_last_action(
    client: &dyn CongressApiClient,
    sponsored_ids: &[String],
    cosponsored: &[CosponsoredBillDate],
    lang: Lang,
) -> Result<LastAction, CardError> {
    let batches = sponsored_ids.chunks(SPONSORED_BATCH_SIZE).map(|ids| {
        fetch_records::<BillDateRecord>(client, ids, &["introducedDate"], lang)
    });
    let sponsored_dates = try_join_all(batches).await?;

    let latest_sponsored = max_by_date(sponsored_dates.into_iter().flatten().map(|bill| Activity {
        bill_id: bill.id,
        date: bill.introduced_date,
        kind: ActivityKind::Sponsored,
    }));
    let latest_cosponsored = max_by_date(cosponsored.iter().map(|entry| Activity {
        bill_id: entry.bill_id.clone(),
        date: entry.date,
        kind: ActivityKind::Cosponsored,
    }));

    let Some(winner) = pick_latest(latest_sponsored, latest_cosponsored) else {
        return Ok(LastAction::default());
    };
    tracing::debug!(bill_id = %winner.bill_id, kind = ?winner.kind, "last action resolved");

    let bill: BillHeadlineRecord =
        fetch_record(client, &winner.bill_id, HEADLINE_FIELDS, lang).await?;
    let bill_type = BillType::lookup(&bill.bill_type)?;
    let date = format_date(winner.date)?;

    Ok(LastAction {
        summary: format!("{} - {}", bill_type.code_display(&bill.bill_number), bill.title),
        time: activity_suffix(winner.kind, &date, lang),
    })
}

fn activity_suffix(kind: ActivityKind, date: &str, lang: Lang) -> String {
    match (lang, kind) {
        (Lang::En, ActivityKind::Sponsored) => format!("(Sponsored on {date})"),
        (Lang::En, ActivityKind::Cosponsored) => format!("(Cosponsored on {date})"),
        (Lang::Zh, ActivityKind::Sponsored) => format!("(於{date}提案)"),
        (Lang::Zh, ActivityKind::Cosponsored) => format!("(於{date}共同連署)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(id: &str, date: i64, kind: ActivityKind) -> Activity {
        Activity {
            bill_id: id.to_string(),
            date,
            kind,
        }
    }

    #[test]
    fn later_sponsorship_wins() {
        let sponsored = max_by_date([
            activity("a", 100, ActivityKind::Sponsored),
            activity("b", 300, ActivityKind::Sponsored),
        ]);
        let cosponsored = max_by_date([activity("x", 200, ActivityKind::Cosponsored)]);
        let winner = pick_latest(sponsored, cosponsored).expect("winner");
        assert_eq!(winner.bill_id, "b");
        assert_eq!(winner.kind, ActivityKind::Sponsored);
    }

    #[test]
    fn tie_goes_to_cosponsorship() {
        let winner = pick_latest(
            Some(activity("a", 100, ActivityKind::Sponsored)),
            Some(activity("x", 100, ActivityKind::Cosponsored)),
        )
        .expect("winner");
        assert_eq!(winner.kind, ActivityKind::Cosponsored);
    }

    #[test]
    fn single_side_wins_alone() {
        assert_eq!(
            pick_latest(Some(activity("a", 1, ActivityKind::Sponsored)), None)
                .expect("winner")
                .bill_id,
            "a"
        );
        assert_eq!(
            pick_latest(None, Some(activity("x", 1, ActivityKind::Cosponsored)))
                .expect("winner")
                .bill_id,
            "x"
        );
        assert_eq!(pick_latest(None, None), None);
    }

    #[test]
    fn max_by_date_keeps_first_of_equal_dates() {
        let latest = max_by_date([
            activity("first", 5, ActivityKind::Cosponsored),
            activity("second", 5, ActivityKind::Cosponsored),
        ]);
        assert_eq!(latest.expect("latest").bill_id, "first");
    }

    #[test]
    fn suffixes_by_lang() {
        assert_eq!(
            activity_suffix(ActivityKind::Sponsored, "01/03/2019", Lang::En),
            "(Sponsored on 01/03/2019)"
        );
        assert_eq!(
            activity_suffix(ActivityKind::Cosponsored, "01/03/2019", Lang::En),
            "(Cosponsored on 01/03/2019)"
        );
        assert_eq!(
            activity_suffix(ActivityKind::Sponsored, "01/03/2019", Lang::Zh),
            "(於01/03/2019提案)"
        );
        assert_eq!(
            activity_suffix(ActivityKind::Cosponsored, "01/03/2019", Lang::Zh),
            "(於01/03/2019共同連署)"
        );
    }
}
