use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use sitewatch_core::{
    fingerprint, normalize, plan_check_update, CheckOutcome, MonitoredSite, SiteStatus,
};

fn init_logging() {
    sitewatch_logging::initialize_for_tests();
}

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn fetched(html: &str) -> CheckOutcome {
    CheckOutcome::Fetched {
        content_hash: fingerprint(&normalize(html)),
    }
}

fn check(site: &mut MonitoredSite, outcome: CheckOutcome, now: DateTime<Utc>) {
    let patch = plan_check_update(site, outcome, now);
    site.apply(&patch);
}

#[test]
fn change_is_reported_once_then_reverts_to_monitoring() {
    init_logging();
    let mut site = MonitoredSite::new("s1".into(), "Site", "https://example.com", at(0));
    let h1 = fingerprint(&normalize("Hello"));
    let h2 = fingerprint(&normalize("Hello World"));

    check(&mut site, fetched("Hello"), at(10));
    assert_eq!(site.status, SiteStatus::Monitoring);
    assert_eq!(site.last_content_hash, h1);
    assert_eq!(site.last_changed_at, None);
    assert_eq!(site.last_checked_at, Some(at(10)));

    check(&mut site, fetched("Hello"), at(20));
    assert_eq!(site.status, SiteStatus::Monitoring);
    assert_eq!(site.last_content_hash, h1);
    assert_eq!(site.last_changed_at, None);
    assert_eq!(site.last_checked_at, Some(at(20)));

    check(&mut site, fetched("Hello World"), at(30));
    assert_eq!(site.status, SiteStatus::ChangeDetected);
    assert_eq!(site.last_content_hash, h2);
    assert_eq!(site.last_changed_at, Some(at(30)));

    check(&mut site, fetched("Hello World"), at(40));
    assert_eq!(site.status, SiteStatus::Monitoring);
    assert_eq!(site.last_content_hash, h2);
    assert_eq!(site.last_changed_at, Some(at(30)));
    assert_eq!(site.last_checked_at, Some(at(40)));
}

#[test]
fn failure_keeps_hash_and_change_time_but_advances_check_time() {
    init_logging();
    let mut site = MonitoredSite::new("s1".into(), "Site", "https://example.com", at(0));
    site.last_content_hash = "h1".into();
    site.status = SiteStatus::Monitoring;
    site.last_changed_at = Some(at(5));
    site.last_checked_at = Some(at(6));

    check(
        &mut site,
        CheckOutcome::Failed {
            reason: "network error".into(),
        },
        at(50),
    );

    assert_eq!(site.status, SiteStatus::Error);
    assert_eq!(site.last_content_hash, "h1");
    assert_eq!(site.last_changed_at, Some(at(5)));
    assert_eq!(site.last_checked_at, Some(at(50)));
    assert_eq!(site.last_error.as_deref(), Some("network error"));
}

#[test]
fn recovery_after_error_compares_against_last_good_hash() {
    init_logging();
    let mut site = MonitoredSite::new("s1".into(), "Site", "https://example.com", at(0));
    check(&mut site, fetched("<p>one</p>"), at(1));
    check(
        &mut site,
        CheckOutcome::Failed {
            reason: "timeout".into(),
        },
        at(2),
    );

    check(&mut site, fetched("<p>one</p>"), at(3));
    assert_eq!(site.status, SiteStatus::Monitoring);
    assert_eq!(site.last_error, None);

    check(
        &mut site,
        CheckOutcome::Failed {
            reason: "timeout".into(),
        },
        at(4),
    );
    check(&mut site, fetched("<p>two</p>"), at(5));
    assert_eq!(site.status, SiteStatus::ChangeDetected);
    assert_eq!(site.last_changed_at, Some(at(5)));
}

#[test]
fn first_successful_check_is_never_a_change() {
    let site = MonitoredSite::new("s1".into(), "Site", "https://example.com", at(0));
    let patch = plan_check_update(&site, fetched("anything"), at(1));
    assert_eq!(patch.status, Some(SiteStatus::Monitoring));
    assert_eq!(patch.last_changed_at, None);
}
