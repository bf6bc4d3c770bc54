//! Placeholders that resolve for offline subjects too.

use super::{boolean, int, location, text};
use crate::context::ResolveContext;
use crate::dispatcher::{Dispatcher, Liveness};
use tessera_core::foundation::render_float;
use tessera_core::{Location, Property, Subject};

pub(super) fn register(d: &mut Dispatcher) {
    d.add_static("name", Liveness::Any, |_, s| s.name().to_string());
    d.add_static("uuid", Liveness::Any, |_, s| text(s, Property::Uuid));
    d.add_static("has_played_before", Liveness::Any, |ctx, s| {
        boolean(ctx, s, Property::HasPlayedBefore)
    });
    d.add_static("online", Liveness::Any, |ctx, s| {
        ctx.settings().render_bool(s.is_online())
    });
    d.add_static("is_whitelisted", Liveness::Any, |ctx, s| {
        boolean(ctx, s, Property::Whitelisted)
    });
    d.add_static("is_banned", Liveness::Any, |ctx, s| {
        boolean(ctx, s, Property::Banned)
    });
    d.add_static("is_op", Liveness::Any, |ctx, s| boolean(ctx, s, Property::Op));

    for (key, property) in [
        ("first_played", Property::FirstPlayed),
        ("first_join", Property::FirstPlayed),
        ("last_played", Property::LastPlayed),
        ("last_join", Property::LastPlayed),
    ] {
        d.add_static(key, Liveness::Any, move |_, s| int(s, property));
    }
    for (key, property) in [
        ("first_played_formatted", Property::FirstPlayed),
        ("first_join_date", Property::FirstPlayed),
        ("last_played_formatted", Property::LastPlayed),
        ("last_join_date", Property::LastPlayed),
    ] {
        d.add_static(key, Liveness::Any, move |ctx, s| date(ctx, s, property));
    }

    d.add_static("bed_x", Liveness::Any, |_, s| bed(s, |l| render_float(l.x)));
    d.add_static("bed_y", Liveness::Any, |_, s| bed(s, |l| render_float(l.y)));
    d.add_static("bed_z", Liveness::Any, |_, s| bed(s, |l| render_float(l.z)));
    d.add_static("bed_world", Liveness::Any, |_, s| {
        bed(s, |l| l.world_name().to_string())
    });
}

fn date(ctx: &ResolveContext, subject: &dyn Subject, property: Property) -> String {
    let millis = subject
        .property(property)
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    ctx.settings().format_timestamp(millis)
}

fn bed(subject: &dyn Subject, render: impl FnOnce(&Location) -> String) -> String {
    location(subject, Property::BedSpawn)
        .map(|l| render(&l))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::super::dispatcher;
    use super::super::test_support::{TestHost, context};
    use tessera_core::{Location, Property, SubjectSnapshot};

    fn veteran() -> SubjectSnapshot {
        SubjectSnapshot::new("Alice")
            .offline()
            .with(Property::Uuid, "069a79f4-44e9-4726-a5be-fca90e38aaf5")
            .with(Property::HasPlayedBefore, true)
            .with(Property::Op, false)
            .with(Property::FirstPlayed, 1_710_408_413_000_i64)
            .with(Property::BedSpawn, Location::new("world", 12.0, 64.0, -3.5))
    }

    #[test]
    fn test_offline_keys_resolve() {
        let d = dispatcher();
        let ctx = context(20, TestHost::default());
        let alice = veteran();
        let resolve = |token| d.dispatch(&ctx, token, Some(&alice));

        assert_eq!(resolve("name").as_deref(), Some("Alice"));
        assert_eq!(
            resolve("uuid").as_deref(),
            Some("069a79f4-44e9-4726-a5be-fca90e38aaf5")
        );
        assert_eq!(resolve("online").as_deref(), Some("no"));
        assert_eq!(resolve("has_played_before").as_deref(), Some("yes"));
        assert_eq!(resolve("is_op").as_deref(), Some("no"));
        assert_eq!(resolve("is_banned").as_deref(), Some("no"));
        assert_eq!(resolve("first_join").as_deref(), Some("1710408413000"));
        assert_eq!(resolve("first_join_date").as_deref(), Some("03/14/24 09:26:53"));
        assert_eq!(resolve("last_played").as_deref(), Some("0"));
        assert_eq!(resolve("bed_x").as_deref(), Some("12.0"));
        assert_eq!(resolve("bed_z").as_deref(), Some("-3.5"));
        assert_eq!(resolve("bed_world").as_deref(), Some("world"));
    }

    #[test]
    fn test_live_keys_are_empty_offline() {
        let d = dispatcher();
        let ctx = context(20, TestHost::default());
        let alice = veteran().with(Property::Health, 20.0);
        assert_eq!(d.dispatch(&ctx, "health", Some(&alice)).as_deref(), Some(""));
        assert_eq!(d.dispatch(&ctx, "ping", Some(&alice)).as_deref(), Some(""));
    }

    #[test]
    fn test_missing_bed_is_empty() {
        let d = dispatcher();
        let ctx = context(20, TestHost::default());
        let bob = SubjectSnapshot::new("Bob");
        assert_eq!(d.dispatch(&ctx, "bed_x", Some(&bob)).as_deref(), Some(""));
    }
}
