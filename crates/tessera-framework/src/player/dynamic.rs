//! Prefix placeholders carrying a dynamic argument.

use crate::context::ResolveContext;
use crate::dispatcher::{Dispatcher, Liveness};

pub(super) fn register(d: &mut Dispatcher) {
    d.add_global_prefix("ping_", |ctx, name| {
        Some(other_ping(ctx, name).map_or_else(|| "0".to_string(), |p| p.to_string()))
    });
    d.add_global_prefix("colored_ping_", |ctx, name| {
        Some(other_ping(ctx, name).map_or_else(|| "0".to_string(), |p| ctx.rules().format(p)))
    });

    d.add_prefix("has_permission_", Liveness::Live, |ctx, s, node| {
        let granted = !node.is_empty() && s.has_permission(node);
        Some(ctx.settings().render_bool(granted))
    });
    d.add_prefix("item_in_hand_level_", Liveness::Live, |ctx, s, enchantment| {
        let item = ctx.accessors().item_in_hand(s);
        Some(
            ctx.accessors()
                .enchantment_level(item.as_ref(), enchantment)
                .to_string(),
        )
    });
    d.add_prefix("item_in_offhand_level_", Liveness::Live, |ctx, s, enchantment| {
        let item = ctx.accessors().item_in_off_hand(s);
        Some(
            ctx.accessors()
                .enchantment_level(item.as_ref(), enchantment)
                .to_string(),
        )
    });
    d.add_checked_prefix(
        "locale_",
        Liveness::Live,
        |variant| LOCALE_VARIANTS.contains(&variant),
        |ctx, s, variant| locale_part(&ctx.accessors().locale(s), variant),
    );
}

/// Ping of another online player, looked up by name.
fn other_ping(ctx: &ResolveContext, name: &str) -> Option<i64> {
    if name.is_empty() {
        return None;
    }
    let player = ctx.host().find_player(name)?;
    if !player.is_online() {
        return None;
    }
    Some(i64::from(ctx.accessors().ping(player.as_ref())))
}

const LOCALE_VARIANTS: [&str; 3] = ["language", "country", "short"];

/// Picks a part of a locale such as `de_DE`.
///
/// `language` → `de`, `country` → `DE`, `short` → `de-DE`. Unknown
/// variants are not placeholders.
fn locale_part(locale: &str, variant: &str) -> Option<String> {
    let (language, country) = locale.split_once('_').unwrap_or((locale, ""));
    let language = language.to_ascii_lowercase();
    let country = country.to_ascii_uppercase();
    match variant {
        "language" => Some(language),
        "country" => Some(country),
        "short" if country.is_empty() => Some(language),
        "short" => Some(format!("{language}-{country}")),
        _ => None,
    }
}
